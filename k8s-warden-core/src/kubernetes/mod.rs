pub mod operations;
pub mod store;

/// Whether an API error is the standard not-found response.
pub fn is_not_found(error: &kube::Error) -> bool {
    matches!(error, kube::Error::Api(response) if response.code == 404)
}
