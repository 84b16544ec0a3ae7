use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReconcilerError {
    #[error("Object is missing essential metadata!")]
    MissingObjectMetadata,
    #[error("Couldn't communicate with the cluster API! Reason: {}", .0)]
    KubeApiError(kube::Error),
}
