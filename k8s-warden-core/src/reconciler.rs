use log::info;

use crate::{
    events::{EventRecord, EventSink},
    kubernetes::{
        is_not_found,
        store::{ObjectStore, StoreObject},
    },
    resources::{
        crd::v1alpha1::warden::{ObjectRef, Warden, WardenStatus},
        monitoring::{DesiredObject, ManagedResource, ResourceDescriptor, MANAGED_RESOURCES},
        release::WardenRelease,
        ParentRef,
    },
};

/// One reconcile pass over a parent object. Carries the dirty flag the
/// caller consults to decide whether the status subresource needs a write.
pub struct WardenRequest {
    pub warden: Warden,
    pub status_dirty: bool,
}

impl WardenRequest {
    pub fn new(warden: Warden) -> Self {
        Self {
            warden,
            status_dirty: false,
        }
    }
}

/// Keeps the managed monitoring resources in sync with their desired state,
/// creating missing ones and overwriting drifted ones.
pub struct MonitoringReconciler<S: ObjectStore, E: EventSink> {
    store: S,
    events: E,
    release: WardenRelease,
    parent: ParentRef,
}

impl<S: ObjectStore, E: EventSink> MonitoringReconciler<S, E> {
    pub fn new(store: S, events: E, release: WardenRelease, parent: ParentRef) -> Self {
        Self {
            store,
            events,
            release,
            parent,
        }
    }

    /// Walks the managed set in table order. The first store error aborts
    /// the pass and is returned untouched, later resources are left for the
    /// next pass.
    pub async fn reconcile(&self) -> Result<(), kube::Error> {
        for descriptor in &MANAGED_RESOURCES {
            match (descriptor.build)(&self.release, &self.parent) {
                DesiredObject::PrometheusRule(desired) => {
                    self.reconcile_resource(descriptor, desired).await?
                }
                DesiredObject::Role(desired) => {
                    self.reconcile_resource(descriptor, desired).await?
                }
                DesiredObject::RoleBinding(desired) => {
                    self.reconcile_resource(descriptor, desired).await?
                }
                DesiredObject::Service(desired) => {
                    self.reconcile_resource(descriptor, desired).await?
                }
                DesiredObject::ServiceMonitor(desired) => {
                    self.reconcile_resource(descriptor, desired).await?
                }
            }
        }

        Ok(())
    }

    /// Recomputes the related-objects projection from the managed set and
    /// flags the request dirty when the stored projection doesn't match.
    /// Membership is order-insensitive, a reordered but equal set is clean.
    pub fn update_related_objects(&self, request: &mut WardenRequest) {
        let desired = MANAGED_RESOURCES
            .iter()
            .map(|descriptor| descriptor.object_ref(&self.release.namespace))
            .collect::<Vec<_>>();

        let status = request.warden.status.get_or_insert_with(WardenStatus::default);
        let current = status.related_objects.as_deref().unwrap_or_default();

        if !same_members(current, &desired) {
            status.related_objects = Some(desired);
            request.status_dirty = true;
        }
    }

    async fn reconcile_resource<K>(
        &self,
        descriptor: &ResourceDescriptor,
        desired: K,
    ) -> Result<(), kube::Error>
    where
        K: ManagedResource + StoreObject,
    {
        let observed = self
            .store
            .get::<K>(&self.release.namespace, descriptor.name)
            .await;

        match observed {
            Ok(observed) => self.heal_drift(descriptor, observed, desired).await,
            Err(error) if is_not_found(&error) => {
                self.store.create(&desired).await?;

                info!(
                    "Created '{}' {} resource!",
                    descriptor.name,
                    descriptor.kind.as_str()
                );
                self.events
                    .emit(EventRecord::created(descriptor.kind.as_str(), descriptor.name));

                Ok(())
            }
            Err(error) => Err(error),
        }
    }

    /// Compares the three managed facets and, when any of them drifted,
    /// overwrites all three with the desired values in a single update.
    async fn heal_drift<K>(
        &self,
        descriptor: &ResourceDescriptor,
        mut observed: K,
        desired: K,
    ) -> Result<(), kube::Error>
    where
        K: ManagedResource + StoreObject,
    {
        let labels_differ = observed.meta().labels != desired.meta().labels;
        let owners_differ = observed.meta().owner_references != desired.meta().owner_references;

        if !labels_differ && !owners_differ && !observed.spec_differs(&desired) {
            return Ok(());
        }

        observed.meta_mut().labels = desired.meta().labels.clone();
        observed.meta_mut().owner_references = desired.meta().owner_references.clone();
        observed.overwrite_spec(&desired);

        self.store.update(&observed).await?;

        info!(
            "Updated '{}' {} resource!",
            descriptor.name,
            descriptor.kind.as_str()
        );
        self.events
            .emit(EventRecord::updated(descriptor.kind.as_str(), descriptor.name));

        Ok(())
    }
}

fn same_members(current: &[ObjectRef], desired: &[ObjectRef]) -> bool {
    current.len() == desired.len() && desired.iter().all(|entry| current.contains(entry))
}
