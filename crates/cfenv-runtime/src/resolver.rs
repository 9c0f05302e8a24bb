//! Label-driven resolution of service descriptors into typed service infos.

use std::collections::BTreeSet;

use cfenv_core::EnvError;
use cfenv_domain::{AnyServiceInfo, AttributeBag, ServiceInfo, ServiceInfoError};

use crate::env::EnvironmentAccessor;
use crate::registry::LabelRegistry;
use crate::store::ServiceDescriptorStore;

/// Looks services up by name or by kind.
///
/// Name lookup expects at most one match; kind lookup returns every
/// descriptor whose label the registry assigns to that kind.
#[derive(Debug)]
pub struct ServiceResolver<'a, E> {
    store: &'a ServiceDescriptorStore<E>,
    registry: &'a LabelRegistry,
}

impl<'a, E: EnvironmentAccessor> ServiceResolver<'a, E> {
    pub fn new(store: &'a ServiceDescriptorStore<E>, registry: &'a LabelRegistry) -> Self {
        Self { store, registry }
    }

    pub fn store(&self) -> &'a ServiceDescriptorStore<E> {
        self.store
    }

    pub fn registry(&self) -> &'a LabelRegistry {
        self.registry
    }

    /// First descriptor whose `name` equals `name` exactly. Names should be
    /// unique; if the platform repeats one, the earliest descriptor wins.
    pub fn find_by_name(&self, name: &str) -> Result<Option<AttributeBag>, EnvError> {
        Ok(self
            .store
            .service_descriptors()?
            .into_iter()
            .find(|d| d.name() == Some(name)))
    }

    /// Descriptors whose `label` is in `labels`, in descriptor order.
    pub fn find_by_labels(&self, labels: &BTreeSet<String>) -> Result<Vec<AttributeBag>, EnvError> {
        Ok(self
            .store
            .service_descriptors()?
            .into_iter()
            .filter(|d| d.label().is_some_and(|l| labels.contains(l)))
            .collect())
    }

    /// The service called `name`, as `T`.
    ///
    /// `None` if no service has that name, or if its label does not belong
    /// to `T::KIND`. A matching descriptor that `T` cannot be built from is
    /// an error.
    pub fn service_info<T: ServiceInfo>(&self, name: &str) -> Result<Option<T>, EnvError> {
        let Some(descriptor) = self.find_by_name(name)? else {
            tracing::debug!(name, "no service with this name");
            return Ok(None);
        };
        let label = descriptor.label().unwrap_or_default();
        if !self.registry.allows(T::KIND, label) {
            tracing::debug!(name, label, kind = %T::KIND, "service label does not match kind");
            return Ok(None);
        }
        construct::<T>(&descriptor).map(Some)
    }

    /// Every service of kind `T::KIND`, in descriptor order.
    ///
    /// An unregistered kind yields an empty list. If any matching
    /// descriptor fails to build, the whole call fails; partial inventories
    /// are never returned.
    pub fn service_infos<T: ServiceInfo>(&self) -> Result<Vec<T>, EnvError> {
        let Some(labels) = self.registry.labels_for(T::KIND) else {
            tracing::debug!(kind = %T::KIND, "no labels registered for kind");
            return Ok(Vec::new());
        };
        let infos = self
            .find_by_labels(labels)?
            .iter()
            .map(construct::<T>)
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(kind = %T::KIND, count = infos.len(), "resolved services");
        Ok(infos)
    }

    /// Every service whose label maps to a built-in kind, as a tagged
    /// variant. Descriptors with unknown labels, or labels of custom kinds,
    /// are skipped.
    pub fn all_service_infos(&self) -> Result<Vec<AnyServiceInfo>, EnvError> {
        let mut infos = Vec::new();
        for descriptor in self.store.service_descriptors()? {
            let Some(kind) = descriptor.label().and_then(|l| self.registry.kind_for_label(l))
            else {
                tracing::debug!(
                    name = descriptor.name(),
                    label = descriptor.label(),
                    "skipping service with unrecognized label"
                );
                continue;
            };
            match AnyServiceInfo::from_attributes(kind, &descriptor) {
                Some(built) => {
                    infos.push(built.map_err(|source| construction_error(&descriptor, source))?)
                }
                None => {
                    tracing::debug!(name = descriptor.name(), %kind, "no built-in type for kind")
                }
            }
        }
        Ok(infos)
    }
}

fn construct<T: ServiceInfo>(descriptor: &AttributeBag) -> Result<T, EnvError> {
    T::from_attributes(descriptor).map_err(|source| construction_error(descriptor, source))
}

fn construction_error(descriptor: &AttributeBag, source: ServiceInfoError) -> EnvError {
    let name = match descriptor.name() {
        Some(name) => name.to_owned(),
        None => {
            tracing::warn!(label = descriptor.label(), "service descriptor has no name");
            "<unnamed>".to_owned()
        }
    };
    EnvError::ServiceConstruction { name, source }
}
