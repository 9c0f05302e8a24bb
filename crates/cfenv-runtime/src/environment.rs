//! Single entry point over the platform environment.

use std::sync::Arc;

use cfenv_core::tracing::init_tracing;
use cfenv_core::{EnvError, RuntimeConfig};
use cfenv_domain::{AnyServiceInfo, AttributeBag, ServiceInfo};

use crate::env::{EnvironmentAccessor, ProcessEnvironment};
use crate::instance::ApplicationInstanceInfo;
use crate::registry::LabelRegistry;
use crate::resolver::ServiceResolver;
use crate::store::{RawServices, ServiceDescriptorStore};

/// Typed access to the application instance and its bound services.
///
/// Every call re-reads the environment; nothing is cached.
///
/// # Example
/// ```no_run
/// use cfenv_domain::datasource::MysqlServiceInfo;
/// use cfenv_runtime::CloudEnvironment;
///
/// let cloud = CloudEnvironment::new();
/// if let Some(db) = cloud.service_info::<MysqlServiceInfo>("my-db")? {
///     println!("{}", db.connection_url());
/// }
/// # Ok::<(), cfenv_core::EnvError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CloudEnvironment<E = ProcessEnvironment> {
    store: ServiceDescriptorStore<E>,
    registry: Arc<LabelRegistry>,
}

impl CloudEnvironment<ProcessEnvironment> {
    /// Process environment, default variable names, built-in labels.
    pub fn new() -> Self {
        Self::with_environment(ProcessEnvironment)
    }

    /// Like [`CloudEnvironment::new`], with variable names read from
    /// `CFENV_*` configuration. Also installs the stdout subscriber in
    /// `CFENV_LOG_FORMAT`, unless a global subscriber is already set.
    pub fn from_env() -> Result<Self, EnvError> {
        use cfenv_core::Config;

        let config = RuntimeConfig::from_env()?;
        init_tracing(config.log_format);
        Ok(Self::with_environment(ProcessEnvironment).with_config(config))
    }
}

impl Default for CloudEnvironment<ProcessEnvironment> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EnvironmentAccessor> CloudEnvironment<E> {
    pub fn with_environment(env: E) -> Self {
        Self {
            store: ServiceDescriptorStore::new(env, RuntimeConfig::default()),
            registry: LabelRegistry::shared_builtin(),
        }
    }

    pub fn with_config(self, config: RuntimeConfig) -> Self {
        let Self { store, registry } = self;
        let env = store.into_env();
        Self {
            store: ServiceDescriptorStore::new(env, config),
            registry,
        }
    }

    pub fn with_registry(self, registry: Arc<LabelRegistry>) -> Self {
        Self { registry, ..self }
    }

    pub fn registry(&self) -> &LabelRegistry {
        &self.registry
    }

    pub fn config(&self) -> &RuntimeConfig {
        self.store.config()
    }

    fn resolver(&self) -> ServiceResolver<'_, E> {
        ServiceResolver::new(&self.store, &self.registry)
    }

    /// Raw value of any environment variable.
    pub fn value(&self, key: &str) -> Option<String> {
        self.store.env().value(key)
    }

    /// `None` when not running on the platform.
    pub fn instance_info(&self) -> Result<Option<ApplicationInstanceInfo>, EnvError> {
        Ok(self
            .store
            .instance_descriptor()?
            .map(ApplicationInstanceInfo::new))
    }

    pub fn is_running_in_cloud(&self) -> Result<bool, EnvError> {
        Ok(self.store.instance_descriptor()?.is_some())
    }

    /// Platform API address derived from the first application URI.
    /// Fails outside the platform; check [`CloudEnvironment::instance_info`]
    /// first when that is a normal case.
    pub fn cloud_api_uri(&self) -> Result<String, EnvError> {
        let instance = self.instance_info()?.ok_or_else(|| {
            EnvError::IllegalState(
                "there is no cloud API uri in a non-cloud deployment".to_owned(),
            )
        })?;
        instance.cloud_api_uri()
    }

    /// Every bound service descriptor, flattened across categories.
    pub fn services(&self) -> Result<Vec<AttributeBag>, EnvError> {
        self.store.service_descriptors()
    }

    /// Bound services grouped by category.
    pub fn raw_services(&self) -> Result<RawServices, EnvError> {
        self.store.raw_services()
    }

    pub fn service_info<T: ServiceInfo>(&self, name: &str) -> Result<Option<T>, EnvError> {
        self.resolver().service_info(name)
    }

    pub fn service_infos<T: ServiceInfo>(&self) -> Result<Vec<T>, EnvError> {
        self.resolver().service_infos()
    }

    pub fn all_service_infos(&self) -> Result<Vec<AnyServiceInfo>, EnvError> {
        self.resolver().all_service_infos()
    }
}
