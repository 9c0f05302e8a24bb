//! Decoding of the two platform variables into attribute bags.

use serde_json::{Map, Value};

use cfenv_core::{EnvError, RuntimeConfig};
use cfenv_domain::AttributeBag;

use crate::env::EnvironmentAccessor;

/// Services grouped by category, in document order.
pub type RawServices = Vec<(String, Vec<AttributeBag>)>;

/// Reads and decodes the instance and services variables.
///
/// Nothing is cached: every call re-reads the accessor and decodes again.
#[derive(Debug, Clone)]
pub struct ServiceDescriptorStore<E> {
    env: E,
    config: RuntimeConfig,
}

impl<E: EnvironmentAccessor> ServiceDescriptorStore<E> {
    pub fn new(env: E, config: RuntimeConfig) -> Self {
        Self { env, config }
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    pub fn into_env(self) -> E {
        self.env
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// The application instance descriptor, or `None` when the variable is
    /// unset or blank (not running on the platform).
    pub fn instance_descriptor(&self) -> Result<Option<AttributeBag>, EnvError> {
        let variable = &self.config.application_var;
        let Some(raw) = non_blank(self.env.value(variable)) else {
            return Ok(None);
        };
        serde_json::from_str::<AttributeBag>(&raw)
            .map(Some)
            .map_err(|e| EnvError::decoding(variable, e))
    }

    /// Services grouped by category. Unset or blank yields an empty list.
    pub fn raw_services(&self) -> Result<RawServices, EnvError> {
        let variable = &self.config.services_var;
        let Some(raw) = non_blank(self.env.value(variable)) else {
            return Ok(Vec::new());
        };
        let categories: Map<String, Value> =
            serde_json::from_str(&raw).map_err(|e| EnvError::decoding(variable, e))?;
        categories
            .into_iter()
            .map(|(category, descriptors)| {
                serde_json::from_value::<Vec<AttributeBag>>(descriptors)
                    .map(|list| (category, list))
                    .map_err(|e| EnvError::decoding(variable, e))
            })
            .collect()
    }

    /// Every service descriptor, category keys dropped, in document order.
    pub fn service_descriptors(&self) -> Result<Vec<AttributeBag>, EnvError> {
        let descriptors: Vec<AttributeBag> = self
            .raw_services()?
            .into_iter()
            .flat_map(|(_, list)| list)
            .collect();
        tracing::trace!(count = descriptors.len(), "decoded service descriptors");
        Ok(descriptors)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
