use serde::Deserialize;

use crate::tracing::LogFormat;

/// Trait for loading configuration from prefixed environment variables.
///
/// Implementors derive `serde::Deserialize` (with `#[serde(default)]` on
/// optional fields) and pick a `PREFIX`; field `foo_bar` is then read from
/// `{PREFIX}FOO_BAR`.
pub trait Config: Sized + serde::de::DeserializeOwned {
    const PREFIX: &'static str;

    fn from_env() -> Result<Self, envy::Error> {
        envy::prefixed(Self::PREFIX).from_env()
    }

    /// Same as [`Config::from_env`] over an explicit set of variables.
    fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(Self::PREFIX).from_iter(vars)
    }
}

/// Names of the variables the platform publishes its runtime state in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RuntimeConfig {
    /// Application instance descriptor. Env var: `CFENV_APPLICATION_VAR`.
    #[serde(default = "default_application_var")]
    pub application_var: String,
    /// Bound services. Env var: `CFENV_SERVICES_VAR`.
    #[serde(default = "default_services_var")]
    pub services_var: String,
    /// Stdout log format. Env var: `CFENV_LOG_FORMAT`.
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_application_var() -> String {
    "VCAP_APPLICATION".to_owned()
}

fn default_services_var() -> String {
    "VCAP_SERVICES".to_owned()
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            application_var: default_application_var(),
            services_var: default_services_var(),
            log_format: LogFormat::default(),
        }
    }
}

impl Config for RuntimeConfig {
    const PREFIX: &'static str = "CFENV_";
}
