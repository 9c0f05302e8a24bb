use cfenv_domain::{ServiceInfoError, ServiceKind};

/// Failures surfaced while reading the runtime environment.
///
/// "Nothing here" outcomes (unset variable, unknown service name, kind with
/// no registered labels) are not errors; they come back as `None` or an
/// empty list. Everything below means the environment is malformed or the
/// caller asked for something that presupposes platform context.
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error("failed to decode {variable}: {source}")]
    Decoding {
        variable: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to create service information for {name}")]
    ServiceConstruction {
        name: String,
        #[source]
        source: ServiceInfoError,
    },
    #[error("missing field {0} in application instance descriptor")]
    MissingField(&'static str),
    #[error("invalid field {field} in application instance descriptor: {reason}")]
    InvalidField { field: &'static str, reason: String },
    #[error("{0}")]
    IllegalState(String),
    #[error("label {label:?} is already registered to {existing}, cannot register it to {requested}")]
    LabelConflict {
        label: String,
        existing: ServiceKind,
        requested: ServiceKind,
    },
    #[error("invalid configuration: {0}")]
    Config(#[from] envy::Error),
}

impl EnvError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Decoding { .. } => "DECODING",
            Self::ServiceConstruction { .. } => "SERVICE_CONSTRUCTION",
            Self::MissingField(_) => "MISSING_FIELD",
            Self::InvalidField { .. } => "INVALID_FIELD",
            Self::IllegalState(_) => "ILLEGAL_STATE",
            Self::LabelConflict { .. } => "LABEL_CONFLICT",
            Self::Config(_) => "CONFIG",
        }
    }

    pub fn decoding(variable: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decoding {
            variable: variable.into(),
            source,
        }
    }
}
