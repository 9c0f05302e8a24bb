//! Loosely-typed attribute bags decoded from the platform environment.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::service::ServiceInfoError;

/// One decoded JSON object: a service descriptor, its nested `credentials`,
/// or the application instance descriptor.
///
/// Values are the closed `serde_json::Value` sum type, so typed accessors
/// below match on it rather than downcasting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeBag(Map<String, Value>);

impl AttributeBag {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String value at `key`. Non-string values are treated as absent.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// First string value among `keys`, in order.
    pub fn get_str_any(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|k| self.get_str(k))
    }

    pub fn require_str(&self, key: &'static str) -> Result<&str, ServiceInfoError> {
        match self.0.get(key) {
            None | Some(Value::Null) => Err(ServiceInfoError::MissingAttribute(key)),
            Some(Value::String(s)) => Ok(s.as_str()),
            Some(other) => Err(ServiceInfoError::InvalidAttribute {
                key,
                reason: format!("expected string, found {}", type_name(other)),
            }),
        }
    }

    /// Unsigned integer at `key`. Numeric strings are accepted since some
    /// brokers publish ports as `"3306"`.
    pub fn get_u64(&self, key: &'static str) -> Result<Option<u64>, ServiceInfoError> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => n.as_u64().map(Some).ok_or_else(|| {
                ServiceInfoError::InvalidAttribute {
                    key,
                    reason: format!("{n} is not an unsigned integer"),
                }
            }),
            Some(Value::String(s)) => s.trim().parse::<u64>().map(Some).map_err(|_| {
                ServiceInfoError::InvalidAttribute {
                    key,
                    reason: format!("{s:?} is not an unsigned integer"),
                }
            }),
            Some(other) => Err(ServiceInfoError::InvalidAttribute {
                key,
                reason: format!("expected number, found {}", type_name(other)),
            }),
        }
    }

    pub fn get_u16(&self, key: &'static str) -> Result<Option<u16>, ServiceInfoError> {
        match self.get_u64(key)? {
            None => Ok(None),
            Some(n) => u16::try_from(n)
                .map(Some)
                .map_err(|_| ServiceInfoError::InvalidAttribute {
                    key,
                    reason: format!("{n} is out of range for a port"),
                }),
        }
    }

    /// Nested bag at `key`. Non-object values are treated as absent.
    pub fn get_bag(&self, key: &str) -> Option<AttributeBag> {
        match self.0.get(key) {
            Some(Value::Object(map)) => Some(Self(map.clone())),
            _ => None,
        }
    }

    /// The descriptor's `name` attribute.
    pub fn name(&self) -> Option<&str> {
        self.get_str("name")
    }

    /// The descriptor's `label` attribute.
    pub fn label(&self) -> Option<&str> {
        self.get_str("label")
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for AttributeBag {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for AttributeBag {
    type Error = Value;

    /// Succeeds only for JSON objects; any other value is handed back.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(other),
        }
    }
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
