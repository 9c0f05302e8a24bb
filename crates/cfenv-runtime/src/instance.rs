//! Read-through view over the application instance descriptor.

use chrono::{DateTime, Utc};
use serde_json::Value;

use cfenv_core::EnvError;
use cfenv_domain::AttributeBag;

const URIS_FIELD: &str = "application_uris";
/// Older platforms only publish the unprefixed key.
const LEGACY_URIS_FIELD: &str = "uris";

/// Resource limits granted to the instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstanceLimits {
    /// Memory, in megabytes.
    pub mem: Option<u64>,
    /// Disk, in megabytes.
    pub disk: Option<u64>,
    /// File descriptors.
    pub fds: Option<u64>,
}

/// The running application instance, as described by the platform.
///
/// Only the URI list is interpreted; other accessors pass fields through
/// and return `None` when a field is absent or of the wrong type.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationInstanceInfo {
    attributes: AttributeBag,
}

impl ApplicationInstanceInfo {
    pub fn new(attributes: AttributeBag) -> Self {
        Self { attributes }
    }

    pub fn attributes(&self) -> &AttributeBag {
        &self.attributes
    }

    /// Externally reachable addresses, in published order.
    pub fn uris(&self) -> Result<Vec<String>, EnvError> {
        let (field, value) = [URIS_FIELD, LEGACY_URIS_FIELD]
            .into_iter()
            .find_map(|f| match self.attributes.get(f) {
                None | Some(Value::Null) => None,
                Some(v) => Some((f, v)),
            })
            .ok_or(EnvError::MissingField(URIS_FIELD))?;
        let Value::Array(items) = value else {
            return Err(EnvError::InvalidField {
                field,
                reason: "expected a list of strings".to_owned(),
            });
        };
        items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_owned)
                    .ok_or_else(|| EnvError::InvalidField {
                        field,
                        reason: format!("non-string entry {item}"),
                    })
            })
            .collect()
    }

    /// The platform API address: `api` followed by everything from the
    /// first `.` of the first URI, so `myapp.example.com` gives
    /// `api.example.com`.
    ///
    /// This assumes the first URI is `<host>.<platform domain>`; apps bound
    /// to custom domains get a wrong answer.
    pub fn cloud_api_uri(&self) -> Result<String, EnvError> {
        let uris = self.uris()?;
        let first = uris.first().ok_or_else(|| {
            EnvError::IllegalState("application instance publishes no uris".to_owned())
        })?;
        let dot = first.find('.').ok_or_else(|| {
            EnvError::IllegalState(format!("application uri {first:?} has no domain part"))
        })?;
        Ok(format!("api{}", &first[dot..]))
    }

    pub fn name(&self) -> Option<&str> {
        self.attributes.get_str("name")
    }

    pub fn instance_id(&self) -> Option<&str> {
        self.attributes.get_str("instance_id")
    }

    pub fn instance_index(&self) -> Option<u64> {
        self.attributes.get("instance_index").and_then(Value::as_u64)
    }

    pub fn host(&self) -> Option<&str> {
        self.attributes.get_str("host")
    }

    pub fn port(&self) -> Option<u16> {
        self.attributes
            .get("port")
            .and_then(Value::as_u64)
            .and_then(|p| u16::try_from(p).ok())
    }

    pub fn version(&self) -> Option<&str> {
        self.attributes.get_str("version")
    }

    /// Start time, from `started_at_timestamp` (seconds since the epoch).
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        let secs = self.attributes.get("started_at_timestamp")?.as_i64()?;
        DateTime::from_timestamp(secs, 0)
    }

    pub fn limits(&self) -> InstanceLimits {
        let Some(limits) = self.attributes.get_bag("limits") else {
            return InstanceLimits::default();
        };
        let read = |key: &str| limits.get(key).and_then(Value::as_u64);
        InstanceLimits {
            mem: read("mem"),
            disk: read("disk"),
            fds: read("fds"),
        }
    }
}
