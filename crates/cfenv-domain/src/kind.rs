//! Service kind identifiers.

use std::fmt;

use serde::Serialize;

/// Identifies a logical service type (e.g. "rabbitmq"), independent of the
/// labels a platform uses for it.
///
/// Kinds are plain static strings so crates outside this one can define
/// their own service-info types without touching an enum here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ServiceKind(&'static str);

impl ServiceKind {
    pub const MYSQL: Self = Self("mysql");
    pub const REDIS: Self = Self("redis");
    pub const MONGODB: Self = Self("mongodb");
    pub const POSTGRESQL: Self = Self("postgresql");
    pub const RABBITMQ: Self = Self("rabbitmq");

    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}
