//! Raw access to environment variables.

use std::collections::HashMap;

/// Source of raw environment values.
///
/// Reading is infallible: a variable that is unset (or not valid unicode)
/// is simply absent.
pub trait EnvironmentAccessor: Send + Sync {
    fn value(&self, key: &str) -> Option<String>;
}

/// Reads the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl EnvironmentAccessor for ProcessEnvironment {
    fn value(&self, key: &str) -> Option<String> {
        let value = std::env::var(key).ok();
        tracing::trace!(key, present = value.is_some(), "read environment variable");
        value
    }
}

/// In-memory environment, for tests and for hosts that receive the
/// platform variables some other way.
impl EnvironmentAccessor for HashMap<String, String> {
    fn value(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<E: EnvironmentAccessor + ?Sized> EnvironmentAccessor for &E {
    fn value(&self, key: &str) -> Option<String> {
        (**self).value(key)
    }
}
