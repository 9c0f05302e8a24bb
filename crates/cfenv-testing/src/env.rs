//! In-memory platform environment.

use std::collections::HashMap;

use serde_json::{Map, Value, json};

use cfenv_runtime::CloudEnvironment;

use crate::descriptor::ServiceDescriptor;

pub const APPLICATION_VAR: &str = "VCAP_APPLICATION";
pub const SERVICES_VAR: &str = "VCAP_SERVICES";

/// Builds the variables a platform would publish, without touching the
/// process environment.
///
/// Services are grouped by label, matching how the platform categorizes
/// them; categories keep insertion order.
#[derive(Debug, Clone, Default)]
pub struct TestEnv {
    vars: HashMap<String, String>,
    services: Option<Map<String, Value>>,
}

impl TestEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `VCAP_APPLICATION` from a JSON object.
    pub fn application(self, instance: Value) -> Self {
        self.var(APPLICATION_VAR, &instance.to_string())
    }

    /// Set `VCAP_APPLICATION` to an instance reachable at `uris`.
    pub fn application_uris(self, uris: &[&str]) -> Self {
        self.application(json!({
            "instance_id": "7b3bd51dd1b6e4b8b3c4e0c0fc1a4b07",
            "instance_index": 0,
            "name": "test-app",
            "application_uris": uris,
        }))
    }

    /// Add a descriptor under its label's category.
    pub fn service(mut self, descriptor: ServiceDescriptor) -> Self {
        let category = descriptor.label_str().to_owned();
        let services = self.services.get_or_insert_with(Map::new);
        let list = services
            .entry(category)
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(items) = list {
            items.push(descriptor.to_value());
        }
        self
    }

    /// Set any variable verbatim, including malformed JSON.
    pub fn var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_owned(), value.to_owned());
        self
    }

    pub fn build(self) -> HashMap<String, String> {
        let mut vars = self.vars;
        if let Some(services) = self.services {
            vars.insert(SERVICES_VAR.to_owned(), Value::Object(services).to_string());
        }
        vars
    }

    /// A [`CloudEnvironment`] over the built variables, with built-in labels.
    pub fn cloud(self) -> CloudEnvironment<HashMap<String, String>> {
        CloudEnvironment::with_environment(self.build())
    }
}
