//! Builders for service descriptors as the platform publishes them.

use serde_json::{Map, Value, json};

/// One entry of `VCAP_SERVICES`, with plausible credentials per label.
///
/// ```
/// use cfenv_testing::ServiceDescriptor;
/// let d = ServiceDescriptor::mysql("my-db").credential("port", 13306);
/// assert_eq!(d.label_str(), "mysql-5.1");
/// ```
#[derive(Debug, Clone)]
pub struct ServiceDescriptor {
    name: String,
    label: String,
    credentials: Map<String, Value>,
}

impl ServiceDescriptor {
    /// A descriptor with no credentials at all.
    pub fn new(name: &str, label: &str) -> Self {
        Self {
            name: name.to_owned(),
            label: label.to_owned(),
            credentials: Map::new(),
        }
    }

    pub fn mysql(name: &str) -> Self {
        Self::new(name, "mysql-5.1").credentials(json!({
            "name": format!("{name}-db"),
            "hostname": "10.0.0.11",
            "host": "10.0.0.11",
            "port": 3306,
            "user": "mysql-user",
            "username": "mysql-user",
            "password": "mysql-pass"
        }))
    }

    pub fn postgresql(name: &str) -> Self {
        Self::new(name, "postgresql-9.0").credentials(json!({
            "name": format!("{name}-db"),
            "hostname": "10.0.0.12",
            "port": 5432,
            "user": "pg-user",
            "password": "pg-pass"
        }))
    }

    pub fn redis(name: &str) -> Self {
        Self::new(name, "redis-2.2").credentials(json!({
            "hostname": "10.0.0.13",
            "port": 6379,
            "password": "redis-pass"
        }))
    }

    pub fn mongodb(name: &str) -> Self {
        Self::new(name, "mongodb-1.8").credentials(json!({
            "hostname": "10.0.0.14",
            "port": 27017,
            "username": "mongo-user",
            "password": "mongo-pass",
            "db": "db"
        }))
    }

    /// A broker publishing discrete credentials under `label`.
    pub fn rabbitmq(name: &str, label: &str) -> Self {
        Self::new(name, label).credentials(json!({
            "hostname": "10.0.0.15",
            "port": 5672,
            "user": "rabbit-user",
            "pass": "rabbit-pass",
            "vhost": "vh"
        }))
    }

    pub fn label(mut self, label: &str) -> Self {
        self.label = label.to_owned();
        self
    }

    pub fn label_str(&self) -> &str {
        &self.label
    }

    /// Replace all credentials. `credentials` must be a JSON object.
    pub fn credentials(mut self, credentials: Value) -> Self {
        self.credentials = match credentials {
            Value::Object(map) => map,
            other => panic!("credentials must be an object, got {other}"),
        };
        self
    }

    pub fn credential(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.credentials.insert(key.to_owned(), value.into());
        self
    }

    pub fn without_credential(mut self, key: &str) -> Self {
        self.credentials.remove(key);
        self
    }

    pub fn to_value(&self) -> Value {
        json!({
            "name": self.name,
            "label": self.label,
            "plan": "free",
            "tags": [],
            "credentials": self.credentials,
        })
    }
}
