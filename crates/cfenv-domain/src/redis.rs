//! Key-value store services.

use crate::bag::AttributeBag;
use crate::escape;
use crate::kind::ServiceKind;
use crate::service::{Endpoint, ServiceInfo, ServiceInfoError, credentials};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisServiceInfo {
    pub endpoint: Endpoint,
    pub password: Option<String>,
}

impl RedisServiceInfo {
    /// `redis://[:password@]host:port`, with the password percent-encoded.
    pub fn connection_url(&self) -> String {
        match &self.password {
            Some(pw) => format!(
                "redis://:{}@{}:{}",
                escape::userinfo(pw),
                self.endpoint.host,
                self.endpoint.port
            ),
            None => format!("redis://{}:{}", self.endpoint.host, self.endpoint.port),
        }
    }
}

impl ServiceInfo for RedisServiceInfo {
    const KIND: ServiceKind = ServiceKind::REDIS;

    fn from_attributes(attributes: &AttributeBag) -> Result<Self, ServiceInfoError> {
        let creds = credentials(attributes)?;
        Ok(Self {
            endpoint: Endpoint::read(attributes, &creds)?,
            password: creds.get_str("password").map(str::to_owned),
        })
    }

    fn service_name(&self) -> &str {
        &self.endpoint.name
    }
}
