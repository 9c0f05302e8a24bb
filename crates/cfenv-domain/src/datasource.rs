//! Relational database services.

use crate::bag::AttributeBag;
use crate::escape;
use crate::kind::ServiceKind;
use crate::service::{Endpoint, ServiceInfo, ServiceInfoError, credentials};

/// Connection attributes common to MySQL and PostgreSQL bindings.
///
/// Credentials: `hostname`/`host`, `port`, `user`/`username`, `password`,
/// and `name` for the database name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSourceInfo {
    pub endpoint: Endpoint,
    pub user_name: String,
    pub password: String,
    pub database: String,
}

impl DataSourceInfo {
    fn read(attributes: &AttributeBag) -> Result<Self, ServiceInfoError> {
        let creds = credentials(attributes)?;
        let endpoint = Endpoint::read(attributes, &creds)?;
        let user_name = creds
            .get_str_any(&["user", "username"])
            .ok_or(ServiceInfoError::MissingAttribute("user"))?
            .to_owned();
        Ok(Self {
            endpoint,
            user_name,
            password: creds.require_str("password")?.to_owned(),
            database: creds.require_str("name")?.to_owned(),
        })
    }

    fn url(&self, scheme: &str) -> String {
        format!(
            "{scheme}://{}:{}/{}",
            self.endpoint.host,
            self.endpoint.port,
            escape::path_segment(&self.database)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MysqlServiceInfo(pub DataSourceInfo);

impl MysqlServiceInfo {
    /// `mysql://host:port/database`. Credentials are not embedded.
    pub fn connection_url(&self) -> String {
        self.0.url("mysql")
    }
}

impl ServiceInfo for MysqlServiceInfo {
    const KIND: ServiceKind = ServiceKind::MYSQL;

    fn from_attributes(attributes: &AttributeBag) -> Result<Self, ServiceInfoError> {
        DataSourceInfo::read(attributes).map(Self)
    }

    fn service_name(&self) -> &str {
        &self.0.endpoint.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresqlServiceInfo(pub DataSourceInfo);

impl PostgresqlServiceInfo {
    /// `postgres://host:port/database`. Credentials are not embedded.
    pub fn connection_url(&self) -> String {
        self.0.url("postgres")
    }
}

impl ServiceInfo for PostgresqlServiceInfo {
    const KIND: ServiceKind = ServiceKind::POSTGRESQL;

    fn from_attributes(attributes: &AttributeBag) -> Result<Self, ServiceInfoError> {
        DataSourceInfo::read(attributes).map(Self)
    }

    fn service_name(&self) -> &str {
        &self.0.endpoint.name
    }
}
