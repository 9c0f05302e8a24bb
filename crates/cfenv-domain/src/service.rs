//! The service-info construction contract and the tagged variant over the
//! built-in service types.

use crate::bag::AttributeBag;
use crate::datasource::{MysqlServiceInfo, PostgresqlServiceInfo};
use crate::kind::ServiceKind;
use crate::mongo::MongoServiceInfo;
use crate::rabbit::RabbitServiceInfo;
use crate::redis::RedisServiceInfo;

/// Errors returned by [`ServiceInfo::from_attributes`].
#[derive(Debug, thiserror::Error)]
pub enum ServiceInfoError {
    #[error("missing attribute {0:?}")]
    MissingAttribute(&'static str),
    #[error("invalid attribute {key:?}: {reason}")]
    InvalidAttribute { key: &'static str, reason: String },
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// A strongly-typed view of one bound service.
///
/// Implementors declare which [`ServiceKind`] they represent; the label
/// registry decides which descriptors belong to that kind, and
/// `from_attributes` turns a matching descriptor into `Self`.
pub trait ServiceInfo: Sized {
    const KIND: ServiceKind;

    /// Build from a raw service descriptor. Fails if a required attribute
    /// is missing or has the wrong shape.
    fn from_attributes(attributes: &AttributeBag) -> Result<Self, ServiceInfoError>;

    /// The service instance name as bound to the application.
    fn service_name(&self) -> &str;
}

/// Host/port pair plus the service name, shared by every built-in type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub name: String,
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    /// Reads `name` from the descriptor and `hostname` (or `host`) and
    /// `port` from its `credentials`.
    pub(crate) fn read(
        attributes: &AttributeBag,
        credentials: &AttributeBag,
    ) -> Result<Self, ServiceInfoError> {
        let name = attributes.require_str("name")?.to_owned();
        let host = credentials
            .get_str_any(&["hostname", "host"])
            .ok_or(ServiceInfoError::MissingAttribute("hostname"))?
            .to_owned();
        let port = credentials
            .get_u16("port")?
            .ok_or(ServiceInfoError::MissingAttribute("port"))?;
        Ok(Self { name, host, port })
    }
}

pub(crate) fn credentials(attributes: &AttributeBag) -> Result<AttributeBag, ServiceInfoError> {
    attributes
        .get_bag("credentials")
        .ok_or(ServiceInfoError::MissingAttribute("credentials"))
}

/// One of the built-in service-info types, selected by [`ServiceKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyServiceInfo {
    Mysql(MysqlServiceInfo),
    Postgresql(PostgresqlServiceInfo),
    Redis(RedisServiceInfo),
    Mongo(MongoServiceInfo),
    Rabbit(RabbitServiceInfo),
}

impl AnyServiceInfo {
    /// Construct the variant for `kind`. Returns `None` when `kind` is not
    /// one of the built-in kinds.
    pub fn from_attributes(
        kind: ServiceKind,
        attributes: &AttributeBag,
    ) -> Option<Result<Self, ServiceInfoError>> {
        let built = match kind {
            ServiceKind::MYSQL => MysqlServiceInfo::from_attributes(attributes).map(Self::Mysql),
            ServiceKind::POSTGRESQL => {
                PostgresqlServiceInfo::from_attributes(attributes).map(Self::Postgresql)
            }
            ServiceKind::REDIS => RedisServiceInfo::from_attributes(attributes).map(Self::Redis),
            ServiceKind::MONGODB => MongoServiceInfo::from_attributes(attributes).map(Self::Mongo),
            ServiceKind::RABBITMQ => {
                RabbitServiceInfo::from_attributes(attributes).map(Self::Rabbit)
            }
            _ => return None,
        };
        Some(built)
    }

    pub fn kind(&self) -> ServiceKind {
        match self {
            Self::Mysql(_) => MysqlServiceInfo::KIND,
            Self::Postgresql(_) => PostgresqlServiceInfo::KIND,
            Self::Redis(_) => RedisServiceInfo::KIND,
            Self::Mongo(_) => MongoServiceInfo::KIND,
            Self::Rabbit(_) => RabbitServiceInfo::KIND,
        }
    }

    pub fn service_name(&self) -> &str {
        match self {
            Self::Mysql(s) => s.service_name(),
            Self::Postgresql(s) => s.service_name(),
            Self::Redis(s) => s.service_name(),
            Self::Mongo(s) => s.service_name(),
            Self::Rabbit(s) => s.service_name(),
        }
    }
}
