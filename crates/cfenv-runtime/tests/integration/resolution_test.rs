use std::sync::Arc;

use cfenv_core::EnvError;
use cfenv_domain::datasource::{MysqlServiceInfo, PostgresqlServiceInfo};
use cfenv_domain::mongo::MongoServiceInfo;
use cfenv_domain::rabbit::RabbitServiceInfo;
use cfenv_domain::redis::RedisServiceInfo;
use cfenv_domain::{AttributeBag, ServiceInfo, ServiceInfoError, ServiceKind};
use cfenv_runtime::LabelRegistry;
use cfenv_testing::{ServiceDescriptor, TestEnv};

// ── service_info (by name) ───────────────────────────────────────────────────

#[test]
fn should_resolve_mysql_by_name() {
    let cloud = TestEnv::new()
        .service(ServiceDescriptor::mysql("my-db"))
        .cloud();

    let info = cloud
        .service_info::<MysqlServiceInfo>("my-db")
        .unwrap()
        .unwrap();
    assert_eq!(info.service_name(), "my-db");
    assert_eq!(info.0.database, "my-db-db");
}

#[test]
fn should_return_none_for_label_mismatch() {
    let cloud = TestEnv::new()
        .service(ServiceDescriptor::mysql("my-db").label("redis-2.2"))
        .cloud();

    assert!(
        cloud
            .service_info::<MysqlServiceInfo>("my-db")
            .unwrap()
            .is_none()
    );
}

#[test]
fn should_return_none_for_unknown_name() {
    let cloud = TestEnv::new()
        .service(ServiceDescriptor::mysql("my-db"))
        .cloud();

    assert!(
        cloud
            .service_info::<MysqlServiceInfo>("not-bound")
            .unwrap()
            .is_none()
    );
}

#[test]
fn should_wrap_construction_failure_with_service_name() {
    let cloud = TestEnv::new()
        .service(ServiceDescriptor::postgresql("ledger").without_credential("port"))
        .cloud();

    let err = cloud
        .service_info::<PostgresqlServiceInfo>("ledger")
        .unwrap_err();
    match err {
        EnvError::ServiceConstruction { name, source } => {
            assert_eq!(name, "ledger");
            assert!(matches!(source, ServiceInfoError::MissingAttribute("port")));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

// ── service_infos (by kind) ──────────────────────────────────────────────────

#[test]
fn should_collect_rabbit_services_across_historical_labels() {
    let cloud = TestEnv::new()
        .service(ServiceDescriptor::rabbitmq("old-broker", "rabbitmq-2.4"))
        .service(ServiceDescriptor::mysql("db"))
        .service(ServiceDescriptor::rabbitmq("new-broker", "rabbitmq-2.4.1"))
        .service(ServiceDescriptor::rabbitmq("srs-broker", "rabbitmq-srs-2.4.1"))
        .cloud();

    let infos = cloud.service_infos::<RabbitServiceInfo>().unwrap();
    let names: Vec<&str> = infos.iter().map(|i| i.service_name()).collect();
    assert_eq!(names, vec!["old-broker", "new-broker", "srs-broker"]);
}

#[test]
fn should_return_empty_list_when_no_services_bound() {
    let cloud = TestEnv::new().cloud();
    assert!(cloud.service_infos::<RedisServiceInfo>().unwrap().is_empty());
    assert!(cloud.services().unwrap().is_empty());
}

#[test]
fn should_return_empty_list_for_empty_services_object() {
    let cloud = TestEnv::new().var("VCAP_SERVICES", "{}").cloud();
    assert!(cloud.services().unwrap().is_empty());
    assert!(cloud.service_infos::<MongoServiceInfo>().unwrap().is_empty());
}

#[test]
fn should_fail_whole_call_when_one_service_is_malformed() {
    let cloud = TestEnv::new()
        .service(ServiceDescriptor::redis("a"))
        .service(ServiceDescriptor::redis("b").without_credential("hostname"))
        .cloud();

    let err = cloud.service_infos::<RedisServiceInfo>().unwrap_err();
    assert!(matches!(err, EnvError::ServiceConstruction { ref name, .. } if name == "b"));
}

#[test]
fn should_fail_on_truncated_services_json() {
    let cloud = TestEnv::new().var("VCAP_SERVICES", r#"{"a":"#).cloud();
    let err = cloud.service_infos::<MysqlServiceInfo>().unwrap_err();
    assert_eq!(err.kind(), "DECODING");
}

// ── custom kinds ─────────────────────────────────────────────────────────────

#[derive(Debug)]
struct MemcachedServiceInfo {
    name: String,
    servers: String,
}

impl ServiceInfo for MemcachedServiceInfo {
    const KIND: ServiceKind = ServiceKind::new("memcached");

    fn from_attributes(attributes: &AttributeBag) -> Result<Self, ServiceInfoError> {
        let creds = attributes
            .get_bag("credentials")
            .ok_or(ServiceInfoError::MissingAttribute("credentials"))?;
        Ok(Self {
            name: attributes.require_str("name")?.to_owned(),
            servers: creds.require_str("servers")?.to_owned(),
        })
    }

    fn service_name(&self) -> &str {
        &self.name
    }
}

#[test]
fn should_ignore_custom_kind_until_registered() {
    let env = TestEnv::new().service(
        ServiceDescriptor::new("mc", "memcached-1.4")
            .credential("servers", "10.0.0.20:11211"),
    );

    let builtin = env.clone().cloud();
    assert!(builtin.service_infos::<MemcachedServiceInfo>().unwrap().is_empty());
    assert!(builtin.all_service_infos().unwrap().is_empty());

    let mut registry = LabelRegistry::with_builtin();
    registry
        .register(MemcachedServiceInfo::KIND, "memcached-1.4")
        .unwrap();
    let extended = env.cloud().with_registry(Arc::new(registry));

    let infos = extended.service_infos::<MemcachedServiceInfo>().unwrap();
    assert_eq!(infos.len(), 1);
    assert_eq!(infos[0].servers, "10.0.0.20:11211");
    let named = extended
        .service_info::<MemcachedServiceInfo>("mc")
        .unwrap()
        .unwrap();
    assert_eq!(named.service_name(), "mc");
    // no built-in variant for the custom kind
    assert!(extended.all_service_infos().unwrap().is_empty());
}
