use cfenv_domain::datasource::MysqlServiceInfo;
use cfenv_domain::rabbit::RabbitServiceInfo;
use cfenv_domain::{AnyServiceInfo, ServiceInfo, ServiceKind};
use cfenv_testing::{Fixture, TestEnv};

fn platform() -> TestEnv {
    TestEnv::new()
        .var("VCAP_APPLICATION", &Fixture::load_str("fixtures/vcap/application.json"))
        .var("VCAP_SERVICES", &Fixture::load_str("fixtures/vcap/services.json"))
}

#[test]
fn should_flatten_fixture_services_in_document_order() {
    let names: Vec<String> = platform()
        .cloud()
        .services()
        .unwrap()
        .iter()
        .map(|d| d.name().unwrap().to_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "inventory-db",
            "session-cache",
            "orders-queue",
            "events-queue",
            "catalog-docs",
            "ledger-db",
            "smtp-relay",
        ]
    );
}

#[test]
fn should_resolve_fixture_mysql() {
    let info = platform()
        .cloud()
        .service_info::<MysqlServiceInfo>("inventory-db")
        .unwrap()
        .unwrap();
    assert_eq!(
        info.connection_url(),
        "mysql://172.30.48.27:3306/d7f0a3c2b1e84d5f"
    );
}

#[test]
fn should_resolve_both_fixture_brokers() {
    let infos = platform()
        .cloud()
        .service_infos::<RabbitServiceInfo>()
        .unwrap();
    assert_eq!(infos.len(), 2);
    assert_eq!(infos[0].service_name(), "orders-queue");
    assert_eq!(infos[0].virtual_host, "v3a8c1f0");
    assert_eq!(infos[1].service_name(), "events-queue");
    assert_eq!(infos[1].endpoint.port, 10005);
}

#[test]
fn should_type_every_recognized_fixture_service() {
    let all = platform().cloud().all_service_infos().unwrap();
    let kinds: Vec<ServiceKind> = all.iter().map(AnyServiceInfo::kind).collect();
    assert_eq!(
        kinds,
        vec![
            ServiceKind::MYSQL,
            ServiceKind::REDIS,
            ServiceKind::RABBITMQ,
            ServiceKind::RABBITMQ,
            ServiceKind::MONGODB,
            ServiceKind::POSTGRESQL,
        ]
    );
}

#[test]
fn should_expose_fixture_instance_metadata() {
    let cloud = platform().cloud();
    let info = cloud.instance_info().unwrap().unwrap();
    assert_eq!(info.name(), Some("styx-james"));
    assert_eq!(info.port(), Some(61857));
    assert_eq!(info.limits().mem, Some(512));
    assert_eq!(info.uris().unwrap().len(), 2);
    assert_eq!(cloud.cloud_api_uri().unwrap(), "api.a1-app.cf-app.com");
}
