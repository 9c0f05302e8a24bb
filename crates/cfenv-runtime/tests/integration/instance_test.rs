use serde_json::json;

use cfenv_core::EnvError;
use cfenv_testing::TestEnv;

#[test]
fn should_return_none_outside_platform() {
    let cloud = TestEnv::new().cloud();
    assert!(cloud.instance_info().unwrap().is_none());
    assert!(!cloud.is_running_in_cloud().unwrap());
}

#[test]
fn should_round_trip_application_uris() {
    let cloud = TestEnv::new()
        .application(json!({"application_uris": ["foo.example.com"]}))
        .cloud();

    let info = cloud.instance_info().unwrap().unwrap();
    assert_eq!(info.uris().unwrap(), vec!["foo.example.com".to_string()]);
}

#[test]
fn should_derive_cloud_api_uri() {
    let cloud = TestEnv::new()
        .application_uris(&["myapp.example.com"])
        .cloud();
    assert_eq!(cloud.cloud_api_uri().unwrap(), "api.example.com");
}

#[test]
fn should_fail_cloud_api_uri_without_instance() {
    let err = TestEnv::new().cloud().cloud_api_uri().unwrap_err();
    assert!(matches!(err, EnvError::IllegalState(_)));
}

#[test]
fn should_fail_cloud_api_uri_with_no_uris() {
    let err = TestEnv::new()
        .application_uris(&[])
        .cloud()
        .cloud_api_uri()
        .unwrap_err();
    assert!(matches!(err, EnvError::IllegalState(_)));
}

#[test]
fn should_fail_uris_when_field_absent() {
    let cloud = TestEnv::new().application(json!({"name": "app"})).cloud();
    let err = cloud.instance_info().unwrap().unwrap().uris().unwrap_err();
    assert!(matches!(err, EnvError::MissingField(_)));
}

#[test]
fn should_fail_on_truncated_application_json() {
    let cloud = TestEnv::new().var("VCAP_APPLICATION", r#"{"a":"#).cloud();
    let err = cloud.instance_info().unwrap_err();
    assert!(matches!(err, EnvError::Decoding { ref variable, .. } if variable == "VCAP_APPLICATION"));
    assert!(cloud.cloud_api_uri().is_err());
}
