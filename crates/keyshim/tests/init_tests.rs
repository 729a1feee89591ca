//! Binding selection and disabled-mode behaviour

mod common;

use common::{RecordingBinding, unavailable_loader};
use keyshim::{
    CI_VAR, CredentialBinding, CredentialError, CredentialShim, DISABLE_VAR, FALLBACK_LABELS_VAR,
    ShimConfig,
};
use std::sync::Arc;

async fn assert_noop_contract(shim: &CredentialShim) {
    assert!(shim.get_password("my-app", "alice").await.unwrap().is_none());
    assert!(
        shim.get_password("Chrome Safe Storage", "Chrome")
            .await
            .unwrap()
            .is_none()
    );
    assert!(matches!(
        shim.set_password("my-app", "alice", "secret").await,
        Err(CredentialError::WriteDisabled { .. })
    ));
    assert!(!shim.delete_password("my-app", "alice").await.unwrap());
    assert!(shim.find_credentials("my-app").await.unwrap().is_empty());
    assert!(shim.find_password("my-app").await.unwrap().is_none());
}

#[tokio::test]
async fn test_disabled_flag_uses_noop_even_with_working_store() {
    let binding = Arc::new(RecordingBinding::new().with("my-app", "alice", "secret"));
    let loader = Arc::clone(&binding).into_loader();
    let shim = CredentialShim::init(&ShimConfig::new().with_disabled(true), &loader).unwrap();

    assert_eq!(shim.binding_name(), "noop");
    assert_noop_contract(&shim).await;
    assert_eq!(binding.get_count(), 0);
}

#[tokio::test]
async fn test_load_failure_in_ci_degrades_to_noop() {
    let config = ShimConfig::new().with_ci(true);
    let shim = CredentialShim::init(&config, &unavailable_loader).unwrap();

    assert_eq!(shim.binding_name(), "noop");
    assert_noop_contract(&shim).await;
}

#[test]
fn test_load_failure_outside_ci_is_fatal() {
    let result = CredentialShim::init(&ShimConfig::new(), &unavailable_loader);

    match result {
        Err(CredentialError::Unavailable { message }) => {
            assert_eq!(message, "org.freedesktop.secrets was not provided");
        }
        other => panic!("Expected the loader error, got {other:?}"),
    }
}

#[test]
fn test_env_disable_flag() {
    temp_env::with_vars(
        [
            (DISABLE_VAR, Some("1")),
            (CI_VAR, None),
            (FALLBACK_LABELS_VAR, None),
        ],
        || {
            let shim = CredentialShim::init(&ShimConfig::from_env(), &unavailable_loader).unwrap();
            assert_eq!(shim.binding_name(), "noop");
        },
    );
}

#[test]
fn test_env_ci_indicator_permits_soft_failure() {
    temp_env::with_vars([(DISABLE_VAR, None), (CI_VAR, Some("true"))], || {
        let result = CredentialShim::init(&ShimConfig::from_env(), &unavailable_loader);
        assert!(result.is_ok());
    });
}

#[test]
fn test_env_without_ci_surfaces_error() {
    temp_env::with_vars([(DISABLE_VAR, Some("0")), (CI_VAR, None)], || {
        let result = CredentialShim::init(&ShimConfig::from_env(), &unavailable_loader);
        assert!(matches!(result, Err(CredentialError::Unavailable { .. })));
    });
}

#[test]
fn test_env_labels_applied() {
    temp_env::with_vars(
        [
            (DISABLE_VAR, Some("1")),
            (
                FALLBACK_LABELS_VAR,
                Some(r#"[{"service":"Foo","account":"Bar"},{"service":"Baz"}]"#),
            ),
        ],
        || {
            let shim = CredentialShim::init(&ShimConfig::from_env(), &unavailable_loader).unwrap();
            let labels = shim.fallback_labels();
            assert_eq!(labels.len(), 6);
            assert_eq!(labels[0].service, "Foo");
            assert_eq!(labels[0].account, "Bar");
            assert_eq!(labels[1].service, "Chrome Safe Storage");
        },
    );
}
