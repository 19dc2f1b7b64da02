//! Push registration: the redundant-call cache and the deferred cases.

mod common;

use std::sync::Arc;

use secrecy::SecretString;
use serial_test::serial;
use tempfile::TempDir;

use common::harness::StubTransport;
use opsdesk::notify::PushRegistrar;
use opsdesk::session::{AuthenticatedUser, SessionStore};

fn employee() -> AuthenticatedUser {
    AuthenticatedUser {
        id: "u-1".to_string(),
        employee_id: "emp-7".to_string(),
        display_name: "Alex".to_string(),
        roles: vec![],
        department: None,
    }
}

fn open_store(dir: &TempDir) -> Arc<SessionStore> {
    std::env::remove_var(opsdesk::secrets::TOKEN_KEY_ENV_VAR);
    Arc::new(SessionStore::open(dir.path()).unwrap())
}

#[tokio::test]
#[serial]
async fn registration_posts_tuple_and_caches_token() {
    let dir = TempDir::new().unwrap();
    let session = open_store(&dir);
    session
        .login(SecretString::from("jwt".to_string()), employee())
        .unwrap();

    let transport = Arc::new(StubTransport::new());
    let registrar = PushRegistrar::new(transport.clone(), session.clone(), "desktop".to_string());

    assert!(registrar.register("push-abc").await.unwrap());

    let request = transport.last_request().unwrap();
    assert_eq!(request.path, "push/registrations");
    let body = request.body.unwrap();
    assert_eq!(body["employeeId"], "emp-7");
    assert_eq!(body["platform"], "desktop");
    assert_eq!(body["token"], "push-abc");

    // Same token again: served from the session cache, no second call.
    assert!(!registrar.register("push-abc").await.unwrap());
    assert_eq!(transport.request_count("push/registrations"), 1);

    // A rotated token registers again.
    assert!(registrar.register("push-def").await.unwrap());
    assert_eq!(transport.request_count("push/registrations"), 2);
}

#[tokio::test]
#[serial]
async fn registration_is_deferred_without_a_login() {
    let dir = TempDir::new().unwrap();
    let session = open_store(&dir);

    let transport = Arc::new(StubTransport::new());
    let registrar = PushRegistrar::new(transport.clone(), session, "desktop".to_string());

    assert!(!registrar.register("push-abc").await.unwrap());
    assert!(transport.requests().is_empty());
}

#[tokio::test]
#[serial]
async fn backend_failure_leaves_token_unregistered() {
    let dir = TempDir::new().unwrap();
    let session = open_store(&dir);
    session
        .login(SecretString::from("jwt".to_string()), employee())
        .unwrap();

    let transport = Arc::new(StubTransport::new());
    transport.fail("push/registrations", 500, "push service down");
    let registrar = PushRegistrar::new(transport.clone(), session.clone(), "desktop".to_string());

    assert!(registrar.register("push-abc").await.is_err());
    assert!(session.push_token().is_none());

    // Nothing was cached, so the retry goes out again.
    transport.respond("push/registrations", serde_json::json!({"status": "ok"}));
    assert!(registrar.register("push-abc").await.unwrap());
    assert_eq!(session.push_token().as_deref(), Some("push-abc"));
}
