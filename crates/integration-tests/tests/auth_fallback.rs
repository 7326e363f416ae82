//! End-to-end tests of fallback authentication: the remote service is
//! unreachable, so registration and sign-in run against the local record
//! store.

#![allow(clippy::unwrap_used)]

use harvest_trail_core::{Email, UserRole};

use harvest_trail_client::models::Registration;
use harvest_trail_client::services::AuthError;
use harvest_trail_integration_tests::TestEnv;

fn registration(email: &str, password: &str, role: UserRole) -> Registration {
    Registration {
        email: Email::parse(email).unwrap(),
        password: password.to_string(),
        role,
        name: Some("Ann".to_string()),
        location: Some("North Field".to_string()),
    }
}

#[tokio::test]
async fn register_then_sign_in_offline() {
    let env = TestEnv::new();
    let sessions = env.sessions();

    let registered = sessions
        .sign_up(registration("ann@example.com", "hunter42", UserRole::Farmer))
        .await
        .unwrap();

    assert_eq!(registered.role, UserRole::Farmer);
    assert_eq!(registered.email.as_str(), "ann@example.com");
    // Fallback registration assigns the role's custody code.
    let code: u16 = registered.farmer_code.unwrap().as_str().parse().unwrap();
    assert!((100..=999).contains(&code));

    sessions.sign_out().unwrap();

    let signed_in = sessions.sign_in("ann@example.com", "hunter42").await.unwrap();
    assert_eq!(signed_in.id, registered.id);
}

#[tokio::test]
async fn wrong_password_is_rejected_by_fallback() {
    let env = TestEnv::new();
    let sessions = env.sessions();

    sessions
        .sign_up(registration("ann@example.com", "hunter42", UserRole::Farmer))
        .await
        .unwrap();

    let result = sessions.sign_in("ann@example.com", "not-the-password").await;
    assert!(matches!(result, Err(AuthError::InvalidCredentials)));

    let result = sessions.sign_in("nobody@example.com", "hunter42").await;
    assert!(matches!(result, Err(AuthError::InvalidCredentials)));
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let env = TestEnv::new();
    let sessions = env.sessions();

    sessions
        .sign_up(registration("ann@example.com", "hunter42", UserRole::Farmer))
        .await
        .unwrap();

    let again = sessions
        .sign_up(registration("ann@example.com", "other-pass", UserRole::Retailer))
        .await;
    assert!(matches!(again, Err(AuthError::EmailTaken)));
}

#[tokio::test]
async fn session_survives_process_restart() {
    let env = TestEnv::new();

    let user = env
        .sessions()
        .sign_up(registration("ann@example.com", "hunter42", UserRole::Distributor))
        .await
        .unwrap();
    assert!(user.distributor_code.is_some());

    // A fresh manager over the same store plays the part of a new process.
    let restarted = env.sessions();
    let restored = restarted.restore().unwrap();
    assert_eq!(restored.id, user.id);
    assert_eq!(restored.role, UserRole::Distributor);

    restarted.sign_out().unwrap();
    assert!(env.sessions().restore().is_none());
}

#[tokio::test]
async fn distinct_roles_get_distinct_code_kinds() {
    let env = TestEnv::new();
    let sessions = env.sessions();

    let farmer = sessions
        .sign_up(registration("f@example.com", "pw-farmer", UserRole::Farmer))
        .await
        .unwrap();
    assert!(farmer.farmer_code.is_some());
    assert!(farmer.distributor_code.is_none());

    let consumer = sessions
        .sign_up(registration("c@example.com", "pw-consumer", UserRole::Consumer))
        .await
        .unwrap();
    assert!(consumer.farmer_code.is_none());
    assert!(consumer.distributor_code.is_none());
}
