mod common;

use regprobe::{AuthError, Authenticator, Credentials};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{DEAD_SERVICE, config_for};

fn credentials() -> Credentials {
    Credentials::new("security.tester@dsr.gov.ph", "SecureTestPassword123!")
}

#[tokio::test]
async fn test_login_returns_access_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .and(body_json(json!({
            "email": "security.tester@dsr.gov.ph",
            "password": "SecureTestPassword123!"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "eyJhbGciOiJIUzI1NiJ9.test",
            "tokenType": "Bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&[("registration", server.uri().as_str())]);
    let authenticator = Authenticator::new(&config).unwrap();

    let token = authenticator.login(&credentials()).await.unwrap();
    assert_eq!(token, "eyJhbGciOiJIUzI1NiJ9.test");
}

#[tokio::test]
async fn test_login_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let config = config_for(&[("registration", server.uri().as_str())]);
    let authenticator = Authenticator::new(&config).unwrap();

    assert_eq!(
        authenticator.login(&credentials()).await,
        Err(AuthError::Rejected(401))
    );
    assert!(authenticator.try_login(&credentials()).await.is_none());
}

#[tokio::test]
async fn test_login_without_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&server)
        .await;

    let config = config_for(&[("registration", server.uri().as_str())]);
    let authenticator = Authenticator::new(&config).unwrap();

    assert_eq!(
        authenticator.login(&credentials()).await,
        Err(AuthError::MissingToken)
    );
}

#[tokio::test]
async fn test_login_transport_failure() {
    let config = config_for(&[("registration", DEAD_SERVICE)]);
    let authenticator = Authenticator::new(&config).unwrap();

    let err = authenticator.login(&credentials()).await.unwrap_err();
    assert!(matches!(err, AuthError::Transport(_)));
}

#[tokio::test]
async fn test_login_without_registration_service() {
    let config = config_for(&[("payment", DEAD_SERVICE)]);
    let authenticator = Authenticator::new(&config).unwrap();

    assert_eq!(
        authenticator.login(&credentials()).await,
        Err(AuthError::ServiceNotConfigured("registration".to_string()))
    );
}
