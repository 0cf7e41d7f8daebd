//! Mock-based tests for the DemoQA Account API client.
//!
//! These tests use `wiremock` to simulate the Account API
//! (`demoqa.com/Account/v1/...`) without requiring network access.
//!
//! # Coverage
//!
//! - Every operation's success path and request shape (method, path,
//!   JSON body, Bearer header)
//! - Error classification: 406 user-exists, 400 bad credentials, the
//!   in-band token failure, and the 401/404/502 spread on user lookups
//! - Session establish / fetch / teardown, including the best-effort
//!   teardown tolerance
//! - Transport failures: request timeout, connection refused

use std::time::Duration;

use demoqa_account::account::{ApiError, Session};
use demoqa_account::{
    AccountClient, CreateUserError, Credentials, GenerateTokenError, HttpClientConfig, UserError,
};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::constants::{NIL_UUID, TEST_PASSWORD, TEST_TOKEN, TEST_UUID, WRONG_PASSWORD};
use crate::common::{account::*, setup_mock_server};

fn test_credentials() -> Credentials {
    Credentials::new("testuser_mock", TEST_PASSWORD)
}

// =============================================================================
// Create User
// =============================================================================

#[tokio::test]
async fn create_user_success() {
    let server = setup_mock_server().await;
    let credentials = test_credentials();

    Mock::given(method("POST"))
        .and(path("/Account/v1/User"))
        .and(body_json(&credentials))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(created_user_body(TEST_UUID, &credentials.user_name)),
        )
        .mount(&server)
        .await;

    let client = AccountClient::with_base_url(&server.uri()).expect("create client");

    let user = client
        .create_user(&credentials)
        .await
        .expect("create user should succeed");

    assert_eq!(user.user_id, TEST_UUID);
    assert_eq!(user.username, credentials.user_name);
    assert!(user.books.is_empty(), "new users start with no books");
}

#[tokio::test]
async fn create_user_already_exists() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/Account/v1/User"))
        .respond_with(
            ResponseTemplate::new(406).set_body_json(error_body("1204", "User exists!")),
        )
        .mount(&server)
        .await;

    let client = AccountClient::with_base_url(&server.uri()).expect("create client");

    let err = client
        .create_user(&test_credentials())
        .await
        .expect_err("duplicate user should be rejected");

    match err {
        CreateUserError::UserExists(message) => {
            assert!(message.message.contains("User exists!"));
            assert_eq!(message.code.as_deref(), Some("1204"));
        }
        other => panic!("expected UserExists, got {other:?}"),
    }
}

#[tokio::test]
async fn create_user_empty_password_rejected() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/Account/v1/User"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(error_body("1200", "UserName and Password required.")),
        )
        .mount(&server)
        .await;

    let client = AccountClient::with_base_url(&server.uri()).expect("create client");
    let credentials = Credentials::new("testuser_invalid", "");

    let err = client
        .create_user(&credentials)
        .await
        .expect_err("empty password should be rejected");

    // The service words this rejection several ways.
    let accepted_messages = [
        "Passwords must have at least one non alphanumeric character",
        "UserName and Password required.",
        "Password field is required",
    ];
    match err {
        CreateUserError::InvalidCredentials(message) => {
            assert!(
                accepted_messages
                    .iter()
                    .any(|accepted| message.message.contains(accepted)),
                "unexpected rejection wording: {}",
                message.message
            );
        }
        other => panic!("expected InvalidCredentials, got {other:?}"),
    }
}

#[tokio::test]
async fn create_user_unexpected_status_is_api_error() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/Account/v1/User"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = AccountClient::with_base_url(&server.uri()).expect("create client");

    let err = client
        .create_user(&test_credentials())
        .await
        .expect_err("500 should be an error");

    match err {
        CreateUserError::Api(api_err) => {
            assert_eq!(api_err.status().map(|s| s.as_u16()), Some(500));
        }
        other => panic!("expected Api, got {other:?}"),
    }
}

// =============================================================================
// Generate Token
// =============================================================================

#[tokio::test]
async fn generate_token_success() {
    let server = setup_mock_server().await;
    let credentials = test_credentials();

    Mock::given(method("POST"))
        .and(path("/Account/v1/GenerateToken"))
        .and(body_json(&credentials))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_success_body(TEST_TOKEN)))
        .mount(&server)
        .await;

    let client = AccountClient::with_base_url(&server.uri()).expect("create client");

    let token = client
        .generate_token(&credentials)
        .await
        .expect("token generation should succeed");

    assert_eq!(token.token, TEST_TOKEN);
    assert!(!token.expires.is_empty());
    assert_eq!(token.result, "User authorized successfully.");
}

#[tokio::test]
async fn generate_token_wrong_password_fails_in_band() {
    let server = setup_mock_server().await;

    // The service reports a wrong password on HTTP 200, not 401.
    Mock::given(method("POST"))
        .and(path("/Account/v1/GenerateToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_failed_body()))
        .mount(&server)
        .await;

    let client = AccountClient::with_base_url(&server.uri()).expect("create client");
    let credentials = Credentials::new("testuser_mock", WRONG_PASSWORD);

    let err = client
        .generate_token(&credentials)
        .await
        .expect_err("wrong password should fail");

    match err {
        GenerateTokenError::AuthorizationFailed { result } => {
            assert_eq!(result, "User authorization failed.");
        }
        other => panic!("expected AuthorizationFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn generate_token_missing_credentials() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/Account/v1/GenerateToken"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(error_body("1200", "UserName and Password required.")),
        )
        .mount(&server)
        .await;

    let client = AccountClient::with_base_url(&server.uri()).expect("create client");

    let err = client
        .generate_token(&Credentials::new("testuser_mock", ""))
        .await
        .expect_err("missing password should fail");

    match err {
        GenerateTokenError::MissingCredentials(message) => {
            assert!(message.message.contains("required"));
        }
        other => panic!("expected MissingCredentials, got {other:?}"),
    }
}

// =============================================================================
// Authorized
// =============================================================================

#[tokio::test]
async fn authorized_returns_bare_boolean() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/Account/v1/Authorized"))
        .respond_with(ResponseTemplate::new(200).set_body_json(true))
        .mount(&server)
        .await;

    let client = AccountClient::with_base_url(&server.uri()).expect("create client");

    let authorized = client
        .authorized(&test_credentials())
        .await
        .expect("authorized check should succeed");
    assert!(authorized);
}

#[tokio::test]
async fn authorized_unknown_user_is_not_found() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/Account/v1/Authorized"))
        .respond_with(ResponseTemplate::new(404).set_body_json(error_body("1207", "User not found!")))
        .mount(&server)
        .await;

    let client = AccountClient::with_base_url(&server.uri()).expect("create client");

    let err = client
        .authorized(&test_credentials())
        .await
        .expect_err("unknown user should fail");
    assert!(matches!(err, UserError::NotFound));
}

// =============================================================================
// Get User
// =============================================================================

#[tokio::test]
async fn get_user_success() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path(format!("/Account/v1/User/{TEST_UUID}")))
        .and(header("Authorization", format!("Bearer {TEST_TOKEN}")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(user_body(TEST_UUID, "testuser_mock")),
        )
        .mount(&server)
        .await;

    let client = AccountClient::with_base_url(&server.uri()).expect("create client");

    let user = client
        .get_user(TEST_UUID, TEST_TOKEN)
        .await
        .expect("get user should succeed");

    assert_eq!(user.user_id, TEST_UUID);
    assert_eq!(user.username, "testuser_mock");
    assert!(user.books.is_empty());
}

#[tokio::test]
async fn get_user_with_books() {
    let server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path(format!("/Account/v1/User/{TEST_UUID}")))
        .and(header("Authorization", format!("Bearer {TEST_TOKEN}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(user_with_book_body(TEST_UUID, "testuser_mock")),
        )
        .mount(&server)
        .await;

    let client = AccountClient::with_base_url(&server.uri()).expect("create client");

    let user = client
        .get_user(TEST_UUID, TEST_TOKEN)
        .await
        .expect("get user should succeed");

    assert_eq!(user.books.len(), 1);
    assert_eq!(user.books[0].isbn, "9781449325862");
    assert_eq!(user.books[0].title, "Git Pocket Guide");
}

#[tokio::test]
async fn get_user_missing_user_status_spread() {
    // The service has answered any of these for a user that does not
    // exist; each must classify distinctly and all must satisfy the
    // missing-user predicate.
    for status in [401u16, 404, 502] {
        let server = setup_mock_server().await;

        Mock::given(method("GET"))
            .and(path(format!("/Account/v1/User/{NIL_UUID}")))
            .respond_with(
                ResponseTemplate::new(status)
                    .set_body_json(error_body("1207", "User not found!")),
            )
            .mount(&server)
            .await;

        let client = AccountClient::with_base_url(&server.uri()).expect("create client");

        let err = client
            .get_user(NIL_UUID, TEST_TOKEN)
            .await
            .expect_err("missing user should fail");

        match status {
            401 => assert!(matches!(err, UserError::Unauthorized), "{status}"),
            404 => assert!(matches!(err, UserError::NotFound), "{status}"),
            502 => assert!(matches!(err, UserError::BadGateway), "{status}"),
            _ => unreachable!(),
        }
        assert!(err.indicates_missing_user(), "status {status}");
    }
}

// =============================================================================
// Delete User
// =============================================================================

#[tokio::test]
async fn delete_user_success_200() {
    let server = setup_mock_server().await;

    Mock::given(method("DELETE"))
        .and(path(format!("/Account/v1/User/{TEST_UUID}")))
        .and(header("Authorization", format!("Bearer {TEST_TOKEN}")))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = AccountClient::with_base_url(&server.uri()).expect("create client");

    client
        .delete_user(TEST_UUID, TEST_TOKEN)
        .await
        .expect("delete should succeed");
}

#[tokio::test]
async fn delete_user_success_204() {
    let server = setup_mock_server().await;

    Mock::given(method("DELETE"))
        .and(path(format!("/Account/v1/User/{TEST_UUID}")))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = AccountClient::with_base_url(&server.uri()).expect("create client");

    client
        .delete_user(TEST_UUID, TEST_TOKEN)
        .await
        .expect("delete should accept 204");
}

#[tokio::test]
async fn delete_nonexistent_user_fails() {
    let server = setup_mock_server().await;

    Mock::given(method("DELETE"))
        .and(path(format!("/Account/v1/User/{NIL_UUID}")))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(error_body("1207", "User Id not correct!")),
        )
        .mount(&server)
        .await;

    let client = AccountClient::with_base_url(&server.uri()).expect("create client");

    let err = client
        .delete_user(NIL_UUID, TEST_TOKEN)
        .await
        .expect_err("deleting a missing user should fail");
    assert!(err.indicates_missing_user());
}

// =============================================================================
// Session
// =============================================================================

#[tokio::test]
async fn session_establish_fetch_teardown() {
    let server = setup_mock_server().await;
    let credentials = test_credentials();

    Mock::given(method("POST"))
        .and(path("/Account/v1/User"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(created_user_body(TEST_UUID, &credentials.user_name)),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/Account/v1/GenerateToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_success_body(TEST_TOKEN)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/Account/v1/User/{TEST_UUID}")))
        .and(header("Authorization", format!("Bearer {TEST_TOKEN}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(user_body(TEST_UUID, &credentials.user_name)),
        )
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(format!("/Account/v1/User/{TEST_UUID}")))
        .and(header("Authorization", format!("Bearer {TEST_TOKEN}")))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = AccountClient::with_base_url(&server.uri()).expect("create client");

    let session = Session::establish(&client, &credentials)
        .await
        .expect("establish session");
    assert_eq!(session.user_id, TEST_UUID);
    assert_eq!(session.token.token, TEST_TOKEN);

    let user = session.fetch_user(&client).await.expect("fetch user");
    assert_eq!(user.username, credentials.user_name);

    session.teardown(&client).await.expect("teardown");
}

#[tokio::test]
async fn session_teardown_tolerates_bad_gateway() {
    let server = setup_mock_server().await;
    let credentials = test_credentials();

    Mock::given(method("POST"))
        .and(path("/Account/v1/User"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(created_user_body(TEST_UUID, &credentials.user_name)),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/Account/v1/GenerateToken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_success_body(TEST_TOKEN)))
        .mount(&server)
        .await;
    // The shared deployment regularly 502s deletes of already-gone users.
    Mock::given(method("DELETE"))
        .and(path(format!("/Account/v1/User/{TEST_UUID}")))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = AccountClient::with_base_url(&server.uri()).expect("create client");

    let session = Session::establish(&client, &credentials)
        .await
        .expect("establish session");

    session
        .teardown(&client)
        .await
        .expect("teardown should swallow 502");
}

// =============================================================================
// Transport failures
// =============================================================================

#[tokio::test]
async fn request_timeout_is_transport_error() {
    let server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/Account/v1/User"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(created_user_body(TEST_UUID, "testuser_mock"))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let config = HttpClientConfig::new().timeout(Duration::from_millis(200));
    let client = AccountClient::with_config(&server.uri(), config).expect("create client");

    let err = client
        .create_user(&test_credentials())
        .await
        .expect_err("request should time out");

    match err {
        CreateUserError::Api(ApiError::Transport(transport)) => {
            assert!(transport.is_timeout(), "expected timeout, got {transport:?}");
        }
        other => panic!("expected Transport, got {other:?}"),
    }
}

#[tokio::test]
async fn connection_refused_is_transport_error() {
    // Take a port from a mock server, then drop the server so nothing
    // is listening on it. A bare (non-pooled) server is required here:
    // pooled servers keep listening after drop.
    let server = MockServer::builder().start().await;
    let uri = server.uri();
    drop(server);

    let client = AccountClient::with_base_url(&uri).expect("create client");

    let err = client
        .create_user(&test_credentials())
        .await
        .expect_err("request should fail to connect");

    match err {
        CreateUserError::Api(ApiError::Transport(transport)) => {
            assert!(transport.status().is_none());
        }
        other => panic!("expected Transport, got {other:?}"),
    }
}
