//! Client-credential token grant against a mock identity provider

use std::time::Duration;

use ev_core::errors::StoreError;
use ev_infra::{build_http_client, ClientCredentialProvider};
use ev_shared::IdentityConfig;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider(server: &MockServer) -> ClientCredentialProvider {
    let config = IdentityConfig::new("tenant-1", "client-abc", "s3cret").with_authority_host(server.uri());
    let http = build_http_client(Duration::from_secs(5)).unwrap();
    ClientCredentialProvider::new(http, config)
}

#[tokio::test]
async fn test_acquire_token_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tenant-1/oauth2/v2.0/token"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("grant_type=client_credentials"))
        .and(body_string_contains("client_id=client-abc"))
        .and(body_string_contains("client_secret=s3cret"))
        .and(body_string_contains("scope=https%3A%2F%2Fgraph.microsoft.com%2F.default"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token_type": "Bearer",
            "expires_in": 3599,
            "access_token": "eyJ0eXAiOiJKV1Qi"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let token = provider(&server).acquire_token().await.unwrap();
    assert_eq!(token.secret(), "eyJ0eXAiOiJKV1Qi");
}

#[tokio::test]
async fn test_acquire_token_is_not_cached() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tenant-1/oauth2/v2.0/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token_type": "Bearer",
            "access_token": "fresh"
        })))
        .expect(2)
        .mount(&server)
        .await;

    let provider = provider(&server);
    provider.acquire_token().await.unwrap();
    provider.acquire_token().await.unwrap();
}

#[tokio::test]
async fn test_acquire_token_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/tenant-1/oauth2/v2.0/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": "invalid_client",
            "error_description": "AADSTS7000215: Invalid client secret provided."
        })))
        .mount(&server)
        .await;

    let err = provider(&server).acquire_token().await.unwrap_err();
    match err {
        StoreError::Authentication { message } => {
            assert!(message.starts_with("invalid_client"));
            assert!(message.contains("AADSTS7000215"));
        }
        other => panic!("Expected authentication error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_acquire_token_non_json_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = provider(&server).acquire_token().await.unwrap_err();
    assert!(matches!(err, StoreError::Authentication { ref message } if message.contains("HTTP 502")));
}

#[tokio::test]
async fn test_acquire_token_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = provider(&server).acquire_token().await.unwrap_err();
    assert!(matches!(err, StoreError::Decode { .. }));
}

#[tokio::test]
async fn test_acquire_token_unusable_authority_host() {
    let config = IdentityConfig::new("tenant-1", "client-abc", "s3cret").with_authority_host("not a url");
    let http = build_http_client(Duration::from_secs(5)).unwrap();

    let err = ClientCredentialProvider::new(http, config).acquire_token().await.unwrap_err();
    assert!(matches!(err, StoreError::Configuration { .. }));
}
