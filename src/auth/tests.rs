//! Tests for the auth module

use super::*;
use base64::Engine;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_no_auth() {
    let auth = Authenticator::new(AuthConfig::None);
    let client = reqwest::Client::new();
    let req = client.get("https://example.com/db");

    let built = auth.authenticate(req).await.unwrap().build().unwrap();
    assert!(built.headers().get("Authorization").is_none());
}

#[tokio::test]
async fn test_basic_auth() {
    let auth = Authenticator::new(AuthConfig::basic("user", "pass"));

    let client = reqwest::Client::new();
    let req = client.get("https://example.com/db");
    let req = auth.authenticate(req).await.unwrap();

    let built = req.build().unwrap();
    let auth_header = built
        .headers()
        .get("Authorization")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(auth_header.starts_with("Basic "));

    let encoded = auth_header.strip_prefix("Basic ").unwrap();
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .unwrap();
    assert_eq!(String::from_utf8(decoded).unwrap(), "user:pass");
}

#[tokio::test]
async fn test_bearer_auth() {
    let auth = Authenticator::new(AuthConfig::Bearer {
        token: "my-bearer-token".to_string(),
    });

    let client = reqwest::Client::new();
    let req = client.get("https://example.com/db");
    let built = auth.authenticate(req).await.unwrap().build().unwrap();

    assert_eq!(
        built.headers().get("Authorization").unwrap(),
        "Bearer my-bearer-token"
    );
    assert_eq!(auth.auth_type(), "bearertoken");
}

#[tokio::test]
async fn test_iam_token_fetch_and_cache() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/identity/token"))
        .and(body_string_contains("grant_type=urn%3Aibm%3Aparams%3Aoauth%3Agrant-type%3Aapikey"))
        .and(body_string_contains("apikey=my-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "iam-access-token",
            "refresh_token": "not-used",
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new(AuthConfig::Iam {
        apikey: "my-key".to_string(),
        url: Some(mock_server.uri()),
        client_id: None,
        client_secret: None,
        scope: None,
    });

    let client = reqwest::Client::new();
    for _ in 0..3 {
        let req = client.get("https://example.com/db");
        let built = auth.authenticate(req).await.unwrap().build().unwrap();
        assert_eq!(
            built.headers().get("Authorization").unwrap(),
            "Bearer iam-access-token"
        );
    }
}

#[tokio::test]
async fn test_iam_token_refetched_after_clear() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/identity/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "token",
            "expires_in": 3600
        })))
        .expect(2)
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new(AuthConfig::Iam {
        apikey: "key".to_string(),
        url: Some(mock_server.uri()),
        client_id: None,
        client_secret: None,
        scope: None,
    });

    let client = reqwest::Client::new();
    auth.authenticate(client.get("https://example.com"))
        .await
        .unwrap();
    auth.clear_cache().await;
    auth.authenticate(client.get("https://example.com"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_iam_token_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/identity/token"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad api key"))
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new(AuthConfig::Iam {
        apikey: "bad".to_string(),
        url: Some(mock_server.uri()),
        client_id: None,
        client_secret: None,
        scope: None,
    });

    let client = reqwest::Client::new();
    let err = auth
        .authenticate(client.get("https://example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, crate::Error::TokenRefresh { .. }));
    assert!(err.to_string().contains("bad api key"));
}

#[tokio::test]
async fn test_iam_client_credentials_use_basic_auth() {
    let mock_server = MockServer::start().await;

    // "bx:bx" base64 encoded
    Mock::given(method("POST"))
        .and(path("/identity/token"))
        .and(header("Authorization", "Basic Yng6Yng="))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "scoped",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new(AuthConfig::Iam {
        apikey: "key".to_string(),
        url: Some(mock_server.uri()),
        client_id: Some("bx".to_string()),
        client_secret: Some("bx".to_string()),
        scope: None,
    });

    let client = reqwest::Client::new();
    let built = auth
        .authenticate(client.get("https://example.com"))
        .await
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(built.headers().get("Authorization").unwrap(), "Bearer scoped");
}

#[tokio::test]
async fn test_couchdb_session_cookie() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/_session"))
        .and(body_string_contains("name=admin"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "Set-Cookie",
                    "AuthSession=YWRtaW46NjA; Version=1; Max-Age=600; Path=/; HttpOnly",
                )
                .set_body_json(serde_json::json!({"ok": true, "name": "admin", "roles": []})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new(AuthConfig::couchdb_session("admin", "secret"))
        .with_service_url(mock_server.uri());

    let client = reqwest::Client::new();
    for _ in 0..2 {
        let built = auth
            .authenticate(client.get("https://example.com/db"))
            .await
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            built.headers().get("Cookie").unwrap(),
            "AuthSession=YWRtaW46NjA"
        );
    }
}

#[tokio::test]
async fn test_iam_token_with_huge_lifetime_is_kept() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/identity/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "long-lived",
            "expires_in": i64::MAX,
            "expiration": i64::MAX
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new(AuthConfig::Iam {
        apikey: "my-key".to_string(),
        url: Some(mock_server.uri()),
        client_id: None,
        client_secret: None,
        scope: None,
    });

    let client = reqwest::Client::new();
    for _ in 0..2 {
        let built = auth
            .authenticate(client.get("https://example.com/db"))
            .await
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(built.headers().get("Authorization").unwrap(), "Bearer long-lived");
    }
}

#[tokio::test]
async fn test_couchdb_session_with_huge_max_age() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/_session"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Set-Cookie", "AuthSession=abc; Max-Age=99999999999999999; Path=/")
                .set_body_json(serde_json::json!({"ok": true})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let auth = Authenticator::new(AuthConfig::couchdb_session("admin", "secret"))
        .with_service_url(mock_server.uri());

    let built = auth
        .authenticate(reqwest::Client::new().get("https://example.com/db"))
        .await
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(built.headers().get("Cookie").unwrap(), "AuthSession=abc");
}

#[tokio::test]
async fn test_couchdb_session_requires_service_url() {
    let auth = Authenticator::new(AuthConfig::couchdb_session("admin", "secret"));
    let client = reqwest::Client::new();
    let err = auth
        .authenticate(client.get("https://example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, crate::Error::Auth { .. }));
}

#[test]
fn test_authenticator_debug_hides_credentials() {
    let auth = Authenticator::new(AuthConfig::basic("user", "hunter2"));
    let debug = format!("{auth:?}");
    assert!(debug.contains("basic"));
    assert!(!debug.contains("hunter2"));
}
