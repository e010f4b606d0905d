//! Router tests that never touch the database: auth guard, extractor
//! rejections, fallback, health and docs.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

use insurance_backend::{
    app,
    config::{AppState, Config},
};

fn test_config(api_version: &str) -> Config {
    Config {
        // Pool preguiçosa: nenhuma conexão é aberta nestes testes
        database_url: "postgres://postgres@127.0.0.1:1/unused".to_string(),
        jwt_secret: "test-secret".to_string(),
        api_version: api_version.to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        max_connections: 1,
    }
}

fn router(api_version: &str) -> Router {
    let config = test_config(api_version);
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect_lazy(&config.database_url)
        .unwrap();
    app(AppState::from_pool(pool, config))
}

async fn send(router: Router, method: Method, uri: &str, token: Option<&str>, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(raw) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(raw.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn entity_routes_require_a_bearer_token() {
    for uri in [
        "/v1/department",
        "/v1/city",
        "/v1/insurer",
        "/v1/insurancetype",
        "/v1/insurance",
        "/v1/client",
        "/v1/user",
    ] {
        let (status, body) = send(router("/v1"), Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body["status"], 401);
        assert_eq!(body["error"], "Invalid token");
    }
}

#[tokio::test]
async fn writes_are_guarded_before_the_body_is_read() {
    let (status, _) = send(
        router("/v1"),
        Method::POST,
        "/v1/client/new",
        None,
        Some("{ not json"),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn malformed_ids_are_bad_requests() {
    let (status, body) = send(
        router("/v1"),
        Method::GET,
        "/v1/client/not-a-uuid",
        Some("token"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid identifier"));
}

#[tokio::test]
async fn malformed_bodies_are_bad_requests() {
    let (status, body) = send(
        router("/v1"),
        Method::POST,
        "/v1/department/new",
        Some("token"),
        Some("{ \"name\": "),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}

// A validação roda antes de qualquer acesso ao banco
#[tokio::test]
async fn invalid_payloads_are_rejected_before_persistence() {
    let (status, body) = send(
        router("/v1"),
        Method::POST,
        "/v1/insurance/new",
        Some("token"),
        Some(r#"{ "name": "Hogar", "percentage_to_insure": 150, "min_to_insure": -1 }"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("min_to_insure"));
    assert!(message.contains("percentage_to_insure"));
}

#[tokio::test]
async fn login_is_public_but_validated() {
    let (status, body) = send(
        router("/v1"),
        Method::POST,
        "/v1/user/login",
        None,
        Some(r#"{ "email": "not-an-email", "password": "x" }"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("email"));
}

#[tokio::test]
async fn unknown_routes_get_a_json_404() {
    let (status, body) = send(router("/v1"), Method::GET, "/v1/nothing-here", Some("t"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);

    // Sem o prefixo a rota não existe
    let (status, _) = send(router("/v1"), Method::GET, "/department", Some("t"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unsupported_methods_get_a_json_405() {
    let id = "6f1c3b5e-8a2d-4f5e-9c7b-1a2b3c4d5e6f";
    for (method, uri) in [
        (Method::PATCH, format!("/v1/client/{id}")),
        (Method::POST, "/v1/client".to_string()),
        (Method::GET, "/v1/user/login".to_string()),
        (Method::DELETE, "/health".to_string()),
    ] {
        let (status, body) = send(router("/v1"), method, &uri, Some("t"), None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{uri}");
        assert_eq!(body["status"], 405);
        assert_eq!(body["error"], "Method not allowed.");
    }

    // O guard responde antes da checagem de método
    let (status, _) = send(router("/v1"), Method::PATCH, &format!("/v1/client/{id}"), None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn the_prefix_comes_from_configuration() {
    let (status, _) = send(router("/api/v2"), Method::GET, "/api/v2/client", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(router(""), Method::GET, "/client", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_and_openapi_are_public() {
    let response = router("/v1")
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (status, body) = send(router("/v1"), Method::GET, "/api-docs/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["servers"][0]["url"], "/v1");
    assert!(body["paths"]["/client/{id}"].is_object());
}
