//! End-to-end tests against a real Postgres.
//!
//! `#[sqlx::test]` creates a fresh database per test from `DATABASE_URL` and
//! applies `migrations/`. Run with `cargo test -- --ignored`.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use insurance_backend::{
    app,
    config::{AppState, Config},
};

fn router(pool: PgPool) -> Router {
    let config = Config {
        database_url: String::new(),
        jwt_secret: "test-secret".to_string(),
        api_version: "/v1".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        max_connections: 1,
    };
    app(AppState::from_pool(pool, config))
}

async fn call(pool: &PgPool, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, "Bearer test");
    let request = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            builder.body(Body::from(json.to_string())).unwrap()
        }
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router(pool.clone()).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn create(pool: &PgPool, entity: &str, body: Value) -> Value {
    let (status, created) = call(pool, Method::POST, &format!("/v1/{entity}/new"), Some(body)).await;
    assert_eq!(status, StatusCode::OK, "creating {entity}: {created}");
    created
}

async fn insurance(pool: &PgPool, percentage: i32, min: i32) -> String {
    let created = create(
        pool,
        "insurance",
        json!({ "name": "Vida", "percentage_to_insure": percentage, "min_to_insure": min }),
    )
    .await;
    created["id"].as_str().unwrap().to_string()
}

fn client_body(email: &str, insurance_id: &str, value_to_insure: i32) -> Value {
    json!({
        "name": "Ana",
        "last_name": "Restrepo",
        "email": email,
        "client_type": "Natural",
        "dni_type": "Cedula",
        "dni_number": "1020304050",
        "phone": "3001234567",
        "age": 34,
        "address": "Carrera 7 # 12-34",
        "value_to_insure": value_to_insure,
        "insurance_id": insurance_id
    })
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL"]
async fn client_at_the_minimum_is_insured_on_create(pool: PgPool) {
    let insurance_id = insurance(&pool, 80, 1000).await;

    let client = create(&pool, "client", client_body("ana@email.com", &insurance_id, 1000)).await;

    assert_eq!(client["insured"], true);
    assert_eq!(client["insured_value"], 800);
    assert_eq!(client["insurance"]["id"], insurance_id.as_str());
    assert!(client.get("insurance_id").is_none());
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL"]
async fn insured_value_is_floored(pool: PgPool) {
    let insurance_id = insurance(&pool, 33, 0).await;
    let client = create(&pool, "client", client_body("ana@email.com", &insurance_id, 1001)).await;
    assert_eq!(client["insured_value"], 330);
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL"]
async fn new_value_equal_to_the_minimum_is_not_insured_on_update(pool: PgPool) {
    let insurance_id = insurance(&pool, 50, 1000).await;
    let client = create(&pool, "client", client_body("ana@email.com", &insurance_id, 5000)).await;
    let id = client["id"].as_str().unwrap();

    let (status, updated) = call(
        &pool,
        Method::PUT,
        &format!("/v1/client/{id}"),
        Some(json!({ "value_to_insure": 1000 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["insured"], false);
    assert_eq!(updated["insured_value"], 500);
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL"]
async fn switching_insurance_recomputes_with_the_new_coverage(pool: PgPool) {
    let first = insurance(&pool, 50, 10_000).await;
    let second = insurance(&pool, 90, 2000).await;
    let client = create(&pool, "client", client_body("ana@email.com", &first, 2000)).await;
    assert_eq!(client["insured"], false);
    let id = client["id"].as_str().unwrap();

    let (_, updated) = call(
        &pool,
        Method::PUT,
        &format!("/v1/client/{id}"),
        Some(json!({ "insurance_id": second })),
    )
    .await;

    assert_eq!(updated["insured"], true);
    assert_eq!(updated["insured_value"], 1800);
    assert_eq!(updated["insurance"]["id"], second.as_str());
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL"]
async fn editing_other_fields_keeps_the_valuation(pool: PgPool) {
    let insurance_id = insurance(&pool, 80, 1000).await;
    let client = create(&pool, "client", client_body("ana@email.com", &insurance_id, 1000)).await;
    let id = client["id"].as_str().unwrap();

    let (_, updated) = call(
        &pool,
        Method::PUT,
        &format!("/v1/client/{id}"),
        Some(json!({ "phone": "3119998877" })),
    )
    .await;

    assert_eq!(updated["phone"], "3119998877");
    assert_eq!(updated["insured"], true);
    assert_eq!(updated["insured_value"], 800);
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL"]
async fn unknown_insurance_is_a_bad_request(pool: PgPool) {
    let missing = uuid::Uuid::new_v4().to_string();
    let (status, body) = call(
        &pool,
        Method::POST,
        "/v1/client/new",
        Some(client_body("ana@email.com", &missing, 1000)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "The referenced insurance does not exist.");
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL"]
async fn client_left_without_insurance_needs_a_new_one_on_update(pool: PgPool) {
    let insurance_id = insurance(&pool, 80, 1000).await;
    let client = create(&pool, "client", client_body("ana@email.com", &insurance_id, 1000)).await;
    let id = client["id"].as_str().unwrap();

    let (status, _) = call(&pool, Method::DELETE, &format!("/v1/insurance/{insurance_id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, orphan) = call(&pool, Method::GET, &format!("/v1/client/{id}"), None).await;
    assert!(orphan["insurance"].is_null());

    let (status, body) = call(
        &pool,
        Method::PUT,
        &format!("/v1/client/{id}"),
        Some(json!({ "phone": "3119998877" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "The client has no insurance; an insurance_id is required.");

    // Com um seguro novo a atualização volta a funcionar
    let replacement = insurance(&pool, 50, 500).await;
    let (status, updated) = call(
        &pool,
        Method::PUT,
        &format!("/v1/client/{id}"),
        Some(json!({ "insurance_id": replacement })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["insured"], true);
    assert_eq!(updated["insured_value"], 500);
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL"]
async fn duplicate_emails_are_bad_requests(pool: PgPool) {
    let insurance_id = insurance(&pool, 80, 1000).await;
    create(&pool, "client", client_body("ana@email.com", &insurance_id, 1000)).await;

    let (status, body) = call(
        &pool,
        Method::POST,
        "/v1/client/new",
        Some(client_body("ana@email.com", &insurance_id, 1000)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Client with this email already exists.");
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL"]
async fn deleting_a_department_removes_every_orphan_city(pool: PgPool) {
    let antioquia = create(&pool, "department", json!({ "name": "Antioquia" })).await;
    let valle = create(&pool, "department", json!({ "name": "Valle" })).await;
    let antioquia_id = antioquia["id"].as_str().unwrap();
    let valle_id = valle["id"].as_str().unwrap();

    create(&pool, "city", json!({ "name": "Medellin", "department_id": antioquia_id })).await;
    create(&pool, "city", json!({ "name": "Cali", "department_id": valle_id })).await;
    create(&pool, "city", json!({ "name": "Sin departamento" })).await;

    let (status, body) = call(&pool, Method::DELETE, &format!("/v1/department/{antioquia_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Department deleted successfully.");

    let (_, cities) = call(&pool, Method::GET, "/v1/city", None).await;
    let names: Vec<&str> = cities
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Cali"]);

    let (status, _) = call(&pool, Method::DELETE, &format!("/v1/department/{antioquia_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL"]
async fn nested_shapes_follow_the_references(pool: PgPool) {
    let department = create(&pool, "department", json!({ "name": "Antioquia" })).await;
    let department_id = department["id"].as_str().unwrap();
    let city = create(&pool, "city", json!({ "name": "Medellin", "department_id": department_id })).await;
    let city_id = city["id"].as_str().unwrap();
    assert_eq!(city["department"]["name"], "Antioquia");

    let insurer = create(
        &pool,
        "insurer",
        json!({
            "name": "Sura",
            "nit": "800123456",
            "address": "Calle 50 # 10-20",
            "phone": "6044445555",
            "email": "contacto@sura.com",
            "department_id": department_id,
            "city_id": city_id
        }),
    )
    .await;
    let insurer_id = insurer["id"].as_str().unwrap();

    let insurance_type = create(&pool, "insurancetype", json!({ "name": "Hogar", "insurer_id": insurer_id })).await;
    assert_eq!(insurance_type["insurer"]["city"]["name"], "Medellin");
    let type_id = insurance_type["id"].as_str().unwrap();

    let insurance = create(
        &pool,
        "insurance",
        json!({ "name": "Hogar plus", "percentage_to_insure": 70, "min_to_insure": 100, "insurance_type_id": type_id }),
    )
    .await;
    assert_eq!(insurance["insurance_type"]["insurer"]["department"]["name"], "Antioquia");
    assert!(insurance["insurance_type"].get("insurer_id").is_none());

    let (_, department) = call(&pool, Method::GET, &format!("/v1/department/{department_id}"), None).await;
    assert_eq!(department["cities"][0]["name"], "Medellin");

    let (_, types) = call(&pool, Method::GET, &format!("/v1/insurer/{insurer_id}/insurancetype"), None).await;
    assert_eq!(types.as_array().unwrap().len(), 1);
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL"]
async fn create_then_fetch_returns_the_same_fields(pool: PgPool) {
    let insurance_id = insurance(&pool, 80, 1000).await;
    let created = create(&pool, "client", client_body("ana@email.com", &insurance_id, 1500)).await;
    let id = created["id"].as_str().unwrap();

    let (status, fetched) = call(&pool, Method::GET, &format!("/v1/client/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (_, clients) = call(&pool, Method::GET, &format!("/v1/insurance/{insurance_id}/client"), None).await;
    assert_eq!(clients[0]["id"], id);
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL"]
async fn missing_ids_are_not_found_on_every_entity(pool: PgPool) {
    let missing = uuid::Uuid::new_v4();
    for entity in ["department", "city", "insurer", "insurancetype", "insurance", "client", "user"] {
        let uri = format!("/v1/{entity}/{missing}");
        let (status, body) = call(&pool, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body["status"], 404);

        let (status, body) = call(&pool, Method::PUT, &uri, Some(json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "PUT {uri}");
        assert_eq!(body["status"], 404);

        let (status, _) = call(&pool, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
    }

    for nested in ["department/{}/city", "insurer/{}/insurancetype", "insurancetype/{}/insurance", "insurance/{}/client"] {
        let uri = format!("/v1/{}", nested.replace("{}", &missing.to_string()));
        let (status, _) = call(&pool, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
    }
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL"]
async fn users_can_log_in_and_never_expose_the_hash(pool: PgPool) {
    let user = create(
        &pool,
        "user",
        json!({
            "name": "Carlos",
            "last_name": "Gomez",
            "email": "carlos@email.com",
            "phone": "3109876543",
            "password": "s3cret-pass"
        }),
    )
    .await;
    assert!(user.get("password_hash").is_none());

    let (status, body) = call(
        &pool,
        Method::POST,
        "/v1/user/login",
        Some(json!({ "email": "carlos@email.com", "password": "s3cret-pass" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].as_str().unwrap().split('.').count() == 3);

    let (status, _) = call(
        &pool,
        Method::POST,
        "/v1/user/login",
        Some(json!({ "email": "carlos@email.com", "password": "wrong-pass" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
