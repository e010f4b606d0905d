// src/lib.rs

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use axum::{
    http::StatusCode,
    middleware as axum_middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, middleware::auth::bearer_guard};

/// Monta o router completo: rotas versionadas, docs, health e fallback.
pub fn app(app_state: AppState) -> Router {
    let version = app_state.config.api_version.clone();

    // Rotas de entidade (protegidas pelo bearer_guard)
    let entity_routes = Router::new()
        // --- Departments ---
        .route("/department", get(handlers::department::list_departments))
        .route("/department/new", post(handlers::department::create_department))
        .route(
            "/department/{id}",
            get(handlers::department::get_department)
                .put(handlers::department::update_department)
                .delete(handlers::department::delete_department),
        )
        .route("/department/{id}/city", get(handlers::department::list_department_cities))
        // --- Cities ---
        .route("/city", get(handlers::city::list_cities))
        .route("/city/new", post(handlers::city::create_city))
        .route(
            "/city/{id}",
            get(handlers::city::get_city)
                .put(handlers::city::update_city)
                .delete(handlers::city::delete_city),
        )
        // --- Insurers ---
        .route("/insurer", get(handlers::insurer::list_insurers))
        .route("/insurer/new", post(handlers::insurer::create_insurer))
        .route(
            "/insurer/{id}",
            get(handlers::insurer::get_insurer)
                .put(handlers::insurer::update_insurer)
                .delete(handlers::insurer::delete_insurer),
        )
        .route(
            "/insurer/{id}/insurancetype",
            get(handlers::insurer::list_insurer_insurance_types),
        )
        // --- Insurance types ---
        .route("/insurancetype", get(handlers::insurance_type::list_insurance_types))
        .route("/insurancetype/new", post(handlers::insurance_type::create_insurance_type))
        .route(
            "/insurancetype/{id}",
            get(handlers::insurance_type::get_insurance_type)
                .put(handlers::insurance_type::update_insurance_type)
                .delete(handlers::insurance_type::delete_insurance_type),
        )
        .route(
            "/insurancetype/{id}/insurance",
            get(handlers::insurance_type::list_type_insurances),
        )
        // --- Insurances ---
        .route("/insurance", get(handlers::insurance::list_insurances))
        .route("/insurance/new", post(handlers::insurance::create_insurance))
        .route(
            "/insurance/{id}",
            get(handlers::insurance::get_insurance)
                .put(handlers::insurance::update_insurance)
                .delete(handlers::insurance::delete_insurance),
        )
        .route("/insurance/{id}/client", get(handlers::insurance::list_insurance_clients))
        // --- Clients ---
        .route("/client", get(handlers::client::list_clients))
        .route("/client/new", post(handlers::client::create_client))
        .route(
            "/client/{id}",
            get(handlers::client::get_client)
                .put(handlers::client::update_client)
                .delete(handlers::client::delete_client),
        )
        // --- Users ---
        .route("/user", get(handlers::user::list_users))
        .route("/user/new", post(handlers::user::create_user))
        .route(
            "/user/{id}",
            get(handlers::user::get_user)
                .put(handlers::user::update_user)
                .delete(handlers::user::delete_user),
        )
        // Antes do layer: depois dele as rotas já não aceitam fallback de método
        .method_not_allowed_fallback(method_not_allowed)
        .layer(axum_middleware::from_fn(bearer_guard));

    // Login fica fora do guard
    let public_routes = Router::new()
        .route("/user/login", post(handlers::user::login))
        .method_not_allowed_fallback(method_not_allowed);

    let versioned = entity_routes.merge(public_routes);

    let router = if version.is_empty() {
        Router::new().merge(versioned)
    } else {
        Router::new().nest(&version, versioned)
    };

    router
        .route("/health", get(|| async { "OK" }))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::api_doc(&version)))
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(route_not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

async fn route_not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Route not found.", "status": 404 })),
    )
}

async fn method_not_allowed() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method not allowed.", "status": 405 })),
    )
}
