// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::openapi::server::Server;
use crate::common::response::MessageResponse;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Departments ---
        handlers::department::list_departments,
        handlers::department::get_department,
        handlers::department::list_department_cities,
        handlers::department::create_department,
        handlers::department::update_department,
        handlers::department::delete_department,

        // --- Cities ---
        handlers::city::list_cities,
        handlers::city::get_city,
        handlers::city::create_city,
        handlers::city::update_city,
        handlers::city::delete_city,

        // --- Insurers ---
        handlers::insurer::list_insurers,
        handlers::insurer::get_insurer,
        handlers::insurer::list_insurer_insurance_types,
        handlers::insurer::create_insurer,
        handlers::insurer::update_insurer,
        handlers::insurer::delete_insurer,

        // --- Insurance types ---
        handlers::insurance_type::list_insurance_types,
        handlers::insurance_type::get_insurance_type,
        handlers::insurance_type::list_type_insurances,
        handlers::insurance_type::create_insurance_type,
        handlers::insurance_type::update_insurance_type,
        handlers::insurance_type::delete_insurance_type,

        // --- Insurances ---
        handlers::insurance::list_insurances,
        handlers::insurance::get_insurance,
        handlers::insurance::list_insurance_clients,
        handlers::insurance::create_insurance,
        handlers::insurance::update_insurance,
        handlers::insurance::delete_insurance,

        // --- Clients ---
        handlers::client::list_clients,
        handlers::client::get_client,
        handlers::client::create_client,
        handlers::client::update_client,
        handlers::client::delete_client,

        // --- Users ---
        handlers::user::list_users,
        handlers::user::get_user,
        handlers::user::create_user,
        handlers::user::update_user,
        handlers::user::delete_user,
        handlers::user::login,
    ),
    components(
        schemas(
            MessageResponse,

            // --- Locations ---
            models::department::Department,
            models::department::DepartmentWithCities,
            models::department::CreateDepartmentPayload,
            models::department::UpdateDepartmentPayload,
            models::city::City,
            models::city::CityDetail,
            models::city::CreateCityPayload,
            models::city::UpdateCityPayload,

            // --- Insurers ---
            models::insurer::Insurer,
            models::insurer::InsurerDetail,
            models::insurer::CreateInsurerPayload,
            models::insurer::UpdateInsurerPayload,
            models::insurance_type::InsuranceType,
            models::insurance_type::InsuranceTypeDetail,
            models::insurance_type::CreateInsuranceTypePayload,
            models::insurance_type::UpdateInsuranceTypePayload,
            models::insurance::Insurance,
            models::insurance::InsuranceDetail,
            models::insurance::CreateInsurancePayload,
            models::insurance::UpdateInsurancePayload,

            // --- Clients ---
            models::client::Client,
            models::client::ClientDetail,
            models::client::CreateClientPayload,
            models::client::UpdateClientPayload,

            // --- Users ---
            models::user::User,
            models::user::CreateUserPayload,
            models::user::UpdateUserPayload,
            models::user::LoginPayload,
            models::user::AuthResponse,
        )
    ),
    tags(
        (name = "Departments", description = "Departamentos e suas cidades"),
        (name = "Cities", description = "Cidades"),
        (name = "Insurers", description = "Seguradoras"),
        (name = "Insurance types", description = "Tipos de seguro"),
        (name = "Insurances", description = "Seguros (percentual e mínimo)"),
        (name = "Clients", description = "Clientes e avaliação do seguro"),
        (name = "Users", description = "Usuários e login")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Documento OpenAPI com o prefixo de versão como `server`.
pub fn api_doc(api_version: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    let base = if api_version.is_empty() { "/" } else { api_version };
    doc.servers = Some(vec![Server::new(base)]);
    doc
}

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_entity_route_is_documented() {
        let doc = api_doc("/v1");
        let paths = &doc.paths.paths;
        for path in [
            "/department",
            "/department/{id}/city",
            "/city/new",
            "/insurer/{id}/insurancetype",
            "/insurancetype/{id}/insurance",
            "/insurance/{id}/client",
            "/client/{id}",
            "/user/login",
        ] {
            assert!(paths.contains_key(path), "missing {path}");
        }
        assert_eq!(doc.servers.unwrap()[0].url, "/v1");
    }

    #[test]
    fn bearer_scheme_is_registered() {
        let doc = api_doc("");
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("api_jwt"));
        assert_eq!(doc.servers.unwrap()[0].url, "/");
    }
}
