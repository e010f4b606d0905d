pub mod auth;
pub mod client_service;
pub mod department_service;
pub mod valuation;
