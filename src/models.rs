pub mod city;
pub mod client;
pub mod department;
pub mod insurance;
pub mod insurance_type;
pub mod insurer;
pub mod user;

// `available` é verdadeiro quando o payload não informa
pub(crate) fn default_true() -> bool {
    true
}
