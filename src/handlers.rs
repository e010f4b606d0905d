pub mod city;
pub mod client;
pub mod department;
pub mod insurance;
pub mod insurance_type;
pub mod insurer;
pub mod user;
