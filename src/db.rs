pub(crate) mod projections;

pub mod department_repo;
pub use department_repo::DepartmentRepository;
pub mod city_repo;
pub use city_repo::CityRepository;
pub mod insurer_repo;
pub use insurer_repo::InsurerRepository;
pub mod insurance_type_repo;
pub use insurance_type_repo::InsuranceTypeRepository;
pub mod insurance_repo;
pub use insurance_repo::InsuranceRepository;
pub mod client_repo;
pub use client_repo::ClientRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
