pub mod employee_service;
pub use employee_service::{EmployeeError, EmployeeService};

pub mod employee_service_impl;
pub use employee_service_impl::SeaOrmEmployeeService;

pub mod catalog_service;
pub use catalog_service::{CatalogError, CatalogService};

pub mod catalog_service_impl;
pub use catalog_service_impl::SeaOrmCatalogService;

pub mod auth_service;
pub use auth_service::{AuthError, AuthService, LoginResult, UserSummary};

pub mod auth_service_impl;
pub use auth_service_impl::JwtAuthService;
