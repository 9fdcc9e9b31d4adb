pub use super::areas::Entity as Areas;
pub use super::employees::Entity as Employees;
pub use super::marital_statuses::Entity as MaritalStatuses;
pub use super::professions::Entity as Professions;
pub use super::sexes::Entity as Sexes;
pub use super::users::Entity as Users;
