pub mod prelude;

pub mod areas;
pub mod employees;
pub mod marital_statuses;
pub mod professions;
pub mod sexes;
pub mod users;
