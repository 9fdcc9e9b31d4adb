//! Domain service for employee records.
//!
//! Owns the business policy around the employee entity: derived age and
//! risk fields, uniqueness of email and employee number among active
//! records, paginated search, partial updates, and soft deletes.

use thiserror::Error;

use crate::api::types::{
    CreateEmployeeRequest, EmployeeDto, ListEmployeesQuery, PaginatedDto, UpdateEmployeeRequest,
};

/// Errors specific to employee operations.
#[derive(Debug, Error)]
pub enum EmployeeError {
    #[error("Employee {0} not found")]
    NotFound(i32),

    #[error("The {field} is already registered")]
    Duplicate { field: &'static str },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for EmployeeError {
    fn from(err: sea_orm::DbErr) -> Self {
        let message = err.to_string();
        // Storage-level constraint violations are the authoritative guard
        // behind the uniqueness pre-checks; surface them the same way.
        if message.contains("UNIQUE constraint failed") {
            return Self::Duplicate { field: "email" };
        }
        Self::Database(message)
    }
}

impl From<anyhow::Error> for EmployeeError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<sea_orm::DbErr>() {
            Ok(db_err) => db_err.into(),
            Err(other) => Self::Internal(other.to_string()),
        }
    }
}

/// Domain service trait for employee records.
#[async_trait::async_trait]
pub trait EmployeeService: Send + Sync {
    /// Search-filtered, sorted, paginated listing of active employees.
    async fn list(
        &self,
        query: ListEmployeesQuery,
    ) -> Result<PaginatedDto<EmployeeDto>, EmployeeError>;

    /// Gets an active employee by id.
    async fn get(&self, id: i32) -> Result<EmployeeDto, EmployeeError>;

    /// Creates an employee and assigns its id-derived employee number.
    ///
    /// # Errors
    ///
    /// Returns [`EmployeeError::Duplicate`] when the email is already held
    /// by an active record.
    async fn create(&self, input: CreateEmployeeRequest) -> Result<EmployeeDto, EmployeeError>;

    /// Partial update: only fields present in the request are touched.
    async fn update(
        &self,
        id: i32,
        input: UpdateEmployeeRequest,
    ) -> Result<EmployeeDto, EmployeeError>;

    /// Soft delete; the record stays in storage with `active = false` and
    /// its email becomes reusable.
    async fn delete(&self, id: i32) -> Result<(), EmployeeError>;
}
