//! Domain service for the reference catalogs.

use thiserror::Error;

use crate::api::types::CatalogsDto;

/// Errors specific to catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for CatalogError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for CatalogError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Domain service trait for catalogs.
#[async_trait::async_trait]
pub trait CatalogService: Send + Sync {
    /// All four catalogs, active entries only, sorted by name.
    async fn get_all(&self) -> Result<CatalogsDto, CatalogError>;
}
