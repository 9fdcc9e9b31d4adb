//! `SeaORM` implementation of the `CatalogService` trait.

use crate::api::types::{CatalogItemDto, CatalogsDto};
use crate::db::Store;
use crate::services::catalog_service::{CatalogError, CatalogService};

pub struct SeaOrmCatalogService {
    store: Store,
}

impl SeaOrmCatalogService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl CatalogService for SeaOrmCatalogService {
    async fn get_all(&self) -> Result<CatalogsDto, CatalogError> {
        let (sexes, professions, marital_statuses, areas) = tokio::try_join!(
            self.store.list_sexes(),
            self.store.list_professions(),
            self.store.list_marital_statuses(),
            self.store.list_areas(),
        )?;

        Ok(CatalogsDto {
            sexes: sexes
                .into_iter()
                .map(|m| CatalogItemDto {
                    id: m.id,
                    name: m.name,
                    active: m.active,
                })
                .collect(),
            professions: professions
                .into_iter()
                .map(|m| CatalogItemDto {
                    id: m.id,
                    name: m.name,
                    active: m.active,
                })
                .collect(),
            marital_statuses: marital_statuses
                .into_iter()
                .map(|m| CatalogItemDto {
                    id: m.id,
                    name: m.name,
                    active: m.active,
                })
                .collect(),
            areas: areas
                .into_iter()
                .map(|m| CatalogItemDto {
                    id: m.id,
                    name: m.name,
                    active: m.active,
                })
                .collect(),
        })
    }
}
