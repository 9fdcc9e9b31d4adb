use anyhow::{Context, Result};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::entities::{areas, marital_statuses, prelude::*, professions, sexes};

/// A catalog reference that points at no row at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingReference {
    pub catalog: &'static str,
    pub id: i32,
}

pub struct CatalogRepository {
    conn: DatabaseConnection,
}

impl CatalogRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Active entries only, sorted by name.
    pub async fn list_sexes(&self) -> Result<Vec<sexes::Model>> {
        Sexes::find()
            .filter(sexes::Column::Active.eq(true))
            .order_by_asc(sexes::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to list sexes")
    }

    pub async fn list_professions(&self) -> Result<Vec<professions::Model>> {
        Professions::find()
            .filter(professions::Column::Active.eq(true))
            .order_by_asc(professions::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to list professions")
    }

    pub async fn list_marital_statuses(&self) -> Result<Vec<marital_statuses::Model>> {
        MaritalStatuses::find()
            .filter(marital_statuses::Column::Active.eq(true))
            .order_by_asc(marital_statuses::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to list marital statuses")
    }

    pub async fn list_areas(&self) -> Result<Vec<areas::Model>> {
        Areas::find()
            .filter(areas::Column::Active.eq(true))
            .order_by_asc(areas::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to list areas")
    }

    /// Check that all four references resolve to existing catalog rows
    /// (active or not; write-time referential integrity per the record
    /// contract). Returns the first missing reference, if any.
    pub async fn find_missing_reference(
        &self,
        sex_id: i32,
        profession_id: i32,
        marital_status_id: i32,
        area_id: i32,
    ) -> Result<Option<MissingReference>> {
        if Sexes::find_by_id(sex_id)
            .one(&self.conn)
            .await
            .context("Failed to look up sex reference")?
            .is_none()
        {
            return Ok(Some(MissingReference {
                catalog: "sex",
                id: sex_id,
            }));
        }

        if Professions::find_by_id(profession_id)
            .one(&self.conn)
            .await
            .context("Failed to look up profession reference")?
            .is_none()
        {
            return Ok(Some(MissingReference {
                catalog: "profession",
                id: profession_id,
            }));
        }

        if MaritalStatuses::find_by_id(marital_status_id)
            .one(&self.conn)
            .await
            .context("Failed to look up marital status reference")?
            .is_none()
        {
            return Ok(Some(MissingReference {
                catalog: "maritalStatus",
                id: marital_status_id,
            }));
        }

        if Areas::find_by_id(area_id)
            .one(&self.conn)
            .await
            .context("Failed to look up area reference")?
            .is_none()
        {
            return Ok(Some(MissingReference {
                catalog: "area",
                id: area_id,
            }));
        }

        Ok(None)
    }
}
