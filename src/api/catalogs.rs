use axum::{extract::State, Json};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, CatalogsDto};

/// GET /catalogs
///
/// All four reference catalogs in one payload so form clients need a
/// single round trip.
pub async fn get_catalogs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<CatalogsDto>>, ApiError> {
    let catalogs = state.catalog_service.get_all().await?;
    Ok(Json(ApiResponse::success(catalogs)))
}
