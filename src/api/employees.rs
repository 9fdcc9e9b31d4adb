use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::{
    validation, ApiError, ApiResponse, AppState, CreateEmployeeRequest, EmployeeDto,
    ListEmployeesQuery, PaginatedDto, UpdateEmployeeRequest,
};

/// GET /employees
pub async fn list_employees(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListEmployeesQuery>,
) -> Result<Json<ApiResponse<PaginatedDto<EmployeeDto>>>, ApiError> {
    let page = state.employee_service.list(query).await?;
    Ok(Json(ApiResponse::success(page)))
}

/// GET /employees/{id}
pub async fn get_employee(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<EmployeeDto>>, ApiError> {
    let id = validation::validate_employee_id(id)?;
    let employee = state.employee_service.get(id).await?;
    Ok(Json(ApiResponse::success(employee)))
}

/// POST /employees
pub async fn create_employee(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<EmployeeDto>>), ApiError> {
    validation::validate_create(&payload)?;

    let employee = state.employee_service.create(payload).await?;

    tracing::info!(
        employee_id = employee.id,
        employee_number = %employee.employee_number,
        "Employee created"
    );

    Ok((StatusCode::CREATED, Json(ApiResponse::success(employee))))
}

/// PATCH /employees/{id}
pub async fn update_employee(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateEmployeeRequest>,
) -> Result<Json<ApiResponse<EmployeeDto>>, ApiError> {
    let id = validation::validate_employee_id(id)?;
    validation::validate_patch(&payload)?;

    let employee = state.employee_service.update(id, payload).await?;

    Ok(Json(ApiResponse::success(employee)))
}

/// DELETE /employees/{id}
pub async fn delete_employee(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let id = validation::validate_employee_id(id)?;

    state.employee_service.delete(id).await?;

    tracing::info!(employee_id = id, "Employee deactivated");

    Ok(Json(ApiResponse::success(serde_json::json!({
        "message": "Employee deleted successfully"
    }))))
}
