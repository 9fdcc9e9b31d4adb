use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// A reference-catalog entry (sex, profession, marital status, area).
#[derive(Debug, Clone, Serialize)]
pub struct CatalogItemDto {
    pub id: i32,
    pub name: String,
    pub active: bool,
}

/// The four catalogs, active entries only.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogsDto {
    pub sexes: Vec<CatalogItemDto>,
    pub professions: Vec<CatalogItemDto>,
    pub marital_statuses: Vec<CatalogItemDto>,
    pub areas: Vec<CatalogItemDto>,
}

/// Outward employee shape. `age` and `risk` are derived on every read and
/// never stored.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDto {
    pub id: i32,
    pub employee_number: String,
    pub name: String,
    pub surnames: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub birth_date: String,
    pub hire_date: String,
    pub salary: f64,
    pub active: bool,
    pub sex: CatalogItemDto,
    pub profession: CatalogItemDto,
    pub marital_status: CatalogItemDto,
    pub area: CatalogItemDto,
    pub age: i32,
    pub risk: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Paginated envelope for list endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedDto<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEmployeesQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    pub name: String,
    pub surnames: String,
    pub email: String,
    pub phone: Option<String>,
    /// Calendar date, "YYYY-MM-DD".
    pub birth_date: String,
    /// Calendar date, "YYYY-MM-DD".
    pub hire_date: String,
    pub salary: f64,
    pub sex_id: i32,
    pub profession_id: i32,
    pub marital_status_id: i32,
    pub area_id: i32,
}

/// Patch document: fields absent from the request stay untouched.
/// `phone` is double-wrapped so `"phone": null` clears the value while a
/// missing key leaves it alone.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeRequest {
    pub employee_number: Option<String>,
    pub name: Option<String>,
    pub surnames: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
    pub birth_date: Option<String>,
    pub hire_date: Option<String>,
    pub salary: Option<f64>,
    pub sex_id: Option<i32>,
    pub profession_id: Option<i32>,
    pub marital_status_id: Option<i32>,
    pub area_id: Option<i32>,
}

fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
