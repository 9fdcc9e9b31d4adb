//! `SeaORM` implementation of the `EmployeeService` trait.

use chrono::{NaiveDate, Utc};

use crate::api::types::{
    CatalogItemDto, CreateEmployeeRequest, EmployeeDto, ListEmployeesQuery, PaginatedDto,
    UpdateEmployeeRequest,
};
use crate::db::{
    CreateOutcome, EmployeeChanges, EmployeePage, NewEmployee, ResolvedCatalogs, SortDirection,
    SortField, Store,
};
use crate::entities::employees;
use crate::risk::{age_on, RiskTable};
use crate::services::employee_service::{EmployeeError, EmployeeService};

const DEFAULT_PAGE: u64 = 1;
const DEFAULT_LIMIT: u64 = 10;
const MAX_LIMIT: u64 = 100;
const DEFAULT_SORT_BY: &str = "createdAt";
const DEFAULT_SORT_ORDER: &str = "desc";

pub struct SeaOrmEmployeeService {
    store: Store,
    risk_table: RiskTable,
}

impl SeaOrmEmployeeService {
    #[must_use]
    pub const fn new(store: Store, risk_table: RiskTable) -> Self {
        Self { store, risk_table }
    }

    fn plan(query: ListEmployeesQuery) -> Result<EmployeePage, EmployeeError> {
        let page = query.page.unwrap_or(DEFAULT_PAGE);
        if page == 0 {
            return Err(EmployeeError::Validation(
                "page must be a positive integer".to_string(),
            ));
        }

        let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(EmployeeError::Validation(format!(
                "limit must be between 1 and {MAX_LIMIT}"
            )));
        }

        // The row offset is (page - 1) * limit; a page that pushes it past
        // u64 cannot address any row.
        if (page - 1).checked_mul(limit).is_none() {
            return Err(EmployeeError::Validation(format!(
                "page {page} is out of range"
            )));
        }

        let sort_by_raw = query.sort_by.as_deref().unwrap_or(DEFAULT_SORT_BY);
        let sort_by = SortField::parse(sort_by_raw).ok_or_else(|| {
            EmployeeError::Validation(format!("Unknown sortBy field: {sort_by_raw}"))
        })?;

        let sort_order_raw = query.sort_order.as_deref().unwrap_or(DEFAULT_SORT_ORDER);
        let sort_direction = SortDirection::parse(sort_order_raw).ok_or_else(|| {
            EmployeeError::Validation(format!(
                "sortOrder must be 'asc' or 'desc', got: {sort_order_raw}"
            ))
        })?;

        Ok(EmployeePage {
            page,
            limit,
            search: query.search.unwrap_or_default().trim().to_string(),
            sort_by,
            sort_direction,
        })
    }

    /// Merge a stored row with its resolved catalog entries and the two
    /// derived fields. Pure: no persistence, total for any stored row whose
    /// references resolve.
    fn assemble(
        &self,
        model: employees::Model,
        catalogs: &ResolvedCatalogs,
        today: NaiveDate,
    ) -> Result<EmployeeDto, EmployeeError> {
        let sex = catalogs.sexes.get(&model.sex_id).ok_or_else(|| {
            EmployeeError::Internal(format!("Dangling sex reference: {}", model.sex_id))
        })?;
        let profession = catalogs.professions.get(&model.profession_id).ok_or_else(|| {
            EmployeeError::Internal(format!(
                "Dangling profession reference: {}",
                model.profession_id
            ))
        })?;
        let marital_status = catalogs
            .marital_statuses
            .get(&model.marital_status_id)
            .ok_or_else(|| {
                EmployeeError::Internal(format!(
                    "Dangling marital status reference: {}",
                    model.marital_status_id
                ))
            })?;
        let area = catalogs.areas.get(&model.area_id).ok_or_else(|| {
            EmployeeError::Internal(format!("Dangling area reference: {}", model.area_id))
        })?;

        let birth = NaiveDate::parse_from_str(&model.birth_date, "%Y-%m-%d").map_err(|e| {
            EmployeeError::Internal(format!(
                "Stored birth date '{}' is not a calendar date: {e}",
                model.birth_date
            ))
        })?;

        let age = age_on(birth, today);
        let risk = self.risk_table.classify(age).to_string();

        Ok(EmployeeDto {
            id: model.id,
            employee_number: model.employee_number,
            name: model.name,
            surnames: model.surnames,
            email: model.email,
            phone: model.phone,
            birth_date: model.birth_date,
            hire_date: model.hire_date,
            salary: model.salary,
            active: model.active,
            sex: CatalogItemDto {
                id: sex.id,
                name: sex.name.clone(),
                active: sex.active,
            },
            profession: CatalogItemDto {
                id: profession.id,
                name: profession.name.clone(),
                active: profession.active,
            },
            marital_status: CatalogItemDto {
                id: marital_status.id,
                name: marital_status.name.clone(),
                active: marital_status.active,
            },
            area: CatalogItemDto {
                id: area.id,
                name: area.name.clone(),
                active: area.active,
            },
            age,
            risk,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }

    async fn assemble_one(&self, model: employees::Model) -> Result<EmployeeDto, EmployeeError> {
        let catalogs = self
            .store
            .resolve_employee_catalogs(std::slice::from_ref(&model))
            .await?;
        self.assemble(model, &catalogs, Utc::now().date_naive())
    }

    async fn check_catalog_references(
        &self,
        sex_id: i32,
        profession_id: i32,
        marital_status_id: i32,
        area_id: i32,
    ) -> Result<(), EmployeeError> {
        let missing = self
            .store
            .find_missing_catalog_reference(sex_id, profession_id, marital_status_id, area_id)
            .await?;

        if let Some(missing) = missing {
            return Err(EmployeeError::Validation(format!(
                "Unknown {} reference: {}",
                missing.catalog, missing.id
            )));
        }

        Ok(())
    }
}

#[async_trait::async_trait]
impl EmployeeService for SeaOrmEmployeeService {
    async fn list(
        &self,
        query: ListEmployeesQuery,
    ) -> Result<PaginatedDto<EmployeeDto>, EmployeeError> {
        let plan = Self::plan(query)?;

        let (rows, total) = self.store.list_employees(&plan).await?;
        let catalogs = self.store.resolve_employee_catalogs(&rows).await?;

        let today = Utc::now().date_naive();
        let data = rows
            .into_iter()
            .map(|row| self.assemble(row, &catalogs, today))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PaginatedDto {
            data,
            total,
            page: plan.page,
            limit: plan.limit,
            total_pages: total.div_ceil(plan.limit),
        })
    }

    async fn get(&self, id: i32) -> Result<EmployeeDto, EmployeeError> {
        let model = self
            .store
            .get_active_employee(id)
            .await?
            .ok_or(EmployeeError::NotFound(id))?;

        self.assemble_one(model).await
    }

    async fn create(&self, input: CreateEmployeeRequest) -> Result<EmployeeDto, EmployeeError> {
        self.check_catalog_references(
            input.sex_id,
            input.profession_id,
            input.marital_status_id,
            input.area_id,
        )
        .await?;

        let email = input.email.to_lowercase();

        // Fast-path pre-validation; the transactional re-check inside
        // Store::create_employee is the one that actually guards commits.
        if self
            .store
            .find_employee_email_conflict(&email, None)
            .await?
            .is_some()
        {
            return Err(EmployeeError::Duplicate { field: "email" });
        }

        let outcome = self
            .store
            .create_employee(NewEmployee {
                name: input.name,
                surnames: input.surnames,
                email,
                phone: input.phone,
                birth_date: input.birth_date,
                hire_date: input.hire_date,
                salary: input.salary,
                sex_id: input.sex_id,
                profession_id: input.profession_id,
                marital_status_id: input.marital_status_id,
                area_id: input.area_id,
            })
            .await?;

        match outcome {
            CreateOutcome::Created(model) => self.assemble_one(model).await,
            CreateOutcome::DuplicateEmail => Err(EmployeeError::Duplicate { field: "email" }),
        }
    }

    async fn update(
        &self,
        id: i32,
        input: UpdateEmployeeRequest,
    ) -> Result<EmployeeDto, EmployeeError> {
        let existing = self
            .store
            .get_active_employee(id)
            .await?
            .ok_or(EmployeeError::NotFound(id))?;

        // Uniqueness is re-validated only for fields that actually change,
        // excluding the record itself.
        if let Some(number) = &input.employee_number {
            if *number != existing.employee_number
                && self
                    .store
                    .find_employee_number_conflict(number, Some(id))
                    .await?
                    .is_some()
            {
                return Err(EmployeeError::Duplicate {
                    field: "employee number",
                });
            }
        }

        let email = input.email.map(|e| e.to_lowercase());
        if let Some(email) = &email {
            if *email != existing.email
                && self
                    .store
                    .find_employee_email_conflict(email, Some(id))
                    .await?
                    .is_some()
            {
                return Err(EmployeeError::Duplicate { field: "email" });
            }
        }

        if input.sex_id.is_some()
            || input.profession_id.is_some()
            || input.marital_status_id.is_some()
            || input.area_id.is_some()
        {
            self.check_catalog_references(
                input.sex_id.unwrap_or(existing.sex_id),
                input.profession_id.unwrap_or(existing.profession_id),
                input.marital_status_id.unwrap_or(existing.marital_status_id),
                input.area_id.unwrap_or(existing.area_id),
            )
            .await?;
        }

        let updated = self
            .store
            .update_employee(
                id,
                EmployeeChanges {
                    employee_number: input.employee_number,
                    name: input.name,
                    surnames: input.surnames,
                    email,
                    phone: input.phone,
                    birth_date: input.birth_date,
                    hire_date: input.hire_date,
                    salary: input.salary,
                    sex_id: input.sex_id,
                    profession_id: input.profession_id,
                    marital_status_id: input.marital_status_id,
                    area_id: input.area_id,
                },
            )
            .await?;

        self.assemble_one(updated).await
    }

    async fn delete(&self, id: i32) -> Result<(), EmployeeError> {
        self.store
            .get_active_employee(id)
            .await?
            .ok_or(EmployeeError::NotFound(id))?;

        self.store.deactivate_employee(id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_defaults() {
        let plan = SeaOrmEmployeeService::plan(ListEmployeesQuery::default()).unwrap();
        assert_eq!(plan.page, 1);
        assert_eq!(plan.limit, 10);
        assert_eq!(plan.sort_by, SortField::CreatedAt);
        assert_eq!(plan.sort_direction, SortDirection::Desc);
        assert!(plan.search.is_empty());
    }

    #[test]
    fn test_plan_rejects_unknown_sort_field() {
        let query = ListEmployeesQuery {
            sort_by: Some("salaryy".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            SeaOrmEmployeeService::plan(query),
            Err(EmployeeError::Validation(_))
        ));
    }

    #[test]
    fn test_plan_rejects_bad_page_and_limit() {
        let query = ListEmployeesQuery {
            page: Some(0),
            ..Default::default()
        };
        assert!(SeaOrmEmployeeService::plan(query).is_err());

        let query = ListEmployeesQuery {
            limit: Some(0),
            ..Default::default()
        };
        assert!(SeaOrmEmployeeService::plan(query).is_err());

        let query = ListEmployeesQuery {
            limit: Some(101),
            ..Default::default()
        };
        assert!(SeaOrmEmployeeService::plan(query).is_err());
    }

    #[test]
    fn test_plan_rejects_page_whose_offset_overflows() {
        let query = ListEmployeesQuery {
            page: Some(u64::MAX),
            limit: Some(100),
            ..Default::default()
        };
        assert!(matches!(
            SeaOrmEmployeeService::plan(query),
            Err(EmployeeError::Validation(_))
        ));

        // Same overflow with the default limit
        let query = ListEmployeesQuery {
            page: Some(u64::MAX),
            ..Default::default()
        };
        assert!(matches!(
            SeaOrmEmployeeService::plan(query),
            Err(EmployeeError::Validation(_))
        ));
    }

    #[test]
    fn test_plan_rejects_unknown_sort_order() {
        let query = ListEmployeesQuery {
            sort_order: Some("descending".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            SeaOrmEmployeeService::plan(query),
            Err(EmployeeError::Validation(_))
        ));
    }
}
