use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::collections::HashMap;

use crate::entities::{areas, employees, marital_statuses, prelude::*, professions, sexes};

/// Placeholder employee number written by the first insert; replaced with
/// the id-derived number before the creating transaction commits.
const PLACEHOLDER_NUMBER: &str = "TEMP";

/// Prefix for the id-derived employee number.
pub const EMPLOYEE_NUMBER_PREFIX: &str = "EMP";

/// Sortable employee fields. Anything else is rejected upstream with a
/// validation error rather than silently falling back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    EmployeeNumber,
    Name,
    Surnames,
    Email,
    BirthDate,
    HireDate,
    Salary,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "employeeNumber" | "employee_number" => Some(Self::EmployeeNumber),
            "name" => Some(Self::Name),
            "surnames" => Some(Self::Surnames),
            "email" => Some(Self::Email),
            "birthDate" | "birth_date" => Some(Self::BirthDate),
            "hireDate" | "hire_date" => Some(Self::HireDate),
            "salary" => Some(Self::Salary),
            "createdAt" | "created_at" => Some(Self::CreatedAt),
            "updatedAt" | "updated_at" => Some(Self::UpdatedAt),
            _ => None,
        }
    }

    const fn column(self) -> employees::Column {
        match self {
            Self::EmployeeNumber => employees::Column::EmployeeNumber,
            Self::Name => employees::Column::Name,
            Self::Surnames => employees::Column::Surnames,
            Self::Email => employees::Column::Email,
            Self::BirthDate => employees::Column::BirthDate,
            Self::HireDate => employees::Column::HireDate,
            Self::Salary => employees::Column::Salary,
            Self::CreatedAt => employees::Column::CreatedAt,
            Self::UpdatedAt => employees::Column::UpdatedAt,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    const fn order(self) -> sea_orm::Order {
        match self {
            Self::Asc => sea_orm::Order::Asc,
            Self::Desc => sea_orm::Order::Desc,
        }
    }
}

/// Bounded, filtered, sorted retrieval plan for the active record set.
#[derive(Debug, Clone)]
pub struct EmployeePage {
    pub page: u64,
    pub limit: u64,
    pub search: String,
    pub sort_by: SortField,
    pub sort_direction: SortDirection,
}

/// Fields for a new employee row. Email must already be lowercased.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub name: String,
    pub surnames: String,
    pub email: String,
    pub phone: Option<String>,
    pub birth_date: String,
    pub hire_date: String,
    pub salary: f64,
    pub sex_id: i32,
    pub profession_id: i32,
    pub marital_status_id: i32,
    pub area_id: i32,
}

/// Patch document: only `Some` fields are written. `phone` distinguishes
/// "absent" (outer `None`) from "supplied as null" (inner `None`).
#[derive(Debug, Clone, Default)]
pub struct EmployeeChanges {
    pub employee_number: Option<String>,
    pub name: Option<String>,
    pub surnames: Option<String>,
    pub email: Option<String>,
    pub phone: Option<Option<String>>,
    pub birth_date: Option<String>,
    pub hire_date: Option<String>,
    pub salary: Option<f64>,
    pub sex_id: Option<i32>,
    pub profession_id: Option<i32>,
    pub marital_status_id: Option<i32>,
    pub area_id: Option<i32>,
}

/// Outcome of the transactional create; the duplicate case is a normal
/// result so the conflict survives the transaction boundary intact.
#[derive(Debug)]
pub enum CreateOutcome {
    Created(employees::Model),
    DuplicateEmail,
}

/// Catalog rows resolved for a batch of employees, keyed by id.
#[derive(Debug, Default)]
pub struct ResolvedCatalogs {
    pub sexes: HashMap<i32, sexes::Model>,
    pub professions: HashMap<i32, professions::Model>,
    pub marital_statuses: HashMap<i32, marital_statuses::Model>,
    pub areas: HashMap<i32, areas::Model>,
}

pub struct EmployeeRepository {
    conn: DatabaseConnection,
}

impl EmployeeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn search_condition(search: &str) -> Condition {
        Condition::any()
            .add(employees::Column::Name.contains(search))
            .add(employees::Column::Surnames.contains(search))
            .add(employees::Column::Email.contains(search))
            .add(employees::Column::EmployeeNumber.contains(search))
    }

    /// Fetch one page of active employees plus the total matching count
    /// (the count ignores offset/limit, for pagination metadata).
    pub async fn list(&self, plan: &EmployeePage) -> Result<(Vec<employees::Model>, u64)> {
        let mut query = Employees::find().filter(employees::Column::Active.eq(true));

        if !plan.search.is_empty() {
            query = query.filter(Self::search_condition(&plan.search));
        }

        let total = query
            .clone()
            .count(&self.conn)
            .await
            .context("Failed to count employees")?;

        let rows = query
            .order_by(plan.sort_by.column(), plan.sort_direction.order())
            .offset((plan.page - 1).saturating_mul(plan.limit))
            .limit(plan.limit)
            .all(&self.conn)
            .await
            .context("Failed to list employees")?;

        Ok((rows, total))
    }

    /// Get an active employee by id. Deactivated rows are invisible here.
    pub async fn get_active(&self, id: i32) -> Result<Option<employees::Model>> {
        let employee = Employees::find_by_id(id)
            .filter(employees::Column::Active.eq(true))
            .one(&self.conn)
            .await
            .context("Failed to query employee by id")?;

        Ok(employee)
    }

    /// Find another active employee holding this (lowercased) email.
    pub async fn find_email_conflict(
        &self,
        email: &str,
        exclude_id: Option<i32>,
    ) -> Result<Option<employees::Model>> {
        let mut query = Employees::find()
            .filter(employees::Column::Active.eq(true))
            .filter(employees::Column::Email.eq(email));

        if let Some(id) = exclude_id {
            query = query.filter(employees::Column::Id.ne(id));
        }

        query
            .one(&self.conn)
            .await
            .context("Failed to check email uniqueness")
    }

    /// Find another active employee holding this employee number.
    pub async fn find_number_conflict(
        &self,
        employee_number: &str,
        exclude_id: Option<i32>,
    ) -> Result<Option<employees::Model>> {
        let mut query = Employees::find()
            .filter(employees::Column::Active.eq(true))
            .filter(employees::Column::EmployeeNumber.eq(employee_number));

        if let Some(id) = exclude_id {
            query = query.filter(employees::Column::Id.ne(id));
        }

        query
            .one(&self.conn)
            .await
            .context("Failed to check employee number uniqueness")
    }

    /// Insert a new employee and assign its id-derived number.
    ///
    /// The number depends on the assigned id, so the row is inserted with a
    /// placeholder and patched once the id is known. Email re-check, insert,
    /// and patch all run in one transaction: two concurrent creates with the
    /// same email cannot both commit.
    pub async fn create(&self, new: NewEmployee) -> Result<CreateOutcome> {
        let outcome = self
            .conn
            .transaction::<_, CreateOutcome, DbErr>(|txn| {
                Box::pin(async move {
                    let conflict = Employees::find()
                        .filter(employees::Column::Active.eq(true))
                        .filter(employees::Column::Email.eq(new.email.clone()))
                        .one(txn)
                        .await?;

                    if conflict.is_some() {
                        return Ok(CreateOutcome::DuplicateEmail);
                    }

                    let now = chrono::Utc::now().to_rfc3339();

                    let inserted = employees::ActiveModel {
                        employee_number: Set(PLACEHOLDER_NUMBER.to_string()),
                        name: Set(new.name),
                        surnames: Set(new.surnames),
                        email: Set(new.email),
                        phone: Set(new.phone),
                        birth_date: Set(new.birth_date),
                        hire_date: Set(new.hire_date),
                        salary: Set(new.salary),
                        sex_id: Set(new.sex_id),
                        profession_id: Set(new.profession_id),
                        marital_status_id: Set(new.marital_status_id),
                        area_id: Set(new.area_id),
                        active: Set(true),
                        created_at: Set(now.clone()),
                        updated_at: Set(now),
                        ..Default::default()
                    }
                    .insert(txn)
                    .await?;

                    let id = inserted.id;
                    let mut patch: employees::ActiveModel = inserted.into();
                    patch.employee_number = Set(format!("{EMPLOYEE_NUMBER_PREFIX}{id}"));
                    let finalized = patch.update(txn).await?;

                    Ok(CreateOutcome::Created(finalized))
                })
            })
            .await
            .context("Failed to create employee")?;

        Ok(outcome)
    }

    /// Apply a patch document; fields left `None` stay untouched.
    pub async fn update(&self, id: i32, changes: EmployeeChanges) -> Result<employees::Model> {
        let mut active = employees::ActiveModel {
            id: Set(id),
            ..Default::default()
        };

        if let Some(number) = changes.employee_number {
            active.employee_number = Set(number);
        }
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(surnames) = changes.surnames {
            active.surnames = Set(surnames);
        }
        if let Some(email) = changes.email {
            active.email = Set(email);
        }
        if let Some(phone) = changes.phone {
            active.phone = Set(phone);
        }
        if let Some(birth_date) = changes.birth_date {
            active.birth_date = Set(birth_date);
        }
        if let Some(hire_date) = changes.hire_date {
            active.hire_date = Set(hire_date);
        }
        if let Some(salary) = changes.salary {
            active.salary = Set(salary);
        }
        if let Some(sex_id) = changes.sex_id {
            active.sex_id = Set(sex_id);
        }
        if let Some(profession_id) = changes.profession_id {
            active.profession_id = Set(profession_id);
        }
        if let Some(marital_status_id) = changes.marital_status_id {
            active.marital_status_id = Set(marital_status_id);
        }
        if let Some(area_id) = changes.area_id {
            active.area_id = Set(area_id);
        }

        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let updated = active
            .update(&self.conn)
            .await
            .context("Failed to update employee")?;

        Ok(updated)
    }

    /// Soft delete: flips `active` off, never removes the row.
    pub async fn deactivate(&self, id: i32) -> Result<()> {
        let active = employees::ActiveModel {
            id: Set(id),
            active: Set(false),
            updated_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        active
            .update(&self.conn)
            .await
            .context("Failed to deactivate employee")?;

        Ok(())
    }

    /// Batch-resolve the catalog rows referenced by a set of employees.
    pub async fn resolve_catalogs(
        &self,
        employees: &[employees::Model],
    ) -> Result<ResolvedCatalogs> {
        let mut sex_ids: Vec<i32> = employees.iter().map(|e| e.sex_id).collect();
        let mut profession_ids: Vec<i32> = employees.iter().map(|e| e.profession_id).collect();
        let mut marital_ids: Vec<i32> = employees.iter().map(|e| e.marital_status_id).collect();
        let mut area_ids: Vec<i32> = employees.iter().map(|e| e.area_id).collect();

        for ids in [
            &mut sex_ids,
            &mut profession_ids,
            &mut marital_ids,
            &mut area_ids,
        ] {
            ids.sort_unstable();
            ids.dedup();
        }

        let sexes = Sexes::find()
            .filter(sexes::Column::Id.is_in(sex_ids))
            .all(&self.conn)
            .await
            .context("Failed to resolve sex catalog entries")?;

        let professions = Professions::find()
            .filter(professions::Column::Id.is_in(profession_ids))
            .all(&self.conn)
            .await
            .context("Failed to resolve profession catalog entries")?;

        let marital_statuses = MaritalStatuses::find()
            .filter(marital_statuses::Column::Id.is_in(marital_ids))
            .all(&self.conn)
            .await
            .context("Failed to resolve marital status catalog entries")?;

        let areas = Areas::find()
            .filter(areas::Column::Id.is_in(area_ids))
            .all(&self.conn)
            .await
            .context("Failed to resolve area catalog entries")?;

        Ok(ResolvedCatalogs {
            sexes: sexes.into_iter().map(|m| (m.id, m)).collect(),
            professions: professions.into_iter().map(|m| (m.id, m)).collect(),
            marital_statuses: marital_statuses.into_iter().map(|m| (m.id, m)).collect(),
            areas: areas.into_iter().map(|m| (m.id, m)).collect(),
        })
    }
}
