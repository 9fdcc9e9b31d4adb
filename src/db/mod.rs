use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::entities::{areas, employees, marital_statuses, professions, sexes};

pub mod migrator;
pub mod repositories;

pub use repositories::catalog::MissingReference;
pub use repositories::employee::{
    CreateOutcome, EmployeeChanges, EmployeePage, NewEmployee, ResolvedCatalogs, SortDirection,
    SortField, EMPLOYEE_NUMBER_PREFIX,
};
pub use repositories::user::User;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn employee_repo(&self) -> repositories::employee::EmployeeRepository {
        repositories::employee::EmployeeRepository::new(self.conn.clone())
    }

    fn catalog_repo(&self) -> repositories::catalog::CatalogRepository {
        repositories::catalog::CatalogRepository::new(self.conn.clone())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    // Employees

    pub async fn list_employees(
        &self,
        plan: &EmployeePage,
    ) -> Result<(Vec<employees::Model>, u64)> {
        self.employee_repo().list(plan).await
    }

    pub async fn get_active_employee(&self, id: i32) -> Result<Option<employees::Model>> {
        self.employee_repo().get_active(id).await
    }

    pub async fn find_employee_email_conflict(
        &self,
        email: &str,
        exclude_id: Option<i32>,
    ) -> Result<Option<employees::Model>> {
        self.employee_repo()
            .find_email_conflict(email, exclude_id)
            .await
    }

    pub async fn find_employee_number_conflict(
        &self,
        employee_number: &str,
        exclude_id: Option<i32>,
    ) -> Result<Option<employees::Model>> {
        self.employee_repo()
            .find_number_conflict(employee_number, exclude_id)
            .await
    }

    pub async fn create_employee(&self, new: NewEmployee) -> Result<CreateOutcome> {
        self.employee_repo().create(new).await
    }

    pub async fn update_employee(
        &self,
        id: i32,
        changes: EmployeeChanges,
    ) -> Result<employees::Model> {
        self.employee_repo().update(id, changes).await
    }

    pub async fn deactivate_employee(&self, id: i32) -> Result<()> {
        self.employee_repo().deactivate(id).await
    }

    pub async fn resolve_employee_catalogs(
        &self,
        employees: &[employees::Model],
    ) -> Result<ResolvedCatalogs> {
        self.employee_repo().resolve_catalogs(employees).await
    }

    // Catalogs

    pub async fn list_sexes(&self) -> Result<Vec<sexes::Model>> {
        self.catalog_repo().list_sexes().await
    }

    pub async fn list_professions(&self) -> Result<Vec<professions::Model>> {
        self.catalog_repo().list_professions().await
    }

    pub async fn list_marital_statuses(&self) -> Result<Vec<marital_statuses::Model>> {
        self.catalog_repo().list_marital_statuses().await
    }

    pub async fn list_areas(&self) -> Result<Vec<areas::Model>> {
        self.catalog_repo().list_areas().await
    }

    pub async fn find_missing_catalog_reference(
        &self,
        sex_id: i32,
        profession_id: i32,
        marital_status_id: i32,
        area_id: i32,
    ) -> Result<Option<MissingReference>> {
        self.catalog_repo()
            .find_missing_reference(sex_id, profession_id, marital_status_id, area_id)
            .await
    }

    // Users

    pub async fn verify_user_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>> {
        self.user_repo().verify_credentials(email, password).await
    }

    pub async fn get_active_user_by_id(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_active_by_id(id).await
    }
}
