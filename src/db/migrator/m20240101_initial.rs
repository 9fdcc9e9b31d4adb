use crate::entities::prelude::*;
use crate::entities::{areas, marital_statuses, professions, sexes, users};
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Default admin account (development seed, matches the original deployment).
const DEFAULT_ADMIN_EMAIL: &str = "admin@colaboradores.com";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

const SEXES: &[&str] = &["Male", "Female", "Other"];

const PROFESSIONS: &[&str] = &[
    "Frontend Developer",
    "Backend Developer",
    "Full Stack Developer",
    "DevOps Engineer",
    "Systems Analyst",
    "UX/UI Designer",
    "Product Manager",
    "Scrum Master",
    "QA Tester",
    "Data Scientist",
    "Software Architect",
    "Database Administrator",
];

const MARITAL_STATUSES: &[&str] = &[
    "Single",
    "Married",
    "Divorced",
    "Widowed",
    "Domestic Partnership",
];

const AREAS: &[&str] = &[
    "Software Development",
    "Infrastructure & DevOps",
    "Analysis & Design",
    "Project Management",
    "Quality & Testing",
    "Data & Analytics",
    "Technical Support",
    "Human Resources",
    "Administration",
    "Sales & Marketing",
];

/// Hash the default admin password using Argon2id
fn hash_default_password() -> String {
    use argon2::{
        password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
        Argon2,
    };

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(DEFAULT_ADMIN_PASSWORD.as_bytes(), &salt)
        .expect("Failed to hash default password")
        .to_string()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(
                schema
                    .create_table_from_entity(Sexes)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Professions)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(MaritalStatuses)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Areas)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Employees)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Users)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        seed_catalog(
            manager,
            Sexes,
            [sexes::Column::Name, sexes::Column::Active],
            SEXES,
        )
        .await?;
        seed_catalog(
            manager,
            Professions,
            [professions::Column::Name, professions::Column::Active],
            PROFESSIONS,
        )
        .await?;
        seed_catalog(
            manager,
            MaritalStatuses,
            [
                marital_statuses::Column::Name,
                marital_statuses::Column::Active,
            ],
            MARITAL_STATUSES,
        )
        .await?;
        seed_catalog(
            manager,
            Areas,
            [areas::Column::Name, areas::Column::Active],
            AREAS,
        )
        .await?;

        // Seed default admin user with hashed password
        let now = chrono::Utc::now().to_rfc3339();
        let password_hash = hash_default_password();

        let insert = Query::insert()
            .into_table(Users)
            .columns([
                users::Column::Email,
                users::Column::PasswordHash,
                users::Column::Name,
                users::Column::Active,
                users::Column::CreatedAt,
                users::Column::UpdatedAt,
            ])
            .values_panic([
                DEFAULT_ADMIN_EMAIL.into(),
                password_hash.into(),
                "Administrator".into(),
                true.into(),
                now.clone().into(),
                now.into(),
            ])
            .to_owned();

        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Employees).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Areas).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MaritalStatuses).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Professions).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sexes).to_owned())
            .await?;

        Ok(())
    }
}

async fn seed_catalog<E, C>(
    manager: &SchemaManager<'_>,
    table: E,
    columns: [C; 2],
    names: &[&str],
) -> Result<(), DbErr>
where
    E: IntoTableRef,
    C: IntoIden,
{
    let mut insert = Query::insert().into_table(table).columns(columns).to_owned();

    for name in names {
        insert.values_panic([(*name).into(), true.into()]);
    }

    manager.exec_stmt(insert).await
}
