use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Assigned after insert as "EMP" + id; unique among active records.
    pub employee_number: String,

    pub name: String,

    pub surnames: String,

    /// Always stored lowercase; unique among active records.
    pub email: String,

    pub phone: Option<String>,

    /// Calendar date, ISO "YYYY-MM-DD".
    pub birth_date: String,

    /// Calendar date, ISO "YYYY-MM-DD".
    pub hire_date: String,

    pub salary: f64,

    pub sex_id: i32,

    pub profession_id: i32,

    pub marital_status_id: i32,

    pub area_id: i32,

    /// Soft-delete flag; rows are deactivated, never removed.
    pub active: bool,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sexes::Entity",
        from = "Column::SexId",
        to = "super::sexes::Column::Id"
    )]
    Sex,

    #[sea_orm(
        belongs_to = "super::professions::Entity",
        from = "Column::ProfessionId",
        to = "super::professions::Column::Id"
    )]
    Profession,

    #[sea_orm(
        belongs_to = "super::marital_statuses::Entity",
        from = "Column::MaritalStatusId",
        to = "super::marital_statuses::Column::Id"
    )]
    MaritalStatus,

    #[sea_orm(
        belongs_to = "super::areas::Entity",
        from = "Column::AreaId",
        to = "super::areas::Column::Id"
    )]
    Area,
}

impl Related<super::sexes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sex.def()
    }
}

impl Related<super::professions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profession.def()
    }
}

impl Related<super::marital_statuses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MaritalStatus.def()
    }
}

impl Related<super::areas::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Area.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
