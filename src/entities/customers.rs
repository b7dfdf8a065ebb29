use sea_orm::entity::prelude::*;
use serde::Serialize;

/// A contact-form lead, not a login account.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    pub lastname: String,

    pub cellphone: String,

    pub district: String,

    pub email: String,

    pub message: Option<String>,

    pub active: bool,

    #[serde(skip_serializing)]
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
