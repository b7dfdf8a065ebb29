use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "info_contacts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub location: String,

    pub cellphone: String,

    pub email: String,

    pub attention_hours: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
