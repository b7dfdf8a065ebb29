use sea_orm::entity::prelude::*;

/// Polymorphic image attachment. `owner_type` is one of the
/// [`crate::db::repositories::image::ImageOwner`] discriminants.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "images")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub owner_type: String,

    pub owner_id: i32,

    pub url: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
