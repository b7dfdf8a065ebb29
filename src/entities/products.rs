use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub name: String,

    pub characteristics: String,

    /// JSON array of benefit strings.
    pub benefits: String,

    pub compatibility: String,

    pub use_case: Option<String>,

    pub price: f64,

    pub stock: i32,

    pub discount: Option<f64>,

    pub status: bool,

    /// Public URL of the datasheet PDF, if one was uploaded.
    pub pdf_url: Option<String>,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product_subcategories::Entity")]
    ProductSubcategories,
}

impl Related<super::product_subcategories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProductSubcategories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
