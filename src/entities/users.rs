use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub username: String,

    #[sea_orm(unique)]
    pub email: String,

    /// Either "admin" or "user".
    pub role: String,

    /// Argon2id password hash
    pub password_hash: String,

    /// 6-digit password reset code; always paired with `code_expires_at`.
    pub password_reset_code: Option<String>,

    /// RFC 3339 expiry of the reset code.
    pub code_expires_at: Option<String>,

    pub created_at: String,

    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
