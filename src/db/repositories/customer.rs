use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::entities::customers;

#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub lastname: String,
    pub cellphone: String,
    pub district: String,
    pub email: String,
    pub message: Option<String>,
}

pub struct CustomerRepository {
    conn: DatabaseConnection,
}

impl CustomerRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<customers::Model>> {
        customers::Entity::find()
            .order_by_desc(customers::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("Failed to list customers")
    }

    pub async fn get(&self, id: i32) -> Result<Option<customers::Model>> {
        customers::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query customer")
    }

    pub async fn insert(&self, input: &NewCustomer) -> Result<customers::Model> {
        customers::ActiveModel {
            name: Set(input.name.clone()),
            lastname: Set(input.lastname.clone()),
            cellphone: Set(input.cellphone.clone()),
            district: Set(input.district.clone()),
            email: Set(input.email.clone()),
            message: Set(input.message.clone()),
            active: Set(true),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert customer")
    }

    pub async fn set_active(&self, id: i32, active: bool) -> Result<Option<customers::Model>> {
        let Some(row) = customers::Entity::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut model: customers::ActiveModel = row.into();
        model.active = Set(active);

        Ok(Some(model.update(&self.conn).await?))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = customers::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete customer")?;

        Ok(result.rows_affected > 0)
    }
}
