use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::entities::policies;

pub struct PolicyRepository {
    conn: DatabaseConnection,
}

impl PolicyRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<policies::Model>> {
        policies::Entity::find()
            .order_by_asc(policies::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list policies")
    }

    pub async fn get(&self, id: i32) -> Result<Option<policies::Model>> {
        policies::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query policy")
    }

    pub async fn insert(&self, title: &str, description: &str) -> Result<policies::Model> {
        policies::ActiveModel {
            title: Set(title.to_string()),
            description: Set(description.to_string()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert policy")
    }

    pub async fn update(
        &self,
        id: i32,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<Option<policies::Model>> {
        let Some(policy) = policies::Entity::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: policies::ActiveModel = policy.into();
        if let Some(title) = title {
            active.title = Set(title.to_string());
        }
        if let Some(description) = description {
            active.description = Set(description.to_string());
        }

        Ok(Some(active.update(&self.conn).await?))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = policies::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete policy")?;

        Ok(result.rows_affected > 0)
    }
}
