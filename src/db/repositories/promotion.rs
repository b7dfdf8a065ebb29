use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::entities::promotions;

pub struct PromotionRepository {
    conn: DatabaseConnection,
}

impl PromotionRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<promotions::Model>> {
        promotions::Entity::find()
            .order_by_asc(promotions::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list promotions")
    }

    pub async fn get(&self, id: i32) -> Result<Option<promotions::Model>> {
        promotions::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query promotion")
    }

    pub async fn insert(&self, title: &str, description: &str) -> Result<promotions::Model> {
        promotions::ActiveModel {
            title: Set(title.to_string()),
            description: Set(description.to_string()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert promotion")
    }

    pub async fn update(
        &self,
        id: i32,
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<Option<promotions::Model>> {
        let Some(promotion) = promotions::Entity::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: promotions::ActiveModel = promotion.into();
        if let Some(title) = title {
            active.title = Set(title.to_string());
        }
        if let Some(description) = description {
            active.description = Set(description.to_string());
        }

        Ok(Some(active.update(&self.conn).await?))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = promotions::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete promotion")?;

        Ok(result.rows_affected > 0)
    }
}
