use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::entities::services;

pub struct ServiceRepository {
    conn: DatabaseConnection,
}

impl ServiceRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<services::Model>> {
        services::Entity::find()
            .order_by_asc(services::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list services")
    }

    pub async fn get(&self, id: i32) -> Result<Option<services::Model>> {
        services::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query service")
    }

    pub async fn insert(
        &self,
        title: &str,
        description: &str,
        features: &[String],
    ) -> Result<services::Model> {
        services::ActiveModel {
            title: Set(title.to_string()),
            description: Set(description.to_string()),
            features: Set(serde_json::to_string(features).context("Failed to encode features")?),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert service")
    }

    pub async fn update(
        &self,
        id: i32,
        title: Option<&str>,
        description: Option<&str>,
        features: Option<&[String]>,
    ) -> Result<Option<services::Model>> {
        let Some(service) = services::Entity::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: services::ActiveModel = service.into();
        if let Some(title) = title {
            active.title = Set(title.to_string());
        }
        if let Some(description) = description {
            active.description = Set(description.to_string());
        }
        if let Some(features) = features {
            active.features =
                Set(serde_json::to_string(features).context("Failed to encode features")?);
        }

        Ok(Some(active.update(&self.conn).await?))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = services::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete service")?;

        Ok(result.rows_affected > 0)
    }
}
