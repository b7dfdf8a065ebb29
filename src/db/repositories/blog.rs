use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::blogs;

#[derive(Debug, Clone, Default)]
pub struct BlogChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<i32>,
}

pub struct BlogRepository {
    conn: DatabaseConnection,
}

impl BlogRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<blogs::Model>> {
        blogs::Entity::find()
            .order_by_desc(blogs::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("Failed to list blogs")
    }

    pub async fn list_for_category(&self, category_id: i32) -> Result<Vec<blogs::Model>> {
        blogs::Entity::find()
            .filter(blogs::Column::CategoryId.eq(category_id))
            .order_by_desc(blogs::Column::CreatedAt)
            .all(&self.conn)
            .await
            .context("Failed to list blogs for category")
    }

    pub async fn get(&self, id: i32) -> Result<Option<blogs::Model>> {
        blogs::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query blog")
    }

    pub async fn insert(
        &self,
        title: &str,
        description: &str,
        category_id: i32,
    ) -> Result<blogs::Model> {
        let now = chrono::Utc::now().to_rfc3339();

        blogs::ActiveModel {
            title: Set(title.to_string()),
            description: Set(description.to_string()),
            category_id: Set(category_id),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert blog")
    }

    pub async fn update(&self, id: i32, changes: &BlogChanges) -> Result<Option<blogs::Model>> {
        let Some(blog) = blogs::Entity::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: blogs::ActiveModel = blog.into();
        if let Some(title) = &changes.title {
            active.title = Set(title.clone());
        }
        if let Some(description) = &changes.description {
            active.description = Set(description.clone());
        }
        if let Some(category_id) = changes.category_id {
            active.category_id = Set(category_id);
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        Ok(Some(active.update(&self.conn).await?))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = blogs::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete blog")?;

        Ok(result.rows_affected > 0)
    }
}
