use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::{categories, subcategories};

pub struct CategoryRepository {
    conn: DatabaseConnection,
}

impl CategoryRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<categories::Model>> {
        categories::Entity::find()
            .order_by_asc(categories::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to list categories")
    }

    pub async fn get(&self, id: i32) -> Result<Option<categories::Model>> {
        categories::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query category")
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<categories::Model>> {
        categories::Entity::find()
            .filter(categories::Column::Name.eq(name))
            .one(&self.conn)
            .await
            .context("Failed to query category by name")
    }

    pub async fn create(&self, name: &str) -> Result<categories::Model> {
        categories::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert category")
    }

    pub async fn update(&self, id: i32, name: &str) -> Result<Option<categories::Model>> {
        let Some(category) = categories::Entity::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: categories::ActiveModel = category.into();
        active.name = Set(name.to_string());
        let updated = active.update(&self.conn).await?;

        Ok(Some(updated))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = categories::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete category")?;

        Ok(result.rows_affected > 0)
    }
}

pub struct SubcategoryRepository {
    conn: DatabaseConnection,
}

impl SubcategoryRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list_for_category(&self, category_id: i32) -> Result<Vec<subcategories::Model>> {
        subcategories::Entity::find()
            .filter(subcategories::Column::CategoryId.eq(category_id))
            .order_by_asc(subcategories::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to list subcategories")
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<subcategories::Model>> {
        subcategories::Entity::find()
            .filter(subcategories::Column::Name.eq(name))
            .one(&self.conn)
            .await
            .context("Failed to query subcategory by name")
    }

    pub async fn create(&self, category_id: i32, name: &str) -> Result<subcategories::Model> {
        subcategories::ActiveModel {
            name: Set(name.to_string()),
            category_id: Set(category_id),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert subcategory")
    }

    pub async fn delete_by_name(&self, name: &str) -> Result<bool> {
        let result = subcategories::Entity::delete_many()
            .filter(subcategories::Column::Name.eq(name))
            .exec(&self.conn)
            .await
            .context("Failed to delete subcategory")?;

        Ok(result.rows_affected > 0)
    }
}
