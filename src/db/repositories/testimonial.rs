use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::entities::testimonials;

#[derive(Debug, Clone, Default)]
pub struct TestimonialChanges {
    pub customer_name: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub rating: Option<i32>,
}

pub struct TestimonialRepository {
    conn: DatabaseConnection,
}

impl TestimonialRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<testimonials::Model>> {
        testimonials::Entity::find()
            .order_by_desc(testimonials::Column::Date)
            .all(&self.conn)
            .await
            .context("Failed to list testimonials")
    }

    pub async fn get(&self, id: i32) -> Result<Option<testimonials::Model>> {
        testimonials::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query testimonial")
    }

    pub async fn insert(
        &self,
        customer_name: &str,
        description: &str,
        date: &str,
        rating: i32,
    ) -> Result<testimonials::Model> {
        testimonials::ActiveModel {
            customer_name: Set(customer_name.to_string()),
            description: Set(description.to_string()),
            date: Set(date.to_string()),
            rating: Set(rating),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert testimonial")
    }

    pub async fn update(
        &self,
        id: i32,
        changes: &TestimonialChanges,
    ) -> Result<Option<testimonials::Model>> {
        let Some(row) = testimonials::Entity::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: testimonials::ActiveModel = row.into();
        if let Some(customer_name) = &changes.customer_name {
            active.customer_name = Set(customer_name.clone());
        }
        if let Some(description) = &changes.description {
            active.description = Set(description.clone());
        }
        if let Some(date) = &changes.date {
            active.date = Set(date.clone());
        }
        if let Some(rating) = changes.rating {
            active.rating = Set(rating);
        }

        Ok(Some(active.update(&self.conn).await?))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = testimonials::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete testimonial")?;

        Ok(result.rows_affected > 0)
    }
}
