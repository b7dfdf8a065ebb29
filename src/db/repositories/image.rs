use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set,
};

use crate::entities::images;

/// The entity kinds that can own images. Stored as the `owner_type`
/// discriminant column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageOwner {
    Product,
    Blog,
    Promotion,
    Testimonial,
    Policy,
    AboutUs,
    AboutUsHome,
}

impl ImageOwner {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Blog => "blog",
            Self::Promotion => "promotion",
            Self::Testimonial => "testimonial",
            Self::Policy => "policy",
            Self::AboutUs => "about_us",
            Self::AboutUsHome => "about_us_home",
        }
    }
}

pub struct ImageRepository {
    conn: DatabaseConnection,
}

impl ImageRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Inserts an image row. Generic over the connection so product
    /// creation can run it inside its transaction.
    pub async fn insert<C: ConnectionTrait>(
        conn: &C,
        owner: ImageOwner,
        owner_id: i32,
        stored_url: &str,
    ) -> Result<()> {
        images::ActiveModel {
            owner_type: Set(owner.as_str().to_string()),
            owner_id: Set(owner_id),
            url: Set(stored_url.to_string()),
            ..Default::default()
        }
        .insert(conn)
        .await
        .context("Failed to insert image")?;

        Ok(())
    }

    pub async fn urls_for(&self, owner: ImageOwner, owner_id: i32) -> Result<Vec<String>> {
        let rows = images::Entity::find()
            .filter(images::Column::OwnerType.eq(owner.as_str()))
            .filter(images::Column::OwnerId.eq(owner_id))
            .all(&self.conn)
            .await
            .context("Failed to query images")?;

        Ok(rows.into_iter().map(|row| row.url).collect())
    }

    /// Removes all image rows of an owner and returns their URLs so the
    /// caller can unlink the files.
    pub async fn delete_for(&self, owner: ImageOwner, owner_id: i32) -> Result<Vec<String>> {
        let urls = self.urls_for(owner, owner_id).await?;

        images::Entity::delete_many()
            .filter(images::Column::OwnerType.eq(owner.as_str()))
            .filter(images::Column::OwnerId.eq(owner_id))
            .exec(&self.conn)
            .await
            .context("Failed to delete images")?;

        Ok(urls)
    }
}
