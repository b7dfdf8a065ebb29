use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::{product_subcategories, products, subcategories};

/// Fields for a new product row. Benefits arrive as a list and are stored
/// as a JSON array string.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub characteristics: String,
    pub benefits: Vec<String>,
    pub compatibility: String,
    pub use_case: Option<String>,
    pub price: f64,
    pub stock: i32,
    pub discount: Option<f64>,
    pub pdf_url: Option<String>,
}

/// Partial update; `None` fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct ProductChanges {
    pub characteristics: Option<String>,
    pub benefits: Option<Vec<String>>,
    pub compatibility: Option<String>,
    pub use_case: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i32>,
    pub discount: Option<f64>,
    pub status: Option<bool>,
}

pub struct ProductRepository {
    conn: DatabaseConnection,
}

impl ProductRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<products::Model>> {
        products::Entity::find()
            .order_by_asc(products::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to list products")
    }

    pub async fn get(&self, id: i32) -> Result<Option<products::Model>> {
        products::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("failed to load product")
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Option<products::Model>> {
        products::Entity::find()
            .filter(products::Column::Name.eq(name))
            .one(&self.conn)
            .await
            .context("Failed to query product by name")
    }

    pub async fn exists(&self, name: &str) -> Result<bool> {
        let count = products::Entity::find()
            .filter(products::Column::Name.eq(name))
            .count(&self.conn)
            .await
            .context("Failed to check product existence")?;

        Ok(count > 0)
    }

    /// Inserts the product row. Generic over the connection so the
    /// create-product flow can run inside one transaction with its
    /// subcategory links and image rows.
    pub async fn insert<C: ConnectionTrait>(conn: &C, input: &NewProduct) -> Result<i32> {
        let now = chrono::Utc::now().to_rfc3339();
        let benefits =
            serde_json::to_string(&input.benefits).context("Failed to encode benefits")?;

        let row = products::ActiveModel {
            name: Set(input.name.clone()),
            characteristics: Set(input.characteristics.clone()),
            benefits: Set(benefits),
            compatibility: Set(input.compatibility.clone()),
            use_case: Set(input.use_case.clone()),
            price: Set(input.price),
            stock: Set(input.stock),
            discount: Set(input.discount),
            status: Set(true),
            pdf_url: Set(input.pdf_url.clone()),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(conn)
        .await
        .context("Failed to insert product")?;

        Ok(row.id)
    }

    pub async fn attach_subcategories<C: ConnectionTrait>(
        conn: &C,
        product_id: i32,
        subcategory_ids: &[i32],
    ) -> Result<()> {
        for &subcategory_id in subcategory_ids {
            product_subcategories::ActiveModel {
                product_id: Set(product_id),
                subcategory_id: Set(subcategory_id),
            }
            .insert(conn)
            .await
            .context("Failed to link product subcategory")?;
        }

        Ok(())
    }

    pub async fn subcategories_for(&self, product_id: i32) -> Result<Vec<subcategories::Model>> {
        let links = product_subcategories::Entity::find()
            .filter(product_subcategories::Column::ProductId.eq(product_id))
            .all(&self.conn)
            .await
            .context("Failed to query product subcategory links")?;

        let ids: Vec<i32> = links.into_iter().map(|link| link.subcategory_id).collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        subcategories::Entity::find()
            .filter(subcategories::Column::Id.is_in(ids))
            .all(&self.conn)
            .await
            .context("Failed to query product subcategories")
    }

    pub async fn update(&self, id: i32, changes: &ProductChanges) -> Result<products::Model> {
        let product = products::Entity::find_by_id(id)
            .one(&self.conn)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Product {id} not found"))?;

        let mut active: products::ActiveModel = product.into();

        if let Some(characteristics) = &changes.characteristics {
            active.characteristics = Set(characteristics.clone());
        }
        if let Some(benefits) = &changes.benefits {
            active.benefits =
                Set(serde_json::to_string(benefits).context("Failed to encode benefits")?);
        }
        if let Some(compatibility) = &changes.compatibility {
            active.compatibility = Set(compatibility.clone());
        }
        if let Some(use_case) = &changes.use_case {
            active.use_case = Set(Some(use_case.clone()));
        }
        if let Some(price) = changes.price {
            active.price = Set(price);
        }
        if let Some(stock) = changes.stock {
            active.stock = Set(stock);
        }
        if let Some(discount) = changes.discount {
            active.discount = Set(Some(discount));
        }
        if let Some(status) = changes.status {
            active.status = Set(status);
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        active
            .update(&self.conn)
            .await
            .context("Failed to update product")
    }

    pub async fn set_pdf_url(&self, id: i32, pdf_url: Option<String>) -> Result<()> {
        let product = products::Entity::find_by_id(id)
            .one(&self.conn)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Product {id} not found"))?;

        let mut active: products::ActiveModel = product.into();
        active.pdf_url = Set(pdf_url);
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());
        active.update(&self.conn).await?;

        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = products::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete product")?;

        Ok(result.rows_affected > 0)
    }
}
