use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::entities::info_contacts;

pub struct InfoContactRepository {
    conn: DatabaseConnection,
}

impl InfoContactRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self) -> Result<info_contacts::Model> {
        info_contacts::Entity::find()
            .one(&self.conn)
            .await
            .context("Failed to query info contact")?
            .ok_or_else(|| anyhow::anyhow!("info_contacts singleton row missing"))
    }

    pub async fn update(
        &self,
        location: Option<&str>,
        cellphone: Option<&str>,
        email: Option<&str>,
        attention_hours: Option<&str>,
    ) -> Result<info_contacts::Model> {
        let row = self.get().await?;

        let mut active: info_contacts::ActiveModel = row.into();
        if let Some(location) = location {
            active.location = Set(location.to_string());
        }
        if let Some(cellphone) = cellphone {
            active.cellphone = Set(cellphone.to_string());
        }
        if let Some(email) = email {
            active.email = Set(email.to_string());
        }
        if let Some(attention_hours) = attention_hours {
            active.attention_hours = Set(attention_hours.to_string());
        }

        active
            .update(&self.conn)
            .await
            .context("Failed to update info contact")
    }
}
