use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::entities::{about_us, about_us_home};

/// Both about-us tables hold exactly one row, seeded by migration; the API
/// only reads and updates them.
pub struct AboutUsRepository {
    conn: DatabaseConnection,
}

impl AboutUsRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self) -> Result<about_us::Model> {
        about_us::Entity::find()
            .one(&self.conn)
            .await
            .context("Failed to query about_us")?
            .ok_or_else(|| anyhow::anyhow!("about_us singleton row missing"))
    }

    pub async fn update(
        &self,
        id: i32,
        mission: Option<&str>,
        vision: Option<&str>,
        youtube_name: Option<&str>,
        youtube_url: Option<&str>,
    ) -> Result<Option<about_us::Model>> {
        let Some(row) = about_us::Entity::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: about_us::ActiveModel = row.into();
        if let Some(mission) = mission {
            active.mission = Set(mission.to_string());
        }
        if let Some(vision) = vision {
            active.vision = Set(vision.to_string());
        }
        if let Some(youtube_name) = youtube_name {
            active.youtube_name = Set(Some(youtube_name.to_string()));
        }
        if let Some(youtube_url) = youtube_url {
            active.youtube_url = Set(Some(youtube_url.to_string()));
        }

        Ok(Some(active.update(&self.conn).await?))
    }

    /// Replaces the JSON-encoded company values list wholesale.
    pub async fn set_values(&self, id: i32, values: &[String]) -> Result<()> {
        let row = about_us::Entity::find_by_id(id)
            .one(&self.conn)
            .await?
            .ok_or_else(|| anyhow::anyhow!("about_us {id} not found"))?;

        let mut active: about_us::ActiveModel = row.into();
        active.about_values =
            Set(serde_json::to_string(values).context("Failed to encode values")?);
        active.update(&self.conn).await?;

        Ok(())
    }

    pub async fn get_home(&self) -> Result<about_us_home::Model> {
        about_us_home::Entity::find()
            .one(&self.conn)
            .await
            .context("Failed to query about_us_home")?
            .ok_or_else(|| anyhow::anyhow!("about_us_home singleton row missing"))
    }

    pub async fn update_home(
        &self,
        id: i32,
        text_section_one: Option<&str>,
        text_section_two: Option<&str>,
    ) -> Result<Option<about_us_home::Model>> {
        let Some(row) = about_us_home::Entity::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: about_us_home::ActiveModel = row.into();
        if let Some(text) = text_section_one {
            active.text_section_one = Set(text.to_string());
        }
        if let Some(text) = text_section_two {
            active.text_section_two = Set(text.to_string());
        }

        Ok(Some(active.update(&self.conn).await?))
    }
}
