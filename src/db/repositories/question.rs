use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::entities::questions;

pub struct QuestionRepository {
    conn: DatabaseConnection,
}

impl QuestionRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<questions::Model>> {
        questions::Entity::find()
            .order_by_asc(questions::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list questions")
    }

    pub async fn insert(&self, question: &str, answer: &str) -> Result<questions::Model> {
        questions::ActiveModel {
            question: Set(question.to_string()),
            answer: Set(answer.to_string()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert question")
    }

    pub async fn update(
        &self,
        id: i32,
        question: Option<&str>,
        answer: Option<&str>,
    ) -> Result<Option<questions::Model>> {
        let Some(row) = questions::Entity::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: questions::ActiveModel = row.into();
        if let Some(question) = question {
            active.question = Set(question.to_string());
        }
        if let Some(answer) = answer {
            active.answer = Set(answer.to_string());
        }

        Ok(Some(active.update(&self.conn).await?))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = questions::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete question")?;

        Ok(result.rows_affected > 0)
    }
}
