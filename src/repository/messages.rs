//! Message methods on Repository

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::message::{CreateMessage, Message},
};

impl Repository {
    /// Messages addressed to a user, newest first
    pub async fn messages_inbox(&self, user_id: i32) -> AppResult<Vec<Message>> {
        let rows = sqlx::query_as::<_, Message>(
            "SELECT * FROM messages WHERE $1 = ANY(recipients) ORDER BY crea_date DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Messages sent by a user, newest first
    pub async fn messages_sent(&self, user_id: i32) -> AppResult<Vec<Message>> {
        let rows = sqlx::query_as::<_, Message>(
            "SELECT * FROM messages WHERE sender_id = $1 ORDER BY crea_date DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Count messages a user received but has not opened
    pub async fn messages_unread_count(&self, user_id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM messages WHERE $1 = ANY(recipients) AND NOT ($1 = ANY(read_by))",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    /// Get a message by ID
    pub async fn messages_get_by_id(&self, id: i32) -> AppResult<Message> {
        sqlx::query_as::<_, Message>("SELECT * FROM messages WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Message {} not found", id)))
    }

    /// Store a message
    pub async fn messages_create(
        &self,
        data: &CreateMessage,
        recipients: &[i32],
        sender_id: i32,
        sender_name: &str,
    ) -> AppResult<Message> {
        let row = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (sender_id, sender_name, recipients, subject, body)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(sender_id)
        .bind(sender_name)
        .bind(recipients)
        .bind(&data.subject)
        .bind(&data.body)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Add a reader to `read_by` (no-op when already present)
    pub async fn messages_mark_read(&self, id: i32, user_id: i32) -> AppResult<Message> {
        sqlx::query_as::<_, Message>(
            r#"
            UPDATE messages
            SET read_by = CASE WHEN $2 = ANY(read_by) THEN read_by ELSE array_append(read_by, $2) END
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Message {} not found", id)))
    }

    /// Delete a message
    pub async fn messages_delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM messages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Message {} not found", id)));
        }
        Ok(())
    }
}
