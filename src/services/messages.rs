//! Internal messaging service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::message::{CreateMessage, Message},
    repository::Repository,
};

/// Sorted, de-duplicated recipient ids
fn normalize_recipients(recipients: &[i32]) -> Vec<i32> {
    let mut ids = recipients.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}

#[derive(Clone)]
pub struct MessagesService {
    repository: Repository,
}

impl MessagesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn send(&self, data: &CreateMessage, sender_id: i32) -> AppResult<Message> {
        data.validate()?;
        let recipients = normalize_recipients(&data.recipients);
        let known = self.repository.users_count_existing(&recipients).await?;
        if known != recipients.len() as i64 {
            return Err(AppError::BadRequest("Unknown recipient".to_string()));
        }

        let sender = self.repository.users_get_by_id(sender_id).await?;
        let message = self
            .repository
            .messages_create(data, &recipients, sender.id, &sender.name)
            .await?;
        tracing::info!(message_id = message.id, sender_id, recipients = recipients.len(), "Message sent");
        Ok(message)
    }

    pub async fn inbox(&self, user_id: i32) -> AppResult<Vec<Message>> {
        self.repository.messages_inbox(user_id).await
    }

    pub async fn sent(&self, user_id: i32) -> AppResult<Vec<Message>> {
        self.repository.messages_sent(user_id).await
    }

    pub async fn unread_count(&self, user_id: i32) -> AppResult<i64> {
        self.repository.messages_unread_count(user_id).await
    }

    /// Only the sender and the recipients can read a message
    pub async fn get(&self, id: i32, user_id: i32) -> AppResult<Message> {
        let message = self.repository.messages_get_by_id(id).await?;
        if !message.is_participant(user_id) {
            return Err(AppError::Authorization("Not a participant of this message".to_string()));
        }
        Ok(message)
    }

    pub async fn mark_read(&self, id: i32, user_id: i32) -> AppResult<Message> {
        let message = self.repository.messages_get_by_id(id).await?;
        if !message.recipients.contains(&user_id) {
            return Err(AppError::Authorization("Not a recipient of this message".to_string()));
        }
        if message.is_read_by(user_id) {
            return Ok(message);
        }
        self.repository.messages_mark_read(id, user_id).await
    }

    pub async fn delete(&self, id: i32, user_id: i32) -> AppResult<()> {
        let message = self.repository.messages_get_by_id(id).await?;
        if message.sender_id != user_id {
            return Err(AppError::Authorization("Only the sender can delete a message".to_string()));
        }
        self.repository.messages_delete(id).await?;
        tracing::info!(message_id = id, "Message deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_recipients() {
        assert_eq!(normalize_recipients(&[7, 3, 7, 1, 3]), vec![1, 3, 7]);
        assert!(normalize_recipients(&[]).is_empty());
    }
}
