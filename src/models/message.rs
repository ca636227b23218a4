//! Internal message model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Message {
    pub id: i32,
    pub sender_id: i32,
    pub sender_name: Option<String>,
    pub recipients: Vec<i32>,
    pub subject: String,
    pub body: String,
    /// Recipients who have opened the message
    pub read_by: Vec<i32>,
    pub crea_date: Option<DateTime<Utc>>,
}

impl Message {
    pub fn is_participant(&self, user_id: i32) -> bool {
        self.sender_id == user_id || self.recipients.contains(&user_id)
    }

    pub fn is_read_by(&self, user_id: i32) -> bool {
        self.read_by.contains(&user_id)
    }
}

/// Send message request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMessage {
    #[validate(length(min = 1, message = "At least one recipient is required"))]
    pub recipients: Vec<i32>,
    #[validate(length(min = 1, max = 200, message = "Subject must be 1-200 characters"))]
    pub subject: String,
    #[validate(length(min = 1, message = "Body is required"))]
    pub body: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UnreadCountResponse {
    pub unread: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participants() {
        let message = Message {
            id: 1,
            sender_id: 3,
            sender_name: None,
            recipients: vec![4, 5],
            subject: "Pump 2 seal".to_string(),
            body: "Seal replaced, monitor for leaks".to_string(),
            read_by: vec![5],
            crea_date: None,
        };
        assert!(message.is_participant(3));
        assert!(message.is_participant(4));
        assert!(!message.is_participant(6));
        assert!(message.is_read_by(5));
        assert!(!message.is_read_by(4));
    }

    #[test]
    fn test_empty_recipients_rejected() {
        let request = CreateMessage {
            recipients: vec![],
            subject: "Shutdown".to_string(),
            body: "Plant shutdown on Friday".to_string(),
        };
        assert!(request.validate().is_err());
    }
}
