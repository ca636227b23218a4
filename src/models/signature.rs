//! Digital signature attached to checklists and diaries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Signature {
    pub user_id: i32,
    pub name: String,
    /// Stored signature image
    pub signature_url: Option<String>,
    pub signed_at: DateTime<Utc>,
}
