//! Repository layer for database operations
//!
//! Each collection adds its methods to [`Repository`] from its own module,
//! prefixed with the collection name (`equipment_list`, `breakdowns_get`, ...).

pub mod breakdowns;
pub mod diaries;
pub mod equipment;
pub mod messages;
pub mod schedules;
pub mod users;
pub mod vsds;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Round-trip to the database (readiness probe)
    pub async fn ping(&self) -> crate::error::AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
