//! Breakdown report methods on Repository

use chrono::{NaiveDate, Utc};

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::{
        breakdown::{Breakdown, BreakdownQuery, UpdateBreakdown},
        enums::{BreakdownPriority, BreakdownStatus},
    },
};

/// Fields of a new breakdown after defaults are applied
pub struct NewBreakdown<'a> {
    pub equipment_id: i32,
    pub equipment_name: &'a str,
    pub reported_by: i32,
    pub reporter_name: &'a str,
    pub breakdown_date: NaiveDate,
    pub description: &'a str,
    pub priority: BreakdownPriority,
}

impl Repository {
    /// List breakdowns, newest first
    pub async fn breakdowns_list(&self, query: &BreakdownQuery) -> AppResult<Vec<Breakdown>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if query.equipment_id.is_some() {
            conditions.push(format!("equipment_id = ${}", idx));
            idx += 1;
        }
        if query.status.is_some() {
            conditions.push(format!("status = ${}", idx));
            idx += 1;
        }
        if query.start_date.is_some() {
            conditions.push(format!("breakdown_date >= ${}", idx));
            idx += 1;
        }
        if query.end_date.is_some() {
            conditions.push(format!("breakdown_date <= ${}", idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let select_q = format!(
            "SELECT * FROM breakdown_reports {} ORDER BY breakdown_date DESC, id DESC",
            where_clause
        );
        let mut builder = sqlx::query_as::<_, Breakdown>(&select_q);
        if let Some(e) = query.equipment_id { builder = builder.bind(e); }
        if let Some(s) = query.status { builder = builder.bind(s); }
        if let Some(sd) = query.start_date { builder = builder.bind(sd); }
        if let Some(ed) = query.end_date { builder = builder.bind(ed); }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Get a breakdown by ID
    pub async fn breakdowns_get_by_id(&self, id: i32) -> AppResult<Breakdown> {
        sqlx::query_as::<_, Breakdown>("SELECT * FROM breakdown_reports WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Breakdown report {} not found", id)))
    }

    /// Create a breakdown report
    pub async fn breakdowns_create(&self, data: &NewBreakdown<'_>) -> AppResult<Breakdown> {
        let row = sqlx::query_as::<_, Breakdown>(
            r#"
            INSERT INTO breakdown_reports (
                equipment_id, equipment_name, reported_by, reporter_name,
                breakdown_date, description, priority
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(data.equipment_id)
        .bind(data.equipment_name)
        .bind(data.reported_by)
        .bind(data.reporter_name)
        .bind(data.breakdown_date)
        .bind(data.description)
        .bind(data.priority)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update a breakdown (only provided fields); resolving stamps `resolved_at`
    pub async fn breakdowns_update(&self, id: i32, data: &UpdateBreakdown) -> AppResult<Breakdown> {
        let now = Utc::now();
        let query = update_statement(data);

        let mut builder = sqlx::query_as::<_, Breakdown>(&query).bind(now);
        if let Some(date) = data.breakdown_date { builder = builder.bind(date); }
        if let Some(ref description) = data.description { builder = builder.bind(description); }
        if let Some(priority) = data.priority { builder = builder.bind(priority); }
        if let Some(status) = data.status { builder = builder.bind(status); }
        if let Some(ref notes) = data.resolution_notes { builder = builder.bind(notes); }

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Open breakdown report {} not found", id)))
    }

    /// Delete a breakdown report
    pub async fn breakdowns_delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM breakdown_reports WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Breakdown report {} not found", id)));
        }
        Ok(())
    }
}

/// UPDATE statement for the provided fields: `$1` is the timestamp, the id binds last
fn update_statement(data: &UpdateBreakdown) -> String {
    let mut sets = vec!["modif_date = $1".to_string()];
    let mut idx = 2;

    if data.breakdown_date.is_some() { sets.push(format!("breakdown_date = ${}", idx)); idx += 1; }
    if data.description.is_some() { sets.push(format!("description = ${}", idx)); idx += 1; }
    if data.priority.is_some() { sets.push(format!("priority = ${}", idx)); idx += 1; }
    if data.status.is_some() { sets.push(format!("status = ${}", idx)); idx += 1; }
    if data.resolution_notes.is_some() { sets.push(format!("resolution_notes = ${}", idx)); idx += 1; }
    if data.status == Some(BreakdownStatus::Resolved) {
        sets.push("resolved_at = $1".to_string());
    }

    // Resolved reports are read-only
    format!(
        "UPDATE breakdown_reports SET {} WHERE id = ${} AND status <> 'resolved' RETURNING *",
        sets.join(", "),
        idx
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_skips_resolved_reports() {
        let data = UpdateBreakdown {
            description: Some("Seal leak on drive end".to_string()),
            status: Some(BreakdownStatus::Resolved),
            ..Default::default()
        };
        let query = update_statement(&data);
        assert_eq!(
            query,
            "UPDATE breakdown_reports SET modif_date = $1, description = $2, status = $3, resolved_at = $1 \
             WHERE id = $4 AND status <> 'resolved' RETURNING *"
        );
    }

    #[test]
    fn test_update_guard_without_fields() {
        let query = update_statement(&UpdateBreakdown::default());
        assert!(query.ends_with("WHERE id = $2 AND status <> 'resolved' RETURNING *"));
    }
}
