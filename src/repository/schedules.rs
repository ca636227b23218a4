//! Schedules domain methods on Repository (completed checklists, upcoming plan)

use chrono::{NaiveDate, Utc};
use sqlx::types::Json;

use super::{equipment::advance_last_maintenance, Repository};
use crate::{
    error::{AppError, AppResult},
    models::schedule::{
        CompletedSchedule, CompletedScheduleQuery, CreateUpcomingSchedule, SaveCompletedSchedule,
        UpcomingSchedule, UpcomingScheduleQuery, UpdateUpcomingSchedule,
    },
};

impl Repository {
    // ---- Completed ----

    /// List completed checklists, newest first
    pub async fn schedules_list_completed(
        &self,
        query: &CompletedScheduleQuery,
    ) -> AppResult<Vec<CompletedSchedule>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if query.equipment_id.is_some() {
            conditions.push(format!("equipment_id = ${}", idx));
            idx += 1;
        }
        if query.frequency.is_some() {
            conditions.push(format!("frequency = ${}", idx));
            idx += 1;
        }
        if query.category.is_some() {
            conditions.push(format!("category = ${}", idx));
            idx += 1;
        }
        if query.start_date.is_some() {
            conditions.push(format!("completed_date >= ${}", idx));
            idx += 1;
        }
        if query.end_date.is_some() {
            conditions.push(format!("completed_date <= ${}", idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let select_q = format!(
            "SELECT * FROM completed_schedules {} ORDER BY completed_date DESC, id DESC",
            where_clause
        );
        let mut builder = sqlx::query_as::<_, CompletedSchedule>(&select_q);
        if let Some(e) = query.equipment_id { builder = builder.bind(e); }
        if let Some(f) = query.frequency { builder = builder.bind(f); }
        if let Some(ref c) = query.category { builder = builder.bind(c); }
        if let Some(sd) = query.start_date { builder = builder.bind(sd); }
        if let Some(ed) = query.end_date { builder = builder.bind(ed); }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Get a completed checklist by ID
    pub async fn schedules_get_completed(&self, id: i32) -> AppResult<CompletedSchedule> {
        sqlx::query_as::<_, CompletedSchedule>("SELECT * FROM completed_schedules WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Completed schedule {} not found", id)))
    }

    /// Store a new completed checklist and advance the equipment's `last_maintenance`
    pub async fn schedules_create_completed(
        &self,
        data: &SaveCompletedSchedule,
        equipment_name: &str,
        completed_by: i32,
    ) -> AppResult<CompletedSchedule> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, CompletedSchedule>(
            r#"
            INSERT INTO completed_schedules (
                equipment_id, equipment_name, frequency, category, completed_date,
                work_crew, checklist, signatures, notes, completed_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(data.equipment_id)
        .bind(equipment_name)
        .bind(data.frequency)
        .bind(&data.category)
        .bind(data.completed_date)
        .bind(Json(&data.work_crew))
        .bind(Json(&data.checklist))
        .bind(Json(&data.signatures))
        .bind(&data.notes)
        .bind(completed_by)
        .fetch_one(&mut *tx)
        .await?;

        advance_last_maintenance(&mut *tx, data.equipment_id, data.completed_date).await?;
        tx.commit().await?;
        Ok(row)
    }

    /// Re-save: replace every field of an existing checklist, advancing `last_maintenance` too
    pub async fn schedules_replace_completed(
        &self,
        id: i32,
        data: &SaveCompletedSchedule,
        equipment_name: &str,
        completed_by: i32,
    ) -> AppResult<CompletedSchedule> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, CompletedSchedule>(
            r#"
            UPDATE completed_schedules
            SET equipment_id = $2, equipment_name = $3, frequency = $4, category = $5,
                completed_date = $6, work_crew = $7, checklist = $8, signatures = $9,
                notes = $10, completed_by = $11, modif_date = $12
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(data.equipment_id)
        .bind(equipment_name)
        .bind(data.frequency)
        .bind(&data.category)
        .bind(data.completed_date)
        .bind(Json(&data.work_crew))
        .bind(Json(&data.checklist))
        .bind(Json(&data.signatures))
        .bind(&data.notes)
        .bind(completed_by)
        .bind(Utc::now())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Completed schedule {} not found", id)))?;

        advance_last_maintenance(&mut *tx, data.equipment_id, data.completed_date).await?;
        tx.commit().await?;
        Ok(row)
    }

    /// Delete a completed checklist
    pub async fn schedules_delete_completed(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM completed_schedules WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Completed schedule {} not found", id)));
        }
        Ok(())
    }

    // ---- Upcoming ----

    /// List planned entries, soonest first
    pub async fn schedules_list_upcoming(
        &self,
        query: &UpcomingScheduleQuery,
    ) -> AppResult<Vec<UpcomingSchedule>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if query.equipment_id.is_some() {
            conditions.push(format!("equipment_id = ${}", idx));
            idx += 1;
        }
        if query.start_date.is_some() {
            conditions.push(format!("scheduled_date >= ${}", idx));
            idx += 1;
        }
        if query.end_date.is_some() {
            conditions.push(format!("scheduled_date <= ${}", idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let select_q = format!(
            "SELECT * FROM upcoming_schedules {} ORDER BY scheduled_date, id",
            where_clause
        );
        let mut builder = sqlx::query_as::<_, UpcomingSchedule>(&select_q);
        if let Some(e) = query.equipment_id { builder = builder.bind(e); }
        if let Some(sd) = query.start_date { builder = builder.bind(sd); }
        if let Some(ed) = query.end_date { builder = builder.bind(ed); }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Create a planned entry
    pub async fn schedules_create_upcoming(&self, data: &CreateUpcomingSchedule) -> AppResult<UpcomingSchedule> {
        let row = sqlx::query_as::<_, UpcomingSchedule>(
            r#"
            INSERT INTO upcoming_schedules (equipment_id, frequency, scheduled_date, assigned_to, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(data.equipment_id)
        .bind(data.frequency)
        .bind(data.scheduled_date)
        .bind(data.assigned_to)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update a planned entry
    pub async fn schedules_update_upcoming(
        &self,
        id: i32,
        data: &UpdateUpcomingSchedule,
    ) -> AppResult<UpcomingSchedule> {
        let now = Utc::now();
        let mut sets = vec!["modif_date = $1".to_string()];
        let mut idx = 2;

        if data.frequency.is_some() { sets.push(format!("frequency = ${}", idx)); idx += 1; }
        if data.scheduled_date.is_some() { sets.push(format!("scheduled_date = ${}", idx)); idx += 1; }
        if data.assigned_to.is_some() { sets.push(format!("assigned_to = ${}", idx)); idx += 1; }
        if data.notes.is_some() { sets.push(format!("notes = ${}", idx)); idx += 1; }

        let query = format!(
            "UPDATE upcoming_schedules SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, UpcomingSchedule>(&query).bind(now);
        if let Some(f) = data.frequency { builder = builder.bind(f); }
        if let Some(d) = data.scheduled_date { builder = builder.bind(d); }
        if let Some(a) = data.assigned_to { builder = builder.bind(a); }
        if let Some(ref n) = data.notes { builder = builder.bind(n); }

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Upcoming schedule {} not found", id)))
    }

    /// Delete a planned entry
    pub async fn schedules_delete_upcoming(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM upcoming_schedules WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Upcoming schedule {} not found", id)));
        }
        Ok(())
    }

    /// Completed checklists whose completion date falls in a range (reports)
    pub async fn schedules_completed_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<CompletedSchedule>> {
        self.schedules_list_completed(&CompletedScheduleQuery {
            start_date: Some(start),
            end_date: Some(end),
            ..Default::default()
        })
        .await
    }
}
