//! Daily diary methods on Repository

use chrono::Utc;
use sqlx::types::Json;

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::{
        diary::{CreateDailyDiary, DailyDiary, DailyDiaryQuery, UpdateDailyDiary},
        signature::Signature,
    },
};

impl Repository {
    /// List diaries, newest first
    pub async fn diaries_list(&self, query: &DailyDiaryQuery) -> AppResult<Vec<DailyDiary>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if query.start_date.is_some() {
            conditions.push(format!("diary_date >= ${}", idx));
            idx += 1;
        }
        if query.end_date.is_some() {
            conditions.push(format!("diary_date <= ${}", idx));
            idx += 1;
        }
        if query.is_finalised.is_some() {
            conditions.push(format!("is_finalised = ${}", idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let select_q = format!(
            "SELECT * FROM daily_diaries {} ORDER BY diary_date DESC, id DESC",
            where_clause
        );
        let mut builder = sqlx::query_as::<_, DailyDiary>(&select_q);
        if let Some(sd) = query.start_date { builder = builder.bind(sd); }
        if let Some(ed) = query.end_date { builder = builder.bind(ed); }
        if let Some(f) = query.is_finalised { builder = builder.bind(f); }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Get a diary by ID
    pub async fn diaries_get_by_id(&self, id: i32) -> AppResult<DailyDiary> {
        sqlx::query_as::<_, DailyDiary>("SELECT * FROM daily_diaries WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Daily diary {} not found", id)))
    }

    /// Create a diary
    pub async fn diaries_create(&self, data: &CreateDailyDiary, created_by: i32) -> AppResult<DailyDiary> {
        let row = sqlx::query_as::<_, DailyDiary>(
            r#"
            INSERT INTO daily_diaries (
                diary_date, shift, contractor, manpower, work_items, delays, comments, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(data.diary_date)
        .bind(&data.shift)
        .bind(&data.contractor)
        .bind(Json(&data.manpower))
        .bind(Json(&data.work_items))
        .bind(Json(&data.delays))
        .bind(&data.comments)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update a diary (only provided fields)
    pub async fn diaries_update(&self, id: i32, data: &UpdateDailyDiary) -> AppResult<DailyDiary> {
        let now = Utc::now();
        let mut sets = vec!["modif_date = $1".to_string()];
        let mut idx = 2;

        if data.diary_date.is_some() { sets.push(format!("diary_date = ${}", idx)); idx += 1; }
        if data.shift.is_some() { sets.push(format!("shift = ${}", idx)); idx += 1; }
        if data.contractor.is_some() { sets.push(format!("contractor = ${}", idx)); idx += 1; }
        if data.manpower.is_some() { sets.push(format!("manpower = ${}", idx)); idx += 1; }
        if data.work_items.is_some() { sets.push(format!("work_items = ${}", idx)); idx += 1; }
        if data.delays.is_some() { sets.push(format!("delays = ${}", idx)); idx += 1; }
        if data.comments.is_some() { sets.push(format!("comments = ${}", idx)); idx += 1; }

        // Finalised diaries are read-only
        let query = format!(
            "UPDATE daily_diaries SET {} WHERE id = ${} AND is_finalised = FALSE RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, DailyDiary>(&query).bind(now);
        if let Some(d) = data.diary_date { builder = builder.bind(d); }
        if let Some(ref s) = data.shift { builder = builder.bind(s); }
        if let Some(ref c) = data.contractor { builder = builder.bind(c); }
        if let Some(ref m) = data.manpower { builder = builder.bind(Json(m)); }
        if let Some(ref w) = data.work_items { builder = builder.bind(Json(w)); }
        if let Some(ref d) = data.delays { builder = builder.bind(Json(d)); }
        if let Some(ref c) = data.comments { builder = builder.bind(c); }

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Open daily diary {} not found", id)))
    }

    /// Record the contractor signature
    pub async fn diaries_sign_off(&self, id: i32, signature: &Signature) -> AppResult<DailyDiary> {
        sqlx::query_as::<_, DailyDiary>(
            r#"
            UPDATE daily_diaries
            SET contractor_signature = $2, is_signed_off = TRUE, modif_date = NOW()
            WHERE id = $1 AND is_signed_off = FALSE
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(Json(signature))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::Conflict(format!("Daily diary {} is already signed off", id)))
    }

    /// Record the client signature and lock the diary
    pub async fn diaries_finalise(&self, id: i32, signature: &Signature) -> AppResult<DailyDiary> {
        sqlx::query_as::<_, DailyDiary>(
            r#"
            UPDATE daily_diaries
            SET client_signature = $2, is_finalised = TRUE, modif_date = NOW()
            WHERE id = $1 AND is_signed_off = TRUE AND is_finalised = FALSE
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(Json(signature))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::Conflict(format!("Daily diary {} cannot be finalised", id)))
    }

    /// Delete a diary that is not finalised
    pub async fn diaries_delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM daily_diaries WHERE id = $1 AND is_finalised = FALSE")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Open daily diary {} not found", id)));
        }
        Ok(())
    }
}
