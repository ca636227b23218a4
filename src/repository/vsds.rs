//! VSD domain methods on Repository

use chrono::Utc;

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::{
        enums::VsdStatus,
        vsd::{CreateVsd, UpdateVsd, Vsd},
    },
};

impl Repository {
    /// List all VSDs
    pub async fn vsds_list(&self) -> AppResult<Vec<Vsd>> {
        let rows = sqlx::query_as::<_, Vsd>("SELECT * FROM vsds ORDER BY serial_number")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get a VSD by ID
    pub async fn vsds_get_by_id(&self, id: i32) -> AppResult<Vsd> {
        sqlx::query_as::<_, Vsd>("SELECT * FROM vsds WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("VSD {} not found", id)))
    }

    /// Check if a serial number is already registered
    pub async fn vsds_serial_exists(&self, serial: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM vsds WHERE serial_number = $1 AND ($2::int IS NULL OR id != $2))",
        )
        .bind(serial)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Create a VSD
    pub async fn vsds_create(&self, data: &CreateVsd) -> AppResult<Vsd> {
        let row = sqlx::query_as::<_, Vsd>(
            r#"
            INSERT INTO vsds (serial_number, model, install_date, status, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&data.serial_number)
        .bind(&data.model)
        .bind(data.install_date)
        .bind(data.status.unwrap_or(VsdStatus::Active))
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update a VSD (only provided fields)
    pub async fn vsds_update(&self, id: i32, data: &UpdateVsd) -> AppResult<Vsd> {
        let now = Utc::now();
        let mut sets = vec!["modif_date = $1".to_string()];
        let mut idx = 2;

        if data.serial_number.is_some() { sets.push(format!("serial_number = ${}", idx)); idx += 1; }
        if data.model.is_some() { sets.push(format!("model = ${}", idx)); idx += 1; }
        if data.install_date.is_some() { sets.push(format!("install_date = ${}", idx)); idx += 1; }
        if data.status.is_some() { sets.push(format!("status = ${}", idx)); idx += 1; }
        if data.notes.is_some() { sets.push(format!("notes = ${}", idx)); idx += 1; }

        let query = format!("UPDATE vsds SET {} WHERE id = ${} RETURNING *", sets.join(", "), idx);

        let mut builder = sqlx::query_as::<_, Vsd>(&query).bind(now);
        if let Some(ref serial) = data.serial_number { builder = builder.bind(serial); }
        if let Some(ref model) = data.model { builder = builder.bind(model); }
        if let Some(date) = data.install_date { builder = builder.bind(date); }
        if let Some(status) = data.status { builder = builder.bind(status); }
        if let Some(ref notes) = data.notes { builder = builder.bind(notes); }

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("VSD {} not found", id)))
    }

    /// Set or clear the assigned technician
    pub async fn vsds_update_assignment(&self, id: i32, technician: Option<(i32, &str)>) -> AppResult<Vsd> {
        sqlx::query_as::<_, Vsd>(
            r#"
            UPDATE vsds
            SET assigned_to = $2, assigned_to_name = $3, modif_date = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(technician.map(|(user_id, _)| user_id))
        .bind(technician.map(|(_, name)| name))
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("VSD {} not found", id)))
    }

    /// Delete a VSD (the equipment link is cleared by the foreign key)
    pub async fn vsds_delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM vsds WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("VSD {} not found", id)));
        }
        Ok(())
    }
}
