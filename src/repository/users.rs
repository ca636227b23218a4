//! Users repository methods

use chrono::Utc;

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::user::{CreateUser, UpdateUser, User, UserQuery, UserShort},
};

impl Repository {
    /// Search users by name/email and role
    pub async fn users_search(&self, query: &UserQuery) -> AppResult<Vec<UserShort>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if query.name.is_some() {
            conditions.push(format!("(name ILIKE ${0} OR email ILIKE ${0})", idx));
            idx += 1;
        }
        if query.role.is_some() {
            conditions.push(format!("role = ${}", idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let select_q = format!(
            "SELECT id, name, role, department FROM users {} ORDER BY name",
            where_clause
        );
        let mut builder = sqlx::query_as::<_, UserShort>(&select_q);
        if let Some(ref name) = query.name { builder = builder.bind(format!("%{}%", name)); }
        if let Some(role) = query.role { builder = builder.bind(role); }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Get user by ID
    pub async fn users_get_by_id(&self, id: i32) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// Check if email already exists
    pub async fn users_email_exists(&self, email: &str, exclude_id: Option<i32>) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1) AND id != $2)")
                .bind(email)
                .bind(id)
                .fetch_one(&self.pool)
                .await?
        } else {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = LOWER($1))")
                .bind(email)
                .fetch_one(&self.pool)
                .await?
        };
        Ok(exists)
    }

    /// Create a user
    pub async fn users_create(&self, data: &CreateUser) -> AppResult<User> {
        let row = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, role, phone, department, employee_number, hire_date, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(data.role)
        .bind(&data.phone)
        .bind(&data.department)
        .bind(&data.employee_number)
        .bind(data.hire_date)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update a user (only provided fields)
    pub async fn users_update(&self, id: i32, data: &UpdateUser) -> AppResult<User> {
        let now = Utc::now();
        let mut sets = vec!["modif_date = $1".to_string()];
        let mut idx = 2;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.name, "name");
        add_field!(data.email, "email");
        add_field!(data.role, "role");
        add_field!(data.phone, "phone");
        add_field!(data.department, "department");
        add_field!(data.employee_number, "employee_number");
        add_field!(data.hire_date, "hire_date");
        add_field!(data.notes, "notes");

        let query = format!("UPDATE users SET {} WHERE id = ${} RETURNING *", sets.join(", "), idx);

        let mut builder = sqlx::query_as::<_, User>(&query).bind(now);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.email);
        bind_field!(data.role);
        bind_field!(data.phone);
        bind_field!(data.department);
        bind_field!(data.employee_number);
        bind_field!(data.hire_date);
        bind_field!(data.notes);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// Store a new signature image URL
    pub async fn users_update_signature(&self, id: i32, signature_url: &str) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET signature_url = $2, modif_date = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(signature_url)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// Store a new signing PIN hash
    pub async fn users_update_signing_pin(&self, id: i32, pin_hash: &str) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE users SET signing_pin_hash = $2, modif_date = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(pin_hash)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User with id {} not found", id)));
        }
        Ok(())
    }

    /// Delete a user; users referenced by reports or checklists are kept
    pub async fn users_delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db) = e {
                    // foreign_key_violation
                    if db.code().as_deref() == Some("23503") {
                        return AppError::Conflict(format!("User {} is referenced by existing records", id));
                    }
                }
                AppError::Database(e)
            })?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User with id {} not found", id)));
        }
        Ok(())
    }

    /// Count how many of the given user ids exist
    pub async fn users_count_existing(&self, ids: &[i32]) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = ANY($1)")
            .bind(ids)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
