//! Equipment domain methods on Repository

use chrono::{NaiveDate, Utc};
use sqlx::PgConnection;

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::{
        enums::Subsystem,
        equipment::{CreateEquipment, Equipment, EquipmentQuery, UpdateEquipment},
    },
};

impl Repository {
    /// List equipment with optional filters
    pub async fn equipment_list(&self, query: &EquipmentQuery) -> AppResult<Vec<Equipment>> {
        let mut conditions = Vec::new();
        let mut idx = 1;

        if query.equipment_type.is_some() {
            conditions.push(format!("equipment_type = ${}", idx));
            idx += 1;
        }
        if query.plant.is_some() {
            conditions.push(format!("plant = ${}", idx));
            idx += 1;
        }
        if query.division.is_some() {
            conditions.push(format!("division = ${}", idx));
            idx += 1;
        }
        if query.assigned_to.is_some() {
            conditions.push(format!("assigned_to = ${}", idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let select_q = format!("SELECT * FROM equipment {} ORDER BY name", where_clause);
        let mut builder = sqlx::query_as::<_, Equipment>(&select_q);
        if let Some(t) = query.equipment_type { builder = builder.bind(t); }
        if let Some(ref p) = query.plant { builder = builder.bind(p); }
        if let Some(ref d) = query.division { builder = builder.bind(d); }
        if let Some(a) = query.assigned_to { builder = builder.bind(a); }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows)
    }

    /// Get equipment by ID
    pub async fn equipment_get_by_id(&self, id: i32) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Find the equipment a VSD is linked to
    pub async fn equipment_get_by_vsd(&self, vsd_id: i32) -> AppResult<Option<Equipment>> {
        let row = sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE vsd_id = $1")
            .bind(vsd_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Create equipment
    pub async fn equipment_create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        let row = sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipment (
                name, equipment_type, plant, division, location, vsd_id,
                pump_head, flow_rate, motor_power, motor_voltage,
                installation_date, last_maintenance, next_maintenance,
                uptime, power_consumption, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(data.equipment_type)
        .bind(&data.plant)
        .bind(&data.division)
        .bind(&data.location)
        .bind(data.vsd_id)
        .bind(data.pump_head)
        .bind(data.flow_rate)
        .bind(data.motor_power)
        .bind(data.motor_voltage)
        .bind(data.installation_date)
        .bind(data.last_maintenance)
        .bind(data.next_maintenance)
        .bind(data.uptime)
        .bind(data.power_consumption)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| vsd_link_error(e, data.vsd_id))?;
        Ok(row)
    }

    /// Update equipment (only provided fields)
    pub async fn equipment_update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
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
        add_field!(data.equipment_type, "equipment_type");
        add_field!(data.plant, "plant");
        add_field!(data.division, "division");
        add_field!(data.location, "location");
        add_field!(data.vsd_id, "vsd_id");
        add_field!(data.pump_head, "pump_head");
        add_field!(data.flow_rate, "flow_rate");
        add_field!(data.motor_power, "motor_power");
        add_field!(data.motor_voltage, "motor_voltage");
        add_field!(data.installation_date, "installation_date");
        add_field!(data.last_maintenance, "last_maintenance");
        add_field!(data.next_maintenance, "next_maintenance");
        add_field!(data.uptime, "uptime");
        add_field!(data.power_consumption, "power_consumption");
        add_field!(data.notes, "notes");

        let query = format!(
            "UPDATE equipment SET {} WHERE id = ${} RETURNING *",
            sets.join(", "),
            idx
        );

        let mut builder = sqlx::query_as::<_, Equipment>(&query).bind(now);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.equipment_type);
        bind_field!(data.plant);
        bind_field!(data.division);
        bind_field!(data.location);
        bind_field!(data.vsd_id);
        bind_field!(data.pump_head);
        bind_field!(data.flow_rate);
        bind_field!(data.motor_power);
        bind_field!(data.motor_voltage);
        bind_field!(data.installation_date);
        bind_field!(data.last_maintenance);
        bind_field!(data.next_maintenance);
        bind_field!(data.uptime);
        bind_field!(data.power_consumption);
        bind_field!(data.notes);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| vsd_link_error(e, data.vsd_id))?
            .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Replace one subsystem block inside `specs`
    pub async fn equipment_update_specs(
        &self,
        id: i32,
        subsystem: Subsystem,
        specs: &serde_json::Value,
    ) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>(
            r#"
            UPDATE equipment
            SET specs = COALESCE(specs, '{}'::jsonb) || jsonb_build_object($2::text, $3::jsonb),
                modif_date = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(subsystem.key())
        .bind(specs)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Set or clear the assigned technician
    pub async fn equipment_update_assignment(
        &self,
        id: i32,
        technician: Option<(i32, &str)>,
    ) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>(
            r#"
            UPDATE equipment
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
        .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))
    }

    /// Delete equipment together with its linked VSD
    pub async fn equipment_delete_with_vsd(&self, id: i32) -> AppResult<Option<i32>> {
        let mut tx = self.pool.begin().await?;

        let vsd_id: Option<i32> = sqlx::query_scalar::<_, Option<i32>>(
            "DELETE FROM equipment WHERE id = $1 RETURNING vsd_id",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Equipment {} not found", id)))?;

        if let Some(vsd_id) = vsd_id {
            sqlx::query("DELETE FROM vsds WHERE id = $1")
                .bind(vsd_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(vsd_id)
    }
}

/// Move `last_maintenance` forward to `date` (never backwards)
pub(super) async fn advance_last_maintenance(
    conn: &mut PgConnection,
    id: i32,
    date: NaiveDate,
) -> AppResult<()> {
    sqlx::query(
        r#"
        UPDATE equipment
        SET last_maintenance = $2, modif_date = NOW()
        WHERE id = $1 AND (last_maintenance IS NULL OR last_maintenance < $2)
        "#,
    )
    .bind(id)
    .bind(date)
    .execute(conn)
    .await?;
    Ok(())
}

/// A VSD linked by a concurrent request trips `UNIQUE(vsd_id)`
fn vsd_link_error(e: sqlx::Error, vsd_id: Option<i32>) -> AppError {
    if let (sqlx::Error::Database(db), Some(vsd_id)) = (&e, vsd_id) {
        // unique_violation
        if db.code().as_deref() == Some("23505") {
            return AppError::Conflict(format!("VSD {} is already linked to other equipment", vsd_id));
        }
    }
    AppError::Database(e)
}
