//! Equipment service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::Subsystem,
        equipment::{CreateEquipment, Equipment, EquipmentQuery, UpdateEquipment},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &EquipmentQuery) -> AppResult<Vec<Equipment>> {
        self.repository.equipment_list(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        self.repository.equipment_get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateEquipment) -> AppResult<Equipment> {
        data.validate()?;
        if let Some(vsd_id) = data.vsd_id {
            self.ensure_vsd_available(vsd_id, None).await?;
        }
        let equipment = self.repository.equipment_create(data).await?;
        tracing::info!(equipment_id = equipment.id, "Equipment created");
        Ok(equipment)
    }

    pub async fn update(&self, id: i32, data: &UpdateEquipment) -> AppResult<Equipment> {
        data.validate()?;
        if let Some(vsd_id) = data.vsd_id {
            self.ensure_vsd_available(vsd_id, Some(id)).await?;
        }
        let equipment = self.repository.equipment_update(id, data).await?;
        tracing::info!(equipment_id = id, "Equipment updated");
        Ok(equipment)
    }

    /// Replace the block of one subsystem in `specs`
    pub async fn update_specs(
        &self,
        id: i32,
        subsystem: Subsystem,
        specs: &serde_json::Value,
    ) -> AppResult<Equipment> {
        if !specs.is_object() {
            return Err(AppError::BadRequest(format!(
                "Specs for {} must be a JSON object",
                subsystem.key()
            )));
        }
        let equipment = self.repository.equipment_update_specs(id, subsystem, specs).await?;
        tracing::info!(equipment_id = id, subsystem = subsystem.key(), "Equipment specs updated");
        Ok(equipment)
    }

    /// Assign a technician (or clear the assignment with `None`)
    pub async fn assign(&self, id: i32, technician_id: Option<i32>) -> AppResult<Equipment> {
        let technician = match technician_id {
            Some(user_id) => Some(self.repository.users_get_by_id(user_id).await?),
            None => None,
        };
        let equipment = self
            .repository
            .equipment_update_assignment(id, technician.as_ref().map(|u| (u.id, u.name.as_str())))
            .await?;
        tracing::info!(equipment_id = id, technician_id = ?technician_id, "Equipment assignment changed");
        Ok(equipment)
    }

    /// Delete equipment and its linked VSD
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let vsd_id = self.repository.equipment_delete_with_vsd(id).await?;
        tracing::info!(equipment_id = id, vsd_id = ?vsd_id, "Equipment deleted");
        Ok(())
    }

    /// A VSD drives at most one piece of equipment
    async fn ensure_vsd_available(&self, vsd_id: i32, equipment_id: Option<i32>) -> AppResult<()> {
        self.repository.vsds_get_by_id(vsd_id).await?;
        if let Some(linked) = self.repository.equipment_get_by_vsd(vsd_id).await? {
            if Some(linked.id) != equipment_id {
                tracing::warn!(vsd_id, linked_to = linked.id, "VSD already linked");
                return Err(AppError::Conflict(format!(
                    "VSD {} is already linked to equipment {}",
                    vsd_id, linked.id
                )));
            }
        }
        Ok(())
    }
}
