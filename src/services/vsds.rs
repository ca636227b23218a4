//! Variable-speed drive service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::vsd::{CreateVsd, UpdateVsd, Vsd},
    repository::Repository,
};

#[derive(Clone)]
pub struct VsdsService {
    repository: Repository,
}

impl VsdsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Vsd>> {
        self.repository.vsds_list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Vsd> {
        self.repository.vsds_get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateVsd) -> AppResult<Vsd> {
        data.validate()?;
        if self.repository.vsds_serial_exists(&data.serial_number, None).await? {
            return Err(AppError::Conflict(format!(
                "Serial number {} already exists",
                data.serial_number
            )));
        }
        let vsd = self.repository.vsds_create(data).await?;
        tracing::info!(vsd_id = vsd.id, "VSD created");
        Ok(vsd)
    }

    pub async fn update(&self, id: i32, data: &UpdateVsd) -> AppResult<Vsd> {
        data.validate()?;
        if let Some(ref serial) = data.serial_number {
            if self.repository.vsds_serial_exists(serial, Some(id)).await? {
                return Err(AppError::Conflict(format!("Serial number {} already exists", serial)));
            }
        }
        let vsd = self.repository.vsds_update(id, data).await?;
        tracing::info!(vsd_id = id, "VSD updated");
        Ok(vsd)
    }

    pub async fn assign(&self, id: i32, technician_id: Option<i32>) -> AppResult<Vsd> {
        let technician = match technician_id {
            Some(user_id) => Some(self.repository.users_get_by_id(user_id).await?),
            None => None,
        };
        let vsd = self
            .repository
            .vsds_update_assignment(id, technician.as_ref().map(|u| (u.id, u.name.as_str())))
            .await?;
        tracing::info!(vsd_id = id, technician_id = ?technician_id, "VSD assignment changed");
        Ok(vsd)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.vsds_delete(id).await?;
        tracing::info!(vsd_id = id, "VSD deleted");
        Ok(())
    }
}
