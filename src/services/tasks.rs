//! Maintenance task service; tasks are generated on every request

use chrono::{NaiveDate, Utc};

use crate::{
    config::MaintenanceConfig,
    error::AppResult,
    maintenance::{generate_fleet_tasks, generate_tasks},
    models::{
        equipment::{Equipment, EquipmentQuery},
        task::{MaintenanceTask, TaskQuery},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct TasksService {
    repository: Repository,
    config: MaintenanceConfig,
}

impl TasksService {
    pub fn new(repository: Repository, config: MaintenanceConfig) -> Self {
        Self { repository, config }
    }

    fn today(as_of: Option<NaiveDate>) -> NaiveDate {
        as_of.unwrap_or_else(|| Utc::now().date_naive())
    }

    /// Tasks across the fleet, optionally narrowed to one technician or status
    pub async fn list(&self, query: &TaskQuery) -> AppResult<Vec<MaintenanceTask>> {
        let equipment = self
            .repository
            .equipment_list(&EquipmentQuery {
                assigned_to: query.assigned_to,
                ..Default::default()
            })
            .await?;

        let mut tasks = self.for_fleet(&equipment, Self::today(query.as_of));
        if let Some(status) = query.status {
            tasks.retain(|t| t.status == status);
        }
        tracing::debug!(count = tasks.len(), "Maintenance tasks generated");
        Ok(tasks)
    }

    pub async fn for_equipment(&self, id: i32, as_of: Option<NaiveDate>) -> AppResult<Vec<MaintenanceTask>> {
        let equipment = self.repository.equipment_get_by_id(id).await?;
        Ok(generate_tasks(&equipment, Self::today(as_of), self.config.lookahead_days))
    }

    /// Generate tasks for already-fetched equipment
    pub fn for_fleet(&self, equipment: &[Equipment], today: NaiveDate) -> Vec<MaintenanceTask> {
        generate_fleet_tasks(equipment, today, self.config.lookahead_days)
    }
}
