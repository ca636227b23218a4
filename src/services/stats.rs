//! Fleet statistics service

use chrono::Utc;

use crate::{
    error::AppResult,
    maintenance::metrics,
    models::{breakdown::BreakdownQuery, equipment::EquipmentQuery, report::FleetStats},
    repository::Repository,
};

use super::tasks::TasksService;

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
    tasks: TasksService,
}

impl StatsService {
    pub fn new(repository: Repository, tasks: TasksService) -> Self {
        Self { repository, tasks }
    }

    pub async fn get_stats(&self) -> AppResult<FleetStats> {
        let equipment = self.repository.equipment_list(&EquipmentQuery::default()).await?;
        let vsds = self.repository.vsds_list().await?;
        let breakdowns = self.repository.breakdowns_list(&BreakdownQuery::default()).await?;
        let tasks = self.tasks.for_fleet(&equipment, Utc::now().date_naive());

        Ok(metrics::fleet_stats(&equipment, &vsds, &breakdowns, &tasks))
    }
}
