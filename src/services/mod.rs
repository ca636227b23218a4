//! Business logic services

pub mod breakdowns;
pub mod diaries;
pub mod equipment;
pub mod messages;
pub mod reports;
pub mod schedules;
pub mod stats;
pub mod tasks;
pub mod users;
pub mod vsds;

use crate::{config::MaintenanceConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub equipment: equipment::EquipmentService,
    pub vsds: vsds::VsdsService,
    pub breakdowns: breakdowns::BreakdownsService,
    pub schedules: schedules::SchedulesService,
    pub diaries: diaries::DiariesService,
    pub users: users::UsersService,
    pub messages: messages::MessagesService,
    pub tasks: tasks::TasksService,
    pub stats: stats::StatsService,
    pub reports: reports::ReportsService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, maintenance: MaintenanceConfig) -> Self {
        let tasks = tasks::TasksService::new(repository.clone(), maintenance);
        Self {
            equipment: equipment::EquipmentService::new(repository.clone()),
            vsds: vsds::VsdsService::new(repository.clone()),
            breakdowns: breakdowns::BreakdownsService::new(repository.clone()),
            schedules: schedules::SchedulesService::new(repository.clone()),
            diaries: diaries::DiariesService::new(repository.clone()),
            users: users::UsersService::new(repository.clone()),
            messages: messages::MessagesService::new(repository.clone()),
            stats: stats::StatsService::new(repository.clone(), tasks.clone()),
            reports: reports::ReportsService::new(repository.clone()),
            tasks,
            repository,
        }
    }

    /// Check that the database answers
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
