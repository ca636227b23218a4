//! Maintenance schedule service (completed checklists and planned entries)

use validator::Validate;

use crate::{
    error::AppResult,
    models::schedule::{
        CompletedSchedule, CompletedScheduleQuery, CreateUpcomingSchedule, SaveCompletedSchedule,
        UpcomingSchedule, UpcomingScheduleQuery, UpdateUpcomingSchedule,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct SchedulesService {
    repository: Repository,
}

impl SchedulesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list_completed(&self, query: &CompletedScheduleQuery) -> AppResult<Vec<CompletedSchedule>> {
        self.repository.schedules_list_completed(query).await
    }

    pub async fn get_completed(&self, id: i32) -> AppResult<CompletedSchedule> {
        self.repository.schedules_get_completed(id).await
    }

    /// Record a completed checklist and move the equipment's maintenance date forward
    pub async fn create_completed(
        &self,
        data: &SaveCompletedSchedule,
        completed_by: i32,
    ) -> AppResult<CompletedSchedule> {
        data.validate()?;
        let equipment = self.repository.equipment_get_by_id(data.equipment_id).await?;

        let schedule = self
            .repository
            .schedules_create_completed(data, &equipment.name, completed_by)
            .await?;

        tracing::info!(
            schedule_id = schedule.id,
            equipment_id = equipment.id,
            frequency = %schedule.frequency,
            defects = schedule.defect_count(),
            "Completed schedule recorded"
        );
        Ok(schedule)
    }

    /// Re-save: the whole checklist document is replaced
    pub async fn replace_completed(
        &self,
        id: i32,
        data: &SaveCompletedSchedule,
        completed_by: i32,
    ) -> AppResult<CompletedSchedule> {
        data.validate()?;
        let equipment = self.repository.equipment_get_by_id(data.equipment_id).await?;

        let schedule = self
            .repository
            .schedules_replace_completed(id, data, &equipment.name, completed_by)
            .await?;

        tracing::info!(schedule_id = id, "Completed schedule re-saved");
        Ok(schedule)
    }

    pub async fn delete_completed(&self, id: i32) -> AppResult<()> {
        self.repository.schedules_delete_completed(id).await?;
        tracing::info!(schedule_id = id, "Completed schedule deleted");
        Ok(())
    }

    pub async fn list_upcoming(&self, query: &UpcomingScheduleQuery) -> AppResult<Vec<UpcomingSchedule>> {
        self.repository.schedules_list_upcoming(query).await
    }

    pub async fn create_upcoming(&self, data: &CreateUpcomingSchedule) -> AppResult<UpcomingSchedule> {
        self.repository.equipment_get_by_id(data.equipment_id).await?;
        if let Some(user_id) = data.assigned_to {
            self.repository.users_get_by_id(user_id).await?;
        }
        let schedule = self.repository.schedules_create_upcoming(data).await?;
        tracing::info!(schedule_id = schedule.id, equipment_id = data.equipment_id, "Upcoming schedule created");
        Ok(schedule)
    }

    pub async fn update_upcoming(
        &self,
        id: i32,
        data: &UpdateUpcomingSchedule,
    ) -> AppResult<UpcomingSchedule> {
        if let Some(user_id) = data.assigned_to {
            self.repository.users_get_by_id(user_id).await?;
        }
        let schedule = self.repository.schedules_update_upcoming(id, data).await?;
        tracing::info!(schedule_id = id, "Upcoming schedule updated");
        Ok(schedule)
    }

    pub async fn delete_upcoming(&self, id: i32) -> AppResult<()> {
        self.repository.schedules_delete_upcoming(id).await?;
        tracing::info!(schedule_id = id, "Upcoming schedule deleted");
        Ok(())
    }
}
