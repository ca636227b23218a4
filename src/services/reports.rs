//! Date-range report assembly

use crate::{
    error::{AppError, AppResult},
    maintenance::metrics,
    models::{
        breakdown::BreakdownQuery,
        diary::DailyDiaryQuery,
        report::{ReportQuery, ReportSummary},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct ReportsService {
    repository: Repository,
}

impl ReportsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Everything recorded between two dates (inclusive)
    pub async fn summary(&self, query: &ReportQuery) -> AppResult<ReportSummary> {
        if query.start_date > query.end_date {
            return Err(AppError::Validation("start_date must not be after end_date".to_string()));
        }

        let breakdowns = self
            .repository
            .breakdowns_list(&BreakdownQuery {
                start_date: Some(query.start_date),
                end_date: Some(query.end_date),
                ..Default::default()
            })
            .await?;
        let completed_schedules = self
            .repository
            .schedules_completed_between(query.start_date, query.end_date)
            .await?;
        let diaries = self
            .repository
            .diaries_list(&DailyDiaryQuery {
                start_date: Some(query.start_date),
                end_date: Some(query.end_date),
                is_finalised: None,
            })
            .await?;

        let totals = metrics::report_totals(&breakdowns, &completed_schedules, &diaries);
        tracing::info!(
            start_date = %query.start_date,
            end_date = %query.end_date,
            breakdowns = totals.breakdowns,
            schedules = totals.completed_schedules,
            diaries = totals.diaries,
            "Report summary assembled"
        );

        Ok(ReportSummary {
            start_date: query.start_date,
            end_date: query.end_date,
            totals,
            breakdowns,
            completed_schedules,
            diaries,
        })
    }
}
