//! Breakdown report service

use chrono::Utc;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        breakdown::{Breakdown, BreakdownQuery, CreateBreakdown, UpdateBreakdown},
        enums::BreakdownPriority,
        user::UserClaims,
    },
    repository::{breakdowns::NewBreakdown, Repository},
};

/// Reporters edit their own reports, managers edit any; resolved reports are frozen
pub fn check_editable(breakdown: &Breakdown, claims: &UserClaims) -> AppResult<()> {
    if breakdown.reported_by != claims.user_id && !claims.is_manager() {
        return Err(AppError::Authorization(
            "Only the reporter or a manager can edit this breakdown".to_string(),
        ));
    }
    if breakdown.is_resolved() {
        return Err(AppError::BusinessRule(format!(
            "Breakdown report {} is resolved and locked",
            breakdown.id
        )));
    }
    Ok(())
}

#[derive(Clone)]
pub struct BreakdownsService {
    repository: Repository,
}

impl BreakdownsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &BreakdownQuery) -> AppResult<Vec<Breakdown>> {
        self.repository.breakdowns_list(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Breakdown> {
        self.repository.breakdowns_get_by_id(id).await
    }

    /// File a report on behalf of the caller
    pub async fn create(&self, data: &CreateBreakdown, claims: &UserClaims) -> AppResult<Breakdown> {
        data.validate()?;
        let equipment = self.repository.equipment_get_by_id(data.equipment_id).await?;
        let reporter = self.repository.users_get_by_id(claims.user_id).await?;

        let breakdown = self
            .repository
            .breakdowns_create(&NewBreakdown {
                equipment_id: equipment.id,
                equipment_name: &equipment.name,
                reported_by: reporter.id,
                reporter_name: &reporter.name,
                breakdown_date: data.breakdown_date.unwrap_or_else(|| Utc::now().date_naive()),
                description: &data.description,
                priority: data.priority.unwrap_or(BreakdownPriority::Medium),
            })
            .await?;
        tracing::info!(
            breakdown_id = breakdown.id,
            equipment_id = equipment.id,
            priority = breakdown.priority.as_str(),
            "Breakdown reported"
        );
        Ok(breakdown)
    }

    pub async fn update(
        &self,
        id: i32,
        data: &UpdateBreakdown,
        claims: &UserClaims,
    ) -> AppResult<Breakdown> {
        data.validate()?;
        let current = self.repository.breakdowns_get_by_id(id).await?;
        if let Err(e) = check_editable(&current, claims) {
            tracing::warn!(breakdown_id = id, user_id = claims.user_id, "Breakdown edit rejected: {}", e);
            return Err(e);
        }
        let breakdown = self.repository.breakdowns_update(id, data).await?;
        tracing::info!(breakdown_id = id, status = breakdown.status.as_str(), "Breakdown updated");
        Ok(breakdown)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.breakdowns_delete(id).await?;
        tracing::info!(breakdown_id = id, "Breakdown deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::{BreakdownStatus, UserRole};
    use chrono::NaiveDate;

    fn breakdown(reported_by: i32, status: BreakdownStatus) -> Breakdown {
        Breakdown {
            id: 3,
            equipment_id: 7,
            equipment_name: Some("Cooling tower fan 1".to_string()),
            reported_by,
            reporter_name: None,
            breakdown_date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            description: "Bearing noise".to_string(),
            priority: BreakdownPriority::High,
            status,
            resolution_notes: None,
            resolved_at: None,
            crea_date: None,
            modif_date: None,
        }
    }

    fn claims(user_id: i32, role: UserRole) -> UserClaims {
        UserClaims {
            sub: format!("user{}", user_id),
            user_id,
            role,
            exp: 0,
            iat: 0,
        }
    }

    #[test]
    fn test_reporter_can_edit_open_report() {
        let report = breakdown(5, BreakdownStatus::Open);
        assert!(check_editable(&report, &claims(5, UserRole::Technician)).is_ok());
    }

    #[test]
    fn test_other_technician_cannot_edit() {
        let report = breakdown(5, BreakdownStatus::InProgress);
        let err = check_editable(&report, &claims(6, UserRole::Technician)).unwrap_err();
        assert!(matches!(err, AppError::Authorization(_)));
        assert!(check_editable(&report, &claims(6, UserRole::Manager)).is_ok());
    }

    #[test]
    fn test_resolved_report_locked_for_managers_too() {
        let report = breakdown(5, BreakdownStatus::Resolved);
        let err = check_editable(&report, &claims(1, UserRole::Superadmin)).unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(_)));
        let err = check_editable(&report, &claims(5, UserRole::Technician)).unwrap_err();
        assert!(matches!(err, AppError::BusinessRule(_)));
    }
}
