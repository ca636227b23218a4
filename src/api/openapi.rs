//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{
    breakdowns, diaries, equipment, health, messages, reports, schedules, stats, tasks, users,
    vsds,
};

/// Registers the `bearer_auth` scheme referenced by the secured paths
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Maintrack API",
        version = "1.0.0",
        description = "Industrial equipment maintenance tracking REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::update_specs,
        equipment::update_assignment,
        equipment::delete_equipment,
        equipment::list_equipment_tasks,
        // VSDs
        vsds::list_vsds,
        vsds::get_vsd,
        vsds::create_vsd,
        vsds::update_vsd,
        vsds::update_vsd_assignment,
        vsds::delete_vsd,
        // Breakdowns
        breakdowns::list_breakdowns,
        breakdowns::get_breakdown,
        breakdowns::create_breakdown,
        breakdowns::update_breakdown,
        breakdowns::delete_breakdown,
        // Schedules
        schedules::list_completed,
        schedules::get_completed,
        schedules::create_completed,
        schedules::replace_completed,
        schedules::delete_completed,
        schedules::list_upcoming,
        schedules::create_upcoming,
        schedules::update_upcoming,
        schedules::delete_upcoming,
        // Diaries
        diaries::list_diaries,
        diaries::get_diary,
        diaries::create_diary,
        diaries::update_diary,
        diaries::delete_diary,
        diaries::sign_off_diary,
        diaries::finalise_diary,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        users::get_me,
        users::update_my_signature,
        users::update_my_pin,
        // Messages
        messages::send_message,
        messages::inbox,
        messages::sent,
        messages::unread_count,
        messages::get_message,
        messages::mark_read,
        messages::delete_message,
        // Tasks, stats, reports
        tasks::list_tasks,
        stats::get_stats,
        reports::get_summary,
    ),
    components(
        schemas(
            // Enums
            crate::models::enums::EquipmentType,
            crate::models::enums::Subsystem,
            crate::models::enums::VsdStatus,
            crate::models::enums::BreakdownPriority,
            crate::models::enums::BreakdownStatus,
            crate::models::enums::MaintenanceFrequency,
            crate::models::enums::ChecklistStatus,
            crate::models::enums::UserRole,
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::UpdateEquipment,
            crate::models::equipment::UpdateAssignment,
            // VSDs
            crate::models::vsd::Vsd,
            crate::models::vsd::CreateVsd,
            crate::models::vsd::UpdateVsd,
            // Breakdowns
            crate::models::breakdown::Breakdown,
            crate::models::breakdown::CreateBreakdown,
            crate::models::breakdown::UpdateBreakdown,
            // Schedules
            crate::models::signature::Signature,
            crate::models::schedule::ChecklistItem,
            crate::models::schedule::CompletedSchedule,
            crate::models::schedule::SaveCompletedSchedule,
            crate::models::schedule::UpcomingSchedule,
            crate::models::schedule::CreateUpcomingSchedule,
            crate::models::schedule::UpdateUpcomingSchedule,
            // Diaries
            crate::models::diary::ManpowerEntry,
            crate::models::diary::WorkItem,
            crate::models::diary::Delay,
            crate::models::diary::DailyDiary,
            crate::models::diary::CreateDailyDiary,
            crate::models::diary::UpdateDailyDiary,
            crate::models::diary::SignDiaryRequest,
            // Users
            crate::models::user::User,
            crate::models::user::UserResponse,
            crate::models::user::UserShort,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUser,
            crate::models::user::UpdateSignature,
            crate::models::user::UpdateSigningPin,
            // Messages
            crate::models::message::Message,
            crate::models::message::CreateMessage,
            crate::models::message::UnreadCountResponse,
            // Tasks, stats, reports
            crate::models::task::TaskStatus,
            crate::models::task::MaintenanceTask,
            crate::models::report::FleetStats,
            crate::models::report::ReportTotals,
            crate::models::report::ReportSummary,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "equipment", description = "Equipment register"),
        (name = "vsds", description = "Variable-speed drives"),
        (name = "breakdowns", description = "Breakdown reports"),
        (name = "schedules", description = "Completed checklists and planned maintenance"),
        (name = "diaries", description = "Daily diaries and their approval"),
        (name = "users", description = "User management"),
        (name = "messages", description = "Internal messaging"),
        (name = "tasks", description = "Generated maintenance tasks"),
        (name = "stats", description = "Fleet statistics"),
        (name = "reports", description = "Report data")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_document() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/equipment/{id}/specs/{subsystem}"));
        assert!(doc.paths.paths.contains_key("/diaries/{id}/finalise"));
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
