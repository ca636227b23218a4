//! Maintenance task due-date generator
//!
//! For each frequency tier the next due date is computed from the
//! equipment's last maintenance (or installation) date:
//! tiers of up to 30 days add days, longer tiers add whole months
//! (`round(days / 30)`), clamped to the end of shorter months.

use chrono::{Days, Months, NaiveDate};

use crate::models::{
    enums::MaintenanceFrequency,
    equipment::Equipment,
    task::{MaintenanceTask, TaskStatus},
};

/// Tiers at or below this length use day arithmetic
const DAY_BASED_MAX_DAYS: i64 = 30;

/// Date the schedule counts from
pub fn base_date(equipment: &Equipment) -> Option<NaiveDate> {
    equipment.last_maintenance.or(equipment.installation_date)
}

/// Next due date for one tier
pub fn due_date(base: NaiveDate, frequency: MaintenanceFrequency) -> Option<NaiveDate> {
    let days = frequency.days();
    if days <= DAY_BASED_MAX_DAYS {
        base.checked_add_days(Days::new(days as u64))
    } else {
        let months = (days as f64 / 30.0).round() as u32;
        base.checked_add_months(Months::new(months))
    }
}

/// `Overdue` iff the due date is strictly before `today`
pub fn classify(due: NaiveDate, today: NaiveDate) -> TaskStatus {
    if due < today {
        TaskStatus::Overdue
    } else {
        TaskStatus::Pending
    }
}

/// Stable task id for an (equipment, tier) pair
pub fn task_id(equipment_id: i32, frequency: MaintenanceFrequency) -> String {
    format!("{}-{}", equipment_id, frequency.display_name())
}

/// Whether a task due on `due` is reported on `today`.
///
/// Overdue tasks always are; pending ones only when they fall inside the
/// lookahead window, which is one tier period capped at `lookahead_days`.
fn within_window(
    due: NaiveDate,
    today: NaiveDate,
    frequency: MaintenanceFrequency,
    lookahead_days: i64,
) -> bool {
    let window = frequency.days().min(lookahead_days.max(0));
    (due - today).num_days() <= window
}

/// Generate the due and upcoming tasks of one piece of equipment
pub fn generate_tasks(
    equipment: &Equipment,
    today: NaiveDate,
    lookahead_days: i64,
) -> Vec<MaintenanceTask> {
    let Some(base) = base_date(equipment) else {
        tracing::debug!(equipment_id = equipment.id, "No maintenance base date, skipping task generation");
        return Vec::new();
    };

    MaintenanceFrequency::ALL
        .iter()
        .filter_map(|&frequency| {
            let due = due_date(base, frequency)?;
            if !within_window(due, today, frequency, lookahead_days) {
                return None;
            }
            Some(MaintenanceTask {
                id: task_id(equipment.id, frequency),
                equipment_id: equipment.id,
                equipment_name: equipment.name.clone(),
                frequency,
                due_date: due,
                status: classify(due, today),
                assigned_to: equipment.assigned_to,
                assigned_to_name: equipment.assigned_to_name.clone(),
            })
        })
        .collect()
}

/// Generate tasks across a fleet, soonest first
pub fn generate_fleet_tasks(
    equipment: &[Equipment],
    today: NaiveDate,
    lookahead_days: i64,
) -> Vec<MaintenanceTask> {
    let mut tasks: Vec<MaintenanceTask> = equipment
        .iter()
        .flat_map(|e| generate_tasks(e, today, lookahead_days))
        .collect();
    tasks.sort_by(|a, b| {
        a.due_date
            .cmp(&b.due_date)
            .then(a.equipment_id.cmp(&b.equipment_id))
            .then(a.frequency.cmp(&b.frequency))
    });
    tasks
}
