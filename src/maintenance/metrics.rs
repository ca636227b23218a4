//! Fleet metrics and report totals computed from fetched records

use std::collections::BTreeMap;

use crate::models::{
    breakdown::Breakdown,
    diary::DailyDiary,
    equipment::Equipment,
    report::{FleetStats, ReportTotals},
    schedule::CompletedSchedule,
    task::{MaintenanceTask, TaskStatus},
    vsd::Vsd,
};

fn tally<'a, I>(keys: I) -> BTreeMap<String, i64>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts = BTreeMap::new();
    for key in keys {
        *counts.entry(key.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Mean of the reported uptime values, `None` when nothing reports one
pub fn average_uptime(equipment: &[Equipment]) -> Option<f64> {
    let values: Vec<f64> = equipment.iter().filter_map(|e| e.uptime).collect();
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

pub fn total_power_consumption(equipment: &[Equipment]) -> f64 {
    equipment.iter().filter_map(|e| e.power_consumption).sum()
}

pub fn fleet_stats(
    equipment: &[Equipment],
    vsds: &[Vsd],
    breakdowns: &[Breakdown],
    tasks: &[MaintenanceTask],
) -> FleetStats {
    let overdue_tasks = tasks.iter().filter(|t| t.status == TaskStatus::Overdue).count() as i64;

    FleetStats {
        equipment_count: equipment.len() as i64,
        equipment_by_type: tally(equipment.iter().map(|e| e.equipment_type.as_str())),
        average_uptime: average_uptime(equipment),
        total_power_consumption: total_power_consumption(equipment),
        vsds_by_status: tally(vsds.iter().map(|v| v.status.as_str())),
        open_breakdowns_by_priority: tally(
            breakdowns
                .iter()
                .filter(|b| !b.is_resolved())
                .map(|b| b.priority.as_str()),
        ),
        overdue_tasks,
        pending_tasks: tasks.len() as i64 - overdue_tasks,
    }
}

pub fn report_totals(
    breakdowns: &[Breakdown],
    schedules: &[CompletedSchedule],
    diaries: &[DailyDiary],
) -> ReportTotals {
    let diaries_finalised = diaries.iter().filter(|d| d.is_finalised).count() as i64;

    ReportTotals {
        breakdowns: breakdowns.len() as i64,
        breakdowns_by_status: tally(breakdowns.iter().map(|b| b.status.as_str())),
        breakdowns_by_priority: tally(breakdowns.iter().map(|b| b.priority.as_str())),
        completed_schedules: schedules.len() as i64,
        schedules_by_frequency: tally(schedules.iter().map(|s| s.frequency.as_str())),
        checklist_defects: schedules.iter().map(|s| s.defect_count() as i64).sum(),
        diaries: diaries.len() as i64,
        diaries_finalised,
        diaries_pending: diaries.len() as i64 - diaries_finalised,
        man_hours: diaries.iter().map(|d| d.total_man_hours()).sum(),
        delay_minutes: diaries.iter().map(DailyDiary::total_delay_minutes).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        enums::{
            BreakdownPriority, BreakdownStatus, ChecklistStatus, EquipmentType,
            MaintenanceFrequency, VsdStatus,
        },
        schedule::ChecklistItem,
    };
    use chrono::NaiveDate;
    use sqlx::types::Json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn equipment(id: i32, kind: EquipmentType, uptime: Option<f64>, power: Option<f64>) -> Equipment {
        Equipment {
            id,
            name: format!("Unit {}", id),
            equipment_type: kind,
            plant: None,
            division: None,
            location: None,
            vsd_id: None,
            pump_head: None,
            flow_rate: None,
            motor_power: None,
            motor_voltage: None,
            installation_date: None,
            last_maintenance: None,
            next_maintenance: None,
            uptime,
            power_consumption: power,
            assigned_to: None,
            assigned_to_name: None,
            specs: serde_json::json!({}),
            notes: None,
            crea_date: None,
            modif_date: None,
        }
    }

    fn breakdown(id: i32, priority: BreakdownPriority, status: BreakdownStatus) -> Breakdown {
        Breakdown {
            id,
            equipment_id: 1,
            equipment_name: None,
            reported_by: 1,
            reporter_name: None,
            breakdown_date: date(2024, 7, 10),
            description: "Bearing overheating".to_string(),
            priority,
            status,
            resolution_notes: None,
            resolved_at: None,
            crea_date: None,
            modif_date: None,
        }
    }

    fn vsd(id: i32, status: VsdStatus) -> Vsd {
        Vsd {
            id,
            serial_number: format!("VSD-{}", id),
            model: None,
            install_date: None,
            status,
            assigned_to: None,
            assigned_to_name: None,
            notes: None,
            crea_date: None,
            modif_date: None,
        }
    }

    fn task(status: TaskStatus) -> MaintenanceTask {
        MaintenanceTask {
            id: "1-Weekly".to_string(),
            equipment_id: 1,
            equipment_name: "Unit 1".to_string(),
            frequency: MaintenanceFrequency::Weekly,
            due_date: date(2024, 7, 8),
            status,
            assigned_to: None,
            assigned_to_name: None,
        }
    }

    #[test]
    fn test_average_uptime_ignores_missing() {
        let fleet = vec![
            equipment(1, EquipmentType::Pump, Some(90.0), None),
            equipment(2, EquipmentType::Fan, None, None),
            equipment(3, EquipmentType::Fan, Some(80.0), None),
        ];
        assert_eq!(average_uptime(&fleet), Some(85.0));
        assert_eq!(average_uptime(&fleet[1..2]), None);
        assert_eq!(average_uptime(&[]), None);
    }

    #[test]
    fn test_total_power() {
        let fleet = vec![
            equipment(1, EquipmentType::Pump, None, Some(120.5)),
            equipment(2, EquipmentType::Compressor, None, Some(79.5)),
            equipment(3, EquipmentType::Ups, None, None),
        ];
        assert_eq!(total_power_consumption(&fleet), 200.0);
    }

    #[test]
    fn test_fleet_stats() {
        let fleet = vec![
            equipment(1, EquipmentType::Pump, Some(100.0), Some(10.0)),
            equipment(2, EquipmentType::Pump, Some(50.0), None),
            equipment(3, EquipmentType::CircuitBreaker, None, None),
        ];
        let vsds = vec![vsd(1, VsdStatus::Active), vsd(2, VsdStatus::Maintenance), vsd(3, VsdStatus::Active)];
        let breakdowns = vec![
            breakdown(1, BreakdownPriority::High, BreakdownStatus::Open),
            breakdown(2, BreakdownPriority::High, BreakdownStatus::InProgress),
            breakdown(3, BreakdownPriority::Low, BreakdownStatus::Resolved),
        ];
        let tasks = vec![task(TaskStatus::Overdue), task(TaskStatus::Pending), task(TaskStatus::Overdue)];

        let stats = fleet_stats(&fleet, &vsds, &breakdowns, &tasks);
        assert_eq!(stats.equipment_count, 3);
        assert_eq!(stats.equipment_by_type.get("pump"), Some(&2));
        assert_eq!(stats.equipment_by_type.get("circuit_breaker"), Some(&1));
        assert_eq!(stats.average_uptime, Some(75.0));
        assert_eq!(stats.total_power_consumption, 10.0);
        assert_eq!(stats.vsds_by_status.get("active"), Some(&2));
        assert_eq!(stats.open_breakdowns_by_priority.get("high"), Some(&2));
        assert_eq!(stats.open_breakdowns_by_priority.get("low"), None);
        assert_eq!(stats.overdue_tasks, 2);
        assert_eq!(stats.pending_tasks, 1);
    }

    #[test]
    fn test_report_totals() {
        let breakdowns = vec![
            breakdown(1, BreakdownPriority::Critical, BreakdownStatus::Resolved),
            breakdown(2, BreakdownPriority::Medium, BreakdownStatus::Open),
        ];
        let schedule = CompletedSchedule {
            id: 1,
            equipment_id: 1,
            equipment_name: None,
            frequency: MaintenanceFrequency::Monthly,
            category: "mechanical".to_string(),
            completed_date: date(2024, 7, 12),
            work_crew: Json(vec!["A. Nel".to_string()]),
            checklist: Json(vec![
                ChecklistItem { item: "Check coupling".to_string(), status: ChecklistStatus::Ok, comment: None },
                ChecklistItem {
                    item: "Inspect impeller".to_string(),
                    status: ChecklistStatus::Defect,
                    comment: Some("Worn vanes".to_string()),
                },
            ]),
            signatures: Json(vec![]),
            notes: None,
            completed_by: 2,
            crea_date: None,
            modif_date: None,
        };

        let totals = report_totals(&breakdowns, &[schedule], &[]);
        assert_eq!(totals.breakdowns, 2);
        assert_eq!(totals.breakdowns_by_status.get("resolved"), Some(&1));
        assert_eq!(totals.breakdowns_by_priority.get("critical"), Some(&1));
        assert_eq!(totals.completed_schedules, 1);
        assert_eq!(totals.schedules_by_frequency.get("monthly"), Some(&1));
        assert_eq!(totals.checklist_defects, 1);
        assert_eq!(totals.diaries, 0);
        assert_eq!(totals.man_hours, 0.0);
    }
}
