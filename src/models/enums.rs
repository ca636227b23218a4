//! Shared domain enums, stored as Postgres enum types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// EquipmentType
// ---------------------------------------------------------------------------

/// Kind of plant equipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "equipment_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EquipmentType {
    Pump,
    Fan,
    Compressor,
    Drive,
    CircuitBreaker,
    Ups,
    Other,
}

impl EquipmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentType::Pump => "pump",
            EquipmentType::Fan => "fan",
            EquipmentType::Compressor => "compressor",
            EquipmentType::Drive => "drive",
            EquipmentType::CircuitBreaker => "circuit_breaker",
            EquipmentType::Ups => "ups",
            EquipmentType::Other => "other",
        }
    }
}

// ---------------------------------------------------------------------------
// Subsystem
// ---------------------------------------------------------------------------

/// Equipment subsystem with its own block of operating specs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Subsystem {
    Pump,
    Motor,
    Gearbox,
    Valve,
    Protection,
    Fan,
    Ups,
}

impl Subsystem {
    /// Key under which the subsystem is stored in `equipment.specs`
    pub fn key(&self) -> &'static str {
        match self {
            Subsystem::Pump => "pump",
            Subsystem::Motor => "motor",
            Subsystem::Gearbox => "gearbox",
            Subsystem::Valve => "valve",
            Subsystem::Protection => "protection",
            Subsystem::Fan => "fan",
            Subsystem::Ups => "ups",
        }
    }
}

// ---------------------------------------------------------------------------
// VsdStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "vsd_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VsdStatus {
    Active,
    Inactive,
    Maintenance,
}

impl VsdStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VsdStatus::Active => "active",
            VsdStatus::Inactive => "inactive",
            VsdStatus::Maintenance => "maintenance",
        }
    }
}

// ---------------------------------------------------------------------------
// Breakdowns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "breakdown_priority", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BreakdownPriority {
    Low,
    Medium,
    High,
    Critical,
}

impl BreakdownPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            BreakdownPriority::Low => "low",
            BreakdownPriority::Medium => "medium",
            BreakdownPriority::High => "high",
            BreakdownPriority::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "breakdown_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BreakdownStatus {
    Open,
    InProgress,
    Resolved,
}

impl BreakdownStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BreakdownStatus::Open => "open",
            BreakdownStatus::InProgress => "in_progress",
            BreakdownStatus::Resolved => "resolved",
        }
    }
}

// ---------------------------------------------------------------------------
// MaintenanceFrequency
// ---------------------------------------------------------------------------

/// Maintenance frequency tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "maintenance_frequency", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceFrequency {
    Weekly,
    Monthly,
    ThreeMonthly,
    SixMonthly,
    Yearly,
}

impl MaintenanceFrequency {
    /// All tiers, shortest first
    pub const ALL: [MaintenanceFrequency; 5] = [
        MaintenanceFrequency::Weekly,
        MaintenanceFrequency::Monthly,
        MaintenanceFrequency::ThreeMonthly,
        MaintenanceFrequency::SixMonthly,
        MaintenanceFrequency::Yearly,
    ];

    /// Nominal period of the tier in days
    pub fn days(&self) -> i64 {
        match self {
            MaintenanceFrequency::Weekly => 7,
            MaintenanceFrequency::Monthly => 30,
            MaintenanceFrequency::ThreeMonthly => 90,
            MaintenanceFrequency::SixMonthly => 180,
            MaintenanceFrequency::Yearly => 365,
        }
    }

    /// Name shown on checklists and used in task ids
    pub fn display_name(&self) -> &'static str {
        match self {
            MaintenanceFrequency::Weekly => "Weekly",
            MaintenanceFrequency::Monthly => "Monthly",
            MaintenanceFrequency::ThreeMonthly => "3-Monthly",
            MaintenanceFrequency::SixMonthly => "6-Monthly",
            MaintenanceFrequency::Yearly => "Yearly",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenanceFrequency::Weekly => "weekly",
            MaintenanceFrequency::Monthly => "monthly",
            MaintenanceFrequency::ThreeMonthly => "three_monthly",
            MaintenanceFrequency::SixMonthly => "six_monthly",
            MaintenanceFrequency::Yearly => "yearly",
        }
    }
}

impl std::fmt::Display for MaintenanceFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ---------------------------------------------------------------------------
// ChecklistStatus
// ---------------------------------------------------------------------------

/// Outcome recorded against one checklist line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistStatus {
    Ok,
    Defect,
    NotApplicable,
    Pending,
}

// ---------------------------------------------------------------------------
// UserRole
// ---------------------------------------------------------------------------

/// User role
///
/// Site roles are ordered: technician < supervisor < manager < admin < superadmin.
/// `ClientManager` sits outside that ladder and represents the client side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Technician,
    Supervisor,
    Manager,
    Admin,
    Superadmin,
    ClientManager,
}

impl UserRole {
    /// Rank on the site ladder; client roles have none
    pub fn rank(&self) -> Option<u8> {
        match self {
            UserRole::Technician => Some(0),
            UserRole::Supervisor => Some(1),
            UserRole::Manager => Some(2),
            UserRole::Admin => Some(3),
            UserRole::Superadmin => Some(4),
            UserRole::ClientManager => None,
        }
    }

    /// True when the role is at least `other` on the site ladder
    pub fn at_least(&self, other: UserRole) -> bool {
        match (self.rank(), other.rank()) {
            (Some(mine), Some(required)) => mine >= required,
            _ => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Technician => "technician",
            UserRole::Supervisor => "supervisor",
            UserRole::Manager => "manager",
            UserRole::Admin => "admin",
            UserRole::Superadmin => "superadmin",
            UserRole::ClientManager => "client_manager",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_ladder() {
        assert!(UserRole::Superadmin.at_least(UserRole::Admin));
        assert!(UserRole::Manager.at_least(UserRole::Supervisor));
        assert!(UserRole::Supervisor.at_least(UserRole::Supervisor));
        assert!(!UserRole::Technician.at_least(UserRole::Supervisor));
        assert!(!UserRole::ClientManager.at_least(UserRole::Technician));
    }

    #[test]
    fn test_frequency_serde_names() {
        let json = serde_json::to_string(&MaintenanceFrequency::ThreeMonthly).unwrap();
        assert_eq!(json, "\"three_monthly\"");
        let parsed: MaintenanceFrequency = serde_json::from_str("\"six_monthly\"").unwrap();
        assert_eq!(parsed, MaintenanceFrequency::SixMonthly);
    }

    #[test]
    fn test_frequency_tiers_are_ordered_by_period() {
        let days: Vec<i64> = MaintenanceFrequency::ALL.iter().map(|f| f.days()).collect();
        assert_eq!(days, vec![7, 30, 90, 180, 365]);
    }
}
