//! Equipment model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::EquipmentType;

/// Equipment record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    pub id: i32,
    pub name: String,
    pub equipment_type: EquipmentType,
    pub plant: Option<String>,
    pub division: Option<String>,
    pub location: Option<String>,
    /// Linked variable-speed drive
    pub vsd_id: Option<i32>,
    /// Pump head (m)
    pub pump_head: Option<f64>,
    /// Flow rate (m³/h)
    pub flow_rate: Option<f64>,
    /// Motor power (kW)
    pub motor_power: Option<f64>,
    /// Motor voltage (V)
    pub motor_voltage: Option<f64>,
    pub installation_date: Option<NaiveDate>,
    pub last_maintenance: Option<NaiveDate>,
    pub next_maintenance: Option<NaiveDate>,
    /// Uptime percentage (0-100)
    pub uptime: Option<f64>,
    /// Power consumption (kWh)
    pub power_consumption: Option<f64>,
    /// Assigned technician
    pub assigned_to: Option<i32>,
    pub assigned_to_name: Option<String>,
    /// Per-subsystem operating specs (pump, motor, gearbox, ...)
    #[schema(value_type = Object)]
    pub specs: serde_json::Value,
    pub notes: Option<String>,
    pub crea_date: Option<DateTime<Utc>>,
    pub modif_date: Option<DateTime<Utc>>,
}

/// Create equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEquipment {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub equipment_type: EquipmentType,
    pub plant: Option<String>,
    pub division: Option<String>,
    pub location: Option<String>,
    pub vsd_id: Option<i32>,
    pub pump_head: Option<f64>,
    pub flow_rate: Option<f64>,
    pub motor_power: Option<f64>,
    pub motor_voltage: Option<f64>,
    pub installation_date: Option<NaiveDate>,
    pub last_maintenance: Option<NaiveDate>,
    pub next_maintenance: Option<NaiveDate>,
    #[validate(range(min = 0.0, max = 100.0, message = "Uptime must be between 0 and 100"))]
    pub uptime: Option<f64>,
    #[validate(range(min = 0.0, message = "Power consumption cannot be negative"))]
    pub power_consumption: Option<f64>,
    pub notes: Option<String>,
}

/// Update equipment request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateEquipment {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    pub equipment_type: Option<EquipmentType>,
    pub plant: Option<String>,
    pub division: Option<String>,
    pub location: Option<String>,
    pub vsd_id: Option<i32>,
    pub pump_head: Option<f64>,
    pub flow_rate: Option<f64>,
    pub motor_power: Option<f64>,
    pub motor_voltage: Option<f64>,
    pub installation_date: Option<NaiveDate>,
    pub last_maintenance: Option<NaiveDate>,
    pub next_maintenance: Option<NaiveDate>,
    #[validate(range(min = 0.0, max = 100.0, message = "Uptime must be between 0 and 100"))]
    pub uptime: Option<f64>,
    #[validate(range(min = 0.0, message = "Power consumption cannot be negative"))]
    pub power_consumption: Option<f64>,
    pub notes: Option<String>,
}

/// Assign (or unassign with `null`) a technician
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAssignment {
    pub technician_id: Option<i32>,
}

/// Query parameters for equipment lists
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct EquipmentQuery {
    pub equipment_type: Option<EquipmentType>,
    pub plant: Option<String>,
    pub division: Option<String>,
    /// Only equipment assigned to this technician
    pub assigned_to: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(uptime: Option<f64>, power: Option<f64>) -> CreateEquipment {
        CreateEquipment {
            name: "Thickener underflow pump 2".to_string(),
            equipment_type: EquipmentType::Pump,
            plant: Some("Smelter".to_string()),
            division: None,
            location: None,
            vsd_id: None,
            pump_head: Some(42.0),
            flow_rate: None,
            motor_power: None,
            motor_voltage: None,
            installation_date: None,
            last_maintenance: None,
            next_maintenance: None,
            uptime,
            power_consumption: power,
            notes: None,
        }
    }

    #[test]
    fn test_uptime_range() {
        assert!(create(Some(99.5), None).validate().is_ok());
        assert!(create(Some(100.1), None).validate().is_err());
        assert!(create(Some(-1.0), None).validate().is_err());
    }

    #[test]
    fn test_negative_power_rejected() {
        assert!(create(None, Some(0.0)).validate().is_ok());
        assert!(create(None, Some(-3.0)).validate().is_err());
    }

    #[test]
    fn test_empty_update_is_valid() {
        assert!(UpdateEquipment::default().validate().is_ok());
    }
}
