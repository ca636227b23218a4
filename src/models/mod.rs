//! Data models for Maintrack

pub mod breakdown;
pub mod diary;
pub mod enums;
pub mod equipment;
pub mod message;
pub mod report;
pub mod schedule;
pub mod signature;
pub mod task;
pub mod user;
pub mod vsd;

// Re-export commonly used types
pub use breakdown::Breakdown;
pub use diary::DailyDiary;
pub use enums::{
    BreakdownPriority, BreakdownStatus, EquipmentType, MaintenanceFrequency, UserRole, VsdStatus,
};
pub use equipment::Equipment;
pub use message::Message;
pub use schedule::{CompletedSchedule, UpcomingSchedule};
pub use signature::Signature;
pub use task::{MaintenanceTask, TaskStatus};
pub use user::{User, UserClaims, UserShort};
pub use vsd::Vsd;
