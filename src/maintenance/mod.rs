//! Pure maintenance-domain computations (no I/O)

pub mod metrics;
pub mod tasks;

pub use tasks::{generate_fleet_tasks, generate_tasks};
