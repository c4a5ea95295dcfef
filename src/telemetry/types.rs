use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// One synthesized telemetry frame across every simulated subsystem.
/// Immutable once produced; serializes flat.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TelemetrySnapshot {
    pub battery_voltage: f64,
    pub battery_current: f64,
    pub solar_voltage: f64,
    pub solar_current: f64,
    pub temperature_internal: f64,
    pub temperature_external: f64,
    pub cpu_usage: f64,
    pub memory_usage: f64,
    pub disk_usage: f64,
    pub signal_strength: f64,
    pub data_rate: f64,
    pub attitude_x: f64,
    pub attitude_y: f64,
    pub attitude_z: f64,
    pub angular_velocity_x: f64,
    pub angular_velocity_y: f64,
    pub angular_velocity_z: f64,
    pub thruster_fuel: f64,
    pub reaction_wheel_speed: f64,
    /// Aggregate health score, 0-100.
    pub system_health: f64,
    /// Solar input minus battery draw, watts. Negative while eclipsed.
    pub power_balance: f64,
    pub timestamp: DateTime<Utc>,
}
