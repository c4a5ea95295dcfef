use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::{eci_to_geodetic, OrbitError};
use crate::catalog::ElementRecord;

/// Geodetic position of one satellite at one instant, as served to clients.
///
/// `name` is the catalog name the lookup resolved to, `requested_name` is
/// what the caller asked for. Angles are degrees.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PositionReport {
    pub name: String,
    pub requested_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude_km: f64,
    pub velocity_km_s: f64,
    pub timestamp: DateTime<Utc>,
}

/// Propagates `record` to `timestamp` and converts to a geodetic report.
///
/// An all-zero position vector from the propagator is reported as a
/// propagation fault rather than a point at the Earth's center.
pub fn position_report(
    record: &ElementRecord,
    requested_name: &str,
    timestamp: DateTime<Utc>,
) -> Result<PositionReport, OrbitError> {
    let prediction = record.propagator.propagate(timestamp)?;

    if prediction.position == [0.0, 0.0, 0.0] {
        return Err(OrbitError::Propagation(format!(
            "degenerate zero position for {}",
            record.name
        )));
    }

    let geo = eci_to_geodetic(prediction.position);
    let [vx, vy, vz] = prediction.velocity;

    Ok(PositionReport {
        name: record.name.clone(),
        requested_name: requested_name.to_string(),
        latitude: geo.latitude_rad.to_degrees(),
        longitude: geo.longitude_rad.to_degrees(),
        altitude_km: geo.altitude_km,
        velocity_km_s: (vx * vx + vy * vy + vz * vz).sqrt(),
        timestamp,
    })
}

/// Samples the orbit at `count` instants starting from `start`, `step`
/// apart. Instants the propagator rejects are skipped, so the result may
/// hold fewer than `count` points.
pub fn orbit_track(
    record: &ElementRecord,
    requested_name: &str,
    start: DateTime<Utc>,
    step: Duration,
    count: usize,
) -> Vec<PositionReport> {
    let mut cursor = start;
    let mut points = Vec::with_capacity(count);

    for _ in 0..count {
        match position_report(record, requested_name, cursor) {
            Ok(report) => points.push(report),
            Err(e) => log::debug!("skipping orbit sample for {} at {cursor}: {e}", record.name),
        }
        cursor += step;
    }

    points
}
