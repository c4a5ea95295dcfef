use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use super::{OrbitalEffects, TelemetrySnapshot};
use crate::orbit::PositionReport;

const INITIAL_FUEL_PERCENT: f64 = 85.0;

/// Synthesizes plausible subsystem telemetry driven by orbital effects.
///
/// Holds the noise RNG and the persistent fuel level, so one instance
/// serves the whole process and fuel only ever trends down.
pub struct TelemetrySynthesizer {
    rng: StdRng,
    fuel_level: f64,
}

impl TelemetrySynthesizer {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            fuel_level: INITIAL_FUEL_PERCENT,
        }
    }

    /// Snapshot for the current instant.
    pub fn synthesize(&mut self, position: Option<&PositionReport>) -> TelemetrySnapshot {
        self.synthesize_at(position, Utc::now())
    }

    /// Snapshot stamped with an arbitrary instant (historical replay).
    pub fn synthesize_at(
        &mut self,
        position: Option<&PositionReport>,
        timestamp: DateTime<Utc>,
    ) -> TelemetrySnapshot {
        let effects = position
            .map(OrbitalEffects::from_position)
            .unwrap_or_default();

        let eclipse_multiplier = if effects.eclipse_factor < 0.5 { 0.3 } else { 1.0 };

        // Battery discharges harder in shadow; the bus voltage sags a little.
        let battery_voltage = self.noisy(28.5 * (0.9 + 0.1 * eclipse_multiplier), 0.5);
        let battery_current = self.noisy(2.5 * (2.0 - eclipse_multiplier), 0.2);

        let solar_voltage = self.noisy(35.0 * effects.eclipse_factor, 2.0);
        let solar_current = self.noisy(8.5 * effects.eclipse_factor, 1.0);

        let temperature_internal =
            self.noisy(22.0 + (10.0 * effects.thermal_factor - 5.0), 2.0);
        let temperature_external =
            self.noisy(-45.0 + (30.0 * effects.thermal_factor - 15.0), 5.0);

        let cpu_base = 35.0 + self.rng_uniform(-10.0, 20.0);
        let cpu_usage = self.noisy(cpu_base, 5.0).clamp(10.0, 95.0);
        let memory_base = 65.0 + self.rng_uniform(-5.0, 10.0);
        let memory_usage = self.noisy(memory_base, 3.0).clamp(30.0, 90.0);
        // Disk fill moves slowly; a uniform wobble is enough.
        let disk_usage = (45.0 + self.rng_uniform(-1.0, 2.0)).clamp(20.0, 80.0);

        let signal_strength = self.noisy(-85.0 * effects.communication_factor, 5.0);
        let data_rate = self
            .noisy(2.5 * effects.communication_factor, 0.5)
            .max(0.1);

        let attitude_x = self.noisy(0.0, 0.5);
        let attitude_y = self.noisy(0.0, 0.5);
        let attitude_z = self.noisy(0.0, 0.5);
        let angular_velocity_x = self.noisy(0.1, 0.05);
        let angular_velocity_y = self.noisy(0.1, 0.05);
        let angular_velocity_z = self.noisy(0.1, 0.05);

        self.fuel_level = (self.fuel_level - self.rng_uniform(0.0, 0.001)).max(0.0);
        let reaction_wheel_speed = self.noisy(3000.0, 100.0);

        let system_health = system_health(battery_voltage, temperature_internal, cpu_usage);
        let power_balance = solar_voltage * solar_current - battery_voltage * battery_current;

        TelemetrySnapshot {
            battery_voltage,
            battery_current,
            solar_voltage,
            solar_current,
            temperature_internal,
            temperature_external,
            cpu_usage,
            memory_usage,
            disk_usage,
            signal_strength,
            data_rate,
            attitude_x,
            attitude_y,
            attitude_z,
            angular_velocity_x,
            angular_velocity_y,
            angular_velocity_z,
            thruster_fuel: self.fuel_level,
            reaction_wheel_speed,
            system_health,
            power_balance,
            timestamp,
        }
    }

    /// Gaussian white noise at 30% of the amplitude, plus a rare spike
    /// bounded by the full amplitude.
    fn noisy(&mut self, base: f64, amplitude: f64) -> f64 {
        let white: f64 = self.rng.sample::<f64, _>(StandardNormal) * amplitude * 0.3;
        let spike = if self.rng.gen::<f64>() < 0.05 {
            self.rng.gen_range(-amplitude..amplitude)
        } else {
            0.0
        };
        base + white + spike
    }

    fn rng_uniform(&mut self, low: f64, high: f64) -> f64 {
        self.rng.gen_range(low..high)
    }
}

/// Health rubric over the three monitored subsystems, 0-100.
fn system_health(battery_voltage: f64, temperature_internal: f64, cpu_usage: f64) -> f64 {
    let battery = if battery_voltage > 26.0 {
        1.0
    } else if battery_voltage > 24.0 {
        0.7
    } else {
        0.3
    };
    let thermal = if (-10.0..=35.0).contains(&temperature_internal) {
        1.0
    } else {
        0.5
    };
    let compute = if cpu_usage < 80.0 { 1.0 } else { 0.6 };

    (battery + thermal + compute) / 3.0 * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> TelemetrySynthesizer {
        TelemetrySynthesizer::with_rng(StdRng::seed_from_u64(42))
    }

    fn position(longitude: f64, altitude_km: f64) -> PositionReport {
        PositionReport {
            name: "ISS (ZARYA)".into(),
            requested_name: "ISS".into(),
            latitude: 0.0,
            longitude,
            altitude_km,
            velocity_km_s: 7.66,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn eclipse_starves_the_solar_array() {
        let eclipsed = seeded().synthesize(Some(&position(0.0, 420.0)));
        let sunlit = seeded().synthesize(Some(&position(180.0, 420.0)));

        assert!(
            eclipsed.solar_voltage < sunlit.solar_voltage,
            "eclipsed {} vs sunlit {}",
            eclipsed.solar_voltage,
            sunlit.solar_voltage
        );
        assert!(eclipsed.battery_current > sunlit.battery_current);
        assert!(eclipsed.power_balance < sunlit.power_balance);
    }

    #[test]
    fn fuel_never_rises_and_never_goes_negative() {
        let mut synthesizer = seeded();
        let mut previous = INITIAL_FUEL_PERCENT;

        for _ in 0..200 {
            let snapshot = synthesizer.synthesize(None);
            assert!(snapshot.thruster_fuel <= previous);
            assert!(snapshot.thruster_fuel >= 0.0);
            previous = snapshot.thruster_fuel;
        }
        assert!(previous < INITIAL_FUEL_PERCENT);
    }

    #[test]
    fn usage_figures_stay_clamped() {
        let mut synthesizer = seeded();
        let sunlit = position(180.0, 420.0);

        for _ in 0..300 {
            let snapshot = synthesizer.synthesize(Some(&sunlit));
            assert!((10.0..=95.0).contains(&snapshot.cpu_usage));
            assert!((30.0..=90.0).contains(&snapshot.memory_usage));
            assert!((20.0..=80.0).contains(&snapshot.disk_usage));
            assert!(snapshot.data_rate >= 0.1);
        }
    }

    #[test]
    fn no_position_means_nominal_sunlit_values() {
        let snapshot = seeded().synthesize(None);

        assert!((30.0..40.0).contains(&snapshot.solar_voltage));
        assert!(snapshot.signal_strength < -70.0);
        assert!((20.0..32.0).contains(&snapshot.temperature_internal));
    }

    #[test]
    fn snapshot_timestamp_is_caller_controlled() {
        use chrono::TimeZone;

        let at = Utc.with_ymd_and_hms(2024, 3, 1, 6, 30, 0).unwrap();
        let snapshot = seeded().synthesize_at(None, at);
        assert_eq!(snapshot.timestamp, at);
    }

    #[test]
    fn power_balance_matches_its_inputs() {
        let snapshot = seeded().synthesize(None);
        let expected = snapshot.solar_voltage * snapshot.solar_current
            - snapshot.battery_voltage * snapshot.battery_current;
        assert_eq!(snapshot.power_balance, expected);
    }

    #[test]
    fn health_rubric_scores_the_three_subsystems() {
        let close = |a: f64, b: f64| (a - b).abs() < 1e-9;

        assert!(close(system_health(28.0, 20.0, 50.0), 100.0));
        assert!(close(system_health(25.0, 20.0, 50.0), 90.0));
        assert!(close(system_health(23.0, 20.0, 50.0), 230.0 / 3.0));
        assert!(close(system_health(28.0, 50.0, 50.0), 250.0 / 3.0));
        assert!(close(system_health(28.0, 20.0, 85.0), 260.0 / 3.0));
        assert!(close(system_health(23.0, -20.0, 95.0), 140.0 / 3.0));
    }
}
