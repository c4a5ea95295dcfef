use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use utoipa::ToSchema;

use super::{position_report, PositionReport};
use crate::catalog::GroupSnapshot;

/// Bounds for one constellation evaluation.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationLimits {
    /// How many members to evaluate, taken as a prefix in feed order.
    pub max_satellites: usize,
    /// Concurrent propagation tasks.
    pub max_workers: usize,
    /// Budget per satellite once a worker slot is held.
    pub task_timeout: Duration,
}

impl Default for EvaluationLimits {
    fn default() -> Self {
        Self {
            max_satellites: 50,
            max_workers: 10,
            task_timeout: Duration::from_secs(5),
        }
    }
}

/// Position report plus catalog number, as served in constellation views.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ConstellationEntry {
    #[serde(flatten)]
    pub position: PositionReport,
    pub norad_id: u32,
}

/// Per-satellite result of a constellation evaluation. Failures never
/// abort the batch; they are reported alongside the successes.
pub enum SatelliteOutcome {
    Position(ConstellationEntry),
    Failed { name: String, reason: String },
}

/// Evaluates positions for the first `max_satellites` members of a group
/// at one shared instant, with a bounded worker pool.
///
/// Outcomes arrive in completion order; callers needing a stable order
/// re-sort. A member that times out is abandoned (the blocking task may
/// still run to completion in the background) and reported as failed.
pub async fn evaluate_constellation(
    snapshot: &GroupSnapshot,
    timestamp: DateTime<Utc>,
    limits: EvaluationLimits,
) -> Vec<SatelliteOutcome> {
    let semaphore = Arc::new(Semaphore::new(limits.max_workers.max(1)));
    let mut tasks: JoinSet<SatelliteOutcome> = JoinSet::new();

    for record in snapshot.members.iter().take(limits.max_satellites) {
        let record = record.clone();
        let semaphore = semaphore.clone();
        let task_timeout = limits.task_timeout;

        tasks.spawn(async move {
            let _permit = semaphore.acquire_owned().await.unwrap();

            let name = record.name.clone();
            let norad_id = record.norad_id;
            let work = tokio::task::spawn_blocking(move || {
                position_report(&record, &record.name, timestamp)
            });

            match tokio::time::timeout(task_timeout, work).await {
                Ok(Ok(Ok(position))) => {
                    SatelliteOutcome::Position(ConstellationEntry { position, norad_id })
                }
                Ok(Ok(Err(e))) => SatelliteOutcome::Failed {
                    name,
                    reason: e.to_string(),
                },
                Ok(Err(join_err)) => SatelliteOutcome::Failed {
                    name,
                    reason: format!("task failed: {join_err}"),
                },
                Err(_) => SatelliteOutcome::Failed {
                    name,
                    reason: format!("timed out after {task_timeout:?}"),
                },
            }
        });
    }

    let mut outcomes = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(outcome) => {
                if let SatelliteOutcome::Failed { name, reason } = &outcome {
                    log::warn!("constellation member {name}: {reason}");
                }
                outcomes.push(outcome);
            }
            Err(e) => log::warn!("constellation task join failed: {e}"),
        }
    }
    outcomes
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::catalog::{parse_element_sets, CatalogStore, GroupSpec};

    fn snapshot_of(names: &[&str]) -> GroupSnapshot {
        let store = CatalogStore::new(vec![GroupSpec {
            key: "space_stations".into(),
            name: "Space Stations".into(),
            url: "https://feeds.test/stations".into(),
        }]);
        let mut feed = String::new();
        for name in names {
            feed.push_str(name);
            feed.push('\n');
            feed.push_str(
                "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927\n",
            );
            feed.push_str(
                "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537\n",
            );
        }
        store.replace_group_members("space_stations", parse_element_sets(&feed).records);
        store.group_snapshot("space_stations").unwrap()
    }

    fn near_epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2008, 9, 20, 13, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn evaluates_every_member_when_under_the_cap() {
        let snapshot = snapshot_of(&["ALPHA-1", "BRAVO-2", "CHARLIE-3"]);
        let limits = EvaluationLimits {
            max_satellites: 5,
            max_workers: 2,
            task_timeout: Duration::from_secs(30),
        };

        let outcomes = evaluate_constellation(&snapshot, near_epoch(), limits).await;

        assert_eq!(outcomes.len(), 3);
        let mut names: Vec<String> = outcomes
            .iter()
            .map(|o| match o {
                SatelliteOutcome::Position(entry) => entry.position.name.clone(),
                SatelliteOutcome::Failed { name, reason } => {
                    panic!("{name} failed: {reason}")
                }
            })
            .collect();
        names.sort();
        assert_eq!(names, ["ALPHA-1", "BRAVO-2", "CHARLIE-3"]);
    }

    #[tokio::test]
    async fn caps_evaluation_to_a_prefix_of_the_group() {
        let snapshot = snapshot_of(&["ALPHA-1", "BRAVO-2", "CHARLIE-3"]);
        let limits = EvaluationLimits {
            max_satellites: 2,
            ..EvaluationLimits::default()
        };

        let outcomes = evaluate_constellation(&snapshot, near_epoch(), limits).await;

        let mut names: Vec<String> = outcomes
            .iter()
            .map(|o| match o {
                SatelliteOutcome::Position(entry) => entry.position.name.clone(),
                SatelliteOutcome::Failed { name, .. } => name.clone(),
            })
            .collect();
        names.sort();
        assert_eq!(names, ["ALPHA-1", "BRAVO-2"]);
    }

    #[tokio::test]
    async fn empty_group_evaluates_to_nothing() {
        let snapshot = snapshot_of(&[]);
        let outcomes =
            evaluate_constellation(&snapshot, near_epoch(), EvaluationLimits::default()).await;
        assert!(outcomes.is_empty());
    }

    #[tokio::test]
    async fn timed_out_member_is_reported_failed_not_hung() {
        // A zero budget elapses before the cold blocking pool can run the
        // propagation, so the member must come back as a failure.
        let snapshot = snapshot_of(&["ALPHA-1"]);
        let limits = EvaluationLimits {
            max_satellites: 5,
            max_workers: 1,
            task_timeout: Duration::ZERO,
        };

        let outcomes = evaluate_constellation(&snapshot, near_epoch(), limits).await;

        assert_eq!(outcomes.len(), 1);
        match &outcomes[0] {
            SatelliteOutcome::Failed { name, reason } => {
                assert_eq!(name, "ALPHA-1");
                assert!(reason.contains("timed out"), "reason: {reason}");
            }
            SatelliteOutcome::Position(_) => panic!("expected a timeout failure"),
        }
    }

    #[tokio::test]
    async fn entries_flatten_the_position_report() {
        let snapshot = snapshot_of(&["ALPHA-1"]);
        let outcomes =
            evaluate_constellation(&snapshot, near_epoch(), EvaluationLimits::default()).await;

        let entry = match &outcomes[0] {
            SatelliteOutcome::Position(entry) => entry,
            SatelliteOutcome::Failed { name, reason } => panic!("{name} failed: {reason}"),
        };
        assert_eq!(entry.norad_id, 25544);

        let json = serde_json::to_value(entry).unwrap();
        assert_eq!(json["name"], "ALPHA-1");
        assert_eq!(json["norad_id"], 25544);
        assert!(json.get("position").is_none(), "report must serialize flat");
    }
}
