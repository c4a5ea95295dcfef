use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::orbit::PropagatorState;

/// One parsed two-line element set, ready for propagation.
///
/// Records are immutable once built and shared as `Arc<ElementRecord>`
/// between the catalog index and in-flight evaluation tasks.
pub struct ElementRecord {
    /// Satellite name exactly as it appears in the feed.
    pub name: String,
    /// Catalog number from line 1, columns 3-7.
    pub norad_id: u32,
    pub line1: String,
    pub line2: String,
    pub propagator: PropagatorState,
}

/// A feed group definition: stable key, display name, source URL.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupSpec {
    pub key: String,
    pub name: String,
    pub url: String,
}

/// A feed group plus the names it currently contributes to the catalog.
///
/// `members` preserves feed order and is replaced wholesale on refresh,
/// never merged element by element.
pub struct SatelliteGroup {
    pub spec: GroupSpec,
    pub members: Vec<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl SatelliteGroup {
    pub fn new(spec: GroupSpec) -> Self {
        Self {
            spec,
            members: Vec::new(),
            last_updated: None,
        }
    }
}

/// The CelesTrak group set served by default. Overridable from config.
pub fn default_groups() -> Vec<GroupSpec> {
    let celestrak = |group: &str| {
        format!("https://celestrak.org/NORAD/elements/gp.php?GROUP={group}&FORMAT=tle")
    };
    vec![
        GroupSpec {
            key: "space_stations".into(),
            name: "Space Stations".into(),
            url: celestrak("stations"),
        },
        GroupSpec {
            key: "starlink".into(),
            name: "Starlink".into(),
            url: celestrak("starlink"),
        },
        GroupSpec {
            key: "galileo".into(),
            name: "Galileo".into(),
            url: celestrak("galileo"),
        },
        GroupSpec {
            key: "gps".into(),
            name: "GPS Operational".into(),
            url: celestrak("gps-ops"),
        },
        GroupSpec {
            key: "glonass".into(),
            name: "GLONASS Operational".into(),
            url: celestrak("glo-ops"),
        },
        GroupSpec {
            key: "weather".into(),
            name: "Weather Satellites".into(),
            url: celestrak("weather"),
        },
        GroupSpec {
            key: "active".into(),
            name: "Active Satellites".into(),
            url: celestrak("active"),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_groups_cover_the_standard_set() {
        let groups = default_groups();
        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(
            keys,
            [
                "space_stations",
                "starlink",
                "galileo",
                "gps",
                "glonass",
                "weather",
                "active"
            ]
        );
        for group in &groups {
            assert!(group.url.starts_with("https://celestrak.org/"));
            assert!(group.url.ends_with("&FORMAT=tle"));
        }
    }
}
