use std::sync::Arc;

use indexmap::IndexMap;

use crate::catalog::ElementRecord;
use crate::orbit::PropagatorState;

/// Outcome of parsing one feed: accepted records in feed order, plus the
/// number of three-line groups that were rejected.
pub struct ParsedBatch {
    pub records: IndexMap<String, Arc<ElementRecord>>,
    pub rejected: usize,
}

/// Parses feed text in fixed groups of three lines (name, line 1, line 2).
///
/// A malformed group is dropped and counted without aborting the batch; a
/// trailing partial group is ignored. Line 1 must start with `"1 "`, line 2
/// with `"2 "`, and columns 3-7 of line 1 must hold a numeric catalog
/// number. Element sets the propagator rejects are dropped the same way.
pub fn parse_element_sets(text: &str) -> ParsedBatch {
    let lines: Vec<&str> = text.trim().lines().collect();

    let mut records = IndexMap::new();
    let mut rejected = 0;

    for chunk in lines.chunks_exact(3) {
        let name = chunk[0].trim();
        let line1 = chunk[1].trim();
        let line2 = chunk[2].trim();

        if !line1.starts_with("1 ") || !line2.starts_with("2 ") {
            log::warn!("Rejected element set for {name}: bad line prefixes");
            rejected += 1;
            continue;
        }

        let norad_id = match line1.get(2..7).and_then(|s| s.trim().parse::<u32>().ok()) {
            Some(id) => id,
            None => {
                log::warn!("Rejected element set for {name}: invalid catalog number");
                rejected += 1;
                continue;
            }
        };

        let propagator =
            match PropagatorState::from_tle(Some(name.to_string()), line1, line2) {
                Ok(state) => state,
                Err(e) => {
                    log::warn!("Rejected element set for {name}: {e}");
                    rejected += 1;
                    continue;
                }
            };

        records.insert(
            name.to_string(),
            Arc::new(ElementRecord {
                name: name.to_string(),
                norad_id,
                line1: line1.to_string(),
                line2: line2.to_string(),
                propagator,
            }),
        );
    }

    ParsedBatch { records, rejected }
}
