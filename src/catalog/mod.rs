mod parser;
mod resolve;
mod store;
mod types;

pub use parser::{parse_element_sets, ParsedBatch};
pub use resolve::resolve_name;
pub use store::{CatalogStore, GroupOverview, GroupSnapshot};
pub use types::{default_groups, ElementRecord, GroupSpec, SatelliteGroup};
