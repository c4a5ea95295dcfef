mod fetcher;
mod refresh;

pub use fetcher::{FeedFetcher, FetchError};
pub use refresh::{RefreshReport, RefreshScheduler, RefreshStatus};
