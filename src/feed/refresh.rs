use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use utoipa::ToSchema;

use super::{FeedFetcher, FetchError};
use crate::catalog::{parse_element_sets, CatalogStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RefreshStatus {
    /// Data is inside the staleness window; nothing was fetched.
    Cached,
    /// At least one group was updated.
    Success,
    /// No group could be updated.
    Error,
}

/// Outcome of one refresh call, as served to clients.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RefreshReport {
    pub status: RefreshStatus,
    pub updated_groups: Vec<String>,
    pub total_satellites: usize,
    pub errors: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// Staleness-gated feed refresher.
///
/// At most one refresh runs at a time. The staleness check reads
/// `last_success` without touching the refresh mutex, so callers inside
/// the window return immediately even while a refresh is in flight.
pub struct RefreshScheduler {
    catalog: Arc<CatalogStore>,
    fetcher: FeedFetcher,
    cache_max_age: chrono::Duration,
    last_success: RwLock<Option<DateTime<Utc>>>,
    refresh_lock: Mutex<()>,
}

impl RefreshScheduler {
    pub fn new(catalog: Arc<CatalogStore>, fetcher: FeedFetcher, cache_max_age: Duration) -> Self {
        Self {
            catalog,
            fetcher,
            cache_max_age: chrono::Duration::from_std(cache_max_age)
                .unwrap_or(chrono::Duration::MAX),
            last_success: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn last_success(&self) -> Option<DateTime<Utc>> {
        *self.last_success.read().unwrap()
    }

    /// Refreshes all groups, or just `target`. Unknown targets are
    /// skipped. Per-group failures are collected; they never stop the
    /// remaining groups.
    pub async fn refresh(&self, target: Option<&str>, force: bool) -> RefreshReport {
        let now = Utc::now();

        if !force {
            if let Some(last) = *self.last_success.read().unwrap() {
                if now - last < self.cache_max_age {
                    return RefreshReport {
                        status: RefreshStatus::Cached,
                        updated_groups: Vec::new(),
                        total_satellites: self.catalog.total_satellites(),
                        errors: Vec::new(),
                        timestamp: now,
                    };
                }
            }
        }

        let _guard = self.refresh_lock.lock().await;

        let mut updated_groups = Vec::new();
        let mut errors = Vec::new();

        for spec in self.catalog.group_specs(target) {
            log::info!("Fetching element sets for {}...", spec.name);
            match self.fetcher.fetch_text(&spec.url).await {
                Ok(text) => {
                    let batch = parse_element_sets(&text);
                    if batch.rejected > 0 {
                        log::warn!(
                            "{} rejected element sets in group {}",
                            batch.rejected,
                            spec.key
                        );
                    }
                    let count = self.catalog.replace_group_members(&spec.key, batch.records);
                    log::info!("Loaded {count} satellites from {}", spec.key);
                    updated_groups.push(spec.key);
                }
                Err(e) => {
                    let message = match &e {
                        FetchError::Status(_) => format!("Failed to fetch {}: {e}", spec.key),
                        FetchError::Transport(_) => format!("Error fetching {}: {e}", spec.key),
                    };
                    log::error!("{message}");
                    errors.push(message);
                }
            }
        }

        if !updated_groups.is_empty() {
            *self.last_success.write().unwrap() = Some(now);
        }

        let status = if updated_groups.is_empty() {
            RefreshStatus::Error
        } else {
            RefreshStatus::Success
        };

        RefreshReport {
            status,
            updated_groups,
            total_satellites: self.catalog.total_satellites(),
            errors,
            timestamp: now,
        }
    }
}
