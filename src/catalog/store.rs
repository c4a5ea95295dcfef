use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use super::{resolve_name, ElementRecord, GroupSpec, SatelliteGroup};

/// Read view of one group: member records in feed order.
pub struct GroupSnapshot {
    pub key: String,
    pub name: String,
    pub members: Vec<Arc<ElementRecord>>,
    pub last_updated: Option<DateTime<Utc>>,
}

/// Listing view of one group: names only.
pub struct GroupOverview {
    pub key: String,
    pub name: String,
    pub member_names: Vec<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

struct CatalogInner {
    /// Feed groups in configuration order.
    groups: IndexMap<String, SatelliteGroup>,
    /// Union of all group members, name to record, in insertion order.
    index: IndexMap<String, Arc<ElementRecord>>,
}

/// Shared satellite catalog. Reads take the lock briefly; the only writer
/// is the feed refresh path via `replace_group_members`.
pub struct CatalogStore {
    inner: RwLock<CatalogInner>,
}

impl CatalogStore {
    pub fn new(specs: Vec<GroupSpec>) -> Self {
        let groups = specs
            .into_iter()
            .map(|spec| (spec.key.clone(), SatelliteGroup::new(spec)))
            .collect();
        Self {
            inner: RwLock::new(CatalogInner {
                groups,
                index: IndexMap::new(),
            }),
        }
    }

    /// Resolves a user-supplied name and returns the matching record.
    pub fn resolve_record(&self, query: &str) -> Option<Arc<ElementRecord>> {
        let inner = self.inner.read().unwrap();
        let names: Vec<&str> = inner.index.keys().map(String::as_str).collect();
        let resolved = resolve_name(query, &names)?;
        inner.index.get(resolved).cloned()
    }

    pub fn total_satellites(&self) -> usize {
        self.inner.read().unwrap().index.len()
    }

    /// All catalog names in insertion order.
    pub fn satellite_names(&self) -> Vec<String> {
        self.inner.read().unwrap().index.keys().cloned().collect()
    }

    pub fn group_count(&self) -> usize {
        self.inner.read().unwrap().groups.len()
    }

    /// Feed specs for a refresh: all groups, or just `target`. Unknown
    /// targets yield an empty list.
    pub fn group_specs(&self, target: Option<&str>) -> Vec<GroupSpec> {
        let inner = self.inner.read().unwrap();
        match target {
            Some(key) => inner
                .groups
                .get(key)
                .map(|g| vec![g.spec.clone()])
                .unwrap_or_default(),
            None => inner.groups.values().map(|g| g.spec.clone()).collect(),
        }
    }

    pub fn group_snapshot(&self, key: &str) -> Option<GroupSnapshot> {
        let inner = self.inner.read().unwrap();
        let group = inner.groups.get(key)?;
        let members = group
            .members
            .iter()
            .filter_map(|name| inner.index.get(name).cloned())
            .collect();
        Some(GroupSnapshot {
            key: group.spec.key.clone(),
            name: group.spec.name.clone(),
            members,
            last_updated: group.last_updated,
        })
    }

    pub fn group_overviews(&self) -> Vec<GroupOverview> {
        let inner = self.inner.read().unwrap();
        inner
            .groups
            .values()
            .map(|group| GroupOverview {
                key: group.spec.key.clone(),
                name: group.spec.name.clone(),
                member_names: group.members.clone(),
                last_updated: group.last_updated,
            })
            .collect()
    }

    pub fn group_overview(&self, key: &str) -> Option<GroupOverview> {
        let inner = self.inner.read().unwrap();
        inner.groups.get(key).map(|group| GroupOverview {
            key: group.spec.key.clone(),
            name: group.spec.name.clone(),
            member_names: group.members.clone(),
            last_updated: group.last_updated,
        })
    }

    /// Replaces a group's membership with a freshly parsed batch.
    ///
    /// The new records overwrite the index wholesale. Names the feed
    /// dropped are removed from the index unless another group still
    /// carries them. Returns the new member count.
    pub fn replace_group_members(
        &self,
        key: &str,
        records: IndexMap<String, Arc<ElementRecord>>,
    ) -> usize {
        let mut guard = self.inner.write().unwrap();
        let inner = &mut *guard;

        let Some(old_members) = inner.groups.get(key).map(|g| g.members.clone()) else {
            return 0;
        };

        let new_names: Vec<String> = records.keys().cloned().collect();

        for (name, record) in records {
            inner.index.insert(name, record);
        }

        let carried: HashSet<&String> = inner
            .groups
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .flat_map(|(_, g)| g.members.iter())
            .collect();

        for name in &old_members {
            if !new_names.contains(name) && !carried.contains(name) {
                inner.index.shift_remove(name);
            }
        }

        let count = new_names.len();
        if let Some(group) = inner.groups.get_mut(key) {
            group.members = new_names;
            group.last_updated = Some(Utc::now());
        }
        count
    }
}
