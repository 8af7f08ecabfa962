//! Grouping of parsed tables by realm/region scope

use std::collections::BTreeMap;

use crate::data::AuctionTable;

/// Parsed tables grouped by scope name, realms and regions held apart.
///
/// Tables within one scope keep their arrival order; scopes iterate in name
/// order, which makes output order deterministic.
#[derive(Debug, Default)]
pub struct ScopeBuckets {
    realms: BTreeMap<String, Vec<AuctionTable>>,
    regions: BTreeMap<String, Vec<AuctionTable>>,
}

impl ScopeBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route a table into the realm or region collection by its category
    pub fn insert(&mut self, table: AuctionTable) {
        let buckets = if table.category.is_region_data() {
            &mut self.regions
        } else {
            &mut self.realms
        };
        buckets.entry(table.scope.clone()).or_default().push(table);
    }

    /// Number of distinct realm scopes seen
    pub fn realm_count(&self) -> usize {
        self.realms.len()
    }

    /// Number of distinct region scopes seen
    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.realms.is_empty() && self.regions.is_empty()
    }

    /// Consume the collection, yielding `(scope, tables)` buckets: realm
    /// buckets first, then region buckets, each name-sorted.
    pub fn into_buckets(self) -> impl Iterator<Item = (String, Vec<AuctionTable>)> {
        self.realms.into_iter().chain(self.regions)
    }
}
