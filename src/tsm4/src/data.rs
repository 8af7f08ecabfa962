//! Data model for parsed AppData tables

use serde::Serialize;

/// Table kinds the AppHelper addon writes into the dump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DataCategory {
    RealmScanStat,
    RealmData,
    RealmHistorical,
    RegionHistorical,
    RegionStat,
    RegionSale,
}

impl DataCategory {
    /// Look up a category from its dump tag string
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "AUCTIONDB_REALM_SCAN_STAT" => Some(DataCategory::RealmScanStat),
            "AUCTIONDB_REALM_DATA" => Some(DataCategory::RealmData),
            "AUCTIONDB_REALM_HISTORICAL" => Some(DataCategory::RealmHistorical),
            "AUCTIONDB_REGION_HISTORICAL" => Some(DataCategory::RegionHistorical),
            "AUCTIONDB_REGION_STAT" => Some(DataCategory::RegionStat),
            "AUCTIONDB_REGION_SALE" => Some(DataCategory::RegionSale),
            _ => None,
        }
    }

    /// Get the tag string as it appears in the dump
    pub fn as_tag(&self) -> &'static str {
        match self {
            DataCategory::RealmScanStat => "AUCTIONDB_REALM_SCAN_STAT",
            DataCategory::RealmData => "AUCTIONDB_REALM_DATA",
            DataCategory::RealmHistorical => "AUCTIONDB_REALM_HISTORICAL",
            DataCategory::RegionHistorical => "AUCTIONDB_REGION_HISTORICAL",
            DataCategory::RegionStat => "AUCTIONDB_REGION_STAT",
            DataCategory::RegionSale => "AUCTIONDB_REGION_SALE",
        }
    }

    /// Whether this table is scoped to a region rather than a single realm
    pub fn is_region_data(&self) -> bool {
        matches!(
            self,
            DataCategory::RegionHistorical
                | DataCategory::RegionStat
                | DataCategory::RegionSale
        )
    }
}

/// One parsed table from the dump: a single `LoadData(...)` line.
///
/// Invariant: every row has exactly `columns.len()` values, checked at parse
/// time. Built once by the parser and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuctionTable {
    pub category: DataCategory,
    /// Realm or region name, depending on the category
    pub scope: String,
    /// Download timestamp recorded by the addon (unix seconds)
    pub captured_at: u64,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<u64>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_round_trip() {
        for tag in [
            "AUCTIONDB_REALM_SCAN_STAT",
            "AUCTIONDB_REALM_DATA",
            "AUCTIONDB_REALM_HISTORICAL",
            "AUCTIONDB_REGION_HISTORICAL",
            "AUCTIONDB_REGION_STAT",
            "AUCTIONDB_REGION_SALE",
        ] {
            let category = DataCategory::from_tag(tag).unwrap();
            assert_eq!(category.as_tag(), tag);
        }
    }

    #[test]
    fn test_unknown_tag_fails_lookup() {
        assert_eq!(DataCategory::from_tag("AUCTIONDB_REALM_SALE"), None);
        assert_eq!(DataCategory::from_tag(""), None);
        // tags are exact, not case-insensitive
        assert_eq!(DataCategory::from_tag("auctiondb_realm_data"), None);
    }

    #[test]
    fn test_region_classification() {
        assert!(!DataCategory::RealmScanStat.is_region_data());
        assert!(!DataCategory::RealmData.is_region_data());
        assert!(!DataCategory::RealmHistorical.is_region_data());
        assert!(DataCategory::RegionHistorical.is_region_data());
        assert!(DataCategory::RegionStat.is_region_data());
        assert!(DataCategory::RegionSale.is_region_data());
    }
}
