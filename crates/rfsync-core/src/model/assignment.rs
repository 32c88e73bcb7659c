// ── Assignment rows and AP targets ──

use serde::{Deserialize, Serialize};

pub const NETWORK_NAME_COLUMN: &str = "Network Name";
pub const RF_PROFILES_COLUMN: &str = "RF Profiles";
pub const APS_COLUMN: &str = "APs";

/// The exact header set an assignment sheet must carry.
pub const ASSIGNMENT_COLUMNS: [&str; 3] = [NETWORK_NAME_COLUMN, RF_PROFILES_COLUMN, APS_COLUMN];

/// Sentinel: assign to every wireless AP in the network.
pub const ALL_APS: &str = "all";
/// Sentinel: assign to no AP.
pub const NO_APS: &str = "none";

/// One raw row of the assignment sheet, cells exactly as read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentRow {
    #[serde(rename = "Network Name")]
    pub network_name: String,
    /// Comma-joined profile names.
    #[serde(rename = "RF Profiles")]
    pub rf_profiles: String,
    /// Comma-joined AP serials, or a sentinel.
    #[serde(rename = "APs")]
    pub aps: String,
    /// 1-based line in the source file, when loaded from disk.
    #[serde(skip)]
    pub line: Option<u64>,
}

impl AssignmentRow {
    pub fn new(
        network_name: impl Into<String>,
        rf_profiles: impl Into<String>,
        aps: impl Into<String>,
    ) -> Self {
        Self {
            network_name: network_name.into(),
            rf_profiles: rf_profiles.into(),
            aps: aps.into(),
            line: None,
        }
    }

    /// Profile names, trimmed, in sheet order. Empty cells are dropped.
    pub fn profile_names(&self) -> Vec<String> {
        split_list(&self.rf_profiles)
    }

    /// AP targets, trimmed, in sheet order. Empty cells are dropped, so a
    /// blank `APs` column yields an empty list.
    pub fn ap_list(&self) -> Vec<String> {
        split_list(&self.aps)
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// What an AP list resolves to before any dashboard call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApTargets {
    /// Empty list, or a list led by the sentinel `none`.
    Nothing,
    /// A list led by the sentinel `all`.
    AllAccessPoints,
    /// Literal serials, in list order.
    Serials(Vec<String>),
}

impl ApTargets {
    /// Classify a trimmed AP list. A case-insensitive sentinel in first
    /// position decides for the whole list; entries after it are ignored.
    pub fn classify(aps: &[String]) -> Self {
        match aps.first() {
            None => Self::Nothing,
            Some(first) if first.eq_ignore_ascii_case(NO_APS) => Self::Nothing,
            Some(first) if first.eq_ignore_ascii_case(ALL_APS) => Self::AllAccessPoints,
            Some(_) => Self::Serials(aps.to_vec()),
        }
    }

    /// Entries a leading sentinel makes `classify` ignore.
    pub fn ignored(aps: &[String]) -> &[String] {
        match aps.split_first() {
            Some((first, rest))
                if first.eq_ignore_ascii_case(NO_APS) || first.eq_ignore_ascii_case(ALL_APS) =>
            {
                rest
            }
            _ => &[],
        }
    }

    pub fn is_nothing(&self) -> bool {
        matches!(self, Self::Nothing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn cells_are_split_and_trimmed() {
        let row = AssignmentRow::new("Branch-A", " legacy ,5ghz-boost", "AP100, AP101 ,");
        assert_eq!(row.profile_names(), list(&["legacy", "5ghz-boost"]));
        assert_eq!(row.ap_list(), list(&["AP100", "AP101"]));
        assert!(AssignmentRow::new("a", "p", "  ").ap_list().is_empty());
    }

    #[test]
    fn sentinels_are_classified() {
        assert_eq!(ApTargets::classify(&[]), ApTargets::Nothing);
        assert_eq!(ApTargets::classify(&list(&["None"])), ApTargets::Nothing);
        assert_eq!(ApTargets::classify(&list(&["ALL"])), ApTargets::AllAccessPoints);
        assert_eq!(
            ApTargets::classify(&list(&["AP1", "AP2"])),
            ApTargets::Serials(list(&["AP1", "AP2"]))
        );
    }

    #[test]
    fn leading_sentinel_decides_for_mixed_lists() {
        let none_first = list(&["none", "AP1"]);
        assert_eq!(ApTargets::classify(&none_first), ApTargets::Nothing);
        assert_eq!(ApTargets::ignored(&none_first), list(&["AP1"]));

        let all_first = list(&["All", "AP1", "AP2"]);
        assert_eq!(ApTargets::classify(&all_first), ApTargets::AllAccessPoints);
        assert_eq!(ApTargets::ignored(&all_first), list(&["AP1", "AP2"]));

        let serial_first = list(&["AP1", "none"]);
        assert_eq!(
            ApTargets::classify(&serial_first),
            ApTargets::Serials(list(&["AP1", "none"]))
        );
        assert!(ApTargets::ignored(&serial_first).is_empty());
    }
}
