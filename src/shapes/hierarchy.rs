use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::types::{MappingRow, SubcentreGroup};

/// Marker byte that leaks into PCTS name cells from the source spreadsheets.
pub const STOP_BYTE: u8 = 0xCA;

/// Strip the stop marker, lowercase and trim a group-key cell.
/// Missing and blank cells clean to `None`.
pub fn clean_key(raw: Option<&str>) -> Option<String> {
    let cleaned = raw?
        .replace(char::from(STOP_BYTE), "")
        .to_lowercase()
        .trim()
        .to_string();
    (!cleaned.is_empty()).then_some(cleaned)
}

/// Fold state for the ordered row scan.
#[derive(Debug, Default)]
struct Scan {
    groups: BTreeMap<String, SubcentreGroup>,
    open: Option<String>,
    villages: Vec<String>,
    dropped: usize,
}

impl Scan {
    fn step(mut self, row: &MappingRow) -> Self {
        let first = clean_key(row.first_key.as_deref());
        let second = clean_key(row.second_key.as_deref());

        if let Some(key) = first.or(second) {
            self = self.close();
            self.open = Some(key);
        }
        self.villages.push(row.village_id.clone());
        self
    }

    /// Store the open group (if any) and reset the village accumulator.
    /// Villages collected while no group was open are counted as dropped.
    fn close(mut self) -> Self {
        let mut villages = std::mem::take(&mut self.villages);
        match self.open.take() {
            Some(name) if !villages.is_empty() => {
                villages.sort();
                debug!(group = %name, villages = villages.len(), "closed group");
                let group = SubcentreGroup {
                    name: name.clone(),
                    villages,
                    geo_wkt: None,
                };
                if self.groups.insert(name.clone(), group).is_some() {
                    warn!(group = %name, "duplicate subcentre name, keeping the later rows");
                }
            }
            Some(_) => {}
            None => self.dropped += villages.len(),
        }
        self
    }

    fn finish(self) -> BTreeMap<String, SubcentreGroup> {
        let done = self.close();
        if done.dropped > 0 {
            warn!(rows = done.dropped, "rows before the first subcentre key were dropped");
        }
        done.groups
    }
}

/// Group villages under the most recent subcentre key in row order.
///
/// A row whose first or second key cell is non-empty after cleaning starts a
/// new group named by that cell (first wins); every row, the opening one
/// included, adds its village to the open group. Village lists are sorted.
/// Rows that come before any key belong to no group and are dropped.
pub fn build_groups(rows: &[MappingRow]) -> BTreeMap<String, SubcentreGroup> {
    rows.iter().fold(Scan::default(), Scan::step).finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn villages(groups: &BTreeMap<String, SubcentreGroup>, name: &str) -> Vec<String> {
        groups[name].villages.clone()
    }

    #[test]
    fn cleans_keys() {
        assert_eq!(clean_key(Some("  Asnawar ")), Some("asnawar".into()));
        assert_eq!(clean_key(Some("\u{ca}PHC Arain\u{ca}")), Some("phc arain".into()));
        assert_eq!(clean_key(Some("   ")), None);
        assert_eq!(clean_key(Some("\u{ca}")), None);
        assert_eq!(clean_key(None), None);
    }

    #[test]
    fn groups_trailing_rows_under_latest_key() {
        let rows = vec![
            MappingRow::new(Some("A"), Some(""), "v1"),
            MappingRow::new(Some(""), Some(""), "v2"),
            MappingRow::new(Some("B"), Some(""), "v3"),
        ];
        let groups = build_groups(&rows);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups["a"].name, "a");
        assert_eq!(villages(&groups, "a"), vec!["v1", "v2"]);
        assert_eq!(villages(&groups, "b"), vec!["v3"]);
        assert!(groups.values().all(|g| g.geo_wkt.is_none()));
    }

    #[test]
    fn first_key_wins_and_second_key_alone_opens_group() {
        let rows = vec![
            MappingRow::new(Some("PHC Arain"), Some("Asnawar"), "v1"),
            MappingRow::new(None, Some("Badipura"), "v2"),
            MappingRow::new(None, None, "v3"),
        ];
        let groups = build_groups(&rows);
        let names: Vec<_> = groups.keys().cloned().collect();
        assert_eq!(names, vec!["badipura", "phc arain"]);
        assert_eq!(villages(&groups, "badipura"), vec!["v2", "v3"]);
    }

    #[test]
    fn villages_are_sorted_including_last_group() {
        let rows = vec![
            MappingRow::new(Some("X"), None, "802"),
            MappingRow::new(None, None, "801"),
            MappingRow::new(Some("Y"), None, "905"),
            MappingRow::new(None, None, "903"),
            MappingRow::new(None, None, "904"),
        ];
        let groups = build_groups(&rows);
        assert_eq!(villages(&groups, "x"), vec!["801", "802"]);
        assert_eq!(villages(&groups, "y"), vec!["903", "904", "905"]);
    }

    #[test]
    fn rows_before_first_key_are_dropped() {
        crate::logging::init_test_logging();
        let rows = vec![
            MappingRow::new(None, None, "orphan1"),
            MappingRow::new(None, Some("  "), "orphan2"),
            MappingRow::new(Some("A"), None, "v1"),
        ];
        let groups = build_groups(&rows);
        assert_eq!(groups.len(), 1);
        assert_eq!(villages(&groups, "a"), vec!["v1"]);
    }

    #[test]
    fn no_keys_means_no_groups() {
        assert!(build_groups(&[]).is_empty());
        let rows = vec![MappingRow::new(None, None, "v1")];
        assert!(build_groups(&rows).is_empty());
    }

    #[test]
    fn repeated_key_replaces_earlier_group() {
        let rows = vec![
            MappingRow::new(Some("A"), None, "v1"),
            MappingRow::new(Some("B"), None, "v2"),
            MappingRow::new(Some(" a "), None, "v3"),
        ];
        let groups = build_groups(&rows);
        assert_eq!(villages(&groups, "a"), vec!["v3"]);
        assert_eq!(villages(&groups, "b"), vec!["v2"]);
    }

    #[test]
    fn consecutive_key_rows_each_form_a_group() {
        let rows = vec![
            MappingRow::new(Some("A"), None, "v1"),
            MappingRow::new(Some("B"), None, "v2"),
        ];
        let groups = build_groups(&rows);
        assert_eq!(villages(&groups, "a"), vec!["v1"]);
        assert_eq!(villages(&groups, "b"), vec!["v2"]);
    }
}
