//! Association-sheet ingestion.
//!
//! Walks ragged rows and groups them into dictionary entries:
//!
//! - a non-empty incentive cell opens (or reopens) an entry
//! - a row with an empty incentive cell continues the open entry
//! - a blank row closes the open entry
//!
//! Each row contributes at most one `(label, count)` pair to each of the
//! two gender groups, taken from the group's label and count columns.

use std::collections::BTreeMap;

use assoc_graph::Count;
use tracing::{info, warn};

use crate::config::{GroupColumns, IngestConfig};
use crate::error::{IngestError, Result};
use crate::sheet::{cell, Row};

/// Grammatical gender of the associated words in a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    fn columns(self, config: &IngestConfig) -> &GroupColumns {
        match self {
            Gender::Male => &config.male,
            Gender::Female => &config.female,
        }
    }
}

/// One reaction word and how many respondents gave it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionCell {
    pub label: String,
    pub count: Count,
}

/// Reactions of one gender for one incentive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssociationGroup {
    /// Free-form summary cell from the entry's first row.
    pub summary: String,
    pub reactions: Vec<ReactionCell>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryEntry {
    pub incentive: String,
    pub male: Option<AssociationGroup>,
    pub female: Option<AssociationGroup>,
}

impl DictionaryEntry {
    fn new(incentive: &str) -> Self {
        Self {
            incentive: incentive.to_string(),
            male: None,
            female: None,
        }
    }

    pub fn group(&self, gender: Gender) -> Option<&AssociationGroup> {
        match gender {
            Gender::Male => self.male.as_ref(),
            Gender::Female => self.female.as_ref(),
        }
    }

    fn group_mut(&mut self, gender: Gender) -> &mut Option<AssociationGroup> {
        match gender {
            Gender::Male => &mut self.male,
            Gender::Female => &mut self.female,
        }
    }
}

/// Entries in document order, one per distinct incentive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssociationDictionary {
    entries: Vec<DictionaryEntry>,
    positions: BTreeMap<String, usize>,
}

impl AssociationDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, incentive: &str) -> Option<&DictionaryEntry> {
        self.positions.get(incentive).map(|&i| &self.entries[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DictionaryEntry> {
        self.entries.iter()
    }

    /// Position of `incentive`, opening a new entry on first sight.
    fn open(&mut self, incentive: &str) -> usize {
        if let Some(&i) = self.positions.get(incentive) {
            return i;
        }
        let i = self.entries.len();
        self.entries.push(DictionaryEntry::new(incentive));
        self.positions.insert(incentive.to_string(), i);
        i
    }
}

/// Group sheet rows into an association dictionary.
pub fn build_dictionary(rows: &[Row], config: &IngestConfig) -> Result<AssociationDictionary> {
    config.validate()?;
    let mut dict = AssociationDictionary::new();
    let mut current: Option<usize> = None;

    for (i, row) in rows.iter().enumerate() {
        let line = i + 1;
        if row.is_empty() {
            current = None;
            continue;
        }

        let (position, opening) = match cell(row, config.incentive_column) {
            Some(incentive) => (dict.open(incentive), true),
            None => (
                current.ok_or(IngestError::OrphanContinuation { row: line })?,
                false,
            ),
        };
        current = Some(position);

        let mut contributed = false;
        for gender in Gender::ALL {
            let columns = gender.columns(config);
            let Some(label) = cell(row, columns.label) else {
                continue;
            };
            let count = parse_count(cell(row, columns.count), line)?;
            let group = dict.entries[position]
                .group_mut(gender)
                .get_or_insert_with(AssociationGroup::default);
            if opening {
                if let Some(summary) = cell(row, columns.summary) {
                    group.summary = summary.to_string();
                }
            }
            group.reactions.push(ReactionCell {
                label: label.to_string(),
                count,
            });
            contributed = true;
        }

        if !contributed && !opening {
            warn!(row = line, "continuation row carries no reaction cells; skipped");
        }
    }

    info!(entries = dict.len(), rows = rows.len(), "association dictionary built");
    Ok(dict)
}

/// Integer cell in 0..=255. Integral floats (`"3.0"`) are accepted since
/// spreadsheet exports often write counts that way.
fn parse_count(value: Option<&str>, row: usize) -> Result<Count> {
    let raw = value.unwrap_or("");
    if let Ok(count) = raw.parse::<Count>() {
        return Ok(count);
    }
    match raw.parse::<f64>() {
        Ok(f) if f.fract() == 0.0 && (0.0..=255.0).contains(&f) => Ok(f as Count),
        _ => Err(IngestError::InvalidCount {
            row,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::parse_rows;

    fn rows(text: &str) -> Vec<Row> {
        parse_rows(text, '\t')
    }

    fn cells(group: &AssociationGroup) -> Vec<(&str, Count)> {
        group
            .reactions
            .iter()
            .map(|r| (r.label.as_str(), r.count))
            .collect()
    }

    #[test]
    fn test_entry_with_both_groups_and_continuations() {
        let sheet = rows(
            "house\thome\t5\t12\t\tcottage\t3\t9\n\
             \tbuilding\t2\n\
             \t\t\t\t\thut\t1\n",
        );
        let dict = build_dictionary(&sheet, &IngestConfig::default()).unwrap();
        let entry = dict.get("house").unwrap();

        let male = entry.male.as_ref().unwrap();
        assert_eq!(male.summary, "12");
        assert_eq!(cells(male), vec![("home", 5), ("building", 2)]);

        let female = entry.female.as_ref().unwrap();
        assert_eq!(female.summary, "9");
        assert_eq!(cells(female), vec![("cottage", 3), ("hut", 1)]);
    }

    #[test]
    fn test_male_only_entry() {
        let sheet = rows("sun\tlight\t4\t4\n");
        let dict = build_dictionary(&sheet, &IngestConfig::default()).unwrap();
        let entry = dict.get("sun").unwrap();
        assert!(entry.female.is_none());
        assert_eq!(cells(entry.male.as_ref().unwrap()), vec![("light", 4)]);
    }

    #[test]
    fn test_blank_row_closes_entry() {
        let sheet = rows("sun\tlight\t4\n\n\theat\t1\n");
        let err = build_dictionary(&sheet, &IngestConfig::default()).unwrap_err();
        assert!(matches!(err, IngestError::OrphanContinuation { row: 3 }));
    }

    #[test]
    fn test_repeated_incentive_reopens_entry() {
        let sheet = rows("sun\tlight\t4\n\nmoon\tnight\t2\n\nsun\theat\t1\n");
        let dict = build_dictionary(&sheet, &IngestConfig::default()).unwrap();
        assert_eq!(dict.len(), 2);
        let incentives: Vec<&str> = dict.iter().map(|e| e.incentive.as_str()).collect();
        assert_eq!(incentives, vec!["sun", "moon"]);
        assert_eq!(
            cells(dict.get("sun").unwrap().male.as_ref().unwrap()),
            vec![("light", 4), ("heat", 1)]
        );
    }

    #[test]
    fn test_group_opened_on_continuation_has_empty_summary() {
        let sheet = rows("sun\tlight\t4\t4\n\t\t\t\t\tglow\t2\t6\n");
        let dict = build_dictionary(&sheet, &IngestConfig::default()).unwrap();
        let entry = dict.get("sun").unwrap();
        assert_eq!(entry.male.as_ref().unwrap().summary, "4");

        let female = entry.female.as_ref().unwrap();
        assert_eq!(female.summary, "");
        assert_eq!(cells(female), vec![("glow", 2)]);
    }

    #[test]
    fn test_reopened_entry_overwrites_summary() {
        let sheet = rows("sun\tlight\t4\t4\n\nsun\theat\t1\t9\n");
        let dict = build_dictionary(&sheet, &IngestConfig::default()).unwrap();
        let male = dict.get("sun").unwrap().male.as_ref().unwrap();
        assert_eq!(male.summary, "9");
        assert_eq!(cells(male), vec![("light", 4), ("heat", 1)]);
    }

    #[test]
    fn test_count_parsing() {
        assert_eq!(parse_count(Some("7"), 1).unwrap(), 7);
        assert_eq!(parse_count(Some("3.0"), 1).unwrap(), 3);
        assert!(matches!(
            parse_count(Some("256"), 4),
            Err(IngestError::InvalidCount { row: 4, .. })
        ));
        assert!(matches!(
            parse_count(Some("2.5"), 1),
            Err(IngestError::InvalidCount { .. })
        ));
        assert!(matches!(
            parse_count(None, 2),
            Err(IngestError::InvalidCount { row: 2, .. })
        ));
    }
}
