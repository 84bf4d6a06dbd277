//! Ingestion configuration: sheet column layout and cell delimiter.
//!
//! Every field has a default matching the association-sheet layout:
//!
//!   col 0: incentive | 1: male label | 2: male count | 3: male summary |
//!   col 5: female label | 6: female count | 7: female summary
//!
//! A JSON config file only needs the fields it overrides.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};

/// Column positions of one categorized association group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupColumns {
    pub label: usize,
    pub count: usize,
    pub summary: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IngestConfig {
    pub incentive_column: usize,
    pub male: GroupColumns,
    pub female: GroupColumns,
    pub delimiter: char,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            incentive_column: 0,
            male: GroupColumns {
                label: 1,
                count: 2,
                summary: 3,
            },
            female: GroupColumns {
                label: 5,
                count: 6,
                summary: 7,
            },
            delimiter: '\t',
        }
    }
}

impl IngestConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Every column is used for exactly one purpose.
    pub fn validate(&self) -> Result<()> {
        let columns = [
            self.incentive_column,
            self.male.label,
            self.male.count,
            self.male.summary,
            self.female.label,
            self.female.count,
            self.female.summary,
        ];
        let unique: BTreeSet<usize> = columns.iter().copied().collect();
        if unique.len() != columns.len() {
            return Err(IngestError::InvalidConfig(format!(
                "column assignments overlap: {:?}",
                columns
            )));
        }
        if self.delimiter == '\n' || self.delimiter == '\r' {
            return Err(IngestError::InvalidConfig(
                "delimiter cannot be a line break".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(IngestConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_override() {
        let config = IngestConfig::from_json_str(r#"{"delimiter": ";"}"#).unwrap();
        assert_eq!(config.delimiter, ';');
        assert_eq!(config.female.count, 6);
    }

    #[test]
    fn test_overlap_rejected() {
        let json = r#"{"male": {"label": 0, "count": 2, "summary": 3}}"#;
        assert!(matches!(
            IngestConfig::from_json_str(json),
            Err(IngestError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_line_break_delimiter_rejected() {
        for delimiter in ['\n', '\r'] {
            let config = IngestConfig {
                delimiter,
                ..IngestConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(IngestError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(matches!(
            IngestConfig::from_json_str(r#"{"sheet": "Sheet1"}"#),
            Err(IngestError::Json(_))
        ));
    }
}
