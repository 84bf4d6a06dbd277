//! Core value types shared by the graph and its callers.
//!
//! Pure data. Counts are exact small integers; 0 means "not observed".

use serde::{Deserialize, Serialize};

/// Number of times one reaction was recorded for one incentive.
pub type Count = u8;

/// One observed `(label, count)` association, as returned by lookups.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Association {
    pub label: String,
    pub count: Count,
}

impl Association {
    pub fn new(label: impl Into<String>, count: Count) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

impl<L: Into<String>> From<(L, Count)> for Association {
    fn from((label, count): (L, Count)) -> Self {
        Self::new(label, count)
    }
}
