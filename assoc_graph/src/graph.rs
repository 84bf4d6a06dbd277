//! Bipartite incidence graph: incentives (stimulus words) on one side,
//! reactions (response words) on the other, an exact count on every edge.
//!
//! Rows of the count matrix are incentives, columns are reactions. After
//! every successful `add` the matrix shape is exactly
//! `(incentive_count, reaction_count)`.

use std::collections::BTreeSet;
use std::fmt;

use tracing::{debug, trace};

use crate::domain::{Association, Count};
use crate::error::{GraphError, Result};
use crate::invariants::validate_invariants;
use crate::labels::LabelIndex;
use crate::matrix::CountMatrix;
use crate::sequence::Iter;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncidenceGraph {
    incentives: LabelIndex,
    reactions: LabelIndex,
    matrix: CountMatrix,
}

/// Validated, not yet applied, effect of one `add` call.
struct Addition {
    incentive: String,
    new_reactions: Vec<String>,
    placements: Vec<(usize, Count)>,
    width: usize,
}

impl IncidenceGraph {
    /// Empty graph: no incentives, no reactions, 0×0 matrix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `incentive` with its reaction counts.
    ///
    /// Reactions are taken in the order supplied. Unknown reaction labels
    /// receive the next free column indices in that order; every existing
    /// row is zero-extended to cover them. The new incentive gets the next
    /// row index.
    ///
    /// All-or-nothing: every check runs before the first mutation, so a
    /// failed call leaves the graph unchanged.
    pub fn add<L, I>(&mut self, incentive: impl Into<String>, reactions: I) -> Result<()>
    where
        L: Into<String>,
        I: IntoIterator<Item = (L, Count)>,
    {
        let addition = self.plan(incentive.into(), reactions)?;
        self.commit(addition);
        if cfg!(debug_assertions) {
            validate_invariants(self);
        }
        Ok(())
    }

    fn plan<L, I>(&self, incentive: String, reactions: I) -> Result<Addition>
    where
        L: Into<String>,
        I: IntoIterator<Item = (L, Count)>,
    {
        if self.incentives.contains(&incentive) {
            return Err(GraphError::DuplicateIncentive(incentive));
        }

        let mut seen: BTreeSet<String> = BTreeSet::new();
        let mut new_reactions = Vec::new();
        let mut placements = Vec::new();

        for (label, count) in reactions {
            let label = label.into();
            if !seen.insert(label.clone()) {
                return Err(GraphError::DuplicateReaction(label));
            }
            let column = match self.reactions.index_of(&label) {
                Some(column) => column,
                None => {
                    new_reactions.push(label);
                    self.reactions.len() + new_reactions.len() - 1
                }
            };
            placements.push((column, count));
        }

        Ok(Addition {
            incentive,
            width: self.reactions.len() + new_reactions.len(),
            new_reactions,
            placements,
        })
    }

    // The first add on an empty graph takes the same path: every reaction
    // is new, widening a 0×0 matrix to 0×k before the first row lands.
    fn commit(&mut self, addition: Addition) {
        let Addition {
            incentive,
            new_reactions,
            placements,
            width,
        } = addition;

        self.matrix.widen(new_reactions.len());
        for label in new_reactions.iter() {
            let column = self.reactions.push(label.clone());
            debug!(reaction = %label, column, "new reaction column");
        }

        let mut row = vec![0; width];
        for (column, count) in placements {
            row[column] = count;
        }
        self.matrix.push_row(&row);
        let row_index = self.incentives.push(incentive);

        debug!(
            incentive = self.incentives.label(row_index).unwrap_or_default(),
            row = row_index,
            new_columns = new_reactions.len(),
            shape = ?self.matrix.shape(),
            "incentive added"
        );
    }

    /// Observed reactions for `incentive`, in reaction-index order.
    /// Zero cells are omitted.
    pub fn lookup(&self, incentive: &str) -> Result<Vec<Association>> {
        let row = self
            .incentives
            .index_of(incentive)
            .ok_or_else(|| GraphError::UnknownIncentive(incentive.to_string()))?;
        trace!(incentive, row, "lookup");
        observed(&self.reactions, self.matrix.row(row)?)
    }

    /// Incentives that drew `reaction`, in incentive-index order.
    /// Zero cells are omitted.
    pub fn lookup_reverse(&self, reaction: &str) -> Result<Vec<Association>> {
        let column = self
            .reactions
            .index_of(reaction)
            .ok_or_else(|| GraphError::UnknownReaction(reaction.to_string()))?;
        trace!(reaction, column, "reverse lookup");
        observed(&self.incentives, self.matrix.column(column)?)
    }

    /// Raw count for one `(incentive, reaction)` pair; 0 if never observed.
    pub fn count(&self, incentive: &str, reaction: &str) -> Result<Count> {
        let row = self
            .incentives
            .index_of(incentive)
            .ok_or_else(|| GraphError::UnknownIncentive(incentive.to_string()))?;
        let column = self
            .reactions
            .index_of(reaction)
            .ok_or_else(|| GraphError::UnknownReaction(reaction.to_string()))?;
        self.matrix.get(row, column)
    }

    pub fn contains_incentive(&self, incentive: &str) -> bool {
        self.incentives.contains(incentive)
    }

    pub fn contains_reaction(&self, reaction: &str) -> bool {
        self.reactions.contains(reaction)
    }

    pub fn incentive_count(&self) -> usize {
        self.incentives.len()
    }

    pub fn reaction_count(&self) -> usize {
        self.reactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.incentives.is_empty()
    }

    /// Matrix shape `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        self.matrix.shape()
    }

    /// Incentive labels in row order.
    pub fn incentives(&self) -> Iter<'_, String> {
        self.incentives.iter()
    }

    /// Reaction labels in column order.
    pub fn reactions(&self) -> Iter<'_, String> {
        self.reactions.iter()
    }

    pub fn incentive_labels(&self) -> &LabelIndex {
        &self.incentives
    }

    pub fn reaction_labels(&self) -> &LabelIndex {
        &self.reactions
    }

    pub fn matrix(&self) -> &CountMatrix {
        &self.matrix
    }

    /// Diagnostic table: a header of reaction labels, then one line per
    /// incentive with its raw counts. Tab separated.
    pub fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.incentives.len() + 1);

        let mut header = String::new();
        for label in self.reactions.iter() {
            header.push('\t');
            header.push_str(label);
        }
        lines.push(header);

        for (row, label) in self.incentives.iter().enumerate() {
            let mut line = label.clone();
            for column in 0..self.reactions.len() {
                line.push('\t');
                let count = self.matrix.get(row, column).unwrap_or_default();
                line.push_str(&count.to_string());
            }
            lines.push(line);
        }

        lines.join("\n")
    }
}

impl fmt::Display for IncidenceGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Pair each positive count with the label at the same index.
fn observed(labels: &LabelIndex, counts: Vec<Count>) -> Result<Vec<Association>> {
    let mut out = Vec::new();
    for (index, count) in counts.into_iter().enumerate() {
        if count == 0 {
            continue;
        }
        let label = labels.label(index).ok_or(GraphError::IndexOutOfRange {
            index,
            len: labels.len(),
        })?;
        out.push(Association::new(label, count));
    }
    Ok(out)
}
