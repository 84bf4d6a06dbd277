//! Dictionary codec and graph builder.
//!
//! - `to_json`: dictionary → pretty UTF-8 JSON text in document order
//! - `export_to_file`: write that text, creating parent directories
//! - `dictionary_hash`: SHA-256 of the JSON text (lowercase hex)
//! - `build_graph`: feed one or both gender groups into an `IncidenceGraph`

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use assoc_graph::{Count, IncidenceGraph};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::error::{IngestError, Result};
use crate::ingest::{AssociationDictionary, AssociationGroup, DictionaryEntry, Gender};

// ---------------------------------------------------------------------------
// Encoder
// ---------------------------------------------------------------------------

/// JSON object keyed by incentive, in document order:
///
/// ```text
/// { "house": { "male": { "summary": "12", "reactions": [["home", 5]] },
///              "female": null } }
/// ```
pub fn to_json(dict: &AssociationDictionary) -> Result<String> {
    let mut root = Map::new();
    for entry in dict.iter() {
        root.insert(entry.incentive.clone(), entry_value(entry));
    }
    Ok(serde_json::to_string_pretty(&Value::Object(root))?)
}

fn entry_value(entry: &DictionaryEntry) -> Value {
    let mut map = Map::new();
    map.insert("male".to_string(), group_value(entry.male.as_ref()));
    map.insert("female".to_string(), group_value(entry.female.as_ref()));
    Value::Object(map)
}

fn group_value(group: Option<&AssociationGroup>) -> Value {
    let Some(group) = group else {
        return Value::Null;
    };
    let reactions = group
        .reactions
        .iter()
        .map(|r| Value::Array(vec![Value::String(r.label.clone()), Value::from(r.count)]))
        .collect();
    let mut map = Map::new();
    map.insert("summary".to_string(), Value::String(group.summary.clone()));
    map.insert("reactions".to_string(), Value::Array(reactions));
    Value::Object(map)
}

// ---------------------------------------------------------------------------
// File I/O
// ---------------------------------------------------------------------------

pub fn export_to_file(dict: &AssociationDictionary, path: &Path) -> Result<()> {
    let json = to_json(dict)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json.as_bytes())?;
    info!(path = %path.display(), entries = dict.len(), "dictionary exported");
    Ok(())
}

/// SHA-256 of the JSON text. Lowercase hex string.
pub fn dictionary_hash(dict: &AssociationDictionary) -> Result<String> {
    let json = to_json(dict)?;
    let digest = Sha256::digest(json.as_bytes());
    Ok(digest.iter().map(|b| format!("{:02x}", b)).collect())
}

// ---------------------------------------------------------------------------
// Graph building
// ---------------------------------------------------------------------------

/// Which gender groups contribute reactions to the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    Male,
    Female,
    #[default]
    Both,
}

impl Selection {
    fn genders(self) -> &'static [Gender] {
        match self {
            Selection::Male => &[Gender::Male],
            Selection::Female => &[Gender::Female],
            Selection::Both => &Gender::ALL,
        }
    }
}

impl FromStr for Selection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "male" => Ok(Selection::Male),
            "female" => Ok(Selection::Female),
            "both" => Ok(Selection::Both),
            other => Err(format!("unknown selection {:?}: expected male|female|both", other)),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Selection::Male => "male",
            Selection::Female => "female",
            Selection::Both => "both",
        };
        f.write_str(name)
    }
}

/// Add every entry that has a selected group to a fresh graph, in
/// document order. Counts of a reaction repeated within one incentive
/// are summed.
pub fn build_graph(dict: &AssociationDictionary, selection: Selection) -> Result<IncidenceGraph> {
    let mut graph = IncidenceGraph::new();
    let mut skipped = 0usize;

    for entry in dict.iter() {
        let groups: Vec<&AssociationGroup> = selection
            .genders()
            .iter()
            .filter_map(|&g| entry.group(g))
            .collect();
        if groups.is_empty() {
            debug!(incentive = %entry.incentive, %selection, "no selected group; skipped");
            skipped += 1;
            continue;
        }

        let reactions = merge_reactions(&entry.incentive, &groups)?;
        graph.add(entry.incentive.as_str(), reactions)?;
    }

    info!(
        incentives = graph.incentive_count(),
        reactions = graph.reaction_count(),
        skipped,
        %selection,
        "graph built from dictionary"
    );
    Ok(graph)
}

/// First-seen order, duplicate labels summed.
fn merge_reactions(incentive: &str, groups: &[&AssociationGroup]) -> Result<Vec<(String, Count)>> {
    let mut merged: Vec<(String, Count)> = Vec::new();
    for cell in groups.iter().flat_map(|g| g.reactions.iter()) {
        match merged.iter_mut().find(|(label, _)| *label == cell.label) {
            Some((_, count)) => {
                *count = count.checked_add(cell.count).ok_or_else(|| {
                    IngestError::CountOverflow {
                        incentive: incentive.to_string(),
                        reaction: cell.label.clone(),
                    }
                })?;
            }
            None => merged.push((cell.label.clone(), cell.count)),
        }
    }
    Ok(merged)
}
