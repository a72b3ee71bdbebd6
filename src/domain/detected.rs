//! Components detected on disk, grouped by kind

use std::collections::HashSet;

use serde::Serialize;

use super::ComponentKind;

/// Ids of installed components found in a target directory, per kind.
///
/// All four buckets always exist; ids within a bucket are sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DetectedComponents {
    pub agents: Vec<String>,
    pub subagents: Vec<String>,
    pub skills: Vec<String>,
    pub commands: Vec<String>,
}

impl DetectedComponents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ids(&self, kind: ComponentKind) -> &[String] {
        match kind {
            ComponentKind::Agent => &self.agents,
            ComponentKind::Subagent => &self.subagents,
            ComponentKind::Skill => &self.skills,
            ComponentKind::Command => &self.commands,
        }
    }

    fn ids_mut(&mut self, kind: ComponentKind) -> &mut Vec<String> {
        match kind {
            ComponentKind::Agent => &mut self.agents,
            ComponentKind::Subagent => &mut self.subagents,
            ComponentKind::Skill => &mut self.skills,
            ComponentKind::Command => &mut self.commands,
        }
    }

    /// Replace the ids of a kind, keeping them sorted and unique
    pub fn set(&mut self, kind: ComponentKind, mut ids: Vec<String>) {
        ids.sort();
        ids.dedup();
        *self.ids_mut(kind) = ids;
    }

    pub fn push(&mut self, kind: ComponentKind, id: impl Into<String>) {
        let bucket = self.ids_mut(kind);
        bucket.push(id.into());
        bucket.sort();
        bucket.dedup();
    }

    /// Iterate `(kind, id)` pairs in kind order
    pub fn iter(&self) -> impl Iterator<Item = (ComponentKind, &str)> {
        ComponentKind::ALL
            .into_iter()
            .flat_map(move |kind| self.ids(kind).iter().map(move |id| (kind, id.as_str())))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.iter().any(|(_, candidate)| candidate == id)
    }

    /// Set of all ids regardless of kind
    pub fn all_ids(&self) -> HashSet<&str> {
        self.iter().map(|(_, id)| id).collect()
    }

    pub fn len(&self) -> usize {
        ComponentKind::ALL.iter().map(|k| self.ids(*k).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
