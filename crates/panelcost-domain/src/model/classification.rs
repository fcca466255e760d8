//! Part classification sets (tinkering-eligible, R&R-eligible)

use std::collections::HashSet;

use panelcost_types::TableKind;

use super::canonical::canonicalize;

/// Immutable set of canonical part names
#[derive(Debug, Clone)]
pub struct PartClassification {
    kind: TableKind,
    parts: HashSet<String>,
}

impl PartClassification {
    /// Build from the values of a single-column part list; blank cells are skipped
    pub fn from_values<I, S>(kind: TableKind, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parts = values
            .into_iter()
            .map(|v| canonicalize(v.as_ref()))
            .filter(|v| !v.is_empty())
            .collect();
        Self { kind, parts }
    }

    pub fn tinkering<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_values(TableKind::Tinkering, values)
    }

    pub fn remove_refit<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_values(TableKind::RemoveRefit, values)
    }

    /// Membership test for an already canonical part name
    pub fn contains(&self, part: &str) -> bool {
        self.parts.contains(part)
    }

    pub fn kind(&self) -> TableKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}
