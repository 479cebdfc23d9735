use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Column roles: which columns feed the regression, and how
// ---------------------------------------------------------------------------

/// Tri-state tag marking a column's intended use in regression.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnRole {
    #[default]
    Unused,
    Independent,
    Dependent,
}

impl ColumnRole {
    /// Advance one step in the toggle cycle:
    /// Unused → Independent → Dependent → Unused.
    pub fn toggled(self) -> ColumnRole {
        match self {
            ColumnRole::Unused => ColumnRole::Independent,
            ColumnRole::Independent => ColumnRole::Dependent,
            ColumnRole::Dependent => ColumnRole::Unused,
        }
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ColumnRole::Unused => "Unused",
            ColumnRole::Independent => "Independent",
            ColumnRole::Dependent => "Dependent",
        };
        write!(f, "{s}")
    }
}

/// Explicit per-column role state, one entry per existing column.
///
/// A plain value owned by the caller, initialized from a dataset's column
/// list and kept in column order so the derived variable lists are stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleRegistry {
    roles: Vec<(String, ColumnRole)>,
}

impl RoleRegistry {
    /// Every column starts as [`ColumnRole::Unused`].
    pub fn new<S: AsRef<str>>(columns: &[S]) -> Self {
        RoleRegistry {
            roles: columns
                .iter()
                .map(|c| (c.as_ref().to_string(), ColumnRole::Unused))
                .collect(),
        }
    }

    /// Advance the role of `column` one step and return the new role.
    ///
    /// An unknown column is a defensive no-op returning `Unused`; normal use
    /// only toggles columns taken from the dataset header.
    pub fn toggle(&mut self, column: &str) -> ColumnRole {
        match self.roles.iter_mut().find(|(name, _)| name == column) {
            Some((_, role)) => {
                *role = role.toggled();
                *role
            }
            None => {
                log::warn!("toggle ignored: unknown column {column:?}");
                ColumnRole::Unused
            }
        }
    }

    /// Current role of `column` (`Unused` for unknown columns).
    pub fn role(&self, column: &str) -> ColumnRole {
        self.roles
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, role)| *role)
            .unwrap_or_default()
    }

    /// Derive the (independent, dependent) column-name lists, both in
    /// column order. More than one dependent column is legal; regression
    /// consumes only the first.
    pub fn variable_sets(&self) -> (Vec<String>, Vec<String>) {
        let pick = |wanted: ColumnRole| {
            self.roles
                .iter()
                .filter(|(_, role)| *role == wanted)
                .map(|(name, _)| name.clone())
                .collect::<Vec<_>>()
        };
        (pick(ColumnRole::Independent), pick(ColumnRole::Dependent))
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_cycles_through_all_three_roles() {
        let mut registry = RoleRegistry::new(&["a", "b"]);
        assert_eq!(registry.role("a"), ColumnRole::Unused);
        assert_eq!(registry.toggle("a"), ColumnRole::Independent);
        assert_eq!(registry.toggle("a"), ColumnRole::Dependent);
        assert_eq!(registry.toggle("a"), ColumnRole::Unused);
        // Untouched columns stay Unused.
        assert_eq!(registry.role("b"), ColumnRole::Unused);
    }

    #[test]
    fn toggle_unknown_column_is_a_no_op() {
        let mut registry = RoleRegistry::new(&["a"]);
        assert_eq!(registry.toggle("missing"), ColumnRole::Unused);
        assert_eq!(registry.role("a"), ColumnRole::Unused);
    }

    #[test]
    fn variable_sets_preserve_column_order() {
        let mut registry = RoleRegistry::new(&["a", "b", "c", "d"]);
        registry.toggle("d"); // Independent
        registry.toggle("a"); // Independent
        registry.toggle("b");
        registry.toggle("b"); // Dependent

        let (independent, dependent) = registry.variable_sets();
        assert_eq!(independent, ["a", "d"]);
        assert_eq!(dependent, ["b"]);
    }

    #[test]
    fn multiple_dependents_are_allowed() {
        let mut registry = RoleRegistry::new(&["a", "b"]);
        registry.toggle("a");
        registry.toggle("a");
        registry.toggle("b");
        registry.toggle("b");

        let (independent, dependent) = registry.variable_sets();
        assert!(independent.is_empty());
        assert_eq!(dependent, ["a", "b"]);
    }
}
