//! Equivalence table row type.

use crate::Behavior;

/// One row of a histology or topography equivalence table.
///
/// `codes` is the row's primary column: its first entry is the row's NOS
/// (least specific) code. `subtypes` is the subtype/variant column.
///
/// # Examples
///
/// ```
/// use mph_types::{Behavior, TableRow};
///
/// let row = TableRow {
///     codes: vec!["8140".to_string()],
///     behaviors: vec![],
///     laterality: None,
///     subtypes: vec!["8480".to_string(), "8490".to_string()],
/// };
///
/// assert_eq!(row.nos_code(), Some("8140"));
/// assert!(row.admits_behavior(Behavior::InSitu));
/// assert!(row.contains("8490"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableRow {
    /// Codes in the primary (specific or NOS) column.
    pub codes: Vec<String>,
    /// Behaviors this row applies to (empty = any behavior).
    pub behaviors: Vec<Behavior>,
    /// Laterality-equivalence class for topography tables.
    pub laterality: Option<String>,
    /// Codes in the subtype/variant column.
    pub subtypes: Vec<String>,
}

impl TableRow {
    /// Returns the row's NOS code, the first entry of the primary column.
    pub fn nos_code(&self) -> Option<&str> {
        self.codes.first().map(String::as_str)
    }

    /// Returns true if the row places no restriction on `behavior`.
    pub fn admits_behavior(&self, behavior: Behavior) -> bool {
        self.behaviors.is_empty() || self.behaviors.contains(&behavior)
    }

    /// Returns true if `code` is in either column.
    pub fn contains(&self, code: &str) -> bool {
        self.codes.iter().any(|c| c == code) || self.is_subtype(code)
    }

    /// Returns true if `code` is in the subtype/variant column.
    pub fn is_subtype(&self, code: &str) -> bool {
        self.subtypes.iter().any(|c| c == code)
    }

    /// Iterates over every code in the row, primary column first.
    pub fn all_codes(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().chain(self.subtypes.iter()).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_behavior_restriction() {
        let row = TableRow {
            codes: vec!["8500".to_string()],
            behaviors: vec![Behavior::InSitu],
            ..Default::default()
        };
        assert!(row.admits_behavior(Behavior::InSitu));
        assert!(!row.admits_behavior(Behavior::Malignant));
    }

    #[test]
    fn test_all_codes_order() {
        let row = TableRow {
            codes: vec!["8720".to_string(), "8721".to_string()],
            subtypes: vec!["8742".to_string()],
            ..Default::default()
        };
        let codes: Vec<_> = row.all_codes().collect();
        assert_eq!(codes, vec!["8720", "8721", "8742"]);
        assert!(!row.is_subtype("8720"));
    }
}
