//! Histology equivalence table matching.
//!
//! Rules ask whether two histologies fall in the same row of a group's
//! table, whether one is the row's NOS code and the other a subtype, and
//! whether both are distinct subtypes of one row.

use mph_loader::{Column, HistologyTable};
use mph_types::{Behavior, HistologyMatching};

/// A histology code together with the behavior it was reported with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Morphology<'a> {
    /// Four-digit histology code.
    pub code: &'a str,
    /// Behavior of the tumor.
    pub behavior: Behavior,
}

impl<'a> Morphology<'a> {
    /// Creates a morphology.
    pub fn new(code: &'a str, behavior: Behavior) -> Self {
        Self { code, behavior }
    }
}

/// Where a code was found in a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowHit {
    /// Row index.
    pub index: usize,
    /// Column the code was found in.
    pub column: Column,
    /// True when matched through its three-digit family (lenient only).
    pub by_family: bool,
}

/// How two histologies relate within a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMatch {
    /// Both in the same row.
    Same,
    /// Both found, in different rows.
    Different,
    /// Exactly one was found.
    OneNotFound,
    /// Neither was found.
    NotFound,
}

/// Finds the row a histology belongs to.
///
/// A row's behavior restriction, when present, must admit the behavior.
/// Lenient matching falls back to the only row holding a code of the same
/// three-digit family.
pub fn row_of(table: &HistologyTable, morphology: Morphology<'_>, matching: HistologyMatching) -> Option<RowHit> {
    let admits = |index: usize| {
        table
            .row(index)
            .is_some_and(|row| row.admits_behavior(morphology.behavior))
    };

    if let Some((index, column)) = table.locate(morphology.code) {
        if admits(index) {
            return Some(RowHit {
                index,
                column,
                by_family: false,
            });
        }
    }

    if matching == HistologyMatching::Lenient {
        if let Some(index) = table.family_row_index(morphology.code) {
            if admits(index) {
                return Some(RowHit {
                    index,
                    column: Column::Subtype,
                    by_family: true,
                });
            }
        }
    }

    None
}

/// Compares the rows of two histologies.
///
/// When neither is in the table, identical codes still count as the same
/// row unless the code is listed in `nos_exceptions`.
pub fn same_row(
    table: &HistologyTable,
    first: Morphology<'_>,
    second: Morphology<'_>,
    matching: HistologyMatching,
    nos_exceptions: &[&str],
) -> RowMatch {
    match (row_of(table, first, matching), row_of(table, second, matching)) {
        (Some(a), Some(b)) if a.index == b.index => RowMatch::Same,
        (Some(_), Some(_)) => RowMatch::Different,
        (None, None) if first.code == second.code && !nos_exceptions.contains(&first.code) => {
            RowMatch::Same
        }
        (None, None) => RowMatch::NotFound,
        _ => RowMatch::OneNotFound,
    }
}

/// Returns true if one histology is the NOS code of a row and the other a
/// subtype of that same row.
pub fn is_nos_vs_subtype(
    table: &HistologyTable,
    first: Morphology<'_>,
    second: Morphology<'_>,
    matching: HistologyMatching,
) -> bool {
    let (Some(a), Some(b)) = (row_of(table, first, matching), row_of(table, second, matching)) else {
        return false;
    };
    if a.index != b.index {
        return false;
    }
    let Some(nos) = table.row(a.index).and_then(|row| row.nos_code()) else {
        return false;
    };

    (first.code == nos && b.column == Column::Subtype)
        || (second.code == nos && a.column == Column::Subtype)
}

/// Returns true if the histologies are two different subtypes listed in
/// the same row.
pub fn different_subtypes(
    table: &HistologyTable,
    first: Morphology<'_>,
    second: Morphology<'_>,
    matching: HistologyMatching,
) -> bool {
    if first.code == second.code {
        return false;
    }
    let is_listed_subtype = |hit: &RowHit| hit.column == Column::Subtype && !hit.by_family;

    match (row_of(table, first, matching), row_of(table, second, matching)) {
        (Some(a), Some(b)) => a.index == b.index && is_listed_subtype(&a) && is_listed_subtype(&b),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOS: &[&str] = &["8000", "8010"];

    fn table() -> HistologyTable {
        HistologyTable::from_text(
            "test",
            "codes,behavior,laterality,subtypes\n\
             8500,2 3,,8501 8502\n\
             8520,,,8521\n\
             8140,3,,8144\n",
        )
        .unwrap()
    }

    fn m(code: &str) -> Morphology<'_> {
        Morphology::new(code, Behavior::Malignant)
    }

    #[test]
    fn test_row_of_strict() {
        let t = table();
        let hit = row_of(&t, m("8501"), HistologyMatching::Strict).unwrap();
        assert_eq!(hit.index, 0);
        assert_eq!(hit.column, Column::Subtype);
        assert!(row_of(&t, m("8503"), HistologyMatching::Strict).is_none());
    }

    #[test]
    fn test_behavior_restriction() {
        let t = table();
        let in_situ = Morphology::new("8140", Behavior::InSitu);
        assert!(row_of(&t, in_situ, HistologyMatching::Strict).is_none());
        let in_situ = Morphology::new("8500", Behavior::InSitu);
        assert!(row_of(&t, in_situ, HistologyMatching::Strict).is_some());
    }

    #[test]
    fn test_lenient_family_fallback() {
        let t = table();
        // 852x only lives in the lobular row
        let hit = row_of(&t, m("8524"), HistologyMatching::Lenient).unwrap();
        assert_eq!(hit.index, 1);
        assert!(hit.by_family);
        assert!(row_of(&t, m("8524"), HistologyMatching::Strict).is_none());
    }

    #[test]
    fn test_same_row() {
        let t = table();
        assert_eq!(same_row(&t, m("8500"), m("8502"), HistologyMatching::Strict, NOS), RowMatch::Same);
        assert_eq!(same_row(&t, m("8500"), m("8520"), HistologyMatching::Strict, NOS), RowMatch::Different);
        assert_eq!(same_row(&t, m("8500"), m("8936"), HistologyMatching::Strict, NOS), RowMatch::OneNotFound);
        assert_eq!(same_row(&t, m("8936"), m("8890"), HistologyMatching::Strict, NOS), RowMatch::NotFound);
    }

    #[test]
    fn test_identical_codes_outside_table() {
        let t = table();
        assert_eq!(same_row(&t, m("8936"), m("8936"), HistologyMatching::Strict, NOS), RowMatch::Same);
        assert_eq!(same_row(&t, m("8000"), m("8000"), HistologyMatching::Strict, NOS), RowMatch::NotFound);
        assert_eq!(same_row(&t, m("8000"), m("8000"), HistologyMatching::Strict, &[]), RowMatch::Same);
    }

    #[test]
    fn test_nos_vs_subtype() {
        let t = table();
        assert!(is_nos_vs_subtype(&t, m("8500"), m("8501"), HistologyMatching::Strict));
        assert!(is_nos_vs_subtype(&t, m("8521"), m("8520"), HistologyMatching::Strict));
        assert!(!is_nos_vs_subtype(&t, m("8501"), m("8502"), HistologyMatching::Strict));
        assert!(!is_nos_vs_subtype(&t, m("8500"), m("8521"), HistologyMatching::Strict));
    }

    #[test]
    fn test_different_subtypes() {
        let t = table();
        assert!(different_subtypes(&t, m("8501"), m("8502"), HistologyMatching::Strict));
        assert!(!different_subtypes(&t, m("8501"), m("8501"), HistologyMatching::Strict));
        assert!(!different_subtypes(&t, m("8500"), m("8501"), HistologyMatching::Strict));
        // A family match is not a listed subtype
        assert!(!different_subtypes(&t, m("8521"), m("8524"), HistologyMatching::Lenient));
    }
}
