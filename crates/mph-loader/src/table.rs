//! Equivalence table parser and in-memory table.
//!
//! Parses the `codes,behavior,laterality,subtypes` tables used by the
//! histology and paired-site rules.

use std::collections::HashMap;

use csv::StringRecord;
use mph_types::TableRow;

use crate::parser::{parse, TableParser, TableRecord};
use crate::types::{DataError, DataResult};

/// Expected columns in an equivalence table.
const TABLE_COLUMNS: &[&str] = &["codes", "behavior", "laterality", "subtypes"];

impl TableRecord for TableRow {
    const EXPECTED_COLUMNS: &'static [&'static str] = TABLE_COLUMNS;

    fn from_record(record: &StringRecord) -> DataResult<Self> {
        let codes = parse::code_list(record.get(0).unwrap_or(""))?;
        if codes.is_empty() {
            return Err(DataError::Parse(format!(
                "row without codes at line {}",
                record.position().map_or(0, |p| p.line())
            )));
        }

        let laterality = record
            .get(2)
            .filter(|cell| !cell.is_empty())
            .map(str::to_string);

        Ok(TableRow {
            codes,
            behaviors: parse::behaviors(record.get(1).unwrap_or(""))?,
            laterality,
            subtypes: parse::code_list(record.get(3).unwrap_or(""))?,
        })
    }
}

/// Which column of a row a code was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    /// The primary (specific or NOS) column.
    Primary,
    /// The subtype/variant column.
    Subtype,
}

/// An ordered equivalence table.
///
/// Every code appears in at most one row; [`HistologyTable::from_rows`]
/// rejects tables that break this.
///
/// # Example
///
/// ```
/// use mph_loader::HistologyTable;
///
/// let table = HistologyTable::from_text(
///     "example",
///     "codes,behavior,laterality,subtypes\n8140,,,8480 8490\n8070,,,8071-8072\n",
/// )
/// .unwrap();
///
/// assert_eq!(table.row_index("8490"), Some(0));
/// assert_eq!(table.row_index("8071"), Some(1));
/// assert_eq!(table.row_index("8000"), None);
/// ```
#[derive(Debug, Clone)]
pub struct HistologyTable {
    id: String,
    rows: Vec<TableRow>,
    /// Code -> (row index, column).
    index: HashMap<String, (usize, Column)>,
    /// Three-digit family -> row indexes holding a code of that family.
    families: HashMap<String, Vec<usize>>,
}

impl HistologyTable {
    /// Builds a table from parsed rows, checking that rows are disjoint.
    pub fn from_rows(id: impl Into<String>, rows: Vec<TableRow>) -> DataResult<Self> {
        let id = id.into();
        let mut index: HashMap<String, (usize, Column)> = HashMap::new();
        let mut families: HashMap<String, Vec<usize>> = HashMap::new();

        for (row_index, row) in rows.iter().enumerate() {
            let columns = row
                .codes
                .iter()
                .map(|c| (c, Column::Primary))
                .chain(row.subtypes.iter().map(|c| (c, Column::Subtype)));

            for (code, column) in columns {
                if let Some((first_row, _)) = index.get(code) {
                    return Err(DataError::DuplicateCode {
                        table: id,
                        code: code.clone(),
                        first_row: *first_row,
                        second_row: row_index,
                    });
                }
                index.insert(code.clone(), (row_index, column));

                if let Some(family) = family_of(code) {
                    let entry = families.entry(family.to_string()).or_default();
                    if !entry.contains(&row_index) {
                        entry.push(row_index);
                    }
                }
            }
        }

        Ok(Self {
            id,
            rows,
            index,
            families,
        })
    }

    /// Parses a table from CSV text.
    pub fn from_text(id: &str, text: &str) -> DataResult<Self> {
        let rows = TableParser::<_, TableRow>::from_text(id, text)?.parse_all()?;
        Self::from_rows(id, rows)
    }

    /// Returns the table identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the rows in table order.
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Returns the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the row at `index`.
    pub fn row(&self, index: usize) -> Option<&TableRow> {
        self.rows.get(index)
    }

    /// Returns the index of the row holding `code` in either column.
    pub fn row_index(&self, code: &str) -> Option<usize> {
        self.index.get(code).map(|(row, _)| *row)
    }

    /// Returns the row index and column holding `code`.
    pub fn locate(&self, code: &str) -> Option<(usize, Column)> {
        self.index.get(code).copied()
    }

    /// Returns the index of the only row holding a code of the same
    /// three-digit family as `code`, if exactly one row does.
    pub fn family_row_index(&self, code: &str) -> Option<usize> {
        match self.families.get(family_of(code)?)?.as_slice() {
            [row] => Some(*row),
            _ => None,
        }
    }

    /// Returns true if `code` appears anywhere in the table.
    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }
}

/// Returns the code without its last character, for four-digit histologies.
fn family_of(code: &str) -> Option<&str> {
    (code.len() == 4 && code.bytes().all(|b| b.is_ascii_digit())).then(|| &code[..3])
}

#[cfg(test)]
mod tests {
    use super::*;
    use mph_types::Behavior;

    const HEADER: &str = "codes,behavior,laterality,subtypes\n";

    fn make_record(fields: &[&str]) -> StringRecord {
        let mut record = StringRecord::new();
        for field in fields {
            record.push_field(field);
        }
        record
    }

    #[test]
    fn test_parse_table_row() {
        let record = make_record(&["8500", "2 3", "", "8501-8503 8507"]);
        let row = TableRow::from_record(&record).unwrap();
        assert_eq!(row.codes, vec!["8500"]);
        assert_eq!(row.behaviors, vec![Behavior::InSitu, Behavior::Malignant]);
        assert_eq!(row.laterality, None);
        assert_eq!(row.subtypes, vec!["8501", "8502", "8503", "8507"]);
    }

    #[test]
    fn test_parse_topography_row() {
        let record = make_record(&["C300-C301", "", "paired", ""]);
        let row = TableRow::from_record(&record).unwrap();
        assert_eq!(row.codes, vec!["C300", "C301"]);
        assert_eq!(row.laterality.as_deref(), Some("paired"));
    }

    #[test]
    fn test_row_without_codes_is_rejected() {
        let record = make_record(&["", "", "", "8501"]);
        assert!(TableRow::from_record(&record).is_err());
    }

    #[test]
    fn test_duplicate_code_is_rejected() {
        let text = format!("{HEADER}8140,,,8480\n8480,,,\n");
        let err = HistologyTable::from_text("dup", &text).unwrap_err();
        match err {
            DataError::DuplicateCode {
                table,
                code,
                first_row,
                second_row,
            } => {
                assert_eq!(table, "dup");
                assert_eq!(code, "8480");
                assert_eq!(first_row, 0);
                assert_eq!(second_row, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_within_row_is_rejected() {
        let text = format!("{HEADER}8140 8140,,,\n");
        assert!(HistologyTable::from_text("dup", &text).is_err());
    }

    #[test]
    fn test_locate_columns() {
        let text = format!("{HEADER}# ductal\n8500,,,8501 8502\n\n8520,,,8521\n");
        let table = HistologyTable::from_text("breast", &text).unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.locate("8500"), Some((0, Column::Primary)));
        assert_eq!(table.locate("8521"), Some((1, Column::Subtype)));
        assert!(!table.contains("8530"));
    }

    #[test]
    fn test_family_lookup() {
        let text = format!("{HEADER}8140,,,8144\n8070,,,8071\n8072,,,\n");
        let table = HistologyTable::from_text("fam", &text).unwrap();
        // 814x only lives in row 0
        assert_eq!(table.family_row_index("8145"), Some(0));
        // 807x spans rows 1 and 2
        assert_eq!(table.family_row_index("8075"), None);
        assert_eq!(table.family_row_index("C300"), None);
    }

    #[test]
    fn test_bad_header() {
        let err = HistologyTable::from_text("bad", "codes,behavior\n8000,\n").unwrap_err();
        assert!(matches!(err, DataError::InvalidHeader { expected: 4, found: 2, .. }));
    }
}
