//! Generic reference table parser.
//!
//! Provides a streaming parser for the comma-separated reference tables.
//! Lines starting with `#` are comments.

use std::io::Read;
use std::marker::PhantomData;

use csv::{Reader, ReaderBuilder, StringRecord};

use crate::types::{DataError, DataResult};

/// Trait for types that can be parsed from reference table records.
pub trait TableRecord: Sized {
    /// Expected column names for this record type.
    const EXPECTED_COLUMNS: &'static [&'static str];

    /// Parse a record from a CSV StringRecord.
    fn from_record(record: &StringRecord) -> DataResult<Self>;
}

/// A streaming parser for reference tables.
pub struct TableParser<R: Read, T: TableRecord> {
    reader: Reader<R>,
    records_read: usize,
    _marker: PhantomData<T>,
}

impl<'a, T: TableRecord> TableParser<&'a [u8], T> {
    /// Creates a parser over in-memory table text.
    pub fn from_text(source_name: &str, text: &'a str) -> DataResult<Self> {
        Self::from_reader(source_name, text.as_bytes())
    }
}

impl<R: Read, T: TableRecord> TableParser<R, T> {
    /// Creates a new parser from a reader.
    ///
    /// # Errors
    /// Returns an error if the header row does not match
    /// [`TableRecord::EXPECTED_COLUMNS`].
    pub fn from_reader(source_name: &str, reader: R) -> DataResult<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .flexible(false)
            .comment(Some(b'#'))
            .trim(csv::Trim::All)
            .from_reader(reader);

        Self::validate_headers(source_name, &mut csv_reader)?;

        Ok(Self {
            reader: csv_reader,
            records_read: 0,
            _marker: PhantomData,
        })
    }

    /// Validates that the table has the expected column headers.
    fn validate_headers(source_name: &str, reader: &mut Reader<R>) -> DataResult<()> {
        let headers = reader.headers()?;
        let expected = T::EXPECTED_COLUMNS;

        if headers.len() != expected.len() {
            return Err(DataError::InvalidHeader {
                source_name: source_name.to_string(),
                expected: expected.len(),
                found: headers.len(),
            });
        }

        for (i, expected_col) in expected.iter().enumerate() {
            let found = headers.get(i).unwrap_or("");
            // Handle UTF-8 BOM at start of file
            let found = found.trim_start_matches('\u{feff}');
            if found != *expected_col {
                return Err(DataError::UnexpectedColumn {
                    source_name: source_name.to_string(),
                    position: i,
                    expected: expected_col.to_string(),
                    found: found.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Returns the number of records read so far.
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Parses all records into a Vec, stopping at the first error.
    pub fn parse_all(self) -> DataResult<Vec<T>> {
        self.collect()
    }
}

impl<R: Read, T: TableRecord> Iterator for TableParser<R, T> {
    type Item = DataResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut record = StringRecord::new();
            match self.reader.read_record(&mut record) {
                Ok(true) => {
                    self.records_read += 1;

                    // Skip empty records
                    if record.iter().all(|f| f.is_empty()) {
                        continue;
                    }

                    return Some(T::from_record(&record));
                }
                Ok(false) => return None,
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}

/// Helper functions for parsing reference table cells.
pub mod parse {
    use mph_types::Behavior;

    use super::{DataError, DataResult};

    /// Largest number of codes a single range may expand to.
    const MAX_RANGE_LEN: u32 = 1000;

    /// Parses a whitespace-separated list of codes and inclusive ranges.
    ///
    /// `"8000-8002 8010"` yields `8000 8001 8002 8010`; ranges keep their
    /// alphabetic prefix and zero padding (`"C300-C301"`).
    pub fn code_list(value: &str) -> DataResult<Vec<String>> {
        let mut codes = Vec::new();
        for token in value.split_whitespace() {
            match token.split_once('-') {
                Some((low, high)) => codes.extend(code_range(token, low, high)?),
                None => {
                    split_code(token)?;
                    codes.push(token.to_string());
                }
            }
        }
        Ok(codes)
    }

    fn code_range(token: &str, low: &str, high: &str) -> DataResult<Vec<String>> {
        let invalid = || DataError::InvalidCode {
            value: token.to_string(),
        };

        let (low_prefix, low_digits) = split_code(low)?;
        let (high_prefix, high_digits) = split_code(high)?;
        if low_prefix != high_prefix || low_digits.len() != high_digits.len() {
            return Err(invalid());
        }

        let start: u32 = low_digits.parse().map_err(|_| invalid())?;
        let end: u32 = high_digits.parse().map_err(|_| invalid())?;
        if end < start || end - start >= MAX_RANGE_LEN {
            return Err(invalid());
        }

        let width = low_digits.len();
        Ok((start..=end)
            .map(|n| format!("{low_prefix}{n:0width$}"))
            .collect())
    }

    /// Splits a code into its alphabetic prefix and digits.
    fn split_code(code: &str) -> DataResult<(&str, &str)> {
        let digits_at = code
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| DataError::InvalidCode {
                value: code.to_string(),
            })?;
        let (prefix, digits) = code.split_at(digits_at);
        if !prefix.chars().all(|c| c.is_ascii_uppercase())
            || !digits.chars().all(|c| c.is_ascii_digit())
        {
            return Err(DataError::InvalidCode {
                value: code.to_string(),
            });
        }
        Ok((prefix, digits))
    }

    /// Parses an optional year; an empty cell is `None`.
    pub fn optional_year(value: &str) -> DataResult<Option<i32>> {
        if value.is_empty() {
            return Ok(None);
        }
        value
            .parse::<i32>()
            .ok()
            .filter(|year| *year > 0)
            .map(Some)
            .ok_or_else(|| DataError::InvalidYear {
                value: value.to_string(),
            })
    }

    /// Parses a whitespace-separated list of behavior codes.
    pub fn behaviors(value: &str) -> DataResult<Vec<Behavior>> {
        value
            .split_whitespace()
            .map(|code| {
                Behavior::from_code(code).ok_or_else(|| DataError::InvalidBehavior {
                    value: code.to_string(),
                })
            })
            .collect()
    }

    /// Parses a single histology code cell.
    pub fn single_code(value: &str) -> DataResult<String> {
        match code_list(value)?.as_slice() {
            [code] => Ok(code.clone()),
            _ => Err(DataError::InvalidCode {
                value: value.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mph_types::Behavior;

    #[test]
    fn test_code_list_ranges() {
        let codes = parse::code_list("8000-8002 8010").unwrap();
        assert_eq!(codes, vec!["8000", "8001", "8002", "8010"]);

        let sites = parse::code_list("C300-C301 C310").unwrap();
        assert_eq!(sites, vec!["C300", "C301", "C310"]);

        let padded = parse::code_list("C008-C010").unwrap();
        assert_eq!(padded, vec!["C008", "C009", "C010"]);
    }

    #[test]
    fn test_code_list_rejects_bad_tokens() {
        assert!(parse::code_list("80a0").is_err());
        assert!(parse::code_list("8010-8000").is_err());
        assert!(parse::code_list("C300-D301").is_err());
        assert!(parse::code_list("800-8001").is_err());
        assert!(parse::code_list("0000-9999").is_err());
        assert!(parse::code_list("").unwrap().is_empty());
    }

    #[test]
    fn test_optional_year() {
        assert_eq!(parse::optional_year("").unwrap(), None);
        assert_eq!(parse::optional_year("2010").unwrap(), Some(2010));
        assert!(parse::optional_year("20x0").is_err());
        assert!(parse::optional_year("-1").is_err());
    }

    #[test]
    fn test_behaviors() {
        assert_eq!(
            parse::behaviors("2 3").unwrap(),
            vec![Behavior::InSitu, Behavior::Malignant]
        );
        assert!(parse::behaviors("").unwrap().is_empty());
        assert!(parse::behaviors("4").is_err());
    }

    #[test]
    fn test_single_code() {
        assert_eq!(parse::single_code("9863").unwrap(), "9863");
        assert!(parse::single_code("9863 9861").is_err());
        assert!(parse::single_code("").is_err());
    }
}
