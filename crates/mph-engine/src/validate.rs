//! Tumor record validation.
//!
//! Turns raw registry tokens into typed fields. A record that fails here
//! produces an `InvalidInput` outcome; it never reaches a rule.

use mph_types::{Behavior, HistologyCode, Laterality, SiteCode, TumorRecord, TxStatus};
use thiserror::Error;

use crate::histology::Morphology;
use crate::temporal::PartialDate;

/// A core field that failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidField {
    /// Site is not `C` followed by three digits.
    #[error("Tumor {tumor}: primary site '{value}' is not a valid topography code")]
    PrimarySite {
        /// 1 or 2.
        tumor: u8,
        /// The token received.
        value: String,
    },

    /// Histology is not four digits.
    #[error("Tumor {tumor}: histology '{value}' is not a valid ICD-O-3 histology")]
    Histology {
        /// 1 or 2.
        tumor: u8,
        /// The token received.
        value: String,
    },

    /// Behavior is not 0, 1, 2, 3 or 6.
    #[error("Tumor {tumor}: behavior '{value}' is not a valid behavior code")]
    Behavior {
        /// 1 or 2.
        tumor: u8,
        /// The token received.
        value: String,
    },

    /// Year is missing, malformed or outside [1, current year].
    #[error("Tumor {tumor}: diagnosis year '{value}' is missing or out of range")]
    DiagnosisYear {
        /// 1 or 2.
        tumor: u8,
        /// The token received.
        value: String,
    },

    /// A record routed to an ICD-O-2 coded group lacks a valid ICD-O-2 histology.
    #[error("Tumor {tumor}: ICD-O-2 histology '{value}' is required for hematopoietic diagnoses before 2001")]
    HistologyIcdO2 {
        /// 1 or 2.
        tumor: u8,
        /// The token received.
        value: String,
    },
}

/// A validated tumor record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTumor {
    /// Topography.
    pub site: SiteCode,
    /// ICD-O-3 histology.
    pub histology: HistologyCode,
    /// ICD-O-3 behavior.
    pub behavior: Behavior,
    /// Laterality, `Unknown` when unrecognized.
    pub laterality: Laterality,
    /// Diagnosis date.
    pub date: PartialDate,
    /// ICD-O-2 histology, required by pre-2001 hematopoietic rules.
    pub histology_icdo2: Option<HistologyCode>,
    /// ICD-O-2 behavior, falling back to the ICD-O-3 behavior.
    pub behavior_icdo2: Behavior,
    /// Treatment status.
    pub tx_status: TxStatus,
    histology_text: String,
    histology_icdo2_text: Option<String>,
}

impl ParsedTumor {
    /// Validates `record`, the `tumor`-th of the pair (1 or 2).
    pub fn from_record(record: &TumorRecord, tumor: u8, current_year: i32) -> Result<Self, InvalidField> {
        let site = SiteCode::parse(&record.primary_site).ok_or_else(|| InvalidField::PrimarySite {
            tumor,
            value: record.primary_site.clone(),
        })?;
        let histology = HistologyCode::parse(&record.histology).ok_or_else(|| InvalidField::Histology {
            tumor,
            value: record.histology.clone(),
        })?;
        let behavior = Behavior::from_code(&record.behavior).ok_or_else(|| InvalidField::Behavior {
            tumor,
            value: record.behavior.clone(),
        })?;

        let date = PartialDate::parse(
            record.dx_year.as_deref(),
            record.dx_month.as_deref(),
            record.dx_day.as_deref(),
            current_year,
        );
        date.year().ok_or_else(|| InvalidField::DiagnosisYear {
            tumor,
            value: record.dx_year.clone().unwrap_or_default(),
        })?;

        let histology_icdo2 = record
            .histology_icdo2
            .as_deref()
            .and_then(HistologyCode::parse);
        let behavior_icdo2 = record
            .behavior_icdo2
            .as_deref()
            .and_then(Behavior::from_code)
            .unwrap_or(behavior);

        Ok(Self {
            site,
            histology,
            behavior,
            laterality: Laterality::from_token(&record.laterality),
            date,
            histology_icdo2,
            behavior_icdo2,
            tx_status: TxStatus::from_token(record.tx_status.as_deref()),
            histology_text: histology.code(),
            histology_icdo2_text: histology_icdo2.map(HistologyCode::code),
        })
    }

    /// Checks that the record carries a valid ICD-O-2 histology.
    pub fn require_icdo2(&self, record: &TumorRecord, tumor: u8) -> Result<(), InvalidField> {
        match self.histology_icdo2 {
            Some(_) => Ok(()),
            None => Err(InvalidField::HistologyIcdO2 {
                tumor,
                value: record.histology_icdo2.clone().unwrap_or_default(),
            }),
        }
    }

    /// Returns the diagnosis year; always known for a validated record.
    pub fn year(&self) -> i32 {
        self.date.year().unwrap_or_default()
    }

    /// Returns the histology code as text.
    pub fn histology_code(&self) -> &str {
        &self.histology_text
    }

    /// Returns the ICD-O-3 histology and behavior for table lookups.
    pub fn morphology(&self) -> Morphology<'_> {
        Morphology::new(&self.histology_text, self.behavior)
    }

    /// Returns the ICD-O-2 histology and behavior, when coded.
    pub fn morphology_icdo2(&self) -> Option<Morphology<'_>> {
        self.histology_icdo2_text
            .as_deref()
            .map(|code| Morphology::new(code, self.behavior_icdo2))
    }

    /// Returns true if the histology is within `[low, high]`.
    pub fn histology_in(&self, low: u16, high: u16) -> bool {
        self.histology.in_range(low, high)
    }

    /// Returns true if the histology is one of `codes`.
    pub fn histology_is(&self, codes: &[u16]) -> bool {
        self.histology.is_any_of(codes)
    }

    /// Returns true if the site is within `[low, high]` (numbers without the `C`).
    pub fn site_in(&self, low: u16, high: u16) -> bool {
        self.site.in_range(low, high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_record() {
        let record = TumorRecord::new("C509", "8500", "3", "1", "2019").with_dx_month("6");
        let tumor = ParsedTumor::from_record(&record, 1, 2024).unwrap();
        assert_eq!(tumor.site.major(), 50);
        assert_eq!(tumor.histology_code(), "8500");
        assert_eq!(tumor.laterality, Laterality::Right);
        assert_eq!(tumor.year(), 2019);
        assert_eq!(tumor.date.month(), Some(6));
        assert_eq!(tumor.behavior_icdo2, Behavior::Malignant);
    }

    #[test]
    fn test_invalid_fields() {
        let bad_site = TumorRecord::new("C5X9", "8500", "3", "1", "2019");
        let err = ParsedTumor::from_record(&bad_site, 2, 2024).unwrap_err();
        assert!(matches!(err, InvalidField::PrimarySite { tumor: 2, .. }));
        assert!(err.to_string().contains("primary site"));

        let bad_behavior = TumorRecord::new("C509", "8500", "4", "1", "2019");
        assert!(matches!(
            ParsedTumor::from_record(&bad_behavior, 1, 2024),
            Err(InvalidField::Behavior { .. })
        ));

        let future = TumorRecord::new("C509", "8500", "3", "1", "2030");
        assert!(matches!(
            ParsedTumor::from_record(&future, 1, 2024),
            Err(InvalidField::DiagnosisYear { .. })
        ));

        let mut no_year = TumorRecord::new("C509", "8500", "3", "1", "");
        no_year.dx_year = None;
        assert!(matches!(
            ParsedTumor::from_record(&no_year, 1, 2024),
            Err(InvalidField::DiagnosisYear { .. })
        ));
    }

    #[test]
    fn test_icdo2_optional_at_parse_time() {
        let solid = TumorRecord::new("C160", "8140", "3", "0", "1999");
        let tumor = ParsedTumor::from_record(&solid, 1, 2024).unwrap();
        assert_eq!(tumor.histology_icdo2, None);
        assert_eq!(tumor.morphology_icdo2(), None);

        let record = TumorRecord::new("C421", "9863", "3", "0", "1998");
        let tumor = ParsedTumor::from_record(&record, 2, 2024).unwrap();
        let err = tumor.require_icdo2(&record, 2).unwrap_err();
        assert!(matches!(err, InvalidField::HistologyIcdO2 { tumor: 2, .. }));

        let record = record.with_icdo2("9863", "");
        let tumor = ParsedTumor::from_record(&record, 1, 2024).unwrap();
        assert!(tumor.require_icdo2(&record, 1).is_ok());
        assert_eq!(tumor.morphology_icdo2().map(|m| m.code), Some("9863"));
        assert_eq!(tumor.behavior_icdo2, Behavior::Malignant);
    }

    #[test]
    fn test_unknown_laterality_and_tx_status() {
        let record = TumorRecord::new("C649", "8312", "3", "7", "2019");
        let tumor = ParsedTumor::from_record(&record, 1, 2024).unwrap();
        assert_eq!(tumor.laterality, Laterality::Unknown);
        assert_eq!(tumor.tx_status, TxStatus::Unknown);
    }
}
