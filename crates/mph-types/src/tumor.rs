//! Tumor record type.
//!
//! This module provides the `TumorRecord` struct: one side of a
//! multiple-primary comparison, as raw registry tokens.

/// One tumor diagnosis, as received from registry data.
///
/// Every field is kept as the raw token; validation happens when the record
/// is classified. An absent or blank date component means "unknown", which
/// is a first-class value and not an error.
///
/// # Examples
///
/// ```
/// use mph_types::TumorRecord;
///
/// let tumor = TumorRecord::new("C509", "8530", "3", "1", "2018")
///     .with_dx_month("04")
///     .with_dx_day("12");
///
/// assert_eq!(tumor.dx_year.as_deref(), Some("2018"));
/// assert_eq!(tumor.dx_month.as_deref(), Some("04"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TumorRecord {
    /// ICD-O-3 topography code (`C\d{3}`).
    pub primary_site: String,
    /// ICD-O-3 histology code (four digits).
    pub histology: String,
    /// ICD-O-3 behavior code (0, 1, 2, 3 or 6).
    pub behavior: String,
    /// Laterality code (0, 1, 2, 3, 4, 5 or 9).
    pub laterality: String,
    /// Year of diagnosis.
    pub dx_year: Option<String>,
    /// Month of diagnosis.
    pub dx_month: Option<String>,
    /// Day of diagnosis.
    pub dx_day: Option<String>,
    /// ICD-O-2 histology, used for hematopoietic tumors diagnosed before 2001.
    pub histology_icdo2: Option<String>,
    /// ICD-O-2 behavior, used together with `histology_icdo2`.
    pub behavior_icdo2: Option<String>,
    /// Treatment status (0 none, 1 treated, 2 active surveillance, 9 unknown).
    pub tx_status: Option<String>,
}

impl TumorRecord {
    /// Creates a record with the core fields and a diagnosis year.
    pub fn new(
        primary_site: impl Into<String>,
        histology: impl Into<String>,
        behavior: impl Into<String>,
        laterality: impl Into<String>,
        dx_year: impl Into<String>,
    ) -> Self {
        Self {
            primary_site: primary_site.into(),
            histology: histology.into(),
            behavior: behavior.into(),
            laterality: laterality.into(),
            dx_year: Some(dx_year.into()),
            ..Default::default()
        }
    }

    /// Sets the month of diagnosis.
    pub fn with_dx_month(mut self, month: impl Into<String>) -> Self {
        self.dx_month = Some(month.into());
        self
    }

    /// Sets the day of diagnosis.
    pub fn with_dx_day(mut self, day: impl Into<String>) -> Self {
        self.dx_day = Some(day.into());
        self
    }

    /// Sets the legacy ICD-O-2 histology and behavior.
    pub fn with_icdo2(mut self, histology: impl Into<String>, behavior: impl Into<String>) -> Self {
        self.histology_icdo2 = Some(histology.into());
        self.behavior_icdo2 = Some(behavior.into());
        self
    }

    /// Sets the treatment status.
    pub fn with_tx_status(mut self, status: impl Into<String>) -> Self {
        self.tx_status = Some(status.into());
        self
    }

    /// Returns true if site, histology, behavior, laterality and the full
    /// diagnosis date are textually identical.
    pub fn same_descriptive_fields(&self, other: &TumorRecord) -> bool {
        self.primary_site == other.primary_site
            && self.histology == other.histology
            && self.behavior == other.behavior
            && self.laterality == other.laterality
            && self.dx_year == other.dx_year
            && self.dx_month == other.dx_month
            && self.dx_day == other.dx_day
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_descriptive_fields() {
        let a = TumorRecord::new("C509", "8500", "3", "1", "2019").with_dx_month("3");
        let b = a.clone().with_tx_status("1");
        assert!(a.same_descriptive_fields(&b));

        let c = a.clone().with_dx_day("01");
        assert!(!a.same_descriptive_fields(&c));
    }

    #[test]
    fn test_icdo2_fields() {
        let tumor = TumorRecord::new("C421", "9863", "3", "0", "1995").with_icdo2("9863", "3");
        assert_eq!(tumor.histology_icdo2.as_deref(), Some("9863"));
        assert_eq!(tumor.behavior_icdo2.as_deref(), Some("3"));
    }
}
