//! Tumor pair input rows.

use std::io::Read;

use mph_types::TumorRecord;
use serde::Deserialize;

/// One input row: the properties of two tumors of one patient.
///
/// Only `site1`..`year1` and `site2`..`year2` are required columns.
#[derive(Debug, Clone, Deserialize)]
pub struct PairRow {
    site1: String,
    hist1: String,
    beh1: String,
    #[serde(default)]
    lat1: String,
    year1: String,
    #[serde(default)]
    month1: Option<String>,
    #[serde(default)]
    day1: Option<String>,
    #[serde(default)]
    icdo2_hist1: Option<String>,
    #[serde(default)]
    icdo2_beh1: Option<String>,
    #[serde(default)]
    tx1: Option<String>,

    site2: String,
    hist2: String,
    beh2: String,
    #[serde(default)]
    lat2: String,
    year2: String,
    #[serde(default)]
    month2: Option<String>,
    #[serde(default)]
    day2: Option<String>,
    #[serde(default)]
    icdo2_hist2: Option<String>,
    #[serde(default)]
    icdo2_beh2: Option<String>,
    #[serde(default)]
    tx2: Option<String>,
}

impl PairRow {
    /// Converts the row into the two tumor records.
    pub fn into_records(self) -> (TumorRecord, TumorRecord) {
        let first = TumorRecord {
            primary_site: self.site1,
            histology: self.hist1,
            behavior: self.beh1,
            laterality: self.lat1,
            dx_year: Some(self.year1),
            dx_month: non_blank(self.month1),
            dx_day: non_blank(self.day1),
            histology_icdo2: non_blank(self.icdo2_hist1),
            behavior_icdo2: non_blank(self.icdo2_beh1),
            tx_status: non_blank(self.tx1),
        };
        let second = TumorRecord {
            primary_site: self.site2,
            histology: self.hist2,
            behavior: self.beh2,
            laterality: self.lat2,
            dx_year: Some(self.year2),
            dx_month: non_blank(self.month2),
            dx_day: non_blank(self.day2),
            histology_icdo2: non_blank(self.icdo2_hist2),
            behavior_icdo2: non_blank(self.icdo2_beh2),
            tx_status: non_blank(self.tx2),
        };
        (first, second)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Reads every pair row from CSV with a header line.
pub fn read_pairs<R: Read>(reader: R) -> Result<Vec<(TumorRecord, TumorRecord)>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader
        .deserialize::<PairRow>()
        .map(|row| row.map(PairRow::into_records))
        .collect()
}
