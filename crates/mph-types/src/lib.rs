//! # mph-types
//!
//! Type definitions for multiple primary and histology (MPH) classification.
//!
//! This crate provides the records exchanged between the reference data
//! loader, the classification engine and its callers: tumor records, coded
//! attributes, equivalence table rows, hematopoietic relationships and the
//! classification outcome.
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support via serde.
//!
//! ## Usage
//!
//! ```rust
//! use mph_types::{Behavior, HistologyCode, SiteCode, TumorRecord};
//!
//! let tumor = TumorRecord::new("C509", "8500", "3", "1", "2019").with_dx_month("6");
//!
//! assert_eq!(SiteCode::parse(&tumor.primary_site).map(SiteCode::major), Some(50));
//! assert_eq!(HistologyCode::parse(&tumor.histology).map(HistologyCode::number), Some(8500));
//! assert_eq!(Behavior::from_code(&tumor.behavior), Some(Behavior::Malignant));
//! ```

#![warn(missing_docs)]

mod codes;
mod enums;
mod hemato;
mod options;
mod outcome;
mod table;
mod tumor;
pub mod well_known;

// Re-export all public types at crate root
pub use codes::{HistologyCode, SiteCode};
pub use enums::{Behavior, Laterality, TxStatus};
pub use hemato::{HematoRelationship, RelationshipKind};
pub use options::{ComputeOptions, HistologyMatching};
pub use outcome::{ClassificationOutcome, MpResult};
pub use table::TableRow;
pub use tumor::TumorRecord;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_types_are_exported() {
        let _behavior = Behavior::Malignant;
        let _laterality = Laterality::Right;
        let _result = MpResult::SinglePrimary;
        let _matching = HistologyMatching::Strict;
        let _kind = RelationshipKind::SamePrimary;
        let _row = TableRow::default();
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip() {
        let outcome = ClassificationOutcome {
            result: MpResult::SinglePrimary,
            group_id: Some(well_known::BREAST_2018.to_string()),
            group_name: Some("2018 Breast".to_string()),
            step: Some("M6".to_string()),
            reason: "Inflammatory carcinoma in one or both breasts.".to_string(),
            applied_rules: vec!["M3".into(), "M4".into(), "M5".into(), "M6".into()],
        };

        let json = serde_json::to_string(&outcome).unwrap();
        let parsed: ClassificationOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(outcome, parsed);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_tumor_record_from_json() {
        let json = r#"{
            "primary_site": "C649",
            "histology": "8960",
            "behavior": "3",
            "laterality": "1",
            "dx_year": "2019",
            "dx_month": null,
            "dx_day": null,
            "histology_icdo2": null,
            "behavior_icdo2": null,
            "tx_status": null
        }"#;
        let tumor: TumorRecord = serde_json::from_str(json).unwrap();
        assert_eq!(tumor.primary_site, "C649");
        assert_eq!(tumor.dx_month, None);
    }
}
