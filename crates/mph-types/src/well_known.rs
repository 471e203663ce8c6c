//! Well-known identifiers and code ranges.
//!
//! This module provides constants for rule group identifiers, reference
//! table identifiers and the histology ranges that route tumors between
//! rule groups.
//!
//! # Examples
//!
//! ```
//! use mph_types::well_known;
//!
//! assert_eq!(well_known::BREAST_2018, "breast_2018");
//! assert!(well_known::HEMATO_HISTOLOGY.0 <= 9863 && 9863 <= well_known::HEMATO_HISTOLOGY.1);
//! ```

// =============================================================================
// Rule Groups
// =============================================================================

/// Hematopoietic tumors diagnosed before 2001.
pub const HEMATO_PRE_2001: &str = "hemato_pre2001";
/// Hematopoietic tumors diagnosed 2001-2009.
pub const HEMATO_2001_2009: &str = "hemato_2001_2009";
/// Hematopoietic tumors diagnosed 2010 and later.
pub const HEMATO_2010: &str = "hemato_2010";

/// Benign and borderline brain tumors, 2007-2017 rules.
pub const BENIGN_BRAIN_2007: &str = "benign_brain_2007";
/// Non-malignant CNS tumors, 2018 rules.
pub const NONMALIGNANT_CNS_2018: &str = "nonmalignant_cns_2018";
/// Malignant brain tumors, 2007-2017 rules.
pub const MALIGNANT_BRAIN_2007: &str = "malignant_brain_2007";
/// Malignant CNS and peripheral nerves, 2018 rules.
pub const MALIGNANT_CNS_2018: &str = "malignant_cns_2018";

/// Head and neck, 2007-2017 rules.
pub const HEAD_NECK_2007: &str = "head_neck_2007";
/// Colon, 2007-2017 rules.
pub const COLON_2007: &str = "colon_2007";
/// Lung, 2007-2017 rules.
pub const LUNG_2007: &str = "lung_2007";
/// Cutaneous melanoma, 2007-2017 rules.
pub const MELANOMA_2007: &str = "melanoma_2007";
/// Breast, 2007-2017 rules.
pub const BREAST_2007: &str = "breast_2007";
/// Kidney, 2007-2017 rules.
pub const KIDNEY_2007: &str = "kidney_2007";
/// Renal pelvis, ureter, bladder and other urinary, 2007-2017 rules.
pub const URINARY_2007: &str = "urinary_2007";

/// Head and neck, 2018 rules.
pub const HEAD_NECK_2018: &str = "head_neck_2018";
/// Colon and rectum, 2018 rules.
pub const COLON_2018: &str = "colon_2018";
/// Lung, 2018 rules.
pub const LUNG_2018: &str = "lung_2018";
/// Cutaneous melanoma, 2018 rules.
pub const MELANOMA_2018: &str = "melanoma_2018";
/// Breast, 2018 rules (diagnoses 2018-2022).
pub const BREAST_2018: &str = "breast_2018";
/// Breast, 2023 rules.
pub const BREAST_2023: &str = "breast_2023";
/// Kidney, 2018 rules.
pub const KIDNEY_2018: &str = "kidney_2018";
/// Urinary sites, 2018 rules.
pub const URINARY_2018: &str = "urinary_2018";

/// Solid tumors diagnosed before 2007.
pub const SOLID_PRE_2007: &str = "solid_pre2007";
/// Other sites, 2007-2017 rules.
pub const OTHER_SITES_2007: &str = "other_sites_2007";
/// Other sites, 2018 rules (diagnoses 2018-2022).
pub const OTHER_SITES_2018: &str = "other_sites_2018";
/// Other sites, 2023 rules.
pub const OTHER_SITES_2023: &str = "other_sites_2023";

// =============================================================================
// Reference Tables
// =============================================================================

/// ICD-O-2 hematopoietic same-primary rows, pre-2001.
pub const TABLE_HEMATO_ICDO2: &str = "hemato_icdo2";
/// Histology equivalences for pre-2007 solid tumors.
pub const TABLE_SOLID_PRE_2007: &str = "solid_pre2007_histology";
/// Paired organs, 2007 rules.
pub const TABLE_PAIRED_SITES_2007: &str = "paired_sites_2007";
/// Paired organs, 2018 rules.
pub const TABLE_PAIRED_SITES_2018: &str = "paired_sites_2018";
/// Benign brain histology groups, 2007 rules.
pub const TABLE_BENIGN_BRAIN_2007: &str = "benign_brain_2007";
/// Malignant brain histology branches (Chart 1), 2007 rules.
pub const TABLE_MALIGNANT_BRAIN_2007: &str = "malignant_brain_2007";
/// Non-malignant CNS histologies, 2018 rules.
pub const TABLE_NONMALIGNANT_CNS_2018: &str = "nonmalignant_cns_2018";
/// Malignant CNS histologies, 2018 rules.
pub const TABLE_MALIGNANT_CNS_2018: &str = "malignant_cns_2018";
/// Head and neck histologies, 2018 rules.
pub const TABLE_HEAD_NECK_2018: &str = "head_neck_2018";
/// Colon and rectum histologies, 2018 rules.
pub const TABLE_COLON_2018: &str = "colon_2018";
/// Lung histologies, 2018 rules.
pub const TABLE_LUNG_2018: &str = "lung_2018";
/// Cutaneous melanoma subtypes, 2018 rules.
pub const TABLE_MELANOMA_2018: &str = "melanoma_2018";
/// Breast histologies, 2018 rules.
pub const TABLE_BREAST_2018: &str = "breast_2018";
/// Breast histologies, 2023 rules.
pub const TABLE_BREAST_2023: &str = "breast_2023";
/// Kidney histologies, 2018 rules.
pub const TABLE_KIDNEY_2018: &str = "kidney_2018";
/// Urinary histologies, 2018 rules.
pub const TABLE_URINARY_2018: &str = "urinary_2018";
/// Other sites histologies, 2018 rules.
pub const TABLE_OTHER_SITES_2018: &str = "other_sites_2018";
/// Other sites histologies, 2023 rules.
pub const TABLE_OTHER_SITES_2023: &str = "other_sites_2023";

// =============================================================================
// Routing Ranges
// =============================================================================

/// Hematopoietic and lymphoid neoplasms (inclusive).
pub const HEMATO_HISTOLOGY: (u16, u16) = (9590, 9993);

/// Kaposi sarcoma, always routed to the other-sites rules.
pub const KAPOSI_SARCOMA: u16 = 9140;

/// Intracranial and CNS topography ranges (inclusive).
pub const CNS_SITES: &[(u16, u16)] = &[(700, 729), (751, 753)];

/// First year benign and borderline CNS tumors are reportable.
pub const BENIGN_CNS_FIRST_YEAR: i32 = 2004;
