//! Reference data snapshot compiled into the crate.

use mph_types::{well_known, RelationshipKind};

/// Equivalence tables as (table id, CSV text).
pub const TABLES: &[(&str, &str)] = &[
    (well_known::TABLE_HEMATO_ICDO2, include_str!("../data/hemato_icdo2.csv")),
    (well_known::TABLE_SOLID_PRE_2007, include_str!("../data/solid_pre2007_histology.csv")),
    (well_known::TABLE_PAIRED_SITES_2007, include_str!("../data/paired_sites_2007.csv")),
    (well_known::TABLE_PAIRED_SITES_2018, include_str!("../data/paired_sites_2018.csv")),
    (well_known::TABLE_BENIGN_BRAIN_2007, include_str!("../data/benign_brain_2007.csv")),
    (well_known::TABLE_MALIGNANT_BRAIN_2007, include_str!("../data/malignant_brain_2007.csv")),
    (well_known::TABLE_NONMALIGNANT_CNS_2018, include_str!("../data/nonmalignant_cns_2018.csv")),
    (well_known::TABLE_MALIGNANT_CNS_2018, include_str!("../data/malignant_cns_2018.csv")),
    (well_known::TABLE_HEAD_NECK_2018, include_str!("../data/head_neck_2018.csv")),
    (well_known::TABLE_COLON_2018, include_str!("../data/colon_2018.csv")),
    (well_known::TABLE_LUNG_2018, include_str!("../data/lung_2018.csv")),
    (well_known::TABLE_MELANOMA_2018, include_str!("../data/melanoma_2018.csv")),
    (well_known::TABLE_BREAST_2018, include_str!("../data/breast_2018.csv")),
    (well_known::TABLE_BREAST_2023, include_str!("../data/breast_2023.csv")),
    (well_known::TABLE_KIDNEY_2018, include_str!("../data/kidney_2018.csv")),
    (well_known::TABLE_URINARY_2018, include_str!("../data/urinary_2018.csv")),
    (well_known::TABLE_OTHER_SITES_2018, include_str!("../data/other_sites_2018.csv")),
    (well_known::TABLE_OTHER_SITES_2023, include_str!("../data/other_sites_2023.csv")),
];

/// Hematopoietic relationship datasets as (kind, CSV text).
pub const HEMATO: &[(RelationshipKind, &str)] = &[
    (RelationshipKind::SamePrimary, include_str!("../data/hemato_same_primary.csv")),
    (RelationshipKind::TransformTo, include_str!("../data/hemato_transform_to.csv")),
    (RelationshipKind::TransformFrom, include_str!("../data/hemato_transform_from.csv")),
];
