//! Solid tumors outside the site-specific groups, and all solid tumors
//! diagnosed before 2007.

use mph_types::well_known;

use super::colon;
use super::common::{self, Unmatched, MALIGNANT, NON_MALIGNANT};
use crate::group::{Applicability, CodeRanges, RuleGroup};
use crate::rule::{Rule, RuleResult, Verdict};
use crate::temporal::Separation;
use crate::validate::ParsedTumor;

/// Sites where a difference in the fourth character makes separate
/// primaries.
const SUBSITE_MAJORS: &[u16] = &[18, 21, 24, 38, 44, 51, 57, 60, 63, 68];
const COLON_RECTUM: CodeRanges = &[(180, 189), (199, 199), (209, 209)];

const OTHER_SITES_2018_NOS: &[&str] = &["8000", "8010"];
const OTHER_SITES_2023_NOS: &[&str] = &["8000", "8001", "8002", "8003", "8004", "8005", "8010"];

fn is_thyroid_follicular_or_papillary(tumor: &ParsedTumor) -> bool {
    tumor.site_in(739, 739)
        && (tumor.histology_in(8330, 8335) || tumor.histology_in(8340, 8344) || tumor.histology_is(&[8050, 8260]))
}

fn is_ovarian_epithelial(tumor: &ParsedTumor) -> bool {
    tumor.site_in(569, 569) && tumor.histology_in(8010, 8589)
}

fn is_colorectal(tumor: &ParsedTumor) -> bool {
    COLON_RECTUM.iter().any(|&(lo, hi)| tumor.site_in(lo, hi))
}

/// Single primary when both tumors match `predicate` and were diagnosed
/// within 60 days of each other.
fn within_sixty_days(
    step: &'static str,
    question: &'static str,
    reason: &'static str,
    predicate: fn(&ParsedTumor) -> bool,
    require_opposite_sides: bool,
) -> Rule {
    Rule::new(step, question, reason, move |_, pair| {
        if !pair.both(predicate) {
            return RuleResult::Continue;
        }
        if require_opposite_sides && !pair.first.laterality.is_opposite(pair.second.laterality) {
            return RuleResult::Continue;
        }
        match pair.days_apart(60) {
            Separation::Within => RuleResult::SINGLE,
            Separation::Apart => RuleResult::Continue,
            Separation::Unknown => RuleResult::Potential(
                Verdict::Single,
                "Unable to verify whether the tumors were diagnosed within 60 days".to_string(),
            ),
        }
    })
}

/// M3 to M9, shared by every rule book from 2007 on.
fn special_cases(paired_table: &'static str) -> Vec<Rule> {
    vec![
        Rule::new(
            "M3",
            "Are there adenocarcinomas of the prostate?",
            "Adenocarcinomas of the prostate are always a single primary.",
            |_, pair| {
                RuleResult::when(
                    pair.both(|t| t.site_in(619, 619) && t.histology_is(&[8140])),
                    Verdict::Single,
                )
            },
        ),
        Rule::new(
            "M4",
            "Is there a retinoblastoma in one or both eyes?",
            "Retinoblastoma is always a single primary.",
            |_, pair| RuleResult::when(pair.both(|t| t.histology_in(9510, 9514)), Verdict::Single),
        ),
        Rule::new(
            "M5",
            "Is there Kaposi sarcoma in any site?",
            "Kaposi sarcoma is always a single primary.",
            |_, pair| {
                RuleResult::when(
                    pair.both(|t| t.histology_is(&[well_known::KAPOSI_SARCOMA])),
                    Verdict::Single,
                )
            },
        ),
        within_sixty_days(
            "M6",
            "Are there follicular and papillary tumors of the thyroid diagnosed within 60 days?",
            "Follicular and papillary thyroid tumors within 60 days are a single primary.",
            is_thyroid_follicular_or_papillary,
            false,
        ),
        within_sixty_days(
            "M7",
            "Are there bilateral epithelial tumors of the ovary diagnosed within 60 days?",
            "Bilateral epithelial ovarian tumors within 60 days are a single primary.",
            is_ovarian_epithelial,
            true,
        ),
        common::paired_sites_both_sides(
            "M8",
            "Are there tumors on both the right side and the left side of a site listed as a paired organ?",
            "Tumors on both sides of a paired site are multiple primaries.",
            paired_table,
        ),
        Rule::new(
            "M9",
            "Is there familial adenomatous polyposis with malignant tumors in the colon and rectum?",
            "Familial adenomatous polyposis in the colon and rectum is a single primary.",
            |_, pair| {
                RuleResult::when(
                    pair.both(is_colorectal) && pair.either(|t| t.histology_is(&[8220, 8221])),
                    Verdict::Single,
                )
            },
        ),
    ]
}

fn more_than_one_year(step: &'static str) -> Rule {
    common::years_apart(
        step,
        "Are there tumors diagnosed more than one (1) year apart?",
        "Tumors diagnosed more than one year apart are multiple primaries.",
        1,
    )
}

fn major_site(step: &'static str) -> Rule {
    common::topography_major_differs(
        step,
        "Are there tumors in sites with ICD-O-3 topography codes that are different at the second (Cxx) and/or third (Cxx) character?",
        "Tumors in different sites are multiple primaries.",
    )
}

fn subsite(step: &'static str) -> Rule {
    common::topography_subsite_differs(
        step,
        "Are there tumors in sites with ICD-O-3 topography codes that differ only at the fourth (Cxxx) character in a site where that makes separate primaries?",
        "Tumors in different subsites of these sites are multiple primaries.",
        SUBSITE_MAJORS,
    )
}

fn invasive_after_in_situ(step: &'static str) -> Rule {
    common::invasive_after_in_situ(
        step,
        "Is there an invasive tumor following an in situ tumor more than 60 days after diagnosis?",
        "An invasive tumor more than 60 days after an in situ tumor is a multiple primary.",
        60,
    )
}

fn in_situ_after_invasive(step: &'static str) -> Rule {
    common::in_situ_after_invasive(
        step,
        "Is there an in situ tumor following an invasive tumor?",
        "An in situ tumor following an invasive tumor is a single primary.",
    )
}

fn multiple_polyps(step: &'static str) -> Rule {
    Rule::new(
        step,
        "Are there adenocarcinomas in multiple polyps of the same segment?",
        "Adenocarcinomas in polyps of the same segment are a single primary.",
        |_, pair| {
            let same_segment = pair.first.site == pair.second.site;
            RuleResult::when(
                same_segment && pair.both(|t| t.histology_is(&[8210, 8220, 8221, 8261, 8263])),
                Verdict::Single,
            )
        },
    )
}

fn catch_all(step: &'static str) -> Rule {
    common::catch_all(
        step,
        "Does not meet any of the above criteria?",
        "Tumors that do not meet any of the above criteria are a single primary.",
        Verdict::Single,
    )
}

pub fn solid_pre2007() -> RuleGroup {
    RuleGroup::new(
        well_known::SOLID_PRE_2007,
        "Solid Tumors 1998-2006",
        vec![
            Applicability::years(1, Some(2006), MALIGNANT).solid(),
            Applicability::years(well_known::BENIGN_CNS_FIRST_YEAR, Some(2006), NON_MALIGNANT)
                .sites(well_known::CNS_SITES)
                .solid(),
        ],
        vec![
            major_site("M3"),
            common::paired_sites_both_sides(
                "M4",
                "Are there tumors on both the right side and the left side of a site listed as a paired organ?",
                "Tumors on both sides of a paired site are multiple primaries.",
                well_known::TABLE_PAIRED_SITES_2007,
            ),
            common::same_row(
                "M5",
                "Are there tumors with histologies in the same histology group?",
                "Tumors with histologies in the same group are a single primary.",
                well_known::TABLE_SOLID_PRE_2007,
                &[],
            ),
            common::histology_family_differs(
                "M6",
                "Are there tumors with ICD-O-3 histology codes that are different at the first, second or third number?",
                "Tumors with histologies differing at the first three digits are multiple primaries.",
            ),
            common::days_apart(
                "M7",
                "Are there tumors diagnosed more than two (2) months apart?",
                "Tumors diagnosed more than two months apart are multiple primaries.",
                60,
            ),
            catch_all("M8"),
        ],
    )
}

pub fn other_sites_2007() -> RuleGroup {
    let mut rules = special_cases(well_known::TABLE_PAIRED_SITES_2007);
    rules.extend([
        more_than_one_year("M10"),
        major_site("M11"),
        subsite("M12"),
        colon::polyp_and_adenocarcinoma("M13"),
        invasive_after_in_situ("M14"),
        in_situ_after_invasive("M15"),
        common::histology_family_differs(
            "M16",
            "Are there tumors with ICD-O-3 histology codes that are different at the first, second or third number?",
            "Tumors with histologies differing at the first three digits are multiple primaries.",
        ),
        catch_all("M17"),
    ]);
    RuleGroup::new(
        well_known::OTHER_SITES_2007,
        "Other Sites 2007",
        vec![Applicability::years(2007, Some(2017), MALIGNANT).solid()],
        rules,
    )
}

/// M3 to M15 of the 2018 and 2023 rule books.
fn rules_2018() -> Vec<Rule> {
    let mut rules = special_cases(well_known::TABLE_PAIRED_SITES_2018);
    rules.extend([
        more_than_one_year("M10"),
        major_site("M11"),
        subsite("M12"),
        colon::polyp_and_adenocarcinoma("M13"),
        multiple_polyps("M14"),
        invasive_after_in_situ("M15"),
    ]);
    rules
}

pub fn other_sites_2018() -> RuleGroup {
    let table = well_known::TABLE_OTHER_SITES_2018;
    let mut rules = rules_2018();
    rules.extend([
        common::same_row(
            "M16",
            "Are there tumors with ICD-O-3 histology codes on the same row of the other sites histology table?",
            "Tumors on the same row are a single primary.",
            table,
            OTHER_SITES_2018_NOS,
        ),
        common::different_rows(
            "M17",
            "Are there tumors with ICD-O-3 histology codes on different rows of the other sites histology table?",
            "Tumors on different rows are multiple primaries.",
            table,
            OTHER_SITES_2018_NOS,
            Unmatched::PotentialMultiple,
            Unmatched::Undetermined,
        ),
        in_situ_after_invasive("M18"),
        catch_all("M19"),
    ]);
    RuleGroup::new(
        well_known::OTHER_SITES_2018,
        "2018 Other Sites",
        vec![Applicability::years(2018, Some(2022), MALIGNANT).solid()],
        rules,
    )
}

pub fn other_sites_2023() -> RuleGroup {
    let table = well_known::TABLE_OTHER_SITES_2023;
    let mut rules = rules_2018();
    rules.extend([
        common::nos_vs_subtype(
            "M16",
            "Is there a NOS histology and a more specific histology of the same row?",
            "A NOS and a subtype/variant of the NOS are a single primary.",
            table,
        ),
        common::different_subtypes(
            "M17",
            "Are there tumors with two or more different subtypes/variants in the other sites histology table?",
            "Different subtypes/variants of the same histology are multiple primaries.",
            table,
        ),
        common::same_row(
            "M18",
            "Are there tumors with ICD-O-3 histology codes on the same row of the other sites histology table?",
            "Tumors on the same row are a single primary.",
            table,
            OTHER_SITES_2023_NOS,
        ),
        common::different_rows(
            "M19",
            "Are there tumors with ICD-O-3 histology codes on different rows of the other sites histology table?",
            "Tumors on different rows are multiple primaries.",
            table,
            OTHER_SITES_2023_NOS,
            Unmatched::PotentialMultiple,
            Unmatched::Undetermined,
        ),
        in_situ_after_invasive("M20"),
        catch_all("M21"),
    ]);
    RuleGroup::new(
        well_known::OTHER_SITES_2023,
        "2023 Other Sites",
        vec![Applicability::years(2023, None, MALIGNANT).solid()],
        rules,
    )
}
