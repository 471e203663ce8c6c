//! Classification outcome types.

use std::fmt;

/// Final answer of a multiple-primary comparison.
///
/// These four values are the complete result vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MpResult {
    /// Both tumors are the same primary.
    SinglePrimary,
    /// The tumors are separate primaries.
    MultiplePrimaries,
    /// The rules cannot decide with the data provided.
    Questionable,
    /// At least one record failed validation.
    InvalidInput,
}

impl MpResult {
    /// Returns the human-readable label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            Self::SinglePrimary => "Single Primary",
            Self::MultiplePrimaries => "Multiple Primaries",
            Self::Questionable => "Questionable",
            Self::InvalidInput => "Invalid Input",
        }
    }
}

impl fmt::Display for MpResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The result of classifying one tumor pair.
///
/// # Examples
///
/// ```
/// use mph_types::{ClassificationOutcome, MpResult};
///
/// let outcome = ClassificationOutcome::invalid_input("Invalid primary site for tumor 1: 'X'");
/// assert_eq!(outcome.result, MpResult::InvalidInput);
/// assert!(outcome.applied_rules.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassificationOutcome {
    /// The final answer.
    pub result: MpResult,
    /// Identifier of the rule group used, if any.
    pub group_id: Option<String>,
    /// Display name of the rule group used, if any.
    pub group_name: Option<String>,
    /// Step (rule id) that produced the answer, if a rule did.
    pub step: Option<String>,
    /// Human-readable explanation.
    pub reason: String,
    /// Rule ids evaluated, in order.
    pub applied_rules: Vec<String>,
}

impl ClassificationOutcome {
    /// Creates an `InvalidInput` outcome with no group and no rules applied.
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self {
            result: MpResult::InvalidInput,
            group_id: None,
            group_name: None,
            step: None,
            reason: reason.into(),
            applied_rules: Vec::new(),
        }
    }

    /// Returns true if the result is a single primary.
    pub fn is_single_primary(&self) -> bool {
        self.result == MpResult::SinglePrimary
    }

    /// Returns true if the result is multiple primaries.
    pub fn is_multiple_primaries(&self) -> bool {
        self.result == MpResult::MultiplePrimaries
    }

    /// Returns true if the result is questionable.
    pub fn is_questionable(&self) -> bool {
        self.result == MpResult::Questionable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_labels() {
        assert_eq!(MpResult::SinglePrimary.to_string(), "Single Primary");
        assert_eq!(MpResult::MultiplePrimaries.to_string(), "Multiple Primaries");
    }

    #[test]
    fn test_outcome_predicates() {
        let outcome = ClassificationOutcome {
            result: MpResult::Questionable,
            group_id: Some("other_sites_2023".to_string()),
            group_name: Some("2023 Other Sites".to_string()),
            step: Some("M19".to_string()),
            reason: "undetermined".to_string(),
            applied_rules: vec!["M3".to_string()],
        };
        assert!(outcome.is_questionable());
        assert!(!outcome.is_single_primary());
        assert!(!outcome.is_multiple_primaries());
    }
}
