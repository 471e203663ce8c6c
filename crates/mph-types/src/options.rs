//! Per-call classification options.

/// How histology codes are matched against equivalence tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HistologyMatching {
    /// Exact four-digit codes only (primary and subtype columns).
    #[default]
    Strict,
    /// Exact codes first, then the unambiguous three-digit family.
    Lenient,
}

/// Options for one call to the classification engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComputeOptions {
    /// Histology table matching mode.
    pub histology_matching: HistologyMatching,
}

impl ComputeOptions {
    /// Creates options using lenient histology matching.
    pub fn lenient() -> Self {
        Self {
            histology_matching: HistologyMatching::Lenient,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_strict() {
        assert_eq!(
            ComputeOptions::default().histology_matching,
            HistologyMatching::Strict
        );
        assert_eq!(
            ComputeOptions::lenient().histology_matching,
            HistologyMatching::Lenient
        );
    }
}
