//! Coded tumor attributes.
//!
//! This module provides enum representations for the single-digit coded
//! values carried by a tumor record: behavior, laterality and treatment
//! status.

/// ICD-O-3 behavior code.
///
/// # Examples
///
/// ```
/// use mph_types::Behavior;
///
/// assert_eq!(Behavior::from_code("3"), Some(Behavior::Malignant));
/// assert_eq!(Behavior::from_code("5"), None);
/// assert!(Behavior::InSitu.is_in_situ());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Behavior {
    /// Benign (0).
    Benign,
    /// Uncertain whether benign or malignant, borderline (1).
    Borderline,
    /// In situ, non-invasive (2).
    InSitu,
    /// Malignant, primary site (3).
    Malignant,
    /// Malignant, metastatic site (6).
    Metastatic,
}

impl Behavior {
    /// All valid behaviors, in code order.
    pub const ALL: [Behavior; 5] = [
        Self::Benign,
        Self::Borderline,
        Self::InSitu,
        Self::Malignant,
        Self::Metastatic,
    ];

    /// Creates a Behavior from its code.
    ///
    /// Returns `None` for anything other than `0`, `1`, `2`, `3` or `6`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "0" => Some(Self::Benign),
            "1" => Some(Self::Borderline),
            "2" => Some(Self::InSitu),
            "3" => Some(Self::Malignant),
            "6" => Some(Self::Metastatic),
            _ => None,
        }
    }

    /// Returns the single-digit code for this behavior.
    pub fn code(self) -> &'static str {
        match self {
            Self::Benign => "0",
            Self::Borderline => "1",
            Self::InSitu => "2",
            Self::Malignant => "3",
            Self::Metastatic => "6",
        }
    }

    /// Returns true for behavior 2.
    pub fn is_in_situ(self) -> bool {
        self == Self::InSitu
    }

    /// Returns true for behavior 3.
    pub fn is_invasive(self) -> bool {
        self == Self::Malignant
    }
}

/// Laterality of a paired organ.
///
/// Unlike behavior, an unrecognised laterality is not an input error: it is
/// read as [`Laterality::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Laterality {
    /// Not a paired site (0).
    NotPaired,
    /// Right (1).
    Right,
    /// Left (2).
    Left,
    /// Only one side involved, side unspecified (3).
    OneSideUnspecified,
    /// Bilateral involvement (4).
    Bilateral,
    /// Paired site, midline tumor (5).
    Midline,
    /// Paired site, no information (9).
    Unknown,
}

impl Laterality {
    /// Reads a laterality token, defaulting to [`Laterality::Unknown`].
    pub fn from_token(token: &str) -> Self {
        match token.trim() {
            "0" => Self::NotPaired,
            "1" => Self::Right,
            "2" => Self::Left,
            "3" => Self::OneSideUnspecified,
            "4" => Self::Bilateral,
            "5" => Self::Midline,
            _ => Self::Unknown,
        }
    }

    /// Returns true for right and left.
    pub fn is_known_side(self) -> bool {
        matches!(self, Self::Right | Self::Left)
    }

    /// Returns true if one tumor is on the right and the other on the left.
    pub fn is_opposite(self, other: Laterality) -> bool {
        self.is_known_side() && other.is_known_side() && self != other
    }
}

/// Treatment status of the earlier tumor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TxStatus {
    /// No treatment given (0).
    NoTreatment,
    /// Treatment given (1).
    Treated,
    /// Active surveillance / watchful waiting (2).
    ActiveSurveillance,
    /// Unknown (9, blank or anything else).
    Unknown,
}

impl TxStatus {
    /// Reads a treatment status token, defaulting to [`TxStatus::Unknown`].
    pub fn from_token(token: Option<&str>) -> Self {
        match token.map(str::trim) {
            Some("0") => Self::NoTreatment,
            Some("1") => Self::Treated,
            Some("2") => Self::ActiveSurveillance,
            _ => Self::Unknown,
        }
    }

    /// Returns true if the record states that no treatment was given.
    ///
    /// A patient who was never treated cannot have become disease-free.
    pub fn was_never_treated(self) -> bool {
        matches!(self, Self::NoTreatment | Self::ActiveSurveillance)
    }
}
