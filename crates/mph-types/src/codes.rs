//! ICD-O-3 topography and histology code types.
//!
//! Both codes arrive as raw strings from registry data. These newtypes are
//! only constructed from syntactically valid tokens, so code that holds one
//! never has to re-check the format.

use std::fmt;

/// An ICD-O-3 topography (primary site) code such as `C509`.
///
/// Stored as the three-digit number after the `C` prefix.
///
/// # Examples
///
/// ```
/// use mph_types::SiteCode;
///
/// let site = SiteCode::parse("C509").unwrap();
/// assert_eq!(site.number(), 509);
/// assert_eq!(site.to_string(), "C509");
/// assert!(SiteCode::parse("C50").is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SiteCode(u16);

impl SiteCode {
    /// Parses a topography code of the form `C` followed by three digits.
    ///
    /// Returns `None` for anything else.
    pub fn parse(value: &str) -> Option<Self> {
        let bytes = value.as_bytes();
        if bytes.len() != 4 || bytes[0] != b'C' {
            return None;
        }
        if !bytes[1..].iter().all(u8::is_ascii_digit) {
            return None;
        }
        value[1..].parse().ok().map(Self)
    }

    /// Returns the three-digit number (`C509` → 509).
    pub fn number(self) -> u16 {
        self.0
    }

    /// Returns the site without its subsite, i.e. the second and third
    /// characters (`C509` → 50).
    pub fn major(self) -> u16 {
        self.0 / 10
    }

    /// Returns the fourth character as a digit (`C509` → 9).
    pub fn subsite(self) -> u16 {
        self.0 % 10
    }

    /// Returns true if this code lies in the inclusive range `[low, high]`.
    pub fn in_range(self, low: u16, high: u16) -> bool {
        (low..=high).contains(&self.0)
    }
}

impl fmt::Display for SiteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{:03}", self.0)
    }
}

/// An ICD-O histology (morphology) code such as `8140`.
///
/// # Examples
///
/// ```
/// use mph_types::HistologyCode;
///
/// let hist = HistologyCode::parse("8530").unwrap();
/// assert_eq!(hist.number(), 8530);
/// assert_eq!(hist.family(), 853);
/// assert!(HistologyCode::parse("853").is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistologyCode(u16);

impl HistologyCode {
    /// Parses a four-digit histology code.
    pub fn parse(value: &str) -> Option<Self> {
        if value.len() != 4 || !value.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        value.parse().ok().map(Self)
    }

    /// Returns the numeric code.
    pub fn number(self) -> u16 {
        self.0
    }

    /// Returns the first three digits (`8530` → 853).
    pub fn family(self) -> u16 {
        self.0 / 10
    }

    /// Returns true if this code lies in the inclusive range `[low, high]`.
    pub fn in_range(self, low: u16, high: u16) -> bool {
        (low..=high).contains(&self.0)
    }

    /// Returns true if this code is one of `codes`.
    pub fn is_any_of(self, codes: &[u16]) -> bool {
        codes.contains(&self.0)
    }

    /// Returns the four-character code.
    pub fn code(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for HistologyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_code_parse() {
        let site = SiteCode::parse("C000").unwrap();
        assert_eq!(site.number(), 0);
        assert_eq!(site.to_string(), "C000");

        assert!(SiteCode::parse("c509").is_none());
        assert!(SiteCode::parse("C5O9").is_none());
        assert!(SiteCode::parse("C5099").is_none());
        assert!(SiteCode::parse("").is_none());
    }

    #[test]
    fn test_site_code_parts() {
        let site = SiteCode::parse("C649").unwrap();
        assert_eq!(site.major(), 64);
        assert_eq!(site.subsite(), 9);
        assert!(site.in_range(649, 649));
        assert!(!site.in_range(650, 689));
    }

    #[test]
    fn test_histology_code_parse() {
        assert_eq!(HistologyCode::parse("0000").unwrap().number(), 0);
        assert_eq!(HistologyCode::parse("9993").unwrap().to_string(), "9993");
        assert!(HistologyCode::parse("85300").is_none());
        assert!(HistologyCode::parse("85a0").is_none());
        assert!(HistologyCode::parse("+853").is_none());
    }

    #[test]
    fn test_histology_code_family() {
        let a = HistologyCode::parse("8140").unwrap();
        let b = HistologyCode::parse("8144").unwrap();
        assert_eq!(a.family(), b.family());
        assert!(a.is_any_of(&[8140, 8211]));
    }
}
