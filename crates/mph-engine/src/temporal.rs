//! Partial diagnosis dates and date comparison.
//!
//! Registry dates often lack a month or a day. Every comparison here
//! answers definitely only when the answer holds for every way of filling
//! in the unknown parts; otherwise it answers `Unknown`.

use chrono::{Months, NaiveDate};

/// Year token that means "unknown" rather than "invalid".
const UNKNOWN_YEAR: &[&str] = &["9999"];

/// Month and day token that means "unknown" rather than "invalid".
const UNKNOWN_MONTH_OR_DAY: &[&str] = &["99"];

/// A diagnosis date whose month and day may be unknown.
///
/// A month is only kept when it is 1-12, and a day only when it exists in
/// that month and year. A day without a month is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PartialDate {
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
}

/// Order of two diagnosis dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateComparison {
    /// The first tumor was diagnosed earlier.
    Tumor1Earlier,
    /// The second tumor was diagnosed earlier.
    Tumor2Earlier,
    /// Both tumors were diagnosed the same day.
    SameDay,
    /// The order cannot be decided.
    Unknown,
}

/// Whether two dates are more than a threshold apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Separation {
    /// Every completion of the dates is more than the threshold apart.
    Apart,
    /// No completion of the dates is more than the threshold apart.
    Within,
    /// Some completions are apart and some are not.
    Unknown,
}

impl PartialDate {
    /// Builds a date from numeric parts, dropping parts that cannot exist.
    pub fn new(year: Option<i32>, month: Option<u32>, day: Option<u32>) -> Self {
        let year = year.filter(|y| *y >= 1);
        let month = month.filter(|m| (1..=12).contains(m));
        let day = match (year, month, day) {
            (Some(y), Some(m), Some(d)) => NaiveDate::from_ymd_opt(y, m, d).map(|_| d),
            (None, Some(_), Some(d)) if (1..=31).contains(&d) => Some(d),
            _ => None,
        };
        Self { year, month, day }
    }

    /// Parses date tokens.
    ///
    /// Absent and blank tokens are unknown, as are the year `9999` and the
    /// month or day `99`. Tokens that are not numbers or are out of range
    /// read as unknown too. A year after `current_year` is unusable.
    pub fn parse(year: Option<&str>, month: Option<&str>, day: Option<&str>, current_year: i32) -> Self {
        let year = parse_token::<i32>(year, UNKNOWN_YEAR).filter(|y| *y <= current_year);
        Self::new(
            year,
            parse_token(month, UNKNOWN_MONTH_OR_DAY),
            parse_token(day, UNKNOWN_MONTH_OR_DAY),
        )
    }

    /// Returns the year, if usable.
    pub fn year(&self) -> Option<i32> {
        self.year
    }

    /// Returns the month, if known.
    pub fn month(&self) -> Option<u32> {
        self.month
    }

    /// Returns the day, if known.
    pub fn day(&self) -> Option<u32> {
        self.month.and(self.day)
    }

    /// Returns the earliest calendar date this date could be.
    pub fn earliest(&self) -> Option<NaiveDate> {
        let year = self.year?;
        match (self.month, self.day()) {
            (Some(m), Some(d)) => NaiveDate::from_ymd_opt(year, m, d),
            (Some(m), None) => NaiveDate::from_ymd_opt(year, m, 1),
            _ => NaiveDate::from_ymd_opt(year, 1, 1),
        }
    }

    /// Returns the latest calendar date this date could be.
    pub fn latest(&self) -> Option<NaiveDate> {
        let year = self.year?;
        match (self.month, self.day()) {
            (Some(m), Some(d)) => NaiveDate::from_ymd_opt(year, m, d),
            (Some(m), None) => last_day_of_month(year, m),
            _ => NaiveDate::from_ymd_opt(year, 12, 31),
        }
    }

    fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.earliest()?, self.latest()?))
    }
}

fn parse_token<T: std::str::FromStr>(token: Option<&str>, unknown: &[&str]) -> Option<T> {
    let token = token?.trim();
    if token.is_empty() || unknown.contains(&token) {
        return None;
    }
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    first_of_next?.pred_opt()
}

/// Compares two diagnosis dates component by component.
///
/// The first differing component decides, provided every component before
/// it is known on both sides.
pub fn compare_dx_date(first: &PartialDate, second: &PartialDate) -> DateComparison {
    let components = [
        (first.year.map(i64::from), second.year.map(i64::from)),
        (first.month.map(i64::from), second.month.map(i64::from)),
        (first.day().map(i64::from), second.day().map(i64::from)),
    ];

    for (a, b) in components {
        let (Some(a), Some(b)) = (a, b) else {
            return DateComparison::Unknown;
        };
        if a < b {
            return DateComparison::Tumor1Earlier;
        }
        if a > b {
            return DateComparison::Tumor2Earlier;
        }
    }

    DateComparison::SameDay
}

/// Checks whether two dates are more than `days` days apart.
pub fn verify_days_apart(first: &PartialDate, second: &PartialDate, days: i64) -> Separation {
    separation(first, second, |from, to| (to - from).num_days() > days)
}

/// Checks whether two dates are more than `years` calendar years apart.
pub fn verify_years_apart(first: &PartialDate, second: &PartialDate, years: u32) -> Separation {
    separation(first, second, |from, to| {
        from.checked_add_months(Months::new(years.saturating_mul(12)))
            .is_some_and(|limit| to > limit)
    })
}

/// Brackets both dates and tests the closest and farthest completions.
///
/// `exceeds(from, to)` reports whether `to` is beyond the threshold after
/// `from`.
fn separation(
    first: &PartialDate,
    second: &PartialDate,
    exceeds: impl Fn(NaiveDate, NaiveDate) -> bool,
) -> Separation {
    let (Some((earliest1, latest1)), Some((earliest2, latest2))) = (first.bounds(), second.bounds()) else {
        return Separation::Unknown;
    };

    if exceeds(latest1, earliest2) || exceeds(latest2, earliest1) {
        Separation::Apart
    } else if !exceeds(earliest1, latest2) && !exceeds(earliest2, latest1) {
        Separation::Within
    } else {
        Separation::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const CURRENT_YEAR: i32 = 2024;

    fn date(year: &str, month: &str, day: &str) -> PartialDate {
        PartialDate::parse(Some(year), Some(month), Some(day), CURRENT_YEAR)
    }

    fn year_only(year: &str) -> PartialDate {
        PartialDate::parse(Some(year), None, None, CURRENT_YEAR)
    }

    #[test]
    fn test_parse_unknown_and_invalid_tokens() {
        let d = date("2019", "13", "05");
        assert_eq!(d.year(), Some(2019));
        assert_eq!(d.month(), None);
        assert_eq!(d.day(), None);

        let d = date("2019", "02", "30");
        assert_eq!(d.month(), Some(2));
        assert_eq!(d.day(), None);

        let d = date("2020", "02", "29");
        assert_eq!(d.day(), Some(29));

        let d = date("2019", "99", "99");
        assert_eq!(d.month(), None);

        assert_eq!(year_only("9999").year(), None);
        assert_eq!(year_only("99").year(), Some(99));
        assert_eq!(date("2019", "9999", "01").month(), None);
        assert_eq!(year_only("2030").year(), None);
        assert_eq!(year_only("").year(), None);
        assert_eq!(year_only("20x9").year(), None);
    }

    #[test]
    fn test_bounds() {
        let d = PartialDate::new(Some(2020), Some(2), None);
        assert_eq!(d.earliest(), NaiveDate::from_ymd_opt(2020, 2, 1));
        assert_eq!(d.latest(), NaiveDate::from_ymd_opt(2020, 2, 29));

        let d = PartialDate::new(Some(2019), None, Some(15));
        assert_eq!(d.earliest(), NaiveDate::from_ymd_opt(2019, 1, 1));
        assert_eq!(d.latest(), NaiveDate::from_ymd_opt(2019, 12, 31));

        assert_eq!(PartialDate::default().earliest(), None);
    }

    #[test]
    fn test_compare_dx_date() {
        assert_eq!(
            compare_dx_date(&year_only("2018"), &year_only("2019")),
            DateComparison::Tumor1Earlier
        );
        assert_eq!(
            compare_dx_date(&date("2019", "03", "01"), &date("2019", "02", "28")),
            DateComparison::Tumor2Earlier
        );
        assert_eq!(
            compare_dx_date(&date("2019", "03", "01"), &date("2019", "03", "01")),
            DateComparison::SameDay
        );
        // Same year, one month unknown
        assert_eq!(
            compare_dx_date(&year_only("2019"), &date("2019", "03", "01")),
            DateComparison::Unknown
        );
        // Decided by the year even though months are unknown
        assert_eq!(
            compare_dx_date(&year_only("2020"), &date("2019", "03", "01")),
            DateComparison::Tumor2Earlier
        );
        assert_eq!(
            compare_dx_date(&PartialDate::default(), &year_only("2019")),
            DateComparison::Unknown
        );
    }

    #[test]
    fn test_days_apart_unknown_months() {
        assert_eq!(
            verify_days_apart(&year_only("2001"), &year_only("2002"), 60),
            Separation::Unknown
        );
    }

    #[test]
    fn test_days_apart_known_dates() {
        let a = date("2019", "01", "01");
        assert_eq!(verify_days_apart(&a, &date("2019", "03", "02"), 60), Separation::Within);
        assert_eq!(verify_days_apart(&a, &date("2019", "03", "03"), 60), Separation::Apart);
        assert_eq!(verify_days_apart(&date("2019", "03", "03"), &a, 60), Separation::Apart);
    }

    #[test]
    fn test_days_apart_leap_year_bracket() {
        // Feb 2020 has 29 days, so the farthest completion is 29 days after Jan 31
        let a = date("2020", "01", "31");
        let b = PartialDate::new(Some(2020), Some(2), None);
        assert_eq!(verify_days_apart(&a, &b, 29), Separation::Within);
        assert_eq!(verify_days_apart(&a, &b, 28), Separation::Unknown);
    }

    #[test]
    fn test_years_apart() {
        assert_eq!(
            verify_years_apart(&year_only("2010"), &year_only("2016"), 5),
            Separation::Apart
        );
        assert_eq!(
            verify_years_apart(&year_only("2010"), &year_only("2015"), 5),
            Separation::Unknown
        );
        assert_eq!(
            verify_years_apart(&year_only("2018"), &year_only("2018"), 1),
            Separation::Within
        );
        assert_eq!(
            verify_years_apart(&date("2010", "06", "01"), &date("2015", "06", "01"), 5),
            Separation::Within
        );
        assert_eq!(
            verify_years_apart(&date("2010", "06", "01"), &date("2015", "06", "02"), 5),
            Separation::Apart
        );
        assert_eq!(
            verify_years_apart(&PartialDate::default(), &year_only("2015"), 5),
            Separation::Unknown
        );
    }

    fn completed_date() -> impl Strategy<Value = NaiveDate> {
        (1990i32..2024, 1u32..=12, 1u32..=31).prop_filter_map("valid date", |(y, m, d)| {
            NaiveDate::from_ymd_opt(y, m, d)
        })
    }

    /// Forgets the month and/or day of a full date.
    fn masked(full: NaiveDate, keep_month: bool, keep_day: bool) -> PartialDate {
        use chrono::Datelike;
        PartialDate::new(
            Some(full.year()),
            keep_month.then(|| full.month()),
            keep_day.then(|| full.day()),
        )
    }

    proptest! {
        #[test]
        fn prop_days_apart_is_sound(
            a in completed_date(),
            b in completed_date(),
            mask_a in any::<(bool, bool)>(),
            mask_b in any::<(bool, bool)>(),
            days in 0i64..800,
        ) {
            let first = masked(a, mask_a.0, mask_a.1);
            let second = masked(b, mask_b.0, mask_b.1);
            let actual = (b - a).num_days().abs();

            match verify_days_apart(&first, &second, days) {
                Separation::Apart => prop_assert!(actual > days),
                Separation::Within => prop_assert!(actual <= days),
                Separation::Unknown => {}
            }
        }

        #[test]
        fn prop_years_apart_is_sound(
            a in completed_date(),
            b in completed_date(),
            mask_a in any::<(bool, bool)>(),
            mask_b in any::<(bool, bool)>(),
            years in 0u32..6,
        ) {
            let first = masked(a, mask_a.0, mask_a.1);
            let second = masked(b, mask_b.0, mask_b.1);
            let (from, to) = if a <= b { (a, b) } else { (b, a) };
            let apart = to > from.checked_add_months(Months::new(years * 12)).unwrap();

            match verify_years_apart(&first, &second, years) {
                Separation::Apart => prop_assert!(apart),
                Separation::Within => prop_assert!(!apart),
                Separation::Unknown => {}
            }
        }

        #[test]
        fn prop_compare_agrees_with_completions(
            a in completed_date(),
            b in completed_date(),
            mask_a in any::<(bool, bool)>(),
            mask_b in any::<(bool, bool)>(),
        ) {
            let first = masked(a, mask_a.0, mask_a.1);
            let second = masked(b, mask_b.0, mask_b.1);

            match compare_dx_date(&first, &second) {
                DateComparison::Tumor1Earlier => prop_assert!(a < b),
                DateComparison::Tumor2Earlier => prop_assert!(b < a),
                DateComparison::SameDay => prop_assert_eq!(a, b),
                DateComparison::Unknown => {}
            }
        }
    }
}
