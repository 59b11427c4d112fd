// Utility helpers for parsing and basic statistics.
//
// All the forgiving cell handling lives here so the rest of the crate can
// assume typed, optional values.
use chrono::{NaiveDate, NaiveDateTime};
use num_format::{Locale, ToFormattedString};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse a string-like cell into `f64`, tolerating the usual export noise.
///
/// - Trims whitespace.
/// - Rejects values that contain alphabetic characters (`nan`, `n/a`, ...).
/// - Strips thousands separators like `","` before parsing.
/// - Returns `None` for anything that cannot be safely parsed.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if s.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let s = s.replace(',', "");
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Dates may carry a time part; it is dropped.
pub fn parse_date_safe(s: Option<&str>) -> Option<NaiveDate> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Arithmetic mean of the present values; `None` when nothing is present.
pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (sum, count) = values
        .into_iter()
        .flatten()
        .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Round to `decimals` places, exact ties going to the even neighbour
/// (`0.125` -> `0.12`, `0.135` -> `0.14`). Negative zero collapses to zero so a
/// rounded-away variance never renders as `-0.0`.
pub fn round_to(n: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (n * factor).round_ties_even() / factor + 0.0
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_noisy_numbers() {
        assert_eq!(parse_f64_safe(Some(" 1,234.5 ")), Some(1234.5));
        assert_eq!(parse_f64_safe(Some("nan")), None);
        assert_eq!(parse_f64_safe(Some("")), None);
        assert_eq!(parse_f64_safe(None), None);
        assert_eq!(parse_f64_safe(Some("1,200")), Some(1200.0));
    }

    #[test]
    fn parses_dates_with_and_without_time() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(parse_date_safe(Some("2024-03-05")), Some(d));
        assert_eq!(parse_date_safe(Some("2024/03/05")), Some(d));
        assert_eq!(parse_date_safe(Some("2024-03-05 08:30:00")), Some(d));
        assert_eq!(parse_date_safe(Some("2024-02-30")), None);
        assert_eq!(parse_date_safe(Some("yesterday")), None);
    }

    #[test]
    fn mean_skips_missing_values() {
        assert_eq!(mean([Some(1.0), None, Some(3.0)]), Some(2.0));
        assert_eq!(mean([None, None]), None);
        assert_eq!(mean(Vec::<Option<f64>>::new()), None);
    }

    #[test]
    fn rounding_clears_negative_zero() {
        assert_eq!(round_to(2.2000000001, 2), 2.2);
        assert_eq!(round_to(-0.001, 2).to_string(), "0");
        assert_eq!(format_int(1234567i64), "1,234,567");
    }

    #[test]
    fn exact_ties_round_to_even() {
        assert_eq!(round_to(1.0 / 8.0, 2), 0.12);
        assert_eq!(round_to(5.0 / 8.0, 2), 0.62);
        assert_eq!(round_to(3.0 / 8.0, 2), 0.38);
        assert_eq!(round_to(-0.125, 2), -0.12);
        assert_eq!(round_to(2.5, 0), 2.0);
    }
}
