//! Number formatting for dashboards.

/// Compact a count for display: `1000` becomes `"1K"`, `-2500` becomes `"-2.5K"`.
///
/// Values up to 999 in magnitude are printed as-is. Non-finite input yields an
/// empty string.
#[must_use]
pub fn format_k(n: f64) -> String {
    if !n.is_finite() {
        return String::new();
    }
    if n.abs() > 999.0 {
        let thousands = (n / 100.0).round() / 10.0;
        format!("{thousands}K")
    } else {
        format!("{n}")
    }
}

/// `part` as a percentage of `total`, rounded to one decimal place.
///
/// A zero total gives `0.0`.
#[must_use]
pub fn percentage(part: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (f64::from(part) * 1000.0 / f64::from(total)).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_k() {
        assert_eq!(format_k(999.0), "999");
        assert_eq!(format_k(1000.0), "1K");
        assert_eq!(format_k(-2500.0), "-2.5K");
        assert_eq!(format_k(12_345.0), "12.3K");
        assert_eq!(format_k(-999.0), "-999");
        assert_eq!(format_k(42.5), "42.5");
    }

    #[test]
    fn test_format_k_non_finite() {
        assert_eq!(format_k(f64::NAN), "");
        assert_eq!(format_k(f64::INFINITY), "");
        assert_eq!(format_k(f64::NEG_INFINITY), "");
    }

    #[test]
    fn test_percentage() {
        assert!((percentage(40, 160) - 25.0).abs() < f64::EPSILON);
        assert!((percentage(1, 3) - 33.3).abs() < 1e-9);
        assert!(percentage(5, 0).abs() < f64::EPSILON);
    }
}
