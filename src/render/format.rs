use chrono::NaiveDate;

/// Formatting functions available to templates, keyed by role.
#[derive(Debug, Clone, Copy)]
pub struct Formatters {
    /// `formatNumber`
    pub format_number: fn(u64) -> String,
    /// `formatPercent`, given a value already scaled to `0..=100`
    pub format_percent: fn(f64) -> String,
    /// `todayDate`
    pub today_date: fn(NaiveDate) -> String,
}

impl Default for Formatters {
    fn default() -> Self {
        Self {
            format_number: group_thousands,
            format_percent: two_decimal_percent,
            today_date: long_date,
        }
    }
}

/// Digit grouping for the English locale only (comma every three digits):
/// `1234567` -> `1,234,567`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

pub fn two_decimal_percent(percent: f64) -> String {
    format!("{:.2}%", percent)
}

/// `January 2, 2006`
pub fn long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(12_345), "12,345");
        assert_eq!(group_thousands(123_456), "123,456");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
        assert_eq!(group_thousands(u64::MAX), "18,446,744,073,709,551,615");
    }

    #[test]
    fn test_two_decimal_percent() {
        assert_eq!(two_decimal_percent(87.5), "87.50%");
        assert_eq!(two_decimal_percent(0.0), "0.00%");
        assert_eq!(two_decimal_percent(100.0), "100.00%");
        assert_eq!(two_decimal_percent(90.00000000000001), "90.00%");
        assert_eq!(two_decimal_percent(33.333333), "33.33%");
    }

    #[test]
    fn test_long_date() {
        let date = NaiveDate::from_ymd_opt(2006, 1, 2).unwrap();
        assert_eq!(long_date(date), "January 2, 2006");

        let date = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
        assert_eq!(long_date(date), "December 25, 2024");
    }

    #[test]
    fn test_default_formatters() {
        let f = Formatters::default();
        assert_eq!((f.format_number)(1_500), "1,500");
        assert_eq!((f.format_percent)(12.346), "12.35%");
    }
}
