//! Display formatting helpers for currency, percentages, and durations.

/// Format a whole-dollar currency amount with thousands separators.
///
/// Values are rounded to whole units; non-finite values render as-is so
/// propagated bad input stays visible rather than masquerading as zero.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return format!("${}", value);
    }
    let rounded = value.round();
    let negative = rounded < 0.0;
    let digits = format!("{}", rounded.abs() as u64);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if negative {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Format a percentage with the given number of decimals.
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value)
}

/// Format a duration given in minutes: `45m` below an hour, else whole hours.
pub fn format_minutes(minutes: f64) -> String {
    if minutes < 60.0 {
        format!("{}m", format_number(minutes))
    } else {
        format!("{}h", format_number((minutes / 60.0).round()))
    }
}

/// Format a number for interpolation into prose: whole values drop the
/// fractional part, everything else (including NaN) prints as-is.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_groups_thousands() {
        assert_eq!(format_currency(10400.0), "$10,400");
        assert_eq!(format_currency(1284.0), "$1,284");
        assert_eq!(format_currency(99600.0), "$99,600");
        assert_eq!(format_currency(950.0), "$950");
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(1234567.0), "$1,234,567");
    }

    #[test]
    fn test_format_currency_negative() {
        assert_eq!(format_currency(-500.0), "-$500");
    }

    #[test]
    fn test_format_currency_rounds() {
        assert_eq!(format_currency(10400.4), "$10,400");
        assert_eq!(format_currency(10400.5), "$10,401");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(83.098, 1), "83.1%");
        assert_eq!(format_percent(12.0, 0), "12%");
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(45.0), "45m");
        assert_eq!(format_minutes(480.0), "8h");
        assert_eq!(format_minutes(90.0), "2h");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(24.0), "24");
        assert_eq!(format_number(53.5), "53.5");
        assert_eq!(format_number(f64::NAN), "NaN");
    }
}
