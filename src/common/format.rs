/// Placeholder shown for absent values.
pub const NOT_AVAILABLE: &str = "N/A";

/// Format a number with thousands separators and a fixed number of decimals.
pub fn format_number(value: Option<f64>, decimals: usize) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => group_thousands(&format!("{:.*}", decimals, v)),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Whole dollars, e.g. "$52,000". Zero counts as missing.
pub fn format_currency(value: Option<f64>) -> String {
    match nonzero(value) {
        Some(v) => format!("${}", format_number(Some(v.round()), 0)),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Whole percent, e.g. "34%". Zero counts as missing.
pub fn format_percent(value: Option<f64>) -> String {
    match nonzero(value) {
        Some(v) => format!("{}%", v.round()),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Population density, e.g. "1,234 people/sq mi". Zero counts as missing.
pub fn format_density(value: Option<f64>) -> String {
    match nonzero(value) {
        Some(v) => format!("{} people/sq mi", format_number(Some(v.round()), 0)),
        None => NOT_AVAILABLE.to_string(),
    }
}

fn nonzero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v != 0.0)
}

/// Insert commas into the integer part of a formatted decimal.
fn group_thousands(text: &str) -> String {
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 { grouped.push(',') }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_grouping() {
        assert_eq!(format_number(Some(1234567.0), 0), "1,234,567");
        assert_eq!(format_number(Some(999.0), 0), "999");
        assert_eq!(format_number(Some(-4321.5), 1), "-4,321.5");
        assert_eq!(format_number(Some(0.456), 2), "0.46");
        assert_eq!(format_number(None, 0), "N/A");
    }

    #[test]
    fn zero_is_missing_for_display_fields() {
        assert_eq!(format_currency(Some(0.0)), "N/A");
        assert_eq!(format_currency(Some(52000.4)), "$52,000");
        assert_eq!(format_percent(Some(33.6)), "34%");
        assert_eq!(format_density(Some(1234.4)), "1,234 people/sq mi");
        assert_eq!(format_density(None), "N/A");
    }
}
