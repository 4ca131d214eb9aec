//! Number formatting in the es-CO convention used throughout the report.
//!
//! Thousands are grouped with `.` and decimals use `,` (e.g. `1.060.073`,
//! `41,10%`). All helpers are pure.

/// Maximum fraction digits used by [`format_number`] (matches the es-CO
/// default of the report's charts).
const DEFAULT_MAX_FRACTION: usize = 3;

/// Format a value with es-CO separators, keeping up to three fraction
/// digits and trimming trailing zeros.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    let fixed = format_fixed(value, DEFAULT_MAX_FRACTION);
    match fixed.split_once(',') {
        Some((int, frac)) => {
            let frac = frac.trim_end_matches('0');
            if frac.is_empty() {
                int.to_string()
            } else {
                format!("{},{}", int, frac)
            }
        }
        None => fixed,
    }
}

/// Format a value with exactly `decimals` fraction digits and es-CO separators.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    let raw = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (raw.as_str(), None),
    };

    let grouped = group_thousands(int_part);
    // "-0" is not a useful rendering for a value that rounds to zero
    let is_zero = raw.chars().all(|c| c == '0' || c == '.');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    match frac_part {
        Some(frac) => format!("{}{},{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

/// Reformat a literal that may already carry `.` thousands separators
/// (e.g. `"1.060.073"`). Empty strings count as zero; anything that is not
/// numeric after stripping separators is returned unchanged.
pub fn format_number_text(raw: &str) -> String {
    let stripped: String = raw.trim().chars().filter(|c| *c != '.').collect();
    if stripped.is_empty() {
        return format_number(0.0);
    }
    match stripped.replace(',', ".").parse::<f64>() {
        Ok(value) => format_number(value),
        Err(_) => raw.to_string(),
    }
}

/// Percentage with a fixed number of decimals: `format_percent(41.1, 2)` is `41,10%`.
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{}%", format_fixed(value, decimals))
}

/// One decimal followed by ` B` (billions of pesos).
pub fn format_billions(value: f64) -> String {
    format!("{} B", format_fixed(value, 1))
}

/// Axis tick in whole millions: `7_551_545` becomes `8M`.
pub fn format_millions_tick(value: f64) -> String {
    format!("{}M", format_fixed(value / 1_000_000.0, 0))
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_thousands_with_dots() {
        assert_eq!(format_number(1000.0), "1.000");
        assert_eq!(format_number(1_060_073.0), "1.060.073");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(11_393_240.0), "11.393.240");
    }

    #[test]
    fn test_fraction_uses_comma_and_trims_zeros() {
        assert_eq!(format_number(0.239), "0,239");
        assert_eq!(format_number(4.5), "4,5");
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(1234.56789), "1.234,568");
    }

    #[test]
    fn test_negative_values_keep_sign() {
        assert_eq!(format_number(-120.0), "-120");
        assert_eq!(format_number(-250_000.0), "-250.000");
        assert_eq!(format_fixed(-0.001, 2), "0,00");
    }

    #[test]
    fn test_non_finite_is_not_available() {
        assert_eq!(format_number(f64::NAN), "N/A");
        assert_eq!(format_fixed(f64::INFINITY, 2), "N/A");
    }

    #[test]
    fn test_text_reformatting() {
        assert_eq!(format_number_text("1.060.073"), "1.060.073");
        assert_eq!(format_number_text("6547004"), "6.547.004");
        assert_eq!(format_number_text(""), "0");
        assert_eq!(format_number_text("TOTALES"), "TOTALES");
        assert_eq!(format_number_text("0,239"), "0,239");
    }

    #[test]
    fn test_percent_and_billions() {
        assert_eq!(format_percent(41.1, 2), "41,10%");
        assert_eq!(format_percent(26.1, 0), "26%");
        assert_eq!(format_billions(38.4), "38,4 B");
        assert_eq!(format_millions_tick(7_551_545.0), "8M");
    }
}
