//! Number formatting shared by the text report and the chart axis.

/// Inserts `,` between every group of three digits of a plain digit string.
fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// `1234` -> `"1,234"`
pub fn format_thousands(value: usize) -> String {
    group_digits(&value.to_string())
}

/// Formats an amount with two decimals and thousands separators, e.g.
/// `format_currency(1234.5, "£") == "£1,234.50"`. The sign goes before the symbol.
pub fn format_currency(value: f64, symbol: &str) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}{}.{}", sign, symbol, group_digits(whole), fraction)
}

/// Axis label without decimals when the value is whole.
pub fn format_axis_value(value: f64) -> String {
    if value.fract().abs() < 1e-9 {
        let whole = format!("{:.0}", value.abs());
        let sign = if value < 0.0 { "-" } else { "" };
        format!("{}{}", sign, group_digits(&whole))
    } else {
        let fixed = format!("{:.2}", value.abs());
        let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
        let sign = if value < 0.0 { "-" } else { "" };
        format!("{}{}.{}", sign, group_digits(whole), fraction)
    }
}
