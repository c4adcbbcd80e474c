//! pt-BR number formatting for dashboard cards and tables.

const CURRENCY_PREFIX: &str = "R$ ";

/// `6302.07` -> `"R$ 6.302,07"`.
pub fn format_currency(value: f64) -> String {
    let cents = to_hundredths(value);
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{sign}{CURRENCY_PREFIX}{},{:02}",
        group_thousands(cents / 100),
        cents % 100
    )
}

/// `137567` -> `"137.567"`.
pub fn format_integer(value: u64) -> String {
    group_thousands(value)
}

/// Takes percent units: `1.4191` -> `"1,42%"`, `5.0` -> `"5%"`.
pub fn format_percent(value: f64) -> String {
    let hundredths = to_hundredths(value);
    let sign = if value < 0.0 && hundredths > 0 { "-" } else { "" };
    let whole = group_thousands(hundredths / 100);
    let fraction = hundredths % 100;

    if fraction == 0 {
        format!("{sign}{whole}%")
    } else if fraction % 10 == 0 {
        format!("{sign}{whole},{}%", fraction / 10)
    } else {
        format!("{sign}{whole},{fraction:02}%")
    }
}

/// Division that treats a zero denominator as "no data" rather than infinity.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn to_hundredths(value: f64) -> u64 {
    if !value.is_finite() {
        return 0;
    }
    (value.abs() * 100.0).round() as u64
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
#[path = "tests/format_tests.rs"]
mod tests;
