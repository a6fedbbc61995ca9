//! Display formatting for log tables. Presentation only; nothing in the
//! domain layer depends on these.

/// Abbreviate magnitudes: `1.2M`, `35K`, plain grouping below a thousand
pub fn abbreviate(value: f64) -> String {
    if !value.is_finite() {
        return "---".to_string();
    }

    let abs = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };

    if abs >= 1e6 {
        format!("{}{:.1}M", sign, abs / 1e6)
    } else if abs >= 1e3 {
        format!("{}{:.0}K", sign, abs / 1e3)
    } else {
        group_thousands(value)
    }
}

/// Integer part with comma thousands separators (`1234567.8` -> `1,234,567`)
pub fn group_thousands(value: f64) -> String {
    if !value.is_finite() {
        return "---".to_string();
    }

    let digits = format!("{}", value.abs().trunc() as u64);
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0.0 && value.trunc() != 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Shorten a wallet or hash to `ABCDE...VWXYZ`
pub fn short_id(id: &str) -> String {
    let chars: Vec<char> = id.chars().collect();
    if chars.len() <= 13 {
        return id.to_string();
    }

    let head: String = chars[..5].iter().collect();
    let tail: String = chars[chars.len() - 5..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Optional price for log lines
pub fn price_or_dash(value: Option<f64>) -> String {
    value
        .map(group_thousands)
        .unwrap_or_else(|| "---".to_string())
}
