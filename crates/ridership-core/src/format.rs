//! Number formatting shared by the cards, the axis and the CLI

/// Group digits with commas: 1234567 -> "1,234,567"
pub fn format_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
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

/// Axis tick label in thousands: 412000 -> "412k"
pub fn format_axis_k(value: f64) -> String {
    format!("{:.0}k", value / 1000.0)
}
