//! KPI card text formatting
//!
//! Dashboard cards show display strings rather than numbers, so the
//! formatting is fixed here instead of in a cell number format:
//!
//! | Metric | Rule | Example |
//! |--------|------|---------|
//! | Sales, average transaction | glyph, thousands separators, 0 decimals | `₹56,145` |
//! | Transaction count | thousands separators | `1,000` |
//! | Rating | 1 decimal, `/10` suffix | `7.1/10` |
//!
//! Grouping is always Western-style (groups of three) regardless of locale.

/// Insert `,` between groups of three digits in a plain digit string
pub fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Round to whole units, group thousands and prefix the currency glyph.
///
/// The sign goes after the glyph: `-1234.0` renders as `₹-1,234`.
pub fn format_currency(value: f64, glyph: &str) -> String {
    format!("{glyph}{}", group_signed(&format!("{value:.0}")))
}

/// Grouped integer count
pub fn format_count(count: i64) -> String {
    group_signed(&count.to_string())
}

/// Rating with one decimal place out of ten
pub fn format_rating(rating: f64) -> String {
    format!("{rating:.1}/10")
}

fn group_signed(number: &str) -> String {
    match number.strip_prefix('-') {
        Some(digits) => format!("-{}", group_thousands(digits)),
        None if number.bytes().all(|b| b.is_ascii_digit()) => group_thousands(number),
        // inf / NaN
        None => number.to_string(),
    }
}
