//! Rupiah amounts as they appear in the ledger sheet
//!
//! Cells hold whole Rupiah written by hand: `"Rp 1.500.000"`, `"1,500,000"`,
//! `"250000"` or nothing at all. Fractions are not supported; both `.` and
//! `,` are treated as thousands separators.

/// Parse a ledger cell into whole Rupiah.
///
/// Anything that cannot be read as a non-negative amount becomes `0`, so a
/// blank cell and a garbled one look the same here. Use
/// [`try_parse_currency`] to tell them apart.
pub fn parse_currency(raw: &str) -> i64 {
    try_parse_currency(raw).unwrap_or(0)
}

/// Strict variant of [`parse_currency`].
///
/// Returns `Some(0)` for blank input and `None` when the cleaned cell does
/// not start with a digit (or overflows). Like a lenient integer parse,
/// trailing junk after the leading digits is ignored: `"1500 (transfer)"`
/// reads as 1500.
pub fn try_parse_currency(raw: &str) -> Option<i64> {
    if raw.trim().is_empty() || raw == "0" {
        return Some(0);
    }

    let cleaned = strip_rupiah_prefix(raw).replace(['.', ','], "");
    let cleaned = cleaned.trim();

    let digits_end = cleaned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(cleaned.len());
    if digits_end == 0 {
        return None;
    }
    cleaned[..digits_end].parse::<i64>().ok()
}

/// Remove every `Rp` token together with the whitespace that follows it.
fn strip_rupiah_prefix(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(pos) = rest.find("Rp") {
        out.push_str(&rest[..pos]);
        rest = rest[pos + 2..].trim_start();
    }
    out.push_str(rest);
    out
}

/// Format whole Rupiah for display: `1234567` -> `"Rp 1.234.567"`.
///
/// Negative amounts (a balance in deficit) render as `"-Rp 1.234"`.
pub fn format_currency(amount: i64) -> String {
    if amount == 0 {
        return "Rp 0".to_string();
    }

    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    if amount < 0 {
        format!("-Rp {grouped}")
    } else {
        format!("Rp {grouped}")
    }
}
