//! Display formatting for prices and changes.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

/// `1234.5` → `"$1,234.50"`; negatives keep the sign ahead of the symbol.
pub fn format_currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{sign}${}.{cents}", group_thousands(whole))
}

/// `(2.15, 0.48)` → `"+2.15 (+0.48%)"`.
pub fn format_change(change: f64, change_percent: f64) -> String {
    format!("{change:+.2} ({change_percent:+.2}%)")
}

/// `45_000_000` → `"45,000,000"`.
pub fn format_volume(volume: u64) -> String {
    group_thousands(&volume.to_string())
}

/// CSS modifier for a price move.
pub fn change_class(change: f64) -> &'static str {
    if change > 0.0 {
        "change change--up"
    } else if change < 0.0 {
        "change change--down"
    } else {
        "change"
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
