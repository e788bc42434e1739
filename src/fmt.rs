//! Currency and percentage rendering helpers.

/// Formats a whole-Rupiah amount with Indonesian thousands separators,
/// e.g. `1500000` -> `Rp 1.500.000`.
pub fn rupiah(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    if amount < 0 {
        format!("Rp -{grouped}")
    } else {
        format!("Rp {grouped}")
    }
}

/// One decimal place, e.g. `12.345` -> `12.3%`.
pub fn percent(value: f64) -> String {
    format!("{value:.1}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_with_dots() {
        assert_eq!(rupiah(0), "Rp 0");
        assert_eq!(rupiah(500), "Rp 500");
        assert_eq!(rupiah(50_000), "Rp 50.000");
        assert_eq!(rupiah(1_000_000), "Rp 1.000.000");
        assert_eq!(rupiah(123_456_789), "Rp 123.456.789");
    }

    #[test]
    fn negative_amounts_keep_the_sign() {
        assert_eq!(rupiah(-75_000), "Rp -75.000");
    }

    #[test]
    fn percent_has_one_decimal() {
        assert_eq!(percent(0.0), "0.0%");
        assert_eq!(percent(12.34), "12.3%");
        assert_eq!(percent(-50.0), "-50.0%");
    }
}
