/*!
Parser for free-text transaction messages.

Grammar: `<amount> <category> [description...]` for expenses,
`+<amount> <category> [description...]` for income. Amount tokens may carry
`,` or `.` thousands separators.
*/

use chrono::{DateTime, FixedOffset};
use thiserror::Error;

use crate::taxonomy::Taxonomy;
use crate::transaction::{Transaction, TIMESTAMP_FORMAT};

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    /// Fewer than two whitespace-separated tokens.
    #[error("pesan harus berformat: jumlah kategori [deskripsi]")]
    MissingFields,

    /// The amount token is not a number. A leading `-` is rejected here:
    /// only `+` is a documented sign marker.
    #[error("jumlah harus berupa angka")]
    InvalidAmount,

    /// The amount parsed to zero.
    #[error("jumlah harus lebih dari 0")]
    NonPositiveAmount,
}

/// A parsed transaction plus the normalizer's corrected flag, so the caller
/// can surface a "category corrected" notice.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedMessage {
    pub transaction: Transaction,
    pub corrected: bool,
}

/// Parses one message line into a transaction stamped with `now`.
pub fn parse(
    text: &str,
    source: &str,
    now: DateTime<FixedOffset>,
    taxonomy: &Taxonomy,
) -> Result<ParsedMessage, ParseError> {
    let mut fields = text.trim().splitn(3, char::is_whitespace);
    let amount_token = fields.next().unwrap_or("");
    let category_token = fields.next().unwrap_or("");
    if amount_token.is_empty() || category_token.is_empty() {
        return Err(ParseError::MissingFields);
    }
    let description = fields.next().unwrap_or("").trim().to_string();

    let is_income = amount_token.starts_with('+');
    let magnitude = parse_amount(amount_token)?;

    let normalized = taxonomy.normalize(category_token);

    Ok(ParsedMessage {
        transaction: Transaction {
            timestamp: now.format(TIMESTAMP_FORMAT).to_string(),
            category: normalized.canonical,
            description,
            amount: if is_income { magnitude } else { -magnitude },
            source: source.to_string(),
        },
        corrected: normalized.corrected,
    })
}

/// Parses an amount token into a positive magnitude. A single leading `+`
/// is allowed and ignored; `,` and `.` thousands separators are stripped.
/// Anything else non-digit, including a leading `-`, is an invalid amount.
pub fn parse_amount(token: &str) -> Result<i64, ParseError> {
    let token = token.strip_prefix('+').unwrap_or(token);
    let digits: String = token.chars().filter(|c| *c != ',' && *c != '.').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ParseError::InvalidAmount);
    }
    let magnitude: i64 = digits.parse().map_err(|_| ParseError::InvalidAmount)?;
    if magnitude <= 0 {
        return Err(ParseError::NonPositiveAmount);
    }
    Ok(magnitude)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::wib;
    use chrono::TimeZone;

    fn now() -> DateTime<FixedOffset> {
        wib().with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap()
    }

    fn parse_ok(text: &str) -> ParsedMessage {
        parse(text, "telegram_u1", now(), &Taxonomy::new()).unwrap()
    }

    #[test]
    fn expense_message_is_negative() {
        let p = parse_ok("50000 makanan nasi padang");
        assert_eq!(p.transaction.amount, -50000);
        assert_eq!(p.transaction.category, "makanan");
        assert_eq!(p.transaction.description, "nasi padang");
        assert_eq!(p.transaction.timestamp, "2024-06-15 10:30:00");
        assert_eq!(p.transaction.source, "telegram_u1");
        assert!(!p.corrected);
    }

    #[test]
    fn income_message_is_positive() {
        let p = parse_ok("+1000000 gaji salary");
        assert_eq!(p.transaction.amount, 1_000_000);
        assert_eq!(p.transaction.category, "gaji");
        assert_eq!(p.transaction.description, "salary");
    }

    #[test]
    fn thousands_separators_are_stripped() {
        assert_eq!(parse_ok("+1.000.000 gaji").transaction.amount, 1_000_000);
        assert_eq!(parse_ok("25,000 transport ojek").transaction.amount, -25_000);
    }

    #[test]
    fn description_keeps_internal_whitespace() {
        let p = parse_ok("15000 transport ojek  ke kantor");
        assert_eq!(p.transaction.description, "ojek  ke kantor");
    }

    #[test]
    fn missing_description_is_empty() {
        assert_eq!(parse_ok("50000 makanan").transaction.description, "");
    }

    #[test]
    fn category_typo_sets_corrected_flag() {
        let p = parse_ok("50000 makan nasi");
        assert_eq!(p.transaction.category, "makanan");
        assert!(p.corrected);
    }

    #[test]
    fn too_few_fields_is_rejected() {
        let tax = Taxonomy::new();
        assert_eq!(
            parse("50000", "s", now(), &tax),
            Err(ParseError::MissingFields)
        );
        assert_eq!(parse("", "s", now(), &tax), Err(ParseError::MissingFields));
    }

    #[test]
    fn non_numeric_amount_is_rejected() {
        let tax = Taxonomy::new();
        assert_eq!(
            parse("abc makanan test", "s", now(), &tax),
            Err(ParseError::InvalidAmount)
        );
    }

    #[test]
    fn negative_sign_is_not_a_valid_marker() {
        let tax = Taxonomy::new();
        assert_eq!(
            parse("-500 makanan test", "s", now(), &tax),
            Err(ParseError::InvalidAmount)
        );
    }

    #[test]
    fn zero_amount_is_rejected() {
        let tax = Taxonomy::new();
        assert_eq!(
            parse("0 makanan test", "s", now(), &tax),
            Err(ParseError::NonPositiveAmount)
        );
        assert_eq!(
            parse("+0 gaji", "s", now(), &tax),
            Err(ParseError::NonPositiveAmount)
        );
    }

    #[test]
    fn bare_plus_is_rejected() {
        let tax = Taxonomy::new();
        assert_eq!(
            parse("+ gaji salary", "s", now(), &tax),
            Err(ParseError::InvalidAmount)
        );
    }
}
