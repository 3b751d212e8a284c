//! pt-BR presentation helpers
//!
//! Currency, date and fiscal-document formatting used everywhere amounts or
//! dates reach a human. Parsing accepts both the formatted pt-BR shape and
//! the plain machine shape so form inputs round-trip.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Errors produced by the parsing helpers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// Input could not be read as a currency amount.
    #[error("invalid currency value: {0}")]
    InvalidCurrency(String),
    /// Input could not be read as a dd/mm/yyyy date.
    #[error("invalid date value: {0}")]
    InvalidDate(String),
}

/// Format a decimal amount as Brazilian currency
///
/// Two decimal places, comma as the decimal mark, dots grouping thousands.
/// Negative amounts carry a leading minus sign.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use tropeiro_common::format::format_brl;
///
/// assert_eq!(format_brl(Decimal::new(123_456, 2)), "R$ 1.234,56");
/// assert_eq!(format_brl(Decimal::ZERO), "R$ 0,00");
/// assert_eq!(format_brl(Decimal::new(-950, 2)), "-R$ 9,50");
/// ```
pub fn format_brl(value: Decimal) -> String {
    let normalized = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let cents = (normalized * Decimal::ONE_HUNDRED).to_i128().unwrap_or_default();
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let grouped = group_thousands(abs / 100);
    format!("{sign}R$ {grouped},{:02}", abs % 100)
}

/// Parse a currency amount in pt-BR or plain machine format
///
/// Accepts `"R$ 1.234,56"`, `"1.234,56"`, `"1234,56"` and `"1234.56"`. The
/// currency sign and grouping dots are optional; a comma always means the
/// decimal mark.
///
/// # Errors
///
/// Returns [`FormatError::InvalidCurrency`] when no numeric value remains
/// after stripping the currency decorations.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use tropeiro_common::format::parse_brl;
///
/// assert_eq!(parse_brl("R$ 1.234,56").unwrap(), Decimal::new(123_456, 2));
/// assert_eq!(parse_brl("1234.56").unwrap(), Decimal::new(123_456, 2));
/// assert!(parse_brl("abc").is_err());
/// ```
pub fn parse_brl(input: &str) -> Result<Decimal, FormatError> {
    let invalid = || FormatError::InvalidCurrency(input.to_string());

    let mut rest = input.trim();
    let mut negative = false;
    if let Some(stripped) = rest.strip_prefix('-') {
        negative = true;
        rest = stripped.trim_start();
    }
    if let Some(stripped) = rest.strip_prefix("R$").or_else(|| rest.strip_prefix("r$")) {
        rest = stripped.trim_start();
    }
    if let Some(stripped) = rest.strip_prefix('-') {
        negative = true;
        rest = stripped.trim_start();
    }

    let cleaned: String = if rest.contains(',') {
        // pt-BR shape: dots group thousands, the comma is the decimal mark
        rest.chars()
            .filter(|c| *c != '.' && !c.is_whitespace())
            .map(|c| if c == ',' { '.' } else { c })
            .collect()
    } else if rest.matches('.').count() > 1 {
        // grouped whole value without a decimal mark, e.g. "1.234.567"
        rest.chars().filter(|c| *c != '.' && !c.is_whitespace()).collect()
    } else {
        rest.chars().filter(|c| !c.is_whitespace()).collect()
    };

    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(invalid());
    }

    let value = Decimal::from_str(&cleaned).map_err(|_| invalid())?;
    Ok(if negative { -value } else { value })
}

/// Format a date as `dd/mm/aaaa`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use tropeiro_common::format::format_date_br;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
/// assert_eq!(format_date_br(date), "05/03/2024");
/// ```
pub fn format_date_br(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Parse a `dd/mm/aaaa` date.
///
/// # Errors
///
/// Returns [`FormatError::InvalidDate`] when the input does not match the
/// pt-BR date shape or names an impossible date.
pub fn parse_date_br(input: &str) -> Result<NaiveDate, FormatError> {
    NaiveDate::parse_from_str(input.trim(), "%d/%m/%Y")
        .map_err(|_| FormatError::InvalidDate(input.to_string()))
}

/// Group a CPF or CNPJ for display
///
/// Eleven digits format as CPF (`000.000.000-00`), fourteen as CNPJ
/// (`00.000.000/0000-00`). Anything else is returned untouched, so partially
/// typed or foreign documents pass through.
///
/// # Examples
///
/// ```
/// use tropeiro_common::format::format_document;
///
/// assert_eq!(format_document("12345678901"), "123.456.789-01");
/// assert_eq!(format_document("12345678000195"), "12.345.678/0001-95");
/// assert_eq!(format_document("123"), "123");
/// ```
pub fn format_document(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    match digits.len() {
        11 => {
            format!("{}.{}.{}-{}", &digits[0..3], &digits[3..6], &digits[6..9], &digits[9..11])
        }
        14 => format!(
            "{}.{}.{}/{}-{}",
            &digits[0..2],
            &digits[2..5],
            &digits[5..8],
            &digits[8..12],
            &digits[12..14]
        ),
        _ => raw.to_string(),
    }
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
