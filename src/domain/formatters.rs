//! Input masks and format checks for Brazilian documents, dates and phones.
//!
//! Every mask strips non-digits first, truncates to the document's length and
//! then inserts separators only for the digits already typed, so a partial
//! value is always a valid prefix of the full mask.

use std::sync::LazyLock;

use regex::Regex;

const CPF_DIGITS: usize = 11;
const CNPJ_DIGITS: usize = 14;
const DATE_DIGITS: usize = 8;
const PHONE_DIGITS: usize = 11;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Keep only ASCII digits, truncated to `limit`.
fn digits(input: &str, limit: usize) -> String {
    input.chars().filter(char::is_ascii_digit).take(limit).collect()
}

pub fn strip_non_digits(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Insert `separators[i].1` before the digit at offset `separators[i].0`,
/// skipping separators beyond the typed length.
fn mask(digits: &str, separators: &[(usize, char)]) -> String {
    let mut out = String::with_capacity(digits.len() + separators.len());
    for (i, c) in digits.chars().enumerate() {
        if let Some((_, sep)) = separators.iter().find(|(at, _)| *at == i) {
            out.push(*sep);
        }
        out.push(c);
    }
    out
}

/// `12345678900` -> `123.456.789-00`
pub fn format_cpf(input: &str) -> String {
    mask(&digits(input, CPF_DIGITS), &[(3, '.'), (6, '.'), (9, '-')])
}

/// `12345678000190` -> `12.345.678/0001-90`
pub fn format_cnpj(input: &str) -> String {
    mask(
        &digits(input, CNPJ_DIGITS),
        &[(2, '.'), (5, '.'), (8, '/'), (12, '-')],
    )
}

/// Picks the CNPJ mask once 14 digits are present, the CPF mask otherwise.
pub fn format_document(input: &str) -> String {
    if strip_non_digits(input).len() >= CNPJ_DIGITS {
        format_cnpj(input)
    } else {
        format_cpf(input)
    }
}

/// `25031992` -> `25/03/1992`
pub fn format_date(input: &str) -> String {
    mask(&digits(input, DATE_DIGITS), &[(2, '/'), (4, '/')])
}

/// `11987654321` -> `(11) 98765-4321`, `1133334444` -> `(11) 3333-4444`
pub fn format_phone(input: &str) -> String {
    let d = digits(input, PHONE_DIGITS);
    match d.len() {
        0 => String::new(),
        1..=2 => format!("({d}"),
        3..=6 => format!("({}) {}", &d[..2], &d[2..]),
        7..=10 => format!("({}) {}-{}", &d[..2], &d[2..6], &d[6..]),
        _ => format!("({}) {}-{}", &d[..2], &d[2..7], &d[7..]),
    }
}

pub fn unformat_cpf(input: &str) -> String {
    strip_non_digits(input)
}

pub fn unformat_cnpj(input: &str) -> String {
    strip_non_digits(input)
}

pub fn unformat_phone(input: &str) -> String {
    strip_non_digits(input)
}

pub fn unformat_document(input: &str) -> String {
    strip_non_digits(input)
}

/// `25/03/1992` -> `1992-03-25`. Anything that is not exactly eight digits
/// after stripping is returned unchanged.
pub fn format_date_to_db(input: &str) -> String {
    let d = strip_non_digits(input);
    if d.len() != DATE_DIGITS {
        return input.to_string();
    }
    format!("{}-{}-{}", &d[4..8], &d[2..4], &d[..2])
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

// Length checks only; no check-digit verification.
pub fn is_valid_cpf(input: &str) -> bool {
    strip_non_digits(input).len() == CPF_DIGITS
}

pub fn is_valid_cnpj(input: &str) -> bool {
    strip_non_digits(input).len() == CNPJ_DIGITS
}

pub fn is_valid_document(input: &str) -> bool {
    is_valid_cpf(input) || is_valid_cnpj(input)
}

pub fn is_valid_phone(input: &str) -> bool {
    matches!(strip_non_digits(input).len(), 10 | 11)
}

/// Trim and treat blank input as absent.
pub fn non_blank(input: Option<&str>) -> Option<String> {
    input
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Prefix `https://` when the URL carries no scheme.
pub fn normalize_url(input: Option<&str>) -> Option<String> {
    non_blank(input).map(|url| {
        if url.starts_with("http://") || url.starts_with("https://") {
            url
        } else {
            format!("https://{url}")
        }
    })
}

/// Social handles are stored as `@handle`; full URLs are kept as URLs.
pub fn normalize_social_handle(input: Option<&str>) -> Option<String> {
    non_blank(input).map(|handle| {
        if handle.starts_with('@') || handle.contains("://") {
            handle
        } else {
            format!("@{handle}")
        }
    })
}

pub fn normalize_email(input: Option<&str>) -> Option<String> {
    non_blank(input).map(|email| email.to_lowercase())
}

pub fn normalize_phone(input: Option<&str>) -> Option<String> {
    non_blank(input)
        .map(|phone| unformat_phone(&phone))
        .filter(|phone| !phone.is_empty())
}
