//! Text conversions
//!
//! Pure functions turning raw setting text into typed values and back:
//! - `tokenize` splits vector text on whitespace, commas and parentheses
//! - `parse_int` / `parse_float` use leading-prefix semantics (trailing junk is ignored)
//! - `format_*` produce the canonical text written by setters

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Separates vector elements and the key from the value on a settings line
static DELIMITERS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s,()]+").unwrap());

/// Leading integer prefix: optional sign then ASCII digits
static INT_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([+-]?)([0-9]+)").unwrap());

/// Leading float prefix: ASCII decimal with optional exponent, or inf/infinity/nan
static FLOAT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*([+-]?(?:(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?|(?i:infinity|inf|nan)))",
    )
    .unwrap()
});

/// How vector setters join elements into raw text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VectorFormat {
    /// Elements separated by a single space; re-parseable by the vector getters
    #[default]
    Spaced,
    /// Elements concatenated with no separator (legacy, not re-parseable)
    Concatenated,
}

impl VectorFormat {
    fn separator(self) -> &'static str {
        match self {
            Self::Spaced => " ",
            Self::Concatenated => "",
        }
    }
}

/// Split text into tokens on any run of whitespace, `,`, `(` or `)`.
///
/// Empty tokens are dropped, so `""` and `" , ()"` both yield no tokens.
pub fn tokenize(text: &str) -> Vec<&str> {
    DELIMITERS.split(text).filter(|t| !t.is_empty()).collect()
}

/// Split off the first token of a line, returning it with the remainder.
///
/// The remainder starts after the single delimiter character that ended the
/// token and has leading whitespace trimmed; it keeps any further delimiters.
pub fn split_first_token(line: &str) -> Option<(&str, &str)> {
    let start = line.find(|c: char| !is_delimiter(c))?;
    let rest = &line[start..];
    match rest.find(is_delimiter) {
        Some(end) => {
            let delim_len = rest[end..].chars().next().map_or(0, char::len_utf8);
            Some((&rest[..end], rest[end + delim_len..].trim_start()))
        }
        None => Some((rest, "")),
    }
}

/// Whether `c` separates tokens
pub fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, ',' | '(' | ')')
}

/// Whether a `name` / `raw` pair is written to a settings file in a form that
/// loads back unchanged.
///
/// The name must be a single token that does not start a comment; the value
/// must fit on one line and not start with whitespace.
pub fn survives_round_trip(name: &str, raw: &str) -> bool {
    !name.is_empty()
        && !name.contains(is_delimiter)
        && !name.starts_with('#')
        && !raw.contains(['\n', '\r'])
        && !raw.starts_with(char::is_whitespace)
}

/// Parse the leading integer of `text`.
///
/// Leading whitespace and a sign are accepted; parsing stops at the first
/// non-digit. Text without digits yields 0, out-of-range values saturate.
pub fn parse_int(text: &str) -> i64 {
    let Some(caps) = INT_PREFIX.captures(text) else {
        return 0;
    };
    let negative = &caps[1] == "-";
    let digits = &caps[2];
    let signed = if negative {
        format!("-{}", digits)
    } else {
        digits.to_string()
    };
    // Digits are ASCII, so the only parse failure left is overflow
    signed.parse().unwrap_or(if negative { i64::MIN } else { i64::MAX })
}

/// Parse the leading floating-point number of `text`, or 0.0 if there is none
pub fn parse_float(text: &str) -> f64 {
    FLOAT_PREFIX
        .captures(text)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(0.0)
}

/// Parse every token of `text` as an integer
pub fn parse_int_vec(text: &str) -> Vec<i64> {
    tokenize(text).into_iter().map(parse_int).collect()
}

/// Parse every token of `text` as a float
pub fn parse_float_vec(text: &str) -> Vec<f64> {
    tokenize(text).into_iter().map(parse_float).collect()
}

/// Collect the tokens of `text` as owned strings
pub fn parse_string_vec(text: &str) -> Vec<String> {
    tokenize(text).into_iter().map(str::to_string).collect()
}

/// Canonical text for an integer
pub fn format_int(value: i64) -> String {
    value.to_string()
}

/// Canonical text for a float: fixed notation, six fractional digits
pub fn format_float(value: f64) -> String {
    format!("{:.6}", value)
}

pub fn format_int_vec(values: &[i64], format: VectorFormat) -> String {
    join(values.iter().map(|v| format_int(*v)), format)
}

pub fn format_float_vec(values: &[f64], format: VectorFormat) -> String {
    join(values.iter().map(|v| format_float(*v)), format)
}

pub fn format_string_vec(values: &[String], format: VectorFormat) -> String {
    values.join(format.separator())
}

fn join(parts: impl Iterator<Item = String>, format: VectorFormat) -> String {
    parts.collect::<Vec<_>>().join(format.separator())
}

/// Whether `token` is, in full, an integer literal
pub fn is_int_literal(token: &str) -> bool {
    token.parse::<i64>().is_ok()
}

/// Whether `token` is, in full, a float literal
pub fn is_float_literal(token: &str) -> bool {
    token.parse::<f64>().is_ok()
}
