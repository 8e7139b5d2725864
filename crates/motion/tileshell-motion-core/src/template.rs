//! String templates with embedded numeric tokens.
//!
//! `"perspective(1000px) rotateY(-60deg)"` splits into literal runs
//! `["perspective(", ") rotateY(", ")"]` and tokens `1000px`, `-60deg`.
//! Each token's number can be interpolated on its own and the string is
//! rebuilt with the literal text and units untouched.

use serde::{Deserialize, Serialize};

/// Digits kept after the decimal point when rebuilding strings.
pub const DEFAULT_PRECISION: usize = 3;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NumericToken {
    pub value: f64,
    /// Unit suffix (`px`, `deg`, `%`, ...), possibly empty.
    pub unit: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StringTemplate {
    /// Literal text around the tokens; always `tokens.len() + 1` entries.
    pub literals: Vec<String>,
    pub tokens: Vec<NumericToken>,
}

impl StringTemplate {
    /// Split `source` into literals and numeric tokens. Returns `None` when
    /// the string holds no numeric token.
    pub fn parse(source: &str) -> Option<Self> {
        let bytes = source.as_bytes();
        let mut literals = Vec::new();
        let mut tokens = Vec::new();
        let mut literal_start = 0;
        let mut i = 0;

        while i < bytes.len() {
            match scan_token(bytes, i) {
                Some((number_end, token_end)) => {
                    let value = source[i..number_end].parse::<f64>().ok();
                    match value {
                        Some(value) if value.is_finite() => {
                            literals.push(source[literal_start..i].to_string());
                            tokens.push(NumericToken {
                                value,
                                unit: source[number_end..token_end].to_string(),
                            });
                            literal_start = token_end;
                        }
                        _ => {}
                    }
                    i = token_end;
                }
                None => i += 1,
            }
        }

        if tokens.is_empty() {
            return None;
        }
        literals.push(source[literal_start..].to_string());
        Some(Self { literals, tokens })
    }

    /// Numeric components of every token, in order.
    pub fn values(&self) -> Vec<f64> {
        self.tokens.iter().map(|t| t.value).collect()
    }

    /// Two templates can be interpolated when their literal text and units match.
    pub fn is_compatible(&self, other: &StringTemplate) -> bool {
        self.literals == other.literals
            && self.tokens.len() == other.tokens.len()
            && self
                .tokens
                .iter()
                .zip(&other.tokens)
                .all(|(a, b)| a.unit == b.unit)
    }

    /// Rebuild the string with new token values. Missing values keep the
    /// template's own.
    pub fn build(&self, values: &[f64], precision: usize) -> String {
        let mut out = String::with_capacity(self.literals.iter().map(String::len).sum::<usize>() + 8 * self.tokens.len());
        for (i, token) in self.tokens.iter().enumerate() {
            out.push_str(&self.literals[i]);
            let value = values.get(i).copied().unwrap_or(token.value);
            out.push_str(&format_number(value, precision));
            out.push_str(&token.unit);
        }
        if let Some(tail) = self.literals.last() {
            out.push_str(tail);
        }
        out
    }
}

/// Format a number the way CSS expects: fixed precision, trailing zeros
/// trimmed, no negative zero.
pub fn format_number(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let mut s = format!("{:.*}", precision, value);
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(trimmed);
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

/// Returns `(end_of_number, end_of_unit)` when a numeric token starts at `start`.
fn scan_token(bytes: &[u8], start: usize) -> Option<(usize, usize)> {
    if start > 0 {
        let prev = bytes[start - 1];
        if prev.is_ascii_alphanumeric() || prev == b'_' || prev == b'#' || prev == b'.' {
            return None;
        }
    }

    let mut i = start;
    if matches!(bytes[i], b'+' | b'-') {
        i += 1;
    }
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut has_digits = i > int_start;
    if i + 1 < bytes.len() && bytes[i] == b'.' && bytes[i + 1].is_ascii_digit() {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        has_digits = true;
    }
    if !has_digits {
        return None;
    }

    // exponent only when digits follow, so `1em` keeps its unit
    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        let mut j = i + 1;
        if j < bytes.len() && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        if j < bytes.len() && bytes[j].is_ascii_digit() {
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            i = j;
        }
    }
    let number_end = i;

    while i < bytes.len() && (bytes[i].is_ascii_alphabetic() || bytes[i] == b'%') {
        i += 1;
    }
    Some((number_end, i))
}
