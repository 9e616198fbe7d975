//! Lexical primitives: string, number and keyword literals.
//!
//! Every function starts at the lookahead of the given [`Cursor`] and stops
//! right after the last character of its token. Whitespace around tokens is
//! the caller's business.

use std::str::FromStr;

use rust_decimal::Decimal;

use super::cursor::{describe, Cursor};
use crate::{core::source::CharSource, error::JsonResult};

// Largest scale a `Decimal` can carry.
const MAX_SCALE: u32 = 28;

/// Reads a quoted string literal and returns its decoded text.
pub fn read_string<S: CharSource>(cursor: &mut Cursor<S>) -> JsonResult<String> {
    if cursor.peek() != Some('"') {
        return Err(cursor.grammar(format!(
            "expected '\"' but found {}",
            describe(cursor.peek())
        )));
    }
    cursor.bump()?;

    let mut text = String::new();
    loop {
        match cursor.peek() {
            None => return Err(cursor.lexical("unterminated string")),
            Some('"') => {
                cursor.bump()?;
                return Ok(text);
            }
            Some('\\') => {
                cursor.bump()?;
                text.push(read_escape(cursor)?);
            }
            Some(c) if c < '\u{20}' => {
                return Err(cursor.lexical(format!(
                    "control character '{}' in string",
                    c.escape_debug()
                )));
            }
            Some(c) => {
                text.push(c);
                cursor.bump()?;
            }
        }
    }
}

// Decodes the escape following a backslash.
fn read_escape<S: CharSource>(cursor: &mut Cursor<S>) -> JsonResult<char> {
    let decoded = match cursor.peek() {
        None => return Err(cursor.lexical("unterminated escape sequence")),
        Some('"') => '"',
        Some('\\') => '\\',
        Some('/') => '/',
        Some('b') => '\u{8}',
        Some('f') => '\u{c}',
        Some('n') => '\n',
        Some('r') => '\r',
        Some('t') => '\t',
        Some('u') => {
            cursor.bump()?;
            return read_unicode_escape(cursor);
        }
        Some(c) => {
            return Err(cursor.lexical(format!(
                "invalid escape sequence '\\{}'",
                c.escape_debug()
            )));
        }
    };
    cursor.bump()?;
    Ok(decoded)
}

// Decodes `XXXX` after `\u`, pairing surrogates when needed.
fn read_unicode_escape<S: CharSource>(cursor: &mut Cursor<S>) -> JsonResult<char> {
    let unit = read_hex4(cursor)?;

    match unit {
        0xd800..=0xdbff => {
            if cursor.peek() != Some('\\') {
                return Err(cursor.lexical("unpaired surrogate in string"));
            }
            cursor.bump()?;
            if cursor.peek() != Some('u') {
                return Err(cursor.lexical("unpaired surrogate in string"));
            }
            cursor.bump()?;

            let trail = read_hex4(cursor)?;
            if !(0xdc00..=0xdfff).contains(&trail) {
                return Err(cursor.lexical("unpaired surrogate in string"));
            }
            let code = 0x10000 + ((unit - 0xd800) << 10) + (trail - 0xdc00);
            char::from_u32(code).ok_or_else(|| cursor.lexical("invalid surrogate pair"))
        }
        0xdc00..=0xdfff => Err(cursor.lexical("unpaired surrogate in string")),
        _ => char::from_u32(unit).ok_or_else(|| cursor.lexical("invalid unicode escape")),
    }
}

fn read_hex4<S: CharSource>(cursor: &mut Cursor<S>) -> JsonResult<u32> {
    let mut unit = 0;
    for _ in 0..4 {
        let digit = match cursor.peek() {
            None => return Err(cursor.lexical("unterminated escape sequence")),
            Some(c) => c.to_digit(16).ok_or_else(|| {
                cursor.lexical(format!(
                    "invalid hex digit '{}' in unicode escape",
                    c.escape_debug()
                ))
            })?,
        };
        unit = (unit << 4) | digit;
        cursor.bump()?;
    }
    Ok(unit)
}

fn is_number_char(c: char) -> bool {
    matches!(c, '0'..='9' | 'e' | 'E' | '+' | '-' | '.')
}

/// Reads the maximal run of number characters and converts it.
///
/// The run itself is not checked against the JSON number grammar; that is
/// left to [`parse_decimal`].
pub fn read_number<S: CharSource>(cursor: &mut Cursor<S>) -> JsonResult<Decimal> {
    let mut text = String::new();
    while let Some(c) = cursor.peek().filter(|c| is_number_char(*c)) {
        text.push(c);
        cursor.bump()?;
    }

    if text.is_empty() {
        return Err(cursor.grammar(format!(
            "expected a number but found {}",
            describe(cursor.peek())
        )));
    }

    parse_decimal(&text).map_err(|reason| cursor.lexical(format!("'{}' {}", text, reason)))
}

/// Converts number text of the form `-?[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?`
/// into a decimal.
///
/// Fractional digits beyond the decimal precision are rounded; magnitudes
/// beyond its range are rejected.
pub fn parse_decimal(text: &str) -> Result<Decimal, &'static str> {
    let bytes = text.as_bytes();
    let mut pos = 0;

    if bytes.first() == Some(&b'-') {
        pos += 1;
    }
    let digits = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let int_len = digits(pos);
    if int_len == 0 {
        return Err("is not a valid number");
    }
    pos += int_len;

    if bytes.get(pos) == Some(&b'.') {
        let frac_len = digits(pos + 1);
        if frac_len == 0 {
            return Err("is not a valid number");
        }
        pos += 1 + frac_len;
    }
    let mantissa_end = pos;

    let mut exponent: i64 = 0;
    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        pos += 1;
        let negative = match bytes.get(pos) {
            Some(b'-') => {
                pos += 1;
                true
            }
            Some(b'+') => {
                pos += 1;
                false
            }
            _ => false,
        };
        let exp_len = digits(pos);
        if exp_len == 0 {
            return Err("is not a valid number");
        }
        for b in &bytes[pos..pos + exp_len] {
            exponent = exponent
                .saturating_mul(10)
                .saturating_add(i64::from(b - b'0'));
        }
        if negative {
            exponent = -exponent;
        }
        pos += exp_len;
    }

    if pos != bytes.len() {
        return Err("is not a valid number");
    }

    let mantissa =
        Decimal::from_str(&text[..mantissa_end]).map_err(|_| "is out of the decimal range")?;
    scale_by_exponent(mantissa, exponent).ok_or("is out of the decimal range")
}

// Multiplies `value` by 10^exponent, preferring exact scale adjustments.
fn scale_by_exponent(mut value: Decimal, mut exponent: i64) -> Option<Decimal> {
    if value.is_zero() || exponent == 0 {
        return Some(value);
    }

    if exponent > 0 {
        while exponent > 0 && value.scale() > 0 {
            value.set_scale(value.scale() - 1).ok()?;
            exponent -= 1;
        }
        while exponent > 0 {
            value = value.checked_mul(Decimal::TEN)?;
            exponent -= 1;
        }
        return Some(value);
    }

    let shift = exponent.unsigned_abs();
    let target = u64::from(value.scale()) + shift;
    if target <= u64::from(MAX_SCALE) {
        value.set_scale(target as u32).ok()?;
        return Some(value);
    }

    // Past the maximum scale the value is rounded digit by digit and ends up
    // as zero for very small magnitudes.
    for _ in 0..shift.min(u64::from(MAX_SCALE) * 3) {
        value = value.checked_div(Decimal::TEN)?;
        if value.is_zero() {
            break;
        }
    }
    Some(value)
}

/// Consumes `word` (`true`, `false` or `null`) character by character.
pub fn read_keyword<S: CharSource>(cursor: &mut Cursor<S>, word: &str) -> JsonResult<()> {
    for expected in word.chars() {
        match cursor.peek() {
            Some(c) if c == expected => {
                cursor.bump()?;
            }
            other => {
                return Err(cursor.grammar(format!(
                    "expected '{}' of literal '{}' but found {}",
                    expected,
                    word,
                    describe(other)
                )));
            }
        }
    }
    Ok(())
}
