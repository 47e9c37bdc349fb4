//! Decimal-to-Wei conversion and payload field lookup
//!
//! Upstream APIs report prices as JSON numbers or numeric strings in
//! Gwei-like units. Conversion works on the decimal text so that
//! `"53.323842299"` Gwei becomes exactly `53_323_842_299` Wei; digits below
//! one Wei are truncated.

use crate::error::ProviderError;
use serde_json::Value;

#[derive(Debug, PartialEq, Eq)]
enum ScaleError {
    NotANumber,
    Overflow,
}

/// Looks up a nested key, e.g. `["result", "FastGasPrice"]`
pub fn field<'a>(payload: &'a Value, path: &[&str]) -> Result<&'a Value, ProviderError> {
    path.iter()
        .try_fold(payload, |node, key| node.get(*key))
        .ok_or_else(|| ProviderError::missing(path.join(".")))
}

/// Reads a nested value and scales it by `10^decimals` into Wei
pub fn wei_at(payload: &Value, path: &[&str], decimals: u32) -> Result<u64, ProviderError> {
    to_wei(field(payload, path)?, decimals).map_err(|e| with_path(e, path))
}

/// Reads a nested non-negative integer, such as a wait time in milliseconds
pub fn integer_at(payload: &Value, path: &[&str]) -> Result<u64, ProviderError> {
    wei_at(payload, path, 0)
}

/// Scales a JSON number or numeric string by `10^decimals`
pub fn to_wei(value: &Value, decimals: u32) -> Result<u64, ProviderError> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        other => return Err(ProviderError::invalid("", other)),
    };

    scale_decimal(&text, decimals).map_err(|e| match e {
        ScaleError::NotANumber => ProviderError::invalid("", &text),
        ScaleError::Overflow => ProviderError::Overflow(text.clone()),
    })
}

fn with_path(err: ProviderError, path: &[&str]) -> ProviderError {
    match err {
        ProviderError::InvalidField { value, .. } => ProviderError::InvalidField {
            field: path.join("."),
            value,
        },
        ProviderError::Overflow(_) => ProviderError::Overflow(path.join(".")),
        other => other,
    }
}

fn scale_decimal(text: &str, decimals: u32) -> Result<u64, ScaleError> {
    let (mantissa, exponent) = match text.find(|c: char| c == 'e' || c == 'E') {
        Some(pos) => {
            let exp = text[pos + 1..]
                .parse::<i64>()
                .map_err(|_| ScaleError::NotANumber)?;
            (&text[..pos], exp)
        }
        None => (text, 0),
    };

    let mantissa = mantissa.strip_prefix('+').unwrap_or(mantissa);
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (int_part.is_empty() && frac_part.is_empty())
        || !is_digits(int_part)
        || !is_digits(frac_part)
    {
        return Err(ScaleError::NotANumber);
    }

    let digits = format!("{int_part}{frac_part}");
    let shift = i64::try_from(frac_part.len())
        .ok()
        .and_then(|frac_len| i64::from(decimals).checked_add(exponent)?.checked_sub(frac_len))
        .ok_or(ScaleError::Overflow)?;

    let (kept, zeros) = if shift >= 0 {
        (digits.as_str(), shift as u64)
    } else {
        let drop = shift.unsigned_abs() as usize;
        (&digits[..digits.len().saturating_sub(drop)], 0)
    };

    let mut value: u128 = 0;
    for b in kept.bytes() {
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u128::from(b - b'0')))
            .ok_or(ScaleError::Overflow)?;
    }
    if value != 0 {
        let factor = u32::try_from(zeros)
            .ok()
            .and_then(|z| 10u128.checked_pow(z))
            .ok_or(ScaleError::Overflow)?;
        value = value.checked_mul(factor).ok_or(ScaleError::Overflow)?;
    }

    u64::try_from(value).map_err(|_| ScaleError::Overflow)
}
