use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Decimal places carried by [`Money`] and [`Quantity`].
pub const DECIMAL_PLACES: u32 = 6;
const MULTIPLIER: i64 = 10i64.pow(DECIMAL_PLACES);

/// Monetary amount with six decimal places, serialized as its raw integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

/// Share/contract count with six decimal places, serialized as its raw integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(i64);

impl Money {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(MULTIPLIER);

    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> i64 {
        self.0
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        parse_fixed(input).map(Self)
    }
}

impl Quantity {
    pub const ZERO: Self = Self(0);

    pub const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    pub fn from_integer(value: i64) -> Result<Self, ValidationError> {
        value
            .checked_mul(MULTIPLIER)
            .map(Self)
            .ok_or_else(|| ValidationError::FixedPointOverflow {
                value: value.to_string(),
            })
    }

    pub const fn raw(self) -> i64 {
        self.0
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        parse_fixed(input).map(Self)
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_fixed(self.0, 2))
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_fixed(self.0, 0))
    }
}

impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl FromStr for Quantity {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

fn parse_fixed(input: &str) -> Result<i64, ValidationError> {
    let invalid = || ValidationError::InvalidFixedPoint {
        value: input.to_owned(),
    };
    let overflow = || ValidationError::FixedPointOverflow {
        value: input.to_owned(),
    };

    let trimmed = input.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if !whole.chars().all(|ch| ch.is_ascii_digit())
        || !fraction.chars().all(|ch| ch.is_ascii_digit())
        || fraction.len() > DECIMAL_PLACES as usize
    {
        return Err(invalid());
    }

    let whole_value = if whole.is_empty() {
        0
    } else {
        whole.parse::<i64>().map_err(|_| overflow())?
    };
    let fraction_value = if fraction.is_empty() {
        0
    } else {
        let padded = format!("{fraction:0<width$}", width = DECIMAL_PLACES as usize);
        padded.parse::<i64>().map_err(|_| invalid())?
    };

    let magnitude = whole_value
        .checked_mul(MULTIPLIER)
        .and_then(|value| value.checked_add(fraction_value))
        .ok_or_else(overflow)?;
    Ok(if negative { -magnitude } else { magnitude })
}

fn format_fixed(raw: i64, min_decimals: usize) -> String {
    let sign = if raw < 0 { "-" } else { "" };
    let magnitude = raw.unsigned_abs();
    let multiplier = MULTIPLIER as u64;
    let whole = magnitude / multiplier;
    let fraction = format!(
        "{:0width$}",
        magnitude % multiplier,
        width = DECIMAL_PLACES as usize
    );
    let mut fraction = fraction.trim_end_matches('0').to_owned();
    while fraction.len() < min_decimals {
        fraction.push('0');
    }
    if fraction.is_empty() {
        format!("{sign}{whole}")
    } else {
        format!("{sign}{whole}.{fraction}")
    }
}
