//! Reference data shared by every page: currencies, countries, markets and
//! securities.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Numeric ISO 4217 currency id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyId(pub u16);

impl CurrencyId {
    pub const NONE: Self = Self(0);
}

/// Numeric ISO 3166 country code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryCode(pub u16);

impl CountryCode {
    pub const NONE: Self = Self(0);
}

/// Market identifier code, e.g. `XTSE`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketCode(pub String);

impl MarketCode {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A listed security.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Security {
    pub symbol: String,
    pub market: MarketCode,
    pub country: CountryCode,
}

impl Security {
    pub fn new(symbol: impl Into<String>, market: MarketCode, country: CountryCode) -> Self {
        Self {
            symbol: symbol.into(),
            market,
            country,
        }
    }
}

impl Display for Security {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.market.as_str().is_empty() {
            f.write_str(&self.symbol)
        } else {
            write!(f, "{}.{}", self.symbol, self.market.as_str())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyEntry {
    pub id: CurrencyId,
    pub code: String,
    pub sign: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyDatabase {
    pub entries: Vec<CurrencyEntry>,
}

impl CurrencyDatabase {
    pub fn from_id(&self, id: CurrencyId) -> Option<&CurrencyEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Looks up a currency by its ISO code, case-insensitively.
    pub fn from_code(&self, code: &str) -> Result<Option<&CurrencyEntry>, ValidationError> {
        let normalized = validate_currency_code(code)?;
        Ok(self.entries.iter().find(|entry| entry.code == normalized))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryEntry {
    pub code: CountryCode,
    pub name: String,
    pub two_letter_code: String,
    pub three_letter_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryDatabase {
    pub entries: Vec<CountryEntry>,
}

impl CountryDatabase {
    pub fn from_code(&self, code: CountryCode) -> Option<&CountryEntry> {
        self.entries.iter().find(|entry| entry.code == code)
    }

    pub fn from_letter_code(&self, code: &str) -> Option<&CountryEntry> {
        let code = code.trim();
        self.entries.iter().find(|entry| {
            entry.two_letter_code.eq_ignore_ascii_case(code)
                || entry.three_letter_code.eq_ignore_ascii_case(code)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketEntry {
    pub code: MarketCode,
    pub country_code: CountryCode,
    pub time_zone: String,
    pub currency: CurrencyId,
    pub board_lot: u32,
    pub description: String,
    pub display_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketDatabase {
    pub entries: Vec<MarketEntry>,
}

impl MarketDatabase {
    pub fn from_code(&self, code: &MarketCode) -> Option<&MarketEntry> {
        self.entries.iter().find(|entry| &entry.code == code)
    }

    pub fn from_display_name(&self, name: &str) -> Option<&MarketEntry> {
        self.entries
            .iter()
            .find(|entry| entry.display_name.eq_ignore_ascii_case(name.trim()))
    }
}

/// Validate and normalize currency to uppercase 3-letter code.
pub fn validate_currency_code(input: &str) -> Result<String, ValidationError> {
    let normalized = input.trim().to_ascii_uppercase();
    let is_valid = normalized.len() == 3 && normalized.chars().all(|ch| ch.is_ascii_alphabetic());

    if !is_valid {
        return Err(ValidationError::InvalidCurrency {
            value: input.to_owned(),
        });
    }

    Ok(normalized)
}
