//! Compliance rule values, schemas and entries.
//!
//! A [`ComplianceValue`] travels as `{"which": <type>, "value": <payload>}`
//! where the payload shape is fixed by the type tag:
//!
//! | which | Type | Payload |
//! |-------|------|---------|
//! | 0 | None | `null` |
//! | 1 | Boolean | bool |
//! | 2 | Quantity | raw fixed-point integer |
//! | 3 | Double | number |
//! | 4 | String | string |
//! | 5 | DateTime | RFC3339 UTC string |
//! | 6 | Duration | microseconds |
//! | 7 | Currency | currency id |
//! | 8 | Money | raw fixed-point integer |
//! | 9 | Security | `{symbol, market, country}` |
//! | 10 | List | array of compliance values |

use std::fmt::{Display, Formatter};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::ser::{Error as SerError, SerializeStruct};
use serde::{Deserialize, Serialize, Serializer};

use crate::domain::duration;
use crate::{CurrencyId, DirectoryEntry, Money, Quantity, Security, UtcDateTime, ValidationError};

/// Type tag of a [`ComplianceValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComplianceValueType {
    None,
    Boolean,
    Quantity,
    Double,
    String,
    DateTime,
    Duration,
    Currency,
    Money,
    Security,
    List,
}

impl ComplianceValueType {
    pub const fn which(self) -> i64 {
        match self {
            Self::None => 0,
            Self::Boolean => 1,
            Self::Quantity => 2,
            Self::Double => 3,
            Self::String => 4,
            Self::DateTime => 5,
            Self::Duration => 6,
            Self::Currency => 7,
            Self::Money => 8,
            Self::Security => 9,
            Self::List => 10,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Boolean => "boolean",
            Self::Quantity => "quantity",
            Self::Double => "double",
            Self::String => "string",
            Self::DateTime => "date_time",
            Self::Duration => "duration",
            Self::Currency => "currency",
            Self::Money => "money",
            Self::Security => "security",
            Self::List => "list",
        }
    }
}

impl TryFrom<i64> for ComplianceValueType {
    type Error = ValidationError;

    fn try_from(which: i64) -> Result<Self, Self::Error> {
        let value = match which {
            0 => Self::None,
            1 => Self::Boolean,
            2 => Self::Quantity,
            3 => Self::Double,
            4 => Self::String,
            5 => Self::DateTime,
            6 => Self::Duration,
            7 => Self::Currency,
            8 => Self::Money,
            9 => Self::Security,
            10 => Self::List,
            other => return Err(ValidationError::InvalidComplianceValueType { which: other }),
        };
        Ok(value)
    }
}

impl Display for ComplianceValueType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tagged value held by a compliance rule parameter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawComplianceValue")]
pub enum ComplianceValue {
    None,
    Boolean(bool),
    Quantity(Quantity),
    Double(f64),
    String(String),
    DateTime(UtcDateTime),
    Duration(Duration),
    Currency(CurrencyId),
    Money(Money),
    Security(Security),
    List(Vec<ComplianceValue>),
}

impl ComplianceValue {
    pub const fn value_type(&self) -> ComplianceValueType {
        match self {
            Self::None => ComplianceValueType::None,
            Self::Boolean(_) => ComplianceValueType::Boolean,
            Self::Quantity(_) => ComplianceValueType::Quantity,
            Self::Double(_) => ComplianceValueType::Double,
            Self::String(_) => ComplianceValueType::String,
            Self::DateTime(_) => ComplianceValueType::DateTime,
            Self::Duration(_) => ComplianceValueType::Duration,
            Self::Currency(_) => ComplianceValueType::Currency,
            Self::Money(_) => ComplianceValueType::Money,
            Self::Security(_) => ComplianceValueType::Security,
            Self::List(_) => ComplianceValueType::List,
        }
    }
}

impl Serialize for ComplianceValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("ComplianceValue", 2)?;
        state.serialize_field("which", &self.value_type().which())?;
        match self {
            Self::None => state.serialize_field("value", &())?,
            Self::Boolean(value) => state.serialize_field("value", value)?,
            Self::Quantity(value) => state.serialize_field("value", value)?,
            Self::Double(value) => {
                if !value.is_finite() {
                    return Err(S::Error::custom(format!(
                        "compliance double must be finite, got {value}"
                    )));
                }
                state.serialize_field("value", value)?
            }
            Self::String(value) => state.serialize_field("value", value)?,
            Self::DateTime(value) => state.serialize_field("value", value)?,
            Self::Duration(value) => {
                let micros = duration::to_micros(*value).map_err(S::Error::custom)?;
                state.serialize_field("value", &micros)?
            }
            Self::Currency(value) => state.serialize_field("value", value)?,
            Self::Money(value) => state.serialize_field("value", value)?,
            Self::Security(value) => state.serialize_field("value", value)?,
            Self::List(values) => state.serialize_field("value", values)?,
        }
        state.end()
    }
}

#[derive(Deserialize)]
struct RawComplianceValue {
    which: i64,
    #[serde(default)]
    value: serde_json::Value,
}

impl TryFrom<RawComplianceValue> for ComplianceValue {
    type Error = ValidationError;

    fn try_from(raw: RawComplianceValue) -> Result<Self, Self::Error> {
        let value_type = ComplianceValueType::try_from(raw.which)?;
        let payload = raw.value;
        let value = match value_type {
            ComplianceValueType::None => Self::None,
            ComplianceValueType::Boolean => Self::Boolean(decode(value_type, payload)?),
            ComplianceValueType::Quantity => Self::Quantity(decode(value_type, payload)?),
            ComplianceValueType::Double => Self::Double(decode(value_type, payload)?),
            ComplianceValueType::String => Self::String(decode(value_type, payload)?),
            ComplianceValueType::DateTime => Self::DateTime(decode(value_type, payload)?),
            ComplianceValueType::Duration => {
                let micros: i64 = decode(value_type, payload)?;
                let value = duration::from_micros(micros).map_err(|reason| {
                    ValidationError::MalformedComplianceValue {
                        which: value_type.as_str(),
                        reason,
                    }
                })?;
                Self::Duration(value)
            }
            ComplianceValueType::Currency => Self::Currency(decode(value_type, payload)?),
            ComplianceValueType::Money => Self::Money(decode(value_type, payload)?),
            ComplianceValueType::Security => Self::Security(decode(value_type, payload)?),
            ComplianceValueType::List => Self::List(decode(value_type, payload)?),
        };
        Ok(value)
    }
}

fn decode<T: DeserializeOwned>(
    value_type: ComplianceValueType,
    payload: serde_json::Value,
) -> Result<T, ValidationError> {
    serde_json::from_value(payload).map_err(|error| ValidationError::MalformedComplianceValue {
        which: value_type.as_str(),
        reason: error.to_string(),
    })
}

/// Named slot of a rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceParameter {
    pub name: String,
    pub value: ComplianceValue,
}

impl ComplianceParameter {
    pub fn new(name: impl Into<String>, value: ComplianceValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Template describing a rule type and its parameters with default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceRuleSchema {
    pub name: String,
    pub parameters: Vec<ComplianceParameter>,
}

impl ComplianceRuleSchema {
    pub fn new(name: impl Into<String>, parameters: Vec<ComplianceParameter>) -> Self {
        Self {
            name: name.into(),
            parameters,
        }
    }

    pub fn parameter(&self, name: &str) -> Option<&ComplianceParameter> {
        self.parameters.iter().find(|parameter| parameter.name == name)
    }
}

/// Enforcement state of a rule entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum ComplianceRuleEntryState {
    /// Violations are rejected.
    Active,
    /// Violations are only reported.
    Passive,
    Disabled,
    Deleted,
}

impl TryFrom<i32> for ComplianceRuleEntryState {
    type Error = ValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Active),
            1 => Ok(Self::Passive),
            2 => Ok(Self::Disabled),
            3 => Ok(Self::Deleted),
            other => Err(ValidationError::InvalidComplianceRuleState { value: other }),
        }
    }
}

impl From<ComplianceRuleEntryState> for i32 {
    fn from(value: ComplianceRuleEntryState) -> Self {
        match value {
            ComplianceRuleEntryState::Active => 0,
            ComplianceRuleEntryState::Passive => 1,
            ComplianceRuleEntryState::Disabled => 2,
            ComplianceRuleEntryState::Deleted => 3,
        }
    }
}

/// A rule instance applied to a directory entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceRuleEntry {
    pub id: u64,
    pub directory_entry: DirectoryEntry,
    pub state: ComplianceRuleEntryState,
    pub schema: ComplianceRuleSchema,
}

impl ComplianceRuleEntry {
    pub fn new(
        id: u64,
        directory_entry: DirectoryEntry,
        state: ComplianceRuleEntryState,
        schema: ComplianceRuleSchema,
    ) -> Self {
        Self {
            id,
            directory_entry,
            state,
            schema,
        }
    }

    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    pub fn from_json(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn encodes_tag_and_payload() {
        let value = ComplianceValue::Money(Money::parse("1234.56").expect("money"));
        assert_eq!(
            serde_json::to_value(&value).expect("encode"),
            json!({"which": 8, "value": 1_234_560_000i64})
        );
        assert_eq!(
            serde_json::to_value(ComplianceValue::None).expect("encode"),
            json!({"which": 0, "value": null})
        );
    }

    #[test]
    fn decodes_nested_list() {
        let value: ComplianceValue = serde_json::from_value(json!({
            "which": 10,
            "value": [
                {"which": 9, "value": {"symbol": "AST", "market": "XASX", "country": 36}},
                {"which": 6, "value": 16000}
            ]
        }))
        .expect("decode");

        let ComplianceValue::List(items) = value else {
            panic!("expected list");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].value_type(), ComplianceValueType::Security);
        assert_eq!(items[1], ComplianceValue::Duration(Duration::from_millis(16)));
    }

    #[test]
    fn rejects_payload_that_does_not_match_tag() {
        let err = serde_json::from_value::<ComplianceValue>(json!({"which": 1, "value": "yes"}))
            .expect_err("must fail");
        assert!(err.to_string().contains("boolean"));
    }

    #[test]
    fn rejects_unknown_tag() {
        let err = serde_json::from_value::<ComplianceValue>(json!({"which": 42, "value": 1}))
            .expect_err("must fail");
        assert!(err.to_string().contains("unknown compliance value type 42"));
    }

    #[test]
    fn non_finite_doubles_are_not_encoded() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = serde_json::to_value(ComplianceValue::Double(value))
                .expect_err("non-finite double");
            assert!(err.to_string().contains("finite"), "{err}");
        }
        assert_eq!(
            serde_json::to_value(ComplianceValue::Double(0.5)).expect("encode"),
            json!({"which": 3, "value": 0.5})
        );
    }

    #[test]
    fn duration_payload_rejects_inexact_values() {
        let err = serde_json::to_value(ComplianceValue::Duration(Duration::from_nanos(1_500)))
            .expect_err("sub-microsecond");
        assert!(err.to_string().contains("whole number of microseconds"), "{err}");

        let err = serde_json::from_value::<ComplianceValue>(json!({"which": 6, "value": -5}))
            .expect_err("negative");
        assert!(err.to_string().contains("non-negative"), "{err}");
    }

    #[test]
    fn rule_state_travels_as_integer() {
        assert_eq!(
            serde_json::to_value(ComplianceRuleEntryState::Disabled).expect("encode"),
            json!(2)
        );
        assert!(serde_json::from_value::<ComplianceRuleEntryState>(json!(7)).is_err());
    }
}
