use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{CurrencyId, Money, UtcDateTime, ValidationError};

/// Trading permission level enforced by the risk service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum RiskStateType {
    #[default]
    Active,
    CloseOrders,
    Disabled,
}

impl TryFrom<i32> for RiskStateType {
    type Error = ValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Active),
            1 => Ok(Self::CloseOrders),
            2 => Ok(Self::Disabled),
            other => Err(ValidationError::InvalidRiskState { value: other }),
        }
    }
}

impl From<RiskStateType> for i32 {
    fn from(value: RiskStateType) -> Self {
        match value {
            RiskStateType::Active => 0,
            RiskStateType::CloseOrders => 1,
            RiskStateType::Disabled => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskState {
    #[serde(rename = "type")]
    pub state_type: RiskStateType,
    pub expiry: UtcDateTime,
}

/// Per-account risk limits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskParameters {
    pub currency: CurrencyId,
    pub buying_power: Money,
    pub allowed_state: RiskState,
    pub net_loss: Money,
    #[serde(with = "crate::domain::duration")]
    pub transition_time: Duration,
}

impl RiskParameters {
    pub fn new(
        currency: CurrencyId,
        buying_power: Money,
        allowed_state: RiskState,
        net_loss: Money,
        transition_time: Duration,
    ) -> Self {
        Self {
            currency,
            buying_power,
            allowed_state,
            net_loss,
            transition_time,
        }
    }

    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    pub fn from_json(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

/// Requested change of an account's risk parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskModification {
    pub parameters: RiskParameters,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_transition_time_as_micros() {
        let parameters = RiskParameters {
            transition_time: Duration::from_secs(2),
            ..RiskParameters::default()
        };
        let json = parameters.to_json().expect("encode");
        assert_eq!(json["transition_time"], serde_json::json!(2_000_000));
        assert_eq!(json["allowed_state"]["type"], serde_json::json!(0));
    }

    #[test]
    fn rejects_negative_transition_time() {
        let mut json = RiskParameters::default().to_json().expect("encode");
        json["transition_time"] = serde_json::json!(-5);
        assert!(RiskParameters::from_json(json).is_err());
    }
}
