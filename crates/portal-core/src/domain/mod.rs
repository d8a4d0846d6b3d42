//! # Domain Values
//!
//! Values exchanged with the portal's HTTP services.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`DirectoryEntry`] | Account or group identifier, equal by id |
//! | [`AccountRoles`] | Bit set of [`AccountRole`]s |
//! | [`AccountIdentity`] | Editable profile fields |
//! | [`Money`], [`Quantity`] | Six-decimal fixed point numbers |
//! | [`ComplianceValue`] | Tagged union carried by rule parameters |
//! | [`ComplianceRuleSchema`], [`ComplianceRuleEntry`] | Rule template and instance |
//! | [`RiskParameters`] | Per-account risk limits |
//! | [`TradingGroup`] | Group with manager and trader sub-directories |
//!
//! Every value round-trips through `serde_json` in the server's wire format.

mod administration;
mod compliance;
mod definitions;
mod directory;
pub(crate) mod duration;
mod entitlements;
mod fixed_point;
mod identity;
mod risk;
mod roles;
mod timestamp;

pub use administration::{
    AccountModificationRequest, AccountModificationType, Message, MessageBody, TradingGroup,
};
pub use compliance::{
    ComplianceParameter, ComplianceRuleEntry, ComplianceRuleEntryState, ComplianceRuleSchema,
    ComplianceValue, ComplianceValueType,
};
pub use definitions::{
    validate_currency_code, CountryCode, CountryDatabase, CountryEntry, CurrencyDatabase,
    CurrencyEntry, CurrencyId, MarketCode, MarketDatabase, MarketEntry, Security,
};
pub use directory::{AccountEntry, DirectoryEntry, DirectoryEntryType};
pub use entitlements::{EntitlementDatabase, EntitlementEntry, EntitlementModification};
pub use fixed_point::{Money, Quantity, DECIMAL_PLACES};
pub use identity::AccountIdentity;
pub use risk::{RiskModification, RiskParameters, RiskState, RiskStateType};
pub use roles::{AccountRole, AccountRoles};
pub use timestamp::UtcDateTime;
