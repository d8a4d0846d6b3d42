//! Contract tests for the JSON shapes exchanged with the portal server.

use std::time::Duration;

use portal_core::{
    AccountRole, AccountRoles, ComplianceParameter, ComplianceRuleEntry,
    ComplianceRuleEntryState, ComplianceRuleSchema, ComplianceValue, CountryCode, CurrencyId,
    DirectoryEntry, DirectoryEntryType, MarketCode, Money, Quantity, RiskParameters, RiskState,
    RiskStateType, Security, UtcDateTime,
};
use serde_json::json;

// =============================================================================
// Round trips
// =============================================================================

#[test]
fn risk_parameters_survive_json_round_trip() {
    // Given: fully populated risk parameters
    let parameters = RiskParameters::new(
        CurrencyId(840),
        Money::parse("100000.25").expect("money"),
        RiskState {
            state_type: RiskStateType::CloseOrders,
            expiry: UtcDateTime::parse("2024-03-01T16:00:00Z").expect("timestamp"),
        },
        Money::parse("-5000").expect("money"),
        Duration::from_millis(1_500),
    );

    // When: they travel to the server and back
    let json = parameters.to_json().expect("encode");
    let decoded = RiskParameters::from_json(json.clone()).expect("decode");

    // Then: nothing is lost and the wire shape is the server's
    assert_eq!(decoded, parameters);
    assert_eq!(json["currency"], json!(840));
    assert_eq!(json["buying_power"], json!(100_000_250_000i64));
    assert_eq!(json["net_loss"], json!(-5_000_000_000i64));
    assert_eq!(json["allowed_state"]["type"], json!(1));
    assert_eq!(json["allowed_state"]["expiry"], json!("2024-03-01T16:00:00Z"));
    assert_eq!(json["transition_time"], json!(1_500_000));
}

#[test]
fn compliance_rule_entry_survives_json_round_trip() {
    let schema = ComplianceRuleSchema::new(
        "symbol_restriction",
        vec![
            ComplianceParameter::new("enabled", ComplianceValue::Boolean(true)),
            ComplianceParameter::new(
                "limit",
                ComplianceValue::Quantity(Quantity::parse("250.5").expect("quantity")),
            ),
            ComplianceParameter::new("ratio", ComplianceValue::Double(0.25)),
            ComplianceParameter::new("note", ComplianceValue::String(String::from("desk"))),
            ComplianceParameter::new(
                "start",
                ComplianceValue::DateTime(
                    UtcDateTime::parse("2024-01-02T09:30:00Z").expect("timestamp"),
                ),
            ),
            ComplianceParameter::new("window", ComplianceValue::Duration(Duration::from_secs(90))),
            ComplianceParameter::new("currency", ComplianceValue::Currency(CurrencyId(124))),
            ComplianceParameter::new(
                "notional",
                ComplianceValue::Money(Money::parse("1234.56").expect("money")),
            ),
            ComplianceParameter::new(
                "symbols",
                ComplianceValue::List(vec![ComplianceValue::Security(Security::new(
                    "RY",
                    MarketCode(String::from("XTSE")),
                    CountryCode(124),
                ))]),
            ),
            ComplianceParameter::new("unset", ComplianceValue::None),
        ],
    );
    let entry = ComplianceRuleEntry::new(
        12,
        DirectoryEntry::make_directory(30, "desk"),
        ComplianceRuleEntryState::Passive,
        schema,
    );

    let json = entry.to_json().expect("encode");
    let decoded = ComplianceRuleEntry::from_json(json.clone()).expect("decode");

    assert_eq!(decoded, entry);
    assert_eq!(json["state"], json!(1));
    assert_eq!(json["directory_entry"], json!({"type": 1, "id": 30, "name": "desk"}));
    let parameters = json["schema"]["parameters"].as_array().expect("parameters");
    assert_eq!(parameters[5]["value"], json!({"which": 6, "value": 90_000_000}));
    assert_eq!(parameters[9]["value"], json!({"which": 0, "value": null}));
}

// =============================================================================
// Rejections
// =============================================================================

#[test]
fn mismatched_compliance_payload_is_rejected() {
    let json = json!({"which": 1, "value": "yes"});

    let error = serde_json::from_value::<ComplianceValue>(json).expect_err("bad payload");

    assert!(error.to_string().contains("boolean"), "{error}");
}

#[test]
fn unknown_compliance_tag_is_rejected() {
    assert!(serde_json::from_value::<ComplianceValue>(json!({"which": 42, "value": 1})).is_err());
}

#[test]
fn unknown_rule_state_is_rejected() {
    let mut json = ComplianceRuleEntry::new(
        1,
        DirectoryEntry::INVALID,
        ComplianceRuleEntryState::Active,
        ComplianceRuleSchema::new("empty", Vec::new()),
    )
    .to_json()
    .expect("encode");
    json["state"] = json!(7);

    assert!(ComplianceRuleEntry::from_json(json).is_err());
}

// =============================================================================
// Directory entries and roles
// =============================================================================

#[test]
fn directory_entries_compare_by_id() {
    let entry: DirectoryEntry =
        serde_json::from_value(json!({"type": 0, "id": 9, "name": "bob"})).expect("decode");

    assert_eq!(entry.entry_type(), DirectoryEntryType::Account);
    assert_eq!(entry, DirectoryEntry::make_directory(9, "renamed"));
    assert_ne!(entry, DirectoryEntry::make_account(10, "bob"));
    assert_eq!(
        serde_json::to_value(DirectoryEntry::INVALID).expect("encode")["type"],
        json!(-1)
    );
}

#[test]
fn roles_travel_as_bit_mask() {
    let roles = AccountRoles::from_roles([AccountRole::Trader, AccountRole::Administrator]);

    assert_eq!(serde_json::to_value(roles).expect("encode"), json!(5));
    let decoded: AccountRoles = serde_json::from_value(json!(10)).expect("decode");
    assert_eq!(
        decoded.iter().collect::<Vec<_>>(),
        vec![AccountRole::Manager, AccountRole::Service]
    );
}
