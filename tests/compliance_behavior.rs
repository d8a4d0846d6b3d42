//! Behavior tests for compliance page editing.

use std::sync::Arc;
use std::time::Duration;

use portal_core::{
    ClientConfig, ComplianceModel, ComplianceParameter, ComplianceRuleEntry,
    ComplianceRuleEntryState, ComplianceRuleSchema, ComplianceValue, CurrencyId, DirectoryEntry,
    DirectoryEntryType, HttpComplianceModel, LocalComplianceModel, ModelError, Money, Quantity,
    ServiceClients, StaticHttpClient,
};

const LOAD_RULE_ENTRIES: &str =
    "/api/compliance_service/load_directory_entry_compliance_rule_entry";
const LOAD_SCHEMAS: &str = "/api/compliance_service/load_compliance_rule_schemas";

fn buying_power_schema() -> ComplianceRuleSchema {
    ComplianceRuleSchema::new(
        "buying_power",
        vec![
            ComplianceParameter::new("currency", ComplianceValue::Currency(CurrencyId(840))),
            ComplianceParameter::new(
                "buying_power",
                ComplianceValue::Money(Money::parse("25000").expect("money")),
            ),
        ],
    )
}

fn order_limit_schema() -> ComplianceRuleSchema {
    ComplianceRuleSchema::new(
        "order_limit",
        vec![
            ComplianceParameter::new(
                "quantity",
                ComplianceValue::Quantity(Quantity::from_integer(1_000).expect("quantity")),
            ),
            ComplianceParameter::new(
                "period",
                ComplianceValue::Duration(Duration::from_secs(3_600)),
            ),
        ],
    )
}

fn rule(id: u64, state: ComplianceRuleEntryState) -> ComplianceRuleEntry {
    ComplianceRuleEntry::new(
        id,
        DirectoryEntry::make_account(5, "alice"),
        state,
        buying_power_schema(),
    )
}

async fn loaded_model(entries: Vec<ComplianceRuleEntry>) -> LocalComplianceModel {
    let mut model =
        LocalComplianceModel::new(entries, vec![buying_power_schema(), order_limit_schema()]);
    model.load().await.expect("load");
    model
}

// =============================================================================
// Adding rules
// =============================================================================

#[tokio::test]
async fn adding_a_rule_appends_one_disabled_copy_of_the_schema() {
    // Given: a page with one active rule
    let mut model = loaded_model(vec![rule(7, ComplianceRuleEntryState::Active)]).await;
    let schema = model.schemas().expect("schemas")[1].clone();

    // When: the user adds a rule from the second schema
    model.on_rule_add(&schema).expect("add");

    // Then: exactly one new disabled entry carries the schema's parameters
    let entries = model.entries().expect("entries");
    assert_eq!(entries.len(), 2);
    let added = &entries[1];
    assert_eq!(added.id, 0);
    assert_eq!(added.state, ComplianceRuleEntryState::Disabled);
    assert_eq!(added.directory_entry.entry_type(), DirectoryEntryType::Directory);
    assert_eq!(added.directory_entry.id(), 0);
    assert_eq!(added.directory_entry.name(), "empty");
    assert_eq!(added.schema, schema);
    assert_eq!(added.schema.parameters, schema.parameters);
    assert_eq!(entries[0], rule(7, ComplianceRuleEntryState::Active));
}

#[tokio::test]
async fn adding_twice_creates_two_entries_with_id_zero() {
    let mut model = loaded_model(Vec::new()).await;

    model.on_rule_add(&buying_power_schema()).expect("first");
    model.on_rule_add(&buying_power_schema()).expect("second");

    let ids: Vec<u64> = model.entries().expect("entries").iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![0, 0]);
}

// =============================================================================
// Changing rules
// =============================================================================

#[tokio::test]
async fn changing_a_rule_replaces_only_matching_ids() {
    // Given: three rules, two of which share an id
    let mut model = loaded_model(vec![
        rule(1, ComplianceRuleEntryState::Active),
        rule(2, ComplianceRuleEntryState::Active),
        rule(1, ComplianceRuleEntryState::Passive),
    ])
    .await;

    // When: rule 1 is switched to deleted
    let updated = rule(1, ComplianceRuleEntryState::Deleted);
    let changed = model.on_rule_change(&updated).expect("change");

    // Then: every id-1 entry is replaced and id 2 is untouched
    assert!(changed);
    let states: Vec<ComplianceRuleEntryState> = model
        .entries()
        .expect("entries")
        .iter()
        .map(|entry| entry.state)
        .collect();
    assert_eq!(
        states,
        vec![
            ComplianceRuleEntryState::Deleted,
            ComplianceRuleEntryState::Active,
            ComplianceRuleEntryState::Deleted,
        ]
    );
}

#[tokio::test]
async fn changing_an_unknown_rule_is_a_no_op() {
    let original = vec![rule(1, ComplianceRuleEntryState::Active)];
    let mut model = loaded_model(original.clone()).await;

    let changed = model
        .on_rule_change(&rule(9, ComplianceRuleEntryState::Disabled))
        .expect("change");

    assert!(!changed);
    assert_eq!(model.entries().expect("entries"), original.as_slice());
}

// =============================================================================
// HTTP compliance model
// =============================================================================

#[tokio::test]
async fn http_model_loads_entries_and_schemas() {
    let http = Arc::new(
        StaticHttpClient::new()
            .with_json(
                LOAD_RULE_ENTRIES,
                r#"[{"id":4,"directory_entry":{"type":0,"id":5,"name":"alice"},"state":1,
                    "schema":{"name":"blacklist","parameters":[
                        {"name":"symbols","value":{"which":10,"value":[
                            {"which":9,"value":{"symbol":"ABC","market":"XTSX","country":124}}
                        ]}}
                    ]}}]"#,
            )
            .with_json(
                LOAD_SCHEMAS,
                r#"[{"name":"blacklist","parameters":[{"name":"symbols","value":{"which":10,"value":[]}}]}]"#,
            ),
    );
    let clients = Arc::new(ServiceClients::new(http.clone(), ClientConfig::default()));
    let mut model = HttpComplianceModel::new(DirectoryEntry::make_account(5, "alice"), clients);
    assert_eq!(model.entries().err(), Some(ModelError::NotLoaded));

    model.load().await.expect("load");

    let entries = model.entries().expect("entries");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].state, ComplianceRuleEntryState::Passive);
    match &entries[0].schema.parameters[0].value {
        ComplianceValue::List(values) => match &values[0] {
            ComplianceValue::Security(security) => assert_eq!(security.to_string(), "ABC.XTSX"),
            other => panic!("expected a security, got {other:?}"),
        },
        other => panic!("expected a list, got {other:?}"),
    }
    assert_eq!(model.schemas().expect("schemas")[0].name, "blacklist");

    // Edits stay local.
    let schema = model.schemas().expect("schemas")[0].clone();
    model.on_rule_add(&schema).expect("add");
    assert_eq!(model.entries().expect("entries").len(), 2);
    assert_eq!(http.requests().len(), 2);
}
