//! Behavior tests for the account directory models and the caching decorator.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use portal_core::{
    AccountDirectoryModel, AccountEntry, AccountRole, AccountRoles, CachedAccountDirectoryModel,
    ClientConfig, DirectoryEntry, HttpAccountDirectoryModel, LocalAccountDirectoryModel,
    ModelError, ServiceClients, StaticHttpClient,
};

const LOAD_MANAGED_TRADING_GROUPS: &str =
    "/api/administration_service/load_managed_trading_groups";
const LOAD_TRADING_GROUP: &str = "/api/administration_service/load_trading_group";
const LOAD_ACCOUNT_ROLES: &str = "/api/administration_service/load_account_roles";

const TRADING_GROUP: &str = r#"{
    "entry": {"type": 1, "id": 10, "name": "desk"},
    "managers_directory": {"type": 1, "id": 11, "name": "desk managers"},
    "managers": [{"type": 0, "id": 1, "name": "mgr_ann"}],
    "trading_directory": {"type": 1, "id": 12, "name": "desk traders"},
    "traders": [
        {"type": 0, "id": 2, "name": "tr_bob"},
        {"type": 0, "id": 3, "name": "tr_cat"},
        {"type": 0, "id": 1, "name": "mgr_ann"}
    ]
}"#;

fn entry(id: u32, name: &str, role: AccountRole) -> AccountEntry {
    AccountEntry::new(
        DirectoryEntry::make_account(id, name),
        AccountRoles::from_roles([role]),
    )
}

fn local_directory() -> (DirectoryEntry, DirectoryEntry, LocalAccountDirectoryModel) {
    let east = DirectoryEntry::make_directory(20, "east");
    let west = DirectoryEntry::make_directory(21, "west");
    let mut accounts = BTreeMap::new();
    accounts.insert(
        east.clone(),
        vec![
            entry(1, "tr_amy", AccountRole::Trader),
            entry(2, "mgr_ed", AccountRole::Manager),
            entry(3, "tr_al", AccountRole::Trader),
        ],
    );
    accounts.insert(west.clone(), vec![entry(4, "Tr_wes", AccountRole::Trader)]);
    let groups = BTreeSet::from([east.clone(), west.clone()]);
    (east, west, LocalAccountDirectoryModel::new(groups, accounts))
}

fn http_directory(http: StaticHttpClient) -> (Arc<StaticHttpClient>, HttpAccountDirectoryModel) {
    let http = Arc::new(http);
    let clients = Arc::new(ServiceClients::new(http.clone(), ClientConfig::default()));
    let model =
        HttpAccountDirectoryModel::new(DirectoryEntry::make_account(100, "admin"), clients);
    (http, model)
}

fn names(accounts: &[AccountEntry]) -> Vec<&str> {
    accounts.iter().map(|entry| entry.account.name()).collect()
}

// =============================================================================
// Filtering
// =============================================================================

#[tokio::test]
async fn filter_returns_every_group_with_prefix_matches() {
    // Given: a loaded directory with two groups
    let (east, west, model) = local_directory();
    model.load().await.expect("load");

    // When: the user searches for "tr_a"
    let result = model.load_filtered_accounts("tr_a").await.expect("filter");

    // Then: both groups are present, with only case-sensitive prefix matches
    assert_eq!(result.len(), 2);
    assert_eq!(names(&result[&east]), vec!["tr_amy"]);
    assert!(result[&west].is_empty());
}

#[tokio::test]
async fn empty_filter_yields_empty_map() {
    let (_, _, model) = local_directory();
    model.load().await.expect("load");

    let result = model.load_filtered_accounts("").await.expect("filter");

    assert!(result.is_empty());
}

#[tokio::test]
async fn filter_before_load_is_rejected() {
    let (_, _, model) = local_directory();

    let error = model.load_filtered_accounts("tr").await.expect_err("not loaded");

    assert_eq!(error, ModelError::NotLoaded);
}

// =============================================================================
// HTTP directory
// =============================================================================

#[tokio::test]
async fn http_directory_lists_managers_then_traders_once() {
    // Given: a server with one managed trading group
    let (http, model) = http_directory(
        StaticHttpClient::new()
            .with_json(LOAD_MANAGED_TRADING_GROUPS, r#"[{"type":1,"id":10,"name":"desk"}]"#)
            .with_json(LOAD_TRADING_GROUP, TRADING_GROUP),
    );

    // When: the directory is loaded and the group expanded
    model.load().await.expect("load");
    let group = model.groups().expect("groups").iter().next().cloned().expect("one group");
    let accounts = model.load_accounts(&group).await.expect("accounts");

    // Then: the manager appears first and only once
    assert_eq!(names(&accounts), vec!["mgr_ann", "tr_bob", "tr_cat"]);
    assert_eq!(http.call_count(LOAD_MANAGED_TRADING_GROUPS), 1);
}

#[tokio::test]
async fn http_directory_takes_roles_from_group_lists() {
    // Given: a group whose manager also trades
    let (http, model) = http_directory(
        StaticHttpClient::new()
            .with_json(LOAD_MANAGED_TRADING_GROUPS, r#"[{"type":1,"id":10,"name":"desk"}]"#)
            .with_json(LOAD_TRADING_GROUP, TRADING_GROUP),
    );
    model.load().await.expect("load");
    let calls_before = http.requests().len();

    // When: the group is expanded
    let accounts = model
        .load_accounts(&DirectoryEntry::make_directory(10, "desk"))
        .await
        .expect("accounts");

    // Then: roles come from the group lists with one request and no role lookups
    assert_eq!(
        accounts[0].roles,
        AccountRoles::from_roles([AccountRole::Manager, AccountRole::Trader])
    );
    assert_eq!(accounts[1].roles, AccountRoles::from_roles([AccountRole::Trader]));
    assert_eq!(accounts[2].roles, AccountRoles::from_roles([AccountRole::Trader]));
    assert_eq!(http.requests().len(), calls_before + 1);
    assert_eq!(http.call_count(LOAD_ACCOUNT_ROLES), 0);
}

#[tokio::test]
async fn http_directory_filters_over_each_group() {
    let (_, model) = http_directory(
        StaticHttpClient::new()
            .with_json(LOAD_MANAGED_TRADING_GROUPS, r#"[{"type":1,"id":10,"name":"desk"}]"#)
            .with_json(LOAD_TRADING_GROUP, TRADING_GROUP),
    );
    model.load().await.expect("load");

    let result = model.load_filtered_accounts("tr_").await.expect("filter");

    let desk = DirectoryEntry::make_directory(10, "desk");
    assert_eq!(names(&result[&desk]), vec!["tr_bob", "tr_cat"]);
}

// =============================================================================
// Cache decorator
// =============================================================================

#[tokio::test]
async fn cached_directory_makes_one_round_trip_per_group() {
    // Given: a cached HTTP directory
    let (http, base) = http_directory(
        StaticHttpClient::new()
            .with_json(LOAD_MANAGED_TRADING_GROUPS, r#"[{"type":1,"id":10,"name":"desk"}]"#)
            .with_json(LOAD_TRADING_GROUP, TRADING_GROUP),
    );
    let model = CachedAccountDirectoryModel::new(base);
    model.load().await.expect("load");
    let desk = DirectoryEntry::make_directory(10, "desk");

    // When: the same group is expanded twice
    let first = model.load_accounts(&desk).await.expect("first");
    let second = model.load_accounts(&desk).await.expect("second");

    // Then: both answers match and the server saw one group lookup
    assert_eq!(first, second);
    assert_eq!(http.call_count(LOAD_TRADING_GROUP), 1);
    assert_eq!(model.cached_groups().await, 1);
}

#[tokio::test]
async fn cached_directory_keys_by_group_id() {
    let (http, base) = http_directory(
        StaticHttpClient::new()
            .with_json(LOAD_MANAGED_TRADING_GROUPS, "[]")
            .with_json(LOAD_TRADING_GROUP, TRADING_GROUP),
    );
    let model = CachedAccountDirectoryModel::new(base);
    model.load().await.expect("load");

    // Same id under a different name hits the cache.
    model
        .load_accounts(&DirectoryEntry::make_directory(10, "desk"))
        .await
        .expect("first");
    model
        .load_accounts(&DirectoryEntry::make_directory(10, "renamed"))
        .await
        .expect("second");
    model
        .load_accounts(&DirectoryEntry::make_directory(30, "other"))
        .await
        .expect("third");

    assert_eq!(http.call_count(LOAD_TRADING_GROUP), 2);
}

#[tokio::test]
async fn cached_directory_does_not_cache_failures() {
    let (http, base) = http_directory(
        StaticHttpClient::new().with_json(LOAD_MANAGED_TRADING_GROUPS, "[]"),
    );
    let model = CachedAccountDirectoryModel::new(base);
    model.load().await.expect("load");
    let desk = DirectoryEntry::make_directory(10, "desk");

    assert!(model.load_accounts(&desk).await.is_err());
    assert_eq!(model.cached_groups().await, 0);

    http.route(
        LOAD_TRADING_GROUP,
        portal_core::HttpResponse::ok_json(TRADING_GROUP),
    );
    let accounts = model.load_accounts(&desk).await.expect("recovered");

    assert_eq!(accounts.len(), 3);
    assert_eq!(model.cached_groups().await, 1);
}

#[tokio::test]
async fn cached_directory_filters_through_its_cache() {
    // Given: a cached HTTP directory whose only group is already cached
    let (http, base) = http_directory(
        StaticHttpClient::new()
            .with_json(LOAD_MANAGED_TRADING_GROUPS, r#"[{"type":1,"id":10,"name":"desk"}]"#)
            .with_json(LOAD_TRADING_GROUP, TRADING_GROUP),
    );
    let model = CachedAccountDirectoryModel::new(base);
    model.load().await.expect("load");
    let desk = DirectoryEntry::make_directory(10, "desk");
    model.load_accounts(&desk).await.expect("warm cache");
    let calls_before = http.requests().len();

    // When: the user searches twice
    let first = model.load_filtered_accounts("tr").await.expect("first search");
    let second = model.load_filtered_accounts("mgr").await.expect("second search");

    // Then: both answers come from the cache without another request
    assert_eq!(names(&first[&desk]), vec!["tr_bob", "tr_cat"]);
    assert_eq!(names(&second[&desk]), vec!["mgr_ann"]);
    assert_eq!(http.requests().len(), calls_before);
}

#[tokio::test]
async fn cached_directory_filters_every_group_of_its_base() {
    let (east, west, base) = local_directory();
    let model = CachedAccountDirectoryModel::new(base);
    model.load().await.expect("load");

    let result = model.load_filtered_accounts("mgr").await.expect("filter");

    assert_eq!(names(&result[&east]), vec!["mgr_ed"]);
    assert!(result[&west].is_empty());
    assert_eq!(model.cached_groups().await, 2);
    assert!(model.load_filtered_accounts("").await.expect("empty").is_empty());
}
