use serde::Serialize;
use serde_json::Value;

use portal_core::{AccountEntry, DashboardModel, DirectoryEntry};

use crate::cli::{AccountsArgs, SearchArgs};
use crate::error::CliError;

use super::role_names;

#[derive(Debug, Serialize)]
struct AccountRow {
    id: u32,
    name: String,
    roles: Vec<&'static str>,
}

impl From<&AccountEntry> for AccountRow {
    fn from(entry: &AccountEntry) -> Self {
        Self {
            id: entry.account.id(),
            name: entry.account.name().to_owned(),
            roles: role_names(entry.roles),
        }
    }
}

#[derive(Debug, Serialize)]
struct AccountsResponseData {
    group: DirectoryEntry,
    accounts: Vec<AccountRow>,
}

#[derive(Debug, Serialize)]
struct SearchResponseData {
    filter: String,
    groups: Vec<AccountsResponseData>,
}

pub async fn accounts(
    args: &AccountsArgs,
    dashboard: &dyn DashboardModel,
) -> Result<Value, CliError> {
    let directory = dashboard.account_directory_model()?;
    let group = directory
        .groups()?
        .iter()
        .find(|group| group.id() == args.group_id)
        .cloned()
        .ok_or_else(|| CliError::Command(format!("unknown group {}", args.group_id)))?;

    let accounts = directory.load_accounts(&group).await?;
    let data = AccountsResponseData {
        accounts: accounts.iter().map(AccountRow::from).collect(),
        group,
    };
    Ok(serde_json::to_value(data)?)
}

pub async fn search(args: &SearchArgs, dashboard: &dyn DashboardModel) -> Result<Value, CliError> {
    let directory = dashboard.account_directory_model()?;
    let matches = directory.load_filtered_accounts(&args.filter).await?;

    let data = SearchResponseData {
        filter: args.filter.clone(),
        groups: matches
            .into_iter()
            .map(|(group, accounts)| AccountsResponseData {
                group,
                accounts: accounts.iter().map(AccountRow::from).collect(),
            })
            .collect(),
    };
    Ok(serde_json::to_value(data)?)
}
