use serde::Serialize;
use serde_json::Value;

use portal_core::{DashboardModel, DirectoryEntry};

use crate::error::CliError;

use super::role_names;

#[derive(Debug, Serialize)]
struct WhoamiResponseData<'a> {
    account: &'a DirectoryEntry,
    roles: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
struct GroupsResponseData<'a> {
    groups: Vec<&'a DirectoryEntry>,
}

pub fn whoami(dashboard: &dyn DashboardModel) -> Result<Value, CliError> {
    let data = WhoamiResponseData {
        account: dashboard.account()?,
        roles: role_names(dashboard.roles()?),
    };
    Ok(serde_json::to_value(data)?)
}

pub fn groups(dashboard: &dyn DashboardModel) -> Result<Value, CliError> {
    let directory = dashboard.account_directory_model()?;
    let data = GroupsResponseData {
        groups: directory.groups()?.iter().collect(),
    };
    Ok(serde_json::to_value(data)?)
}
