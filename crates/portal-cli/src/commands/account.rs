use serde::Serialize;
use serde_json::Value;

use portal_core::{
    AccountIdentity, ComplianceRuleEntry, ComplianceRuleSchema, DashboardModel, DirectoryEntry,
    ProfileController, RiskParameters,
};

use crate::cli::{AccountArgs, SetPasswordArgs};
use crate::error::CliError;

use super::{resolve_account, role_names};

#[derive(Debug, Serialize)]
struct ProfileResponseData<'a> {
    account: &'a DirectoryEntry,
    roles: Vec<&'static str>,
    identity: &'a AccountIdentity,
    groups: &'a [DirectoryEntry],
}

#[derive(Debug, Serialize)]
struct EntitlementRow<'a> {
    group: &'a DirectoryEntry,
    name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct EntitlementsResponseData<'a> {
    account: &'a DirectoryEntry,
    entitlements: Vec<EntitlementRow<'a>>,
}

#[derive(Debug, Serialize)]
struct RiskResponseData<'a> {
    account: &'a DirectoryEntry,
    parameters: &'a RiskParameters,
    buying_power: String,
    net_loss: String,
}

#[derive(Debug, Serialize)]
struct ComplianceResponseData<'a> {
    account: &'a DirectoryEntry,
    entries: &'a [ComplianceRuleEntry],
    schemas: &'a [ComplianceRuleSchema],
}

pub async fn profile(args: &AccountArgs, dashboard: &dyn DashboardModel) -> Result<Value, CliError> {
    let account = resolve_account(args, dashboard)?;
    let mut model = dashboard.make_account_model(account).make_profile_model();
    model.load().await?;

    let data = ProfileResponseData {
        account: model.account()?,
        roles: role_names(model.roles()?),
        identity: model.identity()?,
        groups: model.groups()?,
    };
    Ok(serde_json::to_value(data)?)
}

pub async fn entitlements(
    args: &AccountArgs,
    dashboard: &dyn DashboardModel,
) -> Result<Value, CliError> {
    let account = resolve_account(args, dashboard)?;
    let mut model = dashboard.make_account_model(account).make_entitlements_model();
    model.load().await?;
    let database = dashboard.entitlement_database()?;

    let data = EntitlementsResponseData {
        account: model.account()?,
        entitlements: model
            .entitlements()?
            .iter()
            .map(|group| EntitlementRow {
                group,
                name: database.from_group(group).map(|entry| entry.name.as_str()),
            })
            .collect(),
    };
    Ok(serde_json::to_value(data)?)
}

pub async fn risk(args: &AccountArgs, dashboard: &dyn DashboardModel) -> Result<Value, CliError> {
    let account = resolve_account(args, dashboard)?;
    let mut model = dashboard.make_account_model(account).make_risk_model();
    model.load().await?;
    let parameters = model.risk_parameters()?;

    let data = RiskResponseData {
        account: model.account()?,
        parameters,
        buying_power: parameters.buying_power.to_string(),
        net_loss: parameters.net_loss.to_string(),
    };
    Ok(serde_json::to_value(data)?)
}

pub async fn compliance(
    args: &AccountArgs,
    dashboard: &dyn DashboardModel,
) -> Result<Value, CliError> {
    let account = resolve_account(args, dashboard)?;
    let mut model = dashboard.make_account_model(account.clone()).make_compliance_model();
    model.load().await?;

    let data = ComplianceResponseData {
        account: &account,
        entries: model.entries()?,
        schemas: model.schemas()?,
    };
    Ok(serde_json::to_value(data)?)
}

pub async fn set_password(
    args: &SetPasswordArgs,
    dashboard: &dyn DashboardModel,
) -> Result<Value, CliError> {
    let account = resolve_account(&args.target, dashboard)?;
    let mut controller =
        ProfileController::new(dashboard.make_account_model(account).make_profile_model());
    controller.mount().await?;

    let status = controller.submit_password(&args.password).await;
    if status.has_error {
        return Err(CliError::Command(status.message.clone()));
    }
    Ok(serde_json::to_value(status)?)
}
