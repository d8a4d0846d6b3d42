mod account;
mod directory;
mod session;

use std::sync::Arc;

use portal_core::{
    AccountRoles, ClientConfig, DashboardController, DashboardModel, DirectoryEntry,
    HttpDashboardModel, ServiceClients,
};
use serde_json::Value;
use tracing::{info, warn};

use crate::cli::{AccountArgs, Cli, Command};
use crate::error::CliError;

/// Signs in, loads the dashboard, runs the command and signs out again.
pub async fn run(cli: &Cli) -> Result<Value, CliError> {
    if cli.username.is_empty() {
        return Err(CliError::Command(String::from(
            "a username is required (--username or PORTAL_USERNAME)",
        )));
    }
    let config = ClientConfig::new(cli.base_url.clone())?.with_timeout_ms(cli.timeout_ms)?;
    let clients = Arc::new(ServiceClients::connect(config));
    let account = clients
        .service_locator()
        .login(&cli.username, &cli.password)
        .await?;
    info!(account = account.id(), "logged in");

    let mut controller =
        DashboardController::new(Box::new(HttpDashboardModel::new(Arc::clone(&clients))));
    let result = match controller.mount().await {
        Ok(()) => execute(&cli.command, controller.model()).await,
        Err(error) => Err(error.into()),
    };
    if let Err(error) = controller.sign_out().await {
        warn!(error = %error, "sign out failed");
    }
    result
}

async fn execute(command: &Command, dashboard: &dyn DashboardModel) -> Result<Value, CliError> {
    match command {
        Command::Whoami => session::whoami(dashboard),
        Command::Groups => session::groups(dashboard),
        Command::Accounts(args) => directory::accounts(args, dashboard).await,
        Command::Search(args) => directory::search(args, dashboard).await,
        Command::Profile(args) => account::profile(args, dashboard).await,
        Command::Entitlements(args) => account::entitlements(args, dashboard).await,
        Command::Risk(args) => account::risk(args, dashboard).await,
        Command::Compliance(args) => account::compliance(args, dashboard).await,
        Command::SetPassword(args) => account::set_password(args, dashboard).await,
    }
}

/// The account named by `--account`, or the signed-in account.
fn resolve_account(
    args: &AccountArgs,
    dashboard: &dyn DashboardModel,
) -> Result<DirectoryEntry, CliError> {
    match args.account {
        Some(id) => Ok(DirectoryEntry::make_account(id, "")),
        None => Ok(dashboard.account()?.clone()),
    }
}

fn role_names(roles: AccountRoles) -> Vec<&'static str> {
    roles.iter().map(|role| role.as_str()).collect()
}
