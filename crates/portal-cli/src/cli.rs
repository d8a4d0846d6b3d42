//! CLI argument definitions for the portal.
//!
//! Every command signs in, loads the dashboard, runs, prints JSON on stdout
//! and signs out.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `whoami` | Signed-in account and roles |
//! | `groups` | Groups visible in the account directory |
//! | `accounts` | Accounts of one group |
//! | `search` | Accounts whose name starts with a prefix |
//! | `profile` | Identity, roles and groups of an account |
//! | `entitlements` | Entitlements held by an account |
//! | `risk` | Risk parameters of an account |
//! | `compliance` | Compliance rules and available schemas |
//! | `set-password` | Change an account's password |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--base-url` | `http://localhost:8080` | Server address (`PORTAL_BASE_URL`) |
//! | `--timeout-ms` | `3000` | Request timeout in ms (`PORTAL_TIMEOUT_MS`) |
//! | `--username` | | Login name (`PORTAL_USERNAME`) |
//! | `--password` | | Login password (`PORTAL_PASSWORD`) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//!
//! # Examples
//!
//! ```bash
//! portal --username admin whoami
//! portal accounts 42 --pretty
//! portal search tr
//! portal risk --account 107
//! ```

use clap::{Args, Parser, Subcommand};

use portal_core::config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_MS};

#[derive(Debug, Parser)]
#[command(
    name = "portal",
    author,
    version,
    about = "Administration portal command-line client"
)]
pub struct Cli {
    /// Base URL of the portal server.
    #[arg(long, global = true, env = "PORTAL_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Request timeout budget in milliseconds.
    #[arg(long, global = true, env = "PORTAL_TIMEOUT_MS", default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Account name to sign in with.
    #[arg(long, global = true, env = "PORTAL_USERNAME", default_value = "")]
    pub username: String,

    /// Password to sign in with.
    #[arg(
        long,
        global = true,
        env = "PORTAL_PASSWORD",
        default_value = "",
        hide_env_values = true
    )]
    pub password: String,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the signed-in account and its roles.
    Whoami,

    /// List the groups visible in the account directory.
    Groups,

    /// List the accounts of a group.
    ///
    /// # Examples
    ///
    ///   portal accounts 42
    Accounts(AccountsArgs),

    /// Find accounts whose name starts with a prefix, per group.
    ///
    /// The match is case-sensitive; an empty prefix matches nothing.
    Search(SearchArgs),

    /// Show an account's identity, roles and groups.
    Profile(AccountArgs),

    /// Show the entitlements an account holds.
    Entitlements(AccountArgs),

    /// Show an account's risk parameters.
    Risk(AccountArgs),

    /// Show an account's compliance rules and the available schemas.
    Compliance(AccountArgs),

    /// Change an account's password.
    SetPassword(SetPasswordArgs),
}

/// Arguments for the `accounts` command.
#[derive(Debug, Args)]
pub struct AccountsArgs {
    /// Directory id of the group.
    pub group_id: u32,
}

/// Arguments for the `search` command.
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Account name prefix.
    pub filter: String,
}

/// Selects the account a command applies to.
#[derive(Debug, Args)]
pub struct AccountArgs {
    /// Account id; defaults to the signed-in account.
    #[arg(long)]
    pub account: Option<u32>,
}

/// Arguments for the `set-password` command.
#[derive(Debug, Args)]
pub struct SetPasswordArgs {
    /// New password.
    pub password: String,

    #[command(flatten)]
    pub target: AccountArgs,
}
