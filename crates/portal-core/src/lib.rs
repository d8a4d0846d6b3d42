//! # Portal Core
//!
//! Client-side data models for the administration portal.
//!
//! ## Overview
//!
//! This crate provides the pieces a portal front end is built from:
//!
//! - **Domain values** exchanged with the server (directory entries, roles,
//!   identities, compliance rules, risk parameters, reference databases)
//! - **Service clients** issuing one JSON POST per operation
//! - **Page models** with in-memory and HTTP-backed implementations
//! - **Controllers** that load a model and hold the status a view renders
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | Async memoization store |
//! | [`client`] | Service clients and their error type |
//! | [`config`] | Server address and timeouts |
//! | [`controller`] | Profile and dashboard controllers |
//! | [`domain`] | Wire values |
//! | [`error`] | Core error types |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`models`] | Page models |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use portal_core::{ClientConfig, DashboardModel, HttpDashboardModel, ServiceClients};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let clients = Arc::new(ServiceClients::connect(ClientConfig::from_env()?));
//!     clients.service_locator().login("admin", "secret").await?;
//!
//!     let mut dashboard = HttpDashboardModel::new(clients);
//!     dashboard.load().await?;
//!     println!("signed in as {}", dashboard.account()?);
//!
//!     dashboard.logout().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  Controller     │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │  Page Model     │────▶│ Cached Directory │
//! │ (Local / Http)  │     └──────────────────┘
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ ServiceClients  │────▶│ HTTP Client      │
//! │                 │     │ (reqwest/static) │
//! └─────────────────┘     └──────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Model operations return [`ModelError`]; transport and server failures
//! arrive as [`ClientError`]:
//!
//! ```rust
//! use portal_core::{ClientErrorKind, ModelError};
//!
//! fn describe(error: &ModelError) -> &'static str {
//!     match error {
//!         ModelError::NotLoaded => "load the model first",
//!         ModelError::Client(client) if client.kind() == ClientErrorKind::Unauthorized => {
//!             "sign in again"
//!         }
//!         _ => "request failed",
//!     }
//! }
//! ```

pub mod cache;
pub mod client;
pub mod config;
pub mod controller;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod models;

// Caching
pub use cache::CacheStore;

// Service clients
pub use client::{
    AdministrationClient, ClientError, ClientErrorKind, ComplianceClient, DefinitionsClient,
    ReferenceDatabases, ServiceClients, ServiceLocatorClient,
};

// Configuration
pub use config::ClientConfig;

// Controllers
pub use controller::{DashboardController, ProfileController, SubmitStatus};

// Domain values
pub use domain::{
    validate_currency_code, AccountEntry, AccountIdentity, AccountModificationRequest,
    AccountModificationType, AccountRole, AccountRoles, ComplianceParameter, ComplianceRuleEntry,
    ComplianceRuleEntryState, ComplianceRuleSchema, ComplianceValue, ComplianceValueType,
    CountryCode, CountryDatabase, CountryEntry, CurrencyDatabase, CurrencyEntry, CurrencyId,
    DirectoryEntry, DirectoryEntryType, EntitlementDatabase, EntitlementEntry,
    EntitlementModification, MarketCode, MarketDatabase, MarketEntry, Message, MessageBody, Money,
    Quantity, RiskModification, RiskParameters, RiskState, RiskStateType, Security, TradingGroup,
    UtcDateTime, DECIMAL_PLACES,
};

// Error types
pub use error::{CoreError, ModelError, ValidationError};

// HTTP client types
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient, StaticHttpClient,
};

// Page models
pub use models::{
    filter_accounts, AccountDirectoryModel, AccountModel, CachedAccountDirectoryModel,
    CompliancePageState, ComplianceModel, DashboardModel, EntitlementsModel, GroupedAccounts,
    HttpAccountDirectoryModel, HttpAccountModel, HttpComplianceModel, HttpDashboardModel,
    HttpEntitlementsModel, HttpProfileModel, HttpRiskModel, LocalAccountDirectoryModel,
    LocalAccountModel, LocalComplianceModel, LocalDashboardModel, LocalEntitlementsModel,
    LocalProfileModel, LocalRiskModel, ModelFuture, ProfileModel, RiskModel,
};
