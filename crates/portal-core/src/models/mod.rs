//! # Page Models
//!
//! Each portal page is backed by a model with a two-state lifecycle:
//! constructed (unloaded) and loaded. Accessors return
//! [`ModelError::NotLoaded`] until [`load`](AccountModel::load) succeeds,
//! after which they return the cached snapshot. Nothing is refreshed.
//!
//! | Model | Local | HTTP |
//! |-------|-------|------|
//! | [`AccountModel`] | [`LocalAccountModel`] | [`HttpAccountModel`] |
//! | [`ProfileModel`] | [`LocalProfileModel`] | [`HttpProfileModel`] |
//! | [`AccountDirectoryModel`] | [`LocalAccountDirectoryModel`] | [`HttpAccountDirectoryModel`] |
//! | [`ComplianceModel`] | [`LocalComplianceModel`] | [`HttpComplianceModel`] |
//! | [`EntitlementsModel`] | [`LocalEntitlementsModel`] | [`HttpEntitlementsModel`] |
//! | [`RiskModel`] | [`LocalRiskModel`] | [`HttpRiskModel`] |
//! | [`DashboardModel`] | [`LocalDashboardModel`] | [`HttpDashboardModel`] |
//!
//! [`CachedAccountDirectoryModel`] decorates any directory model and
//! memoizes `load_accounts` per group.

mod account;
mod account_directory;
mod compliance;
mod dashboard;
mod entitlements;
mod profile;
mod risk;

use std::future::Future;
use std::pin::Pin;

use crate::ModelError;

pub use account::{AccountModel, HttpAccountModel, LocalAccountModel};
pub use account_directory::{
    filter_accounts, AccountDirectoryModel, CachedAccountDirectoryModel, GroupedAccounts,
    HttpAccountDirectoryModel, LocalAccountDirectoryModel,
};
pub use compliance::{
    CompliancePageState, ComplianceModel, HttpComplianceModel, LocalComplianceModel,
};
pub use dashboard::{DashboardModel, HttpDashboardModel, LocalDashboardModel};
pub use entitlements::{EntitlementsModel, HttpEntitlementsModel, LocalEntitlementsModel};
pub use profile::{HttpProfileModel, LocalProfileModel, ProfileModel};
pub use risk::{HttpRiskModel, LocalRiskModel, RiskModel};

/// Boxed future returned by model operations.
pub type ModelFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ModelError>> + Send + 'a>>;

/// Returns the loaded snapshot or [`ModelError::NotLoaded`].
pub(crate) fn loaded<T>(state: &Option<T>) -> Result<&T, ModelError> {
    state.as_ref().ok_or(ModelError::NotLoaded)
}
