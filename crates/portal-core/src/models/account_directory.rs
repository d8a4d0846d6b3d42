use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use tracing::{debug, info};

use super::ModelFuture;
use crate::cache::CacheStore;
use crate::client::ServiceClients;
use crate::{AccountEntry, DirectoryEntry, ModelError};

/// Accounts grouped by the directory they were found in.
pub type GroupedAccounts = BTreeMap<DirectoryEntry, Vec<AccountEntry>>;

/// Model behind the account directory page.
///
/// The model is shared between the page and its group cards, so every
/// method takes `&self`.
pub trait AccountDirectoryModel: Send + Sync {
    fn is_loaded(&self) -> bool;

    fn load<'a>(&'a self) -> ModelFuture<'a, ()>;

    /// Groups the signed-in account can see.
    fn groups(&self) -> Result<&BTreeSet<DirectoryEntry>, ModelError>;

    /// Accounts belonging to `group`.
    fn load_accounts<'a>(&'a self, group: &'a DirectoryEntry) -> ModelFuture<'a, Vec<AccountEntry>>;

    /// Accounts in every group whose name starts with `filter`. An empty
    /// filter matches nothing and yields an empty map.
    fn load_filtered_accounts<'a>(&'a self, filter: &'a str) -> ModelFuture<'a, GroupedAccounts>;
}

/// Accounts whose name starts with `filter`, in their original order.
pub fn filter_accounts(accounts: &[AccountEntry], filter: &str) -> Vec<AccountEntry> {
    accounts
        .iter()
        .filter(|entry| entry.account.name().starts_with(filter))
        .cloned()
        .collect()
}

/// Implements an [`AccountDirectoryModel`] in memory.
#[derive(Debug)]
pub struct LocalAccountDirectoryModel {
    is_loaded: AtomicBool,
    groups: BTreeSet<DirectoryEntry>,
    accounts: GroupedAccounts,
}

impl LocalAccountDirectoryModel {
    /// Accounts listed for groups outside `groups` are dropped.
    pub fn new(groups: BTreeSet<DirectoryEntry>, accounts: GroupedAccounts) -> Self {
        let accounts = groups
            .iter()
            .map(|group| {
                let entries = accounts.get(group).cloned().unwrap_or_default();
                (group.clone(), entries)
            })
            .collect();
        Self {
            is_loaded: AtomicBool::new(false),
            groups,
            accounts,
        }
    }

    fn ensure_loaded(&self) -> Result<(), ModelError> {
        if self.is_loaded.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(ModelError::NotLoaded)
        }
    }
}

impl AccountDirectoryModel for LocalAccountDirectoryModel {
    fn is_loaded(&self) -> bool {
        self.is_loaded.load(Ordering::Acquire)
    }

    fn load<'a>(&'a self) -> ModelFuture<'a, ()> {
        Box::pin(async move {
            self.is_loaded.store(true, Ordering::Release);
            Ok(())
        })
    }

    fn groups(&self) -> Result<&BTreeSet<DirectoryEntry>, ModelError> {
        self.ensure_loaded()?;
        Ok(&self.groups)
    }

    fn load_accounts<'a>(&'a self, group: &'a DirectoryEntry) -> ModelFuture<'a, Vec<AccountEntry>> {
        Box::pin(async move {
            self.ensure_loaded()?;
            Ok(self.accounts.get(group).cloned().unwrap_or_default())
        })
    }

    fn load_filtered_accounts<'a>(&'a self, filter: &'a str) -> ModelFuture<'a, GroupedAccounts> {
        Box::pin(async move {
            self.ensure_loaded()?;
            if filter.is_empty() {
                return Ok(GroupedAccounts::new());
            }
            Ok(self
                .accounts
                .iter()
                .map(|(group, accounts)| (group.clone(), filter_accounts(accounts, filter)))
                .collect())
        })
    }
}

/// Implements an [`AccountDirectoryModel`] over the administration service.
///
/// Groups are the trading groups the account manages; a group's accounts
/// are its managers followed by its traders, with roles taken from the
/// list each account appears in.
pub struct HttpAccountDirectoryModel {
    account: DirectoryEntry,
    clients: Arc<ServiceClients>,
    groups: OnceLock<BTreeSet<DirectoryEntry>>,
}

impl HttpAccountDirectoryModel {
    pub fn new(account: DirectoryEntry, clients: Arc<ServiceClients>) -> Self {
        Self {
            account,
            clients,
            groups: OnceLock::new(),
        }
    }
}

impl AccountDirectoryModel for HttpAccountDirectoryModel {
    fn is_loaded(&self) -> bool {
        self.groups.get().is_some()
    }

    fn load<'a>(&'a self) -> ModelFuture<'a, ()> {
        Box::pin(async move {
            if self.groups.get().is_some() {
                return Ok(());
            }
            let groups = self
                .clients
                .administration()
                .load_managed_trading_groups(&self.account)
                .await?;
            info!(
                account = self.account.id(),
                groups = groups.len(),
                "account directory loaded"
            );
            let _ = self.groups.set(groups.into_iter().collect());
            Ok(())
        })
    }

    fn groups(&self) -> Result<&BTreeSet<DirectoryEntry>, ModelError> {
        self.groups.get().ok_or(ModelError::NotLoaded)
    }

    fn load_accounts<'a>(&'a self, group: &'a DirectoryEntry) -> ModelFuture<'a, Vec<AccountEntry>> {
        Box::pin(async move {
            self.groups()?;
            let accounts = self
                .clients
                .administration()
                .load_trading_group(group)
                .await?
                .members();
            debug!(group = group.id(), accounts = accounts.len(), "group accounts loaded");
            Ok(accounts)
        })
    }

    fn load_filtered_accounts<'a>(&'a self, filter: &'a str) -> ModelFuture<'a, GroupedAccounts> {
        Box::pin(async move {
            let groups = self.groups()?;
            let mut result = GroupedAccounts::new();
            if filter.is_empty() {
                return Ok(result);
            }
            for group in groups {
                let accounts = self.load_accounts(group).await?;
                result.insert(group.clone(), filter_accounts(&accounts, filter));
            }
            Ok(result)
        })
    }
}

/// Memoizes [`AccountDirectoryModel::load_accounts`] of another model by
/// group id, for the lifetime of this model. Filtered searches go through
/// the same cache.
pub struct CachedAccountDirectoryModel<M> {
    base: M,
    accounts: CacheStore<u32, Vec<AccountEntry>>,
}

impl<M: AccountDirectoryModel> CachedAccountDirectoryModel<M> {
    pub fn new(base: M) -> Self {
        Self {
            base,
            accounts: CacheStore::new(),
        }
    }

    pub fn base(&self) -> &M {
        &self.base
    }

    /// Number of groups whose accounts are cached.
    pub async fn cached_groups(&self) -> usize {
        self.accounts.len().await
    }
}

impl<M: AccountDirectoryModel> AccountDirectoryModel for CachedAccountDirectoryModel<M> {
    fn is_loaded(&self) -> bool {
        self.base.is_loaded()
    }

    fn load<'a>(&'a self) -> ModelFuture<'a, ()> {
        self.base.load()
    }

    fn groups(&self) -> Result<&BTreeSet<DirectoryEntry>, ModelError> {
        self.base.groups()
    }

    fn load_accounts<'a>(&'a self, group: &'a DirectoryEntry) -> ModelFuture<'a, Vec<AccountEntry>> {
        Box::pin(async move {
            if let Some(accounts) = self.accounts.get(&group.id()).await {
                debug!(group = group.id(), "account directory cache hit");
                return Ok(accounts);
            }
            let accounts = self.base.load_accounts(group).await?;
            self.accounts.put(group.id(), accounts.clone()).await;
            Ok(accounts)
        })
    }

    fn load_filtered_accounts<'a>(&'a self, filter: &'a str) -> ModelFuture<'a, GroupedAccounts> {
        Box::pin(async move {
            let groups = self.base.groups()?;
            let mut result = GroupedAccounts::new();
            if filter.is_empty() {
                return Ok(result);
            }
            for group in groups {
                let accounts = self.load_accounts(group).await?;
                result.insert(group.clone(), filter_accounts(&accounts, filter));
            }
            Ok(result)
        })
    }
}
