use std::sync::Arc;

use tracing::info;

use super::{loaded, ModelFuture};
use crate::client::ServiceClients;
use crate::{AccountIdentity, AccountRoles, DirectoryEntry, ModelError};

/// Model behind the profile page.
pub trait ProfileModel: Send + Sync {
    fn is_loaded(&self) -> bool;

    fn account(&self) -> Result<&DirectoryEntry, ModelError>;

    fn roles(&self) -> Result<AccountRoles, ModelError>;

    fn identity(&self) -> Result<&AccountIdentity, ModelError>;

    /// Groups the account is a member of.
    fn groups(&self) -> Result<&[DirectoryEntry], ModelError>;

    fn load<'a>(&'a mut self) -> ModelFuture<'a, ()>;

    /// Stores new roles and identity. The loaded snapshot changes only once
    /// both writes succeed.
    fn update_identity<'a>(
        &'a mut self,
        roles: AccountRoles,
        identity: AccountIdentity,
    ) -> ModelFuture<'a, ()>;

    fn update_password<'a>(&'a mut self, password: &'a str) -> ModelFuture<'a, ()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ProfileSnapshot {
    roles: AccountRoles,
    identity: AccountIdentity,
    groups: Vec<DirectoryEntry>,
}

/// Implements a [`ProfileModel`] in memory.
#[derive(Debug, Clone)]
pub struct LocalProfileModel {
    account: DirectoryEntry,
    snapshot: ProfileSnapshot,
    password: Option<String>,
    is_loaded: bool,
}

impl LocalProfileModel {
    pub fn new(
        account: DirectoryEntry,
        roles: AccountRoles,
        identity: AccountIdentity,
        groups: Vec<DirectoryEntry>,
    ) -> Self {
        Self {
            account,
            snapshot: ProfileSnapshot {
                roles,
                identity,
                groups,
            },
            password: None,
            is_loaded: false,
        }
    }

    /// Last password set through [`ProfileModel::update_password`].
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    fn snapshot(&self) -> Result<&ProfileSnapshot, ModelError> {
        if !self.is_loaded {
            return Err(ModelError::NotLoaded);
        }
        Ok(&self.snapshot)
    }
}

impl ProfileModel for LocalProfileModel {
    fn is_loaded(&self) -> bool {
        self.is_loaded
    }

    fn account(&self) -> Result<&DirectoryEntry, ModelError> {
        self.snapshot().map(|_| &self.account)
    }

    fn roles(&self) -> Result<AccountRoles, ModelError> {
        self.snapshot().map(|snapshot| snapshot.roles)
    }

    fn identity(&self) -> Result<&AccountIdentity, ModelError> {
        self.snapshot().map(|snapshot| &snapshot.identity)
    }

    fn groups(&self) -> Result<&[DirectoryEntry], ModelError> {
        self.snapshot().map(|snapshot| snapshot.groups.as_slice())
    }

    fn load<'a>(&'a mut self) -> ModelFuture<'a, ()> {
        Box::pin(async move {
            self.is_loaded = true;
            Ok(())
        })
    }

    fn update_identity<'a>(
        &'a mut self,
        roles: AccountRoles,
        identity: AccountIdentity,
    ) -> ModelFuture<'a, ()> {
        Box::pin(async move {
            self.snapshot()?;
            self.snapshot.roles = roles;
            self.snapshot.identity = identity;
            Ok(())
        })
    }

    fn update_password<'a>(&'a mut self, password: &'a str) -> ModelFuture<'a, ()> {
        Box::pin(async move {
            self.snapshot()?;
            self.password = Some(password.to_owned());
            Ok(())
        })
    }
}

/// Implements a [`ProfileModel`] over the administration and service
/// locator clients.
pub struct HttpProfileModel {
    account: DirectoryEntry,
    clients: Arc<ServiceClients>,
    snapshot: Option<ProfileSnapshot>,
}

impl HttpProfileModel {
    pub fn new(account: DirectoryEntry, clients: Arc<ServiceClients>) -> Self {
        Self {
            account,
            clients,
            snapshot: None,
        }
    }
}

impl ProfileModel for HttpProfileModel {
    fn is_loaded(&self) -> bool {
        self.snapshot.is_some()
    }

    fn account(&self) -> Result<&DirectoryEntry, ModelError> {
        loaded(&self.snapshot).map(|_| &self.account)
    }

    fn roles(&self) -> Result<AccountRoles, ModelError> {
        loaded(&self.snapshot).map(|snapshot| snapshot.roles)
    }

    fn identity(&self) -> Result<&AccountIdentity, ModelError> {
        loaded(&self.snapshot).map(|snapshot| &snapshot.identity)
    }

    fn groups(&self) -> Result<&[DirectoryEntry], ModelError> {
        loaded(&self.snapshot).map(|snapshot| snapshot.groups.as_slice())
    }

    fn load<'a>(&'a mut self) -> ModelFuture<'a, ()> {
        Box::pin(async move {
            if self.snapshot.is_some() {
                return Ok(());
            }
            let administration = self.clients.administration();
            let roles = administration.load_account_roles(&self.account).await?;
            let identity = administration.load_account_identity(&self.account).await?;
            let groups = self
                .clients
                .service_locator()
                .load_parents(&self.account)
                .await?;
            info!(
                account = self.account.id(),
                groups = groups.len(),
                "profile model loaded"
            );
            self.snapshot = Some(ProfileSnapshot {
                roles,
                identity,
                groups,
            });
            Ok(())
        })
    }

    fn update_identity<'a>(
        &'a mut self,
        roles: AccountRoles,
        identity: AccountIdentity,
    ) -> ModelFuture<'a, ()> {
        Box::pin(async move {
            loaded(&self.snapshot)?;
            let administration = self.clients.administration();
            let stored_roles = administration
                .store_account_roles(&self.account, roles)
                .await?;
            administration
                .store_account_identity(&self.account, &identity)
                .await?;
            info!(account = self.account.id(), "profile identity stored");
            if let Some(snapshot) = self.snapshot.as_mut() {
                snapshot.roles = stored_roles;
                snapshot.identity = identity;
            }
            Ok(())
        })
    }

    fn update_password<'a>(&'a mut self, password: &'a str) -> ModelFuture<'a, ()> {
        Box::pin(async move {
            loaded(&self.snapshot)?;
            self.clients
                .service_locator()
                .store_password(&self.account, password)
                .await?;
            info!(account = self.account.id(), "profile password stored");
            Ok(())
        })
    }
}
