use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::info;

use super::{loaded, ModelFuture};
use crate::client::ServiceClients;
use crate::{
    AccountModificationRequest, AccountModificationType, DirectoryEntry, EntitlementModification,
    Message, ModelError, UtcDateTime,
};

/// Model behind the entitlements page.
pub trait EntitlementsModel: Send + Sync {
    fn is_loaded(&self) -> bool;

    fn account(&self) -> Result<&DirectoryEntry, ModelError>;

    /// Entitlement groups the account currently holds.
    fn entitlements(&self) -> Result<&BTreeSet<DirectoryEntry>, ModelError>;

    fn load<'a>(&'a mut self) -> ModelFuture<'a, ()>;

    /// Requests that the account's entitlements become `modification`.
    /// The change takes effect only once the request is approved, so the
    /// loaded entitlements are left as they are.
    fn submit<'a>(
        &'a mut self,
        comment: &'a str,
        modification: &'a EntitlementModification,
    ) -> ModelFuture<'a, AccountModificationRequest>;
}

/// Implements an [`EntitlementsModel`] in memory.
///
/// Submissions are recorded and answered with sequential request ids.
#[derive(Debug, Clone)]
pub struct LocalEntitlementsModel {
    account: DirectoryEntry,
    entitlements: BTreeSet<DirectoryEntry>,
    submissions: Vec<(Message, EntitlementModification)>,
    is_loaded: bool,
}

impl LocalEntitlementsModel {
    pub fn new(account: DirectoryEntry, entitlements: BTreeSet<DirectoryEntry>) -> Self {
        Self {
            account,
            entitlements,
            submissions: Vec::new(),
            is_loaded: false,
        }
    }

    pub fn submissions(&self) -> &[(Message, EntitlementModification)] {
        &self.submissions
    }
}

impl EntitlementsModel for LocalEntitlementsModel {
    fn is_loaded(&self) -> bool {
        self.is_loaded
    }

    fn account(&self) -> Result<&DirectoryEntry, ModelError> {
        if !self.is_loaded {
            return Err(ModelError::NotLoaded);
        }
        Ok(&self.account)
    }

    fn entitlements(&self) -> Result<&BTreeSet<DirectoryEntry>, ModelError> {
        if !self.is_loaded {
            return Err(ModelError::NotLoaded);
        }
        Ok(&self.entitlements)
    }

    fn load<'a>(&'a mut self) -> ModelFuture<'a, ()> {
        Box::pin(async move {
            self.is_loaded = true;
            Ok(())
        })
    }

    fn submit<'a>(
        &'a mut self,
        comment: &'a str,
        modification: &'a EntitlementModification,
    ) -> ModelFuture<'a, AccountModificationRequest> {
        Box::pin(async move {
            self.account()?;
            self.submissions
                .push((Message::comment(comment), modification.clone()));
            Ok(AccountModificationRequest {
                id: self.submissions.len() as u64,
                modification_type: AccountModificationType::Entitlements,
                account: self.account.clone(),
                submission_account: self.account.clone(),
                timestamp: UtcDateTime::now(),
            })
        })
    }
}

/// Implements an [`EntitlementsModel`] over the administration service.
pub struct HttpEntitlementsModel {
    account: DirectoryEntry,
    clients: Arc<ServiceClients>,
    entitlements: Option<BTreeSet<DirectoryEntry>>,
}

impl HttpEntitlementsModel {
    pub fn new(account: DirectoryEntry, clients: Arc<ServiceClients>) -> Self {
        Self {
            account,
            clients,
            entitlements: None,
        }
    }
}

impl EntitlementsModel for HttpEntitlementsModel {
    fn is_loaded(&self) -> bool {
        self.entitlements.is_some()
    }

    fn account(&self) -> Result<&DirectoryEntry, ModelError> {
        loaded(&self.entitlements).map(|_| &self.account)
    }

    fn entitlements(&self) -> Result<&BTreeSet<DirectoryEntry>, ModelError> {
        loaded(&self.entitlements)
    }

    fn load<'a>(&'a mut self) -> ModelFuture<'a, ()> {
        Box::pin(async move {
            if self.entitlements.is_some() {
                return Ok(());
            }
            let entitlements = self
                .clients
                .administration()
                .load_account_entitlements(&self.account)
                .await?;
            info!(
                account = self.account.id(),
                entitlements = entitlements.len(),
                "entitlements model loaded"
            );
            self.entitlements = Some(entitlements.into_iter().collect());
            Ok(())
        })
    }

    fn submit<'a>(
        &'a mut self,
        comment: &'a str,
        modification: &'a EntitlementModification,
    ) -> ModelFuture<'a, AccountModificationRequest> {
        Box::pin(async move {
            loaded(&self.entitlements)?;
            let request = self
                .clients
                .administration()
                .submit_entitlement_modification_request(
                    &self.account,
                    modification,
                    &Message::comment(comment),
                )
                .await?;
            info!(
                account = self.account.id(),
                request = request.id,
                "entitlement modification submitted"
            );
            Ok(request)
        })
    }
}
