use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tracing::info;

use super::{
    AccountDirectoryModel, AccountModel, CachedAccountDirectoryModel, HttpAccountDirectoryModel,
    HttpAccountModel, LocalAccountDirectoryModel, LocalAccountModel, ModelFuture,
};
use crate::client::{ReferenceDatabases, ServiceClients};
use crate::{
    AccountRoles, CountryDatabase, CurrencyDatabase, DirectoryEntry, EntitlementDatabase,
    MarketDatabase, ModelError,
};

/// Session-level model: the signed-in account, the reference databases and
/// the account directory.
pub trait DashboardModel: Send + Sync {
    fn is_loaded(&self) -> bool;

    fn load<'a>(&'a mut self) -> ModelFuture<'a, ()>;

    /// Ends the session.
    fn logout<'a>(&'a self) -> ModelFuture<'a, ()>;

    fn account(&self) -> Result<&DirectoryEntry, ModelError>;

    fn roles(&self) -> Result<AccountRoles, ModelError>;

    fn entitlement_database(&self) -> Result<&EntitlementDatabase, ModelError>;

    fn country_database(&self) -> Result<&CountryDatabase, ModelError>;

    fn currency_database(&self) -> Result<&CurrencyDatabase, ModelError>;

    fn market_database(&self) -> Result<&MarketDatabase, ModelError>;

    fn account_directory_model(&self) -> Result<Arc<dyn AccountDirectoryModel>, ModelError>;

    /// Model for the account page of `account`.
    fn make_account_model(&self, account: DirectoryEntry) -> Box<dyn AccountModel>;
}

/// Implements a [`DashboardModel`] in memory.
///
/// Loading also loads the account directory model.
pub struct LocalDashboardModel {
    account: DirectoryEntry,
    roles: AccountRoles,
    databases: ReferenceDatabases,
    account_directory: Arc<dyn AccountDirectoryModel>,
    account_models: BTreeMap<DirectoryEntry, LocalAccountModel>,
    is_loaded: bool,
}

impl LocalDashboardModel {
    pub fn new(
        account: DirectoryEntry,
        roles: AccountRoles,
        databases: ReferenceDatabases,
        account_directory: Arc<dyn AccountDirectoryModel>,
    ) -> Self {
        Self {
            account,
            roles,
            databases,
            account_directory,
            account_models: BTreeMap::new(),
            is_loaded: false,
        }
    }

    /// Placeholder used before a session has been established.
    pub fn unloaded() -> Self {
        Self::new(
            DirectoryEntry::INVALID,
            AccountRoles::default(),
            ReferenceDatabases::default(),
            Arc::new(LocalAccountDirectoryModel::new(
                BTreeSet::new(),
                BTreeMap::new(),
            )),
        )
    }

    /// Registers the model returned by `make_account_model` for its account.
    /// Accounts without one get an empty [`LocalAccountModel`].
    pub fn with_account_model(mut self, account: DirectoryEntry, model: LocalAccountModel) -> Self {
        self.account_models.insert(account, model);
        self
    }

    fn ensure_loaded(&self) -> Result<(), ModelError> {
        if self.is_loaded {
            Ok(())
        } else {
            Err(ModelError::NotLoaded)
        }
    }
}

impl DashboardModel for LocalDashboardModel {
    fn is_loaded(&self) -> bool {
        self.is_loaded
    }

    fn load<'a>(&'a mut self) -> ModelFuture<'a, ()> {
        Box::pin(async move {
            if self.is_loaded {
                return Ok(());
            }
            self.account_directory.load().await?;
            self.is_loaded = true;
            Ok(())
        })
    }

    fn logout<'a>(&'a self) -> ModelFuture<'a, ()> {
        Box::pin(async move { Ok(()) })
    }

    fn account(&self) -> Result<&DirectoryEntry, ModelError> {
        self.ensure_loaded()?;
        Ok(&self.account)
    }

    fn roles(&self) -> Result<AccountRoles, ModelError> {
        self.ensure_loaded()?;
        Ok(self.roles)
    }

    fn entitlement_database(&self) -> Result<&EntitlementDatabase, ModelError> {
        self.ensure_loaded()?;
        Ok(&self.databases.entitlements)
    }

    fn country_database(&self) -> Result<&CountryDatabase, ModelError> {
        self.ensure_loaded()?;
        Ok(&self.databases.countries)
    }

    fn currency_database(&self) -> Result<&CurrencyDatabase, ModelError> {
        self.ensure_loaded()?;
        Ok(&self.databases.currencies)
    }

    fn market_database(&self) -> Result<&MarketDatabase, ModelError> {
        self.ensure_loaded()?;
        Ok(&self.databases.markets)
    }

    fn account_directory_model(&self) -> Result<Arc<dyn AccountDirectoryModel>, ModelError> {
        self.ensure_loaded()?;
        Ok(Arc::clone(&self.account_directory))
    }

    fn make_account_model(&self, account: DirectoryEntry) -> Box<dyn AccountModel> {
        match self.account_models.get(&account) {
            Some(model) => Box::new(model.clone()),
            None => Box::new(LocalAccountModel::new(account, AccountRoles::default())),
        }
    }
}

/// Implements a [`DashboardModel`] over the service clients.
///
/// Until [`load`](DashboardModel::load) succeeds every accessor reports
/// [`ModelError::NotLoaded`].
pub struct HttpDashboardModel {
    clients: Arc<ServiceClients>,
    model: LocalDashboardModel,
}

impl HttpDashboardModel {
    pub fn new(clients: Arc<ServiceClients>) -> Self {
        Self {
            clients,
            model: LocalDashboardModel::unloaded(),
        }
    }

    pub fn clients(&self) -> &Arc<ServiceClients> {
        &self.clients
    }
}

impl DashboardModel for HttpDashboardModel {
    fn is_loaded(&self) -> bool {
        self.model.is_loaded()
    }

    fn load<'a>(&'a mut self) -> ModelFuture<'a, ()> {
        Box::pin(async move {
            if self.model.is_loaded() {
                return Ok(());
            }
            let databases = self.clients.open().await?.clone();
            let account = self.clients.service_locator().load_current_account().await?;
            let roles = self
                .clients
                .administration()
                .load_account_roles(&account)
                .await?;
            let account_directory = Arc::new(CachedAccountDirectoryModel::new(
                HttpAccountDirectoryModel::new(account.clone(), Arc::clone(&self.clients)),
            ));
            let mut model = LocalDashboardModel::new(account, roles, databases, account_directory);
            model.load().await?;
            info!(account = model.account.id(), "dashboard loaded");
            self.model = model;
            Ok(())
        })
    }

    fn logout<'a>(&'a self) -> ModelFuture<'a, ()> {
        Box::pin(async move {
            self.clients.close().await?;
            Ok(())
        })
    }

    fn account(&self) -> Result<&DirectoryEntry, ModelError> {
        self.model.account()
    }

    fn roles(&self) -> Result<AccountRoles, ModelError> {
        self.model.roles()
    }

    fn entitlement_database(&self) -> Result<&EntitlementDatabase, ModelError> {
        self.model.entitlement_database()
    }

    fn country_database(&self) -> Result<&CountryDatabase, ModelError> {
        self.model.country_database()
    }

    fn currency_database(&self) -> Result<&CurrencyDatabase, ModelError> {
        self.model.currency_database()
    }

    fn market_database(&self) -> Result<&MarketDatabase, ModelError> {
        self.model.market_database()
    }

    fn account_directory_model(&self) -> Result<Arc<dyn AccountDirectoryModel>, ModelError> {
        self.model.account_directory_model()
    }

    fn make_account_model(&self, account: DirectoryEntry) -> Box<dyn AccountModel> {
        Box::new(HttpAccountModel::new(account, Arc::clone(&self.clients)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AccountRole;

    #[tokio::test]
    async fn placeholder_reports_not_loaded() {
        let model = LocalDashboardModel::unloaded();

        assert_eq!(model.account().err(), Some(ModelError::NotLoaded));
        assert!(model.account_directory_model().is_err());
    }

    #[tokio::test]
    async fn load_also_loads_account_directory() {
        let directory = Arc::new(LocalAccountDirectoryModel::new(
            BTreeSet::from([DirectoryEntry::make_directory(10, "desk")]),
            BTreeMap::new(),
        ));
        let mut model = LocalDashboardModel::new(
            DirectoryEntry::make_account(1, "admin"),
            AccountRoles::from_roles([AccountRole::Administrator]),
            ReferenceDatabases::default(),
            directory.clone(),
        );

        model.load().await.expect("load");

        assert!(directory.is_loaded());
        assert_eq!(model.account().expect("loaded").name(), "admin");
    }

    #[tokio::test]
    async fn registered_account_models_are_returned() {
        let bob = DirectoryEntry::make_account(9, "bob");
        let roles = AccountRoles::from_roles([AccountRole::Manager]);
        let model = LocalDashboardModel::unloaded()
            .with_account_model(bob.clone(), LocalAccountModel::new(bob.clone(), roles));

        let mut account = model.make_account_model(bob);
        account.load().await.expect("load");

        assert_eq!(account.roles().expect("loaded"), roles);
    }
}
