use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::info;

use super::{
    ComplianceModel, EntitlementsModel, HttpComplianceModel, HttpEntitlementsModel,
    HttpProfileModel, HttpRiskModel, LocalComplianceModel, LocalEntitlementsModel,
    LocalProfileModel, LocalRiskModel, ModelFuture, ProfileModel, RiskModel,
};
use crate::client::ServiceClients;
use crate::{
    AccountIdentity, AccountRoles, ComplianceRuleEntry, ComplianceRuleSchema, DirectoryEntry,
    ModelError, RiskParameters,
};

/// Model behind the account page: the account, its roles, and factories for
/// the per-tab models.
pub trait AccountModel: Send + Sync {
    fn is_loaded(&self) -> bool;

    fn account(&self) -> Result<&DirectoryEntry, ModelError>;

    fn roles(&self) -> Result<AccountRoles, ModelError>;

    fn load<'a>(&'a mut self) -> ModelFuture<'a, ()>;

    fn make_profile_model(&self) -> Box<dyn ProfileModel>;

    fn make_entitlements_model(&self) -> Box<dyn EntitlementsModel>;

    fn make_risk_model(&self) -> Box<dyn RiskModel>;

    fn make_compliance_model(&self) -> Box<dyn ComplianceModel>;
}

/// Implements an [`AccountModel`] in memory.
///
/// The child models it makes are seeded from the values given here.
#[derive(Debug, Clone)]
pub struct LocalAccountModel {
    is_loaded: bool,
    account: DirectoryEntry,
    roles: AccountRoles,
    identity: AccountIdentity,
    groups: Vec<DirectoryEntry>,
    entitlements: BTreeSet<DirectoryEntry>,
    risk_parameters: RiskParameters,
    compliance_entries: Vec<ComplianceRuleEntry>,
    compliance_schemas: Vec<ComplianceRuleSchema>,
}

impl LocalAccountModel {
    pub fn new(account: DirectoryEntry, roles: AccountRoles) -> Self {
        Self {
            is_loaded: false,
            account,
            roles,
            identity: AccountIdentity::default(),
            groups: Vec::new(),
            entitlements: BTreeSet::new(),
            risk_parameters: RiskParameters::default(),
            compliance_entries: Vec::new(),
            compliance_schemas: Vec::new(),
        }
    }

    pub fn with_identity(mut self, identity: AccountIdentity) -> Self {
        self.identity = identity;
        self
    }

    pub fn with_groups(mut self, groups: Vec<DirectoryEntry>) -> Self {
        self.groups = groups;
        self
    }

    pub fn with_entitlements(mut self, entitlements: impl IntoIterator<Item = DirectoryEntry>) -> Self {
        self.entitlements = entitlements.into_iter().collect();
        self
    }

    pub fn with_risk_parameters(mut self, risk_parameters: RiskParameters) -> Self {
        self.risk_parameters = risk_parameters;
        self
    }

    pub fn with_compliance(
        mut self,
        entries: Vec<ComplianceRuleEntry>,
        schemas: Vec<ComplianceRuleSchema>,
    ) -> Self {
        self.compliance_entries = entries;
        self.compliance_schemas = schemas;
        self
    }
}

impl AccountModel for LocalAccountModel {
    fn is_loaded(&self) -> bool {
        self.is_loaded
    }

    fn account(&self) -> Result<&DirectoryEntry, ModelError> {
        if !self.is_loaded {
            return Err(ModelError::NotLoaded);
        }
        Ok(&self.account)
    }

    fn roles(&self) -> Result<AccountRoles, ModelError> {
        if !self.is_loaded {
            return Err(ModelError::NotLoaded);
        }
        Ok(self.roles)
    }

    fn load<'a>(&'a mut self) -> ModelFuture<'a, ()> {
        Box::pin(async move {
            self.is_loaded = true;
            Ok(())
        })
    }

    fn make_profile_model(&self) -> Box<dyn ProfileModel> {
        Box::new(LocalProfileModel::new(
            self.account.clone(),
            self.roles,
            self.identity.clone(),
            self.groups.clone(),
        ))
    }

    fn make_entitlements_model(&self) -> Box<dyn EntitlementsModel> {
        Box::new(LocalEntitlementsModel::new(
            self.account.clone(),
            self.entitlements.clone(),
        ))
    }

    fn make_risk_model(&self) -> Box<dyn RiskModel> {
        Box::new(LocalRiskModel::new(
            self.account.clone(),
            self.risk_parameters.clone(),
        ))
    }

    fn make_compliance_model(&self) -> Box<dyn ComplianceModel> {
        Box::new(LocalComplianceModel::new(
            self.compliance_entries.clone(),
            self.compliance_schemas.clone(),
        ))
    }
}

/// Implements an [`AccountModel`] over the administration service.
pub struct HttpAccountModel {
    account: DirectoryEntry,
    clients: Arc<ServiceClients>,
    roles: Option<AccountRoles>,
}

impl HttpAccountModel {
    pub fn new(account: DirectoryEntry, clients: Arc<ServiceClients>) -> Self {
        Self {
            account,
            clients,
            roles: None,
        }
    }
}

impl AccountModel for HttpAccountModel {
    fn is_loaded(&self) -> bool {
        self.roles.is_some()
    }

    fn account(&self) -> Result<&DirectoryEntry, ModelError> {
        self.roles.map(|_| &self.account).ok_or(ModelError::NotLoaded)
    }

    fn roles(&self) -> Result<AccountRoles, ModelError> {
        self.roles.ok_or(ModelError::NotLoaded)
    }

    fn load<'a>(&'a mut self) -> ModelFuture<'a, ()> {
        Box::pin(async move {
            if self.roles.is_some() {
                return Ok(());
            }
            let roles = self
                .clients
                .administration()
                .load_account_roles(&self.account)
                .await?;
            info!(account = self.account.id(), "account model loaded");
            self.roles = Some(roles);
            Ok(())
        })
    }

    fn make_profile_model(&self) -> Box<dyn ProfileModel> {
        Box::new(HttpProfileModel::new(
            self.account.clone(),
            Arc::clone(&self.clients),
        ))
    }

    fn make_entitlements_model(&self) -> Box<dyn EntitlementsModel> {
        Box::new(HttpEntitlementsModel::new(
            self.account.clone(),
            Arc::clone(&self.clients),
        ))
    }

    fn make_risk_model(&self) -> Box<dyn RiskModel> {
        Box::new(HttpRiskModel::new(
            self.account.clone(),
            Arc::clone(&self.clients),
        ))
    }

    fn make_compliance_model(&self) -> Box<dyn ComplianceModel> {
        Box::new(HttpComplianceModel::new(
            self.account.clone(),
            Arc::clone(&self.clients),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AccountRole;

    #[tokio::test]
    async fn accessors_require_load() {
        let roles = AccountRoles::from_roles([AccountRole::Trader]);
        let mut model = LocalAccountModel::new(DirectoryEntry::make_account(9, "bob"), roles);

        assert_eq!(model.account().err(), Some(ModelError::NotLoaded));
        assert_eq!(model.roles().err(), Some(ModelError::NotLoaded));

        model.load().await.expect("load");

        assert_eq!(model.account().expect("loaded").name(), "bob");
        assert_eq!(model.roles().expect("loaded"), roles);
    }

    #[tokio::test]
    async fn child_models_are_seeded_from_local_values() {
        let identity = AccountIdentity {
            first_name: String::from("Bob"),
            ..AccountIdentity::default()
        };
        let model = LocalAccountModel::new(
            DirectoryEntry::make_account(9, "bob"),
            AccountRoles::default(),
        )
        .with_identity(identity.clone());

        let mut profile = model.make_profile_model();
        profile.load().await.expect("load");

        assert_eq!(profile.identity().expect("loaded"), &identity);
    }
}
