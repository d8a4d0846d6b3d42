use std::sync::Arc;

use tracing::info;

use super::{loaded, ModelFuture};
use crate::client::ServiceClients;
use crate::{
    ComplianceRuleEntry, ComplianceRuleEntryState, ComplianceRuleSchema, DirectoryEntry,
    ModelError,
};

/// Rule entries being edited on the compliance page, plus the schemas new
/// rules can be made from. Edits stay local; nothing is persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompliancePageState {
    pub entries: Vec<ComplianceRuleEntry>,
    pub schemas: Vec<ComplianceRuleSchema>,
}

impl CompliancePageState {
    pub fn new(entries: Vec<ComplianceRuleEntry>, schemas: Vec<ComplianceRuleSchema>) -> Self {
        Self { entries, schemas }
    }

    /// Appends a disabled rule built from `schema`, attached to the
    /// placeholder directory `0 "empty"`. The new entry has id `0` until
    /// the server assigns one.
    pub fn on_rule_add(&mut self, schema: &ComplianceRuleSchema) {
        self.entries.push(ComplianceRuleEntry::new(
            0,
            DirectoryEntry::make_directory(0, "empty"),
            ComplianceRuleEntryState::Disabled,
            schema.clone(),
        ));
    }

    /// Replaces every entry with the same id as `updated`. Returns whether
    /// any entry matched.
    pub fn on_rule_change(&mut self, updated: &ComplianceRuleEntry) -> bool {
        let mut changed = false;
        for entry in self.entries.iter_mut().filter(|entry| entry.id == updated.id) {
            *entry = updated.clone();
            changed = true;
        }
        changed
    }
}

/// Model behind the compliance page.
pub trait ComplianceModel: Send + Sync {
    fn is_loaded(&self) -> bool;

    fn load<'a>(&'a mut self) -> ModelFuture<'a, ()>;

    fn entries(&self) -> Result<&[ComplianceRuleEntry], ModelError>;

    fn schemas(&self) -> Result<&[ComplianceRuleSchema], ModelError>;

    fn on_rule_add(&mut self, schema: &ComplianceRuleSchema) -> Result<(), ModelError>;

    fn on_rule_change(&mut self, entry: &ComplianceRuleEntry) -> Result<bool, ModelError>;
}

/// Implements a [`ComplianceModel`] in memory.
#[derive(Debug, Clone)]
pub struct LocalComplianceModel {
    state: CompliancePageState,
    is_loaded: bool,
}

impl LocalComplianceModel {
    pub fn new(entries: Vec<ComplianceRuleEntry>, schemas: Vec<ComplianceRuleSchema>) -> Self {
        Self {
            state: CompliancePageState::new(entries, schemas),
            is_loaded: false,
        }
    }

    fn state(&self) -> Result<&CompliancePageState, ModelError> {
        if !self.is_loaded {
            return Err(ModelError::NotLoaded);
        }
        Ok(&self.state)
    }

    fn state_mut(&mut self) -> Result<&mut CompliancePageState, ModelError> {
        if !self.is_loaded {
            return Err(ModelError::NotLoaded);
        }
        Ok(&mut self.state)
    }
}

impl ComplianceModel for LocalComplianceModel {
    fn is_loaded(&self) -> bool {
        self.is_loaded
    }

    fn load<'a>(&'a mut self) -> ModelFuture<'a, ()> {
        Box::pin(async move {
            self.is_loaded = true;
            Ok(())
        })
    }

    fn entries(&self) -> Result<&[ComplianceRuleEntry], ModelError> {
        self.state().map(|state| state.entries.as_slice())
    }

    fn schemas(&self) -> Result<&[ComplianceRuleSchema], ModelError> {
        self.state().map(|state| state.schemas.as_slice())
    }

    fn on_rule_add(&mut self, schema: &ComplianceRuleSchema) -> Result<(), ModelError> {
        self.state_mut()?.on_rule_add(schema);
        Ok(())
    }

    fn on_rule_change(&mut self, entry: &ComplianceRuleEntry) -> Result<bool, ModelError> {
        Ok(self.state_mut()?.on_rule_change(entry))
    }
}

/// Implements a [`ComplianceModel`] over the compliance service.
pub struct HttpComplianceModel {
    account: DirectoryEntry,
    clients: Arc<ServiceClients>,
    state: Option<CompliancePageState>,
}

impl HttpComplianceModel {
    pub fn new(account: DirectoryEntry, clients: Arc<ServiceClients>) -> Self {
        Self {
            account,
            clients,
            state: None,
        }
    }
}

impl ComplianceModel for HttpComplianceModel {
    fn is_loaded(&self) -> bool {
        self.state.is_some()
    }

    fn load<'a>(&'a mut self) -> ModelFuture<'a, ()> {
        Box::pin(async move {
            if self.state.is_some() {
                return Ok(());
            }
            let compliance = self.clients.compliance();
            let entries = compliance
                .load_directory_entry_compliance_rule_entry(&self.account)
                .await?;
            let schemas = compliance.load_compliance_rule_schemas().await?;
            info!(
                account = self.account.id(),
                entries = entries.len(),
                schemas = schemas.len(),
                "compliance model loaded"
            );
            self.state = Some(CompliancePageState::new(entries, schemas));
            Ok(())
        })
    }

    fn entries(&self) -> Result<&[ComplianceRuleEntry], ModelError> {
        loaded(&self.state).map(|state| state.entries.as_slice())
    }

    fn schemas(&self) -> Result<&[ComplianceRuleSchema], ModelError> {
        loaded(&self.state).map(|state| state.schemas.as_slice())
    }

    fn on_rule_add(&mut self, schema: &ComplianceRuleSchema) -> Result<(), ModelError> {
        let state = self.state.as_mut().ok_or(ModelError::NotLoaded)?;
        state.on_rule_add(schema);
        Ok(())
    }

    fn on_rule_change(&mut self, entry: &ComplianceRuleEntry) -> Result<bool, ModelError> {
        let state = self.state.as_mut().ok_or(ModelError::NotLoaded)?;
        Ok(state.on_rule_change(entry))
    }
}
