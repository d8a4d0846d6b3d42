use std::sync::Arc;

use tracing::info;

use super::{loaded, ModelFuture};
use crate::client::ServiceClients;
use crate::{
    AccountModificationRequest, AccountModificationType, DirectoryEntry, Message, ModelError,
    RiskModification, RiskParameters, UtcDateTime,
};

/// Model behind the risk page.
pub trait RiskModel: Send + Sync {
    fn is_loaded(&self) -> bool;

    fn account(&self) -> Result<&DirectoryEntry, ModelError>;

    fn risk_parameters(&self) -> Result<&RiskParameters, ModelError>;

    fn load<'a>(&'a mut self) -> ModelFuture<'a, ()>;

    /// Requests new risk parameters for the account. The loaded
    /// parameters are unchanged until the request is approved.
    fn submit<'a>(
        &'a mut self,
        comment: &'a str,
        parameters: &'a RiskParameters,
    ) -> ModelFuture<'a, AccountModificationRequest>;
}

/// Implements a [`RiskModel`] in memory.
#[derive(Debug, Clone)]
pub struct LocalRiskModel {
    account: DirectoryEntry,
    parameters: RiskParameters,
    submissions: Vec<(Message, RiskModification)>,
    is_loaded: bool,
}

impl LocalRiskModel {
    pub fn new(account: DirectoryEntry, parameters: RiskParameters) -> Self {
        Self {
            account,
            parameters,
            submissions: Vec::new(),
            is_loaded: false,
        }
    }

    pub fn submissions(&self) -> &[(Message, RiskModification)] {
        &self.submissions
    }
}

impl RiskModel for LocalRiskModel {
    fn is_loaded(&self) -> bool {
        self.is_loaded
    }

    fn account(&self) -> Result<&DirectoryEntry, ModelError> {
        if !self.is_loaded {
            return Err(ModelError::NotLoaded);
        }
        Ok(&self.account)
    }

    fn risk_parameters(&self) -> Result<&RiskParameters, ModelError> {
        if !self.is_loaded {
            return Err(ModelError::NotLoaded);
        }
        Ok(&self.parameters)
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
        parameters: &'a RiskParameters,
    ) -> ModelFuture<'a, AccountModificationRequest> {
        Box::pin(async move {
            self.account()?;
            self.submissions.push((
                Message::comment(comment),
                RiskModification {
                    parameters: parameters.clone(),
                },
            ));
            Ok(AccountModificationRequest {
                id: self.submissions.len() as u64,
                modification_type: AccountModificationType::Risk,
                account: self.account.clone(),
                submission_account: self.account.clone(),
                timestamp: UtcDateTime::now(),
            })
        })
    }
}

/// Implements a [`RiskModel`] over the administration service.
pub struct HttpRiskModel {
    account: DirectoryEntry,
    clients: Arc<ServiceClients>,
    parameters: Option<RiskParameters>,
}

impl HttpRiskModel {
    pub fn new(account: DirectoryEntry, clients: Arc<ServiceClients>) -> Self {
        Self {
            account,
            clients,
            parameters: None,
        }
    }
}

impl RiskModel for HttpRiskModel {
    fn is_loaded(&self) -> bool {
        self.parameters.is_some()
    }

    fn account(&self) -> Result<&DirectoryEntry, ModelError> {
        loaded(&self.parameters).map(|_| &self.account)
    }

    fn risk_parameters(&self) -> Result<&RiskParameters, ModelError> {
        loaded(&self.parameters)
    }

    fn load<'a>(&'a mut self) -> ModelFuture<'a, ()> {
        Box::pin(async move {
            if self.parameters.is_some() {
                return Ok(());
            }
            let parameters = self
                .clients
                .administration()
                .load_risk_parameters(&self.account)
                .await?;
            info!(account = self.account.id(), "risk model loaded");
            self.parameters = Some(parameters);
            Ok(())
        })
    }

    fn submit<'a>(
        &'a mut self,
        comment: &'a str,
        parameters: &'a RiskParameters,
    ) -> ModelFuture<'a, AccountModificationRequest> {
        Box::pin(async move {
            loaded(&self.parameters)?;
            let modification = RiskModification {
                parameters: parameters.clone(),
            };
            let request = self
                .clients
                .administration()
                .submit_risk_modification_request(
                    &self.account,
                    &modification,
                    &Message::comment(comment),
                )
                .await?;
            info!(
                account = self.account.id(),
                request = request.id,
                "risk modification submitted"
            );
            Ok(request)
        })
    }
}
