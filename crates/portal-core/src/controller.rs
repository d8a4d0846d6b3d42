//! Controllers owning a page model and the status a view renders.

use serde::Serialize;
use tracing::{info, warn};

use crate::models::{DashboardModel, ProfileModel};
use crate::{AccountIdentity, AccountRoles, ModelError};

/// Outcome of the last submission of a form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubmitStatus {
    pub has_error: bool,
    pub message: String,
}

impl SubmitStatus {
    fn saved() -> Self {
        Self {
            has_error: false,
            message: String::from("Saved."),
        }
    }

    fn failed(error: &ModelError) -> Self {
        Self {
            has_error: true,
            message: error.to_string(),
        }
    }

    fn from_result(result: &Result<(), ModelError>) -> Self {
        match result {
            Ok(()) => Self::saved(),
            Err(error) => Self::failed(error),
        }
    }
}

/// Drives the profile page: identity and password forms.
pub struct ProfileController {
    model: Box<dyn ProfileModel>,
    identity_status: SubmitStatus,
    password_status: SubmitStatus,
}

impl ProfileController {
    pub fn new(model: Box<dyn ProfileModel>) -> Self {
        Self {
            model,
            identity_status: SubmitStatus::default(),
            password_status: SubmitStatus::default(),
        }
    }

    pub fn model(&self) -> &dyn ProfileModel {
        self.model.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.model.is_loaded()
    }

    pub async fn mount(&mut self) -> Result<(), ModelError> {
        self.model.load().await
    }

    pub fn identity_status(&self) -> &SubmitStatus {
        &self.identity_status
    }

    pub fn password_status(&self) -> &SubmitStatus {
        &self.password_status
    }

    pub async fn submit_identity(
        &mut self,
        roles: AccountRoles,
        identity: AccountIdentity,
    ) -> &SubmitStatus {
        self.identity_status = SubmitStatus::default();
        let result = self.model.update_identity(roles, identity).await;
        self.identity_status = SubmitStatus::from_result(&result);
        &self.identity_status
    }

    pub async fn submit_password(&mut self, password: &str) -> &SubmitStatus {
        self.password_status = SubmitStatus::default();
        let result = self.model.update_password(password).await;
        self.password_status = SubmitStatus::from_result(&result);
        &self.password_status
    }
}

/// Drives the dashboard: session bootstrap and sign out.
pub struct DashboardController {
    model: Box<dyn DashboardModel>,
}

impl DashboardController {
    pub fn new(model: Box<dyn DashboardModel>) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &dyn DashboardModel {
        self.model.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.model.is_loaded()
    }

    /// Loads the dashboard. A failure is logged and leaves the controller
    /// on its loading state with the model unloaded.
    pub async fn mount(&mut self) -> Result<(), ModelError> {
        let result = self.model.load().await;
        if let Err(error) = &result {
            warn!(error = %error, "dashboard failed to load");
        }
        result
    }

    pub async fn sign_out(&self) -> Result<(), ModelError> {
        self.model.logout().await?;
        info!("signed out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LocalProfileModel;
    use crate::DirectoryEntry;

    fn controller() -> ProfileController {
        ProfileController::new(Box::new(LocalProfileModel::new(
            DirectoryEntry::make_account(2, "dave"),
            AccountRoles::default(),
            AccountIdentity::default(),
            Vec::new(),
        )))
    }

    #[tokio::test]
    async fn submit_before_mount_reports_error_text() {
        let mut controller = controller();

        let status = controller.submit_password("hunter2").await.clone();

        assert!(status.has_error);
        assert_eq!(status.message, "Model not loaded.");
        assert_eq!(controller.identity_status(), &SubmitStatus::default());
    }

    #[tokio::test]
    async fn submit_after_mount_is_saved() {
        let mut controller = controller();
        controller.mount().await.expect("mount");

        let status = controller
            .submit_identity(AccountRoles::default(), AccountIdentity::default())
            .await;

        assert_eq!(status, &SubmitStatus::saved());
    }
}
