use serde::Serialize;

use super::{ClientError, Empty, ServiceTransport};
use crate::DirectoryEntry;

const LOGIN: &str = "/api/service_locator/login";
const LOAD_CURRENT_ACCOUNT: &str = "/api/service_locator/load_current_account";
const STORE_PASSWORD: &str = "/api/service_locator/store_password";
const LOAD_PARENTS: &str = "/api/service_locator/load_parents";
const LOGOUT: &str = "/api/service_locator/logout";

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct StorePasswordRequest<'a> {
    account: &'a DirectoryEntry,
    password: &'a str,
}

#[derive(Serialize)]
struct AccountRequest<'a> {
    account: &'a DirectoryEntry,
}

/// Session management and directory lookups.
#[derive(Clone)]
pub struct ServiceLocatorClient {
    transport: ServiceTransport,
}

impl ServiceLocatorClient {
    pub fn new(transport: ServiceTransport) -> Self {
        Self { transport }
    }

    /// Starts a session; the server answers with the logged-in account.
    pub async fn login(&self, username: &str, password: &str) -> Result<DirectoryEntry, ClientError> {
        self.transport
            .post(LOGIN, &LoginRequest { username, password })
            .await
    }

    pub async fn load_current_account(&self) -> Result<DirectoryEntry, ClientError> {
        self.transport.post(LOAD_CURRENT_ACCOUNT, &Empty {}).await
    }

    pub async fn store_password(
        &self,
        account: &DirectoryEntry,
        password: &str,
    ) -> Result<(), ClientError> {
        self.transport
            .post_unit(STORE_PASSWORD, &StorePasswordRequest { account, password })
            .await
    }

    /// Directories the account is a direct member of.
    pub async fn load_parents(
        &self,
        account: &DirectoryEntry,
    ) -> Result<Vec<DirectoryEntry>, ClientError> {
        self.transport
            .post(LOAD_PARENTS, &AccountRequest { account })
            .await
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        self.transport.post_unit(LOGOUT, &Empty {}).await
    }
}
