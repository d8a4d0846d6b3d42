use serde::Serialize;

use super::{ClientError, Empty, ServiceTransport};
use crate::{
    AccountIdentity, AccountModificationRequest, AccountRoles, DirectoryEntry,
    EntitlementDatabase, EntitlementModification, Message, RiskModification, RiskParameters,
    TradingGroup,
};

const LOAD_ACCOUNT_ROLES: &str = "/api/administration_service/load_account_roles";
const STORE_ACCOUNT_ROLES: &str = "/api/administration_service/store_account_roles";
const LOAD_ACCOUNT_IDENTITY: &str = "/api/administration_service/load_account_identity";
const STORE_ACCOUNT_IDENTITY: &str = "/api/administration_service/store_account_identity";
const LOAD_MANAGED_TRADING_GROUPS: &str =
    "/api/administration_service/load_managed_trading_groups";
const LOAD_TRADING_GROUP: &str = "/api/administration_service/load_trading_group";
const LOAD_ACCOUNT_ENTITLEMENTS: &str = "/api/administration_service/load_account_entitlements";
const LOAD_ENTITLEMENT_MODIFICATION: &str =
    "/api/administration_service/load_entitlement_modification";
const SUBMIT_ENTITLEMENT_MODIFICATION_REQUEST: &str =
    "/api/administration_service/submit_entitlement_modification_request";
const LOAD_RISK_PARAMETERS: &str = "/api/administration_service/load_risk_parameters";
const LOAD_RISK_MODIFICATION: &str = "/api/administration_service/load_risk_modification";
const SUBMIT_RISK_MODIFICATION_REQUEST: &str =
    "/api/administration_service/submit_risk_modification_request";
const LOAD_ENTITLEMENTS_DATABASE: &str = "/api/administration_service/load_entitlements_database";

#[derive(Serialize)]
struct AccountRequest<'a> {
    account: &'a DirectoryEntry,
}

#[derive(Serialize)]
struct StoreRolesRequest<'a> {
    account: &'a DirectoryEntry,
    roles: AccountRoles,
}

#[derive(Serialize)]
struct StoreIdentityRequest<'a> {
    account: &'a DirectoryEntry,
    identity: &'a AccountIdentity,
}

#[derive(Serialize)]
struct DirectoryEntryRequest<'a> {
    directory_entry: &'a DirectoryEntry,
}

#[derive(Serialize)]
struct IdRequest {
    id: u64,
}

#[derive(Serialize)]
struct ModificationRequest<'a, M> {
    account: &'a DirectoryEntry,
    modification: &'a M,
    comment: &'a Message,
}

/// Accounts, groups, entitlements and risk settings.
#[derive(Clone)]
pub struct AdministrationClient {
    transport: ServiceTransport,
}

impl AdministrationClient {
    pub fn new(transport: ServiceTransport) -> Self {
        Self { transport }
    }

    pub async fn load_account_roles(
        &self,
        account: &DirectoryEntry,
    ) -> Result<AccountRoles, ClientError> {
        self.transport
            .post(LOAD_ACCOUNT_ROLES, &AccountRequest { account })
            .await
    }

    /// Replaces the account's roles; the server echoes the roles it stored.
    pub async fn store_account_roles(
        &self,
        account: &DirectoryEntry,
        roles: AccountRoles,
    ) -> Result<AccountRoles, ClientError> {
        self.transport
            .post(STORE_ACCOUNT_ROLES, &StoreRolesRequest { account, roles })
            .await
    }

    pub async fn load_account_identity(
        &self,
        account: &DirectoryEntry,
    ) -> Result<AccountIdentity, ClientError> {
        self.transport
            .post(LOAD_ACCOUNT_IDENTITY, &AccountRequest { account })
            .await
    }

    pub async fn store_account_identity(
        &self,
        account: &DirectoryEntry,
        identity: &AccountIdentity,
    ) -> Result<(), ClientError> {
        self.transport
            .post_unit(
                STORE_ACCOUNT_IDENTITY,
                &StoreIdentityRequest { account, identity },
            )
            .await
    }

    /// Trading groups the account may administer.
    pub async fn load_managed_trading_groups(
        &self,
        account: &DirectoryEntry,
    ) -> Result<Vec<DirectoryEntry>, ClientError> {
        self.transport
            .post(LOAD_MANAGED_TRADING_GROUPS, &AccountRequest { account })
            .await
    }

    pub async fn load_trading_group(
        &self,
        directory_entry: &DirectoryEntry,
    ) -> Result<TradingGroup, ClientError> {
        self.transport
            .post(LOAD_TRADING_GROUP, &DirectoryEntryRequest { directory_entry })
            .await
    }

    /// Entitlement groups the account belongs to.
    pub async fn load_account_entitlements(
        &self,
        account: &DirectoryEntry,
    ) -> Result<Vec<DirectoryEntry>, ClientError> {
        self.transport
            .post(LOAD_ACCOUNT_ENTITLEMENTS, &AccountRequest { account })
            .await
    }

    pub async fn load_entitlement_modification(
        &self,
        id: u64,
    ) -> Result<EntitlementModification, ClientError> {
        self.transport
            .post(LOAD_ENTITLEMENT_MODIFICATION, &IdRequest { id })
            .await
    }

    pub async fn submit_entitlement_modification_request(
        &self,
        account: &DirectoryEntry,
        modification: &EntitlementModification,
        comment: &Message,
    ) -> Result<AccountModificationRequest, ClientError> {
        self.transport
            .post(
                SUBMIT_ENTITLEMENT_MODIFICATION_REQUEST,
                &ModificationRequest {
                    account,
                    modification,
                    comment,
                },
            )
            .await
    }

    pub async fn load_risk_parameters(
        &self,
        account: &DirectoryEntry,
    ) -> Result<RiskParameters, ClientError> {
        self.transport
            .post(LOAD_RISK_PARAMETERS, &AccountRequest { account })
            .await
    }

    pub async fn load_risk_modification(&self, id: u64) -> Result<RiskModification, ClientError> {
        self.transport
            .post(LOAD_RISK_MODIFICATION, &IdRequest { id })
            .await
    }

    pub async fn submit_risk_modification_request(
        &self,
        account: &DirectoryEntry,
        modification: &RiskModification,
        comment: &Message,
    ) -> Result<AccountModificationRequest, ClientError> {
        self.transport
            .post(
                SUBMIT_RISK_MODIFICATION_REQUEST,
                &ModificationRequest {
                    account,
                    modification,
                    comment,
                },
            )
            .await
    }

    pub async fn load_entitlements_database(&self) -> Result<EntitlementDatabase, ClientError> {
        self.transport
            .post(LOAD_ENTITLEMENTS_DATABASE, &Empty {})
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::http_client::StaticHttpClient;
    use crate::{ClientConfig, Money};

    fn client(http: StaticHttpClient) -> (Arc<StaticHttpClient>, AdministrationClient) {
        let http = Arc::new(http);
        let transport = ServiceTransport::new(http.clone(), ClientConfig::default());
        (http, AdministrationClient::new(transport))
    }

    #[tokio::test]
    async fn loads_entitlement_modification_by_id() {
        let (http, client) = client(StaticHttpClient::new().with_json(
            LOAD_ENTITLEMENT_MODIFICATION,
            r#"{"entitlements":[{"type":1,"id":40,"name":"TSX Level 1"}]}"#,
        ));

        let modification = client
            .load_entitlement_modification(17)
            .await
            .expect("modification");

        assert_eq!(modification.entitlements[0].name(), "TSX Level 1");
        assert_eq!(http.requests()[0].body, r#"{"id":17}"#);
    }

    #[tokio::test]
    async fn loads_risk_modification_by_id() {
        let (http, client) = client(StaticHttpClient::new().with_json(
            LOAD_RISK_MODIFICATION,
            r#"{"parameters":{"currency":124,"buying_power":2500000000,
                "allowed_state":{"type":0,"expiry":"2024-06-01T00:00:00Z"},
                "net_loss":1000000000,"transition_time":30000000}}"#,
        ));

        let modification = client.load_risk_modification(23).await.expect("modification");

        assert_eq!(
            modification.parameters.buying_power,
            Money::parse("2500").expect("money")
        );
        assert_eq!(modification.parameters.transition_time.as_secs(), 30);
        assert_eq!(http.requests()[0].body, r#"{"id":23}"#);
    }
}
