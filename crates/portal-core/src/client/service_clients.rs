use std::sync::{Arc, OnceLock};

use tracing::info;

use super::{
    AdministrationClient, ClientError, ComplianceClient, DefinitionsClient, ServiceLocatorClient,
    ServiceTransport,
};
use crate::config::ClientConfig;
use crate::http_client::{HttpClient, ReqwestHttpClient};
use crate::{CountryDatabase, CurrencyDatabase, EntitlementDatabase, MarketDatabase};

/// Reference databases fetched when the clients are opened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceDatabases {
    pub entitlements: EntitlementDatabase,
    pub countries: CountryDatabase,
    pub currencies: CurrencyDatabase,
    pub markets: MarketDatabase,
}

/// Every service client of one session, sharing a single transport.
pub struct ServiceClients {
    service_locator: ServiceLocatorClient,
    administration: AdministrationClient,
    definitions: DefinitionsClient,
    compliance: ComplianceClient,
    databases: OnceLock<ReferenceDatabases>,
}

impl ServiceClients {
    pub fn new(http: Arc<dyn HttpClient>, config: ClientConfig) -> Self {
        let transport = ServiceTransport::new(http, config);
        Self {
            service_locator: ServiceLocatorClient::new(transport.clone()),
            administration: AdministrationClient::new(transport.clone()),
            definitions: DefinitionsClient::new(transport.clone()),
            compliance: ComplianceClient::new(transport),
            databases: OnceLock::new(),
        }
    }

    /// Clients talking to a live server through reqwest.
    pub fn connect(config: ClientConfig) -> Self {
        let http = Arc::new(ReqwestHttpClient::new(&config));
        Self::new(http, config)
    }

    pub fn service_locator(&self) -> &ServiceLocatorClient {
        &self.service_locator
    }

    pub fn administration(&self) -> &AdministrationClient {
        &self.administration
    }

    pub fn definitions(&self) -> &DefinitionsClient {
        &self.definitions
    }

    pub fn compliance(&self) -> &ComplianceClient {
        &self.compliance
    }

    /// Loads the entitlement, country, currency and market databases in
    /// that order. Opening an already open set of clients is a no-op.
    pub async fn open(&self) -> Result<&ReferenceDatabases, ClientError> {
        if let Some(databases) = self.databases.get() {
            return Ok(databases);
        }
        let entitlements = self.administration.load_entitlements_database().await?;
        let countries = self.definitions.load_country_database().await?;
        let currencies = self.definitions.load_currency_database().await?;
        let markets = self.definitions.load_market_database().await?;
        info!(
            entitlements = entitlements.entries.len(),
            countries = countries.entries.len(),
            currencies = currencies.entries.len(),
            markets = markets.entries.len(),
            "reference databases loaded"
        );
        Ok(self.databases.get_or_init(|| ReferenceDatabases {
            entitlements,
            countries,
            currencies,
            markets,
        }))
    }

    /// Databases loaded by [`open`](Self::open), if it has completed.
    pub fn databases(&self) -> Option<&ReferenceDatabases> {
        self.databases.get()
    }

    /// Ends the session on the server.
    pub async fn close(&self) -> Result<(), ClientError> {
        self.service_locator.logout().await?;
        info!("session closed");
        Ok(())
    }
}
