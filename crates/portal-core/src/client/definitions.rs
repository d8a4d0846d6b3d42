use super::{ClientError, Empty, ServiceTransport};
use crate::{CountryDatabase, CurrencyDatabase, MarketDatabase};

const LOAD_COUNTRY_DATABASE: &str = "/api/definitions_service/load_country_database";
const LOAD_CURRENCY_DATABASE: &str = "/api/definitions_service/load_currency_database";
const LOAD_MARKET_DATABASE: &str = "/api/definitions_service/load_market_database";

/// Reference data published by the definitions service.
#[derive(Clone)]
pub struct DefinitionsClient {
    transport: ServiceTransport,
}

impl DefinitionsClient {
    pub fn new(transport: ServiceTransport) -> Self {
        Self { transport }
    }

    pub async fn load_country_database(&self) -> Result<CountryDatabase, ClientError> {
        self.transport.post(LOAD_COUNTRY_DATABASE, &Empty {}).await
    }

    pub async fn load_currency_database(&self) -> Result<CurrencyDatabase, ClientError> {
        self.transport.post(LOAD_CURRENCY_DATABASE, &Empty {}).await
    }

    pub async fn load_market_database(&self) -> Result<MarketDatabase, ClientError> {
        self.transport.post(LOAD_MARKET_DATABASE, &Empty {}).await
    }
}
