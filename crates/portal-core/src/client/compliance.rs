use serde::Serialize;

use super::{ClientError, Empty, ServiceTransport};
use crate::{ComplianceRuleEntry, ComplianceRuleSchema, DirectoryEntry};

const LOAD_ENTRIES: &str = "/api/compliance_service/load_directory_entry_compliance_rule_entry";
const LOAD_SCHEMAS: &str = "/api/compliance_service/load_compliance_rule_schemas";

#[derive(Serialize)]
struct DirectoryEntryRequest<'a> {
    directory_entry: &'a DirectoryEntry,
}

/// Read access to compliance rules.
#[derive(Clone)]
pub struct ComplianceClient {
    transport: ServiceTransport,
}

impl ComplianceClient {
    pub fn new(transport: ServiceTransport) -> Self {
        Self { transport }
    }

    /// Rule entries attached directly to `directory_entry`.
    pub async fn load_directory_entry_compliance_rule_entry(
        &self,
        directory_entry: &DirectoryEntry,
    ) -> Result<Vec<ComplianceRuleEntry>, ClientError> {
        self.transport
            .post(LOAD_ENTRIES, &DirectoryEntryRequest { directory_entry })
            .await
    }

    pub async fn load_compliance_rule_schemas(
        &self,
    ) -> Result<Vec<ComplianceRuleSchema>, ClientError> {
        self.transport.post(LOAD_SCHEMAS, &Empty {}).await
    }
}
