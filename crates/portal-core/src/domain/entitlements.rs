use serde::{Deserialize, Serialize};

use crate::{CurrencyId, DirectoryEntry, Money};

/// A purchasable entitlement, granted by membership in `group_entry`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitlementEntry {
    pub name: String,
    pub price: Money,
    pub currency: CurrencyId,
    pub group_entry: DirectoryEntry,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitlementDatabase {
    pub entries: Vec<EntitlementEntry>,
}

impl EntitlementDatabase {
    pub fn from_group(&self, group: &DirectoryEntry) -> Option<&EntitlementEntry> {
        self.entries.iter().find(|entry| &entry.group_entry == group)
    }
}

/// Requested set of entitlements for an account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitlementModification {
    pub entitlements: Vec<DirectoryEntry>,
}

impl EntitlementModification {
    pub fn new(entitlements: impl IntoIterator<Item = DirectoryEntry>) -> Self {
        Self {
            entitlements: entitlements.into_iter().collect(),
        }
    }
}
