use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{AccountEntry, AccountRole, AccountRoles, DirectoryEntry, UtcDateTime, ValidationError};

/// Body of a [`Message`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub content_type: String,
    pub message: String,
}

impl MessageBody {
    pub fn plain_text(message: impl Into<String>) -> Self {
        Self {
            content_type: String::from("text/plain"),
            message: message.into(),
        }
    }
}

/// Comment attached to an account modification request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub account: DirectoryEntry,
    pub timestamp: UtcDateTime,
    pub bodies: Vec<MessageBody>,
}

impl Message {
    /// Builds an unsent comment; the server assigns id, account and timestamp.
    pub fn comment(text: impl Into<String>) -> Self {
        Self {
            id: 0,
            account: DirectoryEntry::INVALID,
            timestamp: UtcDateTime::default(),
            bodies: vec![MessageBody::plain_text(text)],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum AccountModificationType {
    Entitlements,
    Risk,
}

impl TryFrom<i32> for AccountModificationType {
    type Error = ValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Entitlements),
            1 => Ok(Self::Risk),
            other => Err(ValidationError::InvalidModificationType { value: other }),
        }
    }
}

impl From<AccountModificationType> for i32 {
    fn from(value: AccountModificationType) -> Self {
        match value {
            AccountModificationType::Entitlements => 0,
            AccountModificationType::Risk => 1,
        }
    }
}

/// Server receipt for a submitted modification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountModificationRequest {
    pub id: u64,
    #[serde(rename = "type")]
    pub modification_type: AccountModificationType,
    pub account: DirectoryEntry,
    pub submission_account: DirectoryEntry,
    pub timestamp: UtcDateTime,
}

/// A trading group: its directory plus manager and trader sub-directories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingGroup {
    pub entry: DirectoryEntry,
    pub managers_directory: DirectoryEntry,
    pub managers: Vec<DirectoryEntry>,
    pub trading_directory: DirectoryEntry,
    pub traders: Vec<DirectoryEntry>,
}

impl TradingGroup {
    /// Managers followed by traders, each account listed once. Membership
    /// in `managers` grants Manager and in `traders` grants Trader; an
    /// account in both lists holds both roles.
    pub fn members(&self) -> Vec<AccountEntry> {
        let mut positions: HashMap<u32, usize> =
            HashMap::with_capacity(self.managers.len() + self.traders.len());
        let mut members: Vec<AccountEntry> = Vec::with_capacity(positions.capacity());
        let listed = self
            .managers
            .iter()
            .map(|account| (account, AccountRole::Manager))
            .chain(self.traders.iter().map(|account| (account, AccountRole::Trader)));
        for (account, role) in listed {
            match positions.get(&account.id()) {
                Some(&index) => members[index].roles.set(role),
                None => {
                    positions.insert(account.id(), members.len());
                    members.push(AccountEntry::new(
                        account.clone(),
                        AccountRoles::from_roles([role]),
                    ));
                }
            }
        }
        members
    }
}
