use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::{AccountRoles, ValidationError};

/// Kind of node a [`DirectoryEntry`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum DirectoryEntryType {
    None,
    Account,
    Directory,
}

impl DirectoryEntryType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Account => "account",
            Self::Directory => "directory",
        }
    }
}

impl TryFrom<i32> for DirectoryEntryType {
    type Error = ValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::None),
            0 => Ok(Self::Account),
            1 => Ok(Self::Directory),
            other => Err(ValidationError::InvalidDirectoryEntryType { value: other }),
        }
    }
}

impl From<DirectoryEntryType> for i32 {
    fn from(value: DirectoryEntryType) -> Self {
        match value {
            DirectoryEntryType::None => -1,
            DirectoryEntryType::Account => 0,
            DirectoryEntryType::Directory => 1,
        }
    }
}

/// Identifies an account or a directory (group).
///
/// Two entries are equal when their ids are equal; the type and name are
/// descriptive only. Entries are immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryEntry {
    #[serde(rename = "type")]
    entry_type: DirectoryEntryType,
    id: u32,
    name: String,
}

impl DirectoryEntry {
    pub const INVALID: Self = Self {
        entry_type: DirectoryEntryType::None,
        id: u32::MAX,
        name: String::new(),
    };

    pub fn new(entry_type: DirectoryEntryType, id: u32, name: impl Into<String>) -> Self {
        Self {
            entry_type,
            id,
            name: name.into(),
        }
    }

    pub fn make_account(id: u32, name: impl Into<String>) -> Self {
        Self::new(DirectoryEntryType::Account, id, name)
    }

    pub fn make_directory(id: u32, name: impl Into<String>) -> Self {
        Self::new(DirectoryEntryType::Directory, id, name)
    }

    pub const fn entry_type(&self) -> DirectoryEntryType {
        self.entry_type
    }

    pub const fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_valid(&self) -> bool {
        self.entry_type != DirectoryEntryType::None
    }
}

impl PartialEq for DirectoryEntry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for DirectoryEntry {}

impl Hash for DirectoryEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for DirectoryEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DirectoryEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl Display for DirectoryEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} {})", self.name, self.entry_type.as_str(), self.id)
    }
}

/// One row of the account directory: an account and its roles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountEntry {
    pub account: DirectoryEntry,
    pub roles: AccountRoles,
}

impl AccountEntry {
    pub fn new(account: DirectoryEntry, roles: AccountRoles) -> Self {
        Self { account, roles }
    }
}
