use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Permission role an account may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AccountRole {
    Trader,
    Manager,
    Administrator,
    Service,
}

impl AccountRole {
    pub const ALL: [Self; 4] = [
        Self::Trader,
        Self::Manager,
        Self::Administrator,
        Self::Service,
    ];

    pub const fn bit(self) -> u8 {
        match self {
            Self::Trader => 0,
            Self::Manager => 1,
            Self::Administrator => 2,
            Self::Service => 3,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trader => "trader",
            Self::Manager => "manager",
            Self::Administrator => "administrator",
            Self::Service => "service",
        }
    }
}

impl TryFrom<u8> for AccountRole {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|role| role.bit() == value)
            .ok_or(ValidationError::InvalidAccountRole { value })
    }
}

impl Display for AccountRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of [`AccountRole`]s stored as a bit mask, serialized as the raw mask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountRoles(u32);

impl AccountRoles {
    pub const fn new(mask: u32) -> Self {
        Self(mask)
    }

    pub fn from_roles(roles: impl IntoIterator<Item = AccountRole>) -> Self {
        let mut value = Self::default();
        for role in roles {
            value.set(role);
        }
        value
    }

    pub const fn mask(self) -> u32 {
        self.0
    }

    pub const fn test(self, role: AccountRole) -> bool {
        self.0 & (1 << role.bit()) != 0
    }

    pub fn set(&mut self, role: AccountRole) {
        self.0 |= 1 << role.bit();
    }

    pub fn reset(&mut self, role: AccountRole) {
        self.0 &= !(1 << role.bit());
    }

    /// Roles present in the mask, in declaration order.
    pub fn iter(self) -> impl Iterator<Item = AccountRole> {
        AccountRole::ALL
            .into_iter()
            .filter(move |role| self.test(*role))
    }
}
