use serde::{Deserialize, Serialize};

use crate::{CountryCode, UtcDateTime};

/// Profile fields of an account.
///
/// Editors clone the loaded identity, mutate the copy, and compare it with
/// the original to decide whether there is anything to submit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountIdentity {
    pub first_name: String,
    pub last_name: String,
    pub e_mail: String,
    pub address_line_one: String,
    pub address_line_two: String,
    pub address_line_three: String,
    pub city: String,
    pub province: String,
    pub country: CountryCode,
    pub photo_id: String,
    pub user_notes: String,
    pub registration_time: UtcDateTime,
    pub last_login_time: UtcDateTime,
}

impl AccountIdentity {
    /// True when `edited` differs from `self` in any field.
    pub fn is_dirty(&self, edited: &Self) -> bool {
        self != edited
    }

    pub fn full_name(&self) -> String {
        match (self.first_name.is_empty(), self.last_name.is_empty()) {
            (false, false) => format!("{} {}", self.first_name, self.last_name),
            (false, true) => self.first_name.clone(),
            _ => self.last_name.clone(),
        }
    }
}
