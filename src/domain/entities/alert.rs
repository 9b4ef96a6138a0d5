use serde::{Deserialize, Serialize};

use super::user::User;

/// Identifier assigned by the store when an alert is first inserted.
pub type AlertId = i64;

/// A named monitoring rule owned by one or more admin users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub id: AlertId,
    pub name: String,
    pub enabled: bool,
    /// Admin user names in the order they were granted. Never empty.
    pub admins: Vec<String>,
}

impl Alert {
    #[must_use]
    pub fn is_admin(&self, user_name: &str) -> bool {
        self.admins.iter().any(|a| a == user_name)
    }
}

/// An alert that has not been persisted yet and therefore has no id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAlert {
    pub name: String,
    pub enabled: bool,
    pub admins: Vec<String>,
}

impl NewAlert {
    #[must_use]
    pub fn into_alert(self, id: AlertId) -> Alert {
        Alert {
            id,
            name: self.name,
            enabled: self.enabled,
            admins: self.admins,
        }
    }
}

/// Alert with its admin user records resolved, as served by the public read path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedAlert {
    pub id: AlertId,
    pub name: String,
    pub enabled: bool,
    pub admins: Vec<User>,
}
