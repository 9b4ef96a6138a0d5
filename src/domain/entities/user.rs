use serde::{Deserialize, Serialize};

use super::alert::AlertId;

/// A user known to the identity system. Users are referenced by alerts, never owned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    /// Ids of the alerts this user administers, ascending.
    #[serde(default)]
    pub admined_alerts: Vec<AlertId>,
}

impl User {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            admined_alerts: Vec::new(),
        }
    }
}
