//! Team domain model.

use serde::{Deserialize, Serialize};

/// A team to provision in the remote organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Domain key; combined with the org into the dedup key.
    pub id: String,
    /// Team name as created remotely.
    pub name: String,
    /// Team description.
    #[serde(default)]
    pub description: String,
    /// Usernames to add as members.
    #[serde(default, alias = "teamMembers", skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<String>,
}

impl Team {
    /// Composite dedup key, `{org}/{team id}`.
    pub fn dedup_key(&self, org: &str) -> String {
        format!("{org}/{}", self.id)
    }
}
