use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::profile::{Role, UserProfile};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
/// Token -> profile mapping loaded once per page load.
pub struct Directory {
    entries: HashMap<String, UserProfile>,
}

impl Directory {
    pub fn new(entries: HashMap<String, UserProfile>) -> Self {
        Self { entries }
    }

    /// Parses the `utilisateur.json` document shape.
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Built-in directory used when the published one cannot be loaded.
    pub fn fallback() -> Self {
        Self::from_iter([
            (
                "ADMIN001",
                UserProfile::new("Administrateur Principal", Role::Admin, 1),
            ),
            ("GUEST001", UserProfile::new("Jean Dupont", Role::Guest, 5)),
            ("GUEST002", UserProfile::new("Marie Martin", Role::Guest, 3)),
        ])
    }

    /// Exact-match lookup on the full token string.
    pub fn get(&self, token: &str) -> Option<&UserProfile> {
        self.entries.get(token)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn admin_count(&self) -> usize {
        self.entries
            .values()
            .filter(|profile| profile.role.is_admin())
            .count()
    }
}

impl<K: Into<String>> FromIterator<(K, UserProfile)> for Directory {
    fn from_iter<I: IntoIterator<Item = (K, UserProfile)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(token, profile)| (token.into(), profile))
                .collect(),
        }
    }
}
