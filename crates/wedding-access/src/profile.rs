use serde::{Deserialize, Deserializer, Serialize};

const ROLE_ADMIN: &str = "admin";
const ROLE_GUEST: &str = "guest";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
/// Access role attached to a directory entry.
pub enum Role {
    #[default]
    Guest,
    Admin,
}

impl Role {
    /// Maps a raw directory role string onto the closed role set.
    ///
    /// Only the exact string `admin` grants the admin role; every other value,
    /// including differently cased spellings, falls back to `Guest`.
    pub fn from_role_str(raw: &str) -> Self {
        if raw == ROLE_ADMIN {
            Self::Admin
        } else {
            Self::Guest
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Guest => ROLE_GUEST,
            Self::Admin => ROLE_ADMIN,
        }
    }

    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_role_str(raw.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Directory entry for one invited person.
pub struct UserProfile {
    pub name: String,
    pub role: Role,
    pub table: u32,
}

impl UserProfile {
    pub fn new(name: impl Into<String>, role: Role, table: u32) -> Self {
        Self {
            name: name.into(),
            role,
            table,
        }
    }
}
