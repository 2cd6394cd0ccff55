use serde::Serialize;
use wedding_access::UserProfile;

use crate::{SessionScope, SessionStoreError};

pub const CURRENT_USER_KEY: &str = "currentUser";
pub const AUTH_TOKEN_KEY: &str = "authToken";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
/// The two entries written once the visitor is authenticated.
pub struct SessionRecord {
    pub current_user: UserProfile,
    pub auth_token: String,
}

/// Writes `currentUser` (JSON) and `authToken` (raw) into `scope`.
pub fn persist_session<S: SessionScope + ?Sized>(
    scope: &mut S,
    token: &str,
    profile: &UserProfile,
) -> Result<(), SessionStoreError> {
    let encoded = serde_json::to_string(profile).map_err(|source| SessionStoreError::Encode {
        key: CURRENT_USER_KEY.to_string(),
        source,
    })?;
    scope.set(CURRENT_USER_KEY, encoded)?;
    scope.set(AUTH_TOKEN_KEY, token.to_string())?;
    tracing::debug!(role = profile.role.as_str(), "session saved");
    Ok(())
}

/// Reads the session back; `None` when no visitor has been authenticated.
pub fn read_session<S: SessionScope + ?Sized>(
    scope: &S,
) -> Result<Option<SessionRecord>, SessionStoreError> {
    let (Some(raw_user), Some(auth_token)) = (scope.get(CURRENT_USER_KEY), scope.get(AUTH_TOKEN_KEY))
    else {
        return Ok(None);
    };
    let current_user =
        serde_json::from_str::<UserProfile>(raw_user.as_str()).map_err(|source| {
            SessionStoreError::Decode {
                key: CURRENT_USER_KEY.to_string(),
                source,
            }
        })?;
    Ok(Some(SessionRecord {
        current_user,
        auth_token,
    }))
}
