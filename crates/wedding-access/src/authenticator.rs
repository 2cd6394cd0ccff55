use thiserror::Error;

use crate::directory::Directory;
use crate::profile::UserProfile;

/// User-facing message for tokens absent from the directory.
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid or expired QR code";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No directory entry matches the token. Tokens never expire, so this
    /// also covers the "expired" wording shown to visitors.
    #[error("Invalid or expired QR code")]
    UnknownToken,
}

/// Resolves `token` against `directory`, returning a copy of the stored profile.
pub fn authenticate(token: &str, directory: &Directory) -> Result<UserProfile, AuthError> {
    match directory.get(token) {
        Some(profile) => {
            tracing::debug!(
                token_len = token.len(),
                role = profile.role.as_str(),
                "token matched directory entry"
            );
            Ok(profile.clone())
        }
        None => {
            tracing::debug!(
                token_len = token.len(),
                directory_size = directory.len(),
                "token not found in directory"
            );
            Err(AuthError::UnknownToken)
        }
    }
}
