use serde::Serialize;
use thiserror::Error;
use wedding_access::AuthError;
use wedding_directory::DirectoryLoadError;
use wedding_session::SessionStoreError;

pub const DIRECTORY_UNAVAILABLE_MESSAGE: &str = "Cannot load the user database";
pub const MISSING_TOKEN_MESSAGE: &str = "No QR code detected. Please scan your invitation.";
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
/// Failing startup stages, in execution order. Rendering never fails, so it
/// has no entry.
pub enum InitStage {
    LoadDirectory,
    ExtractToken,
    Authenticate,
    PersistSession,
}

impl InitStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LoadDirectory => "load_directory",
            Self::ExtractToken => "extract_token",
            Self::Authenticate => "authenticate",
            Self::PersistSession => "persist_session",
        }
    }
}

#[derive(Debug, Error)]
pub enum InitError {
    #[error("user directory unavailable: {0}")]
    Directory(#[from] DirectoryLoadError),
    #[error("page url carries no token query parameter")]
    MissingToken,
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("unexpected session storage failure: {0}")]
    Unexpected(#[from] SessionStoreError),
}

impl InitError {
    pub fn stage(&self) -> InitStage {
        match self {
            Self::Directory(_) => InitStage::LoadDirectory,
            Self::MissingToken => InitStage::ExtractToken,
            Self::Auth(_) => InitStage::Authenticate,
            Self::Unexpected(_) => InitStage::PersistSession,
        }
    }

    /// The only text a visitor ever sees for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::Directory(_) => DIRECTORY_UNAVAILABLE_MESSAGE.to_string(),
            Self::MissingToken => MISSING_TOKEN_MESSAGE.to_string(),
            Self::Auth(error) => error.to_string(),
            Self::Unexpected(_) => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}
