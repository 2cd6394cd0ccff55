//! Browsing-session scoped storage for the authenticated visitor.
//!
//! Entries live only as long as the session: [`InMemorySessionScope`] drops
//! everything when the session ends, and nothing is written to disk.

mod scope;
mod session_record;

pub use scope::*;
pub use session_record::*;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("session has ended; entry '{key}' cannot be written")]
    SessionEnded { key: String },
    #[error("failed to encode session entry '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to decode session entry '{key}': {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
