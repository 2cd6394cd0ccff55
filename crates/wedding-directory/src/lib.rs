//! User directory loading for the wedding gate.
//!
//! The directory is a static JSON document published next to the page. It is
//! read once per page load with intermediary caches bypassed; a failed read
//! can be absorbed by [`FallbackDirectorySource`], which substitutes the
//! built-in demonstration directory.

mod error;
mod location;
mod source;

pub use error::*;
pub use location::*;
pub use source::*;

/// Resource path of the published directory, relative to the page URL.
pub const DIRECTORY_RESOURCE_PATH: &str = "utilisateur.json";
