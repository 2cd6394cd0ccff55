//! Guest identity model and token authentication for the wedding gate.
//!
//! A token printed in the invitation QR code is looked up verbatim in the
//! user directory; the matching profile decides which navigation tiles the
//! visitor sees.

pub mod authenticator;
pub mod directory;
pub mod profile;

pub use authenticator::*;
pub use directory::*;
pub use profile::*;
