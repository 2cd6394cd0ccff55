//! Page-load orchestration for the wedding access gate.
//!
//! Runs the five startup stages in order (load directory, extract token,
//! authenticate, persist session, render) and stops at the first failure with
//! a single visitor-facing message.

mod init_error;
mod session_initializer;

pub use init_error::*;
pub use session_initializer::*;
