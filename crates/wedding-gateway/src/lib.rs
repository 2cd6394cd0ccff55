//! Companion site server for the wedding pages.
//!
//! Serves the static site (including the `utilisateur.json` directory read by
//! the access gate) with caching disabled, plus the shared media gallery and
//! announcement APIs. It never makes authorization decisions.

pub mod site_server;

pub use site_server::{build_site_router, run_site_server, SiteServerConfig, SiteServerState};
