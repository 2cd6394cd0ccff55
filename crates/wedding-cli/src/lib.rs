//! Command-line entry points for the wedding invitation site.
//!
//! `open` runs the access gate for one page URL and renders the resulting
//! page; `serve` runs the companion site server.

pub mod bootstrap;
pub mod cli_args;
pub mod open_command;
pub mod serve_command;

pub use bootstrap::init_tracing;
pub use cli_args::{Cli, CliCommand, OpenArgs, ServeArgs};
pub use open_command::{execute_open, run_open, OpenReport, OpenRun};
pub use serve_command::{run_serve, site_server_config};

use anyhow::Result;

pub async fn run_cli(cli: Cli) -> Result<()> {
    match cli.command {
        CliCommand::Open(args) => run_open(args).await,
        CliCommand::Serve(args) => run_serve(args).await,
    }
}
