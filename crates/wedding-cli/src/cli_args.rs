use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use wedding_gateway::site_server::{
    DEFAULT_BIND, DEFAULT_INFO_FILE, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_MEDIA_DIR,
};

const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

fn parse_positive_u64(value: &str) -> Result<u64, String> {
    let parsed = value
        .parse::<u64>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(parsed)
}

fn parse_positive_usize(value: &str) -> Result<usize, String> {
    let parsed = value
        .parse::<usize>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(parsed)
}

#[derive(Debug, Parser)]
#[command(
    name = "wedding",
    about = "QR-code access gate and site server for a wedding invitation site",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Run the access gate for a page URL and render the resulting page.
    Open(OpenArgs),
    /// Serve the site, the shared media gallery and the announcement board.
    Serve(ServeArgs),
}

#[derive(Debug, Clone, Args)]
pub struct OpenArgs {
    #[arg(
        value_name = "PAGE_URL",
        help = "Page URL as scanned from the invitation, e.g. http://host/index.html?token=GUEST001. A local file path is accepted too."
    )]
    pub page_url: String,

    #[arg(
        long = "directory-url",
        env = "WEDDING_DIRECTORY_URL",
        conflicts_with = "directory_file",
        help = "Load the user directory from this URL instead of utilisateur.json next to the page."
    )]
    pub directory_url: Option<String>,

    #[arg(
        long = "directory-file",
        env = "WEDDING_DIRECTORY_FILE",
        help = "Load the user directory from this local file instead of utilisateur.json next to the page."
    )]
    pub directory_file: Option<PathBuf>,

    #[arg(
        long = "no-directory-fallback",
        env = "WEDDING_NO_DIRECTORY_FALLBACK",
        default_value_t = false,
        help = "Report a directory load failure instead of substituting the built-in directory."
    )]
    pub no_directory_fallback: bool,

    #[arg(
        long = "request-timeout-ms",
        env = "WEDDING_REQUEST_TIMEOUT_MS",
        default_value_t = DEFAULT_REQUEST_TIMEOUT_MS,
        value_parser = parse_positive_u64,
        help = "Timeout for fetching the user directory over HTTP."
    )]
    pub request_timeout_ms: u64,

    #[arg(
        long,
        env = "WEDDING_OUTPUT",
        help = "Write the rendered page (or the JSON report with --json) to this file instead of stdout."
    )]
    pub output: Option<PathBuf>,

    #[arg(
        long,
        default_value_t = false,
        help = "Print a JSON report of the gate outcome and session instead of HTML."
    )]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    #[arg(long, env = "WEDDING_BIND", default_value = DEFAULT_BIND)]
    pub bind: String,

    #[arg(
        long = "site-root",
        env = "WEDDING_SITE_ROOT",
        default_value = ".",
        help = "Directory holding index.html, utilisateur.json and the other pages."
    )]
    pub site_root: PathBuf,

    #[arg(
        long = "media-dir",
        env = "WEDDING_MEDIA_DIR",
        default_value = DEFAULT_MEDIA_DIR,
        help = "Media gallery directory; relative paths resolve against --site-root."
    )]
    pub media_dir: PathBuf,

    #[arg(
        long = "info-file",
        env = "WEDDING_INFO_FILE",
        default_value = DEFAULT_INFO_FILE,
        help = "Announcement JSON file; relative paths resolve against --site-root."
    )]
    pub info_file: PathBuf,

    #[arg(
        long = "max-upload-bytes",
        env = "WEDDING_MAX_UPLOAD_BYTES",
        default_value_t = DEFAULT_MAX_UPLOAD_BYTES,
        value_parser = parse_positive_usize
    )]
    pub max_upload_bytes: usize,
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;

    use super::{Cli, CliCommand};

    #[test]
    fn unit_cli_parses_open_with_defaults() {
        let cli = Cli::try_parse_from(["wedding", "open", "http://localhost:8000/?token=GUEST001"])
            .expect("parse open");
        let CliCommand::Open(args) = cli.command else {
            panic!("expected open command");
        };
        assert_eq!(args.page_url, "http://localhost:8000/?token=GUEST001");
        assert_eq!(args.directory_url, None);
        assert_eq!(args.request_timeout_ms, 10_000);
        assert!(!args.json);
        assert!(!args.no_directory_fallback);
    }

    #[test]
    fn unit_cli_parses_serve_paths() {
        let cli = Cli::try_parse_from([
            "wedding",
            "serve",
            "--bind",
            "127.0.0.1:9000",
            "--site-root",
            "/srv/mariage",
            "--media-dir",
            "photos",
        ])
        .expect("parse serve");
        let CliCommand::Serve(args) = cli.command else {
            panic!("expected serve command");
        };
        assert_eq!(args.bind, "127.0.0.1:9000");
        assert_eq!(args.site_root, PathBuf::from("/srv/mariage"));
        assert_eq!(args.media_dir, PathBuf::from("photos"));
        assert_eq!(args.info_file, PathBuf::from("info.json"));
    }

    #[test]
    fn regression_cli_rejects_zero_timeout_and_conflicting_directory_overrides() {
        assert!(Cli::try_parse_from([
            "wedding",
            "open",
            "http://localhost/",
            "--request-timeout-ms",
            "0",
        ])
        .is_err());
        assert!(Cli::try_parse_from([
            "wedding",
            "open",
            "http://localhost/",
            "--directory-url",
            "http://localhost/utilisateur.json",
            "--directory-file",
            "utilisateur.json",
        ])
        .is_err());
    }
}
