use anyhow::Result;
use wedding_gateway::{run_site_server, SiteServerConfig};

use crate::cli_args::ServeArgs;

/// Resolves relative storage paths against the site root.
pub fn site_server_config(args: &ServeArgs) -> SiteServerConfig {
    SiteServerConfig {
        bind: args.bind.clone(),
        media_dir: args.site_root.join(&args.media_dir),
        info_file: args.site_root.join(&args.info_file),
        site_root: args.site_root.clone(),
        max_upload_bytes: args.max_upload_bytes,
    }
}

pub async fn run_serve(args: ServeArgs) -> Result<()> {
    run_site_server(site_server_config(&args)).await
}
