use std::io::Write;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use reqwest::Url;
use serde::Serialize;
use wedding_core::write_text_atomic;
use wedding_directory::{
    DirectoryLocation, DirectorySource, FallbackDirectorySource, DIRECTORY_RESOURCE_PATH,
};
use wedding_page_ui::{render_page_document, PageDocument};
use wedding_session::{read_session, InMemorySessionScope, SessionRecord};
use wedding_startup::{initialize_session, InitOutcome};

use crate::cli_args::OpenArgs;

#[derive(Debug, Clone, Serialize)]
/// Machine-readable summary of one gate run.
pub struct OpenReport {
    pub page_url: String,
    pub directory_source: String,
    pub outcome: InitOutcome,
    pub session: Option<SessionRecord>,
    pub tile_count: usize,
}

#[derive(Debug, Clone)]
pub struct OpenRun {
    pub report: OpenReport,
    pub html: String,
}

/// Accepts an absolute URL or a local file path.
pub(crate) fn parse_page_url(raw: &str) -> Result<Url> {
    if let Ok(url) = Url::parse(raw) {
        return Ok(url);
    }
    let (path_part, query) = match raw.split_once('?') {
        Some((path_part, query)) => (path_part, Some(query)),
        None => (raw, None),
    };
    let absolute = std::path::absolute(Path::new(path_part))
        .with_context(|| format!("failed to resolve page path '{path_part}'"))?;
    let Ok(mut url) = Url::from_file_path(&absolute) else {
        bail!("page '{raw}' is neither a URL nor a local path");
    };
    url.set_query(query);
    Ok(url)
}

fn directory_location(args: &OpenArgs, page_url: &Url) -> Result<DirectoryLocation> {
    if let Some(raw) = args.directory_url.as_deref() {
        let url = Url::parse(raw).with_context(|| format!("invalid --directory-url '{raw}'"))?;
        return Ok(DirectoryLocation::Http(url));
    }
    if let Some(path) = args.directory_file.as_ref() {
        return Ok(DirectoryLocation::File(path.clone()));
    }
    DirectoryLocation::resolve_relative(page_url, DIRECTORY_RESOURCE_PATH)
        .context("failed to locate the user directory next to the page")
}

fn directory_source(args: &OpenArgs, page_url: &Url) -> Result<Box<dyn DirectorySource>> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(args.request_timeout_ms))
        .build()
        .context("failed to build HTTP client")?;
    let source = directory_location(args, page_url)?.into_source(client);
    if args.no_directory_fallback {
        return Ok(source);
    }
    Ok(Box::new(FallbackDirectorySource::new(source)))
}

/// Runs the gate once against a fresh session and a fresh page.
pub async fn execute_open(args: &OpenArgs) -> Result<OpenRun> {
    let page_url = parse_page_url(args.page_url.as_str())?;
    let source = directory_source(args, &page_url)?;
    let mut session = InMemorySessionScope::new();
    let mut document = PageDocument::default();

    let outcome = initialize_session(source.as_ref(), &page_url, &mut session, &mut document).await;
    let session_record = read_session(&session).context("failed to read back the session")?;
    let report = OpenReport {
        page_url: page_url.to_string(),
        directory_source: source.describe(),
        outcome,
        session: session_record,
        tile_count: document.tiles().len(),
    };
    Ok(OpenRun {
        report,
        html: render_page_document(&document),
    })
}

pub async fn run_open(args: OpenArgs) -> Result<()> {
    let run = execute_open(&args).await?;
    let rendered = if args.json {
        let mut encoded =
            serde_json::to_string_pretty(&run.report).context("failed to encode report")?;
        encoded.push('\n');
        encoded
    } else {
        run.html.clone()
    };

    match args.output.as_ref() {
        Some(path) => {
            write_text_atomic(path, rendered.as_str())?;
            tracing::info!(output = %path.display(), "page written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .context("failed to write to stdout")?;
            stdout.flush().context("failed to flush stdout")?;
        }
    }

    if let InitOutcome::Error { stage, message } = &run.report.outcome {
        bail!("access gate stopped during {}: {message}", stage.as_str());
    }
    Ok(())
}
