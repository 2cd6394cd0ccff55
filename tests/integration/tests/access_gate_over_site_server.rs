use std::{net::SocketAddr, path::Path, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use reqwest::Url;
use tempfile::tempdir;
use tokio::net::TcpListener;
use wedding_access::Role;
use wedding_directory::{
    DirectoryLocation, DirectorySource, FallbackDirectorySource, DIRECTORY_RESOURCE_PATH,
};
use wedding_gateway::{build_site_router, SiteServerConfig, SiteServerState};
use wedding_page_ui::PageDocument;
use wedding_session::{read_session, InMemorySessionScope, SessionScope};
use wedding_startup::{initialize_session, InitOutcome, InitStage};

const DIRECTORY_FIXTURE: &str = r#"{
  "ADMIN001": { "name": "Administrateur Principal", "role": "admin", "table": 1 },
  "GUEST001": { "name": "Jean Dupont", "role": "guest", "table": 5 },
  "GUEST002": { "name": "Marie Martin", "role": "guest", "table": 3 }
}"#;

async fn spawn_site(root: &Path) -> Result<(SocketAddr, tokio::task::JoinHandle<()>)> {
    std::fs::write(root.join(DIRECTORY_RESOURCE_PATH), DIRECTORY_FIXTURE)
        .context("write directory fixture")?;
    std::fs::write(root.join("index.html"), "<html></html>").context("write index")?;
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .context("bind ephemeral listener")?;
    let addr = listener.local_addr().context("resolve listener addr")?;
    let app = build_site_router(Arc::new(SiteServerState::new(
        SiteServerConfig::for_site_root(root),
    )));
    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    tokio::time::sleep(Duration::from_millis(20)).await;
    Ok((addr, handle))
}

fn page_source(page_url: &Url) -> Box<dyn DirectorySource> {
    DirectoryLocation::resolve_relative(page_url, DIRECTORY_RESOURCE_PATH)
        .expect("resolve directory")
        .into_source(reqwest::Client::new())
}

async fn open_page(
    source: &dyn DirectorySource,
    page_url: &Url,
) -> (InitOutcome, InMemorySessionScope, PageDocument) {
    let mut session = InMemorySessionScope::new();
    let mut document = PageDocument::default();
    let outcome = initialize_session(source, page_url, &mut session, &mut document).await;
    (outcome, session, document)
}

#[tokio::test]
async fn integration_admin_and_guest_tokens_unlock_role_specific_pages() {
    let temp = tempdir().expect("tempdir");
    let (addr, handle) = spawn_site(temp.path()).await.expect("spawn site");

    let admin_url =
        Url::parse(&format!("http://{addr}/index.html?token=ADMIN001")).expect("admin url");
    let (outcome, session, document) = open_page(page_source(&admin_url).as_ref(), &admin_url).await;
    let InitOutcome::Done { user, selected_tab_count } = &outcome else {
        panic!("expected admin page: {outcome:?}");
    };
    assert_eq!(user.role, Role::Admin);
    assert_eq!(*selected_tab_count, 7);
    assert_eq!(document.user_name_text(), Some("Administrateur Principal"));
    assert!(!document.is_loading_visible());
    let record = read_session(&session).expect("read session").expect("session");
    assert_eq!(record.auth_token, "ADMIN001");
    assert_eq!(record.current_user.table, 1);

    let guest_url =
        Url::parse(&format!("http://{addr}/index.html?token=GUEST001")).expect("guest url");
    let (outcome, _, document) = open_page(page_source(&guest_url).as_ref(), &guest_url).await;
    assert!(outcome.is_done());
    let pages = document
        .tiles()
        .iter()
        .map(|tile| tile.href.as_str())
        .collect::<Vec<_>>();
    assert_eq!(
        pages,
        vec![
            "ordre_jour.html",
            "menu.html",
            "ma_table.html",
            "media.html",
            "info.html",
            "commentaire.html",
        ]
    );

    handle.abort();
}

#[tokio::test]
async fn integration_unknown_and_missing_tokens_leave_session_empty() {
    let temp = tempdir().expect("tempdir");
    let (addr, handle) = spawn_site(temp.path()).await.expect("spawn site");

    let unknown_url =
        Url::parse(&format!("http://{addr}/index.html?token=NOPE")).expect("unknown url");
    let (outcome, session, document) =
        open_page(page_source(&unknown_url).as_ref(), &unknown_url).await;
    assert_eq!(outcome.error_message(), Some("Invalid or expired QR code"));
    assert!(read_session(&session).expect("read session").is_none());
    assert!(document.tiles().is_empty());
    assert_eq!(document.visible_error(), Some("Invalid or expired QR code"));

    let bare_url = Url::parse(&format!("http://{addr}/index.html")).expect("bare url");
    let (outcome, session, _) = open_page(page_source(&bare_url).as_ref(), &bare_url).await;
    assert_eq!(
        outcome.error_message(),
        Some("No QR code detected. Please scan your invitation.")
    );
    assert!(session.is_empty());

    handle.abort();
}

#[tokio::test]
async fn integration_each_page_load_refetches_the_directory() {
    let temp = tempdir().expect("tempdir");
    let (addr, handle) = spawn_site(temp.path()).await.expect("spawn site");
    let page_url =
        Url::parse(&format!("http://{addr}/index.html?token=GUEST003")).expect("page url");
    let source = page_source(&page_url);

    let (outcome, _, _) = open_page(source.as_ref(), &page_url).await;
    assert_eq!(outcome.error_message(), Some("Invalid or expired QR code"));

    std::fs::write(
        temp.path().join(DIRECTORY_RESOURCE_PATH),
        r#"{"GUEST003": {"name": "Paul Durand", "role": "guest", "table": 8}}"#,
    )
    .expect("rewrite directory");
    let (outcome, _, document) = open_page(source.as_ref(), &page_url).await;
    assert!(outcome.is_done());
    assert_eq!(document.user_name_text(), Some("Paul Durand"));

    handle.abort();
}

#[tokio::test]
async fn integration_unreachable_site_uses_fallback_or_reports_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let page_url =
        Url::parse(&format!("http://{addr}/index.html?token=GUEST001")).expect("page url");

    let (outcome, _, _) = open_page(page_source(&page_url).as_ref(), &page_url).await;
    assert_eq!(
        outcome,
        InitOutcome::Error {
            stage: InitStage::LoadDirectory,
            message: "Cannot load the user database".to_string(),
        }
    );

    let resilient = FallbackDirectorySource::new(page_source(&page_url));
    let (outcome, _, document) = open_page(&resilient, &page_url).await;
    let InitOutcome::Done { user, .. } = &outcome else {
        panic!("expected fallback login: {outcome:?}");
    };
    assert_eq!(user.name, "Jean Dupont");
    assert_eq!(document.tiles().len(), 6);
}
