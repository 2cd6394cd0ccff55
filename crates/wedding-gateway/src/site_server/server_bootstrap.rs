//! Site server bootstrap and router wiring.

use super::*;

/// Binds the configured address and serves until Ctrl-C.
pub async fn run_site_server(config: SiteServerConfig) -> Result<()> {
    prepare_site_storage(&config)?;

    let listener = TcpListener::bind(config.bind.as_str())
        .await
        .with_context(|| format!("failed to bind site server on {}", config.bind))?;
    let local_addr = listener
        .local_addr()
        .context("failed to resolve bound site server address")?;

    tracing::info!(
        addr = %local_addr,
        site_root = %config.site_root.display(),
        media_dir = %config.media_dir.display(),
        info_file = %config.info_file.display(),
        "wedding site server listening"
    );
    for (label, path) in [
        ("home page", "/index.html?token=ADMIN001"),
        ("media list api", MEDIA_LIST_ENDPOINT),
        ("media upload api", MEDIA_UPLOAD_ENDPOINT),
        ("alerts api", INFO_LIST_ENDPOINT),
        ("alert add api", INFO_ADD_ENDPOINT),
    ] {
        tracing::info!("{label}: http://{local_addr}{path}");
    }

    let state = Arc::new(SiteServerState::new(config));
    let app = build_site_router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("site server shutting down");
        })
        .await
        .context("site server exited unexpectedly")?;
    Ok(())
}

/// Creates the media directory and an empty announcement file when missing.
pub(super) fn prepare_site_storage(config: &SiteServerConfig) -> Result<()> {
    if !config.media_dir.exists() {
        std::fs::create_dir_all(&config.media_dir)
            .with_context(|| format!("failed to create {}", config.media_dir.display()))?;
        tracing::info!(media_dir = %config.media_dir.display(), "media directory created");
    }
    InfoStore::new(config.info_file.clone()).ensure_exists()?;
    Ok(())
}

pub fn build_site_router(state: Arc<SiteServerState>) -> Router {
    let max_upload_bytes = state.config.max_upload_bytes;
    let media_files = ServeDir::new(state.config.media_dir.clone());
    let site_files = ServeDir::new(state.config.site_root.clone());

    Router::new()
        .route(MEDIA_LIST_ENDPOINT, get(handle_media_list))
        .route(
            MEDIA_UPLOAD_ENDPOINT,
            post(handle_media_upload).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route(MEDIA_DELETE_ENDPOINT, delete(handle_media_delete))
        .route(INFO_LIST_ENDPOINT, get(handle_info_list))
        .route(INFO_ADD_ENDPOINT, post(handle_info_add))
        .route(INFO_DELETE_ENDPOINT, delete(handle_info_delete))
        .nest_service(&format!("/{MEDIA_URL_PREFIX}"), media_files)
        .fallback_service(site_files)
        .with_state(state)
        .layer(middleware::from_fn(answer_preflight))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(NO_STORE_CACHE_CONTROL),
        ))
}
