use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::Url;
use wedding_access::Directory;

use crate::error::DirectoryLoadError;

const NO_CACHE_DIRECTIVE: &str = "no-cache, no-store";

#[async_trait]
/// Trait contract for anything that can produce the token directory.
pub trait DirectorySource: Send + Sync {
    /// Human-readable location used in logs.
    fn describe(&self) -> String;

    async fn load(&self) -> Result<Directory, DirectoryLoadError>;
}

#[async_trait]
impl<S: DirectorySource + ?Sized> DirectorySource for Box<S> {
    fn describe(&self) -> String {
        (**self).describe()
    }

    async fn load(&self) -> Result<Directory, DirectoryLoadError> {
        (**self).load().await
    }
}

#[derive(Debug, Clone)]
/// Fetches the directory over HTTP, always asking for a fresh copy.
pub struct HttpDirectorySource {
    client: reqwest::Client,
    url: Url,
}

impl HttpDirectorySource {
    pub fn new(url: Url) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    pub fn with_client(client: reqwest::Client, url: Url) -> Self {
        Self { client, url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl DirectorySource for HttpDirectorySource {
    fn describe(&self) -> String {
        self.url.to_string()
    }

    async fn load(&self) -> Result<Directory, DirectoryLoadError> {
        let location = self.describe();
        tracing::debug!(location = %location, "fetching user directory");
        let response = self
            .client
            .get(self.url.clone())
            .header(CACHE_CONTROL, NO_CACHE_DIRECTIVE)
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(|source| DirectoryLoadError::Network {
                location: location.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryLoadError::HttpStatus {
                location,
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| DirectoryLoadError::Network {
                location: location.clone(),
                source,
            })?;
        let directory = Directory::from_json_str(body.as_str())
            .map_err(|source| DirectoryLoadError::Parse { location, source })?;
        tracing::info!(entries = directory.len(), "user directory loaded");
        Ok(directory)
    }
}

#[derive(Debug, Clone)]
/// Reads the directory from a local file.
pub struct FileDirectorySource {
    path: PathBuf,
}

impl FileDirectorySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DirectorySource for FileDirectorySource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> Result<Directory, DirectoryLoadError> {
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| DirectoryLoadError::Io {
                path: self.path.clone(),
                source,
            })?;
        let directory =
            Directory::from_json_str(body.as_str()).map_err(|source| DirectoryLoadError::Parse {
                location: self.describe(),
                source,
            })?;
        tracing::info!(entries = directory.len(), "user directory loaded");
        Ok(directory)
    }
}

#[derive(Debug, Clone, Default)]
/// Serves an already materialized directory.
pub struct StaticDirectorySource {
    directory: Directory,
}

impl StaticDirectorySource {
    pub fn new(directory: Directory) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl DirectorySource for StaticDirectorySource {
    fn describe(&self) -> String {
        format!("static directory ({} entries)", self.directory.len())
    }

    async fn load(&self) -> Result<Directory, DirectoryLoadError> {
        Ok(self.directory.clone())
    }
}

/// Wraps a source so that any load failure yields a substitute directory.
pub struct FallbackDirectorySource<S> {
    inner: S,
    fallback: Directory,
}

impl<S: DirectorySource> FallbackDirectorySource<S> {
    /// Falls back to [`Directory::fallback`].
    pub fn new(inner: S) -> Self {
        Self::with_fallback(inner, Directory::fallback())
    }

    pub fn with_fallback(inner: S, fallback: Directory) -> Self {
        Self { inner, fallback }
    }
}

#[async_trait]
impl<S: DirectorySource> DirectorySource for FallbackDirectorySource<S> {
    fn describe(&self) -> String {
        format!("{} (with built-in fallback)", self.inner.describe())
    }

    async fn load(&self) -> Result<Directory, DirectoryLoadError> {
        match self.inner.load().await {
            Ok(directory) => Ok(directory),
            Err(error) => {
                tracing::warn!(
                    location = %self.inner.describe(),
                    error = %error,
                    fallback_entries = self.fallback.len(),
                    "user directory unavailable; using built-in fallback directory"
                );
                Ok(self.fallback.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use httpmock::{Method::GET, MockServer};
    use reqwest::Url;
    use tempfile::tempdir;
    use wedding_access::{Directory, Role, UserProfile};

    use super::{DirectorySource, FallbackDirectorySource, FileDirectorySource, HttpDirectorySource};
    use crate::error::{DirectoryLoadError, DirectoryLoadErrorKind};

    const DIRECTORY_BODY: &str =
        r#"{"ADMIN001": {"name": "A. Principal", "role": "admin", "table": 1}}"#;

    fn directory_url(server: &MockServer) -> Url {
        Url::parse(server.url("/utilisateur.json").as_str()).expect("mock url")
    }

    #[tokio::test]
    async fn functional_http_source_fetches_directory_with_cache_bypass_headers() {
        let server = MockServer::start_async().await;
        let fetch = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/utilisateur.json")
                    .header("cache-control", "no-cache, no-store")
                    .header("pragma", "no-cache");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(DIRECTORY_BODY);
            })
            .await;

        let source = HttpDirectorySource::new(directory_url(&server));
        let directory = source.load().await.expect("load directory");

        fetch.assert_async().await;
        assert_eq!(
            directory.get("ADMIN001"),
            Some(&UserProfile::new("A. Principal", Role::Admin, 1))
        );
    }

    #[tokio::test]
    async fn functional_http_source_reports_non_success_status_as_network_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/utilisateur.json");
                then.status(404).body("not found");
            })
            .await;

        let error = HttpDirectorySource::new(directory_url(&server))
            .load()
            .await
            .expect_err("404 should fail");
        assert!(matches!(error, DirectoryLoadError::HttpStatus { status: 404, .. }));
        assert_eq!(error.kind(), DirectoryLoadErrorKind::Network);
    }

    #[tokio::test]
    async fn functional_http_source_reports_malformed_body_as_parse_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/utilisateur.json");
                then.status(200).body("<html>maintenance</html>");
            })
            .await;

        let error = HttpDirectorySource::new(directory_url(&server))
            .load()
            .await
            .expect_err("html should fail");
        assert_eq!(error.kind(), DirectoryLoadErrorKind::Parse);
    }

    #[tokio::test]
    async fn functional_file_source_reads_local_directory() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("utilisateur.json");
        std::fs::write(&path, DIRECTORY_BODY).expect("write directory");

        let directory = FileDirectorySource::new(&path)
            .load()
            .await
            .expect("load directory");
        assert_eq!(directory.len(), 1);
    }

    #[tokio::test]
    async fn regression_file_source_missing_file_is_network_kind() {
        let temp = tempdir().expect("tempdir");
        let error = FileDirectorySource::new(temp.path().join("missing.json"))
            .load()
            .await
            .expect_err("missing file should fail");
        assert!(matches!(error, DirectoryLoadError::Io { .. }));
        assert_eq!(error.kind(), DirectoryLoadErrorKind::Network);
    }

    #[tokio::test]
    async fn functional_fallback_source_substitutes_builtin_directory_on_failure() {
        let temp = tempdir().expect("tempdir");
        let source =
            FallbackDirectorySource::new(FileDirectorySource::new(temp.path().join("missing.json")));
        let directory = source.load().await.expect("fallback never fails");
        assert_eq!(directory, Directory::fallback());
    }

    #[tokio::test]
    async fn functional_fallback_source_passes_through_successful_loads() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("utilisateur.json");
        std::fs::write(&path, DIRECTORY_BODY).expect("write directory");

        let source = FallbackDirectorySource::new(FileDirectorySource::new(&path));
        let directory = source.load().await.expect("load directory");
        assert_eq!(directory.len(), 1);
        assert!(directory.get("GUEST001").is_none());
    }
}
