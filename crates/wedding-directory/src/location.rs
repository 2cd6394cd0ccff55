use std::path::PathBuf;

use reqwest::Url;

use crate::error::DirectoryLocationError;
use crate::source::{DirectorySource, FileDirectorySource, HttpDirectorySource};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Where the directory document lives once resolved against the page URL.
pub enum DirectoryLocation {
    Http(Url),
    File(PathBuf),
}

impl DirectoryLocation {
    /// Resolves `resource` the way a page-relative fetch would.
    pub fn resolve_relative(page_url: &Url, resource: &str) -> Result<Self, DirectoryLocationError> {
        let resolved = page_url
            .join(resource)
            .map_err(|error| DirectoryLocationError::Join {
                page_url: page_url.to_string(),
                resource: resource.to_string(),
                reason: error.to_string(),
            })?;
        match resolved.scheme() {
            "http" | "https" => Ok(Self::Http(resolved)),
            "file" => resolved
                .to_file_path()
                .map(Self::File)
                .map_err(|()| DirectoryLocationError::NotALocalPath {
                    url: resolved.to_string(),
                }),
            scheme => Err(DirectoryLocationError::UnsupportedScheme {
                page_url: page_url.to_string(),
                scheme: scheme.to_string(),
            }),
        }
    }

    pub fn into_source(self, client: reqwest::Client) -> Box<dyn DirectorySource> {
        match self {
            Self::Http(url) => Box::new(HttpDirectorySource::with_client(client, url)),
            Self::File(path) => Box::new(FileDirectorySource::new(path)),
        }
    }
}
