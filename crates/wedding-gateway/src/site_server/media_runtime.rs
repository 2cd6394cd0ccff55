//! Media gallery listing, upload, and deletion.

use std::time::UNIX_EPOCH;

use serde::Serialize;
use tokio::io::AsyncWriteExt;

use super::*;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov", "avi", "mkv"];
const UPLOAD_FILE_FIELD: &str = "file";
const UPLOAD_CAPTION_FIELD: &str = "caption";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Classifies a file name by extension, case-insensitively.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|extension| extension.to_str())?
            .to_ascii_lowercase();
        if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
            Some(Self::Image)
        } else if VIDEO_EXTENSIONS.contains(&extension.as_str()) {
            Some(Self::Video)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaEntry {
    pub filename: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub timestamp: u64,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct StoredUpload {
    pub(super) filename: String,
    pub(super) caption: String,
}

/// Lists gallery files, newest first. Creates the directory when missing.
pub(super) async fn list_media_entries(media_dir: &Path) -> Result<Vec<MediaEntry>> {
    tokio::fs::create_dir_all(media_dir)
        .await
        .with_context(|| format!("failed to create {}", media_dir.display()))?;

    let mut entries = Vec::new();
    let mut listing = tokio::fs::read_dir(media_dir)
        .await
        .with_context(|| format!("failed to list {}", media_dir.display()))?;
    while let Some(dir_entry) = listing
        .next_entry()
        .await
        .with_context(|| format!("failed to list {}", media_dir.display()))?
    {
        let filename = dir_entry.file_name().to_string_lossy().into_owned();
        if filename.starts_with('.') {
            continue;
        }
        let metadata = dir_entry
            .metadata()
            .await
            .with_context(|| format!("failed to stat {}", dir_entry.path().display()))?;
        if !metadata.is_file() {
            continue;
        }
        let Some(kind) = MediaKind::from_file_name(filename.as_str()) else {
            continue;
        };
        let timestamp = metadata
            .modified()
            .ok()
            .and_then(|modified| modified.duration_since(UNIX_EPOCH).ok())
            .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or_default();
        entries.push(MediaEntry {
            url: format!("{MEDIA_URL_PREFIX}/{filename}"),
            filename,
            kind,
            timestamp,
        });
    }
    entries.sort_by(|left, right| {
        right
            .timestamp
            .cmp(&left.timestamp)
            .then_with(|| left.filename.cmp(&right.filename))
    });
    Ok(entries)
}

/// Reduces a client-supplied name to its final path component.
pub(super) fn sanitize_media_file_name(raw: &str) -> Option<String> {
    let normalized = raw.replace('\\', "/");
    let base = normalized.rsplit('/').next()?.trim();
    if base.is_empty() || base == "." || base == ".." {
        return None;
    }
    Some(base.to_string())
}

/// Name tried on the `attempt`-th claim: `file_name` first, then
/// `<stem>_<n><ext>`.
pub(super) fn media_file_name_candidate(file_name: &str, attempt: u32) -> String {
    if attempt == 0 {
        return file_name.to_string();
    }
    let path = Path::new(file_name);
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(file_name);
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| format!(".{extension}"))
        .unwrap_or_default();
    format!("{stem}_{attempt}{extension}")
}

/// Creates the first free candidate name with `create_new`, so concurrent
/// uploads of the same name never share a file.
pub(super) async fn claim_media_file(
    media_dir: &Path,
    file_name: &str,
) -> std::io::Result<(String, tokio::fs::File)> {
    let mut attempt = 0_u32;
    loop {
        let candidate = media_file_name_candidate(file_name, attempt);
        match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(media_dir.join(&candidate))
            .await
        {
            Ok(file) => return Ok((candidate, file)),
            Err(error) if error.kind() == std::io::ErrorKind::AlreadyExists => {
                attempt = attempt.saturating_add(1);
            }
            Err(error) => return Err(error),
        }
    }
}

pub(super) async fn store_uploaded_media(
    media_dir: &Path,
    mut multipart: Multipart,
) -> Result<StoredUpload, ApiError> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    let mut caption = String::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|error| ApiError::bad_request("invalid_multipart", error.body_text()))?
    {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            UPLOAD_FILE_FIELD => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|error| ApiError::bad_request("invalid_multipart", error.body_text()))?;
                upload = Some((file_name, bytes.to_vec()));
            }
            UPLOAD_CAPTION_FIELD => {
                caption = field
                    .text()
                    .await
                    .map_err(|error| ApiError::bad_request("invalid_multipart", error.body_text()))?;
            }
            _ => {}
        }
    }

    let Some((raw_file_name, bytes)) = upload else {
        return Err(ApiError::bad_request("missing_file", "no file uploaded"));
    };
    let Some(file_name) = sanitize_media_file_name(raw_file_name.as_str()) else {
        return Err(ApiError::bad_request("invalid_file_name", "invalid file name"));
    };
    if MediaKind::from_file_name(file_name.as_str()).is_none() {
        let extension = Path::new(file_name.as_str())
            .extension()
            .and_then(|extension| extension.to_str())
            .map(|extension| format!(".{}", extension.to_ascii_lowercase()))
            .unwrap_or_default();
        return Err(ApiError::bad_request(
            "extension_not_allowed",
            format!("extension '{extension}' not allowed"),
        ));
    }

    tokio::fs::create_dir_all(media_dir).await.map_err(|error| {
        ApiError::internal(format!("failed to create {}: {error}", media_dir.display()))
    })?;
    let (stored_name, mut file) = claim_media_file(media_dir, file_name.as_str())
        .await
        .map_err(|error| {
            ApiError::internal(format!(
                "failed to create media file in {}: {error}",
                media_dir.display()
            ))
        })?;
    let destination = media_dir.join(&stored_name);
    let written = match file.write_all(&bytes).await {
        Ok(()) => file.flush().await,
        Err(error) => Err(error),
    };
    if let Err(error) = written {
        drop(file);
        let _ = tokio::fs::remove_file(&destination).await;
        return Err(ApiError::internal(format!(
            "failed to write {}: {error}",
            destination.display()
        )));
    }
    tracing::info!(
        filename = %stored_name,
        bytes = bytes.len(),
        has_caption = !caption.is_empty(),
        "media uploaded"
    );
    Ok(StoredUpload {
        filename: stored_name,
        caption,
    })
}

pub(super) async fn delete_media_file(
    media_dir: &Path,
    raw_file_name: &str,
) -> Result<(), ApiError> {
    let Some(file_name) = sanitize_media_file_name(raw_file_name) else {
        return Err(ApiError::not_found("media_not_found", "file not found"));
    };
    let path = media_dir.join(&file_name);
    let is_file = tokio::fs::metadata(&path)
        .await
        .map(|metadata| metadata.is_file())
        .unwrap_or(false);
    if !is_file {
        return Err(ApiError::not_found(
            "media_not_found",
            format!("file '{file_name}' not found"),
        ));
    }
    tokio::fs::remove_file(&path).await.map_err(|error| {
        ApiError::internal(format!("failed to delete {}: {error}", path.display()))
    })?;
    tracing::info!(filename = %file_name, "media deleted");
    Ok(())
}
