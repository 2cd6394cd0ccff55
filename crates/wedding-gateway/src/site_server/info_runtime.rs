//! Announcement ("info") alert storage backed by a JSON file.

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use wedding_core::{next_unix_ms_after, write_text_atomic};

use super::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoAlert {
    pub id: u64,
    pub message: String,
    pub timestamp: u64,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct InfoDocument {
    #[serde(default)]
    alerts: Vec<InfoAlert>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum InfoDeleteOutcome {
    Deleted,
    StoreMissing,
    NotFound,
}

/// Serializes read-modify-write cycles on the alert file within this process.
pub(super) struct InfoStore {
    path: PathBuf,
    last_issued_id: Mutex<Option<u64>>,
}

impl InfoStore {
    pub(super) fn new(path: PathBuf) -> Self {
        Self {
            path,
            last_issued_id: Mutex::new(None),
        }
    }

    /// Startup-time creation of an empty announcement file.
    pub(super) fn ensure_exists(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        write_text_atomic(&self.path, encode_document(&InfoDocument::default())?.as_str())?;
        tracing::info!(info_file = %self.path.display(), "announcement file created");
        Ok(())
    }

    async fn ensure_document(&self) -> Result<()> {
        let exists = tokio::fs::try_exists(&self.path)
            .await
            .with_context(|| format!("failed to stat {}", self.path.display()))?;
        if !exists {
            self.write_document(&InfoDocument::default()).await?;
            tracing::info!(info_file = %self.path.display(), "announcement file created");
        }
        Ok(())
    }

    pub(super) async fn list(&self) -> Result<Vec<InfoAlert>> {
        let _guard = self.last_issued_id.lock().await;
        self.ensure_document().await?;
        Ok(self.read_document().await?.alerts)
    }

    /// Prepends a new alert and keeps only the newest [`MAX_INFO_ALERTS`].
    pub(super) async fn add(&self, message: &str) -> Result<InfoAlert> {
        let mut last_issued_id = self.last_issued_id.lock().await;
        self.ensure_document().await?;
        let mut document = self.read_document().await?;

        let newest_stored = document.alerts.iter().map(|alert| alert.id).max();
        let id = next_unix_ms_after((*last_issued_id).max(newest_stored));
        let alert = InfoAlert {
            id,
            message: message.to_string(),
            timestamp: id,
        };
        document.alerts.insert(0, alert.clone());
        document.alerts.truncate(MAX_INFO_ALERTS);
        self.write_document(&document).await?;
        *last_issued_id = Some(id);

        tracing::info!(alert_id = id, total = document.alerts.len(), "alert added");
        Ok(alert)
    }

    pub(super) async fn delete(&self, alert_id: u64) -> Result<InfoDeleteOutcome> {
        let _guard = self.last_issued_id.lock().await;
        let exists = tokio::fs::try_exists(&self.path)
            .await
            .with_context(|| format!("failed to stat {}", self.path.display()))?;
        if !exists {
            return Ok(InfoDeleteOutcome::StoreMissing);
        }
        let mut document = self.read_document().await?;
        let before = document.alerts.len();
        document.alerts.retain(|alert| alert.id != alert_id);
        if document.alerts.len() == before {
            return Ok(InfoDeleteOutcome::NotFound);
        }
        self.write_document(&document).await?;
        tracing::info!(alert_id, "alert deleted");
        Ok(InfoDeleteOutcome::Deleted)
    }

    async fn read_document(&self) -> Result<InfoDocument> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        serde_json::from_str(raw.as_str())
            .with_context(|| format!("failed to parse {}", self.path.display()))
    }

    async fn write_document(&self, document: &InfoDocument) -> Result<()> {
        let encoded = encode_document(document)?;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_text_atomic(&path, encoded.as_str()))
            .await
            .context("announcement write task failed")?
    }
}

fn encode_document(document: &InfoDocument) -> Result<String> {
    let mut encoded = serde_json::to_string_pretty(document).context("failed to encode alerts")?;
    encoded.push('\n');
    Ok(encoded)
}
