use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::time_utils::current_unix_timestamp_ms;

fn staging_path_for(target: &Path, parent_dir: &Path) -> PathBuf {
    let base = target
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "store".to_string());
    parent_dir.join(format!(
        ".{base}.tmp-{}-{}",
        std::process::id(),
        current_unix_timestamp_ms()
    ))
}

/// Replaces `path` with `content` via a sibling staging file and a rename.
///
/// Readers see either the previous file or the new one, never a partial write.
pub fn write_text_atomic(path: &Path, content: &str) -> Result<()> {
    if path.as_os_str().is_empty() {
        bail!("destination path cannot be empty");
    }
    if path.is_dir() {
        bail!("destination path '{}' is a directory", path.display());
    }

    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent_dir)
        .with_context(|| format!("failed to create {}", parent_dir.display()))?;

    let staging = staging_path_for(path, parent_dir);
    std::fs::write(&staging, content)
        .with_context(|| format!("failed to stage {}", staging.display()))?;
    if let Err(error) = std::fs::rename(&staging, path) {
        let _ = std::fs::remove_file(&staging);
        return Err(error).with_context(|| {
            format!("failed to move staged file into place at {}", path.display())
        });
    }
    Ok(())
}
