//! Environment/runtime helpers
//!
//! Sanity checks run once at startup before the listener is bound.

use std::path::Path;

use tracing::warn;

/// Verify an optional seed file is readable; warn and report `false` when it is not.
pub async fn ensure_seed_file(seed_path: Option<&str>) -> anyhow::Result<bool> {
    let Some(path) = seed_path else { return Ok(false) };
    if path.trim().is_empty() {
        return Ok(false);
    }
    match tokio::fs::metadata(Path::new(path)).await {
        Ok(meta) if meta.is_file() => Ok(true),
        Ok(_) => Err(anyhow::anyhow!("catalog seed path {path} is not a file")),
        Err(e) => {
            warn!(%path, error = %e, "catalog seed file not found; falling back to built-in catalog");
            Ok(false)
        }
    }
}
