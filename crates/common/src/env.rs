//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use tracing::warn;

/// Warn when the static frontend directory is missing; create the data
/// directory used by file-backed databases.
pub async fn ensure_env(frontend_dir: &str, data_dir: Option<&str>) -> anyhow::Result<()> {
    if tokio::fs::metadata(frontend_dir).await.is_err() {
        warn!(%frontend_dir, "frontend assets directory not found; static assets may 404");
    }
    if let Some(data_dir) = data_dir {
        tokio::fs::create_dir_all(data_dir)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {data_dir}: {e}"))?;
    }
    Ok(())
}

/// Directory a `sqlite://` URL writes into, if it points at a file.
pub fn sqlite_data_dir(url: &str) -> Option<String> {
    let rest = url.strip_prefix("sqlite://").or_else(|| url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path.contains(":memory:") {
        return None;
    }
    let parent = std::path::Path::new(path).parent()?;
    let dir = parent.to_string_lossy().to_string();
    if dir.is_empty() { None } else { Some(dir) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_dir_from_file_url() {
        assert_eq!(sqlite_data_dir("sqlite://data/site.db?mode=rwc").as_deref(), Some("data"));
        assert_eq!(sqlite_data_dir("sqlite::memory:"), None);
        assert_eq!(sqlite_data_dir("sqlite://site.db"), None);
        assert_eq!(sqlite_data_dir("postgres://localhost/db"), None);
    }

    #[tokio::test]
    async fn ensure_env_creates_data_dir() -> anyhow::Result<()> {
        let dir = std::env::temp_dir().join(format!("ensure_env_{}", std::process::id()));
        let dir_str = dir.to_string_lossy().to_string();
        ensure_env("/nonexistent-frontend", Some(&dir_str)).await?;
        assert!(tokio::fs::metadata(&dir).await?.is_dir());
        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }
}
