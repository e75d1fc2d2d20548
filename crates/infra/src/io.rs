//! Filesystem helpers shared by the file-backed stores.

use std::future::Future;
use std::io;
use std::path::Path;
use std::time::Duration;

use tokio::io::AsyncWriteExt;

use crate::error::StoreError;

/// Run one filesystem operation under a deadline.
///
/// Expiry is reported as `io::ErrorKind::TimedOut` so callers map it like any
/// other I/O failure.
pub(crate) async fn bounded<T>(
    timeout: Duration,
    op: impl Future<Output = io::Result<T>>,
) -> io::Result<T> {
    match tokio::time::timeout(timeout, op).await {
        Ok(result) => result,
        Err(_) => Err(io::Error::new(
            io::ErrorKind::TimedOut,
            format!("timed out after {timeout:?}"),
        )),
    }
}

/// Write `bytes` to a file that must not exist yet, and fsync it.
pub(crate) async fn write_new_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await?;
    file.write_all(bytes).await?;
    file.sync_all().await
}

/// Best-effort cleanup of a temp file; failures are only logged.
pub(crate) async fn discard(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        if e.kind() != io::ErrorKind::NotFound {
            tracing::warn!(path = %path.display(), "failed to remove temp file: {e}");
        }
    }
}

pub(crate) fn storage_error(what: &str, path: &Path, err: io::Error) -> StoreError {
    StoreError::Storage(format!("{what} {}: {err}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn operation_past_its_deadline_times_out_as_storage_error() {
        let err = bounded(Duration::from_millis(10), std::future::pending::<io::Result<()>>())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::TimedOut);

        let mapped = storage_error("read", Path::new("stock_data.json"), err);
        match mapped {
            StoreError::Storage(msg) => {
                assert!(msg.starts_with("read stock_data.json"));
                assert!(msg.contains("timed out"));
            }
            other => panic!("Expected Storage, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn operation_within_deadline_passes_result_through() {
        let value = bounded(Duration::from_secs(1), async { Ok::<_, io::Error>(7) })
            .await
            .unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn write_new_synced_refuses_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taken");
        std::fs::write(&path, b"first").unwrap();

        let err = write_new_synced(&path, b"second").await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(std::fs::read(&path).unwrap(), b"first");
    }
}
