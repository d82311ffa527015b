use anyhow::{anyhow, Result};

/// Runs `f` on the blocking thread pool so file and database work never
/// stalls the UI task. Falls back to running inline outside a runtime.
pub async fn run_blocking<F, T>(f: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => handle
            .spawn_blocking(f)
            .await
            .map_err(|err| anyhow!("background task failed: {err}")),
        Err(_) => Ok(f()),
    }
}
