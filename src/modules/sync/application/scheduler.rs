use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::modules::sync::application::engine::SyncEngine;
use crate::shared::errors::{AppError, AppResult};

/// Drives the sync engine: one cycle immediately on start, then one per
/// interval. The next tick is armed only after the current cycle
/// finishes, so long cycles never overlap the following one.
pub struct SyncScheduler {
    engine: Arc<SyncEngine>,
    interval: Duration,
    cancel: CancellationToken,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl SyncScheduler {
    pub fn new(engine: Arc<SyncEngine>, interval: Duration) -> Self {
        Self {
            engine,
            interval,
            cancel: CancellationToken::new(),
            handle: Mutex::new(None),
        }
    }

    /// Spawn the scheduling task. Starting twice is an error.
    pub async fn start(&self) -> AppResult<()> {
        let mut handle = self.handle.lock().await;
        if handle.is_some() {
            return Err(AppError::InvalidInput(
                "Scheduler already started".to_string(),
            ));
        }

        let engine = Arc::clone(&self.engine);
        let cancel = self.cancel.clone();
        let interval = self.interval;

        *handle = Some(tokio::spawn(async move {
            log::info!(
                "Change detection scheduled every {}s",
                interval.as_secs()
            );
            loop {
                if let Err(err) = engine.detect_changes().await {
                    log::error!("Sync cycle failed: {}", err);
                }
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = tokio::time::sleep(interval) => {}
                }
            }
            log::info!("Change detection stopped");
        }));

        Ok(())
    }

    /// Stop future cycles. An in-flight cycle finishes on its own.
    /// Safe to call repeatedly, including before `start`.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Wait for the scheduling task to wind down after `shutdown`.
    pub async fn join(&self) {
        let handle = self.handle.lock().await.take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }
}
