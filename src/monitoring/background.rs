//! Background task implementations for MonitoringSystem

use crate::utils::error::Result;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, error, info};

use super::system::MonitoringSystem;

/// Handle to the running notifier dispatch loop
#[derive(Debug)]
pub(super) struct DispatchTask {
    shutdown: Arc<Notify>,
    handle: JoinHandle<()>,
}

impl MonitoringSystem {
    /// Start the background alert dispatch loop; a no-op when already running.
    ///
    /// Systems built inside a tokio runtime start the loop on construction,
    /// so this is only needed for systems built outside one.
    pub async fn start(&self) -> Result<()> {
        self.spawn_dispatch(&Handle::current());
        Ok(())
    }

    /// Spawn the dispatch loop on `runtime` unless one is already running
    pub(super) fn spawn_dispatch(&self, runtime: &Handle) {
        let mut slot = self.dispatch.lock();
        if slot.is_some() {
            debug!("Alert dispatch loop already running");
            return;
        }

        let shutdown = Arc::new(Notify::new());
        let signal = shutdown.clone();
        let engine = self.alerts.clone();
        let period = self.config.alerting.dispatch_interval();

        let handle = runtime.spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let drained = engine.dispatch_pending().await;
                        if drained > 0 {
                            debug!(drained, "Dispatched pending alerts");
                        }
                    }
                    _ = signal.notified() => break,
                }
            }

            // flush whatever fired since the last tick
            engine.dispatch_pending().await;
        });

        *slot = Some(DispatchTask { shutdown, handle });
        info!(interval_ms = period.as_millis() as u64, "Alert dispatch loop started");
    }

    /// Stop the dispatch loop after a final flush of pending alerts
    pub async fn stop(&self) -> Result<()> {
        let task = self.dispatch.lock().take();
        let Some(task) = task else {
            return Ok(());
        };

        task.shutdown.notify_one();
        if let Err(e) = task.handle.await {
            error!("Alert dispatch loop ended abnormally: {}", e);
        }

        info!("Monitoring system stopped");
        Ok(())
    }

    /// Whether the dispatch loop is running
    pub fn is_running(&self) -> bool {
        self.dispatch.lock().is_some()
    }
}
