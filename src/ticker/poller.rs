use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{info, warn};

use super::Ticker;

/// Handle to a running poll loop. Dropping it also ends the loop, without
/// waiting for it.
pub struct PollHandle {
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Stops scheduling new cycles and waits for the loop to exit. Cycles
    /// already in flight finish on their own.
    pub async fn stop(self) {
        let _ = self.shutdown.send(());
        if let Err(err) = self.task.await {
            warn!(error = %err, "poll task panicked");
        }
    }
}

/// Starts a cycle every `every`, first one `every` from now. Each cycle is
/// its own task, so a slow fetch never delays the next tick.
pub fn spawn_poller(ticker: Arc<Ticker>, every: Duration) -> PollHandle {
    let (shutdown, mut shutdown_rx) = oneshot::channel();

    let task = tokio::spawn(async move {
        let mut ticks = interval_at(Instant::now() + every, every);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!(interval_ms = every.as_millis() as u64, "polling started");

        loop {
            tokio::select! {
                _ = ticks.tick() => {
                    let ticker = ticker.clone();
                    tokio::spawn(async move { ticker.run_cycle().await });
                }
                _ = &mut shutdown_rx => {
                    info!("polling stopped");
                    break;
                }
            }
        }
    });

    PollHandle { shutdown, task }
}
