//! Cancellable periodic task.
//!
//! The job runs immediately and then once per period. Cancelling (or dropping
//! the handle) stops the loop, abandoning a job that is still in flight.

use std::future::Future;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

pub struct PeriodicTask {
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl PeriodicTask {
    pub fn spawn<F, Fut>(period: Duration, mut job: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (shutdown, mut shutdown_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = &mut shutdown_rx => break,
                    _ = async {
                        interval.tick().await;
                        job().await;
                    } => {}
                }
            }
            tracing::trace!("periodic task stopped");
        });

        Self {
            shutdown: Some(shutdown),
            handle: Some(handle),
        }
    }

    /// Stops the task and waits for it to finish.
    pub async fn cancel(mut self) {
        self.signal_shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }

    fn signal_shutdown(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for PeriodicTask {
    fn drop(&mut self) {
        self.signal_shutdown();
    }
}
