//! Mismatch resets on the tokio runtime.

use std::time::Duration;
use study_core::{PendingReset, Scheduler};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// Sleeps on a spawned task, then hands the reset back to the page loop.
#[derive(Debug, Clone)]
pub struct ChannelScheduler {
    tx: UnboundedSender<PendingReset>,
}

impl ChannelScheduler {
    pub fn new() -> (Self, UnboundedReceiver<PendingReset>) {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Scheduler for ChannelScheduler {
    fn schedule(&mut self, delay: Duration, reset: PendingReset) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(reset).is_err() {
                tracing::debug!("page closed before mismatch reset fired");
            }
        });
    }
}
