use std::sync::Arc;

use thiserror::Error;
use tokio::{
    sync::{
        mpsc::{self, error::TrySendError},
        watch,
    },
    task::JoinHandle,
};

use crate::alerts::AlertEvent;

use super::{channel::NotificationChannel, dispatcher::NotificationDispatcher};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("dispatch queue is full, alert for {scale_id} dropped")]
    Full { scale_id: String },
    #[error("dispatch queue is closed")]
    Closed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub delivered: u64,
    pub failed: u64,
    pub dropped_on_shutdown: u64,
}

/// Enqueue side of the dispatch worker. Cheap to clone; enqueueing never waits.
#[derive(Clone)]
pub struct DispatchHandle {
    sender: mpsc::Sender<AlertEvent>,
    shutdown: Arc<watch::Sender<bool>>,
}

impl DispatchHandle {
    pub fn enqueue(&self, event: AlertEvent) -> Result<(), QueueError> {
        self.sender.try_send(event).map_err(|error| match error {
            TrySendError::Full(event) => QueueError::Full {
                scale_id: event.scale_id,
            },
            TrySendError::Closed(_) => QueueError::Closed,
        })
    }

    /// Stops the worker after the delivery in flight. Queued alerts are discarded.
    pub fn shutdown(&self) {
        self.shutdown.send_replace(true);
    }
}

pub struct DispatchQueue;

impl DispatchQueue {
    pub fn start<C>(
        dispatcher: NotificationDispatcher<C>,
        capacity: usize,
    ) -> (DispatchHandle, JoinHandle<DispatchStats>)
    where
        C: NotificationChannel + 'static,
    {
        let (sender, mut receiver) = mpsc::channel::<AlertEvent>(capacity.max(1));
        let (shutdown, mut shutdown_rx) = watch::channel(false);

        let worker = tokio::spawn(async move {
            let mut stats = DispatchStats::default();

            loop {
                let event = tokio::select! {
                    biased;
                    Ok(()) = shutdown_rx.changed() => break,
                    event = receiver.recv() => match event {
                        Some(event) => event,
                        None => break,
                    },
                };

                if dispatcher.dispatch(&event).await.success {
                    stats.delivered += 1;
                } else {
                    stats.failed += 1;
                }
            }

            receiver.close();
            while receiver.try_recv().is_ok() {
                stats.dropped_on_shutdown += 1;
            }
            if stats.dropped_on_shutdown > 0 {
                log::warn!(
                    "dispatch_queue_shutdown dropped_pending={}",
                    stats.dropped_on_shutdown
                );
            }
            log::info!(
                "dispatch_worker_stopped delivered={} failed={}",
                stats.delivered,
                stats.failed
            );
            stats
        });

        (
            DispatchHandle {
                sender,
                shutdown: Arc::new(shutdown),
            },
            worker,
        )
    }
}
