//! Queue-driven worker hosting a [`NotificationRouter`].
//!
//! The host feeds [`RouterEvent`]s over an mpsc channel. Every event is an
//! independent unit of work spawned onto a [`TaskTracker`]; the worker only
//! finishes once the queue is closed (or the host cancels) AND all
//! outstanding side effects completed, so the host never reclaims the
//! context mid-operation.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::debug;

use crate::router::{ClickEvent, NotificationRouter};
use crate::shelf::NotificationShelf;
use crate::windows::WindowRegistry;

/// One unit of work for the router.
#[derive(Debug, Clone)]
pub enum RouterEvent {
    /// An opaque push payload to render as a notification.
    Push(Vec<u8>),
    /// A notification click to route to a window.
    Click(ClickEvent),
}

/// Handle to a running router worker.
pub struct RouterWorker {
    join: JoinHandle<()>,
    cancel: CancellationToken,
}

impl RouterWorker {
    /// Spawns the worker loop on the current tokio runtime.
    ///
    /// The loop runs until `rx` closes or `cancel` fires; events still
    /// queued at cancellation are dropped (the host owns the lifecycle),
    /// but every event already picked up runs to completion.
    pub fn spawn<S, W>(
        router: Arc<NotificationRouter<S, W>>,
        mut rx: mpsc::Receiver<RouterEvent>,
        cancel: CancellationToken,
    ) -> Self
    where
        S: NotificationShelf,
        W: WindowRegistry,
    {
        let loop_cancel = cancel.clone();
        let join = tokio::spawn(async move {
            let tracker = TaskTracker::new();
            loop {
                tokio::select! {
                    _ = loop_cancel.cancelled() => {
                        debug!("router worker cancelled");
                        break;
                    }

                    event = rx.recv() => {
                        match event {
                            Some(RouterEvent::Push(payload)) => {
                                let router = Arc::clone(&router);
                                tracker.spawn(async move {
                                    router.handle_push(payload).await;
                                });
                            }
                            Some(RouterEvent::Click(click)) => {
                                let router = Arc::clone(&router);
                                tracker.spawn(async move {
                                    router.handle_click(click).await;
                                });
                            }
                            None => {
                                debug!("router queue closed");
                                break;
                            }
                        }
                    }
                }
            }

            // Hold the context open until every unit of work signalled
            // completion.
            tracker.close();
            tracker.wait().await;
        });

        Self { join, cancel }
    }

    /// Waits for the worker to finish (queue closed or cancelled, all
    /// outstanding work drained).
    pub async fn wait(self) {
        let _ = self.join.await;
    }

    /// Cancels the worker and waits for outstanding work to drain.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        let _ = self.join.await;
    }
}
