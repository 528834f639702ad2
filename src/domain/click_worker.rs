//! Background worker persisting click events.

use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tracing::{debug, info, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::ClickRepository;

/// Drains the click channel and persists each event.
///
/// At most `concurrency` writes are in flight. A failed write is logged and
/// dropped: click logging never affects a resolution that was already served.
/// Returns once every sender has been dropped and in-flight writes finished.
pub async fn run_click_worker(
    mut rx: mpsc::Receiver<ClickEvent>,
    clicks: Arc<dyn ClickRepository>,
    concurrency: usize,
) {
    let permits = Arc::new(Semaphore::new(concurrency.max(1)));

    while let Some(event) = rx.recv().await {
        let Ok(permit) = permits.clone().acquire_owned().await else {
            break;
        };
        let clicks = clicks.clone();

        tokio::spawn(async move {
            let key = event.key.clone();
            match clicks.save(event.into()).await {
                Ok(()) => debug!(key = %key, "click recorded"),
                Err(e) => warn!(key = %key, "failed to record click: {}", e),
            }
            drop(permit);
        });
    }

    // Wait for in-flight writes before reporting shutdown.
    let _ = permits.acquire_many(concurrency.max(1) as u32).await;
    info!("Click worker stopped");
}
