//! Delayed push of interstitial targets.
//!
//! A registration binds an open [`ClientChannel`] to a resolved target. A
//! pool worker waits the fixed delay, then either pushes the target once and
//! closes the channel, or drops the push if the client already left.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::oneshot;
use tracing::{debug, info};

use crate::domain::services::ClientChannel;
use crate::error::AppError;
use crate::infrastructure::task_pool::TaskPool;

/// Delay between registration and delivery.
pub const DEFAULT_NOTIFY_DELAY: Duration = Duration::from_secs(5);

/// Lifecycle of a [`PendingNotification`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationState {
    Registered,
    Armed,
    /// Target sent and channel closed.
    Delivered,
    /// Channel closed before the timer fired.
    Aborted,
}

/// A channel waiting for its target. Never persisted.
pub struct PendingNotification {
    channel: Arc<dyn ClientChannel>,
    target: String,
    delay: Duration,
    state: NotificationState,
}

impl PendingNotification {
    pub fn new(channel: Arc<dyn ClientChannel>, target: String, delay: Duration) -> Self {
        Self {
            channel,
            target,
            delay,
            state: NotificationState::Registered,
        }
    }

    pub fn state(&self) -> NotificationState {
        self.state
    }

    /// Waits out the delay and delivers at most one message.
    pub async fn run(mut self) -> NotificationState {
        self.state = NotificationState::Armed;
        let channel_id = self.channel.id();
        debug!(
            channel = %channel_id,
            delay_ms = self.delay.as_millis() as u64,
            "notification armed"
        );

        tokio::time::sleep(self.delay).await;

        if !self.channel.is_open() {
            return self.abort(&channel_id);
        }

        if self.channel.send(self.target.clone()).await.is_err() {
            return self.abort(&channel_id);
        }
        self.channel.close().await;

        self.state = NotificationState::Delivered;
        metrics::counter!("interstitial_deliveries_total").increment(1);
        debug!(channel = %channel_id, target = %self.target, "interstitial target delivered");
        self.state
    }

    fn abort(mut self, channel_id: &str) -> NotificationState {
        self.state = NotificationState::Aborted;
        metrics::counter!("interstitial_aborts_total").increment(1);
        info!(channel = %channel_id, "client left before delivery");
        self.state
    }
}

/// Outcome of a registration, for callers that care.
pub struct NotificationTicket {
    outcome: oneshot::Receiver<NotificationState>,
}

impl NotificationTicket {
    /// Waits for the terminal state. `None` if the pool dropped the job.
    pub async fn outcome(self) -> Option<NotificationState> {
        self.outcome.await.ok()
    }
}

/// Terminal outcomes counted since start-up.
#[derive(Debug, Default)]
struct Outcomes {
    delivered: AtomicU64,
    aborted: AtomicU64,
}

/// Schedules one-shot delayed pushes on the shared [`TaskPool`].
///
/// Clones share the pool and the outcome counters.
#[derive(Clone)]
pub struct DelayedNotifier {
    task_pool: TaskPool,
    delay: Duration,
    outcomes: Arc<Outcomes>,
}

impl DelayedNotifier {
    pub fn new(task_pool: TaskPool) -> Self {
        Self {
            task_pool,
            delay: DEFAULT_NOTIFY_DELAY,
            outcomes: Arc::new(Outcomes::default()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Notifications that reached their client.
    pub fn delivered(&self) -> u64 {
        self.outcomes.delivered.load(Ordering::Relaxed)
    }

    /// Notifications dropped because the client left first.
    pub fn aborted(&self) -> u64 {
        self.outcomes.aborted.load(Ordering::Relaxed)
    }

    /// Registers `channel` to receive `target` after the delay. Returns as
    /// soon as the job is queued.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] if the pool queue is full.
    pub fn register(
        &self,
        channel: Arc<dyn ClientChannel>,
        target: String,
    ) -> Result<NotificationTicket, AppError> {
        let pending = PendingNotification::new(channel, target, self.delay);
        let (tx, rx) = oneshot::channel();
        let outcomes = self.outcomes.clone();

        self.task_pool
            .execute(async move {
                let state = pending.run().await;
                match state {
                    NotificationState::Delivered => &outcomes.delivered,
                    _ => &outcomes.aborted,
                }
                .fetch_add(1, Ordering::Relaxed);
                let _ = tx.send(state);
            })
            .map_err(|_| AppError::unavailable("Notification queue is full"))?;

        Ok(NotificationTicket { outcome: rx })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::{ChannelClosed, MockClientChannel};
    use crate::infrastructure::task_pool::TaskPoolConfig;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::AtomicBool;

    /// Records what the notifier writes.
    #[derive(Default)]
    struct RecordingChannel {
        sent: Mutex<Vec<String>>,
        closed: AtomicBool,
    }

    impl RecordingChannel {
        fn sent(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }

        fn disconnect(&self) {
            self.closed.store(true, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl ClientChannel for RecordingChannel {
        fn id(&self) -> String {
            "recording".to_string()
        }

        fn is_open(&self) -> bool {
            !self.closed.load(Ordering::SeqCst)
        }

        async fn send(&self, text: String) -> Result<(), ChannelClosed> {
            if !self.is_open() {
                return Err(ChannelClosed);
            }
            self.sent.lock().unwrap().push(text);
            Ok(())
        }

        async fn close(&self) {
            self.closed.store(true, Ordering::SeqCst);
        }
    }

    fn notifier() -> DelayedNotifier {
        DelayedNotifier::new(TaskPool::new(TaskPoolConfig::default()))
    }

    #[tokio::test(start_paused = true)]
    async fn test_delivers_once_after_delay() {
        let channel = Arc::new(RecordingChannel::default());
        let notifier = notifier();
        let ticket = notifier
            .register(channel.clone(), "https://example.com/".to_string())
            .unwrap();

        tokio::time::sleep(Duration::from_millis(4900)).await;
        assert!(channel.sent().is_empty());
        assert!(channel.is_open());

        assert_eq!(ticket.outcome().await, Some(NotificationState::Delivered));
        assert_eq!(channel.sent(), vec!["https://example.com/".to_string()]);
        assert!(!channel.is_open());
        assert_eq!((notifier.delivered(), notifier.aborted()), (1, 0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_disconnect_before_delivery_aborts() {
        let channel = Arc::new(RecordingChannel::default());
        let notifier = notifier();
        let ticket = notifier
            .register(channel.clone(), "https://example.com/".to_string())
            .unwrap();

        tokio::time::sleep(Duration::from_secs(1)).await;
        channel.disconnect();

        assert_eq!(ticket.outcome().await, Some(NotificationState::Aborted));
        assert!(channel.sent().is_empty());
        assert_eq!((notifier.delivered(), notifier.aborted()), (0, 1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_failure_is_an_abort() {
        let mut channel = MockClientChannel::new();
        channel.expect_id().returning(|| "mock".to_string());
        channel.expect_is_open().returning(|| true);
        channel
            .expect_send()
            .times(1)
            .returning(|_| Err(ChannelClosed));
        channel.expect_close().times(0);

        let ticket = notifier()
            .register(Arc::new(channel), "https://example.com/".to_string())
            .unwrap();

        assert_eq!(ticket.outcome().await, Some(NotificationState::Aborted));
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_delay() {
        let channel = Arc::new(RecordingChannel::default());
        let started = tokio::time::Instant::now();

        let notifier = notifier().with_delay(Duration::from_secs(2));
        assert_eq!(notifier.delay(), Duration::from_secs(2));

        let ticket = notifier
            .register(channel.clone(), "https://example.com/".to_string())
            .unwrap();

        assert_eq!(ticket.outcome().await, Some(NotificationState::Delivered));
        assert!(started.elapsed() >= Duration::from_secs(2));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_rejected_when_pool_full() {
        let pool = TaskPool::new(TaskPoolConfig {
            workers: 1,
            queue_capacity: 1,
        });
        let notifier = DelayedNotifier::new(pool).with_delay(Duration::from_secs(60));

        // One running, one queued; the third has nowhere to go.
        let mut results = Vec::new();
        for _ in 0..3 {
            results.push(notifier.register(
                Arc::new(RecordingChannel::default()),
                "https://example.com/".to_string(),
            ));
            tokio::task::yield_now().await;
        }

        assert!(matches!(
            results.pop().unwrap(),
            Err(AppError::Unavailable { .. })
        ));
    }

    #[test]
    fn test_pending_starts_registered() {
        let pending = PendingNotification::new(
            Arc::new(RecordingChannel::default()),
            "https://example.com/".to_string(),
            DEFAULT_NOTIFY_DELAY,
        );
        assert_eq!(pending.state(), NotificationState::Registered);
    }
}
