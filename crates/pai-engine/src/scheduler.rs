//! Delayed delivery of simulated assistant replies.
//!
//! Each scheduled reply is a tokio task that sleeps for the reply delay and
//! then announces itself on a channel. The task never touches the store; the
//! receiver applies the reply on the event loop. Tasks are tracked per
//! conversation so deleting a conversation can abort its pending replies.

use crate::conversation::ConversationId;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// A reply whose delay has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyReady {
    pub conversation_id: ConversationId,
}

/// Owns the pending reply tasks.
#[derive(Debug)]
pub struct ReplyScheduler {
    delay: Duration,
    tx: mpsc::UnboundedSender<ReplyReady>,
    pending: HashMap<ConversationId, Vec<JoinHandle<()>>>,
}

impl ReplyScheduler {
    /// Create a scheduler and the receiver its replies arrive on.
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<ReplyReady>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            delay,
            tx,
            pending: HashMap::new(),
        };
        (scheduler, rx)
    }

    /// Schedule a reply for `conversation_id` after the configured delay.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, conversation_id: ConversationId) {
        self.prune();

        let tx = self.tx.clone();
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the UI is shutting down.
            let _ = tx.send(ReplyReady { conversation_id });
        });

        debug!(conversation_id = %conversation_id, delay_ms = delay.as_millis(), "Scheduled reply");
        self.pending.entry(conversation_id).or_default().push(handle);
    }

    /// Abort every pending reply for `conversation_id`. Returns how many were aborted.
    pub fn cancel(&mut self, conversation_id: ConversationId) -> usize {
        let Some(handles) = self.pending.remove(&conversation_id) else {
            return 0;
        };
        let mut aborted = 0;
        for handle in handles {
            if !handle.is_finished() {
                handle.abort();
                aborted += 1;
            }
        }
        if aborted > 0 {
            debug!(conversation_id = %conversation_id, aborted, "Cancelled pending replies");
        }
        aborted
    }

    /// Number of replies still waiting for `conversation_id`.
    pub fn pending(&self, conversation_id: ConversationId) -> usize {
        self.pending
            .get(&conversation_id)
            .map_or(0, |handles| handles.iter().filter(|h| !h.is_finished()).count())
    }

    /// Whether any conversation has a reply in flight.
    pub fn is_busy(&self) -> bool {
        self.pending
            .values()
            .any(|handles| handles.iter().any(|h| !h.is_finished()))
    }

    /// Abort all pending replies.
    pub fn shutdown(&mut self) {
        for (_, handles) in self.pending.drain() {
            for handle in handles {
                handle.abort();
            }
        }
    }

    /// Forget finished tasks.
    fn prune(&mut self) {
        self.pending.retain(|_, handles| {
            handles.retain(|h| !h.is_finished());
            !handles.is_empty()
        });
    }
}

impl Drop for ReplyScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_reply_arrives_after_delay() {
        let (mut scheduler, mut rx) = ReplyScheduler::new(Duration::from_millis(1000));
        scheduler.schedule(ConversationId(1));
        assert_eq!(scheduler.pending(ConversationId(1)), 1);

        // Let the task register its sleep, then stop just short of the delay.
        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_millis(999)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::advance(Duration::from_millis(1)).await;
        let ready = rx.recv().await.unwrap();
        assert_eq!(ready.conversation_id, ConversationId(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_delivery() {
        let (mut scheduler, mut rx) = ReplyScheduler::new(Duration::from_millis(1000));
        scheduler.schedule(ConversationId(1));
        scheduler.schedule(ConversationId(1));
        scheduler.schedule(ConversationId(2));

        assert_eq!(scheduler.cancel(ConversationId(1)), 2);
        assert_eq!(scheduler.pending(ConversationId(1)), 0);

        tokio::time::sleep(Duration::from_millis(1500)).await;

        let ready = rx.recv().await.unwrap();
        assert_eq!(ready.conversation_id, ConversationId(2));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_unknown_is_noop() {
        let (mut scheduler, _rx) = ReplyScheduler::new(Duration::from_millis(10));
        assert_eq!(scheduler.cancel(ConversationId(5)), 0);
        assert!(!scheduler.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn test_replies_delivered_in_schedule_order() {
        let (mut scheduler, mut rx) = ReplyScheduler::new(Duration::from_millis(100));
        scheduler.schedule(ConversationId(3));
        tokio::time::sleep(Duration::from_millis(10)).await;
        scheduler.schedule(ConversationId(4));

        assert_eq!(rx.recv().await.unwrap().conversation_id, ConversationId(3));
        assert_eq!(rx.recv().await.unwrap().conversation_id, ConversationId(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_aborts_everything() {
        let (mut scheduler, mut rx) = ReplyScheduler::new(Duration::from_millis(100));
        scheduler.schedule(ConversationId(1));
        scheduler.schedule(ConversationId(2));
        assert!(scheduler.is_busy());

        scheduler.shutdown();
        assert!(!scheduler.is_busy());

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(rx.try_recv().is_err());
    }
}
