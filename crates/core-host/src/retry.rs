//! One-shot retry callbacks.
//!
//! When the editor refuses a mutation because of the transient text lock, the
//! plan is parked under a unique callback id and a simulated keystroke is
//! queued to run it later. The callback fires from a fresh event, after the
//! completion interaction has released the lock.

use crate::{EditPlan, Host, HostError};
use std::collections::HashMap;
use tracing::{debug, info};

/// Registers a named one-shot callback that re-applies `plan`.
pub trait CallbackRegistrar {
    fn register_once(&mut self, id: String, plan: EditPlan);
}

impl<T: CallbackRegistrar + ?Sized> CallbackRegistrar for &mut T {
    fn register_once(&mut self, id: String, plan: EditPlan) {
        (**self).register_once(id, plan);
    }
}

/// In-process registrar: pending plans keyed by callback id.
#[derive(Debug, Default)]
pub struct RetryQueue {
    pending: HashMap<String, EditPlan>,
}

impl RetryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.pending.contains_key(id)
    }

    /// Run callback `id`. Returns `Ok(false)` when nothing is registered
    /// under `id` (never registered, or already fired).
    pub async fn fire<H: Host>(&mut self, host: &H, id: &str) -> Result<bool, HostError> {
        let Some(plan) = self.pending.remove(id) else {
            debug!(target: "host.retry", id, "retry_unknown_or_spent");
            return Ok(false);
        };
        plan.apply(host).await?;
        info!(target: "host.retry", id, "retry_applied");
        Ok(true)
    }
}

impl CallbackRegistrar for RetryQueue {
    fn register_once(&mut self, id: String, plan: EditPlan) {
        debug!(target: "host.retry", id = id.as_str(), "retry_registered");
        self.pending.insert(id, plan);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_host::RecordingHost;

    fn park<R: CallbackRegistrar>(mut registrar: R, id: &str) {
        registrar.register_once(id.to_owned(), plan());
    }

    fn plan() -> EditPlan {
        EditPlan::Cmdline {
            text: "abc".into(),
            pos: 4,
        }
    }

    #[tokio::test]
    async fn fires_exactly_once() {
        let host = RecordingHost::unit();
        let mut queue = RetryQueue::new();
        queue.register_once("cb-1".into(), plan());
        assert!(queue.contains("cb-1"));
        assert!(queue.fire(&host, "cb-1").await.unwrap());
        assert!(!queue.fire(&host, "cb-1").await.unwrap());
        assert_eq!(host.dispatches(), 1);
        assert!(queue.is_empty());
    }

    #[tokio::test]
    async fn unknown_id_is_a_no_op() {
        let host = RecordingHost::unit();
        let mut queue = RetryQueue::new();
        assert!(!queue.fire(&host, "nope").await.unwrap());
        assert_eq!(host.dispatches(), 0);
    }

    #[tokio::test]
    async fn failed_retry_is_still_spent() {
        let host = RecordingHost::unit();
        host.fail_next(HostError::TextLocked);
        let mut queue = RetryQueue::new();
        park(&mut queue, "cb-2");
        assert_eq!(
            queue.fire(&host, "cb-2").await,
            Err(HostError::TextLocked)
        );
        assert_eq!(queue.len(), 0);
    }
}
