//! Accumulated round trips.
//!
//! A `Batch` collects independent calls and sends them in one
//! [`Host::dispatch`]. Read calls hand back a typed [`Slot`] that is
//! redeemed against the flushed [`Replies`]; mutation calls are fire and
//! forget. The host executes calls in push order, so a batch of mutations is
//! observed as one uninterrupted sequence.
//!
//! An empty batch flushes without touching the host.

use crate::{EditorMode, FromReply, Host, HostCall, HostError, Reply};
use std::marker::PhantomData;
use tracing::trace;

/// Handle to the reply of one queued read call.
#[derive(Debug)]
pub struct Slot<T> {
    index: usize,
    call: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Slot<T> {}

#[derive(Debug, Default)]
pub struct Batch {
    calls: Vec<HostCall>,
}

impl Batch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    fn read<T>(&mut self, call: HostCall) -> Slot<T> {
        let slot = Slot {
            index: self.calls.len(),
            call: call.name(),
            _marker: PhantomData,
        };
        self.calls.push(call);
        slot
    }

    pub fn mode(&mut self) -> Slot<EditorMode> {
        self.read(HostCall::Mode)
    }

    pub fn pending_char(&mut self) -> Slot<String> {
        self.read(HostCall::PendingChar)
    }

    pub fn line(&mut self, lnum: usize) -> Slot<String> {
        self.read(HostCall::GetLine { lnum })
    }

    pub fn truncate(&mut self, width: usize, text: impl Into<String>) -> Slot<String> {
        self.read(HostCall::Truncate {
            width,
            text: text.into(),
        })
    }

    pub fn unprintable_code_points(&mut self) -> Slot<Vec<u32>> {
        self.read(HostCall::UnprintableCodePoints)
    }

    pub fn set_line(&mut self, lnum: usize, text: impl Into<String>) {
        self.calls.push(HostCall::SetLine {
            lnum,
            text: text.into(),
        });
    }

    pub fn append(&mut self, lnum: usize, lines: Vec<String>) {
        self.calls.push(HostCall::Append { lnum, lines });
    }

    pub fn set_cursor(&mut self, lnum: usize, col: usize) {
        self.calls.push(HostCall::SetCursor { lnum, col });
    }

    pub fn set_cmdline(&mut self, text: impl Into<String>, pos: usize) {
        self.calls.push(HostCall::SetCmdline {
            text: text.into(),
            pos,
        });
    }

    pub fn invoke_callback(&mut self, id: impl Into<String>) {
        self.calls.push(HostCall::InvokeCallback { id: id.into() });
    }

    /// Send every queued call in a single round trip.
    pub async fn flush<H: Host>(self, host: &H) -> Result<Replies, HostError> {
        if self.calls.is_empty() {
            return Ok(Replies::default());
        }
        let count = self.calls.len();
        trace!(target: "host.batch", calls = count, "batch_flush");
        let replies = host.dispatch(self.calls).await?;
        if replies.len() != count {
            return Err(HostError::UnexpectedReply {
                call: "batch",
                expected: "one reply per call",
            });
        }
        Ok(Replies {
            replies: replies.into_iter().map(Some).collect(),
        })
    }
}

/// Replies of a flushed batch, redeemed slot by slot.
#[derive(Debug, Default)]
pub struct Replies {
    replies: Vec<Option<Reply>>,
}

impl Replies {
    /// Take the reply for `slot`. Each slot can be taken once.
    pub fn take<T: FromReply>(&mut self, slot: Slot<T>) -> Result<T, HostError> {
        let reply = self
            .replies
            .get_mut(slot.index)
            .and_then(Option::take)
            .ok_or(HostError::UnexpectedReply {
                call: slot.call,
                expected: "an unclaimed reply",
            })?;
        T::from_reply(slot.call, reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_host::RecordingHost;

    #[tokio::test]
    async fn reads_share_one_round_trip() {
        let host = RecordingHost::new(vec![
            Reply::Text("i".into()),
            Reply::Text("x".into()),
            Reply::Text("line two".into()),
        ]);
        let mut batch = Batch::new();
        let mode = batch.mode();
        let vchar = batch.pending_char();
        let line = batch.line(2);
        let mut replies = batch.flush(&host).await.unwrap();
        assert_eq!(host.dispatches(), 1);
        assert_eq!(replies.take(mode).unwrap(), EditorMode::Buffer);
        assert_eq!(replies.take(vchar).unwrap(), "x");
        assert_eq!(replies.take(line).unwrap(), "line two");
    }

    #[tokio::test]
    async fn empty_batch_skips_host() {
        let host = RecordingHost::new(Vec::new());
        Batch::new().flush(&host).await.unwrap();
        assert_eq!(host.dispatches(), 0);
    }

    #[tokio::test]
    async fn slot_taken_twice_is_an_error() {
        let host = RecordingHost::new(vec![Reply::Text("c".into())]);
        let mut batch = Batch::new();
        let mode = batch.mode();
        let mut replies = batch.flush(&host).await.unwrap();
        assert_eq!(replies.take(mode).unwrap(), EditorMode::CommandLine);
        assert!(replies.take(mode).is_err());
    }

    #[tokio::test]
    async fn reply_count_mismatch_is_rejected() {
        let host = RecordingHost::new(vec![Reply::Unit]);
        let mut batch = Batch::new();
        batch.set_line(1, "a");
        batch.set_cursor(1, 2);
        assert!(matches!(
            batch.flush(&host).await,
            Err(HostError::UnexpectedReply { call: "batch", .. })
        ));
    }

    #[test]
    fn calls_keep_push_order() {
        let mut batch = Batch::new();
        batch.set_line(3, "first");
        batch.append(3, vec!["mid".into()]);
        batch.set_cursor(4, 1);
        let names: Vec<_> = batch.calls().iter().map(HostCall::name).collect();
        assert_eq!(names, ["setline", "append", "cursor"]);
    }
}
