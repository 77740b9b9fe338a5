//! Editor bridge seam.
//!
//! The completion helper never talks to the editor directly. Everything it
//! needs (line reads and writes, cursor and command-line updates, mode and
//! pending-character queries, width-limited formatting, locale printability,
//! deferred callbacks) is expressed as a [`HostCall`] and sent through a
//! [`Host`] implementation supplied by the embedding plugin.
//!
//! Design Notes:
//! - `Host::dispatch` is the only required method and is one round trip.
//!   Higher layers group independent calls with [`Batch`] so latency stays
//!   bounded regardless of item count.
//! - Execution is single-threaded and cooperative; futures are not required
//!   to be `Send`.
//! - The transient text lock is surfaced as [`HostError::TextLocked`]; every
//!   other bridge failure is [`HostError::Call`].
//! - Retries are data: an [`EditPlan`] parked in a [`CallbackRegistrar`]
//!   under a unique id, replayed when the editor invokes that id.

use std::future::Future;

pub mod batch;
pub mod call;
pub mod edit;
pub mod error;
pub mod retry;

pub use batch::{Batch, Replies, Slot};
pub use call::{EditorMode, FromReply, HostCall, Reply};
pub use edit::{BufferEdit, CursorPos, EditPlan};
pub use error::{HostError, TEXT_LOCK_CODE};
pub use retry::{CallbackRegistrar, RetryQueue};

/// Connection to the running editor.
pub trait Host {
    /// Execute `calls` in order within a single round trip and return one
    /// reply per call. On failure nothing after the failing call runs.
    fn dispatch(
        &self,
        calls: Vec<HostCall>,
    ) -> impl Future<Output = Result<Vec<Reply>, HostError>>;
}

impl<T: Host> Host for &T {
    fn dispatch(
        &self,
        calls: Vec<HostCall>,
    ) -> impl Future<Output = Result<Vec<Reply>, HostError>> {
        (**self).dispatch(calls)
    }
}
