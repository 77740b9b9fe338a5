//! Unprintable-character completion helper.
//!
//! Completion candidates may carry control characters and other code points
//! the editor cannot print. Inserted verbatim they corrupt the display, so
//! [`Unprintable`] rewrites each candidate before it reaches the popup and
//! restores the original text once the user accepts it:
//!
//! 1. [`Unprintable::initialize`] asks the editor which code points in
//!    `0..256` its locale cannot print and compiles the matcher.
//! 2. [`Unprintable::convert`] inserts a placeholder in place of every
//!    unprintable run, shows each unprintable code point as a highlighted
//!    two-character glyph in the abbreviation, and stashes the original word
//!    in `user_data`.
//! 3. [`Unprintable::on_accept`] reads that payload back, figures out what
//!    the user typed since insertion and rewrites the line (or command line)
//!    with the real code points. If the editor still holds its text lock the
//!    rewrite is parked with the given [`CallbackRegistrar`] and fired later.
//!
//! Design Notes:
//! - All editor traffic goes through [`core_host::Host`] in as few round
//!   trips as possible; reads that do not depend on each other share one
//!   batch.
//! - Text content is never logged, only counts, modes and ids.

use core_config::UnprintableConfig;
use core_host::{CallbackRegistrar, Host, HostError};
use core_text::RangeMatcher;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

pub mod accept;
pub mod classifier;
pub mod convert;
pub mod error;
pub mod highlight;
pub mod item;
pub mod payload;

pub use accept::{AcceptContext, AcceptOutcome};
pub use classifier::{BASELINE, UnprintableSet};
pub use error::AcceptError;
pub use item::{CompletionItem, HighlightKind, HighlightSpan};
pub use payload::{PayloadError, RoundTripPayload, USER_DATA_KEY};

/// One completion-source instance.
#[derive(Debug)]
pub struct Unprintable {
    config: UnprintableConfig,
    set: UnprintableSet,
    matcher: RangeMatcher,
    accept_count: AtomicU64,
}

impl Default for Unprintable {
    fn default() -> Self {
        Self::new(UnprintableConfig::default())
    }
}

impl Unprintable {
    /// New instance matching the baseline set until [`initialize`] runs.
    ///
    /// [`initialize`]: Unprintable::initialize
    pub fn new(config: UnprintableConfig) -> Self {
        let set = UnprintableSet::baseline();
        let matcher = set.compile();
        Self {
            config,
            set,
            matcher,
            accept_count: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &UnprintableConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut UnprintableConfig {
        &mut self.config
    }

    pub fn unprintable_set(&self) -> &UnprintableSet {
        &self.set
    }

    pub fn matcher(&self) -> &RangeMatcher {
        &self.matcher
    }

    /// Accept attempts seen so far, including failed and no-op ones.
    pub fn accept_count(&self) -> u64 {
        self.accept_count.load(Ordering::Relaxed)
    }

    /// Extend the baseline with the editor's locale-dependent unprintables
    /// and rebuild the matcher. On error the previous matcher stays active.
    pub async fn initialize<H: Host>(&mut self, host: &H) -> Result<(), HostError> {
        let set = classifier::classify(host).await?;
        self.matcher = set.compile();
        self.set = set;
        debug!(
            target: "unprintable.init",
            ranges = self.matcher.ranges().len(),
            "matcher_compiled"
        );
        Ok(())
    }

    /// Rewrite `items` for display. `next_input` is the text after the
    /// cursor when the items were gathered.
    pub async fn convert<H: Host>(
        &self,
        host: &H,
        items: Vec<CompletionItem>,
        next_input: &str,
    ) -> Result<Vec<CompletionItem>, HostError> {
        convert::convert_items(host, &self.matcher, &self.config, items, next_input).await
    }

    /// Restore the accepted item's original text in the editor.
    pub async fn on_accept<H, R>(
        &self,
        host: &H,
        registrar: &mut R,
        user_data: &Value,
        ctx: &AcceptContext,
    ) -> Result<AcceptOutcome, AcceptError>
    where
        H: Host,
        R: CallbackRegistrar + ?Sized,
    {
        let attempt = self.accept_count.fetch_add(1, Ordering::Relaxed) + 1;
        let payload = RoundTripPayload::extract(user_data).inspect_err(|err| {
            warn!(target: "unprintable.accept", attempt, error = %err, "payload_rejected");
        })?;
        accept::reconstruct(
            host,
            registrar,
            &self.matcher,
            &self.config,
            &payload,
            ctx,
            attempt,
        )
        .await
    }
}
