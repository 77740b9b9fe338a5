//! Printability classifier.
//!
//! The active unprintable set is the fixed C0 baseline plus whatever the
//! editor's own printability predicate rejects in `0..256` under the current
//! locale. Until the editor has been asked, the baseline alone is used.

use core_host::{Batch, Host, HostError};
use core_text::RangeMatcher;
use core_text::range::GUARD;
use std::collections::BTreeSet;
use std::ops::RangeInclusive;
use tracing::info;

/// Code points that are unprintable regardless of locale.
pub const BASELINE: RangeInclusive<u32> = 0x00..=0x1f;

/// Immutable snapshot of unprintable code points (all below 256).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnprintableSet {
    points: BTreeSet<u32>,
}

impl Default for UnprintableSet {
    fn default() -> Self {
        Self::baseline()
    }
}

impl UnprintableSet {
    pub fn baseline() -> Self {
        Self {
            points: BASELINE.collect(),
        }
    }

    /// Baseline merged with `extension`; values of 256 and above are dropped.
    pub fn with_extension<I>(extension: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        let mut set = Self::baseline();
        set.points
            .extend(extension.into_iter().filter(|&cp| cp < GUARD));
        set
    }

    pub fn contains(&self, cp: u32) -> bool {
        self.points.contains(&cp)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.points.iter().copied()
    }

    pub fn compile(&self) -> RangeMatcher {
        RangeMatcher::compile(self.iter())
    }
}

/// Ask the editor which code points its locale cannot print and build the
/// resulting set.
pub async fn classify<H: Host>(host: &H) -> Result<UnprintableSet, HostError> {
    let mut batch = Batch::new();
    let points = batch.unprintable_code_points();
    let mut replies = batch.flush(host).await?;
    let extension = replies.take(points)?;
    let reported = extension.len();
    let set = UnprintableSet::with_extension(extension);
    info!(
        target: "unprintable.init",
        reported,
        total = set.len(),
        "printability_classified"
    );
    Ok(set)
}
