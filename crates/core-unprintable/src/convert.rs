//! Item transform engine.
//!
//! For each candidate:
//! 1. `word` becomes the original with every unprintable run collapsed into
//!    the placeholder (this is what the editor inserts).
//! 2. The abbreviation expands every unprintable code point into its
//!    two-character display form, then is truncated to `abbr_width` cells by
//!    the editor when a width is configured.
//! 3. Highlight spans over the display glyphs are appended.
//! 4. The round-trip payload is merged into `user_data`.
//!
//! All truncation requests for all items share one round trip; items are
//! otherwise independent and keep their input order.

use crate::highlight::highlight_spans;
use crate::item::CompletionItem;
use crate::payload::RoundTripPayload;
use core_config::UnprintableConfig;
use core_host::{Batch, Host, HostError, Slot};
use core_text::{RangeMatcher, to_display};
use tracing::debug;

struct Staged {
    item: CompletionItem,
    orig_word: String,
    long_abbr: String,
    /// Truncated abbreviation and truncated original, when a width is set.
    truncated: Option<(Slot<String>, Slot<String>)>,
}

pub async fn convert_items<H: Host>(
    host: &H,
    matcher: &RangeMatcher,
    config: &UnprintableConfig,
    items: Vec<CompletionItem>,
    next_input: &str,
) -> Result<Vec<CompletionItem>, HostError> {
    let width = config.abbr_width();
    let mut batch = Batch::new();
    let staged: Vec<Staged> = items
        .into_iter()
        .map(|item| {
            let orig_word = item.word.clone();
            let long_abbr = matcher.replace_each(&orig_word, |c| to_display(c as u32));
            let truncated = (width > 0).then(|| {
                (
                    batch.truncate(width, long_abbr.as_str()),
                    batch.truncate(width, orig_word.as_str()),
                )
            });
            Staged {
                item,
                orig_word,
                long_abbr,
                truncated,
            }
        })
        .collect();

    let mut replies = batch.flush(host).await?;

    let mut out = Vec::with_capacity(staged.len());
    let mut with_glyphs = 0usize;
    for staged in staged {
        let Staged {
            mut item,
            orig_word,
            long_abbr,
            truncated,
        } = staged;
        let (abbr, rendered) = match truncated {
            Some((abbr, rendered)) => (replies.take(abbr)?, replies.take(rendered)?),
            None => (long_abbr, orig_word.clone()),
        };
        let spans = highlight_spans(&abbr, &rendered, matcher, config);
        if !spans.is_empty() {
            with_glyphs += 1;
        }
        item.word = matcher.replace_runs(&orig_word, config.placeholder());
        item.abbr = Some(abbr);
        item.highlights.extend(spans);
        RoundTripPayload::new(orig_word, next_input).attach(&mut item.user_data);
        out.push(item);
    }

    debug!(
        target: "unprintable.convert",
        items = out.len(),
        with_glyphs,
        abbr_width = width,
        "items_converted"
    );
    Ok(out)
}
