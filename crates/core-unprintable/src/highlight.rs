//! Highlight spans over the display glyphs of an abbreviation.
//!
//! Input is the (possibly truncated) abbreviation and the part of the
//! original word that was rendered into it. Splitting the rendered original
//! on every unprintable code point gives one slice per glyph: the printable
//! run that precedes it. Walking the slices keeps two cursors into the
//! abbreviation, `len` in characters and `col` in bytes (1-based):
//!
//! - an empty slice after an existing span means the glyph is adjacent to
//!   the previous one, so that span widens by one glyph;
//! - otherwise the printable run is skipped and a new one-glyph span opens,
//!   unless the run already reaches the end of the abbreviation;
//! - after each glyph, if the abbreviation ends inside or right after it,
//!   the last span is trimmed to the visible part and the walk stops.
//!
//! Every glyph is [`DISPLAY_WIDTH`] characters and bytes wide, so character
//! and byte offsets advance together over glyphs.

use crate::item::{HighlightKind, HighlightSpan};
use core_config::UnprintableConfig;
use core_text::RangeMatcher;
use core_text::codec::DISPLAY_WIDTH;
use core_text::{byte_len, char_len};

pub fn highlight_spans(
    abbr: &str,
    rendered_orig: &str,
    matcher: &RangeMatcher,
    config: &UnprintableConfig,
) -> Vec<HighlightSpan> {
    let abbr_len = char_len(abbr);
    let mut slices = matcher.split(rendered_orig);
    // The trailing slice follows the last glyph and owns none.
    slices.pop();

    let mut spans: Vec<HighlightSpan> = Vec::new();
    let mut len = 0usize;
    let mut col = 1usize;
    for slice in slices {
        match spans.last_mut() {
            Some(prev) if slice.is_empty() => prev.width += DISPLAY_WIDTH,
            _ => {
                len += char_len(slice);
                col += byte_len(slice);
                if len >= abbr_len {
                    break;
                }
                spans.push(HighlightSpan {
                    name: config.highlight_name().to_owned(),
                    kind: HighlightKind::Abbr,
                    group: config.highlight_group().to_owned(),
                    col,
                    width: DISPLAY_WIDTH,
                });
            }
        }
        len += DISPLAY_WIDTH;
        col += DISPLAY_WIDTH;
        if len >= abbr_len {
            if let Some(last) = spans.last_mut() {
                last.width = last.width.saturating_sub(len - abbr_len);
            }
            break;
        }
    }
    spans
}
