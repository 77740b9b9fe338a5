//! Display cell widths and fixed-width truncation.
//!
//! Mirrors how the editor lays out text in the popup menu: control code
//! points occupy two cells (their caret form), every other grapheme cluster
//! takes its `unicode_width` width. Truncation never splits a cluster.
//!
//! This is the in-process counterpart of the editor's `printf('%.NS', text)`
//! formatting call; the engine asks the editor, hosts without one can use
//! [`truncate_to_width`].

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Cells occupied by a single grapheme cluster.
pub fn cluster_width(egc: &str) -> usize {
    let mut chars = egc.chars();
    match (chars.next(), chars.next()) {
        (None, _) => 0,
        (Some(c), None) if is_control(c) => 2,
        _ => UnicodeWidthStr::width(egc),
    }
}

/// Cells occupied by `text`.
pub fn display_width(text: &str) -> usize {
    text.graphemes(true).map(cluster_width).sum()
}

/// Longest prefix of `text` whose display width does not exceed `width`.
/// A `width` of 0 means "no limit" and returns `text` unchanged.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if width == 0 {
        return text.to_owned();
    }
    let mut used = 0usize;
    let mut end = 0usize;
    for (idx, egc) in text.grapheme_indices(true) {
        let w = cluster_width(egc);
        if used + w > width {
            break;
        }
        used += w;
        end = idx + egc.len();
    }
    text[..end].to_owned()
}

fn is_control(c: char) -> bool {
    matches!(c as u32, 0x00..=0x1f | 0x7f..=0x9f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_codes_take_two_cells() {
        assert_eq!(cluster_width("\x01"), 2);
        assert_eq!(cluster_width("\x7f"), 2);
        assert_eq!(cluster_width("\u{85}"), 2);
        assert_eq!(display_width("a\x01b"), 4);
    }

    #[test]
    fn wide_and_combining_clusters() {
        assert_eq!(display_width("界"), 2);
        assert_eq!(display_width("e\u{0301}"), 1);
    }

    #[test]
    fn zero_width_means_unlimited() {
        assert_eq!(truncate_to_width("abcdef", 0), "abcdef");
    }

    #[test]
    fn truncates_on_cell_budget() {
        assert_eq!(truncate_to_width("abcdef", 3), "abc");
        assert_eq!(truncate_to_width("ab^Acd", 3), "ab^");
        assert_eq!(truncate_to_width("ab\x01cd", 3), "ab");
        assert_eq!(truncate_to_width("ab\x01cd", 4), "ab\x01");
    }

    #[test]
    fn never_splits_wide_cluster() {
        assert_eq!(truncate_to_width("a界b", 2), "a");
        assert_eq!(truncate_to_width("a界b", 3), "a界");
        assert_eq!(truncate_to_width("e\u{0301}x", 1), "e\u{0301}");
    }
}
