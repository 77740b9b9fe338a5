//! Code point range compiler.
//!
//! Turns a set of byte-sized code points into the shortest list of contiguous
//! ranges and a single regex character class covering exactly that set.
//!
//! Invariants:
//! - Ranges are ascending, non-overlapping and never adjacent (a gap of at
//!   least one code point separates consecutive ranges).
//! - `is_match(c)` is true iff `c` was in the compiled set.
//! - Only code points below [`GUARD`] participate; the guard value closes a
//!   run that ends at 255 and is never part of the result.

use regex::{NoExpand, Regex};
use std::collections::BTreeSet;
use std::fmt::Write as _;

/// Sentinel one past the last compiled code point.
pub const GUARD: u32 = 256;

/// Inclusive code point range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeRange {
    pub low: u32,
    pub high: u32,
}

impl CodeRange {
    pub fn contains(&self, cp: u32) -> bool {
        self.low <= cp && cp <= self.high
    }
}

/// Compiled matcher for one immutable code point set.
#[derive(Debug, Clone)]
pub struct RangeMatcher {
    ranges: Vec<CodeRange>,
    class: String,
    runs: Option<Regex>,
}

impl RangeMatcher {
    /// Compile `points` (duplicates allowed, order irrelevant) into a matcher.
    pub fn compile<I>(points: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        let set: BTreeSet<u32> = points.into_iter().filter(|&cp| cp < GUARD).collect();

        let mut ranges = Vec::new();
        let mut open: Option<u32> = None;
        for cp in 0..=GUARD {
            let present = cp != GUARD && set.contains(&cp);
            match (open, present) {
                (None, true) => open = Some(cp),
                (Some(low), false) => {
                    ranges.push(CodeRange { low, high: cp - 1 });
                    open = None;
                }
                _ => {}
            }
        }

        let class = render_class(&ranges);
        let runs = if ranges.is_empty() {
            None
        } else {
            // The class is built from escaped scalar values only.
            Some(Regex::new(&format!("{class}+")).expect("generated character class is valid"))
        };
        Self {
            ranges,
            class,
            runs,
        }
    }

    pub fn ranges(&self) -> &[CodeRange] {
        &self.ranges
    }

    /// Regex character class source (empty string for the empty set).
    pub fn pattern(&self) -> &str {
        &self.class
    }

    pub fn is_match(&self, c: char) -> bool {
        let cp = c as u32;
        if cp >= GUARD {
            return false;
        }
        self.ranges
            .binary_search_by(|r| {
                if r.high < cp {
                    std::cmp::Ordering::Less
                } else if r.low > cp {
                    std::cmp::Ordering::Greater
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .is_ok()
    }

    /// True when any scalar of `text` is in the set.
    pub fn contains_match(&self, text: &str) -> bool {
        text.chars().any(|c| self.is_match(c))
    }

    /// Number of matched scalars in `text`.
    pub fn count_matches(&self, text: &str) -> usize {
        text.chars().filter(|&c| self.is_match(c)).count()
    }

    /// Replace every maximal run of matched scalars with one `placeholder`.
    pub fn replace_runs(&self, text: &str, placeholder: char) -> String {
        match &self.runs {
            Some(re) => {
                let mut buf = [0u8; 4];
                let rep: &str = placeholder.encode_utf8(&mut buf);
                re.replace_all(text, NoExpand(rep)).into_owned()
            }
            None => text.to_owned(),
        }
    }

    /// Replace each matched scalar individually with `render(c)`.
    pub fn replace_each<F>(&self, text: &str, mut render: F) -> String
    where
        F: FnMut(char) -> String,
    {
        let mut out = String::with_capacity(text.len() * 2);
        for c in text.chars() {
            if self.is_match(c) {
                out.push_str(&render(c));
            } else {
                out.push(c);
            }
        }
        out
    }

    /// Split on every matched scalar. A text with `n` matches yields `n + 1`
    /// slices; adjacent matches yield empty slices between them.
    pub fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut out = Vec::new();
        let mut start = 0usize;
        for (idx, c) in text.char_indices() {
            if self.is_match(c) {
                out.push(&text[start..idx]);
                start = idx + c.len_utf8();
            }
        }
        out.push(&text[start..]);
        out
    }
}

fn render_class(ranges: &[CodeRange]) -> String {
    if ranges.is_empty() {
        return String::new();
    }
    let mut class = String::from("[");
    for r in ranges {
        if r.low == r.high {
            let _ = write!(class, "\\x{{{:x}}}", r.low);
        } else {
            let _ = write!(class, "\\x{{{:x}}}-\\x{{{:x}}}", r.low, r.high);
        }
    }
    class.push(']');
    class
}
