//! Scalar-counted string slicing.
//!
//! Reconstruction arithmetic measures text in Unicode scalar values. These
//! helpers clamp instead of panicking: asking for more scalars than a string
//! holds yields the whole string (or the empty remainder).

/// Number of scalar values in `text`.
#[inline]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// `text` without its last `n` scalars.
pub fn drop_tail(text: &str, n: usize) -> &str {
    if n == 0 {
        return text;
    }
    match text.char_indices().rev().nth(n - 1) {
        Some((idx, _)) => &text[..idx],
        None => "",
    }
}

/// The last `n` scalars of `text`.
pub fn take_tail(text: &str, n: usize) -> &str {
    let head = drop_tail(text, n);
    &text[head.len()..]
}

/// Final scalar of `text`, if any.
#[inline]
pub fn last_char(text: &str) -> Option<char> {
    text.chars().next_back()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drop_tail_clamps() {
        assert_eq!(drop_tail("abcdef", 0), "abcdef");
        assert_eq!(drop_tail("abcdef", 2), "abcd");
        assert_eq!(drop_tail("abcdef", 6), "");
        assert_eq!(drop_tail("abc", 10), "");
    }

    #[test]
    fn take_tail_clamps() {
        assert_eq!(take_tail("abcdef", 0), "");
        assert_eq!(take_tail("abcdef", 2), "ef");
        assert_eq!(take_tail("abc", 10), "abc");
    }

    #[test]
    fn counts_scalars_not_bytes() {
        assert_eq!(char_len("a界\u{85}"), 3);
        assert_eq!(drop_tail("a界\u{85}", 1), "a界");
        assert_eq!(take_tail("a界\u{85}", 2), "界\u{85}");
        assert_eq!(last_char("a界"), Some('界'));
        assert_eq!(last_char(""), None);
    }
}
