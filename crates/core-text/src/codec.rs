//! Character display codec and editor text re-encoding.
//!
//! Display notation follows the editor convention for byte-sized code points:
//!
//! | code point  | display            |
//! |-------------|--------------------|
//! | 0x00..=0x1F | `^` + (cp + 0x40)  |
//! | 0x7F        | `^?`               |
//! | 0x80..=0x9F | `~` + (cp - 0x40)  |
//! | 0xA0..=0xFE | `\|` + (cp - 0x80) |
//! | otherwise   | `~?`               |
//!
//! Every display form is exactly two ASCII characters (two bytes, two cells).

/// Character and byte width of every display form.
pub const DISPLAY_WIDTH: usize = 2;

/// Line-break marker inside reconstructed text (register-to-lines convention).
pub const NUL_MARKER: char = '\0';

/// Render one code point in caret/tilde/pipe notation.
pub fn to_display(cp: u32) -> String {
    let (lead, offset) = match cp {
        0x00..=0x1f => ('^', cp + 0x40),
        0x7f => return "^?".to_owned(),
        0x80..=0x9f => ('~', cp - 0x40),
        0xa0..=0xfe => ('|', cp - 0x80),
        _ => return "~?".to_owned(),
    };
    // offset lies in 0x20..=0x7e for every arm above.
    let tail = char::from_u32(offset).unwrap_or('?');
    let mut out = String::with_capacity(DISPLAY_WIDTH);
    out.push(lead);
    out.push(tail);
    out
}

/// Encoded byte length of `text` (the editor runs with a UTF-8 encoding).
#[inline]
pub fn byte_len(text: &str) -> usize {
    text.len()
}

/// Re-encode text for the command line: newlines become carriage returns,
/// then NUL markers become newlines.
pub fn encode_cmdline(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\n' => '\r',
            NUL_MARKER => '\n',
            other => other,
        })
        .collect()
}

/// Re-encode text as physical buffer lines, breaking at each NUL marker.
/// Always yields at least one (possibly empty) line.
pub fn encode_lines(text: &str) -> Vec<String> {
    text.split(NUL_MARKER).map(str::to_owned).collect()
}
