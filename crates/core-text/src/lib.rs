//! Text utilities for unprintable-aware completion.
//!
//! Pure helpers shared by the transform and reconstruction engines:
//! - `range`: compile a code point set into a [`RangeMatcher`].
//! - `codec`: caret/tilde/pipe display forms, byte metrics and the line /
//!   command-line re-encodings used when writing text back.
//! - `width`: display cell widths and fixed-width truncation.
//! - `slice`: scalar-counted slicing that clamps instead of panicking.
//!
//! Nothing here talks to the editor; callers own every round trip.

pub mod codec;
pub mod range;
pub mod slice;
pub mod width;

pub use codec::{byte_len, encode_cmdline, encode_lines, to_display};
pub use range::{CodeRange, RangeMatcher};
pub use slice::{char_len, drop_tail, last_char, take_tail};
pub use width::{display_width, truncate_to_width};
