//! Accept-time reconstruction.
//!
//! When the user accepts a converted item the buffer (or command line) holds
//! the placeholder form of the word. Given only the committed line content,
//! the text after the cursor and the character just typed, this module works
//! out what the user typed since insertion and rewrites the text with the
//! original unprintable code points restored.
//!
//! Terms (all lengths in Unicode scalars):
//! - `tail`: placeholder word + original next input, i.e. what sat in the
//!   editor right before this keystroke.
//! - `head`: `tail` without the trailing `next_input`-length suffix (all of
//!   `tail` when `next_input` is empty).
//!
//! Steps:
//! 1. If `tail` is longer than `input + next_input` the insertion already
//!    spilled onto the previous line (the user broke the line). The previous
//!    line is joined in front of `input` with a NUL line-break marker, the
//!    edit starts one line up, and the last rewritten line overwrites the
//!    existing line instead of being appended.
//! 2. Recover the prefix before the word and the user's edit (see
//!    [`recover_edit`]), then rebuild `prefix + word + next` with the
//!    original text and split it again at the `next_input` boundary.
//! 3. Re-encode for the target (command line or physical buffer lines) and
//!    emit an [`EditPlan`] whose cursor lands right after the user's edit.
//!
//! Applying the plan may hit the editor's text lock while completion is
//! still resolving. The plan is then parked under a unique callback id and
//! replayed from a simulated keystroke once the lock clears.

use crate::error::AcceptError;
use crate::payload::RoundTripPayload;
use core_config::UnprintableConfig;
use core_host::{
    Batch, BufferEdit, CallbackRegistrar, CursorPos, EditPlan, EditorMode, Host,
};
use core_text::codec::NUL_MARKER;
use core_text::{
    RangeMatcher, byte_len, char_len, drop_tail, encode_cmdline, encode_lines, last_char,
    take_tail,
};
use tracing::{debug, info, warn};

/// Line state reported by the completion framework at acceptance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptContext {
    /// Line text up to the cursor.
    pub input: String,
    /// Line text after the cursor.
    pub next_input: String,
    /// 1-based line of the cursor.
    pub line_nr: usize,
}

impl AcceptContext {
    pub fn new(input: impl Into<String>, next_input: impl Into<String>, line_nr: usize) -> Self {
        Self {
            input: input.into(),
            next_input: next_input.into(),
            line_nr,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcceptOutcome {
    /// The word had nothing to restore.
    Unchanged,
    /// The rewrite landed.
    Applied,
    /// The editor held the text lock; the rewrite runs when `callback_id`
    /// fires.
    Deferred { callback_id: String },
}

/// Prefix before the inserted word and the characters the user typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecoveredEdit {
    pub prefix: String,
    pub user_input: String,
}

fn head_of<'t>(tail: &'t str, next_input: &str) -> &'t str {
    if next_input.is_empty() {
        tail
    } else {
        drop_tail(tail, char_len(next_input))
    }
}

/// Separate the text before the inserted word from the user's edit.
///
/// While placeholder text still precedes the trailing context, `input` is
/// expected to end with `head`; when it does not, its final character is the
/// user's keystroke that already landed and is carried into the edit. Once
/// the trailing context covers the whole tail, the prefix is whatever
/// precedes a tail-length suffix of the full line. `vchar` always closes the
/// edit.
pub(crate) fn recover_edit(
    input: &str,
    next_input: &str,
    tail: &str,
    vchar: &str,
) -> RecoveredEdit {
    let tail_len = char_len(tail);
    let (prefix, mut user_input) = if tail_len > char_len(next_input) {
        let head = head_of(tail, next_input);
        let head_len = char_len(head);
        if input.ends_with(head) {
            (drop_tail(input, head_len).to_owned(), String::new())
        } else {
            let absorbed = last_char(input).map(String::from).unwrap_or_default();
            (drop_tail(input, head_len + 1).to_owned(), absorbed)
        }
    } else {
        let line = format!("{input}{next_input}");
        (drop_tail(&line, tail_len).to_owned(), String::new())
    };
    user_input.push_str(vchar);
    RecoveredEdit { prefix, user_input }
}

/// Everything needed to build the rewrite, after multi-line merging.
#[derive(Debug)]
pub(crate) struct Splice<'a> {
    pub payload: &'a RoundTripPayload,
    pub tail: &'a str,
    pub input: &'a str,
    pub next_input: &'a str,
    pub line_nr: usize,
    pub overwrite_last: bool,
    pub vchar: &'a str,
}

impl Splice<'_> {
    pub(crate) fn plan(&self, mode: EditorMode) -> EditPlan {
        let RecoveredEdit { prefix, user_input } =
            recover_edit(self.input, self.next_input, self.tail, self.vchar);
        let full = format!(
            "{prefix}{}{}",
            self.payload.orig_word, self.payload.orig_next_input
        );
        let (line_head, line_tail) = if self.next_input.is_empty() {
            (full.as_str(), "")
        } else {
            let n = char_len(self.next_input);
            (drop_tail(&full, n), take_tail(&full, n))
        };
        let head = format!("{line_head}{user_input}");

        match mode {
            EditorMode::CommandLine => {
                let head = encode_cmdline(&head);
                let pos = byte_len(&head) + 1;
                let text = head + &encode_cmdline(line_tail);
                EditPlan::Cmdline { text, pos }
            }
            EditorMode::Buffer => {
                let mut lines = encode_lines(&format!("{head}{line_tail}"));
                let head_lines = encode_lines(&head);
                let cursor = CursorPos {
                    lnum: self.line_nr + head_lines.len().saturating_sub(1),
                    col: head_lines.last().map_or(0, |l| byte_len(l.as_str())) + 1,
                };
                let last = if self.overwrite_last && lines.len() > 1 {
                    lines.pop()
                } else {
                    None
                };
                let mut lines = lines.into_iter();
                let first = lines.next().unwrap_or_default();
                EditPlan::Buffer(BufferEdit {
                    lnum: self.line_nr,
                    first,
                    middle: lines.collect(),
                    last,
                    cursor,
                })
            }
        }
    }
}

/// Join the previous buffer line in front of `input` across a line break.
pub(crate) fn merge_previous_line(prev: &str, input: &str) -> String {
    let mut merged = String::with_capacity(prev.len() + 1 + input.len());
    merged.push_str(prev);
    merged.push(NUL_MARKER);
    merged.push_str(input);
    merged
}

/// Rebuild the accepted item's text in the editor.
pub(crate) async fn reconstruct<H, R>(
    host: &H,
    registrar: &mut R,
    matcher: &RangeMatcher,
    config: &UnprintableConfig,
    payload: &RoundTripPayload,
    ctx: &AcceptContext,
    attempt: u64,
) -> Result<AcceptOutcome, AcceptError>
where
    H: Host,
    R: CallbackRegistrar + ?Sized,
{
    if !matcher.contains_match(&payload.orig_word) {
        debug!(target: "unprintable.accept", attempt, "nothing_to_restore");
        return Ok(AcceptOutcome::Unchanged);
    }

    let word = matcher.replace_runs(&payload.orig_word, config.placeholder());
    let tail = format!("{word}{}", payload.orig_next_input);
    let spans_previous_line = ctx.line_nr > 1
        && char_len(&tail) > char_len(&ctx.input) + char_len(&ctx.next_input);

    let mut batch = Batch::new();
    let mode = batch.mode();
    let vchar = batch.pending_char();
    let prev = spans_previous_line.then(|| batch.line(ctx.line_nr - 1));
    let mut replies = batch.flush(host).await?;
    let mode = replies.take(mode)?;
    let vchar = replies.take(vchar)?;
    let (input, line_nr) = match prev {
        Some(slot) => (
            merge_previous_line(&replies.take(slot)?, &ctx.input),
            ctx.line_nr - 1,
        ),
        None => (ctx.input.clone(), ctx.line_nr),
    };

    let plan = Splice {
        payload,
        tail: &tail,
        input: &input,
        next_input: &ctx.next_input,
        line_nr,
        overwrite_last: spans_previous_line,
        vchar: &vchar,
    }
    .plan(mode);
    debug!(
        target: "unprintable.accept",
        attempt,
        ?mode,
        line_nr,
        spans_previous_line,
        "plan_built"
    );

    match plan.apply(host).await {
        Ok(()) => Ok(AcceptOutcome::Applied),
        Err(err) if err.is_text_locked() => {
            let callback_id = format!("{}:{attempt}", config.callback_id());
            registrar.register_once(callback_id.clone(), plan);
            let mut batch = Batch::new();
            batch.invoke_callback(callback_id.as_str());
            batch.flush(host).await?;
            info!(
                target: "unprintable.accept",
                attempt,
                callback_id = callback_id.as_str(),
                "rewrite_deferred_text_locked"
            );
            Ok(AcceptOutcome::Deferred { callback_id })
        }
        Err(err) => {
            warn!(target: "unprintable.accept", attempt, error = %err, "rewrite_failed");
            Err(err.into())
        }
    }
}
