#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use core_host::{CursorPos, Host, HostCall, HostError, Reply};
use core_unprintable::{CompletionItem, USER_DATA_KEY};
use serde_json::{Value, json};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::future::Future;

/// In-memory editor. Lines are 1-based; a locked editor rejects every batch
/// that contains a mutation before running any of it.
#[derive(Debug, Default)]
pub struct MockHost {
    state: RefCell<EditorState>,
}

#[derive(Debug, Default)]
pub struct EditorState {
    pub lines: Vec<String>,
    pub cursor: Option<CursorPos>,
    pub cmdline: Option<(String, usize)>,
    pub mode: String,
    pub vchar: String,
    pub locked: bool,
    pub unprintable: Vec<u32>,
    pub fed_callbacks: Vec<String>,
    pub log: Vec<Vec<HostCall>>,
    pub failures: VecDeque<HostError>,
    pub mutation_error: Option<HostError>,
}

impl MockHost {
    pub fn buffer(lines: &[&str]) -> Self {
        let host = Self::default();
        {
            let mut state = host.state.borrow_mut();
            state.lines = lines.iter().map(|l| l.to_string()).collect();
            state.mode = "i".into();
        }
        host
    }

    pub fn cmdline(text: &str) -> Self {
        let host = Self::default();
        {
            let mut state = host.state.borrow_mut();
            state.mode = "c".into();
            state.cmdline = Some((text.to_owned(), text.len() + 1));
        }
        host
    }

    pub fn with_vchar(self, vchar: &str) -> Self {
        self.state.borrow_mut().vchar = vchar.to_owned();
        self
    }

    pub fn with_unprintable(self, points: &[u32]) -> Self {
        self.state.borrow_mut().unprintable = points.to_vec();
        self
    }

    pub fn set_locked(&self, locked: bool) {
        self.state.borrow_mut().locked = locked;
    }

    pub fn fail_next(&self, err: HostError) {
        self.state.borrow_mut().failures.push_back(err);
    }

    /// Reject every batch containing a mutation with `err`.
    pub fn fail_mutations(&self, err: HostError) {
        self.state.borrow_mut().mutation_error = Some(err);
    }

    pub fn lines(&self) -> Vec<String> {
        self.state.borrow().lines.clone()
    }

    pub fn cursor(&self) -> Option<CursorPos> {
        self.state.borrow().cursor
    }

    pub fn cmdline_state(&self) -> Option<(String, usize)> {
        self.state.borrow().cmdline.clone()
    }

    pub fn fed_callbacks(&self) -> Vec<String> {
        self.state.borrow().fed_callbacks.clone()
    }

    pub fn dispatches(&self) -> usize {
        self.state.borrow().log.len()
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.state.borrow().log.iter().flatten().cloned().collect()
    }

    pub fn mutations(&self) -> usize {
        self.calls().iter().filter(|c| c.is_mutation()).count()
    }

    fn run(&self, calls: Vec<HostCall>) -> Result<Vec<Reply>, HostError> {
        let mut state = self.state.borrow_mut();
        state.log.push(calls.clone());
        if let Some(err) = state.failures.pop_front() {
            return Err(err);
        }
        if calls.iter().any(HostCall::is_mutation) {
            if state.locked {
                return Err(HostError::TextLocked);
            }
            if let Some(err) = state.mutation_error.clone() {
                return Err(err);
            }
        }
        let mut replies = Vec::with_capacity(calls.len());
        for call in calls {
            let reply = match call {
                HostCall::Mode => Reply::Text(state.mode.clone()),
                HostCall::PendingChar => Reply::Text(state.vchar.clone()),
                HostCall::GetLine { lnum } => Reply::Text(
                    lnum.checked_sub(1)
                        .and_then(|i| state.lines.get(i))
                        .cloned()
                        .unwrap_or_default(),
                ),
                HostCall::Truncate { width, text } => {
                    Reply::Text(core_text::truncate_to_width(&text, width))
                }
                HostCall::UnprintableCodePoints => Reply::CodePoints(state.unprintable.clone()),
                HostCall::SetLine { lnum, text } => {
                    let idx = lnum - 1;
                    if idx == state.lines.len() {
                        state.lines.push(text);
                    } else {
                        state.lines[idx] = text;
                    }
                    Reply::Unit
                }
                HostCall::Append { lnum, lines } => {
                    let at = lnum.min(state.lines.len());
                    let below = state.lines.split_off(at);
                    state.lines.extend(lines);
                    state.lines.extend(below);
                    Reply::Unit
                }
                HostCall::SetCursor { lnum, col } => {
                    state.cursor = Some(CursorPos { lnum, col });
                    Reply::Unit
                }
                HostCall::SetCmdline { text, pos } => {
                    state.cmdline = Some((text, pos));
                    Reply::Unit
                }
                HostCall::InvokeCallback { id } => {
                    state.fed_callbacks.push(id);
                    Reply::Unit
                }
            };
            replies.push(reply);
        }
        Ok(replies)
    }
}

impl Host for MockHost {
    fn dispatch(
        &self,
        calls: Vec<HostCall>,
    ) -> impl Future<Output = Result<Vec<Reply>, HostError>> {
        std::future::ready(self.run(calls))
    }
}

pub fn items(words: &[&str]) -> Vec<CompletionItem> {
    words.iter().map(|w| CompletionItem::new(*w)).collect()
}

pub fn user_data(orig_word: &str, orig_next_input: &str) -> Value {
    json!({
        USER_DATA_KEY: { "origWord": orig_word, "origNextInput": orig_next_input }
    })
}
