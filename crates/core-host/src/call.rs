//! Request / reply model for the editor bridge.

use crate::HostError;

/// One editor request. Reads return data, mutations return [`Reply::Unit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    /// Current editor mode string (`mode()`).
    Mode,
    /// Character typed by the user that triggered the current event (`v:char`).
    PendingChar,
    /// Full text of buffer line `lnum` (1-based).
    GetLine { lnum: usize },
    /// `printf('%.{width}S', text)`: truncate to `width` display cells.
    Truncate { width: usize, text: String },
    /// Code points in `0..256` that the active locale cannot print.
    UnprintableCodePoints,
    SetLine { lnum: usize, text: String },
    /// Append `lines` below line `lnum`.
    Append { lnum: usize, lines: Vec<String> },
    /// Move the cursor to `lnum` / byte column `col` (both 1-based).
    SetCursor { lnum: usize, col: usize },
    /// Replace the command line; `pos` is the 1-based byte cursor position.
    SetCmdline { text: String, pos: usize },
    /// Queue a simulated keystroke that runs callback `id` once the editor
    /// is idle again.
    InvokeCallback { id: String },
}

impl HostCall {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mode => "mode",
            Self::PendingChar => "v:char",
            Self::GetLine { .. } => "getline",
            Self::Truncate { .. } => "printf",
            Self::UnprintableCodePoints => "unprintable_code_points",
            Self::SetLine { .. } => "setline",
            Self::Append { .. } => "append",
            Self::SetCursor { .. } => "cursor",
            Self::SetCmdline { .. } => "setcmdline",
            Self::InvokeCallback { .. } => "feedkeys",
        }
    }

    /// True for calls that change buffer, cursor or command-line state.
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::SetLine { .. }
                | Self::Append { .. }
                | Self::SetCursor { .. }
                | Self::SetCmdline { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Unit,
    Text(String),
    CodePoints(Vec<u32>),
}

/// Typed extraction of a [`Reply`].
pub trait FromReply: Sized {
    fn from_reply(call: &'static str, reply: Reply) -> Result<Self, HostError>;
}

impl FromReply for String {
    fn from_reply(call: &'static str, reply: Reply) -> Result<Self, HostError> {
        match reply {
            Reply::Text(text) => Ok(text),
            _ => Err(HostError::UnexpectedReply {
                call,
                expected: "text",
            }),
        }
    }
}

impl FromReply for Vec<u32> {
    fn from_reply(call: &'static str, reply: Reply) -> Result<Self, HostError> {
        match reply {
            Reply::CodePoints(points) => Ok(points),
            _ => Err(HostError::UnexpectedReply {
                call,
                expected: "code points",
            }),
        }
    }
}

/// Editing context the reconstruction engine distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    /// Typing on the command line (`mode()` starts with `c`).
    CommandLine,
    /// Any buffer editing mode.
    Buffer,
}

impl EditorMode {
    pub fn from_mode_str(mode: &str) -> Self {
        if mode.starts_with('c') {
            Self::CommandLine
        } else {
            Self::Buffer
        }
    }
}

impl FromReply for EditorMode {
    fn from_reply(call: &'static str, reply: Reply) -> Result<Self, HostError> {
        String::from_reply(call, reply).map(|mode| Self::from_mode_str(&mode))
    }
}
