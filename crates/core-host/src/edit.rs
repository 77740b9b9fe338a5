//! Buffer / command-line mutations as data.
//!
//! An `EditPlan` is built once by the reconstruction engine and can be applied
//! any number of times: immediately, or later from a retry callback. Applying
//! sends the whole plan as one batch.

use crate::{Batch, Host, HostError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPos {
    /// 1-based line number.
    pub lnum: usize,
    /// 1-based byte column.
    pub col: usize,
}

/// Rewrite of one or more buffer lines starting at `lnum`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferEdit {
    pub lnum: usize,
    /// Overwrites line `lnum`.
    pub first: String,
    /// Appended after line `lnum`.
    pub middle: Vec<String>,
    /// Overwrites the line right after the appended ones.
    pub last: Option<String>,
    pub cursor: CursorPos,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditPlan {
    Buffer(BufferEdit),
    Cmdline { text: String, pos: usize },
}

impl EditPlan {
    pub fn to_batch(&self) -> Batch {
        let mut batch = Batch::new();
        match self {
            Self::Buffer(edit) => {
                batch.set_line(edit.lnum, edit.first.clone());
                if !edit.middle.is_empty() {
                    batch.append(edit.lnum, edit.middle.clone());
                }
                if let Some(last) = &edit.last {
                    batch.set_line(edit.lnum + edit.middle.len() + 1, last.clone());
                }
                batch.set_cursor(edit.cursor.lnum, edit.cursor.col);
            }
            Self::Cmdline { text, pos } => batch.set_cmdline(text.clone(), *pos),
        }
        batch
    }

    pub async fn apply<H: Host>(&self, host: &H) -> Result<(), HostError> {
        self.to_batch().flush(host).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HostCall;
    use crate::test_host::RecordingHost;

    fn edit(middle: &[&str], last: Option<&str>) -> EditPlan {
        EditPlan::Buffer(BufferEdit {
            lnum: 4,
            first: "first".into(),
            middle: middle.iter().map(|s| s.to_string()).collect(),
            last: last.map(str::to_owned),
            cursor: CursorPos { lnum: 5, col: 3 },
        })
    }

    #[test]
    fn single_line_plan_is_setline_then_cursor() {
        let batch = edit(&[], None).to_batch();
        assert_eq!(
            batch.calls(),
            &[
                HostCall::SetLine { lnum: 4, text: "first".into() },
                HostCall::SetCursor { lnum: 5, col: 3 },
            ]
        );
    }

    #[test]
    fn last_line_lands_after_appended_middle() {
        let batch = edit(&["m1", "m2"], Some("last")).to_batch();
        assert_eq!(
            batch.calls(),
            &[
                HostCall::SetLine { lnum: 4, text: "first".into() },
                HostCall::Append { lnum: 4, lines: vec!["m1".into(), "m2".into()] },
                HostCall::SetLine { lnum: 7, text: "last".into() },
                HostCall::SetCursor { lnum: 5, col: 3 },
            ]
        );
    }

    #[test]
    fn cmdline_plan_is_one_call() {
        let plan = EditPlan::Cmdline { text: "echo".into(), pos: 5 };
        assert_eq!(
            plan.to_batch().calls(),
            &[HostCall::SetCmdline { text: "echo".into(), pos: 5 }]
        );
    }

    #[tokio::test]
    async fn apply_uses_a_single_dispatch() {
        let host = RecordingHost::unit();
        edit(&["m"], Some("l")).apply(&host).await.unwrap();
        assert_eq!(host.dispatches(), 1);
        assert_eq!(host.batches()[0].len(), 4);
    }
}
