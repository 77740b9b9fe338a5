//! Completion item shape shared with the completion framework.
//!
//! Field names follow the framework's item JSON so items pass through serde
//! untouched; fields this crate does not know about are kept in `extra`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Popup column a highlight applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightKind {
    #[default]
    Abbr,
    Kind,
    Menu,
}

/// Highlighted byte range inside the popup text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightSpan {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: HighlightKind,
    #[serde(rename = "hl_group")]
    pub group: String,
    /// 1-based byte column.
    pub col: usize,
    /// Width in bytes.
    pub width: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionItem {
    pub word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<HighlightSpan>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub user_data: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CompletionItem {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn framework_json_round_trips_with_unknown_fields() {
        let raw = json!({
            "word": "foo",
            "menu": "[src]",
            "highlights": [
                { "name": "m", "type": "menu", "hl_group": "Comment", "col": 1, "width": 3 }
            ],
            "user_data": { "k": 1 },
            "dup": true,
        });
        let item: CompletionItem = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(item.word, "foo");
        assert_eq!(item.highlights[0].kind, HighlightKind::Menu);
        assert_eq!(item.extra["dup"], true);
        assert_eq!(serde_json::to_value(&item).unwrap(), raw);
    }
}
