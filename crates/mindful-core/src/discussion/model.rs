use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A reply attached to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub id: String,
    pub author: String,
    pub content: String,
    /// `None` when the server sent a timestamp that could not be read.
    pub created_at: Option<DateTime<Utc>>,
}

/// Body of a reply submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReply {
    pub content: String,
}

impl NewReply {
    /// Builds a submission from raw compose-box text.
    ///
    /// Returns `None` when nothing but whitespace was typed.
    pub fn from_draft(draft: &str) -> Option<Self> {
        let content = draft.trim();
        if content.is_empty() {
            None
        } else {
            Some(Self {
                content: content.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_draft_trims() {
        assert_eq!(
            NewReply::from_draft("  hello there \n"),
            Some(NewReply {
                content: "hello there".to_string()
            })
        );
        assert_eq!(NewReply::from_draft(" \t\n"), None);
    }
}
