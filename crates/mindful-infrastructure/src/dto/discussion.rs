//! Discussion reply DTO.

use mindful_core::discussion::Reply;
use serde::Deserialize;

use super::value::{NamedRef, WireId, display_name, timestamp};

const AUTHOR_FALLBACK: &str = "Autor";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscussionDto {
    #[serde(default)]
    pub id: Option<WireId>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, alias = "creator")]
    pub author: Option<NamedRef>,
}

impl From<DiscussionDto> for Reply {
    fn from(dto: DiscussionDto) -> Self {
        Reply {
            id: dto.id.map(WireId::into_string).unwrap_or_default(),
            author: display_name(dto.author, AUTHOR_FALLBACK),
            content: dto.content.unwrap_or_default(),
            created_at: timestamp(dto.created_at.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reply_conversion() {
        let dto: DiscussionDto = serde_json::from_value(json!({
            "id": 4,
            "content": "Concordo",
            "createdAt": "2026-10-16T10:00:00Z",
            "author": "Bruno"
        }))
        .unwrap();
        let reply = Reply::from(dto);
        assert_eq!(reply.id, "4");
        assert_eq!(reply.author, "Bruno");
        assert!(reply.created_at.is_some());

        let sparse: DiscussionDto = serde_json::from_value(json!({"id": "r1"})).unwrap();
        let reply = Reply::from(sparse);
        assert_eq!(reply.author, "Autor");
        assert_eq!(reply.content, "");

        let nulls: DiscussionDto =
            serde_json::from_value(json!({"id": null, "content": null, "author": null})).unwrap();
        let reply = Reply::from(nulls);
        assert_eq!(reply.id, "");
        assert_eq!(reply.content, "");
        assert_eq!(reply.author, "Autor");
    }
}
