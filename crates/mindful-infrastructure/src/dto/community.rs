//! Community DTOs.
//!
//! The list endpoint sends full communities; the detail endpoint wraps a
//! brief one together with membership and recent discussions.

use mindful_core::community::{Community, CommunityDetail, CommunityDiscussion};
use serde::Deserialize;
use serde_json::Value;

use super::value::{WireId, counter, flag, timestamp};

const CREATOR_FALLBACK: &str = "Autor";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityDto {
    #[serde(default)]
    pub id: Option<WireId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub members_count: Option<Value>,
    #[serde(default)]
    pub posts_count: Option<Value>,
    #[serde(default)]
    pub discussions_count: Option<Value>,
    #[serde(default)]
    pub tags: Option<Value>,
    #[serde(default)]
    pub featured: Option<Value>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl From<CommunityDto> for Community {
    fn from(dto: CommunityDto) -> Self {
        Community {
            id: dto.id.map(WireId::into_string).unwrap_or_default(),
            name: dto.name.unwrap_or_default(),
            description: dto.description,
            members_count: counter(dto.members_count.as_ref()),
            posts_count: counter(dto.posts_count.as_ref()),
            discussions_count: counter(dto.discussions_count.as_ref()),
            tags: string_list(dto.tags.as_ref()),
            featured: flag(dto.featured.as_ref()).unwrap_or(false),
            created_at: timestamp(dto.created_at.as_deref()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityDiscussionDto {
    #[serde(default)]
    pub id: Option<WireId>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub creator: Option<Value>,
    #[serde(default)]
    pub post: Option<Value>,
}

impl From<CommunityDiscussionDto> for CommunityDiscussion {
    fn from(dto: CommunityDiscussionDto) -> Self {
        let author = dto
            .creator
            .as_ref()
            .and_then(creator_label)
            .unwrap_or_else(|| CREATOR_FALLBACK.to_string());
        CommunityDiscussion {
            id: dto.id.map(WireId::into_string).unwrap_or_default(),
            content: dto.content.unwrap_or_default(),
            created_at: timestamp(dto.created_at.as_deref()),
            author,
            post_id: dto.post.as_ref().and_then(|post| value_id(post.get("id")?)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityDetailDto {
    #[serde(default)]
    pub community: Option<CommunityDto>,
    #[serde(default)]
    pub is_member: Option<Value>,
    #[serde(default)]
    pub members_count: Option<Value>,
    #[serde(default)]
    pub discussions_count: Option<Value>,
    #[serde(default)]
    pub discussions: Option<Vec<CommunityDiscussionDto>>,
}

impl From<CommunityDetailDto> for CommunityDetail {
    fn from(dto: CommunityDetailDto) -> Self {
        CommunityDetail {
            community: dto.community.unwrap_or_default().into(),
            is_member: flag(dto.is_member.as_ref()).unwrap_or(false),
            members_count: counter(dto.members_count.as_ref()),
            discussions_count: counter(dto.discussions_count.as_ref()),
            discussions: dto
                .discussions
                .unwrap_or_default()
                .into_iter()
                .map(CommunityDiscussion::from)
                .collect(),
        }
    }
}

/// E-mail of a creator object, its name, or the value itself when it is a
/// bare string.
fn creator_label(creator: &Value) -> Option<String> {
    match creator {
        Value::String(label) => Some(label.clone()),
        Value::Object(fields) => fields
            .get("email")
            .or_else(|| fields.get("name"))
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

fn value_id(value: &Value) -> Option<String> {
    match value {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
