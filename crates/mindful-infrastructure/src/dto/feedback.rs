//! Feedback response DTO.

use mindful_core::feedback::FeedbackResponse;
use serde::Deserialize;
use serde_json::Value;

use super::value::{count, flag};

/// The four feedback fields of a post payload.
///
/// Feedback endpoints answer with the updated post, but only these fields
/// matter; every other field, `id` included, may be missing or null.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackDto {
    #[serde(default)]
    pub qualidade: Option<Value>,
    #[serde(default)]
    pub nao_gostou: Option<Value>,
    #[serde(default)]
    pub has_liked: Option<Value>,
    #[serde(default)]
    pub has_disliked: Option<Value>,
}

impl From<&FeedbackDto> for FeedbackResponse {
    fn from(dto: &FeedbackDto) -> Self {
        FeedbackResponse {
            like_count: count(dto.qualidade.as_ref()),
            dislike_count: count(dto.nao_gostou.as_ref()),
            viewer_has_liked: flag(dto.has_liked.as_ref()),
            viewer_has_disliked: flag(dto.has_disliked.as_ref()),
        }
    }
}

impl From<FeedbackDto> for FeedbackResponse {
    fn from(dto: FeedbackDto) -> Self {
        FeedbackResponse::from(&dto)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_feedback_fields() {
        let dto: FeedbackDto = serde_json::from_value(json!({
            "qualidade": 4,
            "naoGostou": 0,
            "hasLiked": true,
            "hasDisliked": false
        }))
        .unwrap();
        assert_eq!(
            FeedbackResponse::from(dto),
            FeedbackResponse {
                like_count: Some(4),
                dislike_count: Some(0),
                viewer_has_liked: Some(true),
                viewer_has_disliked: Some(false),
            }
        );
    }

    #[test]
    fn test_null_and_unrelated_fields_are_ignored() {
        let dto: FeedbackDto = serde_json::from_value(json!({
            "id": null,
            "content": null,
            "qualidade": null,
            "hasLiked": true
        }))
        .unwrap();
        assert_eq!(
            FeedbackResponse::from(dto),
            FeedbackResponse {
                viewer_has_liked: Some(true),
                ..Default::default()
            }
        );
    }
}
