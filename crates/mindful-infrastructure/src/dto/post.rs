//! Post DTO.

use mindful_core::feedback::{FeedbackResponse, FeedbackState};
use mindful_core::post::Post;
use serde::Deserialize;
use serde_json::Value;

use super::feedback::FeedbackDto;
use super::value::{NamedRef, WireId, counter, display_name, flag, non_negative, timestamp};

const AUTHOR_FALLBACK: &str = "Autor";
const COMMUNITY_FALLBACK: &str = "Comunidade";

/// A post as the server sends it.
///
/// `qualidade` is the like counter and `naoGostou` the dislike counter.
/// `hasLiked`/`hasDisliked` are computed per viewer from the `idUsuario`
/// header. Every field may be missing or null.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDto {
    #[serde(default)]
    pub id: Option<WireId>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, alias = "creator")]
    pub author: Option<NamedRef>,
    #[serde(default)]
    pub community: Option<NamedRef>,
    #[serde(default)]
    pub edited: Option<Value>,
    #[serde(default)]
    pub edit_history: Option<Value>,
    #[serde(flatten)]
    pub feedback: FeedbackDto,
}

impl PostDto {
    /// Feedback fields exactly as present in the payload.
    pub fn feedback_response(&self) -> FeedbackResponse {
        FeedbackResponse::from(&self.feedback)
    }

    /// Converts to the domain model; absent counters are 0 and absent
    /// flags are false.
    pub fn into_post(self) -> Post {
        let feedback = listing_feedback(&self.feedback_response());
        Post {
            id: self.id.map(WireId::into_string).unwrap_or_default(),
            author: display_name(self.author, AUTHOR_FALLBACK),
            content: self.content.unwrap_or_default(),
            created_at: timestamp(self.created_at.as_deref()),
            community: display_name(self.community, COMMUNITY_FALLBACK),
            edited: flag(self.edited.as_ref()).unwrap_or(false),
            edit_history: counter(self.edit_history.as_ref()),
            feedback,
        }
    }
}

impl From<PostDto> for Post {
    fn from(dto: PostDto) -> Self {
        dto.into_post()
    }
}

/// Feedback state of a listed post; no action arbitrates a double vote,
/// so the like is kept.
fn listing_feedback(response: &FeedbackResponse) -> FeedbackState {
    let viewer_has_liked = response.viewer_has_liked.unwrap_or(false);
    FeedbackState {
        like_count: non_negative(response.like_count),
        dislike_count: non_negative(response.dislike_count),
        viewer_has_liked,
        viewer_has_disliked: !viewer_has_liked && response.viewer_has_disliked.unwrap_or(false),
    }
}
