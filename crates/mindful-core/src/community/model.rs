use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A community as listed.
///
/// Counters the server leaves out are zero.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Community {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub members_count: u32,
    #[serde(default)]
    pub posts_count: u32,
    #[serde(default)]
    pub discussions_count: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    pub created_at: Option<DateTime<Utc>>,
}

/// A discussion reply surfaced on a community page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityDiscussion {
    pub id: String,
    pub content: String,
    pub created_at: Option<DateTime<Utc>>,
    /// Creator e-mail, or a placeholder when missing.
    pub author: String,
    /// The post the reply belongs to.
    pub post_id: Option<String>,
}

/// Everything the community page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityDetail {
    pub community: Community,
    pub is_member: bool,
    pub members_count: u32,
    pub discussions_count: u32,
    pub discussions: Vec<CommunityDiscussion>,
}

/// Body of a community creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCommunity {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl NewCommunity {
    /// Builds a creation request from form input.
    ///
    /// Returns `None` for a blank name. A blank description is dropped and
    /// tags are trimmed, with empty ones discarded.
    pub fn from_form(name: &str, description: &str, tags: &[&str]) -> Option<Self> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let description = Some(description.trim())
            .filter(|d| !d.is_empty())
            .map(str::to_string);
        let tags = tags
            .iter()
            .map(|tag| tag.trim())
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect();
        Some(Self {
            name: name.to_string(),
            description,
            tags,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_form_normalizes_input() {
        let community = NewCommunity::from_form(" Leitura ", "  ", &["livros", " ", " poesia "])
            .unwrap();
        assert_eq!(community.name, "Leitura");
        assert_eq!(community.description, None);
        assert_eq!(community.tags, vec!["livros", "poesia"]);

        assert!(NewCommunity::from_form("\t", "desc", &[]).is_none());
    }

    #[test]
    fn test_new_community_body_omits_empty_fields() {
        let bare = NewCommunity::from_form("Leitura", "", &[]).unwrap();
        assert_eq!(serde_json::to_value(&bare).unwrap(), json!({"name": "Leitura"}));

        let full = NewCommunity::from_form("Leitura", "Livros", &["a"]).unwrap();
        assert_eq!(
            serde_json::to_value(&full).unwrap(),
            json!({"name": "Leitura", "description": "Livros", "tags": ["a"]})
        );
    }
}
