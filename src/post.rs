// Post records as published in the site's posts.json.
// Also holds payload parsing shared by every post source.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FeedError, Result};

/// Post identifier. Regular facts are numbered; a few special posts use slugs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostId {
    Number(i64),
    Text(String),
}

impl PostId {
    /// Numeric value, if this is a numbered post.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            PostId::Number(n) => Some(*n),
            PostId::Text(_) => None,
        }
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostId::Number(n) => write!(f, "{}", n),
            PostId::Text(s) => f.write_str(s),
        }
    }
}

/// A single post. Body fields carry HTML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Post {
    /// Relative link to this post's page.
    pub fn href(&self) -> String {
        format!("post.html?id={}", self.id)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Parse a posts payload. Anything other than a JSON array of posts is malformed.
pub fn parse_posts(body: &str) -> Result<Vec<Post>> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| FeedError::MalformedPayload(e.to_string()))?;

    if !value.is_array() {
        return Err(FeedError::MalformedPayload(
            "expected a JSON array of posts".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|e| FeedError::MalformedPayload(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_posts() {
        let body = r#"[
            {"id": 1, "title": "Fact #1", "text": "<b>one</b>", "notes": "", "tags": ["a"]},
            {"id": "alert", "title": "Alert", "text": "hi", "notes": "n", "tags": [], "image": "img/a.png"}
        ]"#;

        let posts = parse_posts(body).unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].id, PostId::Number(1));
        assert_eq!(posts[1].id, PostId::Text("alert".to_string()));
        assert_eq!(posts[1].image.as_deref(), Some("img/a.png"));
        assert_eq!(posts[0].href(), "post.html?id=1");
    }

    #[test]
    fn test_parse_rejects_non_array() {
        let err = parse_posts(r#"{"posts": []}"#).unwrap_err();
        assert!(matches!(err, FeedError::MalformedPayload(_)));

        let err = parse_posts("not json").unwrap_err();
        assert!(matches!(err, FeedError::MalformedPayload(_)));
    }

    #[test]
    fn test_parse_rejects_bad_element() {
        let err = parse_posts(r#"[{"title": "no id"}]"#).unwrap_err();
        assert!(matches!(err, FeedError::MalformedPayload(_)));
    }

    #[test]
    fn test_parse_requires_title_and_text() {
        let err = parse_posts(r#"[{"id": 1}]"#).unwrap_err();
        assert!(matches!(err, FeedError::MalformedPayload(_)));

        let err = parse_posts(r#"[{"id": 1, "title": "Fact #1"}]"#).unwrap_err();
        assert!(matches!(err, FeedError::MalformedPayload(_)));

        // notes, tags and image may be left out
        let posts = parse_posts(r#"[{"id": 1, "title": "Fact #1", "text": "t"}]"#).unwrap();
        assert!(posts[0].notes.is_empty());
        assert!(posts[0].tags.is_empty());
    }

    #[test]
    fn test_id_keeps_json_type() {
        let post = Post {
            id: PostId::Number(7),
            title: "Fact #7".to_string(),
            text: String::new(),
            notes: String::new(),
            tags: vec![],
            image: None,
        };
        let json = serde_json::to_string(&post).unwrap();
        assert!(json.starts_with(r#"{"id":7,"#));
        assert!(!json.contains("image"));
    }
}
