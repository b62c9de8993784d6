use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Image attached to a post, with proxied thumbnail and fullsize URLs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageRef {
    pub thumb_url: String,
    pub fullsize_url: String,
    /// Alt text as authored; empty when none was given
    pub alt_text: String,
}

impl ImageRef {
    /// Alt text for display, falling back to a generic label.
    pub fn alt_label(&self) -> &str {
        if self.alt_text.is_empty() {
            "Post image"
        } else {
            &self.alt_text
        }
    }
}

/// A post as the view needs it.
///
/// Immutable snapshot of remote state at fetch time; a refresh replaces the
/// whole collection rather than patching individual posts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    /// Unique identity, stable across refreshes
    pub uri: String,
    pub author_handle: String,
    pub author_display_name: Option<String>,
    pub text: String,
    /// Authoring time; absent when the record carried none or it was malformed
    pub created_at: Option<DateTime<Utc>>,
    pub reply_count: u32,
    pub repost_count: u32,
    pub like_count: u32,
    pub images: Vec<ImageRef>,
}

impl Post {
    /// Display name when set, otherwise `@handle`.
    pub fn author_label(&self) -> String {
        author_label(self.author_display_name.as_deref(), &self.author_handle)
    }
}

/// Account identity as shown in search results and post headers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Actor {
    /// Unique identity
    pub did: String,
    pub handle: String,
    pub display_name: Option<String>,
}

impl Actor {
    pub fn label(&self) -> String {
        author_label(self.display_name.as_deref(), &self.handle)
    }
}

/// Actors and posts matching a search query, in service order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    pub actors: Vec<Actor>,
    pub posts: Vec<Post>,
}

impl SearchResult {
    pub fn has_posts(&self) -> bool {
        !self.posts.is_empty()
    }
}

fn author_label(display_name: Option<&str>, handle: &str) -> String {
    match display_name {
        Some(name) if !name.trim().is_empty() => name.to_string(),
        _ => format!("@{}", handle),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(display_name: Option<&str>) -> Post {
        Post {
            uri: "at://a/1".to_string(),
            author_handle: "alice.test".to_string(),
            author_display_name: display_name.map(String::from),
            text: String::new(),
            created_at: None,
            reply_count: 0,
            repost_count: 0,
            like_count: 0,
            images: Vec::new(),
        }
    }

    #[test]
    fn test_author_label_prefers_display_name() {
        assert_eq!(post(Some("Alice")).author_label(), "Alice");
        assert_eq!(post(None).author_label(), "@alice.test");
        assert_eq!(post(Some("  ")).author_label(), "@alice.test");
    }

    #[test]
    fn test_actor_label() {
        let actor = Actor {
            did: "did:plc:b".to_string(),
            handle: "bob.test".to_string(),
            display_name: None,
        };
        assert_eq!(actor.label(), "@bob.test");
    }

    #[test]
    fn test_alt_label_fallback() {
        let mut image = ImageRef {
            thumb_url: "t".to_string(),
            fullsize_url: "f".to_string(),
            alt_text: String::new(),
        };
        assert_eq!(image.alt_label(), "Post image");
        image.alt_text = "a cat".to_string();
        assert_eq!(image.alt_label(), "a cat");
    }
}
