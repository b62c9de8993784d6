//! Raw records as the remote service returns them.
//!
//! These mirror the XRPC JSON shapes (`app.bsky.feed.defs#postView` and
//! friends) closely enough for deserialization. Every field the view does not
//! strictly need is optional so a partially populated record still parses.

use serde::{Deserialize, Serialize};

/// Author or search hit as returned by the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RawActor {
    pub did: String,
    pub handle: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Reference to a record by uri and content hash.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawStrongRef {
    pub uri: String,
    pub cid: String,
}

/// Thread position of a reply record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawReplyRef {
    pub root: RawStrongRef,
    pub parent: RawStrongRef,
}

/// The `record` payload of a post view.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RawPostRecord {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub reply: Option<RawReplyRef>,
}

/// Image entry of an images embed view.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawImage {
    #[serde(default)]
    pub thumb: Option<String>,
    #[serde(default)]
    pub fullsize: Option<String>,
    #[serde(default)]
    pub alt: Option<String>,
}

/// Embed view attached to a post.
///
/// Only image embeds are rendered. `recordWithMedia` embeds carry their
/// images one level down under `media`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawEmbed {
    #[serde(rename = "$type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub images: Option<Vec<RawImage>>,
    #[serde(default)]
    pub media: Option<Box<RawEmbed>>,
}

impl RawEmbed {
    /// Images carried by this embed, looking through `media` when needed.
    pub fn images(&self) -> &[RawImage] {
        if let Some(images) = &self.images {
            return images;
        }
        match &self.media {
            Some(media) => media.images(),
            None => &[],
        }
    }
}

/// A post view as returned by timeline, search, and getPosts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RawPost {
    pub uri: String,
    #[serde(default)]
    pub cid: Option<String>,
    pub author: RawActor,
    #[serde(default)]
    pub record: RawPostRecord,
    #[serde(default)]
    pub embed: Option<RawEmbed>,
    #[serde(default)]
    pub reply_count: Option<u32>,
    #[serde(default)]
    pub repost_count: Option<u32>,
    #[serde(default)]
    pub like_count: Option<u32>,
    #[serde(default)]
    pub indexed_at: Option<String>,
}

impl RawPost {
    /// Minimal post with only identity, author handle and text set.
    pub fn new(uri: impl Into<String>, handle: impl Into<String>, text: impl Into<String>) -> Self {
        let handle = handle.into();
        Self {
            uri: uri.into(),
            cid: None,
            author: RawActor {
                did: format!("did:plc:{}", handle.replace('.', "-")),
                handle,
                display_name: None,
                avatar: None,
            },
            record: RawPostRecord {
                text: text.into(),
                created_at: None,
                reply: None,
            },
            embed: None,
            reply_count: None,
            repost_count: None,
            like_count: None,
            indexed_at: None,
        }
    }
}

/// Entry of `app.bsky.feed.getTimeline`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawFeedItem {
    pub post: RawPost,
}

/// Response of `app.bsky.feed.getTimeline`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawTimeline {
    #[serde(default)]
    pub feed: Vec<RawFeedItem>,
    #[serde(default)]
    pub cursor: Option<String>,
}

/// Response of `app.bsky.feed.searchPosts` and `app.bsky.feed.getPosts`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawPostList {
    #[serde(default)]
    pub posts: Vec<RawPost>,
}

/// Response of `app.bsky.actor.searchActors`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawActorList {
    #[serde(default)]
    pub actors: Vec<RawActor>,
}

/// Combined result of a search: matching actors and matching posts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawSearchResults {
    #[serde(default)]
    pub actors: Vec<RawActor>,
    #[serde(default)]
    pub posts: Vec<RawPost>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_view_with_missing_optionals_parses() {
        let json = r#"{
            "uri": "at://did:plc:abc/app.bsky.feed.post/1",
            "author": { "did": "did:plc:abc", "handle": "alice.test" }
        }"#;
        let post: RawPost = serde_json::from_str(json).unwrap();
        assert_eq!(post.author.handle, "alice.test");
        assert_eq!(post.record.text, "");
        assert!(post.embed.is_none());
        assert!(post.like_count.is_none());
    }

    #[test]
    fn test_post_view_camel_case_fields() {
        let json = r#"{
            "uri": "at://x/app.bsky.feed.post/2",
            "cid": "bafy",
            "author": { "did": "did:plc:x", "handle": "x.test", "displayName": "X" },
            "record": { "text": "hello", "createdAt": "2024-05-01T12:00:00.000Z" },
            "replyCount": 3,
            "repostCount": 1,
            "likeCount": 9
        }"#;
        let post: RawPost = serde_json::from_str(json).unwrap();
        assert_eq!(post.author.display_name.as_deref(), Some("X"));
        assert_eq!(post.record.created_at.as_deref(), Some("2024-05-01T12:00:00.000Z"));
        assert_eq!(post.reply_count, Some(3));
        assert_eq!(post.like_count, Some(9));
    }

    #[test]
    fn test_embed_images_direct_and_nested() {
        let direct: RawEmbed = serde_json::from_str(
            r#"{ "$type": "app.bsky.embed.images#view",
                 "images": [{ "thumb": "t", "fullsize": "f", "alt": "a" }] }"#,
        )
        .unwrap();
        assert_eq!(direct.images().len(), 1);

        let nested: RawEmbed = serde_json::from_str(
            r#"{ "$type": "app.bsky.embed.recordWithMedia#view",
                 "media": { "$type": "app.bsky.embed.images#view",
                            "images": [{ "thumb": "t1" }, { "thumb": "t2" }] } }"#,
        )
        .unwrap();
        assert_eq!(nested.images().len(), 2);

        let external: RawEmbed =
            serde_json::from_str(r#"{ "$type": "app.bsky.embed.external#view" }"#).unwrap();
        assert!(external.images().is_empty());
    }

    #[test]
    fn test_timeline_unwraps_feed_items() {
        let json = r#"{ "feed": [
            { "post": { "uri": "u1", "author": { "did": "d", "handle": "h" } } },
            { "post": { "uri": "u2", "author": { "did": "d", "handle": "h" } } }
        ], "cursor": "c" }"#;
        let timeline: RawTimeline = serde_json::from_str(json).unwrap();
        let uris: Vec<_> = timeline.feed.iter().map(|i| i.post.uri.as_str()).collect();
        assert_eq!(uris, vec!["u1", "u2"]);
    }

    #[test]
    fn test_raw_post_new_sets_identity() {
        let post = RawPost::new("at://a/1", "alice.test", "hi");
        assert_eq!(post.uri, "at://a/1");
        assert_eq!(post.author.handle, "alice.test");
        assert_eq!(post.author.did, "did:plc:alice-test");
        assert_eq!(post.record.text, "hi");
    }
}
