//! Mapping from raw service records to the post model the view renders.
//!
//! Everything here is pure: no network access and no state. Image URLs are
//! rewritten to go through a public image proxy, which strips the query
//! string from the origin URL first.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::models::{
    Actor, ImageRef, Post, RawActor, RawImage, RawPost, RawSearchResults, SearchResult,
};

/// Image proxy endpoint; the origin URL goes into the `url` parameter.
pub const IMAGE_PROXY_URL: &str = "https://images.weserv.nl/";

/// Rewrite an image URL to its proxied form.
///
/// Any query string on the origin URL is dropped before encoding. An empty
/// input yields an empty output so missing thumbnails stay missing.
///
/// ```
/// use feedline::render::proxy_image_url;
///
/// assert_eq!(
///     proxy_image_url("https://cdn.example/img/a.jpg?size=small"),
///     "https://images.weserv.nl/?url=https%3A%2F%2Fcdn.example%2Fimg%2Fa.jpg&default=404"
/// );
/// ```
pub fn proxy_image_url(url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }
    let base = url.split('?').next().unwrap_or(url);
    format!(
        "{}?url={}&default=404",
        IMAGE_PROXY_URL,
        urlencoding::encode(base)
    )
}

/// Parse an RFC 3339 timestamp, returning None when absent or malformed.
fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?;
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn render_image(raw: &RawImage) -> ImageRef {
    ImageRef {
        thumb_url: proxy_image_url(raw.thumb.as_deref().unwrap_or_default()),
        fullsize_url: proxy_image_url(raw.fullsize.as_deref().unwrap_or_default()),
        alt_text: raw.alt.clone().unwrap_or_default(),
    }
}

/// Map one raw post view to a [`Post`].
pub fn render_post(raw: &RawPost) -> Post {
    let images = raw
        .embed
        .as_ref()
        .map(|embed| embed.images().iter().map(render_image).collect())
        .unwrap_or_default();

    Post {
        uri: raw.uri.clone(),
        author_handle: raw.author.handle.clone(),
        author_display_name: raw.author.display_name.clone(),
        text: raw.record.text.clone(),
        created_at: parse_timestamp(raw.record.created_at.as_deref()),
        reply_count: raw.reply_count.unwrap_or(0),
        repost_count: raw.repost_count.unwrap_or(0),
        like_count: raw.like_count.unwrap_or(0),
        images,
    }
}

/// Map a collection of raw posts, keeping service order.
///
/// A uri that appears more than once keeps only its first occurrence so the
/// displayed collection never holds two posts with the same identity.
pub fn render_posts(raws: &[RawPost]) -> Vec<Post> {
    let mut seen = HashSet::with_capacity(raws.len());
    let mut posts = Vec::with_capacity(raws.len());
    for raw in raws {
        if !seen.insert(raw.uri.as_str()) {
            tracing::debug!("Dropping duplicate post {}", raw.uri);
            continue;
        }
        posts.push(render_post(raw));
    }
    posts
}

pub fn render_actor(raw: &RawActor) -> Actor {
    Actor {
        did: raw.did.clone(),
        handle: raw.handle.clone(),
        display_name: raw.display_name.clone(),
    }
}

pub fn render_search(raw: &RawSearchResults) -> SearchResult {
    SearchResult {
        actors: raw.actors.iter().map(render_actor).collect(),
        posts: render_posts(&raw.posts),
    }
}
