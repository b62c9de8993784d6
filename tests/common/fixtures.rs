//! Raw record fixtures.

use feedline::models::{RawActor, RawPost, RawSearchResults};
use serde_json::{json, Value};

pub fn raw_post(uri: &str, handle: &str, text: &str) -> RawPost {
    RawPost::new(uri, handle, text)
}

pub fn raw_actor(handle: &str) -> RawActor {
    RawActor {
        did: format!("did:plc:{}", handle.replace('.', "-")),
        handle: handle.to_string(),
        display_name: None,
        avatar: None,
    }
}

pub fn search_results(actors: Vec<RawActor>, posts: Vec<RawPost>) -> RawSearchResults {
    RawSearchResults { actors, posts }
}

/// A `postView` JSON object as the service returns it.
pub fn post_view_json(uri: &str, handle: &str, text: &str) -> Value {
    json!({
        "uri": uri,
        "cid": format!("cid-{}", uri.rsplit('/').next().unwrap_or(uri)),
        "author": {
            "did": format!("did:plc:{}", handle.replace('.', "-")),
            "handle": handle,
            "displayName": handle.split('.').next().unwrap_or(handle),
        },
        "record": {
            "$type": "app.bsky.feed.post",
            "text": text,
            "createdAt": "2024-05-01T12:00:00.000Z",
        },
        "replyCount": 1,
        "repostCount": 2,
        "likeCount": 3,
        "indexedAt": "2024-05-01T12:00:01.000Z",
    })
}

/// A `createSession` response body.
pub fn session_json(handle: &str) -> Value {
    json!({
        "accessJwt": "access-token",
        "refreshJwt": "refresh-token",
        "handle": handle,
        "did": format!("did:plc:{}", handle.replace('.', "-")),
    })
}
