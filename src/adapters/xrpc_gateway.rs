//! Feed gateway over the AT protocol XRPC HTTP API.
//!
//! Logs in lazily with `com.atproto.server.createSession` and caches the
//! session. A 401 from any call drops the cached session so the next call
//! logs in again; the failed call itself is not retried.

use async_trait::async_trait;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::RwLock;

use crate::error::{classify_reqwest_error, classify_status};
use crate::models::{
    RawActorList, RawPost, RawPostList, RawSearchResults, RawStrongRef, RawTimeline,
};
use crate::startup::FeedConfig;
use crate::traits::{FeedGateway, GatewayError};

const POST_COLLECTION: &str = "app.bsky.feed.post";

/// Authenticated session returned by `createSession`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Session {
    access_jwt: String,
    did: String,
}

#[derive(Debug, Serialize)]
struct CreateSessionRequest<'a> {
    identifier: &'a str,
    password: &'a str,
}

/// Production [`FeedGateway`] backed by reqwest.
pub struct XrpcGateway {
    client: reqwest::Client,
    config: FeedConfig,
    session: RwLock<Option<Session>>,
}

impl XrpcGateway {
    /// Create a gateway for `config`. No request is made until first use.
    pub fn new(config: FeedConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| GatewayError::Other(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            config,
            session: RwLock::new(None),
        })
    }

    fn endpoint(&self, method: &str) -> String {
        format!("{}/xrpc/{}", self.config.service_url, method)
    }

    /// Return the cached session, logging in first if there is none.
    async fn session(&self) -> Result<Session, GatewayError> {
        if let Some(session) = self.session.read().await.as_ref() {
            return Ok(session.clone());
        }

        let mut slot = self.session.write().await;
        if let Some(session) = slot.as_ref() {
            return Ok(session.clone());
        }

        let url = self.endpoint("com.atproto.server.createSession");
        tracing::debug!("Creating session for {}", self.config.handle);
        let response = self
            .client
            .post(&url)
            .json(&CreateSessionRequest {
                identifier: &self.config.handle,
                password: &self.config.app_password,
            })
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e, &url))?;
        let session: Session = Self::read_json(response, &url).await?;

        tracing::info!("Logged in as {} ({})", self.config.handle, session.did);
        *slot = Some(session.clone());
        Ok(session)
    }

    async fn forget_session_on_auth_failure(&self, err: &GatewayError) {
        if err.is_auth_failure() {
            tracing::warn!("Session rejected, will log in again on next request");
            *self.session.write().await = None;
        }
    }

    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
        url: &str,
    ) -> Result<T, GatewayError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status.as_u16(), body));
        }
        let body = response
            .bytes()
            .await
            .map_err(|e| classify_reqwest_error(&e, url))?;
        serde_json::from_slice(&body)
            .map_err(|e| GatewayError::InvalidResponse(format!("{}: {}", url, e)))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        method: &str,
        query: &[(&str, String)],
    ) -> Result<T, GatewayError> {
        let session = self.session().await?;
        let url = self.endpoint(method);
        let result = async {
            let response = self
                .client
                .get(&url)
                .bearer_auth(&session.access_jwt)
                .query(query)
                .send()
                .await
                .map_err(|e| classify_reqwest_error(&e, &url))?;
            Self::read_json(response, &url).await
        }
        .await;

        if let Err(err) = &result {
            self.forget_session_on_auth_failure(err).await;
        }
        result
    }

    async fn create_record(&self, record: serde_json::Value) -> Result<(), GatewayError> {
        let session = self.session().await?;
        let url = self.endpoint("com.atproto.repo.createRecord");
        let body = json!({
            "repo": session.did,
            "collection": POST_COLLECTION,
            "record": record,
        });

        let result = async {
            let response = self
                .client
                .post(&url)
                .bearer_auth(&session.access_jwt)
                .json(&body)
                .send()
                .await
                .map_err(|e| classify_reqwest_error(&e, &url))?;
            let _: serde_json::Value = Self::read_json(response, &url).await?;
            Ok(())
        }
        .await;

        if let Err(err) = &result {
            self.forget_session_on_auth_failure(err).await;
        }
        result
    }

    /// Resolve the strong refs a reply to `target_uri` must carry.
    async fn reply_refs(&self, target_uri: &str) -> Result<(RawStrongRef, RawStrongRef), GatewayError> {
        let list: RawPostList = self
            .get("app.bsky.feed.getPosts", &[("uris", target_uri.to_string())])
            .await?;
        let target = list
            .posts
            .into_iter()
            .find(|post| post.uri == target_uri)
            .ok_or_else(|| GatewayError::InvalidResponse(format!("Post not found: {}", target_uri)))?;
        reply_refs_for(&target)
    }
}

/// Parent and root refs for a reply to `target`. Replying inside a thread
/// keeps the thread's root; otherwise the target is the root.
fn reply_refs_for(target: &RawPost) -> Result<(RawStrongRef, RawStrongRef), GatewayError> {
    let cid = target
        .cid
        .clone()
        .ok_or_else(|| GatewayError::InvalidResponse(format!("Post has no cid: {}", target.uri)))?;
    let parent = RawStrongRef {
        uri: target.uri.clone(),
        cid,
    };
    let root = match &target.record.reply {
        Some(reply) => reply.root.clone(),
        None => parent.clone(),
    };
    Ok((parent, root))
}

fn post_record(text: &str) -> serde_json::Value {
    json!({
        "$type": POST_COLLECTION,
        "text": text,
        "createdAt": Utc::now().to_rfc3339(),
    })
}

#[async_trait]
impl FeedGateway for XrpcGateway {
    async fn fetch_timeline(&self) -> Result<Vec<RawPost>, GatewayError> {
        let timeline: RawTimeline = self
            .get(
                "app.bsky.feed.getTimeline",
                &[("limit", self.config.timeline_limit.to_string())],
            )
            .await?;
        Ok(timeline.feed.into_iter().map(|item| item.post).collect())
    }

    async fn create_post(&self, text: &str) -> Result<(), GatewayError> {
        self.create_record(post_record(text)).await
    }

    async fn create_reply(&self, text: &str, target_uri: &str) -> Result<(), GatewayError> {
        let (parent, root) = self.reply_refs(target_uri).await?;
        let mut record = post_record(text);
        record["reply"] = json!({ "root": root, "parent": parent });
        self.create_record(record).await
    }

    async fn search(&self, query: &str) -> Result<RawSearchResults, GatewayError> {
        let limit = self.config.search_limit.to_string();
        let posts_query = [("q", query.to_string()), ("limit", limit.clone())];
        let actors_query = [("q", query.to_string()), ("limit", limit)];

        let (posts, actors): (RawPostList, RawActorList) = tokio::try_join!(
            self.get("app.bsky.feed.searchPosts", &posts_query),
            self.get("app.bsky.actor.searchActors", &actors_query),
        )?;

        Ok(RawSearchResults {
            actors: actors.actors,
            posts: posts.posts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RawReplyRef, RawPostRecord};

    #[test]
    fn test_reply_to_top_level_post_uses_target_as_root() {
        let mut target = RawPost::new("at://p1", "a.test", "hi");
        target.cid = Some("cid1".to_string());

        let (parent, root) = reply_refs_for(&target).unwrap();
        assert_eq!(parent.uri, "at://p1");
        assert_eq!(root, parent);
    }

    #[test]
    fn test_reply_inside_thread_keeps_root() {
        let mut target = RawPost::new("at://p2", "a.test", "hi");
        target.cid = Some("cid2".to_string());
        target.record = RawPostRecord {
            text: "hi".to_string(),
            created_at: None,
            reply: Some(RawReplyRef {
                root: RawStrongRef {
                    uri: "at://p0".to_string(),
                    cid: "cid0".to_string(),
                },
                parent: RawStrongRef {
                    uri: "at://p1".to_string(),
                    cid: "cid1".to_string(),
                },
            }),
        };

        let (parent, root) = reply_refs_for(&target).unwrap();
        assert_eq!(parent.uri, "at://p2");
        assert_eq!(root.uri, "at://p0");
    }

    #[test]
    fn test_reply_target_without_cid_is_invalid() {
        let mut target = RawPost::new("at://p1", "a.test", "hi");
        target.cid = None;
        assert!(matches!(
            reply_refs_for(&target),
            Err(GatewayError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_post_record_shape() {
        let record = post_record("hello");
        assert_eq!(record["$type"], POST_COLLECTION);
        assert_eq!(record["text"], "hello");
        assert!(record["createdAt"].as_str().is_some());
    }
}
