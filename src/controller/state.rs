//! View state owned by the controller and the snapshot it publishes.

use serde::Serialize;

use crate::models::{Actor, Post, SearchResult};

/// Where the displayed posts come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ViewMode {
    /// Home timeline, kept fresh by refreshes
    #[default]
    Feed,
    /// Results of the last successful search
    Search,
}

/// In-progress reply bound to one target post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplyDraft {
    pub target_post_uri: String,
    /// Handle of the target's author, for the "Replying to" header
    pub target_handle: String,
    pub text: String,
}

/// Free text for a new top-level post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComposerDraft {
    pub text: String,
}

/// An active search: the query that produced it and its results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchView {
    pub query: String,
    pub results: SearchResult,
}

/// Operation a status message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Operation {
    Refresh,
    Search,
    Post,
    Reply,
    Clipboard,
    OpenImage,
}

/// Inline message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    pub origin: Operation,
    pub text: String,
    pub is_error: bool,
}

impl StatusMessage {
    pub fn error(origin: Operation, text: impl Into<String>) -> Self {
        Self {
            origin,
            text: text.into(),
            is_error: true,
        }
    }

    pub fn info(origin: Operation, text: impl Into<String>) -> Self {
        Self {
            origin,
            text: text.into(),
            is_error: false,
        }
    }
}

/// Why a submission did not reach the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredReason {
    /// Blank or whitespace-only text
    EmptyInput,
    /// Reply submitted with no reply composer open
    NoReplyTarget,
    /// Controller already torn down
    TornDown,
}

/// Outcome of a user submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Request handed to the gateway
    Submitted,
    /// Nothing was sent
    Ignored(IgnoredReason),
}

impl Submission {
    pub fn is_submitted(&self) -> bool {
        matches!(self, Submission::Submitted)
    }
}

/// Counts of requests that have been issued but not yet answered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PendingRequests {
    pub refreshes: usize,
    pub searches: usize,
    pub posts: usize,
    pub replies: usize,
}

impl PendingRequests {
    pub fn total(&self) -> usize {
        self.refreshes + self.searches + self.posts + self.replies
    }
}

/// Mutable view state. Only the controller writes it.
#[derive(Debug, Clone, Default)]
pub(crate) struct FeedState {
    pub timeline: Vec<Post>,
    pub search: Option<SearchView>,
    pub reply: Option<ReplyDraft>,
    pub composer: ComposerDraft,
    pub status: Option<StatusMessage>,
    /// True until the first timeline response lands
    pub initial_load: bool,
}

impl FeedState {
    /// Search mode holds exactly when a search result is present.
    pub fn mode(&self) -> ViewMode {
        if self.search.is_some() {
            ViewMode::Search
        } else {
            ViewMode::Feed
        }
    }

    /// Drop the status message if it belongs to `origin`.
    pub fn clear_status_from(&mut self, origin: Operation) {
        if self.status.as_ref().map(|s| s.origin) == Some(origin) {
            self.status = None;
        }
    }
}

/// Complete view state at one point in time, handed to presentation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeedSnapshot {
    pub mode: ViewMode,
    /// Posts to display: the timeline in Feed mode, search hits in Search mode
    pub posts: Vec<Post>,
    /// Matching actors in Search mode; empty in Feed mode
    pub actors: Vec<Actor>,
    pub search_query: Option<String>,
    pub reply: Option<ReplyDraft>,
    pub composer: ComposerDraft,
    pub status: Option<StatusMessage>,
    /// Initial timeline load or a search is outstanding
    pub loading: bool,
    pub pending: PendingRequests,
}

impl FeedSnapshot {
    pub(crate) fn from_state(state: &FeedState, pending: PendingRequests) -> Self {
        let (posts, actors, search_query) = match &state.search {
            Some(view) => (
                view.results.posts.clone(),
                view.results.actors.clone(),
                Some(view.query.clone()),
            ),
            None => (state.timeline.clone(), Vec::new(), None),
        };

        Self {
            mode: state.mode(),
            posts,
            actors,
            search_query,
            reply: state.reply.clone(),
            composer: state.composer.clone(),
            status: state.status.clone(),
            loading: state.initial_load || pending.searches > 0,
            pending,
        }
    }

    /// Search returned no posts (the "no results" state).
    pub fn is_empty_search(&self) -> bool {
        self.mode == ViewMode::Search && self.posts.is_empty()
    }

    /// Whether the reply composer is open on `uri`.
    pub fn is_replying_to(&self, uri: &str) -> bool {
        self.reply
            .as_ref()
            .map(|draft| draft.target_post_uri == uri)
            .unwrap_or(false)
    }
}
