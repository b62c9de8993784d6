//! Domain and wire types.
//!
//! [`wire`] holds the records as the remote service serializes them; the
//! top-level types are the immutable view models produced from them.

mod post;
pub mod wire;

pub use post::{Actor, ImageRef, Post, SearchResult};
pub use wire::{
    RawActor, RawActorList, RawEmbed, RawFeedItem, RawImage, RawPost, RawPostList,
    RawPostRecord, RawReplyRef, RawSearchResults, RawStrongRef, RawTimeline,
};
