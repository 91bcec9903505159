//! Turns an advent calendar snapshot into a cached Atom feed.

pub mod atom;
pub mod builder;
pub mod cache;
pub mod error;
pub mod service;

pub use atom::{FeedAuthor, FeedDocument, FeedEntry, ATOM_CONTENT_TYPE};
pub use builder::{build_feed, build_feed_at, discount_percent, normalize_icon_url};
pub use cache::FreshnessCache;
pub use error::RenderError;
pub use service::{CalendarSource, FeedService};
