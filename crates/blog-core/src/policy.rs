//! Publication policy - which posts are visible to readers.

use chrono::{DateTime, Utc};

use crate::domain::{Post, PostStatus};

/// Restricts posts to published, non-future rows ordered newest first.
///
/// The reference time is captured once so every query made while serving a
/// request agrees on what "now" is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicationPolicy {
    now: DateTime<Utc>,
}

impl PublicationPolicy {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    pub fn current() -> Self {
        Self::at(Utc::now())
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Whether a single post is visible.
    pub fn admits(&self, post: &Post) -> bool {
        post.status == PostStatus::Published && post.publish <= self.now
    }

    /// Keep visible posts, most recently published first.
    pub fn apply<I>(&self, posts: I) -> Vec<Post>
    where
        I: IntoIterator<Item = Post>,
    {
        let mut visible: Vec<Post> = posts.into_iter().filter(|p| self.admits(p)).collect();
        visible.sort_by(|a, b| b.publish.cmp(&a.publish));
        visible
    }
}
