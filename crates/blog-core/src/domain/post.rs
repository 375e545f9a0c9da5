use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Publication state of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

/// Post entity - a blog article written by an author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub publish: DateTime<Utc>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub status: PostStatus,
}

impl Post {
    /// Create a new draft post; `publish` defaults to the creation time.
    pub fn new(
        author_id: Uuid,
        title: impl Into<String>,
        slug: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            title: title.into(),
            slug: slug.into(),
            body: body.into(),
            publish: now,
            created: now,
            updated: now,
            status: PostStatus::Draft,
        }
    }

    /// Mark the post as published at the given moment.
    pub fn published_at(mut self, publish: DateTime<Utc>) -> Self {
        self.status = PostStatus::Published;
        self.publish = publish;
        self
    }

    /// UTC calendar date the post is published under.
    pub fn publish_date(&self) -> NaiveDate {
        self.publish.date_naive()
    }

    /// Canonical path of the post detail page.
    pub fn absolute_path(&self) -> String {
        format!(
            "/blog/{}/{}/{}/{}",
            self.publish.year(),
            self.publish.month(),
            self.publish.day(),
            self.slug
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn new_post_is_a_draft_published_at_creation() {
        let post = Post::new(Uuid::new_v4(), "Hello", "hello", "body");
        assert_eq!(post.status, PostStatus::Draft);
        assert_eq!(post.publish, post.created);
    }

    #[test]
    fn absolute_path_uses_unpadded_date_parts() {
        let publish = Utc.with_ymd_and_hms(2024, 3, 7, 12, 0, 0).unwrap();
        let post = Post::new(Uuid::new_v4(), "Hello", "hello-world", "body").published_at(publish);
        assert_eq!(post.absolute_path(), "/blog/2024/3/7/hello-world");
        assert_eq!(post.publish_date(), NaiveDate::from_ymd_opt(2024, 3, 7).unwrap());
    }
}
