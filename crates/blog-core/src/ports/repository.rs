use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{Comment, Post, Tag};
use crate::error::RepoError;
use crate::policy::PublicationPolicy;

/// Generic repository trait shared by every stored entity.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;
}

/// Post queries. Every read goes through a [`PublicationPolicy`].
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Count visible posts, optionally restricted to one tag.
    async fn count_published(
        &self,
        policy: &PublicationPolicy,
        tag_id: Option<Uuid>,
    ) -> Result<u64, RepoError>;

    /// One window of visible posts, newest first.
    async fn list_published(
        &self,
        policy: &PublicationPolicy,
        tag_id: Option<Uuid>,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError>;

    /// Every visible post, newest first.
    async fn all_published(&self, policy: &PublicationPolicy) -> Result<Vec<Post>, RepoError>;

    async fn find_published(
        &self,
        policy: &PublicationPolicy,
        id: Uuid,
    ) -> Result<Option<Post>, RepoError>;

    /// The visible post with `slug` published on the given UTC date.
    async fn find_published_on(
        &self,
        policy: &PublicationPolicy,
        date: NaiveDate,
        slug: &str,
    ) -> Result<Option<Post>, RepoError>;

    /// Full-text search over title and body.
    async fn search_published(
        &self,
        policy: &PublicationPolicy,
        query: &str,
    ) -> Result<Vec<Post>, RepoError>;

    /// Visible posts other than `post_id` carrying any of `tag_ids`,
    /// paired with how many of those tags they carry.
    async fn shared_tag_counts(
        &self,
        policy: &PublicationPolicy,
        post_id: Uuid,
        tag_ids: &[Uuid],
    ) -> Result<Vec<(Post, u64)>, RepoError>;

    /// Visible posts paired with their total number of comments.
    async fn comment_counts(
        &self,
        policy: &PublicationPolicy,
    ) -> Result<Vec<(Post, u64)>, RepoError>;
}

/// Comment storage.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// Active comments of a post, oldest first.
    async fn find_active_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;
}

/// Tag storage and post tagging.
#[async_trait]
pub trait TagRepository: BaseRepository<Tag, Uuid> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError>;

    async fn find_for_post(&self, post_id: Uuid) -> Result<Vec<Tag>, RepoError>;

    /// Attach tags by name, creating the ones that do not exist yet.
    async fn tag_post(&self, post_id: Uuid, names: &[&str]) -> Result<Vec<Tag>, RepoError>;
}
