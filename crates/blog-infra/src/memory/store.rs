//! In-memory content store - used when no database is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::PublicationPolicy;
use blog_core::domain::{Comment, Post, Tag};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, CommentRepository, PostRepository, TagRepository};

#[derive(Default)]
struct Tables {
    posts: HashMap<Uuid, Post>,
    comments: Vec<Comment>,
    tags: HashMap<Uuid, Tag>,
    post_tags: Vec<(Uuid, Uuid)>,
}

impl Tables {
    fn visible(&self, policy: &PublicationPolicy) -> Vec<Post> {
        policy.apply(self.posts.values().cloned())
    }

    fn tag_ids_of(&self, post_id: Uuid) -> impl Iterator<Item = Uuid> + '_ {
        self.post_tags
            .iter()
            .filter(move |(p, _)| *p == post_id)
            .map(|(_, t)| *t)
    }

    fn is_tagged(&self, post_id: Uuid, tag_id: Uuid) -> bool {
        self.post_tags.contains(&(post_id, tag_id))
    }
}

/// Content store holding every table in process memory.
///
/// Implements all repository ports so one instance can back the whole
/// application. Data is lost on process restart.
pub struct InMemoryContentStore {
    tables: RwLock<Tables>,
}

impl InMemoryContentStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }

    /// Every comment on a post, active or awaiting moderation.
    pub async fn comments_for(&self, post_id: Uuid) -> Vec<Comment> {
        let tables = self.tables.read().await;
        tables
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect()
    }
}

impl Default for InMemoryContentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryContentStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.tables.read().await.posts.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;

        let clash = tables.posts.values().any(|existing| {
            existing.slug == post.slug && existing.publish_date() == post.publish_date()
        });
        if clash || tables.posts.contains_key(&post.id) {
            return Err(RepoError::Constraint(format!(
                "post slug '{}' already used on {}",
                post.slug,
                post.publish_date()
            )));
        }

        tables.posts.insert(post.id, post.clone());
        Ok(post)
    }
}

#[async_trait]
impl BaseRepository<Comment, Uuid> for InMemoryContentStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.comments.iter().find(|c| c.id == id).cloned())
    }

    async fn insert(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.posts.contains_key(&comment.post_id) {
            return Err(RepoError::Constraint(format!(
                "post {} does not exist",
                comment.post_id
            )));
        }

        tables.comments.push(comment.clone());
        Ok(comment)
    }
}

#[async_trait]
impl BaseRepository<Tag, Uuid> for InMemoryContentStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Tag>, RepoError> {
        Ok(self.tables.read().await.tags.get(&id).cloned())
    }

    async fn insert(&self, tag: Tag) -> Result<Tag, RepoError> {
        let mut tables = self.tables.write().await;
        if tables.tags.values().any(|t| t.slug == tag.slug) {
            return Err(RepoError::Constraint(format!("tag slug '{}' exists", tag.slug)));
        }

        tables.tags.insert(tag.id, tag.clone());
        Ok(tag)
    }
}

#[async_trait]
impl PostRepository for InMemoryContentStore {
    async fn count_published(
        &self,
        policy: &PublicationPolicy,
        tag_id: Option<Uuid>,
    ) -> Result<u64, RepoError> {
        let tables = self.tables.read().await;
        let count = tables
            .visible(policy)
            .iter()
            .filter(|p| tag_id.is_none_or(|t| tables.is_tagged(p.id, t)))
            .count();
        Ok(count as u64)
    }

    async fn list_published(
        &self,
        policy: &PublicationPolicy,
        tag_id: Option<Uuid>,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .visible(policy)
            .into_iter()
            .filter(|p| tag_id.is_none_or(|t| tables.is_tagged(p.id, t)))
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn all_published(&self, policy: &PublicationPolicy) -> Result<Vec<Post>, RepoError> {
        Ok(self.tables.read().await.visible(policy))
    }

    async fn find_published(
        &self,
        policy: &PublicationPolicy,
        id: Uuid,
    ) -> Result<Option<Post>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .posts
            .get(&id)
            .filter(|p| policy.admits(p))
            .cloned())
    }

    async fn find_published_on(
        &self,
        policy: &PublicationPolicy,
        date: NaiveDate,
        slug: &str,
    ) -> Result<Option<Post>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .visible(policy)
            .into_iter()
            .find(|p| p.slug == slug && p.publish_date() == date))
    }

    async fn search_published(
        &self,
        policy: &PublicationPolicy,
        query: &str,
    ) -> Result<Vec<Post>, RepoError> {
        let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let tables = self.tables.read().await;
        Ok(tables
            .visible(policy)
            .into_iter()
            .filter(|p| {
                let haystack = format!("{} {}", p.title, p.body).to_lowercase();
                terms.iter().all(|term| haystack.contains(term.as_str()))
            })
            .collect())
    }

    async fn shared_tag_counts(
        &self,
        policy: &PublicationPolicy,
        post_id: Uuid,
        tag_ids: &[Uuid],
    ) -> Result<Vec<(Post, u64)>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .visible(policy)
            .into_iter()
            .filter(|p| p.id != post_id)
            .filter_map(|p| {
                let shared = tables.tag_ids_of(p.id).filter(|t| tag_ids.contains(t)).count();
                (shared > 0).then_some((p, shared as u64))
            })
            .collect())
    }

    async fn comment_counts(
        &self,
        policy: &PublicationPolicy,
    ) -> Result<Vec<(Post, u64)>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .visible(policy)
            .into_iter()
            .map(|p| {
                let total = tables.comments.iter().filter(|c| c.post_id == p.id).count();
                (p, total as u64)
            })
            .collect())
    }
}

#[async_trait]
impl CommentRepository for InMemoryContentStore {
    async fn find_active_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let tables = self.tables.read().await;
        let mut comments: Vec<Comment> = tables
            .comments
            .iter()
            .filter(|c| c.post_id == post_id && c.active)
            .cloned()
            .collect();
        comments.sort_by_key(|c| c.created);
        Ok(comments)
    }
}

#[async_trait]
impl TagRepository for InMemoryContentStore {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.tags.values().find(|t| t.slug == slug).cloned())
    }

    async fn find_for_post(&self, post_id: Uuid) -> Result<Vec<Tag>, RepoError> {
        let tables = self.tables.read().await;
        let mut tags: Vec<Tag> = tables
            .tag_ids_of(post_id)
            .filter_map(|id| tables.tags.get(&id).cloned())
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    async fn tag_post(&self, post_id: Uuid, names: &[&str]) -> Result<Vec<Tag>, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.posts.contains_key(&post_id) {
            return Err(RepoError::Constraint(format!("post {} does not exist", post_id)));
        }

        let mut tags = Vec::with_capacity(names.len());
        for name in names {
            let slug = Tag::slug_for(name);
            let existing = tables.tags.values().find(|t| t.slug == slug).cloned();
            let tag = match existing {
                Some(existing) => existing,
                None => {
                    let tag = Tag::new(*name);
                    tables.tags.insert(tag.id, tag.clone());
                    tag
                }
            };

            if !tables.is_tagged(post_id, tag.id) {
                tables.post_tags.push((post_id, tag.id));
            }
            tags.push(tag);
        }

        Ok(tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_core::ranking::{SIMILAR_POSTS_LIMIT, rank_similar};
    use chrono::{Duration, TimeZone, Utc};

    fn published(title: &str, age_days: i64) -> Post {
        Post::new(Uuid::new_v4(), title, title, format!("{title} body"))
            .published_at(Utc::now() - Duration::days(age_days))
    }

    #[tokio::test]
    async fn listing_applies_the_publication_policy() {
        let store = InMemoryContentStore::new();
        let live = store.insert(published("live", 1)).await.unwrap();
        store.insert(Post::new(Uuid::new_v4(), "draft", "draft", "")).await.unwrap();
        store
            .insert(
                Post::new(Uuid::new_v4(), "soon", "soon", "")
                    .published_at(Utc::now() + Duration::days(1)),
            )
            .await
            .unwrap();

        let policy = PublicationPolicy::current();
        let posts = store.list_published(&policy, None, 0, 10).await.unwrap();
        assert_eq!(posts, vec![live.clone()]);
        assert_eq!(store.count_published(&policy, None).await.unwrap(), 1);
        assert_eq!(store.all_published(&policy).await.unwrap(), vec![live]);
    }

    #[tokio::test]
    async fn slug_is_unique_per_publish_date() {
        let store = InMemoryContentStore::new();
        let day = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let first = Post::new(Uuid::new_v4(), "A", "same", "").published_at(day);
        let same_day =
            Post::new(Uuid::new_v4(), "B", "same", "").published_at(day + Duration::hours(3));
        let next_day =
            Post::new(Uuid::new_v4(), "C", "same", "").published_at(day + Duration::days(1));

        store.insert(first).await.unwrap();
        assert!(matches!(store.insert(same_day).await, Err(RepoError::Constraint(_))));
        store.insert(next_day).await.unwrap();
    }

    #[tokio::test]
    async fn tag_filter_and_implicit_tag_creation() {
        let store = InMemoryContentStore::new();
        let rust = store.insert(published("rust", 1)).await.unwrap();
        let other = store.insert(published("other", 2)).await.unwrap();

        let tags = store.tag_post(rust.id, &["Rust", "Web Dev"]).await.unwrap();
        store.tag_post(other.id, &["web dev"]).await.unwrap();
        assert_eq!(tags[1].slug, "web-dev");

        let web = store.find_by_slug("web-dev").await.unwrap().unwrap();
        let policy = PublicationPolicy::current();
        assert_eq!(store.count_published(&policy, Some(web.id)).await.unwrap(), 2);

        let rust_tag = store.find_by_slug("rust").await.unwrap().unwrap();
        let posts = store.list_published(&policy, Some(rust_tag.id), 0, 10).await.unwrap();
        assert_eq!(posts, vec![rust.clone()]);

        let names: Vec<_> = store
            .find_for_post(rust.id)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, ["Rust", "Web Dev"]);
    }

    #[tokio::test]
    async fn similar_posts_rank_by_shared_tags() {
        let store = InMemoryContentStore::new();
        let current = store.insert(published("current", 0)).await.unwrap();
        let two_shared = store.insert(published("two", 9)).await.unwrap();
        let one_shared = store.insert(published("one", 1)).await.unwrap();
        let unrelated = store.insert(published("unrelated", 1)).await.unwrap();

        let tags = store.tag_post(current.id, &["a", "b"]).await.unwrap();
        store.tag_post(two_shared.id, &["a", "b"]).await.unwrap();
        store.tag_post(one_shared.id, &["b", "c"]).await.unwrap();
        store.tag_post(unrelated.id, &["z"]).await.unwrap();

        let tag_ids: Vec<Uuid> = tags.iter().map(|t| t.id).collect();
        let policy = PublicationPolicy::current();
        let candidates = store.shared_tag_counts(&policy, current.id, &tag_ids).await.unwrap();
        let ranked = rank_similar(&current, candidates, SIMILAR_POSTS_LIMIT);

        let titles: Vec<_> = ranked.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["two", "one"]);
    }

    #[tokio::test]
    async fn search_matches_all_terms_in_title_or_body() {
        let store = InMemoryContentStore::new();
        store.insert(published("Async Rust", 1)).await.unwrap();
        store.insert(published("Gardening", 2)).await.unwrap();

        let policy = PublicationPolicy::current();
        let hits = store.search_published(&policy, "rust BODY").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Async Rust");
        assert!(store.search_published(&policy, "   ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn only_active_comments_are_listed_in_order() {
        let store = InMemoryContentStore::new();
        let post = store.insert(published("post", 1)).await.unwrap();

        let mut first = Comment::new(post.id, "A", "a@example.com", "first", true);
        first.created = Utc::now() - Duration::minutes(5);
        store.insert(first).await.unwrap();
        store.insert(Comment::new(post.id, "B", "b@example.com", "pending", false)).await.unwrap();
        store.insert(Comment::new(post.id, "C", "c@example.com", "second", true)).await.unwrap();

        let bodies: Vec<_> = store
            .find_active_for_post(post.id)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.body)
            .collect();
        assert_eq!(bodies, ["first", "second"]);

        let counts = store.comment_counts(&PublicationPolicy::current()).await.unwrap();
        assert_eq!(counts[0].1, 3);
    }
}
