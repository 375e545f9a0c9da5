//! PostgreSQL repository implementations.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveTime};
use sea_orm::sea_query::{Expr, OnConflict, Query};
use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, Set,
};
use uuid::Uuid;

use blog_core::PublicationPolicy;
use blog_core::domain::{Comment, Post, Tag};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, CommentRepository, PostRepository, TagRepository};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::post_tag::{self, Entity as PostTagEntity};
use super::entity::tag::{self, Entity as TagEntity};
use super::postgres_base::{PostgresBaseRepository, repo_err};

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// PostgreSQL tag repository.
pub type PostgresTagRepository = PostgresBaseRepository<TagEntity>;

const SEARCH_CONDITION: &str =
    "to_tsvector('english', title || ' ' || body) @@ plainto_tsquery('english', $1)";

/// Posts admitted by the publication policy, newest first.
fn visible(policy: &PublicationPolicy) -> Select<PostEntity> {
    PostEntity::find()
        .filter(post::Column::Status.eq(post::Status::Published))
        .filter(post::Column::Publish.lte(policy.now()))
        .order_by_desc(post::Column::Publish)
}

fn tagged(select: Select<PostEntity>, tag_id: Option<Uuid>) -> Select<PostEntity> {
    match tag_id {
        Some(tag_id) => select.filter(
            post::Column::Id.in_subquery(
                Query::select()
                    .column(post_tag::Column::PostId)
                    .from(PostTagEntity)
                    .and_where(post_tag::Column::TagId.eq(tag_id))
                    .to_owned(),
            ),
        ),
        None => select,
    }
}

fn with_counts(models: Vec<post::Model>, counts: &HashMap<Uuid, u64>) -> Vec<(Post, u64)> {
    models
        .into_iter()
        .map(|model| {
            let post: Post = model.into();
            let count = counts.get(&post.id).copied().unwrap_or(0);
            (post, count)
        })
        .collect()
}

#[derive(Debug, FromQueryResult)]
struct CommentTotal {
    post_id: Uuid,
    total: i64,
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn count_published(
        &self,
        policy: &PublicationPolicy,
        tag_id: Option<Uuid>,
    ) -> Result<u64, RepoError> {
        tagged(visible(policy), tag_id)
            .count(&self.db)
            .await
            .map_err(repo_err)
    }

    async fn list_published(
        &self,
        policy: &PublicationPolicy,
        tag_id: Option<Uuid>,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError> {
        let result = tagged(visible(policy), tag_id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn all_published(&self, policy: &PublicationPolicy) -> Result<Vec<Post>, RepoError> {
        let result = visible(policy).all(&self.db).await.map_err(repo_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_published(
        &self,
        policy: &PublicationPolicy,
        id: Uuid,
    ) -> Result<Option<Post>, RepoError> {
        let result = visible(policy)
            .filter(post::Column::Id.eq(id))
            .one(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_published_on(
        &self,
        policy: &PublicationPolicy,
        date: NaiveDate,
        slug: &str,
    ) -> Result<Option<Post>, RepoError> {
        let day_start = date.and_time(NaiveTime::MIN).and_utc();
        let day_end = day_start + Duration::days(1);
        tracing::debug!(%date, slug, "Finding post by date and slug");

        let result = visible(policy)
            .filter(post::Column::Slug.eq(slug))
            .filter(post::Column::Publish.gte(day_start))
            .filter(post::Column::Publish.lt(day_end))
            .one(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(result.map(Into::into))
    }

    async fn search_published(
        &self,
        policy: &PublicationPolicy,
        query: &str,
    ) -> Result<Vec<Post>, RepoError> {
        let result = visible(policy)
            .filter(Expr::cust_with_values(SEARCH_CONDITION, [query.to_string()]))
            .all(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn shared_tag_counts(
        &self,
        policy: &PublicationPolicy,
        post_id: Uuid,
        tag_ids: &[Uuid],
    ) -> Result<Vec<(Post, u64)>, RepoError> {
        if tag_ids.is_empty() {
            return Ok(Vec::new());
        }

        let links = PostTagEntity::find()
            .filter(post_tag::Column::TagId.is_in(tag_ids.iter().copied()))
            .filter(post_tag::Column::PostId.ne(post_id))
            .all(&self.db)
            .await
            .map_err(repo_err)?;

        let mut shared: HashMap<Uuid, u64> = HashMap::new();
        for link in links {
            *shared.entry(link.post_id).or_default() += 1;
        }
        if shared.is_empty() {
            return Ok(Vec::new());
        }

        let candidates = visible(policy)
            .filter(post::Column::Id.is_in(shared.keys().copied()))
            .all(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(with_counts(candidates, &shared))
    }

    async fn comment_counts(
        &self,
        policy: &PublicationPolicy,
    ) -> Result<Vec<(Post, u64)>, RepoError> {
        let totals = CommentEntity::find()
            .select_only()
            .column(comment::Column::PostId)
            .column_as(Expr::col(comment::Column::Id).count(), "total")
            .group_by(comment::Column::PostId)
            .into_model::<CommentTotal>()
            .all(&self.db)
            .await
            .map_err(repo_err)?;

        let counts: HashMap<Uuid, u64> = totals
            .into_iter()
            .map(|t| (t.post_id, t.total.max(0) as u64))
            .collect();

        let posts = visible(policy).all(&self.db).await.map_err(repo_err)?;

        Ok(with_counts(posts, &counts))
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_active_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .filter(comment::Column::Active.eq(true))
            .order_by_asc(comment::Column::Created)
            .all(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, RepoError> {
        let result = TagEntity::find()
            .filter(tag::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_for_post(&self, post_id: Uuid) -> Result<Vec<Tag>, RepoError> {
        let result = TagEntity::find()
            .filter(
                tag::Column::Id.in_subquery(
                    Query::select()
                        .column(post_tag::Column::TagId)
                        .from(PostTagEntity)
                        .and_where(post_tag::Column::PostId.eq(post_id))
                        .to_owned(),
                ),
            )
            .order_by_asc(tag::Column::Name)
            .all(&self.db)
            .await
            .map_err(repo_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn tag_post(&self, post_id: Uuid, names: &[&str]) -> Result<Vec<Tag>, RepoError> {
        let mut tags = Vec::with_capacity(names.len());

        for name in names {
            let tag = match self.find_by_slug(&Tag::slug_for(name)).await? {
                Some(existing) => existing,
                None => {
                    tracing::debug!(tag = %name, "Creating tag");
                    <Self as BaseRepository<Tag, Uuid>>::insert(self, Tag::new(*name)).await?
                }
            };

            let link = post_tag::ActiveModel {
                post_id: Set(post_id),
                tag_id: Set(tag.id),
            };
            PostTagEntity::insert(link)
                .on_conflict(
                    OnConflict::columns([post_tag::Column::PostId, post_tag::Column::TagId])
                        .do_nothing()
                        .to_owned(),
                )
                .exec_without_returning(&self.db)
                .await
                .map_err(repo_err)?;

            tags.push(tag);
        }

        Ok(tags)
    }
}
