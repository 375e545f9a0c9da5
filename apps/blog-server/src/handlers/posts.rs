//! Post list and post detail pages.

use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::Deserialize;

use blog_core::PublicationPolicy;
use blog_core::domain::Tag;
use blog_core::error::DomainError;
use blog_core::pagination::Paginator;
use blog_core::ranking::{SIMILAR_POSTS_LIMIT, rank_similar};
use blog_shared::FormState;
use blog_shared::dto::{ListQuery, PostDetailContext, PostListContext};

use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::views;

/// Path of a post detail page.
#[derive(Debug, Deserialize)]
pub struct PostDatePath {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub slug: String,
}

/// GET /blog/
pub async fn post_list(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> AppResult<HttpResponse> {
    list_page(&state, None, query.page.as_deref()).await
}

/// GET /blog/tag/{tag_slug}/
pub async fn post_list_by_tag(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<ListQuery>,
) -> AppResult<HttpResponse> {
    let tag_slug = path.into_inner();
    let tag = state
        .tags
        .find_by_slug(&tag_slug)
        .await?
        .ok_or_else(|| DomainError::not_found("Tag", tag_slug))?;

    list_page(&state, Some(tag), query.page.as_deref()).await
}

async fn list_page(
    state: &AppState,
    tag: Option<Tag>,
    raw_page: Option<&str>,
) -> AppResult<HttpResponse> {
    let policy = PublicationPolicy::current();
    let tag_id = tag.as_ref().map(|t| t.id);

    let count = state.posts.count_published(&policy, tag_id).await?;
    let page = Paginator::new(count, state.settings.posts_per_page).page(raw_page);
    let posts = state
        .posts
        .list_published(&policy, tag_id, page.offset(), page.per_page)
        .await?;

    tracing::debug!(page = page.number, num_pages = page.num_pages, "Listing posts");

    Ok(HttpResponse::Ok().json(PostListContext {
        posts: views::post_views(state, &posts).await?,
        page: views::page_view(&page),
        tag: tag.as_ref().map(views::tag_view),
    }))
}

/// GET /blog/{year}/{month}/{day}/{slug}
pub async fn post_detail(
    state: web::Data<AppState>,
    path: web::Path<PostDatePath>,
) -> AppResult<HttpResponse> {
    let PostDatePath {
        year,
        month,
        day,
        slug,
    } = path.into_inner();
    let not_found = || DomainError::not_found("Post", format!("{year}/{month}/{day}/{slug}"));

    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(not_found)?;
    let policy = PublicationPolicy::current();
    let post = state
        .posts
        .find_published_on(&policy, date, &slug)
        .await?
        .ok_or_else(not_found)?;

    let comments = state.comments.find_active_for_post(post.id).await?;
    let tags = state.tags.find_for_post(post.id).await?;

    let tag_ids: Vec<_> = tags.iter().map(|t| t.id).collect();
    let candidates = state
        .posts
        .shared_tag_counts(&policy, post.id, &tag_ids)
        .await?;
    let similar = rank_similar(&post, candidates, SIMILAR_POSTS_LIMIT);

    Ok(HttpResponse::Ok().json(PostDetailContext {
        post: views::post_view(&post, &tags),
        comments: comments.iter().map(views::comment_view).collect(),
        form: FormState::default(),
        similar_posts: views::post_views(&state, &similar).await?,
    }))
}

#[cfg(test)]
mod tests {
    use actix_web::test;
    use blog_core::domain::Comment;
    use blog_core::ports::BaseRepository;
    use chrono::{Datelike, Duration, Utc};

    use crate::testing::{Fixture, json};

    fn slugs(posts: &serde_json::Value) -> Vec<serde_json::Value> {
        posts
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["slug"].clone())
            .collect()
    }

    #[actix_web::test]
    async fn list_hides_drafts_and_future_posts() {
        let fixture = Fixture::new();
        fixture.published("visible", 1, &[]).await;
        fixture.post("draft", Utc::now() - Duration::days(1), &[], false).await;
        fixture.post("scheduled", Utc::now() + Duration::days(1), &[], true).await;

        let (status, body) = json(&fixture.state, test::TestRequest::get().uri("/blog/")).await;
        assert_eq!(status, 200);
        assert_eq!(slugs(&body["posts"]), ["visible"]);
        assert_eq!(body["page"]["count"], 1);
        assert!(body["tag"].is_null());
    }

    #[actix_web::test]
    async fn non_numeric_page_returns_first_page() {
        let fixture = Fixture::new();
        for (i, slug) in ["a", "b", "c", "d"].iter().enumerate() {
            fixture.published(slug, i as i64 + 1, &[]).await;
        }

        let req = test::TestRequest::get().uri("/blog/?page=abc");
        let (status, body) = json(&fixture.state, req).await;
        assert_eq!(status, 200);
        assert_eq!(body["page"]["number"], 1);
        assert_eq!(body["posts"][0]["slug"], "a");
        assert_eq!(body["posts"].as_array().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn page_past_the_end_returns_last_page() {
        let fixture = Fixture::new();
        for (i, slug) in ["a", "b", "c", "d"].iter().enumerate() {
            fixture.published(slug, i as i64 + 1, &[]).await;
        }

        let req = test::TestRequest::get().uri("/blog/?page=9999");
        let (status, body) = json(&fixture.state, req).await;
        assert_eq!(status, 200);
        assert_eq!(body["page"]["number"], 2);
        assert_eq!(body["page"]["num_pages"], 2);
        assert_eq!(body["posts"][0]["slug"], "c");
        assert_eq!(body["page"]["has_next"], false);
    }

    #[actix_web::test]
    async fn tag_listing_filters_and_unknown_tag_is_404() {
        let fixture = Fixture::new();
        fixture.published("tagged", 1, &["Rust"]).await;
        fixture.published("untagged", 2, &[]).await;

        let req = test::TestRequest::get().uri("/blog/tag/rust/");
        let (status, body) = json(&fixture.state, req).await;
        assert_eq!(status, 200);
        assert_eq!(body["posts"].as_array().unwrap().len(), 1);
        assert_eq!(body["posts"][0]["slug"], "tagged");
        assert_eq!(body["tag"]["name"], "Rust");

        let req = test::TestRequest::get().uri("/blog/tag/missing/");
        let (status, _) = json(&fixture.state, req).await;
        assert_eq!(status, 404);
    }

    #[actix_web::test]
    async fn detail_shows_active_comments_and_similar_posts() {
        let fixture = Fixture::new();
        let post = fixture.published("current", 1, &["a", "b"]).await;
        fixture.published("two-shared", 20, &["a", "b"]).await;
        fixture.published("one-shared-new", 2, &["b"]).await;
        fixture.published("one-shared-old", 9, &["a"]).await;
        fixture.published("unrelated", 3, &["z"]).await;

        fixture
            .store
            .insert(Comment::new(post.id, "Ann", "ann@example.com", "Approved", true))
            .await
            .unwrap();
        fixture
            .store
            .insert(Comment::new(post.id, "Bob", "bob@example.com", "Pending", false))
            .await
            .unwrap();

        let req = test::TestRequest::get().uri(&post.absolute_path());
        let (status, body) = json(&fixture.state, req).await;
        assert_eq!(status, 200);
        assert_eq!(body["post"]["slug"], "current");
        assert_eq!(body["post"]["tags"].as_array().unwrap().len(), 2);

        let comments = body["comments"].as_array().unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0]["body"], "Approved");

        assert_eq!(
            slugs(&body["similar_posts"]),
            ["two-shared", "one-shared-new", "one-shared-old"]
        );
        assert!(body["form"]["errors"].as_object().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn detail_of_unpublished_or_unknown_post_is_404() {
        let fixture = Fixture::new();
        let draft = fixture.post("draft", Utc::now() - Duration::days(1), &[], false).await;
        let live = fixture.published("live", 1, &[]).await;

        for uri in [
            draft.absolute_path(),
            format!(
                "/blog/{}/{}/{}/other",
                live.publish.year(),
                live.publish.month(),
                live.publish.day()
            ),
            "/blog/2024/13/45/live".to_string(),
            "/blog/year/1/1/live".to_string(),
        ] {
            let (status, _) = json(&fixture.state, test::TestRequest::get().uri(&uri)).await;
            assert_eq!(status, 404, "{uri}");
        }
    }
}
