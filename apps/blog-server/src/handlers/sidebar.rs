//! Sidebar widgets: post count, latest posts and most commented posts.

use actix_web::{HttpResponse, web};

use blog_core::PublicationPolicy;
use blog_core::domain::Post;
use blog_core::error::RepoError;
use blog_core::ranking::rank_by_count;
use blog_shared::dto::{CommentedPostView, SidebarContext, SidebarQuery};

use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::views;

const MAX_ITEMS: u64 = 20;

pub async fn total_posts(state: &AppState, policy: &PublicationPolicy) -> Result<u64, RepoError> {
    state.posts.count_published(policy, None).await
}

pub async fn latest_posts(
    state: &AppState,
    policy: &PublicationPolicy,
    count: u64,
) -> Result<Vec<Post>, RepoError> {
    state.posts.list_published(policy, None, 0, count).await
}

/// Published posts by total comment count, ties broken by recency.
pub async fn most_commented(
    state: &AppState,
    policy: &PublicationPolicy,
    count: u64,
) -> Result<Vec<(Post, u64)>, RepoError> {
    let totals = state.posts.comment_counts(policy).await?;
    Ok(rank_by_count(totals, count as usize))
}

fn item_count(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(default)
        .clamp(1, MAX_ITEMS)
}

/// GET /blog/sidebar/
pub async fn sidebar(
    state: web::Data<AppState>,
    query: web::Query<SidebarQuery>,
) -> AppResult<HttpResponse> {
    let policy = PublicationPolicy::current();
    let count = item_count(query.count.as_deref(), state.settings.sidebar_items);

    let total_posts = total_posts(&state, &policy).await?;
    let latest = latest_posts(&state, &policy, count).await?;
    let commented = most_commented(&state, &policy, count).await?;

    let mut most_commented = Vec::with_capacity(commented.len());
    for (post, total_comments) in commented {
        let tags = state.tags.find_for_post(post.id).await?;
        most_commented.push(CommentedPostView {
            post: views::post_view(&post, &tags),
            total_comments,
        });
    }

    Ok(HttpResponse::Ok().json(SidebarContext {
        total_posts,
        latest_posts: views::post_views(&state, &latest).await?,
        most_commented,
    }))
}
