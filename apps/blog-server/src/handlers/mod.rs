//! HTTP handlers and route configuration.

mod comments;
mod feeds;
mod health;
mod posts;
mod search;
mod share;
mod sidebar;

use actix_web::web;
use uuid::Uuid;

use blog_core::PublicationPolicy;
use blog_core::domain::Post;
use blog_core::error::DomainError;

use crate::middleware::error::{AppResult, post_only};
use crate::state::AppState;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/health", web::get().to(health::health_check))
        .route("/sitemap.xml", web::get().to(feeds::sitemap))
        .service(
            web::scope("/blog")
                .route("/", web::get().to(posts::post_list))
                .route("/tag/{tag_slug}/", web::get().to(posts::post_list_by_tag))
                .route("/search/", web::get().to(search::post_search))
                .route("/feed/", web::get().to(feeds::latest_posts_feed))
                .route("/sidebar/", web::get().to(sidebar::sidebar))
                .service(
                    web::resource("/{post_id}/share/")
                        .route(web::get().to(share::share_form))
                        .route(web::post().to(share::share_post)),
                )
                .service(
                    web::resource("/{post_id}/comment/")
                        .route(web::post().to(comments::post_comment))
                        .default_service(web::to(post_only)),
                )
                .route(
                    "/{year}/{month}/{day}/{slug}",
                    web::get().to(posts::post_detail),
                ),
        );
}

/// Load a published post by id or fail with 404.
async fn published_post(
    state: &AppState,
    policy: &PublicationPolicy,
    post_id: Uuid,
) -> AppResult<Post> {
    let post = state
        .posts
        .find_published(policy, post_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Post", post_id.to_string()))?;
    Ok(post)
}
