//! Mapping from domain entities to response views.

use actix_web::HttpRequest;

use blog_core::domain::{Comment, Post, Tag};
use blog_core::error::RepoError;
use blog_core::markup;
use blog_core::pagination::Page;
use blog_shared::dto::{CommentView, PageView, PostView, TagView};

use crate::config::BlogSettings;
use crate::state::AppState;

/// Scheme and host absolute URLs are built on, without a trailing slash.
pub fn base_url(req: &HttpRequest, settings: &BlogSettings) -> String {
    match &settings.site_url {
        Some(site_url) => site_url.clone(),
        None => {
            let info = req.connection_info();
            format!("{}://{}", info.scheme(), info.host())
        }
    }
}

pub fn absolute_url(req: &HttpRequest, settings: &BlogSettings, path: &str) -> String {
    format!("{}{}", base_url(req, settings), path)
}

pub fn tag_view(tag: &Tag) -> TagView {
    TagView {
        name: tag.name.clone(),
        slug: tag.slug.clone(),
        url: format!("/blog/tag/{}/", tag.slug),
    }
}

pub fn comment_view(comment: &Comment) -> CommentView {
    CommentView {
        id: comment.id,
        name: comment.name.clone(),
        body: comment.body.clone(),
        created: comment.created,
        active: comment.active,
    }
}

pub fn page_view(page: &Page) -> PageView {
    PageView {
        number: page.number,
        num_pages: page.num_pages,
        count: page.count,
        has_previous: page.has_previous(),
        has_next: page.has_next(),
        previous_page_number: page.previous_page_number(),
        next_page_number: page.next_page_number(),
    }
}

pub fn post_view(post: &Post, tags: &[Tag]) -> PostView {
    PostView {
        id: post.id,
        author_id: post.author_id,
        title: post.title.clone(),
        slug: post.slug.clone(),
        body: post.body.clone(),
        body_html: markup::render_markdown(&post.body),
        publish: post.publish,
        updated: post.updated,
        url: post.absolute_path(),
        tags: tags.iter().map(tag_view).collect(),
    }
}

/// Load each post's tags and build its view.
pub async fn post_views(state: &AppState, posts: &[Post]) -> Result<Vec<PostView>, RepoError> {
    let mut views = Vec::with_capacity(posts.len());
    for post in posts {
        let tags = state.tags.find_for_post(post.id).await?;
        views.push(post_view(post, &tags));
    }
    Ok(views)
}
