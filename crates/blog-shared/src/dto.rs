//! Response contexts - the named values each page hands to the renderer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::forms::{CommentForm, EmailPostForm, FormState};

/// Query string of the post list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
}

/// Query string of the search page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
}

/// Query string of the sidebar widgets.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SidebarQuery {
    pub count: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagView {
    pub name: String,
    pub slug: String,
    pub url: String,
}

/// A post as listed or displayed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostView {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub body_html: String,
    pub publish: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub url: String,
    pub tags: Vec<TagView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentView {
    pub id: Uuid,
    pub name: String,
    pub body: String,
    pub created: DateTime<Utc>,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageView {
    pub number: u64,
    pub num_pages: u64,
    pub count: u64,
    pub has_previous: bool,
    pub has_next: bool,
    pub previous_page_number: Option<u64>,
    pub next_page_number: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostListContext {
    pub posts: Vec<PostView>,
    pub page: PageView,
    pub tag: Option<TagView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostDetailContext {
    pub post: PostView,
    pub comments: Vec<CommentView>,
    pub form: FormState<CommentForm>,
    pub similar_posts: Vec<PostView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentContext {
    pub post: PostView,
    pub form: FormState<CommentForm>,
    pub comment: Option<CommentView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShareContext {
    pub post: PostView,
    pub form: FormState<EmailPostForm>,
    pub sent: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchContext {
    pub query: Option<String>,
    pub results: Vec<PostView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentedPostView {
    pub post: PostView,
    pub total_comments: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SidebarContext {
    pub total_posts: u64,
    pub latest_posts: Vec<PostView>,
    pub most_commented: Vec<CommentedPostView>,
}
