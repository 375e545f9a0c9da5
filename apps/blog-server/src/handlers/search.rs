use actix_web::{HttpResponse, web};

use blog_core::PublicationPolicy;
use blog_shared::dto::{SearchContext, SearchQuery};

use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::views;

/// GET /blog/search/?query=...
pub async fn post_search(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> AppResult<HttpResponse> {
    let query = query
        .into_inner()
        .query
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty());

    let results = match &query {
        Some(q) => {
            let policy = PublicationPolicy::current();
            let posts = state.posts.search_published(&policy, q).await?;
            tracing::debug!(query = %q, hits = posts.len(), "Search");
            views::post_views(&state, &posts).await?
        }
        None => Vec::new(),
    };

    Ok(HttpResponse::Ok().json(SearchContext { query, results }))
}

#[cfg(test)]
mod tests {
    use actix_web::test;
    use chrono::{Duration, Utc};

    use crate::testing::{Fixture, json};

    #[actix_web::test]
    async fn finds_published_posts_only() {
        let fixture = Fixture::new();
        fixture.published("rust-ownership", 1, &[]).await;
        fixture.published("gardening", 2, &[]).await;
        fixture
            .post("rust-draft", Utc::now() - Duration::days(1), &[], false)
            .await;

        let req = test::TestRequest::get().uri("/blog/search/?query=Rust");
        let (status, body) = json(&fixture.state, req).await;

        assert_eq!(status, 200);
        assert_eq!(body["query"], "Rust");
        let results = body["results"].as_array().unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0]["slug"], "rust-ownership");
    }

    #[actix_web::test]
    async fn blank_or_missing_query_returns_nothing() {
        let fixture = Fixture::new();
        fixture.published("anything", 1, &[]).await;

        for uri in ["/blog/search/", "/blog/search/?query=", "/blog/search/?query=%20%20"] {
            let (status, body) = json(&fixture.state, test::TestRequest::get().uri(uri)).await;
            assert_eq!(status, 200);
            assert!(body["query"].is_null());
            assert!(body["results"].as_array().unwrap().is_empty());
        }
    }
}
