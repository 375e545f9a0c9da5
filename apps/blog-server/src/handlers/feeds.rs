//! RSS feed and sitemap.

use actix_web::{HttpRequest, HttpResponse, web};

use blog_core::PublicationPolicy;
use blog_core::export::{self, FeedChannel, SitemapWeights};

use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::views;

/// GET /blog/feed/
pub async fn latest_posts_feed(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let policy = PublicationPolicy::current();
    let posts = state
        .posts
        .list_published(&policy, None, 0, state.settings.feed_items)
        .await?;

    let base_url = views::base_url(&req, &state.settings);
    let channel = FeedChannel {
        title: state.settings.title.clone(),
        link: format!("{base_url}/blog/"),
        feed_link: format!("{base_url}/blog/feed/"),
        description: state.settings.description.clone(),
    };

    Ok(HttpResponse::Ok()
        .content_type("application/rss+xml; charset=utf-8")
        .body(export::rss(&channel, &posts, &base_url)))
}

/// GET /sitemap.xml
pub async fn sitemap(req: HttpRequest, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let policy = PublicationPolicy::current();
    let posts = state.posts.all_published(&policy).await?;
    let base_url = views::base_url(&req, &state.settings);

    Ok(HttpResponse::Ok()
        .content_type("application/xml; charset=utf-8")
        .body(export::sitemap(&posts, &base_url, SitemapWeights::default())))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::header, test};
    use chrono::{Duration, Utc};

    use crate::testing::{Fixture, call};

    async fn body_of(fixture: &Fixture, uri: &str) -> (String, String) {
        let resp = call(&fixture.state, test::TestRequest::get().uri(uri)).await;
        assert_eq!(resp.status().as_u16(), 200);
        let content_type = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = test::read_body(resp).await;
        (content_type, String::from_utf8(body.to_vec()).unwrap())
    }

    async fn seeded() -> Fixture {
        let fixture = Fixture::new();
        fixture.published("live", 1, &[]).await;
        fixture.post("draft", Utc::now() - Duration::days(1), &[], false).await;
        fixture.post("scheduled", Utc::now() + Duration::days(3), &[], true).await;
        fixture
    }

    #[actix_web::test]
    async fn feed_lists_only_published_posts() {
        let fixture = seeded().await;

        let (content_type, xml) = body_of(&fixture, "/blog/feed/").await;

        assert!(content_type.starts_with("application/rss+xml"));
        assert!(xml.contains("<title>My blog</title>"));
        assert!(xml.contains("<link>http://blog.test/blog/</link>"));
        assert!(xml.contains("/live</link>"));
        assert!(!xml.contains("/draft"));
        assert!(!xml.contains("/scheduled"));
    }

    #[actix_web::test]
    async fn feed_is_capped_at_configured_items() {
        let fixture = Fixture::new();
        for day in 1..=7 {
            fixture.published(&format!("post-{day}"), day, &[]).await;
        }

        let (_, xml) = body_of(&fixture, "/blog/feed/").await;

        assert_eq!(xml.matches("<item>").count(), 5);
        assert!(xml.contains("/post-1</link>"));
        assert!(!xml.contains("/post-6</link>"));
    }

    #[actix_web::test]
    async fn sitemap_lists_only_published_posts() {
        let fixture = seeded().await;

        let (content_type, xml) = body_of(&fixture, "/sitemap.xml").await;

        assert!(content_type.starts_with("application/xml"));
        assert_eq!(xml.matches("<url>").count(), 1);
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
        assert!(!xml.contains("/draft"));
        assert!(!xml.contains("/scheduled"));
    }
}
