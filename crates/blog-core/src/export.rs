//! RSS feed and sitemap documents.

use crate::domain::Post;
use crate::markup;

/// Words kept in each feed item description.
pub const FEED_DESCRIPTION_WORDS: usize = 30;

/// Channel-level metadata of the RSS feed.
#[derive(Debug, Clone)]
pub struct FeedChannel {
    pub title: String,
    /// Absolute URL of the post list.
    pub link: String,
    /// Absolute URL of the feed itself.
    pub feed_link: String,
    pub description: String,
}

/// Sitemap weighting applied to every post entry.
#[derive(Debug, Clone, Copy)]
pub struct SitemapWeights {
    pub changefreq: &'static str,
    pub priority: f32,
}

impl Default for SitemapWeights {
    fn default() -> Self {
        Self {
            changefreq: "weekly",
            priority: 0.9,
        }
    }
}

/// Build an RSS 2.0 document. `base_url` has no trailing slash.
pub fn rss(channel: &FeedChannel, posts: &[Post], base_url: &str) -> String {
    let mut feed = String::new();
    feed.push_str(r#"<?xml version="1.0" encoding="utf-8"?>"#);
    feed.push('\n');
    feed.push_str(r#"<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">"#);
    feed.push_str("\n<channel>\n");
    feed.push_str(&format!("  <title>{}</title>\n", escape_xml(&channel.title)));
    feed.push_str(&format!("  <link>{}</link>\n", escape_xml(&channel.link)));
    feed.push_str(&format!(
        "  <description>{}</description>\n",
        escape_xml(&channel.description)
    ));
    feed.push_str(&format!(
        "  <atom:link href=\"{}\" rel=\"self\"/>\n",
        escape_xml(&channel.feed_link)
    ));
    if let Some(latest) = posts.iter().map(|p| p.publish).max() {
        feed.push_str(&format!(
            "  <lastBuildDate>{}</lastBuildDate>\n",
            latest.to_rfc2822()
        ));
    }

    for post in posts {
        let link = format!("{}{}", base_url, post.absolute_path());
        feed.push_str("  <item>\n");
        feed.push_str(&format!("    <title>{}</title>\n", escape_xml(&post.title)));
        feed.push_str(&format!("    <link>{}</link>\n", escape_xml(&link)));
        feed.push_str(&format!(
            "    <description>{}</description>\n",
            escape_xml(&markup::excerpt(&post.body, FEED_DESCRIPTION_WORDS))
        ));
        feed.push_str(&format!(
            "    <pubDate>{}</pubDate>\n",
            post.publish.to_rfc2822()
        ));
        feed.push_str(&format!("    <guid>{}</guid>\n", escape_xml(&link)));
        feed.push_str("  </item>\n");
    }

    feed.push_str("</channel>\n</rss>\n");
    feed
}

/// Build a sitemap with one entry per post.
pub fn sitemap(posts: &[Post], base_url: &str, weights: SitemapWeights) -> String {
    let mut doc = String::new();
    doc.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    doc.push('\n');
    doc.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
    doc.push('\n');

    for post in posts {
        doc.push_str("  <url>\n");
        doc.push_str(&format!(
            "    <loc>{}</loc>\n",
            escape_xml(&format!("{}{}", base_url, post.absolute_path()))
        ));
        doc.push_str(&format!(
            "    <lastmod>{}</lastmod>\n",
            post.updated.format("%Y-%m-%d")
        ));
        doc.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            weights.changefreq
        ));
        doc.push_str(&format!("    <priority>{:.1}</priority>\n", weights.priority));
        doc.push_str("  </url>\n");
    }

    doc.push_str("</urlset>\n");
    doc
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
