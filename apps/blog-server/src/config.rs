//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use blog_infra::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub mail_webhook_url: Option<String>,
    pub blog: BlogSettings,
}

/// Settings the request handlers read.
#[derive(Debug, Clone)]
pub struct BlogSettings {
    /// Public base URL; when unset absolute URLs come from the request.
    pub site_url: Option<String>,
    pub title: String,
    pub description: String,
    pub posts_per_page: u64,
    pub feed_items: u64,
    pub sidebar_items: u64,
    /// New comments start inactive until a moderator approves them.
    pub comments_require_moderation: bool,
    pub default_from_email: String,
}

impl Default for BlogSettings {
    fn default() -> Self {
        Self {
            site_url: None,
            title: "My blog".to_string(),
            description: "New posts of my blog.".to_string(),
            posts_per_page: 2,
            feed_items: 5,
            sidebar_items: 5,
            comments_require_moderation: true,
            default_from_email: "noreply@localhost".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = BlogSettings::default();

        let database = lookup("DATABASE_URL").map(|url| DatabaseConfig {
            url,
            max_connections: parse_var(&lookup, "DB_MAX_CONNECTIONS").unwrap_or(100),
            min_connections: parse_var(&lookup, "DB_MIN_CONNECTIONS").unwrap_or(10),
        });

        let blog = BlogSettings {
            site_url: lookup("SITE_URL").map(|url| url.trim_end_matches('/').to_string()),
            title: lookup("BLOG_TITLE").unwrap_or(defaults.title),
            description: lookup("BLOG_DESCRIPTION").unwrap_or(defaults.description),
            posts_per_page: parse_var(&lookup, "POSTS_PER_PAGE")
                .filter(|n: &u64| *n > 0)
                .unwrap_or(defaults.posts_per_page),
            feed_items: parse_var(&lookup, "FEED_ITEMS").unwrap_or(defaults.feed_items),
            sidebar_items: parse_var(&lookup, "SIDEBAR_ITEMS").unwrap_or(defaults.sidebar_items),
            comments_require_moderation: flag_var(
                &lookup,
                "COMMENTS_REQUIRE_MODERATION",
                defaults.comments_require_moderation,
            ),
            default_from_email: lookup("DEFAULT_FROM_EMAIL")
                .unwrap_or(defaults.default_from_email),
        };

        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_var(&lookup, "PORT").unwrap_or(8080),
            database,
            mail_webhook_url: lookup("MAIL_WEBHOOK_URL"),
            blog,
        }
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|v| v.trim().parse().ok())
}

fn flag_var<F>(lookup: &F, key: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| !matches!(v.trim().to_lowercase().as_str(), "false" | "0" | "no"))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = config(&[]);
        assert_eq!(config.port, 8080);
        assert!(config.database.is_none());
        assert_eq!(config.blog.posts_per_page, 2);
        assert!(config.blog.comments_require_moderation);
        assert_eq!(config.blog.title, "My blog");
    }

    #[test]
    fn overrides_and_bad_values() {
        let config = config(&[
            ("PORT", "not-a-port"),
            ("DATABASE_URL", "postgres://localhost/blog"),
            ("POSTS_PER_PAGE", "0"),
            ("SITE_URL", "https://blog.example.com/"),
            ("COMMENTS_REQUIRE_MODERATION", "false"),
        ]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.database.unwrap().max_connections, 100);
        assert_eq!(config.blog.posts_per_page, 2);
        assert_eq!(config.blog.site_url.as_deref(), Some("https://blog.example.com"));
        assert!(!config.blog.comments_require_moderation);
    }
}
