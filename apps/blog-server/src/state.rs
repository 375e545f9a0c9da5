//! Application state - shared across all handlers.

use std::sync::Arc;

use anyhow::Context;
use blog_core::ports::{CommentRepository, Mailer, PostRepository, TagRepository};
use blog_infra::{InMemoryContentStore, LogMailer, WebhookMailer};

#[cfg(feature = "postgres")]
use blog_infra::{PostgresCommentRepository, PostgresPostRepository, PostgresTagRepository};

use crate::config::{AppConfig, BlogSettings};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub mailer: Arc<dyn Mailer>,
    pub settings: Arc<BlogSettings>,
    /// Name of the storage backend, reported by the health check.
    pub backend: &'static str,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let mailer: Arc<dyn Mailer> = match &config.mail_webhook_url {
            Some(url) => {
                tracing::info!("Mail webhook configured");
                Arc::new(WebhookMailer::new(url.clone()))
            }
            None => {
                tracing::warn!("MAIL_WEBHOOK_URL not set. Outgoing email is only logged.");
                Arc::new(LogMailer)
            }
        };
        let settings = Arc::new(config.blog.clone());

        #[cfg(feature = "postgres")]
        if let Some(db_config) = &config.database {
            let conn = blog_infra::connect(db_config)
                .await
                .context("failed to connect to database")?;

            tracing::info!("Application state initialized (postgres)");
            return Ok(Self {
                posts: Arc::new(PostgresPostRepository::new(conn.clone())),
                comments: Arc::new(PostgresCommentRepository::new(conn.clone())),
                tags: Arc::new(PostgresTagRepository::new(conn)),
                mailer,
                settings,
                backend: "postgres",
            });
        }

        #[cfg(not(feature = "postgres"))]
        if config.database.is_some() {
            tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
        }

        tracing::warn!("Running without database (in-memory mode). Content is lost on restart.");
        Ok(Self::in_memory(
            Arc::new(InMemoryContentStore::new()),
            mailer,
            settings,
        ))
    }

    /// State backed by a single in-memory store.
    pub fn in_memory(
        store: Arc<InMemoryContentStore>,
        mailer: Arc<dyn Mailer>,
        settings: Arc<BlogSettings>,
    ) -> Self {
        Self {
            posts: store.clone(),
            comments: store.clone(),
            tags: store,
            mailer,
            settings,
            backend: "memory",
        }
    }
}
