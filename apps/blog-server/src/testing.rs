//! Fixtures for handler tests.

use std::sync::{Arc, Mutex};

use actix_web::{App, body::MessageBody, dev::ServiceResponse, test, web};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use blog_core::domain::Post;
use blog_core::ports::{BaseRepository, MailError, Mailer, OutboundEmail, TagRepository};
use blog_infra::InMemoryContentStore;

use crate::config::BlogSettings;
use crate::handlers;
use crate::state::AppState;

pub const SITE_URL: &str = "http://blog.test";

/// Mailer that keeps every message it is given.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutboundEmail>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

/// Mailer whose transport is always down.
pub struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _email: OutboundEmail) -> Result<(), MailError> {
        Err(MailError::Transport("connection refused".to_string()))
    }
}

pub struct Fixture {
    pub store: Arc<InMemoryContentStore>,
    pub mailer: Arc<RecordingMailer>,
    pub state: AppState,
}

impl Fixture {
    pub fn new() -> Self {
        let store = Arc::new(InMemoryContentStore::new());
        let mailer = Arc::new(RecordingMailer::default());
        let state = AppState::in_memory(store.clone(), mailer.clone(), Arc::new(settings()));
        Self {
            store,
            mailer,
            state,
        }
    }

    pub fn with_mailer(mailer: Arc<dyn Mailer>) -> Self {
        let mut fixture = Self::new();
        fixture.state.mailer = mailer;
        fixture
    }

    /// Insert a post published `age_days` ago and tag it.
    pub async fn published(&self, slug: &str, age_days: i64, tags: &[&str]) -> Post {
        self.post(slug, Utc::now() - Duration::days(age_days), tags, true).await
    }

    pub async fn post(
        &self,
        slug: &str,
        publish: DateTime<Utc>,
        tags: &[&str],
        live: bool,
    ) -> Post {
        let title = slug.replace('-', " ");
        let mut post = Post::new(Uuid::new_v4(), title, slug, format!("Body of {slug}"));
        if live {
            post = post.published_at(publish);
        } else {
            post.publish = publish;
        }
        let post = self.store.insert(post).await.unwrap();
        if !tags.is_empty() {
            self.store.tag_post(post.id, tags).await.unwrap();
        }
        post
    }

    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.mailer.sent.lock().unwrap().clone()
    }
}

pub fn settings() -> BlogSettings {
    BlogSettings {
        site_url: Some(SITE_URL.to_string()),
        ..BlogSettings::default()
    }
}

/// Run a request against the full route table.
pub async fn call(state: &AppState, req: test::TestRequest) -> ServiceResponse<impl MessageBody> {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes),
    )
    .await;
    test::call_service(&app, req.to_request()).await
}

pub async fn json(state: &AppState, req: test::TestRequest) -> (u16, serde_json::Value) {
    let resp = call(state, req).await;
    let status = resp.status().as_u16();
    let body = test::read_body(resp).await;
    let value = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, value)
}
