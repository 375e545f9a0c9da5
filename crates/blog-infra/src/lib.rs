//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`:
//! content stores (PostgreSQL and in-memory) and mail transports.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL content store via SeaORM

pub mod database;
pub mod mail;
pub mod memory;

pub use database::DatabaseConfig;
pub use mail::{LogMailer, WebhookMailer};
pub use memory::InMemoryContentStore;

#[cfg(feature = "postgres")]
pub use database::{
    PostgresCommentRepository, PostgresPostRepository, PostgresTagRepository, connect,
};
