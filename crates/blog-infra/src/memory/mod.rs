//! In-memory implementations - used when no database is configured.

mod store;

pub use store::InMemoryContentStore;
