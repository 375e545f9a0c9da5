//! # Blog Core
//!
//! The domain layer of the blog: entities, the publication policy,
//! pagination, ranking and the XML exporters.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod export;
pub mod markup;
pub mod pagination;
pub mod policy;
pub mod ports;
pub mod ranking;

pub use error::{DomainError, RepoError};
pub use policy::PublicationPolicy;
