//! SeaORM entities backing the content store.

pub mod author;
pub mod comment;
pub mod post;
pub mod post_tag;
pub mod tag;
