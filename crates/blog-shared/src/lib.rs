//! # Blog Shared
//!
//! Types exchanged with the rendering layer: submitted forms, response
//! contexts and error bodies.

pub mod dto;
pub mod forms;
pub mod response;

pub use forms::{CommentForm, EmailPostForm, FieldErrors, FormState};
pub use response::ErrorResponse;
