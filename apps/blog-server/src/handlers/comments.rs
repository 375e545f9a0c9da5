//! Comment submission.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blog_core::PublicationPolicy;
use blog_core::domain::Comment;
use blog_shared::dto::CommentContext;
use blog_shared::{CommentForm, FormState};

use super::published_post;
use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::views;

/// POST /blog/{post_id}/comment/
///
/// An invalid form is echoed back with its errors and nothing is stored.
/// A body that is not a urlencoded form counts as empty.
pub async fn post_comment(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    form: Option<web::Form<CommentForm>>,
) -> AppResult<HttpResponse> {
    let policy = PublicationPolicy::current();
    let post = published_post(&state, &policy, path.into_inner()).await?;
    let tags = state.tags.find_for_post(post.id).await?;
    let submitted = form.map(web::Form::into_inner).unwrap_or_default();

    let context = match submitted.validate() {
        Ok(clean) => {
            let comment = Comment::new(
                post.id,
                clean.name.clone(),
                clean.email.clone(),
                clean.body.clone(),
                !state.settings.comments_require_moderation,
            );
            let comment = state.comments.insert(comment).await?;
            tracing::info!(
                post_id = %post.id,
                comment_id = %comment.id,
                active = comment.active,
                "Comment added"
            );

            CommentContext {
                post: views::post_view(&post, &tags),
                form: FormState::new(clean),
                comment: Some(views::comment_view(&comment)),
            }
        }
        Err(errors) => {
            tracing::debug!(post_id = %post.id, ?errors, "Comment rejected");
            CommentContext {
                post: views::post_view(&post, &tags),
                form: FormState::with_errors(submitted, errors),
                comment: None,
            }
        }
    };

    Ok(HttpResponse::Ok().json(context))
}
