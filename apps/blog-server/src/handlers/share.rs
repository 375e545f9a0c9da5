//! "Email this post" form.

use actix_web::{HttpRequest, HttpResponse, web};
use uuid::Uuid;

use blog_core::PublicationPolicy;
use blog_core::ports::OutboundEmail;
use blog_infra::mail::mask_email;
use blog_shared::dto::ShareContext;
use blog_shared::{EmailPostForm, FormState};

use super::published_post;
use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::views;

/// Build the recommendation message for a shared post.
pub fn share_email(
    form: &EmailPostForm,
    title: &str,
    post_url: &str,
    from: &str,
) -> OutboundEmail {
    OutboundEmail {
        subject: format!("{} recommends you read {}", form.name, title),
        body: format!(
            "Read {} at {}\n\n{}'s comments: {}",
            title, post_url, form.name, form.comments
        ),
        from: from.to_string(),
        to: vec![form.to.clone()],
    }
}

/// GET /blog/{post_id}/share/
pub async fn share_form(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let policy = PublicationPolicy::current();
    let post = published_post(&state, &policy, path.into_inner()).await?;
    let tags = state.tags.find_for_post(post.id).await?;

    Ok(HttpResponse::Ok().json(ShareContext {
        post: views::post_view(&post, &tags),
        form: FormState::default(),
        sent: false,
    }))
}

/// POST /blog/{post_id}/share/
///
/// `sent` reports that the message was handed to the mailer, not that it
/// was delivered. A body that is not a urlencoded form counts as empty.
pub async fn share_post(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    form: Option<web::Form<EmailPostForm>>,
) -> AppResult<HttpResponse> {
    let policy = PublicationPolicy::current();
    let post = published_post(&state, &policy, path.into_inner()).await?;
    let tags = state.tags.find_for_post(post.id).await?;
    let submitted = form.map(web::Form::into_inner).unwrap_or_default();

    let (form, sent) = match submitted.validate() {
        Ok(clean) => {
            let post_url = views::absolute_url(&req, &state.settings, &post.absolute_path());
            let from = &state.settings.default_from_email;
            let email = share_email(&clean, &post.title, &post_url, from);
            let to = mask_email(&clean.to);

            match state.mailer.send(email).await {
                Ok(()) => tracing::info!(post_id = %post.id, %to, "Post shared"),
                Err(e) => {
                    tracing::warn!(post_id = %post.id, %to, error = %e, "Share email failed")
                }
            }
            (FormState::new(clean), true)
        }
        Err(errors) => (FormState::with_errors(submitted, errors), false),
    };

    Ok(HttpResponse::Ok().json(ShareContext {
        post: views::post_view(&post, &tags),
        form,
        sent,
    }))
}
