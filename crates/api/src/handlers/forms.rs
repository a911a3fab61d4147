//! Handlers for the public newsletter and contact forms.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use moviehunt_core::error::CoreError;
use moviehunt_mail::{contact_email, ContactForm, NewsletterSignup};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/newsletter/subscribe
///
/// Add the address to the MailerLite audience. Signing up twice is not an
/// error; MailerLite upserts on email.
pub async fn subscribe_newsletter(
    State(state): State<AppState>,
    Json(input): Json<NewsletterSignup>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let newsletter = state.newsletter()?;

    let name = input.name.as_deref().map(str::trim).filter(|n| !n.is_empty());
    let subscriber = newsletter.subscribe(input.email.trim(), name).await?;

    tracing::info!(subscriber_id = %subscriber.id, "Newsletter signup");

    Ok((StatusCode::CREATED, Json(DataResponse { data: subscriber })))
}

/// POST /api/v1/contact
///
/// Forward a contact form message to the site owner.
pub async fn send_contact(
    State(state): State<AppState>,
    Json(input): Json<ContactForm>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "name must not be blank".into(),
        )));
    }

    let mailer = state.mailer()?;
    let owner = state.config.contact_recipient.as_deref().ok_or_else(|| {
        AppError::Core(CoreError::Unavailable(
            "Contact recipient is not configured".into(),
        ))
    })?;

    let email = contact_email(&input, &state.config.mail_from, owner);
    mailer.send(&email).await?;

    tracing::info!(transport = mailer.name(), "Contact message forwarded");

    Ok(StatusCode::ACCEPTED)
}
