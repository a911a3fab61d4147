//! Transport abstraction for transactional email.

use async_trait::async_trait;

use crate::error::MailError;
use crate::message::OutgoingEmail;

/// Sends one-off emails (contact form, admin notices).
///
/// Implemented by [`ResendClient`](crate::ResendClient) and
/// [`SmtpMailer`](crate::SmtpMailer).
#[async_trait]
pub trait TransactionalMailer: Send + Sync {
    /// Short name for logs, e.g. `"resend"`.
    fn name(&self) -> &'static str;

    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError>;
}
