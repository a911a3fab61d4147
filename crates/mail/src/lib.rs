//! Outgoing email for MovieHunt.
//!
//! - [`resend`] -- transactional email through the Resend REST API.
//! - [`smtp`] -- SMTP fallback for transactional email when Resend is not set up.
//! - [`mailerlite`] -- newsletter subscribers and bulk campaigns.
//! - [`message`] -- the messages themselves (contact form, new review announcement).

pub mod error;
pub mod mailerlite;
pub mod message;
pub mod resend;
pub mod smtp;
pub mod transport;

pub use error::MailError;
pub use mailerlite::{MailerLiteClient, MailerLiteConfig};
pub use message::{
    contact_email, new_review_campaign, CampaignDraft, ContactForm, NewsletterSignup, OutgoingEmail,
};
pub use resend::{ResendClient, ResendConfig};
pub use smtp::{SmtpConfig, SmtpMailer};
pub use transport::TransactionalMailer;
