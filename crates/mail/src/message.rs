//! Messages sent by the site and the forms that trigger them.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A transactional email, independent of the transport that sends it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutgoingEmail {
    /// RFC 5322 "From", e.g. `MovieHunt <hello@moviehunt.example>`.
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
}

/// Payload of the public contact form.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ContactForm {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 200))]
    pub subject: Option<String>,
    #[validate(length(min = 10, max = 5000))]
    pub message: String,
}

/// Email to the site owner for a contact form submission. Replies go
/// straight to the visitor.
pub fn contact_email(form: &ContactForm, from: &str, owner: &str) -> OutgoingEmail {
    let subject = match form.subject.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => format!("[MovieHunt contact] {s}"),
        _ => format!("[MovieHunt contact] Message from {}", form.name.trim()),
    };
    let text = format!(
        "From: {} <{}>\n\n{}",
        form.name.trim(),
        form.email.trim(),
        form.message.trim()
    );
    OutgoingEmail {
        from: from.to_string(),
        to: vec![owner.to_string()],
        subject,
        html: Some(paragraphs(&text)),
        text,
        reply_to: Some(form.email.trim().to_string()),
    }
}

/// Payload of the newsletter signup form.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewsletterSignup {
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 100))]
    pub name: Option<String>,
}

/// A bulk email announcing a new review, before it is created in MailerLite.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignDraft {
    /// Internal campaign name shown in the MailerLite dashboard.
    pub name: String,
    pub subject: String,
    /// HTML body.
    pub content: String,
}

/// Campaign announcing a newly published review.
pub fn new_review_campaign(
    title: &str,
    year: Option<i32>,
    synopsis: Option<&str>,
    url: &str,
) -> CampaignDraft {
    let heading = match year {
        Some(y) => format!("{title} ({y})"),
        None => title.to_string(),
    };
    let mut text = format!("New on MovieHunt: {heading}\n\n");
    if let Some(synopsis) = synopsis.map(str::trim).filter(|s| !s.is_empty()) {
        text.push_str(synopsis);
        text.push_str("\n\n");
    }
    let content = format!(
        "{}<p><a href=\"{}\">Read the review</a></p>",
        paragraphs(&text),
        escape_html(url)
    );
    CampaignDraft {
        name: format!("New review: {heading}"),
        subject: format!("New review: {heading}"),
        content,
    }
}

/// Wrap blank-line separated blocks in `<p>` tags, escaping HTML.
fn paragraphs(text: &str) -> String {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| format!("<p>{}</p>", escape_html(p).replace('\n', "<br>")))
        .collect()
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
