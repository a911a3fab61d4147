//! Verification of Supabase access tokens.
//!
//! Supabase Auth issues HS256 JWTs signed with the project's JWT secret. The
//! API never issues tokens itself; it only checks them and decides whether
//! the holder may use the admin endpoints.

use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Audience Supabase puts on tokens of signed-in users.
const DEFAULT_AUDIENCE: &str = "authenticated";

/// Value of `app_metadata.role` that grants admin access.
pub const ADMIN_ROLE: &str = "admin";

/// Claims of a Supabase access token that the API reads.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The Supabase user id.
    pub sub: Uuid,
    pub email: Option<String>,
    /// Postgres role, normally `"authenticated"`.
    pub role: Option<String>,
    #[serde(default)]
    pub app_metadata: AppMetadata,
    pub aud: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
}

/// Server-controlled metadata. Users cannot edit it, so it is safe for roles.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct AppMetadata {
    pub role: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SupabaseAuthConfig {
    /// HMAC-SHA256 secret of the Supabase project.
    pub jwt_secret: String,
    pub audience: String,
    /// Emails treated as admins regardless of `app_metadata.role`. Lowercase.
    pub admin_emails: Vec<String>,
}

impl SupabaseAuthConfig {
    /// Load from environment variables.
    ///
    /// | Env Var               | Required | Default          |
    /// |-----------------------|----------|------------------|
    /// | `SUPABASE_JWT_SECRET` | **yes**  | --               |
    /// | `SUPABASE_JWT_AUD`    | no       | `authenticated`  |
    /// | `ADMIN_EMAILS`        | no       | --               |
    ///
    /// # Panics
    ///
    /// Panics if `SUPABASE_JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let jwt_secret = std::env::var("SUPABASE_JWT_SECRET")
            .expect("SUPABASE_JWT_SECRET must be set in the environment");
        assert!(!jwt_secret.is_empty(), "SUPABASE_JWT_SECRET must not be empty");

        let audience =
            std::env::var("SUPABASE_JWT_AUD").unwrap_or_else(|_| DEFAULT_AUDIENCE.into());

        let admin_emails = parse_email_list(&std::env::var("ADMIN_EMAILS").unwrap_or_default());

        Self {
            jwt_secret,
            audience,
            admin_emails,
        }
    }

    /// Whether the token holder may use the admin endpoints.
    pub fn is_admin(&self, claims: &Claims) -> bool {
        if claims.app_metadata.role.as_deref() == Some(ADMIN_ROLE) {
            return true;
        }
        claims
            .email
            .as_deref()
            .map(|e| self.admin_emails.contains(&e.trim().to_lowercase()))
            .unwrap_or(false)
    }
}

fn parse_email_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

/// Validate the signature, expiry and audience of a token and decode it.
pub fn validate_token(
    token: &str,
    config: &SupabaseAuthConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default(); // HS256, validates exp
    validation.set_audience(&[config.audience.as_str()]);
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{encode, EncodingKey, Header};

    use super::*;

    fn config() -> SupabaseAuthConfig {
        SupabaseAuthConfig {
            jwt_secret: "super-secret-jwt-token-with-at-least-32-characters".into(),
            audience: DEFAULT_AUDIENCE.into(),
            admin_emails: vec!["editor@moviehunt.test".into()],
        }
    }

    fn claims(email: &str, role: Option<&str>, exp_offset: i64) -> Claims {
        Claims {
            sub: Uuid::new_v4(),
            email: Some(email.into()),
            role: Some("authenticated".into()),
            app_metadata: AppMetadata {
                role: role.map(String::from),
            },
            aud: DEFAULT_AUDIENCE.into(),
            exp: chrono::Utc::now().timestamp() + exp_offset,
        }
    }

    fn sign(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn valid_token_round_trips() {
        let config = config();
        let original = claims("fan@example.com", None, 3600);
        let decoded = validate_token(&sign(&original, &config.jwt_secret), &config).unwrap();
        assert_eq!(decoded.sub, original.sub);
        assert!(!config.is_admin(&decoded));
    }

    #[test]
    fn rejects_wrong_secret_and_expired_tokens() {
        let config = config();
        let forged = sign(&claims("a@b.test", None, 3600), "another-secret");
        assert!(validate_token(&forged, &config).is_err());

        let expired = sign(&claims("a@b.test", None, -3600), &config.jwt_secret);
        assert!(validate_token(&expired, &config).is_err());
    }

    #[test]
    fn rejects_wrong_audience() {
        let config = config();
        let mut anon = claims("a@b.test", None, 3600);
        anon.aud = "anon".into();
        assert!(validate_token(&sign(&anon, &config.jwt_secret), &config).is_err());
    }

    #[test]
    fn admin_by_role_or_allow_list() {
        let config = config();
        assert!(config.is_admin(&claims("x@y.test", Some("admin"), 0)));
        assert!(config.is_admin(&claims("Editor@MovieHunt.test", None, 0)));
        assert!(!config.is_admin(&claims("x@y.test", Some("member"), 0)));
    }

    #[test]
    fn email_list_parsing() {
        assert_eq!(
            parse_email_list(" A@b.test, ,c@d.test "),
            vec!["a@b.test".to_string(), "c@d.test".to_string()]
        );
        assert!(parse_email_list("").is_empty());
    }
}
