use super::model::Session;
use super::SessionVerifier;
use crate::core::error::{AppError, Result};
use async_trait::async_trait;
use jsonwebtoken::{decode, decode_header, Algorithm, Validation};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use super::jwks::JwksClient;

pub struct JwtValidator {
    jwks_client: Arc<JwksClient>,
    issuer: String,
    audience: String,
    leeway: u64,
}

#[derive(Debug, Clone, Deserialize)]
struct Claims {
    // Standard JWT claims (validated by jsonwebtoken library)
    sub: String,
    #[serde(rename = "iss")]
    _iss: String,
    #[serde(rename = "aud")]
    _aud: AudienceClaim,
    #[serde(rename = "exp")]
    _exp: u64,

    // OIDC profile claims, present when the provider includes them in access tokens
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    preferred_username: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

/// Audience can be either a single string or an array of strings
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
#[allow(dead_code)]
enum AudienceClaim {
    Single(String),
    Multiple(Vec<String>),
}

impl From<Claims> for Session {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            display_name: claims.name.or(claims.preferred_username),
            email: claims.email,
        }
    }
}

impl JwtValidator {
    pub fn new(
        jwks_client: Arc<JwksClient>,
        issuer: String,
        audience: String,
        leeway: Duration,
    ) -> Self {
        Self {
            jwks_client,
            issuer,
            audience,
            leeway: leeway.as_secs(),
        }
    }

    pub async fn validate_token(&self, token: &str) -> Result<Session> {
        let header = decode_header(token).map_err(|e| AppError::Auth(e.to_string()))?;

        let kid = header
            .kid
            .ok_or_else(|| AppError::Auth("Missing kid in token header".to_string()))?;

        if header.alg != Algorithm::RS256 {
            return Err(AppError::Auth(format!(
                "Unsupported algorithm: {:?}. Only RS256 is allowed",
                header.alg
            )));
        }

        let decoding_key = self
            .jwks_client
            .get_key(&kid)
            .await
            .map_err(|e| AppError::Auth(e.to_string()))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.leeway = self.leeway;
        validation.validate_nbf = true;

        let token_data = decode::<Claims>(token, &decoding_key, &validation)
            .map_err(|e| AppError::Auth(e.to_string()))?;

        Ok(Session::from(token_data.claims))
    }
}

#[async_trait]
impl SessionVerifier for JwtValidator {
    async fn verify(&self, token: &str) -> Result<Session> {
        self.validate_token(token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> JwtValidator {
        JwtValidator::new(
            Arc::new(JwksClient::new(
                "http://127.0.0.1:1",
                Duration::from_secs(60),
            )),
            "http://127.0.0.1:1".to_string(),
            "safespot".to_string(),
            Duration::from_secs(60),
        )
    }

    #[test]
    fn test_claims_prefer_name_over_username() {
        let claims: Claims = serde_json::from_value(serde_json::json!({
            "sub": "u-1",
            "iss": "issuer",
            "aud": ["safespot"],
            "exp": 1,
            "name": "Maya Lee",
            "preferred_username": "maya",
            "email": "maya@example.com"
        }))
        .unwrap();

        let session = Session::from(claims);
        assert_eq!(session.user_id, "u-1");
        assert_eq!(session.display_name.as_deref(), Some("Maya Lee"));
        assert_eq!(session.email.as_deref(), Some("maya@example.com"));
    }

    #[test]
    fn test_claims_without_profile() {
        let claims: Claims = serde_json::from_value(serde_json::json!({
            "sub": "u-2",
            "iss": "issuer",
            "aud": "safespot",
            "exp": 1
        }))
        .unwrap();

        let session = Session::from(claims);
        assert_eq!(session.display_name, None);
        assert_eq!(session.email, None);
    }

    #[tokio::test]
    async fn test_malformed_token_is_auth_error() {
        let result = validator().verify("not-a-jwt").await;
        assert!(matches!(result, Err(AppError::Auth(_))));
    }
}
