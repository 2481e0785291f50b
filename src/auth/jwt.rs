use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::error::AppError;

use super::Claims;

/// Issues and validates the bearer credentials that gate mutating calls.
pub struct JwtAuthority {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: Option<String>,
    audience: Option<String>,
    ttl_seconds: i64,
}

impl JwtAuthority {
    pub fn new(config: &JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::default();

        if let Some(ref issuer) = config.issuer {
            validation.set_issuer(&[issuer]);
        }

        if let Some(ref audience) = config.audience {
            validation.set_audience(&[audience]);
        }

        Self {
            encoding_key,
            decoding_key,
            validation,
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            ttl_seconds: config.ttl_seconds,
        }
    }

    pub fn issue(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            exp: now + self.ttl_seconds,
            iat: now,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))
    }

    pub fn validate(&self, token: &str) -> Result<Claims, AppError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AppError::Auth(format!("Invalid token: {}", e)))?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-for-testing".to_string(),
            issuer: None,
            audience: None,
            ttl_seconds: 3600,
        }
    }

    #[test]
    fn test_issue_and_validate_round_trip() {
        let authority = JwtAuthority::new(&create_test_config());
        let user_id = Uuid::new_v4();

        let token = authority.issue(user_id).unwrap();
        let claims = authority.validate(&token).unwrap();

        assert_eq!(claims.user_id(), user_id.to_string());
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_invalid_token() {
        let authority = JwtAuthority::new(&create_test_config());
        assert!(authority.validate("invalid-token").is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let authority = JwtAuthority::new(&create_test_config());
        let token = authority.issue(Uuid::new_v4()).unwrap();

        let other = JwtAuthority::new(&JwtConfig {
            secret: "a-different-secret".to_string(),
            issuer: None,
            audience: None,
            ttl_seconds: 3600,
        });

        assert!(other.validate(&token).is_err());
    }
}
