use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::{AuthenticatedUser, Claims};
use crate::features::users::models::UserRole;

/// A freshly issued bearer token with its lifetime.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_in: i64,
}

/// Issues and validates HS256 bearer tokens with a fixed shared secret.
///
/// Validation is all-or-nothing: signature, issuer and expiry are checked
/// together and any single failure rejects the token.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    token_ttl_secs: i64,
    leeway_secs: u64,
}

impl TokenService {
    pub fn new(config: AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.issuer,
            token_ttl_secs: config.token_ttl.as_secs() as i64,
            leeway_secs: config.jwt_leeway.as_secs(),
        }
    }

    /// Sign a token carrying the user's identity and role claims.
    pub fn issue_token(&self, user_id: Uuid, email: &str, role: UserRole) -> Result<IssuedToken> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            role,
            iss: self.issuer.clone(),
            iat: now,
            exp: now + self.token_ttl_secs,
        };

        let access_token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))?;

        Ok(IssuedToken {
            access_token,
            expires_in: self.token_ttl_secs,
        })
    }

    /// Validate signature, issuer and expiry, returning the embedded identity.
    pub fn validate_token(&self, token: &str) -> Result<AuthenticatedUser> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.leeway = self.leeway_secs;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))?;

        let claims = token_data.claims;
        Ok(AuthenticatedUser {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(issuer: &str, ttl_secs: u64) -> AuthConfig {
        AuthConfig {
            jwt_secret: "0123456789abcdef0123456789abcdef".to_string(),
            issuer: issuer.to_string(),
            token_ttl: Duration::from_secs(ttl_secs),
            jwt_leeway: Duration::from_secs(0),
        }
    }

    #[test]
    fn issued_token_validates_until_expiry() {
        let service = TokenService::new(config("eshop-core-test", 3600));
        let user_id = Uuid::new_v4();

        let issued = service
            .issue_token(user_id, "user@example.com", UserRole::Customer)
            .unwrap();
        assert_eq!(issued.expires_in, 3600);

        let user = service.validate_token(&issued.access_token).unwrap();
        assert_eq!(user.user_id, user_id);
        assert_eq!(user.email, "user@example.com");
        assert_eq!(user.role, UserRole::Customer);
    }

    #[test]
    fn expired_token_is_rejected() {
        let conf = config("eshop-core-test", 3600);
        let service = TokenService::new(conf.clone());

        // Sign a token that expired an hour ago with the same secret
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "user@example.com".to_string(),
            role: UserRole::Customer,
            iss: conf.issuer.clone(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(conf.jwt_secret.as_bytes()),
        )
        .unwrap();

        assert!(service.validate_token(&token).is_err());
    }

    #[test]
    fn altered_signature_is_rejected() {
        let service = TokenService::new(config("eshop-core-test", 3600));
        let issued = service
            .issue_token(Uuid::new_v4(), "user@example.com", UserRole::Admin)
            .unwrap();

        let mut tampered = issued.access_token.clone();
        // Flip the last character of the signature segment
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        assert!(service.validate_token(&tampered).is_err());
    }

    #[test]
    fn wrong_issuer_is_rejected() {
        let issuing = TokenService::new(config("other-service", 3600));
        let validating = TokenService::new(config("eshop-core-test", 3600));

        let issued = issuing
            .issue_token(Uuid::new_v4(), "user@example.com", UserRole::Customer)
            .unwrap();

        assert!(validating.validate_token(&issued.access_token).is_err());
    }
}
