//! Bearer token issuance and verification
//! Symmetric HS256 signing with a process-wide secret

use crate::{config::AppConfig, error::AppError};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

/// Claims embedded in an access token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (the credential's email)
    pub sub: String,

    /// Role name (admin / teacher / student)
    pub role: String,

    /// Opaque link to a domain record, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_id: Option<String>,

    /// Issued at
    pub iat: i64,

    /// Expiration
    pub exp: i64,
}

/// Token service
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validity_secs: u64,
}

impl TokenService {
    /// Create token service from config
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let secret = config.security.token_secret.expose_secret();

        // Ensure secret is at least 32 bytes for HS256
        if secret.len() < 32 {
            return Err(AppError::Config(
                "Token secret too short (min 32 chars)".to_string(),
            ));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validity_secs: config.security.token_validity_secs,
        })
    }

    /// Issue a signed token for the given identity claims
    ///
    /// Expiry is always issuance time plus the configured validity window.
    pub fn issue(
        &self,
        subject: &str,
        role: &str,
        ref_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let expiration = now + Duration::seconds(self.validity_secs as i64);

        let claims = Claims {
            sub: subject.to_string(),
            role: role.to_string(),
            ref_id: ref_id.map(|s| s.to_string()),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode access token: {:?}", e);
            AppError::Internal(format!("Failed to encode access token: {}", e))
        })
    }

    /// Validate signature and expiry, returning the decoded claims
    ///
    /// Signature mismatch and expiry are deliberately not distinguished:
    /// every failure collapses into the same generic outcome.
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AppError> {
        // Expiry is checked against the caller-supplied clock below,
        // not the library's wall clock.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| {
                tracing::debug!("Token validation failed: {:?}", e);
                AppError::Unauthorized
            })?
            .claims;

        if now.timestamp() >= claims.exp {
            tracing::debug!(sub = %claims.sub, "Token expired");
            return Err(AppError::Unauthorized);
        }

        Ok(claims)
    }

    /// Configured validity window in seconds
    pub fn validity_secs(&self) -> u64 {
        self.validity_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        AppConfig, DatabaseConfig, LoggingConfig, SecurityConfig, ServerConfig,
    };
    use secrecy::Secret;

    // Mock config for testing
    fn test_config() -> AppConfig {
        AppConfig {
            server: ServerConfig {
                addr: "127.0.0.1:8000".to_string(),
                graceful_shutdown_timeout_secs: 30,
            },
            database: DatabaseConfig {
                url: Secret::new("postgresql://localhost/test".to_string()),
                max_connections: 10,
                min_connections: 1,
                acquire_timeout_secs: 30,
                idle_timeout_secs: 600,
                max_lifetime_secs: 1800,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "json".to_string(),
            },
            security: SecurityConfig {
                token_secret: Secret::new("test_secret_key_32_characters_long!".to_string()),
                token_validity_secs: 86400,
                trust_proxy: true,
            },
        }
    }

    #[test]
    fn test_issue_and_verify() {
        let service = TokenService::from_config(&test_config()).unwrap();
        let now = Utc::now();

        let token = service
            .issue("a@x.com", "teacher", Some("t-17"), now)
            .unwrap();

        let claims = service.verify(&token, now).unwrap();
        assert_eq!(claims.sub, "a@x.com");
        assert_eq!(claims.role, "teacher");
        assert_eq!(claims.ref_id.as_deref(), Some("t-17"));
        assert_eq!(claims.exp, now.timestamp() + 86400);
    }

    #[test]
    fn test_token_without_ref_id() {
        let service = TokenService::from_config(&test_config()).unwrap();
        let now = Utc::now();

        let token = service.issue("b@x.com", "student", None, now).unwrap();
        let claims = service.verify(&token, now).unwrap();
        assert!(claims.ref_id.is_none());
    }

    #[test]
    fn test_validity_window_boundaries() {
        let service = TokenService::from_config(&test_config()).unwrap();
        let issued = Utc::now();

        let token = service.issue("a@x.com", "teacher", None, issued).unwrap();

        // Valid at issuance and just before the 24 h mark
        assert!(service.verify(&token, issued).is_ok());
        assert!(service
            .verify(&token, issued + Duration::seconds(86399))
            .is_ok());

        // Invalid at and after the 24 h mark
        assert!(service
            .verify(&token, issued + Duration::seconds(86400))
            .is_err());
        assert!(service
            .verify(&token, issued + Duration::days(2))
            .is_err());
    }

    #[test]
    fn test_garbage_token_fails() {
        let service = TokenService::from_config(&test_config()).unwrap();
        assert!(service.verify("invalid_token", Utc::now()).is_err());
        assert!(service.verify("", Utc::now()).is_err());
    }

    #[test]
    fn test_wrong_secret_fails() {
        let service = TokenService::from_config(&test_config()).unwrap();

        let mut other_config = test_config();
        other_config.security.token_secret =
            Secret::new("another_secret_key_32_characters_!!".to_string());
        let other = TokenService::from_config(&other_config).unwrap();

        let now = Utc::now();
        let token = service.issue("a@x.com", "admin", None, now).unwrap();
        assert!(other.verify(&token, now).is_err());
    }
}
