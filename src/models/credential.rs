//! Credential models and auth DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered login identity
///
/// `ref_id` optionally links the credential to a domain record (teacher,
/// student, admin). The link is opaque at this layer and never validated
/// for existence.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Credential {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub ref_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Registration request
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub role: String,
    pub ref_id: Option<String>,
}

/// Registration response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub id: Uuid,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
}

impl LoginResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_shape() {
        let resp = LoginResponse::bearer("tok".to_string());
        let json = serde_json::to_value(&resp).unwrap();

        assert_eq!(json["access_token"], "tok");
        assert_eq!(json["token_type"], "bearer");
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let credential = Credential {
            id: Uuid::new_v4(),
            email: "a@x.com".to_string(),
            password_hash: "secret-hash".to_string(),
            role: "teacher".to_string(),
            ref_id: None,
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&credential).unwrap();
        assert!(!json.contains("secret-hash"));
    }
}
