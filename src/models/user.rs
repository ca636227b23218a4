//! User model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::UserRole;
use crate::error::AppError;

/// Full user model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub employee_number: Option<String>,
    pub hire_date: Option<NaiveDate>,
    /// Stored signature image
    pub signature_url: Option<String>,
    /// Argon2 hash of the signing PIN
    #[serde(skip_serializing, default)]
    pub signing_pin_hash: Option<String>,
    pub notes: Option<String>,
    pub crea_date: Option<DateTime<Utc>>,
    pub modif_date: Option<DateTime<Utc>>,
}

impl User {
    pub fn has_signing_pin(&self) -> bool {
        self.signing_pin_hash.is_some()
    }
}

/// User as returned by the API
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    #[serde(flatten)]
    pub user: User,
    pub has_signing_pin: bool,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let has_signing_pin = user.has_signing_pin();
        Self { user, has_signing_pin }
    }
}

/// Short user representation for lists
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct UserShort {
    pub id: i32,
    pub name: String,
    pub role: UserRole,
    pub department: Option<String>,
}

/// User query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct UserQuery {
    /// Search by name or email
    pub name: Option<String>,
    pub role: Option<UserRole>,
}

/// Create user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    pub role: UserRole,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub employee_number: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Update user request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateUser {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub employee_number: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Update own signature image
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateSignature {
    #[validate(url(message = "Invalid signature URL"))]
    pub signature_url: String,
}

/// Set or change own signing PIN
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSigningPin {
    /// Required when a PIN is already set
    pub current_pin: Option<String>,
    /// 4 to 8 digits
    pub new_pin: String,
}

/// JWT claims issued by the identity provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub user_id: i32,
    pub role: UserRole,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Encode the claims (used by tooling and tests; production tokens come from the identity provider)
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    // Authorization checks
    pub fn require_role(&self, minimum: UserRole) -> Result<(), AppError> {
        if self.role.at_least(minimum) {
            Ok(())
        } else {
            Err(AppError::Authorization(format!("Role {} or above required", minimum)))
        }
    }

    pub fn is_manager(&self) -> bool {
        self.role.at_least(UserRole::Manager)
    }

    pub fn is_admin(&self) -> bool {
        self.role.at_least(UserRole::Admin)
    }

    pub fn require_manager(&self) -> Result<(), AppError> {
        self.require_role(UserRole::Manager)
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Authorization("Administrator privileges required".to_string()))
        }
    }

    /// Managers and client managers may read fleet-wide reports
    pub fn require_report_access(&self) -> Result<(), AppError> {
        if self.is_manager() || self.role == UserRole::ClientManager {
            Ok(())
        } else {
            Err(AppError::Authorization("Insufficient rights to read reports".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(role: UserRole) -> UserClaims {
        let now = Utc::now().timestamp();
        UserClaims {
            sub: "tech@plant.example".to_string(),
            user_id: 12,
            role,
            exp: now + 3600,
            iat: now,
        }
    }

    #[test]
    fn test_token_round_trip() {
        let token = claims(UserRole::Supervisor).create_token("secret").unwrap();
        let parsed = UserClaims::from_token(&token, "secret").unwrap();
        assert_eq!(parsed.user_id, 12);
        assert_eq!(parsed.role, UserRole::Supervisor);
    }

    #[test]
    fn test_token_wrong_secret() {
        let token = claims(UserRole::Admin).create_token("secret").unwrap();
        assert!(UserClaims::from_token(&token, "other").is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let mut expired = claims(UserRole::Admin);
        expired.exp = Utc::now().timestamp() - 3600;
        let token = expired.create_token("secret").unwrap();
        assert!(UserClaims::from_token(&token, "secret").is_err());
    }

    #[test]
    fn test_report_access() {
        assert!(claims(UserRole::ClientManager).require_report_access().is_ok());
        assert!(claims(UserRole::Manager).require_report_access().is_ok());
        assert!(claims(UserRole::Technician).require_report_access().is_err());
    }

    #[test]
    fn test_admin_checks() {
        assert!(claims(UserRole::Superadmin).require_admin().is_ok());
        assert!(claims(UserRole::Manager).require_admin().is_err());
        assert!(claims(UserRole::ClientManager).require_manager().is_err());
    }

    #[test]
    fn test_pin_hash_not_serialized() {
        let user = User {
            id: 1,
            name: "Thandi Mokoena".to_string(),
            email: "thandi@plant.example".to_string(),
            role: UserRole::Supervisor,
            phone: None,
            department: None,
            employee_number: None,
            hire_date: None,
            signature_url: None,
            signing_pin_hash: Some("$argon2id$...".to_string()),
            notes: None,
            crea_date: None,
            modif_date: None,
        };
        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        assert!(json.get("signing_pin_hash").is_none());
        assert_eq!(json["has_signing_pin"], true);
        assert_eq!(json["role"], "supervisor");
    }
}
