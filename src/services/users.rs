//! User management and signing PIN service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::user::{
        CreateUser, UpdateSignature, UpdateSigningPin, UpdateUser, User, UserQuery, UserShort,
    },
    repository::Repository,
};

/// A signing PIN is 4 to 8 ASCII digits
pub fn validate_pin_format(pin: &str) -> AppResult<()> {
    if (4..=8).contains(&pin.len()) && pin.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(AppError::Validation("PIN must be 4 to 8 digits".to_string()))
    }
}

/// Hash a PIN using Argon2
pub fn hash_pin(pin: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(pin.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash PIN: {}", e)))?;
    Ok(hash.to_string())
}

/// Check a PIN against the user's stored hash
pub fn verify_pin(user: &User, pin: &str) -> AppResult<()> {
    let hash = user.signing_pin_hash.as_deref().ok_or_else(|| {
        AppError::BusinessRule("A signing PIN must be set before signing".to_string())
    })?;
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal("Invalid PIN hash".to_string()))?;
    Argon2::default()
        .verify_password(pin.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::Authentication("Invalid signing PIN".to_string()))
}

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn search_users(&self, query: &UserQuery) -> AppResult<Vec<UserShort>> {
        self.repository.users_search(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        self.repository.users_get_by_id(id).await
    }

    pub async fn create_user(&self, data: &CreateUser) -> AppResult<User> {
        data.validate()?;
        if self.repository.users_email_exists(&data.email, None).await? {
            return Err(AppError::Conflict("Email already exists".to_string()));
        }
        let user = self.repository.users_create(data).await?;
        tracing::info!(user_id = user.id, role = %user.role, "User created");
        Ok(user)
    }

    pub async fn update_user(&self, id: i32, data: &UpdateUser) -> AppResult<User> {
        data.validate()?;
        if let Some(ref email) = data.email {
            if self.repository.users_email_exists(email, Some(id)).await? {
                return Err(AppError::Conflict("Email already exists".to_string()));
            }
        }
        let user = self.repository.users_update(id, data).await?;
        tracing::info!(user_id = id, "User updated");
        Ok(user)
    }

    pub async fn delete_user(&self, id: i32) -> AppResult<()> {
        self.repository.users_delete(id).await?;
        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }

    /// Store the caller's signature image
    pub async fn update_signature(&self, user_id: i32, data: &UpdateSignature) -> AppResult<User> {
        data.validate()?;
        let user = self
            .repository
            .users_update_signature(user_id, &data.signature_url)
            .await?;
        tracing::info!(user_id, "Signature image updated");
        Ok(user)
    }

    /// Set or change the caller's signing PIN
    pub async fn update_signing_pin(&self, user_id: i32, data: &UpdateSigningPin) -> AppResult<()> {
        validate_pin_format(&data.new_pin)?;
        let user = self.repository.users_get_by_id(user_id).await?;

        // Changing an existing PIN requires the current one
        if user.has_signing_pin() {
            let current = data.current_pin.as_deref().ok_or_else(|| {
                AppError::Validation("Current PIN required to change PIN".to_string())
            })?;
            verify_pin(&user, current)?;
        }

        let hash = hash_pin(&data.new_pin)?;
        self.repository.users_update_signing_pin(user_id, &hash).await?;
        tracing::info!(user_id, "Signing PIN updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::UserRole;

    fn user_with_pin(hash: Option<String>) -> User {
        User {
            id: 4,
            name: "Pieter van Wyk".to_string(),
            email: "pieter@plant.example".to_string(),
            role: UserRole::Supervisor,
            phone: None,
            department: Some("Electrical".to_string()),
            employee_number: None,
            hire_date: None,
            signature_url: None,
            signing_pin_hash: hash,
            notes: None,
            crea_date: None,
            modif_date: None,
        }
    }

    #[test]
    fn test_pin_format() {
        assert!(validate_pin_format("1234").is_ok());
        assert!(validate_pin_format("12345678").is_ok());
        assert!(validate_pin_format("123").is_err());
        assert!(validate_pin_format("123456789").is_err());
        assert!(validate_pin_format("12a4").is_err());
        assert!(validate_pin_format("").is_err());
    }

    #[test]
    fn test_pin_hash_and_verify() {
        let hash = hash_pin("4821").unwrap();
        assert_ne!(hash, "4821");
        let user = user_with_pin(Some(hash));
        assert!(verify_pin(&user, "4821").is_ok());
        assert!(matches!(verify_pin(&user, "4822"), Err(AppError::Authentication(_))));
    }

    #[test]
    fn test_verify_without_pin() {
        let user = user_with_pin(None);
        assert!(matches!(verify_pin(&user, "1234"), Err(AppError::BusinessRule(_))));
    }
}
