//! Daily diary service: editing and the sign-off / finalise workflow

use chrono::Utc;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        diary::{CreateDailyDiary, DailyDiary, DailyDiaryQuery, UpdateDailyDiary},
        enums::UserRole,
        signature::Signature,
        user::{User, UserClaims},
    },
    repository::Repository,
};

use super::users::verify_pin;

/// Finalised diaries can no longer be edited or deleted
pub fn check_not_finalised(diary: &DailyDiary) -> AppResult<()> {
    if diary.is_finalised {
        Err(AppError::BusinessRule(format!("Daily diary {} is finalised and locked", diary.id)))
    } else {
        Ok(())
    }
}

/// Client managers and administrators finalise diaries
pub fn can_finalise(claims: &UserClaims) -> bool {
    claims.role == UserRole::ClientManager || claims.is_admin()
}

fn signature_of(user: &User) -> Signature {
    Signature {
        user_id: user.id,
        name: user.name.clone(),
        signature_url: user.signature_url.clone(),
        signed_at: Utc::now(),
    }
}

#[derive(Clone)]
pub struct DiariesService {
    repository: Repository,
}

impl DiariesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &DailyDiaryQuery) -> AppResult<Vec<DailyDiary>> {
        self.repository.diaries_list(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<DailyDiary> {
        self.repository.diaries_get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateDailyDiary, created_by: i32) -> AppResult<DailyDiary> {
        data.validate()?;
        let diary = self.repository.diaries_create(data, created_by).await?;
        tracing::info!(diary_id = diary.id, diary_date = %diary.diary_date, "Daily diary created");
        Ok(diary)
    }

    pub async fn update(&self, id: i32, data: &UpdateDailyDiary) -> AppResult<DailyDiary> {
        data.validate()?;
        let current = self.repository.diaries_get_by_id(id).await?;
        if let Err(e) = check_not_finalised(&current) {
            tracing::warn!(diary_id = id, "Diary update rejected: {}", e);
            return Err(e);
        }
        let diary = self.repository.diaries_update(id, data).await?;
        tracing::info!(diary_id = id, "Daily diary updated");
        Ok(diary)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let current = self.repository.diaries_get_by_id(id).await?;
        if let Err(e) = check_not_finalised(&current) {
            tracing::warn!(diary_id = id, "Diary delete rejected: {}", e);
            return Err(e);
        }
        self.repository.diaries_delete(id).await?;
        tracing::info!(diary_id = id, "Daily diary deleted");
        Ok(())
    }

    /// Contractor sign-off by a supervisor-level user
    pub async fn sign_off(&self, id: i32, pin: &str, claims: &UserClaims) -> AppResult<DailyDiary> {
        claims.require_role(UserRole::Supervisor)?;
        let diary = self.repository.diaries_get_by_id(id).await?;
        if diary.is_signed_off {
            return Err(AppError::Conflict(format!("Daily diary {} is already signed off", id)));
        }

        let signer = self.repository.users_get_by_id(claims.user_id).await?;
        if let Err(e) = verify_pin(&signer, pin) {
            tracing::warn!(diary_id = id, user_id = signer.id, "Diary sign-off rejected: {}", e);
            return Err(e);
        }

        let diary = self.repository.diaries_sign_off(id, &signature_of(&signer)).await?;
        tracing::info!(diary_id = id, user_id = signer.id, "Daily diary signed off");
        Ok(diary)
    }

    /// Client approval; locks the diary
    pub async fn finalise(&self, id: i32, pin: &str, claims: &UserClaims) -> AppResult<DailyDiary> {
        if !can_finalise(claims) {
            return Err(AppError::Authorization(
                "Only client managers or administrators can finalise diaries".to_string(),
            ));
        }
        let diary = self.repository.diaries_get_by_id(id).await?;
        if diary.is_finalised {
            return Err(AppError::Conflict(format!("Daily diary {} is already finalised", id)));
        }
        if !diary.is_signed_off {
            return Err(AppError::BusinessRule(format!(
                "Daily diary {} must be signed off before it is finalised",
                id
            )));
        }

        let signer = self.repository.users_get_by_id(claims.user_id).await?;
        if let Err(e) = verify_pin(&signer, pin) {
            tracing::warn!(diary_id = id, user_id = signer.id, "Diary finalise rejected: {}", e);
            return Err(e);
        }

        let diary = self.repository.diaries_finalise(id, &signature_of(&signer)).await?;
        tracing::info!(diary_id = id, user_id = signer.id, "Daily diary finalised");
        Ok(diary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sqlx::types::Json;

    fn diary(is_signed_off: bool, is_finalised: bool) -> DailyDiary {
        DailyDiary {
            id: 11,
            diary_date: NaiveDate::from_ymd_opt(2024, 8, 14).unwrap(),
            shift: Some("Day".to_string()),
            contractor: None,
            manpower: Json(vec![]),
            work_items: Json(vec![]),
            delays: Json(vec![]),
            comments: None,
            contractor_signature: None,
            client_signature: None,
            is_signed_off,
            is_finalised,
            created_by: 2,
            crea_date: None,
            modif_date: None,
        }
    }

    fn claims(role: UserRole) -> UserClaims {
        UserClaims {
            sub: "signer".to_string(),
            user_id: 9,
            role,
            exp: 0,
            iat: 0,
        }
    }

    #[test]
    fn test_finalised_diary_locked() {
        assert!(check_not_finalised(&diary(true, false)).is_ok());
        assert!(matches!(
            check_not_finalised(&diary(true, true)),
            Err(AppError::BusinessRule(_))
        ));
    }

    #[test]
    fn test_finalise_roles() {
        assert!(can_finalise(&claims(UserRole::ClientManager)));
        assert!(can_finalise(&claims(UserRole::Admin)));
        assert!(can_finalise(&claims(UserRole::Superadmin)));
        assert!(!can_finalise(&claims(UserRole::Manager)));
        assert!(!can_finalise(&claims(UserRole::Supervisor)));
    }

    #[test]
    fn test_signature_copies_user_details() {
        let user = User {
            id: 9,
            name: "Lerato Dube".to_string(),
            email: "lerato@client.example".to_string(),
            role: UserRole::ClientManager,
            phone: None,
            department: None,
            employee_number: None,
            hire_date: None,
            signature_url: Some("https://files.example/sig/9.png".to_string()),
            signing_pin_hash: None,
            notes: None,
            crea_date: None,
            modif_date: None,
        };
        let signature = signature_of(&user);
        assert_eq!(signature.user_id, 9);
        assert_eq!(signature.name, "Lerato Dube");
        assert_eq!(signature.signature_url.as_deref(), Some("https://files.example/sig/9.png"));
    }
}
