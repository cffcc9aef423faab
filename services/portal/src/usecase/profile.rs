use crate::domain::repository::UserRepository;
use crate::domain::types::{Profile, User};
use crate::error::PortalError;

// ── GetProfile ───────────────────────────────────────────────────────────────

pub struct GetProfileUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> GetProfileUseCase<U> {
    pub async fn execute(&self, email: &str) -> Result<User, PortalError> {
        self.users
            .find_by_email(email)
            .await?
            .ok_or(PortalError::UserNotFound)
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

pub struct UpdateProfileUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> UpdateProfileUseCase<U> {
    pub async fn execute(&self, email: &str, profile: Profile) -> Result<Profile, PortalError> {
        if !profile.is_complete() {
            return Err(PortalError::MissingFields);
        }
        if !self.users.update_profile(email, &profile).await? {
            return Err(PortalError::UserNotFound);
        }
        Ok(profile)
    }
}
