use advising_domain::email::normalize_email;
use advising_domain::password::meets_password_policy;

use crate::crypto::hash_password;
use crate::domain::repository::UserRepository;
use crate::error::PortalError;

pub struct ChangePasswordInput {
    pub email: String,
    pub new_password: String,
}

/// Final step of the forgot-password flow. Trusts that the caller verified a
/// forgot-password code first; no proof is carried between the two requests.
pub struct ChangePasswordUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> ChangePasswordUseCase<U> {
    pub async fn execute(&self, input: ChangePasswordInput) -> Result<(), PortalError> {
        let email = normalize_email(&input.email);
        if email.is_empty() || input.new_password.is_empty() {
            return Err(PortalError::MissingCredentials);
        }
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(PortalError::UserNotFound)?;
        if user.is_admin {
            return Err(PortalError::AdminPasswordReset);
        }
        if !meets_password_policy(&input.new_password) {
            return Err(PortalError::WeakPassword);
        }

        let hash = hash_password(&input.new_password)?;
        if !self.users.update_password(&email, &hash).await? {
            return Err(PortalError::UserNotFound);
        }
        tracing::info!(email = %email, "password changed");
        Ok(())
    }
}
