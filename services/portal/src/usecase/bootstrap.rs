use advising_domain::email::normalize_email;

use crate::crypto::hash_password;
use crate::domain::repository::UserRepository;
use crate::domain::types::{Profile, User};
use crate::error::PortalError;

/// Admin account to ensure at startup.
#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

pub struct BootstrapAdminUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> BootstrapAdminUseCase<U> {
    /// Create the admin if no account has its email. Returns `true` if created.
    pub async fn execute(&self, seed: AdminSeed) -> Result<bool, PortalError> {
        let email = normalize_email(&seed.email);
        if self.users.find_by_email(&email).await?.is_some() {
            tracing::debug!(email = %email, "admin account already present");
            return Ok(false);
        }

        self.users
            .create(&User {
                email: email.clone(),
                password_hash: hash_password(&seed.password)?,
                profile: Profile {
                    first_name: seed.first_name,
                    last_name: seed.last_name,
                    department: "Administration".to_owned(),
                    degree: "N/A".to_owned(),
                    uin: "000000000".to_owned(),
                },
                is_admin: true,
                is_verified: true,
                login_otp: None,
            })
            .await?;
        tracing::info!(email = %email, "admin account created");
        Ok(true)
    }
}
