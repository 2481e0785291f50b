//! User registration and credential verification.

use crate::auth::{hash_password, verify_password};
use crate::error::{AppError, Result};
use crate::model::{LoginRequest, RegisterRequest, User};

use super::CatalogService;

impl CatalogService {
    pub async fn register_user(&self, req: RegisterRequest) -> Result<User> {
        req.validate()?;

        if self.store.user_by_email(&req.email).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "user '{}' is already registered",
                req.email
            )));
        }

        let user = User {
            id: uuid::Uuid::new_v4(),
            email: req.email,
            password_hash: hash_password(&req.password)?,
        };

        let user = self.store.insert_user(user).await?;
        tracing::info!(user_id = %user.id, "User registered");

        Ok(user)
    }

    /// Verify credentials and return the account. Unknown email and wrong
    /// password are indistinguishable to the caller.
    pub async fn authenticate_user(&self, req: LoginRequest) -> Result<User> {
        let user = self
            .store
            .user_by_email(&req.email)
            .await?
            .ok_or_else(|| AppError::Auth("Invalid credentials".to_string()))?;

        if !verify_password(&req.password, &user.password_hash)? {
            return Err(AppError::Auth("Invalid credentials".to_string()));
        }

        Ok(user)
    }
}
