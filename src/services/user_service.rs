use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::password,
    errors::{AppError, AppResult},
    models::domain::User,
    models::dto::request::{LoginRequest, RegisterRequest},
    repositories::UserRepository,
};

pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<User> {
        request.validate()?;

        if self
            .users
            .find_by_username(&request.username)
            .await?
            .is_some()
        {
            return Err(AppError::AlreadyExists(format!(
                "Username '{}' is taken",
                request.username
            )));
        }

        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::AlreadyExists(
                "An account with this email already exists".to_string(),
            ));
        }

        let password_hash = password::hash_password(&request.password)?;
        let user = User::new(&request.username, &request.email, &password_hash);

        self.users.create(user).await
    }

    /// Verify credentials. The same message is returned whether the email is
    /// unknown or the password is wrong.
    pub async fn authenticate(&self, request: LoginRequest) -> AppResult<User> {
        request.validate()?;

        let user = self
            .users
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

        if !password::verify_password(&request.password, &user.password_hash)? {
            return Err(AppError::Unauthorized(
                "Invalid email or password".to_string(),
            ));
        }

        Ok(user)
    }

    pub async fn get_user(&self, id: &str) -> AppResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User with id '{}' not found", id)))
    }
}
