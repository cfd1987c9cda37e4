use crate::application::password::{hash_password, verify_password};
use crate::application::token::TokenIssuer;
use crate::errors::AppError;
use apotek_types::domain::credentials::Credentials;
use apotek_types::domain::user::{NewUser, User, UserRequest, UserSession, UserUpdate};
use apotek_types::ports::user_repository::UserRepository;

const NOT_FOUND: &str = "User not found";
const EMAIL_TAKEN: &str = "Email already registered";
const INVALID_LOGIN: &str = "Invalid email or password";

pub struct UserService<R: UserRepository> {
    repo: R,
    tokens: TokenIssuer,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: R, tokens: TokenIssuer) -> Self {
        Self { repo, tokens }
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        Ok(self.repo.list().await?)
    }

    pub async fn get_user(&self, id: i64) -> Result<User, AppError> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))
    }

    /// Rejects an email held by any user other than `except`.
    async fn ensure_email_free(&self, email: &str, except: Option<i64>) -> Result<(), AppError> {
        match self.repo.find_by_email(email).await? {
            Some(owner) if Some(owner.id) != except => Err(AppError::BadRequest(EMAIL_TAKEN.into())),
            _ => Ok(()),
        }
    }

    pub async fn create_user(&self, req: UserRequest) -> Result<User, AppError> {
        let (profile, password) = req
            .into_new()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        self.ensure_email_free(&profile.email, None).await?;
        let password_hash = hash_password(&password)?;
        let user = self
            .repo
            .create(NewUser {
                profile,
                password_hash,
            })
            .await?;
        tracing::info!(id = user.id, "user created");
        Ok(user)
    }

    pub async fn update_user(&self, id: i64, req: UserRequest) -> Result<User, AppError> {
        let (profile, password) = req
            .into_update()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        self.ensure_email_free(&profile.email, Some(id)).await?;
        let password_hash = password.as_deref().map(hash_password).transpose()?;
        let user = self
            .repo
            .update(
                id,
                UserUpdate {
                    profile,
                    password_hash,
                },
            )
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))?;
        tracing::info!(id, "user updated");
        Ok(user)
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), AppError> {
        if self.repo.delete(id).await? {
            tracing::info!(id, "user deleted");
            Ok(())
        } else {
            Err(AppError::NotFound(NOT_FOUND.into()))
        }
    }

    pub async fn login(&self, creds: Credentials) -> Result<UserSession, AppError> {
        let (email, password) = creds
            .validate()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        let user = self
            .repo
            .find_by_email(&email)
            .await?
            .filter(|u| verify_password(&password, &u.password_hash))
            .ok_or_else(|| AppError::Unauthorized(INVALID_LOGIN.into()))?;
        let token = self.tokens.issue(&user)?;
        Ok(UserSession {
            access_token: token.access_token,
            token_type: token.token_type,
            expires_in: token.expires_in,
            user,
        })
    }
}
