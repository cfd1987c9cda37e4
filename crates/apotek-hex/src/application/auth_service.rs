use crate::application::password::{hash_password, verify_password};
use crate::errors::AppError;
use apotek_types::domain::account::{Account, NewAccount, RegisterRequest};
use apotek_types::domain::credentials::Credentials;
use apotek_types::ports::account_repository::AccountRepository;

pub const REGISTERED: &str = "Register berhasil";
pub const LOGIN_FAILED: &str = "Login gagal";

pub struct AuthService<R: AccountRepository> {
    repo: R,
}

impl<R: AccountRepository> AuthService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn register(&self, req: RegisterRequest) -> Result<Account, AppError> {
        let reg = req
            .validate()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        let password_hash = hash_password(&reg.password)?;
        let account = self
            .repo
            .create(NewAccount {
                name: reg.name,
                email: reg.email,
                password_hash,
            })
            .await?;
        tracing::info!(id = account.id, "account registered");
        Ok(account)
    }

    /// First account under the email whose password verifies.
    pub async fn login(&self, creds: Credentials) -> Result<Account, AppError> {
        let (email, password) = creds
            .validate()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        self.repo
            .find_by_email(&email)
            .await?
            .into_iter()
            .find(|a| verify_password(&password, &a.password_hash))
            .ok_or_else(|| AppError::Unauthorized(LOGIN_FAILED.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_req(password: &str) -> RegisterRequest {
        RegisterRequest {
            name: Some("Rudi".into()),
            email: Some("rudi@apotek.id".into()),
            password: Some(password.into()),
        }
    }

    fn creds(password: &str) -> Credentials {
        Credentials {
            email: Some("rudi@apotek.id".into()),
            password: Some(password.into()),
        }
    }

    #[tokio::test]
    async fn register_then_login() {
        let svc = AuthService::new(apotek_repo::memory::InMemoryAccountRepo::new());
        let account = svc.register(register_req("rahasia")).await.unwrap();
        assert_ne!(account.password_hash, "rahasia");

        let logged_in = svc.login(creds("rahasia")).await.unwrap();
        assert_eq!(logged_in.id, account.id);
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let svc = AuthService::new(apotek_repo::memory::InMemoryAccountRepo::new());
        svc.register(register_req("rahasia")).await.unwrap();
        let res = svc.login(creds("salah")).await;
        assert!(matches!(res, Err(AppError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn login_picks_account_whose_password_matches() {
        let svc = AuthService::new(apotek_repo::memory::InMemoryAccountRepo::new());
        svc.register(register_req("pertama")).await.unwrap();
        let second = svc.register(register_req("kedua")).await.unwrap();
        assert_eq!(svc.login(creds("kedua")).await.unwrap().id, second.id);
    }

    #[tokio::test]
    async fn missing_fields_are_bad_requests() {
        let svc = AuthService::new(apotek_repo::memory::InMemoryAccountRepo::new());
        let mut req = register_req("rahasia");
        req.name = None;
        assert!(matches!(
            svc.register(req).await,
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            svc.login(Credentials::default()).await,
            Err(AppError::BadRequest(_))
        ));
    }
}
