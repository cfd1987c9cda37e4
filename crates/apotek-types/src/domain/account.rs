use serde::{Deserialize, Serialize};

use super::present;

/// A row of the auth service's `users` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing)]
    pub password_hash: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Validated registration; the password is still plain text here and gets
/// hashed by the application layer.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl RegisterRequest {
    pub fn validate(self) -> anyhow::Result<Registration> {
        match (
            present(self.name),
            present(self.email),
            present(self.password),
        ) {
            (Some(name), Some(email), Some(password)) => Ok(Registration {
                name,
                email,
                password,
            }),
            _ => anyhow::bail!("name, email, and password are required"),
        }
    }
}
