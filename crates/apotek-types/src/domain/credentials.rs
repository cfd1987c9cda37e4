use serde::{Deserialize, Serialize};

use super::present;

/// Login body shared by the auth and user services.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    /// Returns `(email, password)` when both are present.
    pub fn validate(self) -> anyhow::Result<(String, String)> {
        match (present(self.email), present(self.password)) {
            (Some(email), Some(password)) => Ok((email, password)),
            _ => anyhow::bail!("email and password are required"),
        }
    }
}
