use serde::{Deserialize, Serialize};

use super::present;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub email: String,
    pub phone: String,
    pub shift: String,
    #[serde(default, skip_serializing)]
    pub password_hash: String,
}

/// Body of `POST /users` and `PUT /users/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserRequest {
    pub name: Option<String>,
    pub role: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub shift: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub name: String,
    pub role: String,
    pub email: String,
    pub phone: String,
    pub shift: String,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub profile: UserProfile,
    pub password_hash: String,
}

/// Replacement profile; the stored hash is kept when `password_hash` is `None`.
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub profile: UserProfile,
    pub password_hash: Option<String>,
}

/// Issued on a successful `POST /users/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSession {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

impl UserRequest {
    fn profile(
        name: Option<String>,
        role: Option<String>,
        email: Option<String>,
        phone: Option<String>,
        shift: Option<String>,
    ) -> Option<UserProfile> {
        Some(UserProfile {
            name: present(name)?,
            role: present(role)?,
            email: present(email)?,
            phone: present(phone)?,
            shift: present(shift)?,
        })
    }

    /// Profile plus the plain-text password; all six fields are required.
    pub fn into_new(self) -> anyhow::Result<(UserProfile, String)> {
        let password = present(self.password);
        match (
            Self::profile(self.name, self.role, self.email, self.phone, self.shift),
            password,
        ) {
            (Some(profile), Some(password)) => Ok((profile, password)),
            _ => anyhow::bail!("name, role, email, phone, shift, and password are required"),
        }
    }

    /// Profile plus an optional new password.
    pub fn into_update(self) -> anyhow::Result<(UserProfile, Option<String>)> {
        let password = present(self.password);
        match Self::profile(self.name, self.role, self.email, self.phone, self.shift) {
            Some(profile) => Ok((profile, password)),
            None => anyhow::bail!("name, role, email, phone, and shift are required"),
        }
    }
}

impl User {
    pub fn from_profile(id: i64, profile: UserProfile, password_hash: String) -> Self {
        Self {
            id,
            name: profile.name,
            role: profile.role,
            email: profile.email,
            phone: profile.phone,
            shift: profile.shift,
            password_hash,
        }
    }

    pub fn apply(&mut self, update: UserUpdate) {
        let UserProfile {
            name,
            role,
            email,
            phone,
            shift,
        } = update.profile;
        self.name = name;
        self.role = role;
        self.email = email;
        self.phone = phone;
        self.shift = shift;
        if let Some(hash) = update.password_hash {
            self.password_hash = hash;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> UserRequest {
        UserRequest {
            name: Some("Budi".into()),
            role: Some("apoteker".into()),
            email: Some("budi@apotek.id".into()),
            phone: Some("0812".into()),
            shift: Some("pagi".into()),
            password: Some("rahasia".into()),
        }
    }

    #[test]
    fn create_needs_password_but_update_does_not() {
        let mut req = full_request();
        req.password = None;
        assert!(req.clone().into_new().is_err());
        let (profile, password) = req.into_update().unwrap();
        assert_eq!(profile.shift, "pagi");
        assert!(password.is_none());
    }

    #[test]
    fn blank_profile_field_is_rejected() {
        let mut req = full_request();
        req.phone = Some("".into());
        assert!(req.clone().into_new().is_err());
        assert!(req.into_update().is_err());
    }

    #[test]
    fn apply_keeps_hash_without_new_password() {
        let (profile, _) = full_request().into_new().unwrap();
        let mut user = User::from_profile(7, profile.clone(), "old-hash".into());
        let mut changed = profile;
        changed.shift = "malam".into();
        user.apply(UserUpdate {
            profile: changed,
            password_hash: None,
        });
        assert_eq!(user.shift, "malam");
        assert_eq!(user.password_hash, "old-hash");
    }
}
