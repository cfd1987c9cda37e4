use serde::Deserialize;
use std::env;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_JWT_SECRET: &str = "apotek-development-secret-change-me";
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;
/// One year.
pub const MAX_JWT_EXPIRATION_HOURS: i64 = 8760;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    Auth,
    Products,
    Orders,
    Users,
    Transactions,
    Reviews,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 6] = [
        ServiceKind::Auth,
        ServiceKind::Products,
        ServiceKind::Orders,
        ServiceKind::Users,
        ServiceKind::Transactions,
        ServiceKind::Reviews,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ServiceKind::Auth => "auth",
            ServiceKind::Products => "products",
            ServiceKind::Orders => "orders",
            ServiceKind::Users => "users",
            ServiceKind::Transactions => "transactions",
            ServiceKind::Reviews => "reviews",
        }
    }

    pub fn default_port(self) -> u16 {
        match self {
            ServiceKind::Auth => 3001,
            ServiceKind::Products => 8001,
            ServiceKind::Orders => 3004,
            ServiceKind::Users => 4000,
            ServiceKind::Transactions => 5001,
            ServiceKind::Reviews => 8002,
        }
    }

    fn port_var(self) -> &'static str {
        match self {
            ServiceKind::Auth => "AUTH_PORT",
            ServiceKind::Products => "PRODUCT_PORT",
            ServiceKind::Orders => "ORDER_PORT",
            ServiceKind::Users => "USER_PORT",
            ServiceKind::Transactions => "TRANSACTION_PORT",
            ServiceKind::Reviews => "REVIEW_PORT",
        }
    }

    /// Transactions are backed by the key-value store, so they read `REDIS_URL`.
    fn store_var(self) -> &'static str {
        match self {
            ServiceKind::Auth => "AUTH_DATABASE_URL",
            ServiceKind::Products => "PRODUCT_DATABASE_URL",
            ServiceKind::Orders => "ORDER_DATABASE_URL",
            ServiceKind::Users => "USER_DATABASE_URL",
            ServiceKind::Transactions => "REDIS_URL",
            ServiceKind::Reviews => "REVIEW_DATABASE_URL",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ServiceKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ServiceKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| anyhow::anyhow!("unknown service: {s}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSettings {
    pub kind: ServiceKind,
    pub port: String,
    /// `None` falls back to the adapter's default location.
    pub store_url: Option<String>,
}

#[derive(Clone)]
pub struct Config {
    pub services: Vec<ServiceSettings>,
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("services", &self.services)
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let kinds = match lookup("SERVICES").filter(|s| !s.trim().is_empty()) {
            Some(list) => list
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(ServiceKind::from_str)
                .collect::<anyhow::Result<Vec<_>>>()?,
            None => ServiceKind::ALL.to_vec(),
        };

        let mut services: Vec<ServiceSettings> = Vec::with_capacity(kinds.len());
        for kind in kinds {
            if services.iter().any(|s| s.kind == kind) {
                continue;
            }
            let port = lookup(kind.port_var()).unwrap_or_else(|| kind.default_port().to_string());
            port.parse::<u16>()
                .map_err(|_| anyhow::anyhow!("{} is not a valid port: {port}", kind.port_var()))?;
            services.push(ServiceSettings {
                kind,
                port,
                store_url: lookup(kind.store_var()),
            });
        }

        let jwt_secret = lookup("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET not set, using the development default");
            DEFAULT_JWT_SECRET.to_string()
        });
        let jwt_expiration_hours = match lookup("JWT_EXPIRATION_HOURS") {
            Some(raw) => raw
                .parse()
                .map_err(|_| anyhow::anyhow!("JWT_EXPIRATION_HOURS must be an integer: {raw}"))?,
            None => DEFAULT_JWT_EXPIRATION_HOURS,
        };
        if !(1..=MAX_JWT_EXPIRATION_HOURS).contains(&jwt_expiration_hours) {
            anyhow::bail!(
                "JWT_EXPIRATION_HOURS must be between 1 and {MAX_JWT_EXPIRATION_HOURS}: {jwt_expiration_hours}"
            );
        }

        Ok(Self {
            services,
            jwt_secret,
            jwt_expiration_hours,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_run_every_service() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.services.len(), 6);
        let transactions = config
            .services
            .iter()
            .find(|s| s.kind == ServiceKind::Transactions)
            .unwrap();
        assert_eq!(transactions.port, "5001");
        assert_eq!(transactions.store_url, None);
        assert_eq!(config.jwt_expiration_hours, 24);
    }

    #[test]
    fn selection_and_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("SERVICES", "Products, transactions,products"),
            ("PRODUCT_PORT", "9001"),
            ("PRODUCT_DATABASE_URL", "sqlite://tmp/p.db"),
            ("REDIS_URL", "redis://cache:6379"),
            ("JWT_EXPIRATION_HOURS", "2"),
        ]))
        .unwrap();
        assert_eq!(
            config.services,
            vec![
                ServiceSettings {
                    kind: ServiceKind::Products,
                    port: "9001".into(),
                    store_url: Some("sqlite://tmp/p.db".into()),
                },
                ServiceSettings {
                    kind: ServiceKind::Transactions,
                    port: "5001".into(),
                    store_url: Some("redis://cache:6379".into()),
                },
            ]
        );
        assert_eq!(config.jwt_expiration_hours, 2);
    }

    #[test]
    fn rejects_unknown_service_and_bad_port() {
        assert!(Config::from_lookup(lookup(&[("SERVICES", "inventory")])).is_err());
        assert!(Config::from_lookup(lookup(&[("USER_PORT", "http")])).is_err());
        assert!(Config::from_lookup(lookup(&[("JWT_EXPIRATION_HOURS", "soon")])).is_err());
    }

    #[test]
    fn jwt_expiration_must_stay_in_range() {
        for raw in ["0", "-1", "8761", "9223372036854775807"] {
            assert!(
                Config::from_lookup(lookup(&[("JWT_EXPIRATION_HOURS", raw)])).is_err(),
                "{raw} accepted"
            );
        }
        let config = Config::from_lookup(lookup(&[("JWT_EXPIRATION_HOURS", "8760")])).unwrap();
        assert_eq!(config.jwt_expiration_hours, MAX_JWT_EXPIRATION_HOURS);
    }

    #[test]
    fn debug_hides_secret() {
        let config = Config::from_lookup(lookup(&[("JWT_SECRET", "s3cr3t")])).unwrap();
        assert!(!format!("{config:?}").contains("s3cr3t"));
    }
}
