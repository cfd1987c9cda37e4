use apotek_hex::application::auth_service::AuthService;
use apotek_hex::application::cart_service::CartService;
use apotek_hex::application::order_service::OrderService;
use apotek_hex::application::product_service::ProductService;
use apotek_hex::application::review_service::ReviewService;
use apotek_hex::application::token::TokenIssuer;
use apotek_hex::application::transaction_service::TransactionService;
use apotek_hex::application::user_service::UserService;
use apotek_hex::config::{Config, ServiceKind, ServiceSettings};
use apotek_hex::inbound::http::{self, HttpServer, HttpServerConfig};
use axum::Router;
use tokio::task::JoinSet;

/// Opens the service's store and wires it into its router.
async fn build_router(settings: &ServiceSettings, config: &Config) -> anyhow::Result<Router> {
    let url = settings.store_url.as_deref();
    let router = match settings.kind {
        ServiceKind::Auth => {
            let repo = apotek_repo::build_account_repo(url).await?;
            http::auth::router(AuthService::new(repo))
        }
        ServiceKind::Products => {
            let repo = apotek_repo::build_product_repo(url).await?;
            http::products::router(ProductService::new(repo))
        }
        ServiceKind::Orders => {
            let repo = apotek_repo::build_order_repo(url).await?;
            http::orders::router(OrderService::new(repo))
        }
        ServiceKind::Users => {
            let repo = apotek_repo::build_user_repo(url).await?;
            let tokens = TokenIssuer::new(config.jwt_secret.as_str(), config.jwt_expiration_hours);
            http::users::router(UserService::new(repo, tokens))
        }
        ServiceKind::Transactions => {
            let (transactions, carts) = apotek_repo::build_kv_repos(url).await?;
            http::transactions::router(
                TransactionService::new(transactions),
                CartService::new(carts),
            )
        }
        ServiceKind::Reviews => {
            let repo = apotek_repo::build_review_repo(url).await?;
            http::reviews::router(ReviewService::new(repo))
        }
    };
    Ok(router)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env for ports, store urls and the JWT secret when present.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".to_string()))
        .init();

    let config = Config::from_env()?;
    tracing::debug!(?config, "loaded config");

    let mut servers = JoinSet::new();
    for settings in &config.services {
        let router = build_router(settings, &config).await?;
        let server = HttpServer::new(
            settings.kind.name(),
            router,
            HttpServerConfig {
                port: settings.port.clone(),
            },
        );
        servers.spawn(server.run());
    }

    // The first service to stop takes the process down with it.
    if let Some(result) = servers.join_next().await {
        result??;
    }
    Ok(())
}
