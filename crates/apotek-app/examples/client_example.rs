///  To run :
///  cargo r --example client_example
use apotek_client::ApotekClient;
use apotek_hex::application::cart_service::CartService;
use apotek_hex::application::product_service::ProductService;
use apotek_hex::application::transaction_service::TransactionService;
use apotek_hex::inbound::http::{self, HttpServer, HttpServerConfig};
use apotek_repo::build_product_repo;
use apotek_repo::memory::{InMemoryCartRepo, InMemoryTransactionRepo};
use apotek_types::domain::amount::Amount;
use apotek_types::domain::product::ProductRequest;
use apotek_types::domain::transaction::{TransactionItem, TransactionRequest, TransactionUpdate};
use reqwest::StatusCode;
use tempfile::tempdir;

fn find_free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

fn spawn(name: &str, router: axum::Router) -> (String, tokio::task::JoinHandle<()>) {
    let port = find_free_port();
    let server = HttpServer::new(
        name,
        router,
        HttpServerConfig {
            port: port.to_string(),
        },
    );
    let handle = tokio::spawn(async move {
        server.run().await.expect("server run");
    });
    (format!("http://127.0.0.1:{port}/"), handle)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Products on a temp file-backed SQLite DB, transactions in memory.
    let tmp = tempdir()?;
    let db_url = format!("sqlite://{}", tmp.path().join("products.db").display());
    let products = build_product_repo(Some(&db_url)).await?;

    let (product_addr, product_handle) = spawn(
        "products",
        http::products::router(ProductService::new(products)),
    );
    let (trx_addr, trx_handle) = spawn(
        "transactions",
        http::transactions::router(
            TransactionService::new(InMemoryTransactionRepo::new()),
            CartService::new(InMemoryCartRepo::new()),
        ),
    );
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let product_client = ApotekClient::new(&product_addr)?;
    let created = product_client
        .create_product(&ProductRequest {
            id: None,
            name: Some("Paracetamol 500mg".into()),
            category: Some("obat bebas".into()),
            price: Some(5000),
            stock: Some(100),
        })
        .await?;
    println!("Created product id={}", created.id);

    let product = product_client.get_product(created.id).await?;
    println!("Fetched {} at {}", product.name, product.price);

    let trx_client = ApotekClient::new(&trx_addr)?;
    let mut extra = serde_json::Map::new();
    extra.insert("product_id".into(), serde_json::json!(product.id));
    let saved = trx_client
        .create_transaction(&TransactionRequest {
            trx: Some("TRX-EXAMPLE".into()),
            items: Some(vec![TransactionItem {
                qty: Amount::Int(2),
                price: Amount::Int(product.price),
                subtotal: None,
                extra,
            }]),
            payment_method: Some("cash".into()),
            note: None,
        })
        .await?;
    println!("Saved transaction {} with {} item(s)", saved.trx, saved.items.len());

    let updated = trx_client
        .update_transaction(
            &saved.trx,
            &TransactionUpdate {
                items: None,
                payment_method: Some("qris".into()),
                note: Some("pelanggan tetap".into()),
            },
        )
        .await?;
    println!("Updated payment method to {}", updated.payment_method);

    let report = trx_client.transaction_report().await?;
    println!(
        "Report: {} transaction(s), revenue {}",
        report.summary.total_transaksi, report.summary.total_pendapatan
    );
    assert_eq!(report.summary.total_pendapatan, Amount::Int(10000));

    trx_client.delete_transaction(&saved.trx).await?;
    match trx_client.get_transaction(&saved.trx).await {
        Ok(_) => anyhow::bail!("transaction should be gone"),
        Err(err) => {
            let status = err.downcast_ref::<reqwest::Error>().and_then(|e| e.status());
            assert_eq!(status, Some(StatusCode::NOT_FOUND));
            println!("Deleted transaction; lookup now returns 404");
        }
    }

    product_handle.abort();
    trx_handle.abort();
    Ok(())
}
