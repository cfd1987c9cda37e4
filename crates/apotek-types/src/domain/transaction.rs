use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::amount::Amount;
use super::{identifier, optional_identifier, present};

/// A line item. Fields other than `qty`, `price` and `subtotal` (for example
/// `product_id` or `name`) are kept verbatim in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TransactionItem {
    #[serde(default)]
    pub qty: Amount,
    #[serde(default)]
    pub price: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<Amount>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TransactionItem {
    /// The supplied subtotal, or `qty * price` when none was given.
    pub fn resolved_subtotal(&self) -> Amount {
        self.subtotal.unwrap_or(self.qty * self.price)
    }

    pub fn with_subtotal(mut self) -> Self {
        self.subtotal = Some(self.resolved_subtotal());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    #[serde(deserialize_with = "identifier")]
    pub trx: String,
    pub items: Vec<TransactionItem>,
    pub payment_method: String,
    #[serde(default)]
    pub note: String,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /transactions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionRequest {
    #[serde(default, deserialize_with = "optional_identifier")]
    pub trx: Option<String>,
    pub items: Option<Vec<TransactionItem>>,
    pub payment_method: Option<String>,
    pub note: Option<String>,
}

/// Body of `PUT /transactions/{trx}`; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionUpdate {
    pub items: Option<Vec<TransactionItem>>,
    pub payment_method: Option<String>,
    pub note: Option<String>,
}

impl Transaction {
    pub fn new(req: TransactionRequest, now: DateTime<Utc>) -> anyhow::Result<Self> {
        let (trx, items, payment_method) =
            match (present(req.trx), req.items, present(req.payment_method)) {
                (Some(trx), Some(items), Some(pm)) => (trx, items, pm),
                _ => anyhow::bail!("trx, items, and payment_method are required"),
            };
        Ok(Self {
            trx,
            items: items.into_iter().map(TransactionItem::with_subtotal).collect(),
            payment_method,
            note: req.note.unwrap_or_default(),
            created_at: now,
        })
    }

    /// Merges an update into this record. A blank `payment_method` is ignored;
    /// an explicit `note`, even an empty one, replaces the stored note.
    pub fn apply(&mut self, update: TransactionUpdate) {
        if let Some(items) = update.items {
            self.items = items.into_iter().map(TransactionItem::with_subtotal).collect();
        }
        if let Some(pm) = present(update.payment_method) {
            self.payment_method = pm;
        }
        if let Some(note) = update.note {
            self.note = note;
        }
    }

    pub fn revenue(&self) -> Amount {
        self.items.iter().map(TransactionItem::resolved_subtotal).sum()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReportSummary {
    pub total_transaksi: usize,
    pub total_pendapatan: Amount,
}

/// Body of `GET /reports/transactions`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionReport {
    pub success: bool,
    pub summary: ReportSummary,
    pub data: Vec<Transaction>,
}

impl TransactionReport {
    pub fn from_transactions(data: Vec<Transaction>) -> Self {
        let summary = ReportSummary {
            total_transaksi: data.len(),
            total_pendapatan: data.iter().map(Transaction::revenue).sum(),
        };
        Self {
            success: true,
            summary,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(qty: i64, price: i64, subtotal: Option<i64>) -> TransactionItem {
        TransactionItem {
            qty: Amount::Int(qty),
            price: Amount::Int(price),
            subtotal: subtotal.map(Amount::Int),
            extra: Map::new(),
        }
    }

    fn request() -> TransactionRequest {
        TransactionRequest {
            trx: Some("TRX-001".into()),
            items: Some(vec![item(2, 5000, None), item(1, 12000, Some(10000))]),
            payment_method: Some("cash".into()),
            note: None,
        }
    }

    #[test]
    fn new_fills_missing_subtotals_only() {
        let t = Transaction::new(request(), Utc::now()).unwrap();
        assert_eq!(t.items[0].subtotal, Some(Amount::Int(10000)));
        assert_eq!(t.items[1].subtotal, Some(Amount::Int(10000)));
        assert_eq!(t.note, "");
        assert_eq!(t.revenue(), Amount::Int(20000));
    }

    #[test]
    fn new_requires_trx_items_and_payment_method() {
        let mut req = request();
        req.payment_method = Some("".into());
        assert!(Transaction::new(req, Utc::now()).is_err());

        let mut req = request();
        req.items = None;
        assert!(Transaction::new(req, Utc::now()).is_err());

        let mut req = request();
        req.items = Some(vec![]);
        assert!(Transaction::new(req, Utc::now()).is_ok());
    }

    #[test]
    fn extra_item_fields_survive_serialization() {
        let raw = serde_json::json!({ "product_id": 9, "name": "Vitamin C", "qty": 3, "price": 1500 });
        let parsed: TransactionItem = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.extra.get("product_id"), Some(&Value::from(9)));
        let back = serde_json::to_value(parsed.with_subtotal()).unwrap();
        assert_eq!(back["name"], "Vitamin C");
        assert_eq!(back["subtotal"], 4500);
    }

    #[test]
    fn apply_merges_fields() {
        let mut t = Transaction::new(request(), Utc::now()).unwrap();
        t.apply(TransactionUpdate {
            items: None,
            payment_method: Some("".into()),
            note: Some("antar sore".into()),
        });
        assert_eq!(t.payment_method, "cash");
        assert_eq!(t.note, "antar sore");
        assert_eq!(t.items.len(), 2);

        t.apply(TransactionUpdate {
            items: Some(vec![item(4, 250, None)]),
            payment_method: Some("qris".into()),
            note: None,
        });
        assert_eq!(t.payment_method, "qris");
        assert_eq!(t.note, "antar sore");
        assert_eq!(t.items[0].subtotal, Some(Amount::Int(1000)));
    }

    #[test]
    fn report_sums_subtotals_or_qty_times_price() {
        let mut a = Transaction::new(request(), Utc::now()).unwrap();
        // Records written elsewhere may lack a subtotal.
        a.items.push(item(3, 100, None));
        let b = Transaction::new(
            TransactionRequest {
                trx: Some("TRX-002".into()),
                items: Some(vec![item(1, 7000, None)]),
                payment_method: Some("debit".into()),
                note: Some("".into()),
            },
            Utc::now(),
        )
        .unwrap();

        let report = TransactionReport::from_transactions(vec![a, b]);
        assert_eq!(report.summary.total_transaksi, 2);
        assert_eq!(report.summary.total_pendapatan, Amount::Int(20000 + 300 + 7000));

        let empty = TransactionReport::from_transactions(vec![]);
        assert_eq!(empty.summary, ReportSummary::default());
    }

    #[test]
    fn report_total_past_i64_max_becomes_float() {
        let mut t = Transaction::new(request(), Utc::now()).unwrap();
        t.items = vec![item(1, 1, Some(i64::MAX)), item(1, 1, Some(1))];
        let huge = Transaction {
            trx: "TRX-003".into(),
            items: vec![item(i64::MAX, 2, None)],
            ..t.clone()
        };

        assert_eq!(t.revenue(), Amount::Float(i64::MAX as f64 + 1.0));
        assert_eq!(huge.revenue(), Amount::Float(i64::MAX as f64 * 2.0));

        let report = TransactionReport::from_transactions(vec![t, huge]);
        assert!(report.summary.total_pendapatan.as_f64() >= i64::MAX as f64 * 3.0);
    }

    #[test]
    fn numeric_trx_and_fractional_prices_are_accepted() {
        let raw = serde_json::json!({
            "trx": 1001,
            "items": [{ "qty": 2, "price": 1500.5 }],
            "payment_method": "cash"
        });
        let req: TransactionRequest = serde_json::from_value(raw).unwrap();
        assert_eq!(req.trx.as_deref(), Some("1001"));

        let t = Transaction::new(req, Utc::now()).unwrap();
        assert_eq!(t.items[0].subtotal, Some(Amount::Float(3001.0)));
        assert_eq!(t.revenue(), Amount::Float(3001.0));

        let stored = serde_json::json!({
            "trx": 1001,
            "items": [],
            "payment_method": "cash",
            "created_at": "2024-01-01T00:00:00Z"
        });
        let back: Transaction = serde_json::from_value(stored).unwrap();
        assert_eq!(back.trx, "1001");
    }

    #[test]
    fn zero_or_missing_trx_is_rejected() {
        let raw = serde_json::json!({ "trx": 0, "items": [], "payment_method": "cash" });
        let req: TransactionRequest = serde_json::from_value(raw).unwrap();
        assert!(Transaction::new(req, Utc::now()).is_err());

        let raw = serde_json::json!({ "items": [], "payment_method": "cash" });
        let req: TransactionRequest = serde_json::from_value(raw).unwrap();
        assert!(req.trx.is_none());
    }
}
