use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One row of the `orders` table, keyed by column name. The order service
/// never writes, so no column layout is assumed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Order {
    pub columns: Map<String, Value>,
}

impl Order {
    pub fn new(columns: Map<String, Value>) -> Self {
        Self { columns }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.get(column)
    }
}

impl From<Map<String, Value>> for Order {
    fn from(columns: Map<String, Value>) -> Self {
        Self::new(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_plain_object() {
        let mut cols = Map::new();
        cols.insert("id".into(), Value::from(1));
        cols.insert("status".into(), Value::from("paid"));
        let order = Order::new(cols);
        assert_eq!(
            serde_json::to_value(&order).unwrap(),
            serde_json::json!({ "id": 1, "status": "paid" })
        );
        assert_eq!(order.get("status"), Some(&Value::from("paid")));
    }
}
