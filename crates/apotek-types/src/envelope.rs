use serde::{Deserialize, Serialize};

/// JSON wrapper returned by every service except auth:
/// `{"success": bool, "message"?: string, "data"?: T}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Envelope<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omits_absent_fields() {
        let body = serde_json::to_value(Envelope::message("User deleted")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "success": true, "message": "User deleted" })
        );

        let body = serde_json::to_value(Envelope::data(vec![1, 2])).unwrap();
        assert_eq!(body, serde_json::json!({ "success": true, "data": [1, 2] }));
    }

    #[test]
    fn failure_carries_message() {
        let body = serde_json::to_value(Envelope::failure("Product not found")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "success": false, "message": "Product not found" })
        );
    }
}
