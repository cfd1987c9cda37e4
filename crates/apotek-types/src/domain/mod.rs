use serde::{Deserialize, Deserializer};

pub mod account;
pub mod amount;
pub mod cart;
pub mod credentials;
pub mod order;
pub mod product;
pub mod review;
pub mod transaction;
pub mod user;

/// Treats a blank string the same as an absent one.
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

impl TextOrNumber {
    fn into_text(self) -> String {
        match self {
            TextOrNumber::Text(s) => s,
            TextOrNumber::Number(n) => n.to_string(),
        }
    }
}

/// An identifier such as `trx` sent as either a string or a number. A
/// numeric zero reads as blank so that [`present`] rejects it.
pub(crate) fn optional_identifier<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<TextOrNumber>::deserialize(deserializer)?.map(|value| match value {
            TextOrNumber::Number(n) if n.as_f64() == Some(0.0) => String::new(),
            other => other.into_text(),
        }),
    )
}

pub(crate) fn identifier<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    TextOrNumber::deserialize(deserializer).map(TextOrNumber::into_text)
}
