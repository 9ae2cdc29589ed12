use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A pre-existing payment order supplied for CVC injection
///
/// The batch transform only ever writes `cvc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Order identifier
    pub id: String,

    /// Card number
    pub pan: String,

    /// Expiry month, 1-12
    pub expiry_month: u32,

    /// Four-digit expiry year
    pub expiry_year: i32,

    /// CVC, possibly empty
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cvc: String,

    /// Amount in minor units
    pub amount: i64,

    /// Currency code (ISO 4217, numeric or alpha)
    pub currency: String,

    /// Free-form labels
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl Order {
    /// Returns true if the order still needs a CVC
    #[must_use]
    pub fn needs_cvc(&self) -> bool {
        self.cvc.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_optional_fields() {
        let json = r#"{"id":"o1","pan":"4000000000000002","expiry_month":12,
            "expiry_year":2027,"amount":1500,"currency":"986"}"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert!(order.needs_cvc());
        assert!(order.metadata.is_empty());

        let out = serde_json::to_string(&order).unwrap();
        assert!(!out.contains("cvc"));
        assert!(!out.contains("metadata"));
    }
}
