use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::iso8583::IsoFields;

/// A synthesized test card
///
/// Optional parts (CVC, Track2, ISO fields, metadata) are empty when not
/// produced and omitted from serialized output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Full Luhn-valid PAN
    pub pan: String,

    /// PAN masked for display
    pub masked_pan: String,

    /// Brand display name (e.g. "Visa")
    pub brand: String,

    /// Expiry month, 1-12
    pub expiry_month: u32,

    /// Four-digit expiry year
    pub expiry_year: i32,

    /// Derived CVC; empty when no secret was supplied
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cvc: String,

    /// Track2 string; empty unless requested
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub track2: String,

    /// Mock ISO-8583 authorization fields; empty unless requested
    #[serde(default, skip_serializing_if = "IsoFields::is_empty")]
    pub iso_fields: IsoFields,

    /// When the card was synthesized
    pub generated_at: DateTime<Utc>,

    /// Caller-supplied labels
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl Card {
    /// Returns true if the card carries a derived CVC
    #[must_use]
    pub fn has_cvc(&self) -> bool {
        !self.cvc.is_empty()
    }

    /// Expiry formatted as `MM/YYYY`
    #[must_use]
    pub fn expiry_display(&self) -> String {
        format!("{:02}/{}", self.expiry_month, self.expiry_year)
    }
}
