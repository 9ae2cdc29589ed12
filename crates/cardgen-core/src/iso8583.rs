//! Mock ISO-8583 authorization fields.
//!
//! Only a fixed illustrative subset of data elements is produced, as a
//! field-number to string map. There is no bitmap, no length prefixing and
//! no binary wire format.

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

use crate::types::Card;

/// Data element numbers used by the mock.
pub mod field {
    /// Primary account number
    pub const PAN: u8 = 2;
    /// Processing code
    pub const PROCESSING_CODE: u8 = 3;
    /// Transaction amount
    pub const AMOUNT: u8 = 4;
    /// Transmission date and time (MMDDhhmmss)
    pub const TRANSMISSION_DATETIME: u8 = 7;
    /// System trace audit number
    pub const STAN: u8 = 11;
    /// Local transaction time (hhmmss)
    pub const LOCAL_TIME: u8 = 12;
    /// Local transaction date (MMDD)
    pub const LOCAL_DATE: u8 = 13;
    /// Expiration date (YYMM)
    pub const EXPIRY: u8 = 14;
    /// Point of service entry mode
    pub const POS_ENTRY_MODE: u8 = 22;
    /// Track 2 data
    pub const TRACK2: u8 = 35;
    /// Retrieval reference number
    pub const RRN: u8 = 37;
    /// Response code
    pub const RESPONSE_CODE: u8 = 39;
    /// Card acceptor terminal id
    pub const TERMINAL_ID: u8 = 41;
    /// Card acceptor id code
    pub const MERCHANT_ID: u8 = 42;
    /// Transaction currency code
    pub const CURRENCY: u8 = 49;
}

/// MTI of an authorization request.
pub const MTI_AUTH_REQUEST: &str = "0100";
/// MTI of an authorization response.
pub const MTI_AUTH_RESPONSE: &str = "0110";
/// Processing code for a purchase.
pub const PROCESSING_CODE_PURCHASE: &str = "000000";
/// POS entry mode: chip with PIN.
pub const POS_ENTRY_MODE_CHIP_PIN: &str = "051";
/// Fixed terminal identifier.
pub const TERMINAL_ID: &str = "TERM0001";
/// Fixed merchant identifier.
pub const MERCHANT_ID: &str = "MERCHANT000001";
/// Response code signalling approval.
pub const RESPONSE_APPROVED: &str = "00";

/// Standard two-digit response codes and their meaning.
pub const RESPONSE_CODES: &[(&str, &str)] = &[
    ("00", "Approved"),
    ("01", "Refer to card issuer"),
    ("03", "Invalid merchant"),
    ("04", "Capture card"),
    ("05", "Do not honor"),
    ("12", "Invalid transaction"),
    ("13", "Invalid amount"),
    ("14", "Invalid card number"),
    ("30", "Format error"),
    ("41", "Lost card"),
    ("43", "Stolen card"),
    ("51", "Insufficient funds"),
    ("54", "Expired card"),
    ("55", "Incorrect PIN"),
    ("57", "Transaction not permitted"),
    ("58", "Transaction not permitted to terminal"),
    ("61", "Exceeds withdrawal limit"),
    ("62", "Restricted card"),
    ("63", "Security violation"),
    ("65", "Exceeds withdrawal frequency"),
    ("75", "PIN tries exceeded"),
    ("91", "Issuer unavailable"),
    ("96", "System malfunction"),
];

/// Text for a response code not in [`RESPONSE_CODES`].
pub const UNKNOWN_RESPONSE_TEXT: &str = "Unknown response code";

/// Human-readable reason for a response code.
pub fn response_text(code: &str) -> Option<&'static str> {
    RESPONSE_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, text)| *text)
}

/// ISO-8583 data elements keyed by field number.
///
/// Serializes as a JSON object with the field numbers as string keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IsoFields(BTreeMap<u8, String>);

impl IsoFields {
    /// Empty field set
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Value of a field
    #[must_use]
    pub fn get(&self, field: u8) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Set a field, returning the previous value
    pub fn insert(&mut self, field: u8, value: impl Into<String>) -> Option<String> {
        self.0.insert(field, value.into())
    }

    /// Whether a field is present
    #[must_use]
    pub fn contains(&self, field: u8) -> bool {
        self.0.contains_key(&field)
    }

    /// Number of fields present
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no fields are present
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fields in ascending field-number order
    pub fn iter(&self) -> impl Iterator<Item = (u8, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Readable multi-line listing, one `Field N: value` per line
    #[must_use]
    pub fn render(&self) -> String {
        let lines: String = self
            .iter()
            .map(|(field, value)| format!("  Field {field}: {value}\n"))
            .collect();
        format!("ISO-8583 Fields:\n{lines}")
    }
}

/// STAN: Unix seconds modulo 1,000,000, six digits.
fn stan<Tz: TimeZone>(now: &DateTime<Tz>) -> String {
    format!("{:06}", now.timestamp().rem_euclid(1_000_000))
}

/// Build authorization-request fields for a card at the current local time.
pub fn build_auth_request_fields(card: &Card, amount: i64, currency: &str) -> IsoFields {
    build_auth_request_fields_at(card, amount, currency, &Local::now())
}

/// Build authorization-request fields for a card at a given instant.
///
/// Time-derived fields (7, 11, 12, 13, 37) are rendered in `now`'s zone.
pub fn build_auth_request_fields_at<Tz>(
    card: &Card,
    amount: i64,
    currency: &str,
    now: &DateTime<Tz>,
) -> IsoFields
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut fields = IsoFields::new();

    fields.insert(field::PAN, card.pan.as_str());
    fields.insert(field::PROCESSING_CODE, PROCESSING_CODE_PURCHASE);
    fields.insert(field::AMOUNT, format!("{amount:012}"));
    fields.insert(field::TRANSMISSION_DATETIME, now.format("%m%d%H%M%S").to_string());
    fields.insert(field::STAN, stan(now));
    fields.insert(field::LOCAL_TIME, now.format("%H%M%S").to_string());
    fields.insert(field::LOCAL_DATE, now.format("%m%d").to_string());
    fields.insert(
        field::EXPIRY,
        format!(
            "{:02}{:02}",
            card.expiry_year.rem_euclid(100),
            card.expiry_month
        ),
    );
    fields.insert(field::POS_ENTRY_MODE, POS_ENTRY_MODE_CHIP_PIN);
    if !card.track2.is_empty() {
        fields.insert(field::TRACK2, card.track2.as_str());
    }
    fields.insert(field::RRN, now.format("%y%m%d%H%M%S").to_string());
    fields.insert(field::TERMINAL_ID, TERMINAL_ID);
    fields.insert(field::MERCHANT_ID, MERCHANT_ID);
    fields.insert(field::CURRENCY, currency);

    fields
}

/// A mock authorization request (MTI 0100)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationRequest {
    /// Message type indicator
    pub mti: String,
    /// Data elements
    pub fields: IsoFields,
    /// When the request was built
    pub timestamp: DateTime<Utc>,
}

/// A mock authorization response (MTI 0110)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationResponse {
    /// Message type indicator
    pub mti: String,
    /// Request data elements plus field 39
    pub fields: IsoFields,
    /// Two-digit response code
    pub response_code: String,
    /// Reason for the response code
    pub response_text: String,
    /// `AUTH` + 6 digits when approved, empty otherwise
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub auth_code: String,
    /// When the response was built
    pub timestamp: DateTime<Utc>,
}

impl AuthorizationResponse {
    /// Returns true if the response approves the transaction
    #[must_use]
    pub fn is_approved(&self) -> bool {
        self.response_code == RESPONSE_APPROVED
    }
}

/// Build a mock authorization request for a card.
pub fn mock_auth_request(card: &Card, amount: i64, currency: &str) -> AuthorizationRequest {
    let now = Local::now();
    AuthorizationRequest {
        mti: MTI_AUTH_REQUEST.to_string(),
        fields: build_auth_request_fields_at(card, amount, currency, &now),
        timestamp: now.with_timezone(&Utc),
    }
}

/// Build a mock authorization response to `request` with `response_code`.
pub fn mock_auth_response(
    request: &AuthorizationRequest,
    response_code: &str,
) -> AuthorizationResponse {
    mock_auth_response_at(request, response_code, &Utc::now())
}

/// Build a mock authorization response at a given instant.
///
/// The authorization code is `AUTH` followed by Unix seconds modulo
/// 1,000,000, issued only for approvals.
pub fn mock_auth_response_at<Tz: TimeZone>(
    request: &AuthorizationRequest,
    response_code: &str,
    now: &DateTime<Tz>,
) -> AuthorizationResponse {
    let mut fields = request.fields.clone();
    fields.insert(field::RESPONSE_CODE, response_code);

    let auth_code = if response_code == RESPONSE_APPROVED {
        format!("AUTH{:06}", now.timestamp().rem_euclid(1_000_000))
    } else {
        String::new()
    };

    AuthorizationResponse {
        mti: MTI_AUTH_RESPONSE.to_string(),
        fields,
        response_code: response_code.to_string(),
        response_text: response_text(response_code)
            .unwrap_or(UNKNOWN_RESPONSE_TEXT)
            .to_string(),
        auth_code,
        timestamp: now.with_timezone(&Utc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn card(track2: &str) -> Card {
        Card {
            pan: "4000000000000002".into(),
            masked_pan: "400000******0002".into(),
            brand: "Visa".into(),
            expiry_month: 12,
            expiry_year: 2027,
            cvc: String::new(),
            track2: track2.into(),
            iso_fields: IsoFields::new(),
            generated_at: Utc::now(),
            metadata: BTreeMap::new(),
        }
    }

    fn instant() -> DateTime<Utc> {
        // 2025-03-07 14:05:09 UTC, Unix 1741356309
        Utc.with_ymd_and_hms(2025, 3, 7, 14, 5, 9).unwrap()
    }

    #[test]
    fn test_request_fields() {
        let card = card("4000000000000002=2712201001234");
        let fields = build_auth_request_fields_at(&card, 10_000, "986", &instant());

        assert_eq!(fields.get(field::PAN), Some("4000000000000002"));
        assert_eq!(fields.get(field::PROCESSING_CODE), Some("000000"));
        assert_eq!(fields.get(field::AMOUNT), Some("000000010000"));
        assert_eq!(fields.get(field::TRANSMISSION_DATETIME), Some("0307140509"));
        assert_eq!(fields.get(field::STAN), Some("356309"));
        assert_eq!(fields.get(field::LOCAL_TIME), Some("140509"));
        assert_eq!(fields.get(field::LOCAL_DATE), Some("0307"));
        assert_eq!(fields.get(field::EXPIRY), Some("2712"));
        assert_eq!(fields.get(field::POS_ENTRY_MODE), Some("051"));
        assert_eq!(
            fields.get(field::TRACK2),
            Some("4000000000000002=2712201001234")
        );
        assert_eq!(fields.get(field::RRN), Some("250307140509"));
        assert_eq!(fields.get(field::TERMINAL_ID), Some("TERM0001"));
        assert_eq!(fields.get(field::MERCHANT_ID), Some("MERCHANT000001"));
        assert_eq!(fields.get(field::CURRENCY), Some("986"));
        assert_eq!(fields.len(), 14);
    }

    #[test]
    fn test_request_without_track2() {
        let fields = build_auth_request_fields_at(&card(""), 1, "840", &instant());
        assert!(!fields.contains(field::TRACK2));
        assert_eq!(fields.len(), 13);
        assert_eq!(fields.get(field::AMOUNT), Some("000000000001"));
    }

    #[test]
    fn test_local_fields_follow_timezone() {
        let brt = FixedOffset::west_opt(3 * 3600).unwrap();
        let now = instant().with_timezone(&brt);
        let fields = build_auth_request_fields_at(&card(""), 1, "986", &now);
        assert_eq!(fields.get(field::LOCAL_TIME), Some("110509"));
        // Same instant, same STAN.
        assert_eq!(fields.get(field::STAN), Some("356309"));
    }

    #[test]
    fn test_mock_request_mti() {
        let request = mock_auth_request(&card(""), 10_000, "986");
        assert_eq!(request.mti, "0100");
        assert!(!request.fields.is_empty());
        assert!(Utc::now() - request.timestamp < chrono::Duration::minutes(1));
    }

    #[test]
    fn test_approved_response() {
        let request = mock_auth_request(&card(""), 10_000, "986");
        let response = mock_auth_response_at(&request, "00", &instant());

        assert_eq!(response.mti, "0110");
        assert_eq!(response.response_code, "00");
        assert_eq!(response.response_text, "Approved");
        assert_eq!(response.auth_code, "AUTH356309");
        assert!(response.is_approved());
        assert_eq!(response.fields.get(field::RESPONSE_CODE), Some("00"));
        for (f, v) in request.fields.iter() {
            assert_eq!(response.fields.get(f), Some(v));
        }
    }

    #[test]
    fn test_declined_response_has_no_auth_code() {
        let request = mock_auth_request(&card(""), 10_000, "986");
        let response = mock_auth_response(&request, "05");
        assert_eq!(response.response_text, "Do not honor");
        assert!(response.auth_code.is_empty());
        assert!(!response.is_approved());

        let response = mock_auth_response(&request, "99");
        assert_eq!(response.response_text, UNKNOWN_RESPONSE_TEXT);
    }

    #[test]
    fn test_response_codes() {
        for code in ["00", "05", "51", "54", "91"] {
            assert!(response_text(code).is_some(), "missing {code}");
        }
        assert_eq!(response_text("00"), Some("Approved"));
        assert_eq!(response_text("51"), Some("Insufficient funds"));
        assert_eq!(response_text("54"), Some("Expired card"));
        assert_eq!(response_text("xx"), None);
    }

    #[test]
    fn test_render_and_json_keys() {
        let mut fields = IsoFields::new();
        fields.insert(49, "986");
        fields.insert(2, "4000000000000002");
        fields.insert(4, "000000010000");

        let text = fields.render();
        assert!(text.starts_with("ISO-8583 Fields:\n"));
        let pan_at = text.find("Field 2: 4000000000000002").unwrap();
        let cur_at = text.find("Field 49: 986").unwrap();
        assert!(pan_at < cur_at);

        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(json["2"], "4000000000000002");
        assert_eq!(json["49"], "986");

        let back: IsoFields = serde_json::from_value(json).unwrap();
        assert_eq!(back, fields);
    }
}
