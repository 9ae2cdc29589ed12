//! Keyed deterministic CVC derivation.
//!
//! The CVC is HMAC-SHA256 over the payload `BIN6|LAST4|MM|YYYY`, reduced to
//! 3 or 4 decimal digits. Identical inputs always map to the same CVC and a
//! different key yields a different one. This is a test artifact, not an
//! issuer CVV1/CVV2.

use ring::hmac;

use crate::error::{CardgenError, Result};

/// Payload field separator. Changing it changes every derived CVC.
const PAYLOAD_SEPARATOR: char = '|';

/// CVC length for a PAN: 4 for 15-digit PANs starting with 34 or 37, else 3.
pub fn cvc_length(pan: &str) -> usize {
    if pan.len() == 15 && (pan.starts_with("34") || pan.starts_with("37")) {
        4
    } else {
        3
    }
}

/// Canonical HMAC payload: `BIN6|LAST4|expMonth|expYear`.
///
/// PANs shorter than 6 (or 4) characters contribute themselves whole.
fn payload(pan: &str, exp_month: &str, exp_year: &str) -> String {
    let bin6 = pan.get(..6).unwrap_or(pan);
    let last4 = pan
        .len()
        .checked_sub(4)
        .and_then(|start| pan.get(start..))
        .unwrap_or(pan);

    let sep = PAYLOAD_SEPARATOR;
    format!("{bin6}{sep}{last4}{sep}{exp_month}{sep}{exp_year}")
}

/// Reduce a digest to `len` decimal digits.
///
/// Scans the lowercase hex rendering left to right keeping only `0-9`. If
/// the digest has fewer than `len` such characters, the first `len` raw
/// bytes modulo 10 are appended before truncating.
fn extract_digits(digest: &[u8], len: usize) -> String {
    let mut digits: String = hex::encode(digest)
        .chars()
        .filter(char::is_ascii_digit)
        .take(len)
        .collect();

    if digits.len() < len {
        digits.extend(
            digest
                .iter()
                .take(len)
                .map(|b| char::from(b'0' + b % 10)),
        );
    }

    digits.truncate(len);
    digits
}

/// A CVC deriver bound to one secret key.
///
/// Building the key once lets a batch derive many CVCs without re-keying.
#[derive(Clone)]
pub struct CvcDeriver {
    key: hmac::Key,
}

impl std::fmt::Debug for CvcDeriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CvcDeriver").finish_non_exhaustive()
    }
}

impl CvcDeriver {
    /// Create a deriver keyed with `secret`.
    ///
    /// # Errors
    ///
    /// Returns [`CardgenError::MissingSecret`] if `secret` is empty.
    pub fn new(secret: &str) -> Result<Self> {
        if secret.is_empty() {
            return Err(CardgenError::MissingSecret);
        }

        Ok(Self {
            key: hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes()),
        })
    }

    /// Derive the CVC for a PAN and expiry given as `MM` / `YYYY` strings.
    pub fn derive(&self, pan: &str, exp_month: &str, exp_year: &str) -> String {
        let tag = hmac::sign(&self.key, payload(pan, exp_month, exp_year).as_bytes());
        extract_digits(tag.as_ref(), cvc_length(pan))
    }

    /// Derive the CVC for a numeric expiry, formatting the month as two
    /// digits and the year in full.
    pub fn derive_for_expiry(&self, pan: &str, month: u32, year: i32) -> String {
        self.derive(pan, &format!("{month:02}"), &year.to_string())
    }
}

/// Derive a CVC in one call.
///
/// # Errors
///
/// Returns [`CardgenError::MissingSecret`] if `secret` is empty.
pub fn derive_cvc(pan: &str, exp_month: &str, exp_year: &str, secret: &str) -> Result<String> {
    Ok(CvcDeriver::new(secret)?.derive(pan, exp_month, exp_year))
}
