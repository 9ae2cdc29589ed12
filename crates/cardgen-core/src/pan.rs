//! PAN construction and masking.

use rand::Rng;

use crate::error::{CardgenError, Result};
use crate::luhn::{self, MAX_PAN_LENGTH, MIN_PAN_LENGTH};
use crate::random::random_digits;

/// Minimum BIN length accepted by [`build_pan`].
pub const MIN_BIN_LENGTH: usize = 6;

/// Build a Luhn-valid PAN of `length` digits starting with `bin`.
///
/// The digits between the BIN and the check digit are drawn from `rng`.
///
/// # Errors
///
/// - [`CardgenError::InvalidBin`] if the BIN is shorter than 6 digits or
///   contains non-digits
/// - [`CardgenError::InvalidLength`] if `length` is outside 13..=19
/// - [`CardgenError::BinTooLong`] if the BIN leaves no room for the check digit
pub fn build_pan<R: Rng + ?Sized>(rng: &mut R, bin: &str, length: usize) -> Result<String> {
    if bin.len() < MIN_BIN_LENGTH || !bin.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CardgenError::InvalidBin {
            bin: bin.to_string(),
        });
    }

    if !(MIN_PAN_LENGTH..=MAX_PAN_LENGTH).contains(&length) {
        return Err(CardgenError::InvalidLength { length });
    }

    let filler_len = length
        .checked_sub(bin.len() + 1)
        .ok_or_else(|| CardgenError::BinTooLong {
            bin: bin.to_string(),
            length,
        })?;

    let mut partial = String::with_capacity(length);
    partial.push_str(bin);
    partial.push_str(&random_digits(rng, filler_len));

    luhn::append_check_digit(&partial).ok_or_else(|| CardgenError::InvalidBin {
        bin: bin.to_string(),
    })
}

/// Mask a PAN for display: first 6, asterisks, last 4.
///
/// Anything shorter than 10 characters is fully masked.
pub fn mask_pan(pan: &str) -> String {
    let chars: Vec<char> = pan.chars().collect();
    if chars.len() < 10 {
        return "*".repeat(chars.len());
    }

    let first6: String = chars[..6].iter().collect();
    let last4: String = chars[chars.len() - 4..].iter().collect();
    format!("{first6}{}{last4}", "*".repeat(chars.len() - 10))
}
