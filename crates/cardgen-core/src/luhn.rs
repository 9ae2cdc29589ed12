//! Luhn (mod-10) checksum arithmetic for PANs.
//!
//! `validate` and `compute_check_digit` walk the digits right to left with
//! opposite parity starts. That asymmetry is required: when computing a
//! check digit, the current rightmost digit becomes the second-from-right
//! once the check digit is appended, so it is the first one doubled.

/// Shortest PAN accepted by [`validate`].
pub const MIN_PAN_LENGTH: usize = 13;

/// Longest PAN accepted by [`validate`].
pub const MAX_PAN_LENGTH: usize = 19;

/// Weighted digit sum, scanning right to left.
///
/// `double_first` selects whether the rightmost digit is doubled.
/// Returns `None` if any character is not an ASCII digit.
fn weighted_sum(digits: &str, double_first: bool) -> Option<u32> {
    let mut sum = 0;
    let mut double = double_first;

    for c in digits.bytes().rev() {
        if !c.is_ascii_digit() {
            return None;
        }
        let mut d = u32::from(c - b'0');
        if double {
            d *= 2;
            if d > 9 {
                d -= 9;
            }
        }
        sum += d;
        double = !double;
    }

    Some(sum)
}

/// Validate a PAN using the Luhn algorithm.
///
/// Fails closed: non-numeric input and lengths outside 13..=19 return
/// `false` rather than an error.
pub fn validate(pan: &str) -> bool {
    if !(MIN_PAN_LENGTH..=MAX_PAN_LENGTH).contains(&pan.len()) {
        return false;
    }

    // The rightmost digit is the check digit itself and is not doubled.
    weighted_sum(pan, false).is_some_and(|sum| sum % 10 == 0)
}

/// Compute the Luhn check digit for a partial PAN (everything but the
/// final digit).
///
/// Returns `None` if the partial PAN contains a non-digit.
pub fn compute_check_digit(partial_pan: &str) -> Option<u8> {
    // Inverted parity start relative to `validate`: the digit appended later
    // shifts every position by one. Do not "fix" this.
    let sum = weighted_sum(partial_pan, true)?;
    // sum % 10 < 10, so the cast cannot truncate.
    #[allow(clippy::cast_possible_truncation)]
    let check = ((10 - (sum % 10)) % 10) as u8;
    Some(check)
}

/// Append the Luhn check digit to a partial PAN.
pub fn append_check_digit(partial_pan: &str) -> Option<String> {
    let check = compute_check_digit(partial_pan)?;
    let mut pan = String::with_capacity(partial_pan.len() + 1);
    pan.push_str(partial_pan);
    pan.push(char::from(b'0' + check));
    Some(pan)
}
