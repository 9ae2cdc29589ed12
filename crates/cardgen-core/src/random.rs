//! Random digit and expiry draws.
//!
//! Every function takes the generator as a parameter so callers choose the
//! source: `rand::rngs::OsRng` in production, a seeded `StdRng` in tests.
//! None of these values feed the keyed CVC derivation.

use rand::Rng;

/// Draw `n` uniformly distributed decimal digits.
pub fn random_digits<R: Rng + ?Sized>(rng: &mut R, n: usize) -> String {
    (0..n)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// Draw a plausible expiry: month in 1..=12, year 1 to 5 years after
/// `current_year` (never the current year itself).
pub fn random_expiry<R: Rng + ?Sized>(rng: &mut R, current_year: i32) -> (u32, i32) {
    let month = rng.gen_range(1..=12);
    let year = current_year + rng.gen_range(1..=5);
    (month, year)
}
