//! Magnetic-stripe Track2 assembly.

use rand::Rng;

use crate::random::random_digits;

/// Number of discretionary digits appended after the service code.
pub const DISCRETIONARY_LENGTH: usize = 4;

/// Separator between PAN and expiry.
pub const FIELD_SEPARATOR: char = '=';

/// Build a Track2-like string: `PAN=YYMM<service code><discretionary>`.
///
/// The discretionary digits are random and carry no meaning.
pub fn build_track2<R: Rng + ?Sized>(
    rng: &mut R,
    pan: &str,
    month: u32,
    year: i32,
    service_code: &str,
) -> String {
    let yy = year.rem_euclid(100);
    let discretionary = random_digits(rng, DISCRETIONARY_LENGTH);
    format!("{pan}{FIELD_SEPARATOR}{yy:02}{month:02}{service_code}{discretionary}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_track2_layout() {
        let mut rng = StdRng::seed_from_u64(9);
        let cases = [
            ("4000000000000002", 12, 2027, "201", "2712"),
            ("5100000000000016", 6, 2026, "201", "2606"),
            ("340000000000009", 3, 2105, "101", "0503"),
        ];

        for (pan, month, year, service, expiry) in cases {
            let track2 = build_track2(&mut rng, pan, month, year, service);
            let (head, tail) = track2.split_once(FIELD_SEPARATOR).unwrap();
            assert_eq!(head, pan);
            assert_eq!(tail.len(), 4 + service.len() + DISCRETIONARY_LENGTH);
            assert_eq!(&tail[..4], expiry);
            assert_eq!(&tail[4..7], service);
            assert!(tail[7..].bytes().all(|b| b.is_ascii_digit()));
        }
    }

    #[test]
    fn test_track2_discretionary_from_rng() {
        let pan = "4000000000000002";
        let a = build_track2(&mut StdRng::seed_from_u64(5), pan, 1, 2030, "201");
        let b = build_track2(&mut StdRng::seed_from_u64(5), pan, 1, 2030, "201");
        assert_eq!(a, b);
        assert!(a.starts_with("4000000000000002=3001201"));
    }
}
