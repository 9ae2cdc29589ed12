//! Card brand profiles and the registry that resolves them.
//!
//! These are test BIN ranges. Never use them against production systems.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{CardgenError, Result};

/// A contiguous BIN range and the PAN length cards in it use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinRange {
    /// First BIN of the range
    pub start: String,
    /// Last BIN of the range
    pub end: String,
    /// PAN length for cards in this range
    pub length: usize,
}

impl BinRange {
    fn new(start: &str, end: &str, length: usize) -> Self {
        Self {
            start: start.to_string(),
            end: end.to_string(),
            length,
        }
    }
}

/// Configuration for one card brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandProfile {
    /// Display name
    pub name: String,
    /// BIN ranges; the first one is the default for synthesis
    pub bin_ranges: Vec<BinRange>,
    /// PAN lengths the brand issues
    pub pan_lengths: Vec<usize>,
    /// CVC length the brand uses
    pub cvc_length: usize,
    /// Track2 service code
    pub service_code: String,
}

impl BrandProfile {
    /// Returns true if every BIN range length is an allowed PAN length
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        !self.bin_ranges.is_empty()
            && self
                .bin_ranges
                .iter()
                .all(|r| self.pan_lengths.contains(&r.length))
    }

    /// The range used when no BIN override is given
    #[must_use]
    pub fn default_range(&self) -> Option<&BinRange> {
        self.bin_ranges.first()
    }
}

/// Immutable lookup table from brand identifier to profile.
///
/// Keys are stored lowercase and lookups are case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct BrandRegistry {
    brands: BTreeMap<String, BrandProfile>,
}

impl BrandRegistry {
    /// Build a registry from `(identifier, profile)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`CardgenError::InconsistentBrand`] for a profile with no BIN
    /// ranges or a range whose length the brand does not allow.
    pub fn from_profiles<I, K>(profiles: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, BrandProfile)>,
        K: Into<String>,
    {
        let mut brands = BTreeMap::new();
        for (key, profile) in profiles {
            let key = key.into().to_lowercase();
            if !profile.is_consistent() {
                return Err(CardgenError::InconsistentBrand { brand: key });
            }
            brands.insert(key, profile);
        }
        Ok(Self { brands })
    }

    /// The built-in Visa, Mastercard and American Express profiles.
    pub fn standard() -> &'static Self {
        static STANDARD: OnceLock<BrandRegistry> = OnceLock::new();
        STANDARD.get_or_init(|| Self {
            brands: standard_profiles().into_iter().collect(),
        })
    }

    /// Resolve a brand by identifier, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`CardgenError::UnknownBrand`] if the identifier is not registered.
    pub fn resolve(&self, brand: &str) -> Result<&BrandProfile> {
        self.brands
            .get(&brand.to_lowercase())
            .ok_or_else(|| CardgenError::UnknownBrand(brand.to_string()))
    }

    /// Registered identifiers in sorted order
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.brands.keys().map(String::as_str)
    }

    /// Number of registered brands
    #[must_use]
    pub fn len(&self) -> usize {
        self.brands.len()
    }

    /// Returns true if no brands are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.brands.is_empty()
    }
}

fn standard_profiles() -> Vec<(String, BrandProfile)> {
    vec![
        (
            "visa".to_string(),
            BrandProfile {
                name: "Visa".to_string(),
                bin_ranges: vec![BinRange::new("400000", "499999", 16)],
                pan_lengths: vec![13, 16, 19],
                cvc_length: 3,
                service_code: "201".to_string(),
            },
        ),
        (
            "mastercard".to_string(),
            BrandProfile {
                name: "Mastercard".to_string(),
                bin_ranges: vec![
                    BinRange::new("510000", "559999", 16),
                    BinRange::new("222100", "272099", 16),
                ],
                pan_lengths: vec![16],
                cvc_length: 3,
                service_code: "201".to_string(),
            },
        ),
        (
            "amex".to_string(),
            BrandProfile {
                name: "American Express".to_string(),
                bin_ranges: vec![
                    BinRange::new("340000", "349999", 15),
                    BinRange::new("370000", "379999", 15),
                ],
                pan_lengths: vec![15],
                cvc_length: 4,
                service_code: "201".to_string(),
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_profiles_consistent() {
        let registry = BrandRegistry::standard();
        assert_eq!(registry.len(), 3);
        for id in registry.identifiers() {
            assert!(registry.resolve(id).unwrap().is_consistent(), "{id}");
        }
    }

    #[test]
    fn test_resolve_case_insensitive() {
        let registry = BrandRegistry::standard();
        assert_eq!(registry.resolve("VISA").unwrap().name, "Visa");
        assert_eq!(registry.resolve("Amex").unwrap().cvc_length, 4);
        assert_eq!(
            registry.resolve("discover").unwrap_err(),
            CardgenError::UnknownBrand("discover".into())
        );
    }

    #[test]
    fn test_default_range() {
        let mc = BrandRegistry::standard().resolve("mastercard").unwrap();
        let range = mc.default_range().unwrap();
        assert_eq!(range.start, "510000");
        assert_eq!(range.length, 16);
    }

    #[test]
    fn test_from_profiles_rejects_inconsistent() {
        let bad = BrandProfile {
            name: "Broken".into(),
            bin_ranges: vec![BinRange::new("600000", "699999", 18)],
            pan_lengths: vec![16],
            cvc_length: 3,
            service_code: "101".into(),
        };
        let err = BrandRegistry::from_profiles([("Broken", bad)]).unwrap_err();
        assert_eq!(err, CardgenError::InconsistentBrand { brand: "broken".into() });
    }

    #[test]
    fn test_from_profiles_custom_brand() {
        let discover = BrandProfile {
            name: "Discover".into(),
            bin_ranges: vec![BinRange::new("601100", "601199", 16)],
            pan_lengths: vec![16, 19],
            cvc_length: 3,
            service_code: "101".into(),
        };
        let registry = BrandRegistry::from_profiles([("Discover", discover)]).unwrap();
        assert_eq!(registry.resolve("discover").unwrap().name, "Discover");
        assert!(!registry.is_empty());
    }
}
