use std::collections::BTreeMap;

/// Default ISO-8583 amount attached to synthesized cards (minor units)
pub const DEFAULT_ISO_AMOUNT: i64 = 10_000;

/// Default ISO-8583 currency code (Brazilian real)
pub const DEFAULT_ISO_CURRENCY: &str = "986";

/// Options for one synthesis request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// BIN override; the brand's first range start is used when absent
    pub bin: Option<String>,

    /// Brand identifier, matched case-insensitively
    pub brand: String,

    /// Number of cards for batch synthesis
    pub count: usize,

    /// CVC key; no CVC is derived when absent or empty
    pub secret: Option<String>,

    /// Attach mock ISO-8583 authorization fields
    pub include_iso: bool,

    /// Attach Track2 data
    pub include_track2: bool,

    /// Amount used for the ISO fields
    pub iso_amount: i64,

    /// Currency code used for the ISO fields
    pub iso_currency: String,

    /// Labels copied onto every card
    pub metadata: BTreeMap<String, String>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            bin: None,
            brand: String::from("visa"),
            count: 1,
            secret: None,
            include_iso: false,
            include_track2: false,
            iso_amount: DEFAULT_ISO_AMOUNT,
            iso_currency: String::from(DEFAULT_ISO_CURRENCY),
            metadata: BTreeMap::new(),
        }
    }
}

impl GenerateOptions {
    /// Options for the given brand with defaults elsewhere
    #[must_use]
    pub fn new(brand: impl Into<String>) -> Self {
        Self {
            brand: brand.into(),
            ..Self::default()
        }
    }

    /// Set the BIN override; an empty string clears it
    #[must_use]
    pub fn bin(mut self, bin: impl Into<String>) -> Self {
        let bin = bin.into();
        self.bin = (!bin.is_empty()).then_some(bin);
        self
    }

    /// Set the number of cards
    #[must_use]
    pub const fn count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Set the CVC key; an empty string clears it
    #[must_use]
    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        let secret = secret.into();
        self.secret = (!secret.is_empty()).then_some(secret);
        self
    }

    /// Request ISO-8583 fields
    #[must_use]
    pub const fn include_iso(mut self, yes: bool) -> Self {
        self.include_iso = yes;
        self
    }

    /// Request Track2 data
    #[must_use]
    pub const fn include_track2(mut self, yes: bool) -> Self {
        self.include_track2 = yes;
        self
    }

    /// Set the amount and currency used for ISO fields
    #[must_use]
    pub fn iso_transaction(mut self, amount: i64, currency: impl Into<String>) -> Self {
        self.iso_amount = amount;
        self.iso_currency = currency.into();
        self
    }

    /// Add a metadata label
    #[must_use]
    pub fn meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// The secret, if one was supplied and is non-empty
    #[must_use]
    pub fn secret_str(&self) -> Option<&str> {
        self.secret.as_deref().filter(|s| !s.is_empty())
    }

    /// The BIN override, if one was supplied and is non-empty
    #[must_use]
    pub fn bin_str(&self) -> Option<&str> {
        self.bin.as_deref().filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_empty_strings_clear() {
        let opts = GenerateOptions::new("amex").bin("").secret("");
        assert_eq!(opts.bin_str(), None);
        assert_eq!(opts.secret_str(), None);

        let opts = opts.bin("370000").secret("k");
        assert_eq!(opts.bin_str(), Some("370000"));
        assert_eq!(opts.secret_str(), Some("k"));
    }

    #[test]
    fn test_defaults() {
        let opts = GenerateOptions::default();
        assert_eq!(opts.brand, "visa");
        assert_eq!(opts.count, 1);
        assert_eq!(opts.iso_amount, 10_000);
        assert_eq!(opts.iso_currency, "986");
        assert!(!opts.include_iso && !opts.include_track2);
    }
}
