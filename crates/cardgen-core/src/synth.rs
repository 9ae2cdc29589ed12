//! Card synthesis: brand resolution, PAN, expiry, CVC, Track2 and ISO fields.

use chrono::{DateTime, Datelike, Utc};
use rand::rngs::OsRng;
use rand::Rng;
use tracing::debug;

use crate::brand::{BrandProfile, BrandRegistry};
use crate::cvc::CvcDeriver;
use crate::error::{CardgenError, Result};
use crate::iso8583::{build_auth_request_fields, IsoFields};
use crate::pan::{build_pan, mask_pan};
use crate::random::random_expiry;
use crate::track2::build_track2;
use crate::types::{Card, GenerateOptions};

/// Produces complete card records from brand profiles.
///
/// The random source is injected so tests can run with a seeded generator;
/// CVC derivation stays keyed and deterministic either way.
#[derive(Debug)]
pub struct CardSynthesizer<'r, R> {
    registry: &'r BrandRegistry,
    rng: R,
}

impl CardSynthesizer<'static, OsRng> {
    /// Synthesizer over the standard brands using the OS random source.
    pub fn new() -> Self {
        Self::with_rng(BrandRegistry::standard(), OsRng)
    }
}

impl Default for CardSynthesizer<'static, OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'r, R: Rng> CardSynthesizer<'r, R> {
    /// Synthesizer over `registry` drawing randomness from `rng`.
    pub const fn with_rng(registry: &'r BrandRegistry, rng: R) -> Self {
        Self { registry, rng }
    }

    /// The registry brands are resolved against
    pub const fn registry(&self) -> &'r BrandRegistry {
        self.registry
    }

    /// Synthesize one card.
    ///
    /// Without a secret the card has no CVC; that is not an error.
    ///
    /// # Errors
    ///
    /// Fails with `UnknownBrand` for an unregistered brand and propagates
    /// PAN construction failures (`InvalidBin`, `InvalidLength`, `BinTooLong`).
    pub fn synthesize(&mut self, options: &GenerateOptions) -> Result<Card> {
        let registry = self.registry;
        let profile = registry.resolve(&options.brand)?;
        let deriver = options.secret_str().map(CvcDeriver::new).transpose()?;
        self.synthesize_with(profile, options, deriver.as_ref(), Utc::now())
    }

    /// Synthesize `options.count` cards, keying the CVC deriver once.
    ///
    /// # Errors
    ///
    /// Stops at the first failing card; see [`Self::synthesize`].
    pub fn synthesize_batch(&mut self, options: &GenerateOptions) -> Result<Vec<Card>> {
        let registry = self.registry;
        let profile = registry.resolve(&options.brand)?;
        let deriver = options.secret_str().map(CvcDeriver::new).transpose()?;

        let cards = (0..options.count)
            .map(|_| self.synthesize_with(profile, options, deriver.as_ref(), Utc::now()))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            brand = %profile.name,
            count = cards.len(),
            cvc = deriver.is_some(),
            "synthesized card batch"
        );

        Ok(cards)
    }

    fn synthesize_with(
        &mut self,
        profile: &BrandProfile,
        options: &GenerateOptions,
        deriver: Option<&CvcDeriver>,
        now: DateTime<Utc>,
    ) -> Result<Card> {
        let range = profile
            .default_range()
            .ok_or_else(|| CardgenError::InconsistentBrand {
                brand: profile.name.clone(),
            })?;

        let bin = options.bin_str().unwrap_or(&range.start);
        let pan = build_pan(&mut self.rng, bin, range.length)?;

        let (expiry_month, expiry_year) = random_expiry(&mut self.rng, now.year());

        let cvc = deriver
            .map(|d| d.derive_for_expiry(&pan, expiry_month, expiry_year))
            .unwrap_or_default();

        let track2 = if options.include_track2 {
            build_track2(
                &mut self.rng,
                &pan,
                expiry_month,
                expiry_year,
                &profile.service_code,
            )
        } else {
            String::new()
        };

        let mut card = Card {
            masked_pan: mask_pan(&pan),
            pan,
            brand: profile.name.clone(),
            expiry_month,
            expiry_year,
            cvc,
            track2,
            iso_fields: IsoFields::new(),
            generated_at: now,
            metadata: options.metadata.clone(),
        };

        if options.include_iso {
            card.iso_fields =
                build_auth_request_fields(&card, options.iso_amount, &options.iso_currency);
        }

        Ok(card)
    }
}
