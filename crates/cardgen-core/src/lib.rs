//! Synthetic payment-card fixtures for test environments.
//!
//! This crate holds everything that does not touch the network or the
//! filesystem:
//!
//! - **Luhn and PAN**: check digits, BIN-prefixed PANs, masking
//! - **CVC**: keyed, deterministic HMAC-SHA256 derivation via [`CvcDeriver`]
//! - **Synthesis**: complete [`Card`] records from a [`BrandRegistry`]
//! - **ISO-8583**: mock authorization fields, requests and responses
//! - **Transform**: CVC injection into existing [`Order`] batches
//! - **Scenarios**: a catalogue of named authorization outcomes
//!
//! Every card produced here is synthetic. None of it is valid for real
//! payment traffic.
//!
//! # Example
//!
//! ```rust,ignore
//! use cardgen_core::{CardSynthesizer, GenerateOptions, Result};
//!
//! fn fixtures() -> Result<()> {
//!     let options = GenerateOptions::new("visa").count(5).secret("test-secret");
//!     for card in CardSynthesizer::new().synthesize_batch(&options)? {
//!         println!("{} {} {}", card.masked_pan, card.expiry_display(), card.cvc);
//!     }
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/cardgen-core/1.0.0")]

pub mod brand;
pub mod cvc;
mod error;
pub mod iso8583;
pub mod luhn;
pub mod pan;
pub mod random;
pub mod scenario;
pub mod synth;
pub mod track2;
pub mod transform;
pub mod types;

pub use brand::{BinRange, BrandProfile, BrandRegistry};
pub use cvc::{derive_cvc, CvcDeriver};
pub use error::{CardgenError, Result};
pub use iso8583::{AuthorizationRequest, AuthorizationResponse, IsoFields};
pub use pan::mask_pan;
pub use scenario::{find_scenario, standard_scenarios};
pub use synth::CardSynthesizer;
pub use transform::{transform_orders, TransformSummary};
pub use types::*;
