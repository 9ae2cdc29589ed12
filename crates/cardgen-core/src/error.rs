use thiserror::Error;

/// Result type alias for card synthesis operations
pub type Result<T> = std::result::Result<T, CardgenError>;

/// Errors that can occur while synthesizing or transforming card data
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CardgenError {
    /// BIN is shorter than 6 digits or contains non-digits
    #[error("invalid BIN {bin:?}: must be at least 6 decimal digits")]
    InvalidBin {
        /// The offending BIN
        bin: String,
    },

    /// Requested PAN length is outside 13..=19
    #[error("invalid PAN length {length}: must be between 13 and 19")]
    InvalidLength {
        /// The requested length
        length: usize,
    },

    /// BIN leaves no room for the check digit
    #[error("BIN {bin:?} too long for PAN length {length}")]
    BinTooLong {
        /// The offending BIN
        bin: String,
        /// The requested PAN length
        length: usize,
    },

    /// Brand identifier is not in the registry
    #[error("unknown brand: {0}")]
    UnknownBrand(String),

    /// CVC derivation requested without a key
    #[error("secret is required for CVC derivation")]
    MissingSecret,

    /// Brand profile whose BIN ranges disagree with its allowed PAN lengths
    #[error("inconsistent brand profile {brand}: BIN range length not in allowed PAN lengths")]
    InconsistentBrand {
        /// Registry key of the rejected profile
        brand: String,
    },

    /// An order carries a PAN or expiry that cannot enter CVC derivation
    #[error("order {order_id} is invalid: {reason}")]
    InvalidOrder {
        /// Order identifier
        order_id: String,
        /// What was wrong with it
        reason: String,
    },
}

impl CardgenError {
    /// Returns true if the error was caused by caller-supplied input
    /// rather than a broken registry
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        !matches!(self, Self::InconsistentBrand { .. })
    }

    /// Returns the order identifier for transform failures
    #[must_use]
    pub fn order_id(&self) -> Option<&str> {
        match self {
            Self::InvalidOrder { order_id, .. } => Some(order_id),
            _ => None,
        }
    }
}
