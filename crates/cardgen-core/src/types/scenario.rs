use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named test scenario with its expected authorization outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Stable identifier (e.g. "insufficient_funds")
    pub id: String,

    /// Short human-readable name
    pub name: String,

    /// What the scenario exercises
    pub description: String,

    /// ISO-8583 response code the scenario should produce
    pub response_code: String,

    /// Text for the response code
    pub response_text: String,

    /// Amount in minor units
    pub amount: i64,

    /// Currency code
    pub currency: String,

    /// Brand or payment method the scenario targets
    pub card_brand: String,

    /// What the system under test should do
    pub expected_outcome: String,

    /// Scenario-specific extras
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl Scenario {
    /// Returns true if the scenario expects an approval
    #[must_use]
    pub fn is_approval(&self) -> bool {
        self.response_code == "00"
    }
}
