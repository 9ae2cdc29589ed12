//! Catalogue of named payment test scenarios.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::types::Scenario;

const BRL: &str = "986";

struct Entry {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    code: &'static str,
    text: &'static str,
    amount: i64,
    brand: &'static str,
    outcome: &'static str,
    metadata: &'static [(&'static str, &'static str)],
}

const CATALOGUE: &[Entry] = &[
    Entry {
        id: "success_auth",
        name: "Successful Authorization",
        description: "Standard approved transaction",
        code: "00",
        text: "Approved",
        amount: 10_000,
        brand: "visa",
        outcome: "Transaction approved, auth code generated",
        metadata: &[],
    },
    Entry {
        id: "declined_generic",
        name: "Generic Decline",
        description: "Transaction declined without specific reason",
        code: "05",
        text: "Do not honor",
        amount: 50_000,
        brand: "mastercard",
        outcome: "Transaction declined by issuer",
        metadata: &[],
    },
    Entry {
        id: "insufficient_funds",
        name: "Insufficient Funds",
        description: "Card has insufficient balance",
        code: "51",
        text: "Insufficient funds",
        amount: 100_000,
        brand: "visa",
        outcome: "Decline due to insufficient balance",
        metadata: &[],
    },
    Entry {
        id: "3ds_required",
        name: "3DS Authentication Required",
        description: "Transaction requires 3D Secure authentication",
        code: "00",
        text: "Approved",
        amount: 25_000,
        brand: "visa",
        outcome: "Redirect to 3DS flow before completion",
        metadata: &[("3ds_required", "true"), ("3ds_version", "2.0")],
    },
    Entry {
        id: "auth_only",
        name: "Authorization Only (Pre-Auth)",
        description: "Amount held but not captured",
        code: "00",
        text: "Approved",
        amount: 15_000,
        brand: "mastercard",
        outcome: "Authorization successful, requires capture",
        metadata: &[("type", "pre_auth")],
    },
    Entry {
        id: "captured",
        name: "Captured Transaction",
        description: "Previously authorized transaction now captured",
        code: "00",
        text: "Approved",
        amount: 15_000,
        brand: "mastercard",
        outcome: "Funds captured successfully",
        metadata: &[("type", "capture"), ("original_ref", "AUTH123456")],
    },
    Entry {
        id: "refunded_partial",
        name: "Partial Refund",
        description: "Part of transaction amount refunded",
        code: "00",
        text: "Approved",
        amount: 5_000,
        brand: "visa",
        outcome: "Partial refund processed",
        metadata: &[
            ("type", "refund"),
            ("original_amount", "15000"),
            ("refund_amount", "5000"),
        ],
    },
    Entry {
        id: "chargeback_open",
        name: "Chargeback Initiated",
        description: "Customer disputed the transaction",
        code: "00",
        text: "Approved",
        amount: 20_000,
        brand: "mastercard",
        outcome: "Chargeback case opened, merchant response required",
        metadata: &[
            ("type", "chargeback"),
            ("reason_code", "4853"),
            ("dispute_amount", "20000"),
        ],
    },
    Entry {
        id: "pix_paid",
        name: "PIX Payment Successful",
        description: "Brazilian instant payment completed",
        code: "00",
        text: "Approved",
        amount: 35_000,
        brand: "pix",
        outcome: "PIX payment confirmed instantly",
        metadata: &[("payment_method", "pix"), ("pix_key", "user@example.com")],
    },
    Entry {
        id: "boleto_pending",
        name: "Boleto Payment Pending",
        description: "Brazilian boleto generated, awaiting payment",
        code: "00",
        text: "Approved",
        amount: 45_000,
        brand: "boleto",
        outcome: "Boleto generated, pending customer payment",
        metadata: &[
            ("payment_method", "boleto"),
            ("due_date", "2025-11-01"),
            (
                "barcode",
                "34191.79001 01043.510047 91020.150008 1 96610000012345",
            ),
        ],
    },
    Entry {
        id: "subscription_recurring",
        name: "Recurring Subscription Payment",
        description: "Monthly subscription charge",
        code: "00",
        text: "Approved",
        amount: 4_990,
        brand: "visa",
        outcome: "Recurring payment successful",
        metadata: &[
            ("type", "subscription"),
            ("subscription_id", "SUB_12345"),
            ("billing_cycle", "monthly"),
            ("next_billing_date", "2025-11-20"),
        ],
    },
    Entry {
        id: "tokenized_payment",
        name: "Tokenized Card Payment",
        description: "Payment using stored card token",
        code: "00",
        text: "Approved",
        amount: 12_000,
        brand: "mastercard",
        outcome: "Token-based payment successful",
        metadata: &[
            ("type", "token_payment"),
            ("token_id", "tok_1A2B3C4D5E6F"),
            ("token_type", "card_on_file"),
        ],
    },
];

impl Entry {
    fn to_scenario(&self) -> Scenario {
        Scenario {
            id: self.id.to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            response_code: self.code.to_string(),
            response_text: self.text.to_string(),
            amount: self.amount,
            currency: BRL.to_string(),
            card_brand: self.brand.to_string(),
            expected_outcome: self.outcome.to_string(),
            metadata: self
                .metadata
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect::<BTreeMap<_, _>>(),
        }
    }
}

/// All predefined scenarios, built once.
pub fn standard_scenarios() -> &'static [Scenario] {
    static SCENARIOS: OnceLock<Vec<Scenario>> = OnceLock::new();
    SCENARIOS.get_or_init(|| CATALOGUE.iter().map(Entry::to_scenario).collect())
}

/// Look up a scenario by id.
pub fn find_scenario(id: &str) -> Option<&'static Scenario> {
    standard_scenarios().iter().find(|s| s.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iso8583::response_text;

    #[test]
    fn test_catalogue_size_and_unique_ids() {
        let scenarios = standard_scenarios();
        assert_eq!(scenarios.len(), 12);

        let mut ids: Vec<_> = scenarios.iter().map(|s| s.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 12);
    }

    #[test]
    fn test_find_scenario() {
        let s = find_scenario("insufficient_funds").unwrap();
        assert_eq!(s.response_code, "51");
        assert_eq!(s.amount, 100_000);
        assert!(!s.is_approval());

        let s = find_scenario("3ds_required").unwrap();
        assert!(s.is_approval());
        assert_eq!(s.metadata.get("3ds_version").map(String::as_str), Some("2.0"));

        assert!(find_scenario("nope").is_none());
    }

    #[test]
    fn test_response_texts_match_table() {
        for s in standard_scenarios() {
            assert_eq!(response_text(&s.response_code), Some(s.response_text.as_str()));
        }
    }
}
