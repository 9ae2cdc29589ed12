//! Educational features: what each command computes.

use colored::Colorize;

/// Command explanation builder.
///
/// Printed to stderr so it never mixes with card or order data on stdout.
pub struct Explain {
    title: String,
    description: String,
    endpoint: Option<String>,
    what_happens: Vec<String>,
    caution: Option<String>,
}

impl Explain {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            description: String::new(),
            endpoint: None,
            what_happens: Vec::new(),
            caution: None,
        }
    }

    fn description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }

    fn endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = Some(endpoint.to_string());
        self
    }

    fn step(mut self, step: &str) -> Self {
        self.what_happens.push(step.to_string());
        self
    }

    fn caution(mut self, note: &str) -> Self {
        self.caution = Some(note.to_string());
        self
    }

    /// Print the explanation to stderr.
    pub fn print(&self) {
        eprintln!();
        eprintln!("{}", format!("=== {} ===", self.title).bold().cyan());
        eprintln!("{}", self.description);
        eprintln!();

        if !self.what_happens.is_empty() {
            eprintln!("{}", "How it works:".bold());
            for (i, step) in self.what_happens.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, step);
            }
            eprintln!();
        }

        if let Some(endpoint) = &self.endpoint {
            eprintln!("{} {}", "Endpoints:".bold(), endpoint.dimmed());
        }

        if let Some(note) = &self.caution {
            eprintln!("{} {}", "Note:".bold().yellow(), note);
        }

        eprintln!();
        eprintln!("{}", "=== Results ===".bold().cyan());
        eprintln!();
    }

    // ========================================================================
    // Factory methods for each command
    // ========================================================================

    pub fn generate(brand: &str, count: usize, keyed: bool) -> Self {
        let explanation = Self::new("Generate Cards")
            .description(&format!(
                "Synthesizes {count} {brand} test card(s) that pass the Luhn check."
            ))
            .step("Starts from the brand's default BIN, or the --bin override")
            .step("Fills random digits up to the PAN length, leaving one slot")
            .step("Appends the Luhn check digit so the PAN validates")
            .step("Picks an expiry 1 to 5 years ahead");

        let explanation = if keyed {
            explanation.step("Derives the CVC with HMAC-SHA256 over PAN|MM|YYYY and your secret")
        } else {
            explanation.step("Leaves the CVC empty because no secret is set")
        };

        explanation.caution("Synthetic data only. These cards are not valid for real payments.")
    }

    pub fn transform() -> Self {
        Self::new("Transform Orders")
            .description("Injects deterministic CVCs into orders that do not have one yet.")
            .step("Reads a JSON array or one JSON object per line")
            .step("Checks every order that needs a CVC before touching any")
            .step("Derives each CVC from PAN, expiry and your secret")
            .step("Leaves orders that already have a CVC unchanged")
            .step("Writes the output file only if the whole batch succeeded")
            .caution("Running it again over its own output changes nothing.")
    }

    pub fn validate() -> Self {
        Self::new("Luhn Check")
            .description("Checks a card number with the Luhn (mod 10) algorithm.")
            .step("Walks the digits right to left")
            .step("Doubles every second digit, subtracting 9 when it exceeds 9")
            .step("Valid when the total is a multiple of 10")
    }

    pub fn scenarios() -> Self {
        Self::new("Test Scenarios")
            .description("Lists named authorization outcomes to drive test cases.")
            .step("Each scenario pairs an ISO-8583 response code with an amount")
            .step("Use one with 'cardgen authorize --scenario <ID>'")
    }

    pub fn authorize() -> Self {
        Self::new("Mock Authorization")
            .description("Builds an ISO-8583 authorization request and a matching response.")
            .step("Synthesizes a card with Track2 data")
            .step("Fills request fields 2-49 under MTI 0100")
            .step("Copies them into an MTI 0110 response and sets field 39")
            .step("Issues an authorization code only for approvals")
            .caution("No message is sent anywhere. This is fixture data.")
    }

    pub fn serve(port: u16) -> Self {
        Self::new("Fixture Server")
            .description(&format!("Serves test cards over HTTP on port {port}."))
            .endpoint("GET /health, GET /v1/cards, GET /v1/scenarios")
            .step("/v1/cards and /v1/scenarios need 'Authorization: Bearer <token>'")
            .step("Each client IP gets a per-minute request quota")
            .caution("For test and sandbox environments only.")
    }
}
