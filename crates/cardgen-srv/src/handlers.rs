//! Route handlers.
//!
//! GET /health        - liveness and server time
//! GET /v1/cards      - synthesize a card batch
//! GET /v1/scenarios  - scenario catalogue

use axum::extract::{Query, State};
use axum::Json;
use cardgen_core::{standard_scenarios, Card, CardSynthesizer, GenerateOptions, Scenario};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::state::AppState;

/// Brand used when the query names none.
const DEFAULT_BRAND: &str = "visa";

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub time: String,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        time: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    })
}

/// Query string for `/v1/cards`. Everything is optional; `count` is kept
/// as text so unparseable values fall back to the default.
#[derive(Debug, Default, Deserialize)]
pub struct CardsQuery {
    pub brand: Option<String>,
    pub bin: Option<String>,
    pub count: Option<String>,
    pub secret: Option<String>,
}

impl CardsQuery {
    /// Requested count if it parses and lies in `1..=max`, else the default.
    fn resolved_count(&self, config: &ServerConfig) -> usize {
        self.count
            .as_deref()
            .and_then(|c| c.trim().parse::<usize>().ok())
            .filter(|c| (1..=config.max_cards_per_request).contains(c))
            .unwrap_or(config.default_count)
    }

    fn to_options(&self, config: &ServerConfig) -> GenerateOptions {
        let brand = self
            .brand
            .as_deref()
            .filter(|b| !b.is_empty())
            .unwrap_or(DEFAULT_BRAND);

        GenerateOptions::new(brand)
            .bin(self.bin.clone().unwrap_or_default())
            .secret(self.secret.clone().unwrap_or_default())
            .count(self.resolved_count(config))
            .include_iso(true)
            .include_track2(true)
            .iso_transaction(config.iso_amount, config.iso_currency.clone())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CardsResponse {
    pub cards: Vec<Card>,
    pub count: usize,
}

pub async fn cards(
    State(state): State<AppState>,
    Query(query): Query<CardsQuery>,
) -> Result<Json<CardsResponse>, ApiError> {
    let options = query.to_options(&state.config);
    let cards = CardSynthesizer::new().synthesize_batch(&options)?;

    info!(
        brand = %options.brand,
        count = cards.len(),
        cvc = options.secret_str().is_some(),
        "served card batch"
    );

    Ok(Json(CardsResponse {
        count: cards.len(),
        cards,
    }))
}

pub async fn scenarios() -> Json<&'static [Scenario]> {
    Json(standard_scenarios())
}
