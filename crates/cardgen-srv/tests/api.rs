//! HTTP-level tests for the fixture server: authentication, rate limiting
//! and response shapes.

use axum::body::Body;
use axum::http::header::AUTHORIZATION;
use axum::http::{Request, StatusCode};
use axum::Router;
use cardgen_core::{derive_cvc, luhn, Card};
use cardgen_srv::{build_router, serve, AppState, ServerConfig};
use http_body_util::BodyExt;
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tower::ServiceExt;

const TOKEN: &str = "test-token";

// ── Helpers ────────────────────────────────────────────────────

fn config(rate_limit_per_minute: u32) -> ServerConfig {
    let mut config = ServerConfig::default().with_token(TOKEN);
    config.rate_limit_per_minute = rate_limit_per_minute;
    config
}

fn app() -> Router {
    build_router(AppState::new(config(100)).unwrap())
}

async fn get(app: &Router, uri: &str, auth: Option<&str>) -> (StatusCode, Value) {
    let mut req = Request::builder().uri(uri);
    if let Some(auth) = auth {
        req = req.header(AUTHORIZATION, auth);
    }
    let resp = app
        .clone()
        .oneshot(req.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn bearer() -> String {
    format!("Bearer {TOKEN}")
}

// ── Public routes ──────────────────────────────────────────────

#[tokio::test]
async fn test_health_is_public() {
    let (status, body) = get(&app(), "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    let time = body["time"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(time).is_ok());
}

// ── Authentication ─────────────────────────────────────────────

#[tokio::test]
async fn test_missing_authorization() {
    let (status, body) = get(&app(), "/v1/cards", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "missing Authorization header");
}

#[tokio::test]
async fn test_invalid_token() {
    let app = app();
    for auth in ["Bearer wrong", "test-token", "Basic dGVzdA==", "bearer test-token"] {
        let (status, body) = get(&app, "/v1/scenarios", Some(auth)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{auth}");
        assert_eq!(body["error"], "invalid token");
    }
}

// ── Cards ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_cards_default_batch() {
    let (status, body) = get(&app(), "/v1/cards", Some(&bearer())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 10);

    let cards: Vec<Card> = serde_json::from_value(body["cards"].clone()).unwrap();
    assert_eq!(cards.len(), 10);
    for card in &cards {
        assert_eq!(card.brand, "Visa");
        assert!(luhn::validate(&card.pan));
        assert!(card.cvc.is_empty());
        assert!(card.track2.starts_with(&format!("{}=", card.pan)));
        assert_eq!(card.iso_fields.get(4), Some("000000010000"));
        assert_eq!(card.iso_fields.get(49), Some("986"));
    }
}

#[tokio::test]
async fn test_cards_count_bounds() {
    let app = app();
    let (_, body) = get(&app, "/v1/cards?count=3", Some(&bearer())).await;
    assert_eq!(body["count"], 3);

    let (_, body) = get(&app, "/v1/cards?count=500", Some(&bearer())).await;
    assert_eq!(body["count"], 10);

    let (_, body) = get(&app, "/v1/cards?count=abc", Some(&bearer())).await;
    assert_eq!(body["count"], 10);
}

#[tokio::test]
async fn test_cards_with_bin_and_secret() {
    let (status, body) = get(
        &app(),
        "/v1/cards?brand=visa&bin=400000000000000&count=2&secret=test-secret",
        Some(&bearer()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let cards: Vec<Card> = serde_json::from_value(body["cards"].clone()).unwrap();
    for card in &cards {
        assert_eq!(card.pan, "4000000000000002");
        let expected = derive_cvc(
            &card.pan,
            &format!("{:02}", card.expiry_month),
            &card.expiry_year.to_string(),
            "test-secret",
        )
        .unwrap();
        assert_eq!(card.cvc, expected);
    }
}

#[tokio::test]
async fn test_cards_amex() {
    let (_, body) = get(&app(), "/v1/cards?brand=AMEX&count=1&secret=k", Some(&bearer())).await;
    let cards: Vec<Card> = serde_json::from_value(body["cards"].clone()).unwrap();
    assert_eq!(cards[0].pan.len(), 15);
    assert_eq!(cards[0].cvc.len(), 4);
}

#[tokio::test]
async fn test_cards_bad_input_is_400() {
    let app = app();
    let (status, body) = get(&app, "/v1/cards?brand=diners", Some(&bearer())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "unknown brand: diners");

    let (status, _) = get(&app, "/v1/cards?bin=12ab56", Some(&bearer())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ── Scenarios ──────────────────────────────────────────────────

#[tokio::test]
async fn test_scenarios() {
    let (status, body) = get(&app(), "/v1/scenarios", Some(&bearer())).await;
    assert_eq!(status, StatusCode::OK);

    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 12);
    assert!(list.iter().any(|s| s["response_code"] == "00"));
    assert!(list.iter().all(|s| s["id"].is_string()));
}

// ── Rate limiting ──────────────────────────────────────────────

#[tokio::test]
async fn test_rate_limit_runs_before_auth() {
    let app = build_router(AppState::new(config(2)).unwrap());

    let (status, _) = get(&app, "/v1/scenarios", Some(&bearer())).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = get(&app, "/v1/scenarios", Some("Bearer nope")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = get(&app, "/v1/scenarios", Some(&bearer())).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], "rate limit exceeded");

    let (status, _) = get(&app, "/v1/cards", None).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);

    // Health stays reachable.
    let (status, _) = get(&app, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
}

// ── Real socket ────────────────────────────────────────────────

#[tokio::test]
async fn test_serve_over_tcp() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop, stopped) = tokio::sync::oneshot::channel::<()>();

    let server = tokio::spawn(serve(listener, config(100), async {
        stopped.await.ok();
    }));

    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!(
        "GET /v1/scenarios HTTP/1.1\r\nHost: {addr}\r\nAuthorization: Bearer {TOKEN}\r\nConnection: close\r\n\r\n"
    );
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    assert!(response.starts_with("HTTP/1.1 200"), "{response}");
    assert!(response.contains("\"response_code\""));

    stop.send(()).unwrap();
    server.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_serve_rejects_missing_token() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let result = serve(listener, ServerConfig::default(), async {}).await;
    assert!(result.is_err());
}
