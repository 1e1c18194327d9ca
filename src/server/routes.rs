use crate::errors::{PricerError, PricerResult};
use crate::models::black_scholes::{PriceResult, PricingEngine};
use crate::models::greeks::{GreeksEngine, GreeksResult};
use crate::quote::{build_quote, Quote};
use crate::server::validation::validate;
use crate::state::{AppState, PerfCounters, PricingInput};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::response::Json;
use std::sync::Arc;

/// Validate on behalf of the core; count and log rejections.
pub(crate) fn accept(state: &AppState, input: &PricingInput) -> PricerResult<()> {
    validate(input, state.config.max_expiry_years).inspect_err(|e| {
        PerfCounters::bump(&state.counters.requests_rejected);
        tracing::warn!(error = %e, "rejected pricing request");
    })
}

/// Requests that fail to deserialize get the same 422 JSON contract as
/// requests that fail validation.
pub(crate) fn extracted<T, R: std::fmt::Display>(state: &AppState, extraction: Result<T, R>) -> PricerResult<T> {
    extraction.map_err(|rejection| {
        PerfCounters::bump(&state.counters.requests_rejected);
        tracing::warn!(error = %rejection, "malformed pricing request");
        PricerError::invalid("request", rejection.to_string())
    })
}

/// GET /api/price -- single-side price
pub async fn get_price(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PricingInput>, QueryRejection>,
) -> PricerResult<Json<PriceResult>> {
    let Query(input) = extracted(&state, query)?;
    accept(&state, &input)?;
    let result = PricingEngine::new(state.normal.as_ref()).price(&input);
    PerfCounters::bump(&state.counters.prices_computed);
    tracing::debug!(side = %result.side, spot = input.spot, strike = input.strike, price = result.price, "priced option");
    Ok(Json(result))
}

/// GET /api/greeks -- sensitivities for the requested side
pub async fn get_greeks(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PricingInput>, QueryRejection>,
) -> PricerResult<Json<GreeksResult>> {
    let Query(input) = extracted(&state, query)?;
    accept(&state, &input)?;
    let greeks = GreeksEngine::new(state.normal.as_ref()).compute(&input);
    PerfCounters::bump(&state.counters.greeks_computed);
    tracing::debug!(side = %input.side, delta = greeks.delta, gamma = greeks.gamma, "computed greeks");
    Ok(Json(greeks))
}

/// POST /api/quote -- both prices plus Greeks and moneyness
pub async fn post_quote(
    State(state): State<Arc<AppState>>,
    body: Result<Json<PricingInput>, JsonRejection>,
) -> PricerResult<Json<Quote>> {
    let Json(input) = extracted(&state, body)?;
    accept(&state, &input)?;
    let quote = build_quote(state.normal.as_ref(), &input);
    PerfCounters::bump(&state.counters.quotes_served);
    tracing::debug!(side = %quote.side, call = quote.call_price, put = quote.put_price, "served quote");
    Ok(Json(quote))
}

/// GET /api/counters -- request counters (lock-free reads)
pub async fn get_counters(
    State(state): State<Arc<AppState>>,
) -> Json<serde_json::Value> {
    use portable_atomic::Ordering::Relaxed;
    Json(serde_json::json!({
        "prices_computed": state.counters.prices_computed.load(Relaxed),
        "greeks_computed": state.counters.greeks_computed.load(Relaxed),
        "quotes_served": state.counters.quotes_served.load(Relaxed),
        "requests_rejected": state.counters.requests_rejected.load(Relaxed),
    }))
}

/// GET /health -- liveness
pub async fn health(
    State(state): State<Arc<AppState>>,
) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "uptime_secs": state.started_at.elapsed().as_secs(),
        "normal_cdf": state.normal.name(),
    }))
}
