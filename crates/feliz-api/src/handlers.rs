//! API Handlers
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use feliz_core::{PricingRules, QuotationPair, RawQuotationInput, FELIZ_VERSION};
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub quotation: QuotationPair,
    pub computed_at: DateTime<Utc>,
}

pub async fn quote(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RawQuotationInput>,
) -> Json<QuoteResponse> {
    let quotation = state.engine.compute(&payload.coerce());
    state.metrics.observe(&quotation);

    Json(QuoteResponse {
        quotation,
        computed_at: Utc::now(),
    })
}

pub async fn render(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RawQuotationInput>,
) -> Result<Json<Value>, ApiError> {
    let quotation = state.engine.compute(&payload.coerce());
    state.metrics.observe(&quotation);

    let text = feliz_out::render_quote(
        &state.renderer,
        &quotation,
        state.engine.rules(),
        &state.currency,
    )?;

    Ok(Json(json!({ "text": text, "currency": state.currency })))
}

pub async fn rules(State(state): State<Arc<AppState>>) -> Json<PricingRules> {
    Json(state.engine.rules().clone())
}

pub async fn metrics(State(state): State<Arc<AppState>>) -> Result<String, ApiError> {
    Ok(state.metrics.encode()?)
}

pub async fn health() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "version": FELIZ_VERSION })),
    )
}
