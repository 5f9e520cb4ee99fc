mod error;

use axum::{
    Router,
    extract::{
        Json, Path, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    ASSETS, AssetClass, AssetProjection, Fundamentals, ProjectionQuery, Quote, SortKey,
    UniverseSummary, find_asset, project_asset, project_universe, query_projections, summarize,
};

pub use error::{ApiError, ErrorResponse};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectionsPayload {
    as_of: Option<String>,
    quotes: HashMap<String, Quote>,
    search: Option<String>,
    #[serde(alias = "class")]
    asset_class: Option<AssetClass>,
    sort_by: Option<SortKey>,
    descending: Option<bool>,
}

// Flat on purpose: query strings cannot carry a flattened `Fundamentals`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TickerQuery {
    price: Option<f64>,
    #[serde(rename = "asOf")]
    as_of: Option<String>,
    #[serde(rename = "trailingPE", alias = "trailingPe")]
    trailing_pe: Option<f64>,
    #[serde(rename = "forwardPE", alias = "forwardPe")]
    forward_pe: Option<f64>,
    #[serde(rename = "dividendYield")]
    dividend_yield: Option<f64>,
    #[serde(rename = "revenueGrowth")]
    revenue_growth: Option<f64>,
    #[serde(rename = "epsGrowth")]
    eps_growth: Option<f64>,
    #[serde(rename = "fiftyTwoWeekHigh")]
    fifty_two_week_high: Option<f64>,
    #[serde(rename = "fiftyTwoWeekLow")]
    fifty_two_week_low: Option<f64>,
}

/// A validated projection run: every quote has a usable price.
#[derive(Debug, Clone)]
pub struct ProjectionRequest {
    pub as_of: NaiveDate,
    pub quotes: HashMap<String, Quote>,
    pub query: ProjectionQuery,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionsResponse {
    pub as_of: NaiveDate,
    pub summary: UniverseSummary,
    pub projections: Vec<AssetProjection>,
}

pub fn parse_as_of(raw: Option<&str>) -> Result<NaiveDate, ApiError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| ApiError::validation(format!("asOf must be YYYY-MM-DD, got {raw:?}"))),
        None => Ok(Utc::now().date_naive()),
    }
}

fn validate_price(ticker: &str, price: f64) -> Result<(), ApiError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(ApiError::validation(format!(
            "price for {ticker} must be > 0"
        )));
    }
    Ok(())
}

pub fn build_request(
    as_of: Option<&str>,
    quotes: HashMap<String, Quote>,
    query: ProjectionQuery,
) -> Result<ProjectionRequest, ApiError> {
    let as_of = parse_as_of(as_of)?;
    if quotes.is_empty() {
        return Err(ApiError::validation("quotes must not be empty"));
    }
    let mut seen = HashSet::with_capacity(quotes.len());
    for (ticker, quote) in &quotes {
        validate_price(ticker, quote.price)?;
        if !seen.insert(ticker.to_ascii_uppercase()) {
            return Err(ApiError::validation(format!(
                "duplicate quote for {} (tickers are case-insensitive)",
                ticker.to_ascii_uppercase()
            )));
        }
    }

    Ok(ProjectionRequest {
        as_of,
        quotes,
        query,
    })
}

pub fn build_projections_response(request: &ProjectionRequest) -> ProjectionsResponse {
    let universe = project_universe(ASSETS, &request.quotes, request.as_of);
    let summary = summarize(&universe);
    let projections = query_projections(&universe, &request.query)
        .into_iter()
        .cloned()
        .collect();

    ProjectionsResponse {
        as_of: request.as_of,
        summary,
        projections,
    }
}

fn request_from_payload(payload: ProjectionsPayload) -> Result<ProjectionRequest, ApiError> {
    let query = ProjectionQuery {
        search: payload.search,
        class: payload.asset_class,
        sort_by: payload.sort_by.unwrap_or_default(),
        descending: payload.descending.unwrap_or(false),
    };
    build_request(payload.as_of.as_deref(), payload.quotes, query)
}

#[cfg(test)]
fn request_from_json(json: &str) -> Result<ProjectionRequest, ApiError> {
    let payload = serde_json::from_str::<ProjectionsPayload>(json)?;
    request_from_payload(payload)
}

fn ticker_quote(ticker: &str, params: TickerQuery) -> Result<(NaiveDate, Quote), ApiError> {
    let as_of = parse_as_of(params.as_of.as_deref())?;
    let Some(price) = params.price else {
        return Err(ApiError::validation("price is required"));
    };
    validate_price(ticker, price)?;

    let quote = Quote {
        price,
        fundamentals: Fundamentals {
            trailing_pe: params.trailing_pe,
            forward_pe: params.forward_pe,
            dividend_yield: params.dividend_yield,
            revenue_growth: params.revenue_growth,
            eps_growth: params.eps_growth,
            fifty_two_week_high: params.fifty_two_week_high,
            fifty_two_week_low: params.fifty_two_week_low,
        },
    };
    Ok((as_of, quote))
}

pub fn router() -> Router {
    Router::new()
        .route("/api/assets", get(assets_handler))
        .route("/api/projections", post(projections_handler))
        .route("/api/projections/:ticker", get(ticker_handler))
        .fallback(not_found_handler)
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, assets = ASSETS.len(), "projection API listening");

    axum::serve(listener, router()).await
}

async fn assets_handler() -> Response {
    json_response(StatusCode::OK, ASSETS)
}

async fn projections_handler(
    payload: Result<Json<ProjectionsPayload>, JsonRejection>,
) -> Response {
    let request = match payload
        .map_err(ApiError::from)
        .and_then(|Json(payload)| request_from_payload(payload))
    {
        Ok(request) => request,
        Err(err) => return err.into_response(),
    };

    let response = build_projections_response(&request);
    tracing::debug!(
        as_of = %request.as_of,
        quotes = request.quotes.len(),
        projected = response.summary.asset_count,
        returned = response.projections.len(),
        "projections computed"
    );
    json_response(StatusCode::OK, response)
}

async fn ticker_handler(
    Path(ticker): Path<String>,
    params: Result<Query<TickerQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = params?;
    let asset = find_asset(&ticker).ok_or_else(|| ApiError::UnknownTicker(ticker.clone()))?;
    let (as_of, quote) = ticker_quote(asset.ticker, params)?;
    Ok(json_response(
        StatusCode::OK,
        project_asset(asset, &quote, as_of),
    ))
}

async fn not_found_handler() -> Response {
    json_response(
        StatusCode::NOT_FOUND,
        ErrorResponse {
            error: "Not found".to_string(),
        },
    )
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}
