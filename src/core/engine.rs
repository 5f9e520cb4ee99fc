use std::collections::HashMap;

use chrono::NaiveDate;

use super::types::{
    AssetProjection, AssetReference, Confidence, Fundamentals, PriceTargets, Quote,
    RawScenarios, ScenarioSet,
};

pub const PROJECTION_HORIZONS: [u32; 2] = [5, 10];

const DAYS_PER_YEAR: f64 = 365.25;
const TRAILING_WINDOW_YEARS: f64 = 5.0;

const INCEPTION_WEIGHT: f64 = 0.4;
const TRAILING_WEIGHT: f64 = 0.6;
const CONSERVATIVE_HAIRCUT: f64 = 0.70;

const EXPENSIVE_FORWARD_PE: f64 = 35.0;
const CHEAP_FORWARD_PE: f64 = 15.0;
const PE_EXPANSION_THRESHOLD: f64 = 0.15;
const PE_COMPRESSION_THRESHOLD: f64 = -0.10;
const EPS_BLEND_WEIGHT: f64 = 0.2;
const STRONG_EPS_SIGNAL: f64 = 15.0;
const RANGE_LOW_ZONE: f64 = 0.30;
const RANGE_HIGH_ZONE: f64 = 0.85;

/// Compound annual growth rate in percent.
///
/// Returns `0.0` instead of NaN or infinity for degenerate inputs: a
/// non-positive start price or year count, a negative end price, or any
/// non-finite argument.
pub fn cagr(start_price: f64, end_price: f64, years: f64) -> f64 {
    if !(start_price.is_finite() && end_price.is_finite() && years.is_finite()) {
        return 0.0;
    }
    if start_price <= 0.0 || years <= 0.0 || end_price < 0.0 {
        return 0.0;
    }
    ((end_price / start_price).powf(1.0 / years) - 1.0) * 100.0
}

/// Compounds `cagr_percent` over `years` from `current_price`.
pub fn project_price(current_price: f64, cagr_percent: f64, years: f64) -> f64 {
    if years < 0.0 {
        return 0.0;
    }
    let growth = (1.0 + cagr_percent / 100.0).max(0.0);
    current_price * growth.powf(years)
}

pub fn years_between(start: NaiveDate, end: NaiveDate) -> f64 {
    (end - start).num_days() as f64 / DAYS_PER_YEAR
}

/// Runs the adjustment rules and enforces `conservative <= base <= optimistic`.
pub fn project_scenarios(
    cagr_since_inception: f64,
    cagr_trailing_5y: f64,
    fundamentals: Option<&Fundamentals>,
    current_price: f64,
) -> ScenarioSet {
    finalize_scenarios(adjust_scenarios(
        cagr_since_inception,
        cagr_trailing_5y,
        fundamentals,
        current_price,
    ))
}

/// Anchors the three scenarios on the baselines and applies every rule whose
/// inputs are present. Output is unrounded and may be out of order.
pub fn adjust_scenarios(
    cagr_since_inception: f64,
    cagr_trailing_5y: f64,
    fundamentals: Option<&Fundamentals>,
    current_price: f64,
) -> RawScenarios {
    let lower = cagr_since_inception.min(cagr_trailing_5y);
    let higher = cagr_since_inception.max(cagr_trailing_5y);
    let blended = cagr_since_inception * INCEPTION_WEIGHT + cagr_trailing_5y * TRAILING_WEIGHT;

    let mut raw = RawScenarios {
        conservative: lower * CONSERVATIVE_HAIRCUT,
        base: blended,
        optimistic: higher,
        factor_count: 2,
    };

    let Some(f) = fundamentals else {
        return raw;
    };

    let forward_pe = present(f.forward_pe).filter(|pe| *pe > 0.0);
    if let Some(forward_pe) = forward_pe {
        apply_valuation(&mut raw, forward_pe);
        raw.factor_count += 1;

        if let Some(trailing_pe) = present(f.trailing_pe).filter(|pe| *pe > 0.0) {
            apply_pe_compression(&mut raw, forward_pe, trailing_pe);
            raw.factor_count += 1;
        }
    }

    if let Some(eps_growth) = present(f.eps_growth) {
        apply_eps_growth(&mut raw, eps_growth);
        raw.factor_count += 1;
    }

    if let Some(dividend_yield) = present(f.dividend_yield).filter(|y| *y > 0.0) {
        let dividend_pct = dividend_yield * 100.0;
        raw.conservative += dividend_pct;
        raw.base += dividend_pct;
        raw.optimistic += dividend_pct;
        raw.factor_count += 1;
    }

    if let (Some(high), Some(low)) = (present(f.fifty_two_week_high), present(f.fifty_two_week_low)) {
        if high > low {
            apply_range_position(&mut raw, (current_price - low) / (high - low));
            raw.factor_count += 1;
        }
    }

    raw
}

/// Rounds to one decimal, then sorts so the labels follow the numbers.
pub fn finalize_scenarios(raw: RawScenarios) -> ScenarioSet {
    let mut values = [
        round1(raw.conservative),
        round1(raw.base),
        round1(raw.optimistic),
    ];
    values.sort_by(|a, b| a.total_cmp(b));

    ScenarioSet {
        conservative: values[0],
        base: values[1],
        optimistic: values[2],
        factor_count: raw.factor_count,
        confidence: Confidence::from_factor_count(raw.factor_count),
    }
}

fn apply_valuation(raw: &mut RawScenarios, forward_pe: f64) {
    if forward_pe > EXPENSIVE_FORWARD_PE {
        let penalty = ((forward_pe - EXPENSIVE_FORWARD_PE) * 0.10).clamp(0.0, 3.0);
        raw.base -= penalty;
        raw.optimistic -= penalty;
    } else if forward_pe < CHEAP_FORWARD_PE {
        let bonus = ((CHEAP_FORWARD_PE - forward_pe) * 0.15).clamp(0.0, 2.0);
        raw.conservative += bonus;
    }
}

// Forward P/E well below trailing means the market is pricing in earnings growth.
fn apply_pe_compression(raw: &mut RawScenarios, forward_pe: f64, trailing_pe: f64) {
    let pe_change = (forward_pe - trailing_pe) / trailing_pe;
    if pe_change < PE_COMPRESSION_THRESHOLD {
        raw.base += (pe_change.abs() * 5.0).clamp(0.0, 2.0);
    } else if pe_change > PE_EXPANSION_THRESHOLD {
        raw.base -= (pe_change * 3.0).clamp(0.0, 2.0);
    }
}

fn apply_eps_growth(raw: &mut RawScenarios, eps_growth: f64) {
    let eps_signal = eps_growth * 100.0;
    let growth_adjusted = raw.base + eps_signal * 0.3;
    raw.base = raw.base * (1.0 - EPS_BLEND_WEIGHT) + growth_adjusted * EPS_BLEND_WEIGHT;
    if eps_signal > STRONG_EPS_SIGNAL {
        raw.optimistic += (eps_signal * 0.10).clamp(0.0, 3.0);
    }
}

fn apply_range_position(raw: &mut RawScenarios, position: f64) {
    if position < RANGE_LOW_ZONE {
        raw.conservative += ((RANGE_LOW_ZONE - position) * 5.0).clamp(0.0, 2.0);
    }
    if position > RANGE_HIGH_ZONE {
        raw.optimistic -= ((position - RANGE_HIGH_ZONE) * 8.0).clamp(0.0, 2.0);
    }
}

fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn project_asset(asset: &AssetReference, quote: &Quote, as_of: NaiveDate) -> AssetProjection {
    let price = quote.price;
    let cagr_since_inception = cagr(
        asset.inception_price,
        price,
        years_between(asset.inception_date, as_of),
    );
    let cagr_trailing_5y = cagr(asset.price_5y_ago, price, TRAILING_WINDOW_YEARS);

    let fundamentals = Some(&quote.fundamentals).filter(|f| !f.is_empty());
    let scenarios = project_scenarios(cagr_since_inception, cagr_trailing_5y, fundamentals, price);

    let targets = PROJECTION_HORIZONS
        .iter()
        .map(|&years| {
            let horizon = years as f64;
            PriceTargets {
                years,
                conservative: project_price(price, scenarios.conservative, horizon),
                base: project_price(price, scenarios.base, horizon),
                optimistic: project_price(price, scenarios.optimistic, horizon),
            }
        })
        .collect();

    AssetProjection {
        ticker: asset.ticker,
        name: asset.name,
        class: asset.class,
        sector: asset.sector,
        benchmark: asset.benchmark,
        current_price: price,
        cagr_since_inception,
        cagr_trailing_5y,
        scenarios,
        targets,
    }
}

/// Projects every asset that has a usable quote, in reference-table order.
/// Quote keys are matched case-insensitively; when two keys fold to the same
/// ticker the lexicographically smallest key wins.
pub fn project_universe(
    assets: &[AssetReference],
    quotes: &HashMap<String, Quote>,
    as_of: NaiveDate,
) -> Vec<AssetProjection> {
    let mut keys: Vec<&String> = quotes.keys().collect();
    keys.sort();
    let mut folded: HashMap<String, &Quote> = HashMap::with_capacity(keys.len());
    for key in keys {
        folded
            .entry(key.to_ascii_uppercase())
            .or_insert(&quotes[key]);
    }
    let quotes = folded;

    let mut projections = Vec::with_capacity(assets.len());
    for asset in assets {
        let Some(quote) = quotes.get(asset.ticker) else {
            tracing::debug!(ticker = asset.ticker, "no quote, skipping");
            continue;
        };
        if !quote.price.is_finite() || quote.price <= 0.0 {
            tracing::debug!(ticker = asset.ticker, price = quote.price, "unusable price, skipping");
            continue;
        }
        projections.push(project_asset(asset, quote, as_of));
    }
    projections
}
