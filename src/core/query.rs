use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::types::{AssetClass, AssetProjection, Confidence};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    Ticker,
    Base,
    Conservative,
    Optimistic,
    Factors,
    #[serde(alias = "inception")]
    InceptionCagr,
    #[serde(alias = "trailing", alias = "fiveYear")]
    TrailingCagr,
}

/// Explicit display parameters; nothing here is remembered between calls.
#[derive(Debug, Clone, Default)]
pub struct ProjectionQuery {
    pub search: Option<String>,
    pub class: Option<AssetClass>,
    pub sort_by: SortKey,
    pub descending: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceTally {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UniverseSummary {
    pub asset_count: usize,
    pub benchmark_ticker: Option<&'static str>,
    pub benchmark_base: Option<f64>,
    /// Non-benchmark assets whose base scenario exceeds the benchmark's.
    pub beats_benchmark: usize,
    pub mean_base: Option<f64>,
    pub confidence: ConfidenceTally,
}

pub fn summarize(projections: &[AssetProjection]) -> UniverseSummary {
    let benchmark = projections.iter().find(|p| p.benchmark);
    let benchmark_base = benchmark.map(|p| p.scenarios.base);

    let holdings: Vec<&AssetProjection> = projections.iter().filter(|p| !p.benchmark).collect();
    let beats_benchmark = match benchmark_base {
        Some(bench) => holdings.iter().filter(|p| p.scenarios.base > bench).count(),
        None => 0,
    };
    let mean_base = if holdings.is_empty() {
        None
    } else {
        Some(holdings.iter().map(|p| p.scenarios.base).sum::<f64>() / holdings.len() as f64)
    };

    let mut confidence = ConfidenceTally::default();
    for projection in projections {
        match projection.scenarios.confidence {
            Confidence::High => confidence.high += 1,
            Confidence::Medium => confidence.medium += 1,
            Confidence::Low => confidence.low += 1,
        }
    }

    UniverseSummary {
        asset_count: projections.len(),
        benchmark_ticker: benchmark.map(|p| p.ticker),
        benchmark_base,
        beats_benchmark,
        mean_base,
        confidence,
    }
}

pub fn query_projections<'a>(
    projections: &'a [AssetProjection],
    query: &ProjectionQuery,
) -> Vec<&'a AssetProjection> {
    let needle = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut rows: Vec<&AssetProjection> = projections
        .iter()
        .filter(|p| query.class.is_none_or(|class| p.class == class))
        .filter(|p| match &needle {
            Some(needle) => [p.ticker, p.name, p.sector]
                .iter()
                .any(|field| field.to_lowercase().contains(needle.as_str())),
            None => true,
        })
        .collect();

    rows.sort_by(|a, b| {
        let ordering = compare_by(a, b, query.sort_by);
        if query.descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
    rows
}

fn compare_by(a: &AssetProjection, b: &AssetProjection, key: SortKey) -> Ordering {
    match key {
        SortKey::Ticker => a.ticker.cmp(b.ticker),
        SortKey::Base => a.scenarios.base.total_cmp(&b.scenarios.base),
        SortKey::Conservative => a.scenarios.conservative.total_cmp(&b.scenarios.conservative),
        SortKey::Optimistic => a.scenarios.optimistic.total_cmp(&b.scenarios.optimistic),
        SortKey::Factors => a.scenarios.factor_count.cmp(&b.scenarios.factor_count),
        SortKey::InceptionCagr => a.cagr_since_inception.total_cmp(&b.cagr_since_inception),
        SortKey::TrailingCagr => a.cagr_trailing_5y.total_cmp(&b.cagr_trailing_5y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::engine::project_universe;
    use crate::core::reference::ASSETS;
    use crate::core::types::{Fundamentals, Quote};
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn projections() -> Vec<AssetProjection> {
        let as_of = NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date");
        let mut quotes = HashMap::new();
        quotes.insert("SPY".to_string(), Quote::price_only(660.0));
        quotes.insert("NVDA".to_string(), Quote::price_only(180.0));
        quotes.insert("KO".to_string(), Quote::price_only(45.0));
        quotes.insert(
            "GLD".to_string(),
            Quote {
                price: 380.0,
                fundamentals: Fundamentals {
                    fifty_two_week_high: Some(390.0),
                    fifty_two_week_low: Some(230.0),
                    ..Fundamentals::default()
                },
            },
        );
        quotes.insert(
            "MSFT".to_string(),
            Quote {
                price: 510.0,
                fundamentals: Fundamentals {
                    trailing_pe: Some(37.0),
                    forward_pe: Some(33.0),
                    dividend_yield: Some(0.007),
                    eps_growth: Some(0.16),
                    ..Fundamentals::default()
                },
            },
        );
        project_universe(ASSETS, &quotes, as_of)
    }

    #[test]
    fn summary_uses_benchmark_flag() {
        let rows = projections();
        let summary = summarize(&rows);
        assert_eq!(summary.asset_count, 5);
        assert_eq!(summary.benchmark_ticker, Some("SPY"));

        let bench = summary.benchmark_base.expect("benchmark projected");
        let expected = rows
            .iter()
            .filter(|p| !p.benchmark && p.scenarios.base > bench)
            .count();
        assert_eq!(summary.beats_benchmark, expected);
        assert!(summary.beats_benchmark >= 1, "NVDA should beat the index");

        let tally = &summary.confidence;
        assert_eq!(tally.high + tally.medium + tally.low, 5);
        assert_eq!(tally.medium, 0);
        assert_eq!(tally.high, 1);
    }

    #[test]
    fn summary_without_benchmark_counts_nothing() {
        let rows: Vec<_> = projections().into_iter().filter(|p| !p.benchmark).collect();
        let summary = summarize(&rows);
        assert_eq!(summary.benchmark_ticker, None);
        assert_eq!(summary.beats_benchmark, 0);
        assert!(summary.mean_base.is_some());
    }

    #[test]
    fn summary_of_nothing() {
        let summary = summarize(&[]);
        assert_eq!(summary.asset_count, 0);
        assert_eq!(summary.mean_base, None);
    }

    #[test]
    fn query_filters_by_class_and_search() {
        let rows = projections();
        let query = ProjectionQuery {
            class: Some(AssetClass::Commodity),
            ..ProjectionQuery::default()
        };
        let found: Vec<_> = query_projections(&rows, &query).iter().map(|p| p.ticker).collect();
        assert_eq!(found, vec!["GLD"]);

        let query = ProjectionQuery {
            search: Some("  semi ".to_string()),
            ..ProjectionQuery::default()
        };
        let found: Vec<_> = query_projections(&rows, &query).iter().map(|p| p.ticker).collect();
        assert_eq!(found, vec!["NVDA"]);

        let query = ProjectionQuery {
            search: Some("coca".to_string()),
            ..ProjectionQuery::default()
        };
        assert_eq!(query_projections(&rows, &query).len(), 1);
    }

    #[test]
    fn query_sorts_by_requested_key() {
        let rows = projections();
        let query = ProjectionQuery {
            sort_by: SortKey::Base,
            descending: true,
            ..ProjectionQuery::default()
        };
        let sorted = query_projections(&rows, &query);
        assert_eq!(sorted.len(), rows.len());
        for pair in sorted.windows(2) {
            assert!(pair[0].scenarios.base >= pair[1].scenarios.base);
        }

        let by_ticker: Vec<_> = query_projections(&rows, &ProjectionQuery::default())
            .iter()
            .map(|p| p.ticker)
            .collect();
        assert_eq!(by_ticker, vec!["GLD", "KO", "MSFT", "NVDA", "SPY"]);
    }

    #[test]
    fn sort_key_accepts_short_aliases() {
        let key: SortKey = serde_json::from_str("\"fiveYear\"").expect("alias parses");
        assert_eq!(key, SortKey::TrailingCagr);
        let key: SortKey = serde_json::from_str("\"inceptionCagr\"").expect("name parses");
        assert_eq!(key, SortKey::InceptionCagr);
    }
}
