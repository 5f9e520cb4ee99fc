mod engine;
mod query;
mod reference;
mod types;

pub use engine::{
    PROJECTION_HORIZONS, adjust_scenarios, cagr, finalize_scenarios, project_asset,
    project_price, project_scenarios, project_universe, years_between,
};
pub use query::{
    ConfidenceTally, ProjectionQuery, SortKey, UniverseSummary, query_projections, summarize,
};
pub use reference::{ASSETS, benchmark, find_asset};
pub use types::{
    AssetClass, AssetProjection, AssetReference, Confidence, Fundamentals, PriceTargets, Quote,
    RawScenarios, ScenarioSet,
};
