use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    Company,
    Commodity,
    Crypto,
    Index,
}

/// Static per-asset anchor used to derive the two baseline growth rates.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetReference {
    pub ticker: &'static str,
    pub name: &'static str,
    pub class: AssetClass,
    pub sector: &'static str,
    pub inception_date: NaiveDate,
    /// Split-adjusted price on `inception_date`.
    pub inception_price: f64,
    pub price_5y_ago: f64,
    pub benchmark: bool,
}

/// One capture of provider fundamentals. Every field is independently optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fundamentals {
    #[serde(rename = "trailingPE", alias = "trailingPe")]
    pub trailing_pe: Option<f64>,
    #[serde(rename = "forwardPE", alias = "forwardPe")]
    pub forward_pe: Option<f64>,
    #[serde(rename = "dividendYield")]
    pub dividend_yield: Option<f64>,
    #[serde(rename = "revenueGrowth")]
    pub revenue_growth: Option<f64>,
    #[serde(rename = "epsGrowth")]
    pub eps_growth: Option<f64>,
    #[serde(rename = "fiftyTwoWeekHigh")]
    pub fifty_two_week_high: Option<f64>,
    #[serde(rename = "fiftyTwoWeekLow")]
    pub fifty_two_week_low: Option<f64>,
}

impl Fundamentals {
    pub fn is_empty(&self) -> bool {
        [
            self.trailing_pe,
            self.forward_pe,
            self.dividend_yield,
            self.revenue_growth,
            self.eps_growth,
            self.fifty_two_week_high,
            self.fifty_two_week_low,
        ]
        .iter()
        .all(Option::is_none)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub price: f64,
    #[serde(flatten)]
    pub fundamentals: Fundamentals,
}

impl Quote {
    pub fn price_only(price: f64) -> Self {
        Self {
            price,
            fundamentals: Fundamentals::default(),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn from_factor_count(factor_count: u8) -> Self {
        match factor_count {
            6.. => Confidence::High,
            4..=5 => Confidence::Medium,
            _ => Confidence::Low,
        }
    }
}

/// Scenario CAGRs straight out of the adjustment rules: unrounded and
/// possibly out of order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawScenarios {
    pub conservative: f64,
    pub base: f64,
    pub optimistic: f64,
    pub factor_count: u8,
}

/// Finalised scenario CAGRs in percent. Always `conservative <= base <= optimistic`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioSet {
    pub conservative: f64,
    pub base: f64,
    pub optimistic: f64,
    pub factor_count: u8,
    pub confidence: Confidence,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceTargets {
    pub years: u32,
    pub conservative: f64,
    pub base: f64,
    pub optimistic: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetProjection {
    pub ticker: &'static str,
    pub name: &'static str,
    pub class: AssetClass,
    pub sector: &'static str,
    pub benchmark: bool,
    pub current_price: f64,
    pub cagr_since_inception: f64,
    pub cagr_trailing_5y: f64,
    pub scenarios: ScenarioSet,
    pub targets: Vec<PriceTargets>,
}

impl AssetProjection {
    pub fn target_for(&self, years: u32) -> Option<&PriceTargets> {
        self.targets.iter().find(|t| t.years == years)
    }
}
