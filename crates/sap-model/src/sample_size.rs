//! Sample-size calculation results supplied by the design team.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Method the sample size was calculated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleSizeMethod {
    TwoSampleTTest,
    PairedTTest,
    Ancova,
    WilcoxonRankSum,
    TwoProportionTest,
    FisherExactTest,
    McnemarTest,
    LogRankTest,
    PoissonRegression,
    NegativeBinomial,
    ProportionalOdds,
    /// Any method text the engine does not recognize.
    #[serde(other)]
    Unknown,
}

impl SampleSizeMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SampleSizeMethod::TwoSampleTTest => "two_sample_t_test",
            SampleSizeMethod::PairedTTest => "paired_t_test",
            SampleSizeMethod::Ancova => "ancova",
            SampleSizeMethod::WilcoxonRankSum => "wilcoxon_rank_sum",
            SampleSizeMethod::TwoProportionTest => "two_proportion_test",
            SampleSizeMethod::FisherExactTest => "fisher_exact_test",
            SampleSizeMethod::McnemarTest => "mcnemar_test",
            SampleSizeMethod::LogRankTest => "log_rank_test",
            SampleSizeMethod::PoissonRegression => "poisson_regression",
            SampleSizeMethod::NegativeBinomial => "negative_binomial",
            SampleSizeMethod::ProportionalOdds => "proportional_odds",
            SampleSizeMethod::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SampleSizeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of the sample-size calculation. Consumed, never produced, by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleSizeResult {
    pub method: SampleSizeMethod,
    pub power: f64,
    pub alpha: f64,
    pub total_sample_size: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_arm: Option<u32>,
}
