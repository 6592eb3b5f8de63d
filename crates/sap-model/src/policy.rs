//! Planning policy: the thresholds and choices the engine leaves configurable.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::enums::normalize_token;

/// Analysis of a stratified time-to-event endpoint without covariates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum StratifiedEventPolicy {
    /// Log-rank test stratified by the factors (CMH-type combination of strata).
    #[default]
    LogRankCmh,
    /// Cochran-Mantel-Haenszel test on event status within strata.
    PureCmh,
}

impl StratifiedEventPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            StratifiedEventPolicy::LogRankCmh => "log_rank_cmh",
            StratifiedEventPolicy::PureCmh => "pure_cmh",
        }
    }
}

impl fmt::Display for StratifiedEventPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StratifiedEventPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "log_rank_cmh" | "stratified_log_rank" => Ok(StratifiedEventPolicy::LogRankCmh),
            "pure_cmh" | "cmh" => Ok(StratifiedEventPolicy::PureCmh),
            _ => Err(format!("Unknown stratified event policy: {s}")),
        }
    }
}

impl TryFrom<String> for StratifiedEventPolicy {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Thresholds and policy choices for one planning invocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanningPolicy {
    /// Binary endpoints whose smallest expected cell count is below this use
    /// Fisher's exact test (default: 5.0).
    pub min_expected_cell_count: f64,
    /// Continuous endpoints with fewer expected subjects per arm are treated
    /// as nonparametric (default: 30).
    pub small_sample_per_arm: u32,
    /// Power below this raises a warning (default: 0.80).
    pub min_power: f64,
    pub stratified_event_policy: StratifiedEventPolicy,
}

impl Default for PlanningPolicy {
    fn default() -> Self {
        Self {
            min_expected_cell_count: 5.0,
            small_sample_per_arm: 30,
            min_power: 0.80,
            stratified_event_policy: StratifiedEventPolicy::default(),
        }
    }
}

impl PlanningPolicy {
    /// Stricter thresholds for confirmatory programmes.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            small_sample_per_arm: 50,
            min_power: 0.90,
            ..Self::default()
        }
    }
}
