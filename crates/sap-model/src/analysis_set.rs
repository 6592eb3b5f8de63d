//! Analysis population definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What an analysis set is used for in the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisSetUse {
    PrimaryEfficacy,
    SupportiveEfficacy,
    PerProtocol,
    Safety,
    Pharmacokinetic,
}

impl AnalysisSetUse {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisSetUse::PrimaryEfficacy => "primary_efficacy",
            AnalysisSetUse::SupportiveEfficacy => "supportive_efficacy",
            AnalysisSetUse::PerProtocol => "per_protocol",
            AnalysisSetUse::Safety => "safety",
            AnalysisSetUse::Pharmacokinetic => "pharmacokinetic",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AnalysisSetUse::PrimaryEfficacy => "Primary efficacy analyses",
            AnalysisSetUse::SupportiveEfficacy => "Supportive efficacy analyses",
            AnalysisSetUse::PerProtocol => "Per-protocol sensitivity analyses",
            AnalysisSetUse::Safety => "Safety analyses",
            AnalysisSetUse::Pharmacokinetic => "Pharmacokinetic analyses",
        }
    }
}

impl fmt::Display for AnalysisSetUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named analysis population with its membership rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSet {
    pub name: String,
    pub abbreviation: String,
    pub description: String,
    pub inclusion_criteria: Vec<String>,
    pub exclusion_criteria: Vec<String>,
    pub primary_use: AnalysisSetUse,
    pub regulatory_note: String,
}

impl AnalysisSet {
    pub fn is_primary_efficacy(&self) -> bool {
        self.primary_use == AnalysisSetUse::PrimaryEfficacy
    }

    pub fn is_safety(&self) -> bool {
        self.primary_use == AnalysisSetUse::Safety
    }
}
