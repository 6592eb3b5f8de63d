//! Trial-design input and the narrative inputs of the analysis plan.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::endpoint::Endpoint;
use crate::enums::{DataType, StudyDesign};
use crate::policy::PlanningPolicy;
use crate::sample_size::SampleSizeResult;

/// Primary method for handling missing outcome data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingDataApproach {
    MultipleImputation,
    LikelihoodBased,
    NonResponderImputation,
    ReferenceBasedImputation,
    Censoring,
    CompleteCase,
}

impl MissingDataApproach {
    pub fn label(&self) -> &'static str {
        match self {
            MissingDataApproach::MultipleImputation => "Multiple imputation",
            MissingDataApproach::LikelihoodBased => "Direct likelihood (mixed model)",
            MissingDataApproach::NonResponderImputation => "Non-responder imputation",
            MissingDataApproach::ReferenceBasedImputation => {
                "Reference-based (jump-to-reference) imputation"
            }
            MissingDataApproach::Censoring => "Censoring at last known assessment",
            MissingDataApproach::CompleteCase => "Complete-case analysis",
        }
    }

    /// One-sentence description of how the approach treats missing values.
    pub fn description(&self) -> &'static str {
        match self {
            MissingDataApproach::MultipleImputation => {
                "Missing values will be imputed multiple times from a model including treatment and baseline covariates, and the results will be combined using Rubin's rules."
            }
            MissingDataApproach::LikelihoodBased => {
                "All available observations will be used in a likelihood-based model without explicit imputation."
            }
            MissingDataApproach::NonResponderImputation => {
                "Subjects with a missing response assessment will be counted as non-responders."
            }
            MissingDataApproach::ReferenceBasedImputation => {
                "Missing values after discontinuation will be imputed using the distribution observed in the reference arm."
            }
            MissingDataApproach::Censoring => {
                "Subjects without the event will be censored at the date of their last adequate assessment."
            }
            MissingDataApproach::CompleteCase => {
                "Only subjects with an observed outcome will be analysed."
            }
        }
    }
}

impl fmt::Display for MissingDataApproach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Assumed missingness mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingnessAssumption {
    Mcar,
    Mar,
    Mnar,
}

impl MissingnessAssumption {
    pub fn label(&self) -> &'static str {
        match self {
            MissingnessAssumption::Mcar => "Missing completely at random (MCAR)",
            MissingnessAssumption::Mar => "Missing at random (MAR)",
            MissingnessAssumption::Mnar => "Missing not at random (MNAR)",
        }
    }
}

/// Missing-data strategy for the primary analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingDataStrategy {
    pub primary_approach: MissingDataApproach,
    pub missingness_assumption: MissingnessAssumption,
    #[serde(default)]
    pub sensitivity_analyses: Vec<String>,
}

/// Alpha-spending function for group-sequential boundaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpendingFunction {
    #[default]
    OBrienFleming,
    Pocock,
    HwangShihDecani,
    HaybittlePeto,
}

impl SpendingFunction {
    pub fn label(&self) -> &'static str {
        match self {
            SpendingFunction::OBrienFleming => "Lan-DeMets O'Brien-Fleming-type",
            SpendingFunction::Pocock => "Lan-DeMets Pocock-type",
            SpendingFunction::HwangShihDecani => "Hwang-Shih-DeCani",
            SpendingFunction::HaybittlePeto => "Haybittle-Peto",
        }
    }
}

/// What an interim analysis may stop the trial for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterimStopping {
    Efficacy,
    Futility,
    #[default]
    EfficacyAndFutility,
}

impl InterimStopping {
    pub fn label(&self) -> &'static str {
        match self {
            InterimStopping::Efficacy => "efficacy",
            InterimStopping::Futility => "futility",
            InterimStopping::EfficacyAndFutility => "efficacy or futility",
        }
    }
}

/// Planned interim analyses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterimAnalysisPlan {
    /// Fraction of total information at each interim look, in order.
    pub information_fractions: Vec<f64>,
    #[serde(default)]
    pub spending_function: SpendingFunction,
    #[serde(default)]
    pub stop_for: InterimStopping,
    #[serde(default)]
    pub data_monitoring_committee: bool,
}

impl InterimAnalysisPlan {
    pub fn analysis_count(&self) -> usize {
        self.information_fractions.len()
    }
}

/// A planned subgroup analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubgroupAnalysis {
    pub name: String,
    #[serde(default)]
    pub variable: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub rationale: Option<String>,
}

/// Everything one planning invocation consumes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrialDesign {
    pub study_id: Option<String>,
    pub title: Option<String>,
    pub study_design: StudyDesign,
    pub has_run_in: bool,
    pub has_safety_follow_up: bool,
    /// Overrides the data type taken from the first primary endpoint.
    pub primary_endpoint_type: Option<DataType>,
    pub endpoints: Vec<Endpoint>,
    pub sample_size: Option<SampleSizeResult>,
    pub missing_data: Option<MissingDataStrategy>,
    pub interim_analysis: Option<InterimAnalysisPlan>,
    pub subgroups: Vec<SubgroupAnalysis>,
    pub policy: Option<PlanningPolicy>,
}

impl TrialDesign {
    pub fn primary_endpoints(&self) -> impl Iterator<Item = &Endpoint> {
        self.endpoints.iter().filter(|e| e.is_primary())
    }

    /// Explicit primary endpoint type, else that of the first primary endpoint.
    pub fn resolved_primary_endpoint_type(&self) -> Option<DataType> {
        self.primary_endpoint_type
            .or_else(|| self.primary_endpoints().next().map(|e| e.data_type))
    }
}
