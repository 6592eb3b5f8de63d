//! Endpoint classification.

use serde::{Deserialize, Serialize};

use crate::enums::{ComparisonCardinality, DataType, DistributionAssumption};

/// Structured view of an endpoint that the test selector evaluates.
///
/// Derived from an [`crate::Endpoint`] on every call and never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub data_type: DataType,
    pub comparison_cardinality: ComparisonCardinality,
    pub distribution_assumption: DistributionAssumption,
    pub requires_stratified_analysis: bool,
    /// Forced adjustment; only set for continuous and time-to-event endpoints.
    pub requires_covariate_adjustment: bool,
    /// Any covariates declared, regardless of data type.
    pub has_covariates: bool,
    pub repeated_measures: bool,
    /// Smallest expected cell count falls below the policy threshold.
    pub sparse_cells: bool,
    pub overdispersed: bool,
}

impl Classification {
    pub fn is_paired(&self) -> bool {
        self.comparison_cardinality == ComparisonCardinality::SingleGroupPaired
    }

    pub fn is_two_group(&self) -> bool {
        self.comparison_cardinality == ComparisonCardinality::TwoGroup
    }

    pub fn is_multi_group(&self) -> bool {
        self.comparison_cardinality == ComparisonCardinality::MultiGroup
    }

    pub fn is_parametric(&self) -> bool {
        self.distribution_assumption == DistributionAssumption::Parametric
    }

    pub fn is_nonparametric(&self) -> bool {
        self.distribution_assumption == DistributionAssumption::Nonparametric
    }
}
