//! Endpoint classifier.
//!
//! `classify` is pure and total: every endpoint receives a classification,
//! and ambiguous inputs resolve to the most conservative one.

use sap_model::{
    Classification, ComparisonCardinality, DataType, DistributionAssumption, Endpoint,
    PlanningPolicy,
};

use crate::hints;

/// Classifies an endpoint using the default planning policy.
pub fn classify(endpoint: &Endpoint) -> Classification {
    classify_with(endpoint, &PlanningPolicy::default())
}

/// Classifies an endpoint under an explicit planning policy.
pub fn classify_with(endpoint: &Endpoint, policy: &PlanningPolicy) -> Classification {
    let has_covariates = !endpoint.covariates.is_empty();
    Classification {
        data_type: endpoint.data_type,
        comparison_cardinality: comparison_cardinality(endpoint),
        distribution_assumption: distribution_assumption(endpoint, policy),
        requires_stratified_analysis: !endpoint.stratification_factors.is_empty(),
        requires_covariate_adjustment: has_covariates
            && matches!(
                endpoint.data_type,
                DataType::Continuous | DataType::TimeToEvent
            ),
        has_covariates,
        repeated_measures: endpoint.repeated_measures
            || hints::mentions_repeated_measures(&endpoint.description),
        sparse_cells: endpoint.data_type == DataType::Binary
            && expected_min_cell_count(endpoint)
                .is_some_and(|count| count < policy.min_expected_cell_count),
        overdispersed: endpoint.overdispersed
            || hints::mentions_overdispersion(&endpoint.description),
    }
}

/// Paired designs are single-group regardless of data type; otherwise more
/// than two arms (stated or implied) makes a multi-group comparison.
fn comparison_cardinality(endpoint: &Endpoint) -> ComparisonCardinality {
    if endpoint.paired {
        return ComparisonCardinality::SingleGroupPaired;
    }
    let arms = endpoint
        .arms
        .or_else(|| hints::implied_arm_count(&endpoint.description));
    match arms {
        Some(count) if count > 2 => ComparisonCardinality::MultiGroup,
        _ => ComparisonCardinality::TwoGroup,
    }
}

fn distribution_assumption(endpoint: &Endpoint, policy: &PlanningPolicy) -> DistributionAssumption {
    match endpoint.data_type {
        DataType::Continuous => {
            let small_sample = endpoint
                .expected_n_per_arm
                .is_some_and(|n| n < policy.small_sample_per_arm);
            if endpoint.non_normal
                || small_sample
                || hints::mentions_non_normality(&endpoint.description)
            {
                DistributionAssumption::Nonparametric
            } else {
                DistributionAssumption::Parametric
            }
        }
        DataType::Ordinal => DistributionAssumption::Nonparametric,
        // Survival methods are rank-based; binary and count endpoints are
        // handled by exact, contingency-table or GLM methods.
        DataType::TimeToEvent | DataType::Binary | DataType::Count => {
            DistributionAssumption::Unspecified
        }
    }
}

/// Smallest expected cell of a 2x2 table: `n * min(p, 1 - p)` per arm.
fn expected_min_cell_count(endpoint: &Endpoint) -> Option<f64> {
    let n = endpoint.expected_n_per_arm?;
    let rate = endpoint
        .expected_response_rate
        .filter(|p| (0.0..=1.0).contains(p))?;
    Some(f64::from(n) * rate.min(1.0 - rate))
}
