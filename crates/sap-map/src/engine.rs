//! Mapping engine: classification, test selection and per-endpoint checks.

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use sap_model::{
    Classification, DataType, Endpoint, Hypothesis, Issue, MappingResult, PlanningPolicy,
    Sidedness, StatisticalMethod, TestSelection, ValidationResult,
};

use crate::classifier::classify_with;
use crate::selector::select_with;

/// Maps endpoints to statistical methods under one planning policy.
///
/// The engine holds no state besides the policy, so a single instance can
/// map any number of endpoints and results never depend on call order.
#[derive(Debug, Clone, Copy, Default)]
pub struct MappingEngine {
    policy: PlanningPolicy,
}

impl MappingEngine {
    pub fn new(policy: PlanningPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &PlanningPolicy {
        &self.policy
    }

    /// Classifies one endpoint, selects its test and validates the pairing.
    pub fn map_endpoint_to_test(&self, endpoint: &Endpoint) -> MappingResult {
        let classification = classify_with(endpoint, &self.policy);
        let selection = select_with(
            &classification,
            endpoint.effective_hypothesis(),
            endpoint.effective_sided(),
            &self.policy,
        );
        debug!(
            endpoint = %endpoint.name,
            data_type = %endpoint.data_type,
            cardinality = classification.comparison_cardinality.as_str(),
            rule = %selection.rule_id,
            test = %selection.primary_test,
            "selected statistical test"
        );

        let validation = validate_mapping(endpoint, &classification, &selection);
        for issue in validation.issues() {
            warn!(endpoint = %endpoint.name, code = issue.code(), "{}", issue.message());
        }

        let statistical_method = build_method(endpoint, &selection);
        MappingResult {
            endpoint: endpoint.clone(),
            classification,
            selection,
            statistical_method,
            validation,
        }
    }

    /// Maps each endpoint independently, preserving input order.
    pub fn map_multiple_endpoints(&self, endpoints: &[Endpoint]) -> Vec<MappingResult> {
        let results: Vec<MappingResult> = endpoints
            .iter()
            .map(|endpoint| self.map_endpoint_to_test(endpoint))
            .collect();
        info!(
            endpoints = results.len(),
            errors = results.iter().map(|r| r.validation.error_count()).sum::<usize>(),
            "mapped endpoints to statistical methods"
        );
        results
    }
}

/// Maps one endpoint with the default planning policy.
pub fn map_endpoint_to_test(endpoint: &Endpoint) -> MappingResult {
    MappingEngine::default().map_endpoint_to_test(endpoint)
}

/// Maps several endpoints with the default planning policy.
pub fn map_multiple_endpoints(endpoints: &[Endpoint]) -> Vec<MappingResult> {
    MappingEngine::default().map_multiple_endpoints(endpoints)
}

/// Merges the per-endpoint validations into one result.
pub fn aggregate_validation(results: &[MappingResult]) -> ValidationResult {
    results
        .iter()
        .fold(ValidationResult::new(), |acc, result| {
            acc.merged(result.validation.clone())
        })
}

fn validate_mapping(
    endpoint: &Endpoint,
    classification: &Classification,
    selection: &TestSelection,
) -> ValidationResult {
    let mut result = ValidationResult::new();
    let name = || endpoint.name.clone();
    let test = selection.primary_test;

    if endpoint.hypothesis.is_none() {
        result.push(Issue::MissingHypothesis { endpoint: name() });
    }
    if endpoint.sided.is_none() {
        result.push(Issue::SidednessAssumed { endpoint: name() });
    }
    if let Some(value) = &endpoint.unrecognized_type {
        result.push(Issue::EndpointTypeAssumed {
            endpoint: name(),
            value: value.clone(),
        });
    }
    if !test.applicable_to(classification.data_type) {
        result.push(Issue::TestNotApplicable {
            endpoint: name(),
            test,
            data_type: classification.data_type,
        });
    }
    if classification.has_covariates && !test.adjusts_for_covariates() {
        result.push(Issue::CovariatesNotAdjusted {
            endpoint: name(),
            test,
        });
    }
    if classification.requires_stratified_analysis && !test.supports_stratification() {
        result.push(Issue::StratificationNotApplied {
            endpoint: name(),
            test,
        });
    }
    if endpoint.paired && endpoint.data_type == DataType::TimeToEvent {
        result.push(Issue::PairedDesignIgnored {
            endpoint: name(),
            data_type: endpoint.data_type,
        });
    }
    if endpoint.effective_hypothesis() == Hypothesis::Equivalence
        && endpoint.sided == Some(Sidedness::OneSided)
    {
        result.push(Issue::EquivalenceOneSided { endpoint: name() });
    }
    result
}

fn build_method(endpoint: &Endpoint, selection: &TestSelection) -> StatisticalMethod {
    let test = selection.primary_test;
    let covariates = included(&endpoint.covariates, test.adjusts_for_covariates());
    let strata = included(
        &endpoint.stratification_factors,
        test.supports_stratification(),
    );

    let mut qualifiers = Vec::new();
    if let Some(covariates) = &covariates {
        qualifiers.push(format!("adjusted for {}", join(covariates)));
    }
    if let Some(strata) = &strata {
        qualifiers.push(format!("stratified by {}", join(strata)));
    }

    let mut description = selection.analysis_label.clone();
    if !qualifiers.is_empty() {
        description.push(' ');
        description.push_str(&qualifiers.join(", "));
    }
    description.push_str(&format!(
        "; {} {} comparison",
        endpoint.effective_sided().label(),
        endpoint.effective_hypothesis().label()
    ));

    StatisticalMethod {
        test,
        description,
        assumptions: selection.assumptions.clone(),
        covariates,
        stratification_factors: strata,
    }
}

fn included(values: &BTreeSet<String>, used: bool) -> Option<BTreeSet<String>> {
    (used && !values.is_empty()).then(|| values.clone())
}

fn join(values: &BTreeSet<String>) -> String {
    values.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}
