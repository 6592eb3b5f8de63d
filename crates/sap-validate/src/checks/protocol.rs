//! Endpoint hierarchy and planned analyses in the protocol.

use std::collections::BTreeMap;

use tracing::debug;

use sap_model::{Endpoint, InterimAnalysisPlan, Issue, SubgroupAnalysis, ValidationResult};

/// Checks the endpoint hierarchy and flags planned interim and subgroup
/// analyses for review.
///
/// Exactly one primary endpoint is expected: none is an error, several is
/// a multiplicity warning. Endpoint names must be unique.
pub fn check_protocol_consistency(
    endpoints: &[Endpoint],
    interim: Option<&InterimAnalysisPlan>,
    subgroups: &[SubgroupAnalysis],
) -> ValidationResult {
    let mut result = ValidationResult::new();

    let primaries: Vec<String> = endpoints
        .iter()
        .filter(|e| e.is_primary())
        .map(|e| e.name.clone())
        .collect();
    match primaries.len() {
        0 => result.push(Issue::NoPrimaryEndpoint),
        1 => {}
        count => result.push(Issue::MultiplePrimaryEndpoints {
            count,
            names: primaries,
        }),
    }

    let mut occurrences: BTreeMap<&str, usize> = BTreeMap::new();
    for endpoint in endpoints {
        *occurrences.entry(endpoint.name.as_str()).or_default() += 1;
    }
    for (name, _) in occurrences.into_iter().filter(|(_, count)| *count > 1) {
        result.push(Issue::DuplicateEndpointName {
            name: name.to_string(),
        });
    }

    if let Some(plan) = interim
        && plan.analysis_count() > 0
    {
        result.push(Issue::InterimAnalysisPlanned {
            analyses: plan.analysis_count(),
        });
    }
    if !subgroups.is_empty() {
        result.push(Issue::SubgroupAnalysesPlanned {
            count: subgroups.len(),
        });
    }

    debug!(
        endpoints = endpoints.len(),
        errors = result.error_count(),
        warnings = result.warning_count(),
        "checked protocol consistency"
    );
    result
}
