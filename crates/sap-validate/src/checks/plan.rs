//! Completeness of the statistical analysis plan.

use tracing::debug;

use sap_model::{
    AnalysisSet, Endpoint, Issue, MissingDataStrategy, StatisticalMethod, ValidationResult,
};

/// The parts of an analysis plan the completeness check looks at.
#[derive(Debug, Clone, Copy)]
pub struct SapSnapshot<'a> {
    pub endpoints: &'a [Endpoint],
    pub methods: &'a [StatisticalMethod],
    pub analysis_sets: &'a [AnalysisSet],
    pub missing_data: Option<&'a MissingDataStrategy>,
}

/// Checks that populations and methods exist, one method per endpoint,
/// and a missing-data strategy is documented.
pub fn check_sap_consistency(snapshot: &SapSnapshot<'_>) -> ValidationResult {
    let mut result = ValidationResult::new();

    if snapshot.analysis_sets.is_empty() {
        result.push(Issue::NoAnalysisSets);
    }
    if snapshot.methods.is_empty() {
        result.push(Issue::NoStatisticalMethods);
    } else if snapshot.methods.len() != snapshot.endpoints.len() {
        result.push(Issue::MethodCountMismatch {
            endpoints: snapshot.endpoints.len(),
            methods: snapshot.methods.len(),
        });
    }
    if snapshot.missing_data.is_none() {
        result.push(Issue::NoMissingDataStrategy);
    }

    debug!(
        errors = result.error_count(),
        warnings = result.warning_count(),
        "checked plan completeness"
    );
    result
}
