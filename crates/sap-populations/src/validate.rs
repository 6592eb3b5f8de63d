//! Structural checks on a set of analysis populations.

use std::collections::BTreeSet;

use tracing::debug;

use sap_model::{AnalysisSet, Issue, ValidationResult};

use crate::generate::{FAS, MITT, SAF};

/// Checks that the populations form a usable hierarchy.
///
/// Requires an efficacy set (FAS or mITT) and a SAF, unique abbreviations,
/// exactly one set designated for primary efficacy, and at least one set
/// designated for safety.
pub fn validate_analysis_sets(sets: &[AnalysisSet]) -> ValidationResult {
    let mut result = ValidationResult::new();
    let has = |abbreviation: &str| {
        sets.iter()
            .any(|set| set.abbreviation.trim().eq_ignore_ascii_case(abbreviation))
    };

    if !has(FAS) && !has(MITT) {
        result.push(Issue::MissingEfficacySet);
    }
    if !has(SAF) {
        result.push(Issue::MissingSafetySet);
    }

    let mut seen = BTreeSet::new();
    let mut reported = BTreeSet::new();
    for set in sets {
        let key = set.abbreviation.trim().to_uppercase();
        if !seen.insert(key.clone()) && reported.insert(key) {
            result.push(Issue::DuplicateAnalysisSetAbbreviation {
                abbreviation: set.abbreviation.trim().to_string(),
            });
        }
    }

    let primary = sets.iter().filter(|set| set.is_primary_efficacy()).count();
    if primary != 1 {
        result.push(Issue::PrimaryEfficacySetCount { count: primary });
    }
    if !sets.iter().any(AnalysisSet::is_safety) {
        result.push(Issue::NoSafetyPopulation);
    }

    debug!(
        sets = sets.len(),
        errors = result.error_count(),
        "validated analysis sets"
    );
    result
}
