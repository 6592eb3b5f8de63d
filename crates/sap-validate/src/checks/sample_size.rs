//! Sample-size calculation against the primary endpoint(s).

use tracing::debug;

use sap_model::{
    Endpoint, Issue, PlanningPolicy, SampleSizeMethod, SampleSizeResult, ValidationResult,
};

use crate::compatibility::is_compatible;

/// Checks the sample-size calculation against the primary endpoints.
///
/// An incompatible method or an out-of-range alpha/power blocks sign-off;
/// low power and arithmetic inconsistencies are advisory.
pub fn check_sample_size_consistency(
    sample_size: &SampleSizeResult,
    endpoints: &[Endpoint],
    policy: &PlanningPolicy,
) -> ValidationResult {
    let mut result = ValidationResult::new();

    check_probability(&mut result, "alpha", sample_size.alpha);
    let power_ok = check_probability(&mut result, "power", sample_size.power);
    if power_ok && sample_size.power < policy.min_power {
        result.push(Issue::LowPower {
            power: sample_size.power,
            threshold: policy.min_power,
        });
    }

    if let Some(per_arm) = sample_size.per_arm
        && per_arm > sample_size.total_sample_size
    {
        result.push(Issue::SampleSizeArithmetic {
            per_arm,
            total: sample_size.total_sample_size,
        });
    }

    let primaries: Vec<&Endpoint> = endpoints.iter().filter(|e| e.is_primary()).collect();
    if sample_size.method == SampleSizeMethod::Unknown {
        result.push(Issue::UnknownSampleSizeMethod);
    } else if primaries.is_empty() {
        result.push(Issue::SampleSizeUnanchored);
    } else {
        for endpoint in primaries {
            if !is_compatible(sample_size.method, endpoint.data_type) {
                result.push(Issue::MethodEndpointMismatch {
                    endpoint: endpoint.name.clone(),
                    method: sample_size.method,
                    data_type: endpoint.data_type,
                });
            }
        }
    }

    debug!(
        method = %sample_size.method,
        errors = result.error_count(),
        warnings = result.warning_count(),
        "checked sample size consistency"
    );
    result
}

/// Pushes an error unless `value` lies strictly between 0 and 1.
fn check_probability(result: &mut ValidationResult, parameter: &str, value: f64) -> bool {
    let valid = value > 0.0 && value < 1.0;
    if !valid {
        result.push(Issue::InvalidSampleSizeParameter {
            parameter: parameter.to_string(),
            value,
        });
    }
    valid
}
