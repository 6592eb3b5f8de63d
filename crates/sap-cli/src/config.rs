//! Planning policy resolution.
//!
//! Precedence, lowest to highest: built-in defaults, the `policy` object of
//! the trial design, then command-line flags.

use anyhow::{Result, bail};

use sap_model::{PlanningPolicy, StratifiedEventPolicy};

/// Policy settings given on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyOverrides {
    /// Apply the strict thresholds (higher power bar, larger small-sample cutoff).
    pub strict: bool,
    pub min_power: Option<f64>,
    pub min_expected_cell_count: Option<f64>,
    pub small_sample_per_arm: Option<u32>,
    pub stratified_event_policy: Option<StratifiedEventPolicy>,
}

/// Resolves the effective policy for one planning run.
///
/// # Errors
///
/// Returns an error if a threshold is out of range after resolution.
pub fn resolve_policy(
    from_design: Option<PlanningPolicy>,
    overrides: &PolicyOverrides,
) -> Result<PlanningPolicy> {
    let mut policy = from_design.unwrap_or_default();

    // Strict raises thresholds; it never relaxes a stricter design setting.
    if overrides.strict {
        let strict = PlanningPolicy::strict();
        policy.min_power = policy.min_power.max(strict.min_power);
        policy.small_sample_per_arm = policy.small_sample_per_arm.max(strict.small_sample_per_arm);
    }
    if let Some(value) = overrides.min_power {
        policy.min_power = value;
    }
    if let Some(value) = overrides.min_expected_cell_count {
        policy.min_expected_cell_count = value;
    }
    if let Some(value) = overrides.small_sample_per_arm {
        policy.small_sample_per_arm = value;
    }
    if let Some(value) = overrides.stratified_event_policy {
        policy.stratified_event_policy = value;
    }

    if !(policy.min_power > 0.0 && policy.min_power < 1.0) {
        bail!("min power must lie strictly between 0 and 1 (got {})", policy.min_power);
    }
    if policy.min_expected_cell_count.is_nan() || policy.min_expected_cell_count < 0.0 {
        bail!(
            "min expected cell count must be non-negative (got {})",
            policy.min_expected_cell_count
        );
    }
    Ok(policy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_design_or_flags() {
        let policy = resolve_policy(None, &PolicyOverrides::default()).unwrap();
        assert_eq!(policy, PlanningPolicy::default());
    }

    #[test]
    fn flags_override_design_policy() {
        let design = PlanningPolicy {
            min_power: 0.85,
            stratified_event_policy: StratifiedEventPolicy::PureCmh,
            ..PlanningPolicy::default()
        };
        let overrides = PolicyOverrides {
            min_power: Some(0.9),
            ..PolicyOverrides::default()
        };
        let policy = resolve_policy(Some(design), &overrides).unwrap();
        assert_eq!(policy.min_power, 0.9);
        assert_eq!(policy.stratified_event_policy, StratifiedEventPolicy::PureCmh);
    }

    #[test]
    fn strict_keeps_unrelated_design_settings() {
        let design = PlanningPolicy {
            min_expected_cell_count: 10.0,
            ..PlanningPolicy::default()
        };
        let overrides = PolicyOverrides {
            strict: true,
            ..PolicyOverrides::default()
        };
        let policy = resolve_policy(Some(design), &overrides).unwrap();
        assert_eq!(policy.min_power, PlanningPolicy::strict().min_power);
        assert_eq!(policy.min_expected_cell_count, 10.0);
    }

    #[test]
    fn strict_never_relaxes_a_stricter_design() {
        let design = PlanningPolicy {
            min_power: 0.95,
            small_sample_per_arm: 80,
            ..PlanningPolicy::default()
        };
        let overrides = PolicyOverrides {
            strict: true,
            ..PolicyOverrides::default()
        };
        let policy = resolve_policy(Some(design), &overrides).unwrap();
        assert_eq!(policy.min_power, 0.95);
        assert_eq!(policy.small_sample_per_arm, 80);

        let lenient = PlanningPolicy {
            min_power: 0.7,
            small_sample_per_arm: 10,
            ..PlanningPolicy::default()
        };
        let policy = resolve_policy(Some(lenient), &overrides).unwrap();
        assert_eq!(policy.min_power, 0.90);
        assert_eq!(policy.small_sample_per_arm, 50);
    }

    #[test]
    fn out_of_range_power_is_rejected() {
        let overrides = PolicyOverrides {
            min_power: Some(1.5),
            ..PolicyOverrides::default()
        };
        assert!(resolve_policy(None, &overrides).is_err());
    }
}
