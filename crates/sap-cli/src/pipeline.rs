//! End-to-end planning pipeline for one trial design.
//!
//! Stages run in a single pass: map endpoints, generate analysis sets, run
//! the consistency checks, assemble the plan sections. Nothing feeds back.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::{info, info_span};

use sap_map::{MappingEngine, aggregate_validation};
use sap_model::{
    AnalysisSet, MappingResult, PlanningPolicy, StatisticalMethod, TrialDesign, ValidationResult,
};
use sap_populations::{generate, validate_analysis_sets};
use sap_report::{PlanContent, Section, assemble_plan, render_sections};
use sap_validate::{
    SapSnapshot, check_protocol_consistency, check_sample_size_consistency,
    check_sap_consistency,
};

/// Everything derived from one trial design.
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    pub study_id: String,
    pub title: Option<String>,
    pub policy: PlanningPolicy,
    pub results: Vec<MappingResult>,
    pub analysis_sets: Vec<AnalysisSet>,
    /// All findings: mapping, analysis sets, sample size, plan, protocol.
    pub validation: ValidationResult,
    pub sections: Vec<Section>,
}

impl PlanOutcome {
    pub fn has_errors(&self) -> bool {
        !self.validation.is_valid()
    }

    /// The assembled plan as a markdown document.
    pub fn render_document(&self, generated_at: DateTime<Utc>) -> String {
        let title = self.title.as_deref().unwrap_or(&self.study_id);
        let mut out = format!("# Statistical Analysis Plan: {title}\n\n");
        out.push_str(&format!("**Study**: {}\n\n", self.study_id));
        out.push_str(&format!(
            "**Generated**: {}\n\n",
            generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        out.push_str(&render_sections(&self.sections));
        out
    }
}

/// Reads a trial design from a JSON file.
///
/// # Errors
///
/// Fails if the file cannot be read or an endpoint is structurally
/// incomplete (missing `name` or `dataType`).
pub fn load_design(path: &Path) -> Result<TrialDesign> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read trial design {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse trial design {}", path.display()))
}

/// Runs every planning stage for the design under `policy`.
pub fn plan_trial(design: &TrialDesign, policy: PlanningPolicy) -> PlanOutcome {
    let study_id = design
        .study_id
        .clone()
        .unwrap_or_else(|| "UNNAMED".to_string());
    let span = info_span!("plan", study_id = %study_id);
    let _guard = span.enter();

    let results = MappingEngine::new(policy).map_multiple_endpoints(&design.endpoints);
    let analysis_sets = generate(
        design.study_design,
        design.has_run_in,
        design.has_safety_follow_up,
        design.resolved_primary_endpoint_type(),
    );
    let methods: Vec<StatisticalMethod> = results
        .iter()
        .map(|result| result.statistical_method.clone())
        .collect();

    let mut validation = aggregate_validation(&results);
    validation.merge(validate_analysis_sets(&analysis_sets));
    if let Some(sample_size) = &design.sample_size {
        validation.merge(check_sample_size_consistency(
            sample_size,
            &design.endpoints,
            &policy,
        ));
    }
    validation.merge(check_sap_consistency(&SapSnapshot {
        endpoints: &design.endpoints,
        methods: &methods,
        analysis_sets: &analysis_sets,
        missing_data: design.missing_data.as_ref(),
    }));
    validation.merge(check_protocol_consistency(
        &design.endpoints,
        design.interim_analysis.as_ref(),
        &design.subgroups,
    ));
    info!(
        errors = validation.error_count(),
        warnings = validation.warning_count(),
        "consistency checks complete"
    );

    let sections = assemble_plan(&PlanContent {
        analysis_sets: &analysis_sets,
        results: &results,
        missing_data: design.missing_data.as_ref(),
        interim: design.interim_analysis.as_ref(),
        subgroups: &design.subgroups,
    });
    info!(sections = sections.len(), "assembled plan sections");

    PlanOutcome {
        study_id,
        title: design.title.clone(),
        policy,
        results,
        analysis_sets,
        validation,
        sections,
    }
}
