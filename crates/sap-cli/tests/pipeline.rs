use std::fs;
use std::path::PathBuf;

use chrono::{TimeZone, Utc};

use sap_cli::config::{PolicyOverrides, resolve_policy};
use sap_cli::pipeline::{load_design, plan_trial};
use sap_cli::summary::render_summary;
use sap_model::{
    DataType, Endpoint, EndpointType, Hypothesis, PlanningPolicy, Sidedness, StatisticalTest,
    TrialDesign,
};

fn demo_design_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos/design.json")
}

fn temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let stamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    dir.push(format!("sap_cli_{stamp}"));
    dir
}

#[test]
fn demo_design_plans_without_blocking_errors() {
    let design = load_design(&demo_design_path()).expect("load design");
    let policy = resolve_policy(design.policy, &PolicyOverrides::default()).expect("policy");
    let outcome = plan_trial(&design, policy);

    let tests: Vec<StatisticalTest> = outcome
        .results
        .iter()
        .map(|result| result.selection.primary_test)
        .collect();
    assert_eq!(
        tests,
        vec![
            StatisticalTest::Ancova,
            StatisticalTest::CochranMantelHaenszel,
            StatisticalTest::LogRank,
            StatisticalTest::Mmrm,
        ]
    );
    assert!(!outcome.has_errors());
    let codes: Vec<&str> = outcome.validation.issues().map(|issue| issue.code()).collect();
    insta::assert_debug_snapshot!(codes, @r#"
    [
        "SUBGROUP_ANALYSES_PLANNED",
    ]
    "#);

    let abbreviations: Vec<&str> = outcome
        .analysis_sets
        .iter()
        .map(|set| set.abbreviation.as_str())
        .collect();
    assert_eq!(abbreviations, vec!["FAS", "mITT", "PPS", "SAF", "PKS"]);
}

#[test]
fn low_power_stays_a_warning_after_every_check_merges() {
    let mut design = load_design(&demo_design_path()).expect("load design");
    let sample_size = design.sample_size.as_mut().expect("demo sample size");
    sample_size.power = 0.70;
    let outcome = plan_trial(&design, PlanningPolicy::default());

    assert!(outcome.validation.has_code("LOW_POWER"));
    assert!(outcome.validation.is_valid());
    assert!(!outcome.has_errors());
    assert_eq!(outcome.validation.error_count(), 0);

    let strict = resolve_policy(
        design.policy,
        &PolicyOverrides {
            strict: true,
            ..PolicyOverrides::default()
        },
    )
    .expect("policy");
    design.sample_size.as_mut().expect("demo sample size").power = 0.85;
    let outcome = plan_trial(&design, strict);
    assert!(outcome.validation.has_code("LOW_POWER"));
    assert!(!outcome.has_errors());
}

#[test]
fn rendered_document_carries_header_and_every_section() {
    let design = load_design(&demo_design_path()).expect("load design");
    let outcome = plan_trial(&design, PlanningPolicy::default());
    let generated_at = Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap();
    let document = outcome.render_document(generated_at);

    assert!(document.starts_with(
        "# Statistical Analysis Plan: A Randomized, Double-Blind, Placebo-Controlled Study of Glucose Control in Type 2 Diabetes\n\n**Study**: DM-301\n\n**Generated**: 2025-03-14 09:30:00 UTC\n\n## Analysis Populations\n"
    ));
    let headings: Vec<&str> = document
        .lines()
        .filter(|line| line.starts_with("## "))
        .collect();
    assert_eq!(
        headings,
        vec![
            "## Analysis Populations",
            "## Statistical Methodology",
            "## Missing Data Handling",
            "## Interim Analysis",
            "## Subgroup Analyses",
        ]
    );
    assert_eq!(document, outcome.render_document(generated_at));
}

#[test]
fn structurally_incomplete_endpoint_fails_to_load() {
    let dir = temp_dir();
    fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("design.json");
    fs::write(
        &path,
        r#"{"endpoints": [{"name": "Weight", "type": "primary"}]}"#,
    )
    .expect("write design");

    let error = load_design(&path).expect_err("missing dataType");
    assert!(format!("{error:#}").contains("parse trial design"));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_design_file_reports_path() {
    let path = temp_dir().join("absent.json");
    let error = load_design(&path).expect_err("no file");
    assert!(error.to_string().contains("absent.json"));
}

#[test]
fn empty_design_collects_blocking_errors() {
    let outcome = plan_trial(&TrialDesign::default(), PlanningPolicy::default());
    assert!(outcome.has_errors());
    assert!(outcome.validation.has_code("NO_PRIMARY_ENDPOINT"));
    assert!(outcome.validation.has_code("NO_STATISTICAL_METHODS"));
    assert!(outcome.validation.has_code("NO_MISSING_DATA_STRATEGY"));
    assert_eq!(outcome.study_id, "UNNAMED");
    // Populations still follow the default parallel-group design.
    assert!(!outcome.analysis_sets.is_empty());
}

#[test]
fn summary_lists_every_endpoint_and_issue() {
    let design = TrialDesign {
        study_id: Some("ONC-12".to_string()),
        endpoints: vec![
            Endpoint::new("Overall survival", EndpointType::Primary, DataType::TimeToEvent)
                .with_hypothesis(Hypothesis::Superiority)
                .with_sided(Sidedness::TwoSided),
            Endpoint::new("Objective response", EndpointType::Secondary, DataType::Binary),
        ],
        ..TrialDesign::default()
    };
    let outcome = plan_trial(&design, PlanningPolicy::default());
    let summary = render_summary(&outcome);

    assert!(summary.starts_with("Study: ONC-12\n"));
    assert!(summary.contains("Overall survival"));
    assert!(summary.contains("Objective response"));
    assert!(summary.contains("MISSING_HYPOTHESIS"));
    assert!(summary.contains("NO_MISSING_DATA_STRATEGY"));
    assert!(summary.ends_with("Analysis sets: FAS, PPS, SAF, PKS"));
}
