use sap_map::map_multiple_endpoints;
use sap_model::{DataType, Endpoint, EndpointType, Hypothesis, Sidedness, StudyDesign};
use sap_populations::generate;
use sap_report::{
    MULTIPLICITY_HEADING, NO_INTERIM_ANALYSES, PlanContent, assemble_plan, methodology_section,
    render_sections,
};

fn endpoints() -> Vec<Endpoint> {
    vec![
        Endpoint::new("ACR20", EndpointType::Secondary, DataType::Binary)
            .with_hypothesis(Hypothesis::Superiority)
            .with_sided(Sidedness::TwoSided),
        Endpoint::new("DAS28 change", EndpointType::Primary, DataType::Continuous)
            .with_covariates(["baseline_DAS28"])
            .with_hypothesis(Hypothesis::Superiority)
            .with_sided(Sidedness::TwoSided),
        Endpoint::new("Biomarker", EndpointType::Exploratory, DataType::Count)
            .with_hypothesis(Hypothesis::Superiority),
    ]
}

#[test]
fn sections_follow_fixed_outline() {
    let results = map_multiple_endpoints(&endpoints());
    let sets = generate(StudyDesign::ParallelGroup, false, false, Some(DataType::Continuous));
    let sections = assemble_plan(&PlanContent {
        analysis_sets: &sets,
        results: &results,
        missing_data: None,
        interim: None,
        subgroups: &[],
    });
    let headings: Vec<&str> = sections.iter().map(|s| s.heading.as_str()).collect();
    assert_eq!(
        headings,
        vec![
            "Analysis Populations",
            "Statistical Methodology",
            "Missing Data Handling",
            "Interim Analysis",
            "Subgroup Analyses",
        ]
    );

    let markdown = render_sections(&sections);
    assert!(markdown.contains("### Full Analysis Set (FAS)"));
    assert!(markdown.contains(NO_INTERIM_ANALYSES));
}

#[test]
fn methodology_orders_primary_first_and_adds_multiplicity() {
    let results = map_multiple_endpoints(&endpoints());
    let section = methodology_section(&results);
    let headings: Vec<&str> = section
        .subsections
        .iter()
        .map(|s| s.heading.as_str())
        .collect();
    assert_eq!(
        headings,
        vec![
            "DAS28 change (Primary endpoint)",
            "ACR20 (Secondary endpoint)",
            "Biomarker (Exploratory endpoint)",
            MULTIPLICITY_HEADING,
        ]
    );
    let multiplicity = section.subsection(MULTIPLICITY_HEADING).unwrap();
    assert_eq!(multiplicity.blocks.len(), 2);
}

#[test]
fn single_primary_endpoint_needs_no_multiplicity_subsection() {
    let results = map_multiple_endpoints(&endpoints()[1..2]);
    let section = methodology_section(&results);
    assert!(section.subsection(MULTIPLICITY_HEADING).is_none());
    let rendered = section.render();
    assert!(rendered.contains("**Analysis method**: Analysis of covariance (ANCOVA) adjusted for baseline_DAS28"));
    assert!(rendered.contains("**Covariates**: baseline_DAS28"));
}
