//! End-to-end mapping tests and decision-table properties.

use proptest::prelude::*;
use sap_map::{MappingEngine, decision_table, map_endpoint_to_test, map_multiple_endpoints};
use sap_model::{
    ComparisonCardinality, DataType, DistributionAssumption, Endpoint, EndpointType, Hypothesis,
    PlanningPolicy, Sidedness, StatisticalTest, StratifiedEventPolicy,
};

#[test]
fn hba1c_change_maps_to_ancova() {
    let endpoint: Endpoint = serde_json::from_str(
        r#"{
            "name": "HbA1c change",
            "type": "primary",
            "dataType": "continuous",
            "covariates": ["baseline_HbA1c"],
            "hypothesis": "superiority",
            "sided": "two_sided"
        }"#,
    )
    .unwrap();

    let result = map_endpoint_to_test(&endpoint);
    assert_eq!(result.statistical_method.test, StatisticalTest::Ancova);
    assert!(result.selection.requires_covariates);
    assert_eq!(result.validation.error_count(), 0);
    assert!(result.validation.is_valid());
    assert_eq!(
        result.statistical_method.description,
        "Analysis of covariance (ANCOVA) adjusted for baseline_HbA1c; two-sided superiority comparison"
    );
}

#[test]
fn responder_rate_maps_to_cmh() {
    let endpoint: Endpoint = serde_json::from_str(
        r#"{
            "name": "Responder rate",
            "type": "primary",
            "dataType": "binary",
            "stratificationFactors": ["region"]
        }"#,
    )
    .unwrap();

    let result = map_endpoint_to_test(&endpoint);
    assert_eq!(
        result.statistical_method.test,
        StatisticalTest::CochranMantelHaenszel
    );
    assert!(result.selection.requires_stratification);
    assert_eq!(result.selection.rule_id, "binary_stratified");
}

#[test]
fn description_hints_reach_the_selector() {
    let dose_ranging = Endpoint::new("Weight loss", EndpointType::Primary, DataType::Continuous)
        .with_description("Percent weight change at week 52 across three arms");
    let result = map_endpoint_to_test(&dose_ranging);
    assert_eq!(
        result.classification.comparison_cardinality,
        ComparisonCardinality::MultiGroup
    );
    assert_eq!(result.statistical_method.test, StatisticalTest::Anova);

    let longitudinal = Endpoint::new("MADRS", EndpointType::Primary, DataType::Continuous)
        .with_description("MADRS total score change by visit through week 8")
        .with_covariates(["baseline_MADRS"]);
    assert_eq!(
        map_endpoint_to_test(&longitudinal).statistical_method.test,
        StatisticalTest::Mmrm
    );
}

#[test]
fn negated_description_hints_are_ignored() {
    let single = Endpoint::new("SBP", EndpointType::Primary, DataType::Continuous)
        .with_description("Single assessment at week 12; not a repeated measures endpoint, not skewed");
    let result = map_endpoint_to_test(&single);
    assert!(!result.classification.repeated_measures);
    assert_eq!(
        result.classification.distribution_assumption,
        DistributionAssumption::Parametric
    );
    assert_eq!(result.statistical_method.test, StatisticalTest::TTest);

    let counts = Endpoint::new("Exacerbations", EndpointType::Primary, DataType::Count)
        .with_description("Annual exacerbation count; no overdispersion expected");
    assert_ne!(
        map_endpoint_to_test(&counts).statistical_method.test,
        StatisticalTest::Glmm
    );
}

#[test]
fn small_trials_switch_to_rank_tests_under_strict_policy() {
    let endpoint = Endpoint::new("6MWD", EndpointType::Primary, DataType::Continuous)
        .with_expected_n_per_arm(40);
    let default_result = map_endpoint_to_test(&endpoint);
    assert_eq!(default_result.statistical_method.test, StatisticalTest::TTest);

    let strict = MappingEngine::new(PlanningPolicy::strict()).map_endpoint_to_test(&endpoint);
    assert_eq!(
        strict.classification.distribution_assumption,
        DistributionAssumption::Nonparametric
    );
    assert_eq!(strict.statistical_method.test, StatisticalTest::MannWhitney);
}

#[test]
fn rare_events_route_to_fisher_exact() {
    let endpoint = Endpoint::new("Serious infection", EndpointType::Secondary, DataType::Binary)
        .with_expected_n_per_arm(40)
        .with_expected_response_rate(0.05);
    assert_eq!(
        map_endpoint_to_test(&endpoint).statistical_method.test,
        StatisticalTest::FisherExact
    );
}

#[test]
fn stratified_survival_follows_configured_policy() {
    let endpoint = Endpoint::new("PFS", EndpointType::Primary, DataType::TimeToEvent)
        .with_stratification_factors(["region", "prior_therapy"]);

    let default_result = map_endpoint_to_test(&endpoint);
    assert_eq!(default_result.statistical_method.test, StatisticalTest::LogRank);
    assert_eq!(
        default_result.statistical_method.description,
        "Stratified log-rank test stratified by prior_therapy, region; two-sided superiority comparison"
    );

    let policy = PlanningPolicy {
        stratified_event_policy: StratifiedEventPolicy::PureCmh,
        ..PlanningPolicy::default()
    };
    let pure_cmh = MappingEngine::new(policy).map_endpoint_to_test(&endpoint);
    assert_eq!(
        pure_cmh.statistical_method.test,
        StatisticalTest::CochranMantelHaenszel
    );
    assert!(pure_cmh.validation.has_code("SIDEDNESS_ASSUMED"));
    assert!(!pure_cmh.validation.has_code("TEST_NOT_APPLICABLE"));
}

#[test]
fn multiple_endpoints_keep_input_order() {
    let endpoints = vec![
        Endpoint::new("OS", EndpointType::Primary, DataType::TimeToEvent),
        Endpoint::new("ORR", EndpointType::Secondary, DataType::Binary),
        Endpoint::new("Exacerbations", EndpointType::Secondary, DataType::Count)
            .with_overdispersed(true),
    ];
    let tests: Vec<StatisticalTest> = map_multiple_endpoints(&endpoints)
        .into_iter()
        .map(|result| result.statistical_method.test)
        .collect();
    assert_eq!(
        tests,
        vec![
            StatisticalTest::LogRank,
            StatisticalTest::ChiSquare,
            StatisticalTest::Glmm
        ]
    );
}

#[test]
fn unrecognized_endpoint_type_still_maps() {
    let endpoint: Endpoint = serde_json::from_str(
        r#"{
            "name": "OS",
            "type": "co-primary",
            "dataType": "time_to_event",
            "hypothesis": "superiority",
            "sided": "two_sided"
        }"#,
    )
    .unwrap();
    assert_eq!(endpoint.endpoint_type, EndpointType::Exploratory);

    let result = map_endpoint_to_test(&endpoint);
    assert_eq!(result.statistical_method.test, StatisticalTest::LogRank);
    assert!(result.validation.is_valid());
    let issue = result.validation.issues().next().unwrap();
    assert_eq!(issue.code(), "ENDPOINT_TYPE_ASSUMED");
    assert_eq!(issue.endpoint(), Some("OS"));
    assert_eq!(
        issue.message(),
        "Endpoint 'OS' has unrecognized type 'co-primary'; it is treated as exploratory"
    );
}

#[test]
fn three_arm_continuous_with_covariates_maps_to_ancova() {
    let endpoint = Endpoint::new("Body weight", EndpointType::Primary, DataType::Continuous)
        .with_hypothesis(Hypothesis::Superiority)
        .with_sided(Sidedness::TwoSided)
        .with_covariates(["baseline_weight"])
        .with_arms(3);

    let result = map_endpoint_to_test(&endpoint);
    assert_eq!(
        result.classification.comparison_cardinality,
        ComparisonCardinality::MultiGroup
    );
    assert_eq!(result.selection.rule_id, "continuous_adjusted");
    assert_eq!(result.statistical_method.test, StatisticalTest::Ancova);
    assert!(result.selection.requires_covariates);
    assert!(!result.validation.has_code("COVARIATES_NOT_ADJUSTED"));
    assert!(result.validation.issues().next().is_none());
}

#[test]
fn paired_continuous_with_covariates_maps_to_ancova() {
    let endpoint = Endpoint::new("FEV1 change", EndpointType::Primary, DataType::Continuous)
        .with_hypothesis(Hypothesis::Superiority)
        .with_sided(Sidedness::TwoSided)
        .with_paired(true)
        .with_covariates(["baseline_fev1"]);

    let result = map_endpoint_to_test(&endpoint);
    assert_eq!(
        result.classification.comparison_cardinality,
        ComparisonCardinality::SingleGroupPaired
    );
    assert_eq!(result.statistical_method.test, StatisticalTest::Ancova);
    assert_eq!(
        result.statistical_method.description,
        "Analysis of covariance (ANCOVA) adjusted for baseline_fev1; two-sided superiority comparison"
    );
    assert!(result.validation.is_valid());
    assert!(!result.validation.has_code("COVARIATES_NOT_ADJUSTED"));

    let unadjusted = map_endpoint_to_test(&endpoint.clone().with_covariates(Vec::<String>::new()));
    assert_eq!(unadjusted.statistical_method.test, StatisticalTest::TTest);
    assert_eq!(unadjusted.selection.analysis_label, "Paired t-test");
}

#[test]
fn decision_table_ends_with_catch_all() {
    let last = decision_table().last().unwrap();
    assert_eq!(last.id, "rank_fallback");
    assert!(decision_table().count() > 15);
}

fn hypothesis_strategy() -> impl Strategy<Value = Hypothesis> {
    prop_oneof![
        Just(Hypothesis::Superiority),
        Just(Hypothesis::NonInferiority),
        Just(Hypothesis::Equivalence),
    ]
}

fn sided_strategy() -> impl Strategy<Value = Sidedness> {
    prop_oneof![Just(Sidedness::OneSided), Just(Sidedness::TwoSided)]
}

fn data_type_strategy() -> impl Strategy<Value = DataType> {
    prop::sample::select(DataType::ALL.to_vec())
}

fn description_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        String::new(),
        "Change from baseline at week 12".to_string(),
        "Skewed distribution expected".to_string(),
        "Assessed repeatedly over time".to_string(),
        "Dose-ranging comparison of 4 treatment groups".to_string(),
        "Overdispersed exacerbation counts".to_string(),
    ])
}

fn covariate_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z_]{1,12}", 1..4)
}

fn arbitrary_endpoint() -> impl Strategy<Value = Endpoint> {
    (
        "[A-Za-z0-9 ]{1,24}",
        description_strategy(),
        data_type_strategy(),
        hypothesis_strategy(),
        sided_strategy(),
        any::<bool>(),
        prop::collection::vec("[a-z_]{1,12}", 0..3),
        prop::collection::vec("[a-z_]{1,12}", 0..3),
        prop::option::of(1u32..6),
        prop::option::of(5u32..200),
        any::<bool>(),
    )
        .prop_map(
            |(name, description, data_type, hypothesis, sided, paired, covariates, strata, arms, n, flag)| {
                let mut endpoint = Endpoint::new(name, EndpointType::Primary, data_type)
                    .with_description(description)
                    .with_hypothesis(hypothesis)
                    .with_sided(sided)
                    .with_paired(paired)
                    .with_covariates(covariates)
                    .with_stratification_factors(strata)
                    .with_non_normal(flag)
                    .with_overdispersed(flag);
                if let Some(arms) = arms {
                    endpoint = endpoint.with_arms(arms);
                }
                if let Some(n) = n {
                    endpoint = endpoint.with_expected_n_per_arm(n);
                }
                endpoint
            },
        )
}

proptest! {
    #[test]
    fn plain_two_group_continuous_uses_t_test(
        name in "[A-Za-z0-9 ]{1,24}",
        hypothesis in hypothesis_strategy(),
        sided in sided_strategy(),
        n in prop::option::of(30u32..500),
    ) {
        let mut endpoint = Endpoint::new(name, EndpointType::Primary, DataType::Continuous)
            .with_hypothesis(hypothesis)
            .with_sided(sided);
        if let Some(n) = n {
            endpoint = endpoint.with_expected_n_per_arm(n);
        }
        let result = map_endpoint_to_test(&endpoint);
        prop_assert_eq!(
            result.classification.distribution_assumption,
            DistributionAssumption::Parametric
        );
        prop_assert_eq!(result.statistical_method.test, StatisticalTest::TTest);
        prop_assert!(!result.selection.requires_covariates);
    }

    #[test]
    fn continuous_with_covariates_uses_ancova(
        covariates in covariate_strategy(),
        hypothesis in hypothesis_strategy(),
        non_normal in any::<bool>(),
        paired in any::<bool>(),
        arms in prop::option::of(1u32..6),
    ) {
        let mut endpoint = Endpoint::new("Endpoint", EndpointType::Secondary, DataType::Continuous)
            .with_hypothesis(hypothesis)
            .with_covariates(covariates)
            .with_paired(paired)
            .with_non_normal(non_normal);
        if let Some(arms) = arms {
            endpoint = endpoint.with_arms(arms);
        }
        let result = map_endpoint_to_test(&endpoint);
        prop_assert_eq!(result.statistical_method.test, StatisticalTest::Ancova);
        prop_assert!(result.selection.requires_covariates);
        prop_assert!(result.statistical_method.covariates.is_some());
        prop_assert!(!result.validation.has_code("COVARIATES_NOT_ADJUSTED"));
    }

    #[test]
    fn mapping_is_idempotent(endpoint in arbitrary_endpoint()) {
        let first = map_endpoint_to_test(&endpoint);
        let second = map_endpoint_to_test(&endpoint);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn selected_test_always_fits_the_data_type(endpoint in arbitrary_endpoint()) {
        let result = map_endpoint_to_test(&endpoint);
        prop_assert!(result.statistical_method.test.applicable_to(endpoint.data_type));
        prop_assert!(!result.validation.has_code("TEST_NOT_APPLICABLE"));
    }
}
