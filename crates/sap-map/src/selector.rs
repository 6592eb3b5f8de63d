//! Statistical test selection.
//!
//! The decision table is an ordered list of rules evaluated top to bottom;
//! the first rule whose predicate matches the classification decides the
//! test. Each rule carries an identifier so a selection can always be traced
//! back to the row that produced it.
//!
//! The repeated-measures row sits directly after the paired continuous row.
//! Below the cross-sectional continuous rows it could never be reached.

use std::iter;

use sap_model::{
    Classification, DataType, Hypothesis, PlanningPolicy, Sidedness, StatisticalTest,
    StratifiedEventPolicy, TestSelection,
};

/// Test, label, rationale and fixed assumption list of one decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleOutcome {
    pub test: StatisticalTest,
    pub label: &'static str,
    pub rationale: &'static str,
    pub assumptions: &'static [&'static str],
}

/// One row of the decision table.
pub struct SelectionRule {
    pub id: &'static str,
    /// Human-readable condition, as printed in the analysis plan appendix.
    pub condition: &'static str,
    /// Every test the row can select, depending on policy and classification.
    pub candidates: &'static [StatisticalTest],
    applies: fn(&Classification) -> bool,
    outcome: fn(&Classification, &PlanningPolicy) -> RuleOutcome,
}

impl SelectionRule {
    pub fn applies(&self, classification: &Classification) -> bool {
        (self.applies)(classification)
    }

    pub fn outcome(&self, classification: &Classification, policy: &PlanningPolicy) -> RuleOutcome {
        (self.outcome)(classification, policy)
    }
}

impl std::fmt::Debug for SelectionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionRule")
            .field("id", &self.id)
            .field("condition", &self.condition)
            .finish()
    }
}

const STRATIFIED_LOG_RANK: RuleOutcome = RuleOutcome {
    test: StatisticalTest::LogRank,
    label: "Stratified log-rank test",
    rationale: "Time-to-event endpoint with stratified randomization: the log-rank statistic is combined across strata (CMH-type weighting).",
    assumptions: &[
        "Non-informative censoring",
        "Proportional hazards within each stratum",
        "Independent survival times between subjects",
    ],
};

const CMH_EVENTS: RuleOutcome = RuleOutcome {
    test: StatisticalTest::CochranMantelHaenszel,
    label: "Cochran-Mantel-Haenszel test on event status",
    rationale: "Time-to-event endpoint with stratified randomization analysed as event status within strata, per the configured stratified event policy.",
    assumptions: &[
        "Common follow-up duration across subjects",
        "Homogeneous odds ratio across strata",
        "Non-informative censoring",
    ],
};

const STRATIFIED_COX: RuleOutcome = RuleOutcome {
    test: StatisticalTest::CoxRegression,
    label: "Stratified Cox proportional hazards regression",
    rationale: "Time-to-event endpoint with stratification factors and covariates: a stratified Cox model estimates the adjusted hazard ratio.",
    assumptions: &[
        "Proportional hazards for treatment and covariates",
        "Non-informative censoring",
        "Log-linear covariate effects on the hazard",
        "Baseline hazard may differ between strata",
    ],
};

const LOG_RANK: RuleOutcome = RuleOutcome {
    test: StatisticalTest::LogRank,
    label: "Log-rank test",
    rationale: "Unstratified time-to-event endpoint without covariates: the log-rank test compares survival distributions.",
    assumptions: &[
        "Non-informative censoring",
        "Proportional hazards between treatment groups",
        "Independent survival times between subjects",
    ],
};

const COX: RuleOutcome = RuleOutcome {
    test: StatisticalTest::CoxRegression,
    label: "Cox proportional hazards regression",
    rationale: "Time-to-event endpoint with covariates: the Cox model estimates the covariate-adjusted hazard ratio.",
    assumptions: &[
        "Proportional hazards for treatment and covariates",
        "Non-informative censoring",
        "Log-linear covariate effects on the hazard",
    ],
};

const PAIRED_T: RuleOutcome = RuleOutcome {
    test: StatisticalTest::TTest,
    label: "Paired t-test",
    rationale: "Continuous paired measurements with approximately normal differences: the paired t-test compares within-subject change.",
    assumptions: &[
        "Paired observations within subject",
        "Normally distributed within-subject differences",
        "Independent pairs",
    ],
};

const WILCOXON_SIGNED_RANK: RuleOutcome = RuleOutcome {
    test: StatisticalTest::WilcoxonSignedRank,
    label: "Wilcoxon signed-rank test",
    rationale: "Paired measurements without a normality assumption: the signed-rank test compares within-subject differences.",
    assumptions: &[
        "Paired observations within subject",
        "Symmetric distribution of within-subject differences",
        "Independent pairs",
    ],
};

const MMRM: RuleOutcome = RuleOutcome {
    test: StatisticalTest::Mmrm,
    label: "Mixed model for repeated measures (MMRM)",
    rationale: "Continuous endpoint measured repeatedly over time: MMRM uses all post-baseline visits with an unstructured covariance.",
    assumptions: &[
        "Missing at random (MAR) given observed data",
        "Multivariate normal residuals",
        "Unstructured within-subject covariance across visits",
        "Linear covariate effects",
    ],
};

const ANCOVA: RuleOutcome = RuleOutcome {
    test: StatisticalTest::Ancova,
    label: "Analysis of covariance (ANCOVA)",
    rationale: "Continuous endpoint with baseline covariates: ANCOVA estimates the adjusted treatment difference with improved precision.",
    assumptions: &[
        "Baseline covariate linearity",
        "Homogeneity of regression slopes",
        "Normally distributed residuals",
        "Homogeneity of residual variance",
    ],
};

const T_TEST: RuleOutcome = RuleOutcome {
    test: StatisticalTest::TTest,
    label: "Two-sample t-test",
    rationale: "Two-group continuous endpoint without covariates and approximately normal outcomes: the two-sample t-test compares group means.",
    assumptions: &[
        "Independent observations",
        "Approximately normally distributed outcome within each group",
        "Equal variances (Welch correction otherwise)",
    ],
};

const MANN_WHITNEY: RuleOutcome = RuleOutcome {
    test: StatisticalTest::MannWhitney,
    label: "Wilcoxon-Mann-Whitney rank-sum test",
    rationale: "Two-group comparison without a normality assumption: the rank-sum test compares distributions between groups.",
    assumptions: &[
        "Independent observations",
        "Ordinal or continuous outcome scale",
        "Similar distribution shapes for a location-shift interpretation",
    ],
};

const ANOVA: RuleOutcome = RuleOutcome {
    test: StatisticalTest::Anova,
    label: "One-way analysis of variance (ANOVA)",
    rationale: "Continuous endpoint compared across more than two groups with approximately normal outcomes.",
    assumptions: &[
        "Independent observations",
        "Normally distributed residuals",
        "Homogeneity of variance across groups",
    ],
};

const KRUSKAL_WALLIS: RuleOutcome = RuleOutcome {
    test: StatisticalTest::KruskalWallis,
    label: "Kruskal-Wallis test",
    rationale: "More than two groups compared without a normality assumption.",
    assumptions: &[
        "Independent observations",
        "Ordinal or continuous outcome scale",
        "Similar distribution shapes across groups",
    ],
};

const MCNEMAR: RuleOutcome = RuleOutcome {
    test: StatisticalTest::Mcnemar,
    label: "McNemar's test",
    rationale: "Paired binary outcomes: McNemar's test compares discordant pairs.",
    assumptions: &[
        "Paired binary observations within subject",
        "Sufficient discordant pairs for the chi-square approximation",
    ],
};

const CMH: RuleOutcome = RuleOutcome {
    test: StatisticalTest::CochranMantelHaenszel,
    label: "Cochran-Mantel-Haenszel test",
    rationale: "Binary endpoint with stratified randomization: the CMH test combines 2x2 tables across strata.",
    assumptions: &[
        "Homogeneous odds ratio across strata",
        "Independent observations",
        "Adequate sample size within strata",
    ],
};

const FISHER_EXACT: RuleOutcome = RuleOutcome {
    test: StatisticalTest::FisherExact,
    label: "Fisher's exact test",
    rationale: "Binary endpoint with small expected cell counts: the exact test avoids the large-sample approximation.",
    assumptions: &[
        "Independent observations",
        "Fixed marginal totals",
    ],
};

const CHI_SQUARE: RuleOutcome = RuleOutcome {
    test: StatisticalTest::ChiSquare,
    label: "Pearson chi-square test",
    rationale: "Unstratified binary endpoint with adequate expected cell counts.",
    assumptions: &[
        "Independent observations",
        "Expected cell counts of at least 5",
    ],
};

const GLMM: RuleOutcome = RuleOutcome {
    test: StatisticalTest::Glmm,
    label: "Generalized linear mixed model (GLMM)",
    rationale: "Count or ordinal endpoint that is repeated, overdispersed or covariate-adjusted: a GLMM with an appropriate link models the outcome directly.",
    assumptions: &[
        "Correctly specified link and variance functions",
        "Random effects normally distributed",
        "Missing at random (MAR) given observed data",
    ],
};

fn is_continuous(c: &Classification) -> bool {
    c.data_type == DataType::Continuous
}

fn is_count_or_ordinal(c: &Classification) -> bool {
    matches!(c.data_type, DataType::Count | DataType::Ordinal)
}

static RULES: &[SelectionRule] = &[
    SelectionRule {
        id: "tte_stratified",
        condition: "time_to_event, stratified",
        candidates: &[
            StatisticalTest::LogRank,
            StatisticalTest::CochranMantelHaenszel,
            StatisticalTest::CoxRegression,
        ],
        applies: |c| c.data_type == DataType::TimeToEvent && c.requires_stratified_analysis,
        outcome: |c, policy| {
            if c.requires_covariate_adjustment {
                STRATIFIED_COX
            } else {
                match policy.stratified_event_policy {
                    StratifiedEventPolicy::LogRankCmh => STRATIFIED_LOG_RANK,
                    StratifiedEventPolicy::PureCmh => CMH_EVENTS,
                }
            }
        },
    },
    SelectionRule {
        id: "tte_unadjusted",
        condition: "time_to_event, unstratified, no covariates",
        candidates: &[StatisticalTest::LogRank],
        applies: |c| c.data_type == DataType::TimeToEvent && !c.requires_covariate_adjustment,
        outcome: |_, _| LOG_RANK,
    },
    SelectionRule {
        id: "tte_adjusted",
        condition: "time_to_event, covariates present",
        candidates: &[StatisticalTest::CoxRegression],
        applies: |c| c.data_type == DataType::TimeToEvent,
        outcome: |_, _| COX,
    },
    SelectionRule {
        id: "continuous_paired",
        condition: "continuous, paired, no covariates",
        candidates: &[StatisticalTest::TTest, StatisticalTest::WilcoxonSignedRank],
        applies: |c| is_continuous(c) && c.is_paired() && !c.requires_covariate_adjustment,
        outcome: |c, _| {
            if c.is_nonparametric() {
                WILCOXON_SIGNED_RANK
            } else {
                PAIRED_T
            }
        },
    },
    SelectionRule {
        id: "continuous_repeated",
        condition: "continuous, repeated measures over time",
        candidates: &[StatisticalTest::Mmrm],
        applies: |c| is_continuous(c) && c.repeated_measures,
        outcome: |_, _| MMRM,
    },
    SelectionRule {
        id: "continuous_adjusted",
        condition: "continuous, covariates present",
        candidates: &[StatisticalTest::Ancova],
        applies: |c| is_continuous(c) && c.requires_covariate_adjustment,
        outcome: |_, _| ANCOVA,
    },
    SelectionRule {
        id: "continuous_two_group_parametric",
        condition: "continuous, two_group, no covariates, parametric",
        candidates: &[StatisticalTest::TTest],
        applies: |c| is_continuous(c) && c.is_two_group() && c.is_parametric(),
        outcome: |_, _| T_TEST,
    },
    SelectionRule {
        id: "continuous_two_group_nonparametric",
        condition: "continuous, two_group, nonparametric",
        candidates: &[StatisticalTest::MannWhitney],
        applies: |c| is_continuous(c) && c.is_two_group() && c.is_nonparametric(),
        outcome: |_, _| MANN_WHITNEY,
    },
    SelectionRule {
        id: "continuous_multi_group_parametric",
        condition: "continuous, multi_group, parametric",
        candidates: &[StatisticalTest::Anova],
        applies: |c| is_continuous(c) && c.is_multi_group() && c.is_parametric(),
        outcome: |_, _| ANOVA,
    },
    SelectionRule {
        id: "continuous_multi_group_nonparametric",
        condition: "continuous, multi_group, nonparametric",
        candidates: &[StatisticalTest::KruskalWallis],
        applies: |c| is_continuous(c) && c.is_multi_group() && c.is_nonparametric(),
        outcome: |_, _| KRUSKAL_WALLIS,
    },
    SelectionRule {
        id: "binary_paired",
        condition: "binary, paired",
        candidates: &[StatisticalTest::Mcnemar],
        applies: |c| c.data_type == DataType::Binary && c.is_paired(),
        outcome: |_, _| MCNEMAR,
    },
    SelectionRule {
        id: "binary_stratified",
        condition: "binary, stratified",
        candidates: &[StatisticalTest::CochranMantelHaenszel],
        applies: |c| c.data_type == DataType::Binary && c.requires_stratified_analysis,
        outcome: |_, _| CMH,
    },
    SelectionRule {
        id: "binary_sparse",
        condition: "binary, small expected cell counts",
        candidates: &[StatisticalTest::FisherExact],
        applies: |c| c.data_type == DataType::Binary && c.sparse_cells,
        outcome: |_, _| FISHER_EXACT,
    },
    SelectionRule {
        id: "binary",
        condition: "binary, else",
        candidates: &[StatisticalTest::ChiSquare],
        applies: |c| c.data_type == DataType::Binary,
        outcome: |_, _| CHI_SQUARE,
    },
    SelectionRule {
        id: "count_ordinal_glmm",
        condition: "count/ordinal, repeated, overdispersed or covariate-adjusted",
        candidates: &[StatisticalTest::Glmm],
        applies: |c| is_count_or_ordinal(c) && (c.repeated_measures || c.overdispersed || c.has_covariates),
        outcome: |_, _| GLMM,
    },
];

/// Catch-all keeping the selector total: rank methods by cardinality.
static RANK_FALLBACK: SelectionRule = SelectionRule {
    id: "rank_fallback",
    condition: "any remaining endpoint (rank method by cardinality)",
    candidates: &[
        StatisticalTest::WilcoxonSignedRank,
        StatisticalTest::KruskalWallis,
        StatisticalTest::MannWhitney,
    ],
    applies: |_| true,
    outcome: |c, _| {
        if c.is_paired() {
            WILCOXON_SIGNED_RANK
        } else if c.is_multi_group() {
            KRUSKAL_WALLIS
        } else {
            MANN_WHITNEY
        }
    },
};

/// The full decision table in evaluation order.
pub fn decision_table() -> impl Iterator<Item = &'static SelectionRule> {
    RULES.iter().chain(iter::once(&RANK_FALLBACK))
}

/// First rule matching the classification.
pub fn matching_rule(classification: &Classification) -> &'static SelectionRule {
    RULES
        .iter()
        .find(|rule| rule.applies(classification))
        .unwrap_or(&RANK_FALLBACK)
}

/// Selects a test using the default planning policy.
pub fn select(
    classification: &Classification,
    hypothesis: Hypothesis,
    sided: Sidedness,
) -> TestSelection {
    select_with(classification, hypothesis, sided, &PlanningPolicy::default())
}

/// Selects the primary test, rationale and assumptions for a classification.
pub fn select_with(
    classification: &Classification,
    hypothesis: Hypothesis,
    sided: Sidedness,
    policy: &PlanningPolicy,
) -> TestSelection {
    let rule = matching_rule(classification);
    let outcome = rule.outcome(classification, policy);

    let mut assumptions: Vec<String> = outcome
        .assumptions
        .iter()
        .map(|a| (*a).to_string())
        .collect();
    assumptions.extend(hypothesis_assumptions(hypothesis, sided));

    TestSelection {
        primary_test: outcome.test,
        rule_id: rule.id.to_string(),
        analysis_label: outcome.label.to_string(),
        rationale: format!(
            "{} Tested as a {} {} comparison.",
            outcome.rationale,
            sided.label(),
            hypothesis.label()
        ),
        assumptions,
        requires_covariates: classification.requires_covariate_adjustment,
        requires_stratification: classification.requires_stratified_analysis,
    }
}

fn hypothesis_assumptions(hypothesis: Hypothesis, sided: Sidedness) -> Vec<String> {
    let mut extra = Vec::new();
    match hypothesis {
        Hypothesis::Superiority => {}
        Hypothesis::NonInferiority => {
            extra.push("Non-inferiority margin pre-specified and clinically justified".to_string());
            extra.push("Assay sensitivity and constancy of the active-control effect".to_string());
        }
        Hypothesis::Equivalence => {
            extra.push(
                "Equivalence margins pre-specified; two one-sided tests (TOST) against both margins"
                    .to_string(),
            );
        }
    }
    if sided == Sidedness::OneSided {
        extra.push("One-sided significance level of 0.025".to_string());
    }
    extra
}
