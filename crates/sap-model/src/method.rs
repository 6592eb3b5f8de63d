//! Statistical tests, selections, and the per-endpoint mapping result.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::classification::Classification;
use crate::endpoint::Endpoint;
use crate::enums::{DataType, normalize_token};
use crate::issue::ValidationResult;

/// Closed set of statistical tests the engine may select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatisticalTest {
    TTest,
    Ancova,
    Anova,
    ChiSquare,
    FisherExact,
    CochranMantelHaenszel,
    LogRank,
    CoxRegression,
    MannWhitney,
    WilcoxonSignedRank,
    Mmrm,
    Mcnemar,
    KruskalWallis,
    Glmm,
}

impl StatisticalTest {
    pub const ALL: [StatisticalTest; 14] = [
        StatisticalTest::TTest,
        StatisticalTest::Ancova,
        StatisticalTest::Anova,
        StatisticalTest::ChiSquare,
        StatisticalTest::FisherExact,
        StatisticalTest::CochranMantelHaenszel,
        StatisticalTest::LogRank,
        StatisticalTest::CoxRegression,
        StatisticalTest::MannWhitney,
        StatisticalTest::WilcoxonSignedRank,
        StatisticalTest::Mmrm,
        StatisticalTest::Mcnemar,
        StatisticalTest::KruskalWallis,
        StatisticalTest::Glmm,
    ];

    /// Canonical identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatisticalTest::TTest => "t_test",
            StatisticalTest::Ancova => "ancova",
            StatisticalTest::Anova => "anova",
            StatisticalTest::ChiSquare => "chi_square",
            StatisticalTest::FisherExact => "fisher_exact",
            StatisticalTest::CochranMantelHaenszel => "cochran_mantel_haenszel",
            StatisticalTest::LogRank => "log_rank",
            StatisticalTest::CoxRegression => "cox_regression",
            StatisticalTest::MannWhitney => "mann_whitney",
            StatisticalTest::WilcoxonSignedRank => "wilcoxon_signed_rank",
            StatisticalTest::Mmrm => "mmrm",
            StatisticalTest::Mcnemar => "mcnemar",
            StatisticalTest::KruskalWallis => "kruskal_wallis",
            StatisticalTest::Glmm => "glmm",
        }
    }

    /// Full name as written in a statistical analysis plan.
    pub fn label(&self) -> &'static str {
        match self {
            StatisticalTest::TTest => "Student's t-test",
            StatisticalTest::Ancova => "Analysis of covariance (ANCOVA)",
            StatisticalTest::Anova => "Analysis of variance (ANOVA)",
            StatisticalTest::ChiSquare => "Pearson chi-square test",
            StatisticalTest::FisherExact => "Fisher's exact test",
            StatisticalTest::CochranMantelHaenszel => "Cochran-Mantel-Haenszel (CMH) test",
            StatisticalTest::LogRank => "Log-rank test",
            StatisticalTest::CoxRegression => "Cox proportional hazards regression",
            StatisticalTest::MannWhitney => "Wilcoxon-Mann-Whitney rank-sum test",
            StatisticalTest::WilcoxonSignedRank => "Wilcoxon signed-rank test",
            StatisticalTest::Mmrm => "Mixed model for repeated measures (MMRM)",
            StatisticalTest::Mcnemar => "McNemar's test",
            StatisticalTest::KruskalWallis => "Kruskal-Wallis test",
            StatisticalTest::Glmm => "Generalized linear mixed model (GLMM)",
        }
    }

    /// True when the model estimates the treatment effect adjusted for covariates.
    pub fn adjusts_for_covariates(&self) -> bool {
        matches!(
            self,
            StatisticalTest::Ancova
                | StatisticalTest::CoxRegression
                | StatisticalTest::Mmrm
                | StatisticalTest::Glmm
        )
    }

    /// True when the test can incorporate stratification factors.
    pub fn supports_stratification(&self) -> bool {
        matches!(
            self,
            StatisticalTest::CochranMantelHaenszel
                | StatisticalTest::LogRank
                | StatisticalTest::CoxRegression
                | StatisticalTest::Ancova
                | StatisticalTest::Mmrm
                | StatisticalTest::Glmm
        )
    }

    /// Data types this test can analyse.
    pub fn applicable_data_types(&self) -> &'static [DataType] {
        match self {
            StatisticalTest::TTest
            | StatisticalTest::Ancova
            | StatisticalTest::Anova
            | StatisticalTest::Mmrm => &[DataType::Continuous],
            StatisticalTest::ChiSquare => &[DataType::Binary, DataType::Ordinal],
            StatisticalTest::FisherExact | StatisticalTest::Mcnemar => &[DataType::Binary],
            StatisticalTest::CochranMantelHaenszel => {
                &[DataType::Binary, DataType::Ordinal, DataType::TimeToEvent]
            }
            StatisticalTest::LogRank | StatisticalTest::CoxRegression => &[DataType::TimeToEvent],
            StatisticalTest::MannWhitney
            | StatisticalTest::WilcoxonSignedRank
            | StatisticalTest::KruskalWallis => {
                &[DataType::Continuous, DataType::Ordinal, DataType::Count]
            }
            StatisticalTest::Glmm => &[DataType::Binary, DataType::Count, DataType::Ordinal],
        }
    }

    pub fn applicable_to(&self, data_type: DataType) -> bool {
        self.applicable_data_types().contains(&data_type)
    }
}

impl fmt::Display for StatisticalTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StatisticalTest {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize_token(s);
        StatisticalTest::ALL
            .into_iter()
            .find(|test| test.as_str() == normalized)
            .ok_or_else(|| format!("Unknown statistical test: {s}"))
    }
}

/// Output of the test selector for one classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSelection {
    pub primary_test: StatisticalTest,
    /// Identifier of the decision-table row that matched.
    pub rule_id: String,
    /// Analysis name including its variant (e.g. "Paired t-test").
    pub analysis_label: String,
    pub rationale: String,
    pub assumptions: Vec<String>,
    pub requires_covariates: bool,
    pub requires_stratification: bool,
}

/// Statistical method record attached to an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticalMethod {
    pub test: StatisticalTest,
    pub description: String,
    pub assumptions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub covariates: Option<BTreeSet<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stratification_factors: Option<BTreeSet<String>>,
}

/// Everything the engine derives for one endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingResult {
    pub endpoint: Endpoint,
    pub classification: Classification,
    pub selection: TestSelection,
    pub statistical_method: StatisticalMethod,
    pub validation: ValidationResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_test_round_trips_through_its_identifier() {
        for test in StatisticalTest::ALL {
            assert_eq!(test.as_str().parse::<StatisticalTest>().unwrap(), test);
        }
    }

    #[test]
    fn every_data_type_has_an_applicable_test() {
        for data_type in DataType::ALL {
            assert!(
                StatisticalTest::ALL
                    .iter()
                    .any(|test| test.applicable_to(data_type)),
                "no test for {data_type}"
            );
        }
    }

    #[test]
    fn covariate_adjusting_tests_support_stratification() {
        for test in StatisticalTest::ALL {
            if test.adjusts_for_covariates() {
                assert!(test.supports_stratification(), "{test}");
            }
        }
    }
}
