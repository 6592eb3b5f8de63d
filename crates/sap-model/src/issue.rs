//! Validation issue types.
//!
//! The [`Issue`] enum provides type-safe issue creation where each variant
//! carries only its needed data. Severity is a property of the variant, so
//! a finding can never be filed under the wrong severity.

use serde::{Deserialize, Serialize};

use crate::enums::DataType;
use crate::method::StatisticalTest;
use crate::sample_size::SampleSizeMethod;

/// Issue severity. Errors block sign-off; warnings are advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warning => "Warning",
        }
    }
}

/// Which check produced an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Per-endpoint classification and test selection.
    Mapping,
    /// Sample-size calculation against the primary endpoint.
    SampleSize,
    /// Completeness of the statistical analysis plan.
    Plan,
    /// Endpoint hierarchy and planned analyses in the protocol.
    Protocol,
    /// Analysis population definitions.
    AnalysisSets,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Mapping => "Mapping",
            Category::SampleSize => "Sample size",
            Category::Plan => "SAP",
            Category::Protocol => "Protocol",
            Category::AnalysisSets => "Analysis sets",
        }
    }
}

/// Validation issue - each variant carries only its needed data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Issue {
    // Mapping checks
    /// Endpoint does not state a recognizable hypothesis type
    MissingHypothesis { endpoint: String },
    /// Endpoint does not state sidedness; two-sided was assumed
    SidednessAssumed { endpoint: String },
    /// Endpoint type text was not recognized; exploratory was assumed
    EndpointTypeAssumed { endpoint: String, value: String },
    /// Selected test cannot analyse the endpoint's data type
    TestNotApplicable {
        endpoint: String,
        test: StatisticalTest,
        data_type: DataType,
    },
    /// Covariates were declared but the selected test does not adjust for them
    CovariatesNotAdjusted {
        endpoint: String,
        test: StatisticalTest,
    },
    /// Stratification factors were declared but the test cannot stratify
    StratificationNotApplied {
        endpoint: String,
        test: StatisticalTest,
    },
    /// Paired flag has no meaning for the endpoint's data type
    PairedDesignIgnored {
        endpoint: String,
        data_type: DataType,
    },
    /// Equivalence declared with a one-sided test
    EquivalenceOneSided { endpoint: String },

    // Sample-size checks
    /// Sample-size method does not fit the primary endpoint's data type
    MethodEndpointMismatch {
        endpoint: String,
        method: SampleSizeMethod,
        data_type: DataType,
    },
    /// Planned power is below the policy minimum
    LowPower { power: f64, threshold: f64 },
    /// Alpha or power outside the open unit interval
    InvalidSampleSizeParameter { parameter: String, value: f64 },
    /// Per-arm size exceeds the total sample size
    SampleSizeArithmetic { per_arm: u32, total: u32 },
    /// Method could not be recognized, compatibility not verified
    UnknownSampleSizeMethod,
    /// No primary endpoint to compare the calculation against
    SampleSizeUnanchored,

    // Plan completeness checks
    /// No analysis populations defined
    NoAnalysisSets,
    /// No statistical methods defined
    NoStatisticalMethods,
    /// Number of endpoints and methods differ
    MethodCountMismatch { endpoints: usize, methods: usize },
    /// No missing-data strategy documented
    NoMissingDataStrategy,

    // Protocol checks
    /// No endpoint is flagged primary
    NoPrimaryEndpoint,
    /// More than one primary endpoint, multiplicity adjustment needed
    MultiplePrimaryEndpoints { count: usize, names: Vec<String> },
    /// Two endpoints share a name
    DuplicateEndpointName { name: String },
    /// Interim analyses are planned
    InterimAnalysisPlanned { analyses: usize },
    /// Subgroup analyses are planned
    SubgroupAnalysesPlanned { count: usize },

    // Analysis-set checks
    /// Neither FAS nor mITT is defined
    MissingEfficacySet,
    /// SAF is not defined
    MissingSafetySet,
    /// Two analysis sets share an abbreviation
    DuplicateAnalysisSetAbbreviation { abbreviation: String },
    /// Not exactly one set is designated for primary efficacy
    PrimaryEfficacySetCount { count: usize },
    /// No set is designated for safety analyses
    NoSafetyPopulation,
}

impl Issue {
    /// Stable machine-readable code (matches the serialized tag).
    pub fn code(&self) -> &'static str {
        match self {
            Issue::MissingHypothesis { .. } => "MISSING_HYPOTHESIS",
            Issue::SidednessAssumed { .. } => "SIDEDNESS_ASSUMED",
            Issue::EndpointTypeAssumed { .. } => "ENDPOINT_TYPE_ASSUMED",
            Issue::TestNotApplicable { .. } => "TEST_NOT_APPLICABLE",
            Issue::CovariatesNotAdjusted { .. } => "COVARIATES_NOT_ADJUSTED",
            Issue::StratificationNotApplied { .. } => "STRATIFICATION_NOT_APPLIED",
            Issue::PairedDesignIgnored { .. } => "PAIRED_DESIGN_IGNORED",
            Issue::EquivalenceOneSided { .. } => "EQUIVALENCE_ONE_SIDED",
            Issue::MethodEndpointMismatch { .. } => "METHOD_ENDPOINT_MISMATCH",
            Issue::LowPower { .. } => "LOW_POWER",
            Issue::InvalidSampleSizeParameter { .. } => "INVALID_SAMPLE_SIZE_PARAMETER",
            Issue::SampleSizeArithmetic { .. } => "SAMPLE_SIZE_ARITHMETIC",
            Issue::UnknownSampleSizeMethod => "UNKNOWN_SAMPLE_SIZE_METHOD",
            Issue::SampleSizeUnanchored => "SAMPLE_SIZE_UNANCHORED",
            Issue::NoAnalysisSets => "NO_ANALYSIS_SETS",
            Issue::NoStatisticalMethods => "NO_STATISTICAL_METHODS",
            Issue::MethodCountMismatch { .. } => "METHOD_COUNT_MISMATCH",
            Issue::NoMissingDataStrategy => "NO_MISSING_DATA_STRATEGY",
            Issue::NoPrimaryEndpoint => "NO_PRIMARY_ENDPOINT",
            Issue::MultiplePrimaryEndpoints { .. } => "MULTIPLE_PRIMARY_ENDPOINTS",
            Issue::DuplicateEndpointName { .. } => "DUPLICATE_ENDPOINT_NAME",
            Issue::InterimAnalysisPlanned { .. } => "INTERIM_ANALYSIS_PLANNED",
            Issue::SubgroupAnalysesPlanned { .. } => "SUBGROUP_ANALYSES_PLANNED",
            Issue::MissingEfficacySet => "MISSING_EFFICACY_SET",
            Issue::MissingSafetySet => "MISSING_SAFETY_SET",
            Issue::DuplicateAnalysisSetAbbreviation { .. } => {
                "DUPLICATE_ANALYSIS_SET_ABBREVIATION"
            }
            Issue::PrimaryEfficacySetCount { .. } => "PRIMARY_EFFICACY_SET_COUNT",
            Issue::NoSafetyPopulation => "NO_SAFETY_POPULATION",
        }
    }

    /// Severity for this issue type.
    pub fn severity(&self) -> Severity {
        match self {
            Issue::MissingHypothesis { .. }
            | Issue::TestNotApplicable { .. }
            | Issue::MethodEndpointMismatch { .. }
            | Issue::InvalidSampleSizeParameter { .. }
            | Issue::NoAnalysisSets
            | Issue::NoStatisticalMethods
            | Issue::NoPrimaryEndpoint
            | Issue::DuplicateEndpointName { .. }
            | Issue::MissingEfficacySet
            | Issue::MissingSafetySet
            | Issue::DuplicateAnalysisSetAbbreviation { .. }
            | Issue::PrimaryEfficacySetCount { .. }
            | Issue::NoSafetyPopulation => Severity::Error,
            _ => Severity::Warning,
        }
    }

    /// Category for this issue type.
    pub fn category(&self) -> Category {
        match self {
            Issue::MissingHypothesis { .. }
            | Issue::SidednessAssumed { .. }
            | Issue::EndpointTypeAssumed { .. }
            | Issue::TestNotApplicable { .. }
            | Issue::CovariatesNotAdjusted { .. }
            | Issue::StratificationNotApplied { .. }
            | Issue::PairedDesignIgnored { .. }
            | Issue::EquivalenceOneSided { .. } => Category::Mapping,
            Issue::MethodEndpointMismatch { .. }
            | Issue::LowPower { .. }
            | Issue::InvalidSampleSizeParameter { .. }
            | Issue::SampleSizeArithmetic { .. }
            | Issue::UnknownSampleSizeMethod
            | Issue::SampleSizeUnanchored => Category::SampleSize,
            Issue::NoAnalysisSets
            | Issue::NoStatisticalMethods
            | Issue::MethodCountMismatch { .. }
            | Issue::NoMissingDataStrategy => Category::Plan,
            Issue::NoPrimaryEndpoint
            | Issue::MultiplePrimaryEndpoints { .. }
            | Issue::DuplicateEndpointName { .. }
            | Issue::InterimAnalysisPlanned { .. }
            | Issue::SubgroupAnalysesPlanned { .. } => Category::Protocol,
            Issue::MissingEfficacySet
            | Issue::MissingSafetySet
            | Issue::DuplicateAnalysisSetAbbreviation { .. }
            | Issue::PrimaryEfficacySetCount { .. }
            | Issue::NoSafetyPopulation => Category::AnalysisSets,
        }
    }

    /// Endpoint the issue refers to, if it is endpoint-specific.
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            Issue::MissingHypothesis { endpoint }
            | Issue::SidednessAssumed { endpoint }
            | Issue::EndpointTypeAssumed { endpoint, .. }
            | Issue::TestNotApplicable { endpoint, .. }
            | Issue::CovariatesNotAdjusted { endpoint, .. }
            | Issue::StratificationNotApplied { endpoint, .. }
            | Issue::PairedDesignIgnored { endpoint, .. }
            | Issue::EquivalenceOneSided { endpoint }
            | Issue::MethodEndpointMismatch { endpoint, .. } => Some(endpoint),
            Issue::DuplicateEndpointName { name } => Some(name),
            _ => None,
        }
    }

    /// Format message with issue-specific data.
    pub fn message(&self) -> String {
        match self {
            Issue::MissingHypothesis { endpoint } => format!(
                "Endpoint '{endpoint}' has no recognizable hypothesis type; superiority was assumed for test selection"
            ),
            Issue::SidednessAssumed { endpoint } => format!(
                "Endpoint '{endpoint}' does not state sidedness; a two-sided test was assumed"
            ),
            Issue::EndpointTypeAssumed { endpoint, value } => format!(
                "Endpoint '{endpoint}' has unrecognized type '{value}'; it is treated as exploratory"
            ),
            Issue::TestNotApplicable {
                endpoint,
                test,
                data_type,
            } => format!(
                "Selected test {} cannot analyse {} endpoint '{endpoint}'",
                test.label(),
                data_type.label()
            ),
            Issue::CovariatesNotAdjusted { endpoint, test } => format!(
                "Covariates declared for '{endpoint}' are not adjusted for by {}; consider a model-based sensitivity analysis",
                test.label()
            ),
            Issue::StratificationNotApplied { endpoint, test } => format!(
                "Stratification factors declared for '{endpoint}' are not accounted for by {}",
                test.label()
            ),
            Issue::PairedDesignIgnored {
                endpoint,
                data_type,
            } => format!(
                "Paired flag on {} endpoint '{endpoint}' is ignored; it is analysed as a between-group comparison",
                data_type.label()
            ),
            Issue::EquivalenceOneSided { endpoint } => format!(
                "Equivalence endpoint '{endpoint}' is declared one-sided; equivalence is tested with two one-sided tests against both margins"
            ),
            Issue::MethodEndpointMismatch {
                endpoint,
                method,
                data_type,
            } => format!(
                "Sample-size method {} is not compatible with {} primary endpoint '{endpoint}'",
                method.as_str(),
                data_type.label()
            ),
            Issue::LowPower { power, threshold } => format!(
                "Planned power {:.0}% is below the recommended minimum of {:.0}%",
                power * 100.0,
                threshold * 100.0
            ),
            Issue::InvalidSampleSizeParameter { parameter, value } => {
                format!("Sample-size {parameter} must lie strictly between 0 and 1 (found {value})")
            }
            Issue::SampleSizeArithmetic { per_arm, total } => format!(
                "Per-arm sample size {per_arm} exceeds the total sample size {total}"
            ),
            Issue::UnknownSampleSizeMethod => {
                "Sample-size method is not recognized; compatibility with the primary endpoint was not verified".to_string()
            }
            Issue::SampleSizeUnanchored => {
                "No primary endpoint is defined to anchor the sample-size calculation".to_string()
            }
            Issue::NoAnalysisSets => "No analysis populations are defined".to_string(),
            Issue::NoStatisticalMethods => "No statistical methods are defined".to_string(),
            Issue::MethodCountMismatch { endpoints, methods } => format!(
                "{endpoints} endpoints are declared but {methods} statistical methods are defined"
            ),
            Issue::NoMissingDataStrategy => {
                "No missing-data strategy is documented for the primary analysis".to_string()
            }
            Issue::NoPrimaryEndpoint => "No primary endpoint is defined".to_string(),
            Issue::MultiplePrimaryEndpoints { count, names } => format!(
                "Multiple primary endpoints ({count}: {}) require a multiplicity adjustment to control the family-wise error rate",
                names.join(", ")
            ),
            Issue::DuplicateEndpointName { name } => {
                format!("Endpoint name '{name}' is used more than once")
            }
            Issue::InterimAnalysisPlanned { analyses } => format!(
                "{analyses} interim analysis(es) planned; pre-specify the alpha-spending approach and stopping boundaries"
            ),
            Issue::SubgroupAnalysesPlanned { count } => format!(
                "{count} subgroup analysis(es) planned; results are exploratory unless powered and multiplicity-controlled"
            ),
            Issue::MissingEfficacySet => {
                "Neither a Full Analysis Set (FAS) nor a modified ITT set (mITT) is defined".to_string()
            }
            Issue::MissingSafetySet => "No Safety Set (SAF) is defined".to_string(),
            Issue::DuplicateAnalysisSetAbbreviation { abbreviation } => {
                format!("Analysis set abbreviation '{abbreviation}' is used more than once")
            }
            Issue::PrimaryEfficacySetCount { count } => format!(
                "Exactly one analysis set must be designated for the primary efficacy analysis (found {count})"
            ),
            Issue::NoSafetyPopulation => {
                "No analysis set is designated for safety analyses".to_string()
            }
        }
    }
}

/// Outcome of one check: errors block sign-off, warnings do not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn from_issues(issues: impl IntoIterator<Item = Issue>) -> Self {
        let mut result = Self::new();
        for issue in issues {
            result.push(issue);
        }
        result
    }

    /// Files the issue under its severity.
    pub fn push(&mut self, issue: Issue) {
        match issue.severity() {
            Severity::Error => {
                self.valid = false;
                self.errors.push(issue);
            }
            Severity::Warning => self.warnings.push(issue),
        }
    }

    /// Appends all issues of `other`.
    pub fn merge(&mut self, other: ValidationResult) {
        self.valid &= other.valid;
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    #[must_use]
    pub fn merged(mut self, other: ValidationResult) -> Self {
        self.merge(other);
        self
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Errors first, then warnings.
    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.errors.iter().chain(self.warnings.iter())
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.issues().any(|issue| issue.code() == code)
    }
}
