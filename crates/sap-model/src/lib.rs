//! Data model for statistical analysis planning.
//!
//! Every type here is created at the start of one planning invocation,
//! passed through the pipeline, and discarded. Nothing is persisted.

pub mod analysis_set;
pub mod classification;
pub mod endpoint;
pub mod enums;
pub mod error;
pub mod issue;
pub mod method;
pub mod plan;
pub mod policy;
pub mod sample_size;

pub use analysis_set::{AnalysisSet, AnalysisSetUse};
pub use classification::Classification;
pub use endpoint::{Endpoint, EndpointRecord};
pub use enums::{
    ComparisonCardinality, DataType, DistributionAssumption, EndpointType, Hypothesis, Sidedness,
    StudyDesign,
};
pub use error::{ModelError, Result};
pub use issue::{Category, Issue, Severity, ValidationResult};
pub use method::{MappingResult, StatisticalMethod, StatisticalTest, TestSelection};
pub use plan::{
    InterimAnalysisPlan, InterimStopping, MissingDataApproach, MissingDataStrategy,
    MissingnessAssumption, SpendingFunction, SubgroupAnalysis, TrialDesign,
};
pub use policy::{PlanningPolicy, StratifiedEventPolicy};
pub use sample_size::{SampleSizeMethod, SampleSizeResult};
