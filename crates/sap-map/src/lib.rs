//! Endpoint classification and statistical test selection.
//!
//! - **Classification** (`classifier`): derives comparison cardinality,
//!   distribution assumption and adjustment needs from an endpoint
//! - **Selection** (`selector`): ordered decision table from classification
//!   to primary test, rationale and assumptions
//! - **Mapping** (`engine`): runs both per endpoint and validates the result
//!
//! Every function is pure; mapping the same endpoint twice yields identical
//! results.

pub mod classifier;
pub mod engine;
pub mod hints;
pub mod selector;

pub use classifier::{classify, classify_with};
pub use engine::{
    MappingEngine, aggregate_validation, map_endpoint_to_test, map_multiple_endpoints,
};
pub use selector::{
    RuleOutcome, SelectionRule, decision_table, matching_rule, select, select_with,
};
