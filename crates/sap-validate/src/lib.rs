//! Consistency checks that only make sense across the whole design.
//!
//! Each check is a pure function over already-computed inputs and returns
//! its own [`ValidationResult`](sap_model::ValidationResult); callers combine
//! them with [`ValidationResult::merge`](sap_model::ValidationResult::merge).

pub mod checks;
pub mod compatibility;

pub use checks::plan::{SapSnapshot, check_sap_consistency};
pub use checks::protocol::check_protocol_consistency;
pub use checks::sample_size::check_sample_size_consistency;
pub use compatibility::{compatible_data_types, is_compatible};
