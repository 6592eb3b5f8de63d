//! The three independent consistency checks.

pub mod plan;
pub mod protocol;
pub mod sample_size;
