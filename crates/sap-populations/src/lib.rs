//! Analysis populations: the standard set definitions for a design and the
//! structural checks over them.

pub mod generate;
pub mod validate;

pub use generate::{FAS, MITT, PKS, PPS, SAF, generate};
pub use validate::validate_analysis_sets;
