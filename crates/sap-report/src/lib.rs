//! Statistical analysis plan section assembly.
//!
//! Pure template-filling over the results of mapping, population generation
//! and the narrative inputs of the design. Nothing here fails: absent
//! optional data degrades to a fixed boilerplate sentence.

mod methodology;
mod narrative;
mod plan;
mod populations;
mod section;

pub use methodology::{
    METHODOLOGY_HEADING, MULTIPLICITY_HEADING, method_description, methodology_section,
};
pub use narrative::{
    INTERIM_HEADING, MISSING_DATA_HEADING, NO_INTERIM_ANALYSES, NO_MISSING_DATA_STRATEGY,
    NO_SUBGROUP_ANALYSES, SUBGROUP_HEADING, interim_analysis_section, missing_data_section,
    subgroup_analysis_section,
};
pub use plan::{PlanContent, assemble_plan};
pub use populations::{POPULATIONS_HEADING, analysis_sets_section};
pub use section::{Block, Section, Subsection, render_sections};
