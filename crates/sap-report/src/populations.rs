//! Analysis populations section.

use sap_model::AnalysisSet;

use crate::section::{Block, Section, Subsection};

pub const POPULATIONS_HEADING: &str = "Analysis Populations";

pub fn analysis_sets_section(sets: &[AnalysisSet]) -> Section {
    let mut section = Section::new(POPULATIONS_HEADING);
    if sets.is_empty() {
        return section.with_block(Block::paragraph(
            "No analysis populations have been defined.",
        ));
    }

    for set in sets {
        let mut subsection = Subsection::new(format!("{} ({})", set.name, set.abbreviation))
            .with_block(Block::paragraph(set.description.clone()));
        if !set.inclusion_criteria.is_empty() {
            subsection = subsection.with_block(Block::field_list(
                "Inclusion criteria",
                set.inclusion_criteria.clone(),
            ));
        }
        if !set.exclusion_criteria.is_empty() {
            subsection = subsection.with_block(Block::field_list(
                "Exclusion criteria",
                set.exclusion_criteria.clone(),
            ));
        }
        subsection = subsection
            .with_block(Block::field("Primary use", set.primary_use.label()))
            .with_block(Block::field("Regulatory note", set.regulatory_note.clone()));
        section = section.with_subsection(subsection);
    }
    section
}
