//! Whole-plan assembly in the fixed section order.

use sap_model::{
    AnalysisSet, InterimAnalysisPlan, MappingResult, MissingDataStrategy, SubgroupAnalysis,
};

use crate::methodology::methodology_section;
use crate::narrative::{interim_analysis_section, missing_data_section, subgroup_analysis_section};
use crate::populations::analysis_sets_section;
use crate::section::Section;

/// Structured inputs for the assembled plan.
#[derive(Debug, Clone, Copy)]
pub struct PlanContent<'a> {
    pub analysis_sets: &'a [AnalysisSet],
    pub results: &'a [MappingResult],
    pub missing_data: Option<&'a MissingDataStrategy>,
    pub interim: Option<&'a InterimAnalysisPlan>,
    pub subgroups: &'a [SubgroupAnalysis],
}

/// Builds every plan section. The order is fixed: Analysis Populations,
/// Statistical Methodology, Missing Data Handling, Interim Analysis,
/// Subgroup Analyses.
pub fn assemble_plan(content: &PlanContent<'_>) -> Vec<Section> {
    vec![
        analysis_sets_section(content.analysis_sets),
        methodology_section(content.results),
        missing_data_section(content.missing_data),
        interim_analysis_section(content.interim),
        subgroup_analysis_section(content.subgroups),
    ]
}
