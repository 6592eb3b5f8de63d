//! Missing-data, interim-analysis and subgroup-analysis sections.
//!
//! Absent inputs never fail: each section falls back to a fixed sentence.

use sap_model::{InterimAnalysisPlan, MissingDataStrategy, SubgroupAnalysis};

use crate::section::{Block, Section};

pub const MISSING_DATA_HEADING: &str = "Missing Data Handling";
pub const INTERIM_HEADING: &str = "Interim Analysis";
pub const SUBGROUP_HEADING: &str = "Subgroup Analyses";

pub const NO_MISSING_DATA_STRATEGY: &str = "No missing-data strategy has been specified.";
pub const NO_INTERIM_ANALYSES: &str = "No interim analyses are planned.";
pub const NO_SUBGROUP_ANALYSES: &str = "No subgroup analyses are planned.";

pub fn missing_data_section(strategy: Option<&MissingDataStrategy>) -> Section {
    let section = Section::new(MISSING_DATA_HEADING);
    let Some(strategy) = strategy else {
        return section.with_block(Block::paragraph(NO_MISSING_DATA_STRATEGY));
    };

    let section = section
        .with_block(Block::field(
            "Primary approach",
            format!(
                "{}. {}",
                strategy.primary_approach.label(),
                strategy.primary_approach.description()
            ),
        ))
        .with_block(Block::field(
            "Missingness assumption",
            strategy.missingness_assumption.label(),
        ));
    if strategy.sensitivity_analyses.is_empty() {
        section.with_block(Block::field("Sensitivity analyses", "None planned"))
    } else {
        section.with_block(Block::field_list(
            "Sensitivity analyses",
            strategy.sensitivity_analyses.clone(),
        ))
    }
}

pub fn interim_analysis_section(interim: Option<&InterimAnalysisPlan>) -> Section {
    let section = Section::new(INTERIM_HEADING);
    let Some(plan) = interim.filter(|plan| plan.analysis_count() > 0) else {
        return section.with_block(Block::paragraph(NO_INTERIM_ANALYSES));
    };

    let fractions = plan
        .information_fractions
        .iter()
        .map(|fraction| format!("{:.0}%", fraction * 100.0))
        .collect::<Vec<_>>()
        .join(", ");
    let committee = if plan.data_monitoring_committee {
        "An independent Data Monitoring Committee reviews unblinded interim results."
    } else {
        "No independent Data Monitoring Committee is planned."
    };

    section
        .with_block(Block::field(
            "Number of interim analyses",
            plan.analysis_count().to_string(),
        ))
        .with_block(Block::field("Information fractions", fractions))
        .with_block(Block::field(
            "Alpha spending",
            format!(
                "{} spending function; the overall type I error rate is preserved across all analyses",
                plan.spending_function.label()
            ),
        ))
        .with_block(Block::field(
            "Stopping rules",
            format!("The trial may stop early for {}", plan.stop_for.label()),
        ))
        .with_block(Block::field("Data monitoring", committee))
}

pub fn subgroup_analysis_section(subgroups: &[SubgroupAnalysis]) -> Section {
    let section = Section::new(SUBGROUP_HEADING);
    if subgroups.is_empty() {
        return section.with_block(Block::paragraph(NO_SUBGROUP_ANALYSES));
    }

    section
        .with_block(Block::paragraph(
            "Subgroup analyses are exploratory. Treatment effects are estimated within each subgroup and the treatment-by-subgroup interaction is reported without multiplicity adjustment.",
        ))
        .with_block(Block::List(subgroups.iter().map(subgroup_line).collect()))
}

fn subgroup_line(subgroup: &SubgroupAnalysis) -> String {
    let mut line = format!("**{}**", subgroup.name);
    if let Some(variable) = &subgroup.variable {
        line.push_str(&format!(" ({variable})"));
    }
    if !subgroup.categories.is_empty() {
        line.push_str(&format!(": {}", subgroup.categories.join(", ")));
    }
    if let Some(rationale) = &subgroup.rationale {
        line.push_str(&format!(". {rationale}"));
    }
    line
}

#[cfg(test)]
mod tests {
    use sap_model::{
        InterimStopping, MissingDataApproach, MissingnessAssumption, SpendingFunction,
    };

    use super::*;

    #[test]
    fn absent_inputs_use_boilerplate() {
        insta::assert_snapshot!(missing_data_section(None).render(), @r"
        ## Missing Data Handling

        No missing-data strategy has been specified.
        ");
        insta::assert_snapshot!(interim_analysis_section(None).render(), @r"
        ## Interim Analysis

        No interim analyses are planned.
        ");
        insta::assert_snapshot!(subgroup_analysis_section(&[]).render(), @r"
        ## Subgroup Analyses

        No subgroup analyses are planned.
        ");
    }

    #[test]
    fn interim_plan_without_looks_counts_as_absent() {
        let plan = InterimAnalysisPlan::default();
        assert_eq!(
            interim_analysis_section(Some(&plan)).blocks,
            vec![Block::paragraph(NO_INTERIM_ANALYSES)]
        );
    }

    #[test]
    fn interim_plan_renders_fields() {
        let plan = InterimAnalysisPlan {
            information_fractions: vec![0.5],
            spending_function: SpendingFunction::OBrienFleming,
            stop_for: InterimStopping::Futility,
            data_monitoring_committee: true,
        };
        insta::assert_snapshot!(interim_analysis_section(Some(&plan)).render(), @r"
        ## Interim Analysis

        **Number of interim analyses**: 1

        **Information fractions**: 50%

        **Alpha spending**: Lan-DeMets O'Brien-Fleming-type spending function; the overall type I error rate is preserved across all analyses

        **Stopping rules**: The trial may stop early for futility

        **Data monitoring**: An independent Data Monitoring Committee reviews unblinded interim results.
        ");
    }

    #[test]
    fn missing_data_strategy_lists_sensitivity_analyses() {
        let strategy = MissingDataStrategy {
            primary_approach: MissingDataApproach::NonResponderImputation,
            missingness_assumption: MissingnessAssumption::Mnar,
            sensitivity_analyses: vec!["Tipping-point analysis".to_string()],
        };
        let rendered = missing_data_section(Some(&strategy)).render();
        assert!(rendered.contains(
            "**Primary approach**: Non-responder imputation. Subjects with a missing response assessment will be counted as non-responders."
        ));
        assert!(rendered.contains("**Sensitivity analyses**:\n- Tipping-point analysis"));
    }

    #[test]
    fn subgroup_lines_include_optional_parts() {
        let subgroups = vec![
            SubgroupAnalysis {
                name: "Age".to_string(),
                variable: Some("AGEGR1".to_string()),
                categories: vec!["<65".to_string(), ">=65".to_string()],
                rationale: Some("Age-related differences in exposure".to_string()),
            },
            SubgroupAnalysis {
                name: "Region".to_string(),
                variable: None,
                categories: Vec::new(),
                rationale: None,
            },
        ];
        let section = subgroup_analysis_section(&subgroups);
        assert_eq!(
            section.blocks[1],
            Block::List(vec![
                "**Age** (AGEGR1): <65, >=65. Age-related differences in exposure".to_string(),
                "**Region**".to_string(),
            ])
        );
    }
}
