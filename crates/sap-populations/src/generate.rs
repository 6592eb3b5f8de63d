//! Analysis-set generation from study design flags.
//!
//! Nesting is encoded in the criteria text rather than checked at runtime:
//! every FAS member must be a SAF member, the mITT is drawn from the FAS,
//! and the PPS is drawn from the mITT when present, otherwise the FAS.

use tracing::{debug, info};

use sap_model::{AnalysisSet, AnalysisSetUse, DataType, StudyDesign};

pub const FAS: &str = "FAS";
pub const MITT: &str = "mITT";
pub const PPS: &str = "PPS";
pub const SAF: &str = "SAF";
pub const PKS: &str = "PKS";

/// Derives the standard analysis populations for a design.
///
/// FAS, PPS, SAF and PKS are always defined; the mITT is added (not
/// substituted) when the study has a run-in period. Output order is
/// FAS, mITT, PPS, SAF, PKS.
pub fn generate(
    study_design: StudyDesign,
    has_run_in: bool,
    has_safety_follow_up: bool,
    primary_endpoint_type: Option<DataType>,
) -> Vec<AnalysisSet> {
    let mut sets = vec![full_analysis_set(study_design, primary_endpoint_type)];
    if has_run_in {
        sets.push(modified_itt_set(study_design));
    }
    let pps_parent = if has_run_in { MITT } else { FAS };
    sets.push(per_protocol_set(study_design, pps_parent, primary_endpoint_type));
    sets.push(safety_set(study_design, has_safety_follow_up));
    sets.push(pharmacokinetic_set());

    for set in &sets {
        debug!(
            abbreviation = %set.abbreviation,
            primary_use = %set.primary_use,
            criteria = set.inclusion_criteria.len(),
            "generated analysis set"
        );
    }
    info!(
        design = %study_design,
        run_in = has_run_in,
        sets = sets.len(),
        "generated analysis sets"
    );
    sets
}

/// "randomized" for randomized designs, "enrolled" for single-arm studies.
fn entry_verb(study_design: StudyDesign) -> &'static str {
    if study_design.is_randomized() {
        "randomized"
    } else {
        "enrolled"
    }
}

fn capitalized(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn full_analysis_set(
    study_design: StudyDesign,
    primary_endpoint_type: Option<DataType>,
) -> AnalysisSet {
    let verb = entry_verb(study_design);
    let grouping = if study_design.is_randomized() {
        "analysed according to the treatment assigned at randomization"
    } else {
        "analysed as a single treatment group"
    };

    let mut inclusion = vec![
        format!("{} into the study", capitalized(verb)),
        format!("Received at least one dose of study treatment (member of the {SAF})"),
    ];
    if let Some(requirement) = primary_endpoint_type.map(fas_endpoint_requirement) {
        inclusion.push(requirement.to_string());
    }

    AnalysisSet {
        name: "Full Analysis Set".to_string(),
        abbreviation: FAS.to_string(),
        description: format!(
            "All {verb} subjects who received at least one dose of study treatment (members of the {SAF}), {grouping}."
        ),
        inclusion_criteria: inclusion,
        exclusion_criteria: vec![
            format!("{} but never received study treatment", capitalized(verb)),
            format!("Failed a major entry criterion that was objectively verifiable before being {verb}"),
        ],
        primary_use: AnalysisSetUse::PrimaryEfficacy,
        regulatory_note: "ICH E9: the FAS follows the intention-to-treat principle as closely as possible and is the primary population for efficacy.".to_string(),
    }
}

fn fas_endpoint_requirement(data_type: DataType) -> &'static str {
    match data_type {
        DataType::Continuous | DataType::Ordinal => {
            "Has a baseline assessment and at least one post-baseline assessment of the primary endpoint"
        }
        DataType::TimeToEvent => {
            "Subjects without an event are retained and censored at the date of their last adequate assessment"
        }
        DataType::Binary => {
            "Subjects without an evaluable primary response are retained and counted as non-responders"
        }
        DataType::Count => {
            "Has at least one post-baseline observation period for the primary endpoint"
        }
    }
}

fn modified_itt_set(study_design: StudyDesign) -> AnalysisSet {
    let verb = entry_verb(study_design);
    AnalysisSet {
        name: "Modified Intent-to-Treat Set".to_string(),
        abbreviation: MITT.to_string(),
        description: format!(
            "Subjects in the {FAS} who completed the run-in period and were {verb} to double-blind treatment."
        ),
        inclusion_criteria: vec![
            format!("Member of the {FAS}"),
            "Completed the run-in period per protocol".to_string(),
            format!("Subsequently {verb} to double-blind treatment"),
        ],
        exclusion_criteria: vec!["Discontinued or failed eligibility during the run-in period".to_string()],
        primary_use: AnalysisSetUse::SupportiveEfficacy,
        regulatory_note: format!(
            "Supportive to the {FAS}; any exclusion relative to the {FAS} must be justified and pre-specified."
        ),
    }
}

fn per_protocol_set(
    study_design: StudyDesign,
    parent: &str,
    primary_endpoint_type: Option<DataType>,
) -> AnalysisSet {
    let mut inclusion = vec![
        format!("Member of the {parent}"),
        "No major protocol deviation affecting the primary endpoint".to_string(),
        "Treatment compliance between 80% and 120% of planned doses".to_string(),
    ];
    let mut exclusion =
        vec!["Major protocol deviation identified in blinded review before database lock".to_string()];

    if study_design == StudyDesign::Crossover {
        inclusion.push("Completed all treatment periods including the washout between periods".to_string());
        exclusion.push("Missed a treatment period or violated the washout requirement".to_string());
    }
    if let Some(requirement) = primary_endpoint_type.map(pps_endpoint_requirement) {
        inclusion.push(requirement.to_string());
    }

    AnalysisSet {
        name: "Per-Protocol Set".to_string(),
        abbreviation: PPS.to_string(),
        description: format!(
            "Subjects in the {parent} who complied with the protocol without major deviations affecting the primary endpoint."
        ),
        inclusion_criteria: inclusion,
        exclusion_criteria: exclusion,
        primary_use: AnalysisSetUse::PerProtocol,
        regulatory_note: "Sensitivity population for the primary analysis; of particular weight for non-inferiority and equivalence conclusions.".to_string(),
    }
}

fn pps_endpoint_requirement(data_type: DataType) -> &'static str {
    match data_type {
        DataType::Continuous | DataType::Ordinal | DataType::Count => {
            "Primary endpoint assessed within the protocol-defined visit window"
        }
        DataType::TimeToEvent => {
            "Followed under protocol until the event or the planned end of follow-up"
        }
        DataType::Binary => "Primary response assessed without imputation of non-response",
    }
}

fn safety_set(study_design: StudyDesign, has_safety_follow_up: bool) -> AnalysisSet {
    let verb = entry_verb(study_design);
    let mut description = format!(
        "All {verb} subjects who received at least one dose of study treatment, analysed according to the treatment actually received."
    );
    let mut inclusion = vec!["Received at least one dose of study treatment".to_string()];
    if has_safety_follow_up {
        description.push_str(
            " Safety data are collected through the end of the post-treatment safety follow-up period.",
        );
        inclusion.push(
            "Adverse events and safety assessments recorded through the end of safety follow-up"
                .to_string(),
        );
    }

    AnalysisSet {
        name: "Safety Set".to_string(),
        abbreviation: SAF.to_string(),
        description,
        inclusion_criteria: inclusion,
        exclusion_criteria: vec!["Never received study treatment".to_string()],
        primary_use: AnalysisSetUse::Safety,
        regulatory_note: "ICH E9 / E3: all safety summaries are based on the treatment actually received.".to_string(),
    }
}

fn pharmacokinetic_set() -> AnalysisSet {
    AnalysisSet {
        name: "Pharmacokinetic Set".to_string(),
        abbreviation: PKS.to_string(),
        description: format!(
            "Subjects in the {SAF} with at least one quantifiable post-dose drug concentration."
        ),
        inclusion_criteria: vec![
            format!("Member of the {SAF}"),
            "At least one quantifiable post-dose concentration".to_string(),
        ],
        exclusion_criteria: vec![
            "Dosing or sampling deviation that precludes concentration evaluation".to_string(),
        ],
        primary_use: AnalysisSetUse::Pharmacokinetic,
        regulatory_note: "Definition always generated; populated only when pharmacokinetic sampling is performed.".to_string(),
    }
}
