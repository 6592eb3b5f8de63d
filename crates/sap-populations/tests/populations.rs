use sap_model::{AnalysisSetUse, DataType, StudyDesign};
use sap_populations::{FAS, MITT, PPS, SAF, generate, validate_analysis_sets};

#[test]
fn run_in_designs_always_carry_fas_and_mitt() {
    for design in [StudyDesign::ParallelGroup, StudyDesign::Crossover, StudyDesign::Factorial] {
        let sets = generate(design, true, false, Some(DataType::Continuous));
        let abbreviations: Vec<&str> = sets.iter().map(|s| s.abbreviation.as_str()).collect();
        assert!(abbreviations.contains(&FAS), "{design}");
        assert!(abbreviations.contains(&MITT), "{design}");
        assert!(abbreviations.contains(&SAF), "{design}");
    }
}

#[test]
fn every_design_has_exactly_one_primary_efficacy_set() {
    for run_in in [false, true] {
        let sets = generate(StudyDesign::ParallelGroup, run_in, false, None);
        let primary: Vec<&str> = sets
            .iter()
            .filter(|s| s.primary_use == AnalysisSetUse::PrimaryEfficacy)
            .map(|s| s.abbreviation.as_str())
            .collect();
        assert_eq!(primary, vec![FAS]);
    }
}

#[test]
fn analysis_sets_serialize_with_camel_case_fields() {
    let sets = generate(StudyDesign::SingleArm, false, true, Some(DataType::Binary));
    let json = serde_json::to_value(&sets).unwrap();
    assert_eq!(json[0]["abbreviation"], "FAS");
    assert_eq!(json[0]["primaryUse"], "primary_efficacy");
    assert!(json[0]["inclusionCriteria"].is_array());
    assert!(validate_analysis_sets(&sets).is_valid());
}

#[test]
fn run_in_sets_validate_and_chain_pps_through_mitt() {
    let designs = [
        StudyDesign::ParallelGroup,
        StudyDesign::Crossover,
        StudyDesign::SingleArm,
        StudyDesign::Factorial,
    ];
    let endpoint_types = DataType::ALL.into_iter().map(Some).chain([None]);
    for primary in endpoint_types {
        for design in designs {
            let sets = generate(design, true, false, primary);
            let result = validate_analysis_sets(&sets);
            assert!(result.is_valid(), "{design} {primary:?}");
            assert_eq!(result.warning_count(), 0, "{design} {primary:?}");

            let first_criterion = |abbreviation: &str| {
                sets.iter()
                    .find(|set| set.abbreviation == abbreviation)
                    .and_then(|set| set.inclusion_criteria.first())
                    .cloned()
            };
            assert_eq!(
                first_criterion(PPS),
                Some(format!("Member of the {MITT}")),
                "{design} {primary:?}"
            );
            assert_eq!(
                first_criterion(MITT),
                Some(format!("Member of the {FAS}")),
                "{design} {primary:?}"
            );
        }
    }
}
