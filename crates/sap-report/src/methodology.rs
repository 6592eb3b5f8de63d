//! Statistical methodology section.

use sap_model::{Endpoint, EndpointType, MappingResult, StatisticalMethod};

use crate::section::{Block, Section, Subsection};

pub const METHODOLOGY_HEADING: &str = "Statistical Methodology";
pub const MULTIPLICITY_HEADING: &str = "Multiplicity";

/// Describes the analysis of one endpoint as a subsection.
pub fn method_description(endpoint: &Endpoint, method: &StatisticalMethod) -> Subsection {
    let subject = if endpoint.description.is_empty() {
        endpoint.name.clone()
    } else {
        endpoint.description.clone()
    };

    let mut subsection = Subsection::new(format!(
        "{} ({} endpoint)",
        endpoint.name,
        endpoint.endpoint_type.label()
    ))
    .with_block(Block::field(
        "Endpoint",
        format!("{subject} ({})", endpoint.data_type.label()),
    ))
    .with_block(Block::field(
        "Hypothesis",
        format!(
            "{}, {}",
            endpoint.effective_hypothesis().label(),
            endpoint.effective_sided().label()
        ),
    ))
    .with_block(Block::field("Analysis method", method.description.clone()));

    if let Some(covariates) = &method.covariates {
        subsection = subsection.with_block(Block::field(
            "Covariates",
            covariates.iter().cloned().collect::<Vec<_>>().join(", "),
        ));
    }
    if let Some(strata) = &method.stratification_factors {
        subsection = subsection.with_block(Block::field(
            "Stratification factors",
            strata.iter().cloned().collect::<Vec<_>>().join(", "),
        ));
    }
    if !method.assumptions.is_empty() {
        subsection = subsection.with_block(Block::field_list(
            "Assumptions",
            method.assumptions.clone(),
        ));
    }
    subsection
}

/// Builds the methodology section, primary endpoints first.
pub fn methodology_section(results: &[MappingResult]) -> Section {
    let mut section = Section::new(METHODOLOGY_HEADING);
    if results.is_empty() {
        return section.with_block(Block::paragraph(
            "No endpoints have been defined for analysis.",
        ));
    }

    section = section.with_block(Block::paragraph(
        "The statistical method for each endpoint is pre-specified below. Primary endpoints are presented first, followed by secondary and exploratory endpoints.",
    ));
    for endpoint_type in [
        EndpointType::Primary,
        EndpointType::Secondary,
        EndpointType::Exploratory,
    ] {
        for result in results
            .iter()
            .filter(|r| r.endpoint.endpoint_type == endpoint_type)
        {
            section = section.with_subsection(method_description(
                &result.endpoint,
                &result.statistical_method,
            ));
        }
    }

    if let Some(multiplicity) = multiplicity(results) {
        section = section.with_subsection(multiplicity);
    }
    section
}

fn multiplicity(results: &[MappingResult]) -> Option<Subsection> {
    let count = |endpoint_type: EndpointType| {
        results
            .iter()
            .filter(|r| r.endpoint.endpoint_type == endpoint_type)
            .count()
    };
    let primary = count(EndpointType::Primary);
    let secondary = count(EndpointType::Secondary);
    let exploratory = count(EndpointType::Exploratory);
    if primary <= 1 && secondary == 0 {
        return None;
    }

    let mut subsection = Subsection::new(MULTIPLICITY_HEADING);
    if primary > 1 {
        subsection = subsection.with_block(Block::paragraph(format!(
            "The study has {primary} primary endpoints. The family-wise type I error rate is controlled at the nominal level across the primary hypotheses using a pre-specified procedure (for example Hochberg or a graphical approach)."
        )));
    }
    if secondary > 0 {
        subsection = subsection.with_block(Block::paragraph(
            "Secondary endpoints are tested in a fixed hierarchical order, only after the primary hypothesis (or hypotheses) has been rejected, to preserve the family-wise type I error rate.",
        ));
    }
    if exploratory > 0 {
        subsection = subsection.with_block(Block::paragraph(
            "Exploratory endpoints are not adjusted for multiplicity; nominal p-values are descriptive only.",
        ));
    }
    Some(subsection)
}
