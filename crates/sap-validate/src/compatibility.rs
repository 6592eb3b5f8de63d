//! Sample-size method to endpoint data type compatibility.

use sap_model::{DataType, SampleSizeMethod};

/// Data types each sample-size method can power. `Unknown` has no entry.
const COMPATIBILITY: &[(SampleSizeMethod, &[DataType])] = &[
    (SampleSizeMethod::TwoSampleTTest, &[DataType::Continuous]),
    (SampleSizeMethod::PairedTTest, &[DataType::Continuous]),
    (SampleSizeMethod::Ancova, &[DataType::Continuous]),
    (
        SampleSizeMethod::WilcoxonRankSum,
        &[DataType::Continuous, DataType::Ordinal, DataType::Count],
    ),
    (SampleSizeMethod::TwoProportionTest, &[DataType::Binary]),
    (SampleSizeMethod::FisherExactTest, &[DataType::Binary]),
    (SampleSizeMethod::McnemarTest, &[DataType::Binary]),
    (SampleSizeMethod::LogRankTest, &[DataType::TimeToEvent]),
    (SampleSizeMethod::PoissonRegression, &[DataType::Count]),
    (SampleSizeMethod::NegativeBinomial, &[DataType::Count]),
    (SampleSizeMethod::ProportionalOdds, &[DataType::Ordinal]),
];

/// Data types the method can power; `None` for an unrecognized method.
pub fn compatible_data_types(method: SampleSizeMethod) -> Option<&'static [DataType]> {
    COMPATIBILITY
        .iter()
        .find(|(entry, _)| *entry == method)
        .map(|(_, data_types)| *data_types)
}

pub fn is_compatible(method: SampleSizeMethod, data_type: DataType) -> bool {
    compatible_data_types(method).is_some_and(|types| types.contains(&data_type))
}
