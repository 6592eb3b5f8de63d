//! Type-safe enumerations for endpoint and trial-design metadata.
//!
//! Trial designs arrive as text. Each enum parses the spellings commonly
//! found in protocol synopses (case-insensitive, `-`/space/`_` agnostic) and
//! serializes to the canonical snake_case identifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lowercase and fold separators so `Time-to-Event`, `time to event` and
/// `time_to_event` compare equal.
pub(crate) fn normalize_token(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '-' || c == ' ' { '_' } else { c })
        .collect()
}

/// Role of an endpoint in the trial's hypothesis hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointType {
    /// Confirmatory endpoint the trial is powered for.
    Primary,
    /// Supportive confirmatory or descriptive endpoint.
    Secondary,
    /// Hypothesis-generating endpoint.
    Exploratory,
}

impl EndpointType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointType::Primary => "primary",
            EndpointType::Secondary => "secondary",
            EndpointType::Exploratory => "exploratory",
        }
    }

    /// Title-case label used in narrative text.
    pub fn label(&self) -> &'static str {
        match self {
            EndpointType::Primary => "Primary",
            EndpointType::Secondary => "Secondary",
            EndpointType::Exploratory => "Exploratory",
        }
    }
}

impl fmt::Display for EndpointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EndpointType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "primary" => Ok(EndpointType::Primary),
            "secondary" | "key_secondary" => Ok(EndpointType::Secondary),
            "exploratory" | "tertiary" => Ok(EndpointType::Exploratory),
            _ => Err(format!("Unknown endpoint type: {s}")),
        }
    }
}

/// Measurement scale of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum DataType {
    Continuous,
    Binary,
    Count,
    Ordinal,
    TimeToEvent,
}

impl DataType {
    pub const ALL: [DataType; 5] = [
        DataType::Continuous,
        DataType::Binary,
        DataType::Count,
        DataType::Ordinal,
        DataType::TimeToEvent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Continuous => "continuous",
            DataType::Binary => "binary",
            DataType::Count => "count",
            DataType::Ordinal => "ordinal",
            DataType::TimeToEvent => "time_to_event",
        }
    }

    /// Human-readable label used in narrative text.
    pub fn label(&self) -> &'static str {
        match self {
            DataType::Continuous => "continuous",
            DataType::Binary => "binary",
            DataType::Count => "count",
            DataType::Ordinal => "ordinal",
            DataType::TimeToEvent => "time-to-event",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "continuous" | "numeric" | "interval" => Ok(DataType::Continuous),
            "binary" | "dichotomous" | "responder" => Ok(DataType::Binary),
            "count" | "rate" | "event_count" => Ok(DataType::Count),
            "ordinal" | "ordered_categorical" | "likert" => Ok(DataType::Ordinal),
            "time_to_event" | "tte" | "survival" => Ok(DataType::TimeToEvent),
            _ => Err(format!("Unknown data type: {s}")),
        }
    }
}

impl TryFrom<String> for DataType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Type of comparison the trial is designed to demonstrate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hypothesis {
    Superiority,
    NonInferiority,
    Equivalence,
}

impl Hypothesis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Hypothesis::Superiority => "superiority",
            Hypothesis::NonInferiority => "non_inferiority",
            Hypothesis::Equivalence => "equivalence",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Hypothesis::Superiority => "superiority",
            Hypothesis::NonInferiority => "non-inferiority",
            Hypothesis::Equivalence => "equivalence",
        }
    }
}

impl fmt::Display for Hypothesis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Hypothesis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "superiority" => Ok(Hypothesis::Superiority),
            "non_inferiority" | "noninferiority" | "ni" => Ok(Hypothesis::NonInferiority),
            "equivalence" | "bioequivalence" => Ok(Hypothesis::Equivalence),
            _ => Err(format!("Unknown hypothesis: {s}")),
        }
    }
}

/// Sidedness of the hypothesis test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sidedness {
    OneSided,
    TwoSided,
}

impl Sidedness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sidedness::OneSided => "one_sided",
            Sidedness::TwoSided => "two_sided",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sidedness::OneSided => "one-sided",
            Sidedness::TwoSided => "two-sided",
        }
    }
}

impl fmt::Display for Sidedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Sidedness {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "one_sided" | "onesided" | "one_tailed" => Ok(Sidedness::OneSided),
            "two_sided" | "twosided" | "two_tailed" => Ok(Sidedness::TwoSided),
            _ => Err(format!("Unknown sidedness: {s}")),
        }
    }
}

/// How many groups the endpoint compares and whether observations are paired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonCardinality {
    TwoGroup,
    MultiGroup,
    SingleGroupPaired,
}

impl ComparisonCardinality {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonCardinality::TwoGroup => "two_group",
            ComparisonCardinality::MultiGroup => "multi_group",
            ComparisonCardinality::SingleGroupPaired => "single_group_paired",
        }
    }
}

impl fmt::Display for ComparisonCardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Distributional assumption the analysis can rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionAssumption {
    Parametric,
    Nonparametric,
    Unspecified,
}

impl DistributionAssumption {
    pub fn as_str(&self) -> &'static str {
        match self {
            DistributionAssumption::Parametric => "parametric",
            DistributionAssumption::Nonparametric => "nonparametric",
            DistributionAssumption::Unspecified => "unspecified",
        }
    }
}

impl fmt::Display for DistributionAssumption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Overall trial design.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum StudyDesign {
    #[default]
    ParallelGroup,
    Crossover,
    SingleArm,
    Factorial,
}

impl StudyDesign {
    pub fn as_str(&self) -> &'static str {
        match self {
            StudyDesign::ParallelGroup => "parallel_group",
            StudyDesign::Crossover => "crossover",
            StudyDesign::SingleArm => "single_arm",
            StudyDesign::Factorial => "factorial",
        }
    }

    /// True when subjects are allocated to treatment by randomization.
    pub fn is_randomized(&self) -> bool {
        !matches!(self, StudyDesign::SingleArm)
    }
}

impl fmt::Display for StudyDesign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StudyDesign {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "parallel_group" | "parallel" => Ok(StudyDesign::ParallelGroup),
            "crossover" | "cross_over" => Ok(StudyDesign::Crossover),
            "single_arm" | "single_group" | "open_label_single_arm" => Ok(StudyDesign::SingleArm),
            "factorial" => Ok(StudyDesign::Factorial),
            _ => Err(format!("Unknown study design: {s}")),
        }
    }
}

impl TryFrom<String> for StudyDesign {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_type_accepts_aliases() {
        assert_eq!(
            "Time-to-Event".parse::<DataType>().unwrap(),
            DataType::TimeToEvent
        );
        assert_eq!("survival".parse::<DataType>().unwrap(), DataType::TimeToEvent);
        assert_eq!("BINARY".parse::<DataType>().unwrap(), DataType::Binary);
        assert!("categorical".parse::<DataType>().is_err());
    }

    #[test]
    fn hypothesis_accepts_spacing_variants() {
        assert_eq!(
            "non-inferiority".parse::<Hypothesis>().unwrap(),
            Hypothesis::NonInferiority
        );
        assert_eq!(
            "Non Inferiority".parse::<Hypothesis>().unwrap(),
            Hypothesis::NonInferiority
        );
        assert_eq!(
            "equivalence".parse::<Hypothesis>().unwrap(),
            Hypothesis::Equivalence
        );
    }

    #[test]
    fn sidedness_parses_its_own_code() {
        for sided in [Sidedness::OneSided, Sidedness::TwoSided] {
            assert_eq!(sided.as_str().parse::<Sidedness>().unwrap(), sided);
        }
    }

    #[test]
    fn single_arm_is_not_randomized() {
        assert!(!StudyDesign::SingleArm.is_randomized());
        assert!(StudyDesign::Crossover.is_randomized());
    }

    #[test]
    fn study_design_deserializes_loosely() {
        let design: StudyDesign = serde_json::from_str(r#""parallel""#).unwrap();
        assert_eq!(design, StudyDesign::ParallelGroup);
        let design: StudyDesign = serde_json::from_str(r#""Single-Arm""#).unwrap();
        assert_eq!(design, StudyDesign::SingleArm);
        assert_eq!(
            serde_json::to_string(&StudyDesign::ParallelGroup).unwrap(),
            r#""parallel_group""#
        );
        assert!(serde_json::from_str::<StudyDesign>(r#""adaptive""#).is_err());
    }
}
