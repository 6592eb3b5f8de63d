//! Endpoint definitions.
//!
//! An [`Endpoint`] is built from an [`EndpointRecord`] (the loosely typed
//! shape a trial-design document provides). Conversion fails fast only when
//! the record cannot identify or classify the endpoint at all: a missing
//! `name`, or a `dataType` that is missing or names no supported scale.
//! Anything else that cannot be resolved is carried as `None` (or, for an
//! unrecognized `type`, as exploratory) and surfaces later as a validation
//! issue.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::enums::{DataType, EndpointType, Hypothesis, Sidedness};
use crate::error::{ModelError, Result};

/// Raw endpoint record as supplied by the trial design.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EndpointRecord {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub endpoint_type: Option<String>,
    pub data_type: Option<String>,
    pub hypothesis: Option<String>,
    pub sided: Option<String>,
    pub paired: bool,
    pub covariates: Vec<String>,
    pub stratification_factors: Vec<String>,
    pub arms: Option<u32>,
    pub expected_n_per_arm: Option<u32>,
    pub expected_response_rate: Option<f64>,
    pub non_normal: bool,
    pub repeated_measures: bool,
    pub overdispersed: bool,
}

/// A declared trial endpoint. Identity is by `name` within one design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "EndpointRecord")]
pub struct Endpoint {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub endpoint_type: EndpointType,
    pub data_type: DataType,
    /// `None` when the design did not state (or misspelled) the hypothesis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hypothesis: Option<Hypothesis>,
    /// `None` when the design did not state the sidedness.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sided: Option<Sidedness>,
    pub paired: bool,
    pub covariates: BTreeSet<String>,
    pub stratification_factors: BTreeSet<String>,
    /// Number of compared arms, when stated explicitly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_n_per_arm: Option<u32>,
    /// Expected control-arm response proportion for binary endpoints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_response_rate: Option<f64>,
    pub non_normal: bool,
    pub repeated_measures: bool,
    pub overdispersed: bool,
    /// Type text the design gave that named no endpoint type.
    #[serde(skip)]
    pub unrecognized_type: Option<String>,
}

impl Endpoint {
    /// Creates an endpoint with the required attributes and no hints.
    pub fn new(name: impl Into<String>, endpoint_type: EndpointType, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            endpoint_type,
            data_type,
            hypothesis: None,
            sided: None,
            paired: false,
            covariates: BTreeSet::new(),
            stratification_factors: BTreeSet::new(),
            arms: None,
            expected_n_per_arm: None,
            expected_response_rate: None,
            non_normal: false,
            repeated_measures: false,
            overdispersed: false,
            unrecognized_type: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_hypothesis(mut self, hypothesis: Hypothesis) -> Self {
        self.hypothesis = Some(hypothesis);
        self
    }

    #[must_use]
    pub fn with_sided(mut self, sided: Sidedness) -> Self {
        self.sided = Some(sided);
        self
    }

    #[must_use]
    pub fn with_paired(mut self, paired: bool) -> Self {
        self.paired = paired;
        self
    }

    #[must_use]
    pub fn with_covariates<I, S>(mut self, covariates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.covariates = covariates.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_stratification_factors<I, S>(mut self, factors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stratification_factors = factors.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_arms(mut self, arms: u32) -> Self {
        self.arms = Some(arms);
        self
    }

    #[must_use]
    pub fn with_expected_n_per_arm(mut self, n: u32) -> Self {
        self.expected_n_per_arm = Some(n);
        self
    }

    #[must_use]
    pub fn with_expected_response_rate(mut self, rate: f64) -> Self {
        self.expected_response_rate = Some(rate);
        self
    }

    #[must_use]
    pub fn with_non_normal(mut self, non_normal: bool) -> Self {
        self.non_normal = non_normal;
        self
    }

    #[must_use]
    pub fn with_repeated_measures(mut self, repeated: bool) -> Self {
        self.repeated_measures = repeated;
        self
    }

    #[must_use]
    pub fn with_overdispersed(mut self, overdispersed: bool) -> Self {
        self.overdispersed = overdispersed;
        self
    }

    pub fn is_primary(&self) -> bool {
        self.endpoint_type == EndpointType::Primary
    }

    /// Hypothesis used for test selection; superiority when unstated.
    pub fn effective_hypothesis(&self) -> Hypothesis {
        self.hypothesis.unwrap_or(Hypothesis::Superiority)
    }

    /// Sidedness used for test selection; two-sided when unstated.
    pub fn effective_sided(&self) -> Sidedness {
        self.sided.unwrap_or(Sidedness::TwoSided)
    }
}

impl TryFrom<EndpointRecord> for Endpoint {
    type Error = ModelError;

    fn try_from(record: EndpointRecord) -> Result<Self> {
        let name = non_blank(record.name).ok_or(ModelError::MissingField { field: "name" })?;
        let data_type_text =
            non_blank(record.data_type).ok_or(ModelError::MissingField { field: "dataType" })?;
        let data_type =
            data_type_text
                .parse::<DataType>()
                .map_err(|_| ModelError::UnknownDataType {
                    endpoint: name.clone(),
                    value: data_type_text.clone(),
                })?;
        let (endpoint_type, unrecognized_type) = match non_blank(record.endpoint_type) {
            Some(text) => match text.parse::<EndpointType>() {
                Ok(endpoint_type) => (endpoint_type, None),
                Err(_) => (EndpointType::Exploratory, Some(text)),
            },
            None => (EndpointType::Exploratory, None),
        };

        Ok(Self {
            name,
            description: record.description.unwrap_or_default().trim().to_string(),
            endpoint_type,
            data_type,
            hypothesis: non_blank(record.hypothesis).and_then(|h| h.parse().ok()),
            sided: non_blank(record.sided).and_then(|s| s.parse().ok()),
            paired: record.paired,
            covariates: clean_set(record.covariates),
            stratification_factors: clean_set(record.stratification_factors),
            arms: record.arms,
            expected_n_per_arm: record.expected_n_per_arm,
            expected_response_rate: record.expected_response_rate,
            non_normal: record.non_normal,
            repeated_measures: record.repeated_measures,
            overdispersed: record.overdispersed,
            unrecognized_type,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn clean_set(values: Vec<String>) -> BTreeSet<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: Option<&str>, data_type: Option<&str>) -> EndpointRecord {
        EndpointRecord {
            name: name.map(str::to_string),
            data_type: data_type.map(str::to_string),
            ..EndpointRecord::default()
        }
    }

    #[test]
    fn missing_name_fails_fast() {
        let err = Endpoint::try_from(record(None, Some("binary"))).unwrap_err();
        assert_eq!(err, ModelError::MissingField { field: "name" });

        let err = Endpoint::try_from(record(Some("   "), Some("binary"))).unwrap_err();
        assert_eq!(err, ModelError::MissingField { field: "name" });
    }

    #[test]
    fn missing_data_type_fails_fast() {
        let err = Endpoint::try_from(record(Some("Mortality"), None)).unwrap_err();
        assert_eq!(err, ModelError::MissingField { field: "dataType" });
    }

    #[test]
    fn unknown_data_type_fails_fast() {
        let err = Endpoint::try_from(record(Some("Mortality"), Some("categorical"))).unwrap_err();
        assert!(matches!(err, ModelError::UnknownDataType { .. }));
    }

    #[test]
    fn unrecognized_type_falls_back_to_exploratory() {
        let mut raw = record(Some("OS"), Some("time_to_event"));
        raw.endpoint_type = Some("co-primary".to_string());
        let endpoint = Endpoint::try_from(raw).unwrap();
        assert_eq!(endpoint.endpoint_type, EndpointType::Exploratory);
        assert_eq!(endpoint.unrecognized_type.as_deref(), Some("co-primary"));
        assert!(!endpoint.is_primary());
    }

    #[test]
    fn missing_type_defaults_quietly() {
        let endpoint = Endpoint::try_from(record(Some("OS"), Some("time_to_event"))).unwrap();
        assert_eq!(endpoint.endpoint_type, EndpointType::Exploratory);
        assert_eq!(endpoint.unrecognized_type, None);

        let mut raw = record(Some("OS"), Some("time_to_event"));
        raw.endpoint_type = Some(" Primary ".to_string());
        let endpoint = Endpoint::try_from(raw).unwrap();
        assert_eq!(endpoint.endpoint_type, EndpointType::Primary);
        assert_eq!(endpoint.unrecognized_type, None);
    }

    #[test]
    fn unresolved_hypothesis_is_carried_as_none() {
        let mut raw = record(Some("FEV1"), Some("continuous"));
        raw.hypothesis = Some("better than placebo".to_string());
        raw.sided = Some("two-sided".to_string());
        let endpoint = Endpoint::try_from(raw).unwrap();
        assert_eq!(endpoint.hypothesis, None);
        assert_eq!(endpoint.sided, Some(Sidedness::TwoSided));
        assert_eq!(endpoint.effective_hypothesis(), Hypothesis::Superiority);
    }

    #[test]
    fn covariates_are_trimmed_and_deduplicated() {
        let mut raw = record(Some("FEV1"), Some("continuous"));
        raw.covariates = vec![" age ".to_string(), "age".to_string(), String::new()];
        let endpoint = Endpoint::try_from(raw).unwrap();
        assert_eq!(endpoint.covariates.len(), 1);
        assert!(endpoint.covariates.contains("age"));
    }
}
