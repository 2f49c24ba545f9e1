//! Description records assembled by the specifier.
//!
//! These are read-only snapshots, rebuilt from the declaration on every query.
//! They derive `serde` traits so renderers and exporters can consume them.

use crate::marker::MarkerSet;
use serde::{Deserialize, Serialize};

/// Name and description text of an operation or parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonDescription {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Full contract of one parameter or of a return slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiParamDescription {
    pub param_description: CommonDescription,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<i64>,
}

/// Full description of an operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMethodDescription {
    pub method_description: CommonDescription,
    pub param_descriptions: Vec<ApiParamDescription>,
    /// Present only when the return slot carries at least one marker
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_description: Option<ApiParamDescription>,
}

impl CommonDescription {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: Some(name.into()),
            description,
        }
    }

    /// An unnamed, undescribed value, used for return slots.
    pub fn unnamed() -> Self {
        Self::default()
    }
}

impl ApiParamDescription {
    /// Reads the required flag and bounds from `markers`.
    ///
    /// `required` defaults to `false` without a required marker; each bound is
    /// independently absent when the range marker is missing or leaves it unset.
    pub fn from_markers(param_description: CommonDescription, markers: &MarkerSet) -> Self {
        let (min_value, max_value) = markers.int_validation().unwrap_or((None, None));
        Self {
            param_description,
            required: markers.required().unwrap_or(false),
            min_value,
            max_value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::Marker;

    #[test]
    fn test_from_markers_defaults() {
        let desc = ApiParamDescription::from_markers(CommonDescription::unnamed(), &MarkerSet::new());
        assert!(!desc.required);
        assert_eq!(desc.min_value, None);
        assert_eq!(desc.max_value, None);
        assert_eq!(desc.param_description, CommonDescription::default());
    }

    #[test]
    fn test_from_markers_reads_one_sided_bounds() {
        let markers: MarkerSet = [
            Marker::Required(false),
            Marker::IntValidation { min: None, max: Some(10) },
        ]
        .into_iter()
        .collect();
        let desc = ApiParamDescription::from_markers(
            CommonDescription::new("count", Some("how many".to_string())),
            &markers,
        );
        assert!(!desc.required);
        assert_eq!(desc.min_value, None);
        assert_eq!(desc.max_value, Some(10));
        assert_eq!(desc.param_description.name.as_deref(), Some("count"));
    }

    #[test]
    fn test_serialized_field_names() {
        let desc = ApiMethodDescription {
            method_description: CommonDescription::new("add", None),
            param_descriptions: vec![ApiParamDescription {
                param_description: CommonDescription::new("a", None),
                required: true,
                min_value: Some(0),
                max_value: None,
            }],
            return_description: None,
        };
        let value = serde_json::to_value(&desc).unwrap();
        assert_eq!(value["methodDescription"]["name"], "add");
        assert_eq!(value["paramDescriptions"][0]["required"], true);
        assert_eq!(value["paramDescriptions"][0]["minValue"], 0);
        assert!(value["paramDescriptions"][0].get("maxValue").is_none());
        assert!(value.get("returnDescription").is_none());
    }
}
