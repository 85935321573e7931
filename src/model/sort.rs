// src/model/sort.rs
use serde::{Deserialize, Serialize};

/// A sort rule carried into the result spec.
///
/// Serializes in the wire shape (`{"attributeSortItem": {...}}`), so the same
/// value is used in the declarative and the compiled request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SortItem {
    AttributeSortItem {
        attribute_identifier: String,
        direction: SortDirection,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        aggregation: Option<SortAggregation>,
    },
    MeasureSortItem {
        direction: SortDirection,
        locators: Vec<Locator>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Sort attribute elements by the aggregated value of all measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortAggregation {
    Sum,
}

/// Points a measure sort at one column of the result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Locator {
    AttributeLocatorItem {
        attribute_identifier: String,
        element: String,
    },
    MeasureLocatorItem {
        measure_identifier: String,
    },
}

impl SortItem {
    pub fn attribute(attribute_identifier: impl Into<String>, direction: SortDirection) -> Self {
        Self::AttributeSortItem {
            attribute_identifier: attribute_identifier.into(),
            direction,
            aggregation: None,
        }
    }

    /// Measure sort with a single measure locator.
    pub fn measure(measure_identifier: impl Into<String>, direction: SortDirection) -> Self {
        Self::MeasureSortItem {
            direction,
            locators: vec![Locator::MeasureLocatorItem {
                measure_identifier: measure_identifier.into(),
            }],
        }
    }

    /// Prepend an attribute locator to a measure sort. No effect on attribute sorts.
    pub fn with_attribute_locator(
        mut self,
        attribute_identifier: impl Into<String>,
        element: impl Into<String>,
    ) -> Self {
        if let SortItem::MeasureSortItem { locators, .. } = &mut self {
            let position = locators
                .iter()
                .position(|l| matches!(l, Locator::MeasureLocatorItem { .. }))
                .unwrap_or(locators.len());
            locators.insert(
                position,
                Locator::AttributeLocatorItem {
                    attribute_identifier: attribute_identifier.into(),
                    element: element.into(),
                },
            );
        }
        self
    }

    /// Local identifiers this sort item refers to.
    pub fn referenced_identifiers(&self) -> Vec<&str> {
        match self {
            SortItem::AttributeSortItem {
                attribute_identifier,
                ..
            } => vec![attribute_identifier.as_str()],
            SortItem::MeasureSortItem { locators, .. } => locators
                .iter()
                .map(|locator| match locator {
                    Locator::AttributeLocatorItem {
                        attribute_identifier,
                        ..
                    } => attribute_identifier.as_str(),
                    Locator::MeasureLocatorItem { measure_identifier } => {
                        measure_identifier.as_str()
                    }
                })
                .collect(),
        }
    }
}
