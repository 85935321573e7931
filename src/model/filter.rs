//! Declarative filter model, as authored in a visualization definition.
//!
//! These values may be incomplete (a date filter without bounds, a measure
//! value filter without a condition). [`crate::filter`] decides which of them
//! carry an effective constraint and maps those to the wire model.

use serde::{Deserialize, Serialize};

use crate::model::types::{ObjRef, ObjRefInScope};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Filter {
    /// Keep only the listed elements.
    #[serde(rename_all = "camelCase")]
    PositiveAttribute {
        display_form: ObjRef,
        elements: AttributeElements,
    },
    /// Drop the listed elements.
    #[serde(rename_all = "camelCase")]
    NegativeAttribute {
        display_form: ObjRef,
        not_in: AttributeElements,
    },
    /// Fixed calendar range, inclusive. Dates are `YYYY-MM-DD`.
    #[serde(rename_all = "camelCase")]
    AbsoluteDate {
        data_set: ObjRef,
        #[serde(default)]
        from: Option<String>,
        #[serde(default)]
        to: Option<String>,
    },
    /// Range relative to today, in granularity periods (0 = current).
    #[serde(rename_all = "camelCase")]
    RelativeDate {
        data_set: ObjRef,
        granularity: DateGranularity,
        #[serde(default)]
        from: Option<i32>,
        #[serde(default)]
        to: Option<i32>,
    },
    #[serde(rename_all = "camelCase")]
    MeasureValue {
        measure: ObjRefInScope,
        #[serde(default)]
        condition: Option<MeasureValueCondition>,
    },
}

/// Attribute elements referenced either by URI or by textual value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttributeElements {
    Uris(Vec<String>),
    Values(Vec<String>),
}

impl AttributeElements {
    pub fn items(&self) -> &[String] {
        match self {
            AttributeElements::Uris(items) | AttributeElements::Values(items) => items,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    pub fn is_textual(&self) -> bool {
        matches!(self, AttributeElements::Values(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateGranularity {
    #[serde(rename = "GDC.time.date")]
    Date,
    #[serde(rename = "GDC.time.week_us")]
    Week,
    #[serde(rename = "GDC.time.month")]
    Month,
    #[serde(rename = "GDC.time.quarter")]
    Quarter,
    #[serde(rename = "GDC.time.year")]
    Year,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MeasureValueCondition {
    Comparison {
        operator: ComparisonOperator,
        value: f64,
    },
    Range {
        operator: RangeOperator,
        from: f64,
        to: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComparisonOperator {
    GreaterThan,
    GreaterThanOrEqualTo,
    LessThan,
    LessThanOrEqualTo,
    EqualTo,
    NotEqualTo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RangeOperator {
    Between,
    NotBetween,
}

impl Filter {
    pub fn positive(display_form: ObjRef, elements: AttributeElements) -> Self {
        Self::PositiveAttribute {
            display_form,
            elements,
        }
    }

    pub fn negative(display_form: ObjRef, not_in: AttributeElements) -> Self {
        Self::NegativeAttribute {
            display_form,
            not_in,
        }
    }

    pub fn absolute_date(
        data_set: ObjRef,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self::AbsoluteDate {
            data_set,
            from: Some(from.into()),
            to: Some(to.into()),
        }
    }

    pub fn relative_date(data_set: ObjRef, granularity: DateGranularity, from: i32, to: i32) -> Self {
        Self::RelativeDate {
            data_set,
            granularity,
            from: Some(from),
            to: Some(to),
        }
    }

    pub fn measure_value(measure: ObjRefInScope, condition: MeasureValueCondition) -> Self {
        Self::MeasureValue {
            measure,
            condition: Some(condition),
        }
    }
}
