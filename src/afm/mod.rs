//! Wire-level execution request ("AFM" plus result spec).
//!
//! These types mirror what the transport collaborator submits to the backend:
//!
//! ```text
//! {
//!   "afm": { "attributes": [...], "measures": [...], "filters": [...] },
//!   "resultSpec": { "dimensions": [...], "sorts": [...] }
//! }
//! ```
//!
//! Values are produced by [`crate::execution::ExecutionDefinition::to_execution`]
//! and are never built by hand in normal use.

use serde::{Deserialize, Serialize};

use crate::dimensions::Dimension;
use crate::filter::convert_filters;
use crate::model::{
    Aggregation, ArithmeticOperator, Attribute, AttributeElements, DateGranularity, Derivation,
    Measure, MeasureDefinition, MeasureValueCondition, ObjRef, ObjRefInScope,
    PreviousPeriodDataSet, SortItem,
};

/// A complete execution request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Execution {
    pub afm: Afm,
    pub result_spec: ResultSpec,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Afm {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AfmAttribute>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub measures: Vec<AfmMeasure>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<AfmFilter>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSpec {
    #[serde(default)]
    pub dimensions: Vec<Dimension>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sorts: Vec<SortItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AfmAttribute {
    pub local_identifier: String,
    pub display_form: ObjRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AfmMeasure {
    pub local_identifier: String,
    pub definition: AfmMeasureDefinition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl AfmMeasure {
    pub fn compute_ratio(&self) -> bool {
        match &self.definition {
            AfmMeasureDefinition::Measure { compute_ratio, .. }
            | AfmMeasureDefinition::PopMeasure { compute_ratio, .. }
            | AfmMeasureDefinition::PreviousPeriodMeasure { compute_ratio, .. }
            | AfmMeasureDefinition::ArithmeticMeasure { compute_ratio, .. } => *compute_ratio,
        }
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum AfmMeasureDefinition {
    Measure {
        item: ObjRef,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        aggregation: Option<Aggregation>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        filters: Vec<AfmFilter>,
        #[serde(default, skip_serializing_if = "is_false")]
        compute_ratio: bool,
    },
    PopMeasure {
        measure_identifier: String,
        pop_attribute: ObjRef,
        #[serde(default, skip_serializing_if = "is_false")]
        compute_ratio: bool,
    },
    PreviousPeriodMeasure {
        measure_identifier: String,
        date_data_sets: Vec<PreviousPeriodDataSet>,
        #[serde(default, skip_serializing_if = "is_false")]
        compute_ratio: bool,
    },
    ArithmeticMeasure {
        measure_identifiers: Vec<String>,
        operator: ArithmeticOperator,
        #[serde(default, skip_serializing_if = "is_false")]
        compute_ratio: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum AfmFilter {
    PositiveAttributeFilter {
        display_form: ObjRef,
        #[serde(rename = "in")]
        in_elements: Vec<String>,
        #[serde(default, skip_serializing_if = "is_false")]
        text_filter: bool,
    },
    NegativeAttributeFilter {
        display_form: ObjRef,
        not_in: Vec<String>,
        #[serde(default, skip_serializing_if = "is_false")]
        text_filter: bool,
    },
    AbsoluteDateFilter {
        data_set: ObjRef,
        from: String,
        to: String,
    },
    RelativeDateFilter {
        data_set: ObjRef,
        granularity: DateGranularity,
        from: i32,
        to: i32,
    },
    MeasureValueFilter {
        measure: ObjRefInScope,
        condition: MeasureValueCondition,
    },
}

impl AfmFilter {
    /// The display form or data set this filter constrains, if any.
    pub fn target(&self) -> Option<&ObjRef> {
        match self {
            AfmFilter::PositiveAttributeFilter { display_form, .. }
            | AfmFilter::NegativeAttributeFilter { display_form, .. } => Some(display_form),
            AfmFilter::AbsoluteDateFilter { data_set, .. }
            | AfmFilter::RelativeDateFilter { data_set, .. } => Some(data_set),
            AfmFilter::MeasureValueFilter { .. } => None,
        }
    }

    /// Split attribute elements into the wire list and its text flag.
    pub(crate) fn elements(elements: &AttributeElements) -> (Vec<String>, bool) {
        (elements.items().to_vec(), elements.is_textual())
    }
}

impl From<&Attribute> for AfmAttribute {
    fn from(attribute: &Attribute) -> Self {
        Self {
            local_identifier: attribute.local_identifier.clone(),
            display_form: attribute.display_form.clone(),
            alias: attribute.alias.clone(),
        }
    }
}

impl From<&Measure> for AfmMeasure {
    fn from(measure: &Measure) -> Self {
        let compute_ratio = measure.compute_ratio;
        let definition = match &measure.definition {
            MeasureDefinition::Simple {
                item,
                aggregation,
                filters,
            } => AfmMeasureDefinition::Measure {
                item: item.clone(),
                aggregation: *aggregation,
                filters: convert_filters(filters),
                compute_ratio,
            },
            MeasureDefinition::Derived { master, derivation } => match derivation {
                Derivation::SamePeriodPreviousYear { pop_attribute } => {
                    AfmMeasureDefinition::PopMeasure {
                        measure_identifier: master.clone(),
                        pop_attribute: pop_attribute.clone(),
                        compute_ratio,
                    }
                }
                Derivation::PreviousPeriod { date_data_sets } => {
                    AfmMeasureDefinition::PreviousPeriodMeasure {
                        measure_identifier: master.clone(),
                        date_data_sets: date_data_sets.clone(),
                        compute_ratio,
                    }
                }
            },
            MeasureDefinition::Arithmetic { operator, operands } => {
                AfmMeasureDefinition::ArithmeticMeasure {
                    measure_identifiers: operands.clone(),
                    operator: *operator,
                    compute_ratio,
                }
            }
        };

        Self {
            local_identifier: measure.local_identifier.clone(),
            definition,
            alias: measure.alias.clone(),
            format: measure.format.clone(),
        }
    }
}
