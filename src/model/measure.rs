// src/model/measure.rs
use serde::{Deserialize, Serialize};

use crate::model::filter::Filter;
use crate::model::types::ObjRef;

/// A measure placed into a bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measure {
    /// Stable identifier within one definition
    pub local_identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Short label, preferred over the title when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Render as percent of total
    #[serde(default)]
    pub compute_ratio: bool,
    pub definition: MeasureDefinition,
}

/// What a measure computes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MeasureDefinition {
    /// Raw aggregation over a catalog fact or metric.
    #[serde(rename_all = "camelCase")]
    Simple {
        item: ObjRef,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        aggregation: Option<Aggregation>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        filters: Vec<Filter>,
    },
    /// Time-shifted transform of exactly one master measure.
    #[serde(rename_all = "camelCase")]
    Derived {
        master: String,
        derivation: Derivation,
    },
    /// Operator applied over other measures, in operand order.
    #[serde(rename_all = "camelCase")]
    Arithmetic {
        operator: ArithmeticOperator,
        operands: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    Sum,
    Count,
    Avg,
    Min,
    Max,
    Median,
    Runsum,
}

/// How a derived measure shifts its master in time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Derivation {
    /// Same period, previous year.
    #[serde(rename_all = "camelCase")]
    SamePeriodPreviousYear { pop_attribute: ObjRef },
    /// The period immediately before, per date data set.
    #[serde(rename_all = "camelCase")]
    PreviousPeriod {
        date_data_sets: Vec<PreviousPeriodDataSet>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviousPeriodDataSet {
    pub data_set: ObjRef,
    pub periods_ago: u32,
}

/// Discriminant of [`Derivation`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DerivationKind {
    SamePeriodPreviousYear,
    PreviousPeriod,
}

impl Derivation {
    pub fn kind(&self) -> DerivationKind {
        match self {
            Derivation::SamePeriodPreviousYear { .. } => DerivationKind::SamePeriodPreviousYear,
            Derivation::PreviousPeriod { .. } => DerivationKind::PreviousPeriod,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArithmeticOperator {
    Sum,
    Difference,
    Multiplication,
    Ratio,
    Change,
}

impl ArithmeticOperator {
    /// Translation key of the operator label used in generated titles.
    pub fn label_key(&self) -> &'static str {
        match self {
            ArithmeticOperator::Sum => "visualizations.measure.arithmetic.sum",
            ArithmeticOperator::Difference => "visualizations.measure.arithmetic.difference",
            ArithmeticOperator::Multiplication => {
                "visualizations.measure.arithmetic.multiplication"
            }
            ArithmeticOperator::Ratio => "visualizations.measure.arithmetic.ratio",
            ArithmeticOperator::Change => "visualizations.measure.arithmetic.change",
        }
    }
}

impl Measure {
    fn with_definition(local_identifier: impl Into<String>, definition: MeasureDefinition) -> Self {
        Self {
            local_identifier: local_identifier.into(),
            title: None,
            alias: None,
            format: None,
            compute_ratio: false,
            definition,
        }
    }

    /// A plain aggregation over `item`.
    pub fn simple(local_identifier: impl Into<String>, item: ObjRef) -> Self {
        Self::with_definition(
            local_identifier,
            MeasureDefinition::Simple {
                item,
                aggregation: None,
                filters: Vec::new(),
            },
        )
    }

    /// A measure derived from the measure identified by `master`.
    pub fn derived(
        local_identifier: impl Into<String>,
        master: impl Into<String>,
        derivation: Derivation,
    ) -> Self {
        Self::with_definition(
            local_identifier,
            MeasureDefinition::Derived {
                master: master.into(),
                derivation,
            },
        )
    }

    /// An arithmetic combination of the measures identified by `operands`.
    pub fn arithmetic<I, S>(
        local_identifier: impl Into<String>,
        operator: ArithmeticOperator,
        operands: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_definition(
            local_identifier,
            MeasureDefinition::Arithmetic {
                operator,
                operands: operands.into_iter().map(Into::into).collect(),
            },
        )
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_compute_ratio(mut self, compute_ratio: bool) -> Self {
        self.compute_ratio = compute_ratio;
        self
    }

    /// Set the aggregation of a simple measure. No effect on other kinds.
    pub fn with_aggregation(mut self, value: Aggregation) -> Self {
        if let MeasureDefinition::Simple { aggregation, .. } = &mut self.definition {
            *aggregation = Some(value);
        }
        self
    }

    /// Set the filters of a simple measure. No effect on other kinds.
    pub fn with_filters(mut self, value: Vec<Filter>) -> Self {
        if let MeasureDefinition::Simple { filters, .. } = &mut self.definition {
            *filters = value;
        }
        self
    }

    /// Alias if present, else title.
    pub fn label(&self) -> Option<&str> {
        self.alias.as_deref().or(self.title.as_deref())
    }

    /// Local identifiers this measure is computed from.
    pub fn dependencies(&self) -> Vec<&str> {
        match &self.definition {
            MeasureDefinition::Simple { .. } => Vec::new(),
            MeasureDefinition::Derived { master, .. } => vec![master.as_str()],
            MeasureDefinition::Arithmetic { operands, .. } => {
                operands.iter().map(String::as_str).collect()
            }
        }
    }
}
