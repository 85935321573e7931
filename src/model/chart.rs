//! Chart types and the conventional buckets each one builds.

use serde::{Deserialize, Serialize};

use crate::model::attribute::Attribute;
use crate::model::bucket::{names, Bucket, Total};
use crate::model::measure::Measure;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
    Bar,
    Column,
    Line,
    Area,
    Combo,
    Pie,
    Donut,
    Funnel,
    Scatter,
    Bubble,
    Heatmap,
    Treemap,
    Table,
    PivotTable,
}

impl ChartType {
    /// Charts that can place measures on a secondary axis.
    pub fn supports_dual_axis(&self) -> bool {
        matches!(
            self,
            ChartType::Bar | ChartType::Column | ChartType::Line | ChartType::Area | ChartType::Combo
        )
    }

    /// Build the conventional bucket list for this chart.
    ///
    /// Slots a chart does not use are ignored; empty buckets are omitted
    /// because a missing bucket and an empty one are treated alike downstream.
    pub fn build_buckets(&self, input: &ChartInput) -> Vec<Bucket> {
        let measures = || Bucket::new(names::MEASURES, input.measures.clone());
        let secondary = || Bucket::new(names::SECONDARY_MEASURES, input.secondary_measures.clone());
        let view_by = |name: &str| Bucket::new(name, input.view_by.clone());
        let stack_by = |name: &str| Bucket::new(name, input.stack_by.clone());

        let buckets = match self {
            ChartType::Bar | ChartType::Column | ChartType::Area => vec![
                measures(),
                secondary(),
                view_by(names::VIEW),
                stack_by(names::STACK),
            ],
            ChartType::Line => vec![
                measures(),
                secondary(),
                view_by(names::TREND),
                stack_by(names::SEGMENT),
            ],
            ChartType::Combo => vec![measures(), secondary(), view_by(names::VIEW)],
            ChartType::Pie | ChartType::Donut | ChartType::Funnel => {
                vec![measures(), view_by(names::VIEW)]
            }
            ChartType::Scatter => vec![measures(), secondary(), view_by(names::ATTRIBUTE)],
            ChartType::Bubble => vec![
                measures(),
                secondary(),
                view_by(names::VIEW),
                stack_by(names::STACK),
            ],
            ChartType::Heatmap => vec![measures(), view_by(names::VIEW), stack_by(names::STACK)],
            ChartType::Treemap => {
                vec![measures(), view_by(names::VIEW), stack_by(names::SEGMENT)]
            }
            ChartType::Table => vec![
                measures(),
                view_by(names::ATTRIBUTE).with_totals(input.totals.clone()),
            ],
            ChartType::PivotTable => vec![
                measures(),
                view_by(names::ATTRIBUTE).with_totals(input.totals.clone()),
                stack_by(names::COLUMNS),
            ],
        };

        buckets.into_iter().filter(|b| !b.is_empty()).collect()
    }
}

/// Typed chart props, before they are laid out into buckets.
///
/// `view_by` is the chart's primary attribute slot (view, trend, rows);
/// `stack_by` its secondary one (stack, segment, columns).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartInput {
    pub measures: Vec<Measure>,
    pub secondary_measures: Vec<Measure>,
    pub view_by: Vec<Attribute>,
    pub stack_by: Vec<Attribute>,
    pub totals: Vec<Total>,
}

impl ChartInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn measures(mut self, measures: Vec<Measure>) -> Self {
        self.measures = measures;
        self
    }

    pub fn secondary_measures(mut self, measures: Vec<Measure>) -> Self {
        self.secondary_measures = measures;
        self
    }

    pub fn view_by(mut self, attributes: Vec<Attribute>) -> Self {
        self.view_by = attributes;
        self
    }

    pub fn stack_by(mut self, attributes: Vec<Attribute>) -> Self {
        self.stack_by = attributes;
        self
    }

    pub fn totals(mut self, totals: Vec<Total>) -> Self {
        self.totals = totals;
        self
    }
}
