//! Dimension assignment: lays measures and attributes out onto the axes of
//! the result grid.
//!
//! Each chart family has its own layout rule, expressed as a pure function
//! from buckets to exactly two [`Dimension`]s. Missing buckets behave like
//! empty ones. Attribute slots with a hard size limit are truncated to their
//! first N attributes before the rule runs.
//!
//! ```text
//! family      dimension 0                  dimension 1
//! ----------  ---------------------------  ------------------------------
//! default     [measureGroup]               all attributes
//! stacked     [stack]                      [view.., measureGroup]
//! pointy      all attributes               [measureGroup]
//! round       [measureGroup] | []          attributes | [measureGroup]
//! matrix      [view]                       [stack.., measureGroup]
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::bucket::{
    all_attributes, bucket_attributes, bucket_is_empty, bucket_totals, names, Bucket, BucketItem,
    Total,
};
use crate::model::ChartType;

/// Sentinel item identifier standing for all measures of the definition.
pub const MEASURE_GROUP: &str = "measureGroup";

/// Maximum number of view-by attributes of a stacked chart.
pub const MAX_VIEW_BY_ATTRIBUTES: usize = 2;

/// Maximum number of stack-by attributes of a stacked chart.
pub const MAX_STACK_BY_ATTRIBUTES: usize = 1;

/// Maximum number of attributes per axis of a heatmap.
pub const MAX_MATRIX_AXIS_ATTRIBUTES: usize = 1;

/// One axis of the result grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimension {
    pub item_identifiers: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub totals: Vec<Total>,
}

impl Dimension {
    pub fn new<I, S>(item_identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            item_identifiers: item_identifiers.into_iter().map(Into::into).collect(),
            totals: Vec::new(),
        }
    }

    pub fn measure_group() -> Self {
        Self::new([MEASURE_GROUP])
    }

    pub fn with_totals(mut self, totals: Vec<Total>) -> Self {
        self.totals = totals;
        self
    }

    pub fn contains_measure_group(&self) -> bool {
        self.item_identifiers.iter().any(|id| id == MEASURE_GROUP)
    }
}

/// Bucket names playing the view and stack roles of a stacked chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackRoles {
    pub view: &'static [&'static str],
    pub stack: &'static [&'static str],
}

impl StackRoles {
    /// Bar, column, area and combo charts.
    pub const VIEW_STACK: StackRoles = StackRoles {
        view: &[names::VIEW, names::ATTRIBUTE],
        stack: &[names::STACK],
    };

    /// Line charts.
    pub const TREND_SEGMENT: StackRoles = StackRoles {
        view: &[names::TREND],
        stack: &[names::SEGMENT],
    };
}

/// A dimension layout rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionFamily {
    Default,
    Stacked(StackRoles),
    Pointy,
    Round,
    Matrix,
    Bubble,
    Treemap,
    Table,
    PivotTable,
}

impl DimensionFamily {
    pub fn of(chart_type: ChartType) -> Self {
        match chart_type {
            ChartType::Bar | ChartType::Column | ChartType::Area | ChartType::Combo => {
                DimensionFamily::Stacked(StackRoles::VIEW_STACK)
            }
            ChartType::Line => DimensionFamily::Stacked(StackRoles::TREND_SEGMENT),
            ChartType::Pie | ChartType::Donut | ChartType::Funnel => DimensionFamily::Round,
            ChartType::Scatter => DimensionFamily::Pointy,
            ChartType::Bubble => DimensionFamily::Bubble,
            ChartType::Heatmap => DimensionFamily::Matrix,
            ChartType::Treemap => DimensionFamily::Treemap,
            ChartType::Table => DimensionFamily::Table,
            ChartType::PivotTable => DimensionFamily::PivotTable,
        }
    }

    /// Buckets with every size-limited attribute role cut to its limit.
    ///
    /// This is the attribute set the family actually lays out, so a request
    /// built from it never lists an attribute that sits in no dimension.
    pub fn normalize_buckets(&self, buckets: &[Bucket]) -> Vec<Bucket> {
        match self {
            DimensionFamily::Stacked(roles) => {
                let buckets = truncate_role(buckets, roles.view, MAX_VIEW_BY_ATTRIBUTES);
                truncate_role(&buckets, roles.stack, MAX_STACK_BY_ATTRIBUTES)
            }
            DimensionFamily::Matrix => {
                let buckets = truncate_role(buckets, &[names::VIEW], MAX_MATRIX_AXIS_ATTRIBUTES);
                truncate_role(&buckets, &[names::STACK], MAX_MATRIX_AXIS_ATTRIBUTES)
            }
            _ => buckets.to_vec(),
        }
    }

    /// Run this family's layout rule.
    pub fn assign(&self, buckets: &[Bucket]) -> Vec<Dimension> {
        let dimensions = match self {
            DimensionFamily::Default => default_dimensions(buckets),
            DimensionFamily::Stacked(roles) => stacked_dimensions(buckets, *roles),
            DimensionFamily::Pointy => pointy_dimensions(buckets),
            DimensionFamily::Round => round_dimensions(buckets),
            DimensionFamily::Matrix => matrix_dimensions(buckets),
            DimensionFamily::Bubble => bubble_dimensions(buckets),
            DimensionFamily::Treemap => treemap_dimensions(buckets),
            DimensionFamily::Table => table_dimensions(buckets),
            DimensionFamily::PivotTable => pivot_table_dimensions(buckets),
        };
        debug!(family = ?self, ?dimensions, "assigned dimensions");
        dimensions
    }
}

/// Dimensions for a chart type.
pub fn generate_dimensions(buckets: &[Bucket], chart_type: ChartType) -> Vec<Dimension> {
    DimensionFamily::of(chart_type).assign(buckets)
}

// ============================================================================
// Family rules
// ============================================================================

/// `[[measureGroup], [all attributes]]`
pub fn default_dimensions(buckets: &[Bucket]) -> Vec<Dimension> {
    vec![
        Dimension::measure_group(),
        Dimension::new(local_ids(all_attributes(buckets))),
    ]
}

/// Stack attribute on its own axis, view attributes and measures on the other.
///
/// Without a stack attribute this falls back to [`default_dimensions`] over
/// the truncated buckets.
pub fn stacked_dimensions(buckets: &[Bucket], roles: StackRoles) -> Vec<Dimension> {
    let buckets = DimensionFamily::Stacked(roles).normalize_buckets(buckets);

    let stack = role_attributes(&buckets, roles.stack);
    if stack.is_empty() {
        return default_dimensions(&buckets);
    }

    let mut view = role_attributes(&buckets, roles.view);
    view.push(MEASURE_GROUP.to_string());
    vec![Dimension::new(stack), Dimension::new(view)]
}

/// `[[all attributes], [measureGroup]]`
pub fn pointy_dimensions(buckets: &[Bucket]) -> Vec<Dimension> {
    vec![
        Dimension::new(local_ids(all_attributes(buckets))),
        Dimension::measure_group(),
    ]
}

/// Measures first when sliced by attributes, otherwise a single measure row.
pub fn round_dimensions(buckets: &[Bucket]) -> Vec<Dimension> {
    let attributes = local_ids(all_attributes(buckets));
    if attributes.is_empty() {
        return vec![Dimension::default(), Dimension::measure_group()];
    }
    vec![Dimension::measure_group(), Dimension::new(attributes)]
}

/// View attribute on rows, stack attribute and measures on columns.
pub fn matrix_dimensions(buckets: &[Bucket]) -> Vec<Dimension> {
    let buckets = DimensionFamily::Matrix.normalize_buckets(buckets);

    let view = local_ids(bucket_attributes(&buckets, names::VIEW));
    let mut stack = local_ids(bucket_attributes(&buckets, names::STACK));
    stack.push(MEASURE_GROUP.to_string());

    vec![Dimension::new(view), Dimension::new(stack)]
}

/// View then stack attributes on one axis, measures on the other.
pub fn bubble_dimensions(buckets: &[Bucket]) -> Vec<Dimension> {
    let mut attributes = local_ids(bucket_attributes(buckets, names::VIEW));
    attributes.extend(local_ids(bucket_attributes(buckets, names::STACK)));
    vec![Dimension::new(attributes), Dimension::measure_group()]
}

/// A single attribute is laid out like a round chart, more like a pointy one.
pub fn treemap_dimensions(buckets: &[Bucket]) -> Vec<Dimension> {
    let attributes = local_ids(all_attributes(buckets));
    if attributes.len() == 1 {
        return vec![Dimension::measure_group(), Dimension::new(attributes)];
    }
    vec![Dimension::new(attributes), Dimension::measure_group()]
}

/// Row attributes with their totals, then the measure group if any measures.
pub fn table_dimensions(buckets: &[Bucket]) -> Vec<Dimension> {
    let rows = local_ids(bucket_attributes(buckets, names::ATTRIBUTE));
    let totals = bucket_totals(buckets, names::ATTRIBUTE).to_vec();

    vec![
        Dimension::new(rows).with_totals(totals),
        Dimension::new(measure_group_if_any(buckets)),
    ]
}

/// Row attributes with their totals, then column attributes and measures.
pub fn pivot_table_dimensions(buckets: &[Bucket]) -> Vec<Dimension> {
    let rows = local_ids(bucket_attributes(buckets, names::ATTRIBUTE));
    let totals = bucket_totals(buckets, names::ATTRIBUTE).to_vec();

    let mut columns = local_ids(bucket_attributes(buckets, names::COLUMNS));
    columns.extend(measure_group_if_any(buckets));

    vec![
        Dimension::new(rows).with_totals(totals),
        Dimension::new(columns),
    ]
}

// ============================================================================
// Helpers
// ============================================================================

fn local_ids<'a, I>(attributes: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a crate::model::Attribute>,
{
    attributes
        .into_iter()
        .map(|a| a.local_identifier.clone())
        .collect()
}

fn role_attributes(buckets: &[Bucket], role: &[&str]) -> Vec<String> {
    role.iter()
        .flat_map(|name| local_ids(bucket_attributes(buckets, name)))
        .collect()
}

fn measure_group_if_any(buckets: &[Bucket]) -> Option<String> {
    (!bucket_is_empty(buckets, names::MEASURES)).then(|| MEASURE_GROUP.to_string())
}

/// Keep at most `max` attributes across the buckets named in `role`,
/// counted in bucket-then-item order. Measures are never dropped.
fn truncate_role(buckets: &[Bucket], role: &[&str], max: usize) -> Vec<Bucket> {
    let mut remaining = max;
    buckets
        .iter()
        .map(|bucket| {
            if !role.contains(&bucket.local_identifier.as_str()) {
                return bucket.clone();
            }
            let before = bucket.items.len();
            let items: Vec<BucketItem> = bucket
                .items
                .iter()
                .filter(|item| match item {
                    BucketItem::Attribute(_) if remaining == 0 => false,
                    BucketItem::Attribute(_) => {
                        remaining -= 1;
                        true
                    }
                    BucketItem::Measure(_) => true,
                })
                .cloned()
                .collect();
            if items.len() < before {
                debug!(
                    bucket = %bucket.local_identifier,
                    dropped = before - items.len(),
                    max,
                    "truncated attribute bucket"
                );
            }
            Bucket {
                items,
                ..bucket.clone()
            }
        })
        .collect()
}
