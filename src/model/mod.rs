//! Bucket model: the declarative inputs of an execution.
//!
//! All types here are plain values. They are built once per render by the
//! caller (or by [`ChartType::build_buckets`]) and never adjusted in place;
//! every transformation downstream returns a new value.

pub mod attribute;
pub mod bucket;
pub mod chart;
pub mod filter;
pub mod measure;
pub mod sort;
pub mod types;

pub use attribute::Attribute;
pub use bucket::{
    all_attributes, all_measures, bucket_attributes, bucket_is_empty, bucket_measures,
    bucket_totals, find_bucket, names, Bucket, BucketItem, Total, TotalType,
};
pub use chart::{ChartInput, ChartType};
pub use filter::{
    AttributeElements, ComparisonOperator, DateGranularity, Filter, MeasureValueCondition,
    RangeOperator,
};
pub use measure::{
    Aggregation, ArithmeticOperator, Derivation, DerivationKind, Measure, MeasureDefinition,
    PreviousPeriodDataSet,
};
pub use sort::{Locator, SortAggregation, SortDirection, SortItem};
pub use types::{ObjRef, ObjRefInScope};
