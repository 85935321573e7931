//! Buckets: named, ordered groups of measures and attributes.

use serde::{Deserialize, Serialize};

use crate::model::attribute::Attribute;
use crate::model::measure::Measure;

/// Conventional bucket names.
pub mod names {
    pub const MEASURES: &str = "measures";
    pub const SECONDARY_MEASURES: &str = "secondary_measures";
    pub const ATTRIBUTE: &str = "attribute";
    pub const VIEW: &str = "view";
    pub const STACK: &str = "stack";
    pub const TREND: &str = "trend";
    pub const SEGMENT: &str = "segment";
    pub const COLUMNS: &str = "columns";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BucketItem {
    Measure(Measure),
    Attribute(Attribute),
}

impl BucketItem {
    pub fn local_identifier(&self) -> &str {
        match self {
            BucketItem::Measure(m) => &m.local_identifier,
            BucketItem::Attribute(a) => &a.local_identifier,
        }
    }
}

impl From<Measure> for BucketItem {
    fn from(value: Measure) -> Self {
        Self::Measure(value)
    }
}

impl From<Attribute> for BucketItem {
    fn from(value: Attribute) -> Self {
        Self::Attribute(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TotalType {
    Sum,
    Avg,
    Max,
    Min,
    Med,
    Nat,
}

/// A grand total requested on a table bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Total {
    pub measure_identifier: String,
    #[serde(rename = "type")]
    pub total_type: TotalType,
    pub attribute_identifier: String,
}

impl Total {
    pub fn new(
        total_type: TotalType,
        measure_identifier: impl Into<String>,
        attribute_identifier: impl Into<String>,
    ) -> Self {
        Self {
            measure_identifier: measure_identifier.into(),
            total_type,
            attribute_identifier: attribute_identifier.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    /// Bucket name, one of [`names`]
    pub local_identifier: String,
    pub items: Vec<BucketItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub totals: Vec<Total>,
}

impl Bucket {
    pub fn new<I, T>(local_identifier: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<BucketItem>,
    {
        Self {
            local_identifier: local_identifier.into(),
            items: items.into_iter().map(Into::into).collect(),
            totals: Vec::new(),
        }
    }

    pub fn empty(local_identifier: impl Into<String>) -> Self {
        Self::new(local_identifier, Vec::<BucketItem>::new())
    }

    pub fn with_totals(mut self, totals: Vec<Total>) -> Self {
        self.totals = totals;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.items.iter().filter_map(|item| match item {
            BucketItem::Attribute(a) => Some(a),
            BucketItem::Measure(_) => None,
        })
    }

    pub fn measures(&self) -> impl Iterator<Item = &Measure> {
        self.items.iter().filter_map(|item| match item {
            BucketItem::Measure(m) => Some(m),
            BucketItem::Attribute(_) => None,
        })
    }
}

/// Find a bucket by name.
pub fn find_bucket<'a>(buckets: &'a [Bucket], name: &str) -> Option<&'a Bucket> {
    buckets.iter().find(|b| b.local_identifier == name)
}

/// Attributes of the named bucket. A missing bucket yields nothing.
pub fn bucket_attributes<'a>(buckets: &'a [Bucket], name: &str) -> Vec<&'a Attribute> {
    find_bucket(buckets, name)
        .map(|b| b.attributes().collect())
        .unwrap_or_default()
}

/// Measures of the named bucket. A missing bucket yields nothing.
pub fn bucket_measures<'a>(buckets: &'a [Bucket], name: &str) -> Vec<&'a Measure> {
    find_bucket(buckets, name)
        .map(|b| b.measures().collect())
        .unwrap_or_default()
}

/// Totals of the named bucket. A missing bucket yields nothing.
pub fn bucket_totals<'a>(buckets: &'a [Bucket], name: &str) -> &'a [Total] {
    find_bucket(buckets, name)
        .map(|b| b.totals.as_slice())
        .unwrap_or_default()
}

pub fn bucket_is_empty(buckets: &[Bucket], name: &str) -> bool {
    find_bucket(buckets, name).map_or(true, Bucket::is_empty)
}

/// All attributes, in bucket-then-item order.
pub fn all_attributes(buckets: &[Bucket]) -> Vec<&Attribute> {
    buckets.iter().flat_map(Bucket::attributes).collect()
}

/// All measures, in bucket-then-item order.
pub fn all_measures(buckets: &[Bucket]) -> Vec<&Measure> {
    buckets.iter().flat_map(Bucket::measures).collect()
}
