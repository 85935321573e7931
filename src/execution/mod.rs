//! The compiled unit sent to the backend.

mod fingerprint;

pub use fingerprint::compute_fingerprint;

use serde::Serialize;

use crate::afm::{Afm, AfmAttribute, AfmFilter, AfmMeasure, Execution, ResultSpec};
use crate::dimensions::Dimension;
use crate::model::bucket::{all_attributes, all_measures, Bucket};
use crate::model::{Attribute, Measure, SortItem};

/// Buckets, dimensions, filters and sort items of one execution.
///
/// Built once per compile and never changed afterwards; the fingerprint is
/// computed at construction and identifies the execution's inputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionDefinition {
    workspace: String,
    buckets: Vec<Bucket>,
    dimensions: Vec<Dimension>,
    filters: Vec<AfmFilter>,
    sort_by: Vec<SortItem>,
    #[serde(skip)]
    fingerprint: String,
}

impl ExecutionDefinition {
    /// Create a definition.
    ///
    /// # Errors
    /// Returns an error if the definition cannot be serialized for
    /// fingerprinting.
    pub fn new(
        workspace: impl Into<String>,
        buckets: Vec<Bucket>,
        dimensions: Vec<Dimension>,
        filters: Vec<AfmFilter>,
        sort_by: Vec<SortItem>,
    ) -> Result<Self, serde_json::Error> {
        let mut definition = Self {
            workspace: workspace.into(),
            buckets,
            dimensions,
            filters,
            sort_by,
            fingerprint: String::new(),
        };
        definition.fingerprint = compute_fingerprint(&definition)?;
        Ok(definition)
    }

    /// Target workspace (data set) of the execution.
    pub fn workspace(&self) -> &str {
        &self.workspace
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    pub fn filters(&self) -> &[AfmFilter] {
        &self.filters
    }

    pub fn sort_by(&self) -> &[SortItem] {
        &self.sort_by
    }

    /// Identity of the execution-defining inputs.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// All attributes, in bucket-then-item order.
    pub fn attributes(&self) -> Vec<&Attribute> {
        all_attributes(&self.buckets)
    }

    /// All measures, in bucket-then-item order.
    pub fn measures(&self) -> Vec<&Measure> {
        all_measures(&self.buckets)
    }

    /// Assemble the wire request.
    pub fn to_execution(&self) -> Execution {
        Execution {
            afm: Afm {
                attributes: self
                    .attributes()
                    .into_iter()
                    .map(AfmAttribute::from)
                    .collect(),
                measures: self.measures().into_iter().map(AfmMeasure::from).collect(),
                filters: self.filters.clone(),
            },
            result_spec: ResultSpec {
                dimensions: self.dimensions.clone(),
                sorts: self.sort_by.clone(),
            },
        }
    }
}
