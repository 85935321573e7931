//! Compilation of declarative chart buckets into an execution.
//!
//! One [`ExecutionCompiler`] exists per chart type. Compiling runs the pure
//! components in order:
//!
//! ```text
//! Buckets + Props → Validate → Normalize → Dimensions → Sanitize Config → Filters + Sorts
//!                 → ExecutionDefinition (+ resolved measure titles)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use vizexec::compile::{ExecutionCompiler, ExecutionProps};
//! use vizexec::model::{ChartInput, ChartType};
//!
//! let input = ChartInput::new()
//!     .measures(vec![revenue])
//!     .view_by(vec![region]);
//!
//! let props = ExecutionProps::new("workspace-1");
//! let compiled = ExecutionCompiler::new(ChartType::Column).compile_chart(&input, &props)?;
//! let request = compiled.definition.to_execution();
//! ```

use std::collections::HashSet;

use tracing::debug;

use crate::dimensions::DimensionFamily;
use crate::execution::ExecutionDefinition;
use crate::filter::convert_filters;
use crate::model::bucket::{all_attributes, all_measures, Bucket};
use crate::model::{ChartInput, ChartType, Filter, Measure, SortItem};
use crate::sanitize::{sanitize_buckets, ChartConfig, RatioScope, SanitizeOptions};
use crate::titles::{resolve_titles, TitleOptions, TitleResolution};

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur during compilation.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// No measures and no attributes: the backend cannot execute this.
    #[error("Execution definition has no measures and no attributes")]
    EmptyDefinition,

    #[error("Failed to fingerprint execution definition: {0}")]
    Fingerprint(#[from] serde_json::Error),
}

pub type CompileResult<T> = Result<T, CompileError>;

// ============================================================================
// Options
// ============================================================================

/// Options for compilation.
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    pub sanitize: SanitizeOptions,
    pub titles: TitleOptions,
}

impl CompileOptions {
    pub fn with_sanitize(mut self, sanitize: SanitizeOptions) -> Self {
        self.sanitize = sanitize;
        self
    }

    pub fn with_titles(mut self, titles: TitleOptions) -> Self {
        self.titles = titles;
        self
    }
}

/// Everything besides the buckets that defines an execution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionProps {
    /// Target workspace (data set)
    pub workspace: String,
    pub filters: Vec<Filter>,
    pub sort_by: Vec<SortItem>,
    pub config: ChartConfig,
}

impl ExecutionProps {
    pub fn new(workspace: impl Into<String>) -> Self {
        Self {
            workspace: workspace.into(),
            ..Default::default()
        }
    }

    pub fn with_filters(mut self, filters: Vec<Filter>) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_sort_by(mut self, sort_by: Vec<SortItem>) -> Self {
        self.sort_by = sort_by;
        self
    }

    pub fn with_config(mut self, config: ChartConfig) -> Self {
        self.config = config;
        self
    }
}

// ============================================================================
// Result Types
// ============================================================================

/// Result of compiling one chart.
#[derive(Debug, Clone)]
pub struct CompiledExecution {
    /// What gets submitted to the backend.
    pub definition: ExecutionDefinition,

    /// Chart config with the stacking toggles reconciled.
    pub config: ChartConfig,

    /// Display titles of every measure in the definition.
    pub titles: TitleResolution,
}

// ============================================================================
// Compiler
// ============================================================================

pub struct ExecutionCompiler {
    chart_type: ChartType,
    options: CompileOptions,
}

impl ExecutionCompiler {
    pub fn new(chart_type: ChartType) -> Self {
        Self {
            chart_type,
            options: CompileOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    pub fn chart_type(&self) -> ChartType {
        self.chart_type
    }

    /// Lay out typed chart props into buckets, then compile.
    pub fn compile_chart(
        &self,
        input: &ChartInput,
        props: &ExecutionProps,
    ) -> CompileResult<CompiledExecution> {
        let buckets = self.chart_type.build_buckets(input);
        self.compile(&buckets, props)
    }

    /// Compile a bucket array.
    pub fn compile(&self, buckets: &[Bucket], props: &ExecutionProps) -> CompileResult<CompiledExecution> {
        // Step 1: Reject definitions the backend cannot satisfy
        if all_attributes(buckets).is_empty() && all_measures(buckets).is_empty() {
            return Err(CompileError::EmptyDefinition);
        }

        // Step 2: Cut size-limited roles down to what the family lays out
        let family = DimensionFamily::of(self.chart_type);
        let buckets = family.normalize_buckets(buckets);

        // Step 3: Dimensions for this chart's family
        let dimensions = family.assign(&buckets);

        // Step 4: Reconcile stacking with compute-ratio
        let config = sanitize_buckets(
            &buckets,
            &props.config,
            RatioScope::of(self.chart_type),
            &self.options.sanitize,
        );

        // Step 5: Convert filters, dropping the no-op ones
        let filters = convert_filters(&props.filters);

        // Step 6: Keep the sort items whose targets survived
        let sorts = resolvable_sorts(&buckets, &props.sort_by);

        // Step 7: Titles for computed measures
        let owned: Vec<Measure> = all_measures(&buckets).into_iter().cloned().collect();
        let titles = resolve_titles(&owned, self.options.titles.clone());

        debug!(
            chart = ?self.chart_type,
            dimensions = dimensions.len(),
            filters = filters.len(),
            dropped_filters = props.filters.len() - filters.len(),
            dropped_sorts = props.sort_by.len() - sorts.len(),
            "compiled execution"
        );

        let definition = ExecutionDefinition::new(
            props.workspace.clone(),
            buckets,
            dimensions,
            filters,
            sorts,
        )?;

        Ok(CompiledExecution {
            definition,
            config,
            titles,
        })
    }
}

/// Sort items whose every referenced identifier is an item of `buckets`.
fn resolvable_sorts(buckets: &[Bucket], sort_by: &[SortItem]) -> Vec<SortItem> {
    let known: HashSet<&str> = all_attributes(buckets)
        .into_iter()
        .map(|a| a.local_identifier.as_str())
        .chain(all_measures(buckets).into_iter().map(|m| m.local_identifier.as_str()))
        .collect();

    sort_by
        .iter()
        .filter(|item| {
            let unknown = item
                .referenced_identifiers()
                .into_iter()
                .find(|id| !known.contains(id));
            if let Some(id) = unknown {
                debug!(identifier = id, "dropped sort item with unknown target");
            }
            unknown.is_none()
        })
        .cloned()
        .collect()
}
