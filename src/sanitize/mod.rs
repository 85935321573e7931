//! Bucket sanitizer: reconciles the stacking toggles of a chart config with
//! the measures' `compute_ratio` flags.
//!
//! The rule is a small decision table over the *effective* measure set:
//!
//! | effective measures | `compute_ratio` on it | stacking flags       |
//! |--------------------|-----------------------|----------------------|
//! | exactly one        | set                   | both forced off      |
//! | exactly one        | unset                 | passed through       |
//! | zero, or two+      | ignored               | passed through       |
//!
//! On dual-axis charts the secondary-axis measures only count when dual axis
//! is disabled. The same table is applied to three input shapes: a bucket
//! array, a compiled [`ExecutionDefinition`], and a raw wire [`Afm`].

use serde::{Deserialize, Serialize};

use crate::afm::Afm;
use crate::execution::ExecutionDefinition;
use crate::model::bucket::{all_measures, bucket_measures, names, Bucket};
use crate::model::{ChartType, Measure};

/// Display configuration of a chart, as far as execution cares about it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartConfig {
    pub stack_measures: bool,
    pub stack_measures_to_percent: bool,
    /// Unset means "use the configured default"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dual_axis: Option<bool>,
    /// Local identifiers of measures placed on the secondary axis
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub secondary_measures: Vec<String>,
}

impl ChartConfig {
    pub fn dual_axis_enabled(&self, options: &SanitizeOptions) -> bool {
        self.dual_axis.unwrap_or(options.dual_axis_default)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SanitizeOptions {
    /// Whether dual axis is on when a config leaves it unset.
    pub dual_axis_default: bool,
}

impl Default for SanitizeOptions {
    fn default() -> Self {
        Self {
            dual_axis_default: true,
        }
    }
}

/// Which measures count towards the ratio rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatioScope {
    /// Every declared measure.
    Primary,
    /// Primary-axis measures, plus secondary-axis ones when dual axis is off.
    DualAxis,
}

impl RatioScope {
    pub fn of(chart_type: ChartType) -> Self {
        if chart_type.supports_dual_axis() {
            RatioScope::DualAxis
        } else {
            RatioScope::Primary
        }
    }
}

/// One measure as seen by the decision table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RatioCandidate {
    compute_ratio: bool,
    secondary: bool,
}

/// Apply the decision table to the `compute_ratio` flags of the effective
/// measure set. Returns a new config.
pub fn reconcile_stacking(config: &ChartConfig, ratio_flags: &[bool]) -> ChartConfig {
    let mut sanitized = config.clone();
    if let [compute_ratio] = ratio_flags {
        sanitized.stack_measures = config.stack_measures && !compute_ratio;
        sanitized.stack_measures_to_percent = config.stack_measures_to_percent && !compute_ratio;
    }
    sanitized
}

fn effective_flags(
    candidates: &[RatioCandidate],
    config: &ChartConfig,
    scope: RatioScope,
    options: &SanitizeOptions,
) -> Vec<bool> {
    let include_secondary = match scope {
        RatioScope::Primary => true,
        RatioScope::DualAxis => !config.dual_axis_enabled(options),
    };
    candidates
        .iter()
        .filter(|c| include_secondary || !c.secondary)
        .map(|c| c.compute_ratio)
        .collect()
}

fn sanitize_candidates(
    candidates: Vec<RatioCandidate>,
    config: &ChartConfig,
    scope: RatioScope,
    options: &SanitizeOptions,
) -> ChartConfig {
    let flags = effective_flags(&candidates, config, scope, options);
    reconcile_stacking(config, &flags)
}

fn bucket_candidates(buckets: &[Bucket], config: &ChartConfig, scope: RatioScope) -> Vec<RatioCandidate> {
    let is_listed = |m: &Measure| config.secondary_measures.contains(&m.local_identifier);
    match scope {
        RatioScope::Primary => all_measures(buckets)
            .into_iter()
            .map(|m| RatioCandidate {
                compute_ratio: m.compute_ratio,
                secondary: false,
            })
            .collect(),
        RatioScope::DualAxis => {
            let primary = bucket_measures(buckets, names::MEASURES)
                .into_iter()
                .map(|m| RatioCandidate {
                    compute_ratio: m.compute_ratio,
                    secondary: is_listed(m),
                });
            let secondary = bucket_measures(buckets, names::SECONDARY_MEASURES)
                .into_iter()
                .map(|m| RatioCandidate {
                    compute_ratio: m.compute_ratio,
                    secondary: true,
                });
            primary.chain(secondary).collect()
        }
    }
}

/// Sanitize a config against a declarative bucket array.
pub fn sanitize_buckets(
    buckets: &[Bucket],
    config: &ChartConfig,
    scope: RatioScope,
    options: &SanitizeOptions,
) -> ChartConfig {
    sanitize_candidates(bucket_candidates(buckets, config, scope), config, scope, options)
}

/// Sanitize a config against an already compiled definition.
pub fn sanitize_definition(
    definition: &ExecutionDefinition,
    config: &ChartConfig,
    scope: RatioScope,
    options: &SanitizeOptions,
) -> ChartConfig {
    sanitize_buckets(definition.buckets(), config, scope, options)
}

/// Sanitize a config against a raw wire request.
///
/// The wire request has no buckets, so secondary-axis membership comes from
/// [`ChartConfig::secondary_measures`].
pub fn sanitize_afm(
    afm: &Afm,
    config: &ChartConfig,
    scope: RatioScope,
    options: &SanitizeOptions,
) -> ChartConfig {
    let candidates = afm
        .measures
        .iter()
        .map(|m| RatioCandidate {
            compute_ratio: m.compute_ratio(),
            secondary: scope == RatioScope::DualAxis
                && config.secondary_measures.contains(&m.local_identifier),
        })
        .collect();
    sanitize_candidates(candidates, config, scope, options)
}
