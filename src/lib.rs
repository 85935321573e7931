//! # vizexec
//!
//! Turns declarative chart buckets into execution requests against an
//! analytical backend, retrieves the results, and titles computed measures.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                Bucket Model (value types)                │
//! │   (measures, attributes, filters, sort items, totals)    │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [compile]
//! ┌───────────────┬───────────────┬───────────────┬──────────┐
//! │  dimensions   │   sanitize    │    filter     │  titles  │
//! └───────────────┴───────────────┴───────────────┴──────────┘
//!                          │
//!                          ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │        ExecutionDefinition (fingerprinted, immutable)    │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [executor]
//! ┌─────────────────────────────────────────────────────────┐
//! │     ExecutionBackend: submit → fetch_page (async)        │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything above the executor is pure and synchronous. Rendering, HTTP
//! transport and authentication live outside this crate.

pub mod afm;
pub mod compile;
pub mod config;
pub mod dimensions;
pub mod execution;
pub mod executor;
pub mod filter;
pub mod model;
pub mod sanitize;
pub mod titles;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::compile::{
        CompileError, CompileOptions, CompileResult, CompiledExecution, ExecutionCompiler,
        ExecutionProps,
    };
    pub use crate::config::{Settings, SettingsError};
    pub use crate::dimensions::{generate_dimensions, Dimension, MEASURE_GROUP};
    pub use crate::execution::ExecutionDefinition;
    pub use crate::executor::{
        BackendError, BackendResult, ErrorKind, ExecutionBackend, ExecutionError, ExecutionState,
        Executor, ExecutorOptions, FetchOutcome, PageRequest, Phase, ResponseDescriptor,
        ResultPayload,
    };
    pub use crate::filter::convert_filters;
    pub use crate::model::{
        names, Attribute, Bucket, ChartInput, ChartType, Filter, Measure, ObjRef, SortDirection,
        SortItem, Total, TotalType,
    };
    pub use crate::sanitize::{ChartConfig, RatioScope, SanitizeOptions};
    pub use crate::titles::{resolve_titles, TitleOptions, TitleResolution, Translator};
}
