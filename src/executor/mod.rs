//! Execution protocol: fetch a response descriptor, then pages of the result.
//!
//! ```text
//! ┌──────────────┐  submit   ┌──────────────────┐  fetch_page  ┌───────────────┐
//! │  Definition  │ ────────▶ │ ResponseDescriptor│ ───────────▶ │ ResultPayload │
//! └──────────────┘           └──────────────────┘              └───────────────┘
//!         ▲                                                            │
//!         │ update_definition                              watch::Receiver
//!         │                                                            ▼
//!     ┌────────┐                                             ┌────────────────┐
//!     │ caller │ ◀───────────────────────────────────────────│ ExecutionState │
//!     └────────┘                                             └────────────────┘
//! ```
//!
//! The transport is a collaborator behind [`ExecutionBackend`]; the
//! [`Executor`] owns the lifecycle and guarantees that only the most recently
//! issued fetch of each kind reaches state.

mod backend;
mod error;
mod orchestrator;
mod protocol;

pub use backend::ExecutionBackend;
pub use error::{BackendError, BackendResult, ErrorKind, ExecutionError};
pub use orchestrator::{
    ExecutionState, Executor, ExecutorOptions, FetchOutcome, PendingFetch, Phase,
};
pub use protocol::{
    ExecutionLinks, PageRequest, Paging, ResponseDescriptor, ResultPayload, DEFAULT_LIMIT,
    DEFAULT_OFFSET,
};
