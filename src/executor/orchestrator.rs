//! The execution protocol state machine.
//!
//! ```text
//!            update_definition (auto_load)       submit ok
//!   Idle ─────────────────────────────▶ LoadingResponse ──────▶ Idle (with response)
//!    │  load / get_page                    │      ▲                   │ fetch_page
//!    └────────────────────────────────────▶┘      │                   ▼
//!                                     fail │      │ retry       LoadingResult ──▶ Ready
//!                                          ▼      │                   │ fail
//!                                         Error ◀─┴───────────────────┘
//! ```
//!
//! Every fetch is tagged with a fresh [`PendingFetch`] ticket stored in the
//! state. When the fetch completes, its ticket is compared by pointer
//! identity with the ticket currently stored for that kind of fetch; if a
//! newer fetch replaced it, inputs changed, or the executor was torn down,
//! the completion is dropped without touching state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tracing::{debug, warn};
use uuid::Uuid;

use super::backend::ExecutionBackend;
use super::error::{BackendError, ExecutionError};
use super::protocol::{PageRequest, ResponseDescriptor, ResultPayload};
use crate::execution::ExecutionDefinition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Nothing in flight. May already hold a response.
    Idle,
    LoadingResponse,
    LoadingResult,
    Ready,
    Error,
}

/// Ticket of one issued fetch.
///
/// Identity is the allocation itself; the id only labels log lines.
#[derive(Debug)]
pub struct PendingFetch {
    id: Uuid,
    page: PageRequest,
}

impl PendingFetch {
    fn new(page: PageRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            page,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn page(&self) -> &PageRequest {
        &self.page
    }
}

/// Snapshot of the protocol state.
#[derive(Debug, Clone)]
pub struct ExecutionState {
    pub phase: Phase,
    pub response: Option<Arc<ResponseDescriptor>>,
    pub result: Option<Arc<ResultPayload>>,
    pub error: Option<ExecutionError>,
    /// Window of the most recently issued fetch
    pub page: PageRequest,
    pending_response: Option<Arc<PendingFetch>>,
    pending_result: Option<Arc<PendingFetch>>,
}

impl ExecutionState {
    fn initial(options: &ExecutorOptions) -> Self {
        Self {
            phase: if options.auto_load {
                Phase::LoadingResponse
            } else {
                Phase::Idle
            },
            response: None,
            result: None,
            error: None,
            page: options.default_page.clone(),
            pending_response: None,
            pending_result: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::LoadingResponse | Phase::LoadingResult)
    }

    pub fn pending_response(&self) -> Option<&Arc<PendingFetch>> {
        self.pending_response.as_ref()
    }

    pub fn pending_result(&self) -> Option<&Arc<PendingFetch>> {
        self.pending_result.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorOptions {
    /// Start loading as soon as the inputs change
    pub auto_load: bool,
    /// Window used by [`Executor::load`]
    pub default_page: PageRequest,
}

impl Default for ExecutorOptions {
    fn default() -> Self {
        Self {
            auto_load: true,
            default_page: PageRequest::default(),
        }
    }
}

/// What happened to one fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The completion was written to state.
    Applied,
    /// A newer fetch, an input change or teardown superseded this one.
    Discarded,
    /// The fetch failed and the error was written to state.
    Failed(ExecutionError),
    /// Nothing was issued.
    Skipped,
}

#[derive(Debug, Clone, Copy)]
enum Slot {
    Response,
    Result,
}

impl Slot {
    fn pending(self, state: &mut ExecutionState) -> &mut Option<Arc<PendingFetch>> {
        match self {
            Slot::Response => &mut state.pending_response,
            Slot::Result => &mut state.pending_result,
        }
    }
}

/// Owns the request lifecycle of one execution.
///
/// The executor never spawns tasks. Callers drive it by awaiting [`load`],
/// [`get_page`] or [`refresh`]; several of those may be in flight at once on
/// the same task, and only the most recently issued fetch of each kind is
/// ever applied.
///
/// [`load`]: Executor::load
/// [`get_page`]: Executor::get_page
/// [`refresh`]: Executor::refresh
pub struct Executor<B: ExecutionBackend> {
    backend: Arc<B>,
    definition: Mutex<Arc<ExecutionDefinition>>,
    state: watch::Sender<ExecutionState>,
    torn_down: AtomicBool,
    options: ExecutorOptions,
}

impl<B: ExecutionBackend> Executor<B> {
    pub fn new(backend: Arc<B>, definition: ExecutionDefinition, options: ExecutorOptions) -> Self {
        let (state, _) = watch::channel(ExecutionState::initial(&options));
        Self {
            backend,
            definition: Mutex::new(Arc::new(definition)),
            state,
            torn_down: AtomicBool::new(false),
            options,
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> ExecutionState {
        self.state.borrow().clone()
    }

    /// Observe state changes.
    pub fn subscribe(&self) -> watch::Receiver<ExecutionState> {
        self.state.subscribe()
    }

    pub fn definition(&self) -> Arc<ExecutionDefinition> {
        Arc::clone(&self.definition.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn options(&self) -> &ExecutorOptions {
        &self.options
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down.load(Ordering::Acquire)
    }

    /// Swap in new inputs.
    ///
    /// If the fingerprint differs, all state is reset and in-flight fetches
    /// are orphaned. Returns whether a reset happened.
    pub fn update_definition(&self, definition: ExecutionDefinition) -> bool {
        if self.is_torn_down() {
            return false;
        }
        {
            let mut current = self.definition.lock().unwrap_or_else(PoisonError::into_inner);
            if current.fingerprint() == definition.fingerprint() {
                return false;
            }
            *current = Arc::new(definition);
        }

        self.state.send_replace(ExecutionState::initial(&self.options));
        debug!(auto_load = self.options.auto_load, "execution inputs changed, state reset");
        true
    }

    /// [`update_definition`](Self::update_definition), then [`load`](Self::load)
    /// if inputs changed and auto-load is on.
    pub async fn refresh(&self, definition: ExecutionDefinition) -> FetchOutcome {
        if self.update_definition(definition) && self.options.auto_load {
            self.load().await
        } else {
            FetchOutcome::Skipped
        }
    }

    /// Fetch a fresh response and then the default page.
    pub async fn load(&self) -> FetchOutcome {
        self.fetch_response_then_result(self.options.default_page.clone())
            .await
    }

    /// Fetch a window of the result.
    ///
    /// Reuses the current response if there is one; otherwise submits the
    /// execution first.
    pub async fn get_page(&self, offset: Vec<u32>, limit: Vec<u32>) -> FetchOutcome {
        let page = PageRequest::new(offset, limit);
        let response = self.state.borrow().response.clone();
        match response {
            Some(response) => self.fetch_result(response, page).await,
            None => self.fetch_response_then_result(page).await,
        }
    }

    /// Re-issue the most recent window, typically after an error.
    pub async fn retry(&self) -> FetchOutcome {
        let page = self.state.borrow().page.clone();
        self.get_page(page.offset, page.limit).await
    }

    /// Stop applying completions. Idempotent.
    pub fn teardown(&self) {
        self.torn_down.store(true, Ordering::Release);
        self.state.send_modify(|s| {
            s.pending_response = None;
            s.pending_result = None;
        });
        debug!("executor torn down");
    }

    fn is_current(&self, pending: Option<&Arc<PendingFetch>>, ticket: &Arc<PendingFetch>) -> bool {
        !self.is_torn_down() && pending.is_some_and(|p| Arc::ptr_eq(p, ticket))
    }

    /// Register `ticket` as the live fetch of `slot` and enter `phase`.
    fn issue(&self, slot: Slot, ticket: &Arc<PendingFetch>, phase: Phase) {
        self.state.send_modify(|s| {
            s.phase = phase;
            s.page = ticket.page.clone();
            s.error = None;
            if let Slot::Response = slot {
                s.pending_result = None;
            }
            *slot.pending(s) = Some(Arc::clone(ticket));
        });
    }

    async fn fetch_response_then_result(&self, page: PageRequest) -> FetchOutcome {
        if self.is_torn_down() {
            return FetchOutcome::Discarded;
        }
        let ticket = Arc::new(PendingFetch::new(page.clone()));
        let definition = self.definition();
        self.issue(Slot::Response, &ticket, Phase::LoadingResponse);
        debug!(request = %ticket.id, "submitting execution");

        let response = match self.backend.submit(&definition).await {
            Ok(response) => Arc::new(response),
            Err(err) => return self.fail(Slot::Response, &ticket, err),
        };

        let applied = self.state.send_if_modified(|s| {
            if !self.is_current(s.pending_response.as_ref(), &ticket) {
                return false;
            }
            s.pending_response = None;
            s.response = Some(Arc::clone(&response));
            s.result = None;
            s.phase = Phase::Idle;
            true
        });
        if !applied {
            debug!(request = %ticket.id, "discarded stale execution response");
            return FetchOutcome::Discarded;
        }

        self.fetch_result(response, page).await
    }

    async fn fetch_result(&self, response: Arc<ResponseDescriptor>, page: PageRequest) -> FetchOutcome {
        if self.is_torn_down() {
            return FetchOutcome::Discarded;
        }
        let ticket = Arc::new(PendingFetch::new(page));
        self.issue(Slot::Result, &ticket, Phase::LoadingResult);
        debug!(
            request = %ticket.id,
            offset = ?ticket.page.offset,
            limit = ?ticket.page.limit,
            "fetching result page"
        );

        let result = match self
            .backend
            .fetch_page(&response, &ticket.page.offset, &ticket.page.limit)
            .await
        {
            Ok(result) => Arc::new(result),
            Err(err) => return self.fail(Slot::Result, &ticket, err),
        };

        let applied = self.state.send_if_modified(|s| {
            if !self.is_current(s.pending_result.as_ref(), &ticket) {
                return false;
            }
            s.pending_result = None;
            s.result = Some(Arc::clone(&result));
            s.phase = Phase::Ready;
            true
        });
        if applied {
            FetchOutcome::Applied
        } else {
            debug!(request = %ticket.id, "discarded stale result page");
            FetchOutcome::Discarded
        }
    }

    fn fail(&self, slot: Slot, ticket: &Arc<PendingFetch>, err: BackendError) -> FetchOutcome {
        let error = ExecutionError::from(&err);
        let applied = self.state.send_if_modified(|s| {
            if !self.is_current(slot.pending(s).as_ref(), ticket) {
                return false;
            }
            *slot.pending(s) = None;
            s.phase = Phase::Error;
            s.error = Some(error.clone());
            true
        });
        if applied {
            warn!(request = %ticket.id, ?slot, %err, "execution fetch failed");
            FetchOutcome::Failed(error)
        } else {
            debug!(request = %ticket.id, ?slot, "discarded stale failure");
            FetchOutcome::Discarded
        }
    }
}
