//! ExecutionBackend trait definition.

use async_trait::async_trait;

use super::error::BackendResult;
use super::protocol::{ResponseDescriptor, ResultPayload};
use crate::execution::ExecutionDefinition;

/// Transport collaborator that talks to the analytical backend.
///
/// Two suspension points exist in the execution protocol, and they are
/// exactly these two calls. Timeouts and retries inside a call are the
/// implementation's business.
///
/// # Example
///
/// ```ignore
/// use vizexec::executor::ExecutionBackend;
///
/// async fn first_page(backend: &impl ExecutionBackend, definition: &ExecutionDefinition) {
///     let response = backend.submit(definition).await?;
///     let page = backend.fetch_page(&response, &[0, 0], &[1000, 1000]).await?;
/// }
/// ```
#[async_trait]
pub trait ExecutionBackend: Send + Sync {
    /// Submit an execution and get its response descriptor.
    async fn submit(&self, definition: &ExecutionDefinition) -> BackendResult<ResponseDescriptor>;

    /// Fetch one page of the result described by `response`.
    async fn fetch_page(
        &self,
        response: &ResponseDescriptor,
        offset: &[u32],
        limit: &[u32],
    ) -> BackendResult<ResultPayload>;
}
