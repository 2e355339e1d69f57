//! Microagent query
//!
//! [`MicroagentsQuery`] is what the modal polls every frame. It owns the
//! cached list for one conversation, starts fetches on the tokio runtime
//! when the query is enabled, and reports the familiar
//! `data / is_loading / is_error / is_refetching` flags.
//!
//! Flag rules:
//! - *fetching*: a request is in flight
//! - *pending*: nothing has completed yet (no data, no error)
//! - `is_loading` = pending and fetching
//! - `is_refetching` = fetching but not pending
//! - `is_error` = the last completed request failed; earlier data is kept
//!
//! There are no automatic retries. A failed query stays failed until
//! [`MicroagentsQuery::refetch`] succeeds.

use crate::error::FetchError;
use crate::state::{AgentState, Microagent};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Anything that can list the microagents of a conversation
#[async_trait]
pub trait MicroagentSource: Send + Sync {
    /// Fetch the microagents loaded into `conversation_id`, in server order
    async fn list_microagents(&self, conversation_id: &str)
        -> Result<Vec<Microagent>, FetchError>;
}

/// Inputs the modal passes on every poll
#[derive(Debug, Clone, Copy)]
pub struct QueryOptions<'a> {
    /// Current agent run-state
    pub agent_state: AgentState,
    /// Conversation to query, if any
    pub conversation_id: Option<&'a str>,
    /// Caller-side switch; the modal always passes `true`
    pub enabled: bool,
}

impl QueryOptions<'_> {
    /// Whether the query may fetch on its own
    pub fn is_enabled(&self) -> bool {
        self.enabled && self.conversation_id.is_some() && self.agent_state.is_ready()
    }
}

/// Snapshot of the query returned by [`MicroagentsQuery::poll`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    /// Last successfully fetched list
    pub data: Option<Arc<Vec<Microagent>>>,
    /// First fetch in progress
    pub is_loading: bool,
    /// Last fetch failed
    pub is_error: bool,
    /// Background fetch in progress while data or an error is already present
    pub is_refetching: bool,
}

struct InFlight {
    rx: oneshot::Receiver<Result<Vec<Microagent>, FetchError>>,
    handle: JoinHandle<()>,
}

/// Cached, cancellable microagent query for a single conversation
pub struct MicroagentsQuery {
    source: Arc<dyn MicroagentSource>,
    runtime: Handle,
    repaint: Option<egui::Context>,
    stale_time: Duration,
    cache_time: Duration,
    conversation_id: Option<String>,
    data: Option<Arc<Vec<Microagent>>>,
    last_error: Option<String>,
    updated_at: Option<Instant>,
    unmounted_at: Option<Instant>,
    refetch_on_poll: bool,
    in_flight: Option<InFlight>,
}

impl MicroagentsQuery {
    /// Default age after which cached data is refetched on mount
    pub const DEFAULT_STALE_TIME: Duration = Duration::from_secs(5 * 60);
    /// Default lifetime of cached data while no modal is mounted
    pub const DEFAULT_CACHE_TIME: Duration = Duration::from_secs(15 * 60);

    /// Create a query that fetches from `source` on `runtime`
    pub fn new(source: Arc<dyn MicroagentSource>, runtime: Handle) -> Self {
        Self {
            source,
            runtime,
            repaint: None,
            stale_time: Self::DEFAULT_STALE_TIME,
            cache_time: Self::DEFAULT_CACHE_TIME,
            conversation_id: None,
            data: None,
            last_error: None,
            updated_at: None,
            unmounted_at: None,
            refetch_on_poll: false,
            in_flight: None,
        }
    }

    /// Request an egui repaint whenever a fetch completes
    pub fn with_repaint(mut self, ctx: egui::Context) -> Self {
        self.repaint = Some(ctx);
        self
    }

    /// Override stale time and cache lifetime
    pub fn with_timings(mut self, stale_time: Duration, cache_time: Duration) -> Self {
        self.stale_time = stale_time;
        self.cache_time = cache_time;
        self
    }

    /// Message of the last failed fetch, if the query is in error
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Collect finished fetches, start new ones when enabled, and report
    /// the current flags
    pub fn poll(&mut self, options: &QueryOptions<'_>) -> QueryResult {
        if options.conversation_id != self.conversation_id.as_deref() {
            self.reset(options.conversation_id.map(str::to_string));
        }

        self.collect();

        if options.is_enabled() && self.in_flight.is_none() {
            if self.is_pending() {
                self.start();
            } else if self.refetch_on_poll {
                debug!("Cached microagents are stale, refetching");
                self.start();
            }
        }

        self.result()
    }

    /// Start a new fetch for the current conversation, cancelling any
    /// request already in flight. Ignores the enabled flag.
    pub fn refetch(&mut self) {
        if self.conversation_id.is_none() {
            debug!("Refetch ignored: no conversation selected");
            return;
        }
        self.start();
    }

    /// Called when a modal starts showing this query.
    /// Drops the cache if it outlived the cache lifetime and schedules a
    /// background refetch if the data is stale.
    pub fn mount(&mut self) {
        let now = Instant::now();
        if let Some(unmounted_at) = self.unmounted_at.take() {
            if now.duration_since(unmounted_at) > self.cache_time {
                debug!("Microagent cache expired, discarding");
                self.data = None;
                self.last_error = None;
                self.updated_at = None;
            }
        }
        let stale = self
            .updated_at
            .map(|at| now.duration_since(at) >= self.stale_time)
            .unwrap_or(false);
        self.refetch_on_poll = stale;
    }

    /// Called when the modal showing this query closes
    pub fn unmount(&mut self) {
        self.unmounted_at = Some(Instant::now());
        self.refetch_on_poll = false;
    }

    fn is_pending(&self) -> bool {
        self.data.is_none() && self.last_error.is_none()
    }

    fn result(&self) -> QueryResult {
        let fetching = self.in_flight.is_some();
        let pending = self.is_pending();
        QueryResult {
            data: self.data.clone(),
            is_loading: pending && fetching,
            is_error: self.last_error.is_some(),
            is_refetching: fetching && !pending,
        }
    }

    fn reset(&mut self, conversation_id: Option<String>) {
        self.cancel();
        debug!(
            from = ?self.conversation_id,
            to = ?conversation_id,
            "Conversation changed, resetting microagent query"
        );
        self.conversation_id = conversation_id;
        self.data = None;
        self.last_error = None;
        self.updated_at = None;
        self.refetch_on_poll = false;
    }

    fn cancel(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.handle.abort();
        }
    }

    fn start(&mut self) {
        let Some(conversation_id) = self.conversation_id.clone() else {
            return;
        };
        self.cancel();
        self.refetch_on_poll = false;

        let (tx, rx) = oneshot::channel();
        let source = Arc::clone(&self.source);
        let repaint = self.repaint.clone();

        debug!(conversation_id = %conversation_id, "Fetching microagents");
        let handle = self.runtime.spawn(async move {
            let result = source.list_microagents(&conversation_id).await;
            // The receiver is gone if the query moved on
            let _ = tx.send(result);
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });

        self.in_flight = Some(InFlight { rx, handle });
    }

    fn collect(&mut self) {
        let Some(in_flight) = self.in_flight.as_mut() else {
            return;
        };

        let outcome = match in_flight.rx.try_recv() {
            Ok(outcome) => outcome,
            Err(oneshot::error::TryRecvError::Empty) => return,
            Err(oneshot::error::TryRecvError::Closed) => Err(FetchError::Interrupted),
        };
        self.in_flight = None;

        match outcome {
            Ok(microagents) => {
                info!(
                    conversation_id = ?self.conversation_id,
                    count = microagents.len(),
                    "Microagents loaded"
                );
                self.data = Some(Arc::new(microagents));
                self.last_error = None;
                self.updated_at = Some(Instant::now());
            }
            Err(e) => {
                warn!(
                    conversation_id = ?self.conversation_id,
                    error = %e,
                    "Failed to fetch microagents"
                );
                self.last_error = Some(e.to_string());
            }
        }
    }
}

impl Drop for MicroagentsQuery {
    fn drop(&mut self) {
        self.cancel();
    }
}
