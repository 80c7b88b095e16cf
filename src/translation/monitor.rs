/*!
 * Selection monitor: the poll loop and everything it drives.
 *
 * The `Monitor` owns the pipeline state (last selection, counters) and is the
 * only code that touches it. Every accepted change is turned into an
 * immutable `TranslationRequest` and moved into its own task; at most
 * `concurrent_requests` lookups run at once and a text that is already being
 * looked up is not dispatched again.
 *
 * Finished results travel over a channel to a single ordering task that owns
 * the reorder buffer and the renderer, so output appears in selection order
 * no matter which lookup finishes first. A lookup task that panics is
 * replaced by a `Failed` result for its request, so it never holds back the
 * results behind it.
 */

use log::{debug, error, info, warn};
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Semaphore, mpsc};
use tokio::task::{Id, JoinError, JoinHandle, JoinSet};

use super::queue::ReorderBuffer;
use super::router::{RejectReason, RouteDecision, TranslationRouter};
use super::service::Translator;
use super::types::{LookupKind, TranslationRequest, TranslationResult};
use crate::app_config::Config;
use crate::render::Renderer;
use crate::selection::{ChangeDetector, Selection, SelectionSource, normalize, normalize_lines};

/// Upper bound for the poll delay while the selection source keeps failing
const MAX_SOURCE_BACKOFF: Duration = Duration::from_secs(5);

/// What one poll did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// The selection could not be read
    SourceError,
    /// Same text as last time
    Unchanged,
    /// Nothing is selected
    Blank,
    /// The text was refused and a notice emitted
    Rejected(RejectReason),
    /// The text is already being looked up
    Duplicate,
    /// A lookup was started with this sequence index
    Dispatched(u64),
}

/// Counters reported when the monitor stops
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonitorStats {
    /// Polls performed
    pub polls: u64,
    /// Polls whose read failed
    pub source_errors: u64,
    /// Selections refused by the router
    pub rejected: u64,
    /// Lookups started
    pub dispatched: u64,
    /// Changes skipped because the same text was in flight
    pub duplicates: u64,
    /// Results written by the renderer
    pub rendered: u64,
}

/// Messages for the ordering task
enum Output {
    /// Shown right away, outside the sequence
    Notice(String),
    /// Shown once every earlier index has been shown
    Result(TranslationResult),
}

/// Polls a selection source and drives lookups and rendering
pub struct Monitor<S: SelectionSource> {
    source: S,
    translator: Arc<Translator>,
    router: TranslationRouter,
    detector: ChangeDetector,
    line_aware: bool,
    poll_interval: Duration,
    /// Index of the next selection read
    selection_counter: u64,
    /// Sequence index of the next request
    request_counter: u64,
    permits: Arc<Semaphore>,
    in_flight: Arc<Mutex<HashSet<String>>>,
    tasks: JoinSet<()>,
    /// Request of every task that has not been joined yet
    pending: HashMap<Id, TranslationRequest>,
    output: mpsc::UnboundedSender<Output>,
    orderer: JoinHandle<u64>,
    stats: MonitorStats,
}

impl<S: SelectionSource> Monitor<S> {
    /// Create a monitor and start its ordering task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(source: S, translator: Translator, renderer: Renderer, config: &Config) -> Self {
        let (output, results) = mpsc::unbounded_channel();
        let orderer = tokio::spawn(order_results(results, renderer));

        Self {
            source,
            translator: Arc::new(translator),
            router: TranslationRouter::from_config(config),
            detector: ChangeDetector::new(),
            line_aware: config.selection.line_aware,
            poll_interval: config.poll_interval(),
            selection_counter: 0,
            request_counter: 0,
            permits: Arc::new(Semaphore::new(config.concurrent_requests.max(1))),
            in_flight: Arc::new(Mutex::new(HashSet::new())),
            tasks: JoinSet::new(),
            pending: HashMap::new(),
            output,
            orderer,
            stats: MonitorStats::default(),
        }
    }

    /// Counters so far; `rendered` is only filled in by `shutdown`
    pub fn stats(&self) -> &MonitorStats {
        &self.stats
    }

    /// Read the selection once and act on it
    pub async fn poll_once(&mut self) -> PollOutcome {
        self.stats.polls += 1;
        self.reap_finished();

        let selection = match self.source.read().await {
            Ok(raw) => {
                let text = if self.line_aware {
                    normalize_lines(&raw)
                } else {
                    normalize(&raw)
                };
                let selection = Selection::new(text, self.selection_counter);
                self.selection_counter += 1;
                selection
            }
            Err(e) => {
                error!("Failed to read selection: {}", e);
                self.stats.source_errors += 1;
                self.detector.observe(Selection::invalid());
                return PollOutcome::SourceError;
            }
        };

        let text = selection.text.clone();
        if !self.detector.observe(selection) {
            return if text.is_empty() {
                PollOutcome::Blank
            } else {
                PollOutcome::Unchanged
            };
        }

        let kind = match self.router.route(&text) {
            RouteDecision::Reject(reason) => return self.reject(reason).await,
            RouteDecision::ShortLookup => LookupKind::Short,
            RouteDecision::LongTranslate => LookupKind::Long,
        };

        if !self.in_flight.lock().insert(text.clone()) {
            debug!("'{}' is already being looked up", text);
            self.stats.duplicates += 1;
            return PollOutcome::Duplicate;
        }

        let request = TranslationRequest::new(text, self.request_counter, kind);
        self.request_counter += 1;
        self.stats.dispatched += 1;
        info!(
            "Looking up #{} ({:?}): {}",
            request.sequence_index, request.kind, request.source_text
        );

        let index = request.sequence_index;
        self.dispatch(request);
        PollOutcome::Dispatched(index)
    }

    /// Poll until `shutdown` resolves, then wait for the outstanding lookups
    pub async fn run<F>(mut self, shutdown: F) -> MonitorStats
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut consecutive_errors = 0u32;

        loop {
            if self.poll_once().await == PollOutcome::SourceError {
                consecutive_errors = consecutive_errors.saturating_add(1);
            } else {
                consecutive_errors = 0;
            }

            tokio::select! {
                _ = &mut shutdown => break,
                _ = tokio::time::sleep(self.next_delay(consecutive_errors)) => {}
            }
        }

        info!("Stopping monitor");
        self.shutdown().await
    }

    /// Wait for every dispatched lookup, flush the output and return the counters
    pub async fn shutdown(mut self) -> MonitorStats {
        while let Some(joined) = self.tasks.join_next_with_id().await {
            self.joined(joined);
        }

        drop(self.output);
        match self.orderer.await {
            Ok(rendered) => self.stats.rendered = rendered,
            Err(e) => error!("Output task failed: {}", e),
        }

        self.stats
    }

    /// Delay before the next poll; doubles per consecutive source error
    fn next_delay(&self, consecutive_errors: u32) -> Duration {
        if consecutive_errors == 0 {
            return self.poll_interval;
        }
        self.poll_interval
            .saturating_mul(1u32 << consecutive_errors.min(16))
            .min(MAX_SOURCE_BACKOFF)
    }

    async fn reject(&mut self, reason: RejectReason) -> PollOutcome {
        warn!("Rejecting selection: {}", reason);
        self.stats.rejected += 1;
        let _ = self.output.send(Output::Notice(reason.to_string()));

        if let Err(e) = self.source.clear().await {
            warn!("Failed to clear selection: {}", e);
        }
        PollOutcome::Rejected(reason)
    }

    fn dispatch(&mut self, request: TranslationRequest) {
        let translator = Arc::clone(&self.translator);
        let permits = Arc::clone(&self.permits);
        let in_flight = Arc::clone(&self.in_flight);
        let output = self.output.clone();
        let index = request.sequence_index;
        let snapshot = request.clone();

        let handle = self.tasks.spawn(async move {
            let result = match permits.acquire().await {
                Ok(_permit) => translator.translate(&request).await,
                Err(_) => TranslationResult::failed(&request, "lookup cancelled"),
            };

            in_flight.lock().remove(&request.source_text);
            if output.send(Output::Result(result)).is_err() {
                warn!("Result #{} arrived after output closed", request.sequence_index);
            }
        });
        debug!("Lookup #{} runs as task {}", index, handle.id());
        self.pending.insert(handle.id(), snapshot);
    }

    fn reap_finished(&mut self) {
        while let Some(joined) = self.tasks.try_join_next_with_id() {
            self.joined(joined);
        }
    }

    /// Book-keeping for a joined task. A task that died without sending its
    /// result gets a `Failed` one so later results keep flowing.
    fn joined(&mut self, joined: Result<(Id, ()), JoinError>) {
        let error = match joined {
            Ok((id, ())) => {
                self.pending.remove(&id);
                return;
            }
            Err(e) => e,
        };

        let Some(request) = self.pending.remove(&error.id()) else {
            error!("Lookup task failed: {}", error);
            return;
        };

        error!("Lookup #{} for '{}' failed: {}", request.sequence_index, request.source_text, error);
        self.in_flight.lock().remove(&request.source_text);
        let reason = if error.is_panic() {
            "lookup panicked"
        } else {
            "lookup cancelled"
        };
        let _ = self.output.send(Output::Result(TranslationResult::failed(&request, reason)));
    }
}

/// Ordering task: renders notices at once and results in sequence order.
/// Returns the number of results rendered.
async fn order_results(mut outputs: mpsc::UnboundedReceiver<Output>, mut renderer: Renderer) -> u64 {
    let mut buffer: ReorderBuffer<TranslationResult> = ReorderBuffer::new();
    let mut rendered = 0;

    while let Some(output) = outputs.recv().await {
        match output {
            Output::Notice(message) => {
                if let Err(e) = renderer.notice(&message) {
                    error!("Failed to write notice: {}", e);
                }
            }
            Output::Result(result) => {
                buffer.push(result);
                for ready in buffer.drain_ready() {
                    if let Err(e) = renderer.render(&ready) {
                        error!("Failed to write result #{}: {}", ready.sequence_index, e);
                    }
                    rendered += 1;
                }
            }
        }
    }

    for late in buffer.drain_all() {
        warn!("Flushing result #{} without its predecessors", late.sequence_index);
        if let Err(e) = renderer.render(&late) {
            error!("Failed to write result #{}: {}", late.sequence_index, e);
        }
        rendered += 1;
    }

    rendered
}
