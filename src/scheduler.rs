//! Generation Scheduler
//!
//! Bridges each selected item's [`GenerationJob`] to at most one streamed request.
//! Every stream runs in its own task: it opens the request, decodes frames with a fresh
//! [`StreamDecoder`](crate::decoder::StreamDecoder) and applies them to the job.
//!
//! All job mutation happens under one lock that is never held across an `.await`, so
//! updates to a single job never interleave. Each update re-checks the epoch it was
//! started with; a superseded, cancelled or detached stream can no longer write.

use crate::catalog::{CatalogItem, ItemId};
use crate::decoder::{decode_frames, StreamFrame};
use crate::error::ApiError;
use crate::job::{Epoch, GenerationJob, JobSnapshot, JobStatus};
use crate::transport::{GenerationRequest, GenerationTransport};
use futures::StreamExt;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

/// Default number of buffered events per subscriber.
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Observer notification for one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobEvent {
    pub item_id: ItemId,
    pub epoch: Epoch,
    pub kind: JobEventKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobEventKind {
    Attached,
    Started,
    /// Text was appended; `appended` is the delta length in bytes
    Delta { appended: usize },
    Done,
    Failed { reason: String },
    Cancelled,
    Detached,
}

/// Scheduler statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    pub jobs: usize,
    pub generating: usize,
    pub done: usize,
    pub failed: usize,
    pub active_streams: usize,
}

struct ActiveStream {
    epoch: Epoch,
    token: CancellationToken,
}

#[derive(Default)]
struct JobTable {
    /// Attachment order
    order: Vec<ItemId>,
    jobs: HashMap<ItemId, GenerationJob>,
    streams: HashMap<ItemId, ActiveStream>,
}

impl JobTable {
    /// Drop the stream handle for `item_id` if it still belongs to `epoch`.
    fn release(&mut self, item_id: &ItemId, epoch: Epoch) {
        if self
            .streams
            .get(item_id)
            .is_some_and(|stream| stream.epoch == epoch)
        {
            self.streams.remove(item_id);
        }
    }
}

/// Handle the stream task uses to write back into the table.
struct StreamContext {
    table: Arc<Mutex<JobTable>>,
    events: broadcast::Sender<JobEvent>,
    item_id: ItemId,
    epoch: Epoch,
}

impl StreamContext {
    fn emit(&self, kind: JobEventKind) {
        let _ = self.events.send(JobEvent {
            item_id: self.item_id.clone(),
            epoch: self.epoch,
            kind,
        });
    }

    /// Apply one frame. Returns false when the stream should stop.
    fn apply(&self, frame: StreamFrame) -> bool {
        match frame {
            StreamFrame::TextDelta(delta) => {
                let mut guard = self.table.lock();
                let table = &mut *guard;
                let appended = table
                    .jobs
                    .get_mut(&self.item_id)
                    .is_some_and(|job| job.append(self.epoch, &delta));
                if !appended {
                    trace!(
                        item_id = %self.item_id,
                        epoch = self.epoch,
                        "Dropping stale frame"
                    );
                    return false;
                }
                self.emit(JobEventKind::Delta {
                    appended: delta.len(),
                });
                true
            }
            StreamFrame::EndOfStream => {
                self.complete();
                false
            }
            StreamFrame::Ignored => {
                trace!(item_id = %self.item_id, "Ignoring protocol noise");
                true
            }
        }
    }

    fn complete(&self) {
        let mut guard = self.table.lock();
        let table = &mut *guard;
        let completed = table
            .jobs
            .get_mut(&self.item_id)
            .is_some_and(|job| job.complete(self.epoch));
        if completed {
            table.release(&self.item_id, self.epoch);
            debug!(item_id = %self.item_id, epoch = self.epoch, "Generation done");
            self.emit(JobEventKind::Done);
        }
    }

    fn fail(&self, reason: String) {
        let mut guard = self.table.lock();
        let table = &mut *guard;
        let failed = table
            .jobs
            .get_mut(&self.item_id)
            .is_some_and(|job| job.fail(self.epoch, reason.clone()));
        if failed {
            table.release(&self.item_id, self.epoch);
            warn!(
                item_id = %self.item_id,
                epoch = self.epoch,
                error = %reason,
                "Generation failed"
            );
            self.emit(JobEventKind::Failed { reason });
        }
    }
}

/// Owns every job and its active stream.
pub struct GenerationScheduler {
    table: Arc<Mutex<JobTable>>,
    transport: Arc<dyn GenerationTransport>,
    events: broadcast::Sender<JobEvent>,
}

impl GenerationScheduler {
    pub fn new(transport: Arc<dyn GenerationTransport>) -> Self {
        Self::with_event_capacity(transport, DEFAULT_EVENT_CAPACITY)
    }

    pub fn with_event_capacity(transport: Arc<dyn GenerationTransport>, capacity: usize) -> Self {
        let (events, _) = broadcast::channel(capacity.max(1));
        Self {
            table: Arc::new(Mutex::new(JobTable::default())),
            transport,
            events,
        }
    }

    /// Receive job events from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<JobEvent> {
        self.events.subscribe()
    }

    fn emit(&self, item_id: &ItemId, epoch: Epoch, kind: JobEventKind) {
        let _ = self.events.send(JobEvent {
            item_id: item_id.clone(),
            epoch,
            kind,
        });
    }

    /// Create a fresh `Idle` job for `item`, replacing any previous one.
    pub fn attach(&self, item: CatalogItem) -> JobSnapshot {
        let item_id = item.id.clone();
        self.detach(&item_id);

        let mut guard = self.table.lock();
        let table = &mut *guard;
        let job = GenerationJob::new(item);
        let snapshot = job.snapshot();
        table.order.push(item_id.clone());
        table.jobs.insert(item_id.clone(), job);
        debug!(item_id = %item_id, "Job attached");
        self.emit(&item_id, 0, JobEventKind::Attached);
        snapshot
    }

    /// Destroy the job for `item_id`, cancelling its stream.
    pub fn detach(&self, item_id: &ItemId) -> Option<JobSnapshot> {
        let mut guard = self.table.lock();
        let table = &mut *guard;
        if let Some(stream) = table.streams.remove(item_id) {
            stream.token.cancel();
        }
        let job = table.jobs.remove(item_id)?;
        table.order.retain(|id| id != item_id);
        debug!(item_id = %item_id, epoch = job.epoch(), "Job detached");
        self.emit(item_id, job.epoch(), JobEventKind::Detached);
        Some(job.snapshot())
    }

    /// Edit a job's prompt; rejected with `JobBusy` while it is generating.
    pub fn set_prompt(&self, item_id: &ItemId, prompt: impl Into<String>) -> Result<(), ApiError> {
        let mut guard = self.table.lock();
        let table = &mut *guard;
        let job = table
            .jobs
            .get_mut(item_id)
            .ok_or_else(|| ApiError::ItemNotSelected(item_id.to_string()))?;
        job.set_prompt(prompt)
    }

    /// Start generating for `item_id`, superseding any running generation.
    ///
    /// Must be called from within a Tokio runtime. Returns the new epoch.
    pub fn generate(&self, item_id: &ItemId, prompt: &str) -> Result<Epoch, ApiError> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| {
            ApiError::ConfigError("generation requires a Tokio runtime".to_string())
        })?;

        let mut guard = self.table.lock();
        let table = &mut *guard;
        let job = table
            .jobs
            .get_mut(item_id)
            .ok_or_else(|| ApiError::ItemNotSelected(item_id.to_string()))?;

        let previous_epoch = job.epoch();
        let epoch = job.start_generation(prompt)?;
        let request = GenerationRequest::new(job.item(), prompt);

        if let Some(previous) = table.streams.remove(item_id) {
            previous.token.cancel();
            debug!(
                item_id = %item_id,
                superseded_epoch = previous.epoch,
                "Superseding running generation"
            );
            self.emit(item_id, previous_epoch, JobEventKind::Cancelled);
        }

        let token = CancellationToken::new();
        table.streams.insert(
            item_id.clone(),
            ActiveStream {
                epoch,
                token: token.clone(),
            },
        );

        debug!(
            item_id = %item_id,
            epoch,
            transport = self.transport.name(),
            "Generation started"
        );
        self.emit(item_id, epoch, JobEventKind::Started);
        drop(guard);

        let context = StreamContext {
            table: Arc::clone(&self.table),
            events: self.events.clone(),
            item_id: item_id.clone(),
            epoch,
        };
        runtime.spawn(Self::run_stream(
            context,
            Arc::clone(&self.transport),
            request,
            token,
        ));
        Ok(epoch)
    }

    /// Generate again with the job's stored prompt.
    pub fn regenerate(&self, item_id: &ItemId) -> Result<Epoch, ApiError> {
        let prompt = self
            .table
            .lock()
            .jobs
            .get(item_id)
            .map(|job| job.prompt().to_string())
            .ok_or_else(|| ApiError::ItemNotSelected(item_id.to_string()))?;
        self.generate(item_id, &prompt)
    }

    /// Stop a running generation and return the job to `Idle`.
    ///
    /// Idempotent and infallible: returns false when there was nothing to cancel.
    pub fn cancel(&self, item_id: &ItemId) -> bool {
        let mut guard = self.table.lock();
        let table = &mut *guard;
        let Some(job) = table.jobs.get_mut(item_id) else {
            return false;
        };
        if !job.cancel() {
            return false;
        }
        let epoch = job.epoch();
        if let Some(stream) = table.streams.remove(item_id) {
            stream.token.cancel();
        }
        debug!(item_id = %item_id, epoch, "Generation cancelled");
        self.emit(item_id, epoch, JobEventKind::Cancelled);
        true
    }

    async fn run_stream(
        context: StreamContext,
        transport: Arc<dyn GenerationTransport>,
        request: GenerationRequest,
        token: CancellationToken,
    ) {
        let opened = tokio::select! {
            biased;
            _ = token.cancelled() => {
                trace!(item_id = %context.item_id, epoch = context.epoch, "Cancelled before open");
                return;
            }
            opened = transport.open(request) => opened,
        };

        let body = match opened {
            Ok(body) => body,
            Err(e) => {
                context.fail(e.to_string());
                return;
            }
        };

        let frames = decode_frames(body);
        futures::pin_mut!(frames);

        loop {
            let next = tokio::select! {
                biased;
                _ = token.cancelled() => {
                    trace!(item_id = %context.item_id, epoch = context.epoch, "Stream cancelled");
                    return;
                }
                next = frames.next() => next,
            };

            let keep_going = match next {
                Some(Ok(frame)) => context.apply(frame),
                Some(Err(e)) => {
                    context.fail(e.to_string());
                    false
                }
                None => false,
            };
            if !keep_going {
                return;
            }
        }
    }

    pub fn snapshot(&self, item_id: &ItemId) -> Option<JobSnapshot> {
        self.table.lock().jobs.get(item_id).map(GenerationJob::snapshot)
    }

    /// Snapshots of every job in attachment order.
    pub fn snapshots(&self) -> Vec<JobSnapshot> {
        let table = self.table.lock();
        table
            .order
            .iter()
            .filter_map(|id| table.jobs.get(id))
            .map(GenerationJob::snapshot)
            .collect()
    }

    pub fn done_count(&self) -> usize {
        self.table
            .lock()
            .jobs
            .values()
            .filter(|job| job.status() == JobStatus::Done)
            .count()
    }

    pub fn active_streams(&self) -> usize {
        self.table.lock().streams.len()
    }

    pub fn stats(&self) -> SchedulerStats {
        let table = self.table.lock();
        let count = |status: JobStatus| {
            table
                .jobs
                .values()
                .filter(|job| job.status() == status)
                .count()
        };
        SchedulerStats {
            jobs: table.jobs.len(),
            generating: count(JobStatus::Generating),
            done: count(JobStatus::Done),
            failed: count(JobStatus::Error),
            active_streams: table.streams.len(),
        }
    }

    /// Wait until the job is no longer generating.
    ///
    /// Returns `None` if the job does not exist (or is detached while waiting).
    pub async fn wait_settled(&self, item_id: &ItemId) -> Option<JobSnapshot> {
        let mut events = self.events.subscribe();
        loop {
            let snapshot = self.snapshot(item_id)?;
            if snapshot.status != JobStatus::Generating {
                return Some(snapshot);
            }
            match events.recv().await {
                Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => {}
                Err(broadcast::error::RecvError::Closed) => return self.snapshot(item_id),
            }
        }
    }

    /// Cancel every stream and destroy every job.
    pub fn shutdown(&self) {
        let ids: Vec<ItemId> = self.table.lock().order.clone();
        for id in &ids {
            self.detach(id);
        }
        debug!(jobs = ids.len(), "Scheduler shut down");
    }
}

impl Drop for GenerationScheduler {
    fn drop(&mut self) {
        let table = self.table.lock();
        for stream in table.streams.values() {
            stream.token.cancel();
        }
    }
}
