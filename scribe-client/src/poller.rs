//! Job status poller
//!
//! Keeps a local job list fresh while any job is queued, pending or
//! processing. Every refresh replaces the whole list. Refreshes draw a ticket
//! from a monotonically increasing sequence, and a reply is only applied when
//! its ticket is newer than the snapshot currently held, so a slow reply can
//! never overwrite a newer one.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use scribe_core::domain::job::{Job, JobCounts, requires_polling};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::error::{ClientError, Result};
use crate::{Session, TranscriptionClient};

/// Refresh interval used by the web client
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

/// Something that can fetch the full job list
#[async_trait]
pub trait JobSource: Send + Sync {
    async fn fetch_jobs(&self) -> Result<Vec<Job>>;
}

/// The HTTP client bound to one session
#[derive(Debug, Clone)]
pub struct SessionJobs {
    client: TranscriptionClient,
    session: Session,
}

impl SessionJobs {
    pub fn new(client: TranscriptionClient, session: Session) -> Self {
        Self { client, session }
    }
}

#[async_trait]
impl JobSource for SessionJobs {
    async fn fetch_jobs(&self) -> Result<Vec<Job>> {
        self.client.list_jobs(&self.session).await
    }
}

/// Accepted state of the job list
#[derive(Debug, Clone, Default)]
pub struct JobSnapshot {
    /// Ticket of the refresh that produced this snapshot, 0 before the first
    pub seq: u64,
    pub jobs: Vec<Job>,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl JobSnapshot {
    pub fn requires_polling(&self) -> bool {
        requires_polling(&self.jobs)
    }

    pub fn counts(&self) -> JobCounts {
        JobCounts::from_jobs(&self.jobs)
    }
}

/// Sequence number of one refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn seq(self) -> u64 {
        self.0
    }
}

/// Holder of the latest snapshot, published through a watch channel
#[derive(Debug)]
pub struct JobBoard {
    next_seq: AtomicU64,
    tx: watch::Sender<JobSnapshot>,
}

impl Default for JobBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl JobBoard {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(JobSnapshot::default());
        Self {
            next_seq: AtomicU64::new(1),
            tx,
        }
    }

    /// Issue the ticket for a refresh about to start
    pub fn begin(&self) -> Ticket {
        Ticket(self.next_seq.fetch_add(1, Ordering::Relaxed))
    }

    /// Apply a reply; returns `false` if a newer snapshot is already held
    pub fn apply(&self, ticket: Ticket, jobs: Vec<Job>) -> bool {
        self.tx.send_if_modified(move |current| {
            if ticket.0 <= current.seq {
                return false;
            }
            *current = JobSnapshot {
                seq: ticket.0,
                jobs,
                fetched_at: Some(Utc::now()),
            };
            true
        })
    }

    pub fn snapshot(&self) -> JobSnapshot {
        self.tx.borrow().clone()
    }

    /// Receiver notified on every accepted snapshot
    pub fn subscribe(&self) -> watch::Receiver<JobSnapshot> {
        self.tx.subscribe()
    }
}

/// Re-fetches jobs at a fixed interval until all of them are terminal
pub struct JobPoller<S> {
    source: Arc<S>,
    board: Arc<JobBoard>,
    interval: Duration,
}

impl<S: JobSource + 'static> JobPoller<S> {
    pub fn new(source: S, interval: Duration) -> Self {
        Self::with_board(Arc::new(source), Arc::new(JobBoard::new()), interval)
    }

    /// Share a board with other writers, e.g. manual refreshes after a delete
    pub fn with_board(source: Arc<S>, board: Arc<JobBoard>, interval: Duration) -> Self {
        Self {
            source,
            board,
            interval,
        }
    }

    pub fn board(&self) -> Arc<JobBoard> {
        Arc::clone(&self.board)
    }

    pub fn subscribe(&self) -> watch::Receiver<JobSnapshot> {
        self.board.subscribe()
    }

    /// Run one ticketed fetch; returns whether the reply was applied
    pub async fn refresh(&self) -> Result<bool> {
        let ticket = self.board.begin();
        let jobs = self.source.fetch_jobs().await?;
        let count = jobs.len();

        let applied = self.board.apply(ticket, jobs);
        if applied {
            debug!(seq = ticket.seq(), jobs = count, "job snapshot updated");
        } else {
            debug!(seq = ticket.seq(), "discarding stale job snapshot");
        }
        Ok(applied)
    }

    /// Fetch once, then keep refreshing while any job is non-terminal
    ///
    /// A failed initial fetch is returned. Later failures are logged and the
    /// previous snapshot is kept; the next tick tries again.
    pub async fn run(&self) -> Result<()> {
        self.refresh().await?;

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately
        ticker.tick().await;

        if self.board.snapshot().requires_polling() {
            info!("Polling job status (interval: {:?})", self.interval);
        }

        while self.board.snapshot().requires_polling() {
            ticker.tick().await;

            if let Err(e) = self.refresh().await {
                warn!("Failed to refresh jobs: {}", e);
            }
        }

        debug!("No outstanding jobs, polling stopped");
        Ok(())
    }

    /// Run the poller on its own task
    pub fn spawn(self) -> PollerHandle {
        let board = self.board();
        let task = tokio::spawn(async move { self.run().await });
        PollerHandle {
            task: Some(task),
            board,
        }
    }
}

/// Handle to a spawned poller; dropping it cancels the timer
pub struct PollerHandle {
    /// `None` once `wait` has reported the outcome
    task: Option<JoinHandle<Result<()>>>,
    board: Arc<JobBoard>,
}

impl PollerHandle {
    pub fn subscribe(&self) -> watch::Receiver<JobSnapshot> {
        self.board.subscribe()
    }

    pub fn snapshot(&self) -> JobSnapshot {
        self.board.snapshot()
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Cancel the poller
    pub fn stop(&self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }

    /// Wait until polling stops on its own or is cancelled
    ///
    /// The outcome is reported once; later calls return `Ok(())`.
    pub async fn wait(&mut self) -> Result<()> {
        let Some(task) = self.task.as_mut() else {
            return Ok(());
        };

        let joined = task.await;
        self.task = None;

        match joined {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Ok(()),
            Err(e) => Err(ClientError::InternalError(format!(
                "poller task failed: {}",
                e
            ))),
        }
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
