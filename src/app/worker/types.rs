//! Worker type definitions

/// Current phase of a download worker
///
/// Workers cycle `Idle -> Dequeuing -> Executing -> Reporting -> Idle` and
/// move to `Shutdown` once the queue is closed and drained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkerStatus {
    /// Between items
    Idle,
    /// Waiting on the queue
    Dequeuing,
    /// Running the retry executor
    Executing,
    /// Updating counters, failure log and progress
    Reporting,
    /// Queue drained, worker finished
    Shutdown,
}

/// What a worker did over its lifetime, returned when it exits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerSummary {
    pub worker_id: usize,
    pub items_processed: u64,
    pub items_failed: u64,
}
