use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Tracks the current run generation for cancellation and progress.
///
/// Incrementing the generation signals the in-flight run to stop at its
/// next checkpoint — between grid rows for the forward sampler, between
/// rounds for the inverse engines. The progress counters are a side channel
/// for an embedding UI; they carry no numeric meaning.
#[derive(Debug)]
pub struct SampleCancel {
    generation: AtomicU64,
    progress_done: AtomicUsize,
    progress_total: AtomicUsize,
}

impl SampleCancel {
    pub fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
            progress_done: AtomicUsize::new(0),
            progress_total: AtomicUsize::new(0),
        }
    }

    /// Cancel the current run by advancing the generation.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Read the current generation.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Reset progress for a new run with `total` work units
    /// (rows for the sampler, rounds for inverse iteration).
    pub fn reset_progress(&self, total: usize) {
        self.progress_total.store(total, Ordering::Relaxed);
        self.progress_done.store(0, Ordering::Relaxed);
    }

    /// Increment completed work units by one.
    pub fn inc_progress(&self) {
        self.progress_done.fetch_add(1, Ordering::Relaxed);
    }

    /// Read the current progress as `(done, total)`.
    pub fn progress(&self) -> (usize, usize) {
        (
            self.progress_done.load(Ordering::Relaxed),
            self.progress_total.load(Ordering::Relaxed),
        )
    }
}

impl Default for SampleCancel {
    fn default() -> Self {
        Self::new()
    }
}
