//! Pipeline metrics for observability
//!
//! Counters for entry intake, ring-buffer evictions and document deliveries.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for pipeline observability
///
/// # Example
///
/// ```
/// use rust_rich_log::core::PipelineMetrics;
///
/// let metrics = PipelineMetrics::new();
/// metrics.record_posted();
/// metrics.record_flush(1);
///
/// assert_eq!(metrics.posted(), 1);
/// assert_eq!(metrics.flushes(), 1);
/// assert_eq!(metrics.last_flush_entries(), 1);
/// ```
#[derive(Debug)]
pub struct PipelineMetrics {
    /// Entries accepted by `post`
    posted: AtomicU64,

    /// Entries pushed out of the ring buffer by newer ones
    evicted: AtomicU64,

    /// Documents handed to the display surface
    flushes: AtomicU64,

    /// Entries rendered into the most recent document
    last_flush_entries: AtomicU64,

    /// Renders not delivered because of cancellation or a disposed surface
    skipped_deliveries: AtomicU64,

    /// Deliveries the surface rejected
    failed_deliveries: AtomicU64,

    /// Messages cut to the configured maximum length
    truncated_messages: AtomicU64,
}

impl PipelineMetrics {
    pub const fn new() -> Self {
        Self {
            posted: AtomicU64::new(0),
            evicted: AtomicU64::new(0),
            flushes: AtomicU64::new(0),
            last_flush_entries: AtomicU64::new(0),
            skipped_deliveries: AtomicU64::new(0),
            failed_deliveries: AtomicU64::new(0),
            truncated_messages: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn posted(&self) -> u64 {
        self.posted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn evicted(&self) -> u64 {
        self.evicted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn flushes(&self) -> u64 {
        self.flushes.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn last_flush_entries(&self) -> u64 {
        self.last_flush_entries.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn skipped_deliveries(&self) -> u64 {
        self.skipped_deliveries.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn failed_deliveries(&self) -> u64 {
        self.failed_deliveries.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn truncated_messages(&self) -> u64 {
        self.truncated_messages.load(Ordering::Relaxed)
    }

    /// Record an accepted entry; returns the previous count
    #[inline]
    pub fn record_posted(&self) -> u64 {
        self.posted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_evicted(&self) -> u64 {
        self.evicted.fetch_add(1, Ordering::Relaxed)
    }

    /// Record a delivered document rendered from `entries` entries
    #[inline]
    pub fn record_flush(&self, entries: usize) -> u64 {
        self.last_flush_entries.store(entries as u64, Ordering::Relaxed);
        self.flushes.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_skipped_delivery(&self) -> u64 {
        self.skipped_deliveries.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failed_delivery(&self) -> u64 {
        self.failed_deliveries.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_truncated(&self) -> u64 {
        self.truncated_messages.fetch_add(1, Ordering::Relaxed)
    }

    /// Evicted entries as a percentage of posted ones (0.0 - 100.0)
    pub fn eviction_rate(&self) -> f64 {
        let posted = self.posted() as f64;
        if posted == 0.0 {
            0.0
        } else {
            (self.evicted() as f64 / posted) * 100.0
        }
    }

    pub fn reset(&self) {
        self.posted.store(0, Ordering::Relaxed);
        self.evicted.store(0, Ordering::Relaxed);
        self.flushes.store(0, Ordering::Relaxed);
        self.last_flush_entries.store(0, Ordering::Relaxed);
        self.skipped_deliveries.store(0, Ordering::Relaxed);
        self.failed_deliveries.store(0, Ordering::Relaxed);
        self.truncated_messages.store(0, Ordering::Relaxed);
    }
}

impl Default for PipelineMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for PipelineMetrics {
    /// Snapshot of the current values
    fn clone(&self) -> Self {
        Self {
            posted: AtomicU64::new(self.posted()),
            evicted: AtomicU64::new(self.evicted()),
            flushes: AtomicU64::new(self.flushes()),
            last_flush_entries: AtomicU64::new(self.last_flush_entries()),
            skipped_deliveries: AtomicU64::new(self.skipped_deliveries()),
            failed_deliveries: AtomicU64::new(self.failed_deliveries()),
            truncated_messages: AtomicU64::new(self.truncated_messages()),
        }
    }
}
