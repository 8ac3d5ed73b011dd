//! Bounded ring buffer with one level of clear/restore undo

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

/// Largest capacity a buffer can be created with
pub const MAX_CAPACITY: usize = 2048;

struct Slots<T> {
    live: VecDeque<T>,
    /// Window hidden by the last `clear`, if it has not been restored
    shadow: Option<VecDeque<T>>,
}

/// Fixed-capacity, multi-producer ring of log entries.
///
/// Appends never block on capacity: once full, each append evicts the oldest
/// live entry. Every operation takes a single lock, so snapshots are
/// consistent with concurrent appends, clears and restores.
///
/// # Example
///
/// ```
/// use rust_rich_log::core::LogRingBuffer;
///
/// let buffer = LogRingBuffer::new(2);
/// buffer.add(1);
/// buffer.add(2);
/// assert!(buffer.add(3)); // evicted 1
///
/// let mut snapshot = Vec::new();
/// buffer.take_snapshot(&mut snapshot);
/// assert_eq!(snapshot, vec![2, 3]);
/// ```
pub struct LogRingBuffer<T> {
    slots: Mutex<Slots<T>>,
    capacity: usize,
    total_added: AtomicU64,
}

impl<T: Clone> LogRingBuffer<T> {
    /// Create a buffer; `capacity` is clamped into `1..=MAX_CAPACITY`
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, MAX_CAPACITY);
        Self {
            slots: Mutex::new(Slots {
                live: VecDeque::with_capacity(capacity),
                shadow: None,
            }),
            capacity,
            total_added: AtomicU64::new(0),
        }
    }

    /// Append an entry, evicting the oldest when full.
    ///
    /// Returns `true` if an entry was evicted.
    pub fn add(&self, entry: T) -> bool {
        let mut slots = self.slots.lock();
        let evicted = if slots.live.len() >= self.capacity {
            slots.live.pop_front();
            true
        } else {
            false
        };
        slots.live.push_back(entry);
        drop(slots);

        self.total_added.fetch_add(1, Ordering::Relaxed);
        evicted
    }

    /// Hide every live entry, keeping them for a later [`restore`](Self::restore).
    ///
    /// Clearing an empty view replaces any earlier saved window, so a restore
    /// reproduces the empty view.
    pub fn clear(&self) {
        let mut slots = self.slots.lock();
        let cleared = std::mem::replace(&mut slots.live, VecDeque::with_capacity(self.capacity));
        slots.shadow = Some(cleared);
    }

    /// Bring back the window hidden by the last clear.
    ///
    /// Entries added since the clear follow the restored window; the oldest
    /// entries are dropped if the result exceeds capacity. Returns `false`
    /// when there was nothing to restore.
    pub fn restore(&self) -> bool {
        let mut slots = self.slots.lock();
        let Some(mut restored) = slots.shadow.take() else {
            return false;
        };

        restored.append(&mut slots.live);
        let excess = restored.len().saturating_sub(self.capacity);
        restored.drain(..excess);
        slots.live = restored;
        true
    }

    /// Copy the live entries, oldest first, into `dest`.
    ///
    /// `dest` is cleared first and its allocation reused.
    pub fn take_snapshot(&self, dest: &mut Vec<T>) {
        dest.clear();
        let slots = self.slots.lock();
        dest.extend(slots.live.iter().cloned());
    }

    pub fn len(&self) -> usize {
        self.slots.lock().live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.lock().live.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries ever added, including evicted ones
    pub fn total_added(&self) -> u64 {
        self.total_added.load(Ordering::Relaxed)
    }

    /// Whether a cleared window is waiting to be restored
    pub fn has_shadow(&self) -> bool {
        self.slots.lock().shadow.is_some()
    }
}

impl<T> std::fmt::Debug for LogRingBuffer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slots = self.slots.lock();
        f.debug_struct("LogRingBuffer")
            .field("capacity", &self.capacity)
            .field("len", &slots.live.len())
            .field("has_shadow", &slots.shadow.is_some())
            .finish()
    }
}
