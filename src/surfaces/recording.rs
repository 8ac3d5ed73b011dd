//! In-memory surface that keeps every delivered document

use super::DisplaySurface;
use crate::core::{CancellationToken, PipelineError, Result};
use crate::theme::Style;
use parking_lot::{Condvar, Mutex};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// One document handed to a [`RecordingSurface`]
#[derive(Debug, Clone)]
pub struct Delivery {
    pub document: String,
    pub auto_scroll: bool,
    pub at: Instant,
}

/// Surface that records deliveries, for tests, benchmarks and headless hosts
#[derive(Debug)]
pub struct RecordingSurface {
    name: String,
    deliveries: Mutex<Vec<Delivery>>,
    delivered: Condvar,
    default_style: Mutex<Option<Style>>,
    disposed: AtomicBool,
    failing: AtomicBool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::named("recording")
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            deliveries: Mutex::new(Vec::new()),
            delivered: Condvar::new(),
            default_style: Mutex::new(None),
            disposed: AtomicBool::new(false),
            failing: AtomicBool::new(false),
        }
    }

    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.lock().clone()
    }

    pub fn delivery_count(&self) -> usize {
        self.deliveries.lock().len()
    }

    pub fn last_document(&self) -> Option<String> {
        self.deliveries.lock().last().map(|d| d.document.clone())
    }

    pub fn default_style(&self) -> Option<Style> {
        *self.default_style.lock()
    }

    /// Block until at least `count` documents arrived or `timeout` elapsed
    pub fn wait_for_deliveries(&self, count: usize, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut deliveries = self.deliveries.lock();
        while deliveries.len() < count {
            if self.delivered.wait_until(&mut deliveries, deadline).timed_out() {
                return deliveries.len() >= count;
            }
        }
        true
    }

    /// Mark the surface as gone; the pipeline stops delivering to it
    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::Release);
    }

    /// Make subsequent deliveries fail
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::Release);
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySurface for RecordingSurface {
    fn set_document(
        &self,
        document: String,
        auto_scroll: bool,
        _cancel: &CancellationToken,
    ) -> Result<()> {
        if self.failing.load(Ordering::Acquire) {
            return Err(PipelineError::surface(&self.name, "delivery rejected"));
        }

        let mut deliveries = self.deliveries.lock();
        deliveries.push(Delivery {
            document,
            auto_scroll,
            at: Instant::now(),
        });
        self.delivered.notify_all();
        Ok(())
    }

    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    fn prepare(&self, default_style: Style) -> Result<()> {
        *self.default_style.lock() = Some(default_style);
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
