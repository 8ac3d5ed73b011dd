//! Stress tests for the rendering pipeline under load
//!
//! These tests verify:
//! - Producers never block on a slow display surface
//! - Clear, restore and reconfigure stay consistent under concurrent posting
//! - Shutdown completes promptly while producers are still running
//! - Buffer bounds hold under sustained high-volume logging

use rust_rich_log::core::{CancellationToken, LogPipeline, PipelineConfig, Result};
use rust_rich_log::surfaces::{DisplaySurface, RecordingSurface};
use rust_rich_log::theme::ThemePreset;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Surface that takes a long time to accept each document
struct SlowSurface {
    delay: Duration,
    delivered: AtomicUsize,
}

impl DisplaySurface for SlowSurface {
    fn set_document(
        &self,
        _document: String,
        _auto_scroll: bool,
        cancel: &CancellationToken,
    ) -> Result<()> {
        // Cooperative: give up early once shutdown starts
        if !cancel.wait_timeout(self.delay) {
            self.delivered.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "slow"
    }
}

/// Posting must not wait for a slow surface
#[test]
fn test_producers_do_not_block_on_slow_surface() {
    let surface = Arc::new(SlowSurface {
        delay: Duration::from_millis(200),
        delivered: AtomicUsize::new(0),
    });
    let mut pipeline = LogPipeline::new(
        surface.clone(),
        PipelineConfig::default().with_flush_interval(Duration::from_millis(1)),
    )
    .unwrap();

    let start = Instant::now();
    for i in 0..10_000 {
        pipeline.info("load", format!("message {}", i));
    }
    let elapsed = start.elapsed();

    assert!(elapsed < Duration::from_secs(2), "posting took {:?}", elapsed);
    assert_eq!(pipeline.metrics().posted(), 10_000);
    assert_eq!(pipeline.len(), 256);

    // A delivery in progress is abandoned by shutdown
    let shutdown_start = Instant::now();
    assert!(pipeline.shutdown(Duration::from_secs(2)));
    assert!(shutdown_start.elapsed() < Duration::from_secs(1));
}

/// High-volume concurrent posting keeps every bound and counter consistent
#[test]
fn test_sustained_concurrent_load() {
    const PRODUCERS: usize = 8;
    const PER_PRODUCER: usize = 5_000;

    let surface = Arc::new(RecordingSurface::new());
    let pipeline = LogPipeline::new(
        surface.clone(),
        PipelineConfig::default()
            .with_max_log_lines(512)
            .with_flush_interval(Duration::from_millis(2)),
    )
    .unwrap();

    let producers: Vec<_> = (0..PRODUCERS)
        .map(|p| {
            let handle = pipeline.handle();
            thread::spawn(move || {
                for i in 0..PER_PRODUCER {
                    handle.debug("stress", format!("producer {} message {}", p, i));
                }
            })
        })
        .collect();

    for producer in producers {
        producer.join().unwrap();
    }

    let total = (PRODUCERS * PER_PRODUCER) as u64;
    let metrics = pipeline.metrics();
    assert_eq!(metrics.posted(), total);
    assert_eq!(metrics.evicted(), total - 512);
    assert_eq!(pipeline.len(), 512);
    assert!(surface.wait_for_deliveries(1, Duration::from_secs(5)));
    assert!(metrics.flushes() as usize <= surface.delivery_count());
}

/// Clear and restore interleaved with producers never exceed capacity
#[test]
fn test_clear_restore_under_load() {
    let surface = Arc::new(RecordingSurface::new());
    let pipeline = LogPipeline::new(
        surface,
        PipelineConfig::default()
            .with_max_log_lines(100)
            .with_flush_interval(Duration::from_millis(1)),
    )
    .unwrap();

    let running = Arc::new(AtomicBool::new(true));
    let producers: Vec<_> = (0..4)
        .map(|p| {
            let handle = pipeline.handle();
            let running = Arc::clone(&running);
            thread::spawn(move || {
                let mut i = 0u64;
                while running.load(Ordering::Relaxed) {
                    handle.info("load", format!("{}:{}", p, i));
                    i += 1;
                }
            })
        })
        .collect();

    for round in 0..200 {
        if round % 2 == 0 {
            pipeline.clear();
        } else {
            pipeline.restore();
        }
        assert!(pipeline.len() <= 100);
    }

    running.store(false, Ordering::Relaxed);
    for producer in producers {
        producer.join().unwrap();
    }
    assert!(pipeline.len() <= 100);
}

/// Swapping templates and themes while rendering never loses the pipeline
#[test]
fn test_reconfigure_under_load() {
    let surface = Arc::new(RecordingSurface::new());
    let pipeline = LogPipeline::new(
        surface.clone(),
        PipelineConfig::default().with_flush_interval(Duration::from_millis(1)),
    )
    .unwrap();

    let running = Arc::new(AtomicBool::new(true));
    let producer = {
        let handle = pipeline.handle();
        let running = Arc::clone(&running);
        thread::spawn(move || {
            while running.load(Ordering::Relaxed) {
                handle.warn("load", "tick");
                thread::sleep(Duration::from_micros(200));
            }
        })
    };

    let templates = [
        "{Message}{NewLine}",
        "[{Level:u3}] {Message}{NewLine}",
        "{Level:w} {Category}{NewLine}",
    ];
    for (i, preset) in ThemePreset::ALL.iter().cycle().take(30).enumerate() {
        pipeline.reconfigure(templates[i % templates.len()], preset.theme()).unwrap();
        thread::sleep(Duration::from_millis(2));
    }

    running.store(false, Ordering::Relaxed);
    producer.join().unwrap();

    let before = surface.delivery_count();
    pipeline.info("load", "final");
    assert!(surface.wait_for_deliveries(before + 1, Duration::from_secs(5)));
    assert_eq!(pipeline.metrics().failed_deliveries(), 0);
}

/// Shutdown returns promptly even while producers keep posting
#[test]
fn test_shutdown_with_active_producers() {
    let surface = Arc::new(RecordingSurface::new());
    let mut pipeline = LogPipeline::new(
        surface,
        PipelineConfig::default().with_flush_interval(Duration::from_millis(1)),
    )
    .unwrap();

    let posted = Arc::new(AtomicUsize::new(0));
    let producers: Vec<_> = (0..4)
        .map(|_| {
            let handle = pipeline.handle();
            let posted = Arc::clone(&posted);
            thread::spawn(move || {
                while !handle.is_stopped() {
                    handle.debug("load", "still going");
                    posted.fetch_add(1, Ordering::Relaxed);
                }
            })
        })
        .collect();

    thread::sleep(Duration::from_millis(50));
    let start = Instant::now();
    assert!(pipeline.shutdown(Duration::from_secs(5)));
    assert!(start.elapsed() < Duration::from_secs(2));

    for producer in producers {
        producer.join().unwrap();
    }
    assert!(posted.load(Ordering::Relaxed) > 0);

    // Posts after shutdown are ignored
    let len = pipeline.len();
    pipeline.info("late", "ignored");
    assert_eq!(pipeline.len(), len);
}
