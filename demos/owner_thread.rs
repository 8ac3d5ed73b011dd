//! Owner-thread surface example
//!
//! A view that may only be touched from the main thread receives documents
//! rendered on the pipeline's render thread. Worker threads post entries; the
//! main thread pumps the surface like a UI event loop would.
//!
//! Run with: cargo run --example owner_thread

use rust_rich_log::prelude::*;
use std::thread;
use std::time::{Duration, Instant};

/// Stand-in for a rich text box owned by the UI thread
#[derive(Default)]
struct LogView {
    document: String,
    zoom: f32,
    position: ScrollPosition,
    updates: usize,
}

impl ScrollView for LogView {
    fn suspend_redraw(&mut self) {}

    fn resume_redraw(&mut self) {}

    fn zoom(&self) -> f32 {
        self.zoom
    }

    fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom;
    }

    fn scroll_position(&self) -> ScrollPosition {
        self.position
    }

    fn set_scroll_position(&mut self, position: ScrollPosition) {
        self.position = position;
    }

    fn scroll_to_bottom(&mut self) {
        self.position.y = self.document.matches("\\par").count() as i32;
    }

    fn replace_content(&mut self, document: &str) {
        self.document = document.to_string();
        self.updates += 1;
    }
}

fn main() -> Result<()> {
    println!("=== Rust Rich Log - Owner Thread Example ===\n");

    let view = LogView {
        zoom: 1.5,
        ..Default::default()
    };
    let (handle, mut owner) = dispatch_channel("log-view", view);

    let config = PipelineConfig::default()
        .with_theme(ThemePreset::Colored.theme())
        .with_template("[{Level:u3}] {Category}: {Message}{NewLine}");
    let pipeline = LogPipeline::new(std::sync::Arc::new(handle), config)?;

    println!("1. Spawning 4 workers, 25 entries each");
    let workers: Vec<_> = (0..4)
        .map(|w| {
            let handle = pipeline.handle();
            thread::spawn(move || {
                for i in 0..25 {
                    handle.info(format!("worker-{}", w), format!("step {}", i));
                    thread::sleep(Duration::from_millis(5));
                }
            })
        })
        .collect();

    println!("2. Pumping the view on the main thread");
    let deadline = Instant::now() + Duration::from_secs(3);
    while Instant::now() < deadline {
        owner.pump_timeout(Duration::from_millis(16));
        if workers.iter().all(|w| w.is_finished()) && pipeline.metrics().posted() == 100 {
            thread::sleep(Duration::from_millis(100));
            owner.pump();
            break;
        }
    }
    for worker in workers {
        let _ = worker.join();
    }

    let view = owner.view();
    println!("   View updates applied: {}", view.updates);
    println!("   Document size: {} bytes", view.document.len());
    println!("   Zoom kept at {:.1}, scrolled to line {}", view.zoom, view.position.y);

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
