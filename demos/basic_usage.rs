//! Basic pipeline usage example
//!
//! Posts entries at every level, waits for the render thread to deliver the
//! RTF document, and prints a colored terminal preview of the same template.
//!
//! Run with: cargo run --example basic_usage

use rust_rich_log::prelude::*;
use rust_rich_log::render::AnsiCanvas;
use rust_rich_log::{error, info};
use std::sync::Arc;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Rust Rich Log - Basic Usage Example ===\n");

    let theme = ThemePreset::EnhancedDark.theme();
    let template = "{Timestamp:HH:mm:ss.fff} [{Level:u3}] {Category}: {Message}{NewLine}{Exception}";

    let surface = Arc::new(RecordingSurface::new());
    let config = PipelineConfig::default()
        .with_template(template)
        .with_theme(theme.clone())
        .with_max_log_lines(100);
    let mut pipeline = LogPipeline::new(surface.clone(), config)?;

    println!("1. Posting entries at every level:");
    pipeline.verbose("Startup", "Loading configuration");
    pipeline.debug("Startup", "Found 3 plugins");
    info!(pipeline, "Server", "Listening on port {}", 8080);
    pipeline.warn("Cache", "Cache is 91% full");
    error!(pipeline, "Db", "Query took {} ms", 1250);

    let failure = std::io::Error::new(std::io::ErrorKind::NotFound, "settings.json missing");
    pipeline.post(
        LogEntry::new(LogLevel::Fatal, "Startup", "Cannot continue")
            .with_exception(ExceptionInfo::from_error(&failure)),
    );

    if surface.wait_for_deliveries(1, Duration::from_secs(2)) {
        let document = surface.last_document().unwrap_or_default();
        println!("   Delivered RTF document: {} bytes", document.len());
    }

    println!("\n2. Terminal preview of the same template:");
    let renderer = OutputTemplate::compile(template, Arc::new(theme.clone()), None)?;
    let mut canvas = AnsiCanvas::new(theme.default_style());
    let entry = LogEntry::new(LogLevel::Warning, "Preview", "Rendered with ANSI colors");
    renderer.render(&entry, &mut canvas);
    print!("{}", canvas.as_str());

    println!("\n3. Clear and restore:");
    pipeline.clear();
    println!("   After clear: {} visible entries", pipeline.len());
    pipeline.restore();
    println!("   After restore: {} visible entries", pipeline.len());

    let metrics = pipeline.metrics();
    println!(
        "\n   posted={} flushes={} evicted={}",
        metrics.posted(),
        metrics.flushes(),
        metrics.evicted()
    );

    pipeline.shutdown(Duration::from_secs(1));
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
