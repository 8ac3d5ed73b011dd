//! Integration tests for the rendering pipeline
//!
//! These tests verify:
//! - Render throttling and burst coalescing
//! - Concurrent producers against the bounded buffer
//! - Clear and restore through the pipeline
//! - Template and theme output
//! - Nested exception rendering
//! - Owner-thread delivery with scroll and zoom preservation

use rust_rich_log::core::{
    ExceptionInfo, LogEntry, LogLevel, LogPipeline, LogRingBuffer, PipelineConfig,
};
use rust_rich_log::render::{
    OutputTemplate, PlainTextCanvas, RtfEncoder, TokenRenderer, LINE_ENDING,
};
use rust_rich_log::surfaces::{dispatch_channel, RecordingSurface, ScrollPosition, ScrollView};
use rust_rich_log::theme::{Style, Theme, ThemeColors, ThemePreset};
use chrono::{DateTime, FixedOffset, TimeZone};
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

const WAIT: Duration = Duration::from_secs(5);

fn uniform_theme() -> Theme {
    let style = Style::new(ThemeColors::WHITE, ThemeColors::DARK_BACKGROUND);
    Theme::builder(style).fill(style).build().unwrap()
}

fn start(config: PipelineConfig) -> (LogPipeline, Arc<RecordingSurface>) {
    let surface = Arc::new(RecordingSurface::new());
    let pipeline = LogPipeline::new(surface.clone(), config).unwrap();
    (pipeline, surface)
}

fn wait_for(surface: &RecordingSurface, predicate: impl Fn(&str) -> bool) -> Option<String> {
    let deadline = Instant::now() + WAIT;
    while Instant::now() < deadline {
        if let Some(document) = surface.last_document() {
            if predicate(&document) {
                return Some(document);
            }
        }
        thread::sleep(Duration::from_millis(5));
    }
    None
}

fn fixed_timestamp() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(2 * 3600)
        .unwrap()
        .with_ymd_and_hms(2024, 3, 9, 14, 5, 7)
        .unwrap()
}

#[test]
fn test_render_is_throttled() {
    let interval = Duration::from_millis(50);
    let (pipeline, surface) = start(
        PipelineConfig::default()
            .with_template("{Message}{NewLine}")
            .with_flush_interval(interval),
    );

    for i in 0..200 {
        pipeline.info("load", format!("entry-{:03}", i));
        if i % 20 == 0 {
            thread::sleep(Duration::from_millis(15));
        }
    }

    let last = wait_for(&surface, |doc| doc.contains("entry-199")).expect("final document");
    for i in 0..200 {
        assert!(last.contains(&format!("entry-{:03}", i)), "missing entry {}", i);
    }

    let deliveries = surface.deliveries();
    assert!(deliveries.len() < 200, "bursts were not coalesced");
    for pair in deliveries.windows(2) {
        let gap = pair[1].at.duration_since(pair[0].at);
        assert!(gap + Duration::from_millis(2) >= interval, "deliveries {:?} apart", gap);
    }
    let deadline = Instant::now() + WAIT;
    while pipeline.metrics().last_flush_entries() != 200 && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(5));
    }
    assert_eq!(pipeline.metrics().last_flush_entries(), 200);
}

#[test]
fn test_concurrent_producers_fill_buffer() {
    const PRODUCERS: usize = 8;
    const PER_PRODUCER: usize = 100;
    let buffer = Arc::new(LogRingBuffer::new(256));

    let handles: Vec<_> = (0..PRODUCERS)
        .map(|p| {
            let buffer = Arc::clone(&buffer);
            thread::spawn(move || {
                for i in 0..PER_PRODUCER {
                    buffer.add((p, i));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let mut snapshot = Vec::new();
    buffer.take_snapshot(&mut snapshot);
    assert_eq!(snapshot.len(), (PRODUCERS * PER_PRODUCER).min(256));
    assert_eq!(buffer.total_added(), (PRODUCERS * PER_PRODUCER) as u64);

    let unique: HashSet<_> = snapshot.iter().collect();
    assert_eq!(unique.len(), snapshot.len());

    // Each producer's surviving entries keep their relative order
    for p in 0..PRODUCERS {
        let sequence: Vec<usize> = snapshot
            .iter()
            .filter(|(q, _)| *q == p)
            .map(|(_, i)| *i)
            .collect();
        assert!(sequence.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn test_concurrent_producers_through_pipeline() {
    let (pipeline, surface) = start(
        PipelineConfig::default()
            .with_max_log_lines(64)
            .with_flush_interval(Duration::from_millis(10)),
    );

    let producers: Vec<_> = (0..4)
        .map(|p| {
            let handle = pipeline.handle();
            thread::spawn(move || {
                for i in 0..50 {
                    handle.debug(format!("producer-{}", p), format!("message {}", i));
                }
            })
        })
        .collect();
    for producer in producers {
        producer.join().unwrap();
    }

    assert_eq!(pipeline.len(), 64);
    assert_eq!(pipeline.metrics().posted(), 200);
    assert_eq!(pipeline.metrics().evicted(), 136);
    assert!(surface.wait_for_deliveries(1, WAIT));
}

#[test]
fn test_clear_and_restore() {
    let (pipeline, surface) = start(
        PipelineConfig::default()
            .with_template("{Message}{NewLine}")
            .with_flush_interval(Duration::from_millis(10)),
    );

    pipeline.info("ui", "alpha");
    pipeline.info("ui", "beta");
    wait_for(&surface, |doc| doc.contains("beta")).expect("first render");

    pipeline.clear();
    assert!(pipeline.is_empty());
    wait_for(&surface, |doc| !doc.contains("alpha")).expect("cleared render");

    pipeline.info("ui", "gamma");
    assert!(pipeline.restore());
    assert_eq!(pipeline.len(), 3);

    let restored = wait_for(&surface, |doc| doc.contains("alpha") && doc.contains("gamma"))
        .expect("restored render");
    let alpha = restored.find("alpha").unwrap();
    let beta = restored.find("beta").unwrap();
    let gamma = restored.find("gamma").unwrap();
    assert!(alpha < beta && beta < gamma);

    assert!(!pipeline.restore());
}

#[test]
fn test_template_output() {
    let template = OutputTemplate::compile(
        "{Timestamp:HH:mm:ss} [{Level:u3}] {Category}: {Message}{NewLine}",
        Arc::new(Theme::default()),
        None,
    )
    .unwrap();

    let entry =
        LogEntry::new(LogLevel::Warning, "Db", "slow query").with_timestamp(fixed_timestamp());
    let mut canvas = PlainTextCanvas::new();
    template.render(&entry, &mut canvas);

    assert_eq!(canvas.text(), format!("14:05:07 [WRN] Db: slow query{}", LINE_ENDING));
}

#[test]
fn test_unknown_placeholders_are_dropped() {
    let template = OutputTemplate::compile(
        "{Level:w}|{Properties}|{Message}",
        Arc::new(Theme::default()),
        None,
    )
    .unwrap();
    assert_eq!(template.dropped_placeholders(), ["Properties"]);

    let mut canvas = PlainTextCanvas::new();
    template.render(&LogEntry::new(LogLevel::Error, "x", "boom"), &mut canvas);
    assert_eq!(canvas.text(), "error||boom");
}

#[test]
fn test_nested_exception_lines() {
    let exception = ExceptionInfo::new("InvalidOperation", "save failed")
        .with_inner(
            ExceptionInfo::new("IoError", "disk unplugged").with_frame("at Storage.Write()"),
        )
        .with_frame("at Service.Save()");
    let entry = LogEntry::new(LogLevel::Error, "Svc", "oops").with_exception(exception);

    let theme = Arc::new(ThemePreset::Literate.theme());
    let template = OutputTemplate::compile("{Exception}", Arc::clone(&theme), None).unwrap();
    let mut canvas = PlainTextCanvas::new();
    template.render(&entry, &mut canvas);

    let lines: Vec<&str> = canvas.text().split(LINE_ENDING).collect();
    assert_eq!(
        lines,
        vec![
            "InvalidOperation: save failed ---> IoError: disk unplugged",
            "   at Storage.Write()",
            "   --- End of inner exception stack trace ---",
            "   at Service.Save()",
            "",
        ]
    );

    // Frame lines use the secondary style, the headline the text style
    let secondary = theme.style(rust_rich_log::theme::StyleToken::SecondaryText);
    let frame_runs = canvas
        .runs()
        .iter()
        .filter(|(style, text)| *style == secondary && text.starts_with("   "))
        .count();
    assert!(frame_runs >= 1);
}

#[test]
fn test_theme_switch_changes_color_table() {
    let (pipeline, surface) = start(
        PipelineConfig::default()
            .with_theme(ThemePreset::Literate.theme())
            .with_flush_interval(Duration::from_millis(10)),
    );
    pipeline.info("ui", "before");
    let before = wait_for(&surface, |doc| doc.contains("before")).unwrap();

    pipeline
        .reconfigure("{Message}", ThemePreset::EnhancedLight.theme())
        .unwrap();
    pipeline.info("ui", "after");
    let after = wait_for(&surface, |doc| doc.contains("after")).unwrap();

    let color_table = |doc: &str| {
        doc.split("{\\colortbl")
            .nth(1)
            .and_then(|t| t.split('}').next())
            .map(str::to_string)
    };
    assert_ne!(color_table(&before), color_table(&after));
    assert_eq!(
        surface.default_style(),
        Some(ThemePreset::EnhancedLight.theme().default_style())
    );
}

#[test]
fn test_encoder_reuses_colors() {
    let theme = uniform_theme();
    let mut encoder = RtfEncoder::new(&theme);
    let template =
        OutputTemplate::compile("{Level} {Message}{NewLine}", Arc::new(theme), None).unwrap();

    for i in 0..10 {
        let entry = LogEntry::new(LogLevel::Information, "x", format!("line {}", i));
        template.render(&entry, &mut encoder);
    }
    // One foreground and one background switch for the whole body
    assert_eq!(encoder.body().matches("\\cf").count(), 1);
    assert_eq!(encoder.body().matches("\\highlight").count(), 1);
    assert_eq!(encoder.color_count(), 2);
}

#[test]
fn test_config_from_json_drives_pipeline() {
    let config = PipelineConfig::from_json(
        r#"{
            "output_template": "{Level:u}:{Message}",
            "theme": "Grayscale",
            "max_log_lines": 4,
            "flush_interval_ms": 5
        }"#,
    )
    .unwrap();
    let (pipeline, surface) = start(config);

    for i in 0..6 {
        pipeline.warn("cfg", format!("m{}", i));
    }
    assert_eq!(pipeline.len(), 4);
    let document = wait_for(&surface, |doc| doc.contains("m5")).unwrap();
    assert!(!document.contains("m1"));
    assert!(document.contains("WARNING"));
}

/// View that, like a real text box, resets zoom and scroll on content swap
#[derive(Default)]
struct TextBox {
    content: String,
    zoom: f32,
    position: ScrollPosition,
    replacements: usize,
}

impl ScrollView for TextBox {
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
        self.position = ScrollPosition { x: 0, y: 10_000 };
    }

    fn replace_content(&mut self, document: &str) {
        self.content = document.to_string();
        self.zoom = 1.0;
        self.position = ScrollPosition::default();
        self.replacements += 1;
    }
}

#[test]
fn test_owner_thread_surface() {
    let view = TextBox {
        zoom: 1.25,
        position: ScrollPosition { x: 0, y: 300 },
        ..Default::default()
    };
    let (handle, mut owner) = dispatch_channel("log-view", view);
    let pipeline = LogPipeline::new(
        Arc::new(handle),
        PipelineConfig::default()
            .with_auto_scroll(false)
            .with_flush_interval(Duration::from_millis(5)),
    )
    .unwrap();

    pipeline.info("ui", "shown on the owner thread");

    let deadline = Instant::now() + WAIT;
    while !owner.view().content.contains("shown on the owner thread") && Instant::now() < deadline {
        owner.pump_timeout(Duration::from_millis(20));
    }

    let view = owner.view();
    assert!(view.content.starts_with("{\\rtf1"));
    assert_eq!(view.zoom, 1.25);
    assert_eq!(view.position.y, 300);
    assert!(view.replacements >= 1);
}

#[test]
fn test_dropped_owner_stops_deliveries() {
    let (handle, owner) = dispatch_channel("log-view", TextBox::default());
    let pipeline = LogPipeline::new(
        Arc::new(handle),
        PipelineConfig::default().with_flush_interval(Duration::from_millis(5)),
    )
    .unwrap();
    drop(owner);

    pipeline.info("ui", "nobody is listening");
    let deadline = Instant::now() + WAIT;
    while pipeline.metrics().skipped_deliveries() == 0 && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(5));
    }
    assert!(pipeline.metrics().skipped_deliveries() >= 1);
    assert_eq!(pipeline.metrics().flushes(), 0);
}
