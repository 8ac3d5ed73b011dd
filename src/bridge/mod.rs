//! Adapters that feed foreign log output into a pipeline

pub mod level_detect;
pub mod trace_bridge;
#[cfg(feature = "tracing-bridge")]
pub mod tracing_layer;

pub use level_detect::{detect_level, validate_keywords, LevelKeywords, MAX_KEYWORDS_PER_LEVEL};
pub use trace_bridge::{TraceBridge, FAIL_DETAILS_PARAMETER};
#[cfg(feature = "tracing-bridge")]
pub use tracing_layer::{level_from_tracing, PipelineLayer};
