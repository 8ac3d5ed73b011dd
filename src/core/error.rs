//! Error types for the rendering pipeline

use crate::theme::StyleToken;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Output template is empty
    #[error("Output template must not be empty")]
    EmptyTemplate,

    /// Theme lacks a style for a token that renderers rely on
    #[error("Theme has no style for token '{token}'")]
    MissingStyle { token: StyleToken },

    /// Color literal could not be parsed
    #[error("Invalid color '{value}': expected #RRGGBB")]
    InvalidColor { value: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Render thread could not be started
    #[error("Failed to spawn render thread: {0}")]
    SpawnError(#[source] std::io::Error),

    /// Pipeline already stopped
    #[error("Pipeline already stopped")]
    PipelineStopped,

    /// Display surface went away before delivery
    #[error("Display surface '{surface}' is closed")]
    SurfaceClosed { surface: String },

    /// Display surface rejected a document
    #[error("Display surface '{surface}' failed: {message}")]
    SurfaceError { surface: String, message: String },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl PipelineError {
    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        PipelineError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create an invalid color error
    pub fn invalid_color(value: impl Into<String>) -> Self {
        PipelineError::InvalidColor {
            value: value.into(),
        }
    }

    /// Create a surface closed error
    pub fn surface_closed(surface: impl Into<String>) -> Self {
        PipelineError::SurfaceClosed {
            surface: surface.into(),
        }
    }

    /// Create a surface error
    pub fn surface(surface: impl Into<String>, message: impl Into<String>) -> Self {
        PipelineError::SurfaceError {
            surface: surface.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        PipelineError::Other(msg.into())
    }

    /// Whether this error is a configuration problem detected up front
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            PipelineError::EmptyTemplate
                | PipelineError::MissingStyle { .. }
                | PipelineError::InvalidColor { .. }
                | PipelineError::InvalidConfiguration { .. }
                | PipelineError::JsonError(_)
        )
    }
}
