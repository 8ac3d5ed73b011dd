//! Error chains attached to log entries
//!
//! [`ExceptionInfo`] captures an error, its stack frames and its inner
//! (causing) error. Its `Display` output is the full descriptive text that the
//! exception renderer splits into lines:
//!
//! ```text
//! InvalidOperation: outer failure ---> IoError: disk unplugged
//!    at Storage.Write()
//!    --- End of inner exception stack trace ---
//!    at Service.Save()
//! ```

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

/// Indentation that marks a stack-frame line in the descriptive text
pub const STACK_FRAME_INDENT: &str = "   ";

const INNER_SEPARATOR: &str = " ---> ";
const END_OF_INNER: &str = "--- End of inner exception stack trace ---";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionInfo {
    pub type_name: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stack_trace: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner: Option<Box<ExceptionInfo>>,
}

impl ExceptionInfo {
    pub fn new(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            message: message.into(),
            stack_trace: Vec::new(),
            inner: None,
        }
    }

    /// Add a stack frame, e.g. `"at Service.Save()"`
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack_trace.push(frame.into());
        self
    }

    #[must_use]
    pub fn with_inner(mut self, inner: ExceptionInfo) -> Self {
        self.inner = Some(Box::new(inner));
        self
    }

    /// Capture an error and its `source()` chain.
    ///
    /// The outer type name comes from `E`; sources are only known as trait
    /// objects and are named `Error`.
    pub fn from_error<E: Error + 'static>(err: &E) -> Self {
        let type_name = short_type_name(std::any::type_name::<E>());
        let mut info = ExceptionInfo::new(type_name, err.to_string());
        info.inner = err.source().map(|source| Box::new(Self::from_source(source)));
        info
    }

    fn from_source(err: &(dyn Error + 'static)) -> Self {
        let mut info = ExceptionInfo::new("Error", err.to_string());
        info.inner = err.source().map(|source| Box::new(Self::from_source(source)));
        info
    }

    /// Number of errors in the chain, including this one
    pub fn depth(&self) -> usize {
        1 + self.inner.as_ref().map_or(0, |inner| inner.depth())
    }

    fn write_full(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.type_name)?;
        } else {
            write!(f, "{}: {}", self.type_name, self.message)?;
        }

        if let Some(inner) = &self.inner {
            f.write_str(INNER_SEPARATOR)?;
            inner.write_full(f)?;
            write!(f, "\n{}{}", STACK_FRAME_INDENT, END_OF_INNER)?;
        }

        for frame in &self.stack_trace {
            write!(f, "\n{}{}", STACK_FRAME_INDENT, frame)?;
        }
        Ok(())
    }
}

impl fmt::Display for ExceptionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_full(f)
    }
}

fn short_type_name(full: &str) -> String {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base).to_string()
}
