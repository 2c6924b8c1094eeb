//! # Path Builder
//!
//! Segment-based path construction.

use std::fmt;

/// An API path made of raw segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiPath {
    segments: Vec<String>,
}

impl ApiPath {
    /// Raw segments, in order, without separators or encoding.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for ApiPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

/// Builder for [`ApiPath`].
#[derive(Debug, Default, Clone)]
pub struct PathBuilder {
    segments: Vec<String>,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    pub fn build(self) -> ApiPath {
        ApiPath {
            segments: self.segments,
        }
    }
}
