use crate::error::Result;
use crate::metrics::{MetricFamily, EOF_MARKER};

pub trait Encoder {
    fn encode(&self, family: &MetricFamily) -> Result<Vec<u8>>;

    /// Bytes closing the whole exposition, if the format has any.
    fn finish(&self) -> Option<Vec<u8>> {
        None
    }
}

// Output lines are newline-delimited by the writer, so the encoder leaves the
// last line open.
pub struct OpenMetricsEncoder {
    eof: bool,
}

impl OpenMetricsEncoder {
    pub fn new() -> Self {
        Self { eof: false }
    }

    pub fn with_eof(eof: bool) -> Self {
        Self { eof }
    }
}

impl Default for OpenMetricsEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder for OpenMetricsEncoder {
    fn encode(&self, family: &MetricFamily) -> Result<Vec<u8>> {
        Ok(family.lines().join("\n").into_bytes())
    }

    fn finish(&self) -> Option<Vec<u8>> {
        if self.eof {
            Some(EOF_MARKER.as_bytes().to_vec())
        } else {
            None
        }
    }
}
