//! Audio Format Descriptors
//!
//! An external dispatcher holds a list of `&'static dyn AudioFormat`, asks
//! each one `can_handle(path)` and opens the file with the first match. The
//! opened reader is a boxed `AudioReader`; closing it is dropping it.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::engine::WavSampleReader;

/// Sample type delivered through the `AudioReader` interface
pub type Real = f64;

/// Stream properties reported by the decoder at open time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioFileInfo {
    /// Interleaved channel count (>= 1)
    pub channels: u32,
    /// Sample rate in Hz
    pub sample_rate: f64,
}

impl AudioFileInfo {
    /// Duration in seconds of `samples` interleaved samples
    pub fn samples_to_seconds(&self, samples: u64) -> f64 {
        (samples / self.channels as u64) as f64 / self.sample_rate
    }
}

/// An open, format-specific sample stream
pub trait AudioReader: Send {
    /// Channel count and sample rate
    fn info(&self) -> AudioFileInfo;

    /// Samples obtainable from further reads before exhaustion
    fn avail(&self) -> u64;

    /// Restart from the first frame
    fn rewind(&mut self);

    /// Fill `samples` with the next interleaved samples
    ///
    /// Returns fewer than `samples.len()` only at end of stream.
    fn read(&mut self, samples: &mut [Real]) -> usize;
}

/// Capability descriptor an external dispatcher selects formats by
pub trait AudioFormat: Send + Sync {
    /// Short format name for logs
    fn name(&self) -> &'static str;

    /// File extensions (lowercase, no dot) this format recognizes
    fn extensions(&self) -> &'static [&'static str];

    /// Whether `path` looks like this format; performs no I/O
    fn can_handle(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions().iter().any(|e| ext.eq_ignore_ascii_case(e)))
            .unwrap_or(false)
    }

    /// Open `path`, or `None` if it cannot be decoded
    fn open(&self, path: &Path) -> Option<Box<dyn AudioReader>>;
}

/// RIFF/WAVE format descriptor
#[derive(Debug, Clone, Copy, Default)]
pub struct WavFormat;

/// Registered WAV format instance
pub static WAV: WavFormat = WavFormat;

impl AudioFormat for WavFormat {
    fn name(&self) -> &'static str {
        "wav"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["wav"]
    }

    fn open(&self, path: &Path) -> Option<Box<dyn AudioReader>> {
        match WavSampleReader::open(path) {
            Ok(reader) => Some(Box::new(reader)),
            Err(e) => {
                warn!(
                    path = %path.display(),
                    code = e.error_code(),
                    error = %e,
                    "[FORMAT] Could not open {} file",
                    self.name()
                );
                None
            }
        }
    }
}
