//! Frame Decoder Boundary
//!
//! The reader never interprets file bytes itself. It pulls whole interleaved
//! frames of native f32 samples from a `FrameDecoder`. `HoundDecoder` is the
//! WAV implementation on top of the `hound` crate; integer PCM is normalized
//! to [-1.0, 1.0) and 32-bit float data passes through untouched.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use hound::{SampleFormat, WavReader};
use tracing::debug;

use crate::error::{ReaderError, Result};

/// Whole-frame decoder producing native 32-bit float samples
pub trait FrameDecoder: Send {
    /// Interleaved channel count (>= 1)
    fn channels(&self) -> u32;

    /// Sample rate in Hz
    fn sample_rate(&self) -> u32;

    /// Total frames in the stream
    fn total_frames(&self) -> u64;

    /// Frames already consumed
    fn cursor(&self) -> u64;

    /// Decode up to `frames` whole frames into `out` (interleaved)
    ///
    /// Never decodes more than `out.len() / channels` frames. Returns the
    /// number of frames decoded; fewer than requested means end of stream.
    fn read_frames(&mut self, frames: u64, out: &mut [f32]) -> u64;

    /// Move the cursor to `frame`
    fn seek_to_frame(&mut self, frame: u64) -> Result<()>;
}

/// Native sample layouts we can normalize to f32
#[derive(Debug, Clone, Copy, PartialEq)]
enum Encoding {
    Float,
    Int { scale: f32 },
}

/// WAV decoder backed by `hound`
pub struct HoundDecoder<R: Read + Seek> {
    reader: WavReader<R>,
    encoding: Encoding,
    channels: u32,
    sample_rate: u32,
    frames: u64,
    cursor: u64,
    truncated_at: Option<u64>,
}

impl HoundDecoder<BufReader<File>> {
    /// Open and parse the WAV file at `path`
    ///
    /// # Errors
    /// * `FileNotFound` - If the file does not exist
    /// * `InvalidAudio` - If the file is not a valid WAV file
    /// * `UnsupportedFormat` - If the sample layout cannot be decoded
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ReaderError::FileNotFound {
                path: path.display().to_string(),
                source: None,
            });
        }

        let reader = WavReader::open(path)?;
        Self::from_wav(reader)
    }
}

impl<R: Read + Seek + Send> HoundDecoder<R> {
    /// Parse a WAV stream from any seekable source
    pub fn new(source: R) -> Result<Self> {
        let reader = WavReader::new(source)?;
        Self::from_wav(reader)
    }

    fn from_wav(reader: WavReader<R>) -> Result<Self> {
        let spec = reader.spec();

        if spec.channels == 0 {
            return Err(ReaderError::InvalidAudio {
                reason: "WAV header declares zero channels".to_string(),
                source: None,
            });
        }

        let encoding = match (spec.sample_format, spec.bits_per_sample) {
            (SampleFormat::Float, 32) => Encoding::Float,
            (SampleFormat::Int, bits @ 1..=32) => Encoding::Int {
                scale: 1.0 / (1u64 << (bits - 1)) as f32,
            },
            (SampleFormat::Float, bits) => {
                return Err(ReaderError::UnsupportedFormat {
                    format: format!("{}-bit float audio (only 32-bit supported)", bits),
                })
            }
            (SampleFormat::Int, bits) => {
                return Err(ReaderError::UnsupportedFormat {
                    format: format!("{}-bit integer audio", bits),
                })
            }
        };

        Ok(Self {
            frames: reader.duration() as u64,
            reader,
            encoding,
            channels: spec.channels as u32,
            sample_rate: spec.sample_rate,
            cursor: 0,
            truncated_at: None,
        })
    }
}

impl<R: Read + Seek + Send> FrameDecoder for HoundDecoder<R> {
    fn channels(&self) -> u32 {
        self.channels
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_frames(&self) -> u64 {
        self.truncated_at.unwrap_or(self.frames)
    }

    fn cursor(&self) -> u64 {
        self.cursor
    }

    fn read_frames(&mut self, frames: u64, out: &mut [f32]) -> u64 {
        let channels = self.channels as usize;
        let wanted = frames
            .min(self.total_frames() - self.cursor)
            .min((out.len() / channels) as u64);
        if wanted == 0 {
            return 0;
        }

        let dest = &mut out[..wanted as usize * channels];
        let (filled, error) = match self.encoding {
            Encoding::Float => fill(self.reader.samples::<f32>(), dest, |s: f32| s),
            Encoding::Int { scale } => {
                fill(self.reader.samples::<i32>(), dest, |s: i32| s as f32 * scale)
            }
        };

        // A partially decoded frame is dropped
        let decoded = (filled / channels) as u64;
        self.cursor += decoded;

        if decoded < wanted {
            debug!(
                frame = self.cursor,
                declared = self.frames,
                error = ?error,
                "[DECODER] Data ends early, truncating stream"
            );
            self.truncated_at = Some(self.cursor);
        }

        decoded
    }

    fn seek_to_frame(&mut self, frame: u64) -> Result<()> {
        let frame = frame.min(self.total_frames());
        // hound addresses frames with u32; `frames` came from a u32 duration
        self.reader.seek(frame as u32)?;
        self.cursor = frame;
        Ok(())
    }
}

/// Fill `dest` from a fallible sample iterator, stopping at the first error
///
/// `dest` drives the zip so no sample beyond its length is pulled.
fn fill<T, I>(samples: I, dest: &mut [f32], convert: impl Fn(T) -> f32) -> (usize, Option<hound::Error>)
where
    I: Iterator<Item = hound::Result<T>>,
{
    let mut filled = 0;
    for (slot, sample) in dest.iter_mut().zip(samples) {
        match sample {
            Ok(s) => {
                *slot = convert(s);
                filled += 1;
            }
            Err(e) => return (filled, Some(e)),
        }
    }
    (filled, None)
}
