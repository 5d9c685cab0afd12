//! wavpull - Pull-based Interleaved Sample Reader
//!
//! Exposes a uniform, format-agnostic interface for pulling a linear stream
//! of interleaved floating-point samples out of a frame-based decoder.
//!
//! # Architecture
//!
//! - Decoder boundary: whole-frame f32 decoding (`hound` for WAV)
//! - Carry buffer: leftover samples of a partially delivered frame
//! - Width converter: in-place f32 to output-width widening
//! - Format descriptor: `AudioFormat` / `AudioReader` traits for dispatchers

pub mod engine;
pub mod error;
pub mod format;

pub use engine::{FrameDecoder, HoundDecoder, OutputSample, WavSampleReader};
pub use error::{ReaderError, Result};
pub use format::{AudioFileInfo, AudioFormat, AudioReader, Real, WavFormat, WAV};
