//! Reader Engine Module
//!
//! Core sample pulling machinery:
//! - Frame decoder boundary (hound-backed)
//! - Carry buffer for partially delivered frames
//! - In-place sample width conversion
//! - The WAV sample reader tying them together

pub mod carry;
pub mod convert;
pub mod decoder;
pub mod reader;

pub use carry::CarryBuffer;
pub use convert::{native_view, widen_in_place, OutputSample};
pub use decoder::{FrameDecoder, HoundDecoder};
pub use reader::WavSampleReader;
