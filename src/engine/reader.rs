//! WAV Sample Reader
//!
//! Serves arbitrary sample counts from a decoder that only yields whole
//! frames. Reads run in three phases:
//! 1. drain samples carried over from the previous call
//! 2. decode as many whole frames as fit straight into the caller's buffer,
//!    widening them in place
//! 3. if less than a frame of room is left, decode one frame into the carry
//!    buffer and serve its prefix
//!
//! End of stream is signalled only by a short count.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::{debug, warn};

use super::carry::CarryBuffer;
use super::convert::{self, OutputSample};
use super::decoder::{FrameDecoder, HoundDecoder};
use crate::error::Result;
use crate::format::{AudioFileInfo, AudioReader, Real};

/// Pull-based interleaved sample reader over a frame decoder
///
/// Dropping the reader closes the decoder and frees the carry buffer.
pub struct WavSampleReader<D: FrameDecoder = HoundDecoder<BufReader<File>>> {
    decoder: D,
    carry: CarryBuffer,
    info: AudioFileInfo,
}

impl WavSampleReader {
    /// Open the WAV file at `path`
    pub fn open(path: &Path) -> Result<Self> {
        let decoder = HoundDecoder::open(path)?;
        let reader = Self::from_decoder(decoder);
        debug!(
            path = %path.display(),
            channels = reader.info.channels,
            sample_rate = reader.info.sample_rate,
            frames = reader.total_frames(),
            duration_secs = reader.info.samples_to_seconds(reader.avail()),
            "[READER] Opened"
        );
        Ok(reader)
    }
}

impl<D: FrameDecoder> WavSampleReader<D> {
    /// Wrap an already opened decoder
    pub fn from_decoder(decoder: D) -> Self {
        let info = AudioFileInfo {
            channels: decoder.channels(),
            sample_rate: decoder.sample_rate() as f64,
        };
        debug_assert!(info.channels >= 1, "decoder reports zero channels");
        Self {
            carry: CarryBuffer::new(info.channels as usize),
            decoder,
            info,
        }
    }

    /// Channel count and sample rate as reported by the decoder
    pub fn info(&self) -> AudioFileInfo {
        self.info
    }

    /// Samples obtainable from further reads, carried samples included
    pub fn avail(&self) -> u64 {
        let frames_left = self.decoder.total_frames() - self.decoder.cursor();
        self.carry.len() as u64 + self.info.channels as u64 * frames_left
    }

    /// Restart from frame 0, discarding carried samples
    ///
    /// If the decoder cannot seek, the failure is logged and the carry buffer
    /// is still cleared, but the decoder keeps its old cursor: `avail()` then
    /// reports the frames left after that cursor, not the whole stream.
    pub fn rewind(&mut self) {
        if let Err(e) = self.decoder.seek_to_frame(0) {
            warn!(error = %e, code = e.error_code(), "[READER] Rewind seek failed");
        }
        self.carry.clear();
        debug!("[READER] Rewound to frame 0");
    }

    /// Samples currently held in the carry buffer
    pub fn carried(&self) -> usize {
        self.carry.len()
    }

    /// Total frames in the stream
    pub fn total_frames(&self) -> u64 {
        self.decoder.total_frames()
    }

    /// Frames already pulled from the decoder
    pub fn frame_cursor(&self) -> u64 {
        self.decoder.cursor()
    }

    /// Fill `out` with the next interleaved samples
    ///
    /// Returns the number of samples written, which is less than
    /// `out.len()` only at end of stream. An empty `out` is a no-op.
    pub fn read_into<S: OutputSample>(&mut self, out: &mut [S]) -> usize {
        let channels = self.info.channels as usize;
        let mut written = 0;

        if out.is_empty() {
            return written;
        }
        written += self.carry.unload(out);

        if written == out.len() {
            return written;
        }
        let frames = (out.len() - written) / channels;
        if frames > 0 {
            let region = &mut out[written..];
            let wanted = frames * channels;
            let decoded = {
                let native = convert::native_view(region);
                self.decoder.read_frames(frames as u64, &mut native[..wanted])
            };
            let decoded_samples = decoded as usize * channels;
            convert::widen_in_place(region, decoded_samples);
            written += decoded_samples;

            if decoded_samples < wanted {
                debug!(written, "[READER] End of stream during bulk decode");
                return written;
            }
        }

        if written == out.len() {
            return written;
        }
        if self.carry.refill(&mut self.decoder) {
            written += self.carry.unload(&mut out[written..]);
        } else {
            debug!(written, "[READER] End of stream");
        }

        written
    }
}

impl<D: FrameDecoder> AudioReader for WavSampleReader<D> {
    fn info(&self) -> AudioFileInfo {
        WavSampleReader::info(self)
    }

    fn avail(&self) -> u64 {
        WavSampleReader::avail(self)
    }

    fn rewind(&mut self) {
        WavSampleReader::rewind(self)
    }

    fn read(&mut self, samples: &mut [Real]) -> usize {
        self.read_into(samples)
    }
}
