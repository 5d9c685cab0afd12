//! Carry Buffer
//!
//! Holds the undelivered remainder of the most recently decoded frame. The
//! valid samples always occupy the tail of a channel-sized array, so a fresh
//! frame can be decoded over the whole array and served front to back.

use super::convert::OutputSample;
use super::decoder::FrameDecoder;

/// Staging area for one frame of native samples
#[derive(Debug, Clone)]
pub struct CarryBuffer {
    slots: Box<[f32]>,
    valid: usize,
}

impl CarryBuffer {
    /// Create an empty carry buffer for `channels` interleaved channels
    pub fn new(channels: usize) -> Self {
        Self {
            slots: vec![0.0; channels].into_boxed_slice(),
            valid: 0,
        }
    }

    /// Capacity in samples (one frame)
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of carried samples still waiting to be delivered
    pub fn len(&self) -> usize {
        self.valid
    }

    pub fn is_empty(&self) -> bool {
        self.valid == 0
    }

    /// Discard carried samples
    pub fn clear(&mut self) {
        self.valid = 0;
    }

    /// Copy up to `out.len()` carried samples into `out`, oldest first
    ///
    /// Returns the number of samples written.
    pub fn unload<S: OutputSample>(&mut self, out: &mut [S]) -> usize {
        let n = self.valid.min(out.len());
        if n == 0 {
            return 0;
        }

        let start = self.slots.len() - self.valid;
        for (dst, &src) in out.iter_mut().zip(&self.slots[start..start + n]) {
            *dst = S::from(src);
        }

        self.valid -= n;
        n
    }

    /// Decode exactly one frame from `decoder` into the buffer
    ///
    /// Only valid while empty. Returns false (and stays empty) when the
    /// decoder has no further frame.
    pub fn refill<D: FrameDecoder + ?Sized>(&mut self, decoder: &mut D) -> bool {
        debug_assert!(self.is_empty(), "refill over {} carried samples", self.valid);

        if decoder.read_frames(1, &mut self.slots) == 1 {
            self.valid = self.slots.len();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::decoder::tests::VecDecoder;

    #[test]
    fn test_new_is_empty() {
        let carry = CarryBuffer::new(3);
        assert_eq!(carry.capacity(), 3);
        assert_eq!(carry.len(), 0);
        assert!(carry.is_empty());
    }

    #[test]
    fn test_refill_and_unload_in_order() {
        let mut decoder = VecDecoder::new(3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let mut carry = CarryBuffer::new(3);

        assert!(carry.refill(&mut decoder));
        assert_eq!(carry.len(), 3);

        let mut out = [0.0f64; 1];
        assert_eq!(carry.unload(&mut out), 1);
        assert_eq!(out, [1.0]);
        assert_eq!(carry.len(), 2);

        // Remaining samples sit at the tail
        let mut out = [0.0f64; 5];
        assert_eq!(carry.unload(&mut out), 2);
        assert_eq!(&out[..2], &[2.0, 3.0]);
        assert!(carry.is_empty());

        assert!(carry.refill(&mut decoder));
        let mut out = [0.0f32; 3];
        assert_eq!(carry.unload(&mut out), 3);
        assert_eq!(out, [4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_refill_at_end_of_stream() {
        let mut decoder = VecDecoder::new(2, vec![0.5, -0.5]);
        let mut carry = CarryBuffer::new(2);

        assert!(carry.refill(&mut decoder));
        carry.clear();
        assert!(!carry.refill(&mut decoder));
        assert!(carry.is_empty());
    }

    #[test]
    fn test_unload_into_empty_output() {
        let mut decoder = VecDecoder::new(2, vec![0.5, -0.5]);
        let mut carry = CarryBuffer::new(2);
        carry.refill(&mut decoder);

        let mut out: [f64; 0] = [];
        assert_eq!(carry.unload(&mut out), 0);
        assert_eq!(carry.len(), 2);
    }
}
