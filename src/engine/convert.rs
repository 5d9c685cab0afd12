//! Sample Width Conversion
//!
//! Decoders produce native 32-bit float samples. Output buffers may hold a
//! wider type, in which case the decoder writes straight into the output
//! memory through a narrower view and the samples are widened in place.

use std::mem::{align_of, size_of};

mod sealed {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// Sample type delivered to callers
///
/// Sealed: every implementor is at least as wide and as aligned as the
/// native f32, which is what makes in-place widening sound.
pub trait OutputSample: sealed::Sealed + Copy + Default + From<f32> + Send + 'static {}

impl OutputSample for f32 {}
impl OutputSample for f64 {}

/// Number of native f32 slots covered by `len` output samples
#[inline]
pub fn native_capacity<S: OutputSample>(len: usize) -> usize {
    len * (size_of::<S>() / size_of::<f32>())
}

/// Reinterpret an output buffer as native f32 storage
///
/// The returned slice spans the same bytes, so it holds at least as many
/// f32 slots as `buf` holds samples.
pub fn native_view<S: OutputSample>(buf: &mut [S]) -> &mut [f32] {
    debug_assert!(size_of::<S>() % size_of::<f32>() == 0);
    debug_assert!(align_of::<S>() >= align_of::<f32>());

    // SAFETY: S is f32 or f64 (sealed). Both are plain floats with no
    // invalid bit patterns, S's size is a multiple of f32's and its
    // alignment is at least f32's, so the byte range of `buf` is a valid,
    // exclusively borrowed [f32] of the computed length.
    unsafe {
        std::slice::from_raw_parts_mut(buf.as_mut_ptr() as *mut f32, native_capacity::<S>(buf.len()))
    }
}

/// Widen the first `count` native f32 samples stored at the start of `buf`
/// into `count` output samples, in place
///
/// Iterates from the last index down to 0. Output sample `i` occupies the
/// bytes of native slots `i * k .. (i + 1) * k` (k = width ratio), all at or
/// above native slot `i`, so every write lands on slots already consumed and
/// each pending source value below it stays intact.
pub fn widen_in_place<S: OutputSample>(buf: &mut [S], count: usize) {
    assert!(count <= buf.len(), "widen count {} exceeds buffer {}", count, buf.len());

    let out = buf.as_mut_ptr();
    let native = out as *const f32;
    for i in (0..count).rev() {
        // SAFETY: i < count <= buf.len() <= native capacity, both pointers
        // derive from the same exclusive borrow, and the read completes
        // before the overlapping write.
        unsafe {
            let value = native.add(i).read();
            out.add(i).write(S::from(value));
        }
    }
}
