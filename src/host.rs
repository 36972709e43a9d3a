//! Host Capability Surface
//!
//! Contracts the host engine hands to an extension when it is loaded.
//! Instead of resolving entry points by name out of a module handle, the
//! host injects capabilities through [`HostModule`]; a missing capability is
//! reported at initialization time, never at call time. A fake host
//! implementing these traits is all the tests need.

use std::sync::Arc;

use crate::types::{Element, KernelIndex};

/// The host's generic invoke entry point for one precision.
///
/// The built-in transforms never call this; it is resolved and retained for
/// extensions that chain back into engine-side functions. A non-zero status
/// from the host is returned in the `Err` variant.
pub trait HostInvoke<T: Element>: Send + Sync {
    /// Invoke host-side function `function` within compute context `kernel`.
    fn invoke(&self, kernel: KernelIndex, function: i64, input: &[T]) -> Result<Vec<T>, i32>;
}

/// The host's buffer allocator for one precision.
pub trait HostAlloc<T: Element>: Send + Sync {
    /// Allocate `count` elements of host-managed storage for compute
    /// context `kernel`, copying from `source`. Elements past
    /// `source.len()` are default-filled. `pinned` hints whether `source`
    /// must be treated as pinned, host-resident memory. A non-zero status
    /// is returned in the `Err` variant and the extension forwards it
    /// verbatim.
    fn alloc_host(
        &self,
        kernel: KernelIndex,
        count: usize,
        source: &[T],
        pinned: bool,
    ) -> Result<HostBuffer<T>, i32>;
}

/// Capability lookup the host provides at load time, per precision.
///
/// Either callback may be absent; initialization requires both and fails
/// with an invalid-parameter status otherwise.
pub trait HostModule<T: Element> {
    /// The generic invoke entry point, if the host exports one.
    fn invoke_callback(&self) -> Option<Arc<dyn HostInvoke<T>>>;

    /// The host-buffer allocator, if the host exports one.
    fn alloc_callback(&self) -> Option<Arc<dyn HostAlloc<T>>>;
}

/// Host-managed output storage. Returned by [`HostAlloc::alloc_host`];
/// ownership transfers to whoever receives the invocation result, and the
/// extension never frees it.
#[derive(Debug, Clone, PartialEq)]
pub struct HostBuffer<T> {
    data: Vec<T>,
}

impl<T: Element> HostBuffer<T> {
    /// Wrap storage a host allocator produced.
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Allocate `count` elements, copying from `source` and default-filling
    /// any remainder. Convenience for host implementations.
    pub fn from_source(count: usize, source: &[T]) -> Self {
        let copied = count.min(source.len());
        let mut data = Vec::with_capacity(count);
        data.extend_from_slice(&source[..copied]);
        data.resize(count, T::default());
        Self { data }
    }

    /// The buffer contents.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Number of elements in the buffer.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Consume the buffer, yielding its storage.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_source_copies_and_pads() {
        let buf = HostBuffer::<f32>::from_source(5, &[1.0, 2.0, 3.0]);
        assert_eq!(buf.as_slice(), &[1.0, 2.0, 3.0, 0.0, 0.0]);
        assert_eq!(buf.len(), 5);
    }

    #[test]
    fn from_source_truncates_excess_source() {
        let buf = HostBuffer::<f64>::from_source(2, &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(buf.as_slice(), &[1.0, 2.0]);
    }

    #[test]
    fn into_vec_round_trip() {
        let buf = HostBuffer::new(vec![4.0f32, 9.0]);
        assert!(!buf.is_empty());
        assert_eq!(buf.into_vec(), vec![4.0, 9.0]);
    }
}
