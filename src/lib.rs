//! Kernel Extension - Example Compute-Engine Extension Module
//!
//! An example of the extension pattern a host computation engine supports:
//! the host loads an extension, hands it callback capabilities (a generic
//! invoke entry point and a host-buffer allocator) plus a kernel index per
//! numeric precision, and then drives it through a small selector-dispatched
//! function table. This crate implements that extension for f32 and f64
//! with two elementwise transforms, square and cube.
//!
//! # Architecture
//!
//! ```text
//! Host Engine
//!     │  HostModule<T> capabilities + KernelIndex
//!     ▼
//! ExtensionModule  (init_float / init_double)
//!     │
//!     ▼
//! Extension<T>  (selector dispatch: 1 = square, 2 = cube)
//!     │
//!     ▼
//! HostAlloc<T>  (host-managed output storage)
//! ```
//!
//! State is owned by the caller, not process-wide: the host (or a test)
//! constructs an [`ExtensionModule`] around its capability handle and
//! threads it through every call. Scratch is allocated per invocation,
//! so there is no cross-call aliasing and no fixed element cap unless one
//! is requested explicitly.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use kernel_extension::{
//!     Element, ErrorBuffer, ExtensionModule, HostAlloc, HostBuffer, HostInvoke,
//!     HostModule, KernelIndex,
//! };
//!
//! struct Engine;
//!
//! struct EngineInvoke;
//! impl<T: Element> HostInvoke<T> for EngineInvoke {
//!     fn invoke(&self, _: KernelIndex, _: i64, input: &[T]) -> Result<Vec<T>, i32> {
//!         Ok(input.to_vec())
//!     }
//! }
//!
//! struct EngineAlloc;
//! impl<T: Element> HostAlloc<T> for EngineAlloc {
//!     fn alloc_host(
//!         &self,
//!         _: KernelIndex,
//!         count: usize,
//!         source: &[T],
//!         _pinned: bool,
//!     ) -> Result<HostBuffer<T>, i32> {
//!         Ok(HostBuffer::from_source(count, source))
//!     }
//! }
//!
//! impl<T: Element> HostModule<T> for Engine {
//!     fn invoke_callback(&self) -> Option<Arc<dyn HostInvoke<T>>> {
//!         Some(Arc::new(EngineInvoke))
//!     }
//!     fn alloc_callback(&self) -> Option<Arc<dyn HostAlloc<T>>> {
//!         Some(Arc::new(EngineAlloc))
//!     }
//! }
//!
//! let mut module = ExtensionModule::new(Engine);
//! module.init_float(KernelIndex(1)).unwrap();
//!
//! let mut err = ErrorBuffer::new(256);
//! let out = module.invoke_float(1, &[2.0, 3.0, 4.0], &mut err).unwrap();
//! assert_eq!(out.buffer.as_slice(), &[4.0, 9.0, 16.0]);
//! assert_eq!(out.len, 3);
//! ```

pub mod error;
pub mod extension;
pub mod host;
pub mod manifest;
pub mod types;

pub use error::{
    ExtensionError, ExtensionResult, STATUS_INVALID_PARAMETER, STATUS_NOT_INITIALIZED,
    STATUS_NOT_SUPPORTED, STATUS_SUCCESS,
};
pub use extension::{Extension, ExtensionModule, InvokeOutput, NOT_SUPPORTED_MESSAGE};
pub use host::{HostAlloc, HostBuffer, HostInvoke, HostModule};
pub use manifest::{ExtensionManifest, FunctionExport, ManifestError, ManifestResult};
pub use types::{Element, ErrorBuffer, Function, KernelIndex, Precision};
