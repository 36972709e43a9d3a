//! Extension Entry Points
//!
//! [`Extension`] holds the initialized per-precision state: the two host
//! callbacks resolved at initialization plus the host-assigned kernel
//! index. [`ExtensionModule`] is the caller-owned four-entry-point surface
//! the host drives (init and invoke, once per precision); it replaces the
//! process-wide state a loadable module would traditionally keep, so two
//! modules can coexist and nothing needs serializing across threads.
//!
//! Invocation dispatches on a selector: 1 squares, 2 cubes, anything else
//! writes a message into the caller's error sink and fails with a
//! not-supported status. The transformed scratch is handed to the host's
//! allocator and the resulting host-owned buffer is returned to the caller.

use std::sync::Arc;

use crate::error::{ExtensionError, ExtensionResult};
use crate::host::{HostAlloc, HostBuffer, HostInvoke, HostModule};
use crate::types::{Element, ErrorBuffer, Function, KernelIndex, Precision};

/// Message written into the caller's error sink for unknown selectors.
pub const NOT_SUPPORTED_MESSAGE: &str = "The function specified is not supported.";

/// A successful invocation: host-allocated output plus the reported
/// element count. Produced only on success, so a failed invocation never
/// leaves a partially set output.
#[derive(Debug)]
pub struct InvokeOutput<T> {
    /// Host-managed storage holding the transformed elements.
    pub buffer: HostBuffer<T>,
    /// Reported output length. Equals the full input length, even when an
    /// explicit scratch capacity truncated the processed range (legacy
    /// host contract; see `Extension::with_capacity`).
    pub len: usize,
}

/// Initialized extension state for one numeric precision.
pub struct Extension<T: Element> {
    invoke: Arc<dyn HostInvoke<T>>,
    alloc: Arc<dyn HostAlloc<T>>,
    kernel: KernelIndex,
    capacity: Option<usize>,
}

impl<T: Element> Extension<T> {
    /// Resolve both host callbacks and bind the kernel index.
    ///
    /// Fails with [`ExtensionError::InvalidParameter`] if the host is
    /// missing either callback; no state is considered initialized in that
    /// case. Scratch is allocated per call with no size cap.
    pub fn initialize<H>(host: &H, kernel: KernelIndex) -> ExtensionResult<Self>
    where
        H: HostModule<T> + ?Sized,
    {
        let invoke = host
            .invoke_callback()
            .ok_or(ExtensionError::InvalidParameter)?;
        let alloc = host
            .alloc_callback()
            .ok_or(ExtensionError::InvalidParameter)?;
        Ok(Self {
            invoke,
            alloc,
            kernel,
            capacity: None,
        })
    }

    /// Like [`Extension::initialize`], but caps the processed range at
    /// `capacity` elements per invocation.
    ///
    /// Input elements past the cap are silently dropped while the reported
    /// output length still equals the full input length; this preserves the
    /// fixed-scratch host contract for callers that depend on it.
    pub fn with_capacity<H>(host: &H, kernel: KernelIndex, capacity: usize) -> ExtensionResult<Self>
    where
        H: HostModule<T> + ?Sized,
    {
        let mut ext = Self::initialize(host, kernel)?;
        ext.capacity = Some(capacity);
        Ok(ext)
    }

    /// The host-assigned kernel index bound at initialization.
    pub fn kernel(&self) -> KernelIndex {
        self.kernel
    }

    /// The per-invocation scratch cap, if any.
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// The numeric precision this state serves.
    pub fn precision(&self) -> Precision {
        T::PRECISION
    }

    /// Forward a call to the host's generic invoke entry point.
    ///
    /// The built-in transforms never use this; it exists for extensions
    /// that chain into engine-side functions. The host's non-zero failure
    /// status, if any, is returned verbatim.
    pub fn host_invoke(&self, function: i64, input: &[T]) -> Result<Vec<T>, i32> {
        self.invoke.invoke(self.kernel, function, input)
    }

    /// Apply the selected transform to `input` and return the result in
    /// host-managed storage.
    ///
    /// Unknown selectors write [`NOT_SUPPORTED_MESSAGE`] (truncated to the
    /// sink's capacity) into `err`, perform no computation, and fail with
    /// [`ExtensionError::NotSupported`]. A non-zero status from the host
    /// allocator is forwarded verbatim as [`ExtensionError::Host`].
    pub fn invoke(
        &self,
        selector: i64,
        input: &[T],
        err: &mut ErrorBuffer,
    ) -> ExtensionResult<InvokeOutput<T>> {
        let function = match Function::from_selector(selector) {
            Some(f) => f,
            None => {
                err.write(NOT_SUPPORTED_MESSAGE);
                return Err(ExtensionError::NotSupported);
            }
        };

        let processed = match self.capacity {
            Some(cap) => input.len().min(cap),
            None => input.len(),
        };
        let scratch: Vec<T> = input[..processed].iter().map(|&x| function.apply(x)).collect();

        // The host sizes the allocation by the full input count; the legacy
        // contract reports that count as the output length even when the
        // processed range was truncated.
        let buffer = self
            .alloc
            .alloc_host(self.kernel, input.len(), &scratch, false)
            .map_err(ExtensionError::Host)?;

        Ok(InvokeOutput {
            buffer,
            len: input.len(),
        })
    }
}

impl<T: Element> std::fmt::Debug for Extension<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extension")
            .field("precision", &T::PRECISION)
            .field("kernel", &self.kernel)
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

/// The four-entry-point surface a host drives: init and invoke, once per
/// precision. Owns the host handle and the per-precision state; a failed
/// init leaves its precision uninitialized, and invoking an uninitialized
/// precision fails with [`ExtensionError::NotInitialized`] without touching
/// the input.
pub struct ExtensionModule<H> {
    host: H,
    scratch_capacity: Option<usize>,
    float: Option<Extension<f32>>,
    double: Option<Extension<f64>>,
}

impl<H> ExtensionModule<H> {
    /// Wrap a host handle. Neither precision is initialized yet.
    pub fn new(host: H) -> Self {
        Self {
            host,
            scratch_capacity: None,
            float: None,
            double: None,
        }
    }

    /// Like [`ExtensionModule::new`], but every initialized precision caps
    /// its processed range at `capacity` elements per invocation.
    pub fn with_scratch_capacity(host: H, capacity: usize) -> Self {
        Self {
            scratch_capacity: Some(capacity),
            ..Self::new(host)
        }
    }

    /// The wrapped host handle.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The float-precision state, if initialized.
    pub fn float(&self) -> Option<&Extension<f32>> {
        self.float.as_ref()
    }

    /// The double-precision state, if initialized.
    pub fn double(&self) -> Option<&Extension<f64>> {
        self.double.as_ref()
    }

    /// Initialize the float precision with a host-assigned kernel index.
    /// Re-initialization re-resolves the callbacks and overwrites.
    pub fn init_float(&mut self, kernel: KernelIndex) -> ExtensionResult<()>
    where
        H: HostModule<f32>,
    {
        self.float = Some(self.resolve(kernel)?);
        Ok(())
    }

    /// Initialize the double precision with a host-assigned kernel index.
    /// Re-initialization re-resolves the callbacks and overwrites.
    pub fn init_double(&mut self, kernel: KernelIndex) -> ExtensionResult<()>
    where
        H: HostModule<f64>,
    {
        self.double = Some(self.resolve(kernel)?);
        Ok(())
    }

    /// Invoke the selected float transform.
    pub fn invoke_float(
        &self,
        selector: i64,
        input: &[f32],
        err: &mut ErrorBuffer,
    ) -> ExtensionResult<InvokeOutput<f32>> {
        self.float
            .as_ref()
            .ok_or(ExtensionError::NotInitialized)?
            .invoke(selector, input, err)
    }

    /// Invoke the selected double transform.
    pub fn invoke_double(
        &self,
        selector: i64,
        input: &[f64],
        err: &mut ErrorBuffer,
    ) -> ExtensionResult<InvokeOutput<f64>> {
        self.double
            .as_ref()
            .ok_or(ExtensionError::NotInitialized)?
            .invoke(selector, input, err)
    }

    fn resolve<T: Element>(&self, kernel: KernelIndex) -> ExtensionResult<Extension<T>>
    where
        H: HostModule<T>,
    {
        match self.scratch_capacity {
            Some(cap) => Extension::with_capacity(&self.host, kernel, cap),
            None => Extension::initialize(&self.host, kernel),
        }
    }
}

impl<H: std::fmt::Debug> std::fmt::Debug for ExtensionModule<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionModule")
            .field("host", &self.host)
            .field("scratch_capacity", &self.scratch_capacity)
            .field("float_initialized", &self.float.is_some())
            .field("double_initialized", &self.double.is_some())
            .finish()
    }
}
