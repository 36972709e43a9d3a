//! Extension Type System
//!
//! Defines the numeric precisions the extension supports, the kernel-index
//! handle assigned by the host, the selector-dispatched function table, and
//! the caller-supplied error-message sink.

use std::fmt;
use std::ops::Mul;

mod private {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// Numeric precisions the host engine initializes independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precision {
    /// 32-bit floating point
    Float,
    /// 64-bit floating point
    Double,
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Precision::Float => write!(f, "float"),
            Precision::Double => write!(f, "double"),
        }
    }
}

/// Element type of an extension buffer. Sealed: the host ABI defines exactly
/// two precisions, and each is initialized through its own entry point.
pub trait Element:
    Copy + Default + PartialEq + Mul<Output = Self> + fmt::Debug + Send + Sync + 'static + private::Sealed
{
    /// The precision discriminant for this element type.
    const PRECISION: Precision;
}

impl Element for f32 {
    const PRECISION: Precision = Precision::Float;
}

impl Element for f64 {
    const PRECISION: Precision = Precision::Double;
}

/// Opaque handle the host uses to identify a compute context for
/// allocation requests. Assigned by the host at initialization and passed
/// back on every callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KernelIndex(pub i64);

impl fmt::Display for KernelIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "kernel#{}", self.0)
    }
}

/// Elementwise transforms the extension exports, keyed by selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    /// selector 1: `output[i] = input[i] * input[i]`
    Square,
    /// selector 2: `output[i] = input[i]^3`
    Cube,
}

impl Function {
    /// Every exported function, in selector order.
    pub const ALL: [Function; 2] = [Function::Square, Function::Cube];

    /// Parse a raw selector value. Returns `None` for selectors the
    /// extension does not export.
    pub fn from_selector(selector: i64) -> Option<Self> {
        match selector {
            1 => Some(Function::Square),
            2 => Some(Function::Cube),
            _ => None,
        }
    }

    /// The selector value the host passes to invoke this function.
    pub fn selector(&self) -> i64 {
        match self {
            Function::Square => 1,
            Function::Cube => 2,
        }
    }

    /// Export name used in the extension manifest.
    pub fn name(&self) -> &'static str {
        match self {
            Function::Square => "square",
            Function::Cube => "cube",
        }
    }

    /// Apply the transform to a single element.
    pub fn apply<T: Element>(&self, x: T) -> T {
        match self {
            Function::Square => x * x,
            Function::Cube => x * x * x,
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Caller-supplied sink for human-readable failure messages, with a fixed
/// byte capacity. Messages longer than the capacity are truncated on a
/// UTF-8 character boundary.
#[derive(Debug, Clone)]
pub struct ErrorBuffer {
    message: String,
    capacity: usize,
}

impl ErrorBuffer {
    /// Create a sink that holds at most `capacity` bytes of message text.
    pub fn new(capacity: usize) -> Self {
        Self {
            message: String::new(),
            capacity,
        }
    }

    /// Replace the stored message, truncating to the capacity.
    pub fn write(&mut self, msg: &str) {
        let mut end = msg.len().min(self.capacity);
        while !msg.is_char_boundary(end) {
            end -= 1;
        }
        self.message.clear();
        self.message.push_str(&msg[..end]);
    }

    /// The stored message. Empty until a failure writes into the sink.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Maximum message length in bytes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True if no message has been written.
    pub fn is_empty(&self) -> bool {
        self.message.is_empty()
    }

    /// Discard any stored message.
    pub fn clear(&mut self) {
        self.message.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_parsing() {
        assert_eq!(Function::from_selector(1), Some(Function::Square));
        assert_eq!(Function::from_selector(2), Some(Function::Cube));
        assert_eq!(Function::from_selector(0), None);
        assert_eq!(Function::from_selector(3), None);
        assert_eq!(Function::from_selector(-1), None);
    }

    #[test]
    fn selector_round_trip() {
        for f in Function::ALL {
            assert_eq!(Function::from_selector(f.selector()), Some(f));
        }
    }

    #[test]
    fn apply_transforms() {
        assert_eq!(Function::Square.apply(3.0f32), 9.0);
        assert_eq!(Function::Cube.apply(3.0f64), 27.0);
        assert_eq!(Function::Square.apply(-2.0f64), 4.0);
        assert_eq!(Function::Cube.apply(-2.0f32), -8.0);
    }

    #[test]
    fn precision_display() {
        assert_eq!(Precision::Float.to_string(), "float");
        assert_eq!(Precision::Double.to_string(), "double");
        assert_eq!(<f32 as Element>::PRECISION, Precision::Float);
        assert_eq!(<f64 as Element>::PRECISION, Precision::Double);
        assert_eq!(KernelIndex(5).to_string(), "kernel#5");
    }

    #[test]
    fn error_buffer_truncates_to_capacity() {
        let mut err = ErrorBuffer::new(10);
        err.write("this message is longer than ten bytes");
        assert_eq!(err.message().len(), 10);
        assert_eq!(err.message(), "this messa");
    }

    #[test]
    fn error_buffer_truncates_on_char_boundary() {
        // "é" is two bytes; a capacity of 5 falls mid-character.
        let mut err = ErrorBuffer::new(5);
        err.write("abcdéf");
        assert_eq!(err.message(), "abcd");
    }

    #[test]
    fn error_buffer_overwrite_and_clear() {
        let mut err = ErrorBuffer::new(64);
        assert!(err.is_empty());
        err.write("first");
        err.write("second");
        assert_eq!(err.message(), "second");
        err.clear();
        assert!(err.is_empty());
    }
}
