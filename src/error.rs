//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`])
//! and panel operations ([`Error`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`Error`] - Runtime errors during panel operations
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level hardware communication errors
//!
//! A busy line that never clears is not an error: see [`BusyStatus`](crate::busy::BusyStatus).
//!
//! ## Example
//!
//! ```
//! use ssd1681::{Builder, Dimensions, BuilderError};
//!
//! // Missing dimensions
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingDimensions)));
//!
//! // Invalid dimensions
//! let result = Dimensions::new(300, 404); // Not byte-aligned
//! assert!(result.is_err());
//! ```

use crate::display::Lifecycle;
use crate::interface::DisplayInterface;

/// Maximum gate outputs (rows) supported by the controller family
pub const MAX_GATE_OUTPUTS: u16 = 300;

/// Maximum source outputs (columns) supported by the controller family
pub const MAX_SOURCE_OUTPUTS: u16 = 400;

/// Errors that can occur when interacting with the panel
///
/// Generic over the interface type to preserve the specific error type.
pub enum Error<I: DisplayInterface> {
    /// Interface error (SPI/GPIO)
    ///
    /// Wraps the underlying hardware error from the [`DisplayInterface`] implementation,
    /// unchanged. No retry is attempted.
    Interface(I::Error),
    /// A buffer is too small for the requested operation
    BufferTooSmall {
        /// Required buffer size in bytes
        required: usize,
        /// Provided buffer size in bytes
        provided: usize,
    },
    /// An argument was rejected before any bus traffic
    InvalidArgument(&'static str),
    /// The driver-owned framebuffer could not be allocated
    OutOfMemory,
    /// `draw`/`refresh` was called before a successful `initialize`
    NotInitialized,
    /// The operation is not valid in the panel's current lifecycle state
    InvalidState {
        /// State the operation requires
        expected: Lifecycle,
        /// State the panel was in
        actual: Lifecycle,
    },
    /// The operation is not supported by this driver
    Unsupported(&'static str),
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(_) => write!(f, "Interface error"),
            Self::BufferTooSmall { required, provided } => {
                write!(
                    f,
                    "Buffer too small: required {required} bytes, provided {provided}"
                )
            }
            Self::InvalidArgument(what) => write!(f, "Invalid argument: {what}"),
            Self::OutOfMemory => write!(f, "Out of memory allocating framebuffer"),
            Self::NotInitialized => write!(f, "Panel is not initialized"),
            Self::InvalidState { expected, actual } => {
                write!(f, "Invalid state: expected {expected:?}, panel is {actual:?}")
            }
            Self::Unsupported(what) => write!(f, "Unsupported: {what}"),
        }
    }
}

impl<I: DisplayInterface> core::fmt::Debug for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => f.debug_tuple("Interface").field(e).finish(),
            Self::BufferTooSmall { required, provided } => f
                .debug_struct("BufferTooSmall")
                .field("required", required)
                .field("provided", provided)
                .finish(),
            Self::InvalidArgument(what) => f.debug_tuple("InvalidArgument").field(what).finish(),
            Self::OutOfMemory => f.write_str("OutOfMemory"),
            Self::NotInitialized => f.write_str("NotInitialized"),
            Self::InvalidState { expected, actual } => f
                .debug_struct("InvalidState")
                .field("expected", expected)
                .field("actual", actual)
                .finish(),
            Self::Unsupported(what) => f.debug_tuple("Unsupported").field(what).finish(),
        }
    }
}

impl<I: DisplayInterface> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
#[derive(Debug, PartialEq)]
pub enum BuilderError {
    /// Dimensions were not specified
    ///
    /// [`Builder::dimensions()`](crate::config::Builder::dimensions) must be called before building.
    MissingDimensions,
    /// Invalid dimensions provided
    ///
    /// See [`Dimensions::new()`](crate::config::Dimensions::new) for constraints.
    InvalidDimensions {
        /// Number of rows (height) requested
        rows: u16,
        /// Number of columns (width) requested
        cols: u16,
    },
    /// Busy polling needs a non-zero number of polls
    InvalidBusyPolls,
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingDimensions => write!(f, "Dimensions must be specified"),
            Self::InvalidDimensions { rows, cols } => write!(
                f,
                "Invalid dimensions {rows}x{cols} (max {MAX_GATE_OUTPUTS}x{MAX_SOURCE_OUTPUTS}, cols must be multiple of 8)"
            ),
            Self::InvalidBusyPolls => write!(f, "Busy poll count must be at least 1"),
        }
    }
}

impl core::error::Error for BuilderError {}
