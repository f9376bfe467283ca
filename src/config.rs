//! Panel configuration types and builder

use crate::busy::{DEFAULT_BUSY_MAX_POLLS, DEFAULT_BUSY_POLL_INTERVAL_MS};
use crate::color::BitmapColor;
pub use crate::error::{BuilderError, MAX_GATE_OUTPUTS, MAX_SOURCE_OUTPUTS};

/// Panel dimensions
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    /// Number of rows (height in pixels, corresponds to gate outputs)
    pub rows: u16,
    /// Number of columns (width in pixels, corresponds to source outputs)
    pub cols: u16,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if:
    /// - rows == 0 or rows > MAX_GATE_OUTPUTS
    /// - cols == 0 or cols > MAX_SOURCE_OUTPUTS
    /// - cols % 8 != 0 (the X address window is byte-aligned)
    pub fn new(rows: u16, cols: u16) -> Result<Self, BuilderError> {
        if rows == 0 || rows > MAX_GATE_OUTPUTS {
            return Err(BuilderError::InvalidDimensions { rows, cols });
        }
        if cols == 0 || cols > MAX_SOURCE_OUTPUTS || !cols.is_multiple_of(8) {
            return Err(BuilderError::InvalidDimensions { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    /// Framebuffer size in bytes (1 bit per pixel)
    pub fn buffer_size(&self) -> usize {
        (self.rows as usize * self.cols as usize).div_ceil(8)
    }
}

/// Panel configuration
///
/// Captured once at construction and read-only afterwards. Whether a reset or
/// busy pin is wired is decided by the [`Interface`](crate::Interface) instead.
#[derive(Clone, Debug)]
pub struct Config {
    /// Panel dimensions
    pub dimensions: Dimensions,
    /// Reset line polarity (true = held high while in reset)
    pub reset_active_high: bool,
    /// Caller supplies the framebuffer instead of the driver allocating one
    pub non_copy_mode: bool,
    /// Initial meaning of a set bit in source bitmaps
    pub bitmap_color: BitmapColor,
    /// Horizontal offset of the panel inside controller RAM, in pixels
    pub gap_x: u16,
    /// Vertical offset of the panel inside controller RAM, in pixels
    pub gap_y: u16,
    /// Interval between busy line polls
    pub busy_poll_interval_ms: u32,
    /// Polls before a busy wait gives up
    pub busy_max_polls: u32,
}

/// Builder for constructing panel configuration
///
/// # Example
///
/// ```rust,no_run
/// use ssd1681::{BitmapColor, Builder, Dimensions};
///
/// let dims = match Dimensions::new(300, 400) {
///     Ok(dims) => dims,
///     Err(_) => return,
/// };
/// let config = match Builder::new()
///     .dimensions(dims)
///     .bitmap_color(BitmapColor::Black)
///     .build()
/// {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// let _ = config;
/// ```
#[must_use]
pub struct Builder {
    dimensions: Option<Dimensions>,
    reset_active_high: bool,
    non_copy_mode: bool,
    bitmap_color: BitmapColor,
    gap_x: u16,
    gap_y: u16,
    busy_poll_interval_ms: u32,
    busy_max_polls: u32,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            dimensions: None,
            // SSD1681 RES# is active low
            reset_active_high: false,
            non_copy_mode: false,
            bitmap_color: BitmapColor::Black,
            gap_x: 0,
            gap_y: 0,
            busy_poll_interval_ms: DEFAULT_BUSY_POLL_INTERVAL_MS,
            busy_max_polls: DEFAULT_BUSY_MAX_POLLS,
        }
    }
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set panel dimensions (required)
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.dimensions = Some(dims);
        self
    }

    /// Set the reset line polarity
    pub fn reset_active_high(mut self, value: bool) -> Self {
        self.reset_active_high = value;
        self
    }

    /// Select non-copy mode (caller-owned framebuffer)
    pub fn non_copy_mode(mut self, value: bool) -> Self {
        self.non_copy_mode = value;
        self
    }

    /// Set the default bitmap color polarity
    pub fn bitmap_color(mut self, value: BitmapColor) -> Self {
        self.bitmap_color = value;
        self
    }

    /// Set the X/Y offsets of the panel inside controller RAM
    ///
    /// `gap_x` must be a multiple of 8 to keep the X window byte-aligned.
    pub fn gap(mut self, gap_x: u16, gap_y: u16) -> Self {
        self.gap_x = gap_x;
        self.gap_y = gap_y;
        self
    }

    /// Set the busy line polling interval and bound
    pub fn busy_polling(mut self, interval_ms: u32, max_polls: u32) -> Self {
        self.busy_poll_interval_ms = interval_ms;
        self.busy_max_polls = max_polls;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// - `BuilderError::MissingDimensions` if dimensions were not set
    /// - `BuilderError::InvalidDimensions` if the gap pushes the window past the controller
    ///   limits or `gap_x` is not byte-aligned
    /// - `BuilderError::InvalidBusyPolls` if `max_polls` is zero
    pub fn build(self) -> Result<Config, BuilderError> {
        let dimensions = self.dimensions.ok_or(BuilderError::MissingDimensions)?;
        let cols = dimensions.cols.saturating_add(self.gap_x);
        let rows = dimensions.rows.saturating_add(self.gap_y);
        if cols > MAX_SOURCE_OUTPUTS || rows > MAX_GATE_OUTPUTS || !self.gap_x.is_multiple_of(8)
        {
            return Err(BuilderError::InvalidDimensions { rows, cols });
        }
        if self.busy_max_polls == 0 {
            return Err(BuilderError::InvalidBusyPolls);
        }
        Ok(Config {
            dimensions,
            reset_active_high: self.reset_active_high,
            non_copy_mode: self.non_copy_mode,
            bitmap_color: self.bitmap_color,
            gap_x: self.gap_x,
            gap_y: self.gap_y,
            busy_poll_interval_ms: self.busy_poll_interval_ms,
            busy_max_polls: self.busy_max_polls,
        })
    }
}
