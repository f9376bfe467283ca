//! Panel state machine
//!
//! [`Panel`] ties the interface, busy monitor and packer together into the
//! lifecycle the controller expects:
//!
//! ```text
//! new -> reset -> initialize -> { draw | refresh }* -> destroy
//!          ^                          |
//!          +--------------------------+
//! ```
//!
//! All operations block the caller. There is no internal locking; share a panel
//! between contexts only behind an external mutex.

use embedded_hal::delay::DelayNs;
use log::{debug, info, warn};

use crate::busy::{self, BusyStatus};
use crate::color::BitmapColor;
use crate::command::{
    BORDER_WAVEFORM, BORDER_WAVEFORM_FOLLOW_LUT, DATA_ENTRY_MODE, DATA_ENTRY_XINC_YINC,
    DISPLAY_UPDATE_CTRL1, DISPLAY_UPDATE_CTRL2, MASTER_ACTIVATION, SET_RAM_X_COUNTER,
    SET_RAM_X_RANGE, SET_RAM_Y_COUNTER, SET_RAM_Y_RANGE, SOFT_RESET, TEMP_OVERRIDE,
    UPDATE_CTRL1_BW_ONLY, UPDATE_CTRL2_FULL, UPDATE_CTRL2_LOAD_TEMP_LUT, WRITE_RAM_BW, WRITE_TEMP,
};
use crate::config::{Config, Dimensions};
use crate::error::Error;
use crate::framebuffer::Framebuffer;
use crate::interface::DisplayInterface;
use crate::packer::{self, PackError};

type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Where the panel is in its lifecycle
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Lifecycle {
    /// Constructed, or a previous initialization failed
    #[default]
    Uninitialized,
    /// Hardware reset done, registers not yet programmed
    Reset,
    /// Ready for draw and refresh
    Initialized,
}

/// Orientation flags kept for drawing code
///
/// The driver records these but does not transform pixels itself.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Orientation {
    /// Swap X and Y axes
    pub swap_xy: bool,
    /// Mirror along the X axis
    pub mirror_x: bool,
    /// Mirror along the Y axis
    pub mirror_y: bool,
}

/// Event data passed to the refresh-done callback
///
/// Reserved; the callback currently always receives `None`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub struct RefreshDoneEvent;

/// Refresh-done callback
///
/// Runs from whatever context calls [`Panel::on_busy_released`], usually an interrupt
/// handler, so it must not block. Context is whatever the closure captures.
pub type RefreshDoneCallback<'a, I> = dyn FnMut(&Panel<'a, I>, Option<&RefreshDoneEvent>) + 'a;

impl<I: DisplayInterface> From<PackError> for Error<I> {
    fn from(err: PackError) -> Self {
        match err {
            PackError::EmptyRegion => Error::InvalidArgument("draw region packs to zero bytes"),
            PackError::SourceTooShort { required, provided }
            | PackError::FramebufferTooSmall { required, provided } => {
                Error::BufferTooSmall { required, provided }
            }
        }
    }
}

/// Driver for an SSD1681-family black/white panel
pub struct Panel<'a, I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Panel configuration
    config: Config,
    /// Packed BW RAM staging buffer
    framebuffer: Framebuffer<'a>,
    /// Lifecycle state
    lifecycle: Lifecycle,
    /// Current meaning of a set source bit
    bitmap_color: BitmapColor,
    /// Orientation flags
    orientation: Orientation,
    /// Called when the busy line drops after a refresh
    on_refresh_done: Option<&'a mut RefreshDoneCallback<'a, I>>,
}

impl<'a, I> Panel<'a, I>
where
    I: DisplayInterface,
{
    /// Create a panel that allocates and owns its framebuffer
    ///
    /// # Errors
    ///
    /// - `Error::InvalidArgument` if `config` selects non-copy mode
    /// - `Error::OutOfMemory` if the framebuffer cannot be allocated
    ///
    /// On error the interface is dropped, releasing its pins.
    #[cfg(feature = "alloc")]
    pub fn new(interface: I, config: Config) -> Result<Self, Error<I>> {
        if config.non_copy_mode {
            return Err(Error::InvalidArgument(
                "non-copy mode needs a caller framebuffer",
            ));
        }
        let size = config.dimensions.buffer_size();
        let framebuffer = Framebuffer::allocate(size).ok_or(Error::OutOfMemory)?;
        debug!("allocated {size} byte framebuffer");
        Ok(Self::with_framebuffer(interface, config, framebuffer))
    }

    /// Create a panel that packs into a caller-owned framebuffer
    ///
    /// # Errors
    ///
    /// - `Error::InvalidArgument` if `config` does not select non-copy mode
    /// - `Error::BufferTooSmall` if `buffer` is shorter than `dimensions.buffer_size()`
    pub fn new_non_copy(
        interface: I,
        config: Config,
        buffer: &'a mut [u8],
    ) -> Result<Self, Error<I>> {
        if !config.non_copy_mode {
            return Err(Error::InvalidArgument(
                "caller framebuffer given without non-copy mode",
            ));
        }
        let required = config.dimensions.buffer_size();
        if buffer.len() < required {
            return Err(Error::BufferTooSmall {
                required,
                provided: buffer.len(),
            });
        }
        Ok(Self::with_framebuffer(
            interface,
            config,
            Framebuffer::borrowed(buffer),
        ))
    }

    fn with_framebuffer(interface: I, config: Config, framebuffer: Framebuffer<'a>) -> Self {
        Self {
            interface,
            bitmap_color: config.bitmap_color,
            config,
            framebuffer,
            lifecycle: Lifecycle::Uninitialized,
            orientation: Orientation::default(),
            on_refresh_done: None,
        }
    }

    /// Pulse the reset line and wait for the controller
    ///
    /// Without a reset line only the busy wait runs. A busy wait that gives up is
    /// logged and ignored.
    pub fn reset<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        let pulsed = self
            .interface
            .reset(delay, self.config.reset_active_high)
            .map_err(Error::Interface)?;
        if !pulsed {
            debug!("no reset line, skipping pulse");
        }

        info!("waiting for reset to complete");
        self.wait_until_idle(delay)?;

        self.lifecycle = Lifecycle::Reset;
        Ok(())
    }

    /// Program the controller registers and addressing window
    ///
    /// # Errors
    ///
    /// - `Error::InvalidState` unless [`reset`](Self::reset) ran first
    /// - `Error::Interface` from the first failed transfer; the panel drops back to
    ///   [`Lifecycle::Uninitialized`] and must be reset before trying again
    pub fn initialize<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        if self.lifecycle != Lifecycle::Reset {
            return Err(Error::InvalidState {
                expected: Lifecycle::Reset,
                actual: self.lifecycle,
            });
        }

        info!("initializing panel");
        match self.run_init_sequence(delay) {
            Ok(()) => {
                self.lifecycle = Lifecycle::Initialized;
                Ok(())
            }
            Err(err) => {
                self.lifecycle = Lifecycle::Uninitialized;
                Err(err)
            }
        }
    }

    fn run_init_sequence<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.send(SOFT_RESET, &[])?;
        self.wait_until_idle(delay)?;

        self.send(DISPLAY_UPDATE_CTRL1, &UPDATE_CTRL1_BW_ONLY)?;
        self.send(BORDER_WAVEFORM, &[BORDER_WAVEFORM_FOLLOW_LUT])?;
        self.send(WRITE_TEMP, &[TEMP_OVERRIDE])?;

        // Load temperature and waveform so the first refresh does not pay for it
        self.send(DISPLAY_UPDATE_CTRL2, &[UPDATE_CTRL2_LOAD_TEMP_LUT])?;
        self.send(MASTER_ACTIVATION, &[])?;
        self.wait_until_idle(delay)?;

        self.send(DATA_ENTRY_MODE, &[DATA_ENTRY_XINC_YINC])?;
        self.set_ram_window()?;
        self.wait_until_idle(delay)?;

        Ok(())
    }

    /// Set the RAM window to the whole panel and park the counters at its origin
    fn set_ram_window(&mut self) -> DisplayResult<I> {
        let Dimensions { rows, cols } = self.config.dimensions;
        let x_start = self.config.gap_x;
        let x_end = x_start + cols - 1;
        let y_start = self.config.gap_y;
        let y_end = y_start + rows - 1;

        // X is addressed in bytes of 8 pixels, Y in rows
        self.send(SET_RAM_X_RANGE, &[(x_start >> 3) as u8, (x_end >> 3) as u8])?;

        let [y_start_lo, y_start_hi] = y_start.to_le_bytes();
        let [y_end_lo, y_end_hi] = y_end.to_le_bytes();
        self.send(
            SET_RAM_Y_RANGE,
            &[y_start_lo, y_start_hi, y_end_lo, y_end_hi],
        )?;

        self.send(SET_RAM_X_COUNTER, &[(x_start >> 3) as u8])?;
        self.send(SET_RAM_Y_COUNTER, &[y_start_lo, y_start_hi])?;

        Ok(())
    }

    /// Pack a source bitmap and write it to BW RAM
    ///
    /// `x_end`/`y_end` are exclusive. The byte count sent is `len_x * len_y / 8`
    /// with integer division, so a rectangle whose area is not a multiple of 8
    /// loses its trailing pixels (3x3 sends one byte). `color_data` is an 8-byte
    /// header followed by packed pixels.
    ///
    /// Nothing becomes visible until [`refresh`](Self::refresh).
    ///
    /// # Errors
    ///
    /// - `Error::NotInitialized` before a successful [`initialize`](Self::initialize)
    /// - `Error::InvalidArgument` if the rectangle packs to zero bytes or its area
    ///   does not fit in `usize`
    /// - `Error::BufferTooSmall` if `color_data` or the framebuffer is too short
    /// - `Error::Interface` if the transfer fails; the panel stays usable
    pub fn draw<D: DelayNs>(
        &mut self,
        x_start: i32,
        y_start: i32,
        x_end: i32,
        y_end: i32,
        color_data: &[u8],
        delay: &mut D,
    ) -> DisplayResult<I> {
        if self.lifecycle != Lifecycle::Initialized {
            return Err(Error::NotInitialized);
        }

        let len_x = x_start.abs_diff(x_end) as usize;
        let len_y = y_start.abs_diff(y_end) as usize;
        // Controller windows are inclusive
        let x_last = x_end.saturating_sub(1);
        let y_last = y_end.saturating_sub(1);
        let buffer_size = len_x
            .checked_mul(len_y)
            .ok_or(Error::InvalidArgument("draw region too large"))?
            / 8;
        debug!(
            "draw ({x_start},{y_start})..=({x_last},{y_last}): {len_x}x{len_y}, {buffer_size} bytes"
        );

        // Pack before the first busy wait so bad arguments fail with no bus traffic
        let stats = packer::pack(
            self.framebuffer.as_mut_slice(),
            color_data,
            buffer_size,
            self.bitmap_color,
        )?;
        debug!(
            "packed {} black and {} white pixels",
            stats.black, stats.white
        );

        self.wait_until_idle(delay)?;
        self.interface
            .send_color(WRITE_RAM_BW, &self.framebuffer.as_slice()[..buffer_size])
            .map_err(Error::Interface)?;
        self.wait_until_idle(delay)?;

        Ok(())
    }

    /// Start a full refresh
    ///
    /// Returns as soon as the command is sent; the controller keeps BUSY high for the
    /// seconds the refresh takes. Poll [`wait_until_idle`](Self::wait_until_idle) or
    /// register a callback with [`register_refresh_done`](Self::register_refresh_done)
    /// to learn when it is done.
    pub fn refresh(&mut self) -> DisplayResult<I> {
        if self.lifecycle != Lifecycle::Initialized {
            return Err(Error::NotInitialized);
        }

        info!("refreshing panel");
        self.send(DISPLAY_UPDATE_CTRL2, &[UPDATE_CTRL2_FULL])?;
        if self.on_refresh_done.is_some() {
            self.interface
                .set_busy_interrupt(true)
                .map_err(Error::Interface)?;
        }
        self.send(MASTER_ACTIVATION, &[])?;
        debug!("refresh started");

        Ok(())
    }

    /// Turn the panel on or off
    ///
    /// An initialized panel is always on, so `true` only checks the state. Turning
    /// off would mean deep sleep, which this driver does not enter: the controller
    /// keeps BUSY high while asleep and only a [`reset`](Self::reset) plus
    /// [`initialize`](Self::initialize) brings it back.
    pub fn disp_on_off(&mut self, on: bool) -> DisplayResult<I> {
        if !on {
            warn!("display off requested, sleep mode is not supported");
            return Err(Error::Unsupported(
                "sleep mode; waking needs reset() and initialize()",
            ));
        }
        if self.lifecycle != Lifecycle::Initialized {
            return Err(Error::NotInitialized);
        }
        Ok(())
    }

    /// Bounded wait for the busy line
    ///
    /// Uses the configured poll interval and bound. The panel's own operations call
    /// this and ignore [`BusyStatus::TimedOut`]; callers may apply a stricter policy.
    pub fn wait_until_idle<D: DelayNs>(&mut self, delay: &mut D) -> Result<BusyStatus, Error<I>> {
        busy::wait_until_idle(
            &mut self.interface,
            delay,
            self.config.busy_poll_interval_ms,
            self.config.busy_max_polls,
        )
        .map_err(Error::Interface)
    }

    /// Register the refresh-done callback
    ///
    /// Replaces any earlier registration. Once registered, [`refresh`](Self::refresh)
    /// arms the busy line interrupt before starting the update.
    pub fn register_refresh_done(&mut self, callback: &'a mut RefreshDoneCallback<'a, I>) {
        self.on_refresh_done = Some(callback);
    }

    /// Remove the refresh-done callback
    pub fn clear_refresh_done(&mut self) {
        self.on_refresh_done = None;
    }

    /// Handle the busy line dropping after a refresh
    ///
    /// Call from the busy line interrupt handler. Disables the interrupt so it fires
    /// once per refresh, then runs the registered callback. Returns whether a
    /// callback ran.
    pub fn on_busy_released(&mut self) -> Result<bool, Error<I>> {
        self.interface
            .set_busy_interrupt(false)
            .map_err(Error::Interface)?;

        let Some(callback) = self.on_refresh_done.take() else {
            return Ok(false);
        };
        callback(self, None);
        self.on_refresh_done = Some(callback);
        Ok(true)
    }

    /// Select what a set source bit means for later draws
    pub fn set_bitmap_color(&mut self, color: BitmapColor) {
        self.bitmap_color = color;
    }

    /// Current source bit meaning
    pub fn bitmap_color(&self) -> BitmapColor {
        self.bitmap_color
    }

    /// Record orientation flags for drawing code
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    /// Recorded orientation flags
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Lifecycle state
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Get panel dimensions
    pub fn dimensions(&self) -> &Dimensions {
        &self.config.dimensions
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Packed contents of the last draw
    pub fn framebuffer(&self) -> &[u8] {
        self.framebuffer.as_slice()
    }

    /// Whether the panel owns its framebuffer
    pub fn owns_framebuffer(&self) -> bool {
        self.framebuffer.is_owned()
    }

    /// Tear the panel down and hand back the interface
    ///
    /// An owned framebuffer is freed here; a borrowed one returns to the caller.
    pub fn destroy(self) -> I {
        debug!(
            "destroying panel (owned framebuffer: {})",
            self.framebuffer.is_owned()
        );
        self.interface
    }

    /// Send a command with parameters to the controller
    fn send(&mut self, cmd: u8, params: &[u8]) -> DisplayResult<I> {
        self.interface
            .send_command_with_params(cmd, params)
            .map_err(Error::Interface)
    }
}
