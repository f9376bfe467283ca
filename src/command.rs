//! SSD1681 command definitions
//!
//! Register addresses and the fixed parameter values this driver writes to them.
//! Commands are sent over SPI with the DC pin low; parameters follow with DC high.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ssd1681::{command, DisplayInterface, Interface};
//! # use core::convert::Infallible;
//! # use embedded_hal::digital::{InputPin, OutputPin};
//! # use embedded_hal::spi::{Operation, SpiDevice};
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl InputPin for MockPin {
//! #     fn is_high(&mut self) -> Result<bool, Self::Error> { Ok(false) }
//! #     fn is_low(&mut self) -> Result<bool, Self::Error> { Ok(true) }
//! # }
//! # let mut interface = Interface::new(MockSpi, MockPin, Some(MockPin), Some(MockPin));
//! let _ = interface.send_command(command::SOFT_RESET);
//! let _ = interface.send_command_with_params(
//!     command::BORDER_WAVEFORM,
//!     &[command::BORDER_WAVEFORM_FOLLOW_LUT],
//! );
//! ```

// System control

/// Software reset (0x12)
///
/// Restores register defaults. BUSY is high until the reset completes.
pub const SOFT_RESET: u8 = 0x12;

/// Display update control 1 (0x21)
///
/// Two bytes: RAM content options (bypass / invert per plane) and source output mode.
pub const DISPLAY_UPDATE_CTRL1: u8 = 0x21;

/// Border waveform control (0x3C)
pub const BORDER_WAVEFORM: u8 = 0x3C;

/// Write temperature register (0x1A)
///
/// Overrides the value the controller would otherwise sense. Two-byte form carries
/// a 12-bit value; the one-byte form used here sets the integer part only.
pub const WRITE_TEMP: u8 = 0x1A;

/// Display update control 2 (0x22)
///
/// Selects the sequence run by [`MASTER_ACTIVATION`]. Bit flags:
/// - 0x80: Enable clock
/// - 0x40: Enable analog
/// - 0x20: Load temperature value
/// - 0x10: Load LUT
/// - 0x08: Display mode 2
/// - 0x04: Display (pattern)
/// - 0x02: Disable analog
/// - 0x01: Disable clock
pub const DISPLAY_UPDATE_CTRL2: u8 = 0x22;

/// Master activation (0x20)
///
/// Runs the sequence selected with [`DISPLAY_UPDATE_CTRL2`]. BUSY goes high until done.
pub const MASTER_ACTIVATION: u8 = 0x20;

// RAM addressing

/// Data entry mode (0x11)
///
/// - Bit 0 (ID0): X direction (0=decrement, 1=increment)
/// - Bit 1 (ID1): Y direction (0=decrement, 1=increment)
/// - Bit 2 (AM): Address counter direction (0=X, 1=Y)
pub const DATA_ENTRY_MODE: u8 = 0x11;

/// Set RAM X address window (0x44)
///
/// Two bytes: [start, end], both in byte units (8 pixels per address).
pub const SET_RAM_X_RANGE: u8 = 0x44;

/// Set RAM Y address window (0x45)
///
/// Four bytes: [start_LSB, start_MSB, end_LSB, end_MSB]
pub const SET_RAM_Y_RANGE: u8 = 0x45;

/// Set RAM X address counter (0x4E)
///
/// One byte, in byte units.
pub const SET_RAM_X_COUNTER: u8 = 0x4E;

/// Set RAM Y address counter (0x4F)
///
/// Two bytes: [address_LSB, address_MSB]
pub const SET_RAM_Y_COUNTER: u8 = 0x4F;

/// Write to BW RAM (0x24)
///
/// Bit=0: Black, Bit=1: White
pub const WRITE_RAM_BW: u8 = 0x24;

// Parameter values

/// [`DISPLAY_UPDATE_CTRL1`] parameters: bypass RED RAM as 0, normal source output
pub const UPDATE_CTRL1_BW_ONLY: [u8; 2] = [0x40, 0x00];

/// [`BORDER_WAVEFORM`] parameter: border follows LUT1
pub const BORDER_WAVEFORM_FOLLOW_LUT: u8 = 0x05;

/// [`WRITE_TEMP`] parameter written in place of the sensed temperature
pub const TEMP_OVERRIDE: u8 = 0x5A;

/// [`DISPLAY_UPDATE_CTRL2`] value: enable clock, load temperature and LUT, disable clock
pub const UPDATE_CTRL2_LOAD_TEMP_LUT: u8 = 0x91;

/// [`DISPLAY_UPDATE_CTRL2`] value: full update (clock + analog on, load, display, off)
pub const UPDATE_CTRL2_FULL: u8 = 0xC7;

/// [`DATA_ENTRY_MODE`] value: X increment, Y increment, X counter advances first
pub const DATA_ENTRY_XINC_YINC: u8 = 0x03;
