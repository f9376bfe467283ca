//! Hardware interface abstraction
//!
//! This module provides the [`DisplayInterface`] trait and the [`Interface`] struct
//! for talking to the controller over SPI.
//!
//! ## Hardware Requirements
//!
//! - SPI bus (MOSI + SCK, CS handled by the [`SpiDevice`])
//! - **DC**: Data/Command select (output)
//! - **RST**: Reset (output, optional)
//! - **BUSY**: Busy status (input, active high, optional)
//!
//! A pin that is not wired is passed as `None`. [`NoPin`] can name the pin type in that case.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ssd1681::{DisplayInterface, Interface};
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
//! let mut interface = Interface::new(MockSpi, MockPin, Some(MockPin), Some(MockPin));
//!
//! // Soft reset
//! let _ = interface.send_command(0x12);
//!
//! // Command with parameters
//! let _ = interface.send_command_with_params(0x3C, &[0x05]);
//!
//! // Is the controller still working?
//! let _ = interface.is_busy();
//! ```

use core::fmt::Debug;
use core::marker::PhantomData;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use embedded_hal::spi::SpiDevice;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// Reset line held inactive before the pulse
pub const RESET_SETUP_MS: u32 = 100;
/// Reset pulse width
pub const RESET_PULSE_MS: u32 = 10;
/// Recovery time after releasing reset
pub const RESET_RECOVERY_MS: u32 = 10;

/// Trait for the transport and GPIO boundary of the controller
///
/// This trait abstracts over different hardware implementations, allowing the
/// [`Panel`](crate::display::Panel) to work with any SPI + GPIO implementation.
/// Errors are handed to the caller unchanged; implementations must not retry.
///
/// ## Implementing
///
/// For most cases, use the provided [`Interface`] struct. If the platform can raise an
/// interrupt on the busy line's falling edge, override [`set_busy_interrupt`](Self::set_busy_interrupt)
/// and call [`Panel::on_busy_released`](crate::Panel::on_busy_released) from the handler.
pub trait DisplayInterface {
    /// Error type for interface operations
    type Error: Debug;

    /// Send a command byte to the controller (DC low)
    #[allow(clippy::type_complexity)]
    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error>;

    /// Send data bytes to the controller (DC high)
    #[allow(clippy::type_complexity)]
    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Send a command followed by its parameter bytes
    ///
    /// No data phase is sent when `params` is empty.
    fn send_command_with_params(
        &mut self,
        command: u8,
        params: &[u8],
    ) -> InterfaceResult<(), Self::Error> {
        self.send_command(command)?;
        if !params.is_empty() {
            self.send_data(params)?;
        }
        Ok(())
    }

    /// Bulk write of pixel data to controller RAM
    ///
    /// Framed like [`send_command_with_params`](Self::send_command_with_params); kept
    /// separate so adapters can route large transfers through DMA.
    fn send_color(&mut self, command: u8, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.send_command_with_params(command, data)
    }

    /// Pulse the reset line, if one is wired
    ///
    /// Drives the line inactive, active, inactive with [`RESET_SETUP_MS`],
    /// [`RESET_PULSE_MS`] and [`RESET_RECOVERY_MS`] holds. Returns `false` without
    /// touching any pin when no reset line is configured.
    fn reset<D: DelayNs>(
        &mut self,
        delay: &mut D,
        active_high: bool,
    ) -> InterfaceResult<bool, Self::Error>;

    /// Read the busy line
    ///
    /// Returns `None` when no busy line is configured.
    fn is_busy(&mut self) -> InterfaceResult<Option<bool>, Self::Error>;

    /// Enable or disable the busy line interrupt
    ///
    /// The default implementation does nothing.
    fn set_busy_interrupt(&mut self, _enabled: bool) -> InterfaceResult<(), Self::Error> {
        Ok(())
    }
}

/// Errors that can occur at the interface level
///
/// Generic over SPI and GPIO error types.
#[derive(Debug, PartialEq)]
pub enum InterfaceError<SpiErr, PinErr> {
    /// SPI communication error
    Spi(SpiErr),
    /// GPIO pin error
    Pin(PinErr),
}

impl<SpiErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<SpiErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(e) => write!(f, "SPI error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<SpiErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<SpiErr, PinErr> {}

/// Placeholder pin type for a line that is not wired
///
/// Reads as idle and ignores writes. Its error type matches the other pins so
/// it fits [`Interface`]'s single pin error type.
pub struct NoPin<E>(PhantomData<E>);

impl<E> NoPin<E> {
    /// Create a placeholder pin
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<E> Default for NoPin<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: embedded_hal::digital::Error> ErrorType for NoPin<E> {
    type Error = E;
}

impl<E: embedded_hal::digital::Error> OutputPin for NoPin<E> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<E: embedded_hal::digital::Error> InputPin for NoPin<E> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(false)
    }
    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(true)
    }
}

/// Hardware interface implementation
///
/// Implements [`DisplayInterface`] for embedded-hal v1.0 SPI and GPIO traits.
///
/// ## Type Parameters
///
/// * `SPI` - SPI device implementing [`SpiDevice`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
/// * `RST` - Reset pin implementing [`OutputPin`]
/// * `BUSY` - Busy pin implementing [`InputPin`]
pub struct Interface<SPI, DC, RST, BUSY> {
    /// SPI device for communication
    spi: SPI,
    /// Data/Command select pin (low=command, high=data)
    dc: DC,
    /// Reset pin, if wired
    rst: Option<RST>,
    /// Busy pin, if wired
    busy: Option<BUSY>,
    /// Busy pin polarity (true = active high, false = active low)
    busy_active_high: bool,
}

impl<SPI, DC, RST, BUSY> Interface<SPI, DC, RST, BUSY>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
{
    /// Create a new Interface
    ///
    /// # Arguments
    ///
    /// * `spi` - SPI device (must implement [`SpiDevice`])
    /// * `dc` - Data/Command pin (output, low=command, high=data)
    /// * `rst` - Reset pin, or `None` when not wired
    /// * `busy` - Busy pin, or `None` when not wired
    pub fn new(spi: SPI, dc: DC, rst: Option<RST>, busy: Option<BUSY>) -> Self {
        Self {
            spi,
            dc,
            rst,
            busy,
            busy_active_high: true,
        }
    }

    /// Set busy pin polarity
    ///
    /// Default is active-high. Set to false for active-low panels.
    pub fn set_busy_active_high(&mut self, active_high: bool) -> &mut Self {
        self.busy_active_high = active_high;
        self
    }

    /// Get busy pin polarity (true = active high)
    pub fn busy_active_high(&self) -> bool {
        self.busy_active_high
    }

    /// Hand the bus and pins back to the caller
    pub fn release(self) -> (SPI, DC, Option<RST>, Option<BUSY>) {
        (self.spi, self.dc, self.rst, self.busy)
    }
}

impl<SPI, DC, RST, BUSY, PinErr> DisplayInterface for Interface<SPI, DC, RST, BUSY>
where
    SPI: SpiDevice,
    SPI::Error: Debug,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    BUSY: InputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<SPI::Error, PinErr>;

    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error> {
        self.dc.set_low().map_err(InterfaceError::Pin)?;
        self.spi.write(&[command]).map_err(InterfaceError::Spi)?;
        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        self.dc.set_high().map_err(InterfaceError::Pin)?;
        self.spi.write(data).map_err(InterfaceError::Spi)?;
        Ok(())
    }

    fn reset<D: DelayNs>(
        &mut self,
        delay: &mut D,
        active_high: bool,
    ) -> InterfaceResult<bool, Self::Error> {
        let Some(rst) = self.rst.as_mut() else {
            return Ok(false);
        };

        let mut drive = |active: bool| {
            if active == active_high {
                rst.set_high()
            } else {
                rst.set_low()
            }
        };

        drive(false).map_err(InterfaceError::Pin)?;
        delay.delay_ms(RESET_SETUP_MS);
        drive(true).map_err(InterfaceError::Pin)?;
        delay.delay_ms(RESET_PULSE_MS);
        drive(false).map_err(InterfaceError::Pin)?;
        delay.delay_ms(RESET_RECOVERY_MS);
        Ok(true)
    }

    fn is_busy(&mut self) -> InterfaceResult<Option<bool>, Self::Error> {
        let Some(busy) = self.busy.as_mut() else {
            return Ok(None);
        };
        let level = if self.busy_active_high {
            busy.is_high()
        } else {
            busy.is_low()
        };
        level.map(Some).map_err(InterfaceError::Pin)
    }
}
