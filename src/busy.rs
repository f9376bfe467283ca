//! Busy line monitor
//!
//! The controller holds BUSY high while it resets, loads its LUT or drives a refresh.
//! [`wait_until_idle`] polls the line at a fixed interval for a bounded number of polls
//! and reports whether it cleared. Giving up is not an error: callers decide whether a
//! [`BusyStatus::TimedOut`] matters. The panel itself logs it and carries on.
//!
//! ## Example
//!
//! ```
//! use ssd1681::busy::{wait_until_idle, BusyStatus};
//! use ssd1681::{Interface, NoPin};
//! # use core::convert::Infallible;
//! # use embedded_hal::delay::DelayNs;
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
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! let mut interface = Interface::new(MockSpi, MockPin, None::<MockPin>, None::<NoPin<Infallible>>);
//! let status = wait_until_idle(&mut interface, &mut MockDelay, 10, 20);
//! assert!(matches!(status, Ok(BusyStatus::Idle)));
//! ```

use embedded_hal::delay::DelayNs;
use log::{debug, warn};

use crate::interface::DisplayInterface;

/// Default interval between busy line polls
pub const DEFAULT_BUSY_POLL_INTERVAL_MS: u32 = 10;

/// Default number of polls before a wait gives up (about 200 ms)
pub const DEFAULT_BUSY_MAX_POLLS: u32 = 20;

/// Outcome of a bounded busy wait
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BusyStatus {
    /// The busy line read inactive (or no busy line is wired)
    Idle,
    /// The poll bound ran out with the line still active
    TimedOut,
}

impl BusyStatus {
    /// Whether the controller was seen idle
    pub fn is_idle(self) -> bool {
        self == Self::Idle
    }
}

/// Poll the busy line until it clears or `max_polls` delays have elapsed
///
/// The line is read before the first delay, so an idle controller costs one read
/// and no waiting. Without a busy line the controller is assumed idle.
///
/// # Errors
///
/// Only a failed pin read is an error. Running out of polls returns
/// `Ok(BusyStatus::TimedOut)`.
pub fn wait_until_idle<I, D>(
    interface: &mut I,
    delay: &mut D,
    poll_interval_ms: u32,
    max_polls: u32,
) -> Result<BusyStatus, I::Error>
where
    I: DisplayInterface,
    D: DelayNs,
{
    let mut polls = 0u32;

    loop {
        match interface.is_busy()? {
            None | Some(false) => {
                debug!("busy line clear after {polls} polls");
                return Ok(BusyStatus::Idle);
            }
            Some(true) => {}
        }

        delay.delay_ms(poll_interval_ms);
        polls += 1;
        if polls >= max_polls {
            warn!("busy line still active after {polls} polls, continuing");
            return Ok(BusyStatus::TimedOut);
        }
    }
}
