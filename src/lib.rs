//! SSD1681 E-Paper Display Driver
//!
//! A driver for SSD1681-family black/white e-paper controllers (up to 400x300 pixels).
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - `embedded-graphics` canvas (with `graphics` feature)
//! - Driver-owned framebuffer (with `alloc` feature) or caller-owned non-copy mode
//! - Bounded busy waits that never hang on a stuck BUSY line
//! - Optional refresh-done callback driven by a busy line interrupt
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::{InputPin, OutputPin};
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use ssd1681::{Builder, Dimensions, Interface, Panel};
//!
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
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let spi = MockSpi;
//! # let dc = MockPin;
//! # let rst = MockPin;
//! # let busy = MockPin;
//! # let mut delay = MockDelay;
//! let interface = Interface::new(spi, dc, Some(rst), Some(busy));
//! let dims = match Dimensions::new(300, 400) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let config = match Builder::new().dimensions(dims).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut panel = match Panel::new(interface, config) {
//!     Ok(panel) => panel,
//!     Err(_) => return,
//! };
//! let _ = panel.reset(&mut delay);
//! let _ = panel.initialize(&mut delay);
//!
//! // 8-byte header, then 400x300 pixels with a set bit meaning black
//! let mut image = vec![0u8; 8 + 15_000];
//! image[8..8 + 50].fill(0xFF);
//! let _ = panel.draw(0, 0, 400, 300, &image, &mut delay);
//! let _ = panel.refresh();
//! ```

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

/// Busy line monitor
pub mod busy;
/// Color types for black/white e-paper panels
pub mod color;
/// SSD1681 command definitions
pub mod command;
/// Panel configuration types and builder
pub mod config;
/// Panel state machine
pub mod display;
/// Error types for the driver
pub mod error;
/// Owned or borrowed VRAM staging buffer
pub mod framebuffer;
/// Hardware interface abstraction
pub mod interface;
/// Source bitmap to BW RAM conversion
pub mod packer;
/// Panel capability contract
pub mod traits;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use busy::BusyStatus;
pub use color::{BitmapColor, Color};
pub use config::{Builder, Config, Dimensions, MAX_GATE_OUTPUTS, MAX_SOURCE_OUTPUTS};
pub use display::{Lifecycle, Orientation, Panel, RefreshDoneCallback, RefreshDoneEvent};
pub use error::{BuilderError, Error};
pub use framebuffer::Framebuffer;
pub use interface::{DisplayInterface, Interface, InterfaceError, NoPin};
pub use traits::EpaperPanel;

#[cfg(feature = "graphics")]
pub use graphics::Canvas;
