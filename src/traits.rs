//! Panel capability contract
//!
//! [`EpaperPanel`] is the set of operations application code needs from any
//! e-paper controller driver. [`Panel`] implements it for the SSD1681; another
//! controller family would add its own implementor.

use embedded_hal::delay::DelayNs;

use crate::display::Panel;
use crate::error::Error;
use crate::interface::DisplayInterface;

/// Operations every e-paper panel driver provides
pub trait EpaperPanel {
    /// Error type returned by panel operations
    type Error: core::fmt::Debug;

    /// Hardware reset followed by a busy wait
    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Self::Error>;

    /// Program the controller so it can accept bitmaps
    fn initialize<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Self::Error>;

    /// Write a source bitmap covering `[x_start, x_end) x [y_start, y_end)` to panel RAM
    ///
    /// Does not refresh.
    fn draw_bitmap<D: DelayNs>(
        &mut self,
        x_start: i32,
        y_start: i32,
        x_end: i32,
        y_end: i32,
        color_data: &[u8],
        delay: &mut D,
    ) -> Result<(), Self::Error>;

    /// Start a refresh that makes RAM contents visible
    fn refresh(&mut self) -> Result<(), Self::Error>;

    /// Turn the display on or off
    fn disp_on_off(&mut self, on: bool) -> Result<(), Self::Error>;
}

impl<I: DisplayInterface> EpaperPanel for Panel<'_, I> {
    type Error = Error<I>;

    fn reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Self::Error> {
        Panel::reset(self, delay)
    }

    fn initialize<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Self::Error> {
        Panel::initialize(self, delay)
    }

    fn draw_bitmap<D: DelayNs>(
        &mut self,
        x_start: i32,
        y_start: i32,
        x_end: i32,
        y_end: i32,
        color_data: &[u8],
        delay: &mut D,
    ) -> Result<(), Self::Error> {
        self.draw(x_start, y_start, x_end, y_end, color_data, delay)
    }

    fn refresh(&mut self) -> Result<(), Self::Error> {
        Panel::refresh(self)
    }

    fn disp_on_off(&mut self, on: bool) -> Result<(), Self::Error> {
        Panel::disp_on_off(self, on)
    }
}
