#![cfg_attr(not(test), no_std)]

//! This crate provides blocking drivers for discrete LCD panels attached to a
//! display controller over a parallel MCU (8080) bus or a MIPI DSI command
//! link.
//!
//! Every panel is brought up by replaying a static [command
//! table](sequence::CommandTable): an ordered list of "send this command with
//! these parameters, then wait" steps taken from the panel datasheet. The
//! [`sequence::run`] interpreter replays a table over any
//! [`Transport`](transport::Transport), so a panel [`Model`](models::Model)
//! is mostly data.
//!
//! ## Supported panels
//!
//! | Model | Bus | Size | Id |
//! |---|---|---|---|
//! | [`ILI9340`](models::ILI9340) | 8-bit 8080 | 240×320 | `0x9340` |
//! | [`ST7796S`](models::ST7796S) | MIPI DSI, 1 lane | 320×480 | `0x7796` |
//!
//! ## Usage
//!
//! ```
//! use lcd_panels::{models::ILI9340, transport::{Generic8BitBus, ParallelTransport}, Builder};
//! # use embedded_hal::digital::{ErrorType, OutputPin};
//! # struct Pin;
//! # impl ErrorType for Pin { type Error = core::convert::Infallible; }
//! # impl OutputPin for Pin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct Delay;
//! # impl embedded_hal::delay::DelayNs for Delay { fn delay_ns(&mut self, _: u32) {} }
//! # let mut delay = Delay;
//! let bus = Generic8BitBus::new((Pin, Pin, Pin, Pin, Pin, Pin, Pin, Pin));
//! let transport = ParallelTransport::new(bus, Pin, Pin);
//!
//! let mut panel = Builder::new(ILI9340, transport)
//!     .reset_pin(Pin)
//!     .init(&mut delay)
//!     .unwrap();
//!
//! // before streaming a partial update
//! panel.invalidate_rect(10, 20, 100, 200).unwrap();
//!
//! // power transitions
//! panel.enter_sleep(true, &mut delay).unwrap();
//! panel.enter_sleep(false, &mut delay).unwrap();
//! ```
//!
//! All operations block the caller for the full duration of their delays and
//! never retry a failed bus transaction.

use embedded_graphics_core::geometry::{OriginDimensions, Size};
use embedded_hal::{delay::DelayNs, digital::OutputPin};
use log::{debug, warn};

pub mod transport;

pub mod options;
pub use options::{Orientation, UnrecognizedOrientation};

mod builder;
pub use builder::*;

pub mod dcs;
pub mod descriptor;
pub mod models;
pub mod registry;
pub mod sequence;

#[cfg(test)]
mod _mock;

use dcs::TransportExt;
use descriptor::PanelInfo;
use models::{Model, WakeStrategy};
use transport::Transport;

/// Panel driver structure.
///
/// Runtime handle of one panel: its transport, its operation set and the
/// mutable part of its descriptor.
pub struct Panel<T, MODEL, RST>
where
    T: Transport,
    MODEL: Model,
    RST: OutputPin,
{
    /// The bus transport.
    transport: T,
    /// The panel model instance.
    model: MODEL,
    /// The reset pin.
    rst: Option<RST>,
    /// Current orientation.
    orientation: Orientation,
    /// Sleep state.
    sleeping: bool,
}

impl<T, M, RST> Panel<T, M, RST>
where
    T: Transport,
    M: Model,
    RST: OutputPin,
{
    /// Returns the static panel description.
    pub fn info(&self) -> &'static PanelInfo {
        M::INFO
    }

    /// Resets the panel and replays its power-on sequence.
    ///
    /// Safe to call again after any failure. A non-default orientation is
    /// re-applied once the sequence completes.
    pub fn init(
        &mut self,
        delay: &mut impl DelayNs,
    ) -> Result<(), PanelError<T::Error, RST::Error>> {
        let info = M::INFO;
        debug!("{}: reset", info.name);

        if let Some(ref mut rst) = self.rst {
            rst.set_high().map_err(PanelError::ResetPin)?;
            delay.delay_ms(info.reset.high_ms);
            rst.set_low().map_err(PanelError::ResetPin)?;
            delay.delay_ms(info.reset.low_ms);
            rst.set_high().map_err(PanelError::ResetPin)?;
            delay.delay_ms(info.reset.settle_ms);
        } else {
            self.transport
                .enter_command_mode()
                .map_err(PanelError::Transport)?;
            self.transport
                .write_command(dcs::SoftReset)
                .map_err(PanelError::Transport)?;
            delay.delay_ms(info.reset.settle_ms);
        }

        self.model.init(&mut self.transport, delay)?;

        if self.orientation != info.default_orientation {
            M::set_orientation(&mut self.transport, self.orientation)
                .map_err(PanelError::Transport)?;
        }
        self.sleeping = false;
        Ok(())
    }

    /// Selects the frame memory window for the next pixel write.
    ///
    /// Coordinates are inclusive and panel native. They are not checked, see
    /// [`Self::invalidate_rect`] for the clamping variant.
    pub fn set_window(
        &mut self,
        left: u16,
        top: u16,
        right: u16,
        bottom: u16,
    ) -> Result<(), T::Error> {
        M::set_window(&mut self.transport, left, top, right, bottom)
    }

    /// Selects the whole panel for the next pixel write.
    pub fn invalidate(&mut self) -> Result<(), T::Error> {
        let info = M::INFO;
        self.set_window(0, 0, info.width - 1, info.height - 1)
    }

    /// Selects a window for the next pixel write, clamping every coordinate
    /// to the panel area.
    pub fn invalidate_rect(
        &mut self,
        left: u16,
        top: u16,
        right: u16,
        bottom: u16,
    ) -> Result<(), T::Error> {
        let info = M::INFO;
        self.set_window(
            clamp(left, info.width),
            clamp(top, info.height),
            clamp(right, info.width),
            clamp(bottom, info.height),
        )
    }

    /// Returns the current orientation.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Sets the panel orientation.
    pub fn set_orientation(&mut self, orientation: Orientation) -> Result<(), T::Error> {
        M::set_orientation(&mut self.transport, orientation)?;
        self.orientation = orientation;
        Ok(())
    }

    /// Sets the orientation from a raw orientation code.
    ///
    /// An unknown code is logged and replaced by [`Orientation::Normal`].
    pub fn set_orientation_raw(&mut self, raw: u16) -> Result<(), T::Error> {
        let orientation = Orientation::from_raw(raw).unwrap_or_else(|UnrecognizedOrientation(raw)| {
            warn!("{}: unknown orientation {}, using normal", M::INFO.name, raw);
            Orientation::Normal
        });
        self.set_orientation(orientation)
    }

    /// Returns `true` if the panel is currently in sleep mode.
    pub fn is_sleeping(&self) -> bool {
        self.sleeping
    }

    /// Puts the panel to sleep (`true`) or wakes it up (`false`).
    ///
    /// Requesting the current state is not filtered out; the sequence is sent
    /// again.
    pub fn enter_sleep(
        &mut self,
        sleep: bool,
        delay: &mut impl DelayNs,
    ) -> Result<(), PanelError<T::Error, RST::Error>> {
        debug!("{}: enter_sleep({})", M::INFO.name, sleep);

        if sleep {
            M::sleep_in(&mut self.transport, delay).map_err(PanelError::Transport)?;
            self.sleeping = true;
            return Ok(());
        }

        match M::WAKE {
            WakeStrategy::SleepOut => {
                M::sleep_out(&mut self.transport, delay).map_err(PanelError::Transport)?;
                self.sleeping = false;
                Ok(())
            }
            WakeStrategy::Reinitialize => self.init(delay),
        }
    }

    /// Returns the panel identifier.
    pub fn read_id(&self) -> u32 {
        self.model.read_id()
    }

    /// Releases the transport, model instance, and reset pin.
    pub fn release(self) -> (T, M, Option<RST>) {
        (self.transport, self.model, self.rst)
    }

    /// Returns the underlying transport for sending raw commands.
    ///
    /// Commands sent this way are not reflected in [`Self::orientation`] or
    /// [`Self::is_sleeping`].
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}

impl<T, M, RST> OriginDimensions for Panel<T, M, RST>
where
    T: Transport,
    M: Model,
    RST: OutputPin,
{
    fn size(&self) -> Size {
        M::INFO.size()
    }
}

/// Limits `value` to `0..dimension`.
fn clamp(value: u16, dimension: u16) -> u16 {
    if value >= dimension {
        dimension - 1
    } else {
        value
    }
}
