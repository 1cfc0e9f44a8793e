//! [super::Panel] builder module

use embedded_hal::{
    delay::DelayNs,
    digital::{self, OutputPin},
};

use crate::{models::Model, options::Orientation, transport::Transport, Panel};

/// Builder for [Panel] instances.
///
/// ```
/// use lcd_panels::{models::ST7796S, Builder, Orientation};
/// # use lcd_panels::transport::{DsiHost, DsiTransport};
/// # struct Host;
/// # impl DsiHost for Host {
/// #     type Error = ();
/// #     fn set_command_mode(&mut self) -> Result<(), ()> { Ok(()) }
/// #     fn set_eotp(&mut self, _: bool, _: bool) -> Result<(), ()> { Ok(()) }
/// #     fn dcs_write(&mut self, _: &[u8]) -> Result<(), ()> { Ok(()) }
/// #     fn generic_write(&mut self, _: &[u8]) -> Result<(), ()> { Ok(()) }
/// # }
/// # struct Delay;
/// # impl embedded_hal::delay::DelayNs for Delay { fn delay_ns(&mut self, _: u32) {} }
/// # let (host, mut delay) = (Host, Delay);
/// let panel = Builder::new(ST7796S, DsiTransport::new(host))
///     .orientation(Orientation::Rotate90)
///     .init(&mut delay)
///     .unwrap();
/// assert_eq!(panel.read_id(), 0x7796);
/// ```
pub struct Builder<T, MODEL, RST>
where
    T: Transport,
    MODEL: Model,
{
    transport: T,
    model: MODEL,
    rst: Option<RST>,
    orientation: Orientation,
}

impl<T, MODEL> Builder<T, MODEL, NoResetPin>
where
    T: Transport,
    MODEL: Model,
{
    #[must_use]
    pub fn new(model: MODEL, transport: T) -> Self {
        Self {
            transport,
            model,
            rst: None,
            orientation: MODEL::INFO.default_orientation,
        }
    }
}

impl<T, MODEL, RST> Builder<T, MODEL, RST>
where
    T: Transport,
    MODEL: Model,
    RST: OutputPin,
{
    #[must_use]
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    #[must_use]
    pub fn reset_pin<RST2: OutputPin>(self, rst: RST2) -> Builder<T, MODEL, RST2> {
        Builder {
            transport: self.transport,
            model: self.model,
            rst: Some(rst),
            orientation: self.orientation,
        }
    }

    /// Resets the panel and runs its power-on sequence.
    pub fn init(
        self,
        delay_source: &mut impl DelayNs,
    ) -> Result<Panel<T, MODEL, RST>, PanelError<T::Error, RST::Error>> {
        let mut panel = Panel {
            transport: self.transport,
            model: self.model,
            rst: self.rst,
            orientation: self.orientation,
            sleeping: true,
        };
        panel.init(delay_source)?;
        Ok(panel)
    }
}

/// Error returned by operations that reset or re-initialize the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelError<TransportError, PinError> {
    Transport(TransportError),
    ResetPin(PinError),
    InvalidConfiguration(ConfigurationError),
}

#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigurationError {
    UnsupportedInterface,
}

impl<TransportError, PinError> From<crate::models::ModelInitError<TransportError>>
    for PanelError<TransportError, PinError>
{
    fn from(value: crate::models::ModelInitError<TransportError>) -> Self {
        use crate::models::ModelInitError;
        match value {
            ModelInitError::Transport(e) => PanelError::Transport(e),
            ModelInitError::InvalidConfiguration(ce) => PanelError::InvalidConfiguration(ce),
        }
    }
}

pub enum NoResetPin {}
impl digital::OutputPin for NoResetPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
impl digital::ErrorType for NoResetPin {
    type Error = core::convert::Infallible;
}
