//! Panel models.

use crate::{
    dcs::{self, TransportExt},
    descriptor::PanelInfo,
    options::Orientation,
    sequence::{self, CommandTable, Step},
    transport::Transport,
    ConfigurationError,
};
use embedded_hal::delay::DelayNs;

mod ili9340;
mod st7796s;

pub use ili9340::*;
pub use st7796s::*;

/// How a panel leaves sleep mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WakeStrategy {
    /// Run [`Model::sleep_out`].
    SleepOut,
    /// Hardware reset followed by the full power-on sequence.
    Reinitialize,
}

/// Display model.
///
/// The operation set of one panel type. Each method is a straight sequence of
/// bus transactions; none of them retries on failure.
pub trait Model {
    /// Static panel description.
    const INFO: &'static PanelInfo;

    /// How [`Panel::enter_sleep`](crate::Panel::enter_sleep) wakes the panel.
    const WAKE: WakeStrategy = WakeStrategy::SleepOut;

    /// Runs the power-on sequence. The panel has already been reset.
    fn init<DELAY, T>(
        &mut self,
        transport: &mut T,
        delay: &mut DELAY,
    ) -> Result<(), ModelInitError<T::Error>>
    where
        DELAY: DelayNs,
        T: Transport;

    /// Panel identifier.
    fn read_id(&self) -> u32 {
        Self::INFO.id
    }

    /// Address mode (MADCTL) register value for `orientation`.
    fn address_mode(orientation: Orientation) -> u16 {
        u16::from(dcs::SetAddressMode::for_orientation(orientation).bits())
    }

    /// Writes the address mode register for `orientation`.
    fn set_orientation<T>(transport: &mut T, orientation: Orientation) -> Result<(), T::Error>
    where
        T: Transport,
    {
        transport.send_command_with_data(0x36, Self::address_mode(orientation))
    }

    /// Selects the frame memory window for the next pixel write and starts
    /// the write.
    ///
    /// Coordinates are inclusive, panel native and not checked.
    fn set_window<T>(
        transport: &mut T,
        left: u16,
        top: u16,
        right: u16,
        bottom: u16,
    ) -> Result<(), T::Error>
    where
        T: Transport,
    {
        transport.write_command(dcs::SetColumnAddress::new(left, right))?;
        transport.write_command(dcs::SetPageAddress::new(top, bottom))?;
        transport.write_command(dcs::WriteMemoryStart)
    }

    ///
    /// Need to call [Self::sleep_out] or re-initialize before issuing other commands
    ///
    fn sleep_in<T, DELAY>(transport: &mut T, delay: &mut DELAY) -> Result<(), T::Error>
    where
        T: Transport,
        DELAY: DelayNs,
    {
        sequence::run(&DCS_SLEEP_IN, transport, delay)
    }

    ///
    /// Wakes the display after it's been set to sleep via [Self::sleep_in]
    ///
    fn sleep_out<T, DELAY>(transport: &mut T, delay: &mut DELAY) -> Result<(), T::Error>
    where
        T: Transport,
        DELAY: DelayNs,
    {
        sequence::run(&DCS_SLEEP_OUT, transport, delay)
    }
}

// Both supported controllers need 120 ms after a sleep command before
// accepting the next one.
static DCS_SLEEP_IN: CommandTable = CommandTable::new(&[Step::send_then_wait(0x10, &[], 120)]);
static DCS_SLEEP_OUT: CommandTable = CommandTable::new(&[Step::send_then_wait(0x11, &[], 120)]);

/// Rejects transports the panel can't be driven over.
pub(crate) fn check_transport<M: Model, T: Transport>() -> Result<(), ModelInitError<T::Error>> {
    if M::INFO.supports(T::KIND) {
        Ok(())
    } else {
        Err(ModelInitError::InvalidConfiguration(
            ConfigurationError::UnsupportedInterface,
        ))
    }
}

/// Error returned by [`Model::init`].
///
/// This error type is used internally by implementations of the [`Model`]
/// trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelInitError<E> {
    /// Error caused by the transport.
    Transport(E),

    /// Invalid configuration error.
    ///
    /// Returned when the panel can't be driven over the given transport.
    InvalidConfiguration(ConfigurationError),
}

impl<E> From<E> for ModelInitError<E> {
    fn from(value: E) -> Self {
        Self::Transport(value)
    }
}

#[cfg(test)]
mod tests {

    use crate::{
        _mock::{self, Event},
        descriptor::{BusConfig, DeviceSlot, MipiInfo, MipiMode, MipiPolarity, Polarity, ResetTiming, RgbTiming},
    };

    use super::*;

    const POSITIVE: MipiPolarity = MipiPolarity {
        h_sync: Polarity::Positive,
        v_sync: Polarity::Positive,
        data_enable: Polarity::Positive,
        tearing_effect: Polarity::Positive,
        color_mode: Polarity::Positive,
        shut_down: Polarity::Positive,
    };

    const DSI_ONLY_INFO: PanelInfo = PanelInfo {
        name: "dsi_only",
        id: 0x1234,
        slot: DeviceSlot::Sub,
        width: 16,
        height: 16,
        fps: 60,
        default_orientation: Orientation::Normal,
        reset: ResetTiming::DEFAULT,
        clear_on_init: false,
        bus: BusConfig::Mipi(MipiInfo {
            mode: MipiMode::Command,
            video_bus_width: 16,
            lanes: 1,
            phy_freq_khz: 200_000,
            polarity: POSITIVE,
            timing: RgbTiming {
                hfp: 1,
                hbp: 1,
                hsync: 1,
                vfp: 1,
                vbp: 1,
                vsync: 1,
            },
        }),
    };

    /// Model relying on every default of the trait.
    struct DsiOnly;

    impl Model for DsiOnly {
        const INFO: &'static PanelInfo = &DSI_ONLY_INFO;

        fn init<DELAY, T>(
            &mut self,
            _transport: &mut T,
            _delay: &mut DELAY,
        ) -> Result<(), ModelInitError<T::Error>>
        where
            DELAY: DelayNs,
            T: Transport,
        {
            check_transport::<Self, T>()
        }
    }

    #[test]
    fn init_rejects_foreign_transport() {
        let (mut di, mut delay, log) = _mock::recorder();
        assert_eq!(
            DsiOnly.init(&mut di, &mut delay),
            Err(ModelInitError::InvalidConfiguration(
                ConfigurationError::UnsupportedInterface
            ))
        );
        assert!(log.events().is_empty());
    }

    #[test]
    fn read_id_defaults_to_descriptor_id() {
        assert_eq!(DsiOnly.read_id(), 0x1234);
    }

    #[test]
    fn default_sleep_waits_after_each_command() {
        let (mut di, mut delay, log) = _mock::recorder();
        DsiOnly::sleep_in(&mut di, &mut delay).unwrap();
        DsiOnly::sleep_out(&mut di, &mut delay).unwrap();

        assert_eq!(
            log.events(),
            vec![
                Event::Command(0x10),
                Event::DelayMs(120),
                Event::Command(0x11),
                Event::DelayMs(120),
            ]
        );
    }

    #[test]
    fn default_orientation_uses_standard_mapping() {
        let (mut di, _, log) = _mock::recorder();
        DsiOnly::set_orientation(&mut di, Orientation::Rotate90).unwrap();

        assert_eq!(log.events(), vec![Event::Command(0x36), Event::Data(0x28)]);
    }
}
