use embedded_hal::delay::DelayNs;
use log::debug;

use crate::{
    descriptor::{
        BusConfig, DeviceSlot, MipiInfo, MipiMode, MipiPolarity, PanelInfo, Polarity,
        ResetTiming, RgbTiming,
    },
    models::{check_transport, Model, ModelInitError},
    options::Orientation,
    sequence::{self, CommandTable, Step},
    transport::Transport,
};

/// ST7796S on a single lane MIPI DSI link, 24-bit video.
///
/// Pixels are streamed in video mode; the command tables run in command mode
/// with the end-of-transmission packet disabled.
pub struct ST7796S;

const INFO: PanelInfo = PanelInfo {
    name: "lcd_st7796s_mipi",
    id: 0x7796,
    slot: DeviceSlot::Main,
    width: 320,
    height: 480,
    fps: 60,
    default_orientation: Orientation::Normal,
    reset: ResetTiming {
        high_ms: 5,
        low_ms: 40,
        settle_ms: 20,
    },
    clear_on_init: true,
    bus: BusConfig::Mipi(MipiInfo {
        mode: MipiMode::Video,
        video_bus_width: 24,
        lanes: 1,
        phy_freq_khz: 370_000,
        polarity: MipiPolarity {
            h_sync: Polarity::Positive,
            v_sync: Polarity::Positive,
            data_enable: Polarity::Positive,
            tearing_effect: Polarity::Positive,
            color_mode: Polarity::Negative,
            shut_down: Polarity::Negative,
        },
        timing: RgbTiming {
            hfp: 45,
            hbp: 45,
            hsync: 9,
            vfp: 20,
            vbp: 20,
            vsync: 10,
        },
    }),
};

/// Power-on sequence. Each packet is followed by 20 µs of settle time.
pub static ST7796S_INIT: CommandTable = CommandTable::new(&[
    Step::send(0x03, &[0x00]),
    Step::send(0x11, &[]),
    Step::sleep(120),
    // unlock command set 2
    Step::send(0xF0, &[0xC3]),
    Step::send(0xF0, &[0x96]),
    Step::send(0xEC, &[0x00, 0x00, 0x01]),
    Step::send(0xB4, &[0x00]),
    Step::send(0xB7, &[0xC6]),
    Step::send(0xB1, &[0xB0, 0x10]),
    Step::send(0xB9, &[0x02]),
    Step::send(0xE8, &[0x40, 0x8A, 0x00, 0x00, 0x29, 0x19, 0xA5, 0x33]),
    Step::send(0xC0, &[0x80, 0x20]),
    Step::send(0xC1, &[0x12]),
    Step::send(0xC2, &[0xA7]),
    Step::send(0xC5, &[0x1D]),
    Step::send(
        0xE0,
        &[
            0xF0, 0x09, 0x0B, 0x06, 0x04, 0x15, 0x2F, 0x54, 0x42, 0x3C, 0x17, 0x14, 0x18, 0x1B,
        ],
    ),
    Step::send(
        0xE1,
        &[
            0xF0, 0x09, 0x0B, 0x06, 0x04, 0x03, 0x2D, 0x43, 0x42, 0x3B, 0x16, 0x14, 0x17, 0x1B,
        ],
    ),
    // lock command set 2
    Step::send(0xF0, &[0x3C]),
    Step::send(0xF0, &[0x69]),
    Step::send(0x36, &[0x48]),
    Step::send(0x3A, &[0x77]),
    Step::send(0x29, &[]),
    Step::sleep(120),
])
.with_settle_us(20);

/// Display off, then sleep in.
pub static ST7796S_SLEEP_IN: CommandTable = CommandTable::new(&[
    Step::send(0x28, &[]),
    Step::sleep(50),
    Step::send(0x10, &[]),
    Step::sleep(120),
]);

/// Sleep out, then display on.
pub static ST7796S_SLEEP_OUT: CommandTable = CommandTable::new(&[
    Step::send(0x11, &[]),
    Step::sleep(120),
    Step::send(0x29, &[]),
    Step::sleep(50),
]);

/// Replays `table` framed by command mode entry and EoTp off. The marker is
/// switched back on afterwards only if `restore_eot` is set.
fn run_in_command_mode<T, DELAY>(
    table: &CommandTable,
    transport: &mut T,
    delay: &mut DELAY,
    restore_eot: bool,
) -> Result<(), T::Error>
where
    T: Transport,
    DELAY: DelayNs,
{
    transport.enter_command_mode()?;
    transport.set_end_of_transmission_marker(false)?;
    sequence::run(table, transport, delay)?;
    transport.set_end_of_transmission_marker(restore_eot)
}

impl Model for ST7796S {
    const INFO: &'static PanelInfo = &INFO;

    fn init<DELAY, T>(
        &mut self,
        transport: &mut T,
        delay: &mut DELAY,
    ) -> Result<(), ModelInitError<T::Error>>
    where
        DELAY: DelayNs,
        T: Transport,
    {
        check_transport::<Self, T>()?;

        debug!("{}: init", INFO.name);
        run_in_command_mode(&ST7796S_INIT, transport, delay, true)?;
        Ok(())
    }

    fn sleep_in<T, DELAY>(transport: &mut T, delay: &mut DELAY) -> Result<(), T::Error>
    where
        T: Transport,
        DELAY: DelayNs,
    {
        run_in_command_mode(&ST7796S_SLEEP_IN, transport, delay, false)
    }

    fn sleep_out<T, DELAY>(transport: &mut T, delay: &mut DELAY) -> Result<(), T::Error>
    where
        T: Transport,
        DELAY: DelayNs,
    {
        run_in_command_mode(&ST7796S_SLEEP_OUT, transport, delay, false)
    }
}

#[cfg(test)]
mod tests {

    use crate::{
        _mock::{self, DsiEvent, Event, MockDelay, MockDsiHost},
        transport::DsiTransport,
        ConfigurationError,
    };

    use super::*;

    #[test]
    fn power_on_is_framed_by_mode_hooks() {
        let (mut di, mut delay, log) = _mock::recorder();
        // the recording transport reports an 8-bit bus
        assert_eq!(
            ST7796S.init(&mut di, &mut delay),
            Err(ModelInitError::InvalidConfiguration(
                ConfigurationError::UnsupportedInterface
            ))
        );
        assert!(log.events().is_empty());

        let mut dsi = DsiTransport::new(MockDsiHost::new());
        let mut delay = MockDelay::new(log.clone());
        ST7796S.init(&mut dsi, &mut delay).unwrap();

        let events = dsi.release().events();
        assert_eq!(events.len(), ST7796S_INIT.len() - 2 + 3);
        assert_eq!(events[0], DsiEvent::CommandMode);
        assert_eq!(events[1], DsiEvent::Eotp { rx: true, tx: false });
        assert_eq!(events[2], DsiEvent::Dcs(vec![0x03, 0x00]));
        assert_eq!(events[6], DsiEvent::Dcs(vec![0xEC, 0x00, 0x00, 0x01]));
        assert_eq!(
            events[events.len() - 1],
            DsiEvent::Eotp { rx: true, tx: true }
        );
    }

    #[test]
    fn power_on_settles_after_every_packet() {
        let log = _mock::Log::default();
        let mut dsi = DsiTransport::new(MockDsiHost::new());
        let mut delay = MockDelay::new(log.clone());
        ST7796S.init(&mut dsi, &mut delay).unwrap();

        let settles = log
            .events()
            .into_iter()
            .filter(|e| *e == Event::DelayUs(20))
            .count();
        assert_eq!(settles, ST7796S_INIT.len() - 2);
        assert_eq!(log.total_delay_ms(), 240);
    }

    #[test]
    fn sleep_tables_leave_eot_disabled() {
        let (mut di, mut delay, log) = _mock::recorder();
        ST7796S::sleep_in(&mut di, &mut delay).unwrap();

        assert_eq!(
            log.events(),
            vec![
                Event::CommandMode,
                Event::EndOfTransmission(false),
                Event::Command(0x28),
                Event::DelayMs(50),
                Event::Command(0x10),
                Event::DelayMs(120),
                Event::EndOfTransmission(false),
            ]
        );

        log.clear();
        ST7796S::sleep_out(&mut di, &mut delay).unwrap();
        assert_eq!(log.transcript(), _mock::transcript(&ST7796S_SLEEP_OUT));
    }

    #[test]
    fn sleep_out_over_dsi_sends_short_packets() {
        let mut dsi = DsiTransport::new(MockDsiHost::new());
        let mut delay = MockDelay::new(_mock::Log::default());
        ST7796S::sleep_out(&mut dsi, &mut delay).unwrap();

        assert_eq!(dsi.release().dcs_commands(), vec![0x11, 0x29]);
    }

    #[test]
    fn normal_orientation_matches_power_on_value() {
        assert_eq!(ST7796S::address_mode(Orientation::Normal), 0x48);
    }
}
