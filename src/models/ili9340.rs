use embedded_hal::delay::DelayNs;
use log::debug;

use crate::{
    descriptor::{BusConfig, DeviceSlot, McuBusMode, McuInfo, McuTiming, PanelInfo, ResetTiming},
    models::{check_transport, Model, ModelInitError, WakeStrategy},
    options::Orientation,
    sequence::{self, CommandTable, Step},
    transport::Transport,
};

/// ILI9340 (NV3029G-01 compatible) on an 8-bit 8080 bus, 16 bpp.
pub struct ILI9340;

const INFO: PanelInfo = PanelInfo {
    name: "lcd_ili9340",
    id: 0x9340,
    slot: DeviceSlot::Main,
    width: 240,
    height: 320,
    fps: 60,
    default_orientation: Orientation::Normal,
    reset: ResetTiming::DEFAULT,
    clear_on_init: false,
    bus: BusConfig::Mcu(McuInfo {
        mode: McuBusMode::I8080,
        bus_width: 8,
        bpp: 16,
        register_timing: McuTiming {
            rcss: 45,
            rlpw: 60,
            rhpw: 100,
            wcss: 30,
            wlpw: 45,
            whpw: 45,
        },
        gram_timing: McuTiming {
            rcss: 25,
            rlpw: 70,
            rhpw: 70,
            wcss: 30,
            wlpw: 45,
            whpw: 45,
        },
    }),
};

/// Power-on sequence.
pub static ILI9340_INIT: CommandTable = CommandTable::new(&[
    Step::send(0xBC, &[0x00, 0x18, 0x00, 0x10, 0x0B]),
    Step::send(0xD6, &[0x01]),
    Step::send(0xB7, &[0xFF, 0x44, 0x04, 0x44, 0x04, 0x02, 0x04]),
    Step::send(0xBB, &[0x03, 0x66, 0x33]),
    Step::send(0xCD, &[0x26, 0x26, 0x00]),
    Step::send(0xEA, &[0x01, 0x22, 0x3F, 0x82, 0x04, 0x00, 0x00]),
    Step::send(0xB4, &[0x80]),
    Step::send(0xBA, &[0x13, 0x1A, 0x21]),
    Step::send(0xE8, &[0x11, 0x11, 0x33, 0x33, 0x55]),
    Step::send(
        0xE9,
        &[0x40, 0x84, 0x65, 0x70, 0xC0, 0x00, 0xFF, 0x33, 0x88],
    ),
    Step::send(0xF5, &[0x00]),
    Step::send(0xF2, &[0x00, 0x00]),
    // positive gamma
    Step::send(
        0xE4,
        &[
            0x00, 0x02, 0x09, 0x06, 0x15, 0x19, 0x3F, 0x57, 0x4E, 0x05, 0x0E, 0x0C, 0x21, 0x23,
            0x0D,
        ],
    ),
    // negative gamma
    Step::send(
        0xE5,
        &[
            0x00, 0x02, 0x08, 0x07, 0x14, 0x19, 0x3E, 0x47, 0x4F, 0x05, 0x0D, 0x0A, 0x20, 0x23,
            0x0D,
        ],
    ),
    Step::send(0x35, &[0x00]), // tearing effect on, V-blank only
    Step::send(0x44, &[0x00, 0x8F]), // tear scanline
    Step::send(0x3A, &[0x55]), // 16 bpp
    Step::send_then_wait(0x11, &[], 120), // sleep out
    Step::send_then_wait(0x29, &[], 20), // display on
    Step::send(0x2C, &[]),
]);

/// Display off, then sleep in.
pub static ILI9340_SLEEP_IN: CommandTable = CommandTable::new(&[
    Step::send_then_wait(0x28, &[], 120),
    Step::send_then_wait(0x10, &[], 200),
]);

impl Model for ILI9340 {
    const INFO: &'static PanelInfo = &INFO;
    const WAKE: WakeStrategy = WakeStrategy::Reinitialize;

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
        sequence::run(&ILI9340_INIT, transport, delay)?;
        Ok(())
    }

    fn address_mode(orientation: Orientation) -> u16 {
        match orientation {
            Orientation::Normal => 0x09,
            Orientation::Rotate90 => 0xE8,
            Orientation::Rotate180 | Orientation::MirrorHV => 0x08,
            Orientation::Rotate270 => 0x28,
            Orientation::MirrorH => 0x88,
            Orientation::MirrorV => 0x48,
        }
    }

    fn sleep_in<T, DELAY>(transport: &mut T, delay: &mut DELAY) -> Result<(), T::Error>
    where
        T: Transport,
        DELAY: DelayNs,
    {
        sequence::run(&ILI9340_SLEEP_IN, transport, delay)
    }
}
