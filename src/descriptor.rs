//! Static panel descriptors.
//!
//! A [`PanelInfo`] is the registration record of a panel: identity,
//! dimensions, refresh rate, reset timing and the bus configuration the
//! display controller needs to talk to it. Descriptors are `'static` constants
//! owned by each [`Model`](crate::models::Model); the only runtime-mutable
//! attribute, the orientation, is kept on [`Panel`](crate::Panel).

use embedded_graphics_core::geometry::Size;

use crate::{options::Orientation, transport::BusKind};

/// Display controller slot a panel is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceSlot {
    /// Main display.
    Main,
    /// Secondary display.
    Sub,
}

/// Static description of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelInfo {
    /// Human readable name.
    pub name: &'static str,
    /// Panel identifier, as returned by [`Model::read_id`](crate::models::Model::read_id).
    pub id: u32,
    /// Controller slot.
    pub slot: DeviceSlot,
    /// Native width in pixels.
    pub width: u16,
    /// Native height in pixels.
    pub height: u16,
    /// Refresh rate in Hz.
    pub fps: u8,
    /// Orientation applied when no other is configured.
    pub default_orientation: Orientation,
    /// Hardware reset pulse.
    pub reset: ResetTiming,
    /// Whether the display controller should blank the frame memory after
    /// power-on. Informational; the driver never writes pixels.
    pub clear_on_init: bool,
    /// Bus configuration.
    pub bus: BusConfig,
}

impl PanelInfo {
    /// Native panel size.
    pub const fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }

    /// Returns `true` if a transport of `kind` can drive this panel.
    pub const fn supports(&self, kind: BusKind) -> bool {
        match self.bus {
            BusConfig::Mcu(ref mcu) => match kind {
                BusKind::Parallel8Bit => mcu.bus_width == 8,
                BusKind::Parallel16Bit => mcu.bus_width == 16,
                BusKind::MipiDsi => false,
            },
            BusConfig::Mipi(_) => matches!(kind, BusKind::MipiDsi),
        }
    }
}

/// Reset pin timing in milliseconds.
///
/// The pin is driven high for `high_ms`, low for `low_ms` and high again,
/// after which the panel needs `settle_ms` before accepting commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetTiming {
    pub high_ms: u32,
    pub low_ms: u32,
    pub settle_ms: u32,
}

impl ResetTiming {
    /// Timing used by panels that don't specify their own.
    pub const DEFAULT: Self = Self {
        high_ms: 20,
        low_ms: 20,
        settle_ms: 120,
    };
}

impl Default for ResetTiming {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Bus specific configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusConfig {
    /// Parallel MCU bus.
    Mcu(McuInfo),
    /// MIPI DSI link.
    Mipi(MipiInfo),
}

/// Parallel bus protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum McuBusMode {
    /// Intel 8080 (separate RD/WR strobes).
    I8080,
    /// Motorola 6800 (R/W line plus enable).
    M6800,
}

/// Parallel MCU bus configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct McuInfo {
    pub mode: McuBusMode,
    /// Data lines.
    pub bus_width: u8,
    /// Bits per pixel on the bus.
    pub bpp: u8,
    /// Timing for register access.
    pub register_timing: McuTiming,
    /// Timing for frame memory (GRAM) access.
    pub gram_timing: McuTiming,
}

/// Parallel bus cycle timing in nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct McuTiming {
    /// Read chip-select setup.
    pub rcss: u16,
    /// Read low pulse width.
    pub rlpw: u16,
    /// Read high pulse width.
    pub rhpw: u16,
    /// Write chip-select setup.
    pub wcss: u16,
    /// Write low pulse width.
    pub wlpw: u16,
    /// Write high pulse width.
    pub whpw: u16,
}

/// How pixels reach a MIPI panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MipiMode {
    Video,
    Command,
}

/// Signal polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Positive,
    Negative,
}

/// Polarities of the MIPI video and control signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MipiPolarity {
    pub h_sync: Polarity,
    pub v_sync: Polarity,
    pub data_enable: Polarity,
    pub tearing_effect: Polarity,
    pub color_mode: Polarity,
    pub shut_down: Polarity,
}

/// MIPI DSI link configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MipiInfo {
    pub mode: MipiMode,
    /// Width of the video bus in bits.
    pub video_bus_width: u8,
    /// Number of data lanes.
    pub lanes: u8,
    /// D-PHY frequency in kHz.
    pub phy_freq_khz: u32,
    pub polarity: MipiPolarity,
    pub timing: RgbTiming,
}

/// Sync and blanking widths in pixel clocks (horizontal) and lines (vertical).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbTiming {
    pub hfp: u16,
    pub hbp: u16,
    pub hsync: u16,
    pub vfp: u16,
    pub vbp: u16,
    pub vsync: u16,
}

impl RgbTiming {
    /// Total pixel clocks per line for `width` active pixels.
    pub const fn line_clocks(&self, width: u16) -> u32 {
        width as u32 + self.hfp as u32 + self.hbp as u32 + self.hsync as u32
    }

    /// Total lines per frame for `height` active lines.
    pub const fn frame_lines(&self, height: u16) -> u32 {
        height as u32 + self.vfp as u32 + self.vbp as u32 + self.vsync as u32
    }
}
