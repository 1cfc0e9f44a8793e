//! MIPI Display Command Set commands shared by the panel models.

use crate::{options::Orientation, transport::Transport};

/// Parameters carried by a DCS command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Params {
    /// Command only.
    None,
    /// Single register value, one data cycle.
    Register(u16),
    /// Pair of 16-bit values, e.g. a start/end address.
    Range(u16, u16),
}

/// A DCS command.
pub trait DcsCommand {
    /// Command code.
    fn instruction(&self) -> u16;

    /// Command parameters.
    fn params(&self) -> Params {
        Params::None
    }
}

/// Sends typed DCS commands over a [`Transport`].
pub trait TransportExt: Transport {
    fn write_command(&mut self, command: impl DcsCommand) -> Result<(), Self::Error> {
        let instruction = command.instruction();
        match command.params() {
            Params::None => self.send_command(instruction),
            Params::Register(value) => self.send_command_with_data(instruction, value),
            Params::Range(start, end) => self.send_command_with_range(instruction, start, end),
        }
    }
}

impl<T: Transport + ?Sized> TransportExt for T {}

macro_rules! dcs_basic_command {
    ($(#[$meta:meta])* $name:ident, $instruction:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name;

        impl DcsCommand for $name {
            fn instruction(&self) -> u16 {
                $instruction
            }
        }
    };
}

dcs_basic_command!(
    /// Software reset.
    SoftReset,
    0x01
);
dcs_basic_command!(
    /// Start a frame memory write at the window origin.
    WriteMemoryStart,
    0x2C
);

/// Column address range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetColumnAddress {
    start: u16,
    end: u16,
}

impl SetColumnAddress {
    pub const fn new(start: u16, end: u16) -> Self {
        Self { start, end }
    }
}

impl DcsCommand for SetColumnAddress {
    fn instruction(&self) -> u16 {
        0x2A
    }

    fn params(&self) -> Params {
        Params::Range(self.start, self.end)
    }
}

/// Row (page) address range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetPageAddress {
    start: u16,
    end: u16,
}

impl SetPageAddress {
    pub const fn new(start: u16, end: u16) -> Self {
        Self { start, end }
    }
}

impl DcsCommand for SetPageAddress {
    fn instruction(&self) -> u16 {
        0x2B
    }

    fn params(&self) -> Params {
        Params::Range(self.start, self.end)
    }
}

/// Memory access control (MADCTL).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SetAddressMode(u8);

impl SetAddressMode {
    /// Row address order (MY).
    pub const ROW_ORDER: u8 = 0x80;
    /// Column address order (MX).
    pub const COLUMN_ORDER: u8 = 0x40;
    /// Row/column exchange (MV).
    pub const ROW_COLUMN_EXCHANGE: u8 = 0x20;
    /// Vertical refresh order (ML).
    pub const VERTICAL_REFRESH: u8 = 0x10;
    /// BGR color filter order.
    pub const BGR: u8 = 0x08;
    /// Horizontal refresh order (MH).
    pub const HORIZONTAL_REFRESH: u8 = 0x04;

    pub const fn new(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Standard mapping for panels whose native scan is column-mirrored with
    /// a BGR color filter.
    pub const fn for_orientation(orientation: Orientation) -> Self {
        let bits = match orientation {
            Orientation::Normal => Self::COLUMN_ORDER,
            Orientation::Rotate90 => Self::ROW_COLUMN_EXCHANGE,
            Orientation::Rotate180 => Self::ROW_ORDER,
            Orientation::Rotate270 => {
                Self::ROW_ORDER | Self::COLUMN_ORDER | Self::ROW_COLUMN_EXCHANGE
            }
            Orientation::MirrorH => 0,
            Orientation::MirrorV => Self::ROW_ORDER | Self::COLUMN_ORDER,
            Orientation::MirrorHV => Self::ROW_ORDER,
        };
        Self(bits | Self::BGR)
    }
}

impl DcsCommand for SetAddressMode {
    fn instruction(&self) -> u16 {
        0x36
    }

    fn params(&self) -> Params {
        Params::Register(u16::from(self.0))
    }
}
