use heapless::Vec;

use super::{BusKind, Transport};
use crate::sequence::MAX_PAYLOAD;

/// Largest DCS packet: command byte plus [`MAX_PAYLOAD`] parameter bytes.
pub const MAX_PACKET_LEN: usize = MAX_PAYLOAD + 1;

/// MIPI DSI host controller in command mode.
///
/// Implemented by the platform; packet framing (short vs. long write,
/// checksums) is the host's concern.
pub trait DsiHost {
    type Error: core::fmt::Debug;

    /// Switches the link to command mode.
    fn set_command_mode(&mut self) -> Result<(), Self::Error>;

    /// Enables the end-of-transmission packet on receive and transmit.
    fn set_eotp(&mut self, rx: bool, tx: bool) -> Result<(), Self::Error>;

    /// Sends a DCS write; `packet[0]` is the command.
    fn dcs_write(&mut self, packet: &[u8]) -> Result<(), Self::Error>;

    /// Sends a generic write carrying raw data.
    fn generic_write(&mut self, data: &[u8]) -> Result<(), Self::Error>;
}

/// DSI transport error
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DsiError<E> {
    Host(E),
    /// Payload does not fit a single packet.
    PayloadTooLong,
}

/// MIPI DSI command-mode transport.
pub struct DsiTransport<H> {
    host: H,
}

impl<H: DsiHost> DsiTransport<H> {
    /// Create new transport
    pub fn new(host: H) -> Self {
        Self { host }
    }

    /// Release the host controller
    pub fn release(self) -> H {
        self.host
    }
}

impl<H: DsiHost> Transport for DsiTransport<H> {
    type Error = DsiError<H::Error>;

    const KIND: BusKind = BusKind::MipiDsi;

    fn send_command(&mut self, command: u16) -> Result<(), Self::Error> {
        self.host
            .dcs_write(&[command as u8])
            .map_err(DsiError::Host)
    }

    fn send_data(&mut self, value: u16) -> Result<(), Self::Error> {
        self.host
            .generic_write(&value.to_be_bytes())
            .map_err(DsiError::Host)
    }

    fn send_command_with_data(&mut self, command: u16, value: u16) -> Result<(), Self::Error> {
        self.host
            .dcs_write(&[command as u8, value as u8])
            .map_err(DsiError::Host)
    }

    fn send_command_with_range(
        &mut self,
        command: u16,
        start: u16,
        end: u16,
    ) -> Result<(), Self::Error> {
        let [start_high, start_low] = start.to_be_bytes();
        let [end_high, end_low] = end.to_be_bytes();
        self.host
            .dcs_write(&[command as u8, start_high, start_low, end_high, end_low])
            .map_err(DsiError::Host)
    }

    fn write(&mut self, command: u16, payload: &[u8]) -> Result<(), Self::Error> {
        let mut packet: Vec<u8, MAX_PACKET_LEN> = Vec::new();
        packet
            .push(command as u8)
            .map_err(|_| DsiError::PayloadTooLong)?;
        packet
            .extend_from_slice(payload)
            .map_err(|_| DsiError::PayloadTooLong)?;
        self.host.dcs_write(&packet).map_err(DsiError::Host)
    }

    fn enter_command_mode(&mut self) -> Result<(), Self::Error> {
        self.host.set_command_mode().map_err(DsiError::Host)
    }

    fn set_end_of_transmission_marker(&mut self, enabled: bool) -> Result<(), Self::Error> {
        self.host.set_eotp(true, enabled).map_err(DsiError::Host)
    }
}
