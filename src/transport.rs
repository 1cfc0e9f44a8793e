mod parallel;
pub use parallel::*;

mod dsi;
pub use dsi::*;

/// Command and data transport to a panel.
///
/// One implementation exists per bus family. Every method is a blocking bus
/// transaction; a failure is returned to the caller without retrying.
pub trait Transport {
    /// Error type
    type Error: core::fmt::Debug;

    /// Kind of bus
    const KIND: BusKind;

    /// Sends a command code.
    fn send_command(&mut self, command: u16) -> Result<(), Self::Error>;

    /// Sends one 16-bit data value following a command.
    fn send_data(&mut self, value: u16) -> Result<(), Self::Error>;

    /// Writes a single-parameter register: `command` followed by `value`.
    fn send_command_with_data(&mut self, command: u16, value: u16) -> Result<(), Self::Error> {
        self.send_command(command)?;
        self.send_data(value)
    }

    /// Sends an address range command: `command` followed by the inclusive
    /// `start` and `end` values.
    fn send_command_with_range(
        &mut self,
        command: u16,
        start: u16,
        end: u16,
    ) -> Result<(), Self::Error> {
        self.send_command(command)?;
        self.send_data(start)?;
        self.send_data(end)
    }

    /// Sends a command followed by its parameter bytes.
    ///
    /// The default issues the command and then each byte as its own data
    /// transfer. Packet based buses override this to send one transaction.
    fn write(&mut self, command: u16, payload: &[u8]) -> Result<(), Self::Error> {
        self.send_command(command)?;
        for &byte in payload {
            self.send_data(u16::from(byte))?;
        }
        Ok(())
    }

    /// Switches the link into command mode. No-op on buses without modes.
    fn enter_command_mode(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Enables or disables the end-of-transmission marker after each
    /// transaction. No-op on buses without one.
    fn set_end_of_transmission_marker(&mut self, _enabled: bool) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;
    const KIND: BusKind = T::KIND;

    fn send_command(&mut self, command: u16) -> Result<(), Self::Error> {
        T::send_command(self, command)
    }

    fn send_data(&mut self, value: u16) -> Result<(), Self::Error> {
        T::send_data(self, value)
    }

    fn send_command_with_data(&mut self, command: u16, value: u16) -> Result<(), Self::Error> {
        T::send_command_with_data(self, command, value)
    }

    fn send_command_with_range(
        &mut self,
        command: u16,
        start: u16,
        end: u16,
    ) -> Result<(), Self::Error> {
        T::send_command_with_range(self, command, start, end)
    }

    fn write(&mut self, command: u16, payload: &[u8]) -> Result<(), Self::Error> {
        T::write(self, command, payload)
    }

    fn enter_command_mode(&mut self) -> Result<(), Self::Error> {
        T::enter_command_mode(self)
    }

    fn set_end_of_transmission_marker(&mut self, enabled: bool) -> Result<(), Self::Error> {
        T::set_end_of_transmission_marker(self, enabled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum BusKind {
    Parallel8Bit,
    Parallel16Bit,
    MipiDsi,
}
