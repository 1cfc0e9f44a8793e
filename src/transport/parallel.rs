use embedded_hal::digital::OutputPin;

use super::{BusKind, Transport};

/// A word that can be placed on the parallel data lines.
pub trait BusWord: Copy + From<u8> + Eq {
    /// Truncates `value` to a single bus cycle.
    fn truncate(value: u16) -> Self;

    /// Splits `value` into bus cycles, most significant first. The first
    /// element is `None` when the value fits one cycle.
    fn split(value: u16) -> (Option<Self>, Self);
}

impl BusWord for u8 {
    fn truncate(value: u16) -> Self {
        value as u8
    }

    fn split(value: u16) -> (Option<Self>, Self) {
        let [high, low] = value.to_be_bytes();
        (Some(high), low)
    }
}

impl BusWord for u16 {
    fn truncate(value: u16) -> Self {
        value
    }

    fn split(value: u16) -> (Option<Self>, Self) {
        (None, value)
    }
}

/// Parallel data lines.
pub trait OutputBus {
    type Word: BusWord;
    const KIND: BusKind;
    type Error: core::fmt::Debug;
    fn set_value(&mut self, value: Self::Word) -> Result<(), Self::Error>;
}

/// 8-bit bus driven through eight GPIO pins, `P0` being the least significant
/// bit.
///
/// Pins are only toggled when their bit changes.
pub struct Generic8BitBus<P0, P1, P2, P3, P4, P5, P6, P7> {
    pins: (P0, P1, P2, P3, P4, P5, P6, P7),
    last: Option<u8>,
}

impl<P0, P1, P2, P3, P4, P5, P6, P7> Generic8BitBus<P0, P1, P2, P3, P4, P5, P6, P7>
where
    P0: OutputPin,
    P1: OutputPin<Error = P0::Error>,
    P2: OutputPin<Error = P0::Error>,
    P3: OutputPin<Error = P0::Error>,
    P4: OutputPin<Error = P0::Error>,
    P5: OutputPin<Error = P0::Error>,
    P6: OutputPin<Error = P0::Error>,
    P7: OutputPin<Error = P0::Error>,
{
    pub fn new(pins: (P0, P1, P2, P3, P4, P5, P6, P7)) -> Self {
        Self { pins, last: None }
    }

    pub fn release(self) -> (P0, P1, P2, P3, P4, P5, P6, P7) {
        self.pins
    }
}

fn set_bit<P: OutputPin>(pin: &mut P, changed: u8, value: u8, bit: u8) -> Result<(), P::Error> {
    let mask = 1 << bit;
    if changed & mask == 0 {
        return Ok(());
    }
    if value & mask != 0 {
        pin.set_high()
    } else {
        pin.set_low()
    }
}

impl<P0, P1, P2, P3, P4, P5, P6, P7> OutputBus for Generic8BitBus<P0, P1, P2, P3, P4, P5, P6, P7>
where
    P0: OutputPin,
    P1: OutputPin<Error = P0::Error>,
    P2: OutputPin<Error = P0::Error>,
    P3: OutputPin<Error = P0::Error>,
    P4: OutputPin<Error = P0::Error>,
    P5: OutputPin<Error = P0::Error>,
    P6: OutputPin<Error = P0::Error>,
    P7: OutputPin<Error = P0::Error>,
{
    type Word = u8;
    const KIND: BusKind = BusKind::Parallel8Bit;
    type Error = P0::Error;

    fn set_value(&mut self, value: u8) -> Result<(), Self::Error> {
        let changed = match self.last {
            Some(last) if last == value => return Ok(()),
            Some(last) => last ^ value,
            None => 0xFF,
        };
        // forget the cached value until every pin has been written
        self.last = None;

        set_bit(&mut self.pins.0, changed, value, 0)?;
        set_bit(&mut self.pins.1, changed, value, 1)?;
        set_bit(&mut self.pins.2, changed, value, 2)?;
        set_bit(&mut self.pins.3, changed, value, 3)?;
        set_bit(&mut self.pins.4, changed, value, 4)?;
        set_bit(&mut self.pins.5, changed, value, 5)?;
        set_bit(&mut self.pins.6, changed, value, 6)?;
        set_bit(&mut self.pins.7, changed, value, 7)?;

        self.last = Some(value);
        Ok(())
    }
}

/// Parallel interface error
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParallelError<BUS, DC, WR> {
    Bus(BUS),
    Dc(DC),
    Wr(WR),
}

/// MCU (8080) transport: DC selects command (low) or data (high), every word
/// is latched by a WR pulse.
pub struct ParallelTransport<BUS, DC, WR> {
    bus: BUS,
    dc: DC,
    wr: WR,
}

impl<BUS, DC, WR> ParallelTransport<BUS, DC, WR>
where
    BUS: OutputBus,
    DC: OutputPin,
    WR: OutputPin,
{
    pub fn new(bus: BUS, dc: DC, wr: WR) -> Self {
        Self { bus, dc, wr }
    }

    pub fn release(self) -> (BUS, DC, WR) {
        (self.bus, self.dc, self.wr)
    }

    fn send_word(
        &mut self,
        word: BUS::Word,
    ) -> Result<(), ParallelError<BUS::Error, DC::Error, WR::Error>> {
        self.wr.set_low().map_err(ParallelError::Wr)?;
        self.bus.set_value(word).map_err(ParallelError::Bus)?;
        self.wr.set_high().map_err(ParallelError::Wr)
    }

    fn data_mode(&mut self) -> Result<(), ParallelError<BUS::Error, DC::Error, WR::Error>> {
        self.dc.set_high().map_err(ParallelError::Dc)
    }
}

impl<BUS, DC, WR> Transport for ParallelTransport<BUS, DC, WR>
where
    BUS: OutputBus,
    DC: OutputPin,
    WR: OutputPin,
{
    type Error = ParallelError<BUS::Error, DC::Error, WR::Error>;

    const KIND: BusKind = BUS::KIND;

    fn send_command(&mut self, command: u16) -> Result<(), Self::Error> {
        self.dc.set_low().map_err(ParallelError::Dc)?;
        self.send_word(BUS::Word::truncate(command))
    }

    fn send_data(&mut self, value: u16) -> Result<(), Self::Error> {
        self.data_mode()?;
        let (high, low) = BUS::Word::split(value);
        if let Some(high) = high {
            self.send_word(high)?;
        }
        self.send_word(low)
    }

    fn send_command_with_data(&mut self, command: u16, value: u16) -> Result<(), Self::Error> {
        self.send_command(command)?;
        self.data_mode()?;
        self.send_word(BUS::Word::truncate(value))
    }

    fn write(&mut self, command: u16, payload: &[u8]) -> Result<(), Self::Error> {
        self.send_command(command)?;
        if !payload.is_empty() {
            self.data_mode()?;
            for &byte in payload {
                self.send_word(BUS::Word::from(byte))?;
            }
        }
        Ok(())
    }
}
