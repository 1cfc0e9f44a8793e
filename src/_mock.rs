//! Recording doubles for the transport, delay, pins and DSI host.

use std::{cell::RefCell, rc::Rc, vec::Vec};

use embedded_hal::{delay::DelayNs, digital};

use crate::{
    sequence::{CommandTable, Step},
    transport::{BusKind, DsiHost, Transport},
};

/// Something observable on the bus or the clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Command(u16),
    Data(u16),
    CommandMode,
    EndOfTransmission(bool),
    DelayMs(u32),
    DelayUs(u32),
}

/// Bus activity normalized to sends and waits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recorded {
    Send(u16, Vec<u16>),
    Wait(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

/// Shared, ordered log of transport and delay events.
#[derive(Clone, Default)]
pub struct Log(Rc<RefCell<Vec<Event>>>);

impl Log {
    fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Commands with their data and millisecond waits; settle delays in µs
    /// and bus-mode hooks are dropped.
    pub fn transcript(&self) -> Vec<Recorded> {
        let mut out = Vec::new();
        for event in self.0.borrow().iter() {
            match *event {
                Event::Command(command) => out.push(Recorded::Send(command, Vec::new())),
                Event::Data(value) => match out.last_mut() {
                    Some(Recorded::Send(_, data)) => data.push(value),
                    _ => panic!("data {value:#x} without a command"),
                },
                Event::DelayMs(ms) => out.push(Recorded::Wait(ms)),
                _ => {}
            }
        }
        out
    }

    /// Commands in the order they were sent.
    pub fn commands(&self) -> Vec<u16> {
        self.0
            .borrow()
            .iter()
            .filter_map(|event| match *event {
                Event::Command(command) => Some(command),
                _ => None,
            })
            .collect()
    }

    /// Sum of all millisecond waits.
    pub fn total_delay_ms(&self) -> u32 {
        self.0
            .borrow()
            .iter()
            .map(|event| match *event {
                Event::DelayMs(ms) => ms,
                _ => 0,
            })
            .sum()
    }
}

/// What replaying `table` must produce, in [`Log::transcript`] form.
pub fn transcript(table: &CommandTable) -> Vec<Recorded> {
    let mut out = Vec::new();
    for step in table.steps() {
        if let Step::Send {
            command, payload, ..
        } = *step
        {
            out.push(Recorded::Send(
                command,
                payload.iter().copied().map(u16::from).collect(),
            ));
        }
        if step.delay_ms() > 0 {
            out.push(Recorded::Wait(step.delay_ms()));
        }
    }
    out
}

/// Transport that records every transaction into a [`Log`].
pub struct MockTransport {
    log: Log,
    remaining: Option<usize>,
}

impl MockTransport {
    /// Lets `transactions` more transactions succeed, then fails all others.
    pub fn fail_after(&mut self, transactions: usize) {
        self.remaining = Some(transactions);
    }

    fn record(&mut self, event: Event) -> Result<(), MockError> {
        match self.remaining {
            Some(0) => return Err(MockError),
            Some(ref mut n) => *n -= 1,
            None => {}
        }
        self.log.push(event);
        Ok(())
    }
}

impl Transport for MockTransport {
    type Error = MockError;

    const KIND: BusKind = BusKind::Parallel8Bit;

    fn send_command(&mut self, command: u16) -> Result<(), Self::Error> {
        self.record(Event::Command(command))
    }

    fn send_data(&mut self, value: u16) -> Result<(), Self::Error> {
        self.record(Event::Data(value))
    }

    fn enter_command_mode(&mut self) -> Result<(), Self::Error> {
        self.record(Event::CommandMode)
    }

    fn set_end_of_transmission_marker(&mut self, enabled: bool) -> Result<(), Self::Error> {
        self.record(Event::EndOfTransmission(enabled))
    }
}

/// Delay that records into a [`Log`] instead of waiting.
pub struct MockDelay {
    log: Log,
}

impl MockDelay {
    pub fn new(log: Log) -> Self {
        Self { log }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.push(Event::DelayUs(ns / 1_000));
    }

    fn delay_us(&mut self, us: u32) {
        self.log.push(Event::DelayUs(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log.push(Event::DelayMs(ms));
    }
}

/// Transport and delay sharing one log.
pub fn recorder() -> (MockTransport, MockDelay, Log) {
    let log = Log::default();
    let transport = MockTransport {
        log: log.clone(),
        remaining: None,
    };
    (transport, MockDelay::new(log.clone()), log)
}

#[derive(Debug, Default)]
struct PinState {
    level: bool,
    writes: usize,
    history: Vec<bool>,
}

/// Observer of a [`MockPin`].
#[derive(Debug, Clone, Default)]
pub struct PinLog(Rc<RefCell<PinState>>);

impl PinLog {
    pub fn level(&self) -> bool {
        self.0.borrow().level
    }

    pub fn writes(&self) -> usize {
        self.0.borrow().writes
    }

    pub fn history(&self) -> Vec<bool> {
        self.0.borrow().history.clone()
    }
}

/// Output pin that starts low and remembers every write.
#[derive(Debug, Default)]
pub struct MockPin {
    state: PinLog,
}

impl MockPin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> PinLog {
        self.state.clone()
    }

    fn set(&mut self, level: bool) {
        let mut state = self.state.0.borrow_mut();
        state.level = level;
        state.writes += 1;
        state.history.push(level);
    }
}

impl digital::ErrorType for MockPin {
    type Error = core::convert::Infallible;
}

impl digital::OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set(true);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DsiEvent {
    CommandMode,
    Eotp { rx: bool, tx: bool },
    Dcs(Vec<u8>),
    Generic(Vec<u8>),
}

/// DSI host that records packets.
#[derive(Default)]
pub struct MockDsiHost {
    events: Vec<DsiEvent>,
    fail: bool,
}

impl MockDsiHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host that rejects every request.
    pub fn failing() -> Self {
        Self {
            events: Vec::new(),
            fail: true,
        }
    }

    pub fn events(&self) -> Vec<DsiEvent> {
        self.events.clone()
    }

    /// Command bytes of all DCS packets.
    pub fn dcs_commands(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|event| match event {
                DsiEvent::Dcs(packet) => packet.first().copied(),
                _ => None,
            })
            .collect()
    }

    fn record(&mut self, event: DsiEvent) -> Result<(), ()> {
        if self.fail {
            return Err(());
        }
        self.events.push(event);
        Ok(())
    }
}

impl DsiHost for MockDsiHost {
    type Error = ();

    fn set_command_mode(&mut self) -> Result<(), Self::Error> {
        self.record(DsiEvent::CommandMode)
    }

    fn set_eotp(&mut self, rx: bool, tx: bool) -> Result<(), Self::Error> {
        self.record(DsiEvent::Eotp { rx, tx })
    }

    fn dcs_write(&mut self, packet: &[u8]) -> Result<(), Self::Error> {
        self.record(DsiEvent::Dcs(packet.to_vec()))
    }

    fn generic_write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.record(DsiEvent::Generic(data.to_vec()))
    }
}
