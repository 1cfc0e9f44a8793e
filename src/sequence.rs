//! Command tables and the interpreter that replays them.
//!
//! Panel bring-up is a straight-line script taken from the panel datasheet:
//! write a register, write its parameters, wait. A [`CommandTable`] stores
//! that script as static data and [`run`] replays it over a
//! [`Transport`](crate::transport::Transport).
//!
//! ```
//! use lcd_panels::sequence::{CommandTable, Step};
//!
//! static SLEEP_OUT: CommandTable = CommandTable::new(&[
//!     Step::send_then_wait(0x11, &[], 120),
//!     Step::send(0x29, &[]),
//! ]);
//!
//! assert_eq!(SLEEP_OUT.total_delay_ms(), 120);
//! ```

use embedded_hal::delay::DelayNs;
use log::trace;

use crate::transport::Transport;

/// Maximum number of parameter bytes in a [`Step::Send`].
///
/// A DSI packet buffer holds the command byte and up to this many parameters.
pub const MAX_PAYLOAD: usize = 55;

/// One step of a command table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Issue `command`, transmit `payload` as data, then wait `delay_ms`.
    Send {
        command: u16,
        payload: &'static [u8],
        delay_ms: u32,
    },
    /// Wait without a bus transaction.
    Sleep { delay_ms: u32 },
}

impl Step {
    /// Command without a trailing delay.
    pub const fn send(command: u16, payload: &'static [u8]) -> Self {
        Self::send_then_wait(command, payload, 0)
    }

    /// Command followed by a `delay_ms` wait.
    ///
    /// Panics, at compile time when used in a `static`, if the payload
    /// exceeds [`MAX_PAYLOAD`].
    pub const fn send_then_wait(command: u16, payload: &'static [u8], delay_ms: u32) -> Self {
        assert!(payload.len() <= MAX_PAYLOAD, "command payload too long");
        Self::Send {
            command,
            payload,
            delay_ms,
        }
    }

    /// Wait only.
    pub const fn sleep(delay_ms: u32) -> Self {
        Self::Sleep { delay_ms }
    }

    /// Delay that follows this step.
    pub const fn delay_ms(&self) -> u32 {
        match *self {
            Self::Send { delay_ms, .. } | Self::Sleep { delay_ms } => delay_ms,
        }
    }
}

/// Ordered, immutable list of steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandTable {
    steps: &'static [Step],
    settle_us: u32,
}

impl CommandTable {
    pub const fn new(steps: &'static [Step]) -> Self {
        Self {
            steps,
            settle_us: 0,
        }
    }

    /// Adds a fixed wait after every [`Step::Send`], before its own delay.
    pub const fn with_settle_us(mut self, settle_us: u32) -> Self {
        self.settle_us = settle_us;
        self
    }

    pub const fn steps(&self) -> &'static [Step] {
        self.steps
    }

    pub const fn settle_us(&self) -> u32 {
        self.settle_us
    }

    pub const fn len(&self) -> usize {
        self.steps.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Sum of all step delays, excluding settle time.
    pub fn total_delay_ms(&self) -> u32 {
        self.steps.iter().map(Step::delay_ms).sum()
    }
}

/// Replays `table` over `transport`.
///
/// Steps run strictly in order and every delay is served before the next
/// step starts. The first transport error aborts the replay and is returned
/// as is; the panel state is then unknown until the next full init.
pub fn run<T, D>(table: &CommandTable, transport: &mut T, delay: &mut D) -> Result<(), T::Error>
where
    T: Transport,
    D: DelayNs,
{
    for (index, step) in table.steps.iter().enumerate() {
        match *step {
            Step::Send {
                command,
                payload,
                delay_ms,
            } => {
                trace!(
                    "step {}: cmd {:#04x} ({} bytes), wait {} ms",
                    index,
                    command,
                    payload.len(),
                    delay_ms
                );
                transport.write(command, payload)?;
                if table.settle_us > 0 {
                    delay.delay_us(table.settle_us);
                }
                if delay_ms > 0 {
                    delay.delay_ms(delay_ms);
                }
            }
            Step::Sleep { delay_ms } => {
                trace!("step {}: sleep {} ms", index, delay_ms);
                if delay_ms > 0 {
                    delay.delay_ms(delay_ms);
                }
            }
        }
    }
    Ok(())
}
