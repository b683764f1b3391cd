//! HD44780 Character Display over a PCF8574 Backpack
//!
//! The common 16x2 LCD module ships with a PCF8574 port expander soldered to
//! its parallel interface, exposing it as a single I2C device. The expander
//! pins map to: bit 0 register select, bit 2 enable, bit 3 backlight, bits
//! 4-7 the data nibble. The controller therefore runs in 4-bit mode and every
//! byte crosses the bus as two strobed nibble writes.
//!
//! This adapter renders exactly the caller's text. Rows are space-padded and
//! truncated to the panel width; anything beyond ASCII shows up as whatever
//! the controller's character ROM maps those bytes to.

use std::thread;
use std::time::Duration;

use rppal::i2c::I2c;
use thiserror::Error;

/// PCF8574 address most backpack boards strap by default
pub const DEFAULT_DISPLAY_ADDRESS: u8 = 0x27;

/// Characters per row on the 16x2 panel
const WIDTH: usize = 16;

const BACKLIGHT: u8 = 0x08;
const ENABLE: u8 = 0x04;

/// Clear display, return cursor home
const CLEAR: u8 = 0x01;

// 0x33/0x32 drop the controller into 4-bit mode, then: display on cursor
// off, 4-bit two-line 5x8 font, clear.
const INIT_SEQUENCE: [u8; 5] = [0x33, 0x32, 0x0C, 0x28, CLEAR];

/// Settle time around each edge of the enable pulse
const ENABLE_SETTLE: Duration = Duration::from_micros(500);
/// Width of the enable pulse itself
const ENABLE_PULSE: Duration = Duration::from_micros(500);

/// Errors raised while driving the panel
#[derive(Debug, Error)]
pub enum DisplayError {
    /// The backpack did not acknowledge a bus transfer
    #[error("Display bus error: {0}")]
    Bus(#[from] rppal::i2c::Error),
}

/// Row selector for the two-line panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    /// Top row
    One,
    /// Bottom row
    Two,
}

impl Line {
    /// DDRAM address command for the start of the row
    fn address(self) -> u8 {
        match self {
            Line::One => 0x80,
            Line::Two => 0xC0,
        }
    }
}

/// Which controller register a byte targets (RS pin)
#[derive(Clone, Copy)]
enum RegisterSelect {
    Command,
    Data,
}

impl RegisterSelect {
    fn bit(self) -> u8 {
        match self {
            RegisterSelect::Command => 0x00,
            RegisterSelect::Data => 0x01,
        }
    }
}

/// 16x2 character LCD behind a PCF8574 I2C backpack
pub struct CharacterDisplay {
    bus: I2c,
    address: u8,
}

impl CharacterDisplay {
    /// Open the default bus and talk to the backpack at
    /// [`DEFAULT_DISPLAY_ADDRESS`]
    pub fn new() -> Result<Self, DisplayError> {
        Self::at_address(DEFAULT_DISPLAY_ADDRESS)
    }

    /// Open the default bus and talk to the backpack at `address`
    pub fn at_address(address: u8) -> Result<Self, DisplayError> {
        let mut bus = I2c::new()?;
        bus.set_slave_address(u16::from(address))?;
        Ok(Self { bus, address })
    }

    /// Run the controller's wake-up sequence
    ///
    /// Must be called once after power-up, before any text is written.
    pub fn init(&mut self) -> Result<(), DisplayError> {
        for command in INIT_SEQUENCE {
            self.send(command, RegisterSelect::Command)?;
        }
        thread::sleep(ENABLE_SETTLE);
        log::debug!("display ready at {:#04x}", self.address);
        Ok(())
    }

    /// Render one row, padded and truncated to the panel width
    pub fn write_line(&mut self, text: &str, line: Line) -> Result<(), DisplayError> {
        self.send(line.address(), RegisterSelect::Command)?;
        for byte in padded(text) {
            self.send(byte, RegisterSelect::Data)?;
        }
        Ok(())
    }

    /// Blank the panel and park the cursor at the top left
    pub fn clear(&mut self) -> Result<(), DisplayError> {
        self.send(CLEAR, RegisterSelect::Command)
    }

    fn send(&mut self, bits: u8, select: RegisterSelect) -> Result<(), DisplayError> {
        for frame in nibble_frames(bits, select) {
            self.bus.write(&[frame])?;
            self.strobe(frame)?;
        }
        Ok(())
    }

    /// Toggle the enable pin so the controller latches the nibble
    fn strobe(&mut self, frame: u8) -> Result<(), DisplayError> {
        thread::sleep(ENABLE_SETTLE);
        self.bus.write(&[frame | ENABLE])?;
        thread::sleep(ENABLE_PULSE);
        self.bus.write(&[frame & !ENABLE])?;
        thread::sleep(ENABLE_SETTLE);
        Ok(())
    }
}

/// Split a byte into its high and low expander frames
fn nibble_frames(bits: u8, select: RegisterSelect) -> [u8; 2] {
    let high = select.bit() | (bits & 0xF0) | BACKLIGHT;
    let low = select.bit() | ((bits << 4) & 0xF0) | BACKLIGHT;
    [high, low]
}

/// Pad and truncate a row to exactly the panel width
fn padded(text: &str) -> [u8; WIDTH] {
    let mut row = [b' '; WIDTH];
    for (slot, byte) in row.iter_mut().zip(text.bytes()) {
        *slot = byte;
    }
    row
}
