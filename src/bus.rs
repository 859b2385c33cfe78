//! Controller-side bus line state and the device-under-test seam.
//!
//! The controller exclusively drives three input lines (serial clock,
//! data-out, chip-select-active-low), packed into the low three bits of the
//! device's input vector. The device answers on two read-only output
//! vectors. Everything the harness knows about the device goes through the
//! [`BusDevice`] trait; there is no global device handle.

use std::fmt;

use crate::signal::{OutputBus, ProbePoint};

/// State of the three controller-driven bus lines at one time tick.
///
/// Wire packing, low bits first: bit 0 = serial clock, bit 1 = data-out,
/// bit 2 = chip-select (active low). Bits 3..7 are reserved and held at
/// zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusLineState {
    pub chip_select_n: bool,
    pub data_out: bool,
    pub serial_clock: bool,
}

impl BusLineState {
    pub fn new(chip_select_n: bool, data_out: bool, serial_clock: bool) -> Self {
        BusLineState {
            chip_select_n,
            data_out,
            serial_clock,
        }
    }

    /// Idle bus: chip select deasserted, data and clock low.
    pub fn idle() -> Self {
        BusLineState::new(true, false, false)
    }

    pub fn pack(&self) -> u8 {
        (self.serial_clock as u8)
            | ((self.data_out as u8) << 1)
            | ((self.chip_select_n as u8) << 2)
    }

    pub fn unpack(raw: u8) -> Self {
        BusLineState {
            serial_clock: raw & 0x01 != 0,
            data_out: raw & 0x02 != 0,
            chip_select_n: raw & 0x04 != 0,
        }
    }
}

impl fmt::Display for BusLineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ncs={} copi={} sclk={}",
            self.chip_select_n as u8, self.data_out as u8, self.serial_clock as u8
        )
    }
}

/// The two response buses, read back as full vectors for scenario
/// assertions. The harness core never interprets their contents beyond
/// extracting single probe bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputLines {
    pub primary: u8,
    pub secondary: u8,
}

impl OutputLines {
    pub fn new(primary: u8, secondary: u8) -> Self {
        OutputLines { primary, secondary }
    }

    /// Extract one boolean line.
    pub fn bit(&self, probe: ProbePoint) -> bool {
        let vector = match probe.bus {
            OutputBus::Primary => self.primary,
            OutputBus::Secondary => self.secondary,
        };
        (vector >> probe.bit) & 0x01 != 0
    }
}

/// Interface to the device under test.
///
/// The device is a black box: the harness writes its input lines, reads its
/// output lines, and clocks it forward one controller-clock cycle at a
/// time. Implementations advance whatever internal state they model in
/// `clock_edge`.
pub trait BusDevice {
    fn write_input_lines(&mut self, lines: BusLineState);
    fn read_output_lines(&self) -> OutputLines;
    fn clock_edge(&mut self);
}
