use std::fmt;

use crate::error::HarnessError;

/// Scenario register map of the peripheral exercised by the stock test
/// suites. The encoder itself attaches no meaning to addresses.
pub const REG_OUT_ENABLE: u8 = 0x00;
pub const REG_SECONDARY: u8 = 0x01;
pub const REG_PWM_ENABLE: u8 = 0x02;
pub const REG_PWM_DUTY: u8 = 0x04;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Read,
    Write,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Read => write!(f, "read"),
            Direction::Write => write!(f, "write"),
        }
    }
}

/// A logical bus transaction: direction, 7-bit address, 8-bit data.
///
/// Construction range-checks both fields; out-of-range values are rejected,
/// never masked. Whether the address means anything to the responder is the
/// responder's concern, not the frame's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusFrame {
    direction: Direction,
    address: u8,
    data: u8,
}

/// Bits on the wire per frame: 1 direction + 7 address + 8 data.
pub const FRAME_BITS: usize = 16;

impl BusFrame {
    pub fn new(direction: Direction, address: u16, data: u16) -> Result<Self, HarnessError> {
        if address > 0x7F {
            return Err(HarnessError::AddressOutOfRange(address));
        }
        if data > 0xFF {
            return Err(HarnessError::DataOutOfRange(data));
        }
        Ok(BusFrame {
            direction,
            address: address as u8,
            data: data as u8,
        })
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn data(&self) -> u8 {
        self.data
    }

    /// Wire format: bit 15 = direction (1 = write), bits 14..8 = address,
    /// bits 7..0 = data. Transmitted MSB first.
    pub fn to_word(&self) -> u16 {
        let dir = match self.direction {
            Direction::Write => 1u16,
            Direction::Read => 0u16,
        };
        (dir << 15) | ((self.address as u16) << 8) | self.data as u16
    }

    /// Bit `index` counted from the MSB (index 0 = direction bit).
    pub fn bit(&self, index: usize) -> bool {
        debug_assert!(index < FRAME_BITS);
        (self.to_word() >> (FRAME_BITS - 1 - index)) & 0x01 != 0
    }
}

impl fmt::Display for BusFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} addr={:#04x} data={:#04x}",
            self.direction, self.address, self.data
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_packing() {
        let frame = BusFrame::new(Direction::Write, 0x00, 0xF0).unwrap();
        assert_eq!(frame.to_word(), 0x80F0);

        let frame = BusFrame::new(Direction::Read, 0x30, 0xBE).unwrap();
        assert_eq!(frame.to_word(), 0x30BE);

        let frame = BusFrame::new(Direction::Write, 0x7F, 0xFF).unwrap();
        assert_eq!(frame.to_word(), 0xFFFF);
    }

    #[test]
    fn test_msb_first_bit_extraction() {
        let frame = BusFrame::new(Direction::Write, 0x01, 0xCC).unwrap();
        // 0x81CC = 1000_0001_1100_1100
        let bits: Vec<u8> = (0..FRAME_BITS).map(|i| frame.bit(i) as u8).collect();
        assert_eq!(bits, [1, 0, 0, 0, 0, 0, 0, 1, 1, 1, 0, 0, 1, 1, 0, 0]);
    }

    #[test]
    fn test_address_range_check() {
        let err = BusFrame::new(Direction::Write, 0x80, 0x00).unwrap_err();
        assert!(matches!(err, HarnessError::AddressOutOfRange(0x80)));
        assert!(BusFrame::new(Direction::Write, 0x7F, 0x00).is_ok());
    }

    #[test]
    fn test_data_range_check() {
        let err = BusFrame::new(Direction::Write, 0x00, 0x100).unwrap_err();
        assert!(matches!(err, HarnessError::DataOutOfRange(0x100)));
        assert!(BusFrame::new(Direction::Write, 0x00, 0xFF).is_ok());
    }

    #[test]
    fn test_error_names_offending_field() {
        let err = BusFrame::new(Direction::Write, 0x91, 0x00).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("address"));
        assert!(msg.contains("0x91"));

        let err = BusFrame::new(Direction::Write, 0x00, 0x1FF).unwrap_err();
        assert!(err.to_string().contains("data"));
    }
}
