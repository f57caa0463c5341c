use std::fmt;

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("invalid NAL unit length size {0} (must be 1, 2, or 4)")]
pub struct InvalidLengthSize(pub u8);

/// `LengthSize` is the width of the big-endian length field that precedes every `NalUnit` in a
/// length-prefixed sample.
///
/// ISO-BMFF signals it in the decoder configuration record (`avcC` / `hvcC`) as the 2-bit
/// `lengthSizeMinusOne` field. A value of 2 there (a 3-byte prefix) is reserved and rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LengthSize {
    One,
    Two,
    #[default]
    Four,
}

impl LengthSize {
    pub const fn width(self) -> usize {
        match self {
            LengthSize::One => 1,
            LengthSize::Two => 2,
            LengthSize::Four => 4,
        }
    }

    /// Maps the `lengthSizeMinusOne` field of a decoder configuration record. Only the low two bits
    /// are significant; the reserved upper bits are ignored.
    pub fn from_length_size_minus_one(value: u8) -> Result<Self, InvalidLengthSize> {
        Self::try_from((value & 0b11) + 1)
    }

    /// Reads one length field from the front of `prefix`.
    ///
    /// `prefix` must hold at least `width()` bytes.
    pub fn read(self, prefix: &[u8]) -> usize {
        match self {
            LengthSize::One => prefix[0] as usize,
            LengthSize::Two => u16::from_be_bytes([prefix[0], prefix[1]]) as usize,
            LengthSize::Four => {
                u32::from_be_bytes([prefix[0], prefix[1], prefix[2], prefix[3]]) as usize
            }
        }
    }
}

impl TryFrom<u8> for LengthSize {
    type Error = InvalidLengthSize;

    fn try_from(width: u8) -> Result<Self, Self::Error> {
        match width {
            1 => Ok(LengthSize::One),
            2 => Ok(LengthSize::Two),
            4 => Ok(LengthSize::Four),
            _ => Err(InvalidLengthSize(width)),
        }
    }
}

impl From<LengthSize> for u8 {
    fn from(length_size: LengthSize) -> u8 {
        length_size.width() as u8
    }
}

impl fmt::Display for LengthSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.width())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_from_width() -> Result<(), InvalidLengthSize> {
        assert_eq!(LengthSize::try_from(1)?, LengthSize::One);
        assert_eq!(LengthSize::try_from(2)?, LengthSize::Two);
        assert_eq!(LengthSize::try_from(4)?, LengthSize::Four);

        for bad in [0, 3, 5, 8, 255] {
            assert_eq!(LengthSize::try_from(bad), Err(InvalidLengthSize(bad)));
        }

        Ok(())
    }

    #[test]
    fn test_from_length_size_minus_one() -> Result<(), InvalidLengthSize> {
        assert_eq!(LengthSize::from_length_size_minus_one(0)?, LengthSize::One);
        assert_eq!(LengthSize::from_length_size_minus_one(1)?, LengthSize::Two);
        assert_eq!(LengthSize::from_length_size_minus_one(3)?, LengthSize::Four);
        // reserved bits set, as written by most muxers
        assert_eq!(
            LengthSize::from_length_size_minus_one(0xFF)?,
            LengthSize::Four
        );
        assert_eq!(
            LengthSize::from_length_size_minus_one(2),
            Err(InvalidLengthSize(3))
        );

        Ok(())
    }

    #[test]
    fn test_read_big_endian() {
        let data = [0x12, 0x34, 0x56, 0x78, 0x9A];

        assert_eq!(LengthSize::One.read(&data), 0x12);
        assert_eq!(LengthSize::Two.read(&data), 0x1234);
        assert_eq!(LengthSize::Four.read(&data), 0x1234_5678);
    }

    #[test]
    fn test_display_and_default() {
        assert_eq!(LengthSize::default(), LengthSize::Four);
        assert_eq!(LengthSize::Two.to_string(), "2");
        assert_eq!(u8::from(LengthSize::One), 1);
    }
}
