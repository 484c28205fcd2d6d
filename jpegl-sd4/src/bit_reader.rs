//! Bit-level reader for SD4 encoded data streams.
//!
//! The bitstream is read MSB-first and, unlike baseline JPEG entropy-coded
//! segments, contains neither stuffed bytes nor markers.

use crate::error::{DecodeError, Result};

#[derive(Debug, Clone)]
pub(crate) struct BitReader<'a> {
    data: &'a [u8],
    /// The position of the next byte to fetch.
    byte_pos: usize,
    /// The byte currently being consumed. Already consumed bits are zeroed.
    cur_byte: u8,
    /// How many bits of `cur_byte` are still unread.
    bits_left: u8,
}

impl<'a> BitReader<'a> {
    #[inline(always)]
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            byte_pos: 0,
            cur_byte: 0,
            bits_left: 0,
        }
    }

    /// Read a whole byte.
    ///
    /// Assumes that the reader is currently byte-aligned.
    #[inline(always)]
    pub(crate) fn read_byte(&mut self) -> Result<u8> {
        debug_assert_eq!(self.bits_left, 0);

        self.fetch_byte()
    }

    #[inline(always)]
    pub(crate) fn read_bit(&mut self) -> Result<u16> {
        self.read_bits(1)
    }

    /// Read up to 16 bits, MSB-first.
    ///
    /// Reading zero bits always succeeds and doesn't consume any input.
    #[inline]
    pub(crate) fn read_bits(&mut self, num_bits: u8) -> Result<u16> {
        debug_assert!(num_bits <= 16);

        let mut result = 0_u32;
        let mut needed = num_bits;

        while needed > 0 {
            if self.bits_left == 0 {
                self.cur_byte = self.fetch_byte()?;
                self.bits_left = 8;
            }

            let take = needed.min(self.bits_left);
            let shift = self.bits_left - take;
            let bits = u32::from(self.cur_byte >> shift);

            result = (result << take) | bits;
            self.bits_left -= take;
            self.cur_byte &= low_mask(self.bits_left);
            needed -= take;
        }

        Ok(result as u16)
    }

    /// The number of input bytes that have been (at least partially) consumed.
    #[inline(always)]
    pub(crate) fn byte_pos(&self) -> usize {
        self.byte_pos
    }

    /// The number of input bytes that were never touched.
    #[inline(always)]
    pub(crate) fn remaining_bytes(&self) -> usize {
        self.data.len() - self.byte_pos
    }

    #[inline(always)]
    fn fetch_byte(&mut self) -> Result<u8> {
        let byte = *self
            .data
            .get(self.byte_pos)
            .ok_or(DecodeError::EndOfStream)?;
        self.byte_pos += 1;

        Ok(byte)
    }
}

#[inline(always)]
fn low_mask(bits: u8) -> u8 {
    ((1_u16 << bits) - 1) as u8
}

#[cfg(test)]
#[allow(clippy::unusual_byte_groupings)]
mod tests {
    use super::*;

    #[test]
    fn test_read_within_byte() {
        let data = [0b101_10_011];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.read_bits(3), Ok(0b101));
        assert_eq!(reader.read_bits(2), Ok(0b10));
        assert_eq!(reader.read_bits(3), Ok(0b011));
        assert_eq!(reader.byte_pos(), 1);
    }

    #[test]
    fn test_read_across_bytes() {
        let data = [0b1100_1010, 0b0101_1111, 0b0000_0001];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.read_bits(4), Ok(0b1100));
        // 4 bits of the first byte, 8 of the second, 1 of the third.
        assert_eq!(reader.read_bits(13), Ok(0b1010_0101_1111_0));
        assert_eq!(reader.read_bits(7), Ok(0b000_0001));
        assert_eq!(reader.byte_pos(), 3);
    }

    #[test]
    fn test_read_sixteen_bits_unaligned() {
        let data = [0b1100_1010, 0b0101_1111, 0b1000_0000];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.read_bits(4), Ok(0b1100));
        assert_eq!(reader.read_bits(16), Ok(0b1010_0101_1111_1000));
        assert_eq!(reader.read_bits(4), Ok(0));
        assert_eq!(reader.byte_pos(), 3);
    }

    #[test]
    fn test_zero_bits_consume_nothing() {
        let data: [u8; 0] = [];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.read_bits(0), Ok(0));
        assert_eq!(reader.byte_pos(), 0);
        assert_eq!(reader.read_bit(), Err(DecodeError::EndOfStream));
    }

    #[test]
    fn test_end_of_stream_mid_field() {
        let data = [0xFF];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.read_bits(6), Ok(0b11_1111));
        assert_eq!(reader.read_bits(3), Err(DecodeError::EndOfStream));
    }

    #[test]
    fn test_bytes_then_bits() {
        let data = [0x10, 0x20, 0b1000_0000];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.read_byte(), Ok(0x10));
        assert_eq!(reader.read_byte(), Ok(0x20));
        assert_eq!(reader.remaining_bytes(), 1);
        assert_eq!(reader.read_bit(), Ok(1));
        assert_eq!(reader.remaining_bytes(), 0);
    }

    #[test]
    fn test_independent_readers() {
        let first = [0b1010_1010];
        let second = [0b0101_0101];
        let mut a = BitReader::new(&first);
        let mut b = BitReader::new(&second);

        assert_eq!(a.read_bits(3), Ok(0b101));
        assert_eq!(b.read_bits(3), Ok(0b010));
        assert_eq!(a.read_bits(5), Ok(0b01010));
        assert_eq!(b.read_bits(5), Ok(0b10101));
    }
}
