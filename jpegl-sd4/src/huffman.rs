//! Huffman table decoding for SD4 streams.
//!
//! The stream carries a single table in the compact form of ISO/IEC 10918-1
//! (a count of codes for each length followed by the symbols), from which
//! the canonical codes are rebuilt as described in Annex C and decoded with
//! the `MINCODE`/`MAXCODE`/`VALPTR` procedure of Annex F.2.2.3.

use alloc::vec::Vec;

use crate::bit_reader::BitReader;
use crate::error::{DecodeError, HeaderError, Result, bail};

/// The longest code the format allows.
pub(crate) const MAX_CODE_LENGTH: usize = 16;
/// One more than the largest difference category.
pub(crate) const MAX_CATEGORY: u8 = 17;

/// The Huffman table as it is stored in the stream header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HuffmanSpec {
    /// `code_counts[i]` is the number of codes of length `i + 1`.
    pub(crate) code_counts: [u8; MAX_CODE_LENGTH],
    /// The symbols in order of increasing code length.
    pub(crate) symbols: Vec<u8>,
}

impl HuffmanSpec {
    /// Read the table from the start of the stream.
    ///
    /// Layout: one byte holding `16 + number of symbols`, the 16 code counts
    /// and then the symbols. Every byte is checked as soon as it is read.
    pub(crate) fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let num_params = reader.read_byte()? as usize;

        let Some(num_symbols) = num_params.checked_sub(MAX_CODE_LENGTH) else {
            lwarn!("huffman header declares only {num_params} parameters");

            bail!(HeaderError::TooFewParameters);
        };

        let mut code_counts = [0; MAX_CODE_LENGTH];

        for count in &mut code_counts {
            *count = reader.read_byte()?;
        }

        let mut symbols = Vec::new();
        symbols.try_reserve_exact(num_symbols)?;

        for _ in 0..num_symbols {
            symbols.push(reader.read_byte()?);
        }

        Ok(Self {
            code_counts,
            symbols,
        })
    }
}

/// A decode table built from a [`HuffmanSpec`].
///
/// All arrays are indexed by code length, index 0 is unused.
#[derive(Debug, Clone)]
pub(crate) struct HuffmanTable {
    /// The smallest code of each length.
    mincode: [i32; MAX_CODE_LENGTH + 1],
    /// The largest code of each length, or -1 if there is none.
    maxcode: [i32; MAX_CODE_LENGTH + 1],
    /// The index into `symbols` of the first symbol of each length.
    valptr: [usize; MAX_CODE_LENGTH + 1],
    symbols: Vec<u8>,
}

impl HuffmanTable {
    pub(crate) fn new(spec: HuffmanSpec) -> Result<Self> {
        let HuffmanSpec {
            code_counts,
            symbols,
        } = spec;

        let total: usize = code_counts.iter().map(|c| *c as usize).sum();

        if total != symbols.len() {
            lwarn!(
                "huffman code counts add up to {total}, but {} symbols are present",
                symbols.len()
            );

            bail!(HeaderError::CodeCountMismatch);
        }

        if let Some(symbol) = symbols.iter().find(|s| **s >= MAX_CATEGORY) {
            lwarn!("huffman table contains invalid category {}", symbol);

            bail!(HeaderError::InvalidCategory);
        }

        let mut mincode = [0; MAX_CODE_LENGTH + 1];
        let mut maxcode = [-1; MAX_CODE_LENGTH + 1];
        let mut valptr = [0; MAX_CODE_LENGTH + 1];

        let mut code = 0_i32;
        let mut symbol_idx = 0;

        for length in 1..=MAX_CODE_LENGTH {
            let count = i32::from(code_counts[length - 1]);

            if count > 0 {
                // The codes of this length must all fit into `length` bits.
                if code + count > 1 << length {
                    lwarn!("huffman table has too many codes of length {length}");

                    bail!(HeaderError::OversubscribedCodes);
                }

                valptr[length] = symbol_idx;
                mincode[length] = code;
                code += count;
                maxcode[length] = code - 1;
                symbol_idx += count as usize;

                ltrace!(
                    "length {length}: codes {}..={}, first symbol at {}",
                    mincode[length],
                    maxcode[length],
                    valptr[length]
                );
            }

            code <<= 1;
        }

        ldebug!("built huffman table with {} codes", symbols.len());

        Ok(Self {
            mincode,
            maxcode,
            valptr,
            symbols,
        })
    }

    /// The largest category any code of this table can produce.
    pub(crate) fn max_category(&self) -> u8 {
        self.symbols.iter().copied().max().unwrap_or(0)
    }
}

impl BitReader<'_> {
    /// Decode the next difference category.
    ///
    /// The code is extended one bit at a time until it is not larger than the
    /// largest code of its length. Since no code is longer than 16 bits, a
    /// longer prefix means that the stream is corrupt.
    pub(crate) fn decode_category(&mut self, table: &HuffmanTable) -> Result<u8> {
        let mut code = i32::from(self.read_bit()?);
        let mut length = 1;

        while code > table.maxcode[length] {
            length += 1;

            if length > MAX_CODE_LENGTH {
                lwarn!("no huffman code matched within {MAX_CODE_LENGTH} bits");

                bail!(DecodeError::InvalidCode);
            }

            code = (code << 1) | i32::from(self.read_bit()?);
        }

        let offset =
            usize::try_from(code - table.mincode[length]).map_err(|_| DecodeError::InvalidCode)?;

        table
            .symbols
            .get(table.valptr[length] + offset)
            .copied()
            .ok_or(DecodeError::InvalidCode)
    }
}
