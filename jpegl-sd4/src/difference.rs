//! Extension of magnitude-coded differences (ISO/IEC 10918-1, F.2.2.1).

use alloc::vec::Vec;

use crate::error::{DecodeError, Result};

/// Turn the `category` raw bits that follow a category code into a signed
/// difference.
///
/// The lower half of the raw values of a category encodes the negative
/// differences, the upper half the positive ones.
#[inline]
pub(crate) const fn extend(category: u8, raw: u16) -> i32 {
    if category == 0 {
        return 0;
    }

    let raw = raw as i32;
    let half = 1 << (category - 1);

    if raw < half {
        raw - (2 * half - 1)
    } else {
        raw
    }
}

/// Precomputed differences for all categories up to a maximum.
///
/// The differences of category `c` start at offset `2^c - 1`, so the table
/// for categories `0..=max` holds `2^(max + 1) - 1` entries.
#[derive(Debug, Clone)]
pub(crate) struct DifferenceTable {
    max_category: u8,
    values: Vec<i32>,
}

impl DifferenceTable {
    pub(crate) fn new(max_category: u8) -> Result<Self> {
        debug_assert!(max_category <= 16);

        let len = (1_usize << (max_category + 1)) - 1;
        let mut values = Vec::new();
        values.try_reserve_exact(len)?;

        for category in 0..=max_category {
            values.extend((0..1_u32 << category).map(|raw| extend(category, raw as u16)));
        }

        Ok(Self {
            max_category,
            values,
        })
    }

    /// Look up the difference for a category and its raw bits.
    #[inline]
    pub(crate) fn get(&self, category: u8, raw: u16) -> Result<i32> {
        if category > self.max_category {
            return Err(DecodeError::InvalidCode);
        }

        let offset = (1_usize << category) - 1;

        self.values
            .get(offset + raw as usize)
            .copied()
            .ok_or(DecodeError::InvalidCode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_zero() {
        assert_eq!(extend(0, 0), 0);
    }

    #[test]
    fn test_small_categories() {
        assert_eq!(extend(1, 0), -1);
        assert_eq!(extend(1, 1), 1);

        assert_eq!(extend(2, 0), -3);
        assert_eq!(extend(2, 1), -2);
        assert_eq!(extend(2, 2), 2);
        assert_eq!(extend(2, 3), 3);
    }

    #[test]
    fn test_extension_bounds() {
        for category in 1..=16_u8 {
            let limit = (1_i32 << category) - 1;
            let half = 1_u32 << (category - 1);

            for raw in 0..1_u32 << category {
                let value = extend(category, raw as u16);
                assert!((-limit..=limit).contains(&value));
                // Zero is never coded with a non-zero category.
                assert_ne!(value, 0);
            }

            assert_eq!(extend(category, half as u16), half as i32);
            assert_eq!(extend(category, 0), -limit);
            assert_eq!(extend(category, (half - 1) as u16), -(half as i32));
        }
    }

    #[test]
    fn test_table_matches_extend() {
        let table = DifferenceTable::new(9).unwrap();

        for category in 0..=9_u8 {
            for raw in 0..1_u16 << category {
                assert_eq!(table.get(category, raw), Ok(extend(category, raw)));
            }
        }
    }

    #[test]
    fn test_table_rejects_larger_categories() {
        let table = DifferenceTable::new(4).unwrap();

        assert_eq!(table.get(5, 0), Err(DecodeError::InvalidCode));
    }
}
