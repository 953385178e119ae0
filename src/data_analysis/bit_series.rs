// src/data_analysis/bit_series.rs

use crate::constants::WORD_BITS;
use crate::types::BitMatrix;

/// Unpacks a word time series into per-bit time series.
///
/// Returns one row per bit position across the whole series, bit 0 being
/// the least significant bit of each word. This is the canonical internal
/// bit order consumed by the renderer.
pub fn unpack_bits(words: &[u16]) -> BitMatrix {
    (0..WORD_BITS)
        .map(|b| words.iter().map(|&w| ((w >> b) & 1) as u8).collect())
        .collect()
}

/// Computes adjacent-bit transition series for a word time series.
///
/// Row `b` holds, for every sample, `1` where bit `b` and bit `b + 1`
/// differ. There are `WORD_BITS - 1` rows.
pub fn bit_transitions(words: &[u16]) -> BitMatrix {
    (0..WORD_BITS - 1)
        .map(|b| {
            words
                .iter()
                .map(|&w| (((w >> b) ^ (w >> (b + 1))) & 1) as u8)
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpack_is_lsb_first() {
        // 0b0000000000000101
        let bits = unpack_bits(&[0x0005]);
        assert_eq!(bits.len(), WORD_BITS);
        assert_eq!(bits[0][0], 1);
        assert_eq!(bits[1][0], 0);
        assert_eq!(bits[2][0], 1);
        for row in &bits[3..] {
            assert_eq!(row[0], 0);
        }
    }

    #[test]
    fn transitions_flag_adjacent_bit_differences() {
        let trans = bit_transitions(&[0x0005]);
        assert_eq!(trans.len(), WORD_BITS - 1);
        assert_eq!(trans[0][0], 1); // bit0=1, bit1=0
        assert_eq!(trans[1][0], 1); // bit1=0, bit2=1
        assert_eq!(trans[2][0], 1); // bit2=1, bit3=0
        assert_eq!(trans[3][0], 0);
    }

    #[test]
    fn matrices_are_bit_major() {
        let words = [0x0001, 0x0002, 0x0003];
        let bits = unpack_bits(&words);
        assert_eq!(bits[0], vec![1, 0, 1]);
        assert_eq!(bits[1], vec![0, 1, 1]);
        let trans = bit_transitions(&words);
        assert_eq!(trans[0], vec![1, 1, 0]);
    }

    #[test]
    fn empty_series_keeps_row_count() {
        let bits = unpack_bits(&[]);
        assert_eq!(bits.len(), WORD_BITS);
        assert!(bits.iter().all(|row| row.is_empty()));
    }
}

// src/data_analysis/bit_series.rs
