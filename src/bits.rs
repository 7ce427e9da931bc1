//! Conversion between integers and big-endian bit sequences.
//!
//! The ADS1118 is driven one bit at a time, so commands and responses are handled
//! as sequences of `bool`, most significant bit first.

use bit_field::BitField;

/// A 16-bit protocol word, most significant bit first.
pub type Word = [bool; 16];

/// Convert `value` to its `width`-bit big-endian representation.
///
/// Bits above `width` are discarded, so the result represents `value mod 2^width`.
/// Widths above 64 are padded with leading zeros.
///
/// ```rust
/// # use ads1118_hal::bits::int_to_bits;
/// assert_eq!(int_to_bits(187, 8), [true, false, true, true, true, false, true, true]);
/// assert_eq!(int_to_bits(0b1_0101, 4), [false, true, false, true]);
/// ```
pub fn int_to_bits(value: u64, width: usize) -> Vec<bool> {
    (0..width)
        .rev()
        .map(|position| position < 64 && value.get_bit(position))
        .collect()
}

/// Interpret a big-endian bit sequence as an unsigned integer.
///
/// An empty sequence is zero.
///
/// # Panics
///
/// Sequences longer than 64 bits will fail an assertion.
pub fn bits_to_int(bits: &[bool]) -> u64 {
    assert!(bits.len() <= 64, "Bit sequence does not fit in a u64.");
    let mut value = 0u64;
    for (position, &bit) in bits.iter().rev().enumerate() {
        value.set_bit(position, bit);
    }
    value
}

/// Split a `u16` into a protocol word.
pub fn word_from_u16(value: u16) -> Word {
    let mut word = [false; 16];
    for (index, bit) in word.iter_mut().enumerate() {
        *bit = value.get_bit(15 - index);
    }
    word
}

/// Pack a protocol word into a `u16`.
pub fn word_to_u16(word: &Word) -> u16 {
    // At most 16 bits, so the narrowing cannot truncate.
    bits_to_int(word) as u16
}

/// Flip every bit.
pub fn invert(bits: &[bool]) -> Vec<bool> {
    bits.iter().map(|bit| !bit).collect()
}

/// Number of set bits.
pub fn count_ones(bits: &[bool]) -> u32 {
    bits.iter().filter(|&&bit| bit).count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_width() {
        for width in 1..=16 {
            for value in [0u64, 1, 5, 0x5A5A, 0xFFFF] {
                let expected = value & ((1 << width) - 1);
                assert_eq!(bits_to_int(&int_to_bits(value, width)), expected);
            }
        }
        let wide = 0xDEAD_BEEF_0123_4567;
        assert_eq!(bits_to_int(&int_to_bits(wide, 64)), wide);
    }

    #[test]
    fn wide_sequences_are_zero_padded() {
        let bits = int_to_bits(3, 70);
        assert_eq!(bits.len(), 70);
        assert_eq!(count_ones(&bits), 2);
        assert!(bits[..68].iter().all(|bit| !bit));
    }

    #[test]
    fn word_matches_generic_conversion() {
        let word = word_from_u16(0x8583);
        assert_eq!(word.to_vec(), int_to_bits(0x8583, 16));
        assert_eq!(word_to_u16(&word), 0x8583);
    }

    #[test]
    fn empty_sequence_is_zero() {
        assert_eq!(bits_to_int(&[]), 0);
    }

    #[test]
    #[should_panic]
    fn too_long_for_u64() {
        bits_to_int(&[false; 65]);
    }
}
