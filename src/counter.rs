use crate::error::Error;

/// Encodes a positive block counter as exactly `size` little-endian bytes.
///
/// Whole 32-bit words are written first, then any trailing 1-3 bytes one at
/// a time, always consuming the low-order bits of `n` first. Widths larger
/// than 16 bytes are zero-padded.
pub fn encode_counter(n: u128, size: usize) -> Result<Vec<u8>, Error> {
    let mut out = vec![0u8; size];
    encode_counter_into(n, &mut out)?;
    Ok(out)
}

/// Same as [`encode_counter`], writing into a caller-provided buffer whose
/// length is the target width. The buffer contents are unspecified on error.
pub fn encode_counter_into(mut n: u128, out: &mut [u8]) -> Result<(), Error> {
    // A zero counter means the generator was never seeded.
    if n == 0 {
        return Err(Error::InvalidCounter);
    }

    let size = out.len();
    let (words, tail) = out.split_at_mut(size & !3);

    for word in words.chunks_exact_mut(4) {
        word.copy_from_slice(&((n & 0xFFFF_FFFF) as u32).to_le_bytes());
        n >>= 32;
    }
    for byte in tail.iter_mut() {
        *byte = (n & 0xFF) as u8;
        n >>= 8;
    }

    if n != 0 {
        return Err(Error::Overflow { size });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_one_in_block_width() {
        let out = encode_counter(1, 16).unwrap();
        let mut expected = [0u8; 16];
        expected[0] = 1;
        assert_eq!(out, expected);
    }

    #[test]
    fn test_zero_is_invalid() {
        assert!(matches!(encode_counter(0, 4), Err(Error::InvalidCounter)));
        assert!(matches!(encode_counter(0, 16), Err(Error::InvalidCounter)));
    }

    #[test]
    fn test_overflow_word_width() {
        assert!(matches!(
            encode_counter(1 << 32, 4),
            Err(Error::Overflow { size: 4 })
        ));
        assert_eq!(encode_counter(0xFFFF_FFFF, 4).unwrap(), [0xFF; 4]);
    }

    #[test]
    fn test_word_then_tail_bytes() {
        // 6 bytes: one 32-bit word followed by two single bytes
        let out = encode_counter(0x0605_0403_0201, 6).unwrap();
        assert_eq!(out, [0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);
        assert!(matches!(
            encode_counter(0x07_0605_0403_0201, 6),
            Err(Error::Overflow { size: 6 })
        ));
    }

    #[test]
    fn test_tail_only_width() {
        assert_eq!(encode_counter(0x0302, 3).unwrap(), [0x02, 0x03, 0x00]);
        assert!(matches!(
            encode_counter(0x0100_0000, 3),
            Err(Error::Overflow { size: 3 })
        ));
    }

    #[test]
    fn test_zero_width_always_overflows() {
        assert!(matches!(
            encode_counter(1, 0),
            Err(Error::Overflow { size: 0 })
        ));
    }

    #[test]
    fn test_max_counter_fills_block() {
        assert_eq!(encode_counter(u128::MAX, 16).unwrap(), [0xFF; 16]);
    }

    #[test]
    fn test_wide_output_is_zero_padded() {
        let out = encode_counter(u128::MAX, 20).unwrap();
        assert_eq!(&out[..16], &[0xFF; 16]);
        assert_eq!(&out[16..], &[0u8; 4]);
    }

    proptest! {
        #[test]
        fn prop_block_width_matches_le_bytes(n in 1u128..) {
            prop_assert_eq!(encode_counter(n, 16).unwrap(), n.to_le_bytes().to_vec());
        }

        #[test]
        fn prop_fits_iff_no_high_bits(n in 1u128..(1u128 << 64), size in 1usize..=8) {
            let fits = n >> (size * 8) == 0;
            match encode_counter(n, size) {
                Ok(out) => {
                    prop_assert!(fits);
                    prop_assert_eq!(out.as_slice(), &n.to_le_bytes()[..size]);
                }
                Err(Error::Overflow { size: s }) => {
                    prop_assert!(!fits);
                    prop_assert_eq!(s, size);
                }
                Err(e) => prop_assert!(false, "unexpected error: {}", e),
            }
        }
    }
}
