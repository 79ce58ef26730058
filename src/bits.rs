use bitter::{BitReader, LittleEndianReader};

#[inline]
pub(crate) const fn bit_width(input: u64) -> u32 {
    (core::mem::size_of::<u64>() as u32) * 8 - input.leading_zeros()
}

/// Replay specific reads layered over the raw bit reader.
pub(crate) trait ReplayBits {
    /// The bounded magnitude read used for sizes, stream ids, and actor ids.
    ///
    /// Reads `bits` bits as `d` and forms `u = d + (1 << bits)`. When `u`
    /// is still strictly under `max`, one continuation bit decides between
    /// `u` and `d`; at or past `max`, `d` is the only candidate and the
    /// continuation bit is left unread. The result never exceeds `max`.
    fn read_bits_max(&mut self, bits: u32, max: u64) -> Option<u64>;

    fn if_get<T, F>(&mut self, f: F) -> Option<Option<T>>
    where
        F: FnMut(&mut Self) -> Option<T>;
}

impl<'a> ReplayBits for LittleEndianReader<'a> {
    #[inline]
    fn read_bits_max(&mut self, bits: u32, max: u64) -> Option<u64> {
        debug_assert!(core::cmp::max(bit_width(max), 1) == bits + 1);
        let data = self.read_bits(bits)?;
        let up = data + (1 << bits);
        if up >= max {
            Some(data)
        } else {
            self.read_bit().map(|extend| if extend { up } else { data })
        }
    }

    #[inline]
    fn if_get<T, F>(&mut self, mut f: F) -> Option<Option<T>>
    where
        F: FnMut(&mut Self) -> Option<T>,
    {
        self.read_bit()
            .and_then(|bit| if bit { f(self).map(Some) } else { Some(None) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_width() {
        assert_eq!(bit_width(0), 0);
        assert_eq!(bit_width(1), 1);
        assert_eq!(bit_width(14), 4);
        assert_eq!(bit_width(20), 5);
        assert_eq!(bit_width(1023), 10);
    }

    #[test]
    fn unaligned_byte_fill_order() {
        // bytes fill the scratch above the current bit position and reads
        // consume from the low end
        let mut bits = LittleEndianReader::new(&[0x69, 0xd1]);
        assert_eq!(bits.read_bits(5), Some(9));
        assert_eq!(bits.read_bits(8), Some(0x8b));
        assert_eq!(bits.read_bits(3), Some(6));
        assert!(bits.is_empty());
    }

    #[test]
    fn single_bit_reads_reassemble_bytes() {
        let data = [0x12, 0xfe, 0x07];
        let mut bits = LittleEndianReader::new(&data);
        let mut out = [0u8; 3];
        for byte in 0..3 {
            for bit in 0..8 {
                if bits.read_bit().unwrap() {
                    out[byte] |= 1 << bit;
                }
            }
        }
        assert_eq!(out, data);
    }

    #[test]
    fn bounded_read_over_max_skips_continuation() {
        // 1101 encodes 13; 13 + 16 > 20 so the trailing bit stays unread
        let mut bits = LittleEndianReader::new(&[0b0001_1101]);
        assert_eq!(bits.read_bits_max(4, 20), Some(13));
        assert_eq!(bits.read_bit(), Some(true));
    }

    #[test]
    fn bounded_read_extends_under_max() {
        // 0100 encodes 2; 2 + 16 < 20 and the continuation bit is set
        let mut bits = LittleEndianReader::new(&[0b0001_0010]);
        assert_eq!(bits.read_bits_max(4, 20), Some(18));
    }

    #[test]
    fn bounded_read_at_max_skips_continuation() {
        // 0010 encodes 4; 4 + 16 reaches the exclusive bound of 20, so the
        // wire never writes a continuation bit there and none is read
        let mut bits = LittleEndianReader::new(&[0b0001_0100]);
        assert_eq!(bits.read_bits_max(4, 20), Some(4));
        assert_eq!(bits.read_bit(), Some(true));
    }

    #[test]
    fn bounded_read_unset_continuation_keeps_raw_value() {
        let mut bits = LittleEndianReader::new(&[0b0000_0010]);
        assert_eq!(bits.read_bits_max(4, 20), Some(2));
    }

    #[test]
    fn bounded_read_never_exceeds_max() {
        for byte in 0..=255u8 {
            let data = [byte];
            let mut bits = LittleEndianReader::new(&data);
            if let Some(val) = bits.read_bits_max(4, 20) {
                assert!(val <= 20);
            }
        }
    }
}
