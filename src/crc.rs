mod table {
    include!(concat!(env!("OUT_DIR"), "/crc_table.rs"));
}

use table::CRC_TABLE;

/// The crc-32 used by Rocket League replay sections. Not all CRC algorithms
/// are the same; this one is described by (pycrc notation):
///
/// - `Width` = 32
/// - `Poly` = 0x04c11db7
/// - `XorIn` = 0x10340dfe
/// - `ReflectIn` = False
/// - `XorOut` = 0xffffffff
/// - `ReflectOut` = False
///
/// Implemented as a slice-by-16 over the table emitted by the build script.
pub fn calc_crc(data: &[u8]) -> u32 {
    let mut crc = !(0xefcb_f201_u32.swap_bytes());

    let mut chunks = data.chunks_exact(16);
    for chunk in &mut chunks {
        let head = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]) ^ crc;
        crc = CRC_TABLE[12][((head >> 24) & 0xff) as usize]
            ^ CRC_TABLE[13][((head >> 16) & 0xff) as usize]
            ^ CRC_TABLE[14][((head >> 8) & 0xff) as usize]
            ^ CRC_TABLE[15][(head & 0xff) as usize];
        for (slice, &byte) in chunk[4..].iter().rev().enumerate() {
            crc ^= CRC_TABLE[slice][byte as usize];
        }
    }

    crc = chunks.remainder().iter().fold(crc, |acc, &byte| {
        (acc >> 8) ^ CRC_TABLE[0][(u32::from(byte) ^ (acc & 0xff)) as usize]
    });

    (!crc).swap_bytes()
}

#[cfg(test)]
mod tests {
    use super::calc_crc;

    #[test]
    fn single_byte() {
        assert_eq!(calc_crc(&[0xa0]), 0x76cc_8c81);
    }

    #[test]
    fn crc_spans_slices() {
        // 17 bytes exercises both the slice-by-16 body and the tail loop
        let data: Vec<u8> = (0..17).collect();
        assert_ne!(calc_crc(&data), calc_crc(&data[..16]));
    }
}
