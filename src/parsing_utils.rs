use crate::errors::ParseError;
use encoding_rs::{UTF_16LE, WINDOWS_1252};

#[inline]
pub(crate) fn le_i32(d: &[u8]) -> i32 {
    i32::from_le_bytes([d[0], d[1], d[2], d[3]])
}

#[inline]
pub(crate) fn le_f32(d: &[u8]) -> f32 {
    f32::from_le_bytes([d[0], d[1], d[2], d[3]])
}

#[inline]
pub(crate) fn le_u64(d: &[u8]) -> u64 {
    u64::from_le_bytes([d[0], d[1], d[2], d[3], d[4], d[5], d[6], d[7]])
}

/// Decodes a length prefixed, null terminated UTF-8 string. The input
/// includes the null terminator, which is dropped. It may seem redundant to
/// both length prefix and null terminate, but stackoverflow contains a nice
/// reasoning for why it may have been done this way:
/// <http://stackoverflow.com/q/6293457/433785>
pub(crate) fn decode_str(input: &[u8]) -> Result<&str, ParseError> {
    if input.is_empty() {
        Err(ParseError::ZeroSize)
    } else {
        Ok(std::str::from_utf8(&input[..input.len() - 1])?)
    }
}

/// Decodes UTF-16LE, dropping the two byte null terminator.
pub(crate) fn decode_utf16(input: &[u8]) -> Result<String, ParseError> {
    if input.len() < 2 {
        Err(ParseError::ZeroSize)
    } else {
        let (s, _) = UTF_16LE.decode_without_bom_handling(&input[..input.len() - 2]);
        Ok(s.into_owned())
    }
}

/// Decodes Windows-1252, dropping the null terminator.
pub(crate) fn decode_windows1252(input: &[u8]) -> Result<String, ParseError> {
    if input.is_empty() {
        Err(ParseError::ZeroSize)
    } else {
        let (s, _) = WINDOWS_1252.decode_without_bom_handling(&input[..input.len() - 1]);
        Ok(s.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utf8_drops_terminator() {
        let data = [b'N', b'o', b'n', b'e', 0x00];
        assert_eq!(decode_str(&data).unwrap(), "None");
    }

    #[test]
    fn utf16_little_endian() {
        let data = [0x23, 0x26, b'D', 0x00, 0x00, 0x00];
        assert_eq!(decode_utf16(&data).unwrap(), "\u{2623}D");
    }

    #[test]
    fn windows1252_high_bytes() {
        let data = [b'a', 0xb3, 0x00];
        assert_eq!(decode_windows1252(&data).unwrap(), "a\u{b3}");
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(decode_str(&[]).is_err());
        assert!(decode_utf16(&[0x00]).is_err());
        assert!(decode_windows1252(&[]).is_err());
    }
}
