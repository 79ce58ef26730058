use crate::errors::ParseError;
use crate::parsing_utils::{decode_str, decode_utf16, decode_windows1252, le_i32};

/// A cursor over the byte oriented sections of a replay (everything except
/// the network stream).
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CoreParser<'a> {
    data: &'a [u8],

    /// Current offset in regards to the whole view of the replay
    col: i32,
}

impl<'a> CoreParser<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        CoreParser { data, col: 0 }
    }

    pub fn bytes_read(&self) -> i32 {
        self.col
    }

    fn advance(&mut self, ind: usize) {
        self.col += ind as i32;
        self.data = &self.data[ind..];
    }

    /// Returns a slice of the replay after ensuring there is enough space
    /// for the requested slice
    pub fn view_data(&self, size: usize) -> Result<&'a [u8], ParseError> {
        if size > self.data.len() {
            Err(ParseError::InsufficientData(
                size as i32,
                self.data.len() as i32,
            ))
        } else {
            Ok(&self.data[..size])
        }
    }

    pub fn take_data(&mut self, size: usize) -> Result<&'a [u8], ParseError> {
        let res = self.view_data(size)?;
        self.advance(size);
        Ok(res)
    }

    /// Take the next `size` bytes and interpret them in an infallible fashion
    #[inline]
    pub fn take<F, T>(&mut self, size: usize, mut f: F) -> Result<T, ParseError>
    where
        F: FnMut(&'a [u8]) -> T,
    {
        let res = f(self.view_data(size)?);
        self.advance(size);
        Ok(res)
    }

    pub fn take_i32(&mut self, section: &'static str) -> Result<i32, ParseError> {
        self.take(4, le_i32)
            .map_err(|e| ParseError::ParseError(section, self.bytes_read(), Box::new(e)))
    }

    pub fn take_u32(&mut self, section: &'static str) -> Result<u32, ParseError> {
        self.take_i32(section).map(|x| x as u32)
    }

    /// Hands back a sub-parser restricted to the next `size` bytes, advancing
    /// this parser past them. Sized header property values decode through
    /// this so a short value cannot bleed into its successor.
    pub fn scope(&mut self, size: usize) -> Result<CoreParser<'a>, ParseError> {
        let col = self.col;
        let data = self.take_data(size)?;
        Ok(CoreParser { data, col })
    }

    /// Repeatedly parse the same element until `size` elements are parsed
    pub fn repeat<F, T>(size: usize, mut f: F) -> Result<Vec<T>, ParseError>
    where
        F: FnMut() -> Result<T, ParseError>,
    {
        if size > 25_000 {
            return Err(ParseError::ListTooLarge(size));
        }

        let mut res = Vec::with_capacity(size);
        for _ in 0..size {
            res.push(f()?);
        }
        Ok(res)
    }

    pub fn list_of<F, T>(&mut self, mut f: F) -> Result<Vec<T>, ParseError>
    where
        F: FnMut(&mut Self) -> Result<T, ParseError>,
    {
        let size = self.take(4, le_i32)?;
        CoreParser::repeat(size as usize, || f(self))
    }

    pub fn text_list(&mut self) -> Result<Vec<String>, ParseError> {
        self.list_of(CoreParser::parse_text)
    }

    /// Parses a length prefixed UTF-8 string
    pub fn parse_str(&mut self) -> Result<&'a str, ParseError> {
        let mut size = self.take(4, le_i32)? as usize;

        // One replay in the wild lists a property name with a length of
        // 0x5000000 when it's really the `\0\0\0None` property. The anomaly
        // is repaired instead of rejected, but never silently.
        if size == 0x0500_0000 {
            tracing::warn!(
                offset = self.bytes_read(),
                "corrupt string length 0x05000000 replaced with 8"
            );
            size = 8;
        }
        self.take_data(size).and_then(decode_str)
    }

    /// Parses either a UTF-16 or Windows-1252 encoded string. A negative
    /// length prefix means UTF-16 with two bytes per unit; positive means
    /// Windows-1252.
    pub fn parse_text(&mut self) -> Result<String, ParseError> {
        let characters = self.take(4, le_i32)?;

        // characters.abs() panics at i32::MIN, so check ranges manually
        if characters == 0 {
            Err(ParseError::ZeroSize)
        } else if !(-10_000..=10_000).contains(&characters) {
            Err(ParseError::TextTooLarge(characters))
        } else if characters < 0 {
            let size = characters * -2;
            self.take_data(size as usize).and_then(decode_utf16)
        } else {
            self.take_data(characters as usize)
                .and_then(decode_windows1252)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ParseError;

    fn str16(text: &str) -> Vec<u8> {
        let mut out = ((text.len() + 1) as i32).to_le_bytes().to_vec();
        out.extend_from_slice(text.as_bytes());
        out.push(0);
        out
    }

    #[test]
    fn parse_windows1252_text() {
        let data = str16("TAGame.Replay_Soccar_TA");
        let mut parser = CoreParser::new(&data);
        assert_eq!(parser.parse_text().unwrap(), "TAGame.Replay_Soccar_TA");
        assert_eq!(parser.bytes_read(), data.len() as i32);
    }

    #[test]
    fn parse_text_negative_length_is_utf16() {
        // length -4 reads 8 bytes of UTF-16LE (last unit is the terminator)
        let mut data = (-4i32).to_le_bytes().to_vec();
        data.extend_from_slice(&[b'h', 0x00, b'i', 0x00, b'!', 0x00, 0x00, 0x00]);
        let mut parser = CoreParser::new(&data);
        assert_eq!(parser.parse_text().unwrap(), "hi!");
    }

    #[test]
    fn parse_text_zero_size() {
        let mut parser = CoreParser::new(&[0, 0, 0, 0, 0]);
        assert_eq!(parser.parse_text().unwrap_err(), ParseError::ZeroSize);
    }

    #[test]
    fn parse_text_too_large() {
        let mut parser = CoreParser::new(&[0xcc, 0xcc, 0xcc, 0xcc, 0xcc]);
        assert_eq!(
            parser.parse_text().unwrap_err(),
            ParseError::TextTooLarge(-858993460)
        );
    }

    #[test]
    fn parse_str_insufficient() {
        let data = str16("text");
        let mut parser = CoreParser::new(&data[..data.len() - 1]);
        assert_eq!(
            parser.parse_str().unwrap_err(),
            ParseError::InsufficientData(5, 4)
        );
    }

    #[test]
    fn parse_str_corrupt_length_repair() {
        let mut data = 0x0500_0000i32.to_le_bytes().to_vec();
        data.extend_from_slice(&[0, 0, 0, b'N', b'o', b'n', b'e', 0]);
        let mut parser = CoreParser::new(&data);
        assert_eq!(parser.parse_str().unwrap(), "\0\0\0None");
    }

    #[test]
    fn parse_invalid_utf16_is_lossy() {
        let data = [0xfd, 0xff, 0xff, 0xff, 0xd8, 0xd8, 0x00, 0x00, 0x00, 0x00];
        let mut parser = CoreParser::new(&data);
        assert_eq!(parser.parse_text().unwrap(), "\u{fffd}\u{0}");
    }

    #[test]
    fn scope_does_not_bleed() {
        let mut data = str16("ab");
        data.push(0xff);
        let mut parser = CoreParser::new(&data);
        let mut scoped = parser.scope(data.len() - 1).unwrap();
        assert_eq!(scoped.parse_text().unwrap(), "ab");
        assert_eq!(parser.take(1, |d| d[0]).unwrap(), 0xff);
    }
}
