use crate::core_parser::CoreParser;
use crate::errors::ParseError;
use crate::models::HeaderProp;
use crate::parsing_utils::{le_f32, le_i32, le_u64};

/// Intermediate parsing structure for the header
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Header {
    pub major_version: i32,
    pub minor_version: i32,
    pub net_version: Option<i32>,
    pub game_type: String,
    pub properties: Vec<(String, HeaderProp)>,
}

impl Header {
    fn find_prop(&self, key: &str) -> Option<&HeaderProp> {
        self.properties
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, prop)| prop)
    }

    pub fn num_frames(&self) -> Option<i32> {
        self.find_prop("NumFrames").and_then(HeaderProp::as_i32)
    }

    pub fn max_channels(&self) -> Option<i32> {
        self.find_prop("MaxChannels").and_then(HeaderProp::as_i32)
    }

    pub fn match_type(&self) -> Option<&str> {
        self.find_prop("MatchType").and_then(HeaderProp::as_string)
    }

    pub fn build_version(&self) -> Option<&str> {
        self.find_prop("BuildVersion")
            .and_then(HeaderProp::as_string)
    }
}

pub(crate) fn parse_header(rlp: &mut CoreParser) -> Result<Header, ParseError> {
    let major_version = rlp.take_i32("major version")?;
    let minor_version = rlp.take_i32("minor version")?;
    let net_version = if major_version >= 866 && minor_version >= 18 {
        Some(rlp.take_i32("net version")?)
    } else {
        None
    };

    let mode = match (major_version, minor_version, net_version) {
        (0, 0, None) => ParserMode::Quirks,
        _ => ParserMode::Standard,
    };

    let game_type = rlp
        .parse_text()
        .map_err(|e| ParseError::ParseError("game type", rlp.bytes_read(), Box::new(e)))?;

    let properties = parse_rdict(rlp, mode)
        .map_err(|e| ParseError::ParseError("header properties", rlp.bytes_read(), Box::new(e)))?;

    Ok(Header {
        major_version,
        minor_version,
        net_version,
        game_type,
        properties,
    })
}

/// Replays with a zeroed version decode a handful of properties differently
#[derive(Clone, Copy)]
enum ParserMode {
    Standard,
    Quirks,
}

/// Byte properties that carry the platform in the kind slot and omit the
/// value entirely
const VALUELESS_BYTE_KINDS: [&str; 2] = ["OnlinePlatform_Steam", "OnlinePlatform_PS4"];

fn parse_rdict(
    rlp: &mut CoreParser,
    mode: ParserMode,
) -> Result<Vec<(String, HeaderProp)>, ParseError> {
    let mut res: Vec<_> = Vec::new();
    loop {
        let key = rlp.parse_str()?;
        if key == "None" {
            break;
        }

        let kind = rlp.parse_str()?;
        let size = rlp.take(8, le_u64)? as usize;
        let val = match kind {
            "BoolProperty" => match mode {
                // The size field SHOULD be zero for bools, so ignore it
                ParserMode::Standard => rlp.take(1, bool_prop),
                ParserMode::Quirks => rlp.take(4, bool_prop),
            },
            "ByteProperty" => match mode {
                ParserMode::Standard => {
                    let kind = rlp.parse_str().map(String::from)?;
                    let value = if VALUELESS_BYTE_KINDS.contains(&kind.as_str()) {
                        None
                    } else {
                        rlp.parse_str().map(String::from).map(Some)?
                    };
                    Ok(HeaderProp::Byte { kind, value })
                }
                ParserMode::Quirks => rlp
                    .scope(size)
                    .and_then(|mut x| x.parse_text())
                    .map(|kind| HeaderProp::Byte { kind, value: None }),
            },
            "ArrayProperty" => rlp
                .scope(size)
                .and_then(|mut x| array_property(&mut x, mode)),
            "FloatProperty" => rlp
                .scope(size)
                .and_then(|mut x| x.take(4, le_f32))
                .map(HeaderProp::Float),
            "IntProperty" => rlp
                .scope(size)
                .and_then(|mut x| x.take(4, le_i32))
                .map(HeaderProp::Int),
            "QWordProperty" => rlp
                .scope(size)
                .and_then(|mut x| x.take(8, le_u64))
                .map(HeaderProp::QWord),
            "NameProperty" => rlp
                .scope(size)
                .and_then(|mut x| x.parse_text())
                .map(HeaderProp::Name),
            "StrProperty" => rlp
                .scope(size)
                .and_then(|mut x| x.parse_text())
                .map(HeaderProp::Str),
            x => Err(ParseError::UnexpectedProperty(String::from(x))),
        }?;

        res.push((String::from(key), val));
    }

    Ok(res)
}

fn bool_prop(data: &[u8]) -> HeaderProp {
    HeaderProp::Bool(data[0] == 1)
}

fn array_property(rlp: &mut CoreParser, mode: ParserMode) -> Result<HeaderProp, ParseError> {
    let size = rlp.take_i32("array property size")?;
    let arr = CoreParser::repeat(size as usize, || parse_rdict(rlp, mode))?;
    Ok(HeaderProp::Array(arr))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn str8(text: &str) -> Vec<u8> {
        let mut out = ((text.len() + 1) as i32).to_le_bytes().to_vec();
        out.extend_from_slice(text.as_bytes());
        out.push(0);
        out
    }

    fn prop(name: &str, kind: &str, size: u64, value: &[u8]) -> Vec<u8> {
        let mut out = str8(name);
        out.extend(str8(kind));
        out.extend(size.to_le_bytes());
        out.extend_from_slice(value);
        out
    }

    const NONE: [u8; 9] = [0x05, 0x00, 0x00, 0x00, b'N', b'o', b'n', b'e', 0x00];

    #[test]
    fn rdict_no_elements() {
        let mut parser = CoreParser::new(&NONE);
        let res = parse_rdict(&mut parser, ParserMode::Standard).unwrap();
        assert_eq!(res, Vec::new());
    }

    #[test]
    fn rdict_one_int_element() {
        let mut data = prop("NumFrames", "IntProperty", 4, &100i32.to_le_bytes());
        data.extend(NONE);
        let mut parser = CoreParser::new(&data);
        let res = parse_rdict(&mut parser, ParserMode::Standard).unwrap();
        assert_eq!(res, vec![(String::from("NumFrames"), HeaderProp::Int(100))]);
    }

    #[test]
    fn rdict_one_str_element() {
        let mut data = prop("PlayerName", "StrProperty", 11, &str8("comagoosie"));
        data.extend(NONE);
        let mut parser = CoreParser::new(&data);
        let res = parse_rdict(&mut parser, ParserMode::Standard).unwrap();
        assert_eq!(
            res,
            vec![(
                String::from("PlayerName"),
                HeaderProp::Str(String::from("comagoosie"))
            )]
        );
    }

    #[test]
    fn rdict_one_bool_element() {
        let mut data = prop("bBot", "BoolProperty", 0, &[0]);
        data.extend(NONE);
        let mut parser = CoreParser::new(&data);
        let res = parse_rdict(&mut parser, ParserMode::Standard).unwrap();
        assert_eq!(res, vec![(String::from("bBot"), HeaderProp::Bool(false))]);
    }

    #[test]
    fn rdict_byte_with_value() {
        let mut value = str8("OnlinePlatform");
        value.extend(str8("OnlinePlatform_Epic"));
        let mut data = prop("Platform", "ByteProperty", value.len() as u64, &value);
        data.extend(NONE);
        let mut parser = CoreParser::new(&data);
        let res = parse_rdict(&mut parser, ParserMode::Standard).unwrap();
        assert_eq!(
            res,
            vec![(
                String::from("Platform"),
                HeaderProp::Byte {
                    kind: String::from("OnlinePlatform"),
                    value: Some(String::from("OnlinePlatform_Epic")),
                }
            )]
        );
    }

    #[test]
    fn rdict_byte_platform_in_kind_slot() {
        // Steam/PS4 platforms occupy the kind slot with nothing after
        let mut data = prop("Platform", "ByteProperty", 0, &str8("OnlinePlatform_Steam"));
        data.extend(prop("NumFrames", "IntProperty", 4, &7i32.to_le_bytes()));
        data.extend(NONE);
        let mut parser = CoreParser::new(&data);
        let res = parse_rdict(&mut parser, ParserMode::Standard).unwrap();
        assert_eq!(
            res,
            vec![
                (
                    String::from("Platform"),
                    HeaderProp::Byte {
                        kind: String::from("OnlinePlatform_Steam"),
                        value: None,
                    }
                ),
                (String::from("NumFrames"), HeaderProp::Int(7)),
            ]
        );
    }

    #[test]
    fn rdict_one_qword_element() {
        let mut data = prop(
            "OnlineID",
            "QWordProperty",
            8,
            &76561198101748375u64.to_le_bytes(),
        );
        data.extend(NONE);
        let mut parser = CoreParser::new(&data);
        let res = parse_rdict(&mut parser, ParserMode::Standard).unwrap();
        assert_eq!(
            res,
            vec![(
                String::from("OnlineID"),
                HeaderProp::QWord(76561198101748375)
            )]
        );
    }

    #[test]
    fn rdict_one_array_element() {
        let mut inner = prop("frame", "IntProperty", 4, &441i32.to_le_bytes());
        inner.extend(NONE);

        let mut value = 1i32.to_le_bytes().to_vec();
        value.extend(&inner);
        let mut data = prop("Goals", "ArrayProperty", value.len() as u64, &value);
        data.extend(NONE);

        let mut parser = CoreParser::new(&data);
        let res = parse_rdict(&mut parser, ParserMode::Standard).unwrap();
        assert_eq!(
            res,
            vec![(
                String::from("Goals"),
                HeaderProp::Array(vec![vec![(String::from("frame"), HeaderProp::Int(441))]])
            )]
        );
    }

    #[test]
    fn rdict_unrecognized_property() {
        let mut data = prop("Oops", "BiteProperty", 0, &[]);
        data.extend(NONE);
        let mut parser = CoreParser::new(&data);
        let res = parse_rdict(&mut parser, ParserMode::Standard).unwrap_err();
        assert_eq!(
            res.to_string(),
            String::from("Did not expect a property of: BiteProperty")
        );
    }
}
