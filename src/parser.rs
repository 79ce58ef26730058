//! # Parsing
//!
//! A Rocket League game replay is a little endian binary encoded file split
//! into three major sections: a header, a body, and a footer. The header and
//! footer decode byte by byte through [`crate::core_parser::CoreParser`];
//! the body's network stream is an unaligned bit stream handled by the
//! `network` module.
//!
//! Everything is length prefixed, so the network stream (90% of the file)
//! can be skipped entirely when only header data such as player stats and
//! goals is wanted.

use crate::core_parser::CoreParser;
use crate::crc::calc_crc;
use crate::errors::ParseError;
use crate::header::{self, Header};
use crate::models::*;
use crate::network;
use crate::parsing_utils::{le_f32, le_i32};

/// Determines under what circumstances the parser should perform the crc
/// check for replay corruption. Since the crc check is the most time
/// consuming part of parsing, clients choose when it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrcCheck {
    /// Always perform the crc check. Useful when the replay may have had
    /// its contents modified.
    Always,

    /// Never perform the crc check. Useful when it doesn't matter whether
    /// a replay is corrupt; either the data or the parsing error is wanted.
    Never,

    /// Only perform the crc check when parsing a section fails, to
    /// distinguish a decoder bug from a corrupt replay. The default.
    OnError,
}

/// Determines how the parser should handle the network data, which is the
/// most intensive and volatile section of the replay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkParse {
    /// If the network data fails to parse, return an error
    Always,

    /// Skip the network data entirely
    Never,

    /// Attempt to parse the network data, but drop the result on error and
    /// keep the rest of the replay. The default.
    IgnoreOnError,
}

/// The main entry point to parsing replays. Allows one to customize parsing
/// options, such as only parsing the header or forgoing crc checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserBuilder<'a> {
    data: &'a [u8],
    crc_check: Option<CrcCheck>,
    network_parse: Option<NetworkParse>,
}

impl<'a> ParserBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        ParserBuilder {
            data,
            crc_check: None,
            network_parse: None,
        }
    }

    pub fn always_check_crc(self) -> ParserBuilder<'a> {
        self.with_crc_check(CrcCheck::Always)
    }

    pub fn never_check_crc(self) -> ParserBuilder<'a> {
        self.with_crc_check(CrcCheck::Never)
    }

    pub fn on_error_check_crc(self) -> ParserBuilder<'a> {
        self.with_crc_check(CrcCheck::OnError)
    }

    pub fn with_crc_check(mut self, check: CrcCheck) -> ParserBuilder<'a> {
        self.crc_check = Some(check);
        self
    }

    pub fn must_parse_network_data(self) -> ParserBuilder<'a> {
        self.with_network_parse(NetworkParse::Always)
    }

    pub fn never_parse_network_data(self) -> ParserBuilder<'a> {
        self.with_network_parse(NetworkParse::Never)
    }

    pub fn ignore_network_data_on_error(self) -> ParserBuilder<'a> {
        self.with_network_parse(NetworkParse::IgnoreOnError)
    }

    pub fn with_network_parse(mut self, parse: NetworkParse) -> ParserBuilder<'a> {
        self.network_parse = Some(parse);
        self
    }

    pub fn parse(self) -> Result<Replay, ParseError> {
        let mut parser = Parser::new(
            self.data,
            self.crc_check.unwrap_or(CrcCheck::OnError),
            self.network_parse.unwrap_or(NetworkParse::IgnoreOnError),
        );
        parser.parse()
    }
}

/// Intermediate parsing structure for the body / footer
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ReplayBody<'a> {
    pub levels: Vec<String>,
    pub keyframes: Vec<KeyFrame>,
    pub debug_info: Vec<DebugInfo>,
    pub tick_marks: Vec<TickMark>,
    pub packages: Vec<String>,
    pub objects: Vec<String>,
    pub names: Vec<String>,
    pub class_indices: Vec<ClassIndex>,
    pub net_cache: Vec<ClassNetCache>,
    pub network_data: &'a [u8],
}

/// Holds the current state of parsing a replay
#[derive(Debug, Clone, PartialEq)]
struct Parser<'a> {
    core: CoreParser<'a>,
    crc_check: CrcCheck,
    network_parse: NetworkParse,
}

impl<'a> Parser<'a> {
    fn new(data: &'a [u8], crc_check: CrcCheck, network_parse: NetworkParse) -> Self {
        Parser {
            core: CoreParser::new(data),
            crc_check,
            network_parse,
        }
    }

    fn parse(&mut self) -> Result<Replay, ParseError> {
        let header_size = self.core.take_i32("header size")?;
        let header_crc = self.core.take_u32("header crc")?;

        let header_data = self.core.view_data(header_size as usize).map_err(|e| {
            ParseError::ParseError("header data", self.core.bytes_read(), Box::new(e))
        })?;

        let header = self.crc_section(header_data, header_crc, "header", Self::parse_header)?;

        let content_size = self.core.take_i32("content size")?;
        let content_crc = self.core.take_u32("content crc")?;

        let content_data = self.core.view_data(content_size as usize).map_err(|e| {
            ParseError::ParseError("content data", self.core.bytes_read(), Box::new(e))
        })?;

        let body = self.crc_section(content_data, content_crc, "body", Self::parse_body)?;

        let network: Option<NetworkFrames> = match self.network_parse {
            NetworkParse::Always => Some(
                network::parse(&header, &body).map_err(ParseError::NetworkError)?,
            ),
            NetworkParse::IgnoreOnError => network::parse(&header, &body).ok(),
            NetworkParse::Never => None,
        };

        Ok(Replay {
            header_size,
            header_crc,
            major_version: header.major_version,
            minor_version: header.minor_version,
            net_version: header.net_version,
            game_type: header.game_type,
            properties: header.properties,
            content_size,
            content_crc,
            network_frames: network,
            levels: body.levels,
            keyframes: body.keyframes,
            debug_info: body.debug_info,
            tick_marks: body.tick_marks,
            packages: body.packages,
            objects: body.objects,
            names: body.names,
            class_indices: body.class_indices,
            net_cache: body.net_cache,
        })
    }

    fn parse_header(&mut self) -> Result<Header, ParseError> {
        header::parse_header(&mut self.core)
    }

    /// Parses a section and performs a crc check as configured
    fn crc_section<T, F>(
        &mut self,
        data: &[u8],
        crc: u32,
        section: &str,
        mut f: F,
    ) -> Result<T, ParseError>
    where
        F: FnMut(&mut Self) -> Result<T, ParseError>,
    {
        let result = f(self);

        match self.crc_check {
            CrcCheck::Always => {
                let actual = calc_crc(data);
                if actual != crc {
                    Err(ParseError::CrcMismatch(crc, actual))
                } else {
                    result
                }
            }
            CrcCheck::OnError => result.map_err(|e| {
                let actual = calc_crc(data);
                if actual != crc {
                    ParseError::CorruptReplay(String::from(section), Box::new(e))
                } else {
                    e
                }
            }),
            CrcCheck::Never => result,
        }
    }

    fn parse_body(&mut self) -> Result<ReplayBody<'a>, ParseError> {
        let levels = self
            .core
            .text_list()
            .map_err(|e| ParseError::ParseError("levels", self.core.bytes_read(), Box::new(e)))?;

        let keyframes = self.parse_keyframes().map_err(|e| {
            ParseError::ParseError("keyframes", self.core.bytes_read(), Box::new(e))
        })?;

        let network_size = self.core.take_i32("network size")?;
        let network_data = self.core.take_data(network_size as usize).map_err(|e| {
            ParseError::ParseError("network data", self.core.bytes_read(), Box::new(e))
        })?;

        let debug_info = self.parse_debug_info().map_err(|e| {
            ParseError::ParseError("debug info", self.core.bytes_read(), Box::new(e))
        })?;

        let tick_marks = self.parse_tick_marks().map_err(|e| {
            ParseError::ParseError("tickmarks", self.core.bytes_read(), Box::new(e))
        })?;

        let packages = self
            .core
            .text_list()
            .map_err(|e| ParseError::ParseError("packages", self.core.bytes_read(), Box::new(e)))?;
        let objects = self
            .core
            .text_list()
            .map_err(|e| ParseError::ParseError("objects", self.core.bytes_read(), Box::new(e)))?;
        let names = self
            .core
            .text_list()
            .map_err(|e| ParseError::ParseError("names", self.core.bytes_read(), Box::new(e)))?;

        let class_indices = self.parse_class_indices().map_err(|e| {
            ParseError::ParseError("class index", self.core.bytes_read(), Box::new(e))
        })?;

        let net_cache = self.parse_net_cache().map_err(|e| {
            ParseError::ParseError("net cache", self.core.bytes_read(), Box::new(e))
        })?;

        Ok(ReplayBody {
            levels,
            keyframes,
            debug_info,
            tick_marks,
            packages,
            objects,
            names,
            class_indices,
            net_cache,
            network_data,
        })
    }

    fn parse_keyframes(&mut self) -> Result<Vec<KeyFrame>, ParseError> {
        self.core.list_of(|s| {
            Ok(KeyFrame {
                time: s.take(4, le_f32)?,
                frame: s.take(4, le_i32)?,
                position: s.take(4, le_i32)?,
            })
        })
    }

    fn parse_debug_info(&mut self) -> Result<Vec<DebugInfo>, ParseError> {
        self.core.list_of(|s| {
            Ok(DebugInfo {
                frame: s.take(4, le_i32)?,
                user: s.parse_text()?,
                text: s.parse_text()?,
            })
        })
    }

    fn parse_tick_marks(&mut self) -> Result<Vec<TickMark>, ParseError> {
        self.core.list_of(|s| {
            Ok(TickMark {
                description: s.parse_text()?,
                frame: s.take(4, le_i32)?,
            })
        })
    }

    fn parse_class_indices(&mut self) -> Result<Vec<ClassIndex>, ParseError> {
        self.core.list_of(|s| {
            Ok(ClassIndex {
                class: s.parse_str().map(String::from)?,
                index: s.take(4, le_i32)?,
            })
        })
    }

    fn parse_net_cache(&mut self) -> Result<Vec<ClassNetCache>, ParseError> {
        self.core.list_of(|s| {
            Ok(ClassNetCache {
                object_ind: s.take(4, le_i32)?,
                parent_id: s.take(4, le_i32)?,
                cache_id: s.take(4, le_i32)?,
                properties: s.list_of(|p| {
                    Ok(CacheProp {
                        object_ind: p.take(4, le_i32)?,
                        stream_id: p.take(4, le_i32)?,
                    })
                })?,
            })
        })
    }
}

/// Parse a replay with default options: crc checked only when a section
/// fails, network data dropped on error.
pub fn parse(data: &[u8]) -> Result<Replay, ParseError> {
    ParserBuilder::new(data).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_replay() {
        assert!(ParserBuilder::new(&[]).never_check_crc().parse().is_err());
    }

    #[test]
    fn parse_header_too_large() {
        // header length claims more data than the replay holds
        let data = [0xff, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
        let err = ParserBuilder::new(&data).never_check_crc().parse().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Could not decode replay header data at offset (8): Insufficient data. Expected 255 bytes, but only 0 left"
        );
    }

    #[test]
    fn keyframe_list_parses() {
        let mut data = 2i32.to_le_bytes().to_vec();
        for frame in 0..2 {
            data.extend(1.5f32.to_le_bytes());
            data.extend((frame as i32).to_le_bytes());
            data.extend(100i32.to_le_bytes());
        }

        let mut parser = Parser::new(&data, CrcCheck::Never, NetworkParse::Never);
        let frames = parser.parse_keyframes().unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(
            frames[1],
            KeyFrame {
                time: 1.5,
                frame: 1,
                position: 100,
            }
        );
    }

    #[test]
    fn net_cache_list_parses() {
        let mut data = 1i32.to_le_bytes().to_vec();
        data.extend(40i32.to_le_bytes()); // object
        data.extend(20i32.to_le_bytes()); // parent id
        data.extend(38i32.to_le_bytes()); // cache id
        data.extend(1i32.to_le_bytes()); // one property
        data.extend(42i32.to_le_bytes());
        data.extend(6i32.to_le_bytes());

        let mut parser = Parser::new(&data, CrcCheck::Never, NetworkParse::Never);
        let cache = parser.parse_net_cache().unwrap();
        assert_eq!(
            cache,
            vec![ClassNetCache {
                object_ind: 40,
                parent_id: 20,
                cache_id: 38,
                properties: vec![CacheProp {
                    object_ind: 42,
                    stream_id: 6,
                }],
            }]
        );
    }
}
