use crate::network::{ActorId, Frame, NewActor, ObjectId, StreamId, UpdatedAttribute};
use fnv::FnvHashMap;
use std::error::Error;
use std::fmt;

/// Errors from the byte oriented sections of the replay: the header, the
/// body length fields, and the footer.
#[derive(PartialEq, Debug, Clone)]
pub enum ParseError {
    /// A size of zero is not valid for any string or list in a replay
    ZeroSize,

    /// A string contained invalid UTF-8
    Utf8Error(std::str::Utf8Error),

    /// More data was needed than remains in the replay
    InsufficientData(i32, i32),

    /// A string length outside the plausible range for replay text
    TextTooLarge(i32),

    /// A list length outside the plausible range for replay lists
    ListTooLarge(usize),

    /// A header property with an unrecognized type tag
    UnexpectedProperty(String),

    /// The stored crc did not match the computed crc
    CrcMismatch(u32, u32),

    /// A section failed to parse and its crc check also failed
    CorruptReplay(String, Box<ParseError>),

    /// A named section failed to parse at the given byte offset
    ParseError(&'static str, i32, Box<ParseError>),

    /// The network stream failed to decode
    NetworkError(NetworkError),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::ZeroSize => write!(f, "A size of zero is not valid"),
            ParseError::Utf8Error(e) => write!(f, "Unable decode data as utf8: {}", e),
            ParseError::InsufficientData(expected, left) => write!(
                f,
                "Insufficient data. Expected {} bytes, but only {} left",
                expected, left
            ),
            ParseError::TextTooLarge(size) => write!(f, "Text of size {} is too large", size),
            ParseError::ListTooLarge(size) => write!(f, "list of size {} is too large", size),
            ParseError::UnexpectedProperty(prop) => {
                write!(f, "Did not expect a property of: {}", prop)
            }
            ParseError::CrcMismatch(expected, actual) => write!(
                f,
                "Crc mismatch. Expected {} but received {}",
                expected, actual
            ),
            ParseError::CorruptReplay(section, _) => write!(
                f,
                "Failed to parse {} and crc check failed. Replay is corrupt",
                section
            ),
            ParseError::ParseError(section, offset, error) => write!(
                f,
                "Could not decode replay {} at offset ({}): {}",
                section, offset, error
            ),
            ParseError::NetworkError(e) => write!(f, "{}", e),
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ParseError::Utf8Error(e) => Some(e),
            ParseError::CorruptReplay(_, e) => Some(e),
            ParseError::ParseError(_, _, e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::str::Utf8Error> for ParseError {
    fn from(e: std::str::Utf8Error) -> Self {
        ParseError::Utf8Error(e)
    }
}

/// Errors from decoding the network stream as a whole
#[derive(PartialEq, Debug, Clone)]
pub enum NetworkError {
    NotEnoughDataFor(&'static str),

    /// The header advertised more frames than the network data could hold
    TooManyFrames(i32),

    /// A class net cache property referenced an object outside the object table
    ObjectIdOutOfRange(ObjectId),

    /// A class net cache entry carried a stream id no real class reaches
    StreamIdOutOfRange(StreamId),

    /// All frames decoded, yet more than a byte's padding of bits remain
    TrailingBits(usize),

    /// A frame failed to decode. The context snapshots the decoder state so
    /// that failures deep in a replay can be diagnosed.
    FrameError(FrameError, Box<FrameContext>),
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::NotEnoughDataFor(section) => {
                write!(f, "Not enough data to decode {}", section)
            }
            NetworkError::TooManyFrames(size) => write!(f, "Too many frames to decode: {}", size),
            NetworkError::ObjectIdOutOfRange(obj) => {
                write!(f, "Object Id of {} exceeds range", obj)
            }
            NetworkError::StreamIdOutOfRange(stream) => {
                write!(f, "Stream id of {} exceeds range", stream)
            }
            NetworkError::TrailingBits(bits) => write!(
                f,
                "Frame decoding complete but {} bits of network data remain",
                bits
            ),
            NetworkError::FrameError(err, _) => write!(f, "{}", err),
        }
    }
}

impl Error for NetworkError {}

/// The decoder state at the moment a frame failed to decode
#[derive(PartialEq, Debug, Clone)]
pub struct FrameContext {
    /// Index of the frame being decoded when the failure occurred
    pub frame_index: usize,

    /// Bit position in the network stream at the failure
    pub bit_offset: usize,

    /// The replay's object table
    pub objects: Vec<String>,

    /// The stream id to object id mapping of every resolved dispatch table
    pub object_attributes: FnvHashMap<ObjectId, FnvHashMap<StreamId, ObjectId>>,

    /// Frames that decoded cleanly before the failure
    pub frames: Vec<Frame>,

    /// Live actors at the failure
    pub actors: FnvHashMap<ActorId, ObjectId>,

    /// New actors seen in the failing frame
    pub new_actors: Vec<NewActor>,

    /// Attribute updates seen in the failing frame
    pub updated_actors: Vec<UpdatedAttribute>,
}

/// Errors scoped to a single frame of the network stream
#[derive(PartialEq, Debug, Clone)]
pub enum FrameError {
    NotEnoughDataFor(&'static str),
    TimeOutOfRange {
        time: f32,
    },
    DeltaOutOfRange {
        delta: f32,
    },
    ObjectIdOutOfRange {
        obj: ObjectId,
    },
    /// An update or delete referenced an actor that was never created
    MissingActor {
        actor: ActorId,
    },
    /// An actor's object resolved to a parent with no dispatch table
    MissingCache {
        actor: ActorId,
        actor_object: ObjectId,
    },
    /// The decoded stream id has no attribute in the dispatch table
    MissingAttribute {
        actor: ActorId,
        actor_object: ObjectId,
        attribute_stream: StreamId,
    },
    /// Neither the parent table nor the substring rules produced a parent
    UnresolvedParent {
        actor: ActorId,
        actor_object: ObjectId,
    },
    AttributeError {
        actor: ActorId,
        actor_object: ObjectId,
        attribute_stream: StreamId,
        error: AttributeError,
    },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::NotEnoughDataFor(section) => {
                write!(f, "Not enough data to decode {}", section)
            }
            FrameError::TimeOutOfRange { time } => write!(f, "Time is out of range: {}", time),
            FrameError::DeltaOutOfRange { delta } => write!(f, "Delta is out of range: {}", delta),
            FrameError::ObjectIdOutOfRange { obj } => {
                write!(f, "New actor object id out of range: {}", obj)
            }
            FrameError::MissingActor { actor } => {
                write!(f, "Update for unknown actor: {}", actor)
            }
            FrameError::MissingCache {
                actor,
                actor_object,
            } => write!(
                f,
                "Actor {} of object {} has no dispatch table",
                actor, actor_object
            ),
            FrameError::MissingAttribute {
                actor,
                actor_object,
                attribute_stream,
            } => write!(
                f,
                "Actor {} of object {} has no attribute at stream id {}",
                actor, actor_object, attribute_stream
            ),
            FrameError::UnresolvedParent {
                actor,
                actor_object,
            } => write!(
                f,
                "Object {} of actor {} has no resolvable parent object",
                actor_object, actor
            ),
            FrameError::AttributeError { error, .. } => write!(f, "Attribute error: {}", error),
        }
    }
}

impl Error for FrameError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FrameError::AttributeError { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Errors from decoding a single attribute
#[derive(PartialEq, Debug, Clone)]
pub enum AttributeError {
    NotEnoughDataFor(&'static str),
    TooBigString(i32),
    /// The object's name is absent from the attribute table
    Unimplemented,
    UnrecognizedRemoteId(u8),
}

impl fmt::Display for AttributeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeError::NotEnoughDataFor(section) => {
                write!(f, "Not enough data to decode attribute {}", section)
            }
            AttributeError::TooBigString(size) => {
                write!(f, "Unexpected size for string: {}", size)
            }
            AttributeError::Unimplemented => {
                write!(f, "Does not have an attribute implementation")
            }
            AttributeError::UnrecognizedRemoteId(id) => {
                write!(f, "Unrecognized remote id of: {}", id)
            }
        }
    }
}

impl Error for AttributeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_match_wire_diagnostics() {
        assert_eq!(
            ParseError::CrcMismatch(10, 20).to_string(),
            "Crc mismatch. Expected 10 but received 20"
        );
        assert_eq!(
            NetworkError::TooManyFrames(738197735).to_string(),
            "Too many frames to decode: 738197735"
        );
        assert_eq!(
            AttributeError::TooBigString(-1912602609).to_string(),
            "Unexpected size for string: -1912602609"
        );
    }

    #[test]
    fn source_chains_through_sections() {
        let inner = ParseError::ZeroSize;
        let outer = ParseError::ParseError("levels", 18, Box::new(inner.clone()));
        assert_eq!(
            outer.source().map(|e| e.to_string()),
            Some(inner.to_string())
        );
    }
}
