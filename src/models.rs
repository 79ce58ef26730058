use crate::network::Frame;
use serde::Serialize;

/// The structure that a replay decodes into
#[derive(Serialize, PartialEq, Debug, Clone)]
pub struct Replay {
    pub header_size: i32,
    pub header_crc: u32,
    pub major_version: i32,
    pub minor_version: i32,
    pub net_version: Option<i32>,
    pub game_type: String,

    /// Could use a map to represent properties but there's no guarantee the
    /// keys are unique, so to be safe, use a traditional vector
    #[serde(serialize_with = "crate::serde_utils::pair_vec")]
    pub properties: Vec<(String, HeaderProp)>,
    pub content_size: i32,
    pub content_crc: u32,
    pub network_frames: Option<NetworkFrames>,
    pub levels: Vec<String>,
    pub keyframes: Vec<KeyFrame>,
    pub debug_info: Vec<DebugInfo>,
    pub tick_marks: Vec<TickMark>,
    pub packages: Vec<String>,
    pub objects: Vec<String>,
    pub names: Vec<String>,
    pub class_indices: Vec<ClassIndex>,
    pub net_cache: Vec<ClassNetCache>,
}

/// The decoded network stream, one element per frame
#[derive(Serialize, PartialEq, Debug, Clone)]
pub struct NetworkFrames {
    pub frames: Vec<Frame>,
}

/// All the interesting data are stored as properties in the header:
///
/// - When and who scored a goal
/// - Player stats (goals, assists, score, etc)
/// - Date and level played on
///
/// A property can be a number, string, or a more complex object such as an
/// array containing additional properties.
#[derive(Serialize, PartialEq, Debug, Clone)]
#[serde(untagged)]
pub enum HeaderProp {
    Array(
        #[serde(serialize_with = "crate::serde_utils::pair_vecs")]
        Vec<Vec<(String, HeaderProp)>>,
    ),
    Bool(bool),
    Byte {
        kind: String,
        value: Option<String>,
    },
    Float(f32),
    Int(i32),
    Name(String),
    QWord(#[serde(serialize_with = "crate::serde_utils::display_it")] u64),
    Str(String),
}

impl HeaderProp {
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            HeaderProp::Int(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            HeaderProp::Name(x) | HeaderProp::Str(x) => Some(x.as_str()),
            _ => None,
        }
    }
}

/// Keyframes, as defined by the video compression sense of the word, are
/// points to derive the following frames from. Since the network stream is
/// decoded start to finish they are informational only.
#[derive(Serialize, PartialEq, Debug, Clone, Copy)]
pub struct KeyFrame {
    pub time: f32,
    pub frame: i32,
    pub position: i32,
}

/// A significant event in the match (eg. a goal). The mark is placed a ramp
/// up time before the event: a tick mark at frame 396 for a goal at frame
/// 441 is 1.5 seconds of lead at 30 fps.
#[derive(Serialize, PartialEq, Debug, Clone)]
pub struct TickMark {
    pub description: String,
    pub frame: i32,
}

/// Debugging info stored in the replay if debugging was enabled
#[derive(Serialize, PartialEq, Debug, Clone)]
pub struct DebugInfo {
    pub frame: i32,
    pub user: String,
    pub text: String,
}

/// A class seen in the network stream paired with its object table index
#[derive(Serialize, PartialEq, Debug, Clone)]
pub struct ClassIndex {
    pub class: String,
    pub index: i32,
}

/// One replicated property of a class: which object it is and the compact
/// id it is written under in the stream
#[derive(Serialize, PartialEq, Debug, Clone, Copy)]
pub struct CacheProp {
    pub object_ind: i32,
    pub stream_id: i32,
}

/// The footer's condensed description of a class's replicated layout. The
/// `parent_id` refers to the `cache_id` of the closest prior entry, so the
/// raw list must be flattened before use.
#[derive(Serialize, PartialEq, Debug, Clone)]
pub struct ClassNetCache {
    pub object_ind: i32,
    pub parent_id: i32,
    pub cache_id: i32,
    pub properties: Vec<CacheProp>,
}
