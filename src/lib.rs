//! # Gondola
//!
//! Gondola decodes Rocket League replay files into structured data. A replay
//! is a little endian binary artifact with a property laden header, an
//! opaque network stream, and a footer of object and class metadata. The
//! header holds the summary (goals, player stats, level), while the network
//! stream holds the full transcript of the match: roughly a hundred thousand
//! actor creations, attribute updates, and deletions encoded at the bit
//! level, whose layouts shift across three version axes. Decoding the
//! network data is opt-in, as a single misread bit desynchronizes the rest
//! of the stream.
//!
//! ```no_run
//! let data = std::fs::read("match.replay").unwrap();
//! let replay = gondola::ParserBuilder::new(&data)
//!     .on_error_check_crc()
//!     .must_parse_network_data()
//!     .parse();
//!
//! match replay {
//!     Ok(replay) => {
//!         let frames = replay.network_frames.unwrap().frames;
//!         println!("decoded {} frames", frames.len());
//!     }
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

#[macro_use]
mod macros;

mod bits;
mod core_parser;
pub mod crc;
mod data;
mod errors;
mod header;
mod models;
mod network;
mod parser;
mod parsing_utils;
mod serde_utils;

pub use crate::errors::{AttributeError, FrameContext, FrameError, NetworkError, ParseError};
pub use crate::models::*;
pub use crate::network::attributes::{self, Attribute};
pub use crate::network::{
    ActorId, Frame, NewActor, ObjectId, Quaternion, Rotation, StreamId, Trajectory,
    UpdatedAttribute, Vector3f, Vector3i,
};
pub use crate::parser::{parse, CrcCheck, NetworkParse, ParserBuilder};
