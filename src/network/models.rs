use crate::bits::ReplayBits;
use crate::network::attributes::Attribute;
use bitter::{BitReader, LittleEndianReader};
use serde::Serialize;
use std::fmt;

/// An object's current vector, with each axis in centimeters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Vector3f {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3f {
    pub(crate) fn decode(bits: &mut LittleEndianReader<'_>, net_version: i32) -> Option<Vector3f> {
        Vector3i::decode(bits, net_version).map(|vec| Vector3f {
            x: (vec.x as f32) / 100.0,
            y: (vec.y as f32) / 100.0,
            z: (vec.z as f32) / 100.0,
        })
    }
}

/// A compressed integer vector. A four bit size tag determines how many bits
/// each axis occupies, and each axis is recentered around zero by a bias of
/// `2^(size + 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Vector3i {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Vector3i {
    pub(crate) fn decode(bits: &mut LittleEndianReader<'_>, net_version: i32) -> Option<Vector3i> {
        let max_size = if net_version >= 7 { 22 } else { 20 };
        let size = bits.read_bits_max(4, max_size)?;
        let bias = 1 << (size + 1);
        let limit = (size + 2) as u32;
        let dx = bits.read_bits(limit)?;
        let dy = bits.read_bits(limit)?;
        let dz = bits.read_bits(limit)?;
        Some(Vector3i {
            x: (dx as i32) - bias,
            y: (dy as i32) - bias,
            z: (dz as i32) - bias,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quaternion {
    fn unpack(val: u64) -> f32 {
        let max_quat = 1.0 / std::f32::consts::SQRT_2;
        let max_value = (1 << 18) - 1;
        let pos_range = (val as f32) / (max_value as f32);
        (pos_range - 0.5) * 2.0 * max_quat
    }

    /// The sixteen bit fixed compressed float of pre net version 7 streams
    fn compressed_f32(bits: &mut LittleEndianReader<'_>) -> Option<f32> {
        bits.read_u16()
            .map(|x| i32::from(x) + i32::from(i16::MIN))
            .map(|x| x as f32 * (i16::MAX as f32).recip())
    }

    /// Three fixed compressed floats; the w component is not transmitted
    pub(crate) fn decode_compressed(bits: &mut LittleEndianReader<'_>) -> Option<Self> {
        let x = Quaternion::compressed_f32(bits)?;
        let y = Quaternion::compressed_f32(bits)?;
        let z = Quaternion::compressed_f32(bits)?;
        Some(Quaternion { x, y, z, w: 0.0 })
    }

    /// Net version 7 switched the wire from three fixed floats to the
    /// smallest three encoding
    pub(crate) fn decode_by_version(
        bits: &mut LittleEndianReader<'_>,
        net_version: i32,
    ) -> Option<Self> {
        if net_version >= 7 {
            Quaternion::decode(bits)
        } else {
            Quaternion::decode_compressed(bits)
        }
    }

    /// Smallest three encoding: a two bit tag names the component that was
    /// dropped and the remaining three arrive as 18 bit fields. The dropped
    /// component is recovered from the unit norm.
    pub(crate) fn decode(bits: &mut LittleEndianReader<'_>) -> Option<Self> {
        let largest = bits.read_bits(2)?;
        let a = bits.read_bits(18).map(Quaternion::unpack)?;
        let b = bits.read_bits(18).map(Quaternion::unpack)?;
        let c = bits.read_bits(18).map(Quaternion::unpack)?;
        let extra = (1.0 - (a * a) - (b * b) - (c * c)).sqrt();
        match largest {
            0 => Some(Quaternion {
                x: extra,
                y: a,
                z: b,
                w: c,
            }),
            1 => Some(Quaternion {
                x: a,
                y: extra,
                z: b,
                w: c,
            }),
            2 => Some(Quaternion {
                x: a,
                y: b,
                z: extra,
                w: c,
            }),
            3 => Some(Quaternion {
                x: a,
                y: b,
                z: c,
                w: extra,
            }),
            _ => unreachable!(),
        }
    }
}

/// An object's current rotation, with each axis behind a presence bit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rotation {
    pub yaw: Option<i8>,
    pub pitch: Option<i8>,
    pub roll: Option<i8>,
}

impl Rotation {
    pub(crate) fn decode(bits: &mut LittleEndianReader<'_>) -> Option<Rotation> {
        let yaw = bits.if_get(LittleEndianReader::read_i8)?;
        let pitch = bits.if_get(LittleEndianReader::read_i8)?;
        let roll = bits.if_get(LittleEndianReader::read_i8)?;
        Some(Rotation { yaw, pitch, roll })
    }
}

/// When a new actor spawns it is trailed by an initial location, a location
/// and rotation, or nothing, depending on its object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnTrajectory {
    None,
    Location,
    LocationAndRotation,
}

/// Contains the optional location and rotation of an object when it spawns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Trajectory {
    pub location: Option<Vector3i>,
    pub rotation: Option<Rotation>,
}

impl Trajectory {
    pub(crate) fn from_spawn(
        bits: &mut LittleEndianReader<'_>,
        sp: SpawnTrajectory,
        net_version: i32,
    ) -> Option<Trajectory> {
        match sp {
            SpawnTrajectory::None => Some(Trajectory {
                location: None,
                rotation: None,
            }),
            SpawnTrajectory::Location => Vector3i::decode(bits, net_version).map(|v| Trajectory {
                location: Some(v),
                rotation: None,
            }),
            SpawnTrajectory::LocationAndRotation => {
                let location = Vector3i::decode(bits, net_version)?;
                let rotation = Rotation::decode(bits)?;
                Some(Trajectory {
                    location: Some(location),
                    rotation: Some(rotation),
                })
            }
        }
    }
}

/// A replay encodes a list of objects that appear in the network data. The
/// index of an object in this list is used as a key in many places:
/// reconstructing the attribute hierarchy and new actors in the network data.
#[derive(Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Debug, Hash, Serialize)]
pub struct ObjectId(pub i32);

impl From<ObjectId> for i32 {
    fn from(x: ObjectId) -> i32 {
        x.0
    }
}

impl From<ObjectId> for usize {
    fn from(x: ObjectId) -> usize {
        x.0 as usize
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A `StreamId` is an attribute's compact id in the network data. Whereas an
/// object id might need 9 bits, the stream id of the same attribute may only
/// need 6 because it indexes into a single class's dispatch table.
#[derive(Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Debug, Hash, Serialize)]
pub struct StreamId(pub i32);

impl From<StreamId> for i32 {
    fn from(x: StreamId) -> i32 {
        x.0
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An actor's channel id in the network data. Could identify a ball, car,
/// etc. Ids are not unique across a replay: an actor that is destroyed may
/// have its id repurposed.
#[derive(Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Debug, Hash, Serialize)]
pub struct ActorId(pub i32);

impl From<ActorId> for i32 {
    fn from(x: ActorId) -> i32 {
        x.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Information for a new actor that appears in the game
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NewActor {
    /// The id given to the new actor
    pub actor_id: ActorId,

    /// A name id, present in newer replays
    pub name_id: Option<i32>,

    /// The actor's object id
    pub object_id: ObjectId,

    /// The initial trajectory of the new actor
    pub initial_trajectory: Trajectory,
}

/// Notifies that an actor has had one of their properties updated (most
/// likely their rigid body state has changed)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdatedAttribute {
    /// The actor that had an attribute updated
    pub actor_id: ActorId,

    /// The attribute stream id that was decoded
    pub stream_id: StreamId,

    /// The attribute's object id
    pub object_id: ObjectId,

    /// The actual data from the decoded attribute
    pub attribute: Attribute,
}

/// Contains the time and any new information that occurred during a frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// The time in seconds that the frame is recorded at
    pub time: f32,

    /// Time difference between previous frame
    pub delta: f32,

    /// List of new actors seen during the frame
    pub new_actors: Vec<NewActor>,

    /// List of actor ids that are deleted / destroyed
    pub deleted_actors: Vec<ActorId>,

    /// List of properties updated on the actors
    pub updated_actors: Vec<UpdatedAttribute>,
}
