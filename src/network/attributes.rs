use crate::bits::ReplayBits;
use crate::errors::AttributeError;
use crate::network::object_index::ObjectIndex;
use crate::network::{ActorId, NetContext, Quaternion, Rotation, Vector3f};
use bitter::{BitReader, LittleEndianReader};
use encoding_rs::WINDOWS_1252;
use serde::Serialize;

/// The closed set of attribute shapes. The tag for every replicated property
/// is resolved ahead of time while flattening the class net cache, so the
/// frame loop never compares strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AttributeTag {
    Boolean,
    Byte,
    AppliedDamage,
    DamageState,
    CamSettings,
    ClubColors,
    Demolish,
    DemolishFx,
    Enum,
    Explosion,
    ExtendedExplosion,
    FlaggedByte,
    ActiveActor,
    Float,
    GameMode,
    Int,
    Int64,
    Loadout,
    TeamLoadout,
    Location,
    MusicStinger,
    Pickup,
    PickupNew,
    PlayerHistoryKey,
    QWordString,
    Welded,
    RigidBody,
    Title,
    TeamPaint,
    NotImplemented,
    String,
    UniqueId,
    Reservation,
    PartyLeader,
    PrivateMatchSettings,
    LoadoutOnline,
    LoadoutsOnline,
    StatEvent,
    RotationTag,
    RepStatTitle,
    PickupInfo,
    Impulse,
}

/// The attributes for updated actors in the network data.
///
/// The vast majority of attributes in the network data are rigid bodies, so
/// any variant larger than a rigid body is boxed to keep the enum lean.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Attribute {
    Boolean(bool),
    Byte(u8),
    AppliedDamage(AppliedDamage),
    DamageState(DamageState),
    CamSettings(Box<CamSettings>),
    ClubColors(ClubColors),
    Demolish(Box<Demolish>),
    DemolishFx(Box<DemolishFx>),
    Enum(u16),
    Explosion(Explosion),
    ExtendedExplosion(ExtendedExplosion),
    FlaggedByte(bool, u8),
    ActiveActor(ActiveActor),
    Float(f32),
    GameMode(u8, u8),
    Int(i32),

    #[serde(serialize_with = "crate::serde_utils::display_it")]
    Int64(i64),
    Loadout(Box<Loadout>),
    TeamLoadout(Box<TeamLoadout>),
    Location(Vector3f),
    MusicStinger(MusicStinger),
    PlayerHistoryKey(u16),
    Pickup(Pickup),
    PickupNew(PickupNew),

    #[serde(serialize_with = "crate::serde_utils::display_it")]
    QWord(u64),
    Welded(Welded),
    Title(bool, bool, u32, u32, u32, u32, u32, bool),
    TeamPaint(TeamPaint),
    RigidBody(RigidBody),
    String(String),
    UniqueId(Box<UniqueId>),
    Reservation(Box<Reservation>),
    PartyLeader(Option<Box<UniqueId>>),
    PrivateMatch(Box<PrivateMatchSettings>),
    LoadoutOnline(Vec<Vec<Product>>),
    LoadoutsOnline(LoadoutsOnline),
    StatEvent(StatEvent),
    Rotation(Rotation),
    RepStatTitle(RepStatTitle),
    PickupInfo(PickupInfo),
    Impulse(Impulse),
}

/// Reads `count` raw bytes into the scratch buffer and hands back an owned
/// copy. Opaque byte runs are preserved on the output model, never skipped.
fn read_raw_bytes(
    bits: &mut LittleEndianReader<'_>,
    buf: &mut [u8],
    count: usize,
    section: &'static str,
) -> Result<Vec<u8>, AttributeError> {
    let chunk = buf
        .get_mut(..count)
        .ok_or(AttributeError::NotEnoughDataFor(section))?;
    if !bits.read_bytes(chunk) {
        return Err(AttributeError::NotEnoughDataFor(section));
    }
    Ok(chunk.to_vec())
}

/// A `u32` that only exists on the wire when its version gate is open
fn gated_u32(bits: &mut LittleEndianReader<'_>, present: bool) -> Option<Option<u32>> {
    if present {
        bits.read_u32().map(Some)
    } else {
        Some(None)
    }
}

/// Strings in the attribute stream follow the footer conventions except a
/// zero length is an empty string rather than an error
fn decode_text(bits: &mut LittleEndianReader<'_>, buf: &mut [u8]) -> Result<String, AttributeError> {
    let size = bits
        .read_i32()
        .ok_or(AttributeError::NotEnoughDataFor("text string"))?;

    if size == 0 {
        return Ok(String::new());
    }

    let (bytes, utf16) = if size < 0 {
        let doubled = size.checked_mul(-2).ok_or(AttributeError::TooBigString(size))?;
        (doubled as usize, true)
    } else {
        (size as usize, false)
    };

    let chunk = buf
        .get_mut(..bytes)
        .ok_or(AttributeError::TooBigString(size))?;
    if !bits.read_bytes(chunk) {
        return Err(AttributeError::TooBigString(size));
    }

    let decoded = if utf16 {
        crate::parsing_utils::decode_utf16(chunk)
    } else {
        crate::parsing_utils::decode_windows1252(chunk)
    };
    decoded.map_err(|_| AttributeError::TooBigString(size))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActiveActor {
    pub active: bool,
    pub actor: ActorId,
}

impl ActiveActor {
    fn decode(bits: &mut LittleEndianReader<'_>) -> Option<ActiveActor> {
        let active = bits.read_bit()?;
        let actor = ActorId(bits.read_i32()?);
        Some(ActiveActor { active, actor })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CamSettings {
    pub fov: f32,
    pub height: f32,
    pub angle: f32,
    pub distance: f32,
    pub stiffness: f32,
    pub swivel: f32,
    pub transition: Option<f32>,
}

impl CamSettings {
    fn decode(bits: &mut LittleEndianReader<'_>, ctx: &NetContext) -> Option<CamSettings> {
        let mut base = [0.0f32; 6];
        for field in &mut base {
            *field = bits.read_f32()?;
        }
        let [fov, height, angle, distance, stiffness, swivel] = base;

        // the camera transition speed joined the settings blob at 868.20
        let transition = if ctx.at_least(868, 20) {
            Some(bits.read_f32()?)
        } else {
            None
        };

        Some(CamSettings {
            fov,
            height,
            angle,
            distance,
            stiffness,
            swivel,
            transition,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClubColors {
    pub blue_flag: bool,
    pub blue_color: u8,
    pub orange_flag: bool,
    pub orange_color: u8,
}

impl ClubColors {
    fn decode(bits: &mut LittleEndianReader<'_>) -> Option<ClubColors> {
        Some(ClubColors {
            blue_flag: bits.read_bit()?,
            blue_color: bits.read_u8()?,
            orange_flag: bits.read_bit()?,
            orange_color: bits.read_u8()?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AppliedDamage {
    pub id: u8,
    pub position: Vector3f,
    pub damage_index: i32,
    pub total_damage: i32,
}

impl AppliedDamage {
    fn decode(bits: &mut LittleEndianReader<'_>, net_version: i32) -> Option<AppliedDamage> {
        Some(AppliedDamage {
            id: bits.read_u8()?,
            position: Vector3f::decode(bits, net_version)?,
            damage_index: bits.read_i32()?,
            total_damage: bits.read_i32()?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DamageState {
    /// State of the dropshot tile (0 - undamaged, 1 - damaged, 2 - destroyed)
    pub tile_state: u8,

    /// True if damaged
    pub damaged: bool,

    /// Player actor that inflicted the damage
    pub offender: ActorId,

    /// Position of the ball at the time of the damage
    pub ball_position: Vector3f,

    /// True for the tile that was hit by the ball (center of the damage area)
    pub direct_hit: bool,
    pub unknown1: bool,
}

impl DamageState {
    fn decode(bits: &mut LittleEndianReader<'_>, net_version: i32) -> Option<DamageState> {
        Some(DamageState {
            tile_state: bits.read_u8()?,
            damaged: bits.read_bit()?,
            offender: ActorId(bits.read_i32()?),
            ball_position: Vector3f::decode(bits, net_version)?,
            direct_hit: bits.read_bit()?,
            unknown1: bits.read_bit()?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Demolish {
    pub attacker_flag: bool,
    pub attacker: ActorId,
    pub victim_flag: bool,
    pub victim: ActorId,
    pub attack_velocity: Vector3f,
    pub victim_velocity: Vector3f,
}

impl Demolish {
    fn decode(bits: &mut LittleEndianReader<'_>, net_version: i32) -> Option<Demolish> {
        Some(Demolish {
            attacker_flag: bits.read_bit()?,
            attacker: ActorId(bits.read_i32()?),
            victim_flag: bits.read_bit()?,
            victim: ActorId(bits.read_i32()?),
            attack_velocity: Vector3f::decode(bits, net_version)?,
            victim_velocity: Vector3f::decode(bits, net_version)?,
        })
    }
}

/// A demolition with the custom goal explosion fx that shipped alongside it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DemolishFx {
    pub custom_demo_flag: bool,
    pub custom_demo_id: i32,
    pub attacker_flag: bool,
    pub attacker: ActorId,
    pub victim_flag: bool,
    pub victim: ActorId,
    pub attack_velocity: Vector3f,
    pub victim_velocity: Vector3f,
}

impl DemolishFx {
    fn decode(bits: &mut LittleEndianReader<'_>, net_version: i32) -> Option<DemolishFx> {
        Some(DemolishFx {
            custom_demo_flag: bits.read_bit()?,
            custom_demo_id: bits.read_i32()?,
            attacker_flag: bits.read_bit()?,
            attacker: ActorId(bits.read_i32()?),
            victim_flag: bits.read_bit()?,
            victim: ActorId(bits.read_i32()?),
            attack_velocity: Vector3f::decode(bits, net_version)?,
            victim_velocity: Vector3f::decode(bits, net_version)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Explosion {
    pub flag: bool,
    pub actor: ActorId,
    pub location: Vector3f,
}

impl Explosion {
    fn decode(bits: &mut LittleEndianReader<'_>, net_version: i32) -> Option<Explosion> {
        Some(Explosion {
            flag: bits.read_bit()?,
            actor: ActorId(bits.read_i32()?),
            location: Vector3f::decode(bits, net_version)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExtendedExplosion {
    pub explosion: Explosion,
    pub unknown1: bool,
    pub secondary_actor: ActorId,
}

impl ExtendedExplosion {
    fn decode(bits: &mut LittleEndianReader<'_>, net_version: i32) -> Option<ExtendedExplosion> {
        Some(ExtendedExplosion {
            explosion: Explosion::decode(bits, net_version)?,
            unknown1: bits.read_bit()?,
            secondary_actor: ActorId(bits.read_i32()?),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Loadout {
    pub version: u8,
    pub body: u32,
    pub decal: u32,
    pub wheels: u32,
    pub rocket_trail: u32,
    pub antenna: u32,
    pub topper: u32,
    pub unknown1: u32,
    pub unknown2: Option<u32>,
    pub engine_audio: Option<u32>,
    pub trail: Option<u32>,
    pub goal_explosion: Option<u32>,
    pub banner: Option<u32>,
    pub product_id: Option<u32>,
    pub unknown3: Option<u32>,
    pub unknown4: Option<u32>,
    pub unknown5: Option<u32>,
}

impl Loadout {
    /// The loadout's own leading version byte gates every optional field;
    /// fields past the base set appeared at versions 9, 16, 17, 19, and 22.
    pub(crate) fn decode(bits: &mut LittleEndianReader<'_>) -> Option<Loadout> {
        let version = bits.read_u8()?;

        let mut base = [0u32; 7];
        for field in &mut base {
            *field = bits.read_u32()?;
        }
        let [body, decal, wheels, rocket_trail, antenna, topper, unknown1] = base;

        Some(Loadout {
            version,
            body,
            decal,
            wheels,
            rocket_trail,
            antenna,
            topper,
            unknown1,
            unknown2: gated_u32(bits, version >= 9)?,
            engine_audio: gated_u32(bits, version >= 16)?,
            trail: gated_u32(bits, version >= 16)?,
            goal_explosion: gated_u32(bits, version >= 16)?,
            banner: gated_u32(bits, version >= 17)?,
            product_id: gated_u32(bits, version >= 19)?,
            unknown3: gated_u32(bits, version >= 22)?,
            unknown4: gated_u32(bits, version >= 22)?,
            unknown5: gated_u32(bits, version >= 22)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TeamLoadout {
    pub blue: Loadout,
    pub orange: Loadout,
}

impl TeamLoadout {
    fn decode(bits: &mut LittleEndianReader<'_>) -> Option<TeamLoadout> {
        Some(TeamLoadout {
            blue: Loadout::decode(bits)?,
            orange: Loadout::decode(bits)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatEvent {
    pub unknown1: bool,
    pub object_id: i32,
}

impl StatEvent {
    fn decode(bits: &mut LittleEndianReader<'_>) -> Option<StatEvent> {
        Some(StatEvent {
            unknown1: bits.read_bit()?,
            object_id: bits.read_i32()?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MusicStinger {
    pub flag: bool,
    pub cue: u32,
    pub trigger: u8,
}

impl MusicStinger {
    fn decode(bits: &mut LittleEndianReader<'_>) -> Option<MusicStinger> {
        Some(MusicStinger {
            flag: bits.read_bit()?,
            cue: bits.read_u32()?,
            trigger: bits.read_u8()?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pickup {
    pub instigator: Option<ActorId>,
    pub picked_up: bool,
}

impl Pickup {
    fn decode(bits: &mut LittleEndianReader<'_>) -> Option<Pickup> {
        let instigator = bits.if_get(LittleEndianReader::read_i32)?.map(ActorId);
        let picked_up = bits.read_bit()?;
        Some(Pickup {
            instigator,
            picked_up,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PickupNew {
    pub instigator: Option<ActorId>,
    pub picked_up: u8,
}

impl PickupNew {
    fn decode(bits: &mut LittleEndianReader<'_>) -> Option<PickupNew> {
        let instigator = bits.if_get(LittleEndianReader::read_i32)?.map(ActorId);
        let picked_up = bits.read_u8()?;
        Some(PickupNew {
            instigator,
            picked_up,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Welded {
    pub active: bool,
    pub actor: ActorId,
    pub offset: Vector3f,
    pub mass: f32,
    pub rotation: Rotation,
}

impl Welded {
    fn decode(bits: &mut LittleEndianReader<'_>, net_version: i32) -> Option<Welded> {
        Some(Welded {
            active: bits.read_bit()?,
            actor: ActorId(bits.read_i32()?),
            offset: Vector3f::decode(bits, net_version)?,
            mass: bits.read_f32()?,
            rotation: Rotation::decode(bits)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TeamPaint {
    pub team: u8,
    pub primary_color: u8,
    pub accent_color: u8,
    pub primary_finish: u32,
    pub accent_finish: u32,
}

impl TeamPaint {
    fn decode(bits: &mut LittleEndianReader<'_>) -> Option<TeamPaint> {
        Some(TeamPaint {
            team: bits.read_u8()?,
            primary_color: bits.read_u8()?,
            accent_color: bits.read_u8()?,
            primary_finish: bits.read_u32()?,
            accent_finish: bits.read_u32()?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RigidBody {
    pub sleeping: bool,
    pub location: Vector3f,
    pub rotation: Quaternion,
    pub linear_velocity: Option<Vector3f>,
    pub angular_velocity: Option<Vector3f>,
}

impl RigidBody {
    fn decode(bits: &mut LittleEndianReader<'_>, net_version: i32) -> Option<RigidBody> {
        let sleeping = bits.read_bit()?;
        let location = Vector3f::decode(bits, net_version)?;
        let rotation = Quaternion::decode_by_version(bits, net_version)?;

        // velocities ride along only while the body is awake
        let (linear_velocity, angular_velocity) = if sleeping {
            (None, None)
        } else {
            (
                Some(Vector3f::decode(bits, net_version)?),
                Some(Vector3f::decode(bits, net_version)?),
            )
        };

        Some(RigidBody {
            sleeping,
            location,
            rotation,
            linear_velocity,
            angular_velocity,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct UniqueId {
    pub system_id: u8,
    pub remote_id: RemoteId,
    pub local_id: u8,
}

impl UniqueId {
    fn decode(
        bits: &mut LittleEndianReader<'_>,
        net_version: i32,
        buf: &mut [u8],
    ) -> Result<UniqueId, AttributeError> {
        let system_id = bits
            .read_u8()
            .ok_or(AttributeError::NotEnoughDataFor("System id"))?;
        let remote_id = RemoteId::decode(bits, system_id, net_version, buf)?;
        let local_id = bits
            .read_u8()
            .ok_or(AttributeError::NotEnoughDataFor("UniqueId local_id"))?;

        Ok(UniqueId {
            system_id,
            remote_id,
            local_id,
        })
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PsyNetId {
    #[serde(serialize_with = "crate::serde_utils::display_it")]
    pub online_id: u64,
    pub unknown1: Vec<u8>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SwitchId {
    #[serde(serialize_with = "crate::serde_utils::display_it")]
    pub online_id: u64,
    pub unknown1: Vec<u8>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Ps4Id {
    #[serde(serialize_with = "crate::serde_utils::display_it")]
    pub online_id: u64,
    pub name: String,
    pub unknown1: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum RemoteId {
    PlayStation(Ps4Id),
    PsyNet(PsyNetId),
    SplitScreen(u32),

    #[serde(serialize_with = "crate::serde_utils::display_it")]
    Steam(u64),
    Switch(SwitchId),

    #[serde(serialize_with = "crate::serde_utils::display_it")]
    Xbox(u64),

    #[serde(serialize_with = "crate::serde_utils::display_it")]
    QQ(u64),
    Epic(String),
}

impl RemoteId {
    /// One byte of system id selects among eight remote id layouts; any
    /// other system id leaves the stream position meaningless, so it is
    /// fatal.
    fn decode(
        bits: &mut LittleEndianReader<'_>,
        system_id: u8,
        net_version: i32,
        buf: &mut [u8],
    ) -> Result<RemoteId, AttributeError> {
        match system_id {
            0 => get_or!(
                bits.read_bits(24).map(|x| RemoteId::SplitScreen(x as u32)),
                "SplitScreen"
            ),
            1 => get_or!(bits.read_u64().map(RemoteId::Steam), "Steam"),
            2 => {
                let raw_name = read_raw_bytes(bits, buf, 16, "PS4 Name")?;
                let len = raw_name.iter().position(|&b| b == 0).unwrap_or(raw_name.len());
                let (name, _) = WINDOWS_1252.decode_without_bom_handling(&raw_name[..len]);
                let name = name.into_owned();

                let unknown_len = if net_version >= 1 { 16 } else { 8 };
                let unknown1 = read_raw_bytes(bits, buf, unknown_len, "PS4 Unknown")?;
                let online_id = get_or!(bits.read_u64(), "PS4 ID")?;

                Ok(RemoteId::PlayStation(Ps4Id {
                    online_id,
                    name,
                    unknown1,
                }))
            }
            4 => get_or!(bits.read_u64().map(RemoteId::Xbox), "Xbox"),
            5 => get_or!(bits.read_u64().map(RemoteId::QQ), "QQ ID"),
            6 => {
                let online_id = get_or!(bits.read_u64(), "Switch ID")?;
                let unknown1 = read_raw_bytes(bits, buf, 24, "Switch ID Unknown")?;
                Ok(RemoteId::Switch(SwitchId {
                    online_id,
                    unknown1,
                }))
            }
            7 => {
                let online_id = get_or!(bits.read_u64(), "PsyNet ID")?;
                // the 24 byte opaque tail disappeared at net version 10
                let unknown1 = if net_version < 10 {
                    read_raw_bytes(bits, buf, 24, "PsyNet ID Unknown")?
                } else {
                    Vec::new()
                };
                Ok(RemoteId::PsyNet(PsyNetId {
                    online_id,
                    unknown1,
                }))
            }
            11 => decode_text(bits, buf).map(RemoteId::Epic),
            x => Err(AttributeError::UnrecognizedRemoteId(x)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reservation {
    pub number: u32,
    pub unique_id: UniqueId,
    pub name: Option<String>,
    pub unknown1: bool,
    pub unknown2: bool,
    pub unknown3: Option<u8>,
}

impl Reservation {
    fn decode(
        bits: &mut LittleEndianReader<'_>,
        ctx: &NetContext,
        buf: &mut [u8],
    ) -> Result<Reservation, AttributeError> {
        let component = "Reservation";
        let number = get_or!(bits.read_bits(3).map(|x| x as u32), component)?;
        let unique_id = UniqueId::decode(bits, ctx.net_version(), buf)?;

        // split screen reservations carry no name
        let name = match unique_id.system_id {
            0 => None,
            _ => Some(decode_text(bits, buf)?),
        };

        let unknown1 = get_or!(bits.read_bit(), component)?;
        let unknown2 = get_or!(bits.read_bit(), component)?;
        let unknown3 = if ctx.at_least(868, 12) {
            Some(get_or!(bits.read_bits(6), component)? as u8)
        } else {
            None
        };

        Ok(Reservation {
            number,
            unique_id,
            name,
            unknown1,
            unknown2,
            unknown3,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrivateMatchSettings {
    pub mutators: String,
    pub joinable_by: u32,
    pub max_players: u32,
    pub game_name: String,
    pub password: String,
    pub flag: bool,
}

impl PrivateMatchSettings {
    fn decode(
        bits: &mut LittleEndianReader<'_>,
        buf: &mut [u8],
    ) -> Result<PrivateMatchSettings, AttributeError> {
        let component = "Private Match";
        let mutators = decode_text(bits, buf)?;
        let joinable_by = get_or!(bits.read_u32(), component)?;
        let max_players = get_or!(bits.read_u32(), component)?;
        let game_name = decode_text(bits, buf)?;
        let password = decode_text(bits, buf)?;
        let flag = get_or!(bits.read_bit(), component)?;

        Ok(PrivateMatchSettings {
            mutators,
            joinable_by,
            max_players,
            game_name,
            password,
            flag,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub unknown: bool,
    pub object_ind: u32,
    pub value: ProductValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadoutsOnline {
    pub blue: Vec<Vec<Product>>,
    pub orange: Vec<Vec<Product>>,
    pub unknown1: bool,
    pub unknown2: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ProductValue {
    NoColor,
    Absent,
    OldColor(u32),
    NewColor(i32),
    OldPaint(u32),
    NewPaint(u32),
    Title(String),
    SpecialEdition(u32),
    OldTeamEdition(u32),
    NewTeamEdition(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepStatTitle {
    pub unknown: bool,
    pub name: String,
    pub unknown2: bool,
    pub index: u32,
    pub value: u32,
}

impl RepStatTitle {
    fn decode(
        bits: &mut LittleEndianReader<'_>,
        buf: &mut [u8],
    ) -> Result<RepStatTitle, AttributeError> {
        let component = "RepStatTitle";
        let unknown = get_or!(bits.read_bit(), component)?;
        let name = decode_text(bits, buf)?;
        let unknown2 = get_or!(bits.read_bit(), component)?;
        let index = get_or!(bits.read_u32(), component)?;
        let value = get_or!(bits.read_u32(), component)?;
        Ok(RepStatTitle {
            unknown,
            name,
            unknown2,
            index,
            value,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PickupInfo {
    pub active: bool,
    pub actor: ActorId,
    pub items_are_preview: bool,
    pub unknown: bool,
    pub unknown2: bool,
}

impl PickupInfo {
    fn decode(bits: &mut LittleEndianReader<'_>) -> Option<PickupInfo> {
        Some(PickupInfo {
            active: bits.read_bit()?,
            actor: ActorId(bits.read_i32()?),
            items_are_preview: bits.read_bit()?,
            unknown: bits.read_bit()?,
            unknown2: bits.read_bit()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Impulse {
    pub compressed_rotation: i32,
    pub speed: f32,
}

impl Impulse {
    fn decode(bits: &mut LittleEndianReader<'_>) -> Option<Impulse> {
        Some(Impulse {
            compressed_rotation: bits.read_i32()?,
            speed: bits.read_f32()?,
        })
    }
}

/// The product attribute objects whose presence changes a product value's
/// wire shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProductKind {
    UserColor,
    Painted,
    SpecialEdition,
    TeamEdition,
    TitleId,
}

const PRODUCT_OBJECTS: [(&str, ProductKind); 5] = [
    ("TAGame.ProductAttribute_UserColor_TA", ProductKind::UserColor),
    ("TAGame.ProductAttribute_Painted_TA", ProductKind::Painted),
    (
        "TAGame.ProductAttribute_SpecialEdition_TA",
        ProductKind::SpecialEdition,
    ),
    (
        "TAGame.ProductAttribute_TeamEdition_TA",
        ProductKind::TeamEdition,
    ),
    ("TAGame.ProductAttribute_TitleID_TA", ProductKind::TitleId),
];

/// Product values name an object id on the wire whose shape depends on
/// which product attribute object it is, so those object table indices are
/// resolved once before any frame decodes. An id matching none of them is a
/// value the decoder doesn't interpret (`Absent`), not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ProductValueDecoder {
    ctx: NetContext,
    kinds: [(u32, ProductKind); 5],
}

impl ProductValueDecoder {
    pub fn create(ctx: NetContext, object_index: &ObjectIndex<'_>) -> Self {
        let mut kinds = [(u32::MAX, ProductKind::UserColor); 5];
        for (slot, (name, kind)) in kinds.iter_mut().zip(PRODUCT_OBJECTS) {
            if let Some(id) = object_index.primary_by_name(name) {
                *slot = (i32::from(id) as u32, kind);
            }
        }
        ProductValueDecoder { ctx, kinds }
    }

    /// A decoder where no product attribute object is present, so every
    /// product decodes as `Absent`
    #[cfg(test)]
    pub(crate) fn for_tests(ctx: NetContext) -> Self {
        ProductValueDecoder {
            ctx,
            kinds: [(u32::MAX, ProductKind::UserColor); 5],
        }
    }

    fn kind_of(&self, obj_ind: u32) -> Option<ProductKind> {
        if obj_ind == u32::MAX {
            return None;
        }
        self.kinds
            .iter()
            .find(|(id, _)| *id == obj_ind)
            .map(|(_, kind)| *kind)
    }

    pub fn decode(
        &self,
        bits: &mut LittleEndianReader<'_>,
        obj_ind: u32,
        buf: &mut [u8],
    ) -> Option<ProductValue> {
        let Some(kind) = self.kind_of(obj_ind) else {
            return Some(ProductValue::Absent);
        };

        let wide = |bits: &mut LittleEndianReader<'_>| bits.read_bits(31).map(|x| x as u32);

        match kind {
            ProductKind::UserColor if self.ctx.at_least_net(868, 23, 8) => {
                bits.read_i32().map(ProductValue::NewColor)
            }
            ProductKind::UserColor => match bits.if_get(wide)? {
                Some(color) => Some(ProductValue::OldColor(color)),
                None => Some(ProductValue::NoColor),
            },
            ProductKind::Painted if self.ctx.at_least(868, 18) => {
                wide(bits).map(ProductValue::NewPaint)
            }
            ProductKind::Painted => bits
                .read_bits_max(3, 14)
                .map(|x| ProductValue::OldPaint(x as u32)),
            ProductKind::SpecialEdition => wide(bits).map(ProductValue::SpecialEdition),
            ProductKind::TeamEdition if self.ctx.at_least(868, 18) => {
                wide(bits).map(ProductValue::NewTeamEdition)
            }
            ProductKind::TeamEdition => bits
                .read_bits_max(3, 14)
                .map(|x| ProductValue::OldTeamEdition(x as u32)),
            ProductKind::TitleId => decode_text(bits, buf).ok().map(ProductValue::Title),
        }
    }

    fn decode_product(&self, bits: &mut LittleEndianReader<'_>, buf: &mut [u8]) -> Option<Product> {
        let unknown = bits.read_bit()?;
        let object_ind = bits.read_u32()?;
        let value = self.decode(bits, object_ind, buf)?;
        Some(Product {
            unknown,
            object_ind,
            value,
        })
    }

    /// An online loadout: a byte count of slots, each slot a byte count of
    /// equipped products
    fn decode_slots(
        &self,
        bits: &mut LittleEndianReader<'_>,
        buf: &mut [u8],
    ) -> Option<Vec<Vec<Product>>> {
        let slots = bits.read_u8()?;
        (0..slots)
            .map(|_| {
                let products = bits.read_u8()?;
                (0..products)
                    .map(|_| self.decode_product(bits, buf))
                    .collect::<Option<Vec<_>>>()
            })
            .collect()
    }
}

/// Decodes one attribute by its pre-resolved tag. Every layout is total: it
/// consumes a fixed number of bits given the replay's version flags, because
/// the stream carries no delimiters to resynchronize on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AttributeDecoder {
    ctx: NetContext,
    product_decoder: ProductValueDecoder,
}

impl AttributeDecoder {
    pub fn new(ctx: NetContext, product_decoder: ProductValueDecoder) -> Self {
        AttributeDecoder {
            ctx,
            product_decoder,
        }
    }

    pub fn decode(
        &self,
        tag: AttributeTag,
        bits: &mut LittleEndianReader<'_>,
        buf: &mut [u8],
    ) -> Result<Attribute, AttributeError> {
        let ctx = &self.ctx;
        let net = ctx.net_version();

        match tag {
            AttributeTag::Boolean => bits
                .read_bit()
                .map(Attribute::Boolean)
                .ok_or(AttributeError::NotEnoughDataFor("Boolean")),
            AttributeTag::Byte => bits
                .read_u8()
                .map(Attribute::Byte)
                .ok_or(AttributeError::NotEnoughDataFor("Byte")),
            AttributeTag::AppliedDamage => AppliedDamage::decode(bits, net)
                .map(Attribute::AppliedDamage)
                .ok_or(AttributeError::NotEnoughDataFor("Applied Damage")),
            AttributeTag::DamageState => DamageState::decode(bits, net)
                .map(Attribute::DamageState)
                .ok_or(AttributeError::NotEnoughDataFor("Damage State")),
            AttributeTag::CamSettings => CamSettings::decode(bits, ctx)
                .map(Box::new)
                .map(Attribute::CamSettings)
                .ok_or(AttributeError::NotEnoughDataFor("Cam Settings")),
            AttributeTag::ClubColors => ClubColors::decode(bits)
                .map(Attribute::ClubColors)
                .ok_or(AttributeError::NotEnoughDataFor("Club Colors")),
            AttributeTag::Demolish => Demolish::decode(bits, net)
                .map(Box::new)
                .map(Attribute::Demolish)
                .ok_or(AttributeError::NotEnoughDataFor("Demolish")),
            AttributeTag::DemolishFx => DemolishFx::decode(bits, net)
                .map(Box::new)
                .map(Attribute::DemolishFx)
                .ok_or(AttributeError::NotEnoughDataFor("DemolishFx")),
            AttributeTag::Enum => bits
                .read_bits(11)
                .map(|x| Attribute::Enum(x as u16))
                .ok_or(AttributeError::NotEnoughDataFor("Enum")),
            AttributeTag::Explosion => Explosion::decode(bits, net)
                .map(Attribute::Explosion)
                .ok_or(AttributeError::NotEnoughDataFor("Explosion")),
            AttributeTag::ExtendedExplosion => ExtendedExplosion::decode(bits, net)
                .map(Attribute::ExtendedExplosion)
                .ok_or(AttributeError::NotEnoughDataFor("Extended Explosion")),
            AttributeTag::FlaggedByte => {
                let flag = get_or!(bits.read_bit(), "FlaggedByte")?;
                let value = get_or!(bits.read_u8(), "FlaggedByte")?;
                Ok(Attribute::FlaggedByte(flag, value))
            }
            AttributeTag::ActiveActor => ActiveActor::decode(bits)
                .map(Attribute::ActiveActor)
                .ok_or(AttributeError::NotEnoughDataFor("Active Actor")),
            AttributeTag::Float => bits
                .read_f32()
                .map(Attribute::Float)
                .ok_or(AttributeError::NotEnoughDataFor("Float")),
            AttributeTag::GameMode => {
                // Pre 868.12 builds sized this field differently; both arms
                // read eight bits today but stay separate so the next
                // resize only touches one of them.
                let value = if ctx.at_least(868, 12) {
                    bits.read_bits(8)
                } else {
                    bits.read_bits(8)
                };
                value
                    .map(|x| Attribute::GameMode(8, x as u8))
                    .ok_or(AttributeError::NotEnoughDataFor("Game Mode"))
            }
            AttributeTag::Int => bits
                .read_i32()
                .map(Attribute::Int)
                .ok_or(AttributeError::NotEnoughDataFor("Int")),
            AttributeTag::Int64 => bits
                .read_i64()
                .map(Attribute::Int64)
                .ok_or(AttributeError::NotEnoughDataFor("Int64")),
            AttributeTag::Loadout => Loadout::decode(bits)
                .map(Box::new)
                .map(Attribute::Loadout)
                .ok_or(AttributeError::NotEnoughDataFor("Loadout")),
            AttributeTag::TeamLoadout => TeamLoadout::decode(bits)
                .map(Box::new)
                .map(Attribute::TeamLoadout)
                .ok_or(AttributeError::NotEnoughDataFor("Team Loadout")),
            AttributeTag::Location => Vector3f::decode(bits, net)
                .map(Attribute::Location)
                .ok_or(AttributeError::NotEnoughDataFor("Location")),
            AttributeTag::MusicStinger => MusicStinger::decode(bits)
                .map(Attribute::MusicStinger)
                .ok_or(AttributeError::NotEnoughDataFor("Music Stinger")),
            AttributeTag::Pickup => Pickup::decode(bits)
                .map(Attribute::Pickup)
                .ok_or(AttributeError::NotEnoughDataFor("Pickup")),
            AttributeTag::PickupNew => PickupNew::decode(bits)
                .map(Attribute::PickupNew)
                .ok_or(AttributeError::NotEnoughDataFor("PickupNew")),
            AttributeTag::PlayerHistoryKey => bits
                .read_bits(14)
                .map(|x| Attribute::PlayerHistoryKey(x as u16))
                .ok_or(AttributeError::NotEnoughDataFor("PlayerHistoryKey")),
            AttributeTag::QWordString => {
                // a qword Psyonix turned into a string mid 2022 without a
                // version bump, keyed off the build version instead
                if ctx.is_rl_223 {
                    decode_text(bits, buf).map(Attribute::String)
                } else {
                    bits.read_u64()
                        .map(Attribute::QWord)
                        .ok_or(AttributeError::NotEnoughDataFor("QWord"))
                }
            }
            AttributeTag::Welded => Welded::decode(bits, net)
                .map(Attribute::Welded)
                .ok_or(AttributeError::NotEnoughDataFor("Welded")),
            AttributeTag::RigidBody => RigidBody::decode(bits, net)
                .map(Attribute::RigidBody)
                .ok_or(AttributeError::NotEnoughDataFor("Rigid Body")),
            AttributeTag::Title => {
                let component = "Title";
                let unknown1 = get_or!(bits.read_bit(), component)?;
                let unknown2 = get_or!(bits.read_bit(), component)?;
                let mut words = [0u32; 5];
                for word in &mut words {
                    *word = get_or!(bits.read_u32(), component)?;
                }
                let unknown8 = get_or!(bits.read_bit(), component)?;
                Ok(Attribute::Title(
                    unknown1, unknown2, words[0], words[1], words[2], words[3], words[4], unknown8,
                ))
            }
            AttributeTag::TeamPaint => TeamPaint::decode(bits)
                .map(Attribute::TeamPaint)
                .ok_or(AttributeError::NotEnoughDataFor("Team Paint")),
            AttributeTag::NotImplemented => Err(AttributeError::Unimplemented),
            AttributeTag::String => decode_text(bits, buf).map(Attribute::String),
            AttributeTag::UniqueId => UniqueId::decode(bits, net, buf)
                .map(Box::new)
                .map(Attribute::UniqueId),
            AttributeTag::Reservation => Reservation::decode(bits, ctx, buf)
                .map(Box::new)
                .map(Attribute::Reservation),
            AttributeTag::PartyLeader => {
                // the party leader pre-reads the system id; zero means no
                // leader and no remote id follows
                let system_id = get_or!(bits.read_u8(), "Party Leader")?;
                if system_id == 0 {
                    return Ok(Attribute::PartyLeader(None));
                }

                let remote_id = RemoteId::decode(bits, system_id, net, buf)?;
                let local_id = get_or!(bits.read_u8(), "Party Leader")?;
                Ok(Attribute::PartyLeader(Some(Box::new(UniqueId {
                    system_id,
                    remote_id,
                    local_id,
                }))))
            }
            AttributeTag::PrivateMatchSettings => PrivateMatchSettings::decode(bits, buf)
                .map(Box::new)
                .map(Attribute::PrivateMatch),
            AttributeTag::LoadoutOnline => self
                .product_decoder
                .decode_slots(bits, buf)
                .map(Attribute::LoadoutOnline)
                .ok_or(AttributeError::NotEnoughDataFor("Loadout Online")),
            AttributeTag::LoadoutsOnline => {
                let component = "Loadouts online";
                let blue = get_or!(self.product_decoder.decode_slots(bits, buf), component)?;
                let orange = get_or!(self.product_decoder.decode_slots(bits, buf), component)?;
                let unknown1 = get_or!(bits.read_bit(), component)?;
                let unknown2 = get_or!(bits.read_bit(), component)?;
                Ok(Attribute::LoadoutsOnline(LoadoutsOnline {
                    blue,
                    orange,
                    unknown1,
                    unknown2,
                }))
            }
            AttributeTag::StatEvent => StatEvent::decode(bits)
                .map(Attribute::StatEvent)
                .ok_or(AttributeError::NotEnoughDataFor("Stat Event")),
            AttributeTag::RotationTag => Rotation::decode(bits)
                .map(Attribute::Rotation)
                .ok_or(AttributeError::NotEnoughDataFor("Rotation")),
            AttributeTag::RepStatTitle => {
                RepStatTitle::decode(bits, buf).map(Attribute::RepStatTitle)
            }
            AttributeTag::PickupInfo => PickupInfo::decode(bits)
                .map(Attribute::PickupInfo)
                .ok_or(AttributeError::NotEnoughDataFor("PickupInfo")),
            AttributeTag::Impulse => Impulse::decode(bits)
                .map(Attribute::Impulse)
                .ok_or(AttributeError::NotEnoughDataFor("Impulse")),
        }
    }
}
