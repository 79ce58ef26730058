pub(crate) use self::attributes::{AttributeTag, ProductValueDecoder};
pub use self::models::*;

pub mod attributes;
mod frame_decoder;
mod models;
pub(crate) mod object_index;

use crate::bits::bit_width;
use crate::data::{ATTRIBUTES, PARENT_CLASSES, SPAWN_TRAJECTORIES};
use crate::errors::NetworkError;
use crate::header::Header;
use crate::models::NetworkFrames;
use crate::network::frame_decoder::FrameDecoder;
use crate::network::object_index::ObjectIndex;
use crate::parser::ReplayBody;
use fnv::FnvHashMap;
use std::cmp;

/// Engine, licensee, and net version of the replay
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct VersionTriplet(pub i32, pub i32, pub i32);

/// Everything about a replay's provenance that decoders condition on,
/// computed once from the header before any network bit is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NetContext {
    version: VersionTriplet,
    pub is_lan: bool,

    /// Whether the replay comes from a build at or past Rocket League
    /// v2.23, which changed wire layouts without bumping any version field
    pub is_rl_223: bool,

    /// Whether new actor segments lead with a name id
    pub parse_actor_name_id: bool,

    /// Highest channel (actor) id the stream may use
    pub actor_id_max: u32,

    /// Bits in a raw actor id read
    pub actor_id_bits: u32,
}

/// The build this conditional wire layout change shipped in
const RL_223_BUILD: [u64; 3] = [221120, 42953, 406184];

impl NetContext {
    pub(crate) fn from_header(header: &Header) -> Self {
        let version = VersionTriplet(
            header.major_version,
            header.minor_version,
            header.net_version.unwrap_or(0),
        );

        let is_lan = header.match_type() == Some("Lan");
        let is_rl_223 = header
            .build_version()
            .map(|build| build_at_least(build, RL_223_BUILD))
            .unwrap_or(false);

        let engine = version.0;
        let licensee = version.1;
        let parse_actor_name_id =
            (engine >= 868 && licensee >= 20) || (engine >= 868 && licensee >= 14 && !is_lan);

        // 1023 is the cap Rocket League used before MaxChannels was written
        let actor_id_max = header.max_channels().unwrap_or(1023) as u32;
        let actor_id_bits = bit_width(u64::from(actor_id_max)).saturating_sub(1);

        NetContext {
            version,
            is_lan,
            is_rl_223,
            parse_actor_name_id,
            actor_id_max,
            actor_id_bits,
        }
    }

    pub fn net_version(&self) -> i32 {
        self.version.2
    }

    pub fn at_least(&self, engine: i32, licensee: i32) -> bool {
        self.version.0 >= engine && self.version.1 >= licensee
    }

    pub fn at_least_net(&self, engine: i32, licensee: i32, net: i32) -> bool {
        self.at_least(engine, licensee) && self.version.2 >= net
    }

    #[cfg(test)]
    pub(crate) fn for_tests(version: VersionTriplet, is_lan: bool, is_rl_223: bool) -> Self {
        let engine = version.0;
        let licensee = version.1;
        NetContext {
            version,
            is_lan,
            is_rl_223,
            parse_actor_name_id: (engine >= 868 && licensee >= 20)
                || (engine >= 868 && licensee >= 14 && !is_lan),
            actor_id_max: 1023,
            actor_id_bits: 9,
        }
    }
}

/// Compares a `BuildVersion` header property like `221120.42953.406184`
/// against a target, each dot separated component as an integer. Builds that
/// don't parse as a numeric triple are treated as older than everything.
fn build_at_least(build: &str, target: [u64; 3]) -> bool {
    let mut components = build.split('.');
    let mut parsed = [0u64; 3];
    for slot in parsed.iter_mut() {
        match components.next().map(str::parse) {
            Some(Ok(value)) => *slot = value,
            _ => return false,
        }
    }
    parsed >= target
}

/// An attribute's pre-resolved decode tag and the object that owns it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ObjectAttribute {
    pub attribute: AttributeTag,
    pub object_id: ObjectId,
}

/// The dispatch table of one class: every attribute it can replicate,
/// addressable by stream id in constant time.
#[derive(Debug, Clone)]
pub(crate) struct CacheInfo {
    /// One past the largest stream id, and the bound fed to the bounded
    /// magnitude read
    pub max_stream_id: u32,

    /// Bits in a raw stream id read
    pub stream_id_bits: u32,

    /// Dense array indexed by stream id; a `None` slot is a stream id the
    /// class never replicates
    pub attributes: Vec<Option<ObjectAttribute>>,
}

/// A flattened class net cache entry: the entry's own properties plus every
/// inherited one, in encounter order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResolvedCacheEntry {
    pub object_id: ObjectId,
    pub cache_id: i32,
    pub properties: Vec<(StreamId, ObjectAttribute)>,
}

/// Flattens the footer's inheritance condensed cache in a single pass.
///
/// Each entry inherits from the closest prior resolved entry, found either
/// through the static class hierarchy (preferred) or by matching the entry's
/// `parent_id` against prior `cache_id`s. `cache_id`s repeat across the
/// list, which is why both scans run newest to oldest. Entries with no match
/// stand alone; the resolver itself never fails on a missing parent.
pub(crate) fn flatten_net_cache(
    body: &ReplayBody<'_>,
    object_index: &ObjectIndex<'_>,
) -> Result<Vec<ResolvedCacheEntry>, NetworkError> {
    let class_by_object: FnvHashMap<i32, &str> = body
        .class_indices
        .iter()
        .map(|ci| (ci.index, ci.class.as_str()))
        .collect();
    let object_by_class: FnvHashMap<&str, i32> = body
        .class_indices
        .iter()
        .map(|ci| (ci.class.as_str(), ci.index))
        .collect();

    let mut resolved: Vec<ResolvedCacheEntry> = Vec::with_capacity(body.net_cache.len());

    for entry in &body.net_cache {
        let own = entry
            .properties
            .iter()
            .map(|prop| {
                let attr = body
                    .objects
                    .get(prop.object_ind as usize)
                    .map(|name| {
                        ATTRIBUTES
                            .get(name.as_str())
                            .copied()
                            .unwrap_or(AttributeTag::NotImplemented)
                    })
                    .ok_or(NetworkError::ObjectIdOutOfRange(ObjectId(prop.object_ind)))?;

                Ok((
                    StreamId(prop.stream_id),
                    ObjectAttribute {
                        attribute: attr,
                        object_id: ObjectId(prop.object_ind),
                    },
                ))
            })
            .collect::<Result<Vec<_>, NetworkError>>()?;

        let object_id = object_index.primary_by_index(ObjectId(entry.object_ind));

        let class_parent = class_by_object
            .get(&entry.object_ind)
            .and_then(|class| PARENT_CLASSES.get(*class))
            .and_then(|parent_class| {
                let parent_class: &str = parent_class;
                object_by_class.get(parent_class)
            })
            .map(|&ind| object_index.primary_by_index(ObjectId(ind)))
            .and_then(|parent_obj| {
                resolved
                    .iter()
                    .rev()
                    .find(|prior| prior.object_id == parent_obj)
            });

        let inherited = match class_parent {
            Some(parent) => Some(parent),
            None => resolved
                .iter()
                .rev()
                .find(|prior| prior.cache_id == entry.parent_id),
        };

        let mut properties = inherited
            .map(|parent| parent.properties.clone())
            .unwrap_or_default();
        properties.extend(own);

        resolved.push(ResolvedCacheEntry {
            object_id,
            cache_id: entry.cache_id,
            properties,
        });
    }

    Ok(resolved)
}

/// The largest stream id worth believing. Real classes top out below a
/// hundred replicated properties; anything bigger is a corrupt footer and
/// would otherwise size the dense dispatch arrays.
const MAX_STREAM_ID_BOUND: i32 = 50_000;

/// Turns flattened entries into per object dispatch tables. Duplicate
/// objects share a table through their primary id, and a later entry for the
/// same object replaces the earlier one.
pub(crate) fn dispatch_tables(
    resolved: &[ResolvedCacheEntry],
    object_index: &ObjectIndex<'_>,
) -> Result<FnvHashMap<ObjectId, CacheInfo>, NetworkError> {
    let mut out: FnvHashMap<ObjectId, CacheInfo> = FnvHashMap::default();

    for entry in resolved {
        let max_stream_id = entry
            .properties
            .iter()
            .map(|(stream_id, _)| stream_id.0)
            .max()
            .map(|max| max.saturating_add(1))
            .unwrap_or(3);

        if !(1..=MAX_STREAM_ID_BOUND).contains(&max_stream_id) {
            return Err(NetworkError::StreamIdOutOfRange(StreamId(max_stream_id)));
        }

        let stream_id_bits = cmp::max(bit_width(max_stream_id as u64), 1) - 1;
        let mut attributes = vec![None; max_stream_id as usize];
        for (stream_id, attr) in &entry.properties {
            if stream_id.0 < 0 {
                return Err(NetworkError::StreamIdOutOfRange(*stream_id));
            }
            attributes[stream_id.0 as usize] = Some(*attr);
        }

        let info = CacheInfo {
            max_stream_id: max_stream_id as u32,
            stream_id_bits,
            attributes,
        };

        for id in object_index.all_indices(entry.object_id) {
            out.insert(id, info.clone());
        }
    }

    Ok(out)
}

pub(crate) fn parse(header: &Header, body: &ReplayBody<'_>) -> Result<NetworkFrames, NetworkError> {
    let ctx = NetContext::from_header(header);
    let object_index = ObjectIndex::new(&body.objects);

    let resolved = flatten_net_cache(body, &object_index)?;
    let object_ind_attributes = dispatch_tables(&resolved, &object_index)?;
    let product_decoder = ProductValueDecoder::create(ctx, &object_index);

    let spawn_by_name: FnvHashMap<&str, SpawnTrajectory> =
        SPAWN_TRAJECTORIES.iter().copied().collect();
    let spawns: Vec<SpawnTrajectory> = body
        .objects
        .iter()
        .map(|name| {
            spawn_by_name
                .get(name.as_str())
                .or_else(|| spawn_by_name.get(object_index::normalize_object(name)))
                .copied()
                .unwrap_or(SpawnTrajectory::None)
        })
        .collect();

    let Some(frame_len) = header.num_frames() else {
        return Ok(NetworkFrames { frames: Vec::new() });
    };

    if frame_len < 0 || frame_len as usize > body.network_data.len() {
        return Err(NetworkError::TooManyFrames(frame_len));
    }

    let frame_decoder = FrameDecoder {
        frames_len: frame_len as usize,
        product_decoder,
        ctx,
        body,
        spawns: &spawns,
        object_ind_attributes,
        object_index: &object_index,
    };

    Ok(NetworkFrames {
        frames: frame_decoder.decode_frames()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CacheProp, ClassIndex, ClassNetCache};

    #[test]
    fn test_version_triplet_ordering() {
        let version = VersionTriplet(18, 27, 1);
        assert!(version < VersionTriplet(19, 27, 1));
        assert!(version < VersionTriplet(18, 28, 1));
        assert!(version < VersionTriplet(18, 27, 2));
        assert_eq!(version, VersionTriplet(18, 27, 1));
        assert!(version > VersionTriplet(17, 27, 0));
    }

    #[test]
    fn lan_matches_suppress_actor_name_ids() {
        use crate::models::HeaderProp;

        let mut header = Header {
            major_version: 868,
            minor_version: 14,
            net_version: Some(0),
            game_type: String::new(),
            properties: vec![(
                String::from("MatchType"),
                HeaderProp::Name(String::from("Lan")),
            )],
        };

        let ctx = NetContext::from_header(&header);
        assert!(ctx.is_lan);
        assert!(!ctx.parse_actor_name_id);

        // licensee 20 reads the name id even on lan
        header.minor_version = 20;
        let ctx = NetContext::from_header(&header);
        assert!(ctx.is_lan);
        assert!(ctx.parse_actor_name_id);

        // online at licensee 14 reads it too
        header.minor_version = 14;
        header.properties[0].1 = HeaderProp::Name(String::from("Online"));
        let ctx = NetContext::from_header(&header);
        assert!(!ctx.is_lan);
        assert!(ctx.parse_actor_name_id);
    }

    #[test]
    fn test_build_version_comparisons() {
        assert!(build_at_least("221120.42953.406184", RL_223_BUILD));
        assert!(build_at_least("221121.0.0", RL_223_BUILD));
        assert!(build_at_least("221120.42953.406185", RL_223_BUILD));

        // component wise as integers, not a lexical string compare
        assert!(!build_at_least("221119.50000.0", RL_223_BUILD));
        assert!(!build_at_least("221120.42952.999999", RL_223_BUILD));
        assert!(!build_at_least("garbage", RL_223_BUILD));
        assert!(!build_at_least("", RL_223_BUILD));
    }

    fn body_fixture<'a>(
        objects: Vec<String>,
        class_indices: Vec<ClassIndex>,
        net_cache: Vec<ClassNetCache>,
    ) -> ReplayBody<'a> {
        ReplayBody {
            levels: Vec::new(),
            keyframes: Vec::new(),
            debug_info: Vec::new(),
            tick_marks: Vec::new(),
            packages: Vec::new(),
            objects,
            names: Vec::new(),
            class_indices,
            net_cache,
            network_data: &[],
        }
    }

    fn cache_entry(
        object_ind: i32,
        parent_id: i32,
        cache_id: i32,
        props: &[(i32, i32)],
    ) -> ClassNetCache {
        ClassNetCache {
            object_ind,
            parent_id,
            cache_id,
            properties: props
                .iter()
                .map(|&(object_ind, stream_id)| CacheProp {
                    object_ind,
                    stream_id,
                })
                .collect(),
        }
    }

    #[test]
    fn flatten_inherits_from_closest_prior_cache_id() {
        // three classes, two sharing a cache id; the last entry must inherit
        // from the closest prior entry, not the first match in list order
        let objects: Vec<String> = (0..6)
            .map(|i| format!("TAGame.Synthetic_{}:Prop", i))
            .chain([
                String::from("TAGame.ClassA"),
                String::from("TAGame.ClassB"),
                String::from("TAGame.ClassC"),
            ])
            .collect();

        let body = body_fixture(
            objects,
            vec![
                ClassIndex {
                    class: String::from("TAGame.ClassA"),
                    index: 6,
                },
                ClassIndex {
                    class: String::from("TAGame.ClassB"),
                    index: 7,
                },
                ClassIndex {
                    class: String::from("TAGame.ClassC"),
                    index: 8,
                },
            ],
            vec![
                cache_entry(6, 20, 38, &[(0, 0), (1, 1)]),
                cache_entry(7, 38, 38, &[(2, 2)]),
                cache_entry(8, 38, 48, &[(3, 3)]),
            ],
        );

        let index = ObjectIndex::new(&body.objects);
        let resolved = flatten_net_cache(&body, &index).unwrap();

        // entry one stands alone (nothing prior carries cache id 20)
        assert_eq!(resolved[0].properties.len(), 2);

        // entry two inherits entry one through the shared cache id
        let streams: Vec<i32> = resolved[1].properties.iter().map(|(s, _)| s.0).collect();
        assert_eq!(streams, vec![0, 1, 2]);

        // entry three's parent id 38 matches the *second* entry (reverse
        // scan), so it sees the whole accumulated chain
        let streams: Vec<i32> = resolved[2].properties.iter().map(|(s, _)| s.0).collect();
        assert_eq!(streams, vec![0, 1, 2, 3]);
    }

    #[test]
    fn flatten_prefers_static_class_hierarchy() {
        // TAGame.Vehicle_TA inherits TAGame.RBActor_TA per the static
        // hierarchy even though its parent_id points nowhere
        let objects = vec![
            String::from("TAGame.RBActor_TA:ReplicatedRBState"),
            String::from("TAGame.Vehicle_TA:ReplicatedThrottle"),
            String::from("TAGame.RBActor_TA"),
            String::from("TAGame.Vehicle_TA"),
        ];
        let body = body_fixture(
            objects,
            vec![
                ClassIndex {
                    class: String::from("TAGame.RBActor_TA"),
                    index: 2,
                },
                ClassIndex {
                    class: String::from("TAGame.Vehicle_TA"),
                    index: 3,
                },
            ],
            vec![
                cache_entry(2, 0, 5, &[(0, 7)]),
                cache_entry(3, 999, 6, &[(1, 8)]),
            ],
        );

        let index = ObjectIndex::new(&body.objects);
        let resolved = flatten_net_cache(&body, &index).unwrap();

        let props = &resolved[1].properties;
        assert_eq!(props.len(), 2);
        assert_eq!(props[0].0, StreamId(7));
        assert_eq!(props[0].1.attribute, AttributeTag::RigidBody);
        assert_eq!(props[1].0, StreamId(8));
        assert_eq!(props[1].1.attribute, AttributeTag::Byte);
    }

    #[test]
    fn resolved_entries_contain_their_ancestors() {
        // monotonicity: a child's flattened list is a superset of its parent's
        let objects = vec![
            String::from("A:x"),
            String::from("B:y"),
            String::from("C:z"),
            String::from("ClassA"),
            String::from("ClassB"),
            String::from("ClassC"),
        ];
        let body = body_fixture(
            objects,
            Vec::new(),
            vec![
                cache_entry(3, 0, 1, &[(0, 0)]),
                cache_entry(4, 1, 2, &[(1, 1)]),
                cache_entry(5, 2, 3, &[(2, 2)]),
            ],
        );
        let index = ObjectIndex::new(&body.objects);
        let resolved = flatten_net_cache(&body, &index).unwrap();
        for pair in resolved.windows(2) {
            for prop in &pair[0].properties {
                assert!(pair[1].properties.contains(prop));
            }
        }
    }

    #[test]
    fn dispatch_table_widths() {
        let objects = vec![String::from("A:x"), String::from("ClassA")];
        let body = body_fixture(
            objects,
            Vec::new(),
            vec![cache_entry(1, 0, 1, &[(0, 17)])],
        );
        let index = ObjectIndex::new(&body.objects);
        let resolved = flatten_net_cache(&body, &index).unwrap();
        let tables = dispatch_tables(&resolved, &index).unwrap();

        let info = &tables[&ObjectId(1)];
        assert_eq!(info.max_stream_id, 18);
        assert_eq!(info.stream_id_bits, 4);
        assert_eq!(info.attributes.len(), 18);
        assert!(info.attributes[17].is_some());
        assert!(info.attributes[3].is_none());
    }

    #[test]
    fn dispatch_table_empty_entry_defaults() {
        let objects = vec![String::from("ClassA")];
        let body = body_fixture(objects, Vec::new(), vec![cache_entry(0, 0, 1, &[])]);
        let index = ObjectIndex::new(&body.objects);
        let resolved = flatten_net_cache(&body, &index).unwrap();
        let tables = dispatch_tables(&resolved, &index).unwrap();

        let info = &tables[&ObjectId(0)];
        assert_eq!(info.max_stream_id, 3);
        assert_eq!(info.stream_id_bits, 1);
    }

    #[test]
    fn out_of_range_cache_property_is_rejected() {
        let objects = vec![String::from("ClassA")];
        let body = body_fixture(objects, Vec::new(), vec![cache_entry(0, 0, 1, &[(9, 1)])]);
        let index = ObjectIndex::new(&body.objects);
        let err = flatten_net_cache(&body, &index).unwrap_err();
        assert_eq!(err, NetworkError::ObjectIdOutOfRange(ObjectId(9)));
    }
}
