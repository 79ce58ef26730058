//! Decodes a complete replay assembled in memory: header properties, crc
//! framing, a two frame network stream, and the footer metadata the network
//! decoder feeds on.

use gondola::{ActorId, Attribute, CrcCheck, NetworkParse, ObjectId, ParserBuilder, StreamId};

/// Builds the little endian bit stream of the network data: values fill
/// from the low bit up, the same order the decoder consumes them.
struct BitWriter {
    bits: Vec<bool>,
}

impl BitWriter {
    fn new() -> Self {
        BitWriter { bits: Vec::new() }
    }

    fn push_bit(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    fn push_bits(&mut self, value: u64, width: u32) {
        for i in 0..width {
            self.bits.push((value >> i) & 1 == 1);
        }
    }

    fn push_bytes(&mut self, data: &[u8]) {
        for &byte in data {
            self.push_bits(u64::from(byte), 8);
        }
    }

    fn push_f32(&mut self, value: f32) {
        self.push_bytes(&value.to_le_bytes());
    }

    fn push_i32(&mut self, value: i32) {
        self.push_bytes(&value.to_le_bytes());
    }

    /// Inverse of the decoder's bounded magnitude read: a continuation bit
    /// exists only when the extended value stays strictly under the bound
    fn push_bits_max(&mut self, value: u64, width: u32, max: u64) {
        let threshold = 1u64 << width;
        if value >= threshold {
            self.push_bits(value - threshold, width);
            self.push_bit(true);
        } else {
            self.push_bits(value, width);
            if value + threshold < max {
                self.push_bit(false);
            }
        }
    }

    fn finish(self) -> Vec<u8> {
        let mut out = vec![0u8; self.bits.len().div_ceil(8)];
        for (i, bit) in self.bits.iter().enumerate() {
            if *bit {
                out[i / 8] |= 1 << (i % 8);
            }
        }
        out
    }
}

fn str8(text: &str) -> Vec<u8> {
    let mut out = ((text.len() + 1) as i32).to_le_bytes().to_vec();
    out.extend_from_slice(text.as_bytes());
    out.push(0);
    out
}

fn str16(text: &str) -> Vec<u8> {
    // ascii only fixtures, so windows-1252 with a positive length
    let mut out = ((text.len() + 1) as i32).to_le_bytes().to_vec();
    out.extend_from_slice(text.as_bytes());
    out.push(0);
    out
}

fn int_prop(name: &str, value: i32) -> Vec<u8> {
    let mut out = str8(name);
    out.extend(str8("IntProperty"));
    out.extend(4u64.to_le_bytes());
    out.extend(value.to_le_bytes());
    out
}

fn name_prop(name: &str, value: &str) -> Vec<u8> {
    let mut out = str8(name);
    out.extend(str8("NameProperty"));
    let encoded = str16(value);
    out.extend((encoded.len() as u64).to_le_bytes());
    out.extend(encoded);
    out
}

fn header_block() -> Vec<u8> {
    let mut out = Vec::new();
    out.extend(868i32.to_le_bytes());
    out.extend(20i32.to_le_bytes());
    out.extend(7i32.to_le_bytes());
    out.extend(str16("TAGame.Replay_Soccar_TA"));
    out.extend(int_prop("NumFrames", 2));
    out.extend(int_prop("MaxChannels", 1023));
    out.extend(name_prop("MatchType", "Online"));
    out.extend(str8("None"));
    out
}

/// Channel 0 spawns a team actor, its score updates to 3, then the actor is
/// destroyed.
fn network_stream() -> Vec<u8> {
    let mut w = BitWriter::new();

    w.push_f32(1.0);
    w.push_f32(0.03);
    w.push_bit(true);
    w.push_bits_max(0, 9, 1023); // actor id 0
    w.push_bit(true); // alive
    w.push_bit(true); // new
    w.push_i32(12); // name id (engine 868, licensee 20)
    w.push_bit(false); // static flag
    w.push_i32(2); // object: Archetypes.Teams.Team0
    w.push_bit(false); // end of frame

    w.push_f32(1.05);
    w.push_f32(0.05);
    w.push_bit(true);
    w.push_bits_max(0, 9, 1023);
    w.push_bit(true); // alive
    w.push_bit(false); // existing actor
    w.push_bit(true); // property follows
    w.push_bits_max(4, 2, 5); // stream id of Engine.TeamInfo:Score
    w.push_i32(3);
    w.push_bit(false); // no more properties
    w.push_bit(true);
    w.push_bits_max(0, 9, 1023);
    w.push_bit(false); // not alive: destroyed
    w.push_bit(false); // end of frame

    w.finish()
}

fn text_list(items: &[&str]) -> Vec<u8> {
    let mut out = (items.len() as i32).to_le_bytes().to_vec();
    for item in items {
        out.extend(str16(item));
    }
    out
}

fn body_block(network: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();

    out.extend(text_list(&["Stadium_P"]));

    // keyframes
    out.extend(1i32.to_le_bytes());
    out.extend(1.0f32.to_le_bytes());
    out.extend(0i32.to_le_bytes());
    out.extend(0i32.to_le_bytes());

    out.extend((network.len() as i32).to_le_bytes());
    out.extend_from_slice(network);

    // debug info
    out.extend(0i32.to_le_bytes());

    // tick marks
    out.extend(1i32.to_le_bytes());
    out.extend(str16("Team1Goal"));
    out.extend(1i32.to_le_bytes());

    // packages
    out.extend(0i32.to_le_bytes());

    out.extend(text_list(&[
        "Engine.TeamInfo:Score",
        "TAGame.Team_Soccar_TA",
        "Archetypes.Teams.Team0",
    ]));

    // names
    out.extend(0i32.to_le_bytes());

    // class indices
    out.extend(1i32.to_le_bytes());
    out.extend(str8("TAGame.Team_Soccar_TA"));
    out.extend(1i32.to_le_bytes());

    // class net cache: one class replicating the team score at stream id 4
    out.extend(1i32.to_le_bytes());
    out.extend(1i32.to_le_bytes()); // object
    out.extend(0i32.to_le_bytes()); // parent id
    out.extend(1i32.to_le_bytes()); // cache id
    out.extend(1i32.to_le_bytes()); // one property
    out.extend(0i32.to_le_bytes());
    out.extend(4i32.to_le_bytes());

    out
}

fn replay_bytes() -> Vec<u8> {
    let header = header_block();
    let body = body_block(&network_stream());

    let mut out = Vec::new();
    out.extend((header.len() as i32).to_le_bytes());
    out.extend(gondola::crc::calc_crc(&header).to_le_bytes());
    out.extend(&header);
    out.extend((body.len() as i32).to_le_bytes());
    out.extend(gondola::crc::calc_crc(&body).to_le_bytes());
    out.extend(&body);
    out
}

#[test]
fn decode_synthetic_replay_end_to_end() {
    let data = replay_bytes();
    let replay = ParserBuilder::new(&data)
        .always_check_crc()
        .must_parse_network_data()
        .parse()
        .unwrap();

    assert_eq!(replay.major_version, 868);
    assert_eq!(replay.minor_version, 20);
    assert_eq!(replay.net_version, Some(7));
    assert_eq!(replay.game_type, "TAGame.Replay_Soccar_TA");
    assert_eq!(replay.levels, vec![String::from("Stadium_P")]);
    assert_eq!(replay.tick_marks[0].description, "Team1Goal");
    assert_eq!(replay.objects.len(), 3);
    assert_eq!(replay.net_cache[0].properties[0].stream_id, 4);

    let frames = replay.network_frames.as_ref().unwrap();
    assert_eq!(frames.frames.len(), 2);

    let spawn = &frames.frames[0];
    assert_eq!(spawn.new_actors.len(), 1);
    assert_eq!(spawn.new_actors[0].actor_id, ActorId(0));
    assert_eq!(spawn.new_actors[0].name_id, Some(12));
    assert_eq!(spawn.new_actors[0].object_id, ObjectId(2));

    let update = &frames.frames[1];
    assert_eq!(update.updated_actors.len(), 1);
    assert_eq!(update.updated_actors[0].stream_id, StreamId(4));
    assert_eq!(update.updated_actors[0].object_id, ObjectId(0));
    assert_eq!(update.updated_actors[0].attribute, Attribute::Int(3));
    assert_eq!(update.deleted_actors, vec![ActorId(0)]);
}

#[test]
fn every_actor_update_follows_a_spawn() {
    let data = replay_bytes();
    let replay = ParserBuilder::new(&data)
        .must_parse_network_data()
        .parse()
        .unwrap();

    let mut live = std::collections::HashSet::new();
    for frame in &replay.network_frames.unwrap().frames {
        for actor in &frame.new_actors {
            live.insert(actor.actor_id);
        }
        for update in &frame.updated_actors {
            assert!(live.contains(&update.actor_id));
        }
        for deleted in &frame.deleted_actors {
            assert!(live.remove(deleted));
        }
    }
}

#[test]
fn corrupt_crc_is_reported() {
    let mut data = replay_bytes();
    let last = data.len() - 1;
    data[last] ^= 0xff;

    let err = ParserBuilder::new(&data)
        .always_check_crc()
        .never_parse_network_data()
        .parse()
        .unwrap_err();
    assert!(err.to_string().starts_with("Crc mismatch."));
}

#[test]
fn corrupt_network_data_can_be_ignored() {
    let header = header_block();
    // a network stream of garbage: frame time is denormal
    let body = body_block(&[0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);

    let mut data = Vec::new();
    data.extend((header.len() as i32).to_le_bytes());
    data.extend(gondola::crc::calc_crc(&header).to_le_bytes());
    data.extend(&header);
    data.extend((body.len() as i32).to_le_bytes());
    data.extend(gondola::crc::calc_crc(&body).to_le_bytes());
    data.extend(&body);

    let strict = ParserBuilder::new(&data)
        .with_crc_check(CrcCheck::Never)
        .with_network_parse(NetworkParse::Always)
        .parse();
    assert!(strict.is_err());

    let lenient = ParserBuilder::new(&data)
        .with_crc_check(CrcCheck::Never)
        .with_network_parse(NetworkParse::IgnoreOnError)
        .parse()
        .unwrap();
    assert!(lenient.network_frames.is_none());
    assert_eq!(lenient.objects.len(), 3);
}

#[test]
fn replay_serializes_to_json() {
    let data = replay_bytes();
    let replay = ParserBuilder::new(&data)
        .must_parse_network_data()
        .parse()
        .unwrap();

    let json = serde_json::to_string(&replay).unwrap();
    assert!(json.contains("\"NumFrames\":2"));
    assert!(json.contains("\"game_type\":\"TAGame.Replay_Soccar_TA\""));
    assert!(json.contains("\"updated_actors\""));
}
