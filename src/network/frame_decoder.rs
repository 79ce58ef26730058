use crate::bits::ReplayBits;
use crate::errors::{AttributeError, FrameContext, FrameError, NetworkError};
use crate::network::attributes::{AttributeDecoder, ProductValueDecoder};
use crate::network::object_index::{resolve_parent, ObjectIndex};
use crate::network::{
    ActorId, CacheInfo, Frame, NetContext, NewActor, ObjectId, SpawnTrajectory, StreamId,
    Trajectory, UpdatedAttribute,
};
use crate::parser::ReplayBody;
use bitter::{BitReader, LittleEndianReader};
use fnv::FnvHashMap;

pub(crate) struct FrameDecoder<'a, 'b: 'a> {
    pub frames_len: usize,
    pub product_decoder: ProductValueDecoder,
    pub ctx: NetContext,
    pub body: &'a ReplayBody<'b>,
    pub spawns: &'a [SpawnTrajectory],
    pub object_ind_attributes: FnvHashMap<ObjectId, CacheInfo>,
    pub object_index: &'a ObjectIndex<'a>,
}

#[derive(Debug)]
enum DecodedFrame {
    EndFrame,
    Frame(Frame),
}

impl<'a, 'b> FrameDecoder<'a, 'b> {
    fn parse_new_actor(
        &self,
        bits: &mut LittleEndianReader<'_>,
        actor_id: ActorId,
    ) -> Result<NewActor, FrameError> {
        let name_id = if self.ctx.parse_actor_name_id {
            Some(
                bits.read_i32()
                    .ok_or(FrameError::NotEnoughDataFor("Name Id"))?,
            )
        } else {
            None
        };

        let _static = bits
            .read_bit()
            .ok_or(FrameError::NotEnoughDataFor("New actor static flag"))?;

        let object_id = bits
            .read_i32()
            .map(ObjectId)
            .ok_or(FrameError::NotEnoughDataFor("Object Id"))?;

        let spawn = self
            .spawns
            .get(usize::from(object_id))
            .ok_or(FrameError::ObjectIdOutOfRange { obj: object_id })?;

        let initial_trajectory = Trajectory::from_spawn(bits, *spawn, self.ctx.net_version())
            .ok_or(FrameError::NotEnoughDataFor("New Actor"))?;

        Ok(NewActor {
            actor_id,
            name_id,
            object_id,
            initial_trajectory,
        })
    }

    /// The dispatch table for an actor's object hangs off the object's
    /// parent. The first update of each distinct object pays for the name
    /// resolution; every later one is a single map hit.
    fn dispatch_table(
        &self,
        actor_id: ActorId,
        object_id: ObjectId,
        memo: &mut FnvHashMap<ObjectId, ObjectId>,
    ) -> Result<&CacheInfo, FrameError> {
        let cache_key = match memo.get(&object_id) {
            Some(key) => *key,
            None => {
                let name = self
                    .body
                    .objects
                    .get(usize::from(object_id))
                    .ok_or(FrameError::ObjectIdOutOfRange { obj: object_id })?;

                let parent = resolve_parent(name).ok_or(FrameError::UnresolvedParent {
                    actor: actor_id,
                    actor_object: object_id,
                })?;

                let key = self
                    .object_index
                    .primary_by_name(parent)
                    .ok_or(FrameError::MissingCache {
                        actor: actor_id,
                        actor_object: object_id,
                    })?;

                memo.insert(object_id, key);
                key
            }
        };

        self.object_ind_attributes
            .get(&cache_key)
            .ok_or(FrameError::MissingCache {
                actor: actor_id,
                actor_object: object_id,
            })
    }

    #[allow(clippy::too_many_arguments)]
    fn decode_frame(
        &self,
        attr_decoder: &AttributeDecoder,
        bits: &mut LittleEndianReader<'_>,
        buf: &mut [u8],
        actors: &mut FnvHashMap<ActorId, ObjectId>,
        dispatch_memo: &mut FnvHashMap<ObjectId, ObjectId>,
        new_actors: &mut Vec<NewActor>,
        deleted_actors: &mut Vec<ActorId>,
        updated_actors: &mut Vec<UpdatedAttribute>,
    ) -> Result<DecodedFrame, FrameError> {
        let time = bits
            .read_f32()
            .ok_or(FrameError::NotEnoughDataFor("Time"))?;

        if time < 0.0 || (time > 0.0 && time < 1e-10) {
            return Err(FrameError::TimeOutOfRange { time });
        }

        let delta = bits
            .read_f32()
            .ok_or(FrameError::NotEnoughDataFor("Delta"))?;

        if delta < 0.0 || (delta > 0.0 && delta < 1e-10) {
            return Err(FrameError::DeltaOutOfRange { delta });
        }

        if time == 0.0 && delta == 0.0 {
            return Ok(DecodedFrame::EndFrame);
        }

        while bits
            .read_bit()
            .ok_or(FrameError::NotEnoughDataFor("Actor data"))?
        {
            let actor_id = bits
                .read_bits_max(self.ctx.actor_id_bits, u64::from(self.ctx.actor_id_max))
                .map(|x| ActorId(x as i32))
                .ok_or(FrameError::NotEnoughDataFor("Actor Id"))?;

            let alive = bits
                .read_bit()
                .ok_or(FrameError::NotEnoughDataFor("Is actor alive"))?;

            if !alive {
                actors.remove(&actor_id);
                deleted_actors.push(actor_id);
                continue;
            }

            let new = bits
                .read_bit()
                .ok_or(FrameError::NotEnoughDataFor("Is new actor"))?;

            if new {
                let actor = self.parse_new_actor(bits, actor_id)?;

                // It's common for an actor id to already exist when a
                // previous actor on the channel was dropped without a
                // delete, so the registration is overwritten.
                actors.insert(actor.actor_id, actor.object_id);
                new_actors.push(actor);
            } else {
                let object_id = *actors
                    .get(&actor_id)
                    .ok_or(FrameError::MissingActor { actor: actor_id })?;

                let cache_info = self.dispatch_table(actor_id, object_id, dispatch_memo)?;

                while bits
                    .read_bit()
                    .ok_or(FrameError::NotEnoughDataFor("Is prop present"))?
                {
                    let stream_id = bits
                        .read_bits_max(
                            cache_info.stream_id_bits,
                            u64::from(cache_info.max_stream_id),
                        )
                        .map(|x| StreamId(x as i32))
                        .ok_or(FrameError::NotEnoughDataFor("Prop id"))?;

                    // Out of range and never-replicated stream ids fail the
                    // same way: the stream is desynchronized beyond repair
                    let attr = cache_info
                        .attributes
                        .get(stream_id.0 as usize)
                        .and_then(|slot| slot.as_ref())
                        .ok_or(FrameError::MissingAttribute {
                            actor: actor_id,
                            actor_object: object_id,
                            attribute_stream: stream_id,
                        })?;

                    let attribute =
                        attr_decoder
                            .decode(attr.attribute, bits, buf)
                            .map_err(|e| match e {
                                AttributeError::Unimplemented => FrameError::MissingAttribute {
                                    actor: actor_id,
                                    actor_object: object_id,
                                    attribute_stream: stream_id,
                                },
                                e => FrameError::AttributeError {
                                    actor: actor_id,
                                    actor_object: object_id,
                                    attribute_stream: stream_id,
                                    error: e,
                                },
                            })?;

                    updated_actors.push(UpdatedAttribute {
                        actor_id,
                        stream_id,
                        object_id: attr.object_id,
                        attribute,
                    });
                }
            }
        }

        Ok(DecodedFrame::Frame(Frame {
            time,
            delta,
            new_actors: new_actors.drain(..).collect(),
            deleted_actors: deleted_actors.drain(..).collect(),
            updated_actors: updated_actors.drain(..).collect(),
        }))
    }

    pub fn decode_frames(&self) -> Result<Vec<Frame>, NetworkError> {
        let attr_decoder = AttributeDecoder::new(self.ctx, self.product_decoder);
        let mut frames: Vec<Frame> = Vec::with_capacity(self.frames_len);
        let mut actors = FnvHashMap::default();
        let mut dispatch_memo = FnvHashMap::default();
        let mut bits = LittleEndianReader::new(self.body.network_data);
        let mut buf = [0u8; 1024];
        let mut new_actors = Vec::new();
        let mut updated_actors = Vec::new();
        let mut deleted_actors = Vec::new();
        let total_bits = self.body.network_data.len() * 8;

        while !bits.is_empty() && frames.len() < self.frames_len {
            let frame = self
                .decode_frame(
                    &attr_decoder,
                    &mut bits,
                    &mut buf,
                    &mut actors,
                    &mut dispatch_memo,
                    &mut new_actors,
                    &mut deleted_actors,
                    &mut updated_actors,
                )
                .map_err(|e| {
                    NetworkError::FrameError(
                        e,
                        Box::new(FrameContext {
                            frame_index: frames.len(),
                            bit_offset: total_bits
                                - bits.bits_remaining().unwrap_or_default(),
                            objects: self.body.objects.clone(),
                            object_attributes: self
                                .object_ind_attributes
                                .iter()
                                .map(|(key, cache)| {
                                    (
                                        *key,
                                        cache
                                            .attributes
                                            .iter()
                                            .enumerate()
                                            .filter_map(|(stream_id, slot)| {
                                                slot.as_ref().map(|attr| {
                                                    (StreamId(stream_id as i32), attr.object_id)
                                                })
                                            })
                                            .collect(),
                                    )
                                })
                                .collect(),
                            frames: frames.clone(),
                            actors: actors.clone(),
                            new_actors: new_actors.clone(),
                            updated_actors: updated_actors.clone(),
                        }),
                    )
                })?;

            match frame {
                DecodedFrame::EndFrame => break,
                DecodedFrame::Frame(frame) => frames.push(frame),
            }
        }

        if self.ctx.at_least_net(868, 24, 10) {
            bits.read_u32()
                .ok_or(NetworkError::NotEnoughDataFor("Trailer"))?;
        }

        // every bit between frame start and stream end is accounted for;
        // only byte padding may remain once the advertised count decodes
        if frames.len() == self.frames_len && bits.has_bits_remaining(8) {
            return Err(NetworkError::TrailingBits(
                bits.bits_remaining().unwrap_or_default(),
            ));
        }

        Ok(frames)
    }
}
