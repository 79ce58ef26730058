use crate::data::OBJECT_PARENTS;
use crate::network::ObjectId;
use fnv::FnvHashMap;
use std::collections::hash_map::Entry;

/// A lookup of an object's id (its index in the object table) from its name.
///
/// The exact same name can appear multiple times in the object table, so
/// additional occurrences are designated "secondary ids" and an
/// `ObjectIndex` is a bidirectional map of primary to secondary ids.
pub(crate) struct ObjectIndex<'a> {
    name_index: FnvHashMap<&'a str, ObjectId>,
    secondary_indices: FnvHashMap<ObjectId, Vec<ObjectId>>,
    primary_ind: FnvHashMap<ObjectId, ObjectId>,
}

impl<'a> ObjectIndex<'a> {
    pub(crate) fn new(objects: &'a [String]) -> Self {
        let mut name_index: FnvHashMap<&str, ObjectId> = FnvHashMap::default();
        let mut secondary_indices: FnvHashMap<ObjectId, Vec<ObjectId>> = FnvHashMap::default();
        let mut primary_ind: FnvHashMap<ObjectId, ObjectId> = FnvHashMap::default();

        for (i, name) in objects.iter().enumerate() {
            let val = ObjectId(i as i32);
            match name_index.entry(name) {
                Entry::Occupied(occupied) => {
                    primary_ind.insert(val, *occupied.get());
                    secondary_indices
                        .entry(*occupied.get())
                        .or_default()
                        .push(val);
                }
                Entry::Vacant(vacant) => {
                    vacant.insert(val);
                }
            };
        }

        Self {
            name_index,
            secondary_indices,
            primary_ind,
        }
    }

    /// Return the primary `ObjectId` given the object name
    pub(crate) fn primary_by_name(&self, name: &str) -> Option<ObjectId> {
        self.name_index.get(name).copied()
    }

    /// Return the primary `ObjectId` given either a primary or secondary id
    pub(crate) fn primary_by_index(&self, id: ObjectId) -> ObjectId {
        self.primary_ind.get(&id).copied().unwrap_or(id)
    }

    /// Returns every id equivalent to the primary id passed in, self included
    pub(crate) fn all_indices(&self, id: ObjectId) -> impl Iterator<Item = ObjectId> + '_ {
        std::iter::once(id).chain(
            self.secondary_indices
                .get(&id)
                .into_iter()
                .flatten()
                .copied(),
        )
    }
}

/// Map dependent actors embed the stadium in their object name
/// (`Stadium_P.TheWorld:PersistentLevel.VehiclePickup_Boost_TA_30`), so the
/// stadium and instance suffix are stripped before consulting the parent
/// table. Replication info archetypes short circuit straight to the GRI
/// class.
pub(crate) fn normalize_object(name: &str) -> &str {
    if name.contains("TheWorld:PersistentLevel.CrowdActor_TA") {
        "TheWorld:PersistentLevel.CrowdActor_TA"
    } else if name.contains("TheWorld:PersistentLevel.VehiclePickup_Boost_TA") {
        "TheWorld:PersistentLevel.VehiclePickup_Boost_TA"
    } else if name.contains("TheWorld:PersistentLevel.CrowdManager_TA") {
        "TheWorld:PersistentLevel.CrowdManager_TA"
    } else if name.contains("TheWorld:PersistentLevel.BreakOutActor_Platform_TA") {
        "TheWorld:PersistentLevel.BreakOutActor_Platform_TA"
    } else if name.contains("TheWorld:PersistentLevel.InMapScoreboard_TA") {
        "TheWorld:PersistentLevel.InMapScoreboard_TA"
    } else if name.contains("TheWorld:PersistentLevel.HauntedBallTrapTrigger_TA") {
        "TheWorld:PersistentLevel.HauntedBallTrapTrigger_TA"
    } else if name.contains(":GameReplicationInfoArchetype") {
        "TAGame.GRI_TA"
    } else {
        name
    }
}

/// The object that an actor's dispatch table is keyed under: the parent
/// table consulted with the raw name first and the normalized name second.
/// `None` means the actor's updates cannot be decoded and the stream is lost
/// from here on.
pub(crate) fn resolve_parent(name: &str) -> Option<&str> {
    if let Some(parent) = OBJECT_PARENTS.get(name) {
        return Some(*parent);
    }

    let normalized = normalize_object(name);
    if normalized == name {
        return None;
    }

    Some(OBJECT_PARENTS.get(normalized).copied().unwrap_or(normalized))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_designates_primary_and_secondary() {
        let objects = vec![
            String::from("TAGame.Ball_TA"),
            String::from("TAGame.Car_TA"),
            String::from("TAGame.Ball_TA"),
        ];
        let index = ObjectIndex::new(&objects);
        assert_eq!(index.primary_by_name("TAGame.Ball_TA"), Some(ObjectId(0)));
        assert_eq!(index.primary_by_index(ObjectId(2)), ObjectId(0));
        assert_eq!(index.primary_by_index(ObjectId(1)), ObjectId(1));
        let all: Vec<_> = index.all_indices(ObjectId(0)).collect();
        assert_eq!(all, vec![ObjectId(0), ObjectId(2)]);
    }

    #[test]
    fn archetypes_resolve_through_the_table() {
        assert_eq!(
            resolve_parent("Archetypes.Car.Car_Default"),
            Some("TAGame.Car_TA")
        );
        assert_eq!(
            resolve_parent("Archetypes.Ball.Ball_Default"),
            Some("TAGame.Ball_TA")
        );
    }

    #[test]
    fn stadium_names_normalize_before_lookup() {
        assert_eq!(
            resolve_parent("Stadium_P.TheWorld:PersistentLevel.VehiclePickup_Boost_TA_30"),
            Some("TAGame.VehiclePickup_Boost_TA")
        );
        assert_eq!(
            resolve_parent("Wasteland_S_P.TheWorld:PersistentLevel.CrowdActor_TA_1"),
            Some("TAGame.CrowdActor_TA")
        );
    }

    #[test]
    fn gri_archetypes_short_circuit() {
        assert_eq!(
            resolve_parent("GameInfo_Soccar.GameInfo.GameInfo_Soccar:GameReplicationInfoArchetype"),
            Some("TAGame.GRI_TA")
        );
    }

    #[test]
    fn unknown_objects_have_no_parent() {
        assert_eq!(resolve_parent("TAGame.MadeUp_TA"), None);
    }
}
