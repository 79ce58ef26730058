use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::fmt::Display;

/// For the times when the `Display` string is more appropriate than the
/// default serialization strategy (eg: 64bit integers in JSON)
pub(crate) fn display_it<T, S>(data: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    serializer.collect_str(data)
}

/// Serializes a key value sequence as a map. Nothing guarantees replay
/// property keys are unique, so the data stays a sequence internally, but
/// JSON consumers expect an object.
pub(crate) fn pair_vec<K, V, S>(inp: &[(K, V)], serializer: S) -> Result<S::Ok, S::Error>
where
    K: Serialize,
    V: Serialize,
    S: Serializer,
{
    let mut state = serializer.serialize_map(Some(inp.len()))?;
    for (key, val) in inp.iter() {
        state.serialize_entry(key, val)?;
    }
    state.end()
}

/// `pair_vec` lifted over a list of property sets
pub(crate) fn pair_vecs<K, V, S>(inp: &[Vec<(K, V)>], serializer: S) -> Result<S::Ok, S::Error>
where
    K: Serialize,
    V: Serialize,
    S: Serializer,
{
    struct AsMap<'a, K, V>(&'a [(K, V)]);

    impl<K: Serialize, V: Serialize> Serialize for AsMap<'_, K, V> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            pair_vec(self.0, serializer)
        }
    }

    let mut state = serializer.serialize_seq(Some(inp.len()))?;
    for props in inp.iter() {
        state.serialize_element(&AsMap(props))?;
    }
    state.end()
}
