//! Layered, read-only views over stacks of nested mappings.
//!
//! A [`DeepChainMap`] borrows an ordered list of layers, highest priority
//! first. Lookups walk the layers front to back; when the winning value is a
//! mapping, the result is another [`DeepChainMap`] over the mappings stored
//! under that key in every layer that defines it. [`DeepChainMap::flatten`]
//! walks the layers back to front and deep-merges them into one owned map.
//!
//! The view holds shared borrows of its layers, so a layer cannot change
//! while a view over it is alive. Callers that need to keep mutating a layer
//! should clone it before building the view.

mod error;
mod flatten;
mod value;

use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt::Debug;

pub use error::LookupError;
pub use value::{from_toml_table, into_toml_table, Map, Value};

use flatten::depth_first_update;

/// An ordered stack of borrowed layers presented as one mapping.
///
/// ## Example
///
/// ```
/// use deep_chainmap::{DeepChainMap, Map, Value};
///
/// let defaults: Map<String, i64> = Map::from([
///     ("port".to_string(), Value::Leaf(80)),
///     ("workers".to_string(), Value::Leaf(4)),
/// ]);
/// let overrides: Map<String, i64> = Map::from([("port".to_string(), Value::Leaf(8080))]);
///
/// let view = DeepChainMap::new(vec![&overrides, &defaults]);
///
/// assert_eq!(view.lookup("port")?.as_leaf(), Some(&8080));
/// assert_eq!(view.lookup("workers")?.as_leaf(), Some(&4));
/// # Ok::<(), deep_chainmap::LookupError<String>>(())
/// ```
#[derive(Debug)]
pub struct DeepChainMap<'a, K, V> {
    maps: Vec<&'a Map<K, V>>,
}

/// The result of a successful lookup.
#[derive(Debug)]
pub enum Resolved<'a, K, V> {
    /// The value from the highest-priority layer defining the key.
    Leaf(&'a V),
    /// A view over the nested mappings under the key.
    Nested(DeepChainMap<'a, K, V>),
}

impl<'a, K, V> DeepChainMap<'a, K, V> {
    /// Creates a view over `maps`, highest priority first.
    pub fn new(maps: Vec<&'a Map<K, V>>) -> Self {
        Self { maps }
    }

    /// Returns the layers, highest priority first.
    pub fn maps(&self) -> &[&'a Map<K, V>] {
        &self.maps
    }

    /// Returns a view with `layer` added in front of the existing layers.
    pub fn new_child(&self, layer: &'a Map<K, V>) -> Self {
        let mut maps = Vec::with_capacity(self.maps.len() + 1);
        maps.push(layer);
        maps.extend_from_slice(&self.maps);
        Self { maps }
    }

    /// Returns a view over every layer except the first.
    pub fn parents(&self) -> Self {
        Self {
            maps: self.maps.iter().skip(1).copied().collect(),
        }
    }
}

impl<'a, K: Ord, V> DeepChainMap<'a, K, V> {
    /// Looks up `key`, failing with [`LookupError::NotFound`] when no layer
    /// defines it.
    ///
    /// Only the variant of the highest-priority entry decides whether the
    /// result is a leaf or a nested view. When it is a mapping, lower layers
    /// holding a leaf under the same key do not contribute to the view.
    pub fn lookup<Q>(&self, key: &Q) -> Result<Resolved<'a, K, V>, LookupError<K>>
    where
        K: Borrow<Q> + Debug,
        Q: Ord + ToOwned<Owned = K> + ?Sized,
    {
        self.get(key).ok_or_else(|| LookupError::NotFound(key.to_owned()))
    }

    /// Like [`lookup`](Self::lookup), but returns `None` for a missing key.
    pub fn get<Q>(&self, key: &Q) -> Option<Resolved<'a, K, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut hits = self.maps.iter().copied().filter_map(|map| map.get(key));

        match hits.next()? {
            Value::Leaf(leaf) => Some(Resolved::Leaf(leaf)),
            Value::Nested(top) => {
                let maps = std::iter::once(top)
                    .chain(hits.filter_map(Value::as_nested))
                    .collect();
                Some(Resolved::Nested(DeepChainMap { maps }))
            }
        }
    }

    /// Follows `path` through successive nested views.
    ///
    /// An empty path resolves to this view. Stepping through a leaf reports
    /// the next key as not found.
    pub fn lookup_path<Q>(&self, path: &[&Q]) -> Result<Resolved<'a, K, V>, LookupError<K>>
    where
        K: Borrow<Q> + Debug,
        Q: Ord + ToOwned<Owned = K> + ?Sized,
    {
        let mut current = Resolved::Nested(self.clone());
        for key in path {
            current = current.lookup(*key)?;
        }
        Ok(current)
    }

    /// Returns `true` if any layer defines `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.maps.iter().any(|map| map.contains_key(key))
    }

    /// Returns every key defined by at least one layer, once each, in key order.
    pub fn keys(&self) -> impl Iterator<Item = &'a K> {
        let keys: BTreeSet<&'a K> = self
            .maps
            .iter()
            .copied()
            .flat_map(|map| map.keys())
            .collect();
        keys.into_iter()
    }

    /// Iterates over the effective entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a K, Resolved<'a, K, V>)> + '_ {
        self.keys()
            .filter_map(move |key| self.get(key).map(|resolved| (key, resolved)))
    }

    /// Returns the number of distinct keys across all layers.
    pub fn len(&self) -> usize {
        self.keys().count()
    }

    /// Returns `true` when no layer defines any key.
    pub fn is_empty(&self) -> bool {
        self.maps.iter().all(|map| map.is_empty())
    }

    /// Deep-merges every layer into one owned map.
    ///
    /// Layers are applied from lowest to highest priority. Leaves overwrite,
    /// mappings merge key by key at every depth, and a leaf in a higher layer
    /// replaces a whole mapping from a lower one. Never fails.
    pub fn flatten(&self) -> Map<K, V>
    where
        K: Clone,
        V: Clone,
    {
        let mut flat = Map::new();
        for map in self.maps.iter().rev() {
            depth_first_update(&mut flat, map);
        }
        flat
    }
}

impl<'a, K: Ord, V> Resolved<'a, K, V> {
    /// Returns the leaf value, if the key resolved to one.
    pub fn as_leaf(&self) -> Option<&'a V> {
        match self {
            Resolved::Leaf(leaf) => Some(*leaf),
            Resolved::Nested(_) => None,
        }
    }

    /// Returns the nested view, if the key resolved to a mapping.
    pub fn as_nested(&self) -> Option<&DeepChainMap<'a, K, V>> {
        match self {
            Resolved::Leaf(_) => None,
            Resolved::Nested(view) => Some(view),
        }
    }

    /// Converts into the nested view, if the key resolved to a mapping.
    pub fn into_nested(self) -> Option<DeepChainMap<'a, K, V>> {
        match self {
            Resolved::Leaf(_) => None,
            Resolved::Nested(view) => Some(view),
        }
    }

    /// Looks up `key` in a nested view. A leaf has no keys.
    pub fn lookup<Q>(&self, key: &Q) -> Result<Resolved<'a, K, V>, LookupError<K>>
    where
        K: Borrow<Q> + Debug,
        Q: Ord + ToOwned<Owned = K> + ?Sized,
    {
        match self {
            Resolved::Leaf(_) => Err(LookupError::NotFound(key.to_owned())),
            Resolved::Nested(view) => view.lookup(key),
        }
    }

    /// Materializes the result, flattening a nested view.
    pub fn to_value(&self) -> Value<K, V>
    where
        K: Clone,
        V: Clone,
    {
        match self {
            Resolved::Leaf(leaf) => Value::Leaf((*leaf).clone()),
            Resolved::Nested(view) => Value::Nested(view.flatten()),
        }
    }
}

impl<K, V> Clone for DeepChainMap<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            maps: self.maps.clone(),
        }
    }
}

impl<K, V> Clone for Resolved<'_, K, V> {
    fn clone(&self) -> Self {
        match self {
            Resolved::Leaf(leaf) => Resolved::Leaf(*leaf),
            Resolved::Nested(view) => Resolved::Nested(view.clone()),
        }
    }
}

impl<K, V> Default for DeepChainMap<'_, K, V> {
    fn default() -> Self {
        Self { maps: Vec::new() }
    }
}

impl<'a, K, V> FromIterator<&'a Map<K, V>> for DeepChainMap<'a, K, V> {
    fn from_iter<I: IntoIterator<Item = &'a Map<K, V>>>(iter: I) -> Self {
        Self {
            maps: iter.into_iter().collect(),
        }
    }
}

/// Two views are equal when they flatten to the same map.
impl<K, V> PartialEq for DeepChainMap<'_, K, V>
where
    K: Ord + Clone,
    V: Clone + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.flatten() == other.flatten()
    }
}
