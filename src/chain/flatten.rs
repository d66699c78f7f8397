use super::value::{Map, Value};

/// Applies `source` onto `target`, recursing into mappings.
///
/// Leaves overwrite whatever is in `target`. A mapping in `source` merges into
/// the mapping already at that key, or into a fresh one when the key is absent
/// or holds a leaf.
pub(super) fn depth_first_update<K, V>(target: &mut Map<K, V>, source: &Map<K, V>)
where
    K: Ord + Clone,
    V: Clone,
{
    for (key, value) in source {
        match value {
            Value::Leaf(leaf) => {
                target.insert(key.clone(), Value::Leaf(leaf.clone()));
            }
            Value::Nested(nested) => {
                let slot = target
                    .entry(key.clone())
                    .or_insert_with(|| Value::Nested(Map::new()));
                if !slot.is_nested() {
                    *slot = Value::Nested(Map::new());
                }
                if let Value::Nested(nested_target) = slot {
                    depth_first_update(nested_target, nested);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(v: i64) -> Value<&'static str, i64> {
        Value::Leaf(v)
    }

    fn nested<const N: usize>(
        entries: [(&'static str, Value<&'static str, i64>); N],
    ) -> Value<&'static str, i64> {
        Value::Nested(Map::from(entries))
    }

    #[test]
    fn test_leaf_overwrites() {
        let mut target = Map::from([("a", leaf(1)), ("b", leaf(2))]);
        depth_first_update(&mut target, &Map::from([("a", leaf(10))]));

        assert_eq!(target, Map::from([("a", leaf(10)), ("b", leaf(2))]));
    }

    #[test]
    fn test_nested_merges_into_existing_mapping() {
        let mut target = Map::from([("a", nested([("x", leaf(1)), ("y", leaf(2))]))]);
        depth_first_update(&mut target, &Map::from([("a", nested([("y", leaf(20))]))]));

        assert_eq!(
            target,
            Map::from([("a", nested([("x", leaf(1)), ("y", leaf(20))]))])
        );
    }

    #[test]
    fn test_nested_replaces_leaf() {
        let mut target = Map::from([("a", leaf(1))]);
        depth_first_update(&mut target, &Map::from([("a", nested([("x", leaf(5))]))]));

        assert_eq!(target, Map::from([("a", nested([("x", leaf(5))]))]));
    }

    #[test]
    fn test_empty_nested_installs_empty_mapping() {
        let mut target = Map::new();
        depth_first_update(&mut target, &Map::from([("a", nested([]))]));

        assert_eq!(target, Map::from([("a", nested([]))]));
    }
}
