use rlx::{data_structures::ordered_map::OrderedMap, error::MapError};

fn keys<V>(map: &OrderedMap<String, V>) -> Vec<&str> {
    map.keys().map(String::as_str).collect()
}

fn letters(n: usize) -> OrderedMap<String, usize> {
    (0..n)
        .map(|i| (((b'a' + i as u8) as char).to_string(), i))
        .collect()
}

#[test]
fn iteration_follows_push_order() {
    let mut map = OrderedMap::new();
    for key in ["zeta", "alpha", "mu", "beta"] {
        map.push_back(key.to_string(), key.len());
    }

    assert_eq!(keys(&map), ["zeta", "alpha", "mu", "beta"]);
    assert_eq!(
        map.values().copied().collect::<Vec<_>>(),
        [4, 5, 2, 4]
    );
    // iteration can be restarted and runs backwards too
    assert_eq!(map.iter().rev().next().map(|(k, _)| k.as_str()), Some("beta"));
    assert_eq!(map.iter().count(), 4);
}

#[test]
fn push_back_keeps_the_first_value() {
    let mut map = OrderedMap::new();
    let first = map.push_back("k".to_string(), 1);
    let second = map.push_back("k".to_string(), 2);

    assert_eq!(first, second);
    assert_eq!(map.len(), 1);
    assert_eq!(map.get("k"), Some(&1));

    let (position, inserted) = map.emplace("k".to_string(), || panic!("must not be built"));
    assert_eq!((position, inserted), (0, false));
}

#[test]
fn remove_keeps_survivor_order() {
    let mut map = letters(5);
    assert_eq!(map.remove("b"), Some(1));

    assert!(!map.contains("b"));
    assert_eq!(keys(&map), ["a", "c", "d", "e"]);
    // positions after the removed entry moved down by one
    assert_eq!(map.find("c"), Some(1));
    assert_eq!(map.find("e"), Some(3));
}

#[test]
fn removing_an_absent_key_is_a_no_op() {
    let mut map = letters(3);
    let before = map.clone();

    assert_eq!(map.remove("zz"), None);
    assert_eq!(map, before);
    assert_eq!(map.remove_at(99), map.len());
    assert_eq!(map, before);
}

#[test]
fn strict_lookup_fails_where_find_reports_end() {
    let mut map = letters(2);

    assert_eq!(map.at("missing"), Err(MapError::KeyNotFound));
    assert!(map.at_mut("missing").is_err());
    assert_eq!(map.find("missing"), None);
    assert_eq!(map.count("missing"), 0);
    assert_eq!(map.count("a"), 1);
    assert_eq!(map.at("b"), Ok(&1));

    let err = map.at("missing").unwrap_err();
    assert_eq!(err.to_string(), "key not found in ordered map");
}

#[test]
fn removing_half_leaves_the_rest_in_order() {
    let mut map = letters(10);
    for key in ["h", "a", "e", "c", "j"] {
        assert!(map.remove(key).is_some());
    }

    assert_eq!(keys(&map), ["b", "d", "f", "g", "i"]);
    for (position, (key, _)) in map.iter().enumerate() {
        assert_eq!(map.find(key), Some(position));
    }
}

#[test]
fn get_or_create_appends_defaults() {
    let mut map: OrderedMap<String, Vec<u32>> = OrderedMap::new();
    map.get_or_create("x".to_string()).push(1);
    map.get_or_create("y".to_string());
    map.get_or_create("x".to_string()).push(2);

    assert_eq!(keys(&map), ["x", "y"]);
    assert_eq!(map.get("x"), Some(&vec![1, 2]));
    assert_eq!(map.get("y"), Some(&vec![]));
}

#[test]
fn insert_at_clamps_and_reindexes() {
    let mut map = letters(3);

    assert_eq!(map.insert_at(1, "new".to_string(), 9), (1, true));
    assert_eq!(keys(&map), ["a", "new", "b", "c"]);
    assert_eq!(map.find("c"), Some(3));

    assert_eq!(map.insert_at(100, "tail".to_string(), 10), (4, true));
    assert_eq!(map.last().map(|(k, _)| k.as_str()), Some("tail"));

    // existing keys are left where they are
    assert_eq!(map.insert_at(0, "c".to_string(), 0), (3, false));
    assert_eq!(map.get("c"), Some(&2));
}

#[test]
fn remove_at_returns_the_following_position() {
    let mut map = letters(3);

    let next = map.remove_at(0);
    assert_eq!(next, 0);
    assert_eq!(map.get_index(next).map(|(k, _)| k.as_str()), Some("b"));

    let next = map.remove_at(1);
    assert_eq!(next, map.len());
    assert_eq!(keys(&map), ["b"]);
}

#[test]
fn from_iter_keeps_first_duplicate() {
    let map: OrderedMap<&str, i32> = [("a", 1), ("b", 2), ("a", 3)].into_iter().collect();
    assert_eq!(map.len(), 2);
    assert_eq!(map.get("a"), Some(&1));

    let mut extended = map.clone();
    extended.extend([("c", 4), ("b", 5)]);
    assert_eq!(extended.keys().copied().collect::<Vec<_>>(), ["a", "b", "c"]);
    assert_eq!(extended.get("b"), Some(&2));
}

#[test]
fn mutation_through_iterators() {
    let mut map = letters(4);
    for (_, value) in map.iter_mut() {
        *value *= 10;
    }
    for value in map.values_mut() {
        *value += 1;
    }
    assert_eq!(map.values().copied().collect::<Vec<_>>(), [1, 11, 21, 31]);

    map.retain(|_, value| *value > 10);
    assert_eq!(keys(&map), ["b", "c", "d"]);
    assert_eq!(map.find("d"), Some(2));

    let owned: Vec<(String, usize)> = map.into_iter().collect();
    assert_eq!(owned[0], ("b".to_string(), 11));
}

#[test]
fn equality_is_order_sensitive() {
    let ab: OrderedMap<&str, i32> = [("a", 1), ("b", 2)].into_iter().collect();
    let ba: OrderedMap<&str, i32> = [("b", 2), ("a", 1)].into_iter().collect();
    assert_ne!(ab, ba);
    assert_eq!(format!("{:?}", ab), r#"{"a": 1, "b": 2}"#);
}
