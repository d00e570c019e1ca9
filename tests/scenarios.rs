#![allow(clippy::missing_docs_in_private_items, clippy::arithmetic_side_effects)]

use openmap::{KeyHash, MapConfig, MapError, MapExtensions, OpenAddressingMap, djb2};

#[test]
fn four_keys_with_default_tuning() {
    let config = MapConfig::default().with_capacity(8).with_max_load_ratio(0.5).with_growth_factor(3);
    let mut map = OpenAddressingMap::with_config(config);

    map.set("a".to_string(), 1);
    map.set("b".to_string(), 2);
    map.set("c".to_string(), 3);
    map.set("d".to_string(), 4);

    assert_eq!(map.get("a"), Ok(&1));
    assert_eq!(map.get("b"), Ok(&2));
    assert_eq!(map.get("c"), Ok(&3));
    assert_eq!(map.get("d"), Ok(&4));
    assert_eq!(map.len(), 4);
    // (3 + 0 + 1) / 8 = 0.5 is not above the maximum
    assert_eq!(map.capacity(), 8);

    // (4 + 0 + 1) / 8 = 0.625 is
    map.set("e".to_string(), 5);
    assert_eq!(map.capacity(), 24);
    assert_eq!(map.get("d"), Ok(&4));
    assert_eq!(map.len(), 5);
}

#[test]
fn middle_earth_walkthrough() {
    let mut lor = OpenAddressingMap::new();

    lor.set("Hobbit", "Bilbo");
    lor.set("Hobbit", "Frodo");
    lor.set("Wizard", "Gandalf");
    lor.set("Human", "Aragorn");
    lor.set("Elf", "Legolas");
    lor.set("Maiar", "The Necromancer");
    lor.set("Maiar", "Sauron");
    lor.set("RingBearer", "Gollum");
    lor.set("LadyOfLight", "Galadriel");
    lor.set("HalfElven", "Arwen");
    lor.set("Ent", "Treebeard");

    // overwritten keys only keep their last value
    assert_eq!(lor.get("Hobbit"), Ok(&"Frodo"));
    assert_eq!(lor.get("Maiar"), Ok(&"Sauron"));
    assert_eq!(lor.len(), 9);
    assert_eq!(lor.capacity(), 24);

    let mut values = lor.values();
    values.sort_unstable();
    assert_eq!(
        values,
        vec![
            "Aragorn",
            "Arwen",
            "Frodo",
            "Galadriel",
            "Gandalf",
            "Gollum",
            "Legolas",
            "Sauron",
            "Treebeard"
        ]
    );
}

#[test]
fn equal_strings_address_one_entry() {
    let str1 = String::from("Hello World.");
    let str2 = String::from("Hello World.");

    let mut map1 = OpenAddressingMap::new();
    map1.set(str1.clone(), 10);
    map1.set(str2.clone(), 20);

    let mut map2 = OpenAddressingMap::new();
    let str3 = str1.clone();
    let str4 = str2.clone();
    map2.set(str3.clone(), 20);
    map2.set(str4, 10);

    assert_eq!(map1.get(&str1), Ok(&20));
    assert_eq!(map2.get(&str3), Ok(&10));
    assert_eq!(map1.len(), 1);
    assert_eq!(map2.len(), 1);
}

#[test]
fn colliding_start_slots() {
    // "a" and "i" both start probing at slot 6 of an 8-slot table
    assert_eq!(djb2("a") % 8, djb2("i") % 8);

    let mut map = OpenAddressingMap::new();
    map.set("a".to_string(), "first");
    map.set("i".to_string(), "second");

    assert_eq!(map.get("a"), Ok(&"first"));
    assert_eq!(map.get("i"), Ok(&"second"));
    assert_eq!(map.len(), 2);
}

/// A key whose hash ignores its contents, so every key shares one start slot
#[derive(Debug, Clone, PartialEq, Eq)]
struct SameHash(u32);

impl KeyHash for SameHash {
    fn key_hash(&self) -> u32 {
        7
    }
}

#[test]
fn fully_colliding_keys_survive_growth_and_deletes() {
    let mut map = OpenAddressingMap::with_capacity(4);
    for i in 0..40 {
        map.set(SameHash(i), i);
    }
    assert_eq!(map.len(), 40);

    for i in (0..40).step_by(2) {
        assert_eq!(map.delete(&SameHash(i)), Ok(i));
    }
    for i in 0..40 {
        let expected = if i % 2 == 0 { Err(MapError::KeyNotFound) } else { Ok(&i) };
        assert_eq!(map.get(&SameHash(i)), expected);
    }

    // the last key sits at the end of a single probe chain
    assert!(map.probe_length(&SameHash(39)) >= 40);
    assert_eq!(map.len(), 20);
    assert_eq!(map.tombstones(), 20);
}

#[test]
fn tombstones_are_purged_by_growth_only() {
    let mut map = OpenAddressingMap::new();
    map.set("x".to_string(), 0);
    for round in 0..3 {
        assert_eq!(map.delete("x"), Ok(round));
        map.set("x".to_string(), round + 1);
    }
    assert_eq!(map.len(), 1);
    assert_eq!(map.tombstones(), 3);
    assert_eq!(map.capacity(), 8);

    // (1 + 3 + 1) / 8 > 0.5
    map.set("y".to_string(), 0);
    assert_eq!(map.capacity(), 24);
    assert_eq!(map.tombstones(), 0);
    assert_eq!(map.get("x"), Ok(&3));
}

#[test]
fn absent_keys() {
    let mut map: OpenAddressingMap<String, ()> = OpenAddressingMap::new();
    assert_eq!(map.get("nobody"), Err(MapError::KeyNotFound));
    assert_eq!(map.delete("nobody"), Err(MapError::KeyNotFound));

    map.set("somebody".to_string(), ());
    assert_eq!(map.get("nobody"), Err(MapError::KeyNotFound));
    assert_eq!(map.delete("nobody"), Err(MapError::KeyNotFound));
    assert_eq!(map.lookup("nobody"), None);
}
