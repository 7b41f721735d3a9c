extern crate rand;
extern crate reservoir;

use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;

use rand::prng::XorShiftRng;
use rand::{Rng, SeedableRng};

use reservoir::prelude::*;

#[test]
fn allocate() {
    let mut container = ResourceContainer::new();
    container.store("a", 1, CacheMode::Allocate).unwrap();

    let err = container.store("a", 2, CacheMode::Allocate).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Store);
    assert_eq!(err.id(), Some("a"));
    assert_eq!(container.find("a"), Some(&1));
    assert_eq!(container.len(), 1);
}

#[test]
fn update() {
    let mut container = ResourceContainer::new();
    container.store("a", "x".to_owned(), CacheMode::Update).unwrap();
    let v = container.store("a", "y".to_owned(), CacheMode::Update).unwrap();
    assert_eq!(v, "y");

    assert_eq!(container.find("a").map(|v| v.as_str()), Some("y"));
    assert_eq!(container.len(), 1);

    // Update is the default of stores with instances.
    container.store("a", "z".to_owned(), None).unwrap();
    assert_eq!(container.find("a").map(|v| v.as_str()), Some("z"));
}

#[test]
fn update_releases_previous() {
    let x = Rc::new(1);
    let mut container = ResourceContainer::new();
    container.store("a", x.clone(), None).unwrap();
    assert_eq!(Rc::strong_count(&x), 2);

    container.store("a", Rc::new(2), CacheMode::Update).unwrap();
    assert_eq!(Rc::strong_count(&x), 1);

    // Reuse drops the new instance and keeps the occupant.
    let y = Rc::new(3);
    container.store("a", y.clone(), CacheMode::Reuse).unwrap();
    assert_eq!(Rc::strong_count(&y), 1);
    assert_eq!(container.find("a").map(|v| **v), Some(2));
}

#[test]
fn find_mut() {
    let mut container = ResourceContainer::new();
    assert!(container.find_mut("a").is_none());

    container.store("a", vec![1u32], None).unwrap();
    container.find_mut("a").unwrap().push(2);
    assert_eq!(container.find("a"), Some(&vec![1, 2]));
}

#[test]
fn reuse() {
    let mut container = ResourceContainer::<u32>::new();
    let calls = Cell::new(0);

    let first: *const u32 = container
        .store_with(
            "a",
            || {
                calls.set(calls.get() + 1);
                Ok(1)
            },
            CacheMode::Reuse,
        )
        .unwrap();

    let second: *const u32 = container
        .store_with(
            "a",
            || {
                calls.set(calls.get() + 1);
                Ok(2)
            },
            None,
        )
        .unwrap();

    assert_eq!(calls.get(), 1);
    assert_eq!(first, second);
    assert_eq!(container.find("a"), Some(&1));
}

#[test]
fn deserializer() {
    let mut container = ResourceContainer::<u32>::new();

    let err = container
        .store_with("a", || Err(Error::Malformed("mock".into())), None)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Load);
    assert_eq!(err.root().kind(), ErrorKind::Load);
    assert!(!container.contains("a"));
    assert!(container.is_empty());

    container.store("a", 1, None).unwrap();

    // A failed update keeps the previous resource.
    container
        .store_with("a", || Err(Error::Malformed("mock".into())), CacheMode::Update)
        .unwrap_err();
    assert_eq!(container.find("a"), Some(&1));

    // Allocate refuses before running the deserializer.
    let err = container
        .store_with("a", || panic!("should not run"), CacheMode::Allocate)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Store);

    let v = container
        .store_with("a", || Ok(2), CacheMode::Update)
        .unwrap();
    assert_eq!(*v, 2);
}

#[test]
fn destroy() {
    let mut container = ResourceContainer::new();
    assert_eq!(container.find("a"), None::<&u32>);
    assert!(!container.destroy("a"));

    container.store("a", 1u32, None).unwrap();
    container.store("b", 2u32, None).unwrap();
    assert!(container.contains("a"));

    assert!(container.destroy("a"));
    assert!(!container.destroy("a"));
    assert!(!container.contains("a"));
    assert_eq!(container.find("a"), None);
    assert_eq!(container.len(), 1);

    let b: *const u32 = container.find("b").unwrap();
    assert!(container.destroy_instance(b));
    assert!(!container.destroy_instance(b));
    assert!(container.is_empty());
}

#[test]
fn clear() {
    let mut container = ResourceContainer::new();
    container.store("a", 1u32, None).unwrap();
    container.store("b", 2u32, None).unwrap();

    let mut ids: Vec<_> = container.iter().map(|(id, v)| (id.to_owned(), *v)).collect();
    ids.sort();
    assert_eq!(ids, vec![("a".to_owned(), 1), ("b".to_owned(), 2)]);

    container.clear();
    assert!(container.is_empty());
    assert_eq!(container.iter().count(), 0);
}

#[test]
fn random() {
    let mut rng = XorShiftRng::from_seed([7; 16]);
    let mut container = ResourceContainer::new();
    let mut ids = HashSet::new();

    for _ in 0..1000 {
        let id = format!("{}", rng.gen_range(0, 256));
        let v: u32 = rng.gen();

        match rng.gen_range(0, 3) {
            0 => {
                let rsp = container.store(&id, v, CacheMode::Allocate);
                assert_eq!(rsp.is_ok(), ids.insert(id.clone()));
            }
            1 => {
                assert_eq!(*container.store(&id, v, CacheMode::Update).unwrap(), v);
                ids.insert(id.clone());
            }
            _ => {
                assert_eq!(container.destroy(&id), ids.remove(&id));
            }
        }

        assert_eq!(container.len(), ids.len());
        assert_eq!(container.contains(&id), container.find(&id).is_some());
    }
}
