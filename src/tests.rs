//! Integration-style tests against the public [`PVeb`] API, mirroring the
//! end-to-end scenarios the design lists.

use crate::PVeb;

#[test]
fn default_impl() {
    let t: PVeb<u32> = PVeb::default();
    assert!(t.is_empty());
}

#[test]
fn is_empty() {
    let t = PVeb::<u32>::new(0, 255, 100).unwrap();
    assert!(t.is_empty());
    let t = t.set(1, 10).unwrap();
    assert!(!t.is_empty());
    let t = t.pop(1).unwrap();
    assert!(t.is_empty());
}

#[test]
fn insert_does_not_overwrite() {
    let t = PVeb::<u32>::new(0, 255, 100).unwrap();
    let t = t.set(1, 10).unwrap();
    assert_eq!(t.successor(0).unwrap(), Some((1, 10)));
    let t2 = t.set(1, 30).unwrap();
    assert_eq!(t2.get(1).unwrap(), 10);
}

#[test]
fn insert_get() {
    let t = PVeb::<u32>::new(0, 255, 100).unwrap();
    let t = t.set(1, 10).unwrap();
    assert!(t.get(0).is_err());
    assert_eq!(t.get(1).unwrap(), 10);
    let t = t.set(3, 30).unwrap().set(4, 40).unwrap();
    assert!(t.get(2).is_err());
    assert_eq!(t.get(3).unwrap(), 30);
    assert_eq!(t.get(4).unwrap(), 40);
    assert!(t.get(5).is_err());
}

#[test]
fn insert_successor() {
    let t = PVeb::<u32>::new(0, 255, 100).unwrap();
    let t = t.set(1, 10).unwrap();
    assert_eq!(t.successor(0).unwrap(), Some((1, 10)));
    let t = t.set(3, 30).unwrap();
    assert_eq!(t.successor(0).unwrap(), Some((1, 10)));
    assert_eq!(t.successor(2).unwrap(), Some((3, 30)));
}

#[test]
fn insert_predecessor() {
    let t = PVeb::<u32>::new(0, 255, 100).unwrap();
    let t = t.set(3, 30).unwrap();
    assert_eq!(t.predecessor(4).unwrap(), Some((3, 30)));
    let t = t.set(1, 10).unwrap();
    assert_eq!(t.predecessor(4).unwrap(), Some((3, 30)));
    assert_eq!(t.predecessor(2).unwrap(), Some((1, 10)));
}

#[test]
fn insert_remove_successor() {
    let t = PVeb::<u32>::new(0, 255, 100).unwrap();
    let t = t.set(1, 10).unwrap();
    let t = t.pop(1).unwrap();
    assert_eq!(t.successor(0).unwrap(), None);
}

#[test]
fn successor_when_not_in_cluster() {
    let t = PVeb::<u32>::new(0, 255, 100).unwrap();
    let t = t.set(1, 10).unwrap().set(255, 30).unwrap();
    assert_eq!(t.successor(2).unwrap(), Some((255, 30)));
}

#[test]
fn predecessor_when_not_in_cluster() {
    let t = PVeb::<u32>::new(0, 255, 100).unwrap();
    let t = t.set(1, 10).unwrap().set(255, 30).unwrap();
    assert_eq!(t.predecessor(255).unwrap(), Some((1, 10)));
}

#[test]
fn remove_after_two_inserts_increasing_order() {
    let t = PVeb::<u32>::new(0, 255, 100).unwrap();
    let t = t.set(0, 0).unwrap().set(1, 1).unwrap();
    let t = t.pop(0).unwrap();
    assert!(t.get(0).is_err());
}

#[test]
fn remove_after_two_inserts_decreasing_order() {
    let t = PVeb::<u32>::new(0, 255, 100).unwrap();
    let t = t.set(1, 1).unwrap().set(0, 0).unwrap();
    let t = t.pop(1).unwrap();
    assert!(t.get(1).is_err());
}

#[test]
fn predecessor_matches_successor_inverse() {
    let t = PVeb::<u32>::new(0, 255, 100).unwrap();
    let t = t.set(0, 0).unwrap().set(10, 10).unwrap().set(200, 200).unwrap();
    for x in 0..255u64 {
        if let Some((k, _)) = t.successor(x).unwrap() {
            let (p, _) = t.predecessor(k).unwrap().unwrap();
            assert!(p <= x);
            assert!(x < k);
        }
    }
}

#[test]
fn small_coefficient_small_universe_invariants() {
    // small recursion-threshold coefficient with a handful of keys spread
    // far apart in the universe.
    let mut t = PVeb::<u32>::new(0, (1 << 16) - 1, 1).unwrap();
    for k in [1u64, 65534, 32767] {
        t = t.set(k, k as u32).unwrap();
        assert!(t.contains(k).unwrap());
    }
    assert_eq!(t.min(), Some((1, 1)));
    assert_eq!(t.max(), Some((65534, 65534)));
    assert_eq!(t.items(false), vec![(1, 1), (32767, 32767), (65534, 65534)]);

    for k in [32767u64, 1, 65534] {
        t = t.pop(k).unwrap();
        assert!(!t.contains(k).unwrap());
    }
    assert!(t.is_empty());
}
