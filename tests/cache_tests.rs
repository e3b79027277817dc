use std::sync::Arc;

use prime_labyrinth::{
    DEFAULT_START, DoorMark, Labyrinth, LabyrinthError, Position, RoomCache, RoomSource,
};

#[test]
fn test_room_cache_hits_after_first_lookup() {
    let lab = Labyrinth::new(200).expect("labyrinth");
    let cache = RoomCache::new(lab.rows());
    assert!(cache.is_empty());

    let first = cache.lookup(&DEFAULT_START).expect("room");
    let second = cache.lookup(&DEFAULT_START).expect("room");
    assert!(Arc::ptr_eq(&first.doors, &second.doors));

    let stats = cache.stats();
    assert_eq!(stats.entries, 1);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 1);
}

#[test]
fn test_cached_doors_match_row_builder() {
    let lab = Labyrinth::new(500).expect("labyrinth");
    let cache = lab.cache();
    let row = lab.build_row(113).expect("row");
    for entry in &row.rooms {
        let cached = cache.lookup(&Position::new(113, entry.room)).expect("room");
        assert_eq!(&cached.doors[..], entry.doors.as_slice());
        assert_eq!(cached.next, 127);
    }
    assert_eq!(cache.len(), row.len());
}

#[test]
fn test_absent_rooms_are_not_cached() {
    let lab = Labyrinth::new(200).expect("labyrinth");
    let cache = lab.cache();
    assert!(cache.lookup(&Position::new(7, (2, 2, 5))).is_none());
    assert!(cache.is_empty());
    assert_eq!(cache.stats().misses, 0);
}

#[test]
fn test_door_marks_start_closed_and_record_visits() {
    let lab = Labyrinth::new(200).expect("labyrinth");
    let cache = lab.cache();
    let room = Position::new(11, (3, 3, 5));
    cache.lookup(&room).expect("room");
    assert_eq!(cache.marks(&room), Some(vec![DoorMark::Closed, DoorMark::Closed]));

    assert_eq!(cache.open_door(&room, 1).expect("open"), DoorMark::Closed);
    assert_eq!(cache.open_door(&room, 1).expect("reopen"), DoorMark::Opened);
    assert_eq!(
        cache.mark_door(&room, 0, DoorMark::Visited(4)).expect("visit"),
        DoorMark::Closed
    );
    assert_eq!(
        cache.marks(&room),
        Some(vec![DoorMark::Visited(4), DoorMark::Opened])
    );
    assert!(DoorMark::Visited(4).is_open());
    assert!(!DoorMark::Closed.is_open());
}

#[test]
fn test_marking_creates_entries_lazily() {
    let lab = Labyrinth::new(200).expect("labyrinth");
    let cache = lab.cache();
    assert_eq!(cache.marks(&DEFAULT_START), None);
    cache.open_door(&DEFAULT_START, 0).expect("open");
    assert_eq!(cache.marks(&DEFAULT_START), Some(vec![DoorMark::Opened]));
}

#[test]
fn test_marking_rejects_bad_rooms_and_indices() {
    let lab = Labyrinth::new(200).expect("labyrinth");
    let cache = lab.cache();
    let err = cache
        .open_door(&Position::new(7, (2, 2, 5)), 0)
        .expect_err("missing room");
    assert!(matches!(err, LabyrinthError::NotFound(_)));
    let err = cache.open_door(&DEFAULT_START, 3).expect_err("bad index");
    assert!(matches!(err, LabyrinthError::InvalidInput(_)));
}

#[test]
fn test_marks_do_not_change_door_lists() {
    let lab = Labyrinth::new(200).expect("labyrinth");
    let cache = lab.cache();
    let room = Position::new(13, (3, 3, 7));
    let before = cache.lookup(&room).expect("room");
    cache.open_door(&room, 0).expect("open");
    let after = cache.lookup(&room).expect("room");
    assert_eq!(before, after);
}
