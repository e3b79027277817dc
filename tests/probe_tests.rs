use std::collections::BTreeSet;

use prime_labyrinth::{
    Labyrinth, LabyrinthError, Position, Room,
    probe::{reachable_from_previous, scan_range, signatures},
};

fn labyrinth() -> Labyrinth {
    Labyrinth::new(2000).expect("labyrinth")
}

fn set(list: &[(u64, u64, u64)]) -> BTreeSet<Room> {
    list.iter().map(|&triple| Room::from(triple)).collect()
}

#[test]
fn test_signatures_for_range() {
    let lab = labyrinth();
    let lines = signatures(&lab.rows(), 5, 19).expect("signatures");
    assert_eq!(
        lines,
        vec![
            "( 5 )  -- no doors out",
            "( 7 ) (1)",
            "( 11 ) (1)(2)",
            "( 13 ) (2)(2)",
            "( 17 ) (1)(2)(2)(2)",
            "( 19 ) (2)(3)(1)",
        ]
    );
}

#[test]
fn test_signature_at_table_edge() {
    let lab = labyrinth();
    let lines = signatures(&lab.rows(), 1997, 2000).expect("signatures");
    assert_eq!(lines.last().unwrap(), "1999: no next prime found (table limit).");
}

#[test]
fn test_reachable_from_previous_row() {
    let lab = labyrinth();
    let rows = lab.rows();
    assert_eq!(
        reachable_from_previous(&rows, 13).expect("reachable"),
        set(&[(3, 3, 7), (3, 5, 5)])
    );
    assert!(reachable_from_previous(&rows, 2).expect("first prime").is_empty());
    let err = reachable_from_previous(&rows, 15).expect_err("not prime");
    assert!(matches!(err, LabyrinthError::UnknownPrime(15)));
}

#[test]
fn test_scan_range_marks_rooms_entered_from_previous_scan() {
    let lab = labyrinth();
    let scans = scan_range(&lab.rows(), 11, 17).expect("scan");
    let layers: Vec<u64> = scans.iter().map(|scan| scan.row.layer).collect();
    assert_eq!(layers, vec![11, 13, 17]);
    assert!(scans[0].marked.is_empty());
    assert_eq!(scans[1].marked, set(&[(3, 3, 7), (3, 5, 5)]));
    assert_eq!(scans[2].marked, set(&[(3, 3, 11), (3, 7, 7), (5, 5, 7)]));
    assert!(!scans[2].marked.contains(&Room::new(2, 2, 13)));
}

#[test]
fn test_world_graph_small_window() {
    let lab = labyrinth();
    let world = prime_labyrinth::build_world_graph(&lab.rows(), 7, 13).expect("world");
    assert_eq!(world.primes, vec![7, 11, 13]);
    assert_eq!(world.node_count(), 5);
    assert_eq!(world.edge_count(), 4);
    assert_eq!(
        world.outgoing(&Position::new(11, (3, 3, 5))),
        vec![Position::new(13, (3, 3, 7)), Position::new(13, (3, 5, 5))]
    );
    let start = world.nodes.first().expect("node");
    assert_eq!(start.position, Position::new(7, (2, 2, 3)));
    assert_eq!(start.layer_index, 0);
    assert!(world.nodes.iter().all(|node| world.primes[node.layer_index] == node.position.layer));
}

#[test]
fn test_world_graph_default_window() {
    let lab = labyrinth();
    let world = prime_labyrinth::build_world_graph(&lab.rows(), 7, 59).expect("world");
    assert_eq!(world.node_count(), 105);
    assert_eq!(world.edge_count(), 203);
    assert!(world.edges.iter().all(|edge| edge.to.layer <= 59));
}

#[test]
fn test_world_graph_empty_when_bounds_reversed() {
    let lab = labyrinth();
    let world = prime_labyrinth::build_world_graph(&lab.rows(), 59, 7).expect("world");
    assert!(world.primes.is_empty());
    assert_eq!(world.node_count(), 0);
}
