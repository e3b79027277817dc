use std::collections::BTreeSet;

use prime_labyrinth::{
    DEFAULT_START, ExploreEvent, ExploreStatus, Explorer, Labyrinth, LabyrinthError, Position,
    Prime, RowBuilder, explore::depth_first_explore,
};

fn labyrinth() -> Labyrinth {
    Labyrinth::new(2000).expect("labyrinth")
}

/// Counts (room, door) pairs reachable under `ceiling`, each walled-off door once.
fn reachable_door_count(rows: &RowBuilder<'_>, position: Position, ceiling: Prime) -> u64 {
    let row = rows.build_row(position.layer).expect("row");
    let Some(next) = row.next else { return 0 };
    let doors = row.doors_of(&position.room).expect("room in row").to_vec();
    doors
        .into_iter()
        .map(|door| {
            if next > ceiling {
                1
            } else {
                1 + reachable_door_count(rows, Position::new(next, door), ceiling)
            }
        })
        .sum()
}

#[test]
fn test_exploration_under_29_completes_with_known_totals() {
    let lab = labyrinth();
    let summary = lab.depth_first_explore(DEFAULT_START, 1_000_000, Some(29));
    assert_eq!(summary.status, ExploreStatus::Completed);
    assert_eq!(summary.total_steps, 157);
    assert_eq!(summary.total_nodes_visited, 61);
    assert_eq!(summary.max_depth, 7);
}

#[test]
fn test_total_steps_count_every_reachable_door_once() {
    let lab = labyrinth();
    let rows = lab.rows();
    for ceiling in [7, 11, 13, 17, 19, 23, 29, 31] {
        let summary = depth_first_explore(&rows, DEFAULT_START, 1_000_000, Some(ceiling));
        assert_eq!(summary.status, ExploreStatus::Completed);
        assert_eq!(
            summary.total_steps,
            reachable_door_count(&rows, DEFAULT_START, ceiling),
            "ceiling {ceiling}"
        );
    }
}

#[test]
fn test_ceiling_below_first_door_is_a_single_wall() {
    let lab = labyrinth();
    let summary = lab.depth_first_explore(DEFAULT_START, 1_000_000, Some(7));
    assert_eq!(summary.status, ExploreStatus::Completed);
    assert_eq!(summary.total_steps, 1);
    assert_eq!(summary.total_nodes_visited, 1);
    assert_eq!(summary.max_depth, 1);
}

#[test]
fn test_step_budget_returns_partial_statistics() {
    let lab = labyrinth();
    let summary = lab.depth_first_explore(DEFAULT_START, 5, Some(29));
    assert_eq!(summary.status, ExploreStatus::MaxSteps);
    assert_eq!(summary.total_steps, 5);
    assert_eq!(summary.total_nodes_visited, 6);
    assert_eq!(summary.max_depth, 6);
}

#[test]
fn test_invalid_start_reports_status() {
    let lab = labyrinth();
    let summary = lab.depth_first_explore(Position::new(7, (2, 3, 3)), 5, Some(29));
    assert_eq!(summary.status, ExploreStatus::StartInvalid);
    assert_eq!(summary.total_steps, 0);
    assert_eq!(summary.total_nodes_visited, 0);
    assert_eq!(summary.max_depth, 0);

    let err = Explorer::new(&lab.rows(), Position::new(9, (2, 2, 5)), None)
        .err()
        .expect("start invalid");
    assert!(matches!(err, LabyrinthError::StartInvalid { layer: 9, .. }));
}

#[test]
fn test_revisited_rooms_are_explored_once_per_incoming_path() {
    // (17, (5,5,7)) is entered from both (13, (3,3,7)) and (13, (3,5,5)).
    let lab = labyrinth();
    let rows = lab.rows();
    let mut explorer = Explorer::new(&rows, DEFAULT_START, Some(17)).expect("explorer");
    let mut entered = Vec::new();
    while let Some(event) = explorer.step() {
        if let ExploreEvent::Entered { to, .. } = event {
            entered.push(to);
        }
    }
    let shared = Position::new(17, (5, 5, 7));
    assert_eq!(entered.iter().filter(|pos| **pos == shared).count(), 2);
    let distinct: BTreeSet<Position> = entered.iter().copied().collect();
    assert_eq!(distinct.len() + 1, entered.len());
    assert_eq!(explorer.total_nodes_visited(), 8);
}

#[test]
fn test_explorer_steps_mirror_summary() {
    let lab = labyrinth();
    let rows = lab.rows();
    let mut explorer = Explorer::new(&rows, DEFAULT_START, Some(23)).expect("explorer");
    let mut walls = 0u64;
    let mut entries = 0u64;
    let mut backtracks = 0u64;
    while let Some(event) = explorer.step() {
        match event {
            ExploreEvent::Entered { .. } => entries += 1,
            ExploreEvent::Wall { .. } => walls += 1,
            ExploreEvent::Backtracked(_) => backtracks += 1,
        }
    }
    assert!(explorer.is_finished());
    assert_eq!(explorer.current(), None);
    assert_eq!(explorer.step(), None);
    let summary = lab.depth_first_explore(DEFAULT_START, u64::MAX, Some(23));
    assert_eq!(walls + entries, summary.total_steps);
    assert_eq!(entries + 1, summary.total_nodes_visited);
    assert_eq!(backtracks, summary.total_nodes_visited);
}

#[test]
fn test_first_events_walk_the_leftmost_branch() {
    let lab = labyrinth();
    let rows = lab.rows();
    let mut explorer = Explorer::new(&rows, DEFAULT_START, Some(29)).expect("explorer");
    assert_eq!(
        explorer.step(),
        Some(ExploreEvent::Entered {
            from: DEFAULT_START,
            to: Position::new(11, (3, 3, 5)),
        })
    );
    assert_eq!(explorer.depth(), 2);
    assert_eq!(explorer.current(), Some(Position::new(11, (3, 3, 5))));
}

#[test]
fn test_doors_off_the_table_are_walls() {
    let lab = Labyrinth::new(30).expect("labyrinth");
    let summary = lab.depth_first_explore(DEFAULT_START, 1_000_000, None);
    assert_eq!(summary.status, ExploreStatus::Completed);
    let bounded = lab.depth_first_explore(DEFAULT_START, 1_000_000, Some(23));
    assert_eq!(summary.total_steps, bounded.total_steps);
    assert_eq!(summary.total_nodes_visited, bounded.total_nodes_visited);
}

#[test]
fn test_exploration_through_cache_matches_direct() {
    let lab = labyrinth();
    let cache = lab.cache();
    let direct = lab.depth_first_explore(DEFAULT_START, 1_000_000, Some(29));
    let cached = depth_first_explore(&cache, DEFAULT_START, 1_000_000, Some(29));
    assert_eq!(direct, cached);
    assert!(cache.stats().hits > 0);
}
