//! Property tests for grid placement invariants.

use bastion_core::config::LevelConfig;
use bastion_core::enums::CellKind;
use bastion_core::types::CellCoord;
use bastion_grid::Grid;
use proptest::prelude::*;

fn cell_kind() -> impl Strategy<Value = CellKind> {
    prop_oneof![
        Just(CellKind::Empty),
        Just(CellKind::Path),
        Just(CellKind::SpawnPoint),
        Just(CellKind::ExitPoint),
        Just(CellKind::Obstacle),
    ]
}

fn level() -> impl Strategy<Value = LevelConfig> {
    (1u32..12, 1u32..12).prop_flat_map(|(w, h)| {
        prop::collection::vec(cell_kind(), (w * h) as usize).prop_map(move |cells| {
            let mut level = LevelConfig::blank(1, "random", w, h);
            level.cells = cells;
            level
        })
    })
}

proptest! {
    #[test]
    fn non_empty_cells_never_accept_towers(level in level()) {
        let grid = Grid::build(&level);
        for cell in grid.cells() {
            if cell.kind != CellKind::Empty {
                prop_assert!(!grid.can_place_tower(cell.coord));
            }
        }
    }

    #[test]
    fn placement_consumes_the_cell(level in level(), x in -2i32..14, z in -2i32..14) {
        let mut grid = Grid::build(&level);
        let coord = CellCoord::new(x, z);
        let could = grid.can_place_tower(coord);
        let placed = grid.place_tower(coord);
        prop_assert_eq!(could, placed);
        prop_assert!(!grid.can_place_tower(coord));
        if placed {
            prop_assert!(grid.is_occupied(coord));
        }
    }

    #[test]
    fn paths_start_at_spawn_and_end_at_an_exit(level in level()) {
        let grid = Grid::build(&level);
        for &spawn in grid.spawn_points() {
            match grid.path_from(spawn) {
                Some(path) => {
                    prop_assert_eq!(path.first().copied(), Some(grid.cell_to_world(spawn)));
                    let end = path.last().copied().map(|p| grid.world_to_cell(p));
                    prop_assert!(end.is_some_and(|c| grid.exit_points().contains(&c)));
                }
                None => prop_assert!(grid.exit_points().is_empty()),
            }
        }
    }

    #[test]
    fn build_is_deterministic(level in level()) {
        let a = Grid::build(&level);
        let b = Grid::build(&level);
        prop_assert_eq!(a.cells(), b.cells());
        for &spawn in a.spawn_points() {
            prop_assert_eq!(a.path_from(spawn), b.path_from(spawn));
        }
    }
}
