#[cfg(test)]
mod tests {
    use bastion_core::config::LevelConfig;
    use bastion_core::enums::CellKind;
    use bastion_core::error::PlacementError;
    use bastion_core::types::CellCoord;
    use glam::DVec3;

    use crate::grid::Grid;
    use crate::path;

    #[test]
    fn test_default_level_path_straight_row() {
        let grid = Grid::build(&LevelConfig::default_level());
        assert_eq!(grid.spawn_points(), &[CellCoord::new(0, 5)]);
        assert_eq!(grid.exit_points(), &[CellCoord::new(14, 5)]);

        let path = grid.path_from(CellCoord::new(0, 5)).expect("spawn has a path");
        assert_eq!(path.first().copied(), Some(DVec3::new(0.0, 0.0, 5.0)));
        assert_eq!(path.last().copied(), Some(DVec3::new(14.0, 0.0, 5.0)));
        assert_eq!(path.len(), 15, "spawn + 13 path cells + exit");

        for x in 1..14 {
            let expected = DVec3::new(x as f64, 0.0, 5.0);
            assert_eq!(path[x as usize], expected, "vertex {x} out of order");
        }
    }

    #[test]
    fn test_path_contains_every_path_cell() {
        let level = LevelConfig::default_level();
        let grid = Grid::build(&level);
        let path = grid.path_from(CellCoord::new(0, 5)).unwrap();
        for cell in grid.cells() {
            if cell.kind == CellKind::Path {
                let world = grid.cell_to_world(cell.coord);
                assert!(path.contains(&world), "path misses {:?}", cell.coord);
            }
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        let level = LevelConfig::default_level();
        let a = Grid::build(&level);
        let b = Grid::build(&level);
        assert_eq!(a.cells(), b.cells());
        let spawn = CellCoord::new(0, 5);
        assert_eq!(a.path_from(spawn), b.path_from(spawn));
    }

    #[test]
    fn test_nearest_exit_first_wins_ties() {
        let spawn = CellCoord::new(5, 5);
        let exits = [CellCoord::new(5, 0), CellCoord::new(5, 10), CellCoord::new(9, 5)];
        assert_eq!(path::nearest_exit(spawn, &exits), Some(CellCoord::new(9, 5)));

        let tied = [CellCoord::new(5, 0), CellCoord::new(5, 10)];
        assert_eq!(path::nearest_exit(spawn, &tied), Some(CellCoord::new(5, 0)));
        assert_eq!(path::nearest_exit(spawn, &[]), None);
    }

    #[test]
    fn test_spawn_without_exit_has_no_path() {
        let mut level = LevelConfig::blank(1, "no exit", 5, 1);
        level.set_cell(CellCoord::new(0, 0), CellKind::SpawnPoint);
        level.set_cell(CellCoord::new(1, 0), CellKind::Path);
        let grid = Grid::build(&level);
        assert!(grid.path_from(CellCoord::new(0, 0)).is_none());
    }

    #[test]
    fn test_two_spawns_get_own_paths() {
        let mut level = LevelConfig::blank(1, "two lanes", 6, 3);
        level.set_cell(CellCoord::new(0, 0), CellKind::SpawnPoint);
        level.set_cell(CellCoord::new(0, 2), CellKind::SpawnPoint);
        level.set_cell(CellCoord::new(5, 0), CellKind::ExitPoint);
        level.set_cell(CellCoord::new(5, 2), CellKind::ExitPoint);
        let grid = Grid::build(&level);

        let upper = grid.path_from(CellCoord::new(0, 0)).unwrap();
        let lower = grid.path_from(CellCoord::new(0, 2)).unwrap();
        assert_eq!(upper.last().copied(), Some(DVec3::new(5.0, 0.0, 0.0)));
        assert_eq!(lower.last().copied(), Some(DVec3::new(5.0, 0.0, 2.0)));
    }

    #[test]
    fn test_l_shaped_path_is_ordered_from_spawn() {
        // Spawn (0,0), row 0 to x=3, then column 3 down to z=3, exit (3,4).
        let mut level = LevelConfig::blank(1, "L", 5, 5);
        level.set_cell(CellCoord::new(0, 0), CellKind::SpawnPoint);
        for x in 1..=3 {
            level.set_cell(CellCoord::new(x, 0), CellKind::Path);
        }
        for z in 1..=3 {
            level.set_cell(CellCoord::new(3, z), CellKind::Path);
        }
        level.set_cell(CellCoord::new(3, 4), CellKind::ExitPoint);

        let cells = path::ordered_path_cells(&Grid::build(&level), CellCoord::new(0, 0));
        let expected: Vec<CellCoord> = [(1, 0), (2, 0), (3, 0), (3, 1), (3, 2), (3, 3)]
            .iter()
            .map(|&(x, z)| CellCoord::new(x, z))
            .collect();
        assert_eq!(cells, expected);
    }

    #[test]
    fn test_can_place_only_on_empty() {
        let mut level = LevelConfig::default_level();
        level.set_cell(CellCoord::new(2, 2), CellKind::Obstacle);
        let grid = Grid::build(&level);

        assert!(grid.can_place_tower(CellCoord::new(3, 3)));
        assert!(!grid.can_place_tower(CellCoord::new(0, 5)), "spawn");
        assert!(!grid.can_place_tower(CellCoord::new(5, 5)), "path");
        assert!(!grid.can_place_tower(CellCoord::new(14, 5)), "exit");
        assert!(!grid.can_place_tower(CellCoord::new(2, 2)), "obstacle");
    }

    #[test]
    fn test_place_tower_occupies_once() {
        let mut grid = Grid::build(&LevelConfig::default_level());
        let c = CellCoord::new(3, 3);
        assert!(grid.place_tower(c));
        assert!(grid.is_occupied(c));
        assert!(!grid.can_place_tower(c));
        assert!(!grid.place_tower(c), "second placement must fail");
        assert_eq!(grid.check_placement(c), Err(PlacementError::Occupied(c)));

        assert!(grid.remove_tower(c));
        assert!(grid.can_place_tower(c));
        assert!(!grid.remove_tower(c));
    }

    #[test]
    fn test_failed_place_does_not_mutate() {
        let mut grid = Grid::build(&LevelConfig::default_level());
        let before = grid.cells().to_vec();
        assert!(!grid.place_tower(CellCoord::new(5, 5)));
        assert!(!grid.place_tower(CellCoord::new(-3, 40)));
        assert_eq!(grid.cells(), before.as_slice());
    }

    #[test]
    fn test_out_of_bounds_defaults() {
        let grid = Grid::build(&LevelConfig::default_level());
        let off = CellCoord::new(-1, 20);
        assert_eq!(grid.cell_kind(off), CellKind::Empty);
        assert!(!grid.can_place_tower(off));
        assert!(!grid.is_occupied(off));
        assert!(grid.cell(off).is_none());
        assert_eq!(grid.check_placement(off), Err(PlacementError::OutOfBounds(off)));
        assert_eq!(
            grid.check_placement(CellCoord::new(4, 5)),
            Err(PlacementError::NotBuildable(CellCoord::new(4, 5)))
        );
    }

    #[test]
    fn test_world_cell_conversion() {
        let mut level = LevelConfig::default_level();
        level.cell_size = 2.0;
        let grid = Grid::build(&level);
        let world = grid.cell_to_world(CellCoord::new(3, 4));
        assert_eq!(world, DVec3::new(6.0, 0.0, 8.0));
        assert_eq!(grid.world_to_cell(world), CellCoord::new(3, 4));
        assert_eq!(grid.world_to_cell(DVec3::new(6.9, 0.0, 7.1)), CellCoord::new(3, 4));
    }

    #[test]
    fn test_short_cell_array_builds_as_empty() {
        let mut level = LevelConfig::default_level();
        level.cells.truncate(10);
        let grid = Grid::build(&level);
        assert_eq!(grid.cells().len(), 150);
        assert!(grid.spawn_points().is_empty());
    }
}
