//! Grid: classified cells, tower occupancy, and cached spawn paths.

use std::collections::BTreeMap;
use std::sync::Arc;

use bastion_core::config::LevelConfig;
use bastion_core::enums::CellKind;
use bastion_core::error::PlacementError;
use bastion_core::types::CellCoord;
use glam::DVec3;

use crate::path;

/// One grid square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub coord: CellCoord,
    pub kind: CellKind,
    /// A tower stands here.
    pub occupied: bool,
}

/// The level's cell map.
///
/// Rebuilt whenever a level loads. Read-only during a match except for
/// tower occupancy.
#[derive(Debug, Clone)]
pub struct Grid {
    width: u32,
    height: u32,
    cell_size: f64,
    /// Row-major by z: index `x + z * width`.
    cells: Vec<Cell>,
    spawn_points: Vec<CellCoord>,
    exit_points: Vec<CellCoord>,
    paths: BTreeMap<CellCoord, Arc<[DVec3]>>,
}

impl Grid {
    /// Classify every cell of `level` and compute one path per spawn point.
    ///
    /// Deterministic: the same configuration always produces the same cells
    /// and path vertices. Cells missing from a short cell array are Empty.
    pub fn build(level: &LevelConfig) -> Self {
        let width = level.grid_width;
        let height = level.grid_height;
        let mut cells = Vec::with_capacity(width as usize * height as usize);
        for z in 0..height as i32 {
            for x in 0..width as i32 {
                let coord = CellCoord::new(x, z);
                cells.push(Cell {
                    coord,
                    kind: level.cell(coord),
                    occupied: false,
                });
            }
        }

        // Spawn and exit lists are collected column by column, the same
        // order the path heuristic scans cells in.
        let mut spawn_points = Vec::new();
        let mut exit_points = Vec::new();
        for x in 0..width as i32 {
            for z in 0..height as i32 {
                match level.cell(CellCoord::new(x, z)) {
                    CellKind::SpawnPoint => spawn_points.push(CellCoord::new(x, z)),
                    CellKind::ExitPoint => exit_points.push(CellCoord::new(x, z)),
                    _ => {}
                }
            }
        }

        let mut grid = Self {
            width,
            height,
            cell_size: level.cell_size,
            cells,
            spawn_points,
            exit_points,
            paths: BTreeMap::new(),
        };

        let paths: BTreeMap<CellCoord, Arc<[DVec3]>> = grid
            .spawn_points
            .iter()
            .filter_map(|&spawn| {
                let exit = path::nearest_exit(spawn, &grid.exit_points)?;
                Some((spawn, path::compute_path(&grid, spawn, exit).into()))
            })
            .collect();
        grid.paths = paths;
        grid
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn in_bounds(&self, coord: CellCoord) -> bool {
        coord.x >= 0
            && coord.z >= 0
            && coord.x < self.width as i32
            && coord.z < self.height as i32
    }

    fn index_of(&self, coord: CellCoord) -> Option<usize> {
        self.in_bounds(coord)
            .then(|| coord.x as usize + coord.z as usize * self.width as usize)
    }

    /// The cell at `coord`, if it is on the grid.
    pub fn cell(&self, coord: CellCoord) -> Option<&Cell> {
        self.index_of(coord).and_then(|i| self.cells.get(i))
    }

    /// Kind of the cell at `coord`; Empty outside the grid.
    pub fn cell_kind(&self, coord: CellCoord) -> CellKind {
        self.cell(coord).map(|c| c.kind).unwrap_or_default()
    }

    /// Whether a tower stands at `coord`; false outside the grid.
    pub fn is_occupied(&self, coord: CellCoord) -> bool {
        self.cell(coord).is_some_and(|c| c.occupied)
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// True iff the cell is Empty and holds no tower. False outside the grid.
    pub fn can_place_tower(&self, coord: CellCoord) -> bool {
        self.cell(coord)
            .is_some_and(|c| c.kind == CellKind::Empty && !c.occupied)
    }

    /// Mark the cell occupied. Returns false, changing nothing, if a tower
    /// cannot go there.
    pub fn place_tower(&mut self, coord: CellCoord) -> bool {
        if !self.can_place_tower(coord) {
            return false;
        }
        match self.index_of(coord).and_then(|i| self.cells.get_mut(i)) {
            Some(cell) => {
                cell.occupied = true;
                true
            }
            None => false,
        }
    }

    /// Bounds-aware placement check that says why a cell is unusable.
    pub fn check_placement(&self, coord: CellCoord) -> Result<(), PlacementError> {
        let cell = self
            .cell(coord)
            .ok_or(PlacementError::OutOfBounds(coord))?;
        if cell.kind != CellKind::Empty {
            return Err(PlacementError::NotBuildable(coord));
        }
        if cell.occupied {
            return Err(PlacementError::Occupied(coord));
        }
        Ok(())
    }

    /// Clear the occupancy flag. Returns whether a tower was there.
    pub fn remove_tower(&mut self, coord: CellCoord) -> bool {
        match self.index_of(coord).and_then(|i| self.cells.get_mut(i)) {
            Some(cell) if cell.occupied => {
                cell.occupied = false;
                true
            }
            _ => false,
        }
    }

    pub fn spawn_points(&self) -> &[CellCoord] {
        &self.spawn_points
    }

    pub fn exit_points(&self) -> &[CellCoord] {
        &self.exit_points
    }

    /// The cached path from `spawn`, shared with every enemy that uses it.
    pub fn path_from(&self, spawn: CellCoord) -> Option<Arc<[DVec3]>> {
        self.paths.get(&spawn).cloned()
    }

    /// World-space center of a cell (on the y = 0 plane).
    pub fn cell_to_world(&self, coord: CellCoord) -> DVec3 {
        DVec3::new(
            coord.x as f64 * self.cell_size,
            0.0,
            coord.z as f64 * self.cell_size,
        )
    }

    /// Cell whose center is closest to a world position. May be off-grid.
    pub fn world_to_cell(&self, position: DVec3) -> CellCoord {
        CellCoord::new(
            (position.x / self.cell_size).round() as i32,
            (position.z / self.cell_size).round() as i32,
        )
    }
}
