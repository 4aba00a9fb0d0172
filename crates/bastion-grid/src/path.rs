//! Spawn-to-exit path computation.
//!
//! This is a routing heuristic, not a shortest-path search: the path visits
//! every Path cell ordered by straight-line distance from the spawn. It is
//! exact for a single contiguous corridor that moves steadily away from the
//! spawn. Branching or disjoint path regions still produce a deterministic
//! ordering, just not necessarily a walkable one.

use bastion_core::enums::CellKind;
use bastion_core::types::CellCoord;
use glam::DVec3;

use crate::grid::Grid;

/// Exit closest to `spawn` by straight-line distance. The earliest exit in
/// the list wins ties.
pub fn nearest_exit(spawn: CellCoord, exits: &[CellCoord]) -> Option<CellCoord> {
    let mut best: Option<(CellCoord, f64)> = None;
    for &exit in exits {
        let d = spawn.distance_to(&exit);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((exit, d)),
        }
    }
    best.map(|(exit, _)| exit)
}

/// Path cells in scan order (x outer, z inner), stably sorted by distance
/// from `spawn`.
pub fn ordered_path_cells(grid: &Grid, spawn: CellCoord) -> Vec<CellCoord> {
    let mut cells = Vec::new();
    for x in 0..grid.width() as i32 {
        for z in 0..grid.height() as i32 {
            let coord = CellCoord::new(x, z);
            if grid.cell_kind(coord) == CellKind::Path {
                cells.push(coord);
            }
        }
    }
    cells.sort_by(|a, b| spawn.distance_to(a).total_cmp(&spawn.distance_to(b)));
    cells
}

/// World-space polyline: spawn center, ordered Path cells, exit center.
pub fn compute_path(grid: &Grid, spawn: CellCoord, exit: CellCoord) -> Vec<DVec3> {
    let mut vertices = vec![grid.cell_to_world(spawn)];
    vertices.extend(
        ordered_path_cells(grid, spawn)
            .into_iter()
            .map(|c| grid.cell_to_world(c)),
    );
    vertices.push(grid.cell_to_world(exit));
    vertices
}
