//! Scenario definitions: the built-in levels.
//!
//! Each scenario defines the board layout, wave composition, and
//! difficulty progression.

use bastion_core::config::{EnemyGroup, LevelConfig, WaveDefinition};
use bastion_core::constants::{DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH};
use bastion_core::enums::{CellKind, EnemyKind, ScenarioId};
use bastion_core::types::CellCoord;

/// Build the level for a given scenario.
pub fn build_level(scenario: ScenarioId) -> LevelConfig {
    match scenario {
        ScenarioId::Easy => LevelConfig::default_level(),
        ScenarioId::Medium => build_medium(),
        ScenarioId::Hard => build_hard(),
    }
}

/// Medium: "Switchback"
/// L-shaped route, 5 waves, Tanks from wave 3.
fn build_medium() -> LevelConfig {
    let mut level = LevelConfig::blank(2, "Switchback", DEFAULT_GRID_WIDTH, DEFAULT_GRID_HEIGHT);
    lay_route(&mut level, CellCoord::new(0, 2), 7, 8);

    level.waves = vec![
        wave(vec![group(EnemyKind::Basic, 10, 0.8)], 3.0),
        wave(
            vec![group(EnemyKind::Basic, 10, 0.8), group(EnemyKind::Fast, 8, 0.6)],
            3.0,
        ),
        wave(
            vec![
                group(EnemyKind::Fast, 10, 0.5),
                group(EnemyKind::Tank, 4, 2.0),
                group(EnemyKind::Basic, 10, 0.6),
            ],
            3.0,
        ),
        wave(
            vec![
                group(EnemyKind::Basic, 12, 0.6),
                group(EnemyKind::TowerAttacker, 4, 1.5),
                group(EnemyKind::Fast, 10, 0.5),
            ],
            3.0,
        ),
        wave(
            vec![
                group(EnemyKind::Tank, 6, 1.5),
                group(EnemyKind::Fast, 12, 0.4),
                group(EnemyKind::TowerAttacker, 5, 1.0),
            ],
            2.5,
        ),
    ];
    level.starting_currency = 350;
    level
}

/// Hard: "Gauntlet"
/// L-shaped route through obstacles, 7 waves, mixed heavy groups.
fn build_hard() -> LevelConfig {
    let mut level = LevelConfig::blank(3, "Gauntlet", DEFAULT_GRID_WIDTH, DEFAULT_GRID_HEIGHT);
    lay_route(&mut level, CellCoord::new(0, 1), 4, 7);

    for (x, z) in [(2, 4), (2, 5), (8, 3), (9, 3), (10, 5), (11, 5), (6, 9), (12, 9)] {
        level.set_cell(CellCoord::new(x, z), CellKind::Obstacle);
    }

    level.waves = vec![
        wave(vec![group(EnemyKind::Basic, 10, 0.8)], 2.0),
        wave(
            vec![group(EnemyKind::Fast, 10, 0.5), group(EnemyKind::Basic, 10, 0.5)],
            2.0,
        ),
        wave(
            vec![group(EnemyKind::Tank, 4, 1.5), group(EnemyKind::Fast, 10, 0.4)],
            2.0,
        ),
        wave(
            vec![
                group(EnemyKind::TowerAttacker, 5, 1.0),
                group(EnemyKind::Basic, 14, 0.4),
            ],
            2.0,
        ),
        wave(
            vec![
                group(EnemyKind::Tank, 6, 1.2),
                group(EnemyKind::TowerAttacker, 6, 0.8),
            ],
            2.0,
        ),
        wave(
            vec![
                group(EnemyKind::Fast, 14, 0.3),
                group(EnemyKind::Tank, 5, 1.0),
                group(EnemyKind::Fast, 14, 0.3),
            ],
            1.5,
        ),
        wave(
            vec![
                group(EnemyKind::Tank, 8, 0.8),
                group(EnemyKind::TowerAttacker, 8, 0.6),
                group(EnemyKind::Fast, 18, 0.25),
            ],
            1.5,
        ),
    ];
    level.starting_currency = 400;
    level.starting_lives = 15;
    level.time_between_waves_secs = 4.0;
    level
}

/// Lay an L-shaped route: east along the spawn row to `turn_x`, south along
/// that column to `exit_row`, then east to an exit on the last column.
fn lay_route(level: &mut LevelConfig, spawn: CellCoord, turn_x: i32, exit_row: i32) {
    let last = level.grid_width as i32 - 1;

    level.set_cell(spawn, CellKind::SpawnPoint);
    for x in spawn.x + 1..=turn_x {
        level.set_cell(CellCoord::new(x, spawn.z), CellKind::Path);
    }
    for z in spawn.z + 1..=exit_row {
        level.set_cell(CellCoord::new(turn_x, z), CellKind::Path);
    }
    for x in turn_x + 1..last {
        level.set_cell(CellCoord::new(x, exit_row), CellKind::Path);
    }
    level.set_cell(CellCoord::new(last, exit_row), CellKind::ExitPoint);
}

fn group(enemy_kind: EnemyKind, count: u32, spawn_delay_secs: f64) -> EnemyGroup {
    EnemyGroup {
        enemy_kind,
        count,
        spawn_delay_secs,
    }
}

fn wave(groups: Vec<EnemyGroup>, delay_between_groups_secs: f64) -> WaveDefinition {
    WaveDefinition {
        groups,
        delay_between_groups_secs,
    }
}
