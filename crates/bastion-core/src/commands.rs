//! Player commands sent from the frontend to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::TowerHandle;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Level flow ---
    /// Select a scenario before starting a level.
    SelectScenario { scenario: ScenarioId },
    /// Start the selected scenario (or the loaded level).
    StartLevel,
    /// Tear down and start the current level again.
    RestartLevel,
    /// Tear down and go back to the main menu.
    ReturnToMenu,

    // --- Building ---
    /// Buy and place a tower at a grid cell.
    PlaceTower { kind: TowerKind, x: i32, z: i32 },
    /// Pay to bring a destroyed tower back.
    RepairTower { tower: TowerHandle },

    // --- Simulation control ---
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
    /// Set time scale (1.0 = normal, 2.0 = double, 0.0 = frozen).
    SetTimeScale { scale: f64 },
}
