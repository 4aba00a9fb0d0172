//! Control surface over the shared `AppState`.
//!
//! These are the operations a front end drives: start the loop, push player
//! commands into it, and poll the latest snapshot.

use std::thread::JoinHandle;

use tracing::info;

use bastion_core::commands::PlayerCommand;
use bastion_core::state::GameStateSnapshot;

use crate::game_loop::{self, LoopOptions, LoopSummary, SnapshotSink};
use crate::state::{AppError, AppState};

/// Start the game loop thread. Fails if one is already running.
pub fn start_simulation(
    state: &AppState,
    options: LoopOptions,
    sink: SnapshotSink,
) -> Result<JoinHandle<LoopSummary>, AppError> {
    let mut running = state.running.lock().map_err(|_| AppError::Poisoned)?;
    if *running {
        return Err(AppError::AlreadyRunning);
    }
    if let Some(level) = &options.level {
        level.validate()?;
    }

    let (tx, handle) =
        game_loop::spawn_game_loop(options, state.latest_snapshot.clone(), sink)?;

    let mut tx_lock = state.command_tx.lock().map_err(|_| AppError::Poisoned)?;
    *tx_lock = Some(tx);
    *running = true;

    info!("simulation started");
    Ok(handle)
}

/// Wait for the loop thread to finish and mark the state stopped.
pub fn join_simulation(
    state: &AppState,
    handle: JoinHandle<LoopSummary>,
) -> Result<LoopSummary, AppError> {
    let summary = handle.join().map_err(|_| AppError::Disconnected)?;
    let mut running = state.running.lock().map_err(|_| AppError::Poisoned)?;
    *running = false;
    let mut tx_lock = state.command_tx.lock().map_err(|_| AppError::Poisoned)?;
    *tx_lock = None;
    Ok(summary)
}

/// Send a player command to the simulation.
pub fn send_command(state: &AppState, command: PlayerCommand) -> Result<(), AppError> {
    state.send_command(command)
}

/// Latest snapshot (for synchronous polling).
pub fn get_snapshot(state: &AppState) -> Result<Option<GameStateSnapshot>, AppError> {
    state.snapshot()
}

/// Latest snapshot encoded as JSON, `None` before the first tick.
pub fn get_snapshot_json(state: &AppState) -> Result<Option<String>, AppError> {
    match state.snapshot()? {
        Some(snapshot) => Ok(Some(serde_json::to_string(&snapshot)?)),
        None => Ok(None),
    }
}
