//! Game loop thread: runs the simulation engine at 30Hz and emits snapshots.
//!
//! The engine is created inside this thread so it never crosses a thread
//! boundary. Commands arrive via `mpsc` channel. Snapshots go to a sink
//! callback and are stored in shared state for synchronous polling.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use bastion_core::commands::PlayerCommand;
use bastion_core::config::LevelConfig;
use bastion_core::constants::TICK_RATE;
use bastion_core::enums::GamePhase;
use bastion_core::state::GameStateSnapshot;
use bastion_sim::{SimConfig, SimulationEngine};

use crate::state::GameLoopCommand;

/// Nominal duration of one tick at 1x speed.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Receives every snapshot the loop produces.
pub type SnapshotSink = Box<dyn FnMut(&GameStateSnapshot) + Send>;

/// How the game loop should run.
#[derive(Debug, Clone, Default)]
pub struct LoopOptions {
    pub config: SimConfig,
    /// Custom level loaded into the engine before the first tick.
    pub level: Option<LevelConfig>,
    /// Commands queued before the first tick, processed in order.
    pub initial_commands: Vec<PlayerCommand>,
    /// Pace ticks against the wall clock. Headless runs go flat out and
    /// stop as soon as the engine is not Active with no command waiting.
    pub realtime: bool,
    /// Stop once this many simulation ticks have elapsed.
    pub max_ticks: Option<u64>,
    /// Stop as soon as the level ends in victory or defeat.
    pub stop_when_over: bool,
}

/// Why the loop returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Shutdown,
    Disconnected,
    LevelOver,
    TickLimit,
    /// Headless run left with nothing to simulate.
    Idle,
    InvalidLevel,
}

/// Final state reported by the loop thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopSummary {
    pub reason: StopReason,
    pub phase: GamePhase,
    pub ticks: u64,
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender for the control layer to use and the thread
/// handle yielding the loop's summary.
pub fn spawn_game_loop(
    options: LoopOptions,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    sink: SnapshotSink,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<LoopSummary>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("bastion-game-loop".into())
        .spawn(move || run_game_loop(options, cmd_rx, &latest_snapshot, sink))?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown, channel disconnect, level end or
/// tick limit, depending on `options`.
fn run_game_loop(
    options: LoopOptions,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
    mut sink: SnapshotSink,
) -> LoopSummary {
    let mut engine = SimulationEngine::new(options.config);
    if let Some(level) = options.level {
        if let Err(err) = engine.load_level(level) {
            warn!(%err, "rejected level");
            return summary(&engine, StopReason::InvalidLevel);
        }
    }
    engine.queue_commands(options.initial_commands);

    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => return summary(&engine, StopReason::Shutdown),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    return summary(&engine, StopReason::Disconnected)
                }
            }
        }

        // 2. Advance one tick (engine handles pause semantics internally)
        let snapshot = engine.tick();

        // 3. Hand the snapshot to the sink
        sink(&snapshot);

        // 4. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if options.stop_when_over && engine.phase().is_over() {
            info!(phase = ?engine.phase(), tick = engine.time().tick, "level over");
            return summary(&engine, StopReason::LevelOver);
        }
        if options.max_ticks.is_some_and(|max| engine.time().tick >= max) {
            info!(tick = engine.time().tick, "tick limit reached");
            return summary(&engine, StopReason::TickLimit);
        }

        if !options.realtime {
            if engine.phase() != GamePhase::Active {
                match cmd_rx.try_recv() {
                    Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
                    Ok(GameLoopCommand::Shutdown) => {
                        return summary(&engine, StopReason::Shutdown)
                    }
                    Err(mpsc::TryRecvError::Empty) => {
                        info!(phase = ?engine.phase(), "headless loop idle");
                        return summary(&engine, StopReason::Idle);
                    }
                    Err(mpsc::TryRecvError::Disconnected) => {
                        return summary(&engine, StopReason::Disconnected)
                    }
                }
            }
            continue;
        }

        // 5. Sleep until next tick, adjusting for time_scale
        let time_scale = engine.time_scale();
        let effective_tick_duration = if time_scale > 0.001 {
            TICK_DURATION.div_f64(time_scale)
        } else {
            TICK_DURATION
        };

        next_tick_time += effective_tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > effective_tick_duration * 2 {
            // Too far behind; reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}

fn summary(engine: &SimulationEngine, reason: StopReason) -> LoopSummary {
    LoopSummary {
        reason,
        phase: engine.phase(),
        ticks: engine.time().tick,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bastion_core::enums::{ScenarioId, TowerKind};
    use bastion_core::events::GameEvent;

    fn headless(initial_commands: Vec<PlayerCommand>) -> LoopOptions {
        LoopOptions {
            initial_commands,
            stop_when_over: true,
            ..LoopOptions::default()
        }
    }

    #[test]
    fn test_loop_stops_at_tick_limit() {
        let latest = Arc::new(Mutex::new(None));
        let seen = Arc::new(Mutex::new(0u32));
        let counter = Arc::clone(&seen);
        let options = LoopOptions {
            max_ticks: Some(60),
            ..headless(vec![PlayerCommand::StartLevel])
        };

        let (_tx, handle) = spawn_game_loop(
            options,
            Arc::clone(&latest),
            Box::new(move |_| *counter.lock().unwrap() += 1),
        )
        .unwrap();
        let result = handle.join().unwrap();

        assert_eq!(result.reason, StopReason::TickLimit);
        assert_eq!(result.ticks, 60);
        assert_eq!(result.phase, GamePhase::Active);
        assert_eq!(*seen.lock().unwrap(), 60);
        let snap = latest.lock().unwrap().clone().unwrap();
        assert_eq!(snap.time.tick, 60);
    }

    #[test]
    fn test_paused_headless_run_goes_idle() {
        let latest = Arc::new(Mutex::new(None));
        let seen = Arc::new(Mutex::new(0u32));
        let counter = Arc::clone(&seen);
        let options = LoopOptions {
            max_ticks: Some(10),
            ..headless(vec![PlayerCommand::StartLevel, PlayerCommand::Pause])
        };

        let (_tx, handle) = spawn_game_loop(
            options,
            latest,
            Box::new(move |_| *counter.lock().unwrap() += 1),
        )
        .unwrap();
        let result = handle.join().unwrap();

        assert_eq!(result.reason, StopReason::Idle);
        assert_eq!(result.phase, GamePhase::Paused);
        assert_eq!(result.ticks, 0);
        assert_eq!(*seen.lock().unwrap(), 1);
    }

    #[test]
    fn test_headless_run_without_commands_goes_idle() {
        let (_tx, handle) = spawn_game_loop(
            headless(Vec::new()),
            Arc::new(Mutex::new(None)),
            Box::new(|_| {}),
        )
        .unwrap();
        let result = handle.join().unwrap();
        assert_eq!(result.reason, StopReason::Idle);
        assert_eq!(result.phase, GamePhase::MainMenu);
    }

    #[test]
    fn test_realtime_run_is_paced_by_time_scale() {
        let options = LoopOptions {
            config: SimConfig {
                time_scale: 4.0,
                ..SimConfig::default()
            },
            realtime: true,
            max_ticks: Some(12),
            ..headless(vec![PlayerCommand::StartLevel])
        };

        let start = Instant::now();
        let (_tx, handle) =
            spawn_game_loop(options, Arc::new(Mutex::new(None)), Box::new(|_| {})).unwrap();
        let result = handle.join().unwrap();
        let elapsed = start.elapsed();

        assert_eq!(result.reason, StopReason::TickLimit);
        // Eleven sleeps of a quarter tick each.
        assert!(
            elapsed >= TICK_DURATION.div_f64(4.0) * 10,
            "12 ticks at 4x finished in {elapsed:?}"
        );
    }

    #[test]
    fn test_paused_realtime_run_waits_for_commands() {
        let latest = Arc::new(Mutex::new(None));
        let options = LoopOptions {
            realtime: true,
            max_ticks: Some(10),
            ..headless(vec![PlayerCommand::StartLevel, PlayerCommand::Pause])
        };
        let (tx, handle) = spawn_game_loop(options, Arc::clone(&latest), Box::new(|_| {})).unwrap();

        std::thread::sleep(TICK_DURATION * 5);
        let snap = latest.lock().unwrap().clone().unwrap();
        assert_eq!(snap.phase, GamePhase::Paused);

        tx.send(GameLoopCommand::PlayerCommand(PlayerCommand::Resume))
            .unwrap();
        let result = handle.join().unwrap();
        assert_eq!(result.reason, StopReason::TickLimit);
        assert_eq!(result.ticks, 10);
    }

    #[test]
    fn test_undefended_level_runs_to_defeat() {
        let latest = Arc::new(Mutex::new(None));
        let outcome = Arc::new(Mutex::new(None));
        let recorder = Arc::clone(&outcome);
        let options = LoopOptions {
            max_ticks: Some(30 * 60 * 20),
            ..headless(vec![
                PlayerCommand::SelectScenario {
                    scenario: ScenarioId::Easy,
                },
                PlayerCommand::StartLevel,
            ])
        };

        let (_tx, handle) = spawn_game_loop(
            options,
            latest,
            Box::new(move |snap| {
                for event in &snap.events {
                    if let GameEvent::LevelCompleted { victory } = event {
                        *recorder.lock().unwrap() = Some(*victory);
                    }
                }
            }),
        )
        .unwrap();
        let result = handle.join().unwrap();

        assert_eq!(result.reason, StopReason::LevelOver);
        assert_eq!(result.phase, GamePhase::Defeat);
        assert_eq!(*outcome.lock().unwrap(), Some(false));
    }

    #[test]
    fn test_initial_placements_are_applied() {
        let latest = Arc::new(Mutex::new(None));
        let options = LoopOptions {
            max_ticks: Some(1),
            ..headless(vec![
                PlayerCommand::StartLevel,
                PlayerCommand::PlaceTower {
                    kind: TowerKind::Basic,
                    x: 3,
                    z: 3,
                },
            ])
        };

        let (_tx, handle) =
            spawn_game_loop(options, Arc::clone(&latest), Box::new(|_| {})).unwrap();
        handle.join().unwrap();

        let snap = latest.lock().unwrap().clone().unwrap();
        assert_eq!(snap.towers.len(), 1);
        assert_eq!(snap.towers[0].kind, TowerKind::Basic);
    }

    #[test]
    fn test_invalid_level_stops_before_ticking() {
        let mut level = LevelConfig::default_level();
        level.waves.clear();
        level.grid_width = 0;
        let options = LoopOptions {
            level: Some(level),
            ..headless(vec![PlayerCommand::StartLevel])
        };

        let latest = Arc::new(Mutex::new(None));
        let (_tx, handle) =
            spawn_game_loop(options, Arc::clone(&latest), Box::new(|_| {})).unwrap();
        let result = handle.join().unwrap();

        assert_eq!(result.reason, StopReason::InvalidLevel);
        assert!(latest.lock().unwrap().is_none());
    }

    #[test]
    fn test_shutdown_command_stops_loop() {
        let latest = Arc::new(Mutex::new(None));
        let (tx, handle) = spawn_game_loop(
            LoopOptions {
                realtime: true,
                ..LoopOptions::default()
            },
            latest,
            Box::new(|_| {}),
        )
        .unwrap();

        tx.send(GameLoopCommand::Shutdown).unwrap();
        let result = handle.join().unwrap();
        assert_eq!(result.reason, StopReason::Shutdown);
        assert_eq!(result.phase, GamePhase::MainMenu);
    }
}
