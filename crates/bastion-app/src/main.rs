use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use bastion_app::cli::Cli;
use bastion_app::control;
use bastion_app::game_loop::{LoopOptions, LoopSummary};
use bastion_app::state::{AppError, AppState};
use bastion_core::config::LevelConfig;
use bastion_core::events::GameEvent;
use bastion_core::state::GameStateSnapshot;
use bastion_sim::SimConfig;

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(summary) => {
            info!(
                reason = ?summary.reason,
                phase = ?summary.phase,
                ticks = summary.ticks,
                "run finished"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(%err, "run failed");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

fn run(cli: &Cli) -> Result<LoopSummary, AppError> {
    let level = cli.level.as_ref().map(LevelConfig::from_path).transpose()?;

    let options = LoopOptions {
        config: SimConfig {
            seed: cli.seed,
            time_scale: cli.time_scale,
            destructible_towers: cli.destructible_towers,
            ..SimConfig::default()
        },
        level,
        initial_commands: cli.initial_commands(),
        realtime: cli.realtime,
        max_ticks: cli.max_ticks,
        stop_when_over: true,
    };

    let state = AppState::new();
    let handle = control::start_simulation(&state, options, Box::new(log_events))?;
    let summary = control::join_simulation(&state, handle)?;

    if cli.print_snapshot {
        if let Some(json) = control::get_snapshot_json(&state)? {
            println!("{json}");
        }
    }
    Ok(summary)
}

fn log_events(snapshot: &GameStateSnapshot) {
    let tick = snapshot.time.tick;
    for event in &snapshot.events {
        match event {
            GameEvent::WaveStarted { index, definition } => {
                info!(tick, wave = index + 1, groups = definition.groups.len(), "wave started")
            }
            GameEvent::WaveCompleted { index } => info!(tick, wave = index + 1, "wave completed"),
            GameEvent::AllWavesCompleted => info!(tick, "all waves completed"),
            GameEvent::TowerPlaced { tower, kind, cell } => {
                info!(tick, ?tower, ?kind, x = cell.x, z = cell.z, "tower placed")
            }
            GameEvent::TowerDestroyed { tower } => warn!(tick, ?tower, "tower destroyed"),
            GameEvent::EnemyReachedExit { enemy, damage } => {
                warn!(tick, ?enemy, damage, lives = snapshot.lives, "enemy leaked")
            }
            GameEvent::LevelCompleted { victory } => info!(
                tick,
                victory,
                score = snapshot.score,
                lives = snapshot.lives,
                "level completed"
            ),
            other => debug!(tick, event = ?other, "event"),
        }
    }
}
