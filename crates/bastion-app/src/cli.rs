//! Command-line arguments for the headless runner.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use bastion_core::commands::PlayerCommand;
use bastion_core::enums::{ScenarioId, TowerKind};
use bastion_core::types::CellCoord;

#[derive(Debug, Parser)]
#[command(name = "bastion", about = "Run a tower-defense level headlessly")]
pub struct Cli {
    /// Built-in scenario to play.
    #[arg(long, value_enum, default_value_t = ScenarioArg::Easy)]
    pub scenario: ScenarioArg,
    /// Play a level loaded from a JSON file instead of a scenario.
    #[arg(long, value_name = "PATH")]
    pub level: Option<PathBuf>,
    /// Seed for the simulation RNG.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
    /// Stop after this many simulation ticks.
    #[arg(long)]
    pub max_ticks: Option<u64>,
    /// Pace ticks at 30Hz instead of running flat out.
    #[arg(long)]
    pub realtime: bool,
    /// Playback speed for realtime runs.
    #[arg(long, default_value_t = 1.0)]
    pub time_scale: f64,
    /// Towers to place at start, e.g. `sniper@4,3`. Repeatable.
    #[arg(long = "tower", value_name = "KIND@X,Z", value_parser = parse_tower)]
    pub towers: Vec<TowerPlacement>,
    /// Let tower attackers damage and destroy towers.
    #[arg(long)]
    pub destructible_towers: bool,
    /// Print the final snapshot as JSON to stdout.
    #[arg(long)]
    pub print_snapshot: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScenarioArg {
    Easy,
    Medium,
    Hard,
}

impl From<ScenarioArg> for ScenarioId {
    fn from(arg: ScenarioArg) -> Self {
        match arg {
            ScenarioArg::Easy => ScenarioId::Easy,
            ScenarioArg::Medium => ScenarioId::Medium,
            ScenarioArg::Hard => ScenarioId::Hard,
        }
    }
}

/// A tower to buy before the first tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TowerPlacement {
    pub kind: TowerKind,
    pub cell: CellCoord,
}

/// Parse `KIND@X,Z`.
pub fn parse_tower(raw: &str) -> Result<TowerPlacement, String> {
    let (kind, coords) = raw
        .split_once('@')
        .ok_or_else(|| format!("expected KIND@X,Z, got `{raw}`"))?;
    let kind = match kind.trim().to_ascii_lowercase().as_str() {
        "basic" => TowerKind::Basic,
        "aoe" | "aoe-cannon" | "cannon" => TowerKind::AoeCannon,
        "sniper" => TowerKind::Sniper,
        "slow" => TowerKind::Slow,
        other => return Err(format!("unknown tower kind `{other}`")),
    };
    let (x, z) = coords
        .split_once(',')
        .ok_or_else(|| format!("expected X,Z after `@`, got `{coords}`"))?;
    let x = x.trim().parse::<i32>().map_err(|e| format!("bad x: {e}"))?;
    let z = z.trim().parse::<i32>().map_err(|e| format!("bad z: {e}"))?;
    Ok(TowerPlacement {
        kind,
        cell: CellCoord::new(x, z),
    })
}

impl Cli {
    /// Commands that start the chosen level and buy the requested towers.
    ///
    /// A loaded level takes precedence over the scenario, so no scenario is
    /// selected when `--level` is given.
    pub fn initial_commands(&self) -> Vec<PlayerCommand> {
        let mut commands = Vec::with_capacity(self.towers.len() + 2);
        if self.level.is_none() {
            commands.push(PlayerCommand::SelectScenario {
                scenario: self.scenario.into(),
            });
        }
        commands.push(PlayerCommand::StartLevel);
        commands.extend(self.towers.iter().map(|t| PlayerCommand::PlaceTower {
            kind: t.kind,
            x: t.cell.x,
            z: t.cell.z,
        }));
        commands
    }
}
