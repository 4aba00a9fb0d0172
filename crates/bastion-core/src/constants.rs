//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Grid ---

/// Default edge length of one grid cell in world units.
pub const DEFAULT_CELL_SIZE: f64 = 1.0;

/// Default level dimensions.
pub const DEFAULT_GRID_WIDTH: u32 = 15;
pub const DEFAULT_GRID_HEIGHT: u32 = 10;

// --- Enemies ---

/// Distance below which an enemy counts as having reached a path vertex.
pub const WAYPOINT_EPSILON: f64 = 0.1;

/// Time a dead enemy lingers (death animation) before it is removed.
pub const DEATH_GRACE_SECS: f64 = 1.5;

/// How often a tower-attacking enemy without a target scans for towers.
pub const TOWER_SCAN_INTERVAL_SECS: f64 = 0.25;

// --- Projectiles ---

/// Default projectile flight speed (world units per second).
pub const PROJECTILE_SPEED: f64 = 15.0;

/// Projectiles that have not hit anything after this long are discarded.
pub const PROJECTILE_LIFETIME_SECS: f64 = 5.0;

// --- Waves ---

/// Delay before the first wave and between waves.
pub const DEFAULT_TIME_BETWEEN_WAVES_SECS: f64 = 5.0;

/// Granularity of the inter-wave countdown notifications.
pub const COUNTDOWN_STEP_SECS: f64 = 0.1;

/// Default delay between consecutive enemy groups in a wave.
pub const DEFAULT_DELAY_BETWEEN_GROUPS_SECS: f64 = 3.0;

// --- Player ---

/// Lives at the start of a level.
pub const STARTING_LIVES: u32 = 20;

/// Currency at the start of a level.
pub const STARTING_CURRENCY: u32 = 300;

// --- Score ---

/// Flat bonus for completing a wave.
pub const WAVE_BONUS_BASE: u32 = 50;

/// Additional bonus per wave index.
pub const WAVE_BONUS_PER_INDEX: u32 = 25;

// --- Time scale ---

pub const MAX_TIME_SCALE: f64 = 4.0;
