//! Lava Run - simulation core for a grid platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, actors, level state, plan parsing)
//! - `settings`: Data-driven level configuration
//! - `error`: Invalid-argument conditions raised at runtime boundaries
//!
//! Rendering, input and the real-time frame loop live outside this crate.
//! They drive it through [`sim::Level`] queries and [`sim::tick`].

pub mod error;
pub mod settings;
pub mod sim;

pub use error::LevelError;
pub use settings::Settings;

/// Game tuning constants, in grid units and seconds
pub mod consts {
    use glam::DVec2;

    /// Elapsed time assumed when the caller has no frame time
    pub const DEFAULT_TIME_STEP: f64 = 1.0;
    /// Longest sub-step `advance` simulates in one go
    pub const MAX_STEP: f64 = 0.05;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Delay between the level outcome and the level reporting finished
    pub const FINISH_DELAY: f64 = 1.0;

    /// Size of actors that don't pick their own (fireballs, probes)
    pub const ACTOR_SIZE: DVec2 = DVec2::new(1.0, 1.0);

    /// Player box
    pub const PLAYER_SIZE: DVec2 = DVec2::new(0.8, 1.5);
    /// Player spawns this far above its plan cell so it stands on the floor
    pub const PLAYER_LIFT: f64 = 0.5;

    /// Coin box and its offset inside the plan cell
    pub const COIN_SIZE: DVec2 = DVec2::new(0.6, 0.6);
    pub const COIN_OFFSET: DVec2 = DVec2::new(0.2, 0.1);
    /// Coin wobble (radians per second, grid units)
    pub const COIN_PHASE_RATE: f64 = 8.0;
    pub const COIN_AMPLITUDE: f64 = 0.07;

    /// Fireball speeds (grid units per second)
    pub const HORIZONTAL_FIREBALL_SPEED: DVec2 = DVec2::new(2.0, 0.0);
    pub const VERTICAL_FIREBALL_SPEED: DVec2 = DVec2::new(0.0, 2.0);
    pub const FIRE_RAIN_SPEED: DVec2 = DVec2::new(0.0, 3.0);

    /// Terrain cells only block from `x + CELL_INSET` to `x + 1`
    pub const CELL_INSET: f64 = 0.2;
}
