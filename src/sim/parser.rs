//! Level construction from text plans
//!
//! A plan is a list of rows, one symbol per grid cell. `x` is wall, `!` is
//! lava, anything else is empty terrain. Actors come from a [`SymbolTable`]
//! that maps symbols to spawn behaviors.

use std::collections::HashMap;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::geometry::Vector;
use super::level::{Cell, Level, Terrain};
use crate::{LevelError, Settings};

/// One level plan: rows of symbols, top to bottom
pub type Plan = Vec<String>;

/// Actor spawned by a plan symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Spawn {
    Player,
    Coin,
    HorizontalFireball,
    VerticalFireball,
    FireRain,
}

impl Spawn {
    /// Create the actor for the plan cell at `pos`
    pub fn spawn<R: Rng>(self, pos: Vector, rng: &mut R) -> Actor {
        match self {
            Spawn::Player => Actor::player(pos),
            Spawn::Coin => Actor::coin(pos, rng),
            Spawn::HorizontalFireball => Actor::horizontal_fireball(pos),
            Spawn::VerticalFireball => Actor::vertical_fireball(pos),
            Spawn::FireRain => Actor::fire_rain(pos),
        }
    }
}

/// Symbol to spawn behavior mapping
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolTable {
    codes: HashMap<char, Spawn>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// `@` player, `o` coin, `=` `|` `*` fireballs
    pub fn standard() -> Self {
        Self::new()
            .with('@', Spawn::Player)
            .with('o', Spawn::Coin)
            .with('=', Spawn::HorizontalFireball)
            .with('|', Spawn::VerticalFireball)
            .with('*', Spawn::FireRain)
    }

    pub fn with(mut self, symbol: char, spawn: Spawn) -> Self {
        self.codes.insert(symbol, spawn);
        self
    }

    pub fn get(&self, symbol: char) -> Option<Spawn> {
        self.codes.get(&symbol).copied()
    }

    /// Decode a `{"@": "player", "o": "coin"}` style table
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Terrain for a plan symbol
pub fn terrain_from_symbol(symbol: char) -> Cell {
    match symbol {
        'x' => Cell::Wall,
        '!' => Cell::Lava,
        _ => Cell::Empty,
    }
}

/// Decode a JSON array of plans, each an array of row strings
pub fn parse_plans(json: &str) -> Result<Vec<Plan>, LevelError> {
    let plans: Vec<Plan> = serde_json::from_str(json)?;
    log::info!("Decoded {} level plans", plans.len());
    Ok(plans)
}

/// Turns plans into levels
#[derive(Debug, Clone, Default)]
pub struct LevelParser {
    symbols: SymbolTable,
}

impl LevelParser {
    pub fn new(symbols: SymbolTable) -> Self {
        Self { symbols }
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Terrain grid, one cell per symbol
    pub fn create_terrain<S: AsRef<str>>(&self, plan: &[S]) -> Terrain {
        Terrain::new(
            plan.iter()
                .map(|row| row.as_ref().chars().map(terrain_from_symbol).collect())
                .collect(),
        )
    }

    /// Actors for every symbol with a spawn behavior, row by row
    pub fn create_actors<S: AsRef<str>, R: Rng>(&self, plan: &[S], rng: &mut R) -> Vec<Actor> {
        let mut actors = Vec::new();
        for (y, row) in plan.iter().enumerate() {
            for (x, symbol) in row.as_ref().chars().enumerate() {
                if let Some(spawn) = self.symbols.get(symbol) {
                    actors.push(spawn.spawn(Vector::new(x as f64, y as f64), rng));
                }
            }
        }
        actors
    }

    /// Build a level; coin phases are drawn from `rng`
    pub fn parse<S: AsRef<str>, R: Rng>(&self, plan: &[S], rng: &mut R) -> Result<Level, LevelError> {
        Level::new(self.create_terrain(plan), self.create_actors(plan, rng))
    }

    /// Build a level whose coin phases are fixed by `seed`
    pub fn parse_seeded<S: AsRef<str>>(&self, plan: &[S], seed: u64) -> Result<Level, LevelError> {
        let mut rng = Pcg32::seed_from_u64(seed);
        self.parse(plan, &mut rng)
    }

    /// Build a level with seed and finish delay taken from `settings`
    pub fn parse_with<S: AsRef<str>>(&self, plan: &[S], settings: &Settings) -> Result<Level, LevelError> {
        Ok(self
            .parse_seeded(plan, settings.seed)?
            .with_finish_delay(settings.finish_delay))
    }
}
