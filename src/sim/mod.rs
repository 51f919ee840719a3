//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed time comes from the caller
//! - Seeded RNG only (coin phases)
//! - Stable iteration order (actor insertion order)
//! - No rendering or platform dependencies

pub mod actor;
pub mod geometry;
pub mod level;
pub mod parser;
pub mod tick;

pub use actor::{Actor, ActorKind, Behavior, FireballKind};
pub use geometry::{Rect, Vector, rects_overlap, segments_overlap};
pub use level::{ActorId, Cell, Level, Obstacle, Status, Terrain, Touch};
pub use parser::{LevelParser, Plan, Spawn, SymbolTable, parse_plans, terrain_from_symbol};
pub use tick::{advance, tick};
