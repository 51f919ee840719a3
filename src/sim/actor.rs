//! Actors: the moving rectangles of a level
//!
//! The set of behaviors is closed, so per-tick motion and obstacle handling
//! dispatch on [`Behavior`] rather than through trait objects.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, Vector};
use super::level::{Obstacle, Terrain};
use crate::consts::*;

/// Fixed tag of an actor, used by touch handling and `no_more_actors`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
    Player,
    Coin,
    Fireball,
    /// Transient query box, never stored in a level
    Probe,
}

impl ActorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActorKind::Player => "player",
            ActorKind::Coin => "coin",
            ActorKind::Fireball => "fireball",
            ActorKind::Probe => "probe",
        }
    }
}

/// Fireball variants differ only in speed and in what they do on impact
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FireballKind {
    /// Bounces back and forth along x
    Horizontal,
    /// Bounces up and down along y
    Vertical,
    /// Falls, and jumps back to where it started when it lands
    Rain { start: Vector },
}

/// Per-kind state and motion rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Behavior {
    Probe,
    /// Moved by input, never by itself
    Player,
    /// Bobs around `base` with `sin(phase)`
    Coin { phase: f64, base: Vector },
    Fireball(FireballKind),
}

/// A positioned, sized, optionally moving rectangle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub pos: Vector,
    pub size: Vector,
    pub speed: Vector,
    pub behavior: Behavior,
}

impl Actor {
    /// Zero-motion box for hypothetical position checks
    pub fn probe(pos: Vector, size: Vector) -> Self {
        Self {
            pos,
            size,
            speed: Vector::ZERO,
            behavior: Behavior::Probe,
        }
    }

    /// Player spawned from the plan cell at `pos`
    pub fn player(pos: Vector) -> Self {
        Self {
            pos: pos - Vector::new(0.0, PLAYER_LIFT),
            size: PLAYER_SIZE,
            speed: Vector::ZERO,
            behavior: Behavior::Player,
        }
    }

    /// Coin spawned from the plan cell at `pos`, with a random starting phase
    pub fn coin<R: Rng>(pos: Vector, rng: &mut R) -> Self {
        let base = pos + COIN_OFFSET;
        Self {
            pos: base,
            size: COIN_SIZE,
            speed: Vector::ZERO,
            behavior: Behavior::Coin {
                phase: rng.random::<f64>() * std::f64::consts::TAU,
                base,
            },
        }
    }

    pub fn fireball(pos: Vector, kind: FireballKind) -> Self {
        let speed = match kind {
            FireballKind::Horizontal => HORIZONTAL_FIREBALL_SPEED,
            FireballKind::Vertical => VERTICAL_FIREBALL_SPEED,
            FireballKind::Rain { .. } => FIRE_RAIN_SPEED,
        };
        Self {
            pos,
            size: ACTOR_SIZE,
            speed,
            behavior: Behavior::Fireball(kind),
        }
    }

    pub fn horizontal_fireball(pos: Vector) -> Self {
        Self::fireball(pos, FireballKind::Horizontal)
    }

    pub fn vertical_fireball(pos: Vector) -> Self {
        Self::fireball(pos, FireballKind::Vertical)
    }

    pub fn fire_rain(pos: Vector) -> Self {
        Self::fireball(pos, FireballKind::Rain { start: pos })
    }

    pub fn kind(&self) -> ActorKind {
        match self.behavior {
            Behavior::Probe => ActorKind::Probe,
            Behavior::Player => ActorKind::Player,
            Behavior::Coin { .. } => ActorKind::Coin,
            Behavior::Fireball(_) => ActorKind::Fireball,
        }
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.pos.x
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.pos.y
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.pos.y + self.size.y
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.left(), self.right(), self.top(), self.bottom())
    }

    /// Check whether two actors overlap
    ///
    /// An actor never intersects itself (by reference). A box sharing our
    /// exact position is ignored when both of its size components are
    /// negative, so degenerate probes can sit on a real actor.
    pub fn is_intersect(&self, other: &Actor) -> bool {
        if std::ptr::eq(self, other) {
            return false;
        }

        if self.pos == other.pos && other.size.x < 0.0 && other.size.y < 0.0 {
            return false;
        }

        self.bounds().overlaps(&other.bounds())
    }

    /// Advance this actor by `time` seconds against the level terrain
    ///
    /// `time` must not be negative; coin phases only move forward.
    pub fn act(&mut self, time: f64, terrain: &Terrain) {
        debug_assert!(time >= 0.0, "negative frame time {}", time);
        match self.behavior {
            Behavior::Probe | Behavior::Player => {}
            Behavior::Coin { phase, base } => {
                let phase = phase + COIN_PHASE_RATE * time;
                self.pos = base + Vector::new(0.0, phase.sin() * COIN_AMPLITUDE);
                self.behavior = Behavior::Coin { phase, base };
            }
            Behavior::Fireball(kind) => {
                let next = self.pos + self.speed * time;
                match terrain.obstacle_at(next, self.size) {
                    Some(obstacle) => self.handle_obstacle(kind, obstacle),
                    None => self.pos = next,
                }
            }
        }
    }

    fn handle_obstacle(&mut self, kind: FireballKind, obstacle: Obstacle) {
        match kind {
            FireballKind::Horizontal | FireballKind::Vertical => {
                self.speed = self.speed * -1.0;
                log::debug!("Fireball bounced off {:?} at {}", obstacle, self.pos);
            }
            FireballKind::Rain { start } => {
                self.pos = start;
                log::debug!("Fire rain hit {:?}, back to {}", obstacle, start);
            }
        }
    }
}
