//! Level state: terrain grid, live actors and the win/loss outcome
//!
//! Actors live in an arena of slots indexed by [`ActorId`]. Removing an actor
//! frees its slot and never shifts the others, so ids stay stable and
//! iteration order stays insertion order.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorKind};
use super::geometry::{Rect, Vector};
use crate::LevelError;
use crate::consts::FINISH_DELAY;

/// One terrain grid unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Wall,
    Lava,
}

impl Cell {
    /// The obstacle this cell presents, if any
    pub fn obstacle(self) -> Option<Obstacle> {
        match self {
            Cell::Empty => None,
            Cell::Wall => Some(Obstacle::Wall),
            Cell::Lava => Some(Obstacle::Lava),
        }
    }
}

/// What an obstacle query ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Obstacle {
    Wall,
    Lava,
}

/// Static terrain grid, rows top to bottom
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Terrain {
    grid: Vec<Vec<Cell>>,
    width: usize,
    height: usize,
}

impl Terrain {
    /// Build from rows of cells. Short rows are padded with empty cells up to
    /// the longest row.
    pub fn new(mut grid: Vec<Vec<Cell>>) -> Self {
        let height = grid.len();
        let width = grid.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut grid {
            row.resize(width, Cell::Empty);
        }
        Self {
            grid,
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at column `x`, row `y`. Outside the grid is empty.
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.grid
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or_default()
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.grid
    }

    /// First obstacle a box at `pos` with `size` would run into
    ///
    /// Leaving through the left, top or right side hits a wall. Leaving
    /// through the bottom is lava. Inside the level, wall and lava cells are
    /// scanned in row-major order and the first overlapping one wins.
    pub fn obstacle_at(&self, pos: Vector, size: Vector) -> Option<Obstacle> {
        let probe = Rect::from_pos_size(pos, size);

        if probe.left < 0.0 || probe.top < 0.0 || probe.right > self.width as f64 {
            return Some(Obstacle::Wall);
        }
        if probe.bottom > self.height as f64 {
            return Some(Obstacle::Lava);
        }

        for (y, row) in self.grid.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if let Some(obstacle) = cell.obstacle() {
                    if probe.overlaps(&Rect::cell(x, y)) {
                        return Some(obstacle);
                    }
                }
            }
        }

        None
    }
}

/// Stable handle to an actor slot in a [`Level`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(pub usize);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Level outcome. A running level has no status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Won,
    Lost,
}

/// Something the player ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Touch {
    Obstacle(Obstacle),
    Actor(ActorKind),
}

impl From<Obstacle> for Touch {
    fn from(obstacle: Obstacle) -> Self {
        Touch::Obstacle(obstacle)
    }
}

impl From<ActorKind> for Touch {
    fn from(kind: ActorKind) -> Self {
        Touch::Actor(kind)
    }
}

/// A playable level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    terrain: Terrain,
    /// Actor arena; `None` marks a removed actor
    actors: Vec<Option<Actor>>,
    player: Option<ActorId>,
    status: Option<Status>,
    /// Counted down by the run loop once the level has a status
    pub finish_delay: f64,
}

impl Level {
    /// Create a level from terrain and its initial actors, in play order
    ///
    /// The first player actor becomes the level's player. Any later player
    /// stays in the level as an ordinary actor.
    pub fn new(terrain: Terrain, actors: Vec<Actor>) -> Result<Self, LevelError> {
        let mut player = None;
        for (index, actor) in actors.iter().enumerate() {
            match actor.kind() {
                ActorKind::Probe => return Err(LevelError::ProbeInLevel(index)),
                ActorKind::Player => match player {
                    Some(first) => {
                        log::warn!("Extra player #{} ignored, {} is the player", index, first);
                    }
                    None => player = Some(ActorId(index)),
                },
                _ => {}
            }
        }

        log::info!(
            "Level {}x{} with {} actors",
            terrain.width(),
            terrain.height(),
            actors.len()
        );

        Ok(Self {
            terrain,
            actors: actors.into_iter().map(Some).collect(),
            player,
            status: None,
            finish_delay: FINISH_DELAY,
        })
    }

    /// Override the outcome delay
    pub fn with_finish_delay(mut self, finish_delay: f64) -> Self {
        self.finish_delay = finish_delay;
        self
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.terrain.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.terrain.height()
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    pub fn status(&self) -> Option<Status> {
        self.status
    }

    /// The designated player, if the level has one still live
    pub fn player(&self) -> Option<ActorId> {
        self.player
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(id.0).and_then(Option::as_ref)
    }

    /// Mutable access for the run loop (player input moves the player here)
    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Live actors in insertion order
    pub fn actors(&self) -> impl Iterator<Item = (ActorId, &Actor)> {
        self.actors
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|a| (ActorId(i), a)))
    }

    /// True once the outcome is decided and the finish delay has run out
    pub fn is_finished(&self) -> bool {
        self.status.is_some() && self.finish_delay < 0.0
    }

    /// First live actor, in insertion order, that intersects `actor`
    ///
    /// `actor` may be one of ours (it is skipped by identity) or any box from
    /// outside the level.
    pub fn actor_at(&self, actor: &Actor) -> Option<ActorId> {
        self.actors().find(|(_, other)| actor.is_intersect(other)).map(|(id, _)| id)
    }

    /// First live actor touching the actor with the given id
    pub fn actor_touching(&self, id: ActorId) -> Result<Option<ActorId>, LevelError> {
        let actor = self.actor(id).ok_or(LevelError::UnknownActor(id))?;
        Ok(self.actor_at(actor))
    }

    /// See [`Terrain::obstacle_at`]
    pub fn obstacle_at(&self, pos: Vector, size: Vector) -> Option<Obstacle> {
        self.terrain.obstacle_at(pos, size)
    }

    /// With no kind, true when no actors are left. With a kind, true when no
    /// live actor has that kind.
    pub fn no_more_actors(&self, kind: Option<ActorKind>) -> bool {
        match kind {
            None => self.actors().next().is_none(),
            Some(kind) => !self.actors().any(|(_, a)| a.kind() == kind),
        }
    }

    /// Take an actor out of the level, freeing its slot
    pub fn remove_actor(&mut self, id: ActorId) -> Option<Actor> {
        let removed = self.actors.get_mut(id.0).and_then(Option::take);
        if removed.is_some() && self.player == Some(id) {
            self.player = None;
        }
        removed
    }

    /// React to the player running into something
    ///
    /// Lava and fireballs lose the level. A coin is removed, and collecting
    /// the last coin wins. Once the level has a status nothing changes.
    pub fn player_touched(&mut self, touch: Touch, actor: Option<ActorId>) {
        if let Some(status) = self.status {
            log::debug!("Ignoring {:?}, level already {:?}", touch, status);
            return;
        }

        match touch {
            Touch::Obstacle(Obstacle::Lava) | Touch::Actor(ActorKind::Fireball) => {
                self.status = Some(Status::Lost);
                log::info!("Level lost ({:?})", touch);
                return;
            }
            Touch::Actor(ActorKind::Coin) => {
                if let Some(id) = actor {
                    if self.remove_actor(id).is_some() {
                        log::debug!("Coin {} collected", id);
                    }
                }
            }
            _ => {}
        }

        if self.no_more_actors(Some(ActorKind::Coin)) {
            self.status = Some(Status::Won);
            log::info!("Level won");
        }
    }

    /// Move every live actor by `time`, in insertion order
    ///
    /// Each actor sees the moves made before it in the same pass.
    pub fn act_all(&mut self, time: f64) {
        let terrain = &self.terrain;
        for actor in self.actors.iter_mut().flatten() {
            actor.act(time, terrain);
        }
    }
}
