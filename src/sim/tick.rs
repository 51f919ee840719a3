//! One simulation frame
//!
//! The host decides how much real time passed and how often to call in.
//! This module only applies that time to a level.

use super::actor::Actor;
use super::level::{Level, Obstacle};
use crate::consts::MAX_SUBSTEPS;

/// Advance the level by `dt` seconds
///
/// Every actor acts in insertion order. While the level is running, the
/// player is checked against lava terrain first, then against the other
/// actors.
///
/// The finish delay belongs to the run loop: a loop that drives the level
/// through its own queries decrements [`Level::finish_delay`] itself. Calling
/// `tick` hands that job over, and a decided level's delay drops by `dt`
/// each call.
pub fn tick(level: &mut Level, dt: f64) {
    if level.status().is_some() {
        level.finish_delay -= dt;
    }

    level.act_all(dt);

    if level.status().is_some() {
        return;
    }

    let Some(player) = level.player() else {
        return;
    };
    let Some((pos, size)) = level.actor(player).map(|p| (p.pos, p.size)) else {
        return;
    };

    if level.obstacle_at(pos, size) == Some(Obstacle::Lava) {
        level.player_touched(Obstacle::Lava.into(), None);
        return;
    }

    match level.actor_touching(player) {
        Ok(Some(other)) => {
            if let Some(kind) = level.actor(other).map(Actor::kind) {
                level.player_touched(kind.into(), Some(other));
            }
        }
        Ok(None) => {}
        Err(err) => log::warn!("Player collision skipped: {}", err),
    }
}

/// Advance by `elapsed` seconds in sub-steps no longer than `max_step`
///
/// At most [`MAX_SUBSTEPS`] sub-steps run; time beyond that is dropped.
/// Returns the number of sub-steps taken.
pub fn advance(level: &mut Level, elapsed: f64, max_step: f64) -> u32 {
    let mut remaining = elapsed;
    let mut steps = 0;

    while remaining > 0.0 && steps < MAX_SUBSTEPS {
        let dt = if max_step > 0.0 {
            remaining.min(max_step)
        } else {
            remaining
        };
        tick(level, dt);
        remaining -= dt;
        steps += 1;
    }

    if remaining > 0.0 {
        log::debug!("Dropped {:.3}s of simulation time", remaining);
    }

    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{DEFAULT_TIME_STEP, FINISH_DELAY, MAX_STEP};
    use crate::sim::{ActorId, LevelParser, Status, SymbolTable, Vector};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn parse(plan: &[&str]) -> Level {
        LevelParser::new(SymbolTable::standard())
            .parse_seeded(plan, 1234)
            .expect("valid plan")
    }

    #[test]
    fn test_tick_moves_actors() {
        init_logger();
        let mut level = parse(&["      ", "  =   ", "xxxxxx"]);
        tick(&mut level, 0.5);
        assert_eq!(level.actor(ActorId(0)).map(|a| a.pos), Some(Vector::new(3.0, 1.0)));
        assert_eq!(level.status(), None);
    }

    #[test]
    fn test_default_time_step() {
        let mut level = parse(&["      ", "=     ", "xxxxxx"]);
        tick(&mut level, DEFAULT_TIME_STEP);
        assert_eq!(level.actor(ActorId(0)).map(|a| a.pos), Some(Vector::new(2.0, 1.0)));
    }

    #[test]
    fn test_player_in_lava_loses() {
        init_logger();
        let mut level = parse(&["      ", " @  o ", "xx!!xx"]);
        let player = level.player().expect("player");
        tick(&mut level, 0.1);
        assert_eq!(level.status(), None);

        // Drop the player into the lava pit
        level.actor_mut(player).expect("player").pos = Vector::new(2.5, 1.0);
        tick(&mut level, 0.1);
        assert_eq!(level.status(), Some(Status::Lost));
    }

    #[test]
    fn test_fireball_hits_player() {
        init_logger();
        let mut level = parse(&["      ", "@  =  ", "xxxxxx"]);
        // The fireball bounces off the right wall and comes back
        for _ in 0..200 {
            tick(&mut level, 0.05);
            if level.status().is_some() {
                break;
            }
        }
        assert_eq!(level.status(), Some(Status::Lost));
    }

    #[test]
    fn test_coin_pickup_wins() {
        init_logger();
        let mut level = parse(&["      ", "@o    ", "xxxxxx"]);
        let player = level.player().expect("player");
        level.actor_mut(player).expect("player").pos = Vector::new(1.0, 0.0);

        tick(&mut level, 0.01);
        assert_eq!(level.status(), Some(Status::Won));
        assert!(level.actor(ActorId(1)).is_none());
    }

    #[test]
    fn test_finish_delay_counts_down_after_outcome() {
        init_logger();
        let mut level = parse(&["      ", "@     ", "xxxxxx"]);
        // No coins: the first touch of anything wins
        level.player_touched(Obstacle::Wall.into(), None);
        assert_eq!(level.status(), Some(Status::Won));

        let mut frames = 0;
        while !level.is_finished() {
            advance(&mut level, 0.25, 0.125);
            frames += 1;
            assert!(frames < 100, "level never finished");
        }
        assert!(level.finish_delay < 0.0);
        // The delay has to go below zero, so reaching exactly zero takes one more frame
        assert_eq!(frames, (FINISH_DELAY / 0.25) as i32 + 1);
    }

    #[test]
    fn test_advance_substeps() {
        let mut level = parse(&["      ", "  =   ", "xxxxxx"]);
        assert_eq!(advance(&mut level, 0.25, 0.125), 2);
        assert_eq!(advance(&mut level, 0.0, 0.05), 0);
        assert_eq!(advance(&mut level, 10.0, 0.05), MAX_SUBSTEPS);
        assert_eq!(advance(&mut level, 0.3, 0.0), 1);
    }

    #[test]
    fn test_same_seed_same_frames() {
        let plan = ["   o  ", " = o *", "  o   ", "xxxxxx"];
        let mut a = parse(&plan);
        let mut b = parse(&plan);
        for _ in 0..30 {
            advance(&mut a, 1.0 / 60.0, MAX_STEP);
            advance(&mut b, 1.0 / 60.0, MAX_STEP);
        }
        let a_pos: Vec<Vector> = a.actors().map(|(_, x)| x.pos).collect();
        let b_pos: Vec<Vector> = b.actors().map(|(_, x)| x.pos).collect();
        assert_eq!(a_pos, b_pos);
    }
}
