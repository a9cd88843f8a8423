//! Actor controller - movement, facing and pickup checks
//!
//! Pure functions of explicit per-tick inputs: raw key states and the
//! joystick vector come in as parameters, so the controller has no hidden
//! coupling to the store and is testable in isolation.

use glam::Vec2;

use crate::clamp_to_arena;
use crate::consts::*;
use crate::input::KeySet;
use crate::sim::state::{Carrot, InputVector};

/// Horizontal facing for sprite mirroring (cosmetic only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    /// Mirror sign for the presentation layer (+1 right, -1 left)
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }
}

/// The player-controlled cleaner
#[derive(Debug, Clone)]
pub struct Actor {
    /// Ground-plane position (x, z)
    pub pos: Vec2,
    /// Display height including the bob animation
    pub height: f32,
    pub facing: Facing,
    /// Whether the actor moved this frame
    pub moving: bool,
}

impl Default for Actor {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            height: ACTOR_BASE_HEIGHT,
            facing: Facing::default(),
            moving: false,
        }
    }
}

impl Actor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one frame: resolve controls, move, clamp, face, bob.
    pub fn step(&mut self, dt: f32, elapsed: f32, keys: &KeySet, stick: InputVector) {
        let v = control_vector(keys, stick);
        self.moving = v.x.abs() > 0.01 || v.y.abs() > 0.01;
        if self.moving {
            self.pos = clamp_to_arena(self.pos + v * PLAYER_SPEED * dt, ACTOR_MARGIN);
            if v.x > INPUT_DEADZONE {
                self.facing = Facing::Right;
            } else if v.x < -INPUT_DEADZONE {
                self.facing = Facing::Left;
            }
        }
        self.height = bob_height(elapsed, self.moving);
    }
}

/// Resolve the frame's control vector.
///
/// An active joystick fully overrides the keyboard (not summed); keyboard
/// diagonals are clamped to unit length so they are no faster than a single
/// axis.
pub fn control_vector(keys: &KeySet, stick: InputVector) -> Vec2 {
    if stick.is_active() {
        return stick.to_vec2();
    }
    let v = keys.axis();
    if v.length_squared() > 1.0 { v.normalize() } else { v }
}

/// Bob height over the rest height: fast and tall while moving, a slow
/// breathe while idle. Deterministic in (elapsed, moving).
#[inline]
pub fn bob_height(elapsed: f32, moving: bool) -> f32 {
    if moving {
        (elapsed * BOB_MOVE_FREQ).sin() * BOB_MOVE_AMP + ACTOR_BASE_HEIGHT
    } else {
        (elapsed * BOB_IDLE_FREQ).sin() * BOB_IDLE_AMP + ACTOR_BASE_HEIGHT
    }
}

/// Ids of every carrot within pickup range of `pos`, in collection order.
///
/// Squared-distance test against the fixed pickup radius. Several carrots
/// can hit in the same frame; each id appears once because ids are unique
/// in the collection.
pub fn pickup_hits(pos: Vec2, carrots: &[Carrot]) -> Vec<String> {
    carrots
        .iter()
        .filter(|c| c.pos.distance_squared(pos) < PICKUP_RADIUS_SQ)
        .map(|c| c.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const STICK_RIGHT: InputVector = InputVector { x: 1.0, z: 0.0 };

    #[test]
    fn full_tilt_moves_then_clamps_at_bound() {
        let mut actor = Actor::new();
        let keys = KeySet::default();

        actor.step(1.0, 1.0, &keys, STICK_RIGHT);
        assert!((actor.pos.x - 5.0).abs() < 1e-5);
        assert_eq!(actor.pos.y, 0.0);

        actor.step(1.0, 2.0, &keys, STICK_RIGHT);
        assert!((actor.pos.x - 7.5).abs() < 1e-5);

        // Further rightward input stays pinned at the bound
        actor.step(1.0, 3.0, &keys, STICK_RIGHT);
        assert!((actor.pos.x - 7.5).abs() < 1e-5);
        assert_eq!(actor.pos.y, 0.0);
    }

    #[test]
    fn keyboard_diagonal_is_unit_clamped() {
        let mut actor = Actor::new();
        let mut keys = KeySet::default();
        keys.set("KeyW", true);
        keys.set("KeyD", true);

        actor.step(1.0, 1.0, &keys, InputVector::ZERO);
        let expected = 5.0 / 2.0_f32.sqrt();
        assert!((actor.pos.x - expected).abs() < 1e-4);
        assert!((actor.pos.y + expected).abs() < 1e-4);
    }

    #[test]
    fn joystick_overrides_keyboard() {
        let mut keys = KeySet::default();
        keys.set("KeyA", true);
        let v = control_vector(&keys, STICK_RIGHT);
        assert_eq!(v, Vec2::new(1.0, 0.0));

        // Below the deadzone the stick is ignored
        let v = control_vector(&keys, InputVector { x: 0.05, z: 0.0 });
        assert_eq!(v, Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn facing_flips_outside_deadzone() {
        let mut actor = Actor::new();
        let keys = KeySet::default();
        assert_eq!(actor.facing, Facing::Right);

        actor.step(0.1, 0.1, &keys, InputVector { x: -0.8, z: 0.0 });
        assert_eq!(actor.facing, Facing::Left);

        // Mostly-vertical motion keeps the previous facing
        actor.step(0.1, 0.2, &keys, InputVector { x: 0.05, z: 0.9 });
        assert_eq!(actor.facing, Facing::Left);

        actor.step(0.1, 0.3, &keys, InputVector { x: 0.8, z: 0.0 });
        assert_eq!(actor.facing, Facing::Right);
        assert_eq!(actor.facing.sign(), 1.0);
    }

    #[test]
    fn bob_is_deterministic_and_mode_dependent() {
        assert_eq!(bob_height(1.3, true), bob_height(1.3, true));
        assert_eq!(bob_height(1.3, false), bob_height(1.3, false));

        // Idle bob stays within its smaller envelope
        for i in 0..100 {
            let t = i as f32 * 0.173;
            let idle = bob_height(t, false);
            assert!((idle - ACTOR_BASE_HEIGHT).abs() <= BOB_IDLE_AMP + 1e-6);
            let moving = bob_height(t, true);
            assert!((moving - ACTOR_BASE_HEIGHT).abs() <= BOB_MOVE_AMP + 1e-6);
        }
    }

    #[test]
    fn idle_frame_keeps_position() {
        let mut actor = Actor::new();
        actor.step(1.0, 1.0, &KeySet::default(), InputVector::ZERO);
        assert_eq!(actor.pos, Vec2::ZERO);
        assert!(!actor.moving);
    }

    #[test]
    fn pickup_hits_every_carrot_in_range() {
        let carrots = vec![
            Carrot {
                id: "near".into(),
                pos: Vec2::new(0.5, 0.5),
            },
            Carrot {
                id: "edge".into(),
                pos: Vec2::new(1.0, 0.5),
            },
            Carrot {
                id: "far".into(),
                pos: Vec2::new(3.0, 3.0),
            },
        ];
        let hits = pickup_hits(Vec2::ZERO, &carrots);
        assert_eq!(hits, ["near", "edge"]);
    }
}
