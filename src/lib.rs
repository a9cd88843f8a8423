//! Dustbunny - a browser floor-cleaning game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (coverage surface, actor, spawning, store)
//! - `input`: Keyboard and virtual-joystick input math
//! - `narration`: Mission-brief service boundary with offline fallback
//! - `settings`: Player preferences
//! - `audio`: Procedural sound effects (wasm only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod input;
pub mod narration;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// World-space side length of the square arena
    pub const FLOOR_SIZE: f32 = 16.0;
    /// Side length of the coverage surface, in texels
    pub const TEXTURE_SIZE: usize = 512;
    /// Erase radius of the vacuum, in texels
    pub const CLEANING_RADIUS: f32 = 25.0;

    /// Actor speed in world units per second
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Margin keeping the actor off the arena edge
    pub const ACTOR_MARGIN: f32 = 0.5;
    /// Deadzone shared by the joystick override and facing flips
    pub const INPUT_DEADZONE: f32 = 0.1;

    /// Maximum carrots alive at once
    pub const MAX_CARROTS: usize = 15;
    /// Per-frame Bernoulli probability of a spawn while cleaning
    pub const CARROT_SPAWN_CHANCE: f32 = 0.02;
    /// Candidate spawn distance from the actor
    pub const SPAWN_DIST_MIN: f32 = 1.0;
    pub const SPAWN_DIST_MAX: f32 = 3.0;
    /// Margin keeping spawn candidates inside the arena
    pub const SPAWN_MARGIN: f32 = 1.0;
    /// Display height of a spawned carrot
    pub const CARROT_HEIGHT: f32 = 0.5;

    /// Pickup radius in world units (hot path compares the squared form)
    pub const PICKUP_RADIUS: f32 = 1.2;
    pub const PICKUP_RADIUS_SQ: f32 = PICKUP_RADIUS * PICKUP_RADIUS;

    /// Frames between coverage resamples
    pub const PROGRESS_INTERVAL: u64 = 30;
    /// Texel stride of the coverage estimate
    pub const SAMPLE_STRIDE: usize = 10;

    /// Actor rest height and bob animation parameters
    pub const ACTOR_BASE_HEIGHT: f32 = 0.6;
    pub const BOB_MOVE_FREQ: f32 = 15.0;
    pub const BOB_MOVE_AMP: f32 = 0.1;
    pub const BOB_IDLE_FREQ: f32 = 2.0;
    pub const BOB_IDLE_AMP: f32 = 0.05;
}

/// Half arena width minus a margin - the reachable bound on each axis
#[inline]
pub fn arena_bound(margin: f32) -> f32 {
    consts::FLOOR_SIZE / 2.0 - margin
}

/// Clamp a ground-plane position into the arena, component-wise
#[inline]
pub fn clamp_to_arena(pos: Vec2, margin: f32) -> Vec2 {
    let b = arena_bound(margin);
    Vec2::new(pos.x.clamp(-b, b), pos.y.clamp(-b, b))
}
