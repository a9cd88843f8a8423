//! Shared game state and its mutation entry points
//!
//! Everything the presentation layer observes lives here. All writes go
//! through named methods and fields stay private, so the single-writer-
//! per-field contract is enforced by the API instead of by convention.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::INPUT_DEADZONE;

/// Combined per-frame control signal, each axis in [-1, 1].
///
/// Last writer wins between the keyboard derivation and the joystick widget.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InputVector {
    pub x: f32,
    pub z: f32,
}

impl InputVector {
    pub const ZERO: Self = Self { x: 0.0, z: 0.0 };

    /// True when either axis clears the deadzone.
    #[inline]
    pub fn is_active(self) -> bool {
        self.x.abs() > INPUT_DEADZONE || self.z.abs() > INPUT_DEADZONE
    }

    /// Ground-plane vector (x maps to world X, z to world Z).
    #[inline]
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.z)
    }
}

/// A spawned carrot waiting to be collected
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Carrot {
    /// Unique id, stable for the carrot's lifetime
    pub id: String,
    /// Ground-plane position (x, z); rendered at `consts::CARROT_HEIGHT`
    pub pos: Vec2,
}

/// Shared game state observed by every component and by presentation
#[derive(Debug, Clone, Default)]
pub struct GameStore {
    cleaned_percentage: u8,
    is_vacuuming: bool,
    muted: bool,
    carrots: Vec<Carrot>,
    carrots_collected: u32,
    input_vector: InputVector,
}

impl GameStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a fresh coverage percentage, clamped to 100.
    pub fn set_cleaned_percentage(&mut self, percent: u8) {
        self.cleaned_percentage = percent.min(100);
    }

    pub fn set_is_vacuuming(&mut self, vacuuming: bool) {
        self.is_vacuuming = vacuuming;
    }

    pub fn toggle_muted(&mut self) {
        self.muted = !self.muted;
    }

    /// Append a spawned carrot. Ids are spawner-generated and unique.
    pub fn add_carrot(&mut self, carrot: Carrot) {
        self.carrots.push(carrot);
    }

    /// Remove a carrot by id and count the pickup.
    ///
    /// Idempotent: an absent id is a no-op and leaves the counter alone,
    /// which guards against the same pickup being processed twice.
    pub fn remove_carrot(&mut self, id: &str) -> bool {
        let Some(idx) = self.carrots.iter().position(|c| c.id == id) else {
            return false;
        };
        self.carrots.remove(idx);
        self.carrots_collected += 1;
        true
    }

    pub fn set_input_vector(&mut self, vector: InputVector) {
        self.input_vector = vector;
    }

    // === Read accessors ===

    pub fn cleaned_percentage(&self) -> u8 {
        self.cleaned_percentage
    }

    pub fn is_vacuuming(&self) -> bool {
        self.is_vacuuming
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Live carrots in insertion order.
    pub fn carrots(&self) -> &[Carrot] {
        &self.carrots
    }

    pub fn carrots_collected(&self) -> u32 {
        self.carrots_collected
    }

    pub fn input_vector(&self) -> InputVector {
        self.input_vector
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carrot(id: &str) -> Carrot {
        Carrot {
            id: id.to_string(),
            pos: Vec2::new(1.0, 2.0),
        }
    }

    #[test]
    fn add_then_remove_counts_once() {
        let mut store = GameStore::new();
        assert_eq!(store.cleaned_percentage(), 0);
        assert!(store.carrots().is_empty());
        assert_eq!(store.carrots_collected(), 0);

        store.add_carrot(carrot("a"));
        assert!(store.remove_carrot("a"));
        assert!(store.carrots().is_empty());
        assert_eq!(store.carrots_collected(), 1);
    }

    #[test]
    fn removal_is_idempotent() {
        let mut store = GameStore::new();
        store.add_carrot(carrot("a"));
        assert!(store.remove_carrot("a"));
        assert!(!store.remove_carrot("a"));
        assert!(!store.remove_carrot("never-existed"));
        assert_eq!(store.carrots_collected(), 1);
    }

    #[test]
    fn removal_preserves_insertion_order() {
        let mut store = GameStore::new();
        store.add_carrot(carrot("a"));
        store.add_carrot(carrot("b"));
        store.add_carrot(carrot("c"));
        store.remove_carrot("b");
        let ids: Vec<&str> = store.carrots().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
    }

    #[test]
    fn percentage_is_clamped() {
        let mut store = GameStore::new();
        store.set_cleaned_percentage(250);
        assert_eq!(store.cleaned_percentage(), 100);
    }

    #[test]
    fn input_vector_deadzone() {
        assert!(!InputVector { x: 0.05, z: 0.0 }.is_active());
        assert!(InputVector { x: 0.2, z: 0.0 }.is_active());
        assert!(InputVector { x: 0.0, z: -0.5 }.is_active());
    }
}
