//! Input boundary - keyboard bookkeeping and virtual-joystick math
//!
//! Both funnel into one `InputVector`. Everything here is platform-free;
//! the browser shell feeds in raw event data and the controller consumes
//! the results each frame.

use glam::Vec2;

use crate::sim::state::InputVector;

/// Pressed state of the movement keys
#[derive(Debug, Clone, Copy, Default)]
pub struct KeySet {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl KeySet {
    /// Apply a key event by DOM code. Unknown codes are ignored.
    pub fn set(&mut self, code: &str, pressed: bool) {
        match code {
            "ArrowUp" | "KeyW" => self.up = pressed,
            "ArrowDown" | "KeyS" => self.down = pressed,
            "ArrowLeft" | "KeyA" => self.left = pressed,
            "ArrowRight" | "KeyD" => self.right = pressed,
            _ => {}
        }
    }

    /// Per-axis contribution in {-1, 0, 1}; x is right, y is toward camera.
    pub fn axis(&self) -> Vec2 {
        let mut v = Vec2::ZERO;
        if self.up {
            v.y -= 1.0;
        }
        if self.down {
            v.y += 1.0;
        }
        if self.left {
            v.x -= 1.0;
        }
        if self.right {
            v.x += 1.0;
        }
        v
    }

    pub fn any_pressed(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// Maximum stick deflection in CSS pixels
pub const JOYSTICK_RADIUS: f32 = 50.0;

/// Virtual joystick: anchored where the pointer went down, producing a
/// normalized vector in [-1, 1] on each axis. Screen Y maps to world Z.
#[derive(Debug, Clone, Copy, Default)]
pub struct Joystick {
    active: bool,
    origin: Vec2,
    stick: Vec2,
}

impl Joystick {
    pub fn new() -> Self {
        Self::default()
    }

    /// Anchor the stick at the pointer-down position.
    pub fn press(&mut self, x: f32, y: f32) {
        self.active = true;
        self.origin = Vec2::new(x, y);
        self.stick = self.origin;
    }

    /// Track a pointer move; returns the fresh input vector.
    pub fn drag(&mut self, x: f32, y: f32) -> InputVector {
        if !self.active {
            return InputVector::ZERO;
        }
        let delta = Vec2::new(x, y) - self.origin;
        let dist = delta.length();
        let clamped = dist.min(JOYSTICK_RADIUS);
        let dir = if dist > 0.0 { delta / dist } else { Vec2::ZERO };
        self.stick = self.origin + dir * clamped;
        let scale = clamped / JOYSTICK_RADIUS;
        InputVector {
            x: dir.x * scale,
            z: dir.y * scale,
        }
    }

    /// Release the stick; the vector snaps back to zero.
    pub fn release(&mut self) -> InputVector {
        self.active = false;
        InputVector::ZERO
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Anchor position, for drawing the stick base.
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Clamped knob position, for drawing the stick itself.
    pub fn stick(&self) -> Vec2 {
        self.stick
    }

    /// Current vector without a new pointer sample.
    pub fn vector(&self) -> InputVector {
        if !self.active {
            return InputVector::ZERO;
        }
        let delta = self.stick - self.origin;
        InputVector {
            x: delta.x / JOYSTICK_RADIUS,
            z: delta.y / JOYSTICK_RADIUS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyset_axis_combines_keys() {
        let mut keys = KeySet::default();
        assert_eq!(keys.axis(), Vec2::ZERO);

        keys.set("KeyW", true);
        keys.set("ArrowRight", true);
        assert_eq!(keys.axis(), Vec2::new(1.0, -1.0));

        keys.set("KeyW", false);
        assert_eq!(keys.axis(), Vec2::new(1.0, 0.0));

        keys.set("F5", true);
        assert_eq!(keys.axis(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut keys = KeySet::default();
        keys.set("KeyA", true);
        keys.set("KeyD", true);
        assert_eq!(keys.axis(), Vec2::ZERO);
        assert!(keys.any_pressed());
    }

    #[test]
    fn joystick_clamps_to_unit_output() {
        let mut stick = Joystick::new();
        stick.press(100.0, 100.0);

        let v = stick.drag(100.0 + 25.0, 100.0);
        assert!((v.x - 0.5).abs() < 1e-6);
        assert_eq!(v.z, 0.0);

        // Dragged far past the radius, output saturates at 1
        let v = stick.drag(100.0 + 400.0, 100.0);
        assert!((v.x - 1.0).abs() < 1e-6);

        let v = stick.drag(100.0 + 300.0, 100.0 + 300.0);
        let mag = (v.x * v.x + v.z * v.z).sqrt();
        assert!((mag - 1.0).abs() < 1e-5);
        assert!(v.x.abs() <= 1.0 && v.z.abs() <= 1.0);
    }

    #[test]
    fn joystick_release_zeroes_vector() {
        let mut stick = Joystick::new();
        stick.press(0.0, 0.0);
        stick.drag(40.0, 0.0);
        assert!(stick.vector().is_active());

        assert_eq!(stick.release(), InputVector::ZERO);
        assert_eq!(stick.vector(), InputVector::ZERO);
        assert!(!stick.is_active());
    }

    #[test]
    fn drag_before_press_is_ignored() {
        let mut stick = Joystick::new();
        assert_eq!(stick.drag(50.0, 50.0), InputVector::ZERO);
    }
}
