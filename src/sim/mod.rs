//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - No rendering or platform dependencies
//! - All mutation happens synchronously inside `tick`

pub mod actor;
pub mod progress;
pub mod spawner;
pub mod state;
pub mod surface;
pub mod tick;

pub use actor::{Actor, Facing, bob_height, control_vector, pickup_hits};
pub use progress::ProgressEstimator;
pub use spawner::CarrotSpawner;
pub use state::{Carrot, GameStore, InputVector};
pub use surface::{CoverageSurface, Texel};
pub use tick::{FrameInput, GameEvent, World, tick};
