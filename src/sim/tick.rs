//! Per-frame orchestration
//!
//! One `tick` per rendered frame, variable delta. The order within a frame
//! is fixed: input resolution → movement → erase → spawn roll → pickups →
//! (every 30th frame) progress resample, so spawn probes and the resample
//! always see the current frame's erase result.

use crate::consts::*;
use crate::input::KeySet;
use crate::narration::MilestoneTracker;
use crate::sim::actor::{self, Actor};
use crate::sim::progress::ProgressEstimator;
use crate::sim::spawner::CarrotSpawner;
use crate::sim::state::{GameStore, InputVector};
use crate::sim::surface::CoverageSurface;

/// Raw inputs for a single frame (deterministic)
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Current movement key states
    pub keys: KeySet,
    /// Virtual-joystick vector, zero while released
    pub stick: InputVector,
}

/// Observable things that happened during a tick, for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A carrot appeared on cleaned ground
    CarrotSpawned { id: String },
    /// The actor picked up a carrot
    CarrotCollected { id: String },
    /// The published coverage percentage changed
    ProgressChanged { percent: u8 },
    /// A 25%-multiple threshold was crossed; fetch a fresh mission brief
    NarrationMilestone { percent: u8 },
    /// Coverage reached 100 - the run is over
    MissionComplete,
}

/// Everything the simulation owns.
///
/// One logical writer per field: the controller writes the actor, the erase
/// path writes the surface, the estimator writes the percentage, and the
/// spawner/pickup steps write the carrot collection - all synchronously
/// inside `tick`, so readers always see a settled frame.
pub struct World {
    pub store: GameStore,
    pub surface: CoverageSurface,
    pub actor: Actor,
    spawner: CarrotSpawner,
    progress: ProgressEstimator,
    milestones: MilestoneTracker,
    frame: u64,
    elapsed: f32,
}

impl World {
    /// Build a fresh world from a run seed.
    pub fn new(seed: u64) -> Self {
        log::info!("world created (seed {seed})");
        Self {
            store: GameStore::new(),
            surface: CoverageSurface::new(seed),
            actor: Actor::new(),
            spawner: CarrotSpawner::new(seed.wrapping_add(1)),
            progress: ProgressEstimator::new(),
            milestones: MilestoneTracker::new(),
            frame: 0,
            elapsed: 0.0,
        }
    }

    /// Frames ticked so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Seconds of simulated time.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

/// Advance the world by one frame.
pub fn tick(world: &mut World, input: &FrameInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    world.frame += 1;
    world.elapsed += dt;

    // Input resolution - the stick vector is the store's per-frame signal
    world.store.set_input_vector(input.stick);

    // Movement
    world.actor.step(dt, world.elapsed, &input.keys, input.stick);

    // Cleaning and the spawn roll, both skipped outside the arena
    match world.surface.world_to_texel(world.actor.pos) {
        Some(texel) => {
            world.surface.erase(texel, CLEANING_RADIUS);
            world.store.set_is_vacuuming(true);

            if let Some(carrot) = world.spawner.maybe_spawn(
                world.actor.pos,
                &world.surface,
                world.store.carrots().len(),
            ) {
                events.push(GameEvent::CarrotSpawned {
                    id: carrot.id.clone(),
                });
                world.store.add_carrot(carrot);
            }
        }
        None => world.store.set_is_vacuuming(false),
    }

    // Pickups - every hit this frame, each id resolved once
    for id in actor::pickup_hits(world.actor.pos, world.store.carrots()) {
        if world.store.remove_carrot(&id) {
            events.push(GameEvent::CarrotCollected { id });
        }
    }

    // Periodic coverage resample
    let before = world.store.cleaned_percentage();
    if let Some(percent) = world
        .progress
        .tick(world.frame, &world.surface, &mut world.store)
    {
        events.push(GameEvent::ProgressChanged { percent });
        if let Some(milestone) = world.milestones.crossed(percent) {
            log::debug!("milestone {milestone}% reached");
            events.push(GameEvent::NarrationMilestone { percent: milestone });
        }
        if percent == 100 && before < 100 {
            log::info!("floor fully cleaned after {} frames", world.frame);
            events.push(GameEvent::MissionComplete);
        }
    }

    events
}
