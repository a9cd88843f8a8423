//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Carrot picked up
    Pickup,
    /// Progress milestone reached
    Milestone,
    /// Floor fully cleaned
    Victory,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    master_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.8,
            muted: false,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Pickup => self.play_pickup(ctx, vol),
            SoundEffect::Milestone => self.play_milestone(ctx, vol),
            SoundEffect::Victory => self.play_victory(ctx, vol),
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Pickup - bright two-step chirp
    fn play_pickup(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 880.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.25, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.15)
            .ok();
        osc.frequency().set_value_at_time(880.0, t).ok();
        osc.frequency().set_value_at_time(1318.5, t + 0.07).ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.18).ok();
    }

    /// Milestone - rising sting
    fn play_milestone(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 440.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.4, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.35)
            .ok();
        osc.frequency().set_value_at_time(440.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(880.0, t + 0.3)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.4).ok();
    }

    /// Victory - little three-note fanfare
    fn play_victory(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        for (i, freq) in [523.25, 659.25, 783.99].into_iter().enumerate() {
            let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Sine) else {
                return;
            };
            let start = t + i as f64 * 0.18;

            gain.gain().set_value_at_time(0.0001, start).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(vol * 0.5, start + 0.02)
                .ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, start + 0.5)
                .ok();

            osc.start_with_when(start).ok();
            osc.stop_with_when(start + 0.55).ok();
        }
    }
}
