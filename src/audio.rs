//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!
//!
//! Sound is enhancement, not critical path: every node constructor and
//! scheduling call degrades to silence if the context is unavailable.

use web_sys::{
    AudioBufferSourceNode, AudioContext, BiquadFilterType, GainNode, OscillatorNode,
    OscillatorType,
};

/// The in-flight spin sound, retained so it can be faded out early.
/// At most one exists at a time; `play_spin` stops the previous one first.
struct SpinSound {
    source: AudioBufferSourceNode,
    gain: GainNode,
}

/// Audio manager for the widget
pub struct AudioManager {
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    spin_sound: Option<SpinSound>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            spin_sound: None,
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

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    fn ready_ctx(&self) -> Option<&AudioContext> {
        let ctx = self.ctx.as_ref()?;
        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        Some(ctx)
    }

    /// Start the looping filtered-noise whoosh for a spin of `duration_ms`.
    ///
    /// Stops any previous spin sound first, so overlapping triggers can never
    /// stack instances.
    pub fn play_spin(&mut self, duration_ms: f64) {
        self.stop_spin();

        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = self.ready_ctx() else { return };

        // Two seconds of looped white noise is indistinguishable from an
        // endless stream at this gain
        let sample_rate = ctx.sample_rate();
        let Ok(buffer) = ctx.create_buffer(1, (sample_rate * 2.0) as u32, sample_rate) else {
            return;
        };
        let mut noise: Vec<f32> = (0..(sample_rate * 2.0) as usize)
            .map(|_| (js_sys::Math::random() as f32 * 2.0 - 1.0) * 0.5)
            .collect();
        if buffer.copy_to_channel(&mut noise, 0).is_err() {
            return;
        }

        let Ok(source) = ctx.create_buffer_source() else { return };
        source.set_buffer(Some(&buffer));
        source.set_loop(true);

        let Ok(filter) = ctx.create_biquad_filter() else { return };
        filter.set_type(BiquadFilterType::Bandpass);
        filter.frequency().set_value(450.0);
        filter.q().set_value(0.9);

        let Ok(gain) = ctx.create_gain() else { return };
        gain.gain().set_value(0.0001);

        if source.connect_with_audio_node(&filter).is_err()
            || filter.connect_with_audio_node(&gain).is_err()
            || gain.connect_with_audio_node(&ctx.destination()).is_err()
        {
            return;
        }

        let t = ctx.current_time();
        let duration = duration_ms / 1000.0;
        gain.gain()
            .exponential_ramp_to_value_at_time(vol * 0.08, t + 0.15)
            .ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(vol * 0.03, t + duration)
            .ok();

        source.start().ok();
        source.stop_with_when(t + duration + 0.35).ok();

        self.spin_sound = Some(SpinSound { source, gain });
    }

    /// Fade out and halt the spin sound, if one is playing
    pub fn stop_spin(&mut self) {
        let Some(SpinSound { source, gain }) = self.spin_sound.take() else {
            return;
        };
        let Some(ctx) = self.ctx.as_ref() else { return };

        let t = ctx.current_time();
        gain.gain().cancel_scheduled_values(t).ok();
        gain.gain().set_target_at_time(0.0001, t, 0.08).ok();
        source.stop_with_when(t + 0.22).ok();
    }

    /// Four-note ascending chime for a settled spin (C5 E5 G5 C6)
    pub fn play_win(&self) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = self.ready_ctx() else { return };

        let notes = [523.25, 659.25, 783.99, 1046.5];
        for (i, freq) in notes.iter().enumerate() {
            let osc_type = if i % 2 == 0 {
                OscillatorType::Triangle
            } else {
                OscillatorType::Sine
            };
            let Some((osc, gain)) = create_osc(ctx, *freq, osc_type) else {
                continue;
            };

            let start = ctx.current_time() + i as f64 * 0.08;
            gain.gain().set_value_at_time(0.0001, start).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(vol * 0.16, start + 0.03)
                .ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.0001, start + 0.32)
                .ok();

            osc.start_with_when(start).ok();
            osc.stop_with_when(start + 0.36).ok();
        }
    }
}

/// Create an oscillator wired through a fresh gain node to the destination
fn create_osc(
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
