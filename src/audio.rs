//! Procedurally generated sound effects - no external files needed
//!
//! Fire-and-forget: the shell calls `play` on discrete game events and never
//! waits. If no output device is available the manager degrades to silence.

use fundsp::prelude32 as dsp;
use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink};

const SAMPLE_RATE: u32 = 44_100;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Power-up collected
    PowerUpCollect,
    /// Coin or star collected
    BonusCollect,
    /// Obstacle hit absorbed by the shield
    ShieldBlock,
    /// Plane entered a wind zone
    WindGust,
    /// Run ended
    Crash,
    /// Menu navigation blip
    MenuSelect,
}

/// Audio manager for the game
pub struct AudioManager {
    // The stream must outlive every sink playing into it
    _stream: Option<OutputStream>,
    handle: Option<OutputStreamHandle>,
    volume: f32,
}

impl AudioManager {
    /// Open the default output device; absence of one is not an error
    pub fn new(volume: f32) -> Self {
        match OutputStream::try_default() {
            Ok((stream, handle)) => Self {
                _stream: Some(stream),
                handle: Some(handle),
                volume,
            },
            Err(err) => {
                log::warn!("no audio output device ({err}); sound disabled");
                Self {
                    _stream: None,
                    handle: None,
                    volume,
                }
            }
        }
    }

    /// Set playback volume (0.0 - 1.0)
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        if self.volume <= 0.0 {
            return;
        }
        let Some(handle) = &self.handle else { return };

        let samples = match effect {
            SoundEffect::PowerUpCollect => power_up_samples(),
            SoundEffect::BonusCollect => bonus_samples(),
            SoundEffect::ShieldBlock => shield_block_samples(),
            SoundEffect::WindGust => gust_samples(),
            SoundEffect::Crash => crash_samples(),
            SoundEffect::MenuSelect => blip_samples(),
        };

        if let Ok(sink) = Sink::try_new(handle) {
            sink.set_volume(self.volume);
            sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples));
            sink.detach();
        }
    }
}

// --- Synthesis ---------------------------------------------------------------

/// Rising sine chirp
fn power_up_samples() -> Vec<f32> {
    let duration = 0.25;
    let mut node = (dsp::lfo(move |t: f32| dsp::xerp(300.0, 900.0, (t / duration).min(1.0)))
        >> dsp::sine())
        * dsp::lfo(move |t: f32| dsp::xerp(0.2, 0.001, (t / duration).min(1.0)));
    render_mono(&mut node, duration)
}

/// Two quick ascending notes
fn bonus_samples() -> Vec<f32> {
    const NOTES: [f32; 2] = [520.0, 780.0];
    let note_gap = 0.09f32;
    let note_len = 0.12f32;
    let total = note_gap * (NOTES.len() as f32 - 1.0) + note_len;
    let mut samples = vec![0.0f32; (SAMPLE_RATE as f32 * total) as usize];

    for (idx, freq) in NOTES.iter().enumerate() {
        let start = (note_gap * idx as f32 * SAMPLE_RATE as f32) as usize;
        let mut node = dsp::sine_hz(*freq)
            * dsp::lfo(move |t: f32| dsp::xerp(0.15, 0.001, (t / note_len).min(1.0)));
        for (i, s) in render_mono(&mut node, note_len).into_iter().enumerate() {
            if let Some(slot) = samples.get_mut(start + i) {
                *slot += s;
            }
        }
    }
    samples
}

/// Low metallic thunk
fn shield_block_samples() -> Vec<f32> {
    let duration = 0.18;
    let mut node = (dsp::lfo(move |t: f32| dsp::lerp(220.0, 140.0, (t / duration).min(1.0)))
        >> dsp::saw())
        * dsp::lfo(move |t: f32| dsp::xerp(0.25, 0.001, (t / duration).min(1.0)));
    render_mono(&mut node, duration)
}

/// Band-passed noise whoosh
fn gust_samples() -> Vec<f32> {
    let duration = 0.20;
    let mut node = (dsp::noise() >> dsp::bandpass_hz(900.0, 0.6) >> dsp::mul(0.5))
        * dsp::lfo(move |t: f32| dsp::xerp(0.3, 0.001, (t / duration).min(1.0)));
    render_mono(&mut node, duration)
}

/// Falling saw sweep
fn crash_samples() -> Vec<f32> {
    let duration = 0.5;
    let mut node = (dsp::lfo(move |t: f32| dsp::lerp(400.0, 70.0, (t / 0.4).min(1.0)))
        >> dsp::saw())
        * dsp::lfo(move |t: f32| dsp::lerp(0.2, 0.0, (t / duration).min(1.0)));
    render_mono(&mut node, duration)
}

/// Short sine blip
fn blip_samples() -> Vec<f32> {
    let duration = 0.08;
    let mut node = dsp::sine_hz(660.0)
        * dsp::lfo(move |t: f32| dsp::xerp(0.15, 0.001, (t / duration).min(1.0)));
    render_mono(&mut node, duration)
}

fn render_mono(node: &mut dyn dsp::AudioUnit, duration: f32) -> Vec<f32> {
    node.set_sample_rate(SAMPLE_RATE as f64);
    node.reset();

    let count = (SAMPLE_RATE as f32 * duration) as usize;
    let mut samples = Vec::with_capacity(count);
    for _ in 0..count {
        samples.push(node.get_mono());
    }
    samples
}
