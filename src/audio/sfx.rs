use rodio::{Decoder, Source};
use std::io::Cursor;

use crate::error::AudioError;

/// Built-in cues are softened so they sit under the UI rather than on top.
pub const LOWPASS_HZ: u32 = 2000;
pub const BUILTIN_GAIN: f32 = 0.15;
pub const CUSTOM_GAIN: f32 = 0.2;
/// Playback speed varies by up to this fraction either way
pub const PITCH_JITTER: f32 = 0.02;

/// Random playback rate so repeated cues don't sound mechanical.
pub fn jittered_pitch<R: rand::Rng>(rng: &mut R) -> f32 {
    rng.gen_range((1.0 - PITCH_JITTER)..=(1.0 + PITCH_JITTER))
}

/// Decode a built-in cue from memory with the soft filter chain applied.
pub fn builtin(
    data: Vec<u8>,
    pitch: f32,
) -> Result<impl Source<Item = f32> + Send + 'static, AudioError> {
    let source = Decoder::new(Cursor::new(data))?;
    Ok(source
        .convert_samples::<f32>()
        .low_pass(LOWPASS_HZ)
        .amplify(BUILTIN_GAIN)
        .speed(pitch))
}

/// Decode a user-supplied file, only attenuated.
pub fn custom(data: Vec<u8>) -> Result<impl Source<Item = f32> + Send + 'static, AudioError> {
    let source = Decoder::new(Cursor::new(data))?;
    Ok(source.convert_samples::<f32>().amplify(CUSTOM_GAIN))
}
