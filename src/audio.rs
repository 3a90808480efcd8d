use macroquad::audio::{self, PlaySoundParams, Sound, load_sound_from_bytes};
use macroquad::logging::error;

#[derive(Copy, Clone, Debug)]
pub enum Cue {
    Eat,
    Collision,
}

/// The two synthesized cues. Either may be missing if the audio backend
/// failed at startup; playback is then a no-op.
pub struct GameSounds {
    eat: Option<Sound>,
    collision: Option<Sound>,
}

impl GameSounds {
    pub async fn load() -> Self {
        GameSounds {
            eat: decode(generate_wav_square(800.0, 0.08, 0.5)).await,
            collision: decode(generate_wav_square(200.0, 0.3, 0.5)).await,
        }
    }

    /// Fire-and-forget; overlapping playback is allowed.
    pub fn play(&self, cue: Cue) {
        let sound = match cue {
            Cue::Eat => &self.eat,
            Cue::Collision => &self.collision,
        };
        if let Some(sound) = sound {
            audio::play_sound(
                sound,
                PlaySoundParams {
                    looped: false,
                    volume: 1.0,
                },
            );
        }
    }
}

async fn decode(bytes: Vec<u8>) -> Option<Sound> {
    match load_sound_from_bytes(&bytes).await {
        Ok(sound) => Some(sound),
        Err(err) => {
            error!("sound unavailable: {}", err);
            None
        }
    }
}

// Simple WAV (PCM16 mono) generator for square-wave beeps
fn generate_wav_square(frequency_hz: f32, duration_seconds: f32, volume: f32) -> Vec<u8> {
    let sample_rate: u32 = 44100;
    let num_samples: u32 = (duration_seconds * sample_rate as f32) as u32;
    let mut data: Vec<u8> = Vec::with_capacity((num_samples as usize) * 2 + 44);

    let block_align: u16 = 2; // mono 16-bit
    let byte_rate: u32 = sample_rate * block_align as u32;
    let data_size: u32 = num_samples * 2;
    let chunk_size: u32 = 36 + data_size;

    // RIFF header
    data.extend_from_slice(b"RIFF");
    data.extend_from_slice(&chunk_size.to_le_bytes());
    data.extend_from_slice(b"WAVE");
    // fmt chunk
    data.extend_from_slice(b"fmt ");
    data.extend_from_slice(&16u32.to_le_bytes()); // PCM chunk size
    data.extend_from_slice(&1u16.to_le_bytes()); // PCM format
    data.extend_from_slice(&1u16.to_le_bytes()); // channels
    data.extend_from_slice(&sample_rate.to_le_bytes());
    data.extend_from_slice(&byte_rate.to_le_bytes());
    data.extend_from_slice(&block_align.to_le_bytes());
    data.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    // data chunk
    data.extend_from_slice(b"data");
    data.extend_from_slice(&data_size.to_le_bytes());

    let amplitude = volume.clamp(0.0, 1.0) * 0.7;
    let period = (sample_rate as f32 / frequency_hz).max(2.0) as u32;
    for n in 0..num_samples {
        let high = (n % period) < period / 2;
        let level = if high { amplitude } else { -amplitude };
        let sample = (level * i16::MAX as f32) as i16;
        data.extend_from_slice(&sample.to_le_bytes());
    }
    data
}
