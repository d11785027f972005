//! Feedback tones.
//!
//! Playing a tone occupies its caller for the whole duration, so the logic
//! task never plays one itself: it drops a [`Sound`] into a bounded queue and
//! [`run_tones`] plays them from a task of its own.

use core::convert::Infallible;

use embassy_sync::{blocking_mutex::raw::RawMutex, channel::Channel};

use crate::config::{TONE_CLEARED, TONE_CRASH, TONE_EAT, TONE_START};

/// Anything that can sound a note, blocking its caller while it plays.
#[allow(async_fn_in_trait)]
pub trait Tone {
    async fn play_tone(&mut self, frequency_hz: u32, duration_ms: u32);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "xtensa", derive(defmt::Format))]
pub enum Sound {
    Start,
    Eat,
    Crash,
    Cleared,
}

impl Sound {
    /// `(frequency_hz, duration_ms)`
    pub const fn tone(self) -> (u32, u32) {
        match self {
            Self::Start => TONE_START,
            Self::Eat => TONE_EAT,
            Self::Crash => TONE_CRASH,
            Self::Cleared => TONE_CLEARED,
        }
    }
}

pub const SOUND_QUEUE_DEPTH: usize = 4;

pub type SoundQueue<M> = Channel<M, Sound, SOUND_QUEUE_DEPTH>;

/// Queues `sound` without waiting. A full queue drops it.
pub fn cue<M: RawMutex>(queue: &SoundQueue<M>, sound: Sound) {
    if queue.try_send(sound).is_err() {
        warn!("sound queue full, dropped {:?}", sound);
    }
}

/// Plays queued sounds forever.
pub async fn run_tones<M: RawMutex, T: Tone>(queue: &SoundQueue<M>, tone: &mut T) -> Infallible {
    info!("tone task started");
    loop {
        let sound = queue.receive().await;
        let (frequency_hz, duration_ms) = sound.tone();
        tone.play_tone(frequency_hz, duration_ms).await;
    }
}
