//! Vibration motor, the badge's only sound source.

use embassy_time::{
    Duration,
    Timer,
};
use esp_hal::gpio::{
    Level,
    Output,
    OutputConfig,
};

use crate::{
    VibrationResources,
    sound::Tone,
};

/// Controls the onboard vibration motor.
pub struct Vibration {
    pin: Output<'static>,
}

impl From<VibrationResources<'static>> for Vibration {
    fn from(res: VibrationResources<'static>) -> Self {
        Self {
            pin: Output::new(res.motor, Level::Low, OutputConfig::default()),
        }
    }
}

impl Vibration {
    pub fn on(&mut self) {
        self.pin.set_high();
    }

    pub fn off(&mut self) {
        self.pin.set_low();
    }

    /// Buzz for the given duration, then stop.
    pub async fn pulse(&mut self, duration: Duration) {
        self.on();
        Timer::after(duration).await;
        self.off();
    }
}

impl Tone for Vibration {
    /// The motor has a single speed: only the duration is felt.
    async fn play_tone(&mut self, frequency_hz: u32, duration_ms: u32) {
        debug!("tone {} Hz for {} ms", frequency_hz, duration_ms);
        self.pulse(Duration::from_millis(u64::from(duration_ms))).await;
    }
}
