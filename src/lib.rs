//! # snake-badge
//!
//! Snake for the Disobey 2026 badge, split across both ESP32-S3 cores.
//!
//! - **Logic task** (core 0): input, movement, collisions, food, the board.
//! - **Overlay task** (core 1): title, HUD and game-over screens, the
//!   blinking prompt.
//! - **Tone task** (core 0): plays queued feedback on the vibration motor.
//!
//! The two drawing tasks agree through [`state::SharedState`] (an atomic
//! phase and score written only by the logic task) and a mutex around the
//! display.
//!
//! Everything except the board support modules is portable and runs its
//! tests on the host:
//!
//! ```text
//! cargo test --lib --target x86_64-unknown-linux-gnu
//! ```
//!
//! ## Quick start (badge)
//!
//! ```rust,ignore
//! let peripherals = snake_badge::init();
//! let resources = snake_badge::split_resources!(peripherals);
//!
//! let display = snake_badge::display::open(resources.display)?;
//! let buttons: snake_badge::Buttons = resources.buttons.into();
//! ```

#![cfg_attr(not(test), no_std)]

// Must come first so the logging macros are visible to every module.
mod fmt;

pub mod config;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod logic;
pub mod overlay;
pub mod render;
pub mod screen;
pub mod snake;
pub mod sound;
pub mod state;

#[cfg(test)]
mod testing;

#[cfg(target_arch = "xtensa")]
mod backlight;
#[cfg(target_arch = "xtensa")]
mod buttons;
#[cfg(target_arch = "xtensa")]
pub mod display;
#[cfg(target_arch = "xtensa")]
mod vibration;

#[cfg(target_arch = "xtensa")]
pub use backlight::Backlight;
#[cfg(target_arch = "xtensa")]
pub use buttons::Buttons;
#[cfg(target_arch = "xtensa")]
pub use display::{Display, DisplayInitError, Panel};
#[cfg(target_arch = "xtensa")]
pub use vibration::Vibration;

/// StaticCell helper: allocates a value into a `static` exactly once.
#[cfg(target_arch = "xtensa")]
#[macro_export]
macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        #[deny(unused_attributes)]
        let x = STATIC_CELL.uninit().write($val);
        x
    }};
}

#[cfg(target_arch = "xtensa")]
pub use board::*;

#[cfg(target_arch = "xtensa")]
mod board {
    use esp_hal::{
        assign_resources,
        clock::{
            Clock,
            CpuClock,
        },
        rom,
    };

    // ── Pin / peripheral assignments ────────────────────────────────────────

    assign_resources! {
        pub Resources<'d> {
            display: DisplayResources<'d> {
                dc: GPIO15,
                rst: GPIO7,
                sck: GPIO4,
                cs: GPIO6,
                miso: GPIO16,
                mosi: GPIO5,
                spi: SPI2,
                dma: DMA_CH0,
            },
            backlight: BacklightResources<'d> {
                led: GPIO19,
            },
            buttons: ButtonResources<'d> {
                up: GPIO11,
                down: GPIO1,
                left: GPIO21,
                right: GPIO2,
                stick: GPIO14,
                a: GPIO13,
                b: GPIO38,
                start: GPIO12,
                select: GPIO45,
            },
            vibra: VibrationResources<'d> {
                motor: GPIO20,
            },
        }
    }

    // ── Board initialisation ────────────────────────────────────────────────

    /// Minimal CPU clock switcher for ESP32-S3.
    ///
    /// Steps through an intermediate frequency before reaching the target,
    /// which is required by the hardware.
    fn set_cpu_clock(cpu_clock_speed: CpuClock) {
        let _ = esp_hal::peripherals::SYSTEM::regs()
            .sysclk_conf()
            .modify(|_, w| unsafe { w.soc_clk_sel().bits(1) });
        let _ = esp_hal::peripherals::SYSTEM::regs()
            .cpu_per_conf()
            .modify(|_, w| unsafe {
                let _ = w.pll_freq_sel().set_bit();
                w.cpuperiod_sel().bits(match cpu_clock_speed {
                    CpuClock::_80MHz => 0,
                    CpuClock::_160MHz => 1,
                    _ => 2,
                })
            });

        rom::ets_update_cpu_frequency_rom(cpu_clock_speed.frequency().as_mhz());
    }

    /// Initialise the badge hardware and return the raw peripheral set.
    ///
    /// Call this once at the top of `main`, then break the peripherals into
    /// typed groups with [`split_resources!`].
    #[must_use]
    pub fn init() -> esp_hal::peripherals::Peripherals {
        set_cpu_clock(CpuClock::_160MHz);
        let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
        esp_hal::init(config)
    }
}
