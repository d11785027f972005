//! Compile-time game configuration.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// ── Display / board geometry ────────────────────────────────────────────────
pub const SCREEN_W: i32 = 320;
pub const SCREEN_H: i32 = 170;

pub const CELL_SIZE: i32 = 5; // pixel size of one grid cell
pub const HUD_HEIGHT: i32 = 10; // score strip above the board

pub const GRID_WIDTH: i16 = (SCREEN_W / CELL_SIZE) as i16;
pub const GRID_HEIGHT: i16 = ((SCREEN_H - HUD_HEIGHT) / CELL_SIZE) as i16;
pub const MAX_SNAKE_LENGTH: usize = GRID_WIDTH as usize * GRID_HEIGHT as usize;

pub const START_LENGTH: usize = 3;

// ── Timing ──────────────────────────────────────────────────────────────────
pub const TICK_MS: u32 = 200; // one snake step
pub const DEBOUNCE_MS: u32 = 100; // hold time before a round starts
pub const POLL_MS: u32 = 10; // sampling period of every "wait until"
pub const BLINK_MS: u32 = 1000; // prompt visibility toggle

// ── Food ────────────────────────────────────────────────────────────────────
pub const MAX_SPAWN_ATTEMPTS: u32 = 64;

// ── Colors ──────────────────────────────────────────────────────────────────
pub const BG_COLOR: Rgb565 = Rgb565::BLACK;
pub const SNAKE_COLOR: Rgb565 = Rgb565::GREEN;
pub const FOOD_COLOR: Rgb565 = Rgb565::RED;
pub const TEXT_COLOR: Rgb565 = Rgb565::WHITE;
pub const TITLE_COLOR: Rgb565 = Rgb565::GREEN;
pub const GAME_OVER_COLOR: Rgb565 = Rgb565::RED;
pub const HUD_COLOR: Rgb565 = Rgb565::new(4, 8, 4);

// ── Feedback tones (frequency Hz, duration ms) ──────────────────────────────
pub const TONE_START: (u32, u32) = (880, 60);
pub const TONE_EAT: (u32, u32) = (1320, 30);
pub const TONE_CRASH: (u32, u32) = (110, 400);
pub const TONE_CLEARED: (u32, u32) = (1760, 250);
