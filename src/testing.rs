//! Host-side fakes for the collaborators: buttons, delays and the display.

use std::{cell::Cell as Slot, rc::Rc};

use embassy_futures::yield_now;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_hal_async::delay::DelayNs;

use crate::{
    input::{Button, Input},
    screen::{CHAR_H, CHAR_W, Rotation, Screen},
};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Yields until `done` holds. Panics instead of hanging forever.
pub async fn until(mut done: impl FnMut() -> bool) {
    for _ in 0..1_000_000 {
        if done() {
            return;
        }
        yield_now().await;
    }
    panic!("condition never became true");
}

// ── Buttons ─────────────────────────────────────────────────────────────────

/// Button levels set by the test, shared with the task under test.
#[derive(Clone, Default)]
pub struct ScriptedInput {
    held: Rc<Slot<u8>>,
}

const fn mask(button: Button) -> u8 {
    1 << button as u8
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hold(&self, buttons: &[Button]) {
        self.held.set(buttons.iter().fold(0, |m, &b| m | mask(b)));
    }

    pub fn release_all(&self) {
        self.held.set(0);
    }
}

impl Input for ScriptedInput {
    fn is_button_pressed(&self, button: Button) -> bool {
        self.held.get() & mask(button) != 0
    }
}

// ── Time ────────────────────────────────────────────────────────────────────

/// Virtual milliseconds, advanced only by [`FakeDelay`].
#[derive(Clone, Default)]
pub struct Clock(Rc<Slot<u64>>);

impl Clock {
    pub fn now_ms(&self) -> u64 {
        self.0.get() / 1000
    }

    fn advance_us(&self, us: u64) {
        self.0.set(self.0.get() + us);
    }
}

/// Advances a [`Clock`] and yields once, so other futures get polled.
pub struct FakeDelay {
    clock: Clock,
}

impl FakeDelay {
    pub fn new(clock: &Clock) -> Self {
        Self {
            clock: clock.clone(),
        }
    }
}

impl DelayNs for FakeDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.clock.advance_us(u64::from(ns.div_ceil(1000)));
        yield_now().await;
    }

    async fn delay_us(&mut self, us: u32) {
        self.clock.advance_us(u64::from(us));
        yield_now().await;
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.clock.advance_us(u64::from(ms) * 1000);
        yield_now().await;
    }
}

// ── Display ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Op {
    Clear(Rgb565),
    Fill(i32, i32, u32, u32, Rgb565),
    Text(String, i32, i32, u8),
    Rotate(Rotation),
}

#[derive(Debug, PartialEq, Eq)]
pub struct ScreenFault;

#[derive(Clone, Copy)]
struct Area {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
}

impl Area {
    const fn overlaps(&self, other: &Self) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

/// Records every call and keeps track of which strings are still visible.
#[derive(Default)]
pub struct RecordingScreen {
    pub ops: Vec<Op>,
    pub fail: bool,
    visible: Vec<(String, Area)>,
    cursor: (i32, i32),
    size: u8,
}

impl RecordingScreen {
    pub fn new() -> Self {
        Self {
            size: 1,
            ..Self::default()
        }
    }

    /// Whether `text` was written and not painted over since.
    pub fn shows(&self, text: &str) -> bool {
        self.visible.iter().any(|(t, _)| t == text)
    }

    pub fn texts(&self) -> Vec<String> {
        self.visible.iter().map(|(t, _)| t.clone()).collect()
    }

    fn check(&self) -> Result<(), ScreenFault> {
        if self.fail { Err(ScreenFault) } else { Ok(()) }
    }
}

impl Screen for RecordingScreen {
    type Error = ScreenFault;

    fn clear(&mut self, color: Rgb565) -> Result<(), Self::Error> {
        self.check()?;
        self.ops.push(Op::Clear(color));
        self.visible.clear();
        Ok(())
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Rgb565) -> Result<(), Self::Error> {
        self.check()?;
        self.ops.push(Op::Fill(x, y, w, h, color));
        let area = Area {
            x,
            y,
            w: w as i32,
            h: h as i32,
        };
        self.visible.retain(|(_, a)| !a.overlaps(&area));
        Ok(())
    }

    fn set_text_cursor(&mut self, x: i32, y: i32) {
        self.cursor = (x, y);
    }

    fn set_text_size(&mut self, size: u8) {
        self.size = size.max(1);
    }

    fn set_text_color(&mut self, _color: Rgb565) {}

    fn write_string(&mut self, text: &str) -> Result<(), Self::Error> {
        self.check()?;
        let (x, y) = self.cursor;
        let size = i32::from(self.size);
        let w = text.len() as i32 * CHAR_W * size;
        self.ops.push(Op::Text(text.into(), x, y, self.size));
        self.visible.push((
            text.into(),
            Area {
                x,
                y,
                w,
                h: CHAR_H * size,
            },
        ));
        self.cursor = (x + w, y);
        Ok(())
    }

    fn set_rotation(&mut self, rotation: Rotation) {
        self.ops.push(Op::Rotate(rotation));
    }
}
