//! Badge buttons as game input.
//!
//! Only the D-pad is game input: it steers, and a held direction starts a
//! round. The other five buttons are wired up but not read.

use esp_hal::gpio::{
    Input,
    InputConfig,
    Pull,
};

use crate::{
    ButtonResources,
    input::{
        self,
        Button,
    },
};

/// All nine badge buttons, sampled by level.
pub struct Buttons {
    pub up: Input<'static>,
    pub down: Input<'static>,
    pub left: Input<'static>,
    pub right: Input<'static>,
    pub stick: Input<'static>,
    pub a: Input<'static>,
    pub b: Input<'static>,
    pub start: Input<'static>,
    pub select: Input<'static>,
}

impl From<ButtonResources<'static>> for Buttons {
    fn from(res: ButtonResources<'static>) -> Self {
        let pull_up = InputConfig::default().with_pull(Pull::Up);
        Self {
            up: Input::new(res.up, pull_up),
            down: Input::new(res.down, pull_up),
            left: Input::new(res.left, pull_up),
            right: Input::new(res.right, pull_up),
            stick: Input::new(res.stick, pull_up),
            a: Input::new(res.a, pull_up),
            b: Input::new(res.b, pull_up),
            start: Input::new(res.start, pull_up),
            // Select is wired active high.
            select: Input::new(res.select, InputConfig::default().with_pull(Pull::Down)),
        }
    }
}

impl input::Input for Buttons {
    fn is_button_pressed(&self, button: Button) -> bool {
        match button {
            Button::Up => self.up.is_low(),
            Button::Down => self.down.is_low(),
            Button::Left => self.left.is_low(),
            Button::Right => self.right.is_low(),
        }
    }
}
