//! Directional buttons and the reversal guard.

use crate::grid::Direction;

/// The four logical buttons the game reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "xtensa", derive(defmt::Format))]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
}

impl Button {
    /// Sampling order; earlier buttons win when several are held.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];
}

impl From<Button> for Direction {
    fn from(button: Button) -> Self {
        match button {
            Button::Up => Self::Up,
            Button::Down => Self::Down,
            Button::Left => Self::Left,
            Button::Right => Self::Right,
        }
    }
}

/// Raw button levels, already translated to "pressed".
pub trait Input {
    fn is_button_pressed(&self, button: Button) -> bool;

    fn any_pressed(&self) -> bool {
        Button::ALL.iter().any(|&b| self.is_button_pressed(b))
    }
}

impl<T: Input + ?Sized> Input for &T {
    fn is_button_pressed(&self, button: Button) -> bool {
        T::is_button_pressed(self, button)
    }

    fn any_pressed(&self) -> bool {
        T::any_pressed(self)
    }
}

/// New heading for this tick: the first held button that is not a
/// 180° reversal of `current`, or `current` when there is none.
pub fn steer<I: Input + ?Sized>(current: Direction, input: &I) -> Direction {
    Button::ALL
        .into_iter()
        .filter(|&b| input.is_button_pressed(b))
        .map(Direction::from)
        .find(|&d| d != current.opposite())
        .unwrap_or(current)
}
