//! Game lifecycle and the state shared between the two cores.
//!
//! [`SharedState`] is the only thing the logic and overlay tasks have in
//! common besides the display lock. Every field has a single writer, the
//! logic task; the overlay only loads. Stores use `Release` and loads use
//! `Acquire`, so a phase change is never observed before the writes that
//! preceded it on the other core.

use core::sync::atomic::{AtomicU8, AtomicU32, Ordering};

/// Lifecycle phase of the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "xtensa", derive(defmt::Format))]
#[repr(u8)]
pub enum GamePhase {
    Start = 0,
    Playing = 1,
    End = 2,
}

impl GamePhase {
    const fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Self::Playing,
            2 => Self::End,
            _ => Self::Start,
        }
    }

    /// Whether `self → next` is one of the three legal edges.
    pub const fn can_advance_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Start, Self::Playing) | (Self::Playing, Self::End) | (Self::End, Self::Start)
        )
    }
}

pub struct SharedState {
    phase: AtomicU8,
    score: AtomicU32,
}

impl SharedState {
    pub const fn new() -> Self {
        Self {
            phase: AtomicU8::new(GamePhase::Start as u8),
            score: AtomicU32::new(0),
        }
    }

    pub fn phase(&self) -> GamePhase {
        GamePhase::from_u8(self.phase.load(Ordering::Acquire))
    }

    pub fn score(&self) -> u32 {
        self.score.load(Ordering::Acquire)
    }

    /// Moves to `next` if that is a legal edge. Staying in the current phase
    /// is a silent no-op; illegal edges are refused and logged.
    ///
    /// Writer: logic task only.
    pub(crate) fn advance(&self, next: GamePhase) -> bool {
        let current = self.phase();
        if current == next {
            return false;
        }
        if !current.can_advance_to(next) {
            warn!("refused phase change {:?} -> {:?}", current, next);
            return false;
        }
        self.phase.store(next as u8, Ordering::Release);
        info!("phase {:?} -> {:?}", current, next);
        true
    }

    /// Writer: logic task only.
    pub(crate) fn publish_score(&self, score: u32) {
        self.score.store(score, Ordering::Release);
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}
