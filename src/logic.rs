//! Logic task: owns the game and is the only writer of the shared phase.
//!
//! It waits in `Start` for a debounced press, plays a round at one step per
//! [`TICK_MS`], and after a crash waits in `End` for a fresh press before
//! handing the title back to the overlay. Phase changes happen while the
//! display lock is held, so the overlay never draws for a phase that is
//! already over.

use core::convert::Infallible;

use embassy_sync::{blocking_mutex::raw::RawMutex, mutex::Mutex};
use embedded_hal_async::delay::DelayNs;
use rand::Rng;

use crate::{
    config::{DEBOUNCE_MS, POLL_MS, TICK_MS},
    game::{Collision, Game, Tick},
    input::Input,
    render,
    screen::Screen,
    sound::{self, Sound, SoundQueue},
    state::{GamePhase, SharedState},
};

/// How a round finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "xtensa", derive(defmt::Format))]
pub enum RoundEnd {
    Crashed(Collision),
    /// Every cell is snake.
    Cleared,
}

pub struct LogicTask<'a, M: RawMutex, S, I, D, R, const N: usize> {
    shared: &'a SharedState,
    screen: &'a Mutex<M, S>,
    sounds: &'a SoundQueue<M>,
    input: I,
    delay: D,
    game: Game<R, N>,
}

impl<'a, M, S, I, D, R, const N: usize> LogicTask<'a, M, S, I, D, R, N>
where
    M: RawMutex,
    S: Screen,
    I: Input,
    D: DelayNs,
    R: Rng,
{
    pub fn new(
        shared: &'a SharedState,
        screen: &'a Mutex<M, S>,
        sounds: &'a SoundQueue<M>,
        input: I,
        delay: D,
        game: Game<R, N>,
    ) -> Self {
        Self {
            shared,
            screen,
            sounds,
            input,
            delay,
            game,
        }
    }

    pub const fn game(&self) -> &Game<R, N> {
        &self.game
    }

    /// Runs rounds forever. Returns only if the display fails.
    pub async fn run(&mut self) -> Result<Infallible, S::Error> {
        info!("logic task started");
        loop {
            self.wait_for_phase(GamePhase::Start).await;
            self.wait_for_held_press().await;
            self.start_round().await?;

            let end = self.play().await?;
            info!("round over: {:?}, score {}", end, self.game.score());

            self.wait_for_fresh_press().await;
            {
                let _screen = self.screen.lock().await;
                self.shared.advance(GamePhase::Start);
            }
            // The press that left `End` must not also start the next round.
            self.wait_for_release().await;
        }
    }

    async fn poll(&mut self) {
        self.delay.delay_ms(POLL_MS).await;
    }

    async fn wait_for_phase(&mut self, phase: GamePhase) {
        while self.shared.phase() != phase {
            self.poll().await;
        }
    }

    /// A press counts once the button is still down after [`DEBOUNCE_MS`].
    async fn wait_for_held_press(&mut self) {
        loop {
            while !self.input.any_pressed() {
                self.poll().await;
            }
            self.delay.delay_ms(DEBOUNCE_MS).await;
            if self.input.any_pressed() {
                return;
            }
            debug!("press bounced");
        }
    }

    async fn wait_for_release(&mut self) {
        while self.input.any_pressed() {
            self.poll().await;
        }
    }

    /// Release of every button, then a new press.
    async fn wait_for_fresh_press(&mut self) {
        self.wait_for_release().await;
        while !self.input.any_pressed() {
            self.poll().await;
        }
    }

    async fn start_round(&mut self) -> Result<(), S::Error> {
        if let Err(err) = self.game.restart() {
            // Only a board smaller than the starting snake gets here, and
            // `Game::new` already refused that one.
            warn!("restart refused: {:?}", err);
        }
        {
            let mut screen = self.screen.lock().await;
            render::draw_board(&mut *screen, self.game.snake(), self.game.food())?;
            self.shared.publish_score(0);
            self.shared.advance(GamePhase::Playing);
        }
        sound::cue(self.sounds, Sound::Start);
        Ok(())
    }

    async fn play(&mut self) -> Result<RoundEnd, S::Error> {
        loop {
            self.delay.delay_ms(TICK_MS).await;
            self.game.steer(&self.input);
            let tick = self.game.tick();

            let mut screen = self.screen.lock().await;
            match tick {
                Tick::Advanced(step) => {
                    render::draw_advance(&mut *screen, &step)?;
                    if step.ate {
                        self.shared.publish_score(self.game.score());
                        sound::cue(self.sounds, Sound::Eat);
                    }
                }
                Tick::Crashed(collision) => {
                    self.shared.advance(GamePhase::End);
                    sound::cue(self.sounds, Sound::Crash);
                    return Ok(RoundEnd::Crashed(collision));
                }
                Tick::Filled(step) => {
                    render::draw_advance(&mut *screen, &step)?;
                    self.shared.publish_score(self.game.score());
                    self.shared.advance(GamePhase::End);
                    sound::cue(self.sounds, Sound::Cleared);
                    return Ok(RoundEnd::Cleared);
                }
            }
        }
    }
}
