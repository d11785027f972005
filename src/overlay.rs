//! Overlay task: everything on screen that is not the board.
//!
//! Reads the shared phase and score, never writes them. On each phase change
//! it draws that phase's static screen, then keeps it alive: the prompt blinks
//! on the title and game-over screens, and the HUD follows the score while a
//! round is played. Every draw re-reads the phase under the display lock, so a
//! screen that the logic task has already replaced is never painted over.

use core::convert::Infallible;

use embassy_sync::{blocking_mutex::raw::RawMutex, mutex::Mutex};
use embedded_hal_async::delay::DelayNs;

use crate::{
    config::{BLINK_MS, POLL_MS},
    render,
    screen::Screen,
    state::{GamePhase, SharedState},
};

pub struct OverlayTask<'a, M: RawMutex, S, D> {
    shared: &'a SharedState,
    screen: &'a Mutex<M, S>,
    delay: D,
    shown: Option<GamePhase>,
}

impl<'a, M, S, D> OverlayTask<'a, M, S, D>
where
    M: RawMutex,
    S: Screen,
    D: DelayNs,
{
    pub const fn new(shared: &'a SharedState, screen: &'a Mutex<M, S>, delay: D) -> Self {
        Self {
            shared,
            screen,
            delay,
            shown: None,
        }
    }

    /// Runs forever. Returns only if the display fails.
    pub async fn run(&mut self) -> Result<Infallible, S::Error> {
        info!("overlay task started");
        loop {
            self.wait_for_change().await;
            let phase = self.present().await?;
            self.animate(phase).await?;
        }
    }

    async fn wait_for_change(&mut self) {
        while Some(self.shared.phase()) == self.shown {
            self.delay.delay_ms(POLL_MS).await;
        }
    }

    /// Draws the static screen of whatever phase is current once the lock
    /// is ours.
    async fn present(&mut self) -> Result<GamePhase, S::Error> {
        let mut screen = self.screen.lock().await;
        let phase = self.shared.phase();
        match phase {
            GamePhase::Start => render::draw_title(&mut *screen)?,
            GamePhase::Playing => render::draw_hud(&mut *screen, self.shared.score())?,
            GamePhase::End => render::draw_game_over(&mut *screen, self.shared.score())?,
        }
        debug!("overlay shows {:?}", phase);
        self.shown = Some(phase);
        Ok(phase)
    }

    /// Keeps `phase`'s screen alive until the phase moves on.
    async fn animate(&mut self, phase: GamePhase) -> Result<(), S::Error> {
        let mut prompt_visible = true;
        let mut since_blink = 0;
        let mut score = self.shared.score();

        loop {
            self.delay.delay_ms(POLL_MS).await;
            since_blink += POLL_MS;
            if self.shared.phase() != phase {
                return Ok(());
            }

            match phase {
                GamePhase::Start | GamePhase::End => {
                    if since_blink < BLINK_MS {
                        continue;
                    }
                    since_blink = 0;
                    let mut screen = self.screen.lock().await;
                    if self.shared.phase() != phase {
                        return Ok(());
                    }
                    prompt_visible = !prompt_visible;
                    render::draw_prompt(&mut *screen, prompt_visible)?;
                }
                GamePhase::Playing => {
                    let now = self.shared.score();
                    if now == score {
                        continue;
                    }
                    let mut screen = self.screen.lock().await;
                    if self.shared.phase() != phase {
                        return Ok(());
                    }
                    render::draw_hud(&mut *screen, now)?;
                    score = now;
                }
            }
        }
    }
}
