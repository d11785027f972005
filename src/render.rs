//! Presentation: turns board deltas and phases into [`Screen`] calls.

use core::fmt::Write as _;

use crate::{
    config::{
        BG_COLOR, CELL_SIZE, FOOD_COLOR, GAME_OVER_COLOR, HUD_COLOR, HUD_HEIGHT, SCREEN_H,
        SCREEN_W, SNAKE_COLOR, TEXT_COLOR, TITLE_COLOR,
    },
    game::Advance,
    grid::Cell,
    screen::{CHAR_H, CHAR_W, Screen},
    snake::Snake,
};
use embedded_graphics::pixelcolor::Rgb565;

pub const PROMPT: &str = "PRESS ANY BUTTON";
pub const TITLE: &str = "SNAKE";
pub const GAME_OVER: &str = "GAME OVER";

const PROMPT_SIZE: u8 = 2;
const PROMPT_Y: i32 = SCREEN_H - 40;
const TITLE_SIZE: u8 = 5;
const TITLE_Y: i32 = 30;
const GAME_OVER_SIZE: u8 = 3;
const GAME_OVER_Y: i32 = 30;
const FINAL_SCORE_SIZE: u8 = 2;
const FINAL_SCORE_Y: i32 = 80;

type Line = heapless::String<24>;

fn score_line(score: u32) -> Line {
    let mut line = Line::new();
    // 24 bytes always fit "SCORE " and a u32.
    let _ = write!(line, "SCORE {score}");
    line
}

/// Pixel width of `text` at `size`.
pub const fn text_width(text: &str, size: u8) -> i32 {
    text.len() as i32 * CHAR_W * size as i32
}

const fn centered_x(text: &str, size: u8) -> i32 {
    (SCREEN_W - text_width(text, size)) / 2
}

fn write_at<S: Screen>(
    screen: &mut S,
    text: &str,
    x: i32,
    y: i32,
    size: u8,
    color: Rgb565,
) -> Result<(), S::Error> {
    screen.set_text_size(size);
    screen.set_text_color(color);
    screen.set_text_cursor(x, y);
    screen.write_string(text)
}

fn write_centered<S: Screen>(
    screen: &mut S,
    text: &str,
    y: i32,
    size: u8,
    color: Rgb565,
) -> Result<(), S::Error> {
    write_at(screen, text, centered_x(text, size), y, size, color)
}

// ── Board ───────────────────────────────────────────────────────────────────

/// Top-left pixel of a grid cell; the board sits below the HUD strip.
pub const fn cell_origin(cell: Cell) -> (i32, i32) {
    (
        cell.x as i32 * CELL_SIZE,
        HUD_HEIGHT + cell.y as i32 * CELL_SIZE,
    )
}

pub fn draw_cell<S: Screen>(screen: &mut S, cell: Cell, color: Rgb565) -> Result<(), S::Error> {
    let (x, y) = cell_origin(cell);
    screen.fill_rect(x, y, CELL_SIZE as u32, CELL_SIZE as u32, color)
}

/// Full redraw at the start of a round.
pub fn draw_board<S: Screen, const N: usize>(
    screen: &mut S,
    snake: &Snake<N>,
    food: Option<Cell>,
) -> Result<(), S::Error> {
    screen.clear(BG_COLOR)?;
    for cell in snake.iter() {
        draw_cell(screen, cell, SNAKE_COLOR)?;
    }
    if let Some(food) = food {
        draw_cell(screen, food, FOOD_COLOR)?;
    }
    Ok(())
}

/// Incremental draw of one step: erase the old tail, paint the new head,
/// then the respawned food.
pub fn draw_advance<S: Screen>(screen: &mut S, step: &Advance) -> Result<(), S::Error> {
    if let Some(tail) = step.vacated {
        draw_cell(screen, tail, BG_COLOR)?;
    }
    draw_cell(screen, step.head, SNAKE_COLOR)?;
    if let Some(food) = step.food {
        draw_cell(screen, food, FOOD_COLOR)?;
    }
    Ok(())
}

// ── Phase screens ───────────────────────────────────────────────────────────

pub fn draw_title<S: Screen>(screen: &mut S) -> Result<(), S::Error> {
    screen.clear(BG_COLOR)?;
    write_centered(screen, TITLE, TITLE_Y, TITLE_SIZE, TITLE_COLOR)?;
    draw_prompt(screen, true)
}

pub fn draw_game_over<S: Screen>(screen: &mut S, score: u32) -> Result<(), S::Error> {
    screen.clear(BG_COLOR)?;
    write_centered(screen, GAME_OVER, GAME_OVER_Y, GAME_OVER_SIZE, GAME_OVER_COLOR)?;
    let line = score_line(score);
    write_centered(screen, &line, FINAL_SCORE_Y, FINAL_SCORE_SIZE, TEXT_COLOR)?;
    draw_prompt(screen, true)
}

/// Shows the prompt, or blanks its box.
pub fn draw_prompt<S: Screen>(screen: &mut S, visible: bool) -> Result<(), S::Error> {
    if visible {
        write_centered(screen, PROMPT, PROMPT_Y, PROMPT_SIZE, TEXT_COLOR)
    } else {
        screen.fill_rect(
            centered_x(PROMPT, PROMPT_SIZE),
            PROMPT_Y,
            text_width(PROMPT, PROMPT_SIZE) as u32,
            (CHAR_H * PROMPT_SIZE as i32) as u32,
            BG_COLOR,
        )
    }
}

/// Score strip above the board.
pub fn draw_hud<S: Screen>(screen: &mut S, score: u32) -> Result<(), S::Error> {
    screen.fill_rect(0, 0, SCREEN_W as u32, HUD_HEIGHT as u32, HUD_COLOR)?;
    let line = score_line(score);
    write_at(screen, &line, 2, 0, 1, TEXT_COLOR)
}
