//! One play session: snake, food, score and the per-tick rules.

use rand::Rng;

use crate::{
    config::START_LENGTH,
    food,
    grid::{Cell, Grid},
    input::{self, Input},
    snake::{ResetError, Snake},
};

/// What ended a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "xtensa", derive(defmt::Format))]
pub enum Collision {
    Wall,
    Body,
}

/// Board delta produced by one successful step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "xtensa", derive(defmt::Format))]
pub struct Advance {
    pub head: Cell,
    /// Tail cell that is now empty, `None` when the snake grew.
    pub vacated: Option<Cell>,
    pub ate: bool,
    /// Freshly spawned food, only after eating.
    pub food: Option<Cell>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_arch = "xtensa", derive(defmt::Format))]
pub enum Tick {
    Advanced(Advance),
    Crashed(Collision),
    /// Food was eaten and no free cell is left: the board is won.
    Filled(Advance),
}

pub struct Game<R, const N: usize> {
    grid: Grid,
    snake: Snake<N>,
    food: Option<Cell>,
    score: u32,
    rng: R,
}

impl<R: Rng, const N: usize> Game<R, N> {
    /// A fresh round with the snake centered on `grid`.
    pub fn new(grid: Grid, rng: R) -> Result<Self, ResetError> {
        let snake = Snake::new(grid.center(), START_LENGTH, &grid)?;
        let mut game = Self {
            grid,
            snake,
            food: None,
            score: 0,
            rng,
        };
        game.food = food::spawn(&mut game.rng, &game.grid, &game.snake);
        Ok(game)
    }

    /// Resets snake, score and food for a new round at the grid center.
    pub fn restart(&mut self) -> Result<(), ResetError> {
        self.start_at(self.grid.center())
    }

    pub fn start_at(&mut self, start: Cell) -> Result<(), ResetError> {
        self.snake.reset(start, START_LENGTH, &self.grid)?;
        self.score = 0;
        self.food = food::spawn(&mut self.rng, &self.grid, &self.snake);
        debug!("round starts at {:?}, food {:?}", start, self.food);
        Ok(())
    }

    /// Applies this tick's input under the reversal guard.
    pub fn steer<I: Input + ?Sized>(&mut self, input: &I) {
        let heading = input::steer(self.snake.direction(), input);
        self.snake.set_direction(heading);
    }

    /// Advances one step. Collisions are checked against the pre-move body
    /// before anything is eaten or moved.
    pub fn tick(&mut self) -> Tick {
        let next = self.snake.propose_move(self.snake.direction());
        if !self.grid.in_bounds(next) {
            return Tick::Crashed(Collision::Wall);
        }
        if self.snake.detect_self_collision(next) {
            return Tick::Crashed(Collision::Body);
        }

        let ate = self.food == Some(next);
        let grew = ate && self.snake.len() < self.max_length();
        let vacated = self.snake.apply_move(next, grew);

        if !ate {
            return Tick::Advanced(Advance {
                head: next,
                vacated,
                ate,
                food: None,
            });
        }

        self.score = self.score.saturating_add(1);
        self.food = food::spawn(&mut self.rng, &self.grid, &self.snake);
        let step = Advance {
            head: next,
            vacated,
            ate,
            food: self.food,
        };
        match self.food {
            Some(_) => Tick::Advanced(step),
            None => Tick::Filled(step),
        }
    }

    /// Growth limit: the engine capacity or the grid area, whichever is less.
    pub fn max_length(&self) -> usize {
        N.min(self.grid.area())
    }

    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    pub const fn snake(&self) -> &Snake<N> {
        &self.snake
    }

    pub const fn food(&self) -> Option<Cell> {
        self.food
    }

    pub const fn score(&self) -> u32 {
        self.score
    }
}

#[cfg(test)]
impl<R: Rng, const N: usize> Game<R, N> {
    pub(crate) fn set_food(&mut self, food: Option<Cell>) {
        self.food = food;
    }

    pub(crate) fn set_snake(&mut self, snake: Snake<N>) {
        self.snake = snake;
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::SmallRng};

    use super::*;
    use crate::{grid::Direction, input::Button, testing::ScriptedInput};

    type TestGame = Game<SmallRng, 100>;

    fn game() -> TestGame {
        Game::new(Grid::new(10, 10), SmallRng::seed_from_u64(3)).unwrap()
    }

    fn body(game: &TestGame) -> Vec<Cell> {
        game.snake().iter().collect()
    }

    #[test]
    fn starts_centered_with_food_off_the_snake() {
        let game = game();
        assert_eq!(
            body(&game),
            vec![Cell::new(5, 5), Cell::new(4, 5), Cell::new(3, 5)]
        );
        let food = game.food().unwrap();
        assert!(!game.snake().contains(food));
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn one_tick_without_input_moves_right() {
        let mut game = game();
        game.set_food(Some(Cell::new(0, 0)));
        game.steer(&ScriptedInput::new());

        let tick = game.tick();

        assert_eq!(
            tick,
            Tick::Advanced(Advance {
                head: Cell::new(6, 5),
                vacated: Some(Cell::new(3, 5)),
                ate: false,
                food: None,
            })
        );
        assert!(!game.snake().contains(Cell::new(3, 5)));
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn right_edge_is_a_wall() {
        let mut game = game();
        game.start_at(Cell::new(9, 5)).unwrap();
        game.set_food(Some(Cell::new(0, 0)));

        assert_eq!(game.tick(), Tick::Crashed(Collision::Wall));
        assert_eq!(game.score(), 0);
        assert_eq!(game.snake().head(), Cell::new(9, 5));
        assert_eq!(game.snake().len(), 3);
    }

    #[test]
    fn eating_to_the_left_grows_and_scores() {
        let mut game = game();
        let grid = *game.grid();
        let cells = [
            Cell::new(2, 5),
            Cell::new(3, 5),
            Cell::new(4, 5),
            Cell::new(5, 5),
        ];
        game.set_snake(Snake::from_cells(&cells, Direction::Left, &grid).unwrap());
        game.set_food(Some(Cell::new(1, 5)));

        assert!(!game.snake().detect_self_collision(Cell::new(1, 5)));
        let Tick::Advanced(step) = game.tick() else {
            panic!("expected an advance");
        };

        assert!(step.ate);
        assert_eq!(step.head, Cell::new(1, 5));
        assert_eq!(step.vacated, None);
        assert_eq!(game.score(), 1);
        assert_eq!(game.snake().len(), 5);
        let food = step.food.unwrap();
        assert_eq!(game.food(), Some(food));
        assert!(!game.snake().contains(food));
    }

    #[test]
    fn collision_wins_over_food() {
        let mut game = game();
        let grid = *game.grid();
        let cells = [
            Cell::new(2, 2),
            Cell::new(2, 3),
            Cell::new(3, 3),
            Cell::new(3, 2),
        ];
        game.set_snake(Snake::from_cells(&cells, Direction::Right, &grid).unwrap());
        game.set_food(Some(Cell::new(3, 2)));

        assert_eq!(game.tick(), Tick::Crashed(Collision::Body));
        assert_eq!(game.score(), 0);
        assert_eq!(game.snake().len(), 4);
    }

    #[test]
    fn filling_the_board_ends_the_round() {
        let mut game: Game<SmallRng, 8> =
            Game::new(Grid::new(4, 1), SmallRng::seed_from_u64(9)).unwrap();
        // Center of a 4x1 grid is (2, 0); the only free cell is (3, 0).
        assert_eq!(game.food(), Some(Cell::new(3, 0)));
        let tick = game.tick();
        assert!(matches!(tick, Tick::Filled(Advance { ate: true, food: None, .. })));
        assert_eq!(game.snake().len(), 4);
        assert_eq!(game.max_length(), 4);
        assert_eq!(game.score(), 1);
    }

    #[test]
    fn restart_resets_score_and_body() {
        let mut game = game();
        game.set_food(Some(Cell::new(6, 5)));
        game.tick();
        assert_eq!(game.score(), 1);

        game.restart().unwrap();
        assert_eq!(game.score(), 0);
        assert_eq!(game.snake().len(), 3);
        assert_eq!(game.snake().head(), Cell::new(5, 5));
        assert_eq!(game.snake().direction(), Direction::Right);
    }

    #[test]
    fn random_play_never_overlaps_and_never_overgrows() {
        let input = ScriptedInput::new();
        let mut steering = SmallRng::seed_from_u64(11);
        for seed in 0..30 {
            let mut game: TestGame =
                Game::new(Grid::new(10, 10), SmallRng::seed_from_u64(seed)).unwrap();
            let mut previous_len = game.snake().len();
            for _ in 0..400 {
                let button = Button::ALL[steering.gen_range(0..4)];
                input.hold(&[button]);
                game.steer(&input);
                match game.tick() {
                    Tick::Advanced(_) => {}
                    Tick::Crashed(_) | Tick::Filled(_) => break,
                }
                let cells = body(&game);
                for (i, c) in cells.iter().enumerate() {
                    assert!(game.grid().in_bounds(*c));
                    assert!(!cells[..i].contains(c), "duplicate cell {c:?}");
                }
                assert!(game.snake().len() >= previous_len);
                assert!(game.snake().len() <= game.max_length());
                previous_len = game.snake().len();
                if let Some(food) = game.food() {
                    assert!(!game.snake().contains(food));
                }
            }
        }
    }
}
