mod direction;
mod fruit;
mod snake;
pub(crate) use self::direction::Direction;
pub(crate) use self::fruit::Fruit;
pub(crate) use self::snake::Snake;
use crate::consts;
use crate::geometry::BoardSize;
use crate::random::{random_direction, random_empty_cell, special_fruit};
use rand::Rng;
use tracing::{debug, info};

/// Where a round is in its lifecycle
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Phase {
    /// No round is in progress; the intro or some server content is shown
    NotStarted,
    Running,
    Paused,
    Over,
}

/// What happened during a call to [`Round::tick()`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum TickOutcome {
    /// The round isn't running, so nothing moved
    Idle,
    Moved,
    /// The snake ate a fruit and grew
    Ate { special: bool, points: u32 },
    /// The snake hit a wall or itself
    GameOver,
}

/// State of a single round of play, plus the random source that carries over
/// between rounds
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Round<R = rand::rngs::ThreadRng> {
    rng: R,
    board: BoardSize,
    phase: Phase,
    /// Whether the snake passes through the edges of the board ("Eli mode")
    wrap: bool,
    /// The direction the snake moved in on the last tick
    direction: Direction,
    /// The direction the snake will move in on the next tick
    queued: Direction,
    snake: Snake,
    fruit: Option<Fruit>,
    score: u32,
    /// Time between ticks in milliseconds
    tick_millis: f64,
    fruits: u32,
    special_fruits: u32,
    /// Unix timestamps of the start & end of the round
    started_at: i64,
    ended_at: i64,
}

impl<R: Rng> Round<R> {
    pub(crate) fn new_with_rng(board: BoardSize, rng: R) -> Round<R> {
        Round {
            rng,
            board,
            phase: Phase::NotStarted,
            wrap: false,
            direction: Direction::North,
            queued: Direction::North,
            snake: Snake::new(board.center()),
            fruit: None,
            score: 0,
            tick_millis: consts::BASE_TICK_MILLIS,
            fruits: 0,
            special_fruits: 0,
            started_at: 0,
            ended_at: 0,
        }
    }

    /// Begin a fresh round, discarding everything from the previous one
    pub(crate) fn start(&mut self, wrap: bool) {
        let direction = random_direction(&mut self.rng);
        self.phase = Phase::Running;
        self.wrap = wrap;
        self.direction = direction;
        self.queued = direction;
        self.snake = Snake::new(self.board.center());
        self.fruit = None;
        self.score = 0;
        self.tick_millis = consts::BASE_TICK_MILLIS;
        self.fruits = 0;
        self.special_fruits = 0;
        self.started_at = chrono::Utc::now().timestamp();
        self.ended_at = 0;
        info!(wrap, ?direction, "Starting new round");
    }

    /// Advance the snake by one cell and apply the consequences
    pub(crate) fn tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Running {
            return TickOutcome::Idle;
        }
        self.direction = self.queued;
        let Some(head) = self
            .direction
            .advance(self.snake.head(), self.board, self.wrap)
        else {
            self.finish();
            return TickOutcome::GameOver;
        };
        self.snake.push_head(head);

        let mut expired = false;
        if let Some(fruit) = self.fruit.as_mut() {
            fruit.steps = fruit.steps.saturating_add(1);
        }
        if self.fruit.as_ref().is_some_and(Fruit::expired) {
            debug!("Special fruit expired");
            self.fruit = None;
            expired = true;
        }

        let mut outcome = TickOutcome::Moved;
        match self.fruit {
            Some(fruit) if fruit.pos == head => {
                let points = fruit.points();
                self.score = self.score.saturating_add(points);
                if fruit.special {
                    self.special_fruits += 1;
                } else {
                    self.fruits += 1;
                }
                self.tick_millis *= consts::TICK_DECAY;
                self.fruit = None;
                debug!(
                    points,
                    special = fruit.special,
                    score = self.score,
                    "Fruit eaten"
                );
                outcome = TickOutcome::Ate {
                    special: fruit.special,
                    points,
                };
            }
            _ => self.snake.drop_tail(),
        }

        if self.snake.bites_itself() {
            self.finish();
            return TickOutcome::GameOver;
        }
        if self.fruit.is_none() && !expired {
            self.place_fruit();
        }
        outcome
    }

    fn place_fruit(&mut self) {
        let occupied = self.snake.segments().iter().copied().collect::<Vec<_>>();
        if let Some(pos) = random_empty_cell(&mut self.rng, self.board, &occupied) {
            let special = special_fruit(&mut self.rng);
            let distance = self.snake.head().manhattan(pos);
            self.fruit = Some(Fruit::new(pos, special, distance));
        }
    }
}

impl<R> Round<R> {
    /// Queue a change of direction for the next tick.  Any direction key also
    /// unpauses a paused round.
    ///
    /// Only turns onto the axis perpendicular to the direction of the last
    /// movement are accepted.  The check is made against the last movement
    /// rather than the queued direction so that two quick turns within one
    /// tick can't reverse the snake into itself.
    pub(crate) fn steer(&mut self, to: Direction) {
        if self.phase == Phase::Paused {
            self.phase = Phase::Running;
        }
        if self.phase == Phase::Running && self.direction.can_turn_to(to) {
            self.queued = to;
        }
    }

    /// Pause a running round
    pub(crate) fn pause(&mut self) {
        if self.phase == Phase::Running {
            self.phase = Phase::Paused;
        }
    }

    /// Leave the game-over state and return to the idle state
    pub(crate) fn acknowledge(&mut self) {
        if self.phase == Phase::Over {
            self.phase = Phase::NotStarted;
        }
    }

    /// Throw away the score of a finished round so that it isn't posted
    pub(crate) fn forfeit_score(&mut self) {
        if self.phase == Phase::Over {
            self.score = 0;
        }
    }

    fn finish(&mut self) {
        self.phase = Phase::Over;
        self.ended_at = chrono::Utc::now().timestamp();
        info!(
            score = self.score,
            fruits = self.fruits,
            special_fruits = self.special_fruits,
            "Game over"
        );
    }

    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub(crate) fn wrap(&self) -> bool {
        self.wrap
    }

    pub(crate) fn board(&self) -> BoardSize {
        self.board
    }

    pub(crate) fn snake(&self) -> &Snake {
        &self.snake
    }

    pub(crate) fn fruit(&self) -> Option<&Fruit> {
        self.fruit.as_ref()
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn tick_millis(&self) -> f64 {
        self.tick_millis
    }

    pub(crate) fn fruits(&self) -> u32 {
        self.fruits
    }

    pub(crate) fn special_fruits(&self) -> u32 {
        self.special_fruits
    }

    pub(crate) fn started_at(&self) -> i64 {
        self.started_at
    }

    pub(crate) fn ended_at(&self) -> i64 {
        self.ended_at
    }

    #[cfg(test)]
    pub(crate) fn set_score(&mut self, score: u32) {
        self.score = score;
    }
}
