//! The play game as a state machine.
//!
//! [`PlaySession`] holds the score and the pool of quizzes not yet asked. It
//! does no I/O: the engine draws a quiz, asks it, and feeds the response back
//! through [`PlaySession::answer`].

use std::collections::HashSet;

use rand::Rng;
use serde::Serialize;

use crate::model::Quiz;

/// Where a play session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlayState {
    /// More quizzes may be drawn.
    Asking,
    /// Every quiz was answered correctly.
    Won,
    /// A quiz was answered incorrectly.
    Lost,
}

impl PlayState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, PlayState::Asking)
    }
}

/// What happened to one answered round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundResult {
    Correct { score: u32 },
    Incorrect { score: u32 },
}

/// Final result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlayOutcome {
    pub state: PlayState,
    /// Correct answers given.
    pub score: u32,
    /// Quizzes in the pool when the game started.
    pub total: usize,
}

impl PlayOutcome {
    pub fn is_win(&self) -> bool {
        self.state == PlayState::Won
    }
}

/// One game of play: the running score and the remaining pool.
#[derive(Debug, Clone)]
pub struct PlaySession {
    pool: Vec<Quiz>,
    total: usize,
    score: u32,
    state: PlayState,
}

impl PlaySession {
    /// Start a game over `quizzes`. Repeated ids are dropped so no quiz can
    /// be asked twice.
    pub fn new(quizzes: Vec<Quiz>) -> Self {
        let mut seen = HashSet::new();
        let pool: Vec<Quiz> = quizzes.into_iter().filter(|q| seen.insert(q.id)).collect();
        Self {
            total: pool.len(),
            pool,
            score: 0,
            state: PlayState::Asking,
        }
    }

    /// Pick the next quiz uniformly at random and take it out of the pool.
    ///
    /// The quiz leaves the pool before it is asked. Returns `None` once the
    /// game is over; an empty pool turns an ongoing game into a win.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Quiz> {
        if self.state.is_terminal() {
            return None;
        }
        if self.pool.is_empty() {
            self.state = PlayState::Won;
            return None;
        }

        let index = rng.random_range(0..self.pool.len());
        Some(self.pool.remove(index))
    }

    /// Score the response to a quiz returned by [`draw`](Self::draw).
    pub fn answer(&mut self, quiz: &Quiz, response: &str) -> RoundResult {
        if quiz.is_answered_by(response) {
            self.score += 1;
            RoundResult::Correct { score: self.score }
        } else {
            self.state = PlayState::Lost;
            RoundResult::Incorrect { score: self.score }
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    /// Quizzes not asked yet.
    pub fn remaining(&self) -> usize {
        self.pool.len()
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn outcome(&self) -> PlayOutcome {
        PlayOutcome {
            state: self.state,
            score: self.score,
            total: self.total,
        }
    }
}
