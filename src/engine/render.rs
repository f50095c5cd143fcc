//! Presentation boundary.
//!
//! The engine never draws anything. It hands each committed `GameState`
//! to a `Renderer`, and offers the final score to a `ShareTarget` from
//! the end screen.

use crate::core::GameState;

/// Observer of committed game states.
///
/// Called once when attached and again after every commit that changes
/// the state. Implementations only read.
pub trait Renderer {
    fn render(&mut self, state: &GameState);
}

impl<F> Renderer for F
where
    F: FnMut(&GameState),
{
    fn render(&mut self, state: &GameState) {
        self(state)
    }
}

/// Side-effecting share action offered on the end screen.
pub trait ShareTarget {
    fn share(&mut self, message: &str);
}

impl<F> ShareTarget for F
where
    F: FnMut(&str),
{
    fn share(&mut self, message: &str) {
        self(message)
    }
}

/// Message posted by the share action.
#[must_use]
pub fn share_message(score: u32) -> String {
    format!("I scored {} points in Whack-a-Mole! Can you beat it? #WhackAMoleGame", score)
}
