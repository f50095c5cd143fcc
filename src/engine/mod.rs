//! Game rules and the presentation boundary.
//!
//! `GameEngine` is the only thing that mutates a `GameState`. Renderers
//! observe committed states; share targets receive the final score.

pub mod game;
pub mod render;

pub use game::GameEngine;
pub use render::{share_message, Renderer, ShareTarget};
