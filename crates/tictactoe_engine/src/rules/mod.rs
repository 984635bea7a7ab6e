//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). Rules are separated from
//! board storage so the engine, the invariants and the tests share them.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, Line, Win, evaluate_winner};
